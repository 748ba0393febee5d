#![no_std]

pub mod engine;
pub mod handoff;
pub mod math8;
pub mod modulator;
pub mod pattern;
pub mod selector;
pub mod sequencer;
pub mod storage;
pub mod tick_scheduler;
pub mod timing;
pub mod waveform;

pub use engine::{Engine, EngineConfig};
pub use handoff::SharedState;
pub use modulator::{Subframe, SubframeModulator};
pub use pattern::{
    BuiltinPattern, DEFAULT_LIBRARY, FragmentLength, LinearRamp, Pattern, PatternFragment,
    PatternLibrary,
};
pub use selector::{InputDebouncer, PatternSelector};
pub use sequencer::{FrameOutcome, FrameSequencer, PlaybackState};
pub use storage::{NoStore, NonVolatileStore, RamStore, StoreError};
pub use tick_scheduler::{SoftTimer, TickResult, TickScheduler};
pub use timing::TimerTiming;
pub use waveform::Waveform;

pub use embassy_time::{Duration, Instant};

/// Number of output channels
pub const CHANNELS: usize = 2;

/// Level of each output channel
pub type ChannelLevels = [u8; CHANNELS];

/// State of both output pins for a single tick
///
/// Bit 0 drives channel 0, bit 1 drives channel 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortBits(u8);

impl PortBits {
    /// Both outputs low
    pub const OFF: Self = Self(0);

    /// Build from the two channel states
    pub const fn new(channel0: bool, channel1: bool) -> Self {
        Self((channel0 as u8) | ((channel1 as u8) << 1))
    }

    /// Whether the given channel is lit
    pub const fn channel(self, channel: usize) -> bool {
        self.0 & (1 << channel) != 0
    }

    /// Raw port value, ready to be written to a GPIO register
    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// Output port driving both LED pins
///
/// Implement this trait for the target's GPIO. Both pins must change in a
/// single write.
pub trait OutputPort {
    /// Write the pin states for the current tick
    fn write(&mut self, bits: PortBits);
}

/// Button input line
///
/// The physical line is pulled up and active-low; implementations report
/// the logical "pressed" state.
pub trait InputLine {
    /// Sample the line
    fn is_pressed(&mut self) -> bool;
}

/// Periodic hardware timer that fires the tick interrupt
pub trait TickTimer {
    /// Load the timer's countdown register
    fn reload(&mut self, value: u8);
}
