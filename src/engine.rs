//! Background loop: boots from the persisted pattern and runs the frame
//! sequencer at every frame boundary claimed from the tick interrupt.

use core::hint::spin_loop;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::InputLine;
use crate::handoff::SharedState;
use crate::modulator::SubframeModulator;
use crate::pattern::{Pattern, PatternLibrary};
use crate::selector::{DEFAULT_COOLDOWN_FRAMES, InputDebouncer, PatternSelector};
use crate::sequencer::{FrameOutcome, FrameSequencer, PlaybackState};
use crate::storage::NonVolatileStore;
use crate::timing::TimerTiming;

/// Configuration for the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub timing: TimerTiming,
    /// Frames ignored after an accepted button press
    pub cooldown_frames: u8,
}

impl EngineConfig {
    pub const DEFAULT: Self = Self {
        timing: TimerTiming::DEFAULT,
        cooldown_frames: DEFAULT_COOLDOWN_FRAMES,
    };

    /// Tick handler matching this configuration
    pub const fn modulator(&self) -> SubframeModulator {
        SubframeModulator::new(&self.timing)
    }

    /// Boot-time shared state matching this configuration
    pub const fn shared_state(&self) -> SharedState {
        SharedState::new(self.timing.subframe_limit)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Background side of the firmware
///
/// The tick interrupt runs [`SubframeModulator::tick`] against the same
/// [`SharedState`]; the engine runs the frame sequencer and the selector
/// once per frame boundary raised by the interrupt.
pub struct Engine<'a, S: NonVolatileStore> {
    shared: &'a SharedState,
    sequencer: FrameSequencer<'a>,
    selector: PatternSelector<S>,
}

impl<'a, S: NonVolatileStore> Engine<'a, S> {
    /// Restore the persisted pattern and prepare its first frame
    ///
    /// The timer is armed by the caller once this returns.
    pub fn boot(
        shared: &'a SharedState,
        library: &'a PatternLibrary,
        config: &EngineConfig,
        store: S,
    ) -> Self {
        let mut selector =
            PatternSelector::new(InputDebouncer::new(config.cooldown_frames), store);
        let pattern_index = selector.restore(library);
        #[cfg(feature = "esp32-log")]
        println!(
            "[Engine.boot] starting with pattern {} ({})",
            pattern_index,
            library.pattern(pattern_index).name()
        );
        Self {
            shared,
            sequencer: FrameSequencer::new(library, pattern_index),
            selector,
        }
    }

    /// Run the frame handler if the interrupt has reached a frame boundary
    ///
    /// Returns `None` without touching any state while the frame is still
    /// pending.
    pub fn poll<I: InputLine>(&mut self, input: &mut I) -> Option<FrameOutcome> {
        if !self.shared.claim_frame() {
            return None;
        }
        Some(
            self.sequencer
                .on_frame(self.shared, &mut self.selector, input),
        )
    }

    /// Busy-wait for the next frame boundary and handle it
    pub fn wait_frame<I: InputLine>(&mut self, input: &mut I) -> FrameOutcome {
        loop {
            if let Some(outcome) = self.poll(input) {
                return outcome;
            }
            spin_loop();
        }
    }

    pub const fn shared(&self) -> &'a SharedState {
        self.shared
    }

    pub const fn state(&self) -> &PlaybackState {
        self.sequencer.state()
    }

    pub fn pattern(&self) -> &'static Pattern {
        self.sequencer.pattern()
    }

    pub const fn sequencer(&self) -> &FrameSequencer<'a> {
        &self.sequencer
    }

    pub const fn selector(&self) -> &PatternSelector<S> {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut PatternSelector<S> {
        &mut self.selector
    }

    /// Hand the store back, e.g. to boot again from it
    pub fn into_store(self) -> S {
        self.selector.into_store()
    }
}
