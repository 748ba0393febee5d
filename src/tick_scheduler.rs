//! Software tick pacing.
//!
//! Drives the modulator and the frame handler from a monotonic clock instead
//! of a timer interrupt, for hosts and targets without a spare 8-bit timer.
//! The caller is responsible for sleeping/waiting between ticks.

use embassy_time::{Duration, Instant};

use crate::engine::Engine;
use crate::modulator::{Subframe, SubframeModulator};
use crate::sequencer::FrameOutcome;
use crate::storage::NonVolatileStore;
use crate::{InputLine, OutputPort, TickTimer};

/// Stand-in for the hardware timer that remembers the last reload value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoftTimer {
    reload: Option<u8>,
    reloads: u32,
}

impl SoftTimer {
    pub const fn new() -> Self {
        Self {
            reload: None,
            reloads: 0,
        }
    }

    /// Last value written by the modulator
    pub const fn last_reload(&self) -> Option<u8> {
        self.reload
    }

    /// Number of reloads so far
    pub const fn reloads(&self) -> u32 {
        self.reloads
    }
}

impl TickTimer for SoftTimer {
    fn reload(&mut self, value: u8) {
        self.reload = Some(value);
        self.reloads = self.reloads.wrapping_add(1);
    }
}

/// Result of a tick.
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    pub subframe: Subframe,
    /// Set when the tick ended a frame and the frame handler ran
    pub frame: Option<FrameOutcome>,
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Clock-driven replacement for the tick interrupt
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = TickScheduler::new(engine, config.modulator(), config.timing.tick_period(), port, button);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     sleep_us(result.sleep_duration.as_micros());
/// }
/// ```
pub struct TickScheduler<'a, O: OutputPort, I: InputLine, S: NonVolatileStore> {
    engine: Engine<'a, S>,
    modulator: SubframeModulator,
    port: O,
    input: I,
    timer: SoftTimer,
    next_tick: Instant,
    tick_period: Duration,
}

impl<'a, O: OutputPort, I: InputLine, S: NonVolatileStore> TickScheduler<'a, O, I, S> {
    pub fn new(
        engine: Engine<'a, S>,
        modulator: SubframeModulator,
        tick_period: Duration,
        port: O,
        input: I,
    ) -> Self {
        Self {
            engine,
            modulator,
            port,
            input,
            timer: SoftTimer::new(),
            next_tick: Instant::from_ticks(0),
            tick_period,
        }
    }

    /// Run one tick and, on a frame boundary, the frame handler
    ///
    /// Falling more than two periods behind drops the backlog instead of
    /// replaying it in a burst.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        if now > self.next_tick + self.tick_period * 2 {
            self.next_tick = now;
        }

        let subframe = self
            .modulator
            .tick(self.engine.shared(), &mut self.port, &mut self.timer);
        let frame = if subframe.frame_boundary {
            self.engine.poll(&mut self.input)
        } else {
            None
        };

        self.next_tick += self.tick_period;

        let sleep_duration = if self.next_tick > now {
            self.next_tick - now
        } else {
            Duration::from_ticks(0)
        };

        TickResult {
            subframe,
            frame,
            next_deadline: self.next_tick,
            sleep_duration,
        }
    }

    pub const fn engine(&self) -> &Engine<'a, S> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<'a, S> {
        &mut self.engine
    }

    pub const fn port(&self) -> &O {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut O {
        &mut self.port
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub const fn timer(&self) -> &SoftTimer {
        &self.timer
    }
}
