//! Subframe modulator
//!
//! Runs once per timer tick, inside the tick interrupt. A frame is split into
//! `subframe_limit` ticks; the subframe counter counts down through them and
//! a channel is lit while its level is above the counter. A level `v` is
//! therefore lit for `v` consecutive ticks per frame, ending at the frame
//! boundary, which the eye averages into brightness `v / subframe_limit`.
//!
//! The bits for a tick are computed within that same tick.

use crate::handoff::SharedState;
use crate::math8::lit8;
use crate::timing::TimerTiming;
use crate::{ChannelLevels, OutputPort, PortBits, TickTimer};

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subframe {
    /// Pin states written this tick
    pub bits: PortBits,
    /// Counter value the bits were derived from
    pub counter: u8,
    /// Whether this tick completed a frame
    pub frame_boundary: bool,
}

/// Tick handler converting channel levels into pin states
#[derive(Debug, Clone, Copy)]
pub struct SubframeModulator {
    subframe_limit: u8,
    reload: u8,
}

impl SubframeModulator {
    pub const fn new(timing: &TimerTiming) -> Self {
        Self {
            subframe_limit: timing.subframe_limit,
            reload: timing.reload_value(),
        }
    }

    pub const fn subframe_limit(&self) -> u8 {
        self.subframe_limit
    }

    /// Timer reload value written on every tick
    pub const fn reload(&self) -> u8 {
        self.reload
    }

    /// Pin states for the given levels at subframe `counter`
    pub const fn output_bits(levels: ChannelLevels, counter: u8) -> PortBits {
        PortBits::new(lit8(levels[0], counter), lit8(levels[1], counter))
    }

    /// Handle one timer interrupt
    ///
    /// Reloads the timer first so the next period starts on time, then writes
    /// the pins and steps the subframe counter. The tick evaluated at counter
    /// `0` ends the frame: the counter wraps to `subframe_limit - 1` and the
    /// frame-pending flag is cleared.
    pub fn tick<P: OutputPort, T: TickTimer>(
        &self,
        shared: &SharedState,
        port: &mut P,
        timer: &mut T,
    ) -> Subframe {
        timer.reload(self.reload);

        let subframe = critical_section::with(|cs| {
            let counter_cell = shared.counter_cell(cs);
            let counter = counter_cell.get();
            let bits = Self::output_bits(shared.targets_cell(cs).get(), counter);

            let frame_boundary = counter == 0;
            if frame_boundary {
                counter_cell.set(self.subframe_limit - 1);
                shared.pending_cell(cs).set(false);
            } else {
                counter_cell.set(counter - 1);
            }

            Subframe {
                bits,
                counter,
                frame_boundary,
            }
        });

        port.write(subframe.bits);
        subframe
    }
}
