//! Cells shared between the tick interrupt and the background loop.
//!
//! Every cell sits behind a `critical_section::Mutex`. The two published
//! levels share one cell, so the modulator reads both from the same frame.
//!
//! The frame-pending flag is the handshake between the contexts: the
//! interrupt clears it at every frame boundary, the background loop sets it
//! again when it claims the frame and only then publishes new levels.

use core::cell::Cell;

use critical_section::{CriticalSection, Mutex};

use crate::ChannelLevels;

/// State crossing the interrupt boundary
pub struct SharedState {
    targets: Mutex<Cell<ChannelLevels>>,
    subframe_counter: Mutex<Cell<u8>>,
    frame_pending: Mutex<Cell<bool>>,
}

impl SharedState {
    /// Create the boot-time state for a frame of `subframe_limit` ticks
    ///
    /// Outputs start dark and the first frame is pending.
    pub const fn new(subframe_limit: u8) -> Self {
        assert!(subframe_limit > 0, "subframe limit must be positive");
        Self {
            targets: Mutex::new(Cell::new([0; 2])),
            subframe_counter: Mutex::new(Cell::new(subframe_limit - 1)),
            frame_pending: Mutex::new(Cell::new(true)),
        }
    }

    /// Levels the modulator is currently showing
    pub fn targets(&self) -> ChannelLevels {
        critical_section::with(|cs| self.targets.borrow(cs).get())
    }

    /// Publish the levels of the next frame
    pub fn publish(&self, levels: ChannelLevels) {
        critical_section::with(|cs| self.targets.borrow(cs).set(levels));
    }

    pub fn subframe_counter(&self) -> u8 {
        critical_section::with(|cs| self.subframe_counter.borrow(cs).get())
    }

    /// Whether the background loop is still waiting for a frame boundary
    pub fn is_frame_pending(&self) -> bool {
        critical_section::with(|cs| self.frame_pending.borrow(cs).get())
    }

    /// Claim the frame boundary raised by the interrupt
    ///
    /// Returns `false` when no boundary has been reached since the last
    /// claim. On success the flag is pending again until the next boundary.
    pub fn claim_frame(&self) -> bool {
        critical_section::with(|cs| {
            let pending = self.frame_pending.borrow(cs);
            if pending.get() {
                return false;
            }
            pending.set(true);
            true
        })
    }

    pub(crate) fn targets_cell<'cs>(&'cs self, cs: CriticalSection<'cs>) -> &'cs Cell<ChannelLevels> {
        self.targets.borrow(cs)
    }

    pub(crate) fn counter_cell<'cs>(&'cs self, cs: CriticalSection<'cs>) -> &'cs Cell<u8> {
        self.subframe_counter.borrow(cs)
    }

    pub(crate) fn pending_cell<'cs>(&'cs self, cs: CriticalSection<'cs>) -> &'cs Cell<bool> {
        self.frame_pending.borrow(cs)
    }
}
