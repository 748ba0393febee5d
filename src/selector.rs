//! Button handling and pattern selection
//!
//! The button is sampled once per frame. After a press is accepted, further
//! samples are ignored for a cooldown window of frames, which absorbs contact
//! bounce and stops a held button from stepping every frame.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::InputLine;
use crate::pattern::PatternLibrary;
use crate::storage::{NonVolatileStore, PATTERN_INDEX_ADDRESS};

/// Frames ignored after an accepted press
pub const DEFAULT_COOLDOWN_FRAMES: u8 = 60;

/// Frame-counted debouncer for an active-low button
#[derive(Debug, Clone, Copy)]
pub struct InputDebouncer {
    window: u8,
    cooldown: u8,
}

impl InputDebouncer {
    /// Create a debouncer with an armed cooldown
    ///
    /// A button held while powering up is ignored for the first window.
    pub const fn new(window: u8) -> Self {
        Self {
            window,
            cooldown: window,
        }
    }

    /// Frames left before a press is accepted again
    pub const fn cooldown(&self) -> u8 {
        self.cooldown
    }

    pub const fn window(&self) -> u8 {
        self.window
    }

    /// Feed one frame's sample
    ///
    /// Returns `true` when the press is accepted.
    pub fn sample(&mut self, pressed: bool) -> bool {
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return false;
        }
        if pressed {
            self.cooldown = self.window;
        }
        pressed
    }
}

impl Default for InputDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN_FRAMES)
    }
}

/// Steps through the library on button presses and persists the choice
pub struct PatternSelector<S: NonVolatileStore> {
    debouncer: InputDebouncer,
    store: S,
    pending_save: Option<u8>,
}

impl<S: NonVolatileStore> PatternSelector<S> {
    pub const fn new(debouncer: InputDebouncer, store: S) -> Self {
        Self {
            debouncer,
            store,
            pending_save: None,
        }
    }

    /// Read the persisted pattern index
    ///
    /// Unreadable or out-of-range values fall back to the first pattern.
    pub fn restore(&mut self, library: &PatternLibrary) -> u8 {
        let raw = self.store.read(PATTERN_INDEX_ADDRESS).ok();
        let index = raw.map_or(0, |raw| library.normalize(raw));
        #[cfg(feature = "esp32-log")]
        if raw != Some(index) {
            println!(
                "[PatternSelector.restore] stored index {:?} is invalid, using {}",
                raw, index
            );
        }
        index
    }

    /// Poll the button for the current frame
    ///
    /// Returns the index of the newly selected pattern when a press is
    /// accepted. A pending store write is retried first; while it keeps
    /// failing, presses are not accepted.
    pub fn poll<I: InputLine>(
        &mut self,
        input: &mut I,
        library: &PatternLibrary,
        current: u8,
    ) -> Option<u8> {
        if !self.flush() {
            self.debouncer.sample(false);
            return None;
        }

        let pressed = input.is_pressed();
        if !self.debouncer.sample(pressed) {
            return None;
        }

        let next = library.next_index(current);
        #[cfg(feature = "esp32-log")]
        println!(
            "[PatternSelector.poll] switching to pattern {} ({})",
            next,
            library.pattern(next).name()
        );
        self.save(next);
        Some(next)
    }

    /// Whether a store write is waiting to be retried
    pub const fn has_pending_save(&self) -> bool {
        self.pending_save.is_some()
    }

    pub const fn debouncer(&self) -> &InputDebouncer {
        &self.debouncer
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Give the store back, e.g. to simulate a power cycle
    pub fn into_store(self) -> S {
        self.store
    }

    fn save(&mut self, index: u8) {
        self.pending_save = Some(index);
        self.flush();
    }

    /// Retry the pending write; returns `true` once nothing is pending
    fn flush(&mut self) -> bool {
        let Some(index) = self.pending_save else {
            return true;
        };
        match self.store.write(PATTERN_INDEX_ADDRESS, index) {
            Ok(()) => {
                self.pending_save = None;
                true
            }
            Err(_) => {
                #[cfg(feature = "esp32-log")]
                println!(
                    "[PatternSelector.flush] failed to store pattern {}, retrying next frame",
                    index
                );
                false
            }
        }
    }
}
