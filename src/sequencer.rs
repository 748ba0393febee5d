//! Frame sequencer
//!
//! Walks the active pattern's fragment table once per frame and produces the
//! levels the modulator shows during the next frame.

use crate::handoff::SharedState;
use crate::pattern::{Pattern, PatternFragment, PatternLibrary};
use crate::selector::PatternSelector;
use crate::storage::NonVolatileStore;
use crate::{ChannelLevels, InputLine};

/// Progress through the active pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    pattern_index: u8,
    fragment_index: u8,
    /// Frames left in the current fragment
    frame_counter: u8,
    /// Levels for the next frame
    levels: ChannelLevels,
}

impl PlaybackState {
    /// Position at the first fragment of a pattern
    pub fn start(library: &PatternLibrary, pattern_index: u8) -> Self {
        let pattern_index = library.normalize(pattern_index);
        let fragment = library.pattern(pattern_index).first();
        Self {
            pattern_index,
            fragment_index: 0,
            frame_counter: fragment.length().to_raw(),
            levels: fragment.initial_levels(),
        }
    }

    pub const fn pattern_index(&self) -> u8 {
        self.pattern_index
    }

    pub const fn fragment_index(&self) -> u8 {
        self.fragment_index
    }

    pub const fn frame_counter(&self) -> u8 {
        self.frame_counter
    }

    pub const fn levels(&self) -> ChannelLevels {
        self.levels
    }

    fn enter(&mut self, fragment_index: u8, fragment: &PatternFragment) {
        self.fragment_index = fragment_index;
        self.frame_counter = fragment.length().to_raw();
        self.levels = fragment.initial_levels();
    }
}

/// What a frame boundary did to the playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Still inside the current fragment
    Ramping,
    /// Inside a fragment that never ends
    Holding,
    /// Moved to the next fragment; `wrapped` when it restarted the pattern
    FragmentAdvanced { fragment: u8, wrapped: bool },
    /// The button selected another pattern
    PatternChanged(u8),
}

/// Per-frame state machine over a pattern library
#[derive(Debug, Clone)]
pub struct FrameSequencer<'a> {
    library: &'a PatternLibrary,
    state: PlaybackState,
}

impl<'a> FrameSequencer<'a> {
    pub fn new(library: &'a PatternLibrary, pattern_index: u8) -> Self {
        Self {
            library,
            state: PlaybackState::start(library, pattern_index),
        }
    }

    pub const fn library(&self) -> &'a PatternLibrary {
        self.library
    }

    pub const fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn pattern(&self) -> &'static Pattern {
        self.library.pattern(self.state.pattern_index)
    }

    pub fn fragment(&self) -> &'static PatternFragment {
        self.pattern().fragment(self.state.fragment_index)
    }

    /// Restart playback at the first fragment of another pattern
    pub fn select_pattern(&mut self, pattern_index: u8) {
        self.state = PlaybackState::start(self.library, pattern_index);
    }

    /// Handle one frame boundary
    ///
    /// Publishes the levels prepared by the previous boundary, prepares the
    /// next ones, and lets the selector switch patterns. A pattern switch
    /// takes effect in the levels published at the following boundary, so
    /// the new pattern becomes visible one frame after the press.
    pub fn on_frame<S: NonVolatileStore, I: InputLine>(
        &mut self,
        shared: &SharedState,
        selector: &mut PatternSelector<S>,
        input: &mut I,
    ) -> FrameOutcome {
        shared.publish(self.state.levels);

        let fragment = self.fragment();
        if !fragment.is_forever() {
            let increments = fragment.increments();
            for (level, increment) in self.state.levels.iter_mut().zip(increments) {
                *level = level.wrapping_add(increment);
            }
        }

        if let Some(pattern_index) = selector.poll(input, self.library, self.state.pattern_index) {
            self.select_pattern(pattern_index);
            return FrameOutcome::PatternChanged(self.state.pattern_index);
        }

        if fragment.is_forever() {
            return FrameOutcome::Holding;
        }

        self.state.frame_counter = self.state.frame_counter.wrapping_sub(1);
        if self.state.frame_counter != 0 {
            return FrameOutcome::Ramping;
        }

        self.advance_fragment()
    }

    fn advance_fragment(&mut self) -> FrameOutcome {
        let pattern = self.pattern();
        let current = self.state.fragment_index;
        let next = pattern.next_index(current);
        self.state.enter(next, pattern.fragment(next));
        FrameOutcome::FragmentAdvanced {
            fragment: next,
            wrapped: next <= current,
        }
    }
}
