//! Flash pattern tables
//!
//! A pattern is a fixed table of fragments; each fragment holds one linear
//! ramp per channel for a number of frames. Tables are `const` data and are
//! validated when they are built, so a malformed table fails compilation
//! instead of misbehaving at runtime.

mod library;

pub use library::{
    ALWAYS_ON_PATTERN, BuiltinPattern, DEFAULT_LIBRARY, MUTUAL_PATTERN, SYNCHRONIZED_PATTERN,
};

use crate::math8::{decrement8, ramp8};
use crate::{CHANNELS, ChannelLevels};

/// Raw length byte of a fragment that never ends
pub const RAW_LENGTH_FOREVER: u8 = 0;

/// Raw length byte of the end-of-pattern marker
pub const RAW_LENGTH_END_OF_PATTERN: u8 = 255;

/// Per-frame additive ramp for one channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearRamp {
    /// Level of the first frame
    pub initial_value: u8,
    /// Added to the level on every following frame, modulo 256
    pub increment: u8,
}

impl LinearRamp {
    pub const fn new(initial_value: u8, increment: u8) -> Self {
        Self {
            initial_value,
            increment,
        }
    }

    /// Ramp that holds a single level
    pub const fn constant(level: u8) -> Self {
        Self::new(level, 0)
    }

    /// Ramp that drops by `step` every frame
    pub const fn falling(initial_value: u8, step: u8) -> Self {
        Self::new(initial_value, decrement8(step))
    }

    /// Level after `frames` frames
    pub const fn value_at(self, frames: u8) -> u8 {
        ramp8(self.initial_value, self.increment, frames)
    }
}

/// How long a fragment lasts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentLength {
    /// Never advances on its own
    Forever,
    /// Lasts the given number of frames (1..=254)
    Frames(u8),
    /// Not a fragment: marks the end of the table
    EndOfPattern,
}

impl FragmentLength {
    /// Decode the raw length byte
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            RAW_LENGTH_FOREVER => Self::Forever,
            RAW_LENGTH_END_OF_PATTERN => Self::EndOfPattern,
            frames => Self::Frames(frames),
        }
    }

    /// Encode as the raw length byte
    ///
    /// This is also the initial value of the frame counter.
    pub const fn to_raw(self) -> u8 {
        match self {
            Self::Forever => RAW_LENGTH_FOREVER,
            Self::Frames(frames) => frames,
            Self::EndOfPattern => RAW_LENGTH_END_OF_PATTERN,
        }
    }
}

/// Contiguous run of frames during which both channels follow a fixed ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternFragment {
    length: FragmentLength,
    ramps: [LinearRamp; CHANNELS],
}

impl PatternFragment {
    /// End-of-pattern marker
    pub const END: Self = Self {
        length: FragmentLength::EndOfPattern,
        ramps: [LinearRamp::new(0, 0); CHANNELS],
    };

    /// Fragment lasting `frames` frames
    pub const fn new(frames: u8, ramps: [LinearRamp; CHANNELS]) -> Self {
        assert!(
            frames != RAW_LENGTH_FOREVER && frames != RAW_LENGTH_END_OF_PATTERN,
            "fragment length must be within 1..=254"
        );
        Self {
            length: FragmentLength::Frames(frames),
            ramps,
        }
    }

    /// Fragment that holds its initial levels forever
    pub const fn forever(ramps: [LinearRamp; CHANNELS]) -> Self {
        Self {
            length: FragmentLength::Forever,
            ramps,
        }
    }

    /// Build from the raw table encoding, sentinels included
    pub const fn from_raw(length: u8, ramps: [LinearRamp; CHANNELS]) -> Self {
        Self {
            length: FragmentLength::from_raw(length),
            ramps,
        }
    }

    pub const fn length(&self) -> FragmentLength {
        self.length
    }

    pub const fn ramps(&self) -> &[LinearRamp; CHANNELS] {
        &self.ramps
    }

    pub const fn is_end(&self) -> bool {
        matches!(self.length, FragmentLength::EndOfPattern)
    }

    pub const fn is_forever(&self) -> bool {
        matches!(self.length, FragmentLength::Forever)
    }

    /// Levels of the first frame
    pub const fn initial_levels(&self) -> ChannelLevels {
        [self.ramps[0].initial_value, self.ramps[1].initial_value]
    }

    /// Per-frame increments of both channels
    pub const fn increments(&self) -> ChannelLevels {
        [self.ramps[0].increment, self.ramps[1].increment]
    }
}

/// Ordered, looping sequence of fragments
#[derive(Debug, Clone, Copy)]
pub struct Pattern {
    name: &'static str,
    fragments: &'static [PatternFragment],
}

impl Pattern {
    /// Create a pattern from a fragment table
    ///
    /// The table may be terminated by [`PatternFragment::END`]; the end of
    /// the slice terminates it as well.
    pub const fn new(name: &'static str, fragments: &'static [PatternFragment]) -> Self {
        assert!(!fragments.is_empty(), "pattern has no fragments");
        assert!(
            !fragments[0].is_end(),
            "pattern starts with the end-of-pattern marker"
        );
        assert!(fragments.len() <= 255, "pattern has too many fragments");
        Self { name, fragments }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Raw fragment table, terminator included
    pub const fn fragments(&self) -> &'static [PatternFragment] {
        self.fragments
    }

    /// Number of real fragments before the terminator
    pub fn fragment_count(&self) -> u8 {
        let count = self
            .fragments
            .iter()
            .take_while(|fragment| !fragment.is_end())
            .count();
        u8::try_from(count).unwrap_or(u8::MAX)
    }

    pub const fn first(&self) -> &'static PatternFragment {
        let fragments = self.fragments;
        &fragments[0]
    }

    /// Fragment at `index`, falling back to the first one past the table
    pub fn fragment(&self, index: u8) -> &'static PatternFragment {
        match self.fragments.get(index as usize) {
            Some(fragment) if !fragment.is_end() => fragment,
            _ => self.first(),
        }
    }

    /// Index of the fragment that follows `index`
    ///
    /// Reaching the end-of-pattern marker, or the end of the table, wraps to
    /// the first fragment.
    pub fn next_index(&self, index: u8) -> u8 {
        let next = index.wrapping_add(1);
        match self.fragments.get(next as usize) {
            Some(fragment) if !fragment.is_end() => next,
            _ => 0,
        }
    }
}

/// Fixed catalog of patterns, cycled through by the selector
#[derive(Debug, Clone, Copy)]
pub struct PatternLibrary {
    patterns: &'static [Pattern],
}

impl PatternLibrary {
    pub const fn new(patterns: &'static [Pattern]) -> Self {
        assert!(!patterns.is_empty(), "library has no patterns");
        assert!(patterns.len() <= 255, "library has too many patterns");
        Self { patterns }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub const fn len(&self) -> u8 {
        self.patterns.len() as u8
    }

    pub const fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub const fn patterns(&self) -> &'static [Pattern] {
        self.patterns
    }

    pub fn get(&self, index: u8) -> Option<&'static Pattern> {
        self.patterns.get(index as usize)
    }

    /// Pattern at `index`, falling back to the first one when out of range
    pub fn pattern(&self, index: u8) -> &'static Pattern {
        let patterns = self.patterns;
        patterns.get(index as usize).unwrap_or(&patterns[0])
    }

    /// Map any byte to a valid pattern index
    ///
    /// Out-of-range values, such as an erased or corrupted store, become `0`.
    pub const fn normalize(&self, index: u8) -> u8 {
        if index < self.len() { index } else { 0 }
    }

    /// Index of the pattern after `index`, wrapping past the last one
    pub const fn next_index(&self, index: u8) -> u8 {
        let next = index.wrapping_add(1);
        if next < self.len() { next } else { 0 }
    }

    /// Find a pattern index by name
    pub fn find(&self, name: &str) -> Option<u8> {
        self.patterns
            .iter()
            .position(|pattern| pattern.name == name)
            .and_then(|index| u8::try_from(index).ok())
    }
}
