//! Built-in pattern catalog
//!
//! Ramps are authored for a 128-subframe frame: level 128 is fully lit.

use super::{LinearRamp, Pattern, PatternFragment, PatternLibrary};

const PATTERN_NAME_MUTUAL: &str = "mutual";
const PATTERN_NAME_SYNCHRONIZED: &str = "synchronized";
const PATTERN_NAME_ALWAYS_ON: &str = "always_on";

const PATTERN_ID_MUTUAL: u8 = 0;
const PATTERN_ID_SYNCHRONIZED: u8 = 1;
const PATTERN_ID_ALWAYS_ON: u8 = 2;

const RISE: LinearRamp = LinearRamp::new(0, 8);
const FALL: LinearRamp = LinearRamp::falling(128, 8);

/// Channels fade in and out in turn
const MUTUAL_FRAGMENTS: &[PatternFragment] = &[
    PatternFragment::new(16, [RISE, FALL]),
    PatternFragment::new(16, [FALL, RISE]),
    PatternFragment::END,
];

/// Both channels fade in and out together
const SYNCHRONIZED_FRAGMENTS: &[PatternFragment] = &[
    PatternFragment::new(16, [RISE, RISE]),
    PatternFragment::new(16, [FALL, FALL]),
    PatternFragment::END,
];

/// Both channels fully lit
const ALWAYS_ON_FRAGMENTS: &[PatternFragment] = &[PatternFragment::forever([
    LinearRamp::constant(128),
    LinearRamp::constant(128),
])];

pub const MUTUAL_PATTERN: Pattern = Pattern::new(PATTERN_NAME_MUTUAL, MUTUAL_FRAGMENTS);
pub const SYNCHRONIZED_PATTERN: Pattern =
    Pattern::new(PATTERN_NAME_SYNCHRONIZED, SYNCHRONIZED_FRAGMENTS);
pub const ALWAYS_ON_PATTERN: Pattern = Pattern::new(PATTERN_NAME_ALWAYS_ON, ALWAYS_ON_FRAGMENTS);

const DEFAULT_PATTERNS: &[Pattern] = &[MUTUAL_PATTERN, SYNCHRONIZED_PATTERN, ALWAYS_ON_PATTERN];

/// Library the firmware ships with, in button order
pub const DEFAULT_LIBRARY: PatternLibrary = PatternLibrary::new(DEFAULT_PATTERNS);

/// Ids of the built-in patterns, matching their index in [`DEFAULT_LIBRARY`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum BuiltinPattern {
    Mutual = PATTERN_ID_MUTUAL,
    Synchronized = PATTERN_ID_SYNCHRONIZED,
    AlwaysOn = PATTERN_ID_ALWAYS_ON,
}

impl BuiltinPattern {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            PATTERN_ID_MUTUAL => Self::Mutual,
            PATTERN_ID_SYNCHRONIZED => Self::Synchronized,
            PATTERN_ID_ALWAYS_ON => Self::AlwaysOn,
            _ => return None,
        })
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn pattern(self) -> &'static Pattern {
        match self {
            Self::Mutual => &MUTUAL_PATTERN,
            Self::Synchronized => &SYNCHRONIZED_PATTERN,
            Self::AlwaysOn => &ALWAYS_ON_PATTERN,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mutual => PATTERN_NAME_MUTUAL,
            Self::Synchronized => PATTERN_NAME_SYNCHRONIZED,
            Self::AlwaysOn => PATTERN_NAME_ALWAYS_ON,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            PATTERN_NAME_MUTUAL => Some(Self::Mutual),
            PATTERN_NAME_SYNCHRONIZED => Some(Self::Synchronized),
            PATTERN_NAME_ALWAYS_ON => Some(Self::AlwaysOn),
            _ => None,
        }
    }
}
