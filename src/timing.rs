//! Tick timer configuration.
//!
//! The tick timer is an 8-bit up-counter that raises the interrupt on
//! overflow. Loading it with `256 - ticks_per_subframe` gives one interrupt
//! per subframe; the interrupt reloads it a few counts late, so those counts
//! are added back to keep every period the same length.

use embassy_time::Duration;

/// Timer setup for a given clock, frame rate and subframe count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTiming {
    /// Rate at which the timer counts
    pub instruction_clock_hz: u32,
    /// Frames per second
    pub frame_rate_hz: u32,
    /// Subframes (ticks) per frame; also the level that is fully lit
    pub subframe_limit: u8,
    /// Timer counts that elapse between overflow and the reload write
    pub latency_ticks: u8,
}

impl TimerTiming {
    /// 500 kHz instruction clock, 60 frames per second, 128 subframes
    pub const DEFAULT: Self = Self::new(500_000, 60, 128, 0);

    /// 250 kHz instruction clock, 100 frames per second, 64 subframes
    pub const COMPACT: Self = Self::new(250_000, 100, 64, 8);

    pub const fn new(
        instruction_clock_hz: u32,
        frame_rate_hz: u32,
        subframe_limit: u8,
        latency_ticks: u8,
    ) -> Self {
        assert!(frame_rate_hz > 0, "frame rate must be positive");
        assert!(subframe_limit > 0, "subframe limit must be positive");
        assert!(
            frame_rate_hz.checked_mul(subframe_limit as u32).is_some(),
            "subframe rate overflows u32"
        );
        let timing = Self {
            instruction_clock_hz,
            frame_rate_hz,
            subframe_limit,
            latency_ticks,
        };
        let ticks = timing.ticks_per_subframe();
        assert!(
            ticks > latency_ticks as u32 && ticks <= 256,
            "subframe period does not fit the 8-bit timer"
        );
        timing
    }

    /// Subframes per second
    pub const fn subframe_rate_hz(&self) -> u32 {
        self.frame_rate_hz * self.subframe_limit as u32
    }

    /// Timer counts per subframe
    pub const fn ticks_per_subframe(&self) -> u32 {
        self.instruction_clock_hz / self.subframe_rate_hz()
    }

    /// Value loaded into the timer on every interrupt
    #[allow(clippy::cast_possible_truncation)]
    pub const fn reload_value(&self) -> u8 {
        (256 - self.ticks_per_subframe() + self.latency_ticks as u32) as u8
    }

    /// Time between two ticks
    pub const fn tick_period(&self) -> Duration {
        Duration::from_hz(self.subframe_rate_hz() as u64)
    }

    /// Time between two frame boundaries
    pub const fn frame_period(&self) -> Duration {
        Duration::from_hz(self.frame_rate_hz as u64)
    }
}

impl Default for TimerTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}
