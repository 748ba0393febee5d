//! Recording output port
//!
//! Captures the pin states written by the modulator, one entry per tick,
//! into a fixed `heapless::Vec`. Used to inspect duty cycles off-target.

use core::ops::Range;

use heapless::Vec;

use crate::modulator::SubframeModulator;
use crate::{ChannelLevels, OutputPort, PortBits};

/// Pin states of up to `N` consecutive ticks
#[derive(Debug, Clone, Default)]
pub struct Waveform<const N: usize> {
    ticks: Vec<PortBits, N>,
}

impl<const N: usize> Waveform<N> {
    pub const fn new() -> Self {
        Self { ticks: Vec::new() }
    }

    /// Waveform of one full frame showing `levels`
    pub fn of_frame(levels: ChannelLevels, subframe_limit: u8) -> Self {
        let mut waveform = Self::new();
        for counter in (0..subframe_limit).rev() {
            waveform.write(SubframeModulator::output_bits(levels, counter));
        }
        waveform
    }

    pub fn ticks(&self) -> &[PortBits] {
        &self.ticks
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Whether further ticks are being dropped
    pub fn is_full(&self) -> bool {
        self.ticks.is_full()
    }

    pub fn clear(&mut self) {
        self.ticks.clear();
    }

    /// Number of ticks the channel was lit
    pub fn duty(&self, channel: usize) -> usize {
        self.ticks
            .iter()
            .filter(|bits| bits.channel(channel))
            .count()
    }

    /// Number of separate lit runs of the channel
    pub fn lit_runs(&self, channel: usize) -> usize {
        let mut runs = 0;
        let mut lit = false;
        for bits in &self.ticks {
            let now = bits.channel(channel);
            if now && !lit {
                runs += 1;
            }
            lit = now;
        }
        runs
    }

    /// Ticks from the first to the last lit one
    pub fn lit_span(&self, channel: usize) -> Option<Range<usize>> {
        let first = self.ticks.iter().position(|bits| bits.channel(channel))?;
        let last = self.ticks.iter().rposition(|bits| bits.channel(channel))?;
        Some(first..last + 1)
    }
}

impl<const N: usize> OutputPort for Waveform<N> {
    fn write(&mut self, bits: PortBits) {
        let _ = self.ticks.push(bits);
    }
}
