//! # Real-Time Pacing
//!
//! After every instruction the engine hands the instruction's cycle count to
//! a [`Pacer`]. The default [`NoPacing`] returns immediately, which keeps
//! execution deterministic for tests. [`RealTimePacer`] blocks the calling
//! thread to approximate the speed of real hardware.

use std::thread;
use std::time::Duration;

/// Wall-clock pacing strategy.
pub trait Pacer: Send {
    /// Called once per executed instruction with the cycles it consumed.
    fn wait_cycles(&mut self, cycles: u64);
}

/// Pacing disabled: instructions run back to back.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn wait_cycles(&mut self, _cycles: u64) {}
}

/// Sleeps for `cycles * cycle_duration` after each instruction.
#[derive(Debug, Clone, Copy)]
pub struct RealTimePacer {
    cycle_duration: Duration,
}

impl RealTimePacer {
    /// One microsecond per cycle (1 MHz).
    pub const DEFAULT_CYCLE_DURATION: Duration = Duration::from_micros(1);

    pub fn new(cycle_duration: Duration) -> Self {
        Self { cycle_duration }
    }

    pub fn cycle_duration(&self) -> Duration {
        self.cycle_duration
    }
}

impl Default for RealTimePacer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CYCLE_DURATION)
    }
}

impl Pacer for RealTimePacer {
    fn wait_cycles(&mut self, cycles: u64) {
        let cycles = u32::try_from(cycles).unwrap_or(u32::MAX);
        thread::sleep(self.cycle_duration.saturating_mul(cycles));
    }
}
