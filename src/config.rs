use crate::error::Result;
use crate::memory::{check_program_addr, CHIP8_PROGRAM_ADDR};
use std::time::Duration;

/// 60Hz, i.e. one instruction (and one timer decrement) per frame
pub const CHIP8_TICK_PERIOD: Duration = Duration::from_nanos(16_666_667);

/// Knobs for an interpreter instance. Everything else about the machine is
/// fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chip8Config {
    /// time between two executed instructions
    pub tick_period: Duration,
    /// where programs are loaded, and where the PC starts
    pub program_addr: u16,
}

impl Default for Chip8Config {
    fn default() -> Self {
        Chip8Config {
            tick_period: CHIP8_TICK_PERIOD,
            program_addr: CHIP8_PROGRAM_ADDR,
        }
    }
}

impl Chip8Config {
    pub fn with_tick_period(mut self, tick_period: Duration) -> Self {
        self.tick_period = tick_period;
        self
    }

    pub fn with_program_addr(mut self, program_addr: u16) -> Self {
        self.program_addr = program_addr;
        self
    }

    /// the program region must sit entirely above the font and leave at
    /// least one instruction's worth of RAM
    pub fn validate(&self) -> Result<()> {
        check_program_addr(self.program_addr)
    }
}
