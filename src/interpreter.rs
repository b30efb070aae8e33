//! # interpreter
//!
//! machine state:
//!  * 4K of RAM, font at 0x050, program at 0x200 (see `memory`)
//!  * V0-VF: 16 general purpose byte registers
//!  * a carry flag, kept apart from VF
//!  * I: 16bit index register, only ever set from a 12bit immediate
//!  * PC: starts at the program address, moves 2 bytes per instruction
//!  * a 16-deep call stack of return addresses
//!  * one countdown timer, ticked once per executed instruction
//!
//! Each tick the interpreter ticks the timer, fetches the opcode at PC,
//! executes it and (unless it jumped) moves PC on by 2. Ticks are paced by a
//! `Clock`; between ticks the loop sleeps until the next one is due.

use crate::clock::Clock;
use crate::config::Chip8Config;
use crate::display::Display;
use crate::error::{Chip8Error, Result};
use crate::memory::{Chip8MemoryMap, MemoryMap};
use crate::opcode::{Instruction, Opcode};
use crate::stack::CallStack;
use crate::timer::{CountdownTimer, Pacer};
use std::convert::Infallible;
use std::io;
use std::time::Duration;
use tracing::{debug, error, trace};

pub const CHIP8_REGISTER_COUNT: usize = 16;

/// width of one instruction in bytes
const CHIP8_INSTRUCTION_LEN: u16 = 2;

pub struct Chip8Interpreter<'a> {
    config: Chip8Config,
    memory: Chip8MemoryMap,
    display: &'a mut dyn Display,
    registers: [u8; CHIP8_REGISTER_COUNT],
    carry: u8,
    stack: CallStack,
    program_counter: u16,
    index: u16,
    timer: CountdownTimer,
    pacer: Pacer,
    steps: u64,
}

impl<'a> Chip8Interpreter<'a> {
    pub fn new(display: &'a mut dyn Display, config: Chip8Config) -> Result<Chip8Interpreter<'a>> {
        config.validate()?;
        debug!(
            program_addr = config.program_addr,
            tick_period = ?config.tick_period,
            "creating interpreter"
        );
        let mut i = Chip8Interpreter {
            config,
            memory: Chip8MemoryMap::new(config.program_addr)?,
            display,
            registers: [0; CHIP8_REGISTER_COUNT],
            carry: 0,
            stack: CallStack::new(),
            program_counter: config.program_addr,
            index: 0,
            timer: CountdownTimer::new(),
            pacer: Pacer::new(config.tick_period),
            steps: 0,
        };
        i.reset();
        Ok(i)
    }

    /// put everything back to power-on state: RAM zeroed with the font
    /// rewritten, registers/carry/index/timer zeroed, stack emptied, PC at
    /// the program address, and nothing executed yet
    pub fn reset(&mut self) {
        self.memory.reset();
        self.registers = [0; CHIP8_REGISTER_COUNT];
        self.carry = 0;
        self.stack.clear();
        self.program_counter = self.config.program_addr;
        self.index = 0;
        self.timer = CountdownTimer::new();
        self.pacer.reset();
        self.steps = 0;
        debug!(pc = self.program_counter, "reset");
    }

    /// load a chip8 program; the rest of the machine is left alone
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        self.memory.load_program(program)?;
        debug!(len = program.len(), addr = self.config.program_addr, "program loaded");
        Ok(())
    }

    /// load a chip8 program from e.g. a ROM file
    pub fn load_program_from(&mut self, reader: &mut impl io::Read) -> Result<usize> {
        let len = self.memory.load_program_from(reader)?;
        debug!(len, addr = self.config.program_addr, "program loaded");
        Ok(len)
    }

    /// the opcode at PC; doesn't move anything
    pub fn fetch(&self) -> Result<Opcode> {
        self.memory.get_word(self.program_counter).map(Opcode)
    }

    pub fn increment_pc(&mut self) {
        self.program_counter = self.program_counter.wrapping_add(CHIP8_INSTRUCTION_LEN);
    }

    /// run one opcode. `Ok(true)` means the caller should move PC on;
    /// `Ok(false)` means the instruction has already put PC where it wants it
    pub fn execute(&mut self, opcode: Opcode) -> Result<bool> {
        let instruction = opcode.decode()?;
        trace!(pc = self.program_counter, %opcode, %instruction, "execute");
        match instruction {
            Instruction::AddVxVy { x, y } => {
                let vy = self.registers[y];
                let (sum, overflow) = self.registers[x].overflowing_add(vy);
                self.carry = overflow as u8;
                self.registers[x] = sum;
            }
            Instruction::ClearScreen => {
                self.display.clear().map_err(Chip8Error::Display)?;
            }
            Instruction::SetIndex(nnn) => {
                self.index = nnn;
            }
            Instruction::Call(nnn) => {
                self.stack.push(self.program_counter)?;
                self.program_counter = nnn;
            }
        }
        Ok(instruction.advances_pc())
    }

    /// one tick's worth of work, regardless of the clock
    pub fn step(&mut self) -> Result<()> {
        self.timer.tick();
        let opcode = self.fetch()?;
        if self.execute(opcode)? {
            self.increment_pc();
        }
        self.steps += 1;
        Ok(())
    }

    /// step if a tick is due, otherwise do nothing. Never sleeps.
    pub fn poll(&mut self, clock: &impl Clock) -> Result<bool> {
        let now = clock.now();
        if !self.pacer.is_due(now) {
            return Ok(false);
        }
        self.pacer.mark(now);
        self.step().map_err(|e| self.halted(e))?;
        Ok(true)
    }

    /// run forever, one instruction per tick period; only returns on error
    pub fn run(&mut self, clock: &impl Clock) -> Result<Infallible> {
        debug!(pc = self.program_counter, "running");
        loop {
            self.wait_and_poll(clock)?;
        }
    }

    /// the same loop as `run`, stopping once `ticks` instructions have executed
    pub fn run_ticks(&mut self, clock: &impl Clock, ticks: u64) -> Result<()> {
        let mut done = 0;
        while done < ticks {
            if self.wait_and_poll(clock)? {
                done += 1;
            }
        }
        Ok(())
    }

    /// the same loop as `run`, for `duration` of clock time. Returns how many
    /// instructions ran; a tick falling exactly on the end is left for later.
    pub fn run_for(&mut self, clock: &impl Clock, duration: Duration) -> Result<u64> {
        let end = clock.now() + duration;
        let mut done = 0;
        while clock.now() < end {
            if self.poll(clock)? {
                done += 1;
                continue;
            }
            let deadline = self.pacer.next_deadline().map_or(end, |d| d.min(end));
            clock.sleep_until(deadline);
        }
        Ok(done)
    }

    fn wait_and_poll(&mut self, clock: &impl Clock) -> Result<bool> {
        if self.poll(clock)? {
            return Ok(true);
        }
        if let Some(deadline) = self.pacer.next_deadline() {
            clock.sleep_until(deadline);
        }
        Ok(false)
    }

    fn halted(&self, e: Chip8Error) -> Chip8Error {
        error!(pc = self.program_counter, steps = self.steps, error = %e, "halted");
        e
    }

    /// VX; only the low nibble of `x` is used, as in an opcode
    pub fn register(&self, x: u8) -> u8 {
        self.registers[(x & 0xf) as usize]
    }

    pub fn set_register(&mut self, x: u8, value: u8) {
        self.registers[(x & 0xf) as usize] = value;
    }

    pub fn registers(&self) -> &[u8; CHIP8_REGISTER_COUNT] {
        &self.registers
    }

    pub fn carry(&self) -> u8 {
        self.carry
    }

    pub fn index(&self) -> u16 {
        self.index
    }

    pub fn pc(&self) -> u16 {
        self.program_counter
    }

    pub fn set_pc(&mut self, addr: u16) {
        self.program_counter = addr;
    }

    pub fn stack(&self) -> &CallStack {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut CallStack {
        &mut self.stack
    }

    pub fn timer(&self) -> u8 {
        self.timer.get()
    }

    pub fn set_timer(&mut self, value: u8) {
        self.timer.set(value);
    }

    pub fn memory(&self) -> &Chip8MemoryMap {
        &self.memory
    }

    pub fn config(&self) -> &Chip8Config {
        &self.config
    }

    /// instructions executed since the last reset
    pub fn steps(&self) -> u64 {
        self.steps
    }
}
