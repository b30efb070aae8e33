//! ## Design
//!
//! * a CHIP-8 style core: RAM, V0-VF, I, PC, a call stack and one countdown
//!   timer, and a fetch/decode/execute cycle over them
//! * deliberately small instruction set (see `opcode`); everything else is
//!   rejected rather than guessed at
//! * one instruction per tick period, paced by a `Clock`. The loop sleeps
//!   until the next tick is due rather than spinning
//! * abstract display so can plug alternatives; the core only ever asks it
//!   to clear
//! * no global state: each `Chip8Interpreter` owns everything it touches,
//!   apart from the display it borrows
//! * every failure (bad opcode, stack over/underflow, running off the end of
//!   RAM, a display error) stops the interpreter and comes back as a
//!   `Chip8Error`; resetting is up to the owner
//!
//! Model
//!
//! Chip8Interpreter(display, config)
//!  |-- memory: font @ 0x050, program @ 0x200
//!  |-- registers, carry, index, pc, stack, timer
//!  `-- run(clock)
//!       |-- now = clock.now()
//!       |-- if a period has passed since the last tick:
//!       |     timer.tick(); op = fetch(); if execute(op) { pc += 2 }
//!       `-- else clock.sleep_until(last tick + period)

pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod interpreter;
pub mod memory;
pub mod opcode;
pub mod stack;
pub mod timer;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::Chip8Config;
pub use display::{Display, DummyDisplay, TermDisplay};
pub use error::{Chip8Error, Result};
pub use interpreter::Chip8Interpreter;
pub use memory::{Chip8MemoryMap, MemoryMap};
pub use opcode::{Instruction, Opcode};
pub use stack::CallStack;
pub use timer::{CountdownTimer, Pacer};
