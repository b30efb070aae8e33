use crate::error::{Chip8Error, Result};

/// how many nested calls the interpreter allows
pub const CHIP8_STACK_DEPTH: usize = 16;

/// Return addresses for subroutine calls. Fixed capacity: pushing onto a
/// full stack or popping an empty one is an error, never a silent wrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallStack {
    entries: [u16; CHIP8_STACK_DEPTH],
    len: usize,
}

impl Default for CallStack {
    fn default() -> Self {
        CallStack::new()
    }
}

impl CallStack {
    pub fn new() -> Self {
        CallStack {
            entries: [0; CHIP8_STACK_DEPTH],
            len: 0,
        }
    }

    pub fn push(&mut self, addr: u16) -> Result<()> {
        if self.len == CHIP8_STACK_DEPTH {
            return Err(Chip8Error::StackOverflow {
                capacity: CHIP8_STACK_DEPTH,
            });
        }
        self.entries[self.len] = addr;
        self.len += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16> {
        if self.len == 0 {
            return Err(Chip8Error::StackUnderflow);
        }
        self.len -= 1;
        Ok(self.entries[self.len])
    }

    pub fn peek(&self) -> Option<u16> {
        self.as_slice().last().copied()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == CHIP8_STACK_DEPTH
    }

    pub fn capacity(&self) -> usize {
        CHIP8_STACK_DEPTH
    }

    /// bottom of the stack first
    pub fn as_slice(&self) -> &[u16] {
        &self.entries[..self.len]
    }

    pub fn clear(&mut self) {
        self.entries = [0; CHIP8_STACK_DEPTH];
        self.len = 0;
    }
}
