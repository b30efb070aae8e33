use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Chip8Error>;

/// Everything that can stop the interpreter. None of these are recoverable
/// from inside the core; the owner decides whether to reset and go again.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("stack overflow (capacity {capacity})")]
    StackOverflow { capacity: usize },

    #[error("stack underflow")]
    StackUnderflow,

    #[error("invalid opcode: 0x{0:04X}")]
    InvalidOpcode(u16),

    #[error("address out of range: 0x{addr:04X} (+{len} bytes)")]
    AddressOutOfRange { addr: u16, len: usize },

    #[error("program too large: {len} bytes, room for {capacity}")]
    ProgramTooLarge { len: usize, capacity: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("display error: {0}")]
    Display(#[source] io::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_opcode_is_fixed_width_hex() {
        assert_eq!(
            Chip8Error::InvalidOpcode(0x00a1).to_string(),
            "invalid opcode: 0x00A1"
        );
        assert_eq!(
            Chip8Error::InvalidOpcode(0xffff).to_string(),
            "invalid opcode: 0xFFFF"
        );
    }

    #[test]
    fn test_address_out_of_range_message() {
        let e = Chip8Error::AddressOutOfRange {
            addr: 0x0fff,
            len: 2,
        };
        assert_eq!(e.to_string(), "address out of range: 0x0FFF (+2 bytes)");
    }
}
