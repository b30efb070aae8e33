//! # opcodes
//!
//! an opcode is two bytes of RAM, high byte first. Fields:
//!
//! | field | bits  | use                                   |
//! |-------|-------|---------------------------------------|
//! | `f`   | 12-15 | family; the primary dispatch key      |
//! | `x`   | 8-11  | register VX                           |
//! | `y`   | 4-7   | register VY                           |
//! | `n`   | 0-3   | sub-selector, only when `f` is zero   |
//! | `nnn` | 0-11  | address                               |
//!
//! Only a handful of instructions are understood. Note that `ADD VX, VY`
//! lives in family 0 here (`0XY4`), alongside `CLS` (`00E0`); on a stock
//! CHIP-8 it's `8XY4`. Anything not listed below is rejected.

use crate::error::{Chip8Error, Result};
use std::fmt;

/// family 0, sub-selector 4: `0XY4`
pub const OP_SUB_ADD_VX_VY: u8 = 0x4;
/// family 0, sub-selector 0: `00E0` (any `0XY0`)
pub const OP_SUB_CLEAR_SCREEN: u8 = 0x0;
/// `2NNN`
pub const OP_FAMILY_CALL: u8 = 0x2;
/// `ANNN`
pub const OP_FAMILY_SET_INDEX: u8 = 0xa;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode(pub u16);

impl Opcode {
    pub fn from_bytes(hi: u8, lo: u8) -> Self {
        Opcode(u16::from_be_bytes([hi, lo]))
    }

    pub fn family(self) -> u8 {
        ((self.0 & 0xf000) >> 12) as u8
    }

    pub fn x(self) -> usize {
        ((self.0 & 0x0f00) >> 8) as usize
    }

    pub fn y(self) -> usize {
        ((self.0 & 0x00f0) >> 4) as usize
    }

    pub fn sub(self) -> u8 {
        (self.0 & 0x000f) as u8
    }

    pub fn nnn(self) -> u16 {
        self.0 & 0x0fff
    }

    pub fn decode(self) -> Result<Instruction> {
        decode(self)
    }
}

impl From<u16> for Opcode {
    fn from(v: u16) -> Self {
        Opcode(v)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

/// a decoded opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// VX += VY, carry flag set on unsigned overflow
    AddVxVy { x: usize, y: usize },
    /// ask the display to blank itself
    ClearScreen,
    /// I = nnn
    SetIndex(u16),
    /// push PC, jump to nnn
    Call(u16),
}

impl Instruction {
    /// whether the interpreter should move the PC on after executing this
    pub fn advances_pc(&self) -> bool {
        !matches!(self, Instruction::Call(_))
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::AddVxVy { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Instruction::ClearScreen => write!(f, "CLS"),
            Instruction::SetIndex(nnn) => write!(f, "LD I, 0x{:03X}", nnn),
            Instruction::Call(nnn) => write!(f, "CALL 0x{:03X}", nnn),
        }
    }
}

/// two-tier dispatch: family first, then the sub-selector for family 0
pub fn decode(opcode: Opcode) -> Result<Instruction> {
    match opcode.family() {
        0x0 => match opcode.sub() {
            OP_SUB_ADD_VX_VY => Ok(Instruction::AddVxVy {
                x: opcode.x(),
                y: opcode.y(),
            }),
            OP_SUB_CLEAR_SCREEN => Ok(Instruction::ClearScreen),
            _ => Err(Chip8Error::InvalidOpcode(opcode.0)),
        },
        OP_FAMILY_SET_INDEX => Ok(Instruction::SetIndex(opcode.nnn())),
        OP_FAMILY_CALL => Ok(Instruction::Call(opcode.nnn())),
        _ => Err(Chip8Error::InvalidOpcode(opcode.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields() {
        let op = Opcode(0x1234);
        assert_eq!(op.family(), 0x1);
        assert_eq!(op.x(), 0x2);
        assert_eq!(op.y(), 0x3);
        assert_eq!(op.sub(), 0x4);
        assert_eq!(op.nnn(), 0x234);
        assert_eq!(Opcode::from_bytes(0xa2, 0x34), Opcode(0xa234));
    }

    #[test]
    fn test_decode_known() -> Result<()> {
        assert_eq!(decode(Opcode(0x0124))?, Instruction::AddVxVy { x: 1, y: 2 });
        assert_eq!(decode(Opcode(0x00e0))?, Instruction::ClearScreen);
        assert_eq!(decode(Opcode(0xa234))?, Instruction::SetIndex(0x234));
        assert_eq!(decode(Opcode(0x2300))?, Instruction::Call(0x300));
        Ok(())
    }

    #[test]
    fn test_zero_family_quirk() -> Result<()> {
        // any 0XY0 clears; 0000 included
        assert_eq!(decode(Opcode(0x0000))?, Instruction::ClearScreen);
        assert_eq!(decode(Opcode(0x0ff0))?, Instruction::ClearScreen);
        // and the conventional 8XY4 is not an add here
        assert!(matches!(
            decode(Opcode(0x8124)),
            Err(Chip8Error::InvalidOpcode(0x8124))
        ));
        Ok(())
    }

    #[test]
    fn test_decode_rejects_unknown() {
        for raw in [0x00ee, 0x0121, 0x1200, 0x6a02, 0xd015, 0xf00a, 0xffff] {
            match decode(Opcode(raw)) {
                Err(Chip8Error::InvalidOpcode(v)) => assert_eq!(v, raw),
                other => panic!("0x{:04x} decoded to {:?}", raw, other),
            }
        }
    }

    #[test]
    fn test_advances_pc() {
        assert!(Instruction::ClearScreen.advances_pc());
        assert!(Instruction::SetIndex(0).advances_pc());
        assert!(Instruction::AddVxVy { x: 0, y: 0 }.advances_pc());
        assert!(!Instruction::Call(0x300).advances_pc());
    }

    #[test]
    fn test_mnemonics() {
        assert_eq!(Instruction::AddVxVy { x: 0xa, y: 2 }.to_string(), "ADD VA, V2");
        assert_eq!(Instruction::ClearScreen.to_string(), "CLS");
        assert_eq!(Instruction::SetIndex(0x234).to_string(), "LD I, 0x234");
        assert_eq!(Instruction::Call(0x30).to_string(), "CALL 0x030");
        assert_eq!(Opcode(0xab).to_string(), "0x00AB");
    }

    mod props {
        use crate::error::Chip8Error;
        use crate::opcode::{decode, Opcode};
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_decode_accepts_exactly_the_known_set(raw in any::<u16>()) {
                let op = Opcode(raw);
                let known = match op.family() {
                    0x0 => op.sub() == 0x4 || op.sub() == 0x0,
                    0x2 | 0xa => true,
                    _ => false,
                };
                match decode(op) {
                    Ok(_) => prop_assert!(known),
                    Err(Chip8Error::InvalidOpcode(v)) => {
                        prop_assert!(!known);
                        prop_assert_eq!(v, raw);
                    }
                    Err(e) => prop_assert!(false, "unexpected error {}", e),
                }
            }

            #[test]
            fn prop_fields_reassemble(raw in any::<u16>()) {
                let op = Opcode(raw);
                let rebuilt = ((op.family() as u16) << 12)
                    | ((op.x() as u16) << 8)
                    | ((op.y() as u16) << 4)
                    | op.sub() as u16;
                prop_assert_eq!(rebuilt, raw);
                prop_assert_eq!(op.nnn() | ((op.family() as u16) << 12), raw);
            }
        }
    }
}
