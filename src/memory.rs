use crate::error::{Chip8Error, Result};
use std::io;
use std::io::Read;

// NB. addresses are u16 as per the chip-8; lengths are usize to stop endless casting

/// Represents the flat, byte-addressable RAM. Every access is bounds checked;
/// running off the end is an error rather than a panic.
pub trait MemoryMap {
    /// write unknown len of data into memory at a particular address
    fn write_any(&mut self, reader: &mut impl io::Read, addr: u16) -> Result<usize> {
        let mut buf = Vec::new();
        let len = reader.read_to_end(&mut buf)?;
        self.write(&buf, addr)?;
        Ok(len)
    }

    /// write a chunk of bytes into "RAM"
    fn write(&mut self, data: &[u8], addr: u16) -> Result<()> {
        let bytes = self.get_rw_slice(addr, data.len())?;
        bytes.copy_from_slice(data);
        Ok(())
    }

    /// get a big-endian two-byte word (opcodes)
    fn get_word(&self, addr: u16) -> Result<u16> {
        let word = self.get_ro_slice(addr, 2)?;
        Ok(u16::from_be_bytes([word[0], word[1]]))
    }

    /// get a r/w slice of the underlying memory
    fn get_rw_slice(&mut self, addr: u16, len: usize) -> Result<&mut [u8]>;

    /// get a r/o slice of the underlying memory
    fn get_ro_slice(&self, addr: u16, len: usize) -> Result<&[u8]>;
}

/// Defines the CHIP-8 memory map, 4K configuration:
///   0x0000-0x004f  unused
///   0x0050-0x009f  font
///   0x00a0-0x01ff  unused
///   0x0200-0x0fff  program
///
/// the program address can be moved (see `Chip8Config`) but never below the
/// end of the font
pub struct Chip8MemoryMap {
    bytes: Box<[u8]>,
    font_addr: u16,
    program_addr: u16,
}

impl MemoryMap for Chip8MemoryMap {
    fn get_rw_slice(&mut self, addr: u16, len: usize) -> Result<&mut [u8]> {
        let a = addr as usize;
        self.bytes
            .get_mut(a..a + len)
            .ok_or(Chip8Error::AddressOutOfRange { addr, len })
    }
    fn get_ro_slice(&self, addr: u16, len: usize) -> Result<&[u8]> {
        let a = addr as usize;
        self.bytes
            .get(a..a + len)
            .ok_or(Chip8Error::AddressOutOfRange { addr, len })
    }
}

/// how much RAM we have
pub const CHIP8_RAM_SIZE_BYTES: usize = 4096;

/// where the program is loaded, unless configured otherwise
pub const CHIP8_PROGRAM_ADDR: u16 = 0x0200;

pub const CHIP8_FONT_ADDR: u16 = 0x050;
pub const CHIP8_FONT_LEN: usize = CHIP8_FONT.len();

/// the program region must sit entirely above the font and leave at least
/// one instruction's worth of RAM
pub fn check_program_addr(program_addr: u16) -> Result<()> {
    let font_end = CHIP8_FONT_ADDR as usize + CHIP8_FONT_LEN;
    let addr = program_addr as usize;
    if addr < font_end {
        return Err(Chip8Error::InvalidConfig(format!(
            "program address 0x{:04x} overlaps font region 0x{:04x}-0x{:04x}",
            addr, CHIP8_FONT_ADDR, font_end
        )));
    }
    if addr + 2 > CHIP8_RAM_SIZE_BYTES {
        return Err(Chip8Error::InvalidConfig(format!(
            "program address 0x{:04x} leaves no room in {} bytes of RAM",
            addr, CHIP8_RAM_SIZE_BYTES
        )));
    }
    Ok(())
}

impl Chip8MemoryMap {
    /// initialises RAM with the font baked in
    pub fn new(program_addr: u16) -> Result<Self> {
        check_program_addr(program_addr)?;
        let mut mm = Chip8MemoryMap {
            bytes: vec![0u8; CHIP8_RAM_SIZE_BYTES].into_boxed_slice(),
            font_addr: CHIP8_FONT_ADDR,
            program_addr,
        };
        mm.reset();
        Ok(mm)
    }

    pub fn font_addr(&self) -> u16 {
        self.font_addr
    }

    pub fn program_addr(&self) -> u16 {
        self.program_addr
    }

    /// zero everything, then put the font back
    pub fn reset(&mut self) {
        self.bytes.fill(0);
        let a = self.font_addr as usize;
        self.bytes[a..a + CHIP8_FONT_LEN].copy_from_slice(&CHIP8_FONT);
    }

    /// how many bytes of program fit between the program address and the end of RAM
    pub fn program_capacity(&self) -> usize {
        CHIP8_RAM_SIZE_BYTES.saturating_sub(self.program_addr as usize)
    }

    /// copy a program in at the program address; nothing else is touched
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        let capacity = self.program_capacity();
        if program.len() > capacity {
            return Err(Chip8Error::ProgramTooLarge {
                len: program.len(),
                capacity,
            });
        }
        self.write(program, self.program_addr)
    }

    /// as `load_program`, but from a reader (e.g. a ROM file). Reads at most
    /// one byte more than fits, so an oversized source is never fully buffered.
    pub fn load_program_from(&mut self, reader: &mut impl io::Read) -> Result<usize> {
        let capacity = self.program_capacity();
        let mut limited = reader.take(capacity as u64 + 1);
        match self.write_any(&mut limited, self.program_addr) {
            Err(Chip8Error::AddressOutOfRange { len, .. }) => {
                Err(Chip8Error::ProgramTooLarge { len, capacity })
            }
            other => other,
        }
    }
}

/// 16 glyphs, 0-F, 5 bytes each
const CHIP8_FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// the built-in glyph table, as written into RAM on reset
pub fn font() -> &'static [u8] {
    &CHIP8_FONT
}
