//! Control words and their named fields.
//!
//! A control word has 23 single-bit columns. Column `j` of a microcode row is
//! [`CsBit`] with discriminant `j`; the word stores column 0 as its most significant
//! bit so that a row's text is exactly the word's binary rendering.

use std::fmt;

use crate::common::bits::Bits;
use crate::common::constants::CONTROL_STORE_BITS;
use crate::common::error::BitsError;

/// One column of a control word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CsBit {
    /// Decode reads SR1.
    Sr1Needed = 0,
    /// Decode reads SR2.
    Sr2Needed,
    /// Destination is R7 rather than IR\[11:9\].
    DrMux,
    /// First address operand is SR1 rather than NPC.
    Addr1Mux,
    /// High bit of the second address operand select.
    Addr2Mux1,
    /// Low bit of the second address operand select.
    Addr2Mux0,
    /// Shift the second address operand left by one.
    Lshf1,
    /// Address comes from the adder rather than the trap vector.
    AddressMux,
    /// Second ALU operand is the immediate rather than SR2.
    Sr2Mux,
    /// High bit of the ALU operation select.
    Aluk1,
    /// Low bit of the ALU operation select.
    Aluk0,
    /// Result comes from the ALU rather than the shifter.
    AluResultMux,
    /// Conditional branch.
    BrOp,
    /// Unconditional jump.
    UncondOp,
    /// Trap.
    TrapOp,
    /// Front end must stall while this instruction is in flight.
    BrStall,
    /// Memory stage accesses the data cache.
    DcacheEn,
    /// Data-cache access is a write.
    DcacheRw,
    /// Access is a word rather than a byte.
    DataSize,
    /// High bit of the writeback value select.
    DrValueMux1,
    /// Low bit of the writeback value select.
    DrValueMux0,
    /// Store writes the destination register.
    LdReg,
    /// Store writes the condition codes.
    LdCc,
}

impl CsBit {
    /// Every column, in file order.
    pub const ALL: [Self; CONTROL_STORE_BITS] = [
        Self::Sr1Needed,
        Self::Sr2Needed,
        Self::DrMux,
        Self::Addr1Mux,
        Self::Addr2Mux1,
        Self::Addr2Mux0,
        Self::Lshf1,
        Self::AddressMux,
        Self::Sr2Mux,
        Self::Aluk1,
        Self::Aluk0,
        Self::AluResultMux,
        Self::BrOp,
        Self::UncondOp,
        Self::TrapOp,
        Self::BrStall,
        Self::DcacheEn,
        Self::DcacheRw,
        Self::DataSize,
        Self::DrValueMux1,
        Self::DrValueMux0,
        Self::LdReg,
        Self::LdCc,
    ];

    /// Column index within a microcode row.
    pub const fn column(self) -> usize {
        self as usize
    }

    const fn position(self) -> u32 {
        (CONTROL_STORE_BITS - 1 - self.column()) as u32
    }
}

/// A named control field, one or two columns wide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// `SR1.NEEDED`
    Sr1Needed,
    /// `SR2.NEEDED`
    Sr2Needed,
    /// `DRMUX`
    DrMux,
    /// `ADDR1MUX`
    Addr1Mux,
    /// `ADDR2MUX` (2 bits)
    Addr2Mux,
    /// `LSHF1`
    Lshf1,
    /// `ADDRESSMUX`
    AddressMux,
    /// `SR2MUX`
    Sr2Mux,
    /// `ALUK` (2 bits)
    Aluk,
    /// `ALU.RESULTMUX`
    AluResultMux,
    /// `BR.OP`
    BrOp,
    /// `UNCOND.OP`
    UncondOp,
    /// `TRAP.OP`
    TrapOp,
    /// `BR.STALL`
    BrStall,
    /// `DCACHE.EN`
    DcacheEn,
    /// `DCACHE.RW`
    DcacheRw,
    /// `DATA.SIZE`
    DataSize,
    /// `DR.VALUEMUX` (2 bits)
    DrValueMux,
    /// `LD.REG`
    LdReg,
    /// `LD.CC`
    LdCc,
}

impl Field {
    /// Every field, in column order.
    pub const ALL: [Self; 20] = [
        Self::Sr1Needed,
        Self::Sr2Needed,
        Self::DrMux,
        Self::Addr1Mux,
        Self::Addr2Mux,
        Self::Lshf1,
        Self::AddressMux,
        Self::Sr2Mux,
        Self::Aluk,
        Self::AluResultMux,
        Self::BrOp,
        Self::UncondOp,
        Self::TrapOp,
        Self::BrStall,
        Self::DcacheEn,
        Self::DcacheRw,
        Self::DataSize,
        Self::DrValueMux,
        Self::LdReg,
        Self::LdCc,
    ];

    /// First (most significant) column and width of the field.
    pub const fn columns(self) -> (CsBit, u32) {
        match self {
            Self::Sr1Needed => (CsBit::Sr1Needed, 1),
            Self::Sr2Needed => (CsBit::Sr2Needed, 1),
            Self::DrMux => (CsBit::DrMux, 1),
            Self::Addr1Mux => (CsBit::Addr1Mux, 1),
            Self::Addr2Mux => (CsBit::Addr2Mux1, 2),
            Self::Lshf1 => (CsBit::Lshf1, 1),
            Self::AddressMux => (CsBit::AddressMux, 1),
            Self::Sr2Mux => (CsBit::Sr2Mux, 1),
            Self::Aluk => (CsBit::Aluk1, 2),
            Self::AluResultMux => (CsBit::AluResultMux, 1),
            Self::BrOp => (CsBit::BrOp, 1),
            Self::UncondOp => (CsBit::UncondOp, 1),
            Self::TrapOp => (CsBit::TrapOp, 1),
            Self::BrStall => (CsBit::BrStall, 1),
            Self::DcacheEn => (CsBit::DcacheEn, 1),
            Self::DcacheRw => (CsBit::DcacheRw, 1),
            Self::DataSize => (CsBit::DataSize, 1),
            Self::DrValueMux => (CsBit::DrValueMux1, 2),
            Self::LdReg => (CsBit::LdReg, 1),
            Self::LdCc => (CsBit::LdCc, 1),
        }
    }

    /// Upper-case name as written in the microarchitecture documentation.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sr1Needed => "SR1.NEEDED",
            Self::Sr2Needed => "SR2.NEEDED",
            Self::DrMux => "DRMUX",
            Self::Addr1Mux => "ADDR1MUX",
            Self::Addr2Mux => "ADDR2MUX",
            Self::Lshf1 => "LSHF1",
            Self::AddressMux => "ADDRESSMUX",
            Self::Sr2Mux => "SR2MUX",
            Self::Aluk => "ALUK",
            Self::AluResultMux => "ALU.RESULTMUX",
            Self::BrOp => "BR.OP",
            Self::UncondOp => "UNCOND.OP",
            Self::TrapOp => "TRAP.OP",
            Self::BrStall => "BR.STALL",
            Self::DcacheEn => "DCACHE.EN",
            Self::DcacheRw => "DCACHE.RW",
            Self::DataSize => "DATA.SIZE",
            Self::DrValueMux => "DR.VALUEMUX",
            Self::LdReg => "LD.REG",
            Self::LdCc => "LD.CC",
        }
    }
}

/// One 23-bit control-store word.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ControlWord(Bits<23>);

impl ControlWord {
    /// The all-zero word: a no-op that loads nothing.
    pub const EMPTY: Self = Self(Bits::ZERO);

    /// Parses a row of exactly 23 `0`/`1` characters.
    ///
    /// # Errors
    ///
    /// Returns a [`BitsError`] for a wrong length or a bad digit.
    pub fn from_row(row: &str) -> Result<Self, BitsError> {
        Bits::from_bit_str(row).map(Self)
    }

    /// Wraps raw bits, column 0 being bit 22.
    pub const fn from_bits(bits: Bits<23>) -> Self {
        Self(bits)
    }

    /// Raw bits, column 0 being bit 22.
    pub const fn bits(self) -> Bits<23> {
        self.0
    }

    /// Reads one column.
    #[inline]
    pub const fn bit(self, column: CsBit) -> bool {
        (self.0.value() >> column.position()) & 1 == 1
    }

    /// Returns a copy with one column set or cleared.
    #[must_use]
    pub const fn with(self, column: CsBit, value: bool) -> Self {
        let mask = 1u64 << column.position();
        let raw = if value {
            self.0.value() | mask
        } else {
            self.0.value() & !mask
        };
        Self(Bits::new(raw))
    }

    /// Returns a copy with `field` set to `value`, truncated to the field width.
    #[must_use]
    pub fn with_field(self, field: Field, value: u8) -> Self {
        let (first, width) = field.columns();
        let mut word = self;
        for offset in 0..width {
            let column = CsBit::ALL[first.column() + offset as usize];
            let bit = (value >> (width - 1 - offset)) & 1 == 1;
            word = word.with(column, bit);
        }
        word
    }

    /// Reads a named field, first column most significant.
    pub fn field(self, field: Field) -> u8 {
        let (first, width) = field.columns();
        (0..width).fold(0u8, |acc, offset| {
            let column = CsBit::ALL[first.column() + offset as usize];
            (acc << 1) | u8::from(self.bit(column))
        })
    }

    /// The row as written in a microcode file.
    pub fn to_row(self) -> String {
        self.0.to_bit_string()
    }
}

impl fmt::Debug for ControlWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ControlWord({})", self.to_row())
    }
}

impl fmt::Display for ControlWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_row())
    }
}
