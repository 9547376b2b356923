//! Pipeline control signals.
//!
//! Each latch carries only the control fields its downstream stages still need.
//! This module defines those per-stage slices:
//! 1. **Decode:** operand-needed and branch bits consumed by the dependency check.
//! 2. **AGEX:** address and ALU/shifter selects plus the Memory slice.
//! 3. **Memory:** control-flow, data-cache, and size bits plus the Store slice.
//! 4. **Store:** writeback value select and register/CC load enables.
//!
//! Every slice is built directly from the full [`ControlWord`] by a pure function, and
//! each wider slice embeds the narrower one it hands downstream.

use crate::core::microcode::{ControlWord, CsBit, Field};

/// Destination register select.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrMux {
    /// IR\[11:9\].
    #[default]
    Ir11_9,
    /// R7.
    R7,
}

/// First address operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Addr1Mux {
    /// The instruction's NPC.
    #[default]
    Npc,
    /// The SR1 (base register) value.
    BaseR,
}

/// Second address operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Addr2Mux {
    /// Zero.
    #[default]
    Zero,
    /// IR\[5:0\] sign-extended.
    Offset6,
    /// IR\[8:0\] sign-extended.
    PcOffset9,
    /// IR\[10:0\] sign-extended.
    PcOffset11,
}

/// Source of the computed address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AddressMux {
    /// IR\[7:0\] zero-extended and shifted left by one.
    #[default]
    TrapVector,
    /// Sum of the two address operands.
    Adder,
}

/// Second ALU operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Sr2Mux {
    /// The SR2 value.
    #[default]
    Register,
    /// IR\[4:0\] sign-extended.
    Immediate,
}

/// ALU operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Addition.
    #[default]
    Add,
    /// Bitwise AND.
    And,
    /// Bitwise XOR.
    Xor,
    /// Pass the second operand through.
    PassB,
}

/// Source of the ALU_RESULT latch field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResultMux {
    /// The shifter.
    #[default]
    Shifter,
    /// The ALU.
    Alu,
}

/// Data-cache access size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DataSize {
    /// One byte, selected by address bit 0.
    #[default]
    Byte,
    /// A whole word.
    Word,
}

/// Writeback value select.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrValueMux {
    /// ADDRESS.
    #[default]
    Address,
    /// DATA (loaded value).
    Data,
    /// NPC (return address).
    Npc,
    /// ALU_RESULT.
    AluResult,
}

/// Next-PC select produced by the Memory stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PcMux {
    /// PC + 2.
    #[default]
    Sequential,
    /// The branch or jump target.
    BranchTarget,
    /// The word read from the trap vector table.
    TrapVector,
}

impl PcMux {
    /// The 2-bit encoding: 0 sequential, 1 target, 2 trap.
    pub const fn bits(self) -> u8 {
        match self {
            Self::Sequential => 0,
            Self::BranchTarget => 1,
            Self::TrapVector => 2,
        }
    }
}

/// Fields consumed in Decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeControlSignals {
    /// SR1 is a true operand.
    pub sr1_needed: bool,
    /// SR2 is a true operand.
    pub sr2_needed: bool,
    /// Destination register select.
    pub dr_mux: DrMux,
    /// Conditional branch; reads the condition codes.
    pub br_op: bool,
    /// Front end stalls while this instruction is in Decode.
    pub br_stall: bool,
}

impl DecodeControlSignals {
    /// Extracts the Decode fields.
    pub const fn from_word(word: ControlWord) -> Self {
        Self {
            sr1_needed: word.bit(CsBit::Sr1Needed),
            sr2_needed: word.bit(CsBit::Sr2Needed),
            dr_mux: if word.bit(CsBit::DrMux) {
                DrMux::R7
            } else {
                DrMux::Ir11_9
            },
            br_op: word.bit(CsBit::BrOp),
            br_stall: word.bit(CsBit::BrStall),
        }
    }
}

/// Fields latched into the AGEX-input latch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AgexControlSignals {
    /// First address operand.
    pub addr1_mux: Addr1Mux,
    /// Second address operand.
    pub addr2_mux: Addr2Mux,
    /// Shift the second address operand left by one.
    pub lshf1: bool,
    /// Address source.
    pub address_mux: AddressMux,
    /// Second ALU operand.
    pub sr2_mux: Sr2Mux,
    /// ALU operation.
    pub aluk: AluOp,
    /// ALU or shifter result.
    pub alu_result_mux: ResultMux,
    /// Fields handed on to the Memory stage.
    pub mem: MemoryControlSignals,
}

impl AgexControlSignals {
    /// Extracts the AGEX fields and everything downstream of them.
    pub fn from_word(word: ControlWord) -> Self {
        Self {
            addr1_mux: if word.bit(CsBit::Addr1Mux) {
                Addr1Mux::BaseR
            } else {
                Addr1Mux::Npc
            },
            addr2_mux: match word.field(Field::Addr2Mux) {
                0 => Addr2Mux::Zero,
                1 => Addr2Mux::Offset6,
                2 => Addr2Mux::PcOffset9,
                _ => Addr2Mux::PcOffset11,
            },
            lshf1: word.bit(CsBit::Lshf1),
            address_mux: if word.bit(CsBit::AddressMux) {
                AddressMux::Adder
            } else {
                AddressMux::TrapVector
            },
            sr2_mux: if word.bit(CsBit::Sr2Mux) {
                Sr2Mux::Immediate
            } else {
                Sr2Mux::Register
            },
            aluk: match word.field(Field::Aluk) {
                0 => AluOp::Add,
                1 => AluOp::And,
                2 => AluOp::Xor,
                _ => AluOp::PassB,
            },
            alu_result_mux: if word.bit(CsBit::AluResultMux) {
                ResultMux::Alu
            } else {
                ResultMux::Shifter
            },
            mem: MemoryControlSignals::from_word(word),
        }
    }
}

/// Fields latched into the Memory-input latch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryControlSignals {
    /// Conditional branch.
    pub br_op: bool,
    /// Unconditional jump.
    pub uncond_op: bool,
    /// Trap.
    pub trap_op: bool,
    /// Front end stalls while this instruction is in AGEX or Memory.
    pub br_stall: bool,
    /// Access the data cache.
    pub dcache_en: bool,
    /// The access is a write.
    pub dcache_rw: bool,
    /// Access size.
    pub data_size: DataSize,
    /// Fields handed on to the Store stage.
    pub store: StoreControlSignals,
}

impl MemoryControlSignals {
    /// Extracts the Memory fields and everything downstream of them.
    pub const fn from_word(word: ControlWord) -> Self {
        Self {
            br_op: word.bit(CsBit::BrOp),
            uncond_op: word.bit(CsBit::UncondOp),
            trap_op: word.bit(CsBit::TrapOp),
            br_stall: word.bit(CsBit::BrStall),
            dcache_en: word.bit(CsBit::DcacheEn),
            dcache_rw: word.bit(CsBit::DcacheRw),
            data_size: if word.bit(CsBit::DataSize) {
                DataSize::Word
            } else {
                DataSize::Byte
            },
            store: StoreControlSignals::from_word(word),
        }
    }
}

/// Fields latched into the Store-input latch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreControlSignals {
    /// Writeback value select.
    pub dr_value_mux: DrValueMux,
    /// Write the destination register.
    pub ld_reg: bool,
    /// Write the condition codes.
    pub ld_cc: bool,
}

impl StoreControlSignals {
    /// Extracts the Store fields.
    pub const fn from_word(word: ControlWord) -> Self {
        let select = ((word.bit(CsBit::DrValueMux1) as u8) << 1) | word.bit(CsBit::DrValueMux0) as u8;
        Self {
            dr_value_mux: match select {
                0 => DrValueMux::Address,
                1 => DrValueMux::Data,
                2 => DrValueMux::Npc,
                _ => DrValueMux::AluResult,
            },
            ld_reg: word.bit(CsBit::LdReg),
            ld_cc: word.bit(CsBit::LdCc),
        }
    }
}
