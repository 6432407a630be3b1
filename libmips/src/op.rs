use num::FromPrimitive;
use num_derive::FromPrimitive;
use thiserror::Error;

use crate::reg::Register;
use crate::word::{i_word, j_word, r_word, Fields, TARGET_MASK};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("shift amount {0} does not fit in 5 bits")]
    ShiftOutOfRange(u8),
    #[error("jump target {0:#x} does not fit in 26 bits")]
    TargetOutOfRange(u32),
}

/// Register-register ops, `rd = rs <op> rt`.
#[allow(clippy::upper_case_acronyms)]
#[derive(FromPrimitive, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegOp {
    ADDU = 0x21,
    SUBU = 0x23,
    AND = 0x24,
    OR = 0x25,
    XOR = 0x26,
    NOR = 0x27,
    SLT = 0x2A,
    SLTU = 0x2B,
}

#[allow(clippy::upper_case_acronyms)]
#[derive(FromPrimitive, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftOp {
    SLL = 0x00,
    SRL = 0x02,
    SRA = 0x03,
}

#[allow(clippy::upper_case_acronyms)]
#[derive(FromPrimitive, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpRegOp {
    JR = 0x08,
}

#[allow(clippy::upper_case_acronyms)]
#[derive(FromPrimitive, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MulDivOp {
    MULT = 0x18,
    DIV = 0x1A,
}

#[allow(clippy::upper_case_acronyms)]
#[derive(FromPrimitive, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveFromOp {
    MFHI = 0x10,
    MFLO = 0x12,
}

#[allow(clippy::upper_case_acronyms)]
#[derive(FromPrimitive, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImmediateOp {
    ADDIU = 0x09,
    ORI = 0x0D,
    LUI = 0x0F,
}

#[allow(clippy::upper_case_acronyms)]
#[derive(FromPrimitive, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryOp {
    LB = 0x20,
    LW = 0x23,
    LBU = 0x24,
    SB = 0x28,
    SW = 0x2B,
}

#[allow(clippy::upper_case_acronyms)]
#[derive(FromPrimitive, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchOp {
    BEQ = 0x04,
    BNE = 0x05,
}

#[allow(clippy::upper_case_acronyms)]
#[derive(FromPrimitive, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOp {
    J = 0x02,
    JAL = 0x03,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegReg {
    pub funct: RegOp,
    pub rd: Register,
    pub rs: Register,
    pub rt: Register,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shift {
    pub funct: ShiftOp,
    pub rd: Register,
    pub rt: Register,
    pub shamt: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpReg {
    pub funct: JumpRegOp,
    pub rs: Register,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MulDiv {
    pub funct: MulDivOp,
    pub rs: Register,
    pub rt: Register,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveFrom {
    pub funct: MoveFromOp,
    pub rd: Register,
}

/// `lui` carries `$zero` in `rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Immediate {
    pub opcode: ImmediateOp,
    pub rt: Register,
    pub rs: Register,
    pub imm: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    pub opcode: MemoryOp,
    pub rt: Register,
    pub base: Register,
    pub offset: i16,
}

/// `offset` counts words from the instruction after the branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub opcode: BranchOp,
    pub rs: Register,
    pub rt: Register,
    pub offset: i16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jump {
    pub opcode: JumpOp,
    pub target: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    RegReg(RegReg),
    Shift(Shift),
    JumpReg(JumpReg),
    MulDiv(MulDiv),
    MoveFrom(MoveFrom),
    Immediate(Immediate),
    Memory(Memory),
    Branch(Branch),
    Jump(Jump),
}

impl Op {
    pub fn encode(&self) -> Result<u32, EncodeError> {
        let word = match self {
            Op::RegReg(op) => r_word(
                op.rs.number(),
                op.rt.number(),
                op.rd.number(),
                0,
                op.funct as u32,
            ),
            Op::Shift(op) => {
                if op.shamt > 31 {
                    return Err(EncodeError::ShiftOutOfRange(op.shamt));
                }
                r_word(
                    0,
                    op.rt.number(),
                    op.rd.number(),
                    op.shamt as u32,
                    op.funct as u32,
                )
            }
            Op::JumpReg(op) => r_word(op.rs.number(), 0, 0, 0, op.funct as u32),
            Op::MulDiv(op) => r_word(op.rs.number(), op.rt.number(), 0, 0, op.funct as u32),
            Op::MoveFrom(op) => r_word(0, 0, op.rd.number(), 0, op.funct as u32),
            Op::Immediate(op) => {
                i_word(op.opcode as u32, op.rs.number(), op.rt.number(), op.imm)
            }
            Op::Memory(op) => i_word(
                op.opcode as u32,
                op.base.number(),
                op.rt.number(),
                op.offset as u16,
            ),
            Op::Branch(op) => i_word(
                op.opcode as u32,
                op.rs.number(),
                op.rt.number(),
                op.offset as u16,
            ),
            Op::Jump(op) => {
                if op.target & !TARGET_MASK != 0 {
                    return Err(EncodeError::TargetOutOfRange(op.target));
                }
                j_word(op.opcode as u32, op.target)
            }
        };

        Ok(word)
    }

    pub fn decode(word: u32) -> Option<Self> {
        let fields = Fields::from_word(word);

        if fields.opcode == 0 {
            return Self::decode_special(&fields);
        }

        if let Some(opcode) = FromPrimitive::from_u32(fields.opcode) {
            return Some(Self::Immediate(Immediate {
                opcode,
                rt: Register::from_field(fields.rt),
                rs: Register::from_field(fields.rs),
                imm: fields.imm,
            }));
        }

        if let Some(opcode) = FromPrimitive::from_u32(fields.opcode) {
            return Some(Self::Memory(Memory {
                opcode,
                rt: Register::from_field(fields.rt),
                base: Register::from_field(fields.rs),
                offset: fields.signed_imm(),
            }));
        }

        if let Some(opcode) = FromPrimitive::from_u32(fields.opcode) {
            return Some(Self::Branch(Branch {
                opcode,
                rs: Register::from_field(fields.rs),
                rt: Register::from_field(fields.rt),
                offset: fields.signed_imm(),
            }));
        }

        if let Some(opcode) = FromPrimitive::from_u32(fields.opcode) {
            return Some(Self::Jump(Jump {
                opcode,
                target: fields.target,
            }));
        }

        None
    }

    fn decode_special(fields: &Fields) -> Option<Self> {
        if let Some(funct) = FromPrimitive::from_u32(fields.funct) {
            return Some(Self::RegReg(RegReg {
                funct,
                rd: Register::from_field(fields.rd),
                rs: Register::from_field(fields.rs),
                rt: Register::from_field(fields.rt),
            }));
        }

        if let Some(funct) = FromPrimitive::from_u32(fields.funct) {
            return Some(Self::Shift(Shift {
                funct,
                rd: Register::from_field(fields.rd),
                rt: Register::from_field(fields.rt),
                shamt: fields.shamt as u8,
            }));
        }

        if let Some(funct) = FromPrimitive::from_u32(fields.funct) {
            return Some(Self::JumpReg(JumpReg {
                funct,
                rs: Register::from_field(fields.rs),
            }));
        }

        if let Some(funct) = FromPrimitive::from_u32(fields.funct) {
            return Some(Self::MulDiv(MulDiv {
                funct,
                rs: Register::from_field(fields.rs),
                rt: Register::from_field(fields.rt),
            }));
        }

        if let Some(funct) = FromPrimitive::from_u32(fields.funct) {
            return Some(Self::MoveFrom(MoveFrom {
                funct,
                rd: Register::from_field(fields.rd),
            }));
        }

        None
    }
}
