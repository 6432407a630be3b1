use libmips::{
    op::{
        Branch, BranchOp, Immediate, ImmediateOp, Jump, JumpOp, JumpReg, JumpRegOp, Memory,
        MemoryOp, MoveFrom, MoveFromOp, MulDiv, MulDivOp, RegOp, RegReg, Shift, ShiftOp,
    },
    Op, Register,
};
use log::debug;
use std::fmt::Display;

use crate::{
    constants::{is_valid_label, number, register, MAX_WORD, MIN_WORD},
    directive::Directive,
    error::{AsmError, Failures, InstructionError},
    line::Instruction,
    pass_one::PassOne,
    record::Record,
    symbols::{Mode, SymbolTable},
    Options,
};

/// Output of a successful run.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub words: Vec<u32>,
    pub labels: SymbolTable,
    pub relocations: SymbolTable,
}

impl Assembly {
    pub fn records(&self) -> [Record<'_>; 3] {
        [
            Record::Text(&self.words),
            Record::Symbols(&self.labels),
            Record::Relocations(&self.relocations),
        ]
    }
}

/// The whole object: text, then symbols, then relocations.
impl Display for Assembly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for record in self.records() {
            write!(f, "{}", record)?;
        }
        Ok(())
    }
}

fn reg_reg(funct: RegOp, ops: &[String]) -> Result<Op, AsmError> {
    Ok(Op::RegReg(RegReg {
        funct,
        rd: register(&ops[0])?,
        rs: register(&ops[1])?,
        rt: register(&ops[2])?,
    }))
}

fn shift(funct: ShiftOp, ops: &[String]) -> Result<Op, AsmError> {
    Ok(Op::Shift(Shift {
        funct,
        rd: register(&ops[0])?,
        rt: register(&ops[1])?,
        shamt: number(&ops[2], 0, 31)? as u8,
    }))
}

fn jump_reg(funct: JumpRegOp, ops: &[String]) -> Result<Op, AsmError> {
    Ok(Op::JumpReg(JumpReg {
        funct,
        rs: register(&ops[0])?,
    }))
}

fn mul_div(funct: MulDivOp, ops: &[String]) -> Result<Op, AsmError> {
    Ok(Op::MulDiv(MulDiv {
        funct,
        rs: register(&ops[0])?,
        rt: register(&ops[1])?,
    }))
}

fn move_from(funct: MoveFromOp, ops: &[String]) -> Result<Op, AsmError> {
    Ok(Op::MoveFrom(MoveFrom {
        funct,
        rd: register(&ops[0])?,
    }))
}

// addiu accepts any 32 bit signed value and keeps the low half; ori is
// unsigned 16 bit; lui takes anything that fits a word.
fn immediate(opcode: ImmediateOp, ops: &[String]) -> Result<Op, AsmError> {
    let rt = register(&ops[0])?;
    let (rs, imm) = match opcode {
        ImmediateOp::ADDIU => (
            register(&ops[1])?,
            number(&ops[2], i32::MIN as i64, i32::MAX as i64)?,
        ),
        ImmediateOp::ORI => (register(&ops[1])?, number(&ops[2], 0, u16::MAX as i64)?),
        ImmediateOp::LUI => (Register::Zero, number(&ops[1], MIN_WORD, MAX_WORD)?),
    };

    Ok(Op::Immediate(Immediate {
        opcode,
        rt,
        rs,
        imm: imm as u16,
    }))
}

fn memory(opcode: MemoryOp, ops: &[String]) -> Result<Op, AsmError> {
    Ok(Op::Memory(Memory {
        opcode,
        rt: register(&ops[0])?,
        offset: number(&ops[1], i16::MIN as i64, i16::MAX as i64)? as i16,
        base: register(&ops[2])?,
    }))
}

fn label(name: &str) -> Result<&str, AsmError> {
    if is_valid_label(name) {
        Ok(name)
    } else {
        Err(AsmError::InvalidOperand(name.to_owned()))
    }
}

/// Word offset from the instruction after `address` to `target`.
pub fn branch_offset(address: u32, target: u32) -> Result<i16, AsmError> {
    let delta = target as i64 - (address as i64 + 4);

    if delta % 4 != 0 {
        let misaligned = if target % 4 != 0 { target } else { address };
        return Err(AsmError::MisalignedAddress(misaligned));
    }

    i16::try_from(delta / 4).map_err(|_| AsmError::UnreachableBranch { address, target })
}

fn branch(
    opcode: BranchOp,
    ops: &[String],
    address: u32,
    labels: &SymbolTable,
) -> Result<Op, AsmError> {
    let rs = register(&ops[0])?;
    let rt = register(&ops[1])?;
    let name = label(&ops[2])?;
    let target = labels
        .lookup(name)
        .map_err(|_| AsmError::UnresolvedLabel(name.to_owned()))?;

    Ok(Op::Branch(Branch {
        opcode,
        rs,
        rt,
        offset: branch_offset(address, target)?,
    }))
}

/// Encodes one real instruction at `address`. Branch targets come from
/// `labels`; jump targets are never resolved here, each jump adds an entry
/// to `relocations` and leaves its target field zero. A failed instruction
/// produces no word and leaves `relocations` untouched.
pub fn translate(
    instruction: &Instruction,
    address: u32,
    labels: &SymbolTable,
    relocations: &mut SymbolTable,
) -> Result<u32, AsmError> {
    let directive = Directive::from_mnemonic(&instruction.mnemonic)
        .ok_or_else(|| AsmError::UnknownInstruction(instruction.mnemonic.clone()))?;

    let ops = &instruction.operands;
    if ops.len() != directive.arity() {
        return Err(AsmError::arity(
            &instruction.mnemonic,
            directive.arity(),
            ops.len(),
        ));
    }

    let op = match directive {
        Directive::RegReg(funct) => reg_reg(funct, ops)?,
        Directive::Shift(funct) => shift(funct, ops)?,
        Directive::JumpReg(funct) => jump_reg(funct, ops)?,
        Directive::MulDiv(funct) => mul_div(funct, ops)?,
        Directive::MoveFrom(funct) => move_from(funct, ops)?,
        Directive::Immediate(opcode) => immediate(opcode, ops)?,
        Directive::Memory(opcode) => memory(opcode, ops)?,
        Directive::Branch(opcode) => branch(opcode, ops, address, labels)?,
        Directive::Jump(opcode) => {
            let name = label(&ops[0])?;
            let word = jump(opcode).encode()?;
            relocations.insert(name, address)?;
            return Ok(word);
        }
    };

    Ok(op.encode()?)
}

fn jump(opcode: JumpOp) -> Op {
    Op::Jump(Jump { opcode, target: 0 })
}

struct PassTwo {
    words: Vec<u32>,
    relocations: SymbolTable,
    pass_one: PassOne,
}

impl PassTwo {
    fn new(pass_one: PassOne) -> Self {
        Self {
            words: Vec::with_capacity(pass_one.instructions.len()),
            relocations: SymbolTable::new(Mode::NonUnique),
            pass_one,
        }
    }

    fn assemble_lines(mut self, options: &Options) -> Result<Assembly, Failures> {
        let mut failures = Vec::new();

        for (index, expanded) in self.pass_one.instructions.iter().enumerate() {
            match translate(
                &expanded.instruction,
                expanded.address,
                &self.pass_one.labels,
                &mut self.relocations,
            ) {
                Ok(word) => self.words.push(word),
                Err(source) => {
                    debug!(
                        "pass two failed on `{}` (line {}): {}",
                        expanded.instruction, expanded.line_no, source
                    );
                    let fatal = source.is_fatal();
                    failures.push(InstructionError {
                        index,
                        line_no: expanded.line_no,
                        source,
                    });
                    if fatal || !options.keep_going {
                        break;
                    }
                }
            }
        }

        if !failures.is_empty() {
            return Err(Failures(failures));
        }

        Ok(Assembly {
            words: self.words,
            labels: self.pass_one.labels,
            relocations: self.relocations,
        })
    }
}

/// Encodes every expanded instruction in program order.
pub fn pass_two(pass_one: PassOne, options: &Options) -> Result<Assembly, Failures> {
    PassTwo::new(pass_one).assemble_lines(options)
}
