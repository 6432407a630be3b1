use std::io::{self, Write};

use log::{debug, trace};

use crate::{
    constants::{number, MAX_WORD, MIN_WORD},
    error::{AsmError, Failures, InstructionError},
    line::{Instruction, Line},
    symbols::{Mode, SymbolTable},
    Options,
};

static ZERO: &str = "$zero";
// Assembler temporary, the scratch register for multi-word expansions.
static AT: &str = "$at";

// Highest word-aligned address
const LAST_WORD: u32 = u32::MAX & !3;

// addiu sign-extends its immediate
const MIN_ADDIU: i64 = i16::MIN as i64;
const MAX_ADDIU: i64 = i16::MAX as i64;

/// An instruction after expansion, with its final address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expanded {
    pub instruction: Instruction,
    pub address: u32,
    pub line_no: usize,
}

pub struct PassOne {
    pub instructions: Vec<Expanded>,
    /// Words produced by each input line, in input order.
    pub word_counts: Vec<usize>,
    pub labels: SymbolTable,
}

fn real(mnemonic: &str, operands: &[&str]) -> Instruction {
    Instruction::new(mnemonic, operands)
}

fn check_arity(instruction: &Instruction, expected: usize) -> Result<(), AsmError> {
    let found = instruction.operands.len();
    if found != expected {
        return Err(AsmError::arity(&instruction.mnemonic, expected, found));
    }
    Ok(())
}

fn expand_li(rt: &str, imm: &str) -> Result<Vec<Instruction>, AsmError> {
    let value = number(imm, MIN_WORD, MAX_WORD)?;

    if (MIN_ADDIU..=MAX_ADDIU).contains(&value) {
        return Ok(vec![real("addiu", &[rt, ZERO, &value.to_string()])]);
    }

    let bits = value as u32;
    let upper = (bits >> 16).to_string();
    let lower = (bits & 0xFFFF).to_string();

    Ok(vec![
        real("lui", &[rt, &upper]),
        real("ori", &[rt, rt, &lower]),
    ])
}

/// Expands one source instruction into the real instructions it stands for.
/// Only operand counts and `li`'s immediate are checked here; registers and
/// labels are left for pass two. Anything that isn't a pseudo instruction
/// comes back unchanged.
pub fn expand(instruction: &Instruction) -> Result<Vec<Instruction>, AsmError> {
    let ops: Vec<&str> = instruction.operands.iter().map(String::as_str).collect();

    let expanded = match instruction.mnemonic.as_str() {
        "li" => {
            check_arity(instruction, 2)?;
            expand_li(ops[0], ops[1])?
        }
        "move" => {
            check_arity(instruction, 2)?;
            vec![real("addu", &[ops[0], ops[1], ZERO])]
        }
        "blt" => {
            check_arity(instruction, 3)?;
            vec![
                real("slt", &[AT, ops[0], ops[1]]),
                real("bne", &[AT, ZERO, ops[2]]),
            ]
        }
        "bgt" => {
            check_arity(instruction, 3)?;
            vec![
                real("slt", &[AT, ops[1], ops[0]]),
                real("bne", &[AT, ZERO, ops[2]]),
            ]
        }
        "traddu" => {
            check_arity(instruction, 3)?;
            vec![
                real("addu", &[ops[0], ops[0], ops[1]]),
                real("addu", &[ops[0], ops[0], ops[2]]),
            ]
        }
        // The xor swap needs no scratch but zeroes `swpr r, r`
        "swpr" => {
            check_arity(instruction, 2)?;
            vec![
                real("addu", &[AT, ops[0], ZERO]),
                real("addu", &[ops[0], ops[1], ZERO]),
                real("addu", &[ops[1], AT, ZERO]),
            ]
        }
        "mul" => {
            check_arity(instruction, 3)?;
            vec![real("mult", &[ops[1], ops[2]]), real("mflo", &[ops[0]])]
        }
        // Two operands is the real divide, leaving the result in hi/lo
        "div" if ops.len() == 2 => vec![instruction.clone()],
        "div" => {
            check_arity(instruction, 3)?;
            vec![real("div", &[ops[1], ops[2]]), real("mflo", &[ops[0]])]
        }
        "rem" => {
            check_arity(instruction, 3)?;
            vec![real("div", &[ops[1], ops[2]]), real("mfhi", &[ops[0]])]
        }
        _ => vec![instruction.clone()],
    };

    Ok(expanded)
}

/// Writes expanded instructions one per line.
pub fn write_expanded<W: Write>(output: &mut W, instructions: &[Instruction]) -> io::Result<()> {
    for instruction in instructions {
        writeln!(output, "{}", instruction)?;
    }
    Ok(())
}

fn place(address: u64) -> Result<u32, AsmError> {
    u32::try_from(address).map_err(|_| AsmError::AddressOverflow(LAST_WORD))
}

struct FirstPass {
    // Wider than an address so the counter may sit one past the last word
    cur_address: u64,
    labels: SymbolTable,
    instructions: Vec<Expanded>,
    word_counts: Vec<usize>,
}

impl FirstPass {
    fn new(base_address: u32) -> Self {
        Self {
            cur_address: base_address as u64,
            labels: SymbolTable::new(Mode::UniqueName),
            instructions: Vec::new(),
            word_counts: Vec::new(),
        }
    }

    // Nothing is recorded for a line unless all of it succeeds.
    fn parse_line(&mut self, line: &Line) -> Result<usize, AsmError> {
        let expanded = match line.instruction.as_ref() {
            Some(instruction) => expand(instruction)?,
            None => Vec::new(),
        };
        let count = expanded.len();

        let mut address = self.cur_address;
        let mut placed = Vec::with_capacity(count);
        for instruction in expanded {
            placed.push(Expanded {
                instruction,
                address: place(address)?,
                line_no: line.line_no,
            });
            address += 4;
        }

        if let Some(label) = line.label.as_ref() {
            let at = place(self.cur_address)?;
            self.labels.insert(label, at)?;
            trace!("label {} = {:#x}", label, at);
        }

        self.instructions.append(&mut placed);
        self.cur_address = address;

        Ok(count)
    }
}

/// Expands every line and assigns addresses, filling the label table. Must
/// finish for the whole program before any instruction is encoded.
pub fn pass_one(lines: &[Line], options: &Options) -> Result<PassOne, Failures> {
    let mut pass = FirstPass::new(options.base_address());
    let mut failures = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        match pass.parse_line(line) {
            Ok(count) => pass.word_counts.push(count),
            Err(source) => {
                debug!("pass one failed on line {}: {}", line.line_no, source);
                pass.word_counts.push(0);
                let fatal = source.is_fatal();
                failures.push(InstructionError {
                    index,
                    line_no: line.line_no,
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

    Ok(PassOne {
        instructions: pass.instructions,
        word_counts: pass.word_counts,
        labels: pass.labels,
    })
}
