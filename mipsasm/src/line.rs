use std::fmt::{self, Display};

use crate::{
    constants::{is_valid_label, line_regex, operand_split_regex},
    error::AsmError,
};

/// A real or pseudo instruction as written: mnemonic plus raw operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: String,
    pub operands: Vec<String>,
}

impl Instruction {
    pub fn new(mnemonic: &str, operands: &[&str]) -> Self {
        Self {
            mnemonic: mnemonic.to_owned(),
            operands: operands.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic)?;
        for operand in &self.operands {
            write!(f, " {}", operand)?;
        }
        Ok(())
    }
}

/// One source line after tokenizing. Either part may be missing: `loop:` on
/// its own line only defines a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub line_no: usize,
    pub label: Option<String>,
    pub instruction: Option<Instruction>,
}

impl Line {
    pub fn new(line_no: usize, label: Option<&str>, instruction: Option<Instruction>) -> Self {
        Self {
            line_no,
            label: label.map(str::to_owned),
            instruction,
        }
    }
}

/// Splits a source line into label, mnemonic and operands. Commas,
/// whitespace and parentheses all separate operands, so `4($sp)` becomes
/// `4`, `$sp`. Blank and comment-only lines give `None`.
pub fn parse_line(text: &str, line_no: usize) -> Result<Option<Line>, AsmError> {
    let Some(captures) = line_regex().captures(text) else {
        return Ok(None);
    };

    let label = captures.name("label").map(|m| m.as_str());
    if let Some(label) = label {
        if !is_valid_label(label) {
            return Err(AsmError::InvalidOperand(label.to_owned()));
        }
    }

    let rest = captures.name("rest").map(|m| m.as_str()).unwrap_or("");
    let mut tokens = operand_split_regex()
        .split(rest)
        .filter(|token| !token.is_empty());

    let instruction = tokens.next().map(|mnemonic| Instruction {
        mnemonic: mnemonic.to_owned(),
        operands: tokens.map(str::to_owned).collect(),
    });

    if label.is_none() && instruction.is_none() {
        return Ok(None);
    }

    Ok(Some(Line::new(line_no, label, instruction)))
}

/// Tokenizes a whole program, numbering lines from 1.
pub fn parse_program(text: &str) -> Result<Vec<Line>, (usize, AsmError)> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_line(line, idx + 1).map_err(|e| (idx + 1, e)).transpose())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_operands() {
        let line = parse_line("  addu $t0, $t1,$t2  # sum", 3).unwrap().unwrap();
        assert_eq!(line.line_no, 3);
        assert_eq!(line.label, None);
        assert_eq!(
            line.instruction,
            Some(Instruction::new("addu", &["$t0", "$t1", "$t2"]))
        );
    }

    #[test]
    fn memory_operands() {
        let line = parse_line("lw $t0, -4($sp)", 1).unwrap().unwrap();
        assert_eq!(
            line.instruction,
            Some(Instruction::new("lw", &["$t0", "-4", "$sp"]))
        );
    }

    #[test]
    fn labels() {
        let line = parse_line("loop: bne $t0 $zero loop", 1).unwrap().unwrap();
        assert_eq!(line.label.as_deref(), Some("loop"));
        assert_eq!(line.instruction.unwrap().mnemonic, "bne");

        let line = parse_line("done:", 2).unwrap().unwrap();
        assert_eq!(line.label.as_deref(), Some("done"));
        assert_eq!(line.instruction, None);

        assert_eq!(
            parse_line("9lives: jr $ra", 4),
            Err(AsmError::InvalidOperand("9lives".to_owned()))
        );
    }

    #[test]
    fn blank_lines() {
        assert_eq!(parse_line("", 1), Ok(None));
        assert_eq!(parse_line("    ", 1), Ok(None));
        assert_eq!(parse_line("# just a comment", 1), Ok(None));
    }

    #[test]
    fn display_has_no_trailing_space() {
        assert_eq!(Instruction::new("jr", &["$ra"]).to_string(), "jr $ra");
        assert_eq!(Instruction::new("nop", &[]).to_string(), "nop");
    }

    #[test]
    fn program_reports_line_numbers() {
        let lines = parse_program("main:\n\n  jr $ra\n").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].line_no, 3);

        assert_eq!(
            parse_program("jr $ra\n1bad: jr $ra"),
            Err((2, AsmError::InvalidOperand("1bad".to_owned())))
        );
    }
}
