use anyhow::{Context, Result};
use log::debug;

pub use error::{AsmError, Failures, InstructionError};
pub use line::{parse_line, parse_program, Instruction, Line};
pub use pass_one::{expand, pass_one, write_expanded, Expanded, PassOne};
pub use pass_two::{pass_two, translate, Assembly};
pub use record::{write_words, Record};
pub use symbols::{Mode, Symbol, SymbolTable};

mod constants;
mod directive;
mod error;
mod line;
mod pass_one;
mod pass_two;
mod record;
mod symbols;

/// Settings for one run of the assembler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    base_address: u32,
    /// Report every failing instruction instead of stopping at the first.
    pub keep_going: bool,
}

impl Options {
    pub fn with_base_address(base_address: u32) -> Result<Self, AsmError> {
        if base_address % 4 != 0 {
            return Err(AsmError::MisalignedAddress(base_address));
        }
        Ok(Self {
            base_address,
            ..Self::default()
        })
    }

    pub fn base_address(&self) -> u32 {
        self.base_address
    }
}

/// Tokenize and run pass one, giving the expanded program with addresses
/// and the finished label table.
///
/// # Errors
///
/// Returns [`Failures`] (wrapped) if any line fails to tokenize or expand
pub fn expand_program(program_text: &str, options: &Options) -> Result<PassOne> {
    let lines = parse_program(program_text)
        .map_err(|(line_no, source)| {
            Failures(vec![InstructionError {
                index: line_no - 1,
                line_no,
                source,
            }])
        })
        .context("couldn't tokenize program")?;
    debug!("tokenized {} line(s)", lines.len());

    let pass = pass_one(&lines, options).context("pass one failed")?;
    debug!(
        "pass one placed {} instruction(s), {} label(s)",
        pass.instructions.len(),
        pass.labels.len()
    );

    Ok(pass)
}

/// Assemble a program from text.
///
/// # Errors
///
/// If there's an error in the assembly code. The underlying [`Failures`] can
/// be recovered with `downcast_ref`.
pub fn assemble_program(program_text: &str, options: &Options) -> Result<Assembly> {
    let pass = expand_program(program_text, options)?;
    let assembly = pass_two(pass, options).context("pass two failed")?;
    debug!(
        "pass two produced {} word(s), {} relocation(s)",
        assembly.words.len(),
        assembly.relocations.len()
    );

    Ok(assembly)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_address_must_be_aligned() {
        assert_eq!(
            Options::with_base_address(6),
            Err(AsmError::MisalignedAddress(6))
        );
        assert_eq!(Options::with_base_address(8).unwrap().base_address(), 8);
        assert_eq!(Options::default().base_address(), 0);
    }

    #[test]
    fn failures_survive_context() {
        let err = assemble_program("main: jr $ra\n  bogus $t0\n", &Options::default())
            .err()
            .unwrap();
        let failures = err.downcast_ref::<Failures>().unwrap();
        assert_eq!(failures.first().unwrap().line_no, 2);
        assert_eq!(
            failures.first().unwrap().source,
            AsmError::UnknownInstruction("bogus".to_owned())
        );
    }

    #[test]
    fn tokenizer_errors_are_failures() {
        let err = expand_program("jr $ra\n\n3x: jr $ra", &Options::default())
            .err()
            .unwrap();
        let failures = err.downcast_ref::<Failures>().unwrap();
        assert_eq!(failures.first().unwrap().line_no, 3);
        assert_eq!(failures.first().unwrap().index, 2);
    }
}
