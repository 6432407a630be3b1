use libmips::EncodeError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("address {0} is not a multiple of 4")]
    MisalignedAddress(u32),

    #[error("name '{0}' already exists in table")]
    DuplicateName(String),

    #[error("couldn't find symbol {0}")]
    NotFound(String),

    #[error("{mnemonic} expects {expected} operand(s), found {found}")]
    InvalidArity {
        mnemonic: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid operand `{0}`")]
    InvalidOperand(String),

    #[error("branch target {0} is not defined")]
    UnresolvedLabel(String),

    #[error("branch target {target} is out of range from {address}")]
    UnreachableBranch { address: u32, target: u32 },

    #[error("unknown instruction `{0}`")]
    UnknownInstruction(String),

    #[error("program runs past the end of the address space at {0:#x}")]
    AddressOverflow(u32),

    #[error("allocation failed")]
    AllocationFailure,
}

impl AsmError {
    /// Fatal errors end the run; everything else is reported per instruction.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AsmError::AllocationFailure)
    }

    pub(crate) fn arity(mnemonic: &str, expected: usize, found: usize) -> Self {
        AsmError::InvalidArity {
            mnemonic: mnemonic.to_owned(),
            expected,
            found,
        }
    }
}

impl From<EncodeError> for AsmError {
    fn from(err: EncodeError) -> Self {
        AsmError::InvalidOperand(err.to_string())
    }
}

/// A failure tied to one instruction of the program.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line_no}: {source}")]
pub struct InstructionError {
    /// Position in the stream the failing pass was walking.
    pub index: usize,
    pub line_no: usize,
    #[source]
    pub source: AsmError,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} instruction(s) failed to assemble", .0.len())]
pub struct Failures(pub Vec<InstructionError>);

impl Failures {
    pub fn first(&self) -> Option<&InstructionError> {
        self.0.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InstructionError> {
        self.0.iter()
    }
}
