use std::fmt::{self, Display};
use std::io::{self, Write};

use crate::error::AsmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Inserting a name that is already present fails.
    UniqueName,
    /// Duplicates are kept in insertion order.
    NonUnique,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub address: u32,
}

/// Append-only name to address table. Used for labels (unique) and for
/// relocation sites (non-unique).
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    mode: Mode,
}

impl SymbolTable {
    pub fn new(mode: Mode) -> Self {
        Self {
            symbols: Vec::new(),
            mode,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn insert(&mut self, name: &str, address: u32) -> Result<(), AsmError> {
        if address % 4 != 0 {
            return Err(AsmError::MisalignedAddress(address));
        }

        if self.mode == Mode::UniqueName && self.symbols.iter().any(|s| s.name == name) {
            return Err(AsmError::DuplicateName(name.to_owned()));
        }

        self.symbols
            .try_reserve(1)
            .map_err(|_| AsmError::AllocationFailure)?;
        self.symbols.push(Symbol {
            name: name.to_owned(),
            address,
        });

        Ok(())
    }

    /// Address of the first entry named `name`.
    pub fn lookup(&self, name: &str) -> Result<u32, AsmError> {
        self.symbols
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.address)
            .ok_or_else(|| AsmError::NotFound(name.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn write_table<W: Write>(&self, output: &mut W) -> io::Result<()> {
        for symbol in &self.symbols {
            writeln!(output, "{}\t{}", symbol.address, symbol.name)?;
        }
        Ok(())
    }
}

impl Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.symbols {
            writeln!(f, "{}\t{}", symbol.address, symbol.name)?;
        }
        Ok(())
    }
}
