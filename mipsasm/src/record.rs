use std::fmt::Display;
use std::io::{self, Write};

use crate::symbols::SymbolTable;

/// One section of the object output.
#[derive(Debug)]
pub enum Record<'a> {
    Text(&'a [u32]),
    Symbols(&'a SymbolTable),
    Relocations(&'a SymbolTable),
}

impl Display for Record<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Record::Text(words) => {
                writeln!(f, ".text")?;
                for word in words.iter() {
                    writeln!(f, "{:08x}", word)?;
                }
                Ok(())
            }
            Record::Symbols(table) => write!(f, ".symbol\n{}", table),
            Record::Relocations(table) => write!(f, ".relocation\n{}", table),
        }
    }
}

/// Machine words as lowercase hex, one per line.
pub fn write_words<W: Write>(output: &mut W, words: &[u32]) -> io::Result<()> {
    for word in words {
        writeln!(output, "{:08x}", word)?;
    }
    Ok(())
}
