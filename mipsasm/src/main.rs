use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use mipsasm::{expand_program, pass_two, write_expanded, write_words, Failures, Options};

#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Args {
    /// Assembly source
    input: PathBuf,

    /// Object output; the full listing goes to stdout when omitted
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Address of the first instruction (decimal or 0x hex)
    #[clap(long, value_parser = parse_address, default_value = "0")]
    base_address: u32,

    /// Report every bad instruction instead of stopping at the first
    #[clap(long)]
    keep_going: bool,

    /// Write the label table to <output>.sym
    #[clap(long, requires = "output")]
    symbols: bool,

    /// Write the relocation table to <output>.rel
    #[clap(long, requires = "output")]
    relocations: bool,

    /// Write the program after pseudo-instruction expansion
    #[clap(long)]
    expanded: Option<PathBuf>,
}

fn parse_address(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("bad address `{}`: {}", s, e))
}

fn with_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    name.into()
}

fn report(input: &Path, err: &anyhow::Error) {
    match err.downcast_ref::<Failures>() {
        Some(failures) => {
            for failure in failures.iter() {
                error!("{}:{}: {}", input.display(), failure.line_no, failure.source);
            }
        }
        None => error!("{:#}", err),
    }
}

fn run(args: &Args) -> Result<()> {
    let program_text = fs::read_to_string(&args.input)
        .with_context(|| format!("couldn't read {}", args.input.display()))?;

    let mut options =
        Options::with_base_address(args.base_address).context("bad --base-address")?;
    options.keep_going = args.keep_going;

    let pass = expand_program(&program_text, &options)?;

    if let Some(path) = &args.expanded {
        let instructions: Vec<_> = pass
            .instructions
            .iter()
            .map(|e| e.instruction.clone())
            .collect();
        let mut out = BufWriter::new(File::create(path)?);
        write_expanded(&mut out, &instructions)?;
        out.flush()?;
        info!("wrote {}", path.display());
    }

    let assembly = pass_two(pass, &options).context("pass two failed")?;

    let Some(output) = &args.output else {
        print!("{}", assembly);
        return Ok(());
    };

    let mut out = BufWriter::new(File::create(output)?);
    write_words(&mut out, &assembly.words)?;
    out.flush()?;
    info!("wrote {} word(s) to {}", assembly.words.len(), output.display());

    if args.symbols {
        let path = with_extension(output, "sym");
        let mut out = BufWriter::new(File::create(&path)?);
        assembly.labels.write_table(&mut out)?;
        out.flush()?;
    }

    if args.relocations {
        let path = with_extension(output, "rel");
        let mut out = BufWriter::new(File::create(&path)?);
        assembly.relocations.write_table(&mut out)?;
        out.flush()?;
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    run(&args).map_err(|err| {
        report(&args.input, &err);
        err
    })?;

    io::stdout().flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_dumps_need_an_output() {
        assert!(Args::try_parse_from(["mipsasm", "in.s", "--symbols"]).is_err());
        assert!(Args::try_parse_from(["mipsasm", "in.s", "--relocations"]).is_err());

        let args =
            Args::try_parse_from(["mipsasm", "in.s", "-o", "out", "--symbols", "--relocations"])
                .unwrap();
        assert!(args.symbols && args.relocations);
        assert_eq!(args.output, Some(PathBuf::from("out")));
    }

    #[test]
    fn addresses_take_hex() {
        assert_eq!(parse_address("0x400000"), Ok(0x0040_0000));
        assert_eq!(parse_address("64"), Ok(64));
        assert!(parse_address("0xZZ").is_err());
    }
}
