use anyhow::Result;
use mipsasm::{assemble_program, expand_program, AsmError, Failures, Options};

fn keep_going() -> Options {
    let mut options = Options::default();
    options.keep_going = true;
    options
}

fn failures(program_text: &str, options: &Options) -> Failures {
    let err = assemble_program(program_text, options).err().unwrap();
    err.downcast_ref::<Failures>().unwrap().clone()
}

#[test]
fn test_sum() -> Result<()> {
    let assembly = assemble_program(include_str!("../programs/sum.s"), &Options::default())?;

    assert_eq!(
        assembly.words,
        vec![
            0x2404_000a,
            0x0000_1021,
            0x0044_1021,
            0x2484_ffff,
            0x0004_082a,
            0x1420_fffc,
            0x03e0_0008,
        ]
    );
    assert_eq!(assembly.labels.lookup("loop")?, 8);
    assert!(assembly.relocations.is_empty());
    Ok(())
}

#[test]
fn test_call_relocations() -> Result<()> {
    let assembly = assemble_program(include_str!("../programs/call.s"), &Options::default())?;

    assert_eq!(assembly.words.len(), 10);
    assert_eq!(assembly.words[4], 0x0c00_0000);
    assert_eq!(assembly.words[9], 0x0800_0000);

    let mut rel = Vec::new();
    assembly.relocations.write_table(&mut rel)?;
    assert_eq!(String::from_utf8(rel)?, "16\tprintf\n36\texit\n");
    Ok(())
}

#[test]
fn test_base_address() -> Result<()> {
    let options = Options::with_base_address(0x0040_0000)?;
    let assembly = assemble_program(include_str!("../programs/call.s"), &options)?;

    assert_eq!(assembly.labels.lookup("main")?, 0x0040_0000);
    assert_eq!(assembly.relocations.lookup("exit")?, 0x0040_0024);
    Ok(())
}

#[test]
fn test_word_counts() -> Result<()> {
    let pass = expand_program(include_str!("../programs/sum.s"), &Options::default())?;
    assert_eq!(pass.word_counts, vec![1, 1, 1, 1, 2, 1]);
    Ok(())
}

#[test]
fn test_stops_at_first_failure() {
    let failures = failures(include_str!("../programs/broken.s"), &Options::default());
    assert_eq!(failures.0.len(), 1);
    assert_eq!(
        failures.first().unwrap().source,
        AsmError::InvalidArity {
            mnemonic: "addu".to_owned(),
            expected: 3,
            found: 2
        }
    );
}

#[test]
fn test_keep_going_reports_everything() {
    let failures = failures(include_str!("../programs/broken.s"), &keep_going());

    let found: Vec<(usize, AsmError)> = failures
        .iter()
        .map(|f| (f.line_no, f.source.clone()))
        .collect();
    assert_eq!(
        found,
        vec![
            (
                1,
                AsmError::InvalidArity {
                    mnemonic: "addu".to_owned(),
                    expected: 3,
                    found: 2
                }
            ),
            (2, AsmError::UnresolvedLabel("nowhere".to_owned())),
            (3, AsmError::UnknownInstruction("frob".to_owned())),
            (4, AsmError::InvalidOperand("-1".to_owned())),
        ]
    );
}

#[test]
fn test_pass_one_failures_skip_pass_two() {
    let program = "a: jr $ra\n   li $t0, 4294967296\na: jr $ra\n   frob $t0\n";
    let failures = failures(program, &keep_going());

    let lines: Vec<usize> = failures.iter().map(|f| f.line_no).collect();
    assert_eq!(lines, vec![2, 3]);
    assert_eq!(
        failures.0[1].source,
        AsmError::DuplicateName("a".to_owned())
    );
}

#[test]
fn test_branch_across_pseudo_instructions() -> Result<()> {
    let program = "
top:    blt $t0, $t1, end
        li $t2, 0x10000
        beq $zero, $zero, top
end:    jr $ra
";
    let assembly = assemble_program(program, &Options::default())?;

    // blt is two words, li of 0x10000 is two
    assert_eq!(assembly.labels.lookup("end")?, 20);
    assert_eq!(assembly.words[1], 0x1420_0003);
    assert_eq!(assembly.words[4], 0x1000_fffb);
    Ok(())
}
