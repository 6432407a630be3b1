use mipsasm::{assemble_program, expand_program, write_expanded, Options};

#[test]
fn test_sum_listing() {
    let program_text = include_str!("../programs/sum.s");
    let assembled = assemble_program(program_text, &Options::default()).unwrap();

    insta::assert_snapshot!(assembled.to_string(), @r###"
    .text
    2404000a
    00001021
    00441021
    2484ffff
    0004082a
    1420fffc
    03e00008
    .symbol
    0	main
    8	loop
    .relocation
    "###);
}

#[test]
fn test_call_listing() {
    let program_text = include_str!("../programs/call.s");
    let assembled = assemble_program(program_text, &Options::default()).unwrap();

    insta::assert_snapshot!(assembled.to_string(), @r###"
    .text
    27bdfff8
    afbf0004
    3c041234
    34845678
    0c000000
    0085001a
    00001010
    8fbf0004
    27bd0008
    08000000
    .symbol
    0	main
    .relocation
    16	printf
    36	exit
    "###);
}

#[test]
fn test_call_expanded() {
    let program_text = include_str!("../programs/call.s");
    let pass = expand_program(program_text, &Options::default()).unwrap();
    let instructions: Vec<_> = pass
        .instructions
        .into_iter()
        .map(|e| e.instruction)
        .collect();

    let mut out = Vec::new();
    write_expanded(&mut out, &instructions).unwrap();

    insta::assert_snapshot!(String::from_utf8(out).unwrap(), @r###"
    addiu $sp $sp -8
    sw $ra 4 $sp
    lui $a0 4660
    ori $a0 $a0 22136
    jal printf
    div $a0 $a1
    mfhi $v0
    lw $ra 4 $sp
    addiu $sp $sp 8
    j exit
    "###);
}
