use libmips::op::{
    BranchOp, ImmediateOp, JumpOp, JumpRegOp, MemoryOp, MoveFromOp, MulDivOp, RegOp, ShiftOp,
};

/// Encoding format of a real instruction and the constant that selects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    RegReg(RegOp),
    Shift(ShiftOp),
    JumpReg(JumpRegOp),
    MulDiv(MulDivOp),
    MoveFrom(MoveFromOp),
    Immediate(ImmediateOp),
    Memory(MemoryOp),
    Branch(BranchOp),
    Jump(JumpOp),
}

impl Directive {
    pub fn from_mnemonic(s: &str) -> Option<Self> {
        match s {
            "addu" => Some(Self::RegReg(RegOp::ADDU)),
            "subu" => Some(Self::RegReg(RegOp::SUBU)),
            "and" => Some(Self::RegReg(RegOp::AND)),
            "or" => Some(Self::RegReg(RegOp::OR)),
            "xor" => Some(Self::RegReg(RegOp::XOR)),
            "nor" => Some(Self::RegReg(RegOp::NOR)),
            "slt" => Some(Self::RegReg(RegOp::SLT)),
            "sltu" => Some(Self::RegReg(RegOp::SLTU)),

            "sll" => Some(Self::Shift(ShiftOp::SLL)),
            "srl" => Some(Self::Shift(ShiftOp::SRL)),
            "sra" => Some(Self::Shift(ShiftOp::SRA)),

            "jr" => Some(Self::JumpReg(JumpRegOp::JR)),

            "mult" => Some(Self::MulDiv(MulDivOp::MULT)),
            "div" => Some(Self::MulDiv(MulDivOp::DIV)),

            "mfhi" => Some(Self::MoveFrom(MoveFromOp::MFHI)),
            "mflo" => Some(Self::MoveFrom(MoveFromOp::MFLO)),

            "addiu" => Some(Self::Immediate(ImmediateOp::ADDIU)),
            "ori" => Some(Self::Immediate(ImmediateOp::ORI)),
            "lui" => Some(Self::Immediate(ImmediateOp::LUI)),

            "lb" => Some(Self::Memory(MemoryOp::LB)),
            "lbu" => Some(Self::Memory(MemoryOp::LBU)),
            "lw" => Some(Self::Memory(MemoryOp::LW)),
            "sb" => Some(Self::Memory(MemoryOp::SB)),
            "sw" => Some(Self::Memory(MemoryOp::SW)),

            "beq" => Some(Self::Branch(BranchOp::BEQ)),
            "bne" => Some(Self::Branch(BranchOp::BNE)),

            "j" => Some(Self::Jump(JumpOp::J)),
            "jal" => Some(Self::Jump(JumpOp::JAL)),

            _ => None,
        }
    }

    /// Operand count the format takes.
    pub fn arity(&self) -> usize {
        match self {
            Directive::RegReg(_) | Directive::Shift(_) => 3,
            Directive::JumpReg(_) | Directive::MoveFrom(_) | Directive::Jump(_) => 1,
            Directive::MulDiv(_) => 2,
            Directive::Immediate(ImmediateOp::LUI) => 2,
            Directive::Immediate(_) | Directive::Memory(_) | Directive::Branch(_) => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pseudo_mnemonics_are_not_real() {
        for pseudo in ["li", "move", "blt", "bgt", "traddu", "swpr", "mul", "rem"] {
            assert_eq!(Directive::from_mnemonic(pseudo), None);
        }
    }

    #[test]
    fn lookups_are_case_sensitive() {
        assert_eq!(
            Directive::from_mnemonic("sw"),
            Some(Directive::Memory(MemoryOp::SW))
        );
        assert_eq!(Directive::from_mnemonic("SW"), None);
    }
}
