// Every instruction is one 32 bit word. Field positions, MSB first:
//
// R: | opcode:6 | rs:5 | rt:5 | rd:5 | shamt:5 | funct:6 |
// I: | opcode:6 | rs:5 | rt:5 |        immediate:16      |
// J: | opcode:6 |               target:26                |

pub const OPCODE_SHIFT: u32 = 26;
pub const RS_SHIFT: u32 = 21;
pub const RT_SHIFT: u32 = 16;
pub const RD_SHIFT: u32 = 11;
pub const SHAMT_SHIFT: u32 = 6;

pub const REG_MASK: u32 = 0x1F;
pub const FUNCT_MASK: u32 = 0x3F;
pub const IMM_MASK: u32 = 0xFFFF;
pub const TARGET_MASK: u32 = 0x03FF_FFFF;

pub fn r_word(rs: u32, rt: u32, rd: u32, shamt: u32, funct: u32) -> u32 {
    ((rs & REG_MASK) << RS_SHIFT)
        | ((rt & REG_MASK) << RT_SHIFT)
        | ((rd & REG_MASK) << RD_SHIFT)
        | ((shamt & REG_MASK) << SHAMT_SHIFT)
        | (funct & FUNCT_MASK)
}

pub fn i_word(opcode: u32, rs: u32, rt: u32, imm: u16) -> u32 {
    ((opcode & FUNCT_MASK) << OPCODE_SHIFT)
        | ((rs & REG_MASK) << RS_SHIFT)
        | ((rt & REG_MASK) << RT_SHIFT)
        | imm as u32
}

pub fn j_word(opcode: u32, target: u32) -> u32 {
    ((opcode & FUNCT_MASK) << OPCODE_SHIFT) | (target & TARGET_MASK)
}

/// Raw field view of a word, without interpreting the opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields {
    pub opcode: u32,
    pub rs: u32,
    pub rt: u32,
    pub rd: u32,
    pub shamt: u32,
    pub funct: u32,
    pub imm: u16,
    pub target: u32,
}

impl Fields {
    pub fn from_word(word: u32) -> Self {
        Self {
            opcode: word >> OPCODE_SHIFT,
            rs: (word >> RS_SHIFT) & REG_MASK,
            rt: (word >> RT_SHIFT) & REG_MASK,
            rd: (word >> RD_SHIFT) & REG_MASK,
            shamt: (word >> SHAMT_SHIFT) & REG_MASK,
            funct: word & FUNCT_MASK,
            imm: (word & IMM_MASK) as u16,
            target: word & TARGET_MASK,
        }
    }

    pub fn signed_imm(&self) -> i16 {
        self.imm as i16
    }
}
