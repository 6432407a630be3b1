use num::FromPrimitive;
use num_derive::FromPrimitive;
use strum_macros::{Display, EnumIter, EnumString};

/// General purpose registers. Each register parses from its numeric form
/// (`$8`) and its conventional name (`$t0`); it displays as the latter.
#[derive(FromPrimitive, EnumString, Display, EnumIter, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    #[strum(to_string = "$zero", serialize = "$0")]
    Zero = 0,
    #[strum(to_string = "$at", serialize = "$1")]
    At = 1,
    #[strum(to_string = "$v0", serialize = "$2")]
    V0 = 2,
    #[strum(to_string = "$v1", serialize = "$3")]
    V1 = 3,
    #[strum(to_string = "$a0", serialize = "$4")]
    A0 = 4,
    #[strum(to_string = "$a1", serialize = "$5")]
    A1 = 5,
    #[strum(to_string = "$a2", serialize = "$6")]
    A2 = 6,
    #[strum(to_string = "$a3", serialize = "$7")]
    A3 = 7,
    #[strum(to_string = "$t0", serialize = "$8")]
    T0 = 8,
    #[strum(to_string = "$t1", serialize = "$9")]
    T1 = 9,
    #[strum(to_string = "$t2", serialize = "$10")]
    T2 = 10,
    #[strum(to_string = "$t3", serialize = "$11")]
    T3 = 11,
    #[strum(to_string = "$t4", serialize = "$12")]
    T4 = 12,
    #[strum(to_string = "$t5", serialize = "$13")]
    T5 = 13,
    #[strum(to_string = "$t6", serialize = "$14")]
    T6 = 14,
    #[strum(to_string = "$t7", serialize = "$15")]
    T7 = 15,
    #[strum(to_string = "$s0", serialize = "$16")]
    S0 = 16,
    #[strum(to_string = "$s1", serialize = "$17")]
    S1 = 17,
    #[strum(to_string = "$s2", serialize = "$18")]
    S2 = 18,
    #[strum(to_string = "$s3", serialize = "$19")]
    S3 = 19,
    #[strum(to_string = "$s4", serialize = "$20")]
    S4 = 20,
    #[strum(to_string = "$s5", serialize = "$21")]
    S5 = 21,
    #[strum(to_string = "$s6", serialize = "$22")]
    S6 = 22,
    #[strum(to_string = "$s7", serialize = "$23")]
    S7 = 23,
    #[strum(to_string = "$t8", serialize = "$24")]
    T8 = 24,
    #[strum(to_string = "$t9", serialize = "$25")]
    T9 = 25,
    #[strum(to_string = "$k0", serialize = "$26")]
    K0 = 26,
    #[strum(to_string = "$k1", serialize = "$27")]
    K1 = 27,
    #[strum(to_string = "$gp", serialize = "$28")]
    Gp = 28,
    #[strum(to_string = "$sp", serialize = "$29")]
    Sp = 29,
    #[strum(to_string = "$fp", serialize = "$30")]
    Fp = 30,
    #[strum(to_string = "$ra", serialize = "$31")]
    Ra = 31,
}

impl Register {
    /// Register held in a 5 bit field; the upper bits are ignored.
    pub fn from_field(field: u32) -> Register {
        FromPrimitive::from_u32(field & 0x1F).unwrap_or(Register::Zero)
    }

    pub fn number(self) -> u32 {
        self as u32
    }
}
