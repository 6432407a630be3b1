pub use op::{EncodeError, Op};
pub use reg::Register;
pub use word::Fields;

pub mod op;
pub mod reg;
pub mod word;
