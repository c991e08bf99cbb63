pub mod common;
pub mod fee;
pub mod sequence;

pub use common::{Amounted, Identifiable, NamedEntity};
pub use fee::{FeeComponent, FeesStructure, Instalment};
pub use sequence::{IssuedNumber, NumberRegistry, SequenceStats};
