pub mod fee_service;
pub mod sequence_service;

pub use fee_service::{InstalmentReconciler, Reconciliation};
pub use sequence_service::{SequenceAllocator, MAX_BATCH};

#[cfg(test)]
mod tests;
