use uuid::Uuid;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Exposes a payable amount in whole currency units.
pub trait Amounted {
    fn base_amount(&self) -> i64;
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;
pub use uuid;
