// assessa-core/src/application/mod.rs

pub mod controller;
pub mod gateway;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Le CLI peut faire `use assessa_core::application::{CriteriaController, SaveOutcome};`
// sans connaître la structure interne des fichiers.

pub use controller::{
    ControllerEvent, ControllerSnapshot, CriteriaController, DeleteOutcome, NextOutcome,
    OpenOutcome, SaveOutcome, Subscriber, SubscriptionId,
};
pub use gateway::{CRITERIA_COLLECTION, CriteriaGateway, DEFAULT_TIMEOUT};
