// assessa-core/src/lib.rs

#![allow(missing_docs)]
// Memory safety
#![deny(unsafe_code)]
// Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Ports: what the core expects from the document database and the domain registry.
pub mod ports;

// 2. Domain: criteria model, weight resolver, step validation, wizard state machine.
// Pure, no I/O.
pub mod domain;

// 3. Infrastructure: store adapters, atomic file writes, settings.
pub mod infrastructure;

// 4. Application: persistence gateway and the configuration controller.
pub mod application;

pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use application::{CriteriaController, CriteriaGateway};
pub use error::AssessaError;
