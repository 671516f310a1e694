// assessa-core/src/ports/mod.rs

pub mod document_store;
pub mod domain_source;

pub use document_store::DocumentStore;
pub use domain_source::DomainSource;
