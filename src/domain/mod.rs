//! Core domain layer. No external I/O dependencies.
//!
//! Entities, the provider registry and error types live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod registry;

pub use entities::{
    DeadlineItem, FetchState, FieldKind, FieldSpec, ProviderDescriptor, ProviderEnvelope,
    ProviderLoad,
};
pub use errors::{DomainError, FetchError};
