//! Error handling for the team-draft engine.

pub mod domain;

pub use domain::{DomainError, InfraErrorKind, NotFoundKind, ValidationKind};
