//! `mfs-core`: shared primitives for the MFS gateway.
//!
//! This crate contains **pure** values (no HTTP, no crypto, no I/O).

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{ValidationError, ValidationResult};
pub use id::{ResourceId, SubjectId};
pub use value_object::{Amount, PhoneNumber, Pin, required_text};
