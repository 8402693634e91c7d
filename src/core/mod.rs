//! Core types shared across the workflow stages.
//!
//! Currently this is the error taxonomy ([`BagError`]) and the user-facing
//! error rendering ([`ErrorContext`], [`user_friendly_error`]).

pub mod error;

pub use error::{BagError, ErrorContext, user_friendly_error};

/// Convenience result type used throughout the crate.
pub type Result<T> = std::result::Result<T, BagError>;
