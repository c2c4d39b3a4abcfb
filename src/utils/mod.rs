//! Utility functions shared across the application.
//!
//! - [`alias`] - Alias generation and validation
//! - [`hasher`] - Deterministic password hashing

pub mod alias;
pub mod hasher;
