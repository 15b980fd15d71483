//! Core operations.
//!
//! This module contains the business logic for stubgen,
//! separated from CLI argument parsing and output rendering.

pub mod regenerate;

pub use regenerate::regenerate;
