//! Error Types
//!
//! This module defines the error types used by the scene registry.
//!
//! # Overview
//!
//! The registry validates exactly one thing: id uniqueness. Every other
//! malformed or missing configuration value is replaced by its default
//! rather than rejected, and out-of-range numbers are passed through to the
//! renderer untouched.
//!
//! # Usage
//!
//! Fallible registry APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, SceneError>`.
//!
//! ```rust,ignore
//! use lumen::errors::{Result, SceneError};
//!
//! fn spawn(scene: &mut Scene) -> Result<()> {
//!     scene.create_light(None, AmbientLightConfig::default())?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The error type for scene registry operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// An explicit component id is already held by a live component in the
    /// same scene. The existing registration is left untouched.
    #[error("Duplicate component id: '{0}' is already registered in this scene")]
    DuplicateId(String),
}

/// Alias for `Result<T, SceneError>`.
pub type Result<T> = std::result::Result<T, SceneError>;
