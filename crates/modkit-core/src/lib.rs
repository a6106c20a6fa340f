//! Modkit Core - Foundational types for the modkit packaging toolkit
//!
//! This crate provides the types every other modkit crate depends on:
//! - `ModkitError` and the `Result` alias
//! - `Progress` - the narrow reporting interface threaded through the
//!   build pipeline, with `NoProgress` as the no-op collaborator

mod error;
mod progress;

pub use error::{ModkitError, Result};
pub use progress::{NoProgress, Progress};
