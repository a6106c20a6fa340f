//! Modkit Build - asynchronous engine packaging projects into mod archives
//!
//! A `BuildManager` creates jobs and dispatches each onto its own thread.
//! The `BuildPipeline` runs four stages in order (collect sources,
//! convert textures, package audio, write the descriptor), maps their
//! sub-progress onto equal spans of the overall `[0, 1]` range, and zips
//! the working directory into the artifact. Job state is observable only
//! through registry snapshots; the registry is in-memory and does not
//! survive the process.

pub mod archive;
pub mod config;
pub mod converter;
pub mod job;
pub mod manager;
pub mod pipeline;
pub mod publish;
pub mod registry;
pub mod stages;

pub use config::ModkitConfig;
pub use converter::{Converter, SystemConverter, TextureConverter};
pub use job::{BuildJob, JobStatus};
pub use manager::BuildManager;
pub use pipeline::BuildPipeline;
pub use publish::{publish_artifact, DEFAULT_VISIBILITY};
pub use registry::JobRegistry;
pub use stages::BuildStage;
