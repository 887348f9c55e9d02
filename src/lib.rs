pub mod chunking;
pub mod cli;
pub mod config;
pub mod llm;
pub mod outlet;
pub mod pipeline;
pub mod workflow;

// Re-export commonly used types
pub use config::Config;
pub use pipeline::{
    GenerationClient, GenerationError, PipelineState, RunReport, RunStatus, StageTransition,
    StreamOptions, spawn_run,
};
pub use workflow::launch;
