//! The typed compile pipeline.
//!
//! Stages transform one accumulating [`PipelineState`]; the runner
//! executes them in order and short-circuits on the first error. Swallow-
//! and-log behavior exists only at the `compile` boundary, never here.

pub mod stage;
pub mod stages;

pub use stage::{run_stages, Stage};
pub use stages::{
    CleanCssStage, ConcatenateCssStage, ExtractStage, PruneSelectorsStage, RewriteImportsStage,
};
