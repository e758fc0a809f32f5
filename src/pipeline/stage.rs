//! Stage trait and the sequential runner.

use crate::core::PipelineState;
use crate::errors::CompileError;

/// One step of the compile pipeline.
///
/// A stage consumes the accumulated state and returns it extended. Stages
/// must read their inputs through the state's accessors, which fail with
/// [`CompileError::MissingStageInput`] if the pipeline was assembled out
/// of order.
pub trait Stage {
    /// Stage name for progress logging.
    fn name(&self) -> &'static str;

    fn run(&self, state: PipelineState) -> Result<PipelineState, CompileError>;
}

/// Execute stages in order, short-circuiting on the first error.
pub fn run_stages(
    stages: &[Box<dyn Stage>],
    mut state: PipelineState,
) -> Result<PipelineState, CompileError> {
    for stage in stages {
        log::debug!("stage: {}", stage.name());
        state = stage.run(state)?;
    }
    Ok(state)
}
