//! The collaborator seam of the pipeline.

use crate::error::Result;

/// A whole-buffer text transform run by [`AccentPipeline`](super::AccentPipeline).
///
/// A stage receives its complete input and returns its complete output.
/// Implementations must not keep state between calls, so one instance can
/// serve concurrent requests.
pub trait Stage: Send + Sync {
    /// Transform `input`.
    fn run(&self, input: &str) -> Result<String>;

    /// Get the name of this stage.
    fn name(&self) -> &'static str;
}

/// Returns its input unchanged.
///
/// Stands in for the segmenter and for the label transforms around the
/// tagger when none is configured.
#[derive(Clone, Debug, Default)]
pub struct PassthroughStage;

impl PassthroughStage {
    pub fn new() -> Self {
        PassthroughStage
    }
}

impl Stage for PassthroughStage {
    fn run(&self, input: &str) -> Result<String> {
        Ok(input.to_string())
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }
}
