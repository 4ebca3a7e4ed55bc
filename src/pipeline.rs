//! Ordered execution of stages over a single mail item.
//!
//! A [`Pipeline`] owns a sequence of [`Stage`]s and threads one [`MailItem`]
//! through them per [`run`](Pipeline::run):
//!
//! - Each stage's output becomes the next stage's input
//! - The first [`StageError`] stops the run and is returned as-is
//! - Nothing is compensated: side effects of stages that already ran stand
//!
//! Stage order is the caller's choice and it matters. A thief placed before
//! an inspector turns contraband into stolen goods, while the reverse order
//! lets the inspector see the original contents.
//!
//! The pipeline keeps no state of its own and can be reused for any number of
//! runs. Stages keep whatever state they define across those runs.

use crate::{MailItem, Stage, StageError};

/// Ordered chain of stages.
///
/// Generic parameters:
/// - `HK`: Hook implementation for lifecycle events
pub struct Pipeline<HK = DefaultPipelineHook> {
    stages: Vec<Box<dyn Stage>>,
    hook: HK,
}

impl Pipeline<DefaultPipelineHook> {
    /// Create an empty pipeline with the default hook implementation.
    ///
    /// An empty pipeline returns every item unchanged.
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            hook: DefaultPipelineHook,
        }
    }

    /// Create a pipeline from an ordered sequence of boxed stages.
    pub fn from_stages(stages: impl IntoIterator<Item = Box<dyn Stage>>) -> Self {
        Self {
            stages: stages.into_iter().collect(),
            hook: DefaultPipelineHook,
        }
    }
}

impl Default for Pipeline<DefaultPipelineHook> {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Box<dyn Stage>> for Pipeline<DefaultPipelineHook> {
    fn from_iter<I: IntoIterator<Item = Box<dyn Stage>>>(iter: I) -> Self {
        Self::from_stages(iter)
    }
}

impl<HK> Pipeline<HK> {
    /// Append a stage to the end of the chain.
    pub fn stage<S: Stage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Replace the pipeline hook while keeping the stages unchanged.
    pub fn with_hook<HK2: PipelineHook>(self, hook: HK2) -> Pipeline<HK2> {
        Pipeline {
            stages: self.stages,
            hook,
        }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Names of the stages, in execution order.
    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|stage| stage.name())
    }
}

impl<HK: PipelineHook> Pipeline<HK> {
    /// Run `item` through every stage in order.
    ///
    /// Returns the output of the last stage, or the error of the first stage
    /// that failed. Stages after a failing one are not executed.
    #[tracing::instrument(skip_all, fields(from = item.from(), to = item.to()))]
    pub fn run(&self, item: MailItem) -> Result<MailItem, StageError> {
        self.hook.on_run_start(&item);

        let mut current = item;
        for (index, stage) in self.stages.iter().enumerate() {
            let span = tracing::debug_span!("stage", index, name = stage.name());
            let _entered = span.enter();

            self.hook.on_stage_start(index, stage.name(), &current);
            current = match stage.process(current) {
                Ok(next) => next,
                Err(error) => {
                    self.hook.on_stage_error(index, stage.name(), &error);
                    return Err(error);
                }
            };
        }

        self.hook.on_run_completed(&current);
        Ok(current)
    }
}

impl<HK> std::fmt::Debug for Pipeline<HK> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Hook trait for observing pipeline lifecycle events.
///
/// `on_run_start` fires once per [`Pipeline::run`], `on_stage_start` before
/// each stage sees the item, and exactly one of `on_stage_error` (naming the
/// first stage that failed) or `on_run_completed` closes the run. Callbacks
/// run inline on the caller's thread, between stages.
pub trait PipelineHook: Send + Sync {
    fn on_run_start(&self, item: &MailItem);
    fn on_stage_start(&self, index: usize, stage: &str, item: &MailItem);
    fn on_stage_error(&self, index: usize, stage: &str, error: &StageError);
    fn on_run_completed(&self, item: &MailItem);
}

/// Default pipeline hook implementation.
///
/// Logs lifecycle events using `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPipelineHook;

impl PipelineHook for DefaultPipelineHook {
    fn on_run_start(&self, _item: &MailItem) {
        tracing::debug!("Pipeline run starting");
    }

    fn on_stage_start(&self, _index: usize, _stage: &str, _item: &MailItem) {
        tracing::trace!("Stage processing item");
    }

    fn on_stage_error(&self, index: usize, stage: &str, error: &StageError) {
        tracing::error!(index, stage, kind = ?error.kind(), "Stage rejected item");
    }

    fn on_run_completed(&self, _item: &MailItem) {
        tracing::info!("Item passed every stage");
    }
}
