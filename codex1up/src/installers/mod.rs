//! Installer step pipeline.
//!
//! Steps run strictly in order against one [`InstallerContext`]:
//!
//! ```text
//! tools -> config -> notify hook -> sound -> global AGENTS.md -> vscode -> starter AGENTS.md
//! ```
//!
//! Each step is idempotent: running the pipeline twice leaves the same end
//! state as running it once. A step's [`ErrorPolicy`] decides what happens
//! when it fails: `FailFast` steps abort the run, `ContinueOnError` steps
//! are downgraded to a warning.

mod agents;
mod config;
mod notify;
mod sound;
mod tools;
mod vscode;

use tracing::{debug, info, warn};

use crate::context::InstallerContext;
use crate::error::InstallerResult;

pub use agents::{write_agents_file, GlobalAgentsStep, StarterAgentsStep};
pub use config::{render_config, ConfigStep};
pub use notify::NotifyHookStep;
pub use sound::{cleanup_legacy_rc_files, SoundStep, SOUND_VARIABLE};
pub use tools::{ToolsStep, SUMMARY_TOOLS};
pub use vscode::VscodeStep;

/// How a step failure affects the rest of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Abort the pipeline and surface the error.
    FailFast,
    /// Log a warning and carry on with the next step.
    ContinueOnError,
}

/// One idempotent installer action.
pub trait InstallStep {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Failure handling for this step. Defaults to `FailFast`.
    fn error_policy(&self) -> ErrorPolicy {
        ErrorPolicy::FailFast
    }

    /// Perform the step. Must consult `ctx.options.dry_run` before mutating.
    fn run(&self, ctx: &InstallerContext) -> InstallerResult<()>;
}

/// What happened to each step.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub completed: Vec<&'static str>,
    /// Best-effort steps that failed, with the error message.
    pub degraded: Vec<(&'static str, String)>,
}

/// Ordered list of steps.
pub struct Pipeline {
    steps: Vec<Box<dyn InstallStep>>,
}

impl Pipeline {
    pub fn new(steps: Vec<Box<dyn InstallStep>>) -> Self {
        Self { steps }
    }

    /// The full install sequence.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(ToolsStep),
            Box::new(ConfigStep),
            Box::new(NotifyHookStep),
            Box::new(SoundStep),
            Box::new(GlobalAgentsStep),
            Box::new(VscodeStep),
            Box::new(StarterAgentsStep),
        ])
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run every step in order.
    pub fn run(&self, ctx: &InstallerContext) -> InstallerResult<PipelineReport> {
        let mut report = PipelineReport::default();

        for step in &self.steps {
            debug!(step = step.name(), "Running installer step");
            match step.run(ctx) {
                Ok(()) => report.completed.push(step.name()),
                Err(e) => match step.error_policy() {
                    ErrorPolicy::ContinueOnError => {
                        warn!(step = step.name(), error = %e, "Best-effort step failed");
                        ctx.logger
                            .warn(format_args!("{} step failed: {}", step.name(), e));
                        report.degraded.push((step.name(), e.to_string()));
                    }
                    ErrorPolicy::FailFast => return Err(e),
                },
            }
        }

        info!(
            completed = report.completed.len(),
            degraded = report.degraded.len(),
            "Installer pipeline finished"
        );
        Ok(report)
    }
}

/// Run the standard pipeline.
pub fn run_installer(ctx: &InstallerContext) -> InstallerResult<PipelineReport> {
    Pipeline::standard().run(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Environment;
    use crate::error::InstallerError;
    use crate::log::MemoryLogger;
    use crate::options::InstallerOptions;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    struct Probe {
        name: &'static str,
        policy: ErrorPolicy,
        fail: bool,
        trace: Rc<RefCell<Vec<&'static str>>>,
    }

    impl InstallStep for Probe {
        fn name(&self) -> &'static str {
            self.name
        }

        fn error_policy(&self) -> ErrorPolicy {
            self.policy
        }

        fn run(&self, _ctx: &InstallerContext) -> InstallerResult<()> {
            self.trace.borrow_mut().push(self.name);
            if self.fail {
                Err(InstallerError::Prompt(format!("{} broke", self.name)))
            } else {
                Ok(())
            }
        }
    }

    fn probe(
        name: &'static str,
        policy: ErrorPolicy,
        fail: bool,
        trace: &Rc<RefCell<Vec<&'static str>>>,
    ) -> Box<dyn InstallStep> {
        Box::new(Probe {
            name,
            policy,
            fail,
            trace: trace.clone(),
        })
    }

    fn context(logger: Arc<MemoryLogger>) -> InstallerContext {
        Environment::new("/home/test", "/opt/codex-1up")
            .with_logger(logger)
            .into_context(InstallerOptions::default())
    }

    #[test]
    fn test_standard_order() {
        assert_eq!(
            Pipeline::standard().step_names(),
            vec!["tools", "config", "notify-hook", "sound", "global-agents", "vscode", "agents"]
        );
    }

    #[test]
    fn test_best_effort_failure_continues() {
        let trace = Rc::new(RefCell::new(Vec::new()));
        let logger = Arc::new(MemoryLogger::new());
        let pipeline = Pipeline::new(vec![
            probe("a", ErrorPolicy::ContinueOnError, true, &trace),
            probe("b", ErrorPolicy::FailFast, false, &trace),
        ]);

        let report = pipeline.run(&context(logger.clone())).unwrap();
        assert_eq!(*trace.borrow(), vec!["a", "b"]);
        assert_eq!(report.completed, vec!["b"]);
        assert_eq!(report.degraded.len(), 1);
        assert!(logger.contains("a step failed"));
    }

    #[test]
    fn test_required_failure_aborts() {
        let trace = Rc::new(RefCell::new(Vec::new()));
        let pipeline = Pipeline::new(vec![
            probe("a", ErrorPolicy::FailFast, true, &trace),
            probe("b", ErrorPolicy::FailFast, false, &trace),
        ]);

        let result = pipeline.run(&context(Arc::new(MemoryLogger::new())));
        assert!(result.is_err());
        assert_eq!(*trace.borrow(), vec!["a"]);
    }
}
