use super::job::JobInvocation;

/// Workflow-level `swif` subcommands issued by sw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwifCommand {
    /// Create an empty workflow
    Create { workflow: String },
    /// Retry jobs that hit the given problem types
    Retry {
        workflow: String,
        problems: Vec<String>,
    },
    /// Cancel a workflow, optionally deleting it
    Cancel { workflow: String, delete: bool },
    /// Pause a workflow, optionally killing running jobs
    Pause { workflow: String, now: bool },
    /// Start or resume a workflow
    Run {
        workflow: String,
        job_limit: Option<u32>,
        phase_limit: Option<u32>,
        error_limit: Option<u32>,
    },
}

impl SwifCommand {
    /// Start a workflow with no limits
    pub fn run(workflow: impl Into<String>) -> Self {
        SwifCommand::Run {
            workflow: workflow.into(),
            job_limit: None,
            phase_limit: None,
            error_limit: None,
        }
    }

    pub fn workflow(&self) -> &str {
        match self {
            SwifCommand::Create { workflow }
            | SwifCommand::Retry { workflow, .. }
            | SwifCommand::Cancel { workflow, .. }
            | SwifCommand::Pause { workflow, .. }
            | SwifCommand::Run { workflow, .. } => workflow,
        }
    }

    /// Arguments passed to `swif`, subcommand first
    pub fn args(&self) -> Vec<String> {
        let subcommand = match self {
            SwifCommand::Create { .. } => "create",
            SwifCommand::Retry { .. } => "retry-jobs",
            SwifCommand::Cancel { .. } => "cancel",
            SwifCommand::Pause { .. } => "pause",
            SwifCommand::Run { .. } => "run",
        };
        let mut args = vec![
            subcommand.to_string(),
            "-workflow".to_string(),
            self.workflow().to_string(),
        ];

        match self {
            SwifCommand::Create { .. } => {}
            SwifCommand::Retry { problems, .. } => {
                args.push("-problems".to_string());
                args.extend(problems.iter().cloned());
            }
            SwifCommand::Cancel { delete, .. } => {
                if *delete {
                    args.push("-delete".to_string());
                }
            }
            SwifCommand::Pause { now, .. } => {
                if *now {
                    args.push("-now".to_string());
                }
            }
            SwifCommand::Run {
                job_limit,
                phase_limit,
                error_limit,
                ..
            } => {
                let limits = [
                    ("-joblimit", job_limit),
                    ("-phaselimit", phase_limit),
                    ("-errorlimit", error_limit),
                ];
                for (flag, value) in limits {
                    if let Some(v) = value {
                        args.push(flag.to_string());
                        args.push(v.to_string());
                    }
                }
            }
        }

        args
    }

    pub fn invocation(&self) -> JobInvocation {
        JobInvocation::new(self.args())
    }
}
