use std::io::Write;
use std::process::Command;
use tracing::{debug, info};

use crate::error::{Result, SwError};
use crate::models::{JobInvocation, SwifCommand, SWIF_BIN};

/// Runs an external program to completion
pub trait Executor {
    fn execute(&mut self, program: &str, args: &[String]) -> Result<()>;
}

/// Spawns the program with inherited stdio and waits for it
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl Executor for ProcessExecutor {
    fn execute(&mut self, program: &str, args: &[String]) -> Result<()> {
        debug!("Running {} with {} arguments", program, args.len());

        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|e| SwError::Spawn {
                program: program.to_string(),
                source: e,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(SwError::Subprocess {
                command: format!("{} {}", program, args.join(" ")),
                code: status.code(),
            })
        }
    }
}

/// Options for one `add` run, built from the CLI flags
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchOptions {
    /// Print invocations instead of executing them
    pub dry_run: bool,
    /// Start the workflow after its jobs were added
    pub start: bool,
}

/// Prints or executes `swif` invocations
pub struct Dispatcher<E: Executor, W: Write> {
    executor: E,
    out: W,
    options: DispatchOptions,
}

impl<E: Executor, W: Write> Dispatcher<E, W> {
    pub fn new(executor: E, out: W, options: DispatchOptions) -> Self {
        Self {
            executor,
            out,
            options,
        }
    }

    pub fn options(&self) -> DispatchOptions {
        self.options
    }

    /// Emit one invocation. In a dry run it is written out followed by a blank line.
    pub fn dispatch(&mut self, invocation: &JobInvocation) -> Result<()> {
        if self.options.dry_run {
            writeln!(self.out, "{}\n", invocation.render())?;
            return Ok(());
        }
        self.executor.execute(SWIF_BIN, &invocation.args)
    }

    /// Execute a workflow-level command, honouring dry run
    pub fn dispatch_command(&mut self, command: &SwifCommand) -> Result<()> {
        info!("swif {} ...", command.args().join(" "));
        self.dispatch(&command.invocation())
    }

    pub fn into_parts(self) -> (E, W) {
        (self.executor, self.out)
    }
}
