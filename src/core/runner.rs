use std::io::Write;
use tracing::{debug, info};

use crate::core::dispatch::{Dispatcher, Executor};
use crate::core::enumerate::Enumerator;
use crate::core::lister::FileLister;
use crate::core::materialize::materialize;
use crate::error::Result;
use crate::models::{JobFamilyConfig, Summary, SwifCommand};

/// Expands a job family and hands each job to the dispatcher
pub struct Runner<'a, L: FileLister, E: Executor, W: Write> {
    config: &'a JobFamilyConfig,
    lister: &'a L,
    dispatcher: Dispatcher<E, W>,
}

impl<'a, L: FileLister, E: Executor, W: Write> Runner<'a, L, E, W> {
    pub fn new(config: &'a JobFamilyConfig, lister: &'a L, dispatcher: Dispatcher<E, W>) -> Self {
        Self {
            config,
            lister,
            dispatcher,
        }
    }

    /// Enumerate, materialize and dispatch every job, in order.
    /// Stops at the first failing invocation.
    pub fn run(&mut self) -> Result<Summary> {
        let mut enumerator = Enumerator::new(self.config, self.lister);
        let mut jobs_created = 0;

        for candidate in enumerator.by_ref() {
            let candidate = candidate?;
            debug!("Job {} for run {}", candidate.job_id, candidate.run_token);
            let invocation = materialize(self.config, &candidate);
            self.dispatcher.dispatch(&invocation)?;
            jobs_created += 1;
        }

        let stats = enumerator.stats();
        let summary = Summary {
            files_found: stats.files_found,
            units_found: stats.units_found,
            jobs_created,
        };
        info!(
            "Enumeration finished: {} files, {} runs/directories, {} jobs",
            summary.files_found, summary.units_found, summary.jobs_created
        );
        Ok(summary)
    }

    /// Start the workflow if requested, there is work, and this is not a dry run.
    /// Returns whether a start was issued.
    pub fn start_workflow(&mut self, summary: &Summary) -> Result<bool> {
        let options = self.dispatcher.options();
        if !options.start || options.dry_run || !summary.has_work() {
            return Ok(false);
        }
        self.dispatcher
            .dispatch_command(&SwifCommand::run(self.config.workflow.as_str()))?;
        Ok(true)
    }

    pub fn into_dispatcher(self) -> Dispatcher<E, W> {
        self.dispatcher
    }
}
