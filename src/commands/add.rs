use std::io;
use std::path::PathBuf;

use crate::core::{load_job_config, DispatchOptions, Dispatcher, LocalLister, ProcessExecutor, Runner};
use crate::error::SwError;
use crate::models::Summary;

/// Add options
pub struct AddOptions {
    /// Workflow name overriding the config document
    pub workflow: Option<String>,
    /// Config document, relative to the working directory
    pub config: PathBuf,
    /// Print job commands instead of adding them
    pub dry_run: bool,
    /// Start the workflow after adding jobs
    pub start: bool,
}

/// Add one Swif job per file, run or directory described by the config
pub fn add_jobs(work_dir: &PathBuf, options: AddOptions) -> Result<Summary, SwError> {
    let config = load_job_config(&work_dir.join(&options.config), options.workflow.as_deref())?;

    if options.dry_run {
        println!("Dry run: No jobs will be added to {} workflow.\n", config.workflow);
    } else {
        println!("Adding jobs to {} workflow ...", config.workflow);
    }

    let dispatch_options = DispatchOptions {
        dry_run: options.dry_run,
        start: options.start,
    };
    let dispatcher = Dispatcher::new(ProcessExecutor, io::stdout(), dispatch_options);
    let mut runner = Runner::new(&config, &LocalLister, dispatcher);

    let summary = runner.run()?;

    if !options.dry_run {
        println!("{} jobs added.", summary.jobs_created);
    }
    if !summary.has_work() {
        println!("No jobs to submit.");
        return Ok(summary);
    }
    println!("\n{}", summary);

    if runner.start_workflow(&summary)? {
        println!("Started {} workflow.", config.workflow);
    }

    Ok(summary)
}
