use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod commands;
mod core;
mod error;
mod models;

use commands::{add_jobs, run_swif, show_version, split_problems, AddOptions};
use models::SwifCommand;

/// sw - a tool for managing Swif workflows
#[derive(Parser)]
#[command(name = "sw")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add jobs to a Swif workflow (created if it does not exist)
    #[command(after_help = "job tracks: debug, analysis, reconstruction, one_pass, simulation\n\n\
                            Usage example:\n  sw add ana -c config.json")]
    Add {
        /// Workflow name, overrides the one in the config
        workflow: Option<String>,

        /// JSON, YAML or TOML config file
        #[arg(short, long, default_value = "config.json")]
        config: PathBuf,

        /// Print job commands and exit
        #[arg(short, long)]
        dry_run: bool,

        /// Start the workflow after adding jobs
        #[arg(short = 's', long = "start", alias = "submit")]
        start: bool,
    },

    /// Create an empty workflow
    Create {
        workflow: String,
    },

    /// Cancel a workflow (use "sw rm" to delete it)
    Cancel {
        workflow: String,
    },

    /// Cancel and delete a workflow
    Rm {
        workflow: String,
    },

    /// Retry problem jobs of a workflow
    #[command(after_help = "Examples:\n  sw retry ana -p \"SWIF-SYSTEM-ERROR AUGER-TIMEOUT\"\n  sw retry ana -p SWIF-SYSTEM-ERROR")]
    Retry {
        workflow: String,

        /// Problem types (enclose multiple problems in quotes)
        #[arg(short, long, required = true, num_args = 1..)]
        problems: Vec<String>,
    },

    /// Start or resume a workflow
    Start {
        workflow: String,

        /// Maximum number of concurrently dispatched jobs
        #[arg(short = 'j', long)]
        joblimit: Option<u32>,

        /// Run only up to this phase
        #[arg(short = 'p', long)]
        phaselimit: Option<u32>,

        /// Pause the workflow after this many errors
        #[arg(short = 'e', long)]
        errorlimit: Option<u32>,
    },

    /// Stop (pause) a workflow
    Stop {
        workflow: String,

        /// Also cancel jobs that are already running
        #[arg(short, long)]
        now: bool,
    },

    /// Show the sw version number
    Version,
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so dry-run listings stay clean
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Add {
            workflow,
            config,
            dry_run,
            start,
        } => {
            let work_dir = match std::env::current_dir() {
                Ok(dir) => dir,
                Err(e) => {
                    eprintln!("Error: cannot determine working directory: {}", e);
                    std::process::exit(1);
                }
            };
            let options = AddOptions {
                workflow,
                config,
                dry_run,
                start,
            };
            add_jobs(&work_dir, options).map(|_| ())
        }

        Commands::Create { workflow } => run_swif(SwifCommand::Create { workflow }),

        Commands::Cancel { workflow } => run_swif(SwifCommand::Cancel {
            workflow,
            delete: false,
        }),

        Commands::Rm { workflow } => run_swif(SwifCommand::Cancel {
            workflow,
            delete: true,
        }),

        Commands::Retry { workflow, problems } => {
            let problems = split_problems(&problems);
            if problems.is_empty() {
                Cli::command()
                    .error(
                        clap::error::ErrorKind::InvalidValue,
                        "at least one problem type is required",
                    )
                    .exit();
            }
            run_swif(SwifCommand::Retry { workflow, problems })
        }

        Commands::Start {
            workflow,
            joblimit,
            phaselimit,
            errorlimit,
        } => run_swif(SwifCommand::Run {
            workflow,
            job_limit: joblimit,
            phase_limit: phaselimit,
            error_limit: errorlimit,
        }),

        Commands::Stop { workflow, now } => run_swif(SwifCommand::Pause { workflow, now }),

        Commands::Version => {
            show_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
