use std::fmt;

/// Name of the external workflow tool
pub const SWIF_BIN: &str = "swif";

/// One unit of work found by the enumerator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateJob {
    /// Zero-padded run/directory number
    pub run_token: String,
    pub job_id: String,
    /// Full path of the input file (per-file mode) or the resolved input
    /// directory (per-run mode). `None` when no input directory is configured.
    pub input: Option<String>,
    /// Every admitted filename of the run, per-run mode only
    pub files: Vec<String>,
}

/// Fully resolved argument list for one `swif` call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobInvocation {
    pub args: Vec<String>,
}

impl JobInvocation {
    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }

    /// Command line as it would be typed in a shell, without quoting
    pub fn render(&self) -> String {
        let mut line = SWIF_BIN.to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl fmt::Display for JobInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Counters reported after an `add` run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Admitted input files, in either mode
    pub files_found: usize,
    /// Runs/directories that produced at least one job
    pub units_found: usize,
    /// Invocations built (and executed, unless dry run)
    pub jobs_created: usize,
}

impl Summary {
    pub fn has_work(&self) -> bool {
        self.units_found > 0
    }

    /// Average number of jobs per run/directory, zero when nothing was found
    pub fn jobs_per_unit(&self) -> f64 {
        if self.units_found == 0 {
            return 0.0;
        }
        self.jobs_created as f64 / self.units_found as f64
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} input files were found.", self.files_found)?;
        writeln!(
            f,
            "{} runs/directories with input were found.",
            self.units_found
        )?;
        writeln!(f, "{} jobs created.", self.jobs_created)?;
        write!(
            f,
            "Average of {:.2} jobs/run to submit.",
            self.jobs_per_unit()
        )
    }
}
