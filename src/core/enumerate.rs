use std::collections::VecDeque;
use std::path::Path;
use tracing::debug;

use crate::core::lister::FileLister;
use crate::core::placeholder::{self, DIR_NO, RUN_NO};
use crate::error::Result;
use crate::models::{CandidateJob, JobFamilyConfig};

/// Counters gathered while walking the index space
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnumerationStats {
    pub files_found: usize,
    pub units_found: usize,
}

/// Walks run/directory numbers in ascending order and yields one
/// `CandidateJob` per admitted unit.
///
/// Candidates found in one directory listing are buffered together; index-only
/// file numbers are produced one at a time. The iterator stops after the
/// first error.
pub struct Enumerator<'a, L: FileLister> {
    config: &'a JobFamilyConfig,
    lister: &'a L,
    /// `None` once the run axis is exhausted
    next_run: Option<i64>,
    pending: VecDeque<CandidateJob>,
    file_cursor: Option<FileCursor>,
    /// Listing reused for every run when the directory has no run token
    shared_listing: Option<Option<Vec<String>>>,
    stats: EnumerationStats,
    failed: bool,
}

impl<'a, L: FileLister> Enumerator<'a, L> {
    pub fn new(config: &'a JobFamilyConfig, lister: &'a L) -> Self {
        Self {
            config,
            lister,
            next_run: Some(config.run_no_min),
            pending: VecDeque::new(),
            file_cursor: None,
            shared_listing: None,
            stats: EnumerationStats::default(),
            failed: false,
        }
    }

    pub fn stats(&self) -> EnumerationStats {
        self.stats
    }

    fn allowed(&self, run_token: &str) -> bool {
        match &self.config.allow_list {
            Some(list) => list.iter().any(|t| t == run_token),
            None => true,
        }
    }

    /// Queue the candidates of one run number
    fn visit(&mut self, run_no: i64) -> Result<()> {
        let run_token = self.config.run_token(run_no);
        if !self.allowed(&run_token) {
            debug!("Run {} is not in the allow-list, skipping", run_token);
            return Ok(());
        }

        if self.config.input_dir.is_empty() {
            self.visit_without_listing(run_token);
            return Ok(());
        }

        let dir = placeholder::substitute(
            &self.config.input_dir,
            &[(RUN_NO, run_token.as_str()), (DIR_NO, run_token.as_str())],
        );
        let admitted = self.admitted_files(&dir)?;
        if admitted.is_empty() {
            debug!("No input files for run {} in {}", run_token, dir);
            return Ok(());
        }

        self.stats.units_found += 1;
        self.stats.files_found += admitted.len();

        if self.config.job_per_run {
            self.pending.push_back(CandidateJob {
                job_id: run_token.clone(),
                run_token,
                input: Some(dir),
                files: admitted,
            });
        } else {
            for file in admitted {
                let job_id = file
                    .strip_prefix(self.config.input_file_prefix.as_str())
                    .unwrap_or(&file);
                let job_id = job_id
                    .strip_suffix(self.config.input_file_suffix.as_str())
                    .unwrap_or(job_id)
                    .to_string();
                self.pending.push_back(CandidateJob {
                    run_token: run_token.clone(),
                    job_id,
                    input: Some(format!("{}/{}", dir, file)),
                    files: Vec::new(),
                });
            }
        }

        Ok(())
    }

    /// Index-only jobs: no directory is consulted
    fn visit_without_listing(&mut self, run_token: String) {
        self.stats.units_found += 1;

        if self.config.job_per_run {
            self.pending.push_back(CandidateJob {
                job_id: run_token.clone(),
                run_token,
                input: None,
                files: Vec::new(),
            });
            return;
        }

        self.file_cursor = Some(FileCursor {
            run_token,
            next_file: Some(self.config.file_no_min),
        });
    }

    /// Next `<run>_<file>` job of the index-only file axis
    fn next_from_cursor(&mut self) -> Option<CandidateJob> {
        let cursor = self.file_cursor.as_mut()?;
        match cursor.next_file.filter(|n| *n <= self.config.file_no_max) {
            Some(file_no) => {
                cursor.next_file = file_no.checked_add(1);
                Some(CandidateJob {
                    job_id: format!("{}_{}", cursor.run_token, self.config.file_token(file_no)),
                    run_token: cursor.run_token.clone(),
                    input: None,
                    files: Vec::new(),
                })
            }
            None => {
                self.file_cursor = None;
                None
            }
        }
    }

    /// Files of `dir` that match prefix/suffix and fall inside the file window
    fn admitted_files(&mut self, dir: &str) -> Result<Vec<String>> {
        let listing = if placeholder::has_run_token(&self.config.input_dir) {
            self.lister.list_dir(Path::new(dir))?
        } else {
            if self.shared_listing.is_none() {
                self.shared_listing = Some(self.lister.list_dir(Path::new(dir))?);
            }
            self.shared_listing.clone().flatten()
        };

        let Some(names) = listing else {
            return Ok(Vec::new());
        };

        let prefix = self.config.input_file_prefix.as_str();
        let suffix = self.config.input_file_suffix.as_str();
        Ok(names
            .into_iter()
            .filter(|name| name.starts_with(prefix) && name.ends_with(suffix))
            .enumerate()
            .filter(|(position, _)| self.config.file_in_window(*position as i64))
            .map(|(_, name)| name)
            .collect())
    }
}

/// Position on the file axis of the run being expanded
struct FileCursor {
    run_token: String,
    next_file: Option<i64>,
}

impl<L: FileLister> Iterator for Enumerator<'_, L> {
    type Item = Result<CandidateJob>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(candidate) = self.pending.pop_front() {
                return Some(Ok(candidate));
            }
            if let Some(candidate) = self.next_from_cursor() {
                return Some(Ok(candidate));
            }
            if self.failed {
                return None;
            }
            let Some(run_no) = self.next_run.filter(|n| *n <= self.config.run_no_max) else {
                return None;
            };

            self.next_run = run_no.checked_add(1);
            if let Err(e) = self.visit(run_no) {
                self.failed = true;
                return Some(Err(e));
            }
        }
    }
}
