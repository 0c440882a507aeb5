#![allow(dead_code)]
//! sw - a front-end for Swif workflows
//!
//! sw expands a job-family config (one template, many runs/files) into one
//! `swif add-job` call per unit of work, and wraps the workflow-level swif
//! commands (run, pause, cancel, retry).
//!
//! # Architecture
//!
//! - **commands**: CLI command implementations (add, workflow commands)
//! - **core**: Job expansion (enumerator, materializer, dispatcher, runner)
//! - **models**: Data structures (config, candidate jobs, swif commands)
//! - **error**: Error types

pub mod commands;
pub mod core;
pub mod error;
pub mod models;

pub use error::{Result, SwError};
