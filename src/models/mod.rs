pub mod config;
pub mod job;
pub mod swif;

pub use config::*;
pub use job::*;
pub use swif::*;
