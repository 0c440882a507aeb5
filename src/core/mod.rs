pub mod config;
pub mod dispatch;
pub mod enumerate;
pub mod lister;
pub mod materialize;
pub mod placeholder;
pub mod runner;

pub use config::*;
pub use dispatch::*;
pub use enumerate::*;
pub use lister::*;
pub use materialize::*;
pub use runner::*;
