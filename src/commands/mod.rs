pub mod add;
pub mod workflow;

pub use add::*;
pub use workflow::*;

/// Print the sw version
pub fn show_version() {
    println!("sw version {}", env!("CARGO_PKG_VERSION"));
}
