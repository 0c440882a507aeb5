use std::io;

use crate::core::{DispatchOptions, Dispatcher, ProcessExecutor};
use crate::error::SwError;
use crate::models::SwifCommand;

/// Send one workflow-level command to swif
pub fn run_swif(command: SwifCommand) -> Result<(), SwError> {
    let mut dispatcher = Dispatcher::new(ProcessExecutor, io::stdout(), DispatchOptions::default());
    dispatcher.dispatch_command(&command)
}

/// Split `-p` values given as repeated flags, commas or one quoted string
pub fn split_problems(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
