//! Interactive and scripted command shell over the inventory.

pub mod commands;
pub mod core;
pub mod help;
pub mod output;
pub mod registry;
pub mod render;
pub mod shell;
pub mod shell_context;
pub mod table;

pub use self::core::{CliError, CommandError, CommandResult, LoopControl};
pub use shell::{handle_line, run_cli, SCRIPT_ENV};
pub use shell_context::{CliMode, ShellContext};
