pub mod args;
pub mod commands;
pub mod prompt;

pub use args::{Cli, Commands};
pub use commands::run;
