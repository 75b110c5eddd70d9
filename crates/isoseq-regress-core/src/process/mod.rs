//! External collaborator invocation
//!
//! The pipeline runner and the comparison utility are opaque child
//! processes. This module describes their command lines and runs them to
//! completion.

mod command_line;
mod invoke;

pub use command_line::CommandSpec;
pub use invoke::{StepRecord, run_inherited, run_to_file, shell_status};
