//! Run artifacts besides the results file
//!
//! A JSON summary of what ran and how it exited, and a bash script that
//! replays the same two invocations by hand.

mod json;
mod script;

pub use json::{JsonReporter, RunSummary};
pub use script::{render_replay_script, write_replay_script};
