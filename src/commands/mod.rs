// src/commands/mod.rs
//! Command handlers for the autotest CLI

mod check;
mod count;
mod run;

pub use check::cmd_check;
pub use count::cmd_count;
pub use run::cmd_run;
