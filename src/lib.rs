//! proktree library: list processes, select them and print them as a tree

mod local_logger;
mod prelude;

pub mod acquisition;
pub mod cli;
pub mod config;
pub mod helpers;
pub mod process;
pub mod tree;

pub use config::DisplayConfig;
pub use process::{Pid, ProcessRecord};
