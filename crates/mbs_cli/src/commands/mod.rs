//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod defaults;
pub mod value;
