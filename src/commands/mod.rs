//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod collapse;
pub mod inspect;
pub mod render;
pub mod table;
pub mod utils;

// Re-export main command functions
pub use collapse::{execute_build, execute_collapse, BuildArgs, CollapseArgs};
pub use inspect::{execute_inspect, InspectArgs};
pub use render::{execute_render, RenderArgs};
pub use table::{execute_table, TableArgs};
pub use utils::{display_version, validate_flamebearer_file};
