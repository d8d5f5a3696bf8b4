//! Tree model over decoded flamebearer levels.

pub mod layout;
pub mod tree;

pub use layout::{layout_for, DoubleLayout, FieldLayout, SingleLayout, SplitTicks};
pub use tree::{FlamebearerModel, NodeRef};
