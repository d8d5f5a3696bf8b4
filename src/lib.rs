//! flamebearer-engine
//!
//! Decoding, rendering and analysis of flamebearer profiles: the compact,
//! delta-encoded flame graph format used by continuous profilers.
//!
//! The crate provides the core implementation for the `flamebearer` CLI
//! tool and can be used as a library:
//!
//! ```ignore
//! use flamebearer_engine::codec::read_flamebearer;
//! use flamebearer_engine::flamegraph::{generate_flamegraph, Viewport};
//! use flamebearer_engine::model::FlamebearerModel;
//! use flamebearer_engine::utils::config::RenderConfig;
//!
//! let model = FlamebearerModel::new(read_flamebearer("cpu.json")?);
//! let (svg, _) = generate_flamegraph(&model, &Viewport::new(), &RenderConfig::default())?;
//! ```

pub mod aggregator;
pub mod codec;
pub mod commands;
pub mod flamegraph;
pub mod model;
pub mod output;
pub mod palette;
pub mod units;
pub mod utils;
