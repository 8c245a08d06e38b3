//! binomial-explorer: the binomial distribution next to its normal approximation.
//!
//! A session turns three controls (`n`, `p`, cursor `y`) into a two-panel
//! figure: PMF/PDF on top, CDF with continuity correction below. Every input
//! change reruns the whole evaluator -> composer -> renderer pass.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{ExplorerConfig, ExplorerSession};
pub use error::{ExplorerError, ExplorerResult};
