//! CLI library components for the satellite lifetime analysis.

pub mod logging;
pub mod pipeline;
