//! Value-level normalization for the satellite table.
//!
//! - **lifetime**: noise-token stripping and range resolution
//! - **label**: orbit class label clean-up

pub mod label;
pub mod lifetime;

pub use label::normalize_orbit_label;
pub use lifetime::{LifetimeParseError, parse_lifetime, resolve_range, strip_noise_tokens};
