//! Corpus tooling for shortz: turn raw text (or pre-tabulated histograms)
//! into code tables, and keep a plain-text dictionary codec around as a
//! comparison baseline.

pub mod baseline;
pub mod histogram;
pub mod mapbuilder;

pub use histogram::Histogram;
pub use mapbuilder::{Algorithm, MapBuilder};
