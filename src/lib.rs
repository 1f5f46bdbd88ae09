//! Hotspot bird scraper for <https://ebird.org>.
//!
//! Takes a list of map regions (bounding boxes), asks the eBird map service
//! for every hotspot inside each one, then scrapes each hotspot's page for
//! the species seen there since a cutoff year. Hybrid, slash-alternative,
//! parenthetical and "sp."-style identifications are dropped. Each missed
//! region and missed hotspot gets retried exactly once.

mod error;
mod macros;
mod model;
mod parse;
pub mod process;
mod request;
pub mod store;

pub use error::{Error, Result};
pub use model::{BoundingBox, Hotspot, Observation};

const EBIRD_BASE: &str = "https://ebird.org";
/// Minimum gap between two consecutive requests to the site.
const PACING_MS: u64 = 500;
/// The map service expects every coordinate padded to this many characters.
const COORD_WIDTH: usize = 16;
