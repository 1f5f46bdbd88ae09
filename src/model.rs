use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::{Error, Result};

/// One rectangular map region to query for hotspots.
///
/// Coordinate rows come in the order north, west, south, east; each field
/// keeps its own axis so the query layer can't mix them up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub north: f64,
    pub west: f64,
    pub south: f64,
    pub east: f64,
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.north, self.west, self.south, self.east)
    }
}

impl FromStr for BoundingBox {
    type Err = Error;

    /// Parses one coordinate-file row: `north,west,south,east`.
    fn from_str(s: &str) -> Result<Self> {
        let coords = s
            .split(',')
            .map(|c| c.trim().parse::<f64>())
            .collect::<core::result::Result<Vec<_>, _>>()
            .map_err(|_| Error::CoordRow(s.to_string()))?;
        match coords[..] {
            [north, west, south, east] => Ok(BoundingBox {
                north,
                west,
                south,
                east,
            }),
            _ => Err(Error::CoordRow(s.to_string())),
        }
    }
}

/// One birding location as the map service reports it. The JSON uses
/// single-letter keys: `l` is the location id, `n` the display name.
#[derive(Debug, Clone, Deserialize)]
pub struct Hotspot {
    #[serde(rename = "l")]
    pub id: String,
    #[serde(rename = "n")]
    pub name: String,
}

/// One output row: a species seen at a hotspot recently enough to count.
/// Not deduplicated; overlapping regions and repeated page entries yield
/// repeated rows on purpose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub hotspot: String,
    pub species: String,
}

/// Units (regions or hotspots) that failed their first attempt and are owed
/// exactly one more. `drain` consumes the batch, so a second retry pass over
/// the same units can't be written by accident.
#[derive(Debug)]
pub(crate) struct RetryBatch<T>(Vec<T>);

impl<T> RetryBatch<T> {
    pub(crate) fn new() -> Self {
        RetryBatch(Vec::new())
    }

    pub(crate) fn push(&mut self, unit: T) {
        self.0.push(unit);
    }

    pub(crate) fn drain(self) -> std::vec::IntoIter<T> {
        self.0.into_iter()
    }
}
