use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The hotspot lookup for a bounding box failed (network, HTTP status,
    /// or a response that wasn't the expected JSON array).
    #[error("Hotspot lookup failed: {0}")]
    Resolution(#[source] reqwest::Error),

    /// A hotspot's observation page could not be fetched.
    #[error("Hotspot page fetch failed: {0}")]
    Fetch(#[source] reqwest::Error),

    #[error("The selector you are trying to scrape for is missing. Selector: {0}")]
    ParseMissingSelector(String),

    /// A sighting record is present but its expected inner structure isn't.
    #[error("Sighting record has no recognizable {0}")]
    ParseShape(&'static str),

    #[error("Bad coordinate row: {0}")]
    CoordRow(String),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),
}
