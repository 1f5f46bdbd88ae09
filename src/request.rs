use std::time::Duration;

use reqwest::Client;
use tokio::time::{sleep, Instant};

use crate::model::{BoundingBox, Hotspot};
use crate::{Error, Result, COORD_WIDTH};

/// Asks the map service for every hotspot inside the bounding box.
/// Any network failure, error status or non-JSON body is a resolution
/// failure; the caller decides whether to queue the box for a retry.
pub(crate) async fn get_hotspots(
    client: &Client,
    base: &str,
    bb: &BoundingBox,
) -> Result<Vec<Hotspot>> {
    let url = hotspot_query_url(base, bb);
    let hotspots = client
        .get(url)
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(Error::Resolution)?
        .json()
        .await
        .map_err(Error::Resolution)?;
    Ok(hotspots)
}

/// Requests one hotspot's observation page and returns the HTML.
pub(crate) async fn get_hotspot_page(
    client: &Client,
    base: &str,
    hotspot: &Hotspot,
) -> Result<String> {
    let html = client
        .get(format!("{base}/hotspot/{}", hotspot.id))
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(Error::Fetch)?
        .text()
        .await
        .map_err(Error::Fetch)?;
    Ok(html)
}

fn hotspot_query_url(base: &str, bb: &BoundingBox) -> String {
    format!(
        "{base}/mapServices/genHsForWindow.do?maxY={}&maxX={}&minY={}&minX={}&yr=all&m=",
        pad_coord(bb.north),
        pad_coord(bb.east),
        pad_coord(bb.south),
        pad_coord(bb.west),
    )
}

/// Renders a coordinate the way the map service expects it: the decimal
/// string right-padded with zeros to a fixed width. Integral values get a
/// forced `.0` first so the padding zeros land after the decimal point.
fn pad_coord(coord: f64) -> String {
    let mut s = coord.to_string();
    if !s.contains('.') {
        s.push_str(".0");
    }
    format!("{s:0<COORD_WIDTH$}")
}

/// Spaces consecutive requests out by a fixed minimum interval.
/// `wait` returns immediately the first time and thereafter sleeps out
/// whatever is left of the interval since the previous call.
pub(crate) struct Pacer {
    interval: Duration,
    last: Option<Instant>,
}

impl Pacer {
    pub(crate) fn new(interval: Duration) -> Self {
        Pacer {
            interval,
            last: None,
        }
    }

    pub(crate) async fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                sleep(self.interval - elapsed).await;
            }
        }
        self.last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_coord_pads_fractional_coords_to_width() {
        assert_eq!(pad_coord(-93.25), "-93.250000000000");
        assert_eq!(pad_coord(44.9), "44.9000000000000");
        assert_eq!(pad_coord(-93.25).len(), COORD_WIDTH);
    }

    #[test]
    fn pad_coord_forces_a_decimal_point_on_integral_coords() {
        // Without the forced ".0" the padding would multiply the value.
        assert_eq!(pad_coord(45.0), "45.0000000000000");
        assert_eq!(pad_coord(-93.0), "-93.000000000000");
    }

    #[test]
    fn pad_coord_leaves_overlong_coords_alone() {
        let long = pad_coord(44.123456789012345);
        assert!(long.len() >= COORD_WIDTH);
        assert!(long.starts_with("44.123456789012"));
    }

    #[test]
    fn query_url_places_each_coordinate_on_its_axis() {
        let bb = BoundingBox {
            north: 45.1,
            west: -93.5,
            south: 44.9,
            east: -93.1,
        };
        let url = hotspot_query_url("https://ebird.org", &bb);
        assert_eq!(
            url,
            "https://ebird.org/mapServices/genHsForWindow.do\
             ?maxY=45.1000000000000&maxX=-93.100000000000\
             &minY=44.9000000000000&minX=-93.500000000000&yr=all&m="
        );
    }

    #[tokio::test(start_paused = true)]
    async fn pacer_enforces_the_minimum_interval() {
        let interval = Duration::from_millis(500);
        let mut pacer = Pacer::new(interval);

        let start = Instant::now();
        pacer.wait().await;
        // First request goes straight through.
        assert_eq!(start.elapsed(), Duration::ZERO);

        pacer.wait().await;
        pacer.wait().await;
        assert!(start.elapsed() >= interval * 2);
    }
}
