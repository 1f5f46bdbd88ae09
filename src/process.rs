use std::time::Duration;

use chrono::Local;
use reqwest::Client;

use crate::model::{BoundingBox, Hotspot, Observation, RetryBatch};
use crate::request::{self, Pacer};
use crate::{info_time, parse, Result, EBIRD_BASE, PACING_MS};

/// The whole scrape: bounding boxes in, observations out.
///
/// Requests run strictly one at a time through a shared [`Pacer`] so the
/// site never sees two of ours closer together than the pacing interval.
pub struct Pipeline {
    client: Client,
    base_url: String,
    pacer: Pacer,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::with_base_url(EBIRD_BASE)
    }

    /// Points the pipeline at a different host. Used by the tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Pipeline {
            client: Client::new(),
            base_url: base_url.into(),
            pacer: Pacer::new(Duration::from_millis(PACING_MS)),
        }
    }

    /// Resolves every box into hotspots and every hotspot into the species
    /// seen there since `cutoff_year`, in input order.
    ///
    /// A box whose lookup fails goes into a retry batch and gets exactly one
    /// more attempt after the first pass; a box failing both times is
    /// reported and contributes nothing. Nothing here aborts the run, so the
    /// caller always gets whatever could be collected.
    pub async fn run(&mut self, boxes: &[BoundingBox], cutoff_year: i32) -> Vec<Observation> {
        let start_time = Local::now();
        let mut observations = Vec::new();

        let mut missed = RetryBatch::new();
        for bb in boxes {
            match self.resolve_region(bb).await {
                Ok(hotspots) => {
                    info_time!("Total hotspots at {}: {}", bb, hotspots.len());
                    let found = self.fetch_hotspots(&hotspots, cutoff_year).await;
                    observations.extend(found);
                }
                Err(_) => missed.push(*bb),
            }
        }

        for bb in missed.drain() {
            match self.resolve_region(&bb).await {
                Ok(hotspots) => {
                    info_time!("Total hotspots at {}: {}", bb, hotspots.len());
                    let found = self.fetch_hotspots(&hotspots, cutoff_year).await;
                    observations.extend(found);
                }
                Err(err) => info_time!("Couldn't get hotspots for {}: {}", bb, err),
            }
        }

        info_time!(start_time, "Collected {} observations", observations.len());
        observations
    }

    async fn resolve_region(&mut self, bb: &BoundingBox) -> Result<Vec<Hotspot>> {
        self.pacer.wait().await;
        request::get_hotspots(&self.client, &self.base_url, bb).await
    }

    /// Scrapes each hotspot in turn, queueing failures for one retry pass.
    /// A hotspot failing both passes is reported and yields no rows.
    async fn fetch_hotspots(
        &mut self,
        hotspots: &[Hotspot],
        cutoff_year: i32,
    ) -> Vec<Observation> {
        let mut observations = Vec::new();

        let mut missed = RetryBatch::new();
        for hotspot in hotspots {
            match self.fetch_one(hotspot, cutoff_year).await {
                Ok(species) => observations.extend(observed_at(hotspot, species)),
                Err(_) => missed.push(hotspot.clone()),
            }
        }

        for hotspot in missed.drain() {
            match self.fetch_one(&hotspot, cutoff_year).await {
                Ok(species) => observations.extend(observed_at(&hotspot, species)),
                Err(err) => info_time!("Unable to get data for {}: {}", hotspot.name, err),
            }
        }

        observations
    }

    async fn fetch_one(&mut self, hotspot: &Hotspot, cutoff_year: i32) -> Result<Vec<String>> {
        self.pacer.wait().await;
        let html = request::get_hotspot_page(&self.client, &self.base_url, hotspot).await?;
        parse::extract_species(&html, cutoff_year)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn observed_at(hotspot: &Hotspot, species: Vec<String>) -> impl Iterator<Item = Observation> + '_ {
    species.into_iter().map(|species| Observation {
        hotspot: hotspot.name.clone(),
        species,
    })
}
