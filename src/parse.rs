use scraper::{Html, Selector};

use crate::{Error, Result};

/// Every sighting record on a hotspot page sits in an `li` whose id starts
/// with this marker.
const RECORD_SELECTOR: &str = r#"li[id^="has-det-"]"#;
/// Species name: the first span nested two divs into the record.
const SPECIES_SELECTOR: &str = r#"div div span"#;
/// Sighting details: the div right after the species-name div. Its third
/// non-empty text string is the last-seen date.
const DETAILS_SELECTOR: &str = r#"div div + div"#;

/// One sighting as read off the page, before any filtering.
struct SightingRecord {
    species: String,
    date_text: String,
}

/// Extracts the species seen at a hotspot since `cutoff_year` from its
/// observation page.
///
/// Hybrids (`<word> x <word>`), slash alternatives, parenthetical forms and
/// genus-only `sp.` entries don't count and are dropped. A record whose date
/// doesn't end in a readable year is skipped on its own; a page with no
/// records at all is simply empty. Survivors come back in page order,
/// repeats included.
pub(crate) fn extract_species(html: &str, cutoff_year: i32) -> Result<Vec<String>> {
    let doc = Html::parse_document(html);
    let species = sighting_records(&doc)?
        .into_iter()
        .filter(|record| is_countable(&record.species))
        .filter_map(|record| match sighting_year(&record.date_text) {
            Some(year) if year >= cutoff_year => Some(record.species),
            _ => None,
        })
        .collect();
    Ok(species)
}

/// Pulls every sighting record out of the page, in document order.
///
/// Records missing the date string are dropped here (minor formatting
/// variance); a record missing the species name means the page no longer
/// has the shape we expect, which is an error.
fn sighting_records(doc: &Html) -> Result<Vec<SightingRecord>> {
    let record_selector = create_selector(RECORD_SELECTOR)?;
    let species_selector = create_selector(SPECIES_SELECTOR)?;
    let details_selector = create_selector(DETAILS_SELECTOR)?;

    let mut records = Vec::new();
    for li in doc.select(&record_selector) {
        // Re-parse the record as a fragment so the selectors can't reach
        // outside it.
        let record = Html::parse_fragment(&li.html());

        let species = record
            .select(&species_selector)
            .next()
            .ok_or(Error::ParseShape("species name"))?
            .text()
            .collect::<String>()
            .trim()
            .to_string();

        let details = record
            .select(&details_selector)
            .next()
            .ok_or(Error::ParseShape("sighting details"))?;
        let date_text = details
            .text()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .nth(2)
            .map(str::to_string);

        if let Some(date_text) = date_text {
            records.push(SightingRecord { species, date_text });
        }
    }
    Ok(records)
}

/// A name counts only if it identifies one actual species.
fn is_countable(species: &str) -> bool {
    !is_hybrid(species) && !is_ambiguous(species)
}

/// `<word> x <word>` is a cross between two species, not a species.
fn is_hybrid(species: &str) -> bool {
    let words: Vec<&str> = species.split_whitespace().collect();
    words.windows(3).any(|w| w[1] == "x")
}

/// Slash alternatives, parenthetical forms and genus-level `sp.` entries
/// are all unresolved identifications.
///
/// Note the `sp.` check matches that substring anywhere in the name, not
/// just as a suffix marker. Deliberately over-broad to match what the site
/// has always been filtered by.
fn is_ambiguous(species: &str) -> bool {
    species.contains('/') || species.contains('(') || species.contains("sp.")
}

/// The year is the last four characters of the date text.
fn sighting_year(date_text: &str) -> Option<i32> {
    let date_text = date_text.trim();
    let start = date_text.char_indices().rev().nth(3)?.0;
    date_text[start..].parse().ok()
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}
