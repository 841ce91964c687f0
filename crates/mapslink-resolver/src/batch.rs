//! Sequential processing of a list of links.

use std::collections::HashSet;

use mapslink_core::PlaceResult;

use crate::geocode::ReverseGeocode;
use crate::pacing::Pacing;
use crate::poi::PoiSearch;
use crate::processor::LinkProcessor;

/// Everything a batch run produced, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<PlaceResult>,
    /// Original links whose result has no coordinates.
    pub failed_links: Vec<String>,
    /// Exact-duplicate input lines that were skipped.
    pub duplicates_skipped: usize,
}

/// Processes `links` one at a time, in order.
///
/// Exact-duplicate links are dropped before processing (first occurrence
/// wins). `on_result` is called with the 1-based input position of each
/// processed link. `pacing.after_link()` runs after every processed link.
pub async fn run_batch<G, P, F>(
    processor: &LinkProcessor<G, P>,
    links: &[String],
    pacing: Pacing,
    mut on_result: F,
) -> BatchReport
where
    G: ReverseGeocode,
    P: PoiSearch,
    F: FnMut(usize, &PlaceResult),
{
    let mut seen: HashSet<&str> = HashSet::with_capacity(links.len());
    let mut report = BatchReport::default();

    for (index, link) in links.iter().enumerate() {
        if !seen.insert(link.as_str()) {
            tracing::debug!(link = %link, "skipping duplicate link");
            report.duplicates_skipped += 1;
            continue;
        }

        let result = processor.process(link).await;
        on_result(index + 1, &result);

        if !result.is_located() {
            report.failed_links.push(result.link.clone());
        }
        report.results.push(result);

        pacing.after_link().await;
    }

    tracing::info!(
        processed = report.results.len(),
        failed = report.failed_links.len(),
        duplicates = report.duplicates_skipped,
        "batch complete"
    );

    report
}
