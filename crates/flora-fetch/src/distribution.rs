//! Euro+Med distribution fetcher.

use std::collections::HashSet;
use std::path::Path;

use flora_distribution::{decode, extract_condensed_distribution};
use flora_model::{DistributionRecord, EURO_MED_ID, RegionCatalog};
use flora_output::{CsvSink, ExistingFile, read_column};
use tracing::{debug, info, warn};

use crate::client::{HttpClient, RequestProfile};
use crate::config::FetchConfig;
use crate::endpoints::euromed_taxon_page_url;
use crate::error::Result;
use crate::summary::{RunSummary, fetched_at};

/// Options for [`fetch_distributions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributionOptions {
    pub existing: ExistingFile,
    /// When appending, leave out ids the output already holds.
    pub skip_existing: bool,
}

impl Default for DistributionOptions {
    fn default() -> Self {
        Self {
            existing: ExistingFile::Fail,
            skip_existing: true,
        }
    }
}

/// Outcome of fetching one taxon page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Decoded(DistributionRecord),
    /// The page carries no condensed distribution.
    NoDistribution,
}

/// Fetch and decode the distribution of one taxon.
pub fn fetch_distribution<C: HttpClient + ?Sized>(
    client: &C,
    config: &FetchConfig,
    catalog: &RegionCatalog,
    euro_med_id: &str,
) -> Result<PageOutcome> {
    let url = euromed_taxon_page_url(config, euro_med_id);
    let page = client.get_text(&url, RequestProfile::Browser)?;

    let Some(fragment) = extract_condensed_distribution(&page) else {
        return Ok(PageOutcome::NoDistribution);
    };
    debug!(taxon = euro_med_id, fragment, "condensed distribution");

    Ok(PageOutcome::Decoded(DistributionRecord {
        euro_med_id: euro_med_id.to_string(),
        date_fetched: fetched_at(),
        occurrence: decode(fragment, catalog),
    }))
}

/// Fetch distributions for every `euro_med_id` listed in `input`.
pub fn fetch_distributions<C: HttpClient + ?Sized>(
    client: &C,
    config: &FetchConfig,
    catalog: &RegionCatalog,
    input: &Path,
    output: &Path,
    options: DistributionOptions,
) -> Result<RunSummary> {
    let ids = read_column(input, EURO_MED_ID)?;
    let fetched: HashSet<String> = if options.skip_existing
        && options.existing == ExistingFile::Append
        && output.exists()
    {
        read_column(output, EURO_MED_ID)?.into_iter().collect()
    } else {
        HashSet::new()
    };
    if !fetched.is_empty() {
        info!(count = fetched.len(), "skipping taxa already in output");
    }

    let mut sink = CsvSink::open(output, &DistributionRecord::header(catalog), options.existing)?;
    let mut summary = RunSummary::default();

    for id in &ids {
        if fetched.contains(id) {
            debug!(taxon = %id, "already fetched");
            summary.skipped += 1;
            continue;
        }

        match fetch_distribution(client, config, catalog, id) {
            Ok(PageOutcome::Decoded(record)) => {
                sink.write_row(&record.to_row(catalog))?;
                summary.written += 1;
            }
            Ok(PageOutcome::NoDistribution) => {
                warn!(taxon = %id, "no condensed distribution on taxon page");
                summary.skipped += 1;
            }
            Err(err) => {
                warn!(taxon = %id, error = %err, "failed to fetch distribution");
                summary.failed += 1;
            }
        }
    }

    sink.finish()?;
    info!(
        taxa = ids.len(),
        written = summary.written,
        skipped = summary.skipped,
        failed = summary.failed,
        "distribution fetch complete"
    );
    Ok(summary)
}
