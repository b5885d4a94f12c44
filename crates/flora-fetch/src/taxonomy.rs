//! Euro+Med classification walk.
//!
//! The plant tree is walked depth first from [`EURO_MED_PLANT_ROOT`], in the
//! order the API lists children. Nodes without children are the taxa written
//! out; internal nodes only contribute their rank to the lineage.

use std::collections::BTreeMap;
use std::path::Path;

use flora_model::TaxonRecord;
use flora_output::{CsvSink, ExistingFile};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::client::{HttpClient, RequestProfile};
use crate::config::FetchConfig;
use crate::endpoints::{EURO_MED_PLANT_ROOT, euromed_children_url};
use crate::error::{FetchError, Result};
use crate::summary::{RunSummary, fetched_at};

/// Status recorded for a root taxon that was never listed by a parent.
const UNKNOWN_STATUS: &str = "Unknown";

/// One entry of a `childNodesOf` listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChildNode {
    #[serde(default)]
    rank_label: Option<String>,
    #[serde(default)]
    name_cache: Option<String>,
    taxon_uuid: String,
    #[serde(default)]
    taxon_status: Option<String>,
}

#[derive(Debug)]
struct PendingNode {
    taxon_id: String,
    taxon_status: String,
    lineage: BTreeMap<String, String>,
}

/// Depth-first walk yielding one [`TaxonRecord`] per leaf.
///
/// A failed child listing yields an error for that node and the walk
/// continues with the next pending node, so one bad subtree does not end the
/// run.
pub struct TaxonomyWalk<'a, C: HttpClient + ?Sized> {
    client: &'a C,
    config: &'a FetchConfig,
    stack: Vec<PendingNode>,
}

impl<'a, C: HttpClient + ?Sized> TaxonomyWalk<'a, C> {
    /// Walk the whole plant tree.
    pub fn new(client: &'a C, config: &'a FetchConfig) -> Self {
        Self::from_root(client, config, EURO_MED_PLANT_ROOT)
    }

    /// Walk the subtree below `root_id`.
    pub fn from_root(client: &'a C, config: &'a FetchConfig, root_id: &str) -> Self {
        Self {
            client,
            config,
            stack: vec![PendingNode {
                taxon_id: root_id.to_string(),
                taxon_status: UNKNOWN_STATUS.to_string(),
                lineage: BTreeMap::new(),
            }],
        }
    }

    fn children(&self, taxon_id: &str) -> Result<Vec<ChildNode>> {
        let url = euromed_children_url(self.config, taxon_id);
        let body = self.client.get_text(&url, RequestProfile::Api)?;
        serde_json::from_str(&body).map_err(|e| FetchError::json(&url, e))
    }
}

impl<C: HttpClient + ?Sized> Iterator for TaxonomyWalk<'_, C> {
    type Item = Result<TaxonRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            let children = match self.children(&node.taxon_id) {
                Ok(children) => children,
                Err(err) => return Some(Err(err)),
            };

            if children.is_empty() {
                return Some(Ok(TaxonRecord {
                    lineage: node.lineage,
                    taxon_status: node.taxon_status,
                    euro_med_id: node.taxon_id,
                    date_fetched: fetched_at(),
                }));
            }
            debug!(taxon = %node.taxon_id, children = children.len(), "expanding node");

            // Ranks named by earlier siblings stay in the lineage of later ones.
            let mut lineage = node.lineage;
            let mut pending = Vec::with_capacity(children.len());
            for child in children {
                if let (Some(rank), Some(name)) = (child.rank_label, child.name_cache) {
                    lineage.insert(rank, name);
                }
                pending.push(PendingNode {
                    taxon_id: child.taxon_uuid,
                    taxon_status: child
                        .taxon_status
                        .unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
                    lineage: lineage.clone(),
                });
            }
            self.stack.extend(pending.into_iter().rev());
        }
        None
    }
}

/// Walk the Euro+Med tree below `root_id` and write every leaf taxon to
/// `output`. Use [`EURO_MED_PLANT_ROOT`] for the whole plant tree.
pub fn fetch_taxonomy<C: HttpClient + ?Sized>(
    client: &C,
    config: &FetchConfig,
    root_id: &str,
    output: &Path,
    existing: ExistingFile,
) -> Result<RunSummary> {
    info!(root = root_id, output = %output.display(), "walking Euro+Med classification");
    write_taxa(
        TaxonomyWalk::from_root(client, config, root_id),
        output,
        existing,
    )
}

fn write_taxa<I>(taxa: I, output: &Path, existing: ExistingFile) -> Result<RunSummary>
where
    I: Iterator<Item = Result<TaxonRecord>>,
{
    let mut sink = CsvSink::open(output, &TaxonRecord::header(), existing)?;
    let mut summary = RunSummary::default();

    for taxon in taxa {
        match taxon {
            Ok(record) => {
                sink.write_row(&record.to_row())?;
                summary.written += 1;
            }
            Err(err) => {
                warn!(error = %err, "skipping Euro+Med subtree");
                summary.failed += 1;
            }
        }
    }

    sink.finish()?;
    info!(
        written = summary.written,
        failed = summary.failed,
        output = %output.display(),
        "taxonomy fetch complete"
    );
    Ok(summary)
}
