//! Locating the condensed distribution on a Euro+Med taxon page.

/// Start of the line holding the distribution map and its condensed text.
const DISTRIBUTION_CONTAINER: &str = r#"<div id="openlayers-container-distribution"#;

const CONDENSED_PARAGRAPH: &str = r#"<p class="condensed_distribution">"#;

/// The condensed string ends at the first non-breaking space.
const NBSP: &str = "&nbsp;";

/// Return the raw condensed distribution fragment of a taxon page.
///
/// `None` when the page has no distribution container line or the line has
/// no condensed paragraph.
pub fn extract_condensed_distribution(page: &str) -> Option<&str> {
    let line = page
        .lines()
        .find(|line| line.trim().starts_with(DISTRIBUTION_CONTAINER))?;
    let (_, condensed) = line.split_once(CONDENSED_PARAGRAPH)?;
    Some(condensed.split_once(NBSP).map_or(condensed, |(head, _)| head))
}
