//! Condensed distribution decoding.
//!
//! A Euro+Med condensed distribution lists region codes in three layers:
//!
//! - `<b>Gr Tu</b>`: native (endemic when the fragment carries `●`)
//! - `[nSp cIt]`: introduced, optionally prefixed `a` (casual alien),
//!   `c` (cultivated) or `n` (naturalized)
//! - everything else: prefixed `-` (reported in error), `?` (doubtfully
//!   present), `d` (doubtfully native) or `†` (presumably extinct), or bare
//!
//! Parenthesized groups after a code carry subregions and are discarded.
//! Decoding never fails; tokens that resolve to no catalog code are dropped.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use flora_model::{Occurrence, OccurrenceStatus, RegionCatalog};

/// Marks a species found only inside the covered area.
pub const ENDEMIC_MARKER: char = '●';

/// Prefix of a region where the species is presumably extinct.
pub const EXTINCT_MARKER: char = '†';

static NATIVE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<b>([^<>]*)</b>").expect("Invalid native segment regex"));

static INTRODUCED_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]").expect("Invalid introduced segment regex"));

/// Single-level parenthesis group; nested groups lose only their innermost level.
static SUBREGION_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^()]*\)").expect("Invalid subregion regex"));

const INTRODUCED_MODIFIERS: [char; 3] = ['a', 'c', 'n'];
const REMAINDER_MODIFIERS: [char; 4] = ['-', '?', 'd', EXTINCT_MARKER];

/// A region code with its optional status prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionToken<'a> {
    pub modifier: Option<char>,
    pub code: &'a str,
}

impl<'a> RegionToken<'a> {
    fn split(token: &'a str, modifiers: &[char]) -> Self {
        match token.chars().next() {
            Some(first) if modifiers.contains(&first) => Self {
                modifier: Some(first),
                code: &token[first.len_utf8()..],
            },
            _ => Self {
                modifier: None,
                code: token,
            },
        }
    }
}

/// The three layers of one fragment, with subregions already removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedDistribution {
    pub endemic: bool,
    pub native: String,
    pub introduced: String,
    pub remainder: String,
}

impl DecodedDistribution {
    /// Peel a raw fragment into its native, introduced, and remaining layers.
    pub fn parse(fragment: &str) -> Self {
        let (endemic, working) = take_endemism(fragment);
        let (native, working) = take_segments(&NATIVE_SEGMENT, &working, ["<b>", "</b>"]);
        let (introduced, working) = take_segments(&INTRODUCED_SEGMENT, &working, ["[", "]"]);
        Self {
            endemic,
            native: strip_subregions(&native),
            introduced: strip_subregions(&introduced),
            remainder: strip_subregions(working.trim()),
        }
    }

    pub fn native_codes(&self) -> impl Iterator<Item = &str> {
        self.native.split_whitespace()
    }

    pub fn introduced_codes(&self) -> impl Iterator<Item = RegionToken<'_>> {
        self.introduced
            .split_whitespace()
            .map(|token| RegionToken::split(token, &INTRODUCED_MODIFIERS))
    }

    pub fn remainder_codes(&self) -> impl Iterator<Item = RegionToken<'_>> {
        self.remainder
            .split_whitespace()
            .map(|token| RegionToken::split(token, &REMAINDER_MODIFIERS))
    }

    /// Resolve a status for every catalog region.
    ///
    /// Layers are applied native, introduced, remainder; a code listed in more
    /// than one layer keeps the status of the last one.
    pub fn summarize(&self, catalog: &RegionCatalog) -> Occurrence {
        let mut occurrence = Occurrence::seeded(catalog);

        let native_status = if self.endemic {
            OccurrenceStatus::Endemic
        } else {
            OccurrenceStatus::Native
        };
        for code in self.native_codes() {
            occurrence.set(code, native_status);
        }

        for token in self.introduced_codes() {
            match introduced_status(token, catalog) {
                Some(status) => occurrence.set(token.code, status),
                None => trace!(token = token.code, "dropping unknown introduced region"),
            }
        }

        for token in self.remainder_codes() {
            match remainder_status(token, catalog) {
                Some(status) => occurrence.set(token.code, status),
                None => trace!(token = token.code, "dropping unknown region"),
            }
        }

        occurrence.retain_catalog(catalog);
        occurrence
    }
}

/// Decode a raw condensed distribution fragment against the region catalog.
pub fn decode(fragment: &str, catalog: &RegionCatalog) -> Occurrence {
    DecodedDistribution::parse(fragment).summarize(catalog)
}

fn introduced_status(token: RegionToken<'_>, catalog: &RegionCatalog) -> Option<OccurrenceStatus> {
    match token.modifier {
        Some('a') => Some(OccurrenceStatus::CasualAlien),
        Some('c') => Some(OccurrenceStatus::Cultivated),
        Some('n') => Some(OccurrenceStatus::Naturalized),
        _ if catalog.contains(token.code) => Some(OccurrenceStatus::Introduced),
        _ => None,
    }
}

fn remainder_status(token: RegionToken<'_>, catalog: &RegionCatalog) -> Option<OccurrenceStatus> {
    match token.modifier {
        Some('-') => Some(OccurrenceStatus::ReportedInError),
        Some('?') => Some(OccurrenceStatus::DoubtfullyPresent),
        Some('d') => Some(OccurrenceStatus::DoubtfullyNative),
        Some(EXTINCT_MARKER) => Some(OccurrenceStatus::PresumablyExtinct),
        _ if catalog.contains(token.code) => Some(OccurrenceStatus::Undefined),
        _ => None,
    }
}

fn take_endemism(fragment: &str) -> (bool, String) {
    if fragment.contains(ENDEMIC_MARKER) {
        let stripped = fragment.replace(ENDEMIC_MARKER, "");
        (true, stripped.trim().to_string())
    } else {
        (false, fragment.to_string())
    }
}

/// Collect the inner text of every `pattern` match, then remove the delimiters
/// and every whole occurrence of each inner text from the input.
fn take_segments(pattern: &Regex, input: &str, delimiters: [&str; 2]) -> (String, String) {
    let segments: Vec<&str> = pattern
        .captures_iter(input)
        .filter_map(|captures| captures.get(1))
        .map(|inner| inner.as_str())
        .collect();
    if segments.is_empty() {
        return (String::new(), input.to_string());
    }

    let joined = segments.join(" ").trim().to_string();
    let mut rest = input.to_string();
    for delimiter in delimiters {
        rest = rest.replace(delimiter, "");
    }
    for segment in segments.iter().filter(|segment| !segment.is_empty()) {
        rest = remove_whole_occurrences(&rest, segment);
    }
    (joined, rest)
}

/// Remove every occurrence of `needle` that is not glued to a longer token,
/// so stripping native `Fr` leaves `nFr` and `?Fr` intact.
fn remove_whole_occurrences(haystack: &str, needle: &str) -> String {
    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;
    for (start, _) in haystack.match_indices(needle) {
        let end = start + needle.len();
        if start < last
            || !is_token_boundary(haystack[..start].chars().next_back())
            || !is_token_boundary(haystack[end..].chars().next())
        {
            continue;
        }
        out.push_str(&haystack[last..start]);
        last = end;
    }
    out.push_str(&haystack[last..]);
    out
}

fn is_token_boundary(neighbor: Option<char>) -> bool {
    neighbor.is_none_or(|ch| ch.is_whitespace() || matches!(ch, '(' | ')' | '[' | ']' | ','))
}

fn strip_subregions(text: &str) -> String {
    SUBREGION_GROUP.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_layers() {
        let decoded = DecodedDistribution::parse("<b>Fr Gr</b> [nSp cIt] ?Tu");
        assert!(!decoded.endemic);
        assert_eq!(decoded.native, "Fr Gr");
        assert_eq!(decoded.introduced, "nSp cIt");
        assert_eq!(decoded.remainder, "?Tu");
    }

    #[test]
    fn test_parse_strips_endemic_marker() {
        let decoded = DecodedDistribution::parse("● <b>Cr</b>");
        assert!(decoded.endemic);
        assert_eq!(decoded.native, "Cr");
        assert_eq!(decoded.remainder, "");
    }

    #[test]
    fn test_parse_joins_multiple_segments() {
        let decoded = DecodedDistribution::parse("<b>Al</b>(<b>A</b>) <b>Gr</b> [aGe] [cBe]");
        assert_eq!(decoded.native, "Al A Gr");
        assert_eq!(decoded.introduced, "aGe cBe");
        assert_eq!(decoded.remainder, "");
    }

    #[test]
    fn test_native_text_removed_everywhere() {
        // The bare "Gr" outside the emphasis is stripped too; "?Gr" is its own token.
        let decoded = DecodedDistribution::parse("<b>Gr</b> Tu Gr ?Gr");
        assert_eq!(decoded.native, "Gr");
        assert_eq!(
            decoded.remainder.split_whitespace().collect::<Vec<_>>(),
            vec!["Tu", "?Gr"]
        );
    }

    #[test]
    fn test_whole_occurrences_only() {
        assert_eq!(remove_whole_occurrences("Fr [nFr]", "Fr"), " [nFr]");
        assert_eq!(remove_whole_occurrences("Gr(G) G", "G"), "Gr() ");
        assert_eq!(remove_whole_occurrences("Al Bu Al", "Al"), " Bu ");
        assert_eq!(remove_whole_occurrences("AlAl", "Al"), "AlAl");
    }

    #[test]
    fn test_subregions_removed_single_level() {
        let decoded = DecodedDistribution::parse("<b>Gr(Kriti) It(Si Sa)</b> Tu(A(E))");
        assert_eq!(decoded.native, "Gr It");
        assert_eq!(decoded.remainder, "Tu(A)");
    }

    #[test]
    fn test_tokens_carry_modifiers() {
        let decoded = DecodedDistribution::parse("[nSp It] -Al †Bu dCr Tu");
        let introduced: Vec<_> = decoded.introduced_codes().collect();
        assert_eq!(
            introduced,
            vec![
                RegionToken {
                    modifier: Some('n'),
                    code: "Sp"
                },
                RegionToken {
                    modifier: None,
                    code: "It"
                },
            ]
        );
        let modifiers: Vec<_> = decoded.remainder_codes().map(|t| t.modifier).collect();
        assert_eq!(
            modifiers,
            vec![Some('-'), Some(EXTINCT_MARKER), Some('d'), None]
        );
        let codes: Vec<_> = decoded.remainder_codes().map(|t| t.code).collect();
        assert_eq!(codes, vec!["Al", "Bu", "Cr", "Tu"]);
    }

    #[test]
    fn test_no_delimiters_is_all_remainder() {
        let decoded = DecodedDistribution::parse("  Gr Tu  ");
        assert_eq!(decoded.native, "");
        assert_eq!(decoded.introduced, "");
        assert_eq!(decoded.remainder, "Gr Tu");
    }
}
