use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::order::RawMatch;

/// A name token, a `:` or whitespace separator, then DNA letters in any case.
///
/// Name characters are letters, numbers, `_` and `-` (combining marks end a
/// name). The separator also accepts the ASCII information separators
/// `\x1C`-`\x1F`, which some word processors emit between table cells.
static PRIMER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([\p{L}\p{N}_-]+)[:\s\x1C-\x1F]+([ATCGatcg]+)").expect("valid primer regex")
});

/// Find every `name: SEQUENCE` pair in the text, left to right.
///
/// Sequences are uppercased; names are kept as written.
///
/// # Examples
///
/// ```
/// use oligo_order::parsing::primer::parse_primers;
///
/// let found = parse_primers("GAPDH-F atcgatcg");
/// assert_eq!(found[0].label.as_deref(), Some("GAPDH-F"));
/// assert_eq!(found[0].sequence, "ATCGATCG");
/// ```
#[must_use]
pub fn parse_primers(text: &str) -> Vec<RawMatch> {
    let matches: Vec<RawMatch> = PRIMER_RE
        .captures_iter(text)
        .map(|caps| {
            let name = caps[1].to_string();
            let sequence = caps[2].to_ascii_uppercase();
            RawMatch::new(Some(name), sequence)
        })
        .collect();

    tracing::debug!("Recognized {} primer candidates", matches.len());
    matches
}
