use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::order::RawMatch;

/// Candidates this short are treated as stray words, not siRNA
pub const MIN_SIRNA_LENGTH: usize = 11;

/// Optional `Sense`/`正义链` marker, optional separator, then RNA letters in any case.
/// The separator accepts the same characters as the primer pattern.
static SIRNA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(Sense|正义链)?[:\s\x1C-\x1F]*([AUCGaucg]+)").expect("valid siRNA regex")
});

/// Find every siRNA sense sequence longer than ten bases, left to right.
///
/// Sequences are returned as written; normalization happens when strands are
/// derived.
///
/// # Examples
///
/// ```
/// use oligo_order::parsing::sirna::parse_sirna;
///
/// let found = parse_sirna("正义链: GCUAGCUAGCUAGCU");
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].sequence, "GCUAGCUAGCUAGCU");
/// ```
#[must_use]
pub fn parse_sirna(text: &str) -> Vec<RawMatch> {
    let mut kept = Vec::new();
    let mut discarded = 0usize;

    for caps in SIRNA_RE.captures_iter(text) {
        let sequence = &caps[2];
        if sequence.chars().count() < MIN_SIRNA_LENGTH {
            discarded += 1;
            continue;
        }
        let label = caps.get(1).map(|m| m.as_str().to_string());
        kept.push(RawMatch::new(label, sequence));
    }

    tracing::debug!(
        "Recognized {} siRNA candidates ({} too short)",
        kept.len(),
        discarded
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sense_prefixed() {
        let found = parse_sirna("Sense: GCUAGCUAGCUAGCU");
        assert_eq!(
            found,
            vec![RawMatch::new(Some("Sense".to_string()), "GCUAGCUAGCUAGCU")]
        );
    }

    #[test]
    fn test_chinese_prefix_and_lowercase() {
        let found = parse_sirna("正义链 gcuagcuagcuagcu");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].label.as_deref(), Some("正义链"));
        assert_eq!(found[0].sequence, "gcuagcuagcuagcu");
    }

    #[test]
    fn test_bare_sequences_without_label() {
        let found = parse_sirna("GCUAGCUAGCUAGCU\nAUGGCCAUGGCCAUG");
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|m| m.label.is_none()));
        assert_eq!(found[1].sequence, "AUGGCCAUGGCCAUG");
    }

    #[test]
    fn test_short_matches_discarded() {
        // exactly ten bases is not enough, eleven is
        assert!(parse_sirna("Sense: AUGCAUGCAU").is_empty());
        assert_eq!(parse_sirna("Sense: AUGCAUGCAUG").len(), 1);
    }

    #[test]
    fn test_surrounding_prose_is_ignored() {
        let text = "Hi, please synthesize this one: GCUAGCUAGCUAGCUAG thanks";
        let found = parse_sirna(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].sequence, "GCUAGCUAGCUAGCUAG");
    }

    #[test]
    fn test_information_separator_after_label() {
        let found = parse_sirna("Sense\x1fGCUAGCUAGCUAGCU");
        assert_eq!(
            found,
            vec![RawMatch::new(Some("Sense".to_string()), "GCUAGCUAGCUAGCU")]
        );
    }
}
