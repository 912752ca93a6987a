//! Sense/antisense strand derivation for siRNA orders.

/// Deoxythymidine overhang appended to both strands
pub const DTDT_OVERHANG: &str = "dTdT";

/// Normalize a sense sequence for an RNA context.
///
/// Uppercases, drops whitespace and reads every `T` as `U`. Characters are
/// uppercased one-for-one so the output never changes length except for the
/// removed whitespace.
///
/// # Examples
///
/// ```
/// use oligo_order::core::rna::normalize_rna;
///
/// assert_eq!(normalize_rna("augc tt"), "AUGCUU");
/// ```
#[must_use]
pub fn normalize_rna(seq: &str) -> String {
    seq.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c.to_ascii_uppercase() {
            'T' => 'U',
            other => other,
        })
        .collect()
}

/// Watson-Crick partner of an RNA base; anything else becomes `N`
#[must_use]
pub fn complement_base(base: char) -> char {
    match base {
        'A' => 'U',
        'U' => 'A',
        'G' => 'C',
        'C' => 'G',
        _ => 'N',
    }
}

/// Reverse complement of an already-normalized RNA sequence, 5'→3'
#[must_use]
pub fn reverse_complement(seq: &str) -> String {
    seq.chars().rev().map(complement_base).collect()
}

/// Derive the padded sense and antisense strands for a sense sequence.
///
/// Total: unknown bases become `N` in the antisense strand instead of failing.
///
/// # Examples
///
/// ```
/// use oligo_order::core::rna::transform;
///
/// let (sense, antisense) = transform("AUGC");
/// assert_eq!(sense, "AUGCdTdT");
/// assert_eq!(antisense, "GCAUdTdT");
/// ```
#[must_use]
pub fn transform(sense_seq: &str) -> (String, String) {
    let sense = normalize_rna(sense_seq);
    let antisense = reverse_complement(&sense);
    (
        format!("{sense}{DTDT_OVERHANG}"),
        format!("{antisense}{DTDT_OVERHANG}"),
    )
}
