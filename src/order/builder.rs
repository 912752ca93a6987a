use crate::core::order::{
    OrderRow, PrimerRow, RawMatch, SirnaRow, DEFAULT_OD, PRIMER_PURIFICATION, SIRNA_PURIFICATION,
    SIRNA_SENSE_LABEL,
};
use crate::core::rna::transform;
use crate::core::types::OrderType;

/// Build one order row per match.
///
/// Primer rows keep the matched name; siRNA rows always carry the
/// `siRNA-S` label and get their strands from [`transform`].
///
/// # Examples
///
/// ```
/// use oligo_order::core::order::{OrderRow, RawMatch};
/// use oligo_order::core::types::OrderType;
/// use oligo_order::order::build_rows;
///
/// let rows = build_rows(&[RawMatch::new(None, "AUGCAUGCAUGC")], OrderType::SirnaRna);
/// let OrderRow::Sirna(row) = &rows[0] else { unreachable!() };
/// assert_eq!(row.antisense_sequence, "GCAUGCAUGCAUdTdT");
/// ```
#[must_use]
pub fn build_rows(matches: &[RawMatch], order_type: OrderType) -> Vec<OrderRow> {
    matches
        .iter()
        .map(|m| match order_type {
            OrderType::DnaPrimer => OrderRow::Primer(primer_row(m)),
            OrderType::SirnaRna => OrderRow::Sirna(sirna_row(m)),
        })
        .collect()
}

fn primer_row(m: &RawMatch) -> PrimerRow {
    PrimerRow {
        name: m.label.clone().unwrap_or_default(),
        sequence: m.sequence.to_ascii_uppercase(),
        purification: PRIMER_PURIFICATION.to_string(),
        od: DEFAULT_OD,
    }
}

fn sirna_row(m: &RawMatch) -> SirnaRow {
    let (sense_sequence, antisense_sequence) = transform(&m.sequence);
    SirnaRow {
        sense_label: SIRNA_SENSE_LABEL.to_string(),
        sense_sequence,
        antisense_sequence,
        purification: SIRNA_PURIFICATION.to_string(),
        od: DEFAULT_OD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse;

    #[test]
    fn test_primer_rows_from_text() {
        let text = "F: ATCGATCG\nR: GGCCTTAA";
        let rows = build_rows(&parse(text, OrderType::DnaPrimer), OrderType::DnaPrimer);
        assert_eq!(
            rows,
            vec![
                OrderRow::Primer(PrimerRow {
                    name: "F".to_string(),
                    sequence: "ATCGATCG".to_string(),
                    purification: "PAGE".to_string(),
                    od: 2,
                }),
                OrderRow::Primer(PrimerRow {
                    name: "R".to_string(),
                    sequence: "GGCCTTAA".to_string(),
                    purification: "PAGE".to_string(),
                    od: 2,
                }),
            ]
        );
    }

    #[test]
    fn test_primer_sequence_uppercased() {
        let rows = build_rows(
            &[RawMatch::new(Some("p1".to_string()), "acgt")],
            OrderType::DnaPrimer,
        );
        let OrderRow::Primer(row) = &rows[0] else {
            panic!("expected primer row");
        };
        assert_eq!(row.name, "p1");
        assert_eq!(row.sequence, "ACGT");
    }

    #[test]
    fn test_sirna_rows_share_fixed_label() {
        let text = "Sense: GCUAGCUAGCUAG\n正义链 AUGGCCAUGGCCAUG";
        let rows = build_rows(&parse(text, OrderType::SirnaRna), OrderType::SirnaRna);
        assert_eq!(rows.len(), 2);
        for row in &rows {
            let OrderRow::Sirna(row) = row else {
                panic!("expected siRNA row");
            };
            assert_eq!(row.sense_label, "siRNA-S");
            assert_eq!(row.purification, "HPLC");
            assert_eq!(row.od, 2);
            assert!(row.sense_sequence.ends_with("dTdT"));
            assert!(row.antisense_sequence.ends_with("dTdT"));
        }
    }

    #[test]
    fn test_sirna_strands() {
        let rows = build_rows(
            &[RawMatch::new(None, "gcuagcuagcuag")],
            OrderType::SirnaRna,
        );
        let OrderRow::Sirna(row) = &rows[0] else {
            panic!("expected siRNA row");
        };
        assert_eq!(row.sense_sequence, "GCUAGCUAGCUAGdTdT");
        assert_eq!(row.antisense_sequence, "CUAGCUAGCUAGCdTdT");
    }

    #[test]
    fn test_rows_use_only_their_alphabet() {
        let text = "F: acgtTGCA\nR: GGCC";
        for row in build_rows(&parse(text, OrderType::DnaPrimer), OrderType::DnaPrimer) {
            let OrderRow::Primer(row) = row else { unreachable!() };
            assert!(row.sequence.chars().all(|c| "ACGT".contains(c)));
        }

        let text = "Sense: GCUAGCUAGCUAG AUGGCCAUGGCCAUG";
        for row in build_rows(&parse(text, OrderType::SirnaRna), OrderType::SirnaRna) {
            let OrderRow::Sirna(row) = row else { unreachable!() };
            for strand in [&row.sense_sequence, &row.antisense_sequence] {
                let bases = strand.strip_suffix("dTdT").unwrap();
                assert!(bases.chars().all(|c| "ACGU".contains(c)));
            }
        }
    }

    #[test]
    fn test_empty_matches_empty_rows() {
        assert!(build_rows(&[], OrderType::DnaPrimer).is_empty());
        assert!(build_rows(&[], OrderType::SirnaRna).is_empty());
    }
}
