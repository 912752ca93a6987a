use serde::{Deserialize, Serialize};

use crate::core::types::OrderType;

/// Purification method requested for DNA primers
pub const PRIMER_PURIFICATION: &str = "PAGE";

/// Purification method requested for siRNA strands
pub const SIRNA_PURIFICATION: &str = "HPLC";

/// Label written for every siRNA row
pub const SIRNA_SENSE_LABEL: &str = "siRNA-S";

/// Quantity (OD) ordered per oligo
pub const DEFAULT_OD: u32 = 2;

/// A candidate sequence found in pasted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMatch {
    /// Leading name token (primers) or the `Sense`/`正义链` marker (siRNA), if present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// The matched letters
    pub sequence: String,
}

impl RawMatch {
    pub fn new(label: Option<String>, sequence: impl Into<String>) -> Self {
        Self {
            label,
            sequence: sequence.into(),
        }
    }
}

/// One DNA primer line of the order form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimerRow {
    pub name: String,
    /// Uppercase A/C/G/T
    pub sequence: String,
    pub purification: String,
    pub od: u32,
}

/// One siRNA duplex line of the order form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SirnaRow {
    pub sense_label: String,
    /// Normalized sense strand with the `dTdT` overhang
    pub sense_sequence: String,
    /// Reverse complement of the sense strand with the `dTdT` overhang
    pub antisense_sequence: String,
    pub purification: String,
    pub od: u32,
}

/// A finished order-form row, shaped by its order type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderRow {
    Primer(PrimerRow),
    Sirna(SirnaRow),
}

impl OrderRow {
    #[must_use]
    pub fn order_type(&self) -> OrderType {
        match self {
            Self::Primer(_) => OrderType::DnaPrimer,
            Self::Sirna(_) => OrderType::SirnaRna,
        }
    }

    /// The label shown in the first column of a preview
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Primer(row) => &row.name,
            Self::Sirna(row) => &row.sense_label,
        }
    }

    #[must_use]
    pub fn purification(&self) -> &str {
        match self {
            Self::Primer(row) => &row.purification,
            Self::Sirna(row) => &row.purification,
        }
    }

    #[must_use]
    pub fn od(&self) -> u32 {
        match self {
            Self::Primer(row) => row.od,
            Self::Sirna(row) => row.od,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_row_accessors() {
        let row = OrderRow::Primer(PrimerRow {
            name: "F".to_string(),
            sequence: "ATCG".to_string(),
            purification: PRIMER_PURIFICATION.to_string(),
            od: DEFAULT_OD,
        });
        assert_eq!(row.order_type(), OrderType::DnaPrimer);
        assert_eq!(row.label(), "F");
        assert_eq!(row.purification(), "PAGE");
        assert_eq!(row.od(), 2);
    }

    #[test]
    fn test_order_row_json_is_tagged() {
        let row = OrderRow::Sirna(SirnaRow {
            sense_label: SIRNA_SENSE_LABEL.to_string(),
            sense_sequence: "AUGCdTdT".to_string(),
            antisense_sequence: "GCAUdTdT".to_string(),
            purification: SIRNA_PURIFICATION.to_string(),
            od: DEFAULT_OD,
        });
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["type"], "sirna");
        assert_eq!(json["antisense_sequence"], "GCAUdTdT");
    }
}
