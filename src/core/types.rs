use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kind of order a pasted request describes.
///
/// Selects both the extraction rule applied to the text and the row schema
/// written into the template.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// DNA primers: named sequences over A/C/G/T
    #[default]
    #[value(name = "dna", alias = "dna-primer")]
    DnaPrimer,
    /// siRNA duplexes: sense sequences over A/U/C/G
    #[value(name = "rna", alias = "sirna", alias = "sirna-rna")]
    SirnaRna,
}

impl OrderType {
    /// Short identifier used in form fields and file names
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DnaPrimer => "dna",
            Self::SirnaRna => "rna",
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DnaPrimer => write!(f, "DNA primer"),
            Self::SirnaRna => write!(f, "siRNA/RNA"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown order type: '{0}' (expected 'dna' or 'rna')")]
pub struct UnknownOrderType(pub String);

impl FromStr for OrderType {
    type Err = UnknownOrderType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dna" | "dna_primer" | "dna-primer" | "primer" => Ok(Self::DnaPrimer),
            "rna" | "sirna" | "sirna_rna" | "sirna-rna" => Ok(Self::SirnaRna),
            _ => Err(UnknownOrderType(s.to_string())),
        }
    }
}

/// Client metadata written once into the header of the order form.
///
/// None of these fields are validated; they are copied into cells verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    /// Client (customer) name
    pub name: String,
    /// Institution or company
    pub unit: String,
    /// Research group, usually the PI's name
    pub group: String,
}

impl ClientInfo {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            group: group.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_type_from_str() {
        assert_eq!("dna".parse::<OrderType>().unwrap(), OrderType::DnaPrimer);
        assert_eq!("DNA_PRIMER".parse::<OrderType>().unwrap(), OrderType::DnaPrimer);
        assert_eq!("rna".parse::<OrderType>().unwrap(), OrderType::SirnaRna);
        assert_eq!(" siRNA ".parse::<OrderType>().unwrap(), OrderType::SirnaRna);
        assert!("protein".parse::<OrderType>().is_err());
    }

    #[test]
    fn test_order_type_round_trips_through_as_str() {
        for ty in [OrderType::DnaPrimer, OrderType::SirnaRna] {
            assert_eq!(ty.as_str().parse::<OrderType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_order_type_serde_names() {
        assert_eq!(
            serde_json::to_string(&OrderType::SirnaRna).unwrap(),
            "\"sirna_rna\""
        );
    }
}
