use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Last column of an xlsx sheet (`XFD`)
pub const MAX_COLUMN: u32 = 16_384;

/// Last row of an xlsx sheet
pub const MAX_ROW: u32 = 1_048_576;

/// Layout version for compatibility checking
pub const LAYOUT_VERSION: &str = "1.0.0";

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Failed to read layout: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse layout: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid cell reference: '{0}'")]
    InvalidReference(String),

    #[error("Invalid layout: {0}")]
    Invalid(String),
}

/// A spreadsheet column, 1-based (`A` = 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Column(pub u32);

impl Column {
    /// Parse column letters such as `H` or `AB`
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidReference` for empty, non-alphabetic or
    /// out-of-range letters.
    pub fn parse(letters: &str) -> Result<Self, LayoutError> {
        let invalid = || LayoutError::InvalidReference(letters.to_string());

        if letters.is_empty() || letters.len() > 3 {
            return Err(invalid());
        }

        let mut index = 0u32;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(invalid());
            }
            index = index * 26 + (u32::from(c.to_ascii_uppercase() as u8 - b'A') + 1);
        }

        if index > MAX_COLUMN {
            return Err(invalid());
        }
        Ok(Self(index))
    }

    #[must_use]
    pub fn letters(self) -> String {
        let mut n = self.0;
        let mut out = Vec::new();
        while n > 0 {
            let rem = (n - 1) % 26;
            #[allow(clippy::cast_possible_truncation)] // rem < 26
            let letter = (b'A' + rem as u8) as char;
            out.push(letter);
            n = (n - 1) / 26;
        }
        out.iter().rev().collect()
    }
}

impl TryFrom<String> for Column {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Column> for String {
    fn from(value: Column) -> Self {
        value.letters()
    }
}

/// A single cell, in A1 notation on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellRef {
    pub column: Column,
    /// 1-based row
    pub row: u32,
}

impl CellRef {
    /// Parse an A1-style reference such as `B5`
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidReference` if the reference has no column
    /// letters, no row number, or falls outside the sheet.
    pub fn parse(reference: &str) -> Result<Self, LayoutError> {
        let invalid = || LayoutError::InvalidReference(reference.to_string());

        let split = reference
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (letters, digits) = reference.split_at(split);

        let column = Column::parse(letters).map_err(|_| invalid())?;
        let row: u32 = digits.parse().map_err(|_| invalid())?;
        if row == 0 || row > MAX_ROW {
            return Err(invalid());
        }

        Ok(Self { column, row })
    }

    /// `(column, row)` as the spreadsheet writer expects it
    #[must_use]
    pub fn coordinates(self) -> (u32, u32) {
        (self.column.0, self.row)
    }
}

impl std::fmt::Display for CellRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.column.letters(), self.row)
    }
}

impl TryFrom<String> for CellRef {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CellRef> for String {
    fn from(value: CellRef) -> Self {
        value.to_string()
    }
}

/// Where the client header is written; shared by both templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientHeaderCells {
    pub name: CellRef,
    pub unit: CellRef,
    pub group: CellRef,
}

/// Column of each DNA primer field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimerColumns {
    pub name: Column,
    pub sequence: Column,
    pub purification: Column,
    pub od: Column,
}

/// Column of each siRNA field. The vendor's RNA form has no OD column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SirnaColumns {
    pub sense_label: Column,
    pub sense_sequence: Column,
    pub antisense_sequence: Column,
    pub purification: Column,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub od: Option<Column>,
}

/// Cell-role to coordinate table for the vendor's order templates.
///
/// Every coordinate the filler writes to comes from here, so a template
/// revision only needs a new layout file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellLayout {
    pub version: String,
    pub client_header: ClientHeaderCells,
    /// First row receiving order lines; one row per line after that
    pub first_data_row: u32,
    pub dna_primer: PrimerColumns,
    pub sirna_rna: SirnaColumns,
}

impl CellLayout {
    /// Load the layout compiled into the binary
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded JSON cannot be parsed (checked by `build.rs`).
    pub fn load_embedded() -> Result<Self, LayoutError> {
        // Embedded at compile time via build.rs
        const EMBEDDED_LAYOUT: &str = include_str!("../../layouts/default_layout.json");
        Self::from_json(EMBEDDED_LAYOUT)
    }

    /// Load a layout from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::ReadError` if the file cannot be read, or a parse
    /// or validation error for malformed content.
    pub fn load_from_file(path: &Path) -> Result<Self, LayoutError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse and validate a layout from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::ParseError` for malformed JSON or references, or
    /// `LayoutError::Invalid` if the table is inconsistent.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let layout: Self = serde_json::from_str(json)?;

        if layout.version != LAYOUT_VERSION {
            tracing::warn!(
                "Layout version mismatch: expected {}, got {}",
                LAYOUT_VERSION,
                layout.version
            );
        }

        layout.validate()?;
        Ok(layout)
    }

    /// Export as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check the table for overlapping roles
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::Invalid` describing the first conflict found.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.first_data_row == 0 || self.first_data_row > MAX_ROW {
            return Err(LayoutError::Invalid(format!(
                "first_data_row {} is outside the sheet",
                self.first_data_row
            )));
        }

        let header = [
            self.client_header.name,
            self.client_header.unit,
            self.client_header.group,
        ];
        if header.iter().collect::<HashSet<_>>().len() != header.len() {
            return Err(LayoutError::Invalid(
                "client header fields share a cell".to_string(),
            ));
        }
        if let Some(cell) = header.iter().find(|c| c.row >= self.first_data_row) {
            return Err(LayoutError::Invalid(format!(
                "client header cell {cell} is inside the data rows"
            )));
        }

        let dna = [
            self.dna_primer.name,
            self.dna_primer.sequence,
            self.dna_primer.purification,
            self.dna_primer.od,
        ];
        ensure_distinct("dna_primer", &dna)?;

        let mut rna = vec![
            self.sirna_rna.sense_label,
            self.sirna_rna.sense_sequence,
            self.sirna_rna.antisense_sequence,
            self.sirna_rna.purification,
        ];
        rna.extend(self.sirna_rna.od);
        ensure_distinct("sirna_rna", &rna)?;

        Ok(())
    }
}

fn ensure_distinct(section: &str, columns: &[Column]) -> Result<(), LayoutError> {
    let unique: HashSet<_> = columns.iter().collect();
    if unique.len() != columns.len() {
        return Err(LayoutError::Invalid(format!(
            "{section} maps two fields to the same column"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_parse() {
        assert_eq!(Column::parse("A").unwrap(), Column(1));
        assert_eq!(Column::parse("h").unwrap(), Column(8));
        assert_eq!(Column::parse("Z").unwrap(), Column(26));
        assert_eq!(Column::parse("AA").unwrap(), Column(27));
        assert_eq!(Column::parse("XFD").unwrap(), Column(MAX_COLUMN));
        assert!(Column::parse("").is_err());
        assert!(Column::parse("A1").is_err());
        assert!(Column::parse("XFE").is_err());
        assert!(Column::parse("ABCD").is_err());
    }

    #[test]
    fn test_column_letters() {
        for letters in ["A", "H", "Z", "AA", "AZ", "BA", "XFD"] {
            assert_eq!(Column::parse(letters).unwrap().letters(), letters);
        }
    }

    #[test]
    fn test_cell_ref_parse() {
        let cell = CellRef::parse("B5").unwrap();
        assert_eq!(cell.coordinates(), (2, 5));
        assert_eq!(cell.to_string(), "B5");
        assert_eq!(CellRef::parse("AA100").unwrap().coordinates(), (27, 100));

        assert!(CellRef::parse("B").is_err());
        assert!(CellRef::parse("5").is_err());
        assert!(CellRef::parse("B0").is_err());
        assert!(CellRef::parse("B5C").is_err());
    }

    #[test]
    fn test_embedded_layout_matches_vendor_forms() {
        let layout = CellLayout::load_embedded().unwrap();
        assert_eq!(layout.client_header.name.to_string(), "B5");
        assert_eq!(layout.client_header.unit.to_string(), "B6");
        assert_eq!(layout.client_header.group.to_string(), "B7");
        assert_eq!(layout.first_data_row, 20);

        assert_eq!(layout.dna_primer.name, Column(2));
        assert_eq!(layout.dna_primer.sequence, Column(3));
        assert_eq!(layout.dna_primer.purification, Column(4));
        assert_eq!(layout.dna_primer.od, Column(8));

        assert_eq!(layout.sirna_rna.sense_label, Column(1));
        assert_eq!(layout.sirna_rna.sense_sequence, Column(2));
        assert_eq!(layout.sirna_rna.antisense_sequence, Column(3));
        assert_eq!(layout.sirna_rna.purification, Column(4));
        assert_eq!(layout.sirna_rna.od, None);
    }

    #[test]
    fn test_layout_json_round_trip() {
        let layout = CellLayout::load_embedded().unwrap();
        let json = layout.to_json().unwrap();
        assert!(json.contains("\"B5\""));
        assert_eq!(CellLayout::from_json(&json).unwrap(), layout);
    }

    #[test]
    fn test_layout_rejects_duplicate_columns() {
        let layout = CellLayout::load_embedded().unwrap();
        let mut json: serde_json::Value = serde_json::from_str(&layout.to_json().unwrap()).unwrap();
        json["dna_primer"]["od"] = serde_json::json!("B");

        let err = CellLayout::from_json(&json.to_string()).unwrap_err();
        assert!(matches!(err, LayoutError::Invalid(_)));
    }

    #[test]
    fn test_layout_rejects_header_inside_data_rows() {
        let layout = CellLayout::load_embedded().unwrap();
        let mut json: serde_json::Value = serde_json::from_str(&layout.to_json().unwrap()).unwrap();
        json["client_header"]["group"] = serde_json::json!("B25");

        assert!(CellLayout::from_json(&json.to_string()).is_err());
    }

    #[test]
    fn test_layout_rejects_bad_reference() {
        let layout = CellLayout::load_embedded().unwrap();
        let mut json: serde_json::Value = serde_json::from_str(&layout.to_json().unwrap()).unwrap();
        json["client_header"]["name"] = serde_json::json!("5B");

        assert!(matches!(
            CellLayout::from_json(&json.to_string()),
            Err(LayoutError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        let layout = CellLayout::load_embedded().unwrap();
        std::fs::write(&path, layout.to_json().unwrap()).unwrap();

        assert_eq!(CellLayout::load_from_file(&path).unwrap(), layout);
        assert!(matches!(
            CellLayout::load_from_file(&dir.path().join("missing.json")),
            Err(LayoutError::ReadError(_))
        ));
    }
}
