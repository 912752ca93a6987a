use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;
use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::core::order::OrderRow;
use crate::core::types::{ClientInfo, OrderType};
use crate::template::layout::{CellLayout, MAX_ROW};
use crate::utils::validation::{is_xlsx_content, ValidationError};

/// Default file name of the DNA primer template
pub const DNA_TEMPLATE_FILE: &str = "template_dna.xlsx";

/// Default file name of the siRNA/RNA template
pub const RNA_TEMPLATE_FILE: &str = "template_rna.xlsx";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read template {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("Cannot write {row_type} rows into a {order_type} template")]
    RowTypeMismatch {
        row_type: OrderType,
        order_type: OrderType,
    },

    #[error("Too many rows: {0} would run past the last sheet row")]
    TooManyRows(usize),

    #[error("Failed to write workbook: {0}")]
    Write(String),
}

/// Locations of the vendor's order templates, one per order type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateStore {
    pub dna_primer: PathBuf,
    pub sirna_rna: PathBuf,
}

impl TemplateStore {
    /// Expect `template_dna.xlsx` and `template_rna.xlsx` inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            dna_primer: dir.join(DNA_TEMPLATE_FILE),
            sirna_rna: dir.join(RNA_TEMPLATE_FILE),
        }
    }

    #[must_use]
    pub fn with_dna_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.dna_primer = path.into();
        self
    }

    #[must_use]
    pub fn with_rna_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.sirna_rna = path.into();
        self
    }

    #[must_use]
    pub fn path_for(&self, order_type: OrderType) -> &Path {
        match order_type {
            OrderType::DnaPrimer => &self.dna_primer,
            OrderType::SirnaRna => &self.sirna_rna,
        }
    }

    /// Load a fresh copy of the template for an order type.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::NotFound` if the backing file is absent, or
    /// `TemplateError::Read` if it is not a readable xlsx workbook.
    pub fn load_template(&self, order_type: OrderType) -> Result<Spreadsheet, TemplateError> {
        let path = self.path_for(order_type);
        if !path.is_file() {
            return Err(TemplateError::NotFound(path.to_path_buf()));
        }

        let read_error = |message: String| TemplateError::Read {
            path: path.to_path_buf(),
            message,
        };

        let bytes = std::fs::read(path).map_err(|e| read_error(e.to_string()))?;
        if !is_xlsx_content(&bytes) {
            return Err(read_error(ValidationError::NotAWorkbook.to_string()));
        }

        let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true)
            .map_err(|e| read_error(e.to_string()))?;

        tracing::debug!("Loaded {} template from {}", order_type, path.display());
        Ok(book)
    }
}

/// Write client name, unit and group into the header cells of the active sheet
pub fn write_client_header(book: &mut Spreadsheet, client: &ClientInfo, layout: &CellLayout) {
    let sheet = book.get_active_sheet_mut();
    let header = &layout.client_header;

    set_text(sheet, header.name.coordinates(), &client.name);
    set_text(sheet, header.unit.coordinates(), &client.unit);
    set_text(sheet, header.group.coordinates(), &client.group);
}

/// Write order rows into the active sheet, one sheet row per order row,
/// starting at the layout's first data row.
///
/// # Errors
///
/// Returns `TemplateError::RowTypeMismatch` if a row does not belong to
/// `order_type`, or `TemplateError::TooManyRows` if the rows would not fit.
pub fn write_rows(
    book: &mut Spreadsheet,
    rows: &[OrderRow],
    order_type: OrderType,
    layout: &CellLayout,
) -> Result<(), TemplateError> {
    let last_row = u64::from(layout.first_data_row) + rows.len() as u64;
    if last_row > u64::from(MAX_ROW) + 1 {
        return Err(TemplateError::TooManyRows(rows.len()));
    }

    let sheet = book.get_active_sheet_mut();

    for (row_num, row) in (layout.first_data_row..).zip(rows) {
        match (row, order_type) {
            (OrderRow::Primer(primer), OrderType::DnaPrimer) => {
                let cols = &layout.dna_primer;
                set_text(sheet, (cols.name.0, row_num), &primer.name);
                set_text(sheet, (cols.sequence.0, row_num), &primer.sequence);
                set_text(sheet, (cols.purification.0, row_num), &primer.purification);
                sheet
                    .get_cell_mut((cols.od.0, row_num))
                    .set_value_number(primer.od);
            }
            (OrderRow::Sirna(sirna), OrderType::SirnaRna) => {
                let cols = &layout.sirna_rna;
                set_text(sheet, (cols.sense_label.0, row_num), &sirna.sense_label);
                set_text(sheet, (cols.sense_sequence.0, row_num), &sirna.sense_sequence);
                set_text(
                    sheet,
                    (cols.antisense_sequence.0, row_num),
                    &sirna.antisense_sequence,
                );
                set_text(sheet, (cols.purification.0, row_num), &sirna.purification);
                if let Some(od) = cols.od {
                    sheet.get_cell_mut((od.0, row_num)).set_value_number(sirna.od);
                }
            }
            _ => {
                return Err(TemplateError::RowTypeMismatch {
                    row_type: row.order_type(),
                    order_type,
                });
            }
        }
    }

    tracing::debug!(
        "Wrote {} {} rows starting at row {}",
        rows.len(),
        order_type,
        layout.first_data_row
    );
    Ok(())
}

/// Serialize the workbook to xlsx bytes.
///
/// # Errors
///
/// Returns `TemplateError::Write` if the writer fails.
pub fn serialize(book: &Spreadsheet) -> Result<Vec<u8>, TemplateError> {
    let mut cursor = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(book, &mut cursor)
        .map_err(|e| TemplateError::Write(e.to_string()))?;
    Ok(cursor.into_inner())
}

/// Always a text cell, so names like `1` or `TRUE` stay as typed
fn set_text(sheet: &mut Worksheet, coordinates: (u32, u32), value: &str) {
    sheet.get_cell_mut(coordinates).set_value_string(value);
}
