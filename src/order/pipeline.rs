use std::path::PathBuf;
use thiserror::Error;

use crate::core::order::OrderRow;
use crate::core::session::Session;
use crate::core::types::OrderType;
use crate::order::builder::build_rows;
use crate::parsing::parse;
use crate::template::{
    serialize, write_client_header, write_rows, CellLayout, TemplateError, TemplateStore,
};
use crate::utils::validation::download_filename;

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("No sequences recognized; check the format of the pasted text")]
    NoMatchesFound,

    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("Failed to fill order form: {0}")]
    Fill(String),
}

impl OrderError {
    /// Whether this should be shown to the operator as a warning rather than an error
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::NoMatchesFound)
    }
}

impl From<TemplateError> for OrderError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::NotFound(path) => Self::TemplateNotFound(path),
            other => Self::Fill(other.to_string()),
        }
    }
}

/// A filled order form ready for download
#[derive(Debug, Clone)]
pub struct GeneratedOrder {
    pub order_type: OrderType,
    pub rows: Vec<OrderRow>,
    /// xlsx bytes
    pub content: Vec<u8>,
    pub filename: String,
}

/// Recognize and build rows without touching any template
#[must_use]
pub fn preview(text: &str, order_type: OrderType) -> Vec<OrderRow> {
    build_rows(&parse(text, order_type), order_type)
}

/// Run the full request: parse, build rows, fill the template and serialize it.
///
/// Nothing is loaded or written when no rows are recognized.
///
/// # Errors
///
/// Returns `OrderError::NoMatchesFound` if the text holds no usable sequence,
/// `OrderError::TemplateNotFound` if the template for the session's order type
/// is missing, or `OrderError::Fill` for any other template failure.
pub fn generate(
    session: &Session,
    templates: &TemplateStore,
    layout: &CellLayout,
) -> Result<GeneratedOrder, OrderError> {
    let order_type = session.order_type;
    let rows = preview(&session.text, order_type);

    if rows.is_empty() {
        tracing::warn!("No {} sequences recognized", order_type);
        return Err(OrderError::NoMatchesFound);
    }

    tracing::info!("Recognized {} {} rows", rows.len(), order_type);

    let mut book = templates.load_template(order_type)?;
    write_client_header(&mut book, &session.client, layout);
    write_rows(&mut book, &rows, order_type, layout)?;
    let content = serialize(&book)?;

    Ok(GeneratedOrder {
        order_type,
        rows,
        content,
        filename: download_filename(&session.client.name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ClientInfo;
    use crate::template::filler::tests::write_blank_template;
    use crate::template::filler::{DNA_TEMPLATE_FILE, RNA_TEMPLATE_FILE};

    fn layout() -> CellLayout {
        CellLayout::load_embedded().unwrap()
    }

    #[test]
    fn test_generate_primer_order() {
        let dir = tempfile::tempdir().unwrap();
        write_blank_template(&dir.path().join(DNA_TEMPLATE_FILE));

        let session = Session::with_request(
            ClientInfo::new("张三", "华东理工", "李老师"),
            OrderType::DnaPrimer,
            "F: ATCGATCG\nR: GGCCTTAA",
        );
        let order = generate(&session, &TemplateStore::in_dir(dir.path()), &layout()).unwrap();

        assert_eq!(order.rows.len(), 2);
        assert_eq!(order.filename, "百力格订购表_张三.xlsx");
        assert!(order.content.starts_with(b"PK"));
    }

    #[test]
    fn test_generate_no_matches_skips_template() {
        // The directory has no templates; a missing-template error would mean we tried to load one
        let dir = tempfile::tempdir().unwrap();
        let session = Session::with_request(ClientInfo::default(), OrderType::SirnaRna, "");

        let err = generate(&session, &TemplateStore::in_dir(dir.path()), &layout()).unwrap_err();
        assert!(matches!(err, OrderError::NoMatchesFound));
        assert!(err.is_warning());
    }

    #[test]
    fn test_generate_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        write_blank_template(&dir.path().join(DNA_TEMPLATE_FILE));

        let session = Session::with_request(
            ClientInfo::default(),
            OrderType::SirnaRna,
            "Sense: GCUAGCUAGCUAGCU",
        );
        let err = generate(&session, &TemplateStore::in_dir(dir.path()), &layout()).unwrap_err();
        match err {
            OrderError::TemplateNotFound(path) => assert!(path.ends_with(RNA_TEMPLATE_FILE)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_template_is_fill_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DNA_TEMPLATE_FILE), b"PK\x03\x04 not really a zip").unwrap();

        let session = Session::with_request(ClientInfo::default(), OrderType::DnaPrimer, "F: ACGT");
        let err = generate(&session, &TemplateStore::in_dir(dir.path()), &layout()).unwrap_err();
        assert!(matches!(err, OrderError::Fill(_)));
        assert!(!err.is_warning());
    }

    #[test]
    fn test_preview_does_not_need_templates() {
        let rows = preview("Sense: GCUAGCUAGCUAGCU", OrderType::SirnaRna);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label(), "siRNA-S");
    }
}
