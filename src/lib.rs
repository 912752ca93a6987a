//! # oligo-order
//!
//! A library for turning free-text oligo order requests into the vendor's
//! spreadsheet order form.
//!
//! Customers send primer and siRNA requests in whatever shape is handy: a
//! chat message, an e-mail signature followed by a list, a table pasted from
//! a document. `oligo-order` picks the sequences out of that text, derives
//! what the vendor needs (antisense strands for siRNA), and fills the vendor's
//! xlsx template at the right cells.
//!
//! ## Features
//!
//! - **Primer recognition**: `name: SEQUENCE` pairs over A/C/G/T, any case
//! - **siRNA recognition**: sense strands over A/U/C/G, optionally labelled
//!   `Sense` or `正义链`; fragments of ten bases or fewer are ignored
//! - **Strand derivation**: reverse-complement antisense, `dTdT` overhangs,
//!   unknown bases marked `N`
//! - **Template filling**: every coordinate comes from a configurable cell layout
//!
//! ## Example
//!
//! ```rust,no_run
//! use oligo_order::core::session::Session;
//! use oligo_order::core::types::{ClientInfo, OrderType};
//! use oligo_order::order::generate;
//! use oligo_order::template::{CellLayout, TemplateStore};
//!
//! let session = Session::with_request(
//!     ClientInfo::new("张三", "华东理工", "李老师"),
//!     OrderType::DnaPrimer,
//!     "F: ATCGATCG\nR: GGCCTTAA",
//! );
//! let templates = TemplateStore::in_dir("templates");
//! let layout = CellLayout::load_embedded().unwrap();
//!
//! let order = generate(&session, &templates, &layout).unwrap();
//! std::fs::write(&order.filename, &order.content).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Order types, rows, sessions and strand derivation
//! - [`parsing`]: Sequence recognition in pasted text
//! - [`order`]: Row building and the end-to-end pipeline
//! - [`template`]: Cell layout and xlsx template filling
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: Web server for browser-based use

pub mod cli;
pub mod core;
pub mod order;
pub mod parsing;
pub mod template;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use core::order::{OrderRow, PrimerRow, RawMatch, SirnaRow};
pub use core::rna::transform;
pub use core::session::Session;
pub use core::types::*;
pub use order::{build_rows, generate, preview, GeneratedOrder, OrderError};
pub use parsing::parse;
pub use template::{CellLayout, TemplateStore};
