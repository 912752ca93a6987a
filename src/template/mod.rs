//! Filling the vendor's xlsx order templates.
//!
//! The vendor supplies one template per order type. Filling one is four steps:
//!
//! 1. [`TemplateStore::load_template`] reads a fresh copy of the template
//! 2. [`write_client_header`] writes client name, unit and group
//! 3. [`write_rows`] writes one sheet row per order row
//! 4. [`serialize`] produces the bytes offered for download
//!
//! Every coordinate comes from a [`CellLayout`]; the embedded default matches
//! the current vendor forms:
//!
//! | Role | DNA primer | siRNA/RNA |
//! |------|------------|-----------|
//! | Client name / unit / group | B5 / B6 / B7 | B5 / B6 / B7 |
//! | First data row | 20 | 20 |
//! | Label | B | A |
//! | Sequence | C | B (sense), C (antisense) |
//! | Purification | D | D |
//! | OD | H | - |

pub mod filler;
pub mod layout;

pub use filler::{serialize, write_client_header, write_rows, TemplateError, TemplateStore};
pub use layout::{CellLayout, LayoutError};
