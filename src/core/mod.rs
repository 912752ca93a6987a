//! Core data types for order-form generation.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`OrderType`](types::OrderType): Which kind of order a request describes (DNA primer or siRNA/RNA)
//! - [`ClientInfo`](types::ClientInfo): Free-text client metadata copied into the form header
//! - [`RawMatch`](order::RawMatch): A `(label, sequence)` pair found in pasted text
//! - [`OrderRow`](order::OrderRow): One line of the finished order form
//! - [`Session`](session::Session): Per-operator state carried through a request
//!
//! ## Row Schemas
//!
//! | Order type | Label | Sequence(s) | Purification | OD |
//! |------------|-------|-------------|--------------|----|
//! | DNA primer | user-supplied name | uppercase DNA | PAGE | 2 |
//! | siRNA/RNA  | `siRNA-S` | sense + antisense, `dTdT` tailed | HPLC | 2 |

pub mod order;
pub mod rna;
pub mod session;
pub mod types;
