//! Extraction of named sequences from free-text order requests.
//!
//! Salespeople paste whatever the customer sent: e-mail fragments, chat
//! messages, tables copied from a document. The parsers here scan that text
//! with one pattern per order type and return every candidate in order of
//! appearance. They never fail; text without candidates yields an empty list.
//!
//! ## Example
//!
//! ```rust
//! use oligo_order::core::types::OrderType;
//! use oligo_order::parsing::parse;
//!
//! let matches = parse("F: ATCGATCG\nR: GGCCTTAA", OrderType::DnaPrimer);
//! assert_eq!(matches.len(), 2);
//! assert_eq!(matches[0].label.as_deref(), Some("F"));
//! ```
//!
//! ## Rules
//!
//! | Order type | Pattern | Kept |
//! |------------|---------|------|
//! | DNA primer | `name` `:`/whitespace `ACGT…` | all, sequence uppercased |
//! | siRNA/RNA  | optional `Sense`/`正义链`, optional `:`/whitespace, `ACGU…` | longer than 10 bases |

pub mod input;
pub mod primer;
pub mod sirna;

use crate::core::order::RawMatch;
use crate::core::types::OrderType;

/// Extract candidate sequences for the given order type.
#[must_use]
pub fn parse(text: &str, order_type: OrderType) -> Vec<RawMatch> {
    match order_type {
        OrderType::DnaPrimer => primer::parse_primers(text),
        OrderType::SirnaRna => sirna::parse_sirna(text),
    }
}
