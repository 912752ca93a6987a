//! Shared helpers: input limits and download naming.

pub mod validation;
