//! From recognized sequences to a finished order form.
//!
//! - [`builder`]: turns raw matches into order rows with the vendor's fixed
//!   purification and quantity
//! - [`pipeline`]: runs parse → build → fill → serialize for one request

pub mod builder;
pub mod pipeline;

pub use builder::build_rows;
pub use pipeline::{generate, preview, GeneratedOrder, OrderError};
