//! Web server for browser-based order-form generation.
//!
//! This module provides the salesperson-facing form using Axum: paste the
//! customer's request, check the recognized rows, download the filled
//! template.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080 with templates from the current directory
//! oligo-order serve
//!
//! # Custom port, shared password, auto-open browser
//! oligo-order serve --port 3000 --password secret --open
//!
//! # Bind to all interfaces with templates elsewhere
//! oligo-order serve --address 0.0.0.0 --template-dir /srv/order-templates
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /` - Main page with the order form
//! - `GET /api/session` - Session state (`authenticated`, `gate_enabled`)
//! - `POST /api/login` - Check the access password (multipart `password`)
//! - `POST /api/logout` - End the session
//! - `POST /api/preview` - Recognized rows as JSON (multipart form)
//! - `POST /api/generate` - Filled order form as an xlsx attachment

pub mod server;
pub mod session_store;
