//! Command-line interface for oligo-order.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **parse**: Show which sequences would be ordered from a pasted request
//! - **fill**: Write a filled order form to disk
//! - **layout**: Print the cell layout used to fill templates
//! - **serve**: Start the interactive web interface
//!
//! ## Usage
//!
//! ```text
//! # Preview primers from a saved e-mail
//! oligo-order parse request.txt --order-type dna
//!
//! # Pipe from the clipboard, JSON output for scripting
//! pbpaste | oligo-order parse - --order-type rna --format json
//!
//! # Fill the siRNA template for a client
//! oligo-order fill request.txt -t rna --name 张三 --unit 华东理工 --group 李老师
//!
//! # Start web UI behind a shared password
//! OLIGO_ORDER_PASSWORD=secret oligo-order serve --port 8080 --open
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::template::{CellLayout, LayoutError, TemplateStore};

pub mod fill;
pub mod layout;
pub mod parse;

#[derive(Parser)]
#[command(name = "oligo-order")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Turn pasted primer and siRNA requests into a filled vendor order form")]
#[command(
    long_about = "oligo-order reads free-text order requests as customers send them, recognizes DNA primer or siRNA sequences, and fills the vendor's xlsx order template.\n\nFor siRNA orders the antisense strand is derived automatically and both strands get the dTdT overhang."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recognize sequences in a request and print the order rows
    Parse(parse::ParseArgs),

    /// Fill the order template and write it to disk
    Fill(fill::FillArgs),

    /// Print the cell layout used to fill templates
    Layout(layout::LayoutArgs),

    /// Start the web server
    Serve(ServeArgs),
}

/// Where templates and their cell layout come from
#[derive(clap::Args, Clone, Debug)]
pub struct TemplateArgs {
    /// Directory holding template_dna.xlsx and template_rna.xlsx
    #[arg(long, default_value = ".")]
    pub template_dir: PathBuf,

    /// DNA primer template (overrides --template-dir)
    #[arg(long)]
    pub dna_template: Option<PathBuf>,

    /// siRNA/RNA template (overrides --template-dir)
    #[arg(long)]
    pub rna_template: Option<PathBuf>,

    /// Custom cell layout JSON (see `oligo-order layout`)
    #[arg(long)]
    pub layout: Option<PathBuf>,
}

impl TemplateArgs {
    #[must_use]
    pub fn template_store(&self) -> TemplateStore {
        let mut store = TemplateStore::in_dir(&self.template_dir);
        if let Some(path) = &self.dna_template {
            store = store.with_dna_template(path);
        }
        if let Some(path) = &self.rna_template {
            store = store.with_rna_template(path);
        }
        store
    }

    /// # Errors
    ///
    /// Returns an error if a custom layout file cannot be loaded.
    pub fn cell_layout(&self) -> Result<CellLayout, LayoutError> {
        match &self.layout {
            Some(path) => CellLayout::load_from_file(path),
            None => CellLayout::load_embedded(),
        }
    }
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,

    /// Shared password required before using the form (no gate when unset)
    #[arg(long, env = "OLIGO_ORDER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Minutes of inactivity before a session is dropped
    #[arg(long, default_value = "480", value_parser = clap::value_parser!(u64).range(1..))]
    pub session_ttl_mins: u64,

    #[command(flatten)]
    pub templates: TemplateArgs,
}

impl ServeArgs {
    /// Idle timeout for web sessions
    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_mins.saturating_mul(60))
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
