use std::path::PathBuf;

use clap::Args;

use crate::cli::{OutputFormat, TemplateArgs};
use crate::core::session::Session;
use crate::core::types::{ClientInfo, OrderType};
use crate::order::{generate, OrderError};
use crate::parsing::input::read_input;
use crate::utils::validation::validate_client_field;

#[derive(Args)]
pub struct FillArgs {
    /// File containing the pasted request. Use '-' for stdin
    #[arg(required = true)]
    pub input: PathBuf,

    /// Kind of order the request describes
    #[arg(short = 't', long, value_enum, default_value = "dna")]
    pub order_type: OrderType,

    /// Client name (also used in the output file name)
    #[arg(long, default_value = "")]
    pub name: String,

    /// Client institution
    #[arg(long, default_value = "")]
    pub unit: String,

    /// Client research group
    #[arg(long, default_value = "")]
    pub group: String,

    /// Where to write the order form (default: vendor file name in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub templates: TemplateArgs,
}

pub fn run(args: FillArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    validate_client_field("name", &args.name)?;
    validate_client_field("unit", &args.unit)?;
    validate_client_field("group", &args.group)?;

    let text = read_input(&args.input)?;
    let layout = args.templates.cell_layout()?;
    let templates = args.templates.template_store();

    if verbose {
        eprintln!(
            "Using {} template {}",
            args.order_type,
            templates.path_for(args.order_type).display()
        );
    }

    let session = Session::with_request(
        ClientInfo::new(args.name, args.unit, args.group),
        args.order_type,
        text,
    );

    let order = match generate(&session, &templates, &layout) {
        Ok(order) => order,
        Err(err @ OrderError::NoMatchesFound) => {
            eprintln!("Warning: {err}");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&order.filename));
    std::fs::write(&output, &order.content)?;
    tracing::info!("Wrote {} bytes to {}", order.content.len(), output.display());

    match format {
        OutputFormat::Text => {
            super::parse::print_text_rows(&order.rows, order.order_type);
            println!("\nWrote {}", output.display());
        }
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "output": output.display().to_string(),
                "order_type": order.order_type,
                "row_count": order.rows.len(),
                "rows": order.rows,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Tsv => {
            println!("output\torder_type\trow_count");
            println!(
                "{}\t{}\t{}",
                output.display(),
                order.order_type.as_str(),
                order.rows.len()
            );
        }
    }

    Ok(())
}
