use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::order::OrderRow;
use crate::core::types::OrderType;
use crate::order::preview;
use crate::parsing::input::read_input;

#[derive(Args)]
pub struct ParseArgs {
    /// File containing the pasted request. Use '-' for stdin
    #[arg(required = true)]
    pub input: PathBuf,

    /// Kind of order the request describes
    #[arg(short = 't', long, value_enum, default_value = "dna")]
    pub order_type: OrderType,
}

pub fn run(args: ParseArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let text = read_input(&args.input)?;

    if verbose {
        eprintln!(
            "Read {} bytes from {}",
            text.len(),
            args.input.display()
        );
    }

    let rows = preview(&text, args.order_type);

    if rows.is_empty() {
        eprintln!("Warning: no valid sequences recognized; check the input format.");
        return Ok(());
    }

    match format {
        OutputFormat::Text => print_text_rows(&rows, args.order_type),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Tsv => print_tsv_rows(&rows, args.order_type),
    }

    Ok(())
}

pub(crate) fn print_text_rows(rows: &[OrderRow], order_type: OrderType) {
    println!("{} rows for a {} order", rows.len(), order_type);
    println!("{}", "=".repeat(60));

    for (i, row) in rows.iter().enumerate() {
        match row {
            OrderRow::Primer(p) => {
                println!(
                    "\n#{} {}\n  Sequence:     {}\n  Purification: {}\n  OD:           {}",
                    i + 1,
                    p.name,
                    p.sequence,
                    p.purification,
                    p.od
                );
            }
            OrderRow::Sirna(s) => {
                println!(
                    "\n#{} {}\n  Sense:        {}\n  Antisense:    {}\n  Purification: {}\n  OD:           {}",
                    i + 1,
                    s.sense_label,
                    s.sense_sequence,
                    s.antisense_sequence,
                    s.purification,
                    s.od
                );
            }
        }
    }
}

fn print_tsv_rows(rows: &[OrderRow], order_type: OrderType) {
    match order_type {
        OrderType::DnaPrimer => println!("name\tsequence\tpurification\tod"),
        OrderType::SirnaRna => {
            println!("name\tsense\tantisense\tpurification\tod");
        }
    }

    for row in rows {
        match row {
            OrderRow::Primer(p) => {
                println!("{}\t{}\t{}\t{}", p.name, p.sequence, p.purification, p.od);
            }
            OrderRow::Sirna(s) => println!(
                "{}\t{}\t{}\t{}\t{}",
                s.sense_label, s.sense_sequence, s.antisense_sequence, s.purification, s.od
            ),
        }
    }
}
