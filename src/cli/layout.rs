use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::template::CellLayout;

#[derive(Args)]
pub struct LayoutArgs {
    /// Show this layout file instead of the built-in one (validates it)
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Write the layout JSON to a file, e.g. as a starting point for a new template
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: LayoutArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    let layout = match &args.layout {
        Some(path) => CellLayout::load_from_file(path)?,
        None => CellLayout::load_embedded()?,
    };

    if let Some(path) = &args.output {
        std::fs::write(path, layout.to_json()?)?;
        eprintln!("Wrote layout to {}", path.display());
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", layout.to_json()?),
        OutputFormat::Text => print_text_layout(&layout),
        OutputFormat::Tsv => print_tsv_layout(&layout),
    }

    Ok(())
}

fn print_text_layout(layout: &CellLayout) {
    let header = &layout.client_header;
    println!("Cell Layout (version {})", layout.version);
    println!("{}", "=".repeat(60));
    println!(
        "\nClient header: name {}, unit {}, group {}",
        header.name, header.unit, header.group
    );
    println!("Data rows start at row {}", layout.first_data_row);

    let dna = &layout.dna_primer;
    println!("\nDNA primer columns:");
    println!("  Name:         {}", dna.name.letters());
    println!("  Sequence:     {}", dna.sequence.letters());
    println!("  Purification: {}", dna.purification.letters());
    println!("  OD:           {}", dna.od.letters());

    let rna = &layout.sirna_rna;
    println!("\nsiRNA/RNA columns:");
    println!("  Label:        {}", rna.sense_label.letters());
    println!("  Sense:        {}", rna.sense_sequence.letters());
    println!("  Antisense:    {}", rna.antisense_sequence.letters());
    println!("  Purification: {}", rna.purification.letters());
    println!(
        "  OD:           {}",
        rna.od.map_or_else(|| "-".to_string(), |c| c.letters())
    );
}

fn print_tsv_layout(layout: &CellLayout) {
    let header = &layout.client_header;
    let dna = &layout.dna_primer;
    let rna = &layout.sirna_rna;

    println!("section\trole\tcell");
    println!("client_header\tname\t{}", header.name);
    println!("client_header\tunit\t{}", header.unit);
    println!("client_header\tgroup\t{}", header.group);
    println!("data\tfirst_row\t{}", layout.first_data_row);
    println!("dna_primer\tname\t{}", dna.name.letters());
    println!("dna_primer\tsequence\t{}", dna.sequence.letters());
    println!("dna_primer\tpurification\t{}", dna.purification.letters());
    println!("dna_primer\tod\t{}", dna.od.letters());
    println!("sirna_rna\tsense_label\t{}", rna.sense_label.letters());
    println!("sirna_rna\tsense_sequence\t{}", rna.sense_sequence.letters());
    println!(
        "sirna_rna\tantisense_sequence\t{}",
        rna.antisense_sequence.letters()
    );
    println!("sirna_rna\tpurification\t{}", rna.purification.letters());
    if let Some(od) = rna.od {
        println!("sirna_rna\tod\t{}", od.letters());
    }
}
