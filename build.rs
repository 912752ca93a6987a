use std::path::Path;

fn main() {
    let layout_path = Path::new("layouts/default_layout.json");
    validate_layout_file(layout_path);
    set_build_dependencies();
}

fn validate_layout_file(layout_path: &Path) {
    // Ensure layout exists at build time
    assert!(
        layout_path.exists(),
        "\n\nLAYOUT BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the layout file before building.\n",
        layout_path.display()
    );

    let layout_contents = std::fs::read_to_string(layout_path).unwrap_or_else(|e| {
        panic!(
            "\n\nLAYOUT BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            layout_path.display()
        );
    });

    let layout: serde_json::Value = serde_json::from_str(&layout_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nLAYOUT BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            layout_path.display()
        );
    });

    validate_layout_structure(&layout);
}

fn validate_layout_structure(layout: &serde_json::Value) {
    assert!(
        layout.is_object(),
        "\n\nLAYOUT BUILD ERROR: Root must be a JSON object\n\
         Got: {layout}\n"
    );

    let header = section(layout, "client_header");
    for field in ["name", "unit", "group"] {
        let cell = string_field(header, "client_header", field);
        assert!(
            is_cell_reference(cell),
            "\n\nLAYOUT BUILD ERROR: client_header.{field} is not an A1 reference\n\
             Got: {cell}\n"
        );
    }

    let first_row = layout
        .get("first_data_row")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(0);
    assert!(
        first_row > 0,
        "\n\nLAYOUT BUILD ERROR: 'first_data_row' must be a positive integer\n"
    );

    let dna = section(layout, "dna_primer");
    validate_columns(dna, "dna_primer", &["name", "sequence", "purification", "od"]);

    let rna = section(layout, "sirna_rna");
    validate_columns(
        rna,
        "sirna_rna",
        &[
            "sense_label",
            "sense_sequence",
            "antisense_sequence",
            "purification",
        ],
    );

    println!("cargo:warning=Validated layout: data rows start at {first_row}");
}

fn section<'a>(layout: &'a serde_json::Value, name: &str) -> &'a serde_json::Value {
    layout.get(name).unwrap_or_else(|| {
        panic!(
            "\n\nLAYOUT BUILD ERROR: Missing '{name}' section\n\
             The layout must have a top-level '{name}' object.\n"
        );
    })
}

fn string_field<'a>(section: &'a serde_json::Value, section_name: &str, field: &str) -> &'a str {
    section
        .get(field)
        .and_then(serde_json::Value::as_str)
        .unwrap_or_else(|| {
            panic!("\n\nLAYOUT BUILD ERROR: {section_name}.{field} missing or not a string\n");
        })
}

fn validate_columns(section: &serde_json::Value, section_name: &str, fields: &[&str]) {
    for field in fields {
        let column = string_field(section, section_name, field);
        assert!(
            !column.is_empty() && column.chars().all(|c| c.is_ascii_uppercase()),
            "\n\nLAYOUT BUILD ERROR: {section_name}.{field} must be column letters\n\
             Got: {column}\n"
        );
    }
}

fn is_cell_reference(cell: &str) -> bool {
    let letters = cell.chars().take_while(char::is_ascii_uppercase).count();
    let digits = &cell[letters..];
    letters > 0 && !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn set_build_dependencies() {
    // Tell cargo to rerun if layout changes
    println!("cargo:rerun-if-changed=layouts/default_layout.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
