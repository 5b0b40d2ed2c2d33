use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use patina_fluids::GeneratorRegistry;

pub fn run() -> Result<(), String> {
    let registry = GeneratorRegistry::with_builtins();

    println!(
        "  {} ({} kinds)",
        "Fluid Generators".bold().underline(),
        registry.len()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Type", "Description"]);
    for kind in registry.types() {
        table.add_row(vec![kind.name(), kind.summary()]);
    }
    println!("{table}");

    Ok(())
}
