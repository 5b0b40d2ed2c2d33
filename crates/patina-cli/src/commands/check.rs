use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tracing::info;

use patina_fluids::GeneratorRegistry;

pub fn run(path: &Path) -> Result<(), String> {
    let source = super::read_file(path)?;
    let registry = GeneratorRegistry::with_builtins();
    let (catalog, rejected) = registry
        .load_catalog(&source)
        .map_err(|e| format!("{}: {e}", path.display()))?;
    info!(
        path = %path.display(),
        loaded = catalog.len(),
        rejected = rejected.len(),
        "checked generators"
    );

    if !rejected.is_empty() {
        for record in &rejected {
            eprintln!(
                "  {} record #{}: {}",
                "FAIL".red().bold(),
                record.index,
                record.error
            );
        }
        return Err(format!(
            "{}: {} of {} generator records rejected",
            path.display(),
            rejected.len(),
            rejected.len() + catalog.len()
        ));
    }

    println!(
        "  {} {} generators for {} fluids",
        "OK".green().bold(),
        catalog.len(),
        catalog.fluids().count()
    );
    if catalog.is_empty() {
        return Ok(());
    }
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Fluid", "Type", "Priority"]);
    for fluid in catalog.fluids() {
        for generator in catalog.for_fluid(fluid) {
            table.add_row(vec![
                fluid.to_string(),
                generator.type_name().to_string(),
                generator.priority().to_string(),
            ]);
        }
    }
    println!("{table}");

    Ok(())
}
