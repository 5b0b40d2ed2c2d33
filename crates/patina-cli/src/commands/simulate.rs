use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tracing::info;

use patina_core::Effect;
use patina_core::grid::block_census;
use patina_fluids::GeneratorRegistry;
use patina_sim::{FluidGrowthSystem, Scenario, SimEventKind, WeatheringSystem};

/// Command-line values that replace scenario settings.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub ticks: Option<u64>,
    pub seed: Option<u64>,
}

/// How to report a finished run.
#[derive(Debug, Default, Clone)]
pub struct Output {
    pub verbose: bool,
    pub json: bool,
    /// Write the final world layout here.
    pub save: Option<PathBuf>,
}

pub fn run(path: &Path, overrides: Overrides, output: Output) -> Result<(), String> {
    let source = super::read_file(path)?;
    let mut scenario = Scenario::from_json(&source).map_err(|e| e.to_string())?;
    if let Some(ticks) = overrides.ticks {
        scenario.ticks = ticks;
    }
    if let Some(seed) = overrides.seed {
        scenario.config.seed = seed;
    }
    if scenario.name.is_empty() {
        scenario.name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "scenario".to_string());
    }

    let registry = GeneratorRegistry::with_builtins();
    let (catalog, rejected) = scenario.decode_generators(&registry);
    for skipped in &rejected {
        eprintln!(
            "{} skipped generator #{}: {}",
            "warning:".yellow().bold(),
            skipped.index,
            skipped.error
        );
    }
    info!(
        path = %path.display(),
        ticks = scenario.ticks,
        seed = scenario.config.seed,
        generators = catalog.len(),
        "running scenario"
    );
    let sim = scenario
        .run(catalog)
        .map_err(|e| format!("simulation failed: {e}"))?;

    if let Some(save) = &output.save {
        let layout = serde_json::to_string_pretty(&sim.world().to_layout())
            .map_err(|e| format!("cannot encode world: {e}"))?;
        fs::write(save, layout).map_err(|e| format!("cannot write {}: {e}", save.display()))?;
        info!(path = %save.display(), "saved final world");
    }

    if output.json {
        let out = serde_json::to_string_pretty(sim.events().events())
            .map_err(|e| format!("cannot encode events: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    // Header
    println!(
        "  {} '{}' {}",
        "Simulation".bold(),
        scenario.name,
        format!("({} ticks, seed={})", scenario.ticks, scenario.config.seed).dimmed()
    );
    let advances = sim.get_system::<WeatheringSystem>().map_or(0, |s| s.advances());
    let spawned = sim.get_system::<FluidGrowthSystem>().map_or(0, |s| s.spawned());
    println!(
        "  {} events logged, {advances} level advances, {spawned} fluid cells spawned",
        sim.events().len()
    );
    println!(
        "  Final tick: {} (day {}, raining: {})",
        sim.current_tick(),
        sim.clock().day(),
        if sim.world().is_raining() { "yes" } else { "no" }
    );
    println!();

    if output.verbose {
        println!("  {}", "Event Log".bold().underline());
        println!();
        for event in sim.events().events() {
            let tick_label = format!("[tick {:>4}]", event.tick).dimmed();
            let desc = colorize_event(&event.kind, &event.description);
            println!("  {tick_label} {desc}");
        }
        if sim.events().is_empty() {
            println!("  {}", "(no events)".dimmed());
        }
        println!();
    }

    let counts = sim.events().counts();
    if !counts.is_empty() {
        println!("  {}", "Event Summary".bold().underline());
        println!();
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Event", "Count"]);
        for (label, count) in counts {
            table.add_row(vec![label.to_string(), count.to_string()]);
        }
        println!("{table}");
        println!();
    }

    print_effects(sim.world().effects(), output.verbose);

    println!("  {}", "Final World".bold().underline());
    println!();
    let census = block_census(sim.world());
    if census.is_empty() {
        println!("  {}", "(empty world)".dimmed());
    } else {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Block", "Cells"]);
        for (name, count) in census {
            table.add_row(vec![name, count.to_string()]);
        }
        println!("{table}");
    }
    println!();

    Ok(())
}

fn print_effects(effects: &[Effect], verbose: bool) {
    if effects.is_empty() {
        return;
    }
    println!("  {}", "Effects".bold().underline());
    println!();
    if verbose {
        for effect in effects {
            let line = match effect {
                Effect::Sound { sound, .. } => format!("sound {sound} (id {})", sound.event_id()),
                Effect::Event { event, .. } => format!("event {event}"),
            };
            println!("  {} {line}", format!("[{}]", effect.pos()).dimmed());
        }
        println!();
    }

    let mut rows: Vec<(String, String, usize)> = Vec::new();
    for effect in effects {
        let (name, id) = match effect {
            Effect::Sound { sound, .. } => (sound.to_string(), sound.event_id().to_string()),
            Effect::Event { event, .. } => (event.to_string(), "-".to_string()),
        };
        match rows.iter_mut().find(|(n, _, _)| *n == name) {
            Some((_, _, count)) => *count += 1,
            None => rows.push((name, id, 1)),
        }
    }
    rows.sort();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Effect", "Id", "Count"]);
    for (name, id, count) in rows {
        table.add_row(vec![name, id, count.to_string()]);
    }
    println!("{table}");
    println!();
}

fn colorize_event(kind: &SimEventKind, description: &str) -> colored::ColoredString {
    match kind {
        SimEventKind::LevelAdvanced { .. } => description.yellow(),
        SimEventKind::DoorToggled { .. } => description.cyan().bold(),
        SimEventKind::DoorPowered { .. } | SimEventKind::DoorScheduled { .. } => {
            description.cyan()
        }
        SimEventKind::FluidGenerated { .. } => description.blue(),
        SimEventKind::SignalChanged { .. } | SimEventKind::WeatherChanged { .. } => {
            description.normal()
        }
    }
}
