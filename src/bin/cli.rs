//! fieldtrace CLI - Demo and debug tool for the field sampling core
//!
//! Usage:
//!   fieldtrace-cli simulate [--seed <n>] [--output <dir>]
//!   fieldtrace-cli catalogue [--bounds <minLat,minLng,maxLat,maxLng>]
//!   fieldtrace-cli validate <draft.json> [--lat <deg> --lng <deg>]
//!
//! `simulate` walks a synthetic technician through the demo site, collecting
//! a sample at each planned location and writing the KML/CSV/JSON reports.

use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use fieldtrace::engine::{CatalogueIndex, FieldSession, LocationCatalogue};
use fieldtrace::synthetic::{demo_site, tour_fixes};
use fieldtrace::{
    export, GpsFix, MatrixType, SampleDraft, ValidationConfig, ValidationStatus,
};

#[derive(Parser)]
#[command(name = "fieldtrace-cli")]
#[command(about = "Demo tool for field sample collection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a collection session over the demo site
    Simulate {
        /// RNG seed for the synthetic fix stream
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Output directory for KML/CSV/JSON reports
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the demo catalogue, optionally filtered to a viewport
    Catalogue {
        /// Viewport as minLat,minLng,maxLat,maxLng
        #[arg(long)]
        bounds: Option<String>,
    },

    /// Validate a JSON sample draft
    Validate {
        /// Path to a JSON file containing the draft fields
        draft: PathBuf,

        /// Latitude of the current fix
        #[arg(long)]
        lat: Option<f64>,

        /// Longitude of the current fix
        #[arg(long)]
        lng: Option<f64>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate { seed, output } => run_simulate(seed, output.as_ref(), cli.verbose),
        Commands::Catalogue { bounds } => run_catalogue(bounds.as_deref()),
        Commands::Validate { draft, lat, lng } => run_validate(&draft, lat, lng),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_simulate(seed: u64, output: Option<&PathBuf>, verbose: bool) -> Result<(), String> {
    let (project, locations) = demo_site();

    println!("\n{}", "=".repeat(60));
    println!("Simulating collection session: {}", project.name);
    println!("{}", "=".repeat(60));

    let catalogue = LocationCatalogue::from_locations(locations.clone());
    let mut session = FieldSession::new(project, catalogue);

    let fixes = tour_fixes(&locations, 20, 2.0, 1_738_400_000_000, seed);
    println!("Generated {} fixes (seed {})", fixes.len(), seed);

    let mut sampled: HashSet<String> = HashSet::new();

    for fix in fixes {
        session.update_fix(fix);

        let target = session
            .nearby()
            .first()
            .map(|m| (m.location.id.clone(), m.location.matrix, m.distance_meters));

        let (location_id, matrix, distance) = match target {
            Some(t) => t,
            None => continue,
        };

        // Collect once per planned location, when practically on top of it
        if distance > 10.0 || sampled.contains(&location_id) {
            continue;
        }

        fill_draft(&mut session, matrix);

        if session.validation_status() != ValidationStatus::Valid {
            if verbose {
                println!(
                    "  [..] draft at {} not yet valid: {:?}",
                    location_id,
                    session.violations()
                );
            }
            continue;
        }

        match session.save_sample("Field Technician") {
            Ok(sample) => {
                println!(
                    "  [OK] {} - {} sample at {} ({:.0}m from planned point)",
                    sample.id, sample.matrix, location_id, distance
                );
                sampled.insert(location_id);
            }
            Err(e) => eprintln!("  [ERR] save failed at {}: {}", location_id, e),
        }
    }

    let samples = session.samples().samples();
    println!(
        "\nCollected {} of {} planned locations",
        samples.len(),
        session.catalogue().len()
    );

    if let Some(dir) = output {
        fs::create_dir_all(dir).map_err(|e| e.to_string())?;

        let kml = export::project_kml(session.project(), session.catalogue(), samples);
        let csv = export::samples_csv(samples);
        let json = export::session_report_json(session.project(), samples)
            .map_err(|e| e.to_string())?;

        let base = &session.project().id;
        fs::write(dir.join(format!("{}_field_report.kml", base)), kml)
            .map_err(|e| e.to_string())?;
        fs::write(dir.join(format!("{}_samples.csv", base)), csv).map_err(|e| e.to_string())?;
        fs::write(dir.join(format!("{}_report.json", base)), json).map_err(|e| e.to_string())?;

        println!("Reports written to {}", dir.display());
    }

    Ok(())
}

/// Fill the draft with plausible field values for the matrix being sampled.
fn fill_draft(session: &mut FieldSession, matrix: MatrixType) {
    session.set_matrix(Some(matrix));
    match matrix {
        MatrixType::Soil => {
            session.set_description("dark silty fill with slag fragments");
            session.set_depth(Some("0-2 ft".to_string()));
            session.set_temperature(Some(18.5));
        }
        MatrixType::Water => {
            session.set_description("clear, low turbidity");
            session.set_ph(Some(7.2));
        }
        MatrixType::Air => {
            session.set_description("steady wind from the northwest");
            session.set_temperature(Some(15.0));
        }
        MatrixType::Sediment => {
            session.set_description("fine grey sediment, slight organic odor");
            session.set_depth(Some("0-6 in".to_string()));
        }
    }
}

fn run_catalogue(bounds: Option<&str>) -> Result<(), String> {
    let (project, locations) = demo_site();
    let catalogue = LocationCatalogue::from_locations(locations);

    let ids: Vec<String> = match bounds {
        Some(raw) => {
            let parts: Vec<f64> = raw
                .split(',')
                .map(|s| s.trim().parse::<f64>().map_err(|e| e.to_string()))
                .collect::<Result<_, _>>()?;
            if parts.len() != 4 {
                return Err("bounds must be minLat,minLng,maxLat,maxLng".to_string());
            }
            let index = CatalogueIndex::build(&catalogue);
            index.query_viewport_raw(parts[0], parts[2], parts[1], parts[3])
        }
        None => catalogue.ids().map(String::from).collect(),
    };

    println!("\n{} - {} locations", project.name, ids.len());
    for id in ids {
        if let Some(location) = catalogue.get(&id) {
            println!(
                "  {} [{:?}] {} ({:.4}, {:.4}) - {}",
                location.id,
                location.priority,
                location.matrix,
                location.coordinate.latitude,
                location.coordinate.longitude,
                location.description
            );
        }
    }

    Ok(())
}

fn run_validate(path: &PathBuf, lat: Option<f64>, lng: Option<f64>) -> Result<(), String> {
    let contents = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let draft: SampleDraft = serde_json::from_str(&contents).map_err(|e| e.to_string())?;

    let fix = match (lat, lng) {
        (Some(lat), Some(lng)) => Some(GpsFix::new(lat, lng)),
        _ => None,
    };

    let config = ValidationConfig::default();
    let violations = fieldtrace::check_draft(&draft, fix.as_ref(), &config);
    let status = fieldtrace::validate_draft(&draft, fix.as_ref(), &config);

    println!("Validation status: {:?}", status);
    for violation in &violations {
        println!("  - {:?}", violation);
    }

    Ok(())
}
