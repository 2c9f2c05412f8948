use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use odonto_core::chart::{DiagramKind, OdontogramDocument};
use odonto_core::config::{database_path_from_env_value, default_color_from_env_value};
use odonto_core::editor::ChartLayout;
use odonto_core::{CoreConfig, OdontogramService, PatientId, SqliteStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "odonto")]
#[command(about = "Dental odontogram records CLI")]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "ODONTO_DATABASE_PATH")]
    database: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Create a patient with an empty odontogram
    CreatePatient {
        /// Patient full name
        full_name: String,
    },
    /// Delete a patient and their odontogram
    DeletePatient { patient: PatientId },
    /// Print a patient's odontogram
    Show {
        patient: PatientId,
        /// Print the canonical JSON payload instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Save the status and notes of one tooth
    SaveTooth {
        patient: PatientId,
        /// FDI tooth code, e.g. 11 or 85
        tooth: String,
        /// Status key, e.g. caries or endodoncia
        status: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Apply the chart toolbar to cells and save the result
    Annotate {
        patient: PatientId,
        /// general or evolution
        #[arg(long, default_value = "general")]
        diagram: String,
        /// blue or red
        #[arg(long)]
        color: Option<String>,
        /// dot, x, vertical, horizontal or erase
        #[arg(long)]
        tool: Option<String>,
        /// Cells as TOOTH:SURFACE, e.g. 11:top 36:center
        #[arg(required = true)]
        cells: Vec<String>,
    },
    /// Replace a patient's odontogram with a raw payload
    Replace {
        patient: PatientId,
        /// Payload JSON
        #[arg(conflicts_with = "file", required_unless_present = "file")]
        payload: Option<String>,
        /// Read the payload from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Print the chart layout
    Layout,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("odonto_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = CoreConfig::new(
        database_path_from_env_value(cli.database),
        default_color_from_env_value(std::env::var("ODONTO_DEFAULT_COLOR").ok())?,
    )?;

    let Some(command) = cli.command else {
        println!("Use 'odonto --help' for commands");
        return Ok(());
    };

    let store = Arc::new(
        SqliteStore::open(&cfg)
            .with_context(|| format!("opening {}", cfg.database_path().display()))?,
    );
    let service = OdontogramService::new(store.clone());

    match command {
        Commands::InitDb => {
            println!("Database ready at {}", cfg.database_path().display());
        }
        Commands::CreatePatient { full_name } => {
            let id = store.create_patient(&full_name)?;
            println!("Created patient {}", id);
        }
        Commands::DeletePatient { patient } => {
            if !store.delete_patient(patient)? {
                bail!("patient {} does not exist", patient);
            }
            println!("Deleted patient {}", patient);
        }
        Commands::Show { patient, json } => {
            let document = service.load(patient)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&document)?);
            } else {
                print_document(&document);
            }
        }
        Commands::SaveTooth {
            patient,
            tooth,
            status,
            notes,
        } => {
            let tooth = service.save_tooth(patient, &tooth, &status, &notes)?;
            println!("Saved tooth {} as {}", tooth, status.trim());
        }
        Commands::Annotate {
            patient,
            diagram,
            color,
            tool,
            cells,
        } => {
            let diagram = DiagramKind::parse(&diagram)
                .ok_or_else(|| anyhow!("unknown diagram '{}'", diagram))?;
            let layout = ChartLayout::standard().with_initial_color(cfg.default_color());
            let mut editor = service.open_editor(patient, layout)?;

            if let Some(color) = color {
                if !editor.select_color_raw(diagram, &color) {
                    bail!("unknown color '{}'", color);
                }
            }
            if let Some(tool) = tool {
                if !editor.press_tool_raw(diagram, &tool) {
                    bail!("unknown tool '{}'", tool);
                }
            }

            for cell in &cells {
                let (tooth, surface) = split_cell(cell)?;
                match editor.activate_cell_raw(diagram, tooth, surface) {
                    Some(view) => println!("{} {}", cell, view.classes().join(" ")),
                    None => eprintln!("Skipping unknown cell {}", cell),
                }
            }

            match editor.submission_payload()? {
                Some(payload) => {
                    service.submit(patient, &payload)?;
                    println!("Saved {} chart for patient {}", diagram.key(), patient);
                }
                None => println!("Nothing to save"),
            }
        }
        Commands::Replace {
            patient,
            payload,
            file,
        } => {
            let raw = match (payload, file) {
                (Some(payload), _) => payload,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                (None, None) => bail!("a payload or --file is required"),
            };
            service.submit(patient, &raw)?;
            println!("Replaced odontogram for patient {}", patient);
        }
        Commands::Layout => {
            let layout = ChartLayout::standard().with_initial_color(cfg.default_color());
            for arch in &layout.arches {
                let teeth: Vec<String> = arch.teeth.iter().map(ToString::to_string).collect();
                println!("{:<18} {}", arch.label, teeth.join(" "));
            }
            let surfaces: Vec<&str> = layout.surfaces.iter().map(|s| s.as_str()).collect();
            println!("Surfaces: {}", surfaces.join(", "));
            println!("Initial color: {}", layout.initial_color);
        }
    }

    Ok(())
}

/// Splits `TOOTH:SURFACE`.
fn split_cell(cell: &str) -> anyhow::Result<(&str, &str)> {
    cell.split_once(':')
        .ok_or_else(|| anyhow!("cell '{}' must look like TOOTH:SURFACE", cell))
}

fn print_document(document: &OdontogramDocument) {
    for diagram in DiagramKind::ALL {
        let chart = document.chart(diagram);
        println!("[{}]", diagram.key());
        if chart.is_empty() {
            println!("  (empty)");
            continue;
        }

        for (tooth, entry) in chart.teeth() {
            let mut line = format!("  {}", tooth);
            if let Some(status) = entry.status {
                line.push_str(&format!(" status={}", status.key()));
            }
            for (surface, annotation) in &entry.surfaces {
                line.push_str(&format!(" {}={}", surface, annotation.color));
                if !annotation.mark.is_none() {
                    line.push_str(&format!("/{}", annotation.mark));
                }
            }
            if let Some(notes) = &entry.notes {
                line.push_str(&format!(" notes={:?}", notes));
            }
            println!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cells_need_a_separator() {
        assert_eq!(split_cell("11:top").unwrap(), ("11", "top"));
        assert!(split_cell("11top").is_err());
    }

    #[test]
    fn annotate_parses_toolbar_flags() {
        let cli = Cli::try_parse_from([
            "odonto", "annotate", "3", "--diagram", "evolution", "--color", "red", "--tool",
            "erase", "11:top", "21:left",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Annotate {
                patient,
                diagram,
                color,
                tool,
                cells,
            }) => {
                assert_eq!(patient, 3);
                assert_eq!(diagram, "evolution");
                assert_eq!(color.as_deref(), Some("red"));
                assert_eq!(tool.as_deref(), Some("erase"));
                assert_eq!(cells, vec!["11:top", "21:left"]);
            }
            _ => panic!("expected annotate"),
        }
    }
}
