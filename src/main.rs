//! # CardKit CLI
//!
//! Command-line front end for card templates.
//!
//! ## Usage
//!
//! ```bash
//! # Write the starter template
//! cardkit init card.json
//!
//! # Validate a template and list its elements
//! cardkit check card.json
//!
//! # Render to PNG, optionally substituting a name and barcode value
//! cardkit render card.json -o card.png --name "Ada Lovelace" --value 5550100
//!
//! # Impose a batch of records onto printable sheets
//! cardkit sheet card.json --records people.json -o sheets/
//!
//! # Inspect or reset the autosaved editor session
//! cardkit session --export restored.json
//! ```

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use cardkit::{
    init_logging, render_sheets, save_png, CardRecord, Config, EditorSession, ElementKind,
    FileSessionStore, SheetLayout, Template,
};

/// CardKit - business card layout tool
#[derive(Parser, Debug)]
#[command(name = "cardkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (.toml or .json); defaults to the platform config directory
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a template and print a summary
    Check {
        /// Template JSON file
        template: PathBuf,
    },

    /// Render a template to PNG
    Render {
        /// Template JSON file
        template: PathBuf,

        /// Output PNG file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Replace the name text
        #[arg(long)]
        name: Option<String>,

        /// Replace the first barcode's value
        #[arg(long)]
        value: Option<String>,

        /// Keep the editor grid in the output
        #[arg(long)]
        grid: bool,
    },

    /// Render every record and impose the cards onto print sheets
    Sheet {
        /// Template JSON file
        template: PathBuf,

        /// JSON array of {"name": .., "value": ..} records
        #[arg(long, value_name = "FILE")]
        records: PathBuf,

        /// Output directory for sheet-NN.png pages
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Sheet resolution (defaults to render.sheet_dpi from the config)
        #[arg(long)]
        dpi: Option<u32>,
    },

    /// Write the starter template
    Init {
        /// Destination JSON file
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Inspect the autosaved editor session
    Session {
        /// Write the restored session to a template file
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,

        /// Reset the stored session to the starter layout
        #[arg(long)]
        reset: bool,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref()).context("Loading config")?;

    match cli.command {
        Commands::Check { template } => {
            let template = load_template(&template)?;
            print_summary(&template);
        }
        Commands::Render {
            template,
            output,
            name,
            value,
            grid,
        } => {
            let mut session = open_session(&template, &config)?;
            let pixmap = if name.is_some() || value.is_some() {
                let record = record_with_defaults(session.template(), name, value);
                session.render_record(&record)?
            } else {
                session.render_export(grid)?
            };
            save_png(&pixmap, &output)?;
            info!("Wrote {}", output.display());
        }
        Commands::Sheet {
            template,
            records,
            output,
            dpi,
        } => {
            let mut session = open_session(&template, &config)?;
            let json = std::fs::read_to_string(&records)
                .with_context(|| format!("Reading {}", records.display()))?;
            let records: Vec<CardRecord> = serde_json::from_str(&json)
                .with_context(|| format!("Parsing records in {}", records.display()))?;

            let cards = session.render_records(&records)?;
            let dpi = dpi.unwrap_or(config.render.sheet_dpi);
            if dpi == 0 {
                bail!("Sheet resolution must be positive");
            }
            let pages = render_sheets(&SheetLayout::letter(), &cards, dpi as f32)?;

            std::fs::create_dir_all(&output)
                .with_context(|| format!("Creating {}", output.display()))?;
            for (i, page) in pages.iter().enumerate() {
                let path = output.join(format!("sheet-{:02}.png", i + 1));
                save_png(page, &path)?;
            }
            info!(
                "Imposed {} cards onto {} sheets in {}",
                cards.len(),
                pages.len(),
                output.display()
            );
        }
        Commands::Init { path, force } => {
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            let json = Template::with_default_elements().to_pretty_json()?;
            std::fs::write(&path, json).with_context(|| format!("Writing {}", path.display()))?;
            info!("Wrote starter template to {}", path.display());
        }
        Commands::Session { export, reset } => {
            let Some(store_path) = config.autosave_path() else {
                bail!("Autosave is disabled in the config");
            };
            let mut session = EditorSession::restore(
                Box::new(FileSessionStore::new(&store_path)),
                config.handles,
                config.editor.history_depth,
            );
            if reset {
                session.reset_to_defaults(|| true);
            }
            println!("Session: {}", store_path.display());
            print_summary(session.template());
            if let Some(path) = export {
                session.export_file(&path)?;
            }
        }
    }

    Ok(())
}

fn load_template(path: &Path) -> anyhow::Result<Template> {
    let json =
        std::fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
    Template::from_json(&json).with_context(|| format!("Invalid template {}", path.display()))
}

fn open_session(path: &Path, config: &Config) -> anyhow::Result<EditorSession> {
    let template = load_template(path)?;
    Ok(EditorSession::with_template(template)
        .with_metrics(config.handles)
        .with_history_depth(config.editor.history_depth))
}

/// Fill whichever side of the record was not given from the template itself.
fn record_with_defaults(
    template: &Template,
    name: Option<String>,
    value: Option<String>,
) -> CardRecord {
    let current_name = template
        .name_element_index()
        .and_then(|i| template.elements[i].as_text())
        .map(|t| t.text.clone())
        .unwrap_or_default();
    let current_value = template
        .first_barcode_index()
        .and_then(|i| template.elements[i].as_barcode())
        .map(|b| b.value.clone())
        .unwrap_or_default();
    CardRecord::new(
        name.unwrap_or(current_name),
        value.unwrap_or(current_value),
    )
}

fn print_summary(template: &Template) {
    println!(
        "Card {}x{} px, version {}, {} elements",
        template.width(),
        template.height(),
        template.meta.version,
        template.elements.len()
    );
    for el in &template.elements {
        let detail = match &el.kind {
            ElementKind::Image(img) => format!("src={} {}x{}", img.src, img.w, img.h),
            ElementKind::Text(text) => format!("\"{}\" {}px", text.text, text.font_size),
            ElementKind::Barcode(bc) => format!("{} {}", bc.format, bc.value),
        };
        println!(
            "  {:<16} {:<8} ({:.0}, {:.0}) {:>4}°  {}",
            el.id,
            el.type_name(),
            el.x,
            el.y,
            el.rotation,
            detail
        );
    }
}
