use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing::{debug, info};

use drillboard::{
    export_document, init_logging_with, Catalog, CatalogError, CatalogFileStore, CatalogKind,
    Editor, EditorSettings, ExportOptions, LogFormat, SceneDocument, ShapeType,
};

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// Tactical diagram tools for session planning
#[derive(Debug, Parser)]
#[command(name = "drillboard", version, long_version = LONG_VERSION)]
struct Cli {
    /// Editor settings file (.toml or .json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log output style
    #[arg(long, global = true, value_enum, default_value_t = LogStyle::Pretty)]
    log_format: LogStyle,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogStyle {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a stored diagram as a static SVG thumbnail
    Render(RenderArgs),
    /// Print canvas size and shape counts of a stored diagram
    Inspect {
        /// Diagram JSON file
        scene: PathBuf,
    },
    /// Attach a diagram to a catalog entry and save the catalog
    Attach(AttachArgs),
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// Diagram JSON file
    scene: PathBuf,

    /// Output file; stdout when omitted
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Draw the grid
    #[arg(long, overrides_with = "no_grid")]
    grid: bool,

    /// Leave the grid out
    #[arg(long, overrides_with = "grid")]
    no_grid: bool,

    /// Paint the pitch background
    #[arg(long, overrides_with = "no_background")]
    background: bool,

    /// Transparent background
    #[arg(long, overrides_with = "background")]
    no_background: bool,
}

#[derive(Debug, Args)]
struct AttachArgs {
    /// Catalog JSON file
    #[arg(long, value_name = "PATH")]
    catalog: PathBuf,

    /// Bucket holding the entry (games, drills, mobility)
    #[arg(long, value_parser = parse_kind)]
    kind: CatalogKind,

    /// Entry id
    #[arg(long, value_name = "ID")]
    entry: String,

    /// Diagram JSON file
    #[arg(long, value_name = "PATH")]
    scene: PathBuf,

    /// Bucket to save the entry under; defaults to --kind
    #[arg(long, value_parser = parse_kind)]
    to: Option<CatalogKind>,
}

fn parse_kind(s: &str) -> Result<CatalogKind, String> {
    s.parse::<CatalogKind>().map_err(|e| e.to_string())
}

/// Resolves a `--flag` / `--no-flag` pair against the configured default.
fn toggle(on: bool, off: bool, default: bool) -> bool {
    match (on, off) {
        (true, _) => true,
        (_, true) => false,
        _ => default,
    }
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<EditorSettings> {
    if let Some(path) = path {
        return EditorSettings::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()));
    }
    match EditorSettings::default_path() {
        Ok(path) => EditorSettings::load_or_default(&path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        Err(e) => {
            debug!("Using default settings: {}", e);
            Ok(EditorSettings::default())
        }
    }
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn render(settings: &EditorSettings, args: &RenderArgs) -> anyhow::Result<()> {
    let document = SceneDocument::from_value(&read_json(&args.scene)?);
    let mut options = ExportOptions::from_settings(settings);
    options.show_grid = toggle(args.grid, args.no_grid, options.show_grid);
    options.background = toggle(args.background, args.no_background, options.background);

    let svg = export_document(&document, &options);
    match &args.output {
        Some(path) => {
            fs::write(path, svg).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Rendered {} to {}", args.scene.display(), path.display());
        }
        None => print!("{}", svg),
    }
    Ok(())
}

fn inspect(scene: &Path) -> anyhow::Result<()> {
    let document = SceneDocument::from_value(&read_json(scene)?);
    let (width, height) = document.canvas();

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in &document.items {
        let label = match record.recognized_type() {
            Some(shape_type) => shape_type.as_str().to_string(),
            None => format!("unknown ({})", record.shape_type),
        };
        *counts.entry(label).or_default() += 1;
    }

    println!("canvas: {} x {}", width, height);
    if !document.name.is_empty() {
        println!("name: {}", document.name);
    }
    println!("items: {}", document.items.len());
    for shape_type in ShapeType::ALL {
        if let Some(count) = counts.remove(shape_type.as_str()) {
            println!("  {:<10} {}", shape_type.as_str(), count);
        }
    }
    for (label, count) in counts {
        println!("  {:<10} {}", label, count);
    }
    Ok(())
}

fn attach(settings: EditorSettings, args: &AttachArgs) -> anyhow::Result<()> {
    let catalog = Catalog::load_from_file(&args.catalog)
        .with_context(|| format!("Failed to load catalog {}", args.catalog.display()))?;
    let mut entry = catalog
        .find(args.kind, &args.entry)
        .cloned()
        .ok_or_else(|| CatalogError::EntryNotFound {
            id: args.entry.clone(),
            kind: args.kind.to_string(),
        })?;
    entry.diagram = Some(read_json(&args.scene)?);

    let mut editor = Editor::new(settings);
    editor.load_entry(&entry);

    let target = args.to.unwrap_or(args.kind);
    let mut store = CatalogFileStore::new(&args.catalog, target);
    let saved = editor
        .save_to(&mut store)
        .with_context(|| format!("Failed to save entry {}", args.entry))?;
    info!(
        "Attached {} shapes to {} in {}",
        editor.scene().len(),
        saved.id,
        target
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let format = match cli.log_format {
        LogStyle::Pretty => LogFormat::Pretty,
        LogStyle::Json => LogFormat::Json,
    };
    init_logging_with(format)?;

    let settings = load_settings(cli.config.as_deref())?;

    match &cli.command {
        Command::Render(args) => render(&settings, args),
        Command::Inspect { scene } => inspect(scene),
        Command::Attach(args) => attach(settings, args),
    }
}
