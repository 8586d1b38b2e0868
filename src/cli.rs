use std::fs;
use std::path::PathBuf;

use clap::Parser;

use crate::sync;
use crate::tables;
use crate::types::{FieldSelection, SyncOptions, Track, TrackStatus};

#[derive(Parser)]
#[command(name = "djaysync")]
enum Cli {
    /// Copy analyzed BPMs and keys into a library export
    Sync(SyncArgs),
}

#[derive(clap::Args)]
struct SyncArgs {
    /// Library track export (JSON array), rewritten in place unless --output or --dry-run
    #[arg(long)]
    library: PathBuf,
    /// Table of automatically computed values (JSON)
    #[arg(long)]
    auto: PathBuf,
    /// Table of manually corrected values (JSON)
    #[arg(long)]
    manual: PathBuf,
    /// Fields to fill in: bpm, key or both
    #[arg(long, default_value = "both", value_parser = parse_fields)]
    fields: FieldSelection,
    /// Replace existing library values instead of only filling empty ones
    #[arg(long)]
    overwrite: bool,
    /// Report what would change without writing the library file
    #[arg(long)]
    dry_run: bool,
    /// Write the updated library here instead of back to --library
    #[arg(long)]
    output: Option<PathBuf>,
}

fn parse_fields(s: &str) -> Result<FieldSelection, String> {
    FieldSelection::from_str(s).ok_or_else(|| format!("unknown fields value \"{s}\" (expected bpm, key or both)"))
}

pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli {
        Cli::Sync(args) => run_sync(args),
    }
}

fn run_sync(args: SyncArgs) -> Result<(), Box<dyn std::error::Error>> {
    let auto = tables::load_table(&args.auto)?;
    let manual = tables::load_table(&args.manual)?;

    let library_json = fs::read_to_string(&args.library)
        .map_err(|e| format!("cannot read {}: {e}", args.library.display()))?;
    let mut tracks: Vec<Track> = serde_json::from_str(&library_json)
        .map_err(|e| format!("cannot parse {}: {e}", args.library.display()))?;

    let opts = SyncOptions {
        fields: args.fields,
        overwrite: args.overwrite,
    };
    eprintln!(
        "Syncing {} tracks (fields: {}, overwrite: {})\n",
        tracks.len(),
        opts.fields.as_str(),
        opts.overwrite
    );
    let summary = sync::sync_tracks(&mut tracks, &auto, &manual, &opts);

    report(&summary);

    if !args.dry_run {
        let out_path = args.output.as_ref().unwrap_or(&args.library);
        let json = serde_json::to_string_pretty(&tracks)?;
        fs::write(out_path, json)
            .map_err(|e| format!("cannot write {}: {e}", out_path.display()))?;
    }

    Ok(())
}

fn report(summary: &sync::SyncSummary) {
    let total = summary.total;
    for (i, outcome) in summary.outcomes.iter().enumerate() {
        let idx = i + 1;
        let label = format!("{} - {}", outcome.artist, outcome.name);
        match outcome.status {
            TrackStatus::Updated => {
                let fields: Vec<String> = outcome
                    .changes
                    .iter()
                    .map(|c| format!("{}: {} -> {}", c.field, display_value(&c.old_value), c.new_value))
                    .collect();
                eprintln!("[{idx}/{total}] {label} ... {}", fields.join(", "));
            }
            TrackStatus::Unchanged => eprintln!("[{idx}/{total}] {label} ... kept existing values"),
            TrackStatus::Unmatched => eprintln!("[{idx}/{total}] {label} ... no match"),
        }
    }
    eprintln!("\nUpdated {} of {} tracks", summary.updated, total);
}

fn display_value(value: &str) -> &str {
    if value.is_empty() { "(empty)" } else { value }
}
