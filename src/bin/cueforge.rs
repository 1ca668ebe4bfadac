use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use cueforge::ArtifactKind;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cueforge", version, about = "Generate show control configurations from event templates")]
struct Cli {
    /// Path to the YAML event template.
    template: PathBuf,

    /// Output directory.
    #[arg(short = 'o', long, default_value = "output")]
    output_dir: PathBuf,

    /// Generate only specific artifacts.
    #[arg(long, value_enum, num_args = 1..)]
    only: Option<Vec<ArtifactKind>>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let (event, _warnings) = cueforge::load_event_file(&cli.template)
        .with_context(|| format!("load template '{}'", cli.template.display()))?;

    println!(
        "Loaded {} ({}), {} cue(s)",
        event.event_name,
        event.event_type,
        event.cues.len()
    );

    std::fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("create output dir '{}'", cli.output_dir.display()))?;

    let kinds = cli.only.unwrap_or_else(|| ArtifactKind::ALL.to_vec());
    let generated_on = chrono::Local::now().format("%Y-%m-%d").to_string();
    let written = cueforge::write_artifacts(&event, &cli.output_dir, &kinds, &generated_on)
        .context("write artifacts")?;

    println!("Generated {} file(s):", written.len());
    for (kind, path) in &written {
        println!("  {:.<24} {}", kind.label(), path.display());
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}
