use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use modscript::config::BuildDescription;
use std::fs::File;
use std::io::BufWriter;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Write the module script XML for a JSON build description", long_about = None)]
struct Cli {
    /// JSON build description
    #[arg(value_name = "BUILD_FILE")]
    build_file: Utf8PathBuf,

    /// Write the module script to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<Utf8PathBuf>,

    /// Treat the build as incremental, keeping output directories on the classpath
    #[arg(long)]
    incremental: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut description = BuildDescription::from_file(&cli.build_file)?;
    description.incremental |= cli.incremental;
    let mut builder = description.module_xml_builder();

    match cli.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent))?;
            }
            let file =
                File::create(&path).with_context(|| format!("Failed to create {}", path))?;
            builder
                .write_to(BufWriter::new(file))
                .with_context(|| format!("Failed to write {}", path))?;
            info!(path = %path, modules = description.modules.len(), "module script written");
        }
        None => builder.write_to(std::io::stdout().lock())?,
    }
    Ok(())
}
