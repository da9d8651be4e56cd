use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use signlens_lib::{Config, SignRecognizer};

// ── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "signlens",
    version,
    about = "Recognize fingerspelled signs in still images",
    long_about = None
)]
struct Cli {
    /// Settings file (default: $SIGNLENS_CONFIG or ~/.signlens/config/settings.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one or more images; `-` reads image bytes from stdin
    Classify {
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// List the active label table
    Labels,

    /// Inspect or reset the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the active configuration
    Show,
    /// Overwrite the settings file with defaults
    Reset,
    /// Print the settings file location
    Path,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    // Respect RUST_LOG; default to info. Logs go to stderr, results to stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::config_path(),
    };

    match cli.command {
        Commands::Classify { images, pretty } => cmd_classify(&config_path, &images, pretty),
        Commands::Labels => cmd_labels(&config_path),
        Commands::Config { action } => cmd_config(&config_path, action),
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn cmd_classify(config_path: &Path, images: &[PathBuf], pretty: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let recognizer =
        SignRecognizer::init_global(&config).context("failed to initialize sign recognizer")?;

    for image in images {
        let bytes = read_image(image)?;
        let response = recognizer.predict_sign(&bytes);
        info!(image = %image.display(), status = ?response.status, "Classified");

        let json = if pretty {
            serde_json::to_string_pretty(&response)?
        } else {
            serde_json::to_string(&response)?
        };
        println!("{}", json);
    }

    Ok(())
}

fn cmd_labels(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let labels = config.label_table().context("failed to load label table")?;

    for (index, label) in labels.iter() {
        println!("{:>3}  {}", index, label);
    }
    Ok(())
}

fn cmd_config(config_path: &Path, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config
                .save_to(config_path)
                .with_context(|| format!("failed to write {}", config_path.display()))?;
            info!(path = %config_path.display(), "Configuration reset to defaults");
        }
        ConfigAction::Path => println!("{}", config_path.display()),
    }
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_config(path: &Path) -> Result<Config> {
    Config::load_or_create(path).with_context(|| format!("failed to load config: {}", path.display()))
}

fn read_image(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("failed to read image from stdin")?;
        return Ok(bytes);
    }

    std::fs::read(path).with_context(|| format!("failed to read image: {}", path.display()))
}
