use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use watermark_manager::config;
use watermark_manager::imaging::RustBackend;
use watermark_manager::session::Session;

fn version_string() -> &'static str {
    let on_tag = env!("WATERMARK_ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("WATERMARK_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "watermark-manager")]
#[command(about = "Add text or image watermarks to your pictures")]
#[command(long_about = "\
Add text or image watermarks to your pictures

Copy your images into the image directory (default: img/), then answer the
prompts. Optionally edit the picture first; edits overwrite the original.

  img/
  ├── test.jpg                     # Input (edited in place if requested)
  ├── logo.png                     # Image watermark
  └── test-with-watermark.jpg      # Output

Run 'watermark-manager gen-config' to print a documented watermark.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory holding input, watermark, and output images
    #[arg(long)]
    img_dir: Option<PathBuf>,

    /// Config file (default: ./watermark.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a stock watermark.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::GenConfig) => {
            print!("{}", config::stock_config_toml());
        }
        None => {
            let cwd = std::env::current_dir()?;
            let mut app_config = config::load_config(cli.config.as_deref(), &cwd)?;
            if let Some(dir) = cli.img_dir {
                app_config.img_dir = dir;
            }
            tracing::debug!(config = ?app_config, "resolved config");

            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let outcome =
                Session::new(stdin.lock(), stdout.lock()).run(&RustBackend::new(), &app_config)?;
            tracing::info!(?outcome, "session finished");
        }
    }

    Ok(())
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default: warnings only).
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}
