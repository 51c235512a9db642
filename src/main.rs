//! tvgrid - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tvgrid::config::CliOverrides;
use tvgrid::model::Orientation;
use tvgrid::state::ScrollAlignmentPolicy;
use tvgrid::view::Demo;

/// tvgrid - D-pad navigable grid demo for the terminal
#[derive(Parser, Debug)]
#[command(name = "tvgrid")]
#[command(version)]
#[command(about = "Browse a focus-driven tile grid with the arrow keys")]
pub struct Args {
    /// Demo grid to show
    #[arg(short, long, value_enum, default_value_t = Demo::Regular)]
    pub demo: Demo,

    /// JSON row definition for the irregular demo
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of lanes (rows when horizontal, columns when vertical)
    #[arg(long)]
    pub lanes: Option<usize>,

    /// Focus scroll strategy: aligned, item-visible or page
    #[arg(short, long)]
    pub strategy: Option<ScrollAlignmentPolicy>,

    /// Scroll axis: horizontal or vertical
    #[arg(short, long)]
    pub orientation: Option<Orientation>,

    /// Item count for the uniform demos
    #[arg(short = 'n', long, default_value = "40")]
    pub items: usize,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            lanes: self.lanes,
            strategy: self.strategy,
            orientation: self.orientation,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let file = tvgrid::config::load_config_with_precedence(args.config.clone())?;
        let with_env = tvgrid::config::apply_env_overrides(file.unwrap_or_default())?;
        let with_cli = tvgrid::config::apply_cli_overrides(with_env, &args.overrides());
        tvgrid::config::resolve(&with_cli)?
    };

    tvgrid::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        demo = args.demo.title(),
        "Configuration loaded and resolved"
    );

    tvgrid::view::run_demo(args.demo, &config.grid, args.items, args.layout.as_deref())?;

    Ok(())
}
