use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};

use telestrator::backend::headless::{self, HeadlessShell, Script};
use telestrator::config::Config;
use telestrator::draw::CanvasSize;
use telestrator::input::Overlay;
use telestrator::input::state::OverlayOptions;

#[derive(Parser, Debug)]
#[command(name = "telestrator")]
#[command(version, about = "Screen annotation overlay with fading ink")]
struct Cli {
    /// Replay a TOML event script against a headless overlay
    #[arg(long, short = 's', value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Write the composited overlay to a PNG after replaying
    #[arg(long, short = 'o', value_name = "PNG", requires = "script")]
    output: Option<PathBuf>,

    /// Overlay width in pixels
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(i32).range(1..))]
    width: i32,

    /// Overlay height in pixels
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(i32).range(1..))]
    height: i32,

    /// Use this config file instead of the default location
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the default config file location and exit
    #[arg(long, action = ArgAction::SetTrue)]
    print_config_path: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.print_config_path {
        println!("{}", Config::get_config_path()?.display());
        return Ok(());
    }

    let Some(script_path) = cli.script else {
        println!("telestrator: Screen annotation overlay with fading ink");
        println!();
        println!("Usage:");
        println!("  telestrator --script FILE [--output PNG]   Replay an event script");
        println!("  telestrator --print-config-path            Show the config file location");
        println!("  telestrator --help                         Show help");
        println!();
        println!("Scripts are TOML files made of [[step]] tables, for example:");
        println!("  [[step]]");
        println!("  event = \"activated\"");
        println!();
        println!("  [[step]]");
        println!("  event = \"started_drawing\"");
        println!("  x = 10.0");
        println!("  y = 20.0");
        return Ok(());
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let options = OverlayOptions::from_config(&config)?;
    let script = Script::load(&script_path)?;

    let shell = HeadlessShell::new(CanvasSize::new(cli.width, cli.height));
    let mut overlay = Overlay::new(shell, options);
    headless::load_surfaces(&mut overlay)?;

    log::info!(
        "Replaying {} steps from {}",
        script.steps.len(),
        script_path.display()
    );
    headless::replay(&script, &mut overlay)?;

    if let Some(output) = &cli.output {
        overlay
            .write_png(output)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        log::info!("Wrote {}", output.display());
    }

    println!("{}", headless::summary(&overlay));
    Ok(())
}
