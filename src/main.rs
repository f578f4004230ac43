mod cli;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;

use asciify::ascii::Viewport;
use asciify::config::{default_path, Config, Settings};
use asciify::decode::StandardDecoder;
use asciify::export::RenderBox;
use asciify::session::Session;
use cli::{handle_config_action, Args, Command, FileSink};

/// Used when neither `--viewport` nor `COLUMNS`/`LINES` say otherwise.
const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 80,
    height: 24,
};

/// Load the config file.
///
/// An explicit `--config` must exist. The default location is optional and
/// falls back to built-in defaults if it cannot be read.
fn load_config(explicit: Option<&Path>) -> Result<Config, String> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(format!("Config file not found: {}", path.display()));
        }
        return Config::load(Some(path)).map_err(|e| e.to_string());
    }

    match Config::load(Some(default_path().as_path())) {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!("Warning: Failed to load config file: {}", e);
            eprintln!("Using default settings.\n");
            Ok(Config::default())
        }
    }
}

/// Viewport from the shell's `COLUMNS` and `LINES`, if both are set.
fn terminal_viewport() -> Viewport {
    let cells = |name: &str| {
        std::env::var(name)
            .ok()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&v| v > 0)
    };
    match (cells("COLUMNS"), cells("LINES")) {
        (Some(width), Some(height)) => Viewport { width, height },
        _ => DEFAULT_VIEWPORT,
    }
}

async fn run(args: Args) -> Result<(), String> {
    let Some(image_path) = args.image.as_deref() else {
        return Err("No image given. Usage: asciify <IMAGE> [OPTIONS]".to_string());
    };

    // CLI args > config file > built-in defaults
    let mut config = load_config(args.config.as_deref())?;
    args.apply_overrides(&mut config);
    let settings = Settings::from_config(&config).map_err(|e| e.to_string())?;

    let bytes = tokio::fs::read(image_path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", image_path.display(), e))?;
    let viewport = args.viewport.unwrap_or_else(terminal_viewport);
    log::info!(
        "converting {} ({} bytes) for {}x{} viewport",
        image_path.display(),
        bytes.len(),
        viewport.width,
        viewport.height
    );

    let mut session = Session::new(settings);
    let decoder = Arc::new(StandardDecoder::new());
    let art = session
        .load(decoder, bytes, Some(viewport))
        .await
        .map_err(|e| format!("Failed to convert {}: {}", image_path.display(), e))?;

    if args.plain {
        for row in art.grid.to_plain_rows() {
            println!("{}", row);
        }
    } else {
        print!("{}", art.grid.to_ansi());
    }

    if let Some(target) = &args.export {
        let typography = args.typography();
        let render_box = RenderBox::estimate(art.grid_size(), &typography);
        let mut sink = FileSink::new(target);
        session
            .export(render_box, &typography, &mut sink)
            .map_err(|e| format!("Export failed: {}", e))?;
        if let Some(path) = sink.written() {
            eprintln!("Saved {}", path.display());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let result = match args.command {
        Some(Command::Config { action }) => handle_config_action(action, args.config.as_deref()),
        None => run(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
