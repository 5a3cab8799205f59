//! Command-line options

use std::path::PathBuf;

use clap::{Arg, ArgMatches, Command};
use showroom_engine::config::{Config, ConfigError};
use showroom_engine::core::config::ViewerConfig;
use thiserror::Error;

/// Frames rendered when neither the command line nor the config sets a limit
pub const DEFAULT_FRAMES: u64 = 120;

/// Option errors
#[derive(Error, Debug)]
pub enum CliError {
    /// `--preset` named an unknown preset
    #[error("Unknown preset '{name}', expected one of: {available}")]
    UnknownPreset {
        /// Requested name
        name: String,
        /// Comma-separated preset names
        available: String,
    },

    /// A numeric option did not parse
    #[error("Invalid value '{value}' for --{option}")]
    InvalidNumber {
        /// Option name
        option: &'static str,
        /// Raw value
        value: String,
    },

    /// Config file could not be read
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Parsed command line
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    /// Fully resolved viewer configuration
    pub config: ViewerConfig,
    /// Horizontal drag in pixels queued every frame
    pub orbit_speed: f32,
    /// Where to write the resolved configuration, if requested
    pub save_config: Option<PathBuf>,
}

fn command() -> Command {
    Command::new("showroom_viewer")
        .about("Loads a glTF model, classifies its materials and renders it headlessly")
        .arg(
            Arg::new("model")
                .value_name("MODEL")
                .help("Path to a .gltf or .glb file (defaults to the preset's model)"),
        )
        .arg(
            Arg::new("preset")
                .short('p')
                .long("preset")
                .value_name("NAME")
                .help("Viewer preset: showroom or night")
                .default_value("showroom"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Load the configuration from a .toml or .ron file instead of a preset")
                .conflicts_with("preset"),
        )
        .arg(
            Arg::new("frames")
                .short('f')
                .long("frames")
                .value_name("COUNT")
                .help("Number of frames to render"),
        )
        .arg(Arg::new("width").long("width").value_name("PIXELS").help("Viewport width"))
        .arg(Arg::new("height").long("height").value_name("PIXELS").help("Viewport height"))
        .arg(
            Arg::new("orbit")
                .long("orbit")
                .value_name("PIXELS")
                .help("Turntable drag applied every frame")
                .default_value("0"),
        )
        .arg(
            Arg::new("no-classify")
                .long("no-classify")
                .help("Skip name-based material classification")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("off, error, warn, info, debug or trace"),
        )
        .arg(
            Arg::new("save-config")
                .long("save-config")
                .value_name("FILE")
                .help("Write the resolved configuration to a .toml or .ron file"),
        )
}

fn parse_number<T: std::str::FromStr>(matches: &ArgMatches, option: &'static str) -> Result<Option<T>, CliError> {
    matches
        .get_one::<String>(option)
        .map(|value| {
            value.parse().map_err(|_| CliError::InvalidNumber {
                option,
                value: value.clone(),
            })
        })
        .transpose()
}

/// Parse the process arguments
pub fn parse() -> Result<ViewerOptions, CliError> {
    resolve(&command().get_matches())
}

fn resolve(matches: &ArgMatches) -> Result<ViewerOptions, CliError> {
    let mut config = if let Some(path) = matches.get_one::<String>("config") {
        ViewerConfig::load_from_file(path)?
    } else {
        let name = matches.get_one::<String>("preset").map_or("showroom", String::as_str);
        ViewerConfig::preset(name).ok_or_else(|| CliError::UnknownPreset {
            name: name.to_string(),
            available: ViewerConfig::list_presets().join(", "),
        })?
    };

    if let Some(model) = matches.get_one::<String>("model") {
        config = config.with_model_path(model);
    }
    if let Some(frames) = parse_number::<u64>(matches, "frames")? {
        config.engine = config.engine.with_frame_limit(frames);
    } else if config.engine.frame_limit.is_none() {
        config.engine = config.engine.with_frame_limit(DEFAULT_FRAMES);
    }
    let width = parse_number::<u32>(matches, "width")?.unwrap_or(config.viewport.width);
    let height = parse_number::<u32>(matches, "height")?.unwrap_or(config.viewport.height);
    config = config.with_viewport(width, height);
    if matches.get_flag("no-classify") {
        config.model.classify_materials = false;
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.engine = config.engine.with_log_level(level.as_str());
    }

    Ok(ViewerOptions {
        config,
        orbit_speed: parse_number::<f32>(matches, "orbit")?.unwrap_or(0.0),
        save_config: matches.get_one::<String>("save-config").map(PathBuf::from),
    })
}
