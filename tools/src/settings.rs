use super::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

const PKG_NAME: &str = env!("CARGO_PKG_NAME");
const CONFIG_FILE_VAR: &str = "SPOOLTAG_CONFIG_FILE";
const ENV_PREFIX: &str = "SPOOLTAG";

/// How a decoded descriptor is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// One field per line
    #[default]
    Text,
    /// The firmware's JSON field names
    Json,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    /// A `tracing` filter directive, e.g. `debug` or `spooltag=trace`.
    pub log_level: Option<String>,
    pub format: Format,
    pub parser: spooltag::Config,
}

/// Platform configuration directory, e.g. `~/.config/spooltag` on Linux.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "spooltag")
        .map(|proj_dirs| proj_dirs.config_local_dir().to_path_buf())
}

/// Load settings and install the logger.
///
/// The base configuration file is taken from `config_file`, then the
/// `SPOOLTAG_CONFIG_FILE` environment variable, then an optional
/// `spooltag.toml` in [`config_dir`]. `SPOOLTAG_*` environment variables
/// override it, with `__` separating nested keys, e.g.
/// `SPOOLTAG_PARSER__MAX_DEPTH`.
pub fn init(config_file: Option<&Path>, verbose: Option<Verbosity>) -> anyhow::Result<Settings> {
    let (settings, config_source) = load(config_file, environment())?;

    init_logger(&settings, verbose)?;
    debug!("{PKG_NAME} {}: {config_source}", env!("CARGO_PKG_VERSION"));
    debug!("Parser configuration: {:?}", settings.parser);

    Ok(settings)
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn load(
    config_file: Option<&Path>,
    environment: config::Environment,
) -> anyhow::Result<(Settings, String)> {
    let mut b = config::Config::builder();

    let config_source = if let Some(source) = config_file {
        b = b.add_source(config::File::from(source).format(config::FileFormat::Toml));
        format!(
            "Using configuration file '{}' specified on command line",
            source.display()
        )
    } else if let Ok(source) = std::env::var(CONFIG_FILE_VAR) {
        b = b.add_source(config::File::with_name(&source).format(config::FileFormat::Toml));
        format!("Using configuration file '{source}' specified by {CONFIG_FILE_VAR}")
    } else if let Some(dir) = config_dir() {
        let path = dir.join("spooltag.toml");
        b = b.add_source(
            config::File::from(path.as_path())
                .required(false)
                .format(config::FileFormat::Toml),
        );
        format!("Using optional configuration file '{}'", path.display())
    } else {
        "No configuration file".to_string()
    };

    let settings = b
        .add_source(environment)
        .build()
        .and_then(config::Config::try_deserialize)
        .context("Failed to load configuration")?;

    Ok((settings, config_source))
}

/// Logs go to stderr so they never mix with decoded output.
///
/// The level comes from `--verbose`, then `log_level`, then `RUST_LOG`,
/// defaulting to warnings only.
fn init_logger(settings: &Settings, verbose: Option<Verbosity>) -> anyhow::Result<()> {
    let filter = match (verbose, &settings.log_level) {
        (Some(verbose), _) => {
            EnvFilter::default().add_directive(LevelFilter::from_level(verbose.into()).into())
        }
        (None, Some(level)) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log_level '{level}' in configuration"))?,
        (None, None) => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(matches!(verbose, Some(Verbosity::Trace | Verbosity::Debug)))
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(vars: &[(&str, &str)]) -> config::Environment {
        environment().source(Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    #[test]
    fn environment_overrides() {
        let (settings, _) = load(
            None,
            vars(&[
                ("SPOOLTAG_LOG_LEVEL", "debug"),
                ("SPOOLTAG_FORMAT", "json"),
                ("SPOOLTAG_PARSER__MAX_DEPTH", "7"),
                ("SPOOLTAG_PARSER__DUMP_INPUT", "false"),
                ("OTHER_LOG_LEVEL", "trace"),
            ]),
        )
        .expect("Failed to load settings");

        assert_eq!(Some("debug"), settings.log_level.as_deref());
        assert_eq!(Format::Json, settings.format);
        assert_eq!(7, settings.parser.max_depth);
        assert!(!settings.parser.dump_input);
        assert_eq!(
            spooltag::Config::default().cc_scan_window,
            settings.parser.cc_scan_window
        );
    }

    #[test]
    fn environment_defaults() {
        let (settings, _) = load(None, vars(&[])).expect("Failed to load settings");
        assert_eq!(None, settings.log_level);
        assert_eq!(Format::Text, settings.format);
        assert_eq!(spooltag::Config::default().max_depth, settings.parser.max_depth);
    }
}
