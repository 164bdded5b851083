use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use stopwatch_core::{LogOrder, Separator, DEFAULT_TICK_MS, MAX_TICK_MS};

use crate::error::ConfigError;

pub const DEFAULT_TITLE: &str = "Stopwatch Results";

#[derive(Debug, Parser)]
#[command(name = "stopwatch", version, about = "Stopwatch with a lap-and-continue results log")]
pub struct Args {
    /// Delimiter before the hundredths: dot (MM:SS.HH) or colon (MM:SS:HH)
    #[arg(long, default_value = "dot")]
    pub separator: Separator,

    /// Result numbering: newest-first or oldest-first
    #[arg(long, default_value = "newest-first")]
    pub order: LogOrder,

    /// Display refresh interval in milliseconds while running
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,

    /// First line of the copied results log
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Write logs here (the terminal is taken over by the UI)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Only use the system clipboard, never a clipboard utility
    #[arg(long)]
    pub no_fallback: bool,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub separator: Separator,
    pub order: LogOrder,
    pub tick_ms: u64,
    pub title: String,
    pub log_file: Option<PathBuf>,
    pub clipboard_fallback: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            separator: Separator::Dot,
            order: LogOrder::NewestFirst,
            tick_ms: DEFAULT_TICK_MS,
            title: DEFAULT_TITLE.to_string(),
            log_file: None,
            clipboard_fallback: true,
        }
    }
}

impl TryFrom<Args> for Settings {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, ConfigError> {
        if args.tick_ms == 0 || args.tick_ms > MAX_TICK_MS {
            return Err(ConfigError::TickInterval {
                got: args.tick_ms,
                max: MAX_TICK_MS,
            });
        }
        let title = args.title.trim();
        if title.is_empty() {
            return Err(ConfigError::EmptyTitle);
        }
        Ok(Self {
            separator: args.separator,
            order: args.order,
            tick_ms: args.tick_ms,
            title: title.to_string(),
            log_file: args.log_file,
            clipboard_fallback: !args.no_fallback,
        })
    }
}

/// Routes `log` output to the configured file. Without one, logging stays off
/// so nothing is written over the UI.
pub fn init_logging(settings: &Settings) -> Result<(), ConfigError> {
    let Some(path) = &settings.log_file else {
        log::set_max_level(log::LevelFilter::Off);
        return Ok(());
    };
    let file = File::create(path).map_err(|source| ConfigError::LogFile {
        path: path.clone(),
        source,
    })?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Settings, ConfigError> {
        let args = Args::try_parse_from(std::iter::once("stopwatch").chain(argv.iter().copied()))
            .expect("args should parse");
        Settings::try_from(args)
    }

    #[test]
    fn test_defaults() {
        let settings = parse(&[]).unwrap();
        assert_eq!(settings.separator, Separator::Dot);
        assert_eq!(settings.order, LogOrder::NewestFirst);
        assert_eq!(settings.tick_ms, DEFAULT_TICK_MS);
        assert_eq!(settings.title, DEFAULT_TITLE);
        assert!(settings.clipboard_fallback);
        assert!(settings.log_file.is_none());
    }

    #[test]
    fn test_overrides() {
        let settings = parse(&[
            "--separator",
            "colon",
            "--order",
            "oldest-first",
            "--tick-ms",
            "16",
            "--title",
            "  Heat 3 ",
            "--no-fallback",
        ])
        .unwrap();
        assert_eq!(settings.separator, Separator::Colon);
        assert_eq!(settings.order, LogOrder::OldestFirst);
        assert_eq!(settings.tick_ms, 16);
        assert_eq!(settings.title, "Heat 3");
        assert!(!settings.clipboard_fallback);
    }

    #[test]
    fn test_coarse_tick_rejected() {
        assert!(matches!(
            parse(&["--tick-ms", "40"]),
            Err(ConfigError::TickInterval { got: 40, .. })
        ));
        assert!(matches!(parse(&["--tick-ms", "0"]), Err(ConfigError::TickInterval { .. })));
    }

    #[test]
    fn test_blank_title_rejected() {
        assert!(matches!(parse(&["--title", "   "]), Err(ConfigError::EmptyTitle)));
    }

    #[test]
    fn test_bad_separator_is_a_parse_error() {
        let res = Args::try_parse_from(["stopwatch", "--separator", "comma"]);
        assert!(res.is_err());
    }
}
