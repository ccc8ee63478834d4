//! Runtime configuration collected from the command line

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Large enough to request every known catalog entry in one list call.
pub const DEFAULT_CATALOG_LIMIT: u32 = 1000;
pub const DEFAULT_CONCURRENCY: usize = 16;
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;

/// Command line flags, flattened into the binary's argument parser.
#[derive(clap::Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Base URL of the PokeAPI (v2) service
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Entries per page in the paginated view
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: u32,

    /// Number of entries requested when resolving the whole catalog for search
    #[arg(long, default_value_t = DEFAULT_CATALOG_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
    pub catalog_limit: u32,

    /// Maximum number of entries resolved concurrently
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY, value_parser = parse_concurrency)]
    pub concurrency: usize,

    /// Quiet period after the last keystroke before searching the full catalog
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS)]
    pub debounce_ms: u64,

    /// Seconds a resolved page is served from cache before it is refetched
    #[arg(long, default_value_t = DEFAULT_CACHE_TTL_SECS)]
    pub cache_ttl_secs: u64,

    /// Write logs to this file (logging is off without it)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. "info" or "pokedex=debug"
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

fn parse_concurrency(value: &str) -> Result<usize, String> {
    let parsed: usize = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if parsed == 0 {
        return Err("concurrency must be at least 1".to_string());
    }
    Ok(parsed)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_base: String,
    pub page_size: u32,
    pub catalog_limit: u32,
    pub concurrency: usize,
    pub debounce: Duration,
    pub cache_ttl: Duration,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            catalog_limit: DEFAULT_CATALOG_LIMIT,
            concurrency: DEFAULT_CONCURRENCY,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl From<ConfigArgs> for Config {
    fn from(args: ConfigArgs) -> Self {
        Self {
            api_base: args.api_base.trim_end_matches('/').to_string(),
            page_size: args.page_size,
            catalog_limit: args.catalog_limit,
            concurrency: args.concurrency,
            debounce: Duration::from_millis(args.debounce_ms),
            cache_ttl: Duration::from_secs(args.cache_ttl_secs),
            log_file: args.log_file,
            log_level: args.log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        config: ConfigArgs,
    }

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        let argv = std::iter::once("pokedex").chain(args.iter().copied());
        TestCli::try_parse_from(argv).map(|cli| Config::from(cli.config))
    }

    #[test]
    fn test_defaults_match_config_default() {
        let config = parse(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.page_size, 10);
        assert_eq!(config.debounce, Duration::from_millis(1000));
    }

    #[test]
    fn test_api_base_trailing_slash_is_trimmed() {
        let config = parse(&["--api-base", "http://localhost:8080/api/v2/"]).unwrap();
        assert_eq!(config.api_base, "http://localhost:8080/api/v2");
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        assert!(parse(&["--concurrency", "0"]).is_err());
        assert!(parse(&["--page-size", "0"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = parse(&[
            "--concurrency",
            "4",
            "--debounce-ms",
            "250",
            "--cache-ttl-secs",
            "0",
            "--log-file",
            "/tmp/pokedex.log",
        ])
        .unwrap();
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.debounce, Duration::from_millis(250));
        assert_eq!(config.cache_ttl, Duration::ZERO);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/pokedex.log")));
    }
}
