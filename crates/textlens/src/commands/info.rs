//! Info command implementation

use clap::Args;
use owo_colors::Style;
use serde::Serialize;
use tracing::{debug, instrument};

use textlens_core::config::{Config, ConfigSources};

use super::{label, paint};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    homepage: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            homepage: env!("CARGO_PKG_HOMEPAGE"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
    keywords: KeywordInfo,
    cache: CacheInfo,
}

#[derive(Serialize)]
struct KeywordInfo {
    top_n: usize,
    case_sensitive: bool,
    min_word_length: usize,
    granularity: &'static str,
    stop_words: usize,
}

#[derive(Serialize)]
struct CacheInfo {
    ttl_ms: u64,
    capacity: usize,
    eviction: &'static str,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        let options = config.keywords.to_options();
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            max_input_bytes: config.input_limit(),
            keywords: KeywordInfo {
                top_n: options.top_n,
                case_sensitive: options.case_sensitive,
                min_word_length: options.min_word_length,
                granularity: options.granularity.as_str(),
                stop_words: options.stop_words.len(),
            },
            cache: CacheInfo {
                ttl_ms: config.cache.ttl_ms,
                capacity: config.cache.capacity,
                eviction: config.cache.eviction.as_str(),
            },
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `config` - Loaded configuration
/// * `sources` - Config source metadata from loading
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    let info = PackageInfo::new();

    debug!(json_output = global_json, "executing info command");

    let config_info = ConfigInfo::from_config(config, sources);
    let full_info = FullInfo {
        package: info,
        config: config_info,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
    } else {
        println!(
            "{} {}",
            paint(&full_info.package.name, Style::new().bold()),
            paint(&full_info.package.version, Style::new().green())
        );
        if !full_info.package.description.is_empty() {
            println!("{}", full_info.package.description);
        }
        if !full_info.package.license.is_empty() {
            println!("{}: {}", label("License"), full_info.package.license);
        }
        if !full_info.package.repository.is_empty() {
            println!(
                "{}: {}",
                label("Repository"),
                paint(&full_info.package.repository, Style::new().cyan())
            );
        }
        if !full_info.package.homepage.is_empty() {
            println!(
                "{}: {}",
                label("Homepage"),
                paint(&full_info.package.homepage, Style::new().cyan())
            );
        }

        // Configuration section
        println!();
        println!("{}", paint("Configuration", Style::new().bold().underline()));
        if let Some(ref path) = full_info.config.config_file {
            println!("{}: {}", label("Config file"), paint(path, Style::new().cyan()));
        } else {
            println!(
                "{}: {}",
                label("Config file"),
                paint("none loaded", Style::new().yellow())
            );
        }
        println!("{}: {}", label("Log level"), full_info.config.log_level);
        if let Some(ref dir) = full_info.config.log_dir {
            println!("{}: {}", label("Log directory"), dir);
        }

        match full_info.config.max_input_bytes {
            Some(max) => println!("{}: {} bytes", label("Input limit"), max),
            None => println!(
                "{}: {}",
                label("Input limit"),
                paint("disabled", Style::new().yellow())
            ),
        }

        let keywords = &full_info.config.keywords;
        println!();
        println!("{}", paint("Keywords", Style::new().bold().underline()));
        println!("{}: {}", label("Top entries"), keywords.top_n);
        println!("{}: {}", label("Case sensitive"), keywords.case_sensitive);
        println!("{}: {}", label("Min word length"), keywords.min_word_length);
        println!("{}: {}", label("Granularity"), keywords.granularity);
        println!("{}: {}", label("Stop words"), keywords.stop_words);

        let cache = &full_info.config.cache;
        println!();
        println!("{}", paint("Cache", Style::new().bold().underline()));
        println!("{}: {} ms", label("TTL"), cache.ttl_ms);
        println!("{}: {}", label("Capacity"), cache.capacity);
        println!("{}: {}", label("Eviction"), cache.eviction);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config::default()
    }

    fn test_sources() -> ConfigSources {
        ConfigSources::default()
    }

    #[test]
    fn test_cmd_info_text_succeeds() {
        assert!(cmd_info(InfoArgs::default(), false, &test_config(), &test_sources()).is_ok());
    }

    #[test]
    fn test_cmd_info_json_via_global() {
        assert!(cmd_info(InfoArgs::default(), true, &test_config(), &test_sources()).is_ok());
    }

    #[test]
    fn test_config_info_no_file() {
        let config = Config::default();
        let sources = ConfigSources::default();
        let info = ConfigInfo::from_config(&config, &sources);
        assert!(info.config_file.is_none());
        assert_eq!(info.log_level, "info");
        assert_eq!(
            info.max_input_bytes,
            Some(textlens_core::DEFAULT_MAX_INPUT_BYTES)
        );
        assert_eq!(info.keywords.top_n, 10);
        assert_eq!(info.keywords.granularity, "all");
        assert_eq!(info.cache.eviction, "lru");
    }

    #[test]
    fn disabled_limit_reports_none() {
        let config = Config {
            disable_input_limit: true,
            max_input_bytes: Some(10),
            ..Config::default()
        };
        let info = ConfigInfo::from_config(&config, &ConfigSources::default());
        assert!(info.max_input_bytes.is_none());
    }
}
