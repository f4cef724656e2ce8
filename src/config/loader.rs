//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::FraudShareConfig;
use super::secret::secret_string;
use crate::domain::errors::FraudShareError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from an optional TOML file plus the environment
///
/// This function:
/// 1. Reads the TOML file, if one is given
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into FraudShareConfig (defaults when no file)
/// 4. Applies environment variable overrides
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - A given file cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use fraudshare::config::loader::load_config;
///
/// let config = load_config(Some("fraudshare.toml")).expect("Failed to load config");
/// let env_only = load_config(None::<&str>).expect("Failed to load config");
/// ```
pub fn load_config(path: Option<impl AsRef<Path>>) -> Result<FraudShareConfig> {
    let mut config = match path {
        Some(path) => parse_config_file(path.as_ref())?,
        None => FraudShareConfig::default(),
    };

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        FraudShareError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<FraudShareConfig> {
    if !path.exists() {
        return Err(FraudShareError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        FraudShareError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    toml::from_str(&contents)
        .map_err(|e| FraudShareError::Configuration(format!("Failed to parse TOML: {e}")))
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. All missing variables are reported in
/// one error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(FraudShareError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| {
        FraudShareError::Configuration(format!("Invalid value for {key}: '{raw}'"))
    })
}

/// Applies environment variable overrides
///
/// The pipeline variables keep the names the deployment environment already
/// provides (`BANK_ID`, `MAX_TRIES`, `SLEEP_S`, `DATA_ENGINE_URL`,
/// `DV_TOKEN`); the rest use the `FRAUDSHARE_` prefix.
fn apply_env_overrides(config: &mut FraudShareConfig) -> Result<()> {
    if let Ok(val) = std::env::var("FRAUDSHARE_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Data engine overrides
    if let Ok(val) = std::env::var("DATA_ENGINE_URL") {
        config.data_engine.base_url = val;
    }
    if let Ok(val) = std::env::var("DV_TOKEN") {
        // An empty token means anonymous access
        config.data_engine.token = (!val.is_empty()).then(|| secret_string(val));
    }
    if let Ok(val) = std::env::var("FRAUDSHARE_DATA_ENGINE_TIMEOUT_SECONDS") {
        config.data_engine.timeout_seconds =
            parse_env("FRAUDSHARE_DATA_ENGINE_TIMEOUT_SECONDS", &val)?;
    }

    // Pipeline overrides
    if let Ok(val) = std::env::var("BANK_ID") {
        config.pipeline.bank_id = val;
    }
    if let Ok(val) = std::env::var("MAX_TRIES") {
        config.pipeline.max_tries = parse_env("MAX_TRIES", &val)?;
    }
    if let Ok(val) = std::env::var("SLEEP_S") {
        config.pipeline.sleep_seconds = parse_env("SLEEP_S", &val)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("FRAUDSHARE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("FRAUDSHARE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
