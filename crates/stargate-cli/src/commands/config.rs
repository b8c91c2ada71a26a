//! Config command implementation.

use anyhow::{bail, Context, Result};

use stargate_core::config::{parse_duration, Config};

use super::{ConfigAction, ConfigArgs};

/// Keys understood by `config get` and `config set`.
const KEYS: &[&str] = &[
    "portal.status_clear_delay",
    "portal.default_target",
    "backend.program",
    "backend.args",
    "backend.timeout",
    "ui.theme",
    "ui.tick_rate_ms",
];

/// Run the config command.
pub async fn run(args: ConfigArgs) -> Result<()> {
    match args.action {
        ConfigAction::Get { key } => {
            let config = Config::load().context("Failed to load configuration")?;
            match get_config_value(&config, &key) {
                Some(v) => println!("{}: {}", key, v),
                None => print_unknown_key(&key),
            }
        }

        ConfigAction::Set { key, value } => {
            let mut config = Config::load().context("Failed to load configuration")?;
            if set_config_value(&mut config, &key, &value)? {
                config.validate()?;
                config.save().context("Failed to save configuration")?;
                println!("Set {} = {}", key, value);
            } else {
                print_unknown_key(&key);
            }
        }

        ConfigAction::Show => {
            let config = Config::load().context("Failed to load configuration")?;
            println!();
            println!("Stargate Configuration");
            println!("{}", "─".repeat(50));
            println!();
            println!("[portal]");
            println!(
                "  status_clear_delay = \"{}s\"",
                config.portal.status_clear_delay.as_secs()
            );
            println!(
                "  default_target = {}",
                quoted_or_unset(config.portal.default_target.as_deref())
            );
            println!();
            println!("[backend]");
            println!(
                "  program = {}",
                quoted_or_unset(config.backend.program.as_deref())
            );
            println!("  args = {:?}", config.backend.args);
            println!(
                "  timeout = {}",
                config
                    .backend
                    .timeout
                    .map_or_else(|| "(unset)".to_string(), |t| format!("\"{}s\"", t.as_secs()))
            );
            println!();
            println!("[ui]");
            println!("  theme = \"{}\"", config.ui.theme);
            println!("  tick_rate_ms = {}", config.ui.tick_rate_ms);
            println!();
        }

        ConfigAction::Path => {
            println!("{}", Config::config_path().display());
        }

        ConfigAction::Reset => {
            let config = Config::default();
            config.save().context("Failed to save configuration")?;
            println!("Configuration reset to defaults.");
        }
    }

    Ok(())
}

fn print_unknown_key(key: &str) {
    println!("Unknown configuration key: {}", key);
    println!("Known keys: {}", KEYS.join(", "));
}

fn quoted_or_unset(value: Option<&str>) -> String {
    value.map_or_else(|| "(unset)".to_string(), |v| format!("\"{}\"", v))
}

fn get_config_value(config: &Config, key: &str) -> Option<String> {
    let unset = || "(unset)".to_string();
    match key {
        "portal.status_clear_delay" => Some(format!(
            "{}s",
            config.portal.status_clear_delay.as_secs()
        )),
        "portal.default_target" => Some(config.portal.default_target.clone().unwrap_or_else(unset)),
        "backend.program" => Some(config.backend.program.clone().unwrap_or_else(unset)),
        "backend.args" => Some(config.backend.args.join(" ")),
        "backend.timeout" => Some(
            config
                .backend
                .timeout
                .map_or_else(unset, |t| format!("{}s", t.as_secs())),
        ),
        "ui.theme" => Some(config.ui.theme.clone()),
        "ui.tick_rate_ms" => Some(config.ui.tick_rate_ms.to_string()),
        _ => None,
    }
}

fn set_config_value(config: &mut Config, key: &str, value: &str) -> Result<bool> {
    match key {
        "portal.status_clear_delay" => {
            config.portal.status_clear_delay = duration(value)?;
            Ok(true)
        }
        "portal.default_target" => {
            config.portal.default_target = optional(value);
            Ok(true)
        }
        "backend.program" => {
            config.backend.program = optional(value);
            Ok(true)
        }
        "backend.args" => {
            config.backend.args = value.split_whitespace().map(str::to_string).collect();
            Ok(true)
        }
        "backend.timeout" => {
            config.backend.timeout = match optional(value) {
                Some(v) => Some(duration(&v)?),
                None => None,
            };
            Ok(true)
        }
        "ui.theme" => {
            config.ui.theme = value.trim().to_lowercase();
            Ok(true)
        }
        "ui.tick_rate_ms" => {
            config.ui.tick_rate_ms = value
                .trim()
                .parse()
                .with_context(|| format!("'{}' is not a number", value))?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn duration(value: &str) -> Result<std::time::Duration> {
    match parse_duration(value) {
        Some(d) => Ok(d),
        None => bail!("'{}' is not a duration (try 4s, 2m or 1h)", value),
    }
}

/// `none` or an empty value unsets an optional key.
fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_every_key_round_trips_through_get() {
        let config = Config::default();
        for key in KEYS {
            assert!(get_config_value(&config, key).is_some(), "{key}");
        }
        assert!(get_config_value(&config, "portal.nope").is_none());
    }

    #[test]
    fn test_set_values() {
        let mut config = Config::default();

        assert!(set_config_value(&mut config, "portal.status_clear_delay", "10s").unwrap());
        assert_eq!(config.portal.status_clear_delay, Duration::from_secs(10));

        assert!(set_config_value(&mut config, "portal.default_target", " 10.0.0.5 ").unwrap());
        assert_eq!(config.portal.default_target.as_deref(), Some("10.0.0.5"));

        assert!(set_config_value(&mut config, "backend.args", "--to {target} {file}").unwrap());
        assert_eq!(config.backend.args, vec!["--to", "{target}", "{file}"]);

        assert!(set_config_value(&mut config, "backend.timeout", "2m").unwrap());
        assert_eq!(config.backend.timeout, Some(Duration::from_secs(120)));

        assert!(set_config_value(&mut config, "ui.theme", "Light").unwrap());
        assert_eq!(config.ui.theme, "light");

        assert!(!set_config_value(&mut config, "unknown", "x").unwrap());
    }

    #[test]
    fn test_none_unsets_optional_keys() {
        let mut config = Config::default();
        config.backend.program = Some("/bin/send".to_string());
        config.backend.timeout = Some(Duration::from_secs(5));

        set_config_value(&mut config, "backend.program", "none").unwrap();
        set_config_value(&mut config, "backend.timeout", "").unwrap();

        assert!(config.backend.program.is_none());
        assert!(config.backend.timeout.is_none());
    }

    #[test]
    fn test_bad_values_are_rejected() {
        let mut config = Config::default();
        assert!(set_config_value(&mut config, "portal.status_clear_delay", "soon").is_err());
        assert!(set_config_value(&mut config, "ui.tick_rate_ms", "fast").is_err());
        assert!(
            set_config_value(&mut config, "portal.status_clear_delay", "5124095576030432h")
                .is_err()
        );

        assert!(set_config_value(&mut config, "portal.status_clear_delay", "48h").unwrap());
        assert!(config.validate().is_err());
    }
}
