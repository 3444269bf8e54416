use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub backend_url: Option<String>,
    pub email_address: Option<String>,
    pub display_name: Option<String>,
    #[serde(default)]
    pub folders: Vec<String>,
}

impl Config {
    pub fn backend_url(&self) -> &str {
        self.backend_url.as_deref().unwrap_or(DEFAULT_BACKEND_URL)
    }

    pub fn email_address(&self) -> Result<&str> {
        self.email_address
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("email_address not set in config"))
    }

    /// Name shown in the top bar; falls back to the address.
    pub fn display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email_address.as_deref())
            .unwrap_or("")
    }
}

fn config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("no config dir available"))?
        .join("webmail_client"))
}

pub fn config_path() -> Result<PathBuf> {
    let mut p = config_dir()?;
    fs::create_dir_all(&p)?;
    p.push("config.toml");
    Ok(p)
}

/// Log file used while the TUI owns the terminal.
pub fn log_path() -> Result<PathBuf> {
    Ok(config_path()?.with_file_name("webmail_client.log"))
}

pub fn load_config() -> Result<Config> {
    let path = config_path()?;
    if !path.exists() {
        // create a template config for users to edit
        let sample = Config {
            backend_url: Some(DEFAULT_BACKEND_URL.to_string()),
            email_address: Some("you@example.com".to_string()),
            display_name: Some("Your Name".to_string()),
            folders: vec!["work".to_string(), "family".to_string()],
        };
        let tom = toml::to_string_pretty(&sample)?;
        fs::write(&path, tom)?;
        return Err(anyhow::anyhow!(
            "Created template config at {}, edit it and run again",
            path.display()
        ));
    }
    let s = fs::read_to_string(path)?;
    parse_config(&s)
}

pub fn parse_config(s: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(s)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg = parse_config(r#"email_address = "me@example.com""#).unwrap();
        assert_eq!(cfg.backend_url(), DEFAULT_BACKEND_URL);
        assert_eq!(cfg.email_address().unwrap(), "me@example.com");
        assert_eq!(cfg.display_name(), "me@example.com");
        assert!(cfg.folders.is_empty());
    }

    #[test]
    fn full_config() {
        let cfg = parse_config(
            r#"
            backend_url = "http://mail.local:9000"
            email_address = "me@example.com"
            display_name = "Me"
            folders = ["work", "travel"]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.backend_url(), "http://mail.local:9000");
        assert_eq!(cfg.display_name(), "Me");
        assert_eq!(cfg.folders, vec!["work", "travel"]);
    }

    #[test]
    fn log_file_sits_next_to_config() {
        let log = log_path().unwrap();
        assert_eq!(log.parent(), config_path().unwrap().parent());
        assert!(log.ends_with("webmail_client/webmail_client.log"));
    }

    #[test]
    fn missing_address_is_an_error() {
        let cfg = parse_config("").unwrap();
        assert!(cfg.email_address().is_err());
    }
}
