use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub cors_extra_origins: Vec<String>,

    /// CSV file holding every entry.
    pub data_file: PathBuf,
    /// Default window length for the overview endpoint.
    pub overview_days: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parse_var("PORT", 8080)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            cors_extra_origins: env::var("CORS_EXTRA_ORIGINS")
                .map(|extra| split_list(&extra))
                .unwrap_or_default(),

            data_file: env::var("DATA_FILE")
                .unwrap_or_else(|_| "wellness_data.csv".into())
                .into(),
            overview_days: parse_var("OVERVIEW_DAYS", 7)?,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a number, got {raw:?}")),
        _ => Ok(default),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_defaults_when_unset() {
        let value: u32 = parse_var("WELLNESS_TEST_UNSET_VAR", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("WELLNESS_TEST_BAD_PORT", "eighty");
        let result: anyhow::Result<u16> = parse_var("WELLNESS_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
    }

    #[test]
    fn test_split_list_skips_blanks() {
        assert_eq!(
            split_list("http://a.local, ,http://b.local,"),
            vec!["http://a.local", "http://b.local"]
        );
    }
}
