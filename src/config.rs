use std::time::Duration;

/// Default upstream endpoint (the site's WordPress AJAX handler).
pub const DEFAULT_SIR_URL: &str = "https://buscardniperu.com/wp-admin/admin-ajax.php";

/// How many browser-like headers are sent to the upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderProfile {
    /// Content type, user agent, origin/referer and the AJAX marker.
    Minimal,
    /// `Minimal` plus `Accept` and `Accept-Language`.
    Full,
}

impl std::str::FromStr for HeaderProfile {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(HeaderProfile::Minimal),
            "full" => Ok(HeaderProfile::Full),
            other => anyhow::bail!(
                "SIR_HEADER_PROFILE must be 'full' or 'minimal', got '{}'",
                other
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub sir_url: String,
    pub sir_timeout_secs: u64,
    pub header_profile: HeaderProfile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            sir_url: DEFAULT_SIR_URL.to_string(),
            sir_timeout_secs: 15,
            header_profile: HeaderProfile::Full,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            sir_url: std::env::var("SIR_UPSTREAM_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|url| {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("SIR_UPSTREAM_URL must start with http:// or https://");
                    }
                    Ok(url)
                })
                .transpose()?
                .unwrap_or_else(|| DEFAULT_SIR_URL.to_string()),
            sir_timeout_secs: std::env::var("SIR_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| anyhow::anyhow!("SIR_TIMEOUT_SECS must be a positive integer"))?,
            header_profile: std::env::var("SIR_HEADER_PROFILE")
                .unwrap_or_else(|_| "full".to_string())
                .parse()?,
        };

        tracing::debug!("SIR upstream URL: {}", config.sir_url);
        tracing::debug!(
            "SIR timeout: {}s, header profile: {:?}",
            config.sir_timeout_secs,
            config.header_profile
        );
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    pub fn sir_timeout(&self) -> Duration {
        Duration::from_secs(self.sir_timeout_secs)
    }
}
