use anyhow::Context as _;

use crate::cli::StoreKind;

/// Connection settings for the WordPress install, read from the process
/// environment (and `.env`, when present).
#[derive(Debug, Clone, Default)]
pub struct WordPressConfig {
    pub site_url: Option<String>,
    pub wp_cli_bin: String,
    pub ssh_host: Option<String>,
    pub ssh_port: Option<u16>,
    pub ssh_user: Option<String>,
    pub remote_path: Option<String>,
    pub api_user: Option<String>,
    pub api_password: Option<String>,
}

impl WordPressConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let ssh_port = match env_opt("WP_SSH_PORT") {
            Some(raw) => Some(
                raw.parse::<u16>()
                    .with_context(|| format!("WP_SSH_PORT is not a port number: {raw}"))?,
            ),
            None => None,
        };

        Ok(Self {
            site_url: env_opt("WP_SITE_URL"),
            wp_cli_bin: env_opt("WP_CLI_BIN").unwrap_or_else(|| "wp".to_owned()),
            ssh_host: env_opt("WP_SSH_HOST"),
            ssh_port,
            ssh_user: env_opt("WP_SSH_USER"),
            remote_path: env_opt("WP_REMOTE_PATH"),
            api_user: env_opt("WP_API_USER"),
            api_password: env_opt("WP_API_PASSWORD"),
        })
    }

    /// Settings the given store needs but does not have.
    pub fn validate(&self, store: StoreKind) -> Vec<String> {
        let mut errors = Vec::new();
        match store {
            StoreKind::WpCli => {
                if self.wp_cli_bin.trim().is_empty() {
                    errors.push("WP_CLI_BIN is empty".to_owned());
                }
                if self.ssh_host.is_none() && (self.ssh_user.is_some() || self.ssh_port.is_some())
                {
                    errors.push("WP_SSH_USER/WP_SSH_PORT require WP_SSH_HOST".to_owned());
                }
            }
            StoreKind::Rest => {
                match self.site_url.as_deref() {
                    None => errors.push("WP_SITE_URL is required".to_owned()),
                    Some(raw) => {
                        if let Err(err) = url::Url::parse(raw) {
                            errors.push(format!("WP_SITE_URL is not a valid URL: {err}"));
                        }
                    }
                }
                if self.api_user.is_none() {
                    errors.push("WP_API_USER is required".to_owned());
                }
                if self.api_password.is_none() {
                    errors.push("WP_API_PASSWORD is required".to_owned());
                }
            }
        }
        errors
    }

    /// Value for WP-CLI's `--ssh=` flag: `[user@]host[:port][path]`.
    pub fn ssh_target(&self) -> Option<String> {
        let host = self.ssh_host.as_deref()?;
        let mut target = String::new();
        if let Some(user) = self.ssh_user.as_deref() {
            target.push_str(user);
            target.push('@');
        }
        target.push_str(host);
        if let Some(port) = self.ssh_port {
            target.push_str(&format!(":{port}"));
        }
        if let Some(path) = self.remote_path.as_deref() {
            if !path.starts_with('/') {
                target.push('/');
            }
            target.push_str(path);
        }
        Some(target)
    }

    /// Where the run is pointed, for logs.
    pub fn describe_target(&self) -> String {
        self.site_url
            .clone()
            .or_else(|| self.ssh_target())
            .unwrap_or_else(|| "local WordPress install".to_owned())
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WordPressConfig {
        WordPressConfig {
            wp_cli_bin: "wp".to_owned(),
            ..WordPressConfig::default()
        }
    }

    #[test]
    fn ssh_target_includes_user_port_and_path() {
        let cfg = WordPressConfig {
            ssh_host: Some("example.com".to_owned()),
            ssh_port: Some(2222),
            ssh_user: Some("deploy".to_owned()),
            remote_path: Some("var/www/html".to_owned()),
            ..config()
        };
        assert_eq!(
            cfg.ssh_target().as_deref(),
            Some("deploy@example.com:2222/var/www/html")
        );
    }

    #[test]
    fn ssh_target_is_none_without_host() {
        assert_eq!(config().ssh_target(), None);
    }

    #[test]
    fn wp_cli_store_needs_host_when_ssh_details_are_set() {
        let cfg = WordPressConfig {
            ssh_user: Some("deploy".to_owned()),
            ..config()
        };
        assert_eq!(cfg.validate(StoreKind::WpCli).len(), 1);
        assert!(config().validate(StoreKind::WpCli).is_empty());
    }

    #[test]
    fn rest_store_needs_url_and_credentials() {
        let errors = config().validate(StoreKind::Rest);
        assert_eq!(errors.len(), 3, "{errors:?}");

        let cfg = WordPressConfig {
            site_url: Some("not a url".to_owned()),
            api_user: Some("admin".to_owned()),
            api_password: Some("xxxx".to_owned()),
            ..config()
        };
        let errors = cfg.validate(StoreKind::Rest);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("WP_SITE_URL is not a valid URL"));
    }
}
