use std::{env, time::Duration};

use anyhow::Context as _;

use pager_utils::{COMMAND_PREFIX, pagination::DEFAULT_SESSION_TIMEOUT};

const TOKEN_VAR: &str = "DISCORD_TOKEN";
const SESSION_TIMEOUT_VAR: &str = "PAGER_SESSION_TIMEOUT_SECS";
const PREFIX_VAR: &str = "PAGER_COMMAND_PREFIX";

/// Longest session timeout accepted from the environment: one week.
const MAX_SESSION_TIMEOUT_SECS: u64 = 7 * 24 * 60 * 60;

/// Runtime settings, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub discord_token: String,
    pub command_prefix: char,
    /// How long a paged embed keeps listening for reactions.
    pub session_timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("discord_token", &"<redacted>")
            .field("command_prefix", &self.command_prefix)
            .field("session_timeout", &self.session_timeout)
            .finish()
    }
}

impl Config {
    /// Read the configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let discord_token = lookup(TOKEN_VAR)
            .filter(|token| !token.trim().is_empty())
            .with_context(|| format!("{TOKEN_VAR} must be set"))?;

        let session_timeout = match lookup(SESSION_TIMEOUT_VAR) {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().with_context(|| {
                    format!("{SESSION_TIMEOUT_VAR} must be a number of seconds, got `{raw}`")
                })?;
                anyhow::ensure!(secs > 0, "{SESSION_TIMEOUT_VAR} must be greater than zero");
                anyhow::ensure!(
                    secs <= MAX_SESSION_TIMEOUT_SECS,
                    "{SESSION_TIMEOUT_VAR} must be at most {MAX_SESSION_TIMEOUT_SECS} seconds"
                );
                Duration::from_secs(secs)
            }
            None => DEFAULT_SESSION_TIMEOUT,
        };

        let command_prefix = match lookup(PREFIX_VAR) {
            Some(raw) => {
                let mut chars = raw.trim().chars();
                match (chars.next(), chars.next()) {
                    (Some(prefix), None) => prefix,
                    _ => anyhow::bail!("{PREFIX_VAR} must be a single character, got `{raw}`"),
                }
            }
            None => COMMAND_PREFIX,
        };

        Ok(Self {
            discord_token,
            command_prefix,
            session_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_only_token_is_set() {
        let config = config(&[(TOKEN_VAR, "abc")]).unwrap();

        assert_eq!(config.discord_token, "abc");
        assert_eq!(config.command_prefix, '!');
        assert_eq!(config.session_timeout, Duration::from_secs(900));
    }

    #[test]
    fn token_is_required() {
        assert!(config(&[]).is_err());
        assert!(config(&[(TOKEN_VAR, "  ")]).is_err());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config(&[
            (TOKEN_VAR, "abc"),
            (SESSION_TIMEOUT_VAR, " 60 "),
            (PREFIX_VAR, "?"),
        ])
        .unwrap();

        assert_eq!(config.command_prefix, '?');
        assert_eq!(config.session_timeout, Duration::from_secs(60));
    }

    #[test]
    fn malformed_overrides_are_rejected() {
        assert!(config(&[(TOKEN_VAR, "abc"), (SESSION_TIMEOUT_VAR, "soon")]).is_err());
        assert!(config(&[(TOKEN_VAR, "abc"), (SESSION_TIMEOUT_VAR, "0")]).is_err());
        assert!(config(&[(TOKEN_VAR, "abc"), (PREFIX_VAR, "!!")]).is_err());
    }

    #[test]
    fn session_timeout_is_bounded() {
        let longest = MAX_SESSION_TIMEOUT_SECS.to_string();
        let accepted = config(&[(TOKEN_VAR, "abc"), (SESSION_TIMEOUT_VAR, &longest)]).unwrap();
        assert_eq!(accepted.session_timeout, Duration::from_secs(MAX_SESSION_TIMEOUT_SECS));

        let too_long = (MAX_SESSION_TIMEOUT_SECS + 1).to_string();
        assert!(config(&[(TOKEN_VAR, "abc"), (SESSION_TIMEOUT_VAR, &too_long)]).is_err());
        assert!(
            config(&[(TOKEN_VAR, "abc"), (SESSION_TIMEOUT_VAR, "18446744073709551615")]).is_err()
        );
    }

    #[test]
    fn debug_output_hides_the_token() {
        let config = config(&[(TOKEN_VAR, "super-secret")]).unwrap();

        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
