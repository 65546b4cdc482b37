//! Runtime configuration from command-line flags and environment variables.

use clap::{ArgAction, Parser};

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_PROTECTED_PREFIX: &str = "/dashboard";
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Service settings. Each flag falls back to an environment variable, then
/// to a default.
#[derive(Clone, Debug, Parser)]
#[command(name = "trellis", version, about)]
pub struct Config {
    /// Socket address to listen on.
    #[arg(long, env = "TRELLIS_ADDR", default_value = DEFAULT_ADDR)]
    pub addr: String,

    /// Whether requests are treated as authenticated. When false, paths under
    /// the protected prefix redirect to the login path.
    #[arg(
        long,
        env = "TRELLIS_AUTHENTICATED",
        default_value_t = true,
        action = ArgAction::Set,
    )]
    pub authenticated: bool,

    /// Path prefix guarded by the access gate.
    #[arg(long, env = "TRELLIS_PROTECTED_PREFIX", default_value = DEFAULT_PROTECTED_PREFIX)]
    pub protected_prefix: String,

    /// Where the access gate sends unauthenticated requests.
    #[arg(long, env = "TRELLIS_LOGIN_PATH", default_value = DEFAULT_LOGIN_PATH)]
    pub login_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_owned(),
            authenticated: true,
            protected_prefix: DEFAULT_PROTECTED_PREFIX.to_owned(),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "trellis",
            "--addr", "127.0.0.1:8080",
            "--authenticated", "false",
            "--login-path", "/signin",
        ])
        .unwrap();
        assert_eq!(config.addr, "127.0.0.1:8080");
        assert!(!config.authenticated);
        assert_eq!(config.login_path, "/signin");
    }

    // The only test that writes the process environment. Every other parse
    // test passes the affected settings as flags, so their results do not
    // depend on it.
    #[test]
    fn environment_fills_missing_flags() {
        let vars = [
            ("TRELLIS_ADDR", "127.0.0.1:9090"),
            ("TRELLIS_AUTHENTICATED", "false"),
            ("TRELLIS_LOGIN_PATH", "/sso"),
        ];
        // SAFETY: no other test in the crate writes these variables.
        unsafe {
            for (key, value) in vars {
                std::env::set_var(key, value);
            }
        }

        let from_env = Config::try_parse_from(["trellis"]);
        let overridden = Config::try_parse_from(["trellis", "--authenticated", "true"]);

        // SAFETY: as above.
        unsafe {
            for (key, _) in vars {
                std::env::remove_var(key);
            }
        }

        let config = from_env.unwrap();
        assert_eq!(config.addr, "127.0.0.1:9090");
        assert!(!config.authenticated);
        assert_eq!(config.login_path, "/sso");
        assert_eq!(config.protected_prefix, DEFAULT_PROTECTED_PREFIX);

        let config = overridden.unwrap();
        assert!(config.authenticated);
        assert_eq!(config.addr, "127.0.0.1:9090");
    }

    #[test]
    fn rejects_non_boolean_flag() {
        assert!(Config::try_parse_from(["trellis", "--authenticated", "maybe"]).is_err());
    }

    #[test]
    fn clap_definition_is_valid() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
