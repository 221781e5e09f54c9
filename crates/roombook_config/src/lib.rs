use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::Path;

pub mod env_vars;
pub mod models;

pub use models::*;

/// Loads the configuration from `CONFIG_DIR` (default `./config`).
///
/// Sources in increasing precedence: `default.*`, `<RUN_ENV>.*` and
/// `ROOMBOOK__*` environment variables. `secret_from_env` markers are
/// resolved afterwards.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    load_config_from_dir(Path::new(&config_dir))
}

pub fn load_config_from_dir(dir: &Path) -> Result<AppConfig, ConfigError> {
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env_vars::get_config_prefix();

    let default_path = dir.join("default");
    let env_path = dir.join(&run_env);

    tracing::debug!(
        "loading config from {} and {}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .separator(env_vars::CONFIG_SEPARATOR)
                .try_parsing(true),
        );

    build_app_config(builder)
}

/// Builds the sources and resolves `secret_from_env` markers.
pub fn build_app_config(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig, ConfigError> {
    let mut raw: serde_json::Value = builder.build()?.try_deserialize()?;
    env_vars::inject_env_vars(&mut raw);
    serde_json::from_value(raw)
        .map_err(|err| ConfigError::Message(format!("invalid configuration: {err}")))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is taken from `DOTENV_OVERRIDE`, then from a first command line
/// argument starting with `.env`, and defaults to `.env`. Loading happens
/// once per process; a missing file is not an error.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    const SAMPLE: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 3000

        [auth]
        jwt_secret = "test-secret"

        [database]
        url = "sqlite::memory:"

        [[seed_rooms]]
        name = "Salle Alpha"
        capacity = 8
        equipment = ["projector", "whiteboard"]
    "#;

    #[test]
    fn test_build_app_config_from_toml() {
        let builder = Config::builder().add_source(File::from_str(SAMPLE, FileFormat::Toml));
        let config = build_app_config(builder).expect("config should parse");

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.jwt_secret, "test-secret");
        assert_eq!(config.auth.token_ttl_hours(), 168);
        assert_eq!(config.booking.time_zone(), "UTC");
        assert_eq!(config.booking.slot_minutes(), 30);
        assert_eq!(config.seed_rooms.len(), 1);
        assert!(config.seed_rooms[0].is_available);
        assert_eq!(config.seed_rooms[0].equipment, vec!["projector", "whiteboard"]);
    }

    #[test]
    fn test_missing_auth_section_is_an_error() {
        let builder = Config::builder().add_source(File::from_str(
            "[server]\nhost = \"0.0.0.0\"\nport = 80\n",
            FileFormat::Toml,
        ));
        assert!(build_app_config(builder).is_err());
    }
}
