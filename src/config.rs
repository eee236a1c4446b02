use config::{Config, ConfigError, Environment, File, FileFormat};

const ENV_PREFIX: &str = "COFFER";

/// `COFFER__SECTION__KEY` overrides. Values stay strings so that keys like
/// the account prefix keep leading zeros; numeric fields are converted on
/// deserialization.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).separator("__")
}

fn load<T: serde::de::DeserializeOwned>(
    file: impl config::Source + Send + Sync + 'static,
    environment: Environment,
) -> Result<T, ConfigError> {
    Config::builder()
        .add_source(file)
        .add_source(environment)
        .build()?
        .try_deserialize()
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct CofferServerConfig {
    pub http: HttpConfig,
    pub persistence: PersistenceConfig,
    #[serde(default)]
    pub provisioning: ProvisioningConfig,
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl CofferServerConfig {
    /// Reads a TOML file, then applies `COFFER__SECTION__KEY` environment overrides.
    pub fn from_file(config_path: &str) -> Result<Self, ConfigError> {
        load(File::new(config_path, FileFormat::Toml), environment())
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        load(File::from_str(contents, FileFormat::Toml), environment())
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct CofferClientConfig {
    pub http: HttpConfig,
    pub client: ClientConfig,
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl CofferClientConfig {
    pub fn from_file(config_path: &str) -> Result<Self, ConfigError> {
        load(File::new(config_path, FileFormat::Toml), environment())
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct PersistenceConfig {
    pub db_path: String,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct ProvisioningConfig {
    pub prefix: String,
    pub digits: u32,
    pub max_attempts: u32,
    pub open_demo_account: bool,
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        ProvisioningConfig {
            prefix: "001".to_string(),
            digits: 7,
            max_attempts: 5,
            open_demo_account: false,
        }
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct ClientConfig {
    pub tasks: u32,
    /// Percent of iterations that open an account.
    pub create_chance: u32,
    /// Percent of iterations that deposit; the rest transfer.
    pub deposit_chance: u32,
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_pause_ms() -> u64 {
    50
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_with_defaults() {
        let config = CofferServerConfig::from_toml(
            r#"
            [http]
            address = "127.0.0.1"
            port = 8000

            [persistence]
            db_path = "coffer.db"
            "#,
        )
        .unwrap();

        assert_eq!(config.http.port, 8000);
        assert_eq!(config.persistence.db_path, "coffer.db");
        assert_eq!(config.provisioning.prefix, "001");
        assert_eq!(config.provisioning.digits, 7);
        assert_eq!(config.provisioning.max_attempts, 5);
        assert!(!config.debug);
        assert_eq!(config.log_dir, "logs");
    }

    #[test]
    fn test_server_config_overrides() {
        let config = CofferServerConfig::from_toml(
            r#"
            debug = true

            [http]
            address = "0.0.0.0"
            port = 9000

            [persistence]
            db_path = ":memory:"

            [provisioning]
            prefix = "002"
            digits = 8
            open_demo_account = true
            "#,
        )
        .unwrap();

        assert!(config.debug);
        assert_eq!(config.provisioning.prefix, "002");
        assert_eq!(config.provisioning.digits, 8);
        assert_eq!(config.provisioning.max_attempts, 5);
        assert!(config.provisioning.open_demo_account);
    }

    fn from_toml_with_env(contents: &str, vars: &[(&str, &str)]) -> CofferServerConfig {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<config::Map<String, String>>();

        load(
            File::from_str(contents, FileFormat::Toml),
            environment().source(Some(vars)),
        )
        .unwrap()
    }

    #[test]
    fn test_environment_overrides_keep_strings_and_convert_numbers() {
        let config = from_toml_with_env(
            r#"
            [http]
            address = "127.0.0.1"
            port = 8000

            [persistence]
            db_path = "coffer.db"

            [provisioning]
            prefix = "777"
            "#,
            &[
                ("COFFER__PROVISIONING__PREFIX", "001"),
                ("COFFER__PROVISIONING__DIGITS", "8"),
                ("COFFER__HTTP__PORT", "9100"),
                ("COFFER__DEBUG", "true"),
            ],
        );

        assert_eq!(config.provisioning.prefix, "001");
        assert_eq!(config.provisioning.digits, 8);
        assert_eq!(config.http.port, 9100);
        assert!(config.debug);
    }

    #[test]
    fn test_missing_section_is_an_error() {
        let result = CofferServerConfig::from_toml(
            r#"
            [http]
            address = "127.0.0.1"
            port = 8000
            "#,
        );

        assert!(result.is_err());
    }
}
