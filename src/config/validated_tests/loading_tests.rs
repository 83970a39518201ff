//! Tests for configuration loading and file generation.

use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, tempdir};

use super::super::validated::write_default_config;
use super::*;

mod load {
    use super::*;

    #[test]
    fn reads_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [auth]
            client_id = "file-id"
            client_secret = "file-secret"

            [api]
            hub_id = "file-hub"
        "#
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let config = ValidatedConfig::load(&cli(&["--config", path])).unwrap();

        assert_eq!(config.credentials.client_id(), "file-id");
        assert_eq!(config.hub_id.as_deref(), Some("file-hub"));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let result = ValidatedConfig::load(&authed(&["--config", path.to_str().unwrap()]));

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[auth\nclient_id = ").unwrap();

        let path = file.path().to_str().unwrap();
        let result = ValidatedConfig::load(&authed(&["--config", path]));

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }
}

mod init {
    use super::*;

    #[test]
    fn writes_template() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("amplience-mgmt.toml");

        write_default_config(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[auth]"));
        assert!(TomlConfig::parse(&content).is_ok());
    }

    #[test]
    fn written_template_loads_with_cli_credentials() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("amplience-mgmt.toml");
        write_default_config(&path).unwrap();

        let config =
            ValidatedConfig::load(&authed(&["--config", path.to_str().unwrap()])).unwrap();

        assert_eq!(config.credentials.client_id(), "id");
    }

    #[test]
    fn unwritable_path_is_write_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("config.toml");

        let result = write_default_config(&path);

        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }
}
