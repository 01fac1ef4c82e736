//! Runtime settings loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Directory used when no data directory is configured.
pub const DEFAULT_DATA_DIR: &str = "rbac-data";

/// Settings read from the environment and configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RBAC_ADMIN")]
pub struct AdminSettings {
    /// Directory holding the `users.json` and `roles.json` snapshots.
    pub data_dir: Option<PathBuf>,
    /// Emit JSON log lines instead of the human-readable format.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

impl AdminSettings {
    /// Return the configured data directory, falling back to the default.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// Pick `flag` when given, otherwise the configured directory.
    #[must_use]
    pub fn resolve_data_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.unwrap_or_else(|| self.data_dir())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> AdminSettings {
        AdminSettings::load_from_iter([OsString::from("rbac-admin")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env([
            ("RBAC_ADMIN_DATA_DIR", None::<String>),
            ("RBAC_ADMIN_JSON_LOGS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(!settings.json_logs);
        assert_eq!(settings.data_dir(), PathBuf::from(DEFAULT_DATA_DIR));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("RBAC_ADMIN_DATA_DIR", Some("/srv/rbac".to_owned())),
            ("RBAC_ADMIN_JSON_LOGS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.json_logs);
        assert_eq!(settings.data_dir(), PathBuf::from("/srv/rbac"));
    }

    #[rstest]
    fn flag_wins_over_configured_directory() {
        let settings = AdminSettings {
            data_dir: Some(PathBuf::from("/srv/rbac")),
            json_logs: false,
        };

        assert_eq!(
            settings.resolve_data_dir(Some(PathBuf::from("./local"))),
            PathBuf::from("./local")
        );
        assert_eq!(settings.resolve_data_dir(None), PathBuf::from("/srv/rbac"));
    }
}
