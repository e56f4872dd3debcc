pub mod constants;

pub use etcetera::AppStrategy;
use etcetera::{AppStrategyArgs, choose_app_strategy};

use std::env;
use std::path::PathBuf;

pub fn create_strategy() -> std::result::Result<impl AppStrategy, etcetera::HomeDirError> {
    choose_app_strategy(AppStrategyArgs {
        top_level_domain: constants::TOP_LEVEL_DOMAIN.to_string(),
        author: constants::AUTHOR.to_string(),
        app_name: constants::APP_NAME.to_string(),
    })
}

/// Path of the CLI configuration file, honoring an explicit override.
pub fn config_file_path<S: AppStrategy>(strategy: &S, explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| strategy.config_dir().join(constants::CLI_CONFIG_FILE_NAME))
}

/// Default search index path taken from the environment, if set.
pub fn index_path_from_env() -> Option<PathBuf> {
    env::var_os(constants::INDEX_PATH_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
