pub const TOP_LEVEL_DOMAIN: &str = "org";
pub const AUTHOR: &str = "docsearch";
pub const APP_NAME: &str = "docsearch";

/// Name of the CLI configuration file inside the config directory
pub const CLI_CONFIG_FILE_NAME: &str = "docsearch.toml";

/// Environment variable overriding the default search index location
pub const INDEX_PATH_ENV: &str = "DOCSEARCH_INDEX";
