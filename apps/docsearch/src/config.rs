use crate::error::{Result, WrapErr};
use config::create_strategy;
use search_core::{LoadMode, SearchConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default = "default_config", deny_unknown_fields)]
pub struct Config {
    /// 默认的搜索索引（`search_index.js` 或文档站点目录）
    pub index_path: Option<PathBuf>,
    /// 严格加载：任何格式问题都报错
    pub strict: bool,
    pub search: SearchConfig,
}

fn default_config() -> Config {
    Config {
        index_path: None,
        strict: false,
        search: SearchConfig::default(),
    }
}

impl Default for Config {
    fn default() -> Self {
        default_config()
    }
}

impl Config {
    fn load_str(user_config_str: &str) -> Result<Config> {
        let user_config: Config = toml::from_str(user_config_str)?;
        Ok(user_config)
    }

    /// 读取配置文件；未显式指定且文件不存在时写入示例配置
    ///
    /// `DOCSEARCH_INDEX` 环境变量覆盖 `index-path`。
    pub fn load(explicit: Option<PathBuf>) -> Result<Config> {
        let strategy = create_strategy()?;
        let is_explicit = explicit.is_some();
        let config_path = config::config_file_path(&strategy, explicit);

        let mut cfg = match std::fs::read_to_string(&config_path) {
            Ok(user_config_str) => Self::load_str(&user_config_str)
                .wrap_err_with(|| format!("Invalid configuration {}", config_path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !is_explicit => {
                // 配置文件不存在，创建示例配置文件
                if let Err(e) = Self::create_example_config(&config_path) {
                    tracing::warn!("[配置] 无法创建示例配置 {}: {}", config_path.display(), e);
                }
                Self::load_str("")?
            }
            Err(e) => {
                return Err(e)
                    .wrap_err_with(|| format!("Failed to read {}", config_path.display()));
            }
        };

        if let Some(path) = config::index_path_from_env() {
            tracing::debug!("[配置] 使用环境变量中的索引路径: {}", path.display());
            cfg.index_path = Some(path);
        }

        Ok(cfg)
    }

    pub fn load_mode(&self) -> LoadMode {
        if self.strict {
            LoadMode::Strict
        } else {
            LoadMode::Lenient
        }
    }

    fn create_example_config(config_path: &Path) -> Result<()> {
        // 确保配置目录存在
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let example_config = r#"# docsearch 配置文件
#
# 此文件在首次运行时自动创建

# 默认的搜索索引：search_index.js 或构建好的文档目录
# 也可以通过环境变量 DOCSEARCH_INDEX 指定
# index-path = "/path/to/docs/build"

# 任何格式问题都视为错误（默认容错加载）
# strict = false

# [search.index]
# tokenizer = "en_stem"

# [search.ranking]
# title-boost = 2.0
# page-boost = 1.0
# text-boost = 1.0
# default-limit = 20

# [search.display]
# preview-max-length = 160
# sentence-search-start = 40
"#;

        std::fs::write(config_path, example_config)?;
        eprintln!("已创建配置文件: {}", config_path.display());

        Ok(())
    }
}
