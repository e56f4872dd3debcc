pub mod check;
pub mod dump;
pub mod outline;
pub mod search;
pub mod stats;

use std::path::{Path, PathBuf};

use search_core::{LoadMode, LoadReport, loader};

use crate::config::Config;
use crate::error::{OptionExt, Result, WrapErr};

pub use check::CheckCommand;
pub use dump::DumpCommand;
pub use outline::OutlineCommand;
pub use search::SearchCommand;
pub use stats::StatsCommand;

#[async_trait::async_trait]
pub trait Command {
    async fn execute(&self) -> Result<()>;
}

/// 命令行给出的路径优先，其次是配置文件 / 环境变量
fn resolve_index_path(config: &Config, path: Option<&Path>) -> Result<PathBuf> {
    path.map(Path::to_path_buf)
        .or_else(|| config.index_path.clone())
        .ok_or_eyre("No search index given: pass PATH, set `index-path` or DOCSEARCH_INDEX")
}

/// 定位并加载搜索索引
async fn load_index(path: &Path, mode: LoadMode) -> Result<LoadReport> {
    let root = path.to_path_buf();
    let report = tokio::task::spawn_blocking(move || loader::load_file(&root, mode))
        .await?
        .wrap_err_with(|| format!("Failed to load {}", path.display()))?;

    Ok(report)
}
