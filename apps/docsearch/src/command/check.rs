use super::{Command, load_index, resolve_index_path};
use crate::config::Config;
use crate::error::Result;
use search_core::{IndexStats, LoadMode};
use std::path::PathBuf;

pub struct CheckCommand {
    config: Config,
    path: Option<PathBuf>,
    strict: bool,
}

impl CheckCommand {
    pub fn new(cfg: Config, path: Option<PathBuf>, strict: bool) -> Self {
        Self {
            config: cfg,
            path,
            strict,
        }
    }

    fn mode(&self) -> LoadMode {
        if self.strict {
            LoadMode::Strict
        } else {
            self.config.load_mode()
        }
    }
}

#[async_trait::async_trait]
impl Command for CheckCommand {
    async fn execute(&self) -> Result<()> {
        let path = resolve_index_path(&self.config, self.path.as_deref())?;
        let report = load_index(&path, self.mode()).await?;
        let stats = IndexStats::collect(&report.index);

        println!(
            "{}: {} records on {} pages",
            path.display(),
            stats.total,
            stats.pages
        );
        if let Some(name) = &report.global_name {
            println!("  assigned to `{}`", name);
        }
        if stats.duplicate_keys > 0 {
            println!("  {} records repeat an earlier key", stats.duplicate_keys);
        }

        if report.issues.is_empty() {
            println!("  no issues");
        } else {
            println!(
                "  {} issues ({} records skipped):",
                report.issues.len(),
                report.skipped()
            );
            for issue in &report.issues {
                println!("    {}", issue);
            }
        }

        Ok(())
    }
}
