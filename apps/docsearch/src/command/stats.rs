use super::{Command, load_index, resolve_index_path};
use crate::config::Config;
use crate::error::Result;
use search_core::IndexStats;
use std::path::PathBuf;

pub struct StatsCommand {
    config: Config,
    path: Option<PathBuf>,
    json: bool,
}

impl StatsCommand {
    pub fn new(cfg: Config, path: Option<PathBuf>, json: bool) -> Self {
        Self {
            config: cfg,
            path,
            json,
        }
    }
}

#[async_trait::async_trait]
impl Command for StatsCommand {
    async fn execute(&self) -> Result<()> {
        let path = resolve_index_path(&self.config, self.path.as_deref())?;
        let report = load_index(&path, self.config.load_mode()).await?;
        let stats = IndexStats::collect(&report.index);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
            return Ok(());
        }

        println!("records         {:>6}", stats.total);
        println!("pages           {:>6}", stats.pages);
        println!("blank text      {:>6}", stats.blank_text);
        println!("duplicate keys  {:>6}", stats.duplicate_keys);
        println!();
        for (category, count) in &stats.by_category {
            if *count > 0 {
                println!("{:<16}{:>6}", category.as_ref(), count);
            }
        }

        Ok(())
    }
}
