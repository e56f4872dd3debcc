use super::{Command, load_index, resolve_index_path};
use crate::config::Config;
use crate::error::Result;
use search_core::outline;
use std::path::PathBuf;

pub struct OutlineCommand {
    config: Config,
    path: Option<PathBuf>,
    json: bool,
}

impl OutlineCommand {
    pub fn new(cfg: Config, path: Option<PathBuf>, json: bool) -> Self {
        Self {
            config: cfg,
            path,
            json,
        }
    }
}

#[async_trait::async_trait]
impl Command for OutlineCommand {
    async fn execute(&self) -> Result<()> {
        let path = resolve_index_path(&self.config, self.path.as_deref())?;
        let report = load_index(&path, self.config.load_mode()).await?;
        let pages = outline(&report.index);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&pages)?);
            return Ok(());
        }

        for page in &pages {
            println!("{}  ({})", page.page, page.path);
            for section in &page.sections {
                println!("  § {}", section.title);
            }
            for symbol in &page.symbols {
                println!("  · {} [{}]", symbol.title, symbol.category);
            }
            if page.prose > 0 {
                println!("  {} prose fragments", page.prose);
            }
        }

        Ok(())
    }
}
