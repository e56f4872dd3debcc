use super::{Command, load_index, resolve_index_path};
use crate::config::Config;
use crate::error::{Result, WrapErr};
use search_core::loader::{DEFAULT_GLOBAL_NAME, to_js_named, to_json};
use std::path::PathBuf;

pub struct DumpCommand {
    config: Config,
    path: Option<PathBuf>,
    json: bool,
    pretty: bool,
    output: Option<PathBuf>,
}

impl DumpCommand {
    pub fn new(
        cfg: Config,
        path: Option<PathBuf>,
        json: bool,
        pretty: bool,
        output: Option<PathBuf>,
    ) -> Self {
        Self {
            config: cfg,
            path,
            json,
            pretty,
            output,
        }
    }
}

#[async_trait::async_trait]
impl Command for DumpCommand {
    async fn execute(&self) -> Result<()> {
        let path = resolve_index_path(&self.config, self.path.as_deref())?;
        let report = load_index(&path, self.config.load_mode()).await?;

        let rendered = if self.json {
            let mut json = to_json(&report.index, self.pretty)?;
            json.push('\n');
            json
        } else {
            // 保留原来的变量名
            let name = report.global_name.as_deref().unwrap_or(DEFAULT_GLOBAL_NAME);
            to_js_named(&report.index, name)?
        };

        match &self.output {
            Some(output) => {
                tokio::fs::write(output, rendered)
                    .await
                    .wrap_err_with(|| format!("Failed to write {}", output.display()))?;
                tracing::info!("[导出] {} 条记录写入 {}", report.index.len(), output.display());
            }
            None => print!("{}", rendered),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_core::{LoadMode, parse_str};

    const RECORD: &str = r#"{"location":"index/","page":"Home","title":"Home","text":"R₀ field","category":"page"}"#;

    #[tokio::test]
    async fn test_dump_keeps_global_name() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("search_index.js");
        let output = dir.path().join("out.js");
        std::fs::write(&input, format!("const idx = {{\"docs\":[{}]}};", RECORD)).unwrap();

        DumpCommand::new(Config::default(), Some(input), false, false, Some(output.clone()))
            .execute()
            .await
            .unwrap();

        let dumped = std::fs::read_to_string(&output).unwrap();
        assert!(dumped.starts_with("var idx = "));
        let report = parse_str(&dumped, LoadMode::Strict).unwrap();
        assert_eq!(report.global_name.as_deref(), Some("idx"));
        assert_eq!(report.index.docs[0].text, "R₀ field");
    }

    #[tokio::test]
    async fn test_dump_json_has_no_global_name() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("search_index.js");
        let output = dir.path().join("out.json");
        std::fs::write(&input, format!("var idx = {{\"docs\":[{}]}}", RECORD)).unwrap();

        DumpCommand::new(Config::default(), Some(input), true, true, Some(output.clone()))
            .execute()
            .await
            .unwrap();

        let dumped = std::fs::read_to_string(&output).unwrap();
        assert!(dumped.ends_with('\n'));
        let report = parse_str(&dumped, LoadMode::Strict).unwrap();
        assert_eq!(report.global_name, None);
        assert_eq!(report.index.len(), 1);
    }
}
