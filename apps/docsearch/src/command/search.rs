use super::{Command, load_index};
use crate::cli::SearchArgs;
use crate::config::Config;
use crate::error::{Result, error};
use search_core::{QueryExecuteError, SearchEngine, SearchHit, SearchOptions, group_by_page};

pub struct SearchCommand {
    config: Config,
    args: SearchArgs,
}

impl SearchCommand {
    pub fn new(cfg: Config, args: SearchArgs) -> Self {
        Self { config: cfg, args }
    }

    fn options(&self) -> SearchOptions {
        SearchOptions {
            limit: self
                .args
                .limit
                .unwrap_or(self.config.search.ranking.default_limit),
            offset: self.args.offset,
            category: self.args.category,
            sort: self.args.sort,
        }
    }
}

#[async_trait::async_trait]
impl Command for SearchCommand {
    async fn execute(&self) -> Result<()> {
        let report = load_index(&self.args.path, self.config.load_mode()).await?;

        let query = self.args.query_string();
        let options = self.options();
        let search_config = self.config.search.clone();
        let plain = self.args.plain;

        let outcome = {
            let query = query.clone();
            tokio::task::spawn_blocking(move || -> Result<_> {
                let engine = SearchEngine::new(report.index, search_config)
                    .map_err(|e| error!("Failed to build the search index: {e:#}"))?;
                if plain {
                    let hits = engine
                        .search(&query, &options)
                        .map_err(|e| error!("Search failed: {e:#}"))?;
                    Ok(Ok(hits))
                } else {
                    Ok(engine.query(&query, &options))
                }
            })
            .await??
        };

        let hits = match outcome {
            Ok(hits) => hits,
            Err(QueryExecuteError::ValidationError(e)) => {
                eprintln!("{}", underline(&query, e.range()));
                return Err(QueryExecuteError::ValidationError(e).into());
            }
            Err(e) => return Err(e.into()),
        };

        if self.args.json {
            println!("{}", serde_json::to_string_pretty(&hits)?);
            return Ok(());
        }

        if hits.is_empty() {
            println!("No matching fragments");
            return Ok(());
        }

        if self.args.group {
            for group in group_by_page(hits) {
                println!("{}  ({})", group.page, group.path);
                for hit in &group.hits {
                    print_hit(hit, "  ");
                }
            }
        } else {
            for hit in &hits {
                print_hit(hit, "");
            }
        }

        Ok(())
    }
}

fn print_hit(hit: &SearchHit, indent: &str) {
    println!("{indent}{} [{}] {:.2}", hit.title, hit.category, hit.score);
    println!("{indent}    {}", hit.location);
    if !hit.snippet.is_empty() {
        println!("{indent}    {}", hit.snippet);
    }
}

/// 在查询下方用 `^` 标出出错位置
fn underline(query: &str, range: std::ops::Range<usize>) -> String {
    let start = query.get(..range.start).map_or(0, |s| s.chars().count());
    let width = query
        .get(range.clone())
        .map_or(1, |s| s.chars().count().max(1));
    format!("  {}\n  {}{}", query, " ".repeat(start), "^".repeat(width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underline() {
        assert_eq!(underline("cat:widget", 4..10), "  cat:widget\n      ^^^^^^");
        assert_eq!(underline("R₀ foo:x", 5..8), "  R₀ foo:x\n     ^^^");
    }
}
