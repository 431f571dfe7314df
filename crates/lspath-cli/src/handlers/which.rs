use super::build_analysis;
use crate::args::AcquireArgs;
use crate::presentation::{Style, WhichHit, WhichView};
use crate::types::OutputFormat;
use anyhow::Result;
use lspath_engine::which;
use lspath_runtime::Config;

pub fn handle(config: &Config, args: &AcquireArgs, query: &str, format: OutputFormat) -> Result<()> {
    let result = build_analysis(config, args)?;

    let hits: Vec<WhichHit> = which(&result, query)
        .into_iter()
        .map(|found| {
            let entry = &result.path_entries[found.index];
            WhichHit {
                source_file: entry.source_file.clone(),
                line_number: entry.line_number,
                found,
            }
        })
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&hits)?),
        OutputFormat::Plain => print!("{}", WhichView::new(query, &hits, Style::detect())),
    }

    if hits.is_empty() {
        anyhow::bail!("'{}' not found in any PATH directory", query);
    }
    Ok(())
}
