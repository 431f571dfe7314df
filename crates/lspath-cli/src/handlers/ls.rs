use crate::presentation::{ListingView, Style};
use crate::types::OutputFormat;
use anyhow::{Context, Result};
use lspath_core::list_directory;

pub fn handle(dir: &str, format: OutputFormat) -> Result<()> {
    let rows = list_directory(dir).with_context(|| format!("Cannot list {}", dir))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Plain => print!("{}", ListingView::new(dir, &rows, Style::detect())),
    }
    Ok(())
}
