use crate::presentation::{ContextView, Style};
use crate::types::OutputFormat;
use anyhow::Result;
use lspath_core::line_context;

pub fn handle(file: &str, line: u32, radius: u32, format: OutputFormat) -> Result<()> {
    let context = line_context(file, line, radius);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&context)?),
        OutputFormat::Plain => print!("{}", ContextView::new(&context, Style::detect())),
    }

    // Unreadable file or out-of-range line: still rendered, but the command failed
    if let Some(error) = context.error {
        anyhow::bail!(error);
    }
    Ok(())
}
