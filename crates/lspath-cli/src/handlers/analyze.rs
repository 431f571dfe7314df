use super::build_analysis;
use crate::args::AcquireArgs;
use crate::presentation::{ReportView, Style};
use crate::types::OutputFormat;
use anyhow::Result;
use lspath_runtime::Config;

pub fn handle(config: &Config, args: &AcquireArgs, verbose: bool, format: OutputFormat) -> Result<()> {
    let result = build_analysis(config, args)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Plain => print!("{}", ReportView::new(&result, verbose, Style::detect())),
    }
    Ok(())
}
