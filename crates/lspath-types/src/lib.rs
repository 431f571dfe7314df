pub mod error;
pub mod event;
pub mod flow;
pub mod path;
pub mod result;
pub mod shell;

pub use error::{Error, Result};
pub use event::TraceEvent;
pub use flow::*;
pub use path::*;
pub use result::AnalysisResult;
pub use shell::ShellFamily;
