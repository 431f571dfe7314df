//! Filesystem helpers shared by the analysis engine and the presentation layer.
//!
//! Every probe here is a read-only query. Probes that feed the analysis model
//! never fail: problems are reported as data so a run is never aborted by a
//! stale PATH directory.

pub mod category;
pub mod context;
pub mod error;
pub mod listing;
pub mod path;
pub mod probe;

pub use category::{PathCategory, categorize};
pub use context::{ContextLine, LineContext, line_context};
pub use error::{Error, Result};
pub use listing::{DirListing, dir_stats, list_directory};
pub use path::{clean_path, expand_tilde, home_dir};
pub use probe::{DirProbe, Existence, probe_dir};
