mod acquire;

pub mod analyze;
pub mod context;
pub mod ls;
pub mod which;

pub use acquire::build_analysis;
