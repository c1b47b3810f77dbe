pub mod analysis;
pub mod error;
pub mod run;
pub mod source;

pub use error::{Error, Result};
pub use run::{RunAnalyzer, RunLayout};
