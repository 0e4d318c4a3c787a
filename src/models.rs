//! Data structures for representing validation outcomes and reports.
mod outcome;
mod report;

pub use outcome::*;
pub use report::*;
