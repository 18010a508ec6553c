mod report;
mod runner;

pub use report::SyncReport;
pub use runner::{SyncOptions, SyncPipeline};
