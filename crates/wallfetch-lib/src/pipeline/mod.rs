mod coordinator;
mod report;

pub use coordinator::Coordinator;
pub use report::RunReport;
