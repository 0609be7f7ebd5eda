//! Orchestration: capture → execute-and-relay, with stage tracking, optional
//! payload cleanup and a run report.

mod report;
mod run;

pub use report::{write_report, RunReport};
pub use run::{run_pipeline, PipelineRun};
