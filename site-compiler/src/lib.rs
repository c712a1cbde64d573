pub mod error;
pub mod unit;
pub mod staleness;
pub mod convert;
pub mod pipeline;

pub use error::{CompileError, Result};
pub use unit::ContentUnit;
pub use staleness::{check_freshness, modification_times, needs_rebuild, Freshness};
pub use convert::PulldownConverter;
pub use pipeline::{CompilePipeline, CompileReport, UnitOutcome};
