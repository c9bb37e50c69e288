pub mod counters;
pub mod dedup;
pub mod job_card;
pub mod outcome;

pub use counters::{WorkflowCounters, WorkflowSummary};
pub use dedup::DedupIndex;
pub use job_card::{JobCardSnapshot, FAST_APPLY_MARKER};
pub use outcome::{
    AbortReason, ApplyOutcome, AutofillPolicy, AutofillReport, CleanupReport, PageAdvance,
    ProgressControl,
};
