mod adjust_gap;
mod merge_pair;

pub use adjust_gap::{AdjustGap, EndpointMove, GapReport, ObjectFailure};
pub use merge_pair::{MergePair, MergeReport};
