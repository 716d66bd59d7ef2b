mod format;
mod report;

pub use format::format_report;
pub use report::{
    all_distinct, count_fields, inspect, known_for_coverage, CategorySample, CategorySize,
    DatasetReport, FieldFrequencies, KnownForCoverage, Shape, Uniqueness, Vocabulary,
};
