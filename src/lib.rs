// Personnel (kepegawaian) statistics report builder.
//
// The core is `stats::build_stats`: a pure function turning a list of raw,
// schemaless employee records into a fixed-shape bundle of chart-ready
// aggregate tables. The surrounding modules are plumbing: field resolution
// over unknown key spellings, value normalizers for inconsistent Indonesian
// data conventions, file loading, and report export.

pub mod age;
pub mod fields;
pub mod loader;
pub mod normalize;
pub mod output;
pub mod stats;
pub mod types;
pub mod util;

pub use fields::FieldOverrides;
pub use stats::{build_stats, BuildOptions, FALLBACK_STATS};
pub use types::{EmployeeStats, RawRow};
