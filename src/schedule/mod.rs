//! Visit-frequency scheduling over a single episode.
//!
//! Everything here is a pure function over episode and frequency records:
//! work-week partitioning, frequency end dates, overlap detection,
//! validation, and discontinuation. Nothing is persisted from this module.

mod discontinue;
mod overlap;
mod range;
mod validation;
mod work_week;

pub use discontinue::*;
pub use overlap::*;
pub use range::*;
pub use validation::*;
pub use work_week::*;
