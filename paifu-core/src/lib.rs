//! Match-level glue around `paifu-engine`.
//!
//! Maps seats to accounts, flattens matches into the record, statistics and
//! yaku sheet rows, and analyzes many matches in parallel.

pub mod batch;
pub mod match_log;
pub mod rows;
pub mod seat_map;

pub use batch::{analyze_batch_simple, BatchAnalyzer, BatchConfig};
pub use match_log::{GameEndResult, MatchLog, MatchReport, PlayerResult};
pub use rows::{RecordPlayer, RecordRow, StatisticsRow, YakuRow};
pub use seat_map::{AccountInfo, SeatMap};
