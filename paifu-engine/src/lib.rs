//! Mahjong Soul game-log analyzer.
//!
//! Decodes the tagged protobuf envelopes of a finished match, replays its
//! action list, and reports per-seat round statistics plus one row per
//! scoring component of every win.

pub mod action;
pub mod analyzer;
pub mod envelope;
pub mod errors;
pub mod fan;
pub mod proto;
pub mod report;
pub mod rule;
pub mod stats;
pub mod yaku;

pub use action::{Action, ActionKind, ActionStream, CallKind, RawAction};
pub use analyzer::{analyze, Analyzer};
pub use errors::{PaifuError, PaifuResult};
pub use report::{Report, SeatSummary};
pub use rule::AnalyzerRule;
pub use yaku::WinRecord;
