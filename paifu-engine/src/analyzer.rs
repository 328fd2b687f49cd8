//! Per-match entry points.
//!
//! Each call builds its own action stream, round state and statistics, runs
//! the statistics pass and the yaku pass over the same stream, and returns a
//! fresh [`Report`]. Nothing is shared between calls except the read-only
//! fan table.

use serde::Deserialize;

use crate::action::{ActionStream, RawAction};
use crate::envelope::{unwrap_envelope, RecordKind, TypedRecord};
use crate::errors::{PaifuError, PaifuResult};
use crate::fan::FanTable;
use crate::proto::GameDetailRecords;
use crate::report::{assemble, Report};
use crate::rule::AnalyzerRule;
use crate::stats::accumulate;
use crate::yaku::extract_win_records;

#[derive(Debug, Clone, Copy)]
pub struct Analyzer<'f> {
    rule: AnalyzerRule,
    fans: &'f FanTable,
}

impl Default for Analyzer<'static> {
    fn default() -> Self {
        Self::new(AnalyzerRule::default())
    }
}

impl Analyzer<'static> {
    /// Analyzer with the built-in Mahjong Soul fan table.
    pub fn new(rule: AnalyzerRule) -> Self {
        Self {
            rule,
            fans: FanTable::mjsoul(),
        }
    }
}

/// `MessageToDict(GameDetailRecords)` output, or just its action list.
#[derive(Deserialize)]
#[serde(untagged)]
enum ActionDocument {
    List(Vec<RawAction>),
    Records {
        #[serde(default)]
        actions: Vec<RawAction>,
    },
}

impl<'f> Analyzer<'f> {
    /// Analyzer that names scoring components from `fans` instead of the
    /// built-in table.
    pub fn with_fan_table(rule: AnalyzerRule, fans: &'f FanTable) -> Self {
        Self { rule, fans }
    }

    pub fn rule(&self) -> &AnalyzerRule {
        &self.rule
    }

    /// Run the statistics and yaku passes over one match.
    ///
    /// Both passes read the same stream independently. Malformed terminal
    /// records inside the stream are skipped, never returned as errors, so
    /// this cannot fail.
    pub fn analyze_stream(&self, stream: &ActionStream) -> Report {
        let (total_rounds, stats) = accumulate(stream, &self.rule);
        let win_records = extract_win_records(stream, &self.rule, self.fans);
        log::debug!(
            "analyzed {} actions: {} rounds, {} win rows",
            stream.len(),
            total_rounds,
            win_records.len()
        );
        assemble(total_rounds, &stats, win_records)
    }

    /// Classify `raw` under this analyzer's rule, then [`analyze_stream`].
    ///
    /// [`analyze_stream`]: Analyzer::analyze_stream
    pub fn analyze_actions(&self, raw: &[RawAction]) -> Report {
        self.analyze_stream(&ActionStream::from_raw_actions(raw, &self.rule))
    }

    /// Analyze a JSON document: either `{"actions": [...]}` or a bare list.
    pub fn analyze_json(&self, json: &str) -> PaifuResult<Report> {
        let actions = match serde_json::from_str::<ActionDocument>(json)? {
            ActionDocument::List(actions) => actions,
            ActionDocument::Records { actions } => actions,
        };
        Ok(self.analyze_actions(&actions))
    }

    /// Analyze a decoded `GameDetailRecords`. Legacy records that only carry
    /// the `records` list have no actions and produce an empty report.
    pub fn analyze_details(&self, details: &GameDetailRecords) -> Report {
        if details.actions.is_empty() && !details.records.is_empty() {
            log::warn!(
                "record version {} has {} legacy records and no actions; nothing to analyze",
                details.version,
                details.records.len()
            );
        }
        let raw: Vec<RawAction> = details.actions.iter().cloned().map(RawAction::from).collect();
        self.analyze_actions(&raw)
    }

    /// Analyze the `data` field of a fetched game record: a wrapper holding
    /// `.lq.GameDetailRecords`.
    pub fn analyze_record(&self, data: &[u8]) -> PaifuResult<Report> {
        let envelope = unwrap_envelope(data)?;
        match envelope.decode_known()? {
            TypedRecord::GameDetailRecords(details) => Ok(self.analyze_details(&details)),
            other => Err(PaifuError::InvalidInput {
                message: format!(
                    "expected {}, found {:?}",
                    RecordKind::GameDetailRecords.tag(),
                    other.kind()
                ),
            }),
        }
    }
}

/// Analyze `raw` with the default rule and the Mahjong Soul fan table.
pub fn analyze(raw: &[RawAction]) -> Report {
    Analyzer::default().analyze_actions(raw)
}
