//! A fetched match: record header (times, accounts, final points) plus the
//! action list.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use paifu_engine::action::RawAction;
use paifu_engine::analyzer::Analyzer;
use paifu_engine::report::Report;

use crate::rows::{record_row, statistics_rows, yaku_rows, RecordRow, StatisticsRow, YakuRow};
use crate::seat_map::{AccountInfo, SeatMap};

/// Final standing of one seat, from `result.players`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResult {
    /// Omitted for seat 0, like every zero field in protobuf JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat: Option<u8>,
    /// Final points, including uma and oka.
    #[serde(default)]
    pub total_point: i32,
    /// Points on the table when the match ended.
    #[serde(default, rename = "partPoint1")]
    pub part_point: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameEndResult {
    #[serde(default)]
    pub players: Vec<PlayerResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchLog {
    pub uuid: String,
    /// Unix seconds.
    #[serde(default)]
    pub start_time: u64,
    /// Unix seconds.
    #[serde(default)]
    pub end_time: u64,
    #[serde(default)]
    pub accounts: Vec<AccountInfo>,
    #[serde(default)]
    pub result: GameEndResult,
    #[serde(default)]
    pub actions: Vec<RawAction>,
}

impl MatchLog {
    /// Parse a record header merged with its `actions`, as produced by
    /// `MessageToDict`.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("failed to parse match log")
    }

    pub fn seat_map(&self) -> SeatMap {
        SeatMap::from_accounts(&self.accounts)
    }

    /// Sort matches by start time, oldest first. Ties keep their order.
    pub fn sort_chronologically(logs: &mut [MatchLog]) {
        logs.sort_by_key(|log| log.start_time);
    }

    /// Run the analyzer over the actions and attach the seat map and the
    /// record-sheet row.
    pub fn analyze(&self, analyzer: &Analyzer<'_>) -> MatchReport {
        let report = analyzer.analyze_actions(&self.actions);
        log::debug!(
            "match {}: {} rounds, {} win rows",
            self.uuid,
            report.total_rounds,
            report.win_records.len()
        );
        MatchReport {
            uuid: self.uuid.clone(),
            record: record_row(self),
            seats: self.seat_map(),
            report,
        }
    }
}

/// Analysis of one match together with who sat where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub uuid: String,
    pub record: RecordRow,
    pub seats: SeatMap,
    pub report: Report,
}

impl MatchReport {
    /// Record-sheet row built from the match header.
    pub fn record_row(&self) -> &RecordRow {
        &self.record
    }

    /// Statistics-sheet rows, one per seat.
    pub fn statistics_rows(&self) -> Vec<StatisticsRow> {
        statistics_rows(&self.uuid, &self.seats, &self.report)
    }

    /// Yaku-sheet rows, one per scoring component of every win.
    pub fn yaku_rows(&self) -> Vec<YakuRow> {
        yaku_rows(&self.uuid, &self.seats, &self.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paifu_engine::action::{OP_DISCARD, OP_RON};

    #[test]
    fn parses_and_analyzes() {
        let json = r#"{
            "uuid": "231014-abc",
            "accounts": [
                {"accountId": 7, "nickname": "seven"},
                {"accountId": 8, "nickname": "eight", "seat": 1},
                {"accountId": 9, "nickname": "nine", "seat": 2},
                {"accountId": 10, "nickname": "ten", "seat": 3}
            ],
            "actions": [
                {"type": 2, "userInput": {"seat": 2, "type": 2, "operation": {"type": 1}}},
                {"type": 2, "userInput": {"type": 3, "cpg": {"type": 9}}}
            ]
        }"#;
        let log = MatchLog::from_json(json).unwrap();
        let result = log.analyze(&Analyzer::default());
        assert_eq!(result.report.seat(0).ron, 1);
        assert_eq!(result.report.seat(2).houju, 1);

        let rows = result.statistics_rows();
        assert_eq!(rows[0].account_id, Some(7));
        assert_eq!(rows[0].ron, 1);
        assert_eq!(rows[2].houju, 1);
        assert!(result.yaku_rows().is_empty());
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let log = MatchLog::from_json(r#"{"uuid": "x"}"#).unwrap();
        assert!(log.accounts.is_empty());
        assert_eq!(log.analyze(&Analyzer::default()).report, Report::default());
    }

    #[test]
    fn header_fields_from_message_to_dict() {
        let json = r#"{
            "uuid": "h",
            "startTime": 1700000000,
            "endTime": 1700003600,
            "result": {"players": [
                {"seat": 2, "totalPoint": 45300, "partPoint1": 35300},
                {"totalPoint": -12000, "partPoint1": 8000}
            ]}
        }"#;
        let log = MatchLog::from_json(json).unwrap();
        assert_eq!(log.start_time, 1_700_000_000);
        assert_eq!(log.end_time, 1_700_003_600);
        assert_eq!(log.result.players[0].seat, Some(2));
        assert_eq!(log.result.players[0].part_point, 35300);
        assert_eq!(log.result.players[1].seat, None);
        assert_eq!(log.result.players[1].total_point, -12000);
    }

    #[test]
    fn sorts_oldest_first() {
        let mut logs: Vec<MatchLog> = [30, 10, 20]
            .into_iter()
            .map(|t| MatchLog {
                uuid: t.to_string(),
                start_time: t,
                ..Default::default()
            })
            .collect();
        MatchLog::sort_chronologically(&mut logs);
        let order: Vec<_> = logs.iter().map(|l| l.uuid.as_str()).collect();
        assert_eq!(order, vec!["10", "20", "30"]);
    }

    #[test]
    fn bad_json_has_context() {
        let err = MatchLog::from_json("{").unwrap_err();
        assert!(err.to_string().contains("match log"));
    }

    #[test]
    fn typed_construction() {
        let log = MatchLog {
            uuid: "t".into(),
            actions: vec![RawAction::operation(3, OP_DISCARD), RawAction::cpg(1, OP_RON)],
            ..Default::default()
        };
        let result = log.analyze(&Analyzer::default());
        assert_eq!(result.statistics_rows()[3].houju, 1);
        assert_eq!(result.statistics_rows()[1].account_id, None);
    }
}
