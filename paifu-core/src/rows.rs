//! Flat rows for the record, statistics and yaku sheets.
//!
//! Column order follows the sheets the exporter appends to; `to_cells`
//! renders a row as JSON values ready for a spreadsheet append call.

use chrono::DateTime;
use chrono_tz::Asia::Seoul;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use paifu_engine::report::Report;
use paifu_engine::stats::NUM_SEATS;

use crate::match_log::MatchLog;
use crate::seat_map::{AccountInfo, SeatMap};

/// Timestamp layout of the record sheet, in Korea Standard Time.
pub const SHEET_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One player block of a [`RecordRow`], in `result.players` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPlayer {
    pub account_id: Option<u64>,
    pub nickname: String,
    pub part_point: i32,
    pub total_point: i32,
}

impl RecordPlayer {
    /// Final points in thousands, rounded to one decimal.
    pub fn total_point_k(&self) -> f64 {
        (f64::from(self.total_point) / 100.0).round() / 10.0
    }
}

/// One match of the record sheet:
/// `[start, end, deleted, (account, nickname, part_point, total_k) per player..., uuid]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRow {
    pub start_time: String,
    pub end_time: String,
    pub deleted: bool,
    pub players: Vec<RecordPlayer>,
    pub uuid: String,
}

impl RecordRow {
    pub fn to_cells(&self) -> Vec<Value> {
        let mut cells = vec![
            json!(self.start_time),
            json!(self.end_time),
            json!(if self.deleted { "yes" } else { "no" }),
        ];
        for player in &self.players {
            cells.push(account_cell(player.account_id));
            cells.push(json!(player.nickname));
            cells.push(json!(player.part_point));
            cells.push(json!(player.total_point_k()));
        }
        cells.push(json!(self.uuid));
        cells
    }
}

/// One seat of one match:
/// `[uuid, account, total_kyoku, riichi, hora, tsumo, ron, houju, furo, dama, chase_riichi]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsRow {
    pub uuid: String,
    pub account_id: Option<u64>,
    pub total_kyoku: u32,
    pub riichi: u32,
    pub hora: u32,
    pub tsumo: u32,
    pub ron: u32,
    pub houju: u32,
    pub furo: u32,
    pub dama: u32,
    pub chase_riichi: u32,
}

impl StatisticsRow {
    pub fn to_cells(&self) -> Vec<Value> {
        vec![
            json!(self.uuid),
            account_cell(self.account_id),
            json!(self.total_kyoku),
            json!(self.riichi),
            json!(self.hora),
            json!(self.tsumo),
            json!(self.ron),
            json!(self.houju),
            json!(self.furo),
            json!(self.dama),
            json!(self.chase_riichi),
        ]
    }
}

/// One scoring component of one win: `[uuid, round, account, fan, han]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YakuRow {
    pub uuid: String,
    pub round_index: u32,
    pub account_id: Option<u64>,
    pub fan: String,
    pub han: u32,
}

impl YakuRow {
    pub fn to_cells(&self) -> Vec<Value> {
        vec![
            json!(self.uuid),
            json!(self.round_index),
            account_cell(self.account_id),
            json!(self.fan),
            json!(self.han),
        ]
    }
}

// Unknown accounts render as an empty cell.
fn account_cell(account_id: Option<u64>) -> Value {
    account_id.map_or_else(|| json!(""), |id| json!(id))
}

/// Render unix seconds as sheet time. Out-of-range values render empty.
pub fn format_sheet_time(timestamp: u64) -> String {
    let utc = i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0));
    match utc {
        Some(utc) => utc.with_timezone(&Seoul).format(SHEET_TIME_FORMAT).to_string(),
        None => {
            log::warn!("timestamp {} is out of range", timestamp);
            String::new()
        }
    }
}

/// Header row of `log`. Each result entry takes the account listed at its
/// seat; entries without one take the seatless accounts in list order.
pub fn record_row(log: &MatchLog) -> RecordRow {
    let seated = |seat: u8| log.accounts.iter().find(|a| a.seat == Some(seat));
    let mut seatless = log.accounts.iter().filter(|a| a.seat.is_none());

    let players = log
        .result
        .players
        .iter()
        .map(|player| {
            let account: Option<&AccountInfo> =
                player.seat.and_then(seated).or_else(|| seatless.next());
            if account.is_none() {
                log::debug!("match {}: no account for seat {:?}", log.uuid, player.seat);
            }
            RecordPlayer {
                account_id: account.map(|a| a.account_id),
                nickname: account.map(|a| a.nickname.clone()).unwrap_or_default(),
                part_point: player.part_point,
                total_point: player.total_point,
            }
        })
        .collect();

    RecordRow {
        start_time: format_sheet_time(log.start_time),
        end_time: format_sheet_time(log.end_time),
        deleted: false,
        players,
        uuid: log.uuid.clone(),
    }
}

/// Four rows, seat 0 first.
pub fn statistics_rows(uuid: &str, seats: &SeatMap, report: &Report) -> Vec<StatisticsRow> {
    (0..NUM_SEATS as u8)
        .map(|seat| {
            let s = report.seat(seat);
            StatisticsRow {
                uuid: uuid.to_string(),
                account_id: seats.account_id(seat),
                total_kyoku: report.total_rounds,
                riichi: s.riichi,
                hora: s.hora,
                tsumo: s.tsumo,
                ron: s.ron,
                houju: s.houju,
                furo: s.furo,
                dama: s.dama,
                chase_riichi: s.chase_riichi,
            }
        })
        .collect()
}

/// One row per win record, in report order.
pub fn yaku_rows(uuid: &str, seats: &SeatMap, report: &Report) -> Vec<YakuRow> {
    report
        .win_records
        .iter()
        .map(|record| YakuRow {
            uuid: uuid.to_string(),
            round_index: record.round_index,
            account_id: seats.account_id(record.seat),
            fan: record.component_name.clone(),
            han: record.han_value,
        })
        .collect()
}
