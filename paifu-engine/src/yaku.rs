//! Scoring-component extraction from win records.

use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionStream};
use crate::envelope::{unwrap_envelope, Decoded, TypedRecord};
use crate::fan::FanTable;
use crate::proto::RecordHule;
use crate::rule::AnalyzerRule;
use crate::stats::{boundary_kind, NUM_SEATS};

/// One positive-value scoring component of one winner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinRecord {
    /// Index of the round the win closed.
    pub round_index: u32,
    pub seat: u8,
    pub component_id: u32,
    pub component_name: String,
    pub han_value: u32,
}

/// Walk the terminal actions of `stream` and emit a [`WinRecord`] for every
/// valued fan of every winner, in stream / winner / fan order.
pub fn extract_win_records(
    stream: &ActionStream,
    rule: &AnalyzerRule,
    fans: &FanTable,
) -> Vec<WinRecord> {
    let mut records = Vec::new();
    let mut round_index = 0u32;

    for action in stream {
        let Action::Terminal { payload } = action else {
            continue;
        };
        if let Some(hule) = decode_hule(payload) {
            push_hule(&mut records, &hule, round_index, fans);
        }
        if boundary_kind(payload, rule).is_some() {
            round_index += 1;
        }
    }
    records
}

fn decode_hule(payload: &[u8]) -> Option<RecordHule> {
    let decoded = unwrap_envelope(payload).and_then(|envelope| envelope.decode());
    match decoded {
        Ok(Decoded::Typed(TypedRecord::Hule(hule))) => Some(hule),
        Ok(_) => None,
        Err(e) => {
            log::debug!("skipping terminal record: {}", e);
            None
        }
    }
}

fn push_hule(records: &mut Vec<WinRecord>, hule: &RecordHule, round_index: u32, fans: &FanTable) {
    for info in &hule.hules {
        if info.seat as usize >= NUM_SEATS {
            log::warn!(
                "win record in round {} names seat {}; skipped",
                round_index,
                info.seat
            );
            continue;
        }
        for fan in info.fans.iter().filter(|f| f.val > 0) {
            records.push(WinRecord {
                round_index,
                seat: info.seat as u8,
                component_id: fan.id,
                component_name: fans.name(fan.id).into_owned(),
                han_value: fan.val,
            });
        }
    }
}
