#[cfg(feature = "python")]
use pyo3::{pyclass, pymethods};
use serde::{Deserialize, Serialize};

use crate::envelope::RecordKind;
use crate::stats::NUM_SEATS;

#[cfg_attr(
    feature = "python",
    pyclass(module = "paifu._paifu", get_all, set_all)
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalyzerRule {
    /// Whether `.lq.RecordLiuJu` (abortive draw) closes a round.
    /// - `false`: only wins and exhaustive draws are round boundaries
    ///   (matches the historical statistics sheets)
    /// - `true`: abortive draws also advance the round index
    pub abortive_draw_ends_round: bool,

    /// Seat assumed for a player input that carries no seat. Protobuf JSON
    /// omits zero-valued fields, so a missing seat is usually seat 0.
    pub seat_fallback: u8,

    /// Seat charged with the deal-in when a Ron has no preceding actor.
    pub ron_defender_fallback: u8,
}

impl Default for AnalyzerRule {
    fn default() -> Self {
        Self::default_mjsoul()
    }
}

impl AnalyzerRule {
    pub fn default_mjsoul() -> Self {
        Self {
            abortive_draw_ends_round: false,
            seat_fallback: 0,
            ron_defender_fallback: 0,
        }
    }

    pub fn with_abortive_draws() -> Self {
        Self {
            abortive_draw_ends_round: true,
            ..Self::default_mjsoul()
        }
    }

    /// Whether a terminal record of `kind` closes the current round.
    pub fn is_round_boundary(&self, kind: RecordKind) -> bool {
        match kind {
            RecordKind::Hule | RecordKind::NoTile => true,
            RecordKind::LiuJu => self.abortive_draw_ends_round,
            RecordKind::GameDetailRecords => false,
        }
    }

    /// Resolve a raw seat, `None` when it is absent or out of range.
    pub fn resolve_seat(&self, raw: Option<u32>) -> Option<u8> {
        match raw {
            Some(seat) if (seat as usize) < NUM_SEATS => Some(seat as u8),
            _ => None,
        }
    }

    pub(crate) fn fallback_seat(&self) -> u8 {
        self.seat_fallback.min(NUM_SEATS as u8 - 1)
    }

    pub(crate) fn fallback_defender(&self) -> u8 {
        self.ron_defender_fallback.min(NUM_SEATS as u8 - 1)
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl AnalyzerRule {
    #[new]
    #[pyo3(signature = (
        abortive_draw_ends_round=false,
        seat_fallback=0,
        ron_defender_fallback=0,
    ))]
    pub fn py_new(
        abortive_draw_ends_round: bool,
        seat_fallback: u8,
        ron_defender_fallback: u8,
    ) -> Self {
        Self {
            abortive_draw_ends_round,
            seat_fallback,
            ron_defender_fallback,
        }
    }

    #[staticmethod]
    #[pyo3(name = "default_mjsoul")]
    pub fn py_default_mjsoul() -> Self {
        Self::default_mjsoul()
    }

    #[staticmethod]
    #[pyo3(name = "with_abortive_draws")]
    pub fn py_with_abortive_draws() -> Self {
        Self::with_abortive_draws()
    }

    fn __repr__(&self) -> String {
        format!(
            "AnalyzerRule(abortive_draw_ends_round={}, seat_fallback={}, ron_defender_fallback={})",
            self.abortive_draw_ends_round, self.seat_fallback, self.ron_defender_fallback
        )
    }
}
