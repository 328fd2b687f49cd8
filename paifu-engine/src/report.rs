use serde::{Deserialize, Serialize};

use crate::stats::{PerSeatStats, SeatRounds, NUM_SEATS};
use crate::yaku::WinRecord;

/// Round counts for one seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SeatSummary {
    pub ron: u32,
    pub tsumo: u32,
    pub houju: u32,
    pub riichi: u32,
    pub furo: u32,
    pub dama: u32,
    pub chase_riichi: u32,
    pub hora: u32,
}

impl SeatSummary {
    /// Collapse round sets into counts.
    pub fn from_rounds(rounds: &SeatRounds) -> Self {
        Self {
            ron: rounds.ron.len() as u32,
            tsumo: rounds.tsumo.len() as u32,
            houju: rounds.houju.len() as u32,
            riichi: rounds.riichi.len() as u32,
            furo: rounds.furo.len() as u32,
            dama: rounds.dama.len() as u32,
            chase_riichi: rounds.chase_riichi.len() as u32,
            hora: rounds.hora().len() as u32,
        }
    }
}

/// Everything the exporter needs from one match.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Report {
    pub total_rounds: u32,
    /// Indexed by seat.
    pub per_seat: [SeatSummary; NUM_SEATS],
    pub win_records: Vec<WinRecord>,
}

impl Report {
    /// Counts of `seat`.
    ///
    /// # Panics
    /// If `seat` is not below [`NUM_SEATS`]; use [`Report::get`] for
    /// unchecked input.
    pub fn seat(&self, seat: u8) -> &SeatSummary {
        &self.per_seat[seat as usize]
    }

    /// Counts of `seat`, or `None` past the last seat.
    pub fn get(&self, seat: u8) -> Option<&SeatSummary> {
        self.per_seat.get(seat as usize)
    }

    /// Win records of one seat, in report order.
    pub fn win_records_of(&self, seat: u8) -> impl Iterator<Item = &WinRecord> + '_ {
        self.win_records.iter().filter(move |r| r.seat == seat)
    }
}

/// Reduce the accumulated round sets and win rows into a [`Report`].
pub fn assemble(total_rounds: u32, stats: &PerSeatStats, win_records: Vec<WinRecord>) -> Report {
    let mut per_seat = [SeatSummary::default(); NUM_SEATS];
    for (summary, rounds) in per_seat.iter_mut().zip(stats.seats.iter()) {
        *summary = SeatSummary::from_rounds(rounds);
    }
    Report {
        total_rounds,
        per_seat,
        win_records,
    }
}
