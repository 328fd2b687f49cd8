//! Round segmentation and per-seat statistics.
//!
//! One left-to-right pass over an [`ActionStream`]. Statistics are kept as
//! sets of round indices so that repeated events inside one round count once.

use std::collections::BTreeSet;

use crate::action::{Action, ActionKind, ActionStream};
use crate::envelope::{unwrap_envelope, RecordKind};
use crate::rule::AnalyzerRule;

pub const NUM_SEATS: usize = 4;

pub type RoundSet = BTreeSet<u32>;

/// Round indices in which each event happened for one seat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatRounds {
    pub ron: RoundSet,
    pub tsumo: RoundSet,
    pub houju: RoundSet,
    pub riichi: RoundSet,
    pub furo: RoundSet,
    pub dama: RoundSet,
    pub chase_riichi: RoundSet,
}

impl SeatRounds {
    /// Rounds this seat won, by either ron or tsumo.
    pub fn hora(&self) -> RoundSet {
        self.ron.union(&self.tsumo).copied().collect()
    }

    fn is_closed_in(&self, round: u32) -> bool {
        !self.riichi.contains(&round) && !self.furo.contains(&round)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerSeatStats {
    pub seats: [SeatRounds; NUM_SEATS],
}

impl PerSeatStats {
    /// Round sets of `seat`.
    ///
    /// # Panics
    /// If `seat` is not below [`NUM_SEATS`]; use [`PerSeatStats::get`] for
    /// unchecked input.
    pub fn seat(&self, seat: u8) -> &SeatRounds {
        &self.seats[seat as usize]
    }

    /// Round sets of `seat`, or `None` past the last seat.
    pub fn get(&self, seat: u8) -> Option<&SeatRounds> {
        self.seats.get(seat as usize)
    }

    fn seat_mut(&mut self, seat: u8) -> &mut SeatRounds {
        &mut self.seats[seat as usize]
    }
}

/// State that lives for one round and is reset at every boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundState {
    pub round_index: u32,
    pub riichi_declared: BTreeSet<u8>,
    pub last_actor: Option<u8>,
}

impl RoundState {
    fn close_round(&mut self) {
        self.round_index += 1;
        self.riichi_declared.clear();
        self.last_actor = None;
    }
}

/// If `payload` is a wrapped record that ends a round under `rule`, return
/// its kind. Decoding failures are logged and treated as "not a boundary".
pub fn boundary_kind(payload: &[u8], rule: &AnalyzerRule) -> Option<RecordKind> {
    let envelope = match unwrap_envelope(payload) {
        Ok(envelope) => envelope,
        Err(e) => {
            log::debug!("skipping terminal record: {}", e);
            return None;
        }
    };
    envelope.kind().filter(|kind| rule.is_round_boundary(*kind))
}

/// Streaming accumulator. Feed actions in stream order, then [`finish`].
///
/// [`finish`]: StatAccumulator::finish
#[derive(Debug, Clone)]
pub struct StatAccumulator {
    rule: AnalyzerRule,
    state: RoundState,
    stats: PerSeatStats,
}

impl StatAccumulator {
    pub fn new(rule: AnalyzerRule) -> Self {
        Self {
            rule,
            state: RoundState::default(),
            stats: PerSeatStats::default(),
        }
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Apply one action. Player events for seats outside the table are
    /// logged and skipped.
    pub fn feed(&mut self, action: &Action) {
        match action {
            Action::Terminal { payload } => {
                if boundary_kind(payload, &self.rule).is_some() {
                    self.state.close_round();
                }
            }
            Action::PlayerEvent { seat, .. } if *seat as usize >= NUM_SEATS => {
                log::warn!(
                    "player event for seat {} in round {}; skipped",
                    seat,
                    self.state.round_index
                );
            }
            Action::PlayerEvent { seat, kind } => {
                self.apply_player_event(*seat, *kind);
                self.state.last_actor = Some(*seat);
            }
            Action::Other { .. } => {}
        }
    }

    fn apply_player_event(&mut self, seat: u8, kind: ActionKind) {
        let round = self.state.round_index;
        match kind {
            ActionKind::Ron => {
                let defender = self.state.last_actor.unwrap_or_else(|| {
                    let fallback = self.rule.fallback_defender();
                    log::warn!(
                        "ron by seat {} in round {} has no preceding discard; charging seat {}",
                        seat,
                        round,
                        fallback
                    );
                    fallback
                });
                self.stats.seat_mut(defender).houju.insert(round);
                let attacker = self.stats.seat_mut(seat);
                attacker.ron.insert(round);
                if attacker.is_closed_in(round) {
                    attacker.dama.insert(round);
                }
            }
            ActionKind::Tsumo => {
                let winner = self.stats.seat_mut(seat);
                winner.tsumo.insert(round);
                if winner.is_closed_in(round) {
                    winner.dama.insert(round);
                }
            }
            ActionKind::Riichi => {
                if self.state.riichi_declared.iter().any(|&other| other != seat) {
                    self.stats.seat_mut(seat).chase_riichi.insert(round);
                }
                let declarer = self.stats.seat_mut(seat);
                declarer.riichi.insert(round);
                declarer.dama.remove(&round);
                self.state.riichi_declared.insert(seat);
            }
            ActionKind::Call(_) => {
                let caller = self.stats.seat_mut(seat);
                caller.furo.insert(round);
                caller.dama.remove(&round);
            }
            ActionKind::Discard => {}
        }
    }

    /// Number of closed rounds and the collected statistics.
    pub fn finish(self) -> (u32, PerSeatStats) {
        (self.state.round_index, self.stats)
    }
}

/// Run the whole statistics pass over `stream`.
pub fn accumulate(stream: &ActionStream, rule: &AnalyzerRule) -> (u32, PerSeatStats) {
    let mut acc = StatAccumulator::new(*rule);
    for action in stream {
        acc.feed(action);
    }
    acc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::CallKind;
    use crate::envelope::wrap_envelope;

    fn ev(seat: u8, kind: ActionKind) -> Action {
        Action::PlayerEvent { seat, kind }
    }

    fn end(kind: RecordKind) -> Action {
        Action::Terminal {
            payload: wrap_envelope(kind.tag(), Vec::new()),
        }
    }

    fn run(actions: Vec<Action>) -> (u32, PerSeatStats) {
        accumulate(&ActionStream::from(actions), &AnalyzerRule::default())
    }

    fn set(rounds: &[u32]) -> RoundSet {
        rounds.iter().copied().collect()
    }

    #[test]
    fn boundary_resets_round_state() {
        let mut acc = StatAccumulator::new(AnalyzerRule::default());
        acc.feed(&ev(1, ActionKind::Riichi));
        assert_eq!(acc.state().last_actor, Some(1));
        assert!(acc.state().riichi_declared.contains(&1));
        acc.feed(&end(RecordKind::NoTile));
        assert_eq!(acc.state().round_index, 1);
        assert!(acc.state().riichi_declared.is_empty());
        assert_eq!(acc.state().last_actor, None);
    }

    #[test]
    fn non_boundary_terminals_do_not_touch_state() {
        let mut acc = StatAccumulator::new(AnalyzerRule::default());
        acc.feed(&ev(2, ActionKind::Discard));
        acc.feed(&Action::Terminal {
            payload: wrap_envelope(".lq.RecordDealTile", vec![0x08, 0x03]),
        });
        acc.feed(&Action::Terminal {
            payload: vec![0xff, 0xff],
        });
        acc.feed(&Action::Other { raw_type: 3 });
        assert_eq!(acc.state().round_index, 0);
        assert_eq!(acc.state().last_actor, Some(2));
    }

    #[test]
    fn abortive_draw_counts_only_when_enabled() {
        let actions = vec![end(RecordKind::LiuJu), end(RecordKind::Hule)];
        assert_eq!(run(actions.clone()).0, 1);
        let stream = ActionStream::from(actions);
        assert_eq!(accumulate(&stream, &AnalyzerRule::with_abortive_draws()).0, 2);
    }

    #[test]
    fn ron_charges_previous_actor() {
        let (rounds, stats) = run(vec![
            ev(0, ActionKind::Discard),
            ev(1, ActionKind::Ron),
            end(RecordKind::Hule),
        ]);
        assert_eq!(rounds, 1);
        assert_eq!(stats.seat(1).ron, set(&[0]));
        assert_eq!(stats.seat(0).houju, set(&[0]));
        assert_eq!(stats.seat(1).dama, set(&[0]));
    }

    #[test]
    fn double_ron_charges_the_second_winner() {
        // The actor before the second ron is the first ron winner.
        let (_, stats) = run(vec![
            ev(0, ActionKind::Discard),
            ev(1, ActionKind::Ron),
            ev(2, ActionKind::Ron),
        ]);
        assert_eq!(stats.seat(0).houju, set(&[0]));
        assert_eq!(stats.seat(1).houju, set(&[0]));
    }

    #[test]
    fn ron_without_prior_actor_falls_back() {
        let (_, stats) = run(vec![end(RecordKind::NoTile), ev(3, ActionKind::Ron)]);
        assert_eq!(stats.seat(0).houju, set(&[1]));

        let rule = AnalyzerRule {
            ron_defender_fallback: 2,
            ..AnalyzerRule::default()
        };
        let stream = ActionStream::from(vec![ev(3, ActionKind::Ron)]);
        let (_, stats) = accumulate(&stream, &rule);
        assert_eq!(stats.seat(2).houju, set(&[0]));
        assert!(stats.seat(0).houju.is_empty());
    }

    #[test]
    fn riichi_and_calls_exclude_dama() {
        let (_, stats) = run(vec![
            ev(0, ActionKind::Riichi),
            ev(0, ActionKind::Tsumo),
            end(RecordKind::Hule),
            ev(1, ActionKind::Call(CallKind::Pon)),
            ev(2, ActionKind::Discard),
            ev(1, ActionKind::Ron),
            end(RecordKind::Hule),
            ev(3, ActionKind::Tsumo),
        ]);
        assert_eq!(stats.seat(0).tsumo, set(&[0]));
        assert!(stats.seat(0).dama.is_empty());
        assert_eq!(stats.seat(1).ron, set(&[1]));
        assert_eq!(stats.seat(1).furo, set(&[1]));
        assert!(stats.seat(1).dama.is_empty());
        assert_eq!(stats.seat(3).dama, set(&[2]));
    }

    #[test]
    fn late_riichi_or_call_clears_dama() {
        let (_, stats) = run(vec![ev(0, ActionKind::Ron), ev(0, ActionKind::Riichi)]);
        assert_eq!(stats.seat(0).ron, set(&[0]));
        assert_eq!(stats.seat(0).riichi, set(&[0]));
        assert!(stats.seat(0).dama.is_empty());

        let (_, stats) = run(vec![
            ev(1, ActionKind::Tsumo),
            ev(1, ActionKind::Call(CallKind::Chi)),
        ]);
        assert_eq!(stats.seat(1).tsumo, set(&[0]));
        assert_eq!(stats.seat(1).furo, set(&[0]));
        assert!(stats.seat(1).dama.is_empty());
    }

    #[test]
    fn events_for_unknown_seats_are_skipped() {
        let (rounds, stats) = run(vec![
            ev(2, ActionKind::Discard),
            ev(4, ActionKind::Riichi),
            ev(9, ActionKind::Ron),
            ev(0, ActionKind::Ron),
            end(RecordKind::Hule),
        ]);
        assert_eq!(rounds, 1);
        assert_eq!(stats, {
            let mut expected = PerSeatStats::default();
            expected.seats[0].ron.insert(0);
            expected.seats[0].dama.insert(0);
            expected.seats[2].houju.insert(0);
            expected
        });
    }

    #[test]
    fn chase_riichi_needs_another_seat() {
        let (_, stats) = run(vec![
            ev(0, ActionKind::Riichi),
            ev(0, ActionKind::Riichi),
            ev(1, ActionKind::Riichi),
            end(RecordKind::NoTile),
            ev(1, ActionKind::Riichi),
        ]);
        assert!(stats.seat(0).chase_riichi.is_empty());
        assert_eq!(stats.seat(1).chase_riichi, set(&[0]));
        assert_eq!(stats.seat(1).riichi, set(&[0, 1]));
    }

    #[test]
    fn repeated_events_count_once_per_round() {
        let (_, stats) = run(vec![
            ev(2, ActionKind::Call(CallKind::Chi)),
            ev(2, ActionKind::Call(CallKind::Kan)),
            ev(2, ActionKind::Call(CallKind::Pon)),
        ]);
        assert_eq!(stats.seat(2).furo.len(), 1);
    }

    #[test]
    fn hora_is_union_of_ron_and_tsumo() {
        let (_, stats) = run(vec![
            ev(0, ActionKind::Discard),
            ev(1, ActionKind::Ron),
            ev(1, ActionKind::Tsumo),
            end(RecordKind::Hule),
            ev(1, ActionKind::Tsumo),
        ]);
        assert_eq!(stats.seat(1).hora(), set(&[0, 1]));
    }
}
