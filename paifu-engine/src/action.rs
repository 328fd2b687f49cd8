use serde::{Deserialize, Serialize};

use crate::errors::PaifuError;
use crate::proto::{GameAction, GameChiPengGang, GameSelfOperation, GameUserInput};
use crate::rule::AnalyzerRule;

/// `GameAction.type` of a server-side result record.
pub const ACTION_TYPE_RESULT: u32 = 1;
/// `GameAction.type` of a player input.
pub const ACTION_TYPE_USER_INPUT: u32 = 2;

/// `GameUserInput.type` carrying a self operation.
pub const INPUT_TYPE_OPERATION: u32 = 2;
/// `GameUserInput.type` carrying a chi/pon/kan/ron response.
pub const INPUT_TYPE_CPG: u32 = 3;

// Operation codes shared by `operation.type` and `cpg.type`.
pub const OP_DISCARD: u32 = 1;
pub const OP_CHI: u32 = 2;
pub const OP_PON: u32 = 3;
pub const OP_ANKAN: u32 = 4;
pub const OP_MINKAN: u32 = 5;
pub const OP_KAKAN: u32 = 6;
pub const OP_RIICHI: u32 = 7;
pub const OP_TSUMO: u32 = 8;
pub const OP_RON: u32 = 9;

/// One entry of `GameDetailRecords.actions` as it arrives from the fetch
/// layer, either decoded from protobuf or from `MessageToDict` JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAction {
    #[serde(rename = "type", default)]
    pub action_type: u32,
    /// Wrapped record bytes; base64 in JSON.
    #[serde(
        default,
        with = "base64_bytes",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub result: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_input: Option<RawUserInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawUserInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat: Option<u32>,
    #[serde(rename = "type", default)]
    pub input_type: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpg: Option<RawCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<RawCode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawCode {
    #[serde(rename = "type", default)]
    pub code: u32,
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD
            .decode(text.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

impl RawAction {
    /// A `type == 1` action carrying a wrapped server record.
    pub fn result(result: Vec<u8>) -> Self {
        Self {
            action_type: ACTION_TYPE_RESULT,
            result,
            user_input: None,
        }
    }

    /// Self operation by `seat` (discard, riichi, tsumo, kan).
    pub fn operation(seat: u32, code: u32) -> Self {
        Self::user_input(RawUserInput {
            seat: Some(seat),
            input_type: INPUT_TYPE_OPERATION,
            cpg: None,
            operation: Some(RawCode { code }),
        })
    }

    /// Response by `seat` to another player's discard.
    pub fn cpg(seat: u32, code: u32) -> Self {
        Self::user_input(RawUserInput {
            seat: Some(seat),
            input_type: INPUT_TYPE_CPG,
            cpg: Some(RawCode { code }),
            operation: None,
        })
    }

    pub fn user_input(input: RawUserInput) -> Self {
        Self {
            action_type: ACTION_TYPE_USER_INPUT,
            result: Vec::new(),
            user_input: Some(input),
        }
    }
}

impl From<GameAction> for RawAction {
    fn from(action: GameAction) -> Self {
        Self {
            action_type: action.r#type,
            result: action.result,
            user_input: action.user_input.map(|input| RawUserInput {
                seat: Some(input.seat),
                input_type: input.r#type,
                cpg: input.cpg.map(|cpg| RawCode { code: cpg.r#type }),
                operation: input.operation.map(|op| RawCode { code: op.r#type }),
            }),
        }
    }
}

impl From<RawAction> for GameAction {
    fn from(raw: RawAction) -> Self {
        Self {
            passed: 0,
            r#type: raw.action_type,
            result: raw.result,
            user_input: raw.user_input.map(|input| GameUserInput {
                seat: input.seat.unwrap_or_default(),
                r#type: input.input_type,
                emo: 0,
                operation: input.operation.map(|op| GameSelfOperation {
                    r#type: op.code,
                    ..Default::default()
                }),
                cpg: input.cpg.map(|cpg| GameChiPengGang {
                    r#type: cpg.code,
                    index: 0,
                }),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallKind {
    Chi,
    Pon,
    Kan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Any player input that is not a call, riichi or win.
    Discard,
    Call(CallKind),
    Riichi,
    Tsumo,
    Ron,
}

impl ActionKind {
    /// Resolve the kind from the `cpg.type` / `operation.type` discriminants.
    /// A response code takes precedence over a self operation code.
    pub fn from_codes(cpg: Option<u32>, operation: Option<u32>) -> Self {
        match (cpg, operation) {
            (Some(OP_RON), _) => ActionKind::Ron,
            (Some(OP_CHI), _) => ActionKind::Call(CallKind::Chi),
            (Some(OP_PON), _) => ActionKind::Call(CallKind::Pon),
            (Some(OP_MINKAN), _) => ActionKind::Call(CallKind::Kan),
            (_, Some(OP_RIICHI)) => ActionKind::Riichi,
            (_, Some(OP_TSUMO)) => ActionKind::Tsumo,
            _ => ActionKind::Discard,
        }
    }
}

/// A game-log action with its discriminant resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `type == 1`: a wrapped server record. Only win and draw records end a
    /// round; the rest (new round, draws, discards) pass through untouched.
    Terminal { payload: Vec<u8> },
    /// `type == 2`: a player input.
    PlayerEvent { seat: u8, kind: ActionKind },
    /// Any other action type (player events such as emotes).
    Other { raw_type: u32 },
}

impl Action {
    /// Classify one raw action.
    ///
    /// Player inputs without a usable seat fall back to the rule's
    /// fallback seat (logged at debug level). Inputs without a call, riichi
    /// or win code count as [`ActionKind::Discard`]. Unknown action types
    /// are kept as [`Action::Other`] so stream positions stay aligned with
    /// the raw list.
    pub fn from_raw(raw: &RawAction, rule: &AnalyzerRule) -> Self {
        match raw.action_type {
            ACTION_TYPE_RESULT => Action::Terminal {
                payload: raw.result.clone(),
            },
            ACTION_TYPE_USER_INPUT => {
                let input = raw.user_input.as_ref();
                let raw_seat = input.and_then(|i| i.seat);
                let seat = rule.resolve_seat(raw_seat).unwrap_or_else(|| {
                    let fallback = rule.fallback_seat();
                    log::debug!(
                        "{}; using seat {}",
                        PaifuError::MissingSeat { raw_seat },
                        fallback
                    );
                    fallback
                });
                let kind = ActionKind::from_codes(
                    input.and_then(|i| i.cpg).map(|c| c.code),
                    input.and_then(|i| i.operation).map(|o| o.code),
                );
                Action::PlayerEvent { seat, kind }
            }
            raw_type => Action::Other { raw_type },
        }
    }

    /// Acting seat of a player event; `None` for everything else.
    pub fn seat(&self) -> Option<u8> {
        match self {
            Action::PlayerEvent { seat, .. } => Some(*seat),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Action::Terminal { .. })
    }
}

/// Finite, order-preserving action sequence. Every traversal borrows the
/// same backing list, so the statistics and yaku passes are independent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionStream {
    actions: Vec<Action>,
}

impl ActionStream {
    /// Classify `raw` in order under `rule`.
    pub fn from_raw_actions(raw: &[RawAction], rule: &AnalyzerRule) -> Self {
        raw.iter().map(|r| Action::from_raw(r, rule)).collect()
    }

    /// Actions in stream order. Each call starts a fresh traversal.
    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }

    /// Number of actions, terminal and player alike.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }

    /// Payloads of the `Terminal` actions, in stream order.
    pub fn terminal_payloads(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.actions.iter().filter_map(|action| match action {
            Action::Terminal { payload } => Some(payload.as_slice()),
            _ => None,
        })
    }
}

impl From<Vec<Action>> for ActionStream {
    fn from(actions: Vec<Action>) -> Self {
        Self { actions }
    }
}

impl FromIterator<Action> for ActionStream {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ActionStream {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}
