//! Hand-written protobuf messages for the parts of the Mahjong Soul record
//! schema (`liqi.proto`, package `lq`) that the analyzer decodes.
//!
//! Uses prost derive macros directly; field numbers follow the upstream
//! schema. The round-result records (`RecordHule`, `RecordNoTile`,
//! `RecordLiuJu`) declare their scoring and tile fields so test fixtures
//! can build realistic records, though analysis only reads winner seats
//! and fans. Messages and fields not declared here are skipped by prost as
//! unknown fields.

use prost::Message;

// ── Envelope ───────────────────────────────────────────────────

/// `lq.Wrapper`: the tagged container every record travels in.
#[derive(Clone, PartialEq, Message)]
pub struct Wrapper {
    /// Fully qualified message name, e.g. `.lq.RecordHule`.
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(bytes = "vec", tag = "2")]
    pub data: Vec<u8>,
}

// ── Match container ────────────────────────────────────────────

#[derive(Clone, PartialEq, Message)]
pub struct GameDetailRecords {
    /// Pre-v210 layout: a flat list of wrapped round records.
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub records: Vec<Vec<u8>>,
    #[prost(uint32, tag = "2")]
    pub version: u32,
    #[prost(message, repeated, tag = "3")]
    pub actions: Vec<GameAction>,
}

#[derive(Clone, PartialEq, Message)]
pub struct GameAction {
    #[prost(uint32, tag = "1")]
    pub passed: u32,
    /// 1 = server result, 2 = player input, 3 = player event.
    #[prost(uint32, tag = "2")]
    pub r#type: u32,
    /// Wrapped record bytes when `type == 1`.
    #[prost(bytes = "vec", tag = "3")]
    pub result: Vec<u8>,
    #[prost(message, optional, tag = "4")]
    pub user_input: Option<GameUserInput>,
}

#[derive(Clone, PartialEq, Message)]
pub struct GameUserInput {
    #[prost(uint32, tag = "1")]
    pub seat: u32,
    #[prost(uint32, tag = "2")]
    pub r#type: u32,
    #[prost(uint32, tag = "3")]
    pub emo: u32,
    #[prost(message, optional, tag = "10")]
    pub operation: Option<GameSelfOperation>,
    #[prost(message, optional, tag = "11")]
    pub cpg: Option<GameChiPengGang>,
}

/// Self operation: discard, riichi, tsumo, closed/added kan.
#[derive(Clone, PartialEq, Message)]
pub struct GameSelfOperation {
    #[prost(uint32, tag = "1")]
    pub r#type: u32,
    #[prost(uint32, tag = "2")]
    pub index: u32,
    #[prost(string, tag = "3")]
    pub tile: String,
}

/// Response to another seat's discard: chi, pon, open kan, ron.
#[derive(Clone, PartialEq, Message)]
pub struct GameChiPengGang {
    #[prost(uint32, tag = "1")]
    pub r#type: u32,
    #[prost(uint32, tag = "2")]
    pub index: u32,
}

// ── Round terminal records ─────────────────────────────────────

/// `lq.RecordHule`: one or more wins closing the round.
#[derive(Clone, PartialEq, Message)]
pub struct RecordHule {
    #[prost(message, repeated, tag = "1")]
    pub hules: Vec<HuleInfo>,
    #[prost(int32, repeated, tag = "2")]
    pub old_scores: Vec<i32>,
    #[prost(int32, repeated, tag = "3")]
    pub delta_scores: Vec<i32>,
    #[prost(int32, repeated, tag = "5")]
    pub scores: Vec<i32>,
}

#[derive(Clone, PartialEq, Message)]
pub struct HuleInfo {
    #[prost(string, repeated, tag = "1")]
    pub hand: Vec<String>,
    #[prost(string, repeated, tag = "2")]
    pub ming: Vec<String>,
    #[prost(string, tag = "3")]
    pub hu_tile: String,
    #[prost(uint32, tag = "4")]
    pub seat: u32,
    #[prost(bool, tag = "5")]
    pub zimo: bool,
    #[prost(bool, tag = "6")]
    pub qinjia: bool,
    #[prost(bool, tag = "7")]
    pub liqi: bool,
    #[prost(bool, tag = "10")]
    pub yiman: bool,
    #[prost(uint32, tag = "11")]
    pub count: u32,
    #[prost(message, repeated, tag = "12")]
    pub fans: Vec<FanInfo>,
    #[prost(uint32, tag = "13")]
    pub fu: u32,
    #[prost(uint32, tag = "15")]
    pub point_rong: u32,
    #[prost(uint32, tag = "16")]
    pub point_zimo_qin: u32,
    #[prost(uint32, tag = "17")]
    pub point_zimo_xian: u32,
}

/// One scoring component. `val == 0` means the server sent no value.
#[derive(Clone, PartialEq, Message)]
pub struct FanInfo {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(uint32, tag = "2")]
    pub val: u32,
    #[prost(uint32, tag = "3")]
    pub id: u32,
}

/// `lq.RecordNoTile`: exhaustive draw.
#[derive(Clone, PartialEq, Message)]
pub struct RecordNoTile {
    #[prost(bool, tag = "1")]
    pub liujumanguan: bool,
    #[prost(bool, tag = "4")]
    pub gameend: bool,
}

/// `lq.RecordLiuJu`: abortive draw (nine terminals, four winds, ...).
#[derive(Clone, PartialEq, Message)]
pub struct RecordLiuJu {
    #[prost(uint32, tag = "1")]
    pub r#type: u32,
    #[prost(uint32, tag = "3")]
    pub seat: u32,
    #[prost(string, repeated, tag = "4")]
    pub tiles: Vec<String>,
}
