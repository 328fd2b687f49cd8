//! Two-level tagged envelope decoding.
//!
//! Every record in a Mahjong Soul game log is a `Wrapper { name, data }`
//! whose `name` selects the schema of `data`. The round-terminal payload of a
//! `type == 1` action is itself such a wrapper, so callers unwrap once to get
//! the tag and decode again to get the typed record.

use prost::Message;

use crate::errors::{PaifuError, PaifuResult};
use crate::proto::{GameDetailRecords, RecordHule, RecordLiuJu, RecordNoTile, Wrapper};

/// One unwrapped envelope layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Envelope {
    pub tag: String,
    pub payload: Vec<u8>,
}

/// Registered record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Hule,
    NoTile,
    LiuJu,
    GameDetailRecords,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Hule,
        RecordKind::NoTile,
        RecordKind::LiuJu,
        RecordKind::GameDetailRecords,
    ];

    /// Fully qualified message name used as the wrapper tag.
    pub const fn tag(self) -> &'static str {
        match self {
            RecordKind::Hule => ".lq.RecordHule",
            RecordKind::NoTile => ".lq.RecordNoTile",
            RecordKind::LiuJu => ".lq.RecordLiuJu",
            RecordKind::GameDetailRecords => ".lq.GameDetailRecords",
        }
    }

    /// Exact match against the registered tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

/// A payload decoded according to its registered schema.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedRecord {
    Hule(RecordHule),
    NoTile(RecordNoTile),
    LiuJu(RecordLiuJu),
    GameDetailRecords(GameDetailRecords),
}

impl TypedRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            TypedRecord::Hule(_) => RecordKind::Hule,
            TypedRecord::NoTile(_) => RecordKind::NoTile,
            TypedRecord::LiuJu(_) => RecordKind::LiuJu,
            TypedRecord::GameDetailRecords(_) => RecordKind::GameDetailRecords,
        }
    }
}

/// Outcome of [`decode_typed`]. An unregistered tag is not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Typed(TypedRecord),
    Unknown(String),
}

/// Peel one envelope layer off `bytes`.
///
/// Fails only when the bytes are not a structurally valid wrapper; an
/// unfamiliar tag is returned as-is.
pub fn unwrap_envelope(bytes: &[u8]) -> PaifuResult<Envelope> {
    let wrapper = Wrapper::decode(bytes)?;
    Ok(Envelope {
        tag: wrapper.name,
        payload: wrapper.data,
    })
}

/// Wrap `payload` under `tag`. Inverse of [`unwrap_envelope`].
pub fn wrap_envelope(tag: &str, payload: Vec<u8>) -> Vec<u8> {
    Wrapper {
        name: tag.to_string(),
        data: payload,
    }
    .encode_to_vec()
}

/// Look `tag` up in the registry and decode `payload` with its schema.
pub fn decode_typed(tag: &str, payload: &[u8]) -> PaifuResult<Decoded> {
    let Some(kind) = RecordKind::from_tag(tag) else {
        return Ok(Decoded::Unknown(tag.to_string()));
    };
    let record = match kind {
        RecordKind::Hule => TypedRecord::Hule(RecordHule::decode(payload)?),
        RecordKind::NoTile => TypedRecord::NoTile(RecordNoTile::decode(payload)?),
        RecordKind::LiuJu => TypedRecord::LiuJu(RecordLiuJu::decode(payload)?),
        RecordKind::GameDetailRecords => {
            TypedRecord::GameDetailRecords(GameDetailRecords::decode(payload)?)
        }
    };
    Ok(Decoded::Typed(record))
}

impl Envelope {
    /// Registered kind of the tag, or `None` for an unfamiliar one.
    pub fn kind(&self) -> Option<RecordKind> {
        RecordKind::from_tag(&self.tag)
    }

    /// Decode the payload with the schema registered for the tag.
    ///
    /// An unregistered tag yields [`Decoded::Unknown`]; only a payload that
    /// does not match its registered schema is an error.
    pub fn decode(&self) -> PaifuResult<Decoded> {
        decode_typed(&self.tag, &self.payload)
    }

    /// Decode the payload, turning an unregistered tag into
    /// [`PaifuError::UnknownTag`] for callers that require a known record.
    pub fn decode_known(&self) -> PaifuResult<TypedRecord> {
        match self.decode()? {
            Decoded::Typed(record) => Ok(record),
            Decoded::Unknown(tag) => Err(PaifuError::UnknownTag { tag }),
        }
    }

    /// Re-wrap the envelope. Inverse of [`unwrap_envelope`].
    pub fn to_bytes(&self) -> Vec<u8> {
        wrap_envelope(&self.tag, self.payload.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::{FanInfo, HuleInfo};

    fn hule_bytes() -> Vec<u8> {
        RecordHule {
            hules: vec![HuleInfo {
                seat: 2,
                zimo: true,
                fans: vec![FanInfo {
                    name: String::new(),
                    val: 1,
                    id: 2,
                }],
                ..Default::default()
            }],
            ..Default::default()
        }
        .encode_to_vec()
    }

    #[test]
    fn unwrap_then_decode_hule() {
        let bytes = wrap_envelope(RecordKind::Hule.tag(), hule_bytes());
        let env = unwrap_envelope(&bytes).unwrap();
        assert_eq!(env.tag, ".lq.RecordHule");
        assert_eq!(env.kind(), Some(RecordKind::Hule));
        match env.decode().unwrap() {
            Decoded::Typed(TypedRecord::Hule(hule)) => {
                assert_eq!(hule.hules.len(), 1);
                assert_eq!(hule.hules[0].seat, 2);
                assert!(hule.hules[0].zimo);
            }
            other => panic!("expected hule record, got {:?}", other),
        }
    }

    #[test]
    fn unknown_tag_is_not_an_error() {
        let bytes = wrap_envelope(".lq.RecordDiscardTile", vec![0x08, 0x01]);
        let env = unwrap_envelope(&bytes).unwrap();
        assert_eq!(env.kind(), None);
        assert_eq!(
            env.decode().unwrap(),
            Decoded::Unknown(".lq.RecordDiscardTile".to_string())
        );
        assert!(matches!(
            env.decode_known(),
            Err(PaifuError::UnknownTag { .. })
        ));
    }

    #[test]
    fn truncated_envelope_is_malformed() {
        let bytes = wrap_envelope(RecordKind::NoTile.tag(), vec![0x08, 0x01]);
        let cut = &bytes[..bytes.len() - 3];
        assert!(matches!(
            unwrap_envelope(cut),
            Err(PaifuError::MalformedEnvelope { .. })
        ));
    }

    #[test]
    fn empty_bytes_unwrap_to_empty_envelope() {
        let env = unwrap_envelope(&[]).unwrap();
        assert_eq!(env, Envelope::default());
        assert!(matches!(env.decode().unwrap(), Decoded::Unknown(tag) if tag.is_empty()));
    }

    #[test]
    fn registry_round_trips_tags() {
        for kind in RecordKind::ALL {
            assert_eq!(RecordKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(RecordKind::from_tag("RecordHule"), None);
    }

    #[test]
    fn nested_envelope_needs_two_unwraps() {
        let inner = wrap_envelope(RecordKind::Hule.tag(), hule_bytes());
        let outer = wrap_envelope(".lq.ActionPrototype", inner.clone());
        let first = unwrap_envelope(&outer).unwrap();
        assert_eq!(first.kind(), None);
        let second = unwrap_envelope(&first.payload).unwrap();
        assert_eq!(second.kind(), Some(RecordKind::Hule));
        assert_eq!(second.to_bytes(), inner);
    }
}
