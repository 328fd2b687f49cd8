use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Mahjong Soul fan ids as sent in `HuleInfo.fans[].id`.
pub const ID_TSUMO: u32 = 1;
pub const ID_RIICHI: u32 = 2;
pub const ID_DORA: u32 = 31;
pub const ID_AKADORA: u32 = 32;
pub const ID_URADORA: u32 = 33;

const MJSOUL_FANS: &[(u32, &str)] = &[
    (1, "Menzen Tsumo"),
    (2, "Riichi"),
    (3, "Chankan"),
    (4, "Rinshan Kaihou"),
    (5, "Haitei Raoyue"),
    (6, "Houtei Raoyui"),
    (7, "Yakuhai Haku"),
    (8, "Yakuhai Hatsu"),
    (9, "Yakuhai Chun"),
    (10, "Yakuhai Seat Wind"),
    (11, "Yakuhai Round Wind"),
    (12, "Tanyao"),
    (13, "Iipeikou"),
    (14, "Pinfu"),
    (15, "Chanta"),
    (16, "Ittsu"),
    (17, "Sanshoku Doujun"),
    (18, "Double Riichi"),
    (19, "Sanshoku Doukou"),
    (20, "Sankantsu"),
    (21, "Toitoi"),
    (22, "Sanankou"),
    (23, "Shousangen"),
    (24, "Honroutou"),
    (25, "Chiitoitsu"),
    (26, "Junchan"),
    (27, "Honitsu"),
    (28, "Ryanpeikou"),
    (29, "Chinitsu"),
    (30, "Ippatsu"),
    (31, "Dora"),
    (32, "Aka Dora"),
    (33, "Ura Dora"),
    (34, "Kita"),
    (35, "Tenhou"),
    (36, "Chiihou"),
    (37, "Daisangen"),
    (38, "Suuankou"),
    (39, "Tsuuiisou"),
    (40, "Ryuuiisou"),
    (41, "Chinroutou"),
    (42, "Kokushi Musou"),
    (43, "Shousuushii"),
    (44, "Suukantsu"),
    (45, "Chuuren Poutou"),
    (46, "Paarenchan"),
    (47, "Junsei Chuuren Poutou"),
    (48, "Suuankou Tanki"),
    (49, "Kokushi Musou 13-sided"),
    (50, "Daisuushii"),
    (51, "Tsubame Gaeshi"),
    (52, "Kanburi"),
    (53, "Shiiaru Raotai"),
    (54, "Uumensai"),
    (55, "Sanrenkou"),
    (56, "Isshoku Sanjun"),
    (57, "Iipin Moyue"),
    (58, "Chuupin Raoyui"),
    (59, "Renhou"),
    (60, "Daisharin"),
    (61, "Daichikurin"),
    (62, "Daisuurin"),
    (63, "Ishino Uenimo Sannen"),
];

/// Immutable fan id → display name table.
#[derive(Debug, Clone, Default)]
pub struct FanTable {
    names: HashMap<u32, &'static str>,
}

impl FanTable {
    pub fn from_entries(entries: &[(u32, &'static str)]) -> Self {
        Self {
            names: entries.iter().copied().collect(),
        }
    }

    /// The Mahjong Soul table, built on first use and shared afterwards.
    pub fn mjsoul() -> &'static FanTable {
        static TABLE: OnceLock<FanTable> = OnceLock::new();
        TABLE.get_or_init(|| FanTable::from_entries(MJSOUL_FANS))
    }

    pub fn get(&self, id: u32) -> Option<&'static str> {
        self.names.get(&id).copied()
    }

    /// Display name of `id`, or a `fan#<id>` placeholder for unknown ids.
    pub fn name(&self, id: u32) -> Cow<'static, str> {
        match self.get(id) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(format!("fan#{}", id)),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ids() {
        let table = FanTable::mjsoul();
        assert_eq!(table.name(ID_TSUMO), "Menzen Tsumo");
        assert_eq!(table.name(ID_RIICHI), "Riichi");
        assert_eq!(table.name(ID_DORA), "Dora");
        assert_eq!(table.name(ID_AKADORA), "Aka Dora");
        assert_eq!(table.name(ID_URADORA), "Ura Dora");
        assert_eq!(table.len(), MJSOUL_FANS.len());
    }

    #[test]
    fn unknown_id_gets_placeholder() {
        assert_eq!(FanTable::mjsoul().name(999), "fan#999");
        assert_eq!(FanTable::default().name(2), "fan#2");
    }

    #[test]
    fn shared_table_is_built_once() {
        assert!(std::ptr::eq(FanTable::mjsoul(), FanTable::mjsoul()));
    }

    #[test]
    fn ids_are_unique() {
        let table = FanTable::from_entries(MJSOUL_FANS);
        assert_eq!(table.len(), MJSOUL_FANS.len());
    }
}
