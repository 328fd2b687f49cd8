//! Seat → account mapping for one match.

use serde::{Deserialize, Serialize};

use paifu_engine::stats::NUM_SEATS;

/// One entry of the record header's `accounts` list.
///
/// Protobuf JSON omits zero fields, so the account at seat 0 usually arrives
/// without a `seat` key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    #[serde(default)]
    pub account_id: u64,
    #[serde(default)]
    pub nickname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeatMap {
    seats: [Option<AccountInfo>; NUM_SEATS],
}

impl SeatMap {
    /// Place seat-keyed accounts first, then give each seatless account the
    /// lowest seat still free. Extra or out-of-range accounts are dropped.
    pub fn from_accounts(accounts: &[AccountInfo]) -> Self {
        let mut map = Self::default();
        let mut seatless = Vec::new();

        for account in accounts {
            match account.seat {
                Some(seat) if (seat as usize) < NUM_SEATS => {
                    let slot = &mut map.seats[seat as usize];
                    if slot.is_some() {
                        log::debug!("seat {} listed twice; keeping the first account", seat);
                        continue;
                    }
                    *slot = Some(account.clone());
                }
                Some(seat) => log::debug!(
                    "account {} has seat {}; dropped",
                    account.account_id,
                    seat
                ),
                None => seatless.push(account),
            }
        }

        let mut seatless = seatless.into_iter();
        for slot in map.seats.iter_mut().filter(|slot| slot.is_none()) {
            match seatless.next() {
                Some(account) => *slot = Some(account.clone()),
                None => break,
            }
        }
        for account in seatless {
            log::debug!("no free seat for account {}", account.account_id);
        }
        map
    }

    /// Account at `seat`. `None` for an empty seat or a seat past the table.
    pub fn get(&self, seat: u8) -> Option<&AccountInfo> {
        self.seats.get(seat as usize).and_then(Option::as_ref)
    }

    pub fn account_id(&self, seat: u8) -> Option<u64> {
        self.get(seat).map(|a| a.account_id)
    }

    pub fn nickname(&self, seat: u8) -> Option<&str> {
        self.get(seat).map(|a| a.nickname.as_str())
    }

    /// Seat of `account_id`, if it took part in the match.
    pub fn seat_of(&self, account_id: u64) -> Option<u8> {
        self.seats
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|a| a.account_id == account_id))
            .map(|seat| seat as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: u64, seat: Option<u8>) -> AccountInfo {
        AccountInfo {
            account_id: id,
            nickname: format!("p{}", id),
            seat,
        }
    }

    #[test]
    fn seated_accounts_keep_their_seat() {
        let map = SeatMap::from_accounts(&[
            account(30, Some(3)),
            account(10, Some(1)),
            account(20, Some(2)),
            account(5, None),
        ]);
        assert_eq!(map.account_id(0), Some(5));
        assert_eq!(map.account_id(1), Some(10));
        assert_eq!(map.account_id(2), Some(20));
        assert_eq!(map.account_id(3), Some(30));
        assert_eq!(map.seat_of(20), Some(2));
        assert_eq!(map.nickname(3), Some("p30"));
    }

    #[test]
    fn seatless_accounts_fill_lowest_free_seats() {
        let map =
            SeatMap::from_accounts(&[account(1, None), account(2, Some(0)), account(3, None)]);
        assert_eq!(map.account_id(0), Some(2));
        assert_eq!(map.account_id(1), Some(1));
        assert_eq!(map.account_id(2), Some(3));
        assert_eq!(map.get(3), None);
    }

    #[test]
    fn duplicate_and_out_of_range_seats_are_dropped() {
        let map = SeatMap::from_accounts(&[
            account(1, Some(1)),
            account(2, Some(1)),
            account(3, Some(9)),
        ]);
        assert_eq!(map.account_id(1), Some(1));
        assert_eq!(map.seat_of(2), None);
        assert_eq!(map.seat_of(3), None);
    }

    #[test]
    fn accounts_from_message_to_dict() {
        let json = r#"[
            {"accountId": 1001, "nickname": "east"},
            {"accountId": 1002, "nickname": "south", "seat": 1}
        ]"#;
        let accounts: Vec<AccountInfo> = serde_json::from_str(json).unwrap();
        let map = SeatMap::from_accounts(&accounts);
        assert_eq!(map.nickname(0), Some("east"));
        assert_eq!(map.account_id(1), Some(1002));
    }
}
