//! Han and fu to points, and who pays what.

use serde::{Deserialize, Serialize};

use crate::rule::ScoringRule;

/// Basic points of a mangan; every plateau is a multiple of it.
pub const MANGAN: u32 = 2000;
pub const YAKUMAN_BASIC: u32 = 8000;

pub fn ceil_100(points: u32) -> u32 {
    points.div_ceil(100) * 100
}

/// Basic points before the payer multipliers.
pub fn basic_points(han: u32, fu: u32, yakuman: u32, rule: &ScoringRule) -> u32 {
    if yakuman > 0 {
        return YAKUMAN_BASIC * yakuman;
    }
    match han {
        0 => 0,
        1..=4 => {
            let basic = u64::from(fu) << (han + 2);
            basic.min(u64::from(MANGAN)) as u32
        }
        5 => MANGAN,
        6 | 7 => MANGAN * 3 / 2,
        8..=10 => MANGAN * 2,
        11 | 12 => MANGAN * 3,
        _ if rule.kazoe_yakuman => YAKUMAN_BASIC,
        _ => MANGAN * 3,
    }
}

/// Points changing hands on a win. Unused fields stay zero: `ron` for a
/// self-draw, the two `tsumo_*` fields for a discard win.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub ron: u32,
    /// Paid by the dealer on a non-dealer self-draw.
    pub tsumo_dealer: u32,
    /// Paid by each non-dealer on a self-draw.
    pub tsumo_non_dealer: u32,
    pub total: u32,
}

impl Payment {
    pub fn new(basic: u32, is_dealer: bool, is_tsumo: bool) -> Self {
        match (is_tsumo, is_dealer) {
            (false, dealer) => {
                let ron = ceil_100(basic * if dealer { 6 } else { 4 });
                Self {
                    ron,
                    total: ron,
                    ..Self::default()
                }
            }
            (true, true) => {
                let each = ceil_100(basic * 2);
                Self {
                    tsumo_non_dealer: each,
                    total: each * 3,
                    ..Self::default()
                }
            }
            (true, false) => {
                let ko = ceil_100(basic);
                let oya = ceil_100(basic * 2);
                Self {
                    tsumo_dealer: oya,
                    tsumo_non_dealer: ko,
                    total: ko * 2 + oya,
                    ..Self::default()
                }
            }
        }
    }

    /// `"3900 all"`, `"1000-2000"` (non-dealers, then dealer) or `"7700"`.
    pub fn info(&self, is_dealer: bool, is_tsumo: bool) -> String {
        match (is_tsumo, is_dealer) {
            (false, _) => self.ron.to_string(),
            (true, true) => format!("{} all", self.tsumo_non_dealer),
            (true, false) => format!("{}-{}", self.tsumo_non_dealer, self.tsumo_dealer),
        }
    }
}
