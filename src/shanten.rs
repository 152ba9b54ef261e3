//! Shanten arithmetic over 34-slot tile histograms.
//!
//! The standard shape (sets + one pair) is solved per suit and then merged.
//! Every suit summary is an [`Entry`]: for `pair in 0..2` and `sets in 0..=4`,
//! `entry[pair * 5 + sets]` holds the most partial blocks (pairs, two-tile
//! sequence fragments) that fit next to those sets, or `-1` if the split is
//! impossible. Summaries of every reachable suit are precomputed into tables
//! indexed by the base-5 encoding of the suit's counts.

use crate::errors::{EvalError, EvalResult};
use crate::tile::{is_terminal_or_honor, TileCounts, COPIES_PER_TYPE};

pub const SUHAI_TABLE_SIZE: usize = 1_953_125; // 5^9
pub const JIHAI_TABLE_SIZE: usize = 78_125; // 5^7

/// Complete hand.
pub const AGARI: i8 = -1;
/// Sentinel for hands that cannot be evaluated (and the worst real value).
pub const WORST_SHANTEN: i8 = 8;

/// A concealed hand never holds more tiles than this, in one suit or overall.
pub const MAX_HAND_TILES: usize = 14;

const MAX_PARTIALS: i8 = 4;

pub type Entry = [i8; 10];

const UNREACHABLE: Entry = [-1; 10];
const EMPTY: Entry = [0, -1, -1, -1, -1, -1, -1, -1, -1, -1];

pub struct ShantenTables {
    suhai: Vec<Entry>,
    jihai: Vec<Entry>,
}

impl ShantenTables {
    pub fn build() -> Self {
        let suhai = build_table(9, true);
        let jihai = build_table(7, false);
        debug_assert_eq!(suhai.len(), SUHAI_TABLE_SIZE);
        debug_assert_eq!(jihai.len(), JIHAI_TABLE_SIZE);
        Self { suhai, jihai }
    }

    fn lookup(&self, counts: &[u8]) -> EvalResult<&Entry> {
        if let Some(&c) = counts.iter().find(|&&c| c > COPIES_PER_TYPE) {
            return Err(EvalError::BackendUnavailable {
                reason: format!("{} copies of one tile type", c),
            });
        }
        let total: usize = counts.iter().map(|&c| c as usize).sum();
        if total > MAX_HAND_TILES {
            return Err(EvalError::BackendUnavailable {
                reason: format!("{} tiles in one suit", total),
            });
        }
        let table = if counts.len() == 9 { &self.suhai } else { &self.jihai };
        table
            .get(sum_tiles(counts))
            .ok_or_else(|| EvalError::BackendUnavailable {
                reason: "suit encoding outside table".to_string(),
            })
    }

    /// Standard-shape shanten. `len_div3` is the number of target sets and
    /// must be within [0, 4].
    pub fn calc_normal(&self, tiles: &TileCounts, len_div3: u8) -> EvalResult<i8> {
        let mut acc = *self.lookup(&tiles[..9])?;
        acc = combine(&acc, self.lookup(&tiles[9..2 * 9])?);
        acc = combine(&acc, self.lookup(&tiles[2 * 9..3 * 9])?);
        acc = combine(&acc, self.lookup(&tiles[3 * 9..])?);
        Ok(shanten_from_entry(&acc, len_div3))
    }
}

fn sum_tiles(tiles: &[u8]) -> usize {
    tiles.iter().fold(0, |acc, &x| acc * 5 + x as usize)
}

fn build_table(width: usize, sequences: bool) -> Vec<Entry> {
    let mut table = vec![UNREACHABLE; 5usize.pow(width as u32)];
    let mut counts = vec![0u8; width];
    fill_table(&mut table, &mut counts, 0, 0, sequences);
    table
}

// Visits count vectors in increasing encoding order, so every vector with a
// tile removed is already summarized when it is needed.
fn fill_table(table: &mut [Entry], counts: &mut [u8], pos: usize, total: usize, sequences: bool) {
    if pos == counts.len() {
        let entry = summarize(table, counts, sequences);
        table[sum_tiles(counts)] = entry;
        return;
    }
    for c in 0..=COPIES_PER_TYPE {
        if total + c as usize > MAX_HAND_TILES {
            break;
        }
        counts[pos] = c;
        fill_table(table, counts, pos + 1, total + c as usize, sequences);
    }
    counts[pos] = 0;
}

fn summarize(table: &[Entry], counts: &[u8], sequences: bool) -> Entry {
    let Some(r) = counts.iter().position(|&c| c > 0) else {
        return EMPTY;
    };
    let n = counts.len();
    let mut rest = counts.to_vec();
    let mut best = UNREACHABLE;

    // The lowest tile either floats or starts a block.
    branch(table, &mut rest, &[r], (0, 0, 0), &mut best);
    if counts[r] >= 3 {
        branch(table, &mut rest, &[r, r, r], (1, 0, 0), &mut best);
    }
    if counts[r] >= 2 {
        branch(table, &mut rest, &[r, r], (0, 1, 0), &mut best);
        branch(table, &mut rest, &[r, r], (0, 0, 1), &mut best);
    }
    if sequences {
        if r + 2 < n && counts[r + 1] > 0 && counts[r + 2] > 0 {
            branch(table, &mut rest, &[r, r + 1, r + 2], (1, 0, 0), &mut best);
        }
        if r + 1 < n && counts[r + 1] > 0 {
            branch(table, &mut rest, &[r, r + 1], (0, 0, 1), &mut best);
        }
        if r + 2 < n && counts[r + 2] > 0 {
            branch(table, &mut rest, &[r, r + 2], (0, 0, 1), &mut best);
        }
    }
    best
}

fn branch(
    table: &[Entry],
    rest: &mut [u8],
    removed: &[usize],
    (sets, pair, partials): (usize, usize, i8),
    best: &mut Entry,
) {
    for &i in removed {
        rest[i] -= 1;
    }
    let sub = &table[sum_tiles(rest)];
    for p in 0..2 {
        for m in 0..5 {
            let t = sub[p * 5 + m];
            if t < 0 || p + pair > 1 {
                continue;
            }
            let slot = &mut best[(p + pair) * 5 + (m + sets).min(4)];
            *slot = (*slot).max((t + partials).min(MAX_PARTIALS));
        }
    }
    for &i in removed {
        rest[i] += 1;
    }
}

/// Merges two independent summaries; only one pair slot exists hand-wide.
fn combine(lhs: &Entry, rhs: &Entry) -> Entry {
    let mut out = UNREACHABLE;
    for p1 in 0..2 {
        for m1 in 0..5 {
            let t1 = lhs[p1 * 5 + m1];
            if t1 < 0 {
                continue;
            }
            for p2 in 0..(2 - p1) {
                for m2 in 0..5 {
                    let t2 = rhs[p2 * 5 + m2];
                    if t2 < 0 {
                        continue;
                    }
                    let slot = &mut out[(p1 + p2) * 5 + (m1 + m2).min(4)];
                    *slot = (*slot).max((t1 + t2).min(MAX_PARTIALS));
                }
            }
        }
    }
    out
}

fn shanten_from_entry(entry: &Entry, len_div3: u8) -> i8 {
    let target = len_div3.min(4) as i8;
    let mut best = 2 * target;
    for p in 0..2 {
        for m in 0..5 {
            let t = entry[p * 5 + m];
            if t < 0 {
                continue;
            }
            let sets = (m as i8).min(target);
            let partials = t.min(target - sets);
            best = best.min(2 * target - 2 * sets - partials - p as i8);
        }
    }
    best
}

#[must_use]
pub fn calc_chitoi(tiles: &TileCounts) -> i8 {
    let mut pairs = 0;
    let mut kinds = 0;
    tiles.iter().filter(|&&c| c > 0).for_each(|&c| {
        kinds += 1;
        if c >= 2 {
            pairs += 1;
        }
    });

    let redunct = 7_u8.saturating_sub(kinds) as i8;
    7 - pairs + redunct - 1
}

#[must_use]
pub fn calc_kokushi(tiles: &TileCounts) -> i8 {
    let mut pairs = 0;
    let mut kinds = 0;

    for (i, &c) in tiles.iter().enumerate() {
        if c > 0 && is_terminal_or_honor(i) {
            kinds += 1;
            if c >= 2 {
                pairs += 1;
            }
        }
    }

    let redunct = (pairs > 0) as i8;
    14 - kinds - redunct - 1
}

/// Folds the irregular shapes into a standard-shape result. They only exist
/// for a fully concealed hand (`len_div3 == 4`).
#[must_use]
pub fn with_irregular(normal: i8, tiles: &TileCounts, len_div3: u8) -> i8 {
    if normal <= AGARI || len_div3 < 4 {
        return normal;
    }
    normal.min(calc_chitoi(tiles)).min(calc_kokushi(tiles))
}

/// Greedy standard-shape estimate: for each head choice, strip sets and then
/// partial blocks from left to right. Never lower than the exact value.
#[must_use]
pub fn approx_normal(tiles: &TileCounts, len_div3: u8) -> i8 {
    let target = len_div3.min(4) as i8;
    let mut best = greedy_blocks(tiles, target, 0);
    for i in 0..tiles.len() {
        if tiles[i] >= 2 {
            let mut rest = *tiles;
            rest[i] -= 2;
            best = best.min(greedy_blocks(&rest, target, 1));
        }
    }
    best
}

fn greedy_blocks(tiles: &TileCounts, target: i8, pair: i8) -> i8 {
    let mut t = *tiles;
    let mut sets = 0i8;
    let mut partials = 0i8;

    for i in 0..t.len() {
        while t[i] >= 3 {
            t[i] -= 3;
            sets += 1;
        }
        if i < 27 && i % 9 <= 6 {
            while t[i] > 0 && t[i + 1] > 0 && t[i + 2] > 0 {
                t[i] -= 1;
                t[i + 1] -= 1;
                t[i + 2] -= 1;
                sets += 1;
            }
        }
    }
    for i in 0..t.len() {
        while t[i] >= 2 {
            t[i] -= 2;
            partials += 1;
        }
        if i < 27 && i % 9 <= 7 && t[i] > 0 && t[i + 1] > 0 {
            t[i] -= 1;
            t[i + 1] -= 1;
            partials += 1;
        }
        if i < 27 && i % 9 <= 6 && t[i] > 0 && t[i + 2] > 0 {
            t[i] -= 1;
            t[i + 2] -= 1;
            partials += 1;
        }
    }

    let sets = sets.min(target);
    let partials = partials.min(target - sets);
    2 * target - 2 * sets - partials - pair
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{count_tiles, parse_tiles};
    use std::sync::OnceLock;

    fn tables() -> &'static ShantenTables {
        static TABLES: OnceLock<ShantenTables> = OnceLock::new();
        TABLES.get_or_init(ShantenTables::build)
    }

    fn counts(notation: &str) -> TileCounts {
        count_tiles(&parse_tiles(notation).unwrap())
    }

    #[test]
    fn test_empty_suit_entry() {
        assert_eq!(tables().suhai[0], EMPTY);
        assert_eq!(tables().jihai[0], EMPTY);
    }

    #[test]
    fn test_single_suit_entries() {
        // 123: one set, or a fragment.
        let e = tables().lookup(&[1, 1, 1, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(e[1], 0);
        assert_eq!(e[0], 1);
        // 11 as head.
        let e = tables().lookup(&[2, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(e[5], 0);
        assert_eq!(e[0], 1);
    }

    #[test]
    fn test_normal_complete() {
        let t = counts("123m456p789s123s11z");
        assert_eq!(tables().calc_normal(&t, 4).unwrap(), AGARI);
    }

    #[test]
    fn test_normal_tenpai_and_iishanten() {
        assert_eq!(tables().calc_normal(&counts("123m456p789s23s11z"), 4).unwrap(), 0);
        assert_eq!(tables().calc_normal(&counts("123m456p789s2s11z5z"), 4).unwrap(), 1);
    }

    #[test]
    fn test_pair_slot_is_shared() {
        // Five pairs: only one of them can be the head.
        let t = counts("11m22p33s44z55z789m1p");
        assert_eq!(tables().calc_normal(&t, 4).unwrap(), 2);
    }

    #[test]
    fn test_chitoi_and_kokushi() {
        assert_eq!(calc_chitoi(&counts("1133m2255p66s1177z")), AGARI);
        assert_eq!(calc_chitoi(&counts("1133m2255p66s117z")), 0);
        assert_eq!(calc_kokushi(&counts("19m19p19s1234567z")), 0);
        assert_eq!(calc_kokushi(&counts("19m19p19s12345677z")), AGARI);
        assert_eq!(calc_kokushi(&counts("19m19p19s1234566z")), 0);
    }

    #[test]
    fn test_lookup_rejects_overfull_suit() {
        let err = tables().lookup(&[5, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap_err();
        assert!(matches!(err, EvalError::BackendUnavailable { .. }));
    }

    #[test]
    fn test_approx_never_below_exact() {
        for hand in [
            "123m456p789s23s11z",
            "1112345678999m1z",
            "147m258p369s1234z",
            "11223344556677m",
            "2345666m456p11s",
        ] {
            let t = counts(hand);
            let exact = tables().calc_normal(&t, 4).unwrap();
            assert!(approx_normal(&t, 4) >= exact, "{hand}");
        }
    }
}
