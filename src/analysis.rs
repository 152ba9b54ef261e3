//! Hand-level queries: shanten, useful tiles, riichi and furiten checks, and
//! per-discard acceptance.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::backend;
use crate::errors::{EvalError, EvalResult};
use crate::meld::{expected_concealed, Meld, MeldKind};
use crate::shanten::{AGARI, MAX_HAND_TILES, WORST_SHANTEN};
use crate::tile::{count_tiles, remaining_copies, Tile, TileCounts, COPIES_PER_TYPE, TILE_TYPES};

/// Outcome of discarding one tile from a 14-tile hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptanceInfo {
    pub tile_index: usize,
    /// The physical tile discarded (keeps the red flag and id).
    pub tile: Tile,
    pub shanten_after_discard: i8,
    /// Tile types that lower the shanten of the remaining hand.
    pub acceptance_tiles: Vec<usize>,
    /// Unseen copies of each entry of `acceptance_tiles`, in the same order.
    pub remaining_counts: Vec<u8>,
    pub total_acceptance: u32,
}

fn shanten_counts(counts: &TileCounts, len: usize) -> i8 {
    if len == 0 || len > MAX_HAND_TILES {
        return WORST_SHANTEN;
    }
    backend::shanten_of(counts, (len / 3) as u8).clamp(AGARI, WORST_SHANTEN)
}

fn check_meld_size(len: usize, melds: &[Meld]) -> EvalResult<()> {
    let expected = expected_concealed(melds.len()).ok_or(EvalError::InvalidHandSize {
        expected: 0,
        actual: len,
    })?;
    if len == expected || len == expected + 1 {
        Ok(())
    } else {
        Err(EvalError::InvalidHandSize {
            expected,
            actual: len,
        })
    }
}

fn meld_shanten_counts(counts: &TileCounts, len: usize, melds: &[Meld]) -> i8 {
    match check_meld_size(len, melds) {
        // One step per meld off the concealed value, stopping at complete.
        Ok(()) => (shanten_counts(counts, len) - melds.len() as i8).max(AGARI),
        Err(err) => {
            log::debug!("{}", err);
            WORST_SHANTEN
        }
    }
}

/// Shanten of a concealed hand: -1 complete, 0 tenpai, up to 8.
pub fn shanten(tiles: &[Tile]) -> i8 {
    shanten_counts(&count_tiles(tiles), tiles.len())
}

/// Concealed shanten minus one per meld, floored at -1. Returns 8 when the
/// concealed length is neither `13 - 3m` nor `14 - 3m`.
pub fn shanten_with_melds(tiles: &[Tile], melds: &[Meld]) -> i8 {
    meld_shanten_counts(&count_tiles(tiles), tiles.len(), melds)
}

fn improving_tiles(counts: &TileCounts, len: usize, current: i8, eval: impl Fn(&TileCounts, usize) -> i8) -> Vec<usize> {
    (0..TILE_TYPES)
        .filter(|&i| {
            if counts[i] >= COPIES_PER_TYPE {
                return false;
            }
            let mut next = *counts;
            next[i] += 1;
            eval(&next, len + 1) < current
        })
        .collect()
}

/// Tile types (0..=33) whose draw would lower the shanten. Empty for a
/// complete hand.
pub fn useful_tiles(tiles: &[Tile]) -> Vec<usize> {
    let counts = count_tiles(tiles);
    let current = shanten_counts(&counts, tiles.len());
    if current == AGARI {
        return vec![];
    }
    improving_tiles(&counts, tiles.len(), current, shanten_counts)
}

/// Types held three times in hand, and the fourth tile of every pon.
///
/// Only pon counts among the melds; a chi never makes its tiles a fourth-tile
/// opportunity.
pub fn fourth_tile_opportunities(tiles: &[Tile], melds: &[Meld]) -> Vec<usize> {
    let counts = count_tiles(tiles);
    let mut out: Vec<usize> = (0..TILE_TYPES).filter(|&i| counts[i] == 3).collect();
    for meld in melds {
        if meld.kind == MeldKind::Pon && meld.tiles.len() >= 3 {
            out.push(meld.tiles[0].index());
        }
    }
    out.sort_unstable();
    out.dedup();
    out
}

/// Like [`useful_tiles`], but next to `melds`, and always including
/// [`fourth_tile_opportunities`].
pub fn useful_tiles_with_melds(tiles: &[Tile], melds: &[Meld]) -> Vec<usize> {
    let counts = count_tiles(tiles);
    let current = meld_shanten_counts(&counts, tiles.len(), melds);
    if current == AGARI {
        return vec![];
    }
    let improving = improving_tiles(&counts, tiles.len(), current, |c, len| {
        meld_shanten_counts(c, len, melds)
    });
    let mut out = fourth_tile_opportunities(tiles, melds);
    out.extend(improving);
    out.sort_unstable();
    out.dedup();
    out
}

pub fn is_winning_hand(tiles: &[Tile]) -> bool {
    shanten(tiles) == AGARI
}

fn tenpai_after_some_discard(tiles: &[Tile], eval: impl Fn(&TileCounts, usize) -> i8) -> bool {
    let counts = count_tiles(tiles);
    let mut tried = [false; TILE_TYPES];
    tiles.iter().any(|tile| {
        let idx = tile.index();
        // Identical tile types at different positions give the same hand.
        if std::mem::replace(&mut tried[idx], true) {
            return false;
        }
        let mut rest = counts;
        rest[idx] -= 1;
        eval(&rest, tiles.len() - 1) == 0
    })
}

/// Whether some discard from this 14-tile hand leaves it tenpai.
pub fn can_declare_ready(tiles: &[Tile]) -> bool {
    if tiles.len() != 14 {
        return false;
    }
    tenpai_after_some_discard(tiles, shanten_counts)
}

/// Riichi check next to melds; only concealed quads keep the hand eligible.
pub fn can_declare_ready_with_melds(tiles: &[Tile], melds: &[Meld]) -> bool {
    if !melds.iter().all(Meld::is_concealed_kan) {
        return false;
    }
    if tiles.len() + 3 * melds.len() != 14 {
        return false;
    }
    tenpai_after_some_discard(tiles, shanten_counts)
}

/// Furiten: the hand is tenpai and one of its waits is in the player's own
/// discards.
pub fn is_self_wait_violation(tiles: &[Tile], discards: &[Tile]) -> bool {
    if shanten(tiles) != 0 {
        return false;
    }
    let waits = useful_tiles(tiles);
    discards.iter().any(|d| waits.contains(&d.index()))
}

/// Unseen copies of tile type `index`.
pub fn tile_remaining_count(index: usize, visible: &[Tile]) -> u8 {
    remaining_copies(index, visible)
}

/// Evaluates every distinct discard of a 14-tile hand.
///
/// `visible` may include the hand itself; tiles sharing an id with a hand
/// tile are skipped so they are not counted twice. Red and plain copies of
/// the same type are separate discards.
pub fn calculate_acceptance(tiles: &[Tile], visible: &[Tile]) -> Vec<AcceptanceInfo> {
    if tiles.len() != 14 {
        return vec![];
    }
    backend::init();

    let hand_ids: HashSet<u32> = tiles.iter().filter_map(|t| t.id).collect();
    let others: Vec<&Tile> = visible
        .iter()
        .filter(|t| t.id.map_or(true, |id| !hand_ids.contains(&id)))
        .collect();

    let mut seen: HashSet<(usize, bool)> = HashSet::new();
    let mut results = Vec::new();
    for (pos, tile) in tiles.iter().enumerate() {
        if !seen.insert((tile.index(), tile.red)) {
            continue;
        }
        let mut rest = tiles.to_vec();
        rest.remove(pos);

        let shanten_after_discard = shanten(&rest);
        let acceptance_tiles = useful_tiles(&rest);
        let remaining_counts: Vec<u8> = acceptance_tiles
            .iter()
            .map(|&i| remaining_copies(i, rest.iter().chain(others.iter().copied())))
            .collect();
        let total_acceptance = remaining_counts.iter().map(|&c| c as u32).sum();

        results.push(AcceptanceInfo {
            tile_index: tile.index(),
            tile: *tile,
            shanten_after_discard,
            acceptance_tiles,
            remaining_counts,
            total_acceptance,
        });
    }
    results
}

/// Discards with the lowest resulting shanten and, among those, the largest
/// acceptance. Ties are all returned in input order.
pub fn best_acceptance_tiles(infos: &[AcceptanceInfo]) -> Vec<usize> {
    let Some(min_shanten) = infos.iter().map(|i| i.shanten_after_discard).min() else {
        return vec![];
    };
    let candidates: Vec<&AcceptanceInfo> = infos
        .iter()
        .filter(|i| i.shanten_after_discard == min_shanten)
        .collect();
    let max_acceptance = candidates
        .iter()
        .map(|i| i.total_acceptance)
        .max()
        .unwrap_or(0);
    candidates
        .into_iter()
        .filter(|i| i.total_acceptance == max_acceptance)
        .map(|i| i.tile_index)
        .collect()
}
