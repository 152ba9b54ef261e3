//! Canonical tile identity and the fixed 0..33 tile-type index space.

use serde::{Deserialize, Serialize};

/// Number of distinct tile types (1m..9m, 1p..9p, 1s..9s, E S W N P F C).
pub const TILE_TYPES: usize = 34;

/// Physical copies of each tile type in a full set.
pub const COPIES_PER_TYPE: u8 = 4;

/// Per-type histogram indexed by [`Tile::index`].
pub type TileCounts = [u8; TILE_TYPES];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Man,
    Pin,
    Sou,
    Honor,
}

impl Suit {
    #[inline]
    fn offset(self) -> usize {
        match self {
            Suit::Man => 0,
            Suit::Pin => 9,
            Suit::Sou => 18,
            Suit::Honor => 27,
        }
    }

    #[inline]
    fn max_rank(self) -> u8 {
        if self == Suit::Honor {
            7
        } else {
            9
        }
    }
}

/// A single physical tile.
///
/// Gameplay logic only looks at `(suit, rank)`; `red` matters for dora and
/// display, `id` tells apart physical copies when deduplicating visible tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub suit: Suit,
    /// 1..=9 for numbered suits, 1..=7 for honors (E S W N, white green red).
    pub rank: u8,
    #[serde(default)]
    pub red: bool,
    #[serde(default)]
    pub id: Option<u32>,
}

impl Tile {
    pub const fn new(suit: Suit, rank: u8) -> Self {
        Self {
            suit,
            rank,
            red: false,
            id: None,
        }
    }

    pub const fn red(suit: Suit, rank: u8) -> Self {
        Self {
            suit,
            rank,
            red: true,
            id: None,
        }
    }

    #[must_use]
    pub const fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    /// `None` outside 0..=33.
    pub fn from_index(index: usize) -> Option<Self> {
        let (suit, base) = match index {
            0..=8 => (Suit::Man, 0),
            9..=17 => (Suit::Pin, 9),
            18..=26 => (Suit::Sou, 18),
            27..=33 => (Suit::Honor, 27),
            _ => return None,
        };
        Some(Self::new(suit, (index - base) as u8 + 1))
    }

    /// Tile-type index in 0..=33. Ranks outside the suit's range are clamped.
    #[inline]
    pub fn index(&self) -> usize {
        let rank = self.rank.clamp(1, self.suit.max_rank());
        self.suit.offset() + rank as usize - 1
    }

    #[inline]
    pub fn same_kind(&self, other: &Tile) -> bool {
        self.index() == other.index()
    }

    #[inline]
    pub fn is_terminal_or_honor(&self) -> bool {
        is_terminal_or_honor(self.index())
    }
}

pub fn tile_index(tile: &Tile) -> usize {
    tile.index()
}

pub fn tile_from_index(index: usize) -> Option<Tile> {
    Tile::from_index(index)
}

// ----- index helpers -----

#[inline]
pub fn is_honor(idx: usize) -> bool {
    idx >= 27
}

#[inline]
pub fn is_terminal(idx: usize) -> bool {
    matches!(idx, 0 | 8 | 9 | 17 | 18 | 26)
}

#[inline]
pub fn is_terminal_or_honor(idx: usize) -> bool {
    is_terminal(idx) || is_honor(idx)
}

#[inline]
pub fn is_dragon(idx: usize) -> bool {
    (31..=33).contains(&idx)
}

#[inline]
pub fn is_wind(idx: usize) -> bool {
    (27..=30).contains(&idx)
}

/// 0=man, 1=pin, 2=sou, 3=honor
#[inline]
pub fn suit_of(idx: usize) -> usize {
    idx / 9
}

/// Index of the wind tile for a wind number 1..=4 (E S W N).
#[inline]
pub fn wind_index(wind: u8) -> usize {
    27 + (wind.clamp(1, 4) as usize - 1)
}

/// Tile type made dora by `indicator`: the next tile of the same cycle.
pub fn dora_from_indicator(indicator: &Tile) -> usize {
    let idx = indicator.index();
    match idx {
        0..=26 => {
            let base = idx - idx % 9;
            base + (idx % 9 + 1) % 9
        }
        27..=30 => 27 + (idx - 27 + 1) % 4,
        _ => 31 + (idx - 31 + 1) % 3,
    }
}

pub fn count_tiles<'a>(tiles: impl IntoIterator<Item = &'a Tile>) -> TileCounts {
    let mut counts = [0u8; TILE_TYPES];
    for tile in tiles {
        counts[tile.index()] = counts[tile.index()].saturating_add(1);
    }
    counts
}

/// Copies of `index` still unseen, given every visible physical tile.
pub fn remaining_copies<'a>(index: usize, visible: impl IntoIterator<Item = &'a Tile>) -> u8 {
    let seen = visible.into_iter().filter(|t| t.index() == index).count();
    COPIES_PER_TYPE.saturating_sub(seen.min(u8::MAX as usize) as u8)
}

/// Compact notation used by tests and diagnostics, e.g. `"123m456p789s11z"`.
///
/// Digits are ranks, the suit letter follows a run (`m`, `p`, `s`, `z`);
/// `0` is a red five.
pub fn parse_tiles(notation: &str) -> Option<Vec<Tile>> {
    let mut tiles = Vec::new();
    let mut pending: Vec<u8> = Vec::new();
    for ch in notation.chars() {
        match ch {
            '0'..='9' => pending.push(ch as u8 - b'0'),
            'm' | 'p' | 's' | 'z' => {
                let suit = match ch {
                    'm' => Suit::Man,
                    'p' => Suit::Pin,
                    's' => Suit::Sou,
                    _ => Suit::Honor,
                };
                for rank in pending.drain(..) {
                    let tile = match rank {
                        0 if suit != Suit::Honor => Tile::red(suit, 5),
                        1..=9 if rank <= suit.max_rank() => Tile::new(suit, rank),
                        _ => return None,
                    };
                    tiles.push(tile);
                }
            }
            c if c.is_whitespace() => {}
            _ => return None,
        }
    }
    if pending.is_empty() {
        Some(tiles)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for i in 0..TILE_TYPES {
            let tile = Tile::from_index(i).unwrap();
            assert_eq!(tile.index(), i);
        }
        assert!(Tile::from_index(34).is_none());
    }

    #[test]
    fn test_index_layout() {
        assert_eq!(Tile::new(Suit::Man, 1).index(), 0);
        assert_eq!(Tile::new(Suit::Pin, 1).index(), 9);
        assert_eq!(Tile::new(Suit::Sou, 9).index(), 26);
        assert_eq!(Tile::new(Suit::Honor, 1).index(), 27);
        assert_eq!(Tile::new(Suit::Honor, 7).index(), 33);
    }

    #[test]
    fn test_dora_cycle() {
        // 5m -> 6m, 9p -> 1p, N -> E, C -> P
        assert_eq!(dora_from_indicator(&Tile::new(Suit::Man, 5)), 5);
        assert_eq!(dora_from_indicator(&Tile::new(Suit::Pin, 9)), 9);
        assert_eq!(dora_from_indicator(&Tile::new(Suit::Honor, 4)), 27);
        assert_eq!(dora_from_indicator(&Tile::new(Suit::Honor, 3)), 30);
        assert_eq!(dora_from_indicator(&Tile::new(Suit::Honor, 7)), 31);
        assert_eq!(dora_from_indicator(&Tile::new(Suit::Honor, 5)), 32);
    }

    #[test]
    fn test_red_five_is_same_kind() {
        let red = Tile::red(Suit::Sou, 5);
        let plain = Tile::new(Suit::Sou, 5).with_id(7);
        assert!(red.same_kind(&plain));
        assert_ne!(red, plain);
    }

    #[test]
    fn test_parse_tiles() {
        let tiles = parse_tiles("123m0p77z").unwrap();
        assert_eq!(tiles.len(), 6);
        assert!(tiles[3].red);
        assert_eq!(tiles[3].index(), 13);
        assert_eq!(tiles[5].index(), 33);
        assert!(parse_tiles("8z").is_none());
        assert!(parse_tiles("12").is_none());
    }

    #[test]
    fn test_remaining_copies() {
        let visible = parse_tiles("111m2m").unwrap();
        assert_eq!(remaining_copies(0, &visible), 1);
        assert_eq!(remaining_copies(1, &visible), 3);
        let five = parse_tiles("11111m").unwrap();
        assert_eq!(remaining_copies(0, &five), 0);
    }
}
