use serde::{Deserialize, Serialize};

use crate::tile::Tile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeldKind {
    Chi,
    Pon,
    Kan,
}

/// A group of tiles fixed by a call (or a concealed quad).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    pub kind: MeldKind,
    pub tiles: Vec<Tile>,
    #[serde(default)]
    pub called_tile: Option<Tile>,
    /// Seat the called tile came from. `None` on a kan means a concealed quad.
    #[serde(default)]
    pub from_player: Option<u8>,
}

impl Meld {
    pub fn chi(tiles: [Tile; 3], from_player: u8) -> Self {
        Self {
            kind: MeldKind::Chi,
            tiles: tiles.to_vec(),
            called_tile: Some(tiles[0]),
            from_player: Some(from_player),
        }
    }

    pub fn pon(tile: Tile, from_player: u8) -> Self {
        Self {
            kind: MeldKind::Pon,
            tiles: vec![tile; 3],
            called_tile: Some(tile),
            from_player: Some(from_player),
        }
    }

    pub fn open_kan(tile: Tile, from_player: u8) -> Self {
        Self {
            kind: MeldKind::Kan,
            tiles: vec![tile; 4],
            called_tile: Some(tile),
            from_player: Some(from_player),
        }
    }

    pub fn concealed_kan(tile: Tile) -> Self {
        Self {
            kind: MeldKind::Kan,
            tiles: vec![tile; 4],
            called_tile: None,
            from_player: None,
        }
    }

    #[inline]
    pub fn is_concealed_kan(&self) -> bool {
        self.kind == MeldKind::Kan && self.from_player.is_none()
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        !self.is_concealed_kan()
    }

    /// Lowest tile-type index of the group.
    pub fn base_index(&self) -> Option<usize> {
        self.tiles.iter().map(Tile::index).min()
    }
}

/// Concealed tiles a hand should hold with `meld_count` melds, before the draw.
#[inline]
pub fn expected_concealed(meld_count: usize) -> Option<usize> {
    (13usize).checked_sub(3 * meld_count)
}

pub fn is_menzen(melds: &[Meld]) -> bool {
    melds.iter().all(Meld::is_concealed_kan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Suit;

    #[test]
    fn test_kan_provenance() {
        let east = Tile::new(Suit::Honor, 1);
        assert!(Meld::concealed_kan(east).is_concealed_kan());
        assert!(Meld::open_kan(east, 2).is_open());
        assert!(Meld::pon(east, 1).is_open());
        assert!(is_menzen(&[Meld::concealed_kan(east)]));
        assert!(!is_menzen(&[Meld::pon(east, 3)]));
    }

    #[test]
    fn test_expected_concealed() {
        assert_eq!(expected_concealed(0), Some(13));
        assert_eq!(expected_concealed(2), Some(7));
        assert_eq!(expected_concealed(4), Some(1));
        assert_eq!(expected_concealed(5), None);
    }
}
