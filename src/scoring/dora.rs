use crate::tile::{dora_from_indicator, Tile};

/// One han per (tile, indicator) match; a tile pointed at by two
/// indicators counts twice.
pub fn count_dora(tiles: &[Tile], indicators: &[Tile]) -> u32 {
    indicators
        .iter()
        .map(dora_from_indicator)
        .map(|dora| tiles.iter().filter(|t| t.index() == dora).count() as u32)
        .sum()
}

pub fn count_aka(tiles: &[Tile]) -> u32 {
    tiles.iter().filter(|t| t.red).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{parse_tiles, Suit};

    #[test]
    fn test_indicator_cycles() {
        let hand = parse_tiles("16m19p15z").unwrap();
        assert_eq!(count_dora(&hand, &[Tile::new(Suit::Man, 5)]), 1);
        assert_eq!(count_dora(&hand, &[Tile::new(Suit::Pin, 9)]), 1);
        assert_eq!(count_dora(&hand, &[Tile::new(Suit::Honor, 4)]), 1);
        assert_eq!(count_dora(&hand, &[Tile::new(Suit::Honor, 7)]), 1);
        assert_eq!(count_dora(&hand, &[Tile::new(Suit::Sou, 1)]), 0);
    }

    #[test]
    fn test_double_indicator() {
        let hand = parse_tiles("666m").unwrap();
        let ind = Tile::new(Suit::Man, 5);
        assert_eq!(count_dora(&hand, &[ind, ind]), 6);
        assert_eq!(count_aka(&parse_tiles("50m0p").unwrap()), 2);
    }
}
