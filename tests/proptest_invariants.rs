//! Property-based checks over random hands.
//!
//! Hands are drawn as subsets of the 136 physical tiles, so no type ever
//! appears more than four times.

use mahjong_eval::backend::{active_backend, FallbackBackend, ShantenBackend};
use mahjong_eval::tile::{count_tiles, dora_from_indicator};
use mahjong_eval::{
    can_declare_ready, ensure_init, score, shanten, tile_from_index, tile_index, useful_tiles, Suit, Tile, WinContext,
};
use proptest::prelude::*;

fn wall() -> Vec<usize> {
    (0..136).collect()
}

fn to_tiles(ids: &[usize]) -> Vec<Tile> {
    ids.iter()
        .map(|&id| tile_from_index(id / 4).unwrap().with_id(id as u32))
        .collect()
}

fn random_hand(len: usize) -> impl Strategy<Value = Vec<Tile>> {
    proptest::sample::subsequence(wall(), len).prop_map(|ids| to_tiles(&ids))
}

/// Four sets and a pair, expressed as tile-type indices.
fn complete_hand() -> impl Strategy<Value = Vec<usize>> {
    (prop::collection::vec((0usize..34, any::<bool>()), 4), 0usize..34).prop_filter_map(
        "more than four copies",
        |(sets, head)| {
            let mut types = vec![head, head];
            for (base, sequence) in sets {
                if sequence && base < 27 && base % 9 <= 6 {
                    types.extend([base, base + 1, base + 2]);
                } else {
                    types.extend([base, base, base]);
                }
            }
            let mut counts = [0u8; 34];
            for &t in &types {
                counts[t] += 1;
            }
            counts.iter().all(|&c| c <= 4).then_some(types)
        },
    )
}

fn from_types(types: &[usize]) -> Vec<Tile> {
    types.iter().map(|&t| tile_from_index(t).unwrap()).collect()
}

#[test]
fn index_round_trip() {
    for i in 0..34 {
        assert_eq!(tile_index(&tile_from_index(i).unwrap()), i);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn complete_hands_minus_one_tile_are_tenpai(types in complete_hand(), pick in 0usize..14) {
        ensure_init();
        let tiles = from_types(&types);
        prop_assert_eq!(shanten(&tiles), -1);
        prop_assert!(can_declare_ready(&tiles));

        let mut rest = tiles.clone();
        rest.remove(pick);
        prop_assert_eq!(shanten(&rest), 0);
    }

    #[test]
    fn useful_tiles_are_exactly_the_improving_draws(tiles in random_hand(13)) {
        ensure_init();
        let current = shanten(&tiles);
        let useful = useful_tiles(&tiles);
        let counts = count_tiles(&tiles);
        for i in 0..34 {
            if counts[i] >= 4 {
                prop_assert!(!useful.contains(&i));
                continue;
            }
            let mut next = tiles.clone();
            next.push(tile_from_index(i).unwrap());
            prop_assert_eq!(useful.contains(&i), shanten(&next) < current, "tile {}", i);
        }
    }

    #[test]
    fn shanten_stays_in_range(tiles in random_hand(14)) {
        ensure_init();
        let value = shanten(&tiles);
        prop_assert!((-1..=8).contains(&value));
    }

    #[test]
    fn fallback_never_beats_exact(tiles in random_hand(13)) {
        ensure_init();
        let counts = count_tiles(&tiles);
        let exact = active_backend().shanten(&counts, 4).unwrap();
        let approx = FallbackBackend.shanten(&counts, 4).unwrap();
        prop_assert!(approx >= exact);
        prop_assert!((-1..=8).contains(&approx));
    }

    #[test]
    fn incomplete_hands_never_score(tiles in random_hand(14)) {
        ensure_init();
        prop_assume!(shanten(&tiles) != -1);
        let result = score(&tiles, &tiles[0], &WinContext::default());
        prop_assert!(!result.is_win);
        prop_assert_eq!(result.total_points, 0);
        prop_assert!(result.yaku.is_empty());
    }

    #[test]
    fn dora_follows_the_indicator(suit in 0usize..3, rank in 1u8..=9) {
        let suit = [Suit::Man, Suit::Pin, Suit::Sou][suit];
        let indicator = Tile::new(suit, rank);
        let expected = Tile::new(suit, rank % 9 + 1);
        prop_assert_eq!(dora_from_indicator(&indicator), expected.index());
    }
}
