use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mahjong_eval::tile::parse_tiles;
use mahjong_eval::{calculate_acceptance, ensure_init, score, shanten, useful_tiles, Suit, Tile, WinContext};

fn bench_shanten(c: &mut Criterion) {
    ensure_init();
    let hands: Vec<Vec<Tile>> = ["123m456p789s23s11z", "147m258p369s1234z", "1133m2255p66s117z", "19m19p19s1234566z"]
        .iter()
        .filter_map(|h| parse_tiles(h))
        .collect();

    c.bench_function("shanten_13", |b| {
        b.iter(|| {
            for hand in &hands {
                black_box(shanten(black_box(hand)));
            }
        });
    });
    c.bench_function("useful_tiles_13", |b| {
        b.iter(|| {
            for hand in &hands {
                black_box(useful_tiles(black_box(hand)));
            }
        });
    });
}

fn bench_acceptance(c: &mut Criterion) {
    ensure_init();
    let hand = parse_tiles("13m24689p1257s14z6z").unwrap_or_default();

    c.bench_function("calculate_acceptance_14", |b| {
        b.iter(|| black_box(calculate_acceptance(black_box(&hand), &[])));
    });
}

fn bench_score(c: &mut Criterion) {
    let hand = parse_tiles("234m567m345p55p678s").unwrap_or_default();
    let win = Tile::new(Suit::Sou, 7);
    let ctx = WinContext {
        is_tsumo: true,
        is_riichi: true,
        dora_indicators: vec![Tile::new(Suit::Man, 1)],
        ..WinContext::default()
    };

    c.bench_function("score_riichi_tsumo", |b| {
        b.iter(|| black_box(score(black_box(&hand), &win, &ctx)));
    });
}

criterion_group!(benches, bench_shanten, bench_acceptance, bench_score);
criterion_main!(benches);
