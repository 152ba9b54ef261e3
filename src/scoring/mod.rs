//! Win scoring: yaku, han, fu, points and the payment split.
//!
//! [`score`] reads the hand every way it can be read and keeps the most
//! valuable reading. If the input is inconsistent it logs a warning and
//! answers with a reduced rule set instead of failing.

pub mod decompose;
pub mod dora;
pub mod fu;
pub mod points;
pub mod yaku;

use serde::{Deserialize, Serialize};

use crate::analysis::shanten_with_melds;
use crate::errors::{EvalError, EvalResult};
use crate::meld::{is_menzen, Meld};
use crate::rule::ScoringRule;
use crate::shanten::AGARI;
use crate::tile::{count_tiles, Tile, TileCounts, COPIES_PER_TYPE, TILE_TYPES};

use self::points::{basic_points, Payment};
use self::yaku::{Tally, Yaku};

/// Situation of the win. Winds are 1..=4 (E S W N).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WinContext {
    pub is_tsumo: bool,
    pub is_riichi: bool,
    pub is_double_riichi: bool,
    pub is_ippatsu: bool,
    /// Last tile of the wall on a self-draw, last discard otherwise.
    pub is_haitei: bool,
    pub is_rinshan: bool,
    pub is_chankan: bool,
    pub is_tenhou: bool,
    pub is_chiihou: bool,
    pub is_dealer: bool,
    pub seat_wind: u8,
    pub round_wind: u8,
    pub dora_indicators: Vec<Tile>,
    /// Only counted with riichi.
    pub uradora_indicators: Vec<Tile>,
    pub melds: Vec<Meld>,
}

impl Default for WinContext {
    fn default() -> Self {
        Self {
            is_tsumo: false,
            is_riichi: false,
            is_double_riichi: false,
            is_ippatsu: false,
            is_haitei: false,
            is_rinshan: false,
            is_chankan: false,
            is_tenhou: false,
            is_chiihou: false,
            is_dealer: false,
            seat_wind: 1,
            round_wind: 1,
            dora_indicators: vec![],
            uradora_indicators: vec![],
            melds: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YakuEntry {
    pub name: String,
    pub han: u32,
}

impl YakuEntry {
    fn new(yaku: Yaku, han: u32) -> Self {
        Self {
            name: yaku.name().to_string(),
            han,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub is_win: bool,
    pub yaku: Vec<YakuEntry>,
    pub total_han: u32,
    pub fu: u32,
    /// Value of the hand as a non-dealer discard win.
    pub base_points: u32,
    pub total_points: u32,
    pub payment_info: String,
    pub payment: Payment,
    /// Number of yakuman; 0 for a regular hand.
    pub yakuman: u32,
    pub dora_count: u32,
    pub uradora_count: u32,
    pub aka_dora_count: u32,
}

impl ScoringResult {
    pub fn not_a_win() -> Self {
        Self::default()
    }
}

/// What every yaku and fu rule looks at besides the shape itself.
pub(crate) struct HandEnv<'a> {
    pub ctx: &'a WinContext,
    pub rule: &'a ScoringRule,
    /// Concealed tiles plus every meld tile.
    pub all: TileCounts,
    pub concealed: TileCounts,
    pub win: usize,
    pub menzen: bool,
    pub has_melds: bool,
}

struct DoraCounts {
    dora: u32,
    uradora: u32,
    aka: u32,
}

impl DoraCounts {
    fn new(tiles: &[Tile], ctx: &WinContext) -> Self {
        Self {
            dora: dora::count_dora(tiles, &ctx.dora_indicators),
            uradora: if ctx.is_riichi {
                dora::count_dora(tiles, &ctx.uradora_indicators)
            } else {
                0
            },
            aka: dora::count_aka(tiles),
        }
    }

    fn total(&self) -> u32 {
        self.dora + self.uradora + self.aka
    }

    fn push_entries(&self, yaku: &mut Vec<YakuEntry>) {
        for (kind, count) in [(Yaku::Dora, self.dora), (Yaku::Uradora, self.uradora), (Yaku::Akadora, self.aka)] {
            if count > 0 {
                yaku.push(YakuEntry::new(kind, count));
            }
        }
    }
}

/// Scores `hand` (concealed tiles including `win_tile`) under the default rule.
pub fn score(hand: &[Tile], win_tile: &Tile, ctx: &WinContext) -> ScoringResult {
    score_with_rule(hand, win_tile, ctx, &ScoringRule::default())
}

pub fn score_with_rule(hand: &[Tile], win_tile: &Tile, ctx: &WinContext, rule: &ScoringRule) -> ScoringResult {
    match full_score(hand, win_tile, ctx, rule) {
        Ok(result) => result,
        Err(err) => {
            log::warn!("full scoring failed, using reduced rules: {}", err);
            reduced_score(hand, ctx, rule)
        }
    }
}

fn all_tiles(hand: &[Tile], melds: &[Meld]) -> Vec<Tile> {
    hand.iter()
        .chain(melds.iter().flat_map(|m| m.tiles.iter()))
        .copied()
        .collect()
}

fn validate(hand: &[Tile], win_tile: &Tile, ctx: &WinContext) -> EvalResult<()> {
    let melds = ctx.melds.len();
    if hand.len() + 3 * melds != 14 {
        return Err(EvalError::InvalidHandSize {
            expected: 14usize.saturating_sub(3 * melds),
            actual: hand.len(),
        });
    }
    if !hand.iter().any(|t| t.same_kind(win_tile)) {
        return Err(EvalError::InconsistentHand {
            message: format!("winning tile {} is not in the hand", win_tile.index()),
        });
    }
    let counts = count_tiles(&all_tiles(hand, &ctx.melds));
    if let Some(i) = (0..TILE_TYPES).find(|&i| counts[i] > COPIES_PER_TYPE) {
        return Err(EvalError::InconsistentHand {
            message: format!("{} copies of tile {}", counts[i], i),
        });
    }
    Ok(())
}

struct Candidate {
    tally: Tally,
    han: u32,
    fu: u32,
    payment: Payment,
    basic: u32,
}

impl Candidate {
    fn key(&self) -> (u32, u32, u32, u32) {
        (self.tally.yakuman_count(), self.payment.total, self.han, self.fu)
    }
}

/// Full rule evaluation. Errors when the input cannot be a legal hand;
/// returns a not-a-win result for a legal hand that is not complete or has
/// no yaku.
pub fn full_score(hand: &[Tile], win_tile: &Tile, ctx: &WinContext, rule: &ScoringRule) -> EvalResult<ScoringResult> {
    validate(hand, win_tile, ctx)?;

    let melds = &ctx.melds;
    let concealed = count_tiles(hand);
    let win = win_tile.index();
    let shapes = decompose::arrangements(&concealed, melds, win, ctx.is_tsumo);
    if shapes.is_empty() {
        return Ok(ScoringResult::not_a_win());
    }

    let tiles = all_tiles(hand, melds);
    let env = HandEnv {
        ctx,
        rule,
        all: count_tiles(&tiles),
        concealed,
        win,
        menzen: is_menzen(melds),
        has_melds: !melds.is_empty(),
    };
    let dora = DoraCounts::new(&tiles, ctx);

    let mut best: Option<Candidate> = None;
    for shape in &shapes {
        let tally = yaku::evaluate(shape, &env);
        let yakuman = tally.yakuman_count();
        let (han, fu) = if yakuman > 0 {
            (13 * yakuman, 0)
        } else if tally.yaku.is_empty() {
            continue;
        } else {
            (tally.han() + dora.total(), fu::fu(shape, &env))
        };
        let basic = basic_points(han, fu, yakuman, rule);
        let candidate = Candidate {
            tally,
            han,
            fu,
            payment: Payment::new(basic, ctx.is_dealer, ctx.is_tsumo),
            basic,
        };
        if best.as_ref().map_or(true, |b| candidate.key() > b.key()) {
            best = Some(candidate);
        }
    }

    let Some(best) = best else {
        log::debug!("complete hand without yaku");
        return Ok(ScoringResult::not_a_win());
    };

    let yakuman = best.tally.yakuman_count();
    let mut yaku: Vec<YakuEntry>;
    let counts;
    if yakuman > 0 {
        yaku = best.tally.yakuman.iter().map(|&(y, m)| YakuEntry::new(y, 13 * m)).collect();
        counts = DoraCounts { dora: 0, uradora: 0, aka: 0 };
    } else {
        yaku = best.tally.yaku.iter().map(|&(y, h)| YakuEntry::new(y, h)).collect();
        dora.push_entries(&mut yaku);
        counts = dora;
    }

    Ok(ScoringResult {
        is_win: true,
        yaku,
        total_han: best.han,
        fu: best.fu,
        base_points: points::ceil_100(best.basic * 4),
        total_points: best.payment.total,
        payment_info: best.payment.info(ctx.is_dealer, ctx.is_tsumo),
        payment: best.payment,
        yakuman,
        dora_count: counts.dora,
        uradora_count: counts.uradora,
        aka_dora_count: counts.aka,
    })
}

/// Yaku that need no decomposition: self-draw on a closed hand and all
/// simples. `tiles` should hold every tile of the hand, melds included.
pub fn basic_yaku(tiles: &[Tile], is_tsumo: bool) -> Vec<Yaku> {
    let mut yaku = Vec::new();
    if is_tsumo {
        yaku.push(Yaku::MenzenTsumo);
    }
    if !tiles.is_empty() && tiles.iter().all(|t| !t.is_terminal_or_honor()) {
        yaku.push(Yaku::Tanyao);
    }
    yaku
}

/// Best-effort scoring without hand decomposition.
pub fn reduced_score(hand: &[Tile], ctx: &WinContext, rule: &ScoringRule) -> ScoringResult {
    if shanten_with_melds(hand, &ctx.melds) != AGARI {
        return ScoringResult::not_a_win();
    }
    let menzen = is_menzen(&ctx.melds);
    let tiles = all_tiles(hand, &ctx.melds);

    let mut yaku: Vec<YakuEntry> = Vec::new();
    for y in basic_yaku(&tiles, ctx.is_tsumo) {
        match y {
            Yaku::MenzenTsumo if !menzen => {}
            Yaku::Tanyao if !menzen && !rule.open_tanyao => {}
            _ => yaku.push(YakuEntry::new(y, 1)),
        }
    }
    if ctx.is_riichi && menzen {
        if ctx.is_double_riichi {
            yaku.push(YakuEntry::new(Yaku::DoubleRiichi, 2));
        } else {
            yaku.push(YakuEntry::new(Yaku::Riichi, 1));
        }
        if ctx.is_ippatsu {
            yaku.push(YakuEntry::new(Yaku::Ippatsu, 1));
        }
    }
    if ctx.is_haitei {
        let y = if ctx.is_tsumo { Yaku::Haitei } else { Yaku::Houtei };
        yaku.push(YakuEntry::new(y, 1));
    }
    if ctx.is_rinshan && ctx.is_tsumo {
        yaku.push(YakuEntry::new(Yaku::Rinshan, 1));
    }
    if yaku.is_empty() {
        return ScoringResult::not_a_win();
    }

    let dora = DoraCounts {
        aka: 0,
        ..DoraCounts::new(&tiles, ctx)
    };
    dora.push_entries(&mut yaku);

    let han: u32 = yaku.iter().map(|y| y.han).sum();
    let tsumo_fu = if ctx.is_tsumo { 2 } else { 0 };
    let fu = fu::round_up_10(20 + tsumo_fu + 30);
    let basic = basic_points(han, fu, 0, rule);
    let payment = Payment::new(basic, ctx.is_dealer, ctx.is_tsumo);
    ScoringResult {
        is_win: true,
        yaku,
        total_han: han,
        fu,
        base_points: points::ceil_100(basic * 4),
        total_points: payment.total,
        payment_info: payment.info(ctx.is_dealer, ctx.is_tsumo),
        payment,
        yakuman: 0,
        dora_count: dora.dora,
        uradora_count: dora.uradora,
        aka_dora_count: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ensure_init;
    use crate::tile::{parse_tiles, Suit};

    fn hand(notation: &str) -> Vec<Tile> {
        parse_tiles(notation).unwrap()
    }

    #[test]
    fn test_validate() {
        let h = hand("123m456p789s234s55z");
        let ctx = WinContext::default();
        assert!(validate(&h, &Tile::new(Suit::Man, 1), &ctx).is_ok());
        assert!(matches!(
            validate(&h[..13], &Tile::new(Suit::Man, 1), &ctx),
            Err(EvalError::InvalidHandSize { expected: 14, actual: 13 })
        ));
        assert!(matches!(
            validate(&h, &Tile::new(Suit::Man, 9), &ctx),
            Err(EvalError::InconsistentHand { .. })
        ));
        let five = hand("11111m456p789s234s");
        assert!(validate(&five, &Tile::new(Suit::Man, 1), &ctx).is_err());
    }

    #[test]
    fn test_basic_yaku() {
        assert_eq!(basic_yaku(&hand("234m"), true), vec![Yaku::MenzenTsumo, Yaku::Tanyao]);
        assert_eq!(basic_yaku(&hand("123m"), false), vec![]);
    }

    #[test]
    fn test_reduced_score_tanyao_ron() {
        ensure_init();
        let h = hand("234m456p678s234s55p");
        let result = reduced_score(&h, &WinContext::default(), &ScoringRule::default());
        assert!(result.is_win);
        assert_eq!(result.fu, 50);
        assert_eq!(result.total_han, 1);
        // 50 fu 1 han: 50 * 8 * 4 = 1600.
        assert_eq!(result.total_points, 1600);
    }

    #[test]
    fn test_reduced_score_takes_meld_adjusted_completeness() {
        ensure_init();
        // Concealed part is only tenpai, but one step per meld makes it read
        // as complete.
        let h = hand("234m456p678s5p8s");
        let ctx = WinContext {
            melds: vec![Meld::pon(Tile::new(Suit::Sou, 2), 1)],
            ..WinContext::default()
        };
        let result = reduced_score(&h, &ctx, &ScoringRule::default());
        assert!(result.is_win);
        assert_eq!(result.yaku, vec![YakuEntry::new(Yaku::Tanyao, 1)]);
        assert_eq!(result.fu, 50);
        assert_eq!(result.total_points, 1600);
    }

    #[test]
    fn test_reduced_score_needs_a_yaku() {
        ensure_init();
        let h = hand("123m456p789s234s11z");
        let ctx = WinContext {
            dora_indicators: vec![Tile::new(Suit::Man, 1)],
            ..WinContext::default()
        };
        assert!(!reduced_score(&h, &ctx, &ScoringRule::default()).is_win);
    }
}
