use serde::{Deserialize, Serialize};

use super::decompose::{Group, GroupKind, Shape, Wait};
use super::HandEnv;
use crate::tile::{is_dragon, is_honor, is_terminal, is_terminal_or_honor, is_wind, suit_of, wind_index, TILE_TYPES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Yaku {
    // 1 han
    Riichi,
    Ippatsu,
    MenzenTsumo,
    Pinfu,
    Iipeikou,
    Haitei,
    Houtei,
    Rinshan,
    Chankan,
    Tanyao,
    Haku,
    Hatsu,
    Chun,
    SeatWind,
    RoundWind,
    // 2 han
    DoubleRiichi,
    Chiitoitsu,
    SanshokuDoujun,
    Ittsu,
    Chanta,
    Toitoi,
    Sanankou,
    SanshokuDoukou,
    Sankantsu,
    Shousangen,
    Honroutou,
    // 3 han and up
    Ryanpeikou,
    Junchan,
    Honitsu,
    Chinitsu,
    // yakuman
    Tenhou,
    Chiihou,
    Kokushi,
    Kokushi13,
    Suuankou,
    SuuankouTanki,
    Daisangen,
    Shousuushi,
    Daisuushi,
    Tsuuiisou,
    Ryuuiisou,
    Chinroutou,
    Chuuren,
    JunseiChuuren,
    Suukantsu,
    // bonus han, not yaku
    Dora,
    Uradora,
    Akadora,
}

impl Yaku {
    /// Stable identifier of the pattern.
    pub fn name(self) -> &'static str {
        match self {
            Yaku::Riichi => "立直",
            Yaku::Ippatsu => "一発",
            Yaku::MenzenTsumo => "門前清自摸和",
            Yaku::Pinfu => "平和",
            Yaku::Iipeikou => "一盃口",
            Yaku::Haitei => "海底摸月",
            Yaku::Houtei => "河底撈魚",
            Yaku::Rinshan => "嶺上開花",
            Yaku::Chankan => "槍槓",
            Yaku::Tanyao => "断么九",
            Yaku::Haku => "役牌 白",
            Yaku::Hatsu => "役牌 發",
            Yaku::Chun => "役牌 中",
            Yaku::SeatWind => "自風牌",
            Yaku::RoundWind => "場風牌",
            Yaku::DoubleRiichi => "ダブル立直",
            Yaku::Chiitoitsu => "七対子",
            Yaku::SanshokuDoujun => "三色同順",
            Yaku::Ittsu => "一気通貫",
            Yaku::Chanta => "混全帯么九",
            Yaku::Toitoi => "対々和",
            Yaku::Sanankou => "三暗刻",
            Yaku::SanshokuDoukou => "三色同刻",
            Yaku::Sankantsu => "三槓子",
            Yaku::Shousangen => "小三元",
            Yaku::Honroutou => "混老頭",
            Yaku::Ryanpeikou => "二盃口",
            Yaku::Junchan => "純全帯么九",
            Yaku::Honitsu => "混一色",
            Yaku::Chinitsu => "清一色",
            Yaku::Tenhou => "天和",
            Yaku::Chiihou => "地和",
            Yaku::Kokushi => "国士無双",
            Yaku::Kokushi13 => "国士無双十三面",
            Yaku::Suuankou => "四暗刻",
            Yaku::SuuankouTanki => "四暗刻単騎",
            Yaku::Daisangen => "大三元",
            Yaku::Shousuushi => "小四喜",
            Yaku::Daisuushi => "大四喜",
            Yaku::Tsuuiisou => "字一色",
            Yaku::Ryuuiisou => "緑一色",
            Yaku::Chinroutou => "清老頭",
            Yaku::Chuuren => "九蓮宝燈",
            Yaku::JunseiChuuren => "九蓮宝燈九面",
            Yaku::Suukantsu => "四槓子",
            Yaku::Dora => "ドラ",
            Yaku::Uradora => "裏ドラ",
            Yaku::Akadora => "赤ドラ",
        }
    }
}

/// Yaku found for one reading of the hand. When `yakuman` is non-empty the
/// regular list is left empty.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    /// (pattern, han)
    pub yaku: Vec<(Yaku, u32)>,
    /// (pattern, yakuman multiplier)
    pub yakuman: Vec<(Yaku, u32)>,
}

impl Tally {
    pub fn han(&self) -> u32 {
        self.yaku.iter().map(|&(_, h)| h).sum()
    }

    pub fn yakuman_count(&self) -> u32 {
        self.yakuman.iter().map(|&(_, m)| m).sum()
    }
}

const GREEN: [usize; 6] = [19, 20, 21, 23, 25, 32]; // 2s 3s 4s 6s 8s hatsu

/// Closed value, one han less when the hand is open.
fn kuisagari(closed: u32, menzen: bool) -> u32 {
    if menzen {
        closed
    } else {
        closed - 1
    }
}

fn is_yakuhai(idx: usize, env: &HandEnv) -> bool {
    is_dragon(idx) || idx == wind_index(env.ctx.seat_wind) || idx == wind_index(env.ctx.round_wind)
}

pub(crate) fn is_pinfu(groups: &[Group], head: usize, wait: Wait, env: &HandEnv) -> bool {
    env.menzen && groups.iter().all(Group::is_sequence) && !is_yakuhai(head, env) && wait == Wait::Ryanmen
}

pub(crate) fn evaluate(shape: &Shape, env: &HandEnv) -> Tally {
    let yakuman = yakuman_for(shape, env);
    if !yakuman.is_empty() {
        return Tally {
            yaku: vec![],
            yakuman,
        };
    }

    let mut yaku = situational(env);
    match shape {
        Shape::Standard { groups, head, wait } => standard_yaku(&mut yaku, groups, *head, *wait, env),
        Shape::SevenPairs { .. } => {
            yaku.push((Yaku::Chiitoitsu, 2));
            tile_pattern_yaku(&mut yaku, env);
        }
        Shape::Orphans { .. } => {}
    }
    Tally { yaku, yakuman: vec![] }
}

fn situational(env: &HandEnv) -> Vec<(Yaku, u32)> {
    let ctx = env.ctx;
    let mut yaku = Vec::new();
    if env.menzen && ctx.is_riichi {
        if ctx.is_double_riichi {
            yaku.push((Yaku::DoubleRiichi, 2));
        } else {
            yaku.push((Yaku::Riichi, 1));
        }
        if ctx.is_ippatsu {
            yaku.push((Yaku::Ippatsu, 1));
        }
    }
    if env.menzen && ctx.is_tsumo {
        yaku.push((Yaku::MenzenTsumo, 1));
    }
    if ctx.is_haitei {
        yaku.push((if ctx.is_tsumo { Yaku::Haitei } else { Yaku::Houtei }, 1));
    }
    if ctx.is_rinshan && ctx.is_tsumo {
        yaku.push((Yaku::Rinshan, 1));
    }
    if ctx.is_chankan && !ctx.is_tsumo {
        yaku.push((Yaku::Chankan, 1));
    }
    yaku
}

/// Yaku that only depend on which tiles the hand holds.
fn tile_pattern_yaku(yaku: &mut Vec<(Yaku, u32)>, env: &HandEnv) {
    let held: Vec<usize> = (0..TILE_TYPES).filter(|&i| env.all[i] > 0).collect();

    if (env.menzen || env.rule.open_tanyao) && held.iter().all(|&i| !is_terminal_or_honor(i)) {
        yaku.push((Yaku::Tanyao, 1));
    }
    if held.iter().all(|&i| is_terminal_or_honor(i)) {
        yaku.push((Yaku::Honroutou, 2));
    }

    let mut suits = held.iter().filter(|&&i| !is_honor(i)).map(|&i| suit_of(i)).collect::<Vec<_>>();
    suits.dedup();
    if suits.len() == 1 {
        if held.iter().any(|&i| is_honor(i)) {
            yaku.push((Yaku::Honitsu, kuisagari(3, env.menzen)));
        } else {
            yaku.push((Yaku::Chinitsu, kuisagari(6, env.menzen)));
        }
    }
}

fn standard_yaku(yaku: &mut Vec<(Yaku, u32)>, groups: &[Group], head: usize, wait: Wait, env: &HandEnv) {
    let menzen = env.menzen;
    let sequences: Vec<usize> = groups.iter().filter(|g| g.is_sequence()).map(|g| g.base).collect();
    let triplets: Vec<usize> = groups.iter().filter(|g| g.is_triplet_like()).map(|g| g.base).collect();

    if is_pinfu(groups, head, wait, env) {
        yaku.push((Yaku::Pinfu, 1));
    }

    if menzen {
        let mut bases = sequences.clone();
        bases.sort_unstable();
        let mut peikou = 0;
        let mut i = 0;
        while i + 1 < bases.len() {
            if bases[i] == bases[i + 1] {
                peikou += 1;
                i += 2;
            } else {
                i += 1;
            }
        }
        match peikou {
            1 => yaku.push((Yaku::Iipeikou, 1)),
            2 => yaku.push((Yaku::Ryanpeikou, 3)),
            _ => {}
        }
    }

    for &t in &triplets {
        match t {
            31 => yaku.push((Yaku::Haku, 1)),
            32 => yaku.push((Yaku::Hatsu, 1)),
            33 => yaku.push((Yaku::Chun, 1)),
            _ => {}
        }
        if t == wind_index(env.ctx.seat_wind) {
            yaku.push((Yaku::SeatWind, 1));
        }
        if t == wind_index(env.ctx.round_wind) {
            yaku.push((Yaku::RoundWind, 1));
        }
    }

    if (0..7).any(|r| [r, r + 9, r + 18].iter().all(|b| sequences.contains(b))) {
        yaku.push((Yaku::SanshokuDoujun, kuisagari(2, menzen)));
    }
    if (0..3).any(|s| [9 * s, 9 * s + 3, 9 * s + 6].iter().all(|b| sequences.contains(b))) {
        yaku.push((Yaku::Ittsu, kuisagari(2, menzen)));
    }

    if triplets.len() == 4 {
        yaku.push((Yaku::Toitoi, 2));
    }
    let concealed_triplets = groups.iter().filter(|g| g.is_triplet_like() && !g.open).count();
    if concealed_triplets == 3 {
        yaku.push((Yaku::Sanankou, 2));
    }
    if (0..9).any(|r| [r, r + 9, r + 18].iter().all(|b| triplets.contains(b))) {
        yaku.push((Yaku::SanshokuDoukou, 2));
    }
    if groups.iter().filter(|g| g.kind == GroupKind::Quad).count() == 3 {
        yaku.push((Yaku::Sankantsu, 2));
    }
    if triplets.iter().filter(|&&t| is_dragon(t)).count() == 2 && is_dragon(head) {
        yaku.push((Yaku::Shousangen, 2));
    }

    let all_outside = groups.iter().all(Group::has_terminal_or_honor) && is_terminal_or_honor(head);
    if all_outside && !sequences.is_empty() {
        let has_honor = is_honor(head) || triplets.iter().any(|&t| is_honor(t));
        if has_honor {
            yaku.push((Yaku::Chanta, kuisagari(2, menzen)));
        } else {
            yaku.push((Yaku::Junchan, kuisagari(3, menzen)));
        }
    }

    tile_pattern_yaku(yaku, env);
}

fn yakuman_for(shape: &Shape, env: &HandEnv) -> Vec<(Yaku, u32)> {
    let ctx = env.ctx;
    let rule = env.rule;
    let double = |enabled: bool| if enabled { 2 } else { 1 };
    let mut out = Vec::new();

    if ctx.is_tsumo && env.menzen {
        if ctx.is_tenhou && ctx.is_dealer {
            out.push((Yaku::Tenhou, 1));
        }
        if ctx.is_chiihou && !ctx.is_dealer {
            out.push((Yaku::Chiihou, 1));
        }
    }

    let held: Vec<usize> = (0..TILE_TYPES).filter(|&i| env.all[i] > 0).collect();
    if held.iter().all(|&i| is_honor(i)) {
        out.push((Yaku::Tsuuiisou, 1));
    }
    if held.iter().all(|&i| is_terminal(i)) {
        out.push((Yaku::Chinroutou, 1));
    }
    if held.iter().all(|i| GREEN.contains(i)) {
        out.push((Yaku::Ryuuiisou, 1));
    }

    match shape {
        Shape::Orphans { thirteen_wait } => {
            if *thirteen_wait {
                out.push((Yaku::Kokushi13, double(rule.double_yakuman_kokushi_13)));
            } else {
                out.push((Yaku::Kokushi, 1));
            }
        }
        Shape::Standard { groups, head, wait } => {
            let concealed = groups.iter().filter(|g| g.is_triplet_like() && !g.open).count();
            if concealed == 4 {
                if *wait == Wait::Tanki {
                    out.push((Yaku::SuuankouTanki, double(rule.double_yakuman_suuankou_tanki)));
                } else {
                    out.push((Yaku::Suuankou, 1));
                }
            }

            let triplets: Vec<usize> = groups.iter().filter(|g| g.is_triplet_like()).map(|g| g.base).collect();
            if triplets.iter().filter(|&&t| is_dragon(t)).count() == 3 {
                out.push((Yaku::Daisangen, 1));
            }
            let winds = triplets.iter().filter(|&&t| is_wind(t)).count();
            if winds == 4 {
                out.push((Yaku::Daisuushi, double(rule.double_yakuman_daisuushi)));
            } else if winds == 3 && is_wind(*head) {
                out.push((Yaku::Shousuushi, 1));
            }
            if groups.iter().filter(|g| g.kind == GroupKind::Quad).count() == 4 {
                out.push((Yaku::Suukantsu, 1));
            }
            if let Some(junsei) = chuuren(env) {
                if junsei {
                    out.push((Yaku::JunseiChuuren, double(rule.double_yakuman_junsei_chuuren)));
                } else {
                    out.push((Yaku::Chuuren, 1));
                }
            }
        }
        Shape::SevenPairs { .. } => {}
    }
    out
}

/// `Some(nine_sided)` for nine gates.
fn chuuren(env: &HandEnv) -> Option<bool> {
    if !env.menzen || env.has_melds {
        return None;
    }
    let suit = suit_of(env.win);
    if suit > 2 || (0..TILE_TYPES).any(|i| env.concealed[i] > 0 && suit_of(i) != suit) {
        return None;
    }
    const GATES: [u8; 9] = [3, 1, 1, 1, 1, 1, 1, 1, 3];
    let counts = &env.concealed[suit * 9..suit * 9 + 9];
    if counts.iter().zip(GATES.iter()).any(|(c, g)| c < g) {
        return None;
    }
    let mut before = [0u8; 9];
    before.copy_from_slice(counts);
    before[env.win % 9] -= 1;
    Some(before == GATES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        let all = [
            Yaku::Riichi,
            Yaku::Ippatsu,
            Yaku::MenzenTsumo,
            Yaku::Pinfu,
            Yaku::Iipeikou,
            Yaku::Haitei,
            Yaku::Houtei,
            Yaku::Rinshan,
            Yaku::Chankan,
            Yaku::Tanyao,
            Yaku::Haku,
            Yaku::Hatsu,
            Yaku::Chun,
            Yaku::SeatWind,
            Yaku::RoundWind,
            Yaku::DoubleRiichi,
            Yaku::Chiitoitsu,
            Yaku::SanshokuDoujun,
            Yaku::Ittsu,
            Yaku::Chanta,
            Yaku::Toitoi,
            Yaku::Sanankou,
            Yaku::SanshokuDoukou,
            Yaku::Sankantsu,
            Yaku::Shousangen,
            Yaku::Honroutou,
            Yaku::Ryanpeikou,
            Yaku::Junchan,
            Yaku::Honitsu,
            Yaku::Chinitsu,
            Yaku::Tenhou,
            Yaku::Chiihou,
            Yaku::Kokushi,
            Yaku::Kokushi13,
            Yaku::Suuankou,
            Yaku::SuuankouTanki,
            Yaku::Daisangen,
            Yaku::Shousuushi,
            Yaku::Daisuushi,
            Yaku::Tsuuiisou,
            Yaku::Ryuuiisou,
            Yaku::Chinroutou,
            Yaku::Chuuren,
            Yaku::JunseiChuuren,
            Yaku::Suukantsu,
            Yaku::Dora,
            Yaku::Uradora,
            Yaku::Akadora,
        ];
        let mut names: Vec<&str> = all.iter().map(|y| y.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn test_kuisagari() {
        assert_eq!(kuisagari(2, true), 2);
        assert_eq!(kuisagari(2, false), 1);
        assert_eq!(kuisagari(6, false), 5);
    }
}
