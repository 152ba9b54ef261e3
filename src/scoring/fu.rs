use super::decompose::{Group, GroupKind, Shape, Wait};
use super::yaku::is_pinfu;
use super::HandEnv;
use crate::tile::{is_dragon, is_terminal_or_honor, wind_index};

const BASE_FU: u32 = 20;
const SEVEN_PAIRS_FU: u32 = 25;

/// Fu of one reading of a hand that is not a yakuman.
pub(crate) fn fu(shape: &Shape, env: &HandEnv) -> u32 {
    match shape {
        Shape::SevenPairs { .. } => SEVEN_PAIRS_FU,
        Shape::Orphans { .. } => 0,
        Shape::Standard { groups, head, wait } => standard_fu(groups, *head, *wait, env),
    }
}

fn standard_fu(groups: &[Group], head: usize, wait: Wait, env: &HandEnv) -> u32 {
    let is_tsumo = env.ctx.is_tsumo;
    if is_tsumo && is_pinfu(groups, head, wait, env) {
        return BASE_FU;
    }

    let mut fu = BASE_FU;
    if env.menzen && !is_tsumo {
        fu += 10;
    }
    if is_tsumo {
        fu += 2;
    }
    fu += groups.iter().map(group_fu).sum::<u32>();
    fu += head_fu(head, env);
    if matches!(wait, Wait::Kanchan | Wait::Penchan | Wait::Tanki) {
        fu += 2;
    }

    let rounded = round_up_10(fu);
    // Open all-sequence hands won by discard still pay 30.
    if rounded == BASE_FU {
        30
    } else {
        rounded
    }
}

fn group_fu(group: &Group) -> u32 {
    let mut fu = match group.kind {
        GroupKind::Sequence => return 0,
        GroupKind::Triplet => 2,
        GroupKind::Quad => 8,
    };
    if is_terminal_or_honor(group.base) {
        fu *= 2;
    }
    if !group.open {
        fu *= 2;
    }
    fu
}

fn head_fu(head: usize, env: &HandEnv) -> u32 {
    let mut fu = 0;
    if is_dragon(head) {
        fu += 2;
    }
    if head == wind_index(env.ctx.seat_wind) {
        fu += 2;
    }
    if head == wind_index(env.ctx.round_wind) {
        fu += 2;
    }
    fu
}

pub fn round_up_10(fu: u32) -> u32 {
    fu.div_ceil(10) * 10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(kind: GroupKind, base: usize, open: bool) -> Group {
        Group {
            kind,
            base,
            open,
        }
    }

    #[test]
    fn test_group_fu_table() {
        assert_eq!(group_fu(&group(GroupKind::Sequence, 0, false)), 0);
        assert_eq!(group_fu(&group(GroupKind::Triplet, 4, true)), 2);
        assert_eq!(group_fu(&group(GroupKind::Triplet, 4, false)), 4);
        assert_eq!(group_fu(&group(GroupKind::Triplet, 31, true)), 4);
        assert_eq!(group_fu(&group(GroupKind::Triplet, 0, false)), 8);
        assert_eq!(group_fu(&group(GroupKind::Quad, 4, true)), 8);
        assert_eq!(group_fu(&group(GroupKind::Quad, 33, false)), 32);
    }

    #[test]
    fn test_round_up() {
        assert_eq!(round_up_10(20), 20);
        assert_eq!(round_up_10(22), 30);
        assert_eq!(round_up_10(52), 60);
    }
}
