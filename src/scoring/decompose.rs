//! Enumerates every way a complete hand can be read, including where the
//! winning tile sits.

use crate::meld::{Meld, MeldKind};
use crate::tile::{is_terminal_or_honor, TileCounts, TILE_TYPES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    Sequence,
    Triplet,
    Quad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group {
    pub kind: GroupKind,
    /// Lowest tile-type index in the group.
    pub base: usize,
    /// Called, or a triplet completed by someone else's discard.
    pub open: bool,
}

impl Group {
    fn concealed(kind: GroupKind, base: usize) -> Self {
        Self {
            kind,
            base,
            open: false,
        }
    }

    pub fn is_sequence(&self) -> bool {
        self.kind == GroupKind::Sequence
    }

    pub fn is_triplet_like(&self) -> bool {
        !self.is_sequence()
    }

    pub fn contains(&self, idx: usize) -> bool {
        match self.kind {
            GroupKind::Sequence => (self.base..self.base + 3).contains(&idx),
            _ => self.base == idx,
        }
    }

    pub fn has_terminal_or_honor(&self) -> bool {
        match self.kind {
            GroupKind::Sequence => is_terminal_or_honor(self.base) || is_terminal_or_honor(self.base + 2),
            _ => is_terminal_or_honor(self.base),
        }
    }
}

impl From<&Meld> for Group {
    fn from(meld: &Meld) -> Self {
        let kind = match meld.kind {
            MeldKind::Chi => GroupKind::Sequence,
            MeldKind::Pon => GroupKind::Triplet,
            MeldKind::Kan => GroupKind::Quad,
        };
        Self {
            kind,
            base: meld.base_index().unwrap_or(0),
            open: meld.is_open(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    Ryanmen,
    Kanchan,
    Penchan,
    Shanpon,
    Tanki,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Standard {
        groups: Vec<Group>,
        head: usize,
        wait: Wait,
    },
    SevenPairs {
        pairs: Vec<usize>,
    },
    Orphans {
        /// The hand waited on all thirteen types.
        thirteen_wait: bool,
    },
}

/// Every reading of the hand. `concealed` includes the winning tile.
pub fn arrangements(concealed: &TileCounts, melds: &[Meld], win: usize, is_tsumo: bool) -> Vec<Shape> {
    let mut shapes = Vec::new();
    let meld_groups: Vec<Group> = melds.iter().map(Group::from).collect();

    for (head, groups) in standard_splits(concealed, melds.len()) {
        if head == win {
            shapes.push(standard(&groups, &meld_groups, head, Wait::Tanki));
        }
        for (j, group) in groups.iter().enumerate() {
            if !group.contains(win) {
                continue;
            }
            let mut placed = groups.clone();
            let wait = match group.kind {
                GroupKind::Sequence => sequence_wait(group.base, win),
                _ => {
                    // A triplet finished by a discard is not concealed.
                    placed[j].open = !is_tsumo;
                    Wait::Shanpon
                }
            };
            shapes.push(standard(&placed, &meld_groups, head, wait));
        }
    }

    if melds.is_empty() && is_seven_pairs(concealed) {
        let pairs = (0..TILE_TYPES).filter(|&i| concealed[i] == 2).collect();
        shapes.push(Shape::SevenPairs { pairs });
    }
    if melds.is_empty() && is_orphans(concealed) {
        shapes.push(Shape::Orphans {
            thirteen_wait: concealed[win] == 2,
        });
    }
    shapes
}

fn standard(concealed: &[Group], melds: &[Group], head: usize, wait: Wait) -> Shape {
    let mut groups = concealed.to_vec();
    groups.extend_from_slice(melds);
    Shape::Standard { groups, head, wait }
}

fn sequence_wait(base: usize, win: usize) -> Wait {
    let rank = base % 9 + 1;
    if win == base + 1 {
        Wait::Kanchan
    } else if (win == base && rank == 7) || (win == base + 2 && rank == 1) {
        Wait::Penchan
    } else {
        Wait::Ryanmen
    }
}

/// (head, concealed groups) for every standard split of `concealed`.
fn standard_splits(concealed: &TileCounts, meld_count: usize) -> Vec<(usize, Vec<Group>)> {
    let Some(needed) = 4usize.checked_sub(meld_count) else {
        return vec![];
    };
    let mut out = Vec::new();
    let mut counts = *concealed;
    for head in 0..TILE_TYPES {
        if counts[head] < 2 {
            continue;
        }
        counts[head] -= 2;
        let mut groups = Vec::with_capacity(needed);
        let mut found = Vec::new();
        split_groups(&mut counts, needed, &mut groups, &mut found);
        out.extend(found.into_iter().map(|g| (head, g)));
        counts[head] += 2;
    }
    out
}

fn split_groups(counts: &mut TileCounts, needed: usize, groups: &mut Vec<Group>, out: &mut Vec<Vec<Group>>) {
    let Some(i) = counts.iter().position(|&c| c > 0) else {
        if groups.len() == needed {
            out.push(groups.clone());
        }
        return;
    };
    if groups.len() == needed {
        return;
    }

    // The lowest remaining tile has to start a group.
    if counts[i] >= 3 {
        counts[i] -= 3;
        groups.push(Group::concealed(GroupKind::Triplet, i));
        split_groups(counts, needed, groups, out);
        groups.pop();
        counts[i] += 3;
    }
    if i < 27 && i % 9 <= 6 && counts[i + 1] > 0 && counts[i + 2] > 0 {
        counts[i] -= 1;
        counts[i + 1] -= 1;
        counts[i + 2] -= 1;
        groups.push(Group::concealed(GroupKind::Sequence, i));
        split_groups(counts, needed, groups, out);
        groups.pop();
        counts[i] += 1;
        counts[i + 1] += 1;
        counts[i + 2] += 1;
    }
}

fn is_seven_pairs(concealed: &TileCounts) -> bool {
    concealed.iter().filter(|&&c| c == 2).count() == 7 && concealed.iter().all(|&c| c == 0 || c == 2)
}

fn is_orphans(concealed: &TileCounts) -> bool {
    let total: u32 = concealed.iter().map(|&c| c as u32).sum();
    total == 14
        && (0..TILE_TYPES).all(|i| {
            if is_terminal_or_honor(i) {
                concealed[i] >= 1
            } else {
                concealed[i] == 0
            }
        })
}
