//! Scoring groups: the eight lines that win the game.

use crate::Pos;

/// The 8 scoring groups: 3 rows, 3 columns, 2 diagonals.
pub const SCORING_GROUPS: [[Pos; 3]; 8] = [
    [Pos(0), Pos(1), Pos(2)], // Row 0
    [Pos(3), Pos(4), Pos(5)], // Row 1
    [Pos(6), Pos(7), Pos(8)], // Row 2
    [Pos(0), Pos(3), Pos(6)], // Col 0
    [Pos(1), Pos(4), Pos(7)], // Col 1
    [Pos(2), Pos(5), Pos(8)], // Col 2
    [Pos(0), Pos(4), Pos(8)], // Main diagonal
    [Pos(2), Pos(4), Pos(6)], // Anti-diagonal
];

/// Layer bitmasks of [`SCORING_GROUPS`], index for index.
pub(crate) const GROUP_MASKS: [u16; 8] = group_masks();

const fn group_masks() -> [u16; 8] {
    let mut masks = [0u16; 8];
    let mut g = 0;
    while g < SCORING_GROUPS.len() {
        let mut i = 0;
        while i < 3 {
            masks[g] |= SCORING_GROUPS[g][i].bit();
            i += 1;
        }
        g += 1;
    }
    masks
}

/// Bitmasks of the scoring groups passing through `pos`.
#[inline]
pub fn groups_through(pos: Pos) -> impl Iterator<Item = u16> {
    let bit = pos.bit();
    GROUP_MASKS.into_iter().filter(move |&mask| mask & bit != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_match_table() {
        assert_eq!(
            GROUP_MASKS,
            [
                0b000_000_111,
                0b000_111_000,
                0b111_000_000,
                0b001_001_001,
                0b010_010_010,
                0b100_100_100,
                0b100_010_001,
                0b001_010_100,
            ]
        );
    }

    #[test]
    fn test_group_membership_counts() {
        // Corners sit on a row, a column and a diagonal
        for corner in [Pos(0), Pos(2), Pos(6), Pos(8)] {
            assert_eq!(groups_through(corner).count(), 3, "corner {}", corner);
        }
        // Edges only on a row and a column
        for edge in [Pos(1), Pos(3), Pos(5), Pos(7)] {
            assert_eq!(groups_through(edge).count(), 2, "edge {}", edge);
        }
        // Center on everything but the outer rows and columns
        assert_eq!(groups_through(Pos(4)).count(), 4);
    }

    #[test]
    fn test_groups_through_matches_table() {
        for pos in Pos::all() {
            let from_table: Vec<u16> = SCORING_GROUPS
                .iter()
                .filter(|group| group.contains(&pos))
                .map(|group| group.iter().fold(0u16, |mask, p| mask | p.bit()))
                .collect();
            let through: Vec<u16> = groups_through(pos).collect();
            assert_eq!(through, from_table, "groups through {}", pos);
        }
    }

    #[test]
    fn test_every_group_has_three_distinct_cells() {
        for mask in GROUP_MASKS {
            assert_eq!(mask.count_ones(), 3);
        }
        // Together the groups cover the whole board
        let union = GROUP_MASKS.iter().fold(0u16, |acc, &m| acc | m);
        assert_eq!(union, 0x1FF);
    }
}
