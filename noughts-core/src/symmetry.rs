//! The eight symmetries of the square (dihedral group D4).
//!
//! Each symmetry is expressed as a remapping table: entry `p` is the cell of
//! the original board that appears at `p` in the transformed view. Views are
//! always built into a fresh [`Board`], so the source board is never touched.
//!
//! ```text
//! Identity          Rotate90 (ccw)    Mirror (left-right)
//!   0 1 2             2 5 8             2 1 0
//!   3 4 5             1 4 7             5 4 3
//!   6 7 8             0 3 6             8 7 6
//! ```

use serde::{Deserialize, Serialize};

use crate::{Board, Pos};

/// Quarter turn counter-clockwise: view cell -> source cell.
const ROTATE: [u8; 9] = [2, 5, 8, 1, 4, 7, 0, 3, 6];

/// Left-right flip: view cell -> source cell.
const MIRROR: [u8; 9] = [2, 1, 0, 5, 4, 3, 8, 7, 6];

/// Remapping table for every symmetry, in [`Symmetry::ALL`] order.
const SOURCES: [[u8; 9]; 8] = build_sources();

const fn build_sources() -> [[u8; 9]; 8] {
    let mut sources = [[0u8; 9]; 8];
    let mut s = 0;
    while s < 8 {
        let quarter_turns = s % 4;
        let mirrored = s >= 4;
        let mut p = 0;
        while p < 9 {
            // Rotate the (possibly mirrored) view, so the rotation is applied
            // to the view index first and the mirror maps into the board.
            let mut q = p as u8;
            let mut k = 0;
            while k < quarter_turns {
                q = ROTATE[q as usize];
                k += 1;
            }
            if mirrored {
                q = MIRROR[q as usize];
            }
            sources[s][p] = q;
            p += 1;
        }
        s += 1;
    }
    sources
}

/// One element of the symmetry group of the square.
///
/// `MirrorRotateN` is the left-right mirrored board rotated by N degrees
/// counter-clockwise.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum Symmetry {
    Identity = 0,
    Rotate90 = 1,
    Rotate180 = 2,
    Rotate270 = 3,
    Mirror = 4,
    MirrorRotate90 = 5,
    MirrorRotate180 = 6,
    MirrorRotate270 = 7,
}

impl Symmetry {
    /// All symmetries in canonicalization order: the four rotations of the
    /// board, then the four rotations of its mirror image.
    pub const ALL: [Symmetry; 8] = [
        Symmetry::Identity,
        Symmetry::Rotate90,
        Symmetry::Rotate180,
        Symmetry::Rotate270,
        Symmetry::Mirror,
        Symmetry::MirrorRotate90,
        Symmetry::MirrorRotate180,
        Symmetry::MirrorRotate270,
    ];

    /// Number of counter-clockwise quarter turns.
    #[inline]
    pub const fn quarter_turns(self) -> u8 {
        self as u8 % 4
    }

    /// Whether the board is mirrored before rotating.
    #[inline]
    pub const fn is_mirrored(self) -> bool {
        self as u8 >= 4
    }

    /// Cell of the original board shown at `pos` in the transformed view.
    #[inline]
    pub fn source(self, pos: Pos) -> Pos {
        Pos(SOURCES[self as usize][pos.0 as usize])
    }

    /// Cell of the transformed view where the original `pos` ends up.
    pub fn destination(self, pos: Pos) -> Pos {
        let table = &SOURCES[self as usize];
        let idx = table
            .iter()
            .position(|&src| src == pos.0)
            .unwrap_or(pos.0 as usize);
        Pos(idx as u8)
    }

    /// Remap one occupancy layer.
    #[inline]
    pub fn apply_layer(self, layer: u16) -> u16 {
        let table = &SOURCES[self as usize];
        let mut result = 0u16;
        for (view, &src) in table.iter().enumerate() {
            result |= ((layer >> src) & 1) << view;
        }
        result
    }
}

impl Board {
    /// Build the view of this board under `symmetry`.
    ///
    /// Returns a new board; `self` is unchanged.
    pub fn transformed(&self, symmetry: Symmetry) -> Board {
        Board {
            layers: self.layers.map(|layer| symmetry.apply_layer(layer)),
        }
    }

    /// Get all 8 symmetric views of this board, in [`Symmetry::ALL`] order.
    pub fn symmetries(&self) -> [Board; 8] {
        Symmetry::ALL.map(|symmetry| self.transformed(symmetry))
    }

    /// Smallest packed encoding over all symmetric views.
    ///
    /// This identifies positions up to symmetry only, without the
    /// indifference folding of [`Board::canonical_hash`].
    pub fn canonical_bits(&self) -> u32 {
        Symmetry::ALL
            .iter()
            .map(|&symmetry| self.transformed(symmetry).to_bits())
            .min()
            .unwrap_or_else(|| self.to_bits())
    }
}
