//! Transposition strings and the canonical hash.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{classify, Board, Classification, Error, Pos, Result, Symmetry};

/// Classified cells of one board view in row-major order.
///
/// Ordering is lexicographic over the cells, using the symbol order of
/// [`Classification`]. The `Display` form is the 9-character key string,
/// e.g. `"312100202"`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Transposition([Classification; 9]);

impl Transposition {
    /// Transposition of `board` as given (identity view).
    pub fn of(board: &Board) -> Transposition {
        let mut cells = [Classification::Empty; 9];
        for pos in Pos::all() {
            cells[pos.0 as usize] = classify(board, pos);
        }
        Transposition(cells)
    }

    /// Classification of one cell.
    #[inline]
    pub fn get(&self, pos: Pos) -> Classification {
        self.0[pos.0 as usize]
    }

    /// All nine classifications in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Classification; 9] {
        &self.0
    }

    /// Number of `Indifferent` cells.
    pub fn indifferent_count(&self) -> usize {
        self.0
            .iter()
            .filter(|&&c| c == Classification::Indifferent)
            .count()
    }
}

impl fmt::Display for Transposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in self.0 {
            write!(f, "{}", cell.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for Transposition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Transposition> {
        let symbols: Vec<char> = s.chars().collect();
        if symbols.len() != 9 {
            return Err(Error::InvalidTranspositionLength {
                got: symbols.len(),
                context: s.to_string(),
            });
        }
        let mut cells = [Classification::Empty; 9];
        for (position, (&symbol, cell)) in symbols.iter().zip(cells.iter_mut()).enumerate() {
            *cell = Classification::from_symbol(symbol).ok_or_else(|| {
                Error::InvalidTranspositionSymbol {
                    symbol,
                    position,
                    context: s.to_string(),
                }
            })?;
        }
        Ok(Transposition(cells))
    }
}

impl TryFrom<String> for Transposition {
    type Error = Error;

    fn try_from(value: String) -> Result<Transposition> {
        value.parse()
    }
}

impl From<Transposition> for String {
    fn from(transposition: Transposition) -> String {
        transposition.to_string()
    }
}

/// Get the canonical transposition of `board` and the symmetry that produced it.
///
/// Views are visited in [`Symmetry::ALL`] order (identity, the three other
/// rotations, then the four rotations of the mirror image) and a view only
/// replaces the current best when it is strictly smaller, so the first
/// minimal view wins ties.
pub fn canonical_form(board: &Board) -> (Transposition, Symmetry) {
    let mut best = Transposition::of(board);
    let mut best_symmetry = Symmetry::Identity;

    for symmetry in Symmetry::ALL.into_iter().skip(1) {
        let candidate = Transposition::of(&board.transformed(symmetry));
        if candidate < best {
            best = candidate;
            best_symmetry = symmetry;
        }
    }

    (best, best_symmetry)
}

/// Get the canonical transposition of `board`.
///
/// Boards related by a rotation or reflection, or differing only in who owns
/// indifferent cells, share the same key.
#[inline]
pub fn canonical_hash(board: &Board) -> Transposition {
    canonical_form(board).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Player;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn key(s: &str) -> String {
        canonical_hash(&board(s)).to_string()
    }

    #[test]
    fn test_empty_board() {
        assert_eq!(Transposition::of(&Board::new()).to_string(), "000000000");
        assert_eq!(key("........."), "000000000");
    }

    #[test]
    fn test_fixture_transposition() {
        // A at (0,0),(0,1),(1,0); B at (0,2),(2,0),(2,2)
        let b = board("XXO/X../O.O");
        assert_eq!(b.transposition().to_string(), "312100202");
    }

    #[test]
    fn test_fixture_canonical() {
        let (canonical, symmetry) = canonical_form(&board("XXO/X../O.O"));
        assert_eq!(canonical.to_string(), "202001213");
        assert_eq!(symmetry, Symmetry::Rotate180);
    }

    #[test]
    fn test_fixture_without_corner_blocker() {
        let b = board("XXO/X../O..");
        assert_eq!(b.transposition().to_string(), "112100200");
        assert_eq!(key("XXO/X../O.."), "002001211");
    }

    #[test]
    fn test_single_piece_positions() {
        assert_eq!(key("X../.../..."), "000000001");
        assert_eq!(key(".X./.../..."), "000000010");
        assert_eq!(key(".../.X./..."), "000010000");
    }

    #[test]
    fn test_identity_wins_ties() {
        // Fully symmetric positions are canonical as given
        assert_eq!(canonical_form(&Board::new()).1, Symmetry::Identity);
        assert_eq!(canonical_form(&board(".../.X./...")).1, Symmetry::Identity);
    }

    #[test]
    fn test_mirror_symmetry_selected() {
        let (canonical, symmetry) = canonical_form(&board("OX./.X./..O"));
        assert_eq!(canonical.to_string(), "002010210");
        assert_eq!(symmetry, Symmetry::MirrorRotate180);
    }

    #[test]
    fn test_rotation_invariance() {
        let b = board("XXO/X../O.O");
        let expected = canonical_hash(&b);
        for symmetry in [Symmetry::Rotate90, Symmetry::Rotate180, Symmetry::Rotate270] {
            assert_eq!(canonical_hash(&b.transformed(symmetry)), expected, "{:?}", symmetry);
        }
    }

    #[test]
    fn test_reflection_invariance() {
        let b = board("XOX/.O./.X.");
        let expected = canonical_hash(&b);
        for view in b.symmetries() {
            assert_eq!(canonical_hash(&view), expected);
        }
    }

    #[test]
    fn test_canonical_is_minimum_of_all_views() {
        let b = board("XOX/.O./OXX");
        let min = b
            .symmetries()
            .iter()
            .map(Transposition::of)
            .min()
            .unwrap();
        assert_eq!(canonical_hash(&b), min);
    }

    #[test]
    fn test_canonical_idempotent() {
        let b = board("X.O/.XO/...");
        let (key, symmetry) = canonical_form(&b);
        let view = b.transformed(symmetry);
        assert_eq!(Transposition::of(&view), key);
        assert_eq!(canonical_hash(&view), key);
    }

    #[test]
    fn test_hash_does_not_mutate() {
        let b = board("XXO/X../O.O");
        let layers = (b.layer(Player::A), b.layer(Player::B));
        let _ = canonical_hash(&b);
        let _ = canonical_hash(&b);
        assert_eq!((b.layer(Player::A), b.layer(Player::B)), layers);
    }

    #[test]
    fn test_indifferent_owner_is_folded() {
        // The full draw board is indifferent everywhere
        let draw = board("XOX/XOO/OXX");
        assert_eq!(key("XOX/XOO/OXX"), "333333333");
        assert_eq!(canonical_hash(&draw).indifferent_count(), 9);

        // Swapping the owner of an indifferent cell keeps the key
        let mut swapped = draw;
        swapped.clear(Pos(0));
        swapped.place(Pos(0), Player::B);
        assert_eq!(Transposition::of(&swapped).get(Pos(0)), Classification::Indifferent);
        assert_eq!(canonical_hash(&swapped), canonical_hash(&draw));
    }

    #[test]
    fn test_parse_roundtrip() {
        let t: Transposition = "312100202".parse().unwrap();
        assert_eq!(t, board("XXO/X../O.O").transposition());
        assert_eq!(t.get(Pos(0)), Classification::Indifferent);
    }

    #[test]
    fn test_parse_rejects_bad_strings() {
        assert!(matches!(
            "31210020".parse::<Transposition>(),
            Err(Error::InvalidTranspositionLength { got: 8, .. })
        ));
        assert!(matches!(
            "312100204".parse::<Transposition>(),
            Err(Error::InvalidTranspositionSymbol { symbol: '4', position: 8, .. })
        ));
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let a: Transposition = "000000001".parse().unwrap();
        let b: Transposition = "000000010".parse().unwrap();
        let c: Transposition = "100000000".parse().unwrap();
        assert!(a < b && b < c);
        // Indifferent sorts last
        let d: Transposition = "300000000".parse().unwrap();
        let e: Transposition = "233333333".parse().unwrap();
        assert!(e < d);
    }

    #[test]
    fn test_serde_as_string() {
        let t = canonical_hash(&board("XXO/X../O.O"));
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"202001213\"");
        let back: Transposition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_concurrent_hashing_of_shared_board() {
        let b = board("XOX/.O./X..");
        let expected = canonical_hash(&b);
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| canonical_hash(&b)))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
