//! Symmetry breakdown of a single board.

use noughts_core::{canonical_form, Board, Symmetry, Transposition};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct View {
    pub symmetry: Symmetry,
    pub board: Board,
    pub transposition: Transposition,
}

/// Every symmetric view of a board and the canonical key chosen from them.
#[derive(Debug, Serialize)]
pub struct CanonReport {
    pub board: Board,
    pub views: Vec<View>,
    pub canonical: Transposition,
    pub symmetry: Symmetry,
    pub indifferent: usize,
}

impl CanonReport {
    pub fn new(board: Board) -> Self {
        let views = Symmetry::ALL
            .into_iter()
            .map(|symmetry| {
                let view = board.transformed(symmetry);
                View {
                    symmetry,
                    board: view,
                    transposition: view.transposition(),
                }
            })
            .collect();
        let (canonical, symmetry) = canonical_form(&board);

        Self {
            board,
            views,
            canonical,
            symmetry,
            indifferent: canonical.indifferent_count(),
        }
    }

    /// Human-readable report.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.board.render());
        out.push_str("\n\n");
        for view in &self.views {
            let marker = if view.symmetry == self.symmetry { " <" } else { "" };
            out.push_str(&format!(
                "{:<16} {}  {}{}\n",
                format!("{:?}", view.symmetry),
                view.board,
                view.transposition,
                marker
            ));
        }
        out.push_str(&format!(
            "\ncanonical: {} ({:?}, {} indifferent)",
            self.canonical, self.symmetry, self.indifferent
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_for_fixture() {
        let report = CanonReport::new("XXO/X../O.O".parse().unwrap());
        assert_eq!(report.views.len(), 8);
        assert_eq!(report.views[0].transposition.to_string(), "312100202");
        assert_eq!(report.canonical.to_string(), "202001213");
        assert_eq!(report.symmetry, Symmetry::Rotate180);
        assert_eq!(report.indifferent, 1);
    }

    #[test]
    fn test_render_marks_winning_symmetry() {
        let report = CanonReport::new("X../.../...".parse().unwrap());
        let text = report.render();
        assert!(text.starts_with("X..\n...\n...\n\n"));
        assert!(text.contains("Rotate180        ........X  000000001 <"));
        assert!(text.ends_with("canonical: 000000001 (Rotate180, 0 indifferent)"));
    }

    #[test]
    fn test_report_json() {
        let report = CanonReport::new("XXO/X../O.O".parse().unwrap());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["board"], "XXOX..O.O");
        assert_eq!(json["canonical"], "202001213");
        assert_eq!(json["symmetry"], "Rotate180");
        assert_eq!(json["views"][2]["transposition"], "202001213");
    }
}
