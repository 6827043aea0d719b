//! Board view model.
//!
//! [`render`] turns the rules engine's position plus the UI state into 64
//! [`SquareView`]s in screen order. It is pure: it reads the engine and the
//! UI state and mutates neither, so it can run after every event.

use chess_core::{Color, Piece, Square};
use chess_rules::{MoveFilter, RulesEngine};
use serde::Serialize;

use crate::config::GameMode;
use crate::orientation::{Orientation, ScreenPos, Shade};
use crate::session::UiState;
use crate::status::GameStatus;

/// Marker for a square the selected piece can move to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HintKind {
    /// A quiet move.
    Dot,
    /// A move that takes an opposing piece.
    Capture,
}

/// A piece as drawn on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PieceView {
    pub piece: Piece,
    pub color: Color,
    pub symbol: char,
}

/// Everything needed to draw one screen cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SquareView {
    pub square: Square,
    pub screen: ScreenPos,
    pub shade: Shade,
    pub piece: Option<PieceView>,
    pub selected: bool,
    pub hint: Option<HintKind>,
}

impl SquareView {
    /// The glyph to draw, if the square is occupied.
    pub fn symbol(&self) -> Option<char> {
        self.piece.map(|p| p.symbol)
    }
}

/// Renders all 64 cells, row 0 to 7 and column 0 to 7.
///
/// Hints are recomputed from the engine on every call while a piece is
/// selected and `hints_enabled` is set.
pub fn render<R: RulesEngine + ?Sized>(
    rules: &R,
    ui: &UiState,
    hints_enabled: bool,
) -> Vec<SquareView> {
    let hints = hint_map(rules, ui.selected.filter(|_| hints_enabled));
    ScreenPos::all()
        .map(|screen| {
            let square = ui.orientation.square_at(screen);
            SquareView {
                square,
                screen,
                shade: screen.shade(),
                piece: rules.piece_at(square).map(|(piece, color)| PieceView {
                    piece,
                    color,
                    symbol: piece.symbol(color),
                }),
                selected: ui.selected == Some(square),
                hint: hints[usize::from(square.index())],
            }
        })
        .collect()
}

/// Hint per square index for moves starting at `selected`.
fn hint_map<R: RulesEngine + ?Sized>(
    rules: &R,
    selected: Option<Square>,
) -> [Option<HintKind>; 64] {
    let mut hints = [None; 64];
    let Some(from) = selected else {
        return hints;
    };
    for legal in rules.legal_moves(MoveFilter::from_square(from)) {
        let slot = &mut hints[usize::from(legal.mv.to.index())];
        if legal.is_capture() {
            *slot = Some(HintKind::Capture);
        } else if slot.is_none() {
            *slot = Some(HintKind::Dot);
        }
    }
    hints
}

/// A full frame for a front end: the cells plus the surrounding UI state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub squares: Vec<SquareView>,
    pub orientation: Orientation,
    pub status: GameStatus,
    pub status_text: String,
    pub mode: GameMode,
    pub hints_enabled: bool,
    pub computer_thinking: bool,
}

impl BoardView {
    /// Renders a frame for the given engine and UI state.
    pub fn build<R: RulesEngine + ?Sized>(
        rules: &R,
        ui: &UiState,
        mode: GameMode,
        hints_enabled: bool,
    ) -> Self {
        let status = GameStatus::of(rules);
        BoardView {
            squares: render(rules, ui, hints_enabled),
            orientation: ui.orientation,
            status_text: status.to_string(),
            status,
            mode,
            hints_enabled,
            computer_thinking: ui.computer_thinking,
        }
    }

    /// The cell at a screen position.
    pub fn at(&self, pos: ScreenPos) -> Option<&SquareView> {
        self.squares.get(pos.index())
    }

    /// The cell showing `square`.
    pub fn square(&self, square: Square) -> Option<&SquareView> {
        self.at(self.orientation.screen_pos(square))
    }

    /// The selected square, if any.
    pub fn selected(&self) -> Option<Square> {
        self.squares.iter().find(|s| s.selected).map(|s| s.square)
    }

    /// Squares carrying a hint, in screen order.
    pub fn hints(&self) -> impl Iterator<Item = (Square, HintKind)> + '_ {
        self.squares
            .iter()
            .filter_map(|s| s.hint.map(|h| (s.square, h)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_rules::StandardRules;
    use std::collections::BTreeMap;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn selecting(square: &str) -> UiState {
        UiState {
            selected: Some(sq(square)),
            ..UiState::default()
        }
    }

    fn hint_names(squares: &[SquareView]) -> BTreeMap<String, HintKind> {
        squares
            .iter()
            .filter_map(|s| s.hint.map(|h| (s.square.to_string(), h)))
            .collect()
    }

    #[test]
    fn start_position_white_bottom() {
        let rules = StandardRules::new();
        let squares = render(&rules, &UiState::default(), true);
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0].square, sq("a8"));
        assert_eq!(squares[0].symbol(), Some('♜'));
        assert_eq!(squares[0].shade, Shade::Light);
        assert_eq!(squares[60].square, sq("e1"));
        assert_eq!(squares[60].symbol(), Some('♔'));
        assert_eq!(squares[35].symbol(), None);
        assert!(squares.iter().all(|s| !s.selected && s.hint.is_none()));
    }

    #[test]
    fn black_bottom_keeps_screen_order() {
        let rules = StandardRules::new();
        let ui = UiState {
            orientation: Orientation::BlackBottom,
            ..UiState::default()
        };
        let squares = render(&rules, &ui, true);
        assert_eq!(squares[0].square, sq("h1"));
        assert_eq!(squares[0].symbol(), Some('♖'));
        assert_eq!(squares[0].screen, ScreenPos::new(0, 0).unwrap());
        assert_eq!(squares[63].square, sq("a8"));
        assert_eq!(squares[63].symbol(), Some('♜'));
    }

    #[test]
    fn selection_and_dot_hints() {
        let rules = StandardRules::new();
        let squares = render(&rules, &selecting("g1"), true);
        let selected: Vec<Square> = squares.iter().filter(|s| s.selected).map(|s| s.square).collect();
        assert_eq!(selected, vec![sq("g1")]);
        let hints = hint_names(&squares);
        assert_eq!(hints.len(), 2);
        assert_eq!(hints["f3"], HintKind::Dot);
        assert_eq!(hints["h3"], HintKind::Dot);
    }

    #[test]
    fn hints_disabled_shows_selection_only() {
        let rules = StandardRules::new();
        let squares = render(&rules, &selecting("e2"), false);
        assert!(squares.iter().any(|s| s.selected));
        assert!(hint_names(&squares).is_empty());
    }

    #[test]
    fn capture_hints_include_en_passant() {
        let rules = StandardRules::from_fen(
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        )
        .unwrap();
        let hints = hint_names(&render(&rules, &selecting("e5"), true));
        assert_eq!(hints.len(), 2);
        assert_eq!(hints["e6"], HintKind::Dot);
        assert_eq!(hints["f6"], HintKind::Capture);
    }

    #[test]
    fn hints_match_legal_moves_exactly() {
        // Knight on d4 attacks pieces on c6 and e6 among quiet squares.
        let rules =
            StandardRules::from_fen("4k3/8/2p1p3/8/3N4/8/8/4K3 w - - 0 1").unwrap();
        let hints = hint_names(&render(&rules, &selecting("d4"), true));
        let legal = rules.legal_moves(MoveFilter::from_square(sq("d4")));
        assert_eq!(hints.len(), legal.len());
        for lm in legal {
            let expected = if lm.is_capture() {
                HintKind::Capture
            } else {
                HintKind::Dot
            };
            assert_eq!(hints[&lm.mv.to.to_string()], expected);
        }
        assert_eq!(hints["c6"], HintKind::Capture);
        assert_eq!(hints["b5"], HintKind::Dot);
    }

    #[test]
    fn board_view_lookups() {
        let rules = StandardRules::new();
        let view = BoardView::build(&rules, &selecting("e2"), GameMode::HumanVsHuman, true);
        assert_eq!(view.status_text, "white's turn");
        assert_eq!(view.selected(), Some(Square::E2));
        assert_eq!(view.square(Square::E2).and_then(|s| s.symbol()), Some('♙'));
        let hinted: Vec<Square> = view.hints().map(|(s, _)| s).collect();
        assert_eq!(hinted, vec![Square::E4, sq("e3")]);
        assert!(!view.computer_thinking);
    }

    #[test]
    fn board_view_serializes() {
        let rules = StandardRules::new();
        let view = BoardView::build(&rules, &UiState::default(), GameMode::HumanVsComputer, true);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["squares"][0]["square"], "a8");
        assert_eq!(json["squares"][0]["piece"]["symbol"], "♜");
        assert_eq!(json["orientation"], "white-bottom");
        assert_eq!(json["mode"], "human-vs-computer");
        assert_eq!(json["status"]["kind"], "ongoing");
    }
}
