//! Text rendering of board frames.

use chess_ui::{BoardView, HintKind, SquareView};

/// Draws a frame as text, top row first.
///
/// Rank and file labels follow the orientation. The selected square is
/// bracketed, quiet targets show `•` and capture targets are prefixed `x`.
pub fn board_text(view: &BoardView) -> String {
    let mut out = String::new();
    for row in view.squares.chunks(8) {
        let Some(first) = row.first() else {
            continue;
        };
        out.push(first.square.rank().to_char());
        out.push(' ');
        for cell in row {
            out.push_str(&cell_text(cell));
        }
        out.push('\n');
    }

    out.push_str("  ");
    if let Some(bottom) = view.squares.chunks(8).last() {
        for cell in bottom {
            out.push(' ');
            out.push(cell.square.file().to_char());
            out.push(' ');
        }
    }
    out.push('\n');

    out.push_str(&view.status_text);
    if view.computer_thinking {
        out.push_str(" - computer thinking");
    }
    if view.status.is_over() {
        out.push_str(" - `reset` for a new game");
    }
    if !view.hints_enabled {
        out.push_str(" (hints off)");
    }
    out.push('\n');
    out
}

fn cell_text(cell: &SquareView) -> String {
    let glyph = match (cell.symbol(), cell.hint) {
        (Some(symbol), _) => symbol,
        (None, Some(HintKind::Dot)) => '•',
        (None, _) => '.',
    };
    match (cell.selected, cell.hint) {
        (true, _) => format!("[{glyph}]"),
        (false, Some(HintKind::Capture)) => format!("x{glyph} "),
        _ => format!(" {glyph} "),
    }
}
