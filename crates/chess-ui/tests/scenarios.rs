//! End-to-end click scenarios against the standard rules.

use std::collections::BTreeSet;

use chess_core::{Color, Piece, Square};
use chess_rules::{MoveFilter, RulesEngine, StandardRules};
use chess_ui::{
    ClickOutcome, ComputerOutcome, GameMode, GameStatus, HeuristicConfig, HintKind,
    InteractionState, Session, UiConfig,
};
use proptest::prelude::*;

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).unwrap()
}

fn session(mode: GameMode) -> Session<StandardRules> {
    let config = UiConfig {
        mode,
        heuristic: HeuristicConfig {
            seed: Some(42),
            ..HeuristicConfig::default()
        },
        ..UiConfig::default()
    };
    Session::new(StandardRules::new(), &config)
}

fn play(session: &mut Session<StandardRules>, from: &str, to: &str) -> ClickOutcome {
    session.on_square_clicked(sq(from));
    session.on_square_clicked(sq(to))
}

#[test]
fn two_humans_open_with_king_pawn() {
    let mut session = session(GameMode::HumanVsHuman);

    assert_eq!(
        session.on_square_clicked(Square::E2),
        ClickOutcome::Selected(Square::E2)
    );
    let view = session.view();
    let hinted: Vec<_> = view.hints().collect();
    assert_eq!(
        hinted,
        vec![(Square::E4, HintKind::Dot), (sq("e3"), HintKind::Dot)]
    );

    let outcome = session.on_square_clicked(Square::E4);
    assert!(matches!(outcome, ClickOutcome::Moved { computer: None, .. }));

    let view = session.view();
    assert_eq!(view.status_text, "black's turn");
    assert_eq!(view.selected(), None);
    let e4 = view.square(Square::E4).and_then(|s| s.piece).unwrap();
    assert_eq!((e4.piece, e4.color), (Piece::Pawn, Color::White));
    assert!(view.square(Square::E2).unwrap().piece.is_none());
}

#[test]
fn computer_answers_and_hands_back_the_board() {
    let mut session = session(GameMode::HumanVsComputer);

    let ticket = match play(&mut session, "e2", "e4") {
        ClickOutcome::Moved {
            computer: Some(ticket),
            ..
        } => ticket,
        other => panic!("expected a scheduled reply, got {other:?}"),
    };
    assert_eq!(session.interaction_state(), InteractionState::ComputerTurn);
    assert_eq!(session.on_square_clicked(sq("d2")), ClickOutcome::Ignored);

    let outcome = session.play_computer_turn(ticket);
    let ComputerOutcome::Played(reply) = outcome else {
        panic!("expected a computer move, got {outcome:?}");
    };
    assert_eq!(
        session.rules().piece_at(reply.mv.to).map(|(_, c)| c),
        Some(Color::Black)
    );

    let view = session.view();
    assert_eq!(view.status_text, "white's turn");
    assert!(!view.computer_thinking);
    assert_eq!(session.interaction_state(), InteractionState::Idle);
}

#[test]
fn clicking_the_selected_square_clears_it() {
    let mut session = session(GameMode::HumanVsHuman);
    session.on_square_clicked(Square::E2);

    let outcome = session.on_square_clicked(Square::E2);
    assert!(matches!(outcome, ClickOutcome::Rejected(_)));
    assert_eq!(session.ui().selected, None);
    assert_eq!(session.view().hints().count(), 0);
    assert_eq!(session.view().status_text, "white's turn");
}

#[test]
fn fools_mate_freezes_the_board() {
    let mut session = session(GameMode::HumanVsHuman);
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        let outcome = play(&mut session, from, to);
        assert!(
            matches!(outcome, ClickOutcome::Moved { .. }),
            "{from}{to}: {outcome:?}"
        );
    }

    assert_eq!(
        session.status(),
        GameStatus::Checkmate {
            mated: Color::White
        }
    );
    assert_eq!(session.view().status_text, "checkmate, white is mated");

    let before = session.view();
    let outcome = play(&mut session, "a2", "a3");
    assert!(matches!(outcome, ClickOutcome::Rejected(_)));
    let after = session.view();
    let pieces = |v: &chess_ui::BoardView| v.squares.iter().map(|s| s.piece).collect::<Vec<_>>();
    assert_eq!(pieces(&before), pieces(&after));
    assert_eq!(after.status, before.status);

    session.on_reset();
    assert_eq!(session.view().status_text, "white's turn");
}

#[test]
fn flipped_board_still_plays_by_square() {
    let mut session = session(GameMode::HumanVsHuman);
    session.on_flip();
    let view = session.view();
    assert_eq!(view.squares[0].square, sq("h1"));
    assert_eq!(view.squares[63].square, sq("a8"));

    let e2 = view.square(Square::E2).unwrap().screen;
    let e4 = view.square(Square::E4).unwrap().screen;
    session.on_screen_clicked(e2);
    let outcome = session.on_screen_clicked(e4);
    assert!(matches!(outcome, ClickOutcome::Moved { .. }));
    assert_eq!(session.view().status_text, "black's turn");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// With hints on, the hinted squares are exactly the legal targets of
    /// the selected piece, and captures are marked as such.
    #[test]
    fn hints_match_legal_targets(clicks in prop::collection::vec(0u8..64, 1..40)) {
        let mut session = session(GameMode::HumanVsHuman);
        for index in clicks {
            let square = Square::from_index(index).unwrap();
            session.on_square_clicked(square);

            let view = session.view();
            let hinted: BTreeSet<_> = view.hints().collect();
            let expected: BTreeSet<_> = match session.ui().selected {
                Some(from) => session
                    .rules()
                    .legal_moves(MoveFilter::from_square(from))
                    .into_iter()
                    .map(|legal| {
                        let kind = if legal.is_capture() { HintKind::Capture } else { HintKind::Dot };
                        (legal.mv.to, kind)
                    })
                    .collect(),
                None => BTreeSet::new(),
            };
            prop_assert_eq!(hinted, expected);
            prop_assert!(view.squares.iter().filter(|s| s.selected).count() <= 1);
        }
    }
}
