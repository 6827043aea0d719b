//! One-ply move heuristic for the computer opponent.
//!
//! Every legal move is scored on its own: captures are worth ten times the
//! captured piece's value, taking a more valuable piece with a cheaper one
//! earns a bonus, and a small random jitter breaks ties so identical
//! positions do not always produce identical games. There is no search of
//! replies and no positional term.

use chess_rules::{LegalMove, MoveFilter, RulesEngine};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Weights for [`MoveHeuristic`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    /// Multiplier applied to the captured piece's value.
    pub capture_weight: f64,
    /// Added when the capturing piece is worth strictly less than its victim.
    pub trade_bonus: f64,
    /// Upper bound (exclusive) of the uniform random term.
    pub jitter: f64,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        HeuristicConfig {
            capture_weight: 10.0,
            trade_bonus: 5.0,
            jitter: 2.0,
            seed: None,
        }
    }
}

/// A legal move with its desirability score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    pub legal: LegalMove,
    pub score: f64,
}

/// Score of a move before the random term.
pub fn base_score(legal: &LegalMove, config: &HeuristicConfig) -> f64 {
    let Some(captured) = legal.captured else {
        return 0.0;
    };
    let mut score = f64::from(captured.value()) * config.capture_weight;
    if legal.piece.value() < captured.value() {
        score += config.trade_bonus;
    }
    score
}

/// Picks the highest scoring move, scanning in the given order.
///
/// Ties go to the earlier move. Returns `None` for an empty slice.
pub fn pick_best<R: Rng + ?Sized>(
    moves: &[LegalMove],
    config: &HeuristicConfig,
    rng: &mut R,
) -> Option<ScoredMove> {
    let mut best: Option<ScoredMove> = None;
    for legal in moves {
        let jitter = if config.jitter > 0.0 {
            rng.gen_range(0.0..config.jitter)
        } else {
            0.0
        };
        let score = base_score(legal, config) + jitter;
        if best.map_or(true, |b| score > b.score) {
            best = Some(ScoredMove {
                legal: *legal,
                score,
            });
        }
    }
    best
}

/// The computer opponent: a heuristic config plus its own RNG.
#[derive(Debug, Clone)]
pub struct MoveHeuristic {
    config: HeuristicConfig,
    rng: StdRng,
}

impl MoveHeuristic {
    pub fn new(config: HeuristicConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        MoveHeuristic { config, rng }
    }

    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }

    /// Chooses a move for the side to move.
    ///
    /// Returns `None` only when there are no legal moves; callers check for
    /// game over first. Playing the move is left to the caller.
    pub fn choose_move<E: RulesEngine + ?Sized>(&mut self, rules: &E) -> Option<ScoredMove> {
        let moves = rules.legal_moves(MoveFilter::all());
        pick_best(&moves, &self.config, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Move, Piece, Square};
    use chess_rules::StandardRules;
    use proptest::prelude::*;

    fn legal(piece: Piece, captured: Option<Piece>, to: &str) -> LegalMove {
        LegalMove {
            mv: Move::new(Square::E4, Square::from_algebraic(to).unwrap()),
            piece,
            captured,
        }
    }

    fn no_jitter() -> HeuristicConfig {
        HeuristicConfig {
            jitter: 0.0,
            ..HeuristicConfig::default()
        }
    }

    fn piece_strategy() -> impl Strategy<Value = Piece> {
        prop::sample::select(Piece::ALL.to_vec())
    }

    #[test]
    fn base_scores() {
        let config = HeuristicConfig::default();
        assert_eq!(base_score(&legal(Piece::Knight, None, "f6"), &config), 0.0);
        // Pawn takes queen: 9 * 10 + 5.
        assert_eq!(
            base_score(&legal(Piece::Pawn, Some(Piece::Queen), "d5"), &config),
            95.0
        );
        // Queen takes pawn: no bonus.
        assert_eq!(
            base_score(&legal(Piece::Queen, Some(Piece::Pawn), "d5"), &config),
            10.0
        );
        // Equal trade: no bonus.
        assert_eq!(
            base_score(&legal(Piece::Knight, Some(Piece::Bishop), "d5"), &config),
            30.0
        );
    }

    #[test]
    fn first_move_wins_exact_ties() {
        let moves = [
            legal(Piece::Knight, None, "f6"),
            legal(Piece::Bishop, None, "d5"),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let best = pick_best(&moves, &no_jitter(), &mut rng).unwrap();
        assert_eq!(best.legal, moves[0]);
        assert_eq!(best.score, 0.0);
    }

    #[test]
    fn prefers_bigger_capture() {
        let moves = [
            legal(Piece::Knight, None, "f6"),
            legal(Piece::Queen, Some(Piece::Pawn), "d5"),
            legal(Piece::Bishop, Some(Piece::Rook), "f5"),
        ];
        let mut rng = StdRng::seed_from_u64(3);
        let best = pick_best(&moves, &HeuristicConfig::default(), &mut rng).unwrap();
        assert_eq!(best.legal, moves[2]);
        assert!(best.score >= 55.0 && best.score < 57.0);
    }

    #[test]
    fn empty_move_list() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(pick_best(&[], &HeuristicConfig::default(), &mut rng).is_none());
    }

    #[test]
    fn takes_hanging_queen_in_real_position() {
        // White pawn on e4 can take the black queen on d5.
        let rules = StandardRules::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let mut heuristic = MoveHeuristic::new(HeuristicConfig {
            seed: Some(11),
            ..HeuristicConfig::default()
        });
        let choice = heuristic.choose_move(&rules).unwrap();
        assert_eq!(choice.legal.mv.to.to_string(), "d5");
        assert_eq!(choice.legal.captured, Some(Piece::Queen));
    }

    #[test]
    fn seeded_heuristic_is_repeatable() {
        let rules = StandardRules::new();
        let config = HeuristicConfig {
            seed: Some(42),
            ..HeuristicConfig::default()
        };
        let a = MoveHeuristic::new(config).choose_move(&rules).unwrap();
        let b = MoveHeuristic::new(config).choose_move(&rules).unwrap();
        assert_eq!(a.legal, b.legal);
    }

    proptest! {
        #[test]
        fn any_capture_outscores_every_quiet_move(
            attacker in piece_strategy(),
            victim in prop::sample::select(vec![Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]),
            seed in any::<u64>(),
            quiet_count in 1usize..20,
        ) {
            let mut moves: Vec<LegalMove> = (0..quiet_count).map(|_| legal(Piece::Knight, None, "f6")).collect();
            moves.push(legal(attacker, Some(victim), "d5"));
            let mut rng = StdRng::seed_from_u64(seed);
            let best = pick_best(&moves, &HeuristicConfig::default(), &mut rng).unwrap();
            prop_assert!(best.legal.is_capture());
            prop_assert!(best.score >= 0.0);
        }

        #[test]
        fn favorable_trade_beats_quiet_moves_before_jitter(
            attacker in piece_strategy(),
            victim in piece_strategy(),
        ) {
            prop_assume!(attacker.value() < victim.value());
            let config = HeuristicConfig::default();
            let capture = base_score(&legal(attacker, Some(victim), "d5"), &config);
            let quiet = base_score(&legal(Piece::Knight, None, "f6"), &config);
            prop_assert!(capture > quiet + config.jitter);
        }
    }
}
