//! AI opponents: one [`MovePolicy`] per difficulty, dispatched from [`GameState::ai_move`].
use alloc::vec::Vec;
use core::fmt;
use rand::prelude::*;

use crate::*;
pub use heuristic::*;
pub use omniscient::*;
pub use random::*;

mod heuristic;
mod omniscient;
mod random;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiDifficulty {
    /// Solo play, the turn never leaves the human.
    #[default]
    None,
    Easy,
    Medium,
    Hard,
    /// The AI takes over after the first reveal and keeps the turn until the game ends.
    ///
    /// [`GameState::ai_move`] still plays a single step per call, so the caller loops
    /// while [`GameState::awaits_ai`] holds. [`GameState::autosolve`] does that loop.
    Solver,
}

impl AiDifficulty {
    pub const ALL: [Self; 5] = [Self::None, Self::Easy, Self::Medium, Self::Hard, Self::Solver];

    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::None)
    }

    pub const fn policy(self) -> Option<Policy> {
        match self {
            Self::None => None,
            Self::Easy => Some(Policy::Random),
            Self::Medium => Some(Policy::Heuristic),
            Self::Hard => Some(Policy::Omniscient),
            Self::Solver => Some(Policy::AutoSolve),
        }
    }

    /// Whether a finished AI move gives control back to the human.
    pub const fn hands_back_turn(self) -> bool {
        !matches!(self, Self::Solver)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Solver => "Solver",
        }
    }
}

pub trait MovePolicy {
    /// Plays one AI move. Callers are expected to have checked that the AI holds the turn.
    fn make_move<R: Rng + ?Sized>(&self, game: &mut GameState, rng: &mut R) -> AiTurn;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Policy {
    Random,
    Heuristic,
    Omniscient,
    AutoSolve,
}

impl Policy {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Random => "Easy",
            Self::Heuristic => "Medium",
            Self::Omniscient => "Hard",
            Self::AutoSolve => "Solver",
        }
    }
}

impl MovePolicy for Policy {
    fn make_move<R: Rng + ?Sized>(&self, game: &mut GameState, rng: &mut R) -> AiTurn {
        match self {
            Self::Random => RandomPolicy.make_move(game, rng),
            Self::Heuristic => HeuristicPolicy.make_move(game, rng),
            Self::Omniscient => OmniscientPolicy.make_move(game, rng),
            Self::AutoSolve => {
                let mut turn = OmniscientPolicy.make_move(game, rng);
                turn.policy = Some(Policy::AutoSolve);
                turn
            }
        }
    }
}

/// Why the AI picked the cell it revealed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealKind {
    Random,
    Deduced,
    KnownSafe,
    /// No safe cell was left, so any hidden cell was taken.
    Blind,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AiAction {
    Flagged(Coord2),
    Revealed(Coord2, RevealKind),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AiStatus {
    Disabled,
    NotAiTurn,
    NoValidMoves,
    Moved(RevealOutcome),
}

/// Everything one AI invocation did.
#[derive(Clone, Debug, PartialEq)]
pub struct AiTurn {
    pub policy: Option<Policy>,
    pub actions: Vec<AiAction>,
    pub status: AiStatus,
}

impl AiTurn {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy: Some(policy),
            actions: Vec::new(),
            status: AiStatus::NoValidMoves,
        }
    }

    fn idle(policy: Option<Policy>, status: AiStatus) -> Self {
        Self {
            policy,
            actions: Vec::new(),
            status,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.status, AiStatus::Moved(outcome) if outcome.is_terminal())
    }

    /// The cell this turn revealed, if any.
    pub fn revealed(&self) -> Option<Coord2> {
        self.actions.iter().find_map(|action| match *action {
            AiAction::Revealed(coords, _) => Some(coords),
            AiAction::Flagged(_) => None,
        })
    }

    pub(crate) fn flag(&mut self, game: &mut GameState, coords: Coord2) -> bool {
        match game.toggle_flag_as(coords, Actor::Ai) {
            Ok(FlagOutcome::FlagPlaced) => {
                self.actions.push(AiAction::Flagged(coords));
                true
            }
            _ => false,
        }
    }

    pub(crate) fn reveal(&mut self, game: &mut GameState, coords: Coord2, kind: RevealKind) {
        if let Ok(outcome) = game.reveal_as(coords, Actor::Ai) {
            self.actions.push(AiAction::Revealed(coords, kind));
            self.status = AiStatus::Moved(outcome);
        }
    }
}

impl fmt::Display for AiTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            AiStatus::Disabled => return f.write_str("AI is disabled."),
            AiStatus::NotAiTurn => return f.write_str("Not AI's turn or game finished."),
            _ => {}
        }

        match self.policy {
            Some(policy) => write!(f, "AI ({})", policy.label())?,
            None => f.write_str("AI")?,
        }
        for (i, action) in self.actions.iter().enumerate() {
            f.write_str(if i == 0 { " " } else { ", " })?;
            match action {
                AiAction::Flagged((row, col)) => write!(f, "flagged ({row}, {col})")?,
                AiAction::Revealed((row, col), RevealKind::Random) => {
                    write!(f, "revealed random cell ({row}, {col})")?
                }
                AiAction::Revealed((row, col), _) => write!(f, "revealed ({row}, {col})")?,
            }
        }

        match self.status {
            AiStatus::Moved(outcome) => write!(f, ": {outcome}"),
            _ => f.write_str(": No valid moves for AI."),
        }
    }
}

impl GameState {
    /// Lets the AI play one move if it holds the turn, using the policy of the configured difficulty.
    pub fn ai_move<R: Rng + ?Sized>(&mut self, rng: &mut R) -> AiTurn {
        let Some(policy) = self.ai_difficulty().policy() else {
            return AiTurn::idle(None, AiStatus::Disabled);
        };

        if !self.is_playing() || self.turn() != Actor::Ai {
            return AiTurn::idle(Some(policy), AiStatus::NotAiTurn);
        }

        let turn = policy.make_move(self, rng);
        self.end_ai_turn();
        log::debug!("{}", turn);
        turn
    }

    /// Plays omniscient moves one at a time until the game ends, regardless of whose turn it is.
    ///
    /// The returned iterator can be dropped between moves to interrupt the solve.
    pub fn autosolve<'a, R: Rng + ?Sized>(&'a mut self, rng: &'a mut R) -> AutoSolve<'a, R> {
        AutoSolve {
            game: self,
            rng,
            stalled: false,
        }
    }

    pub fn run_autosolver<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<AiTurn> {
        self.autosolve(rng).collect()
    }
}

pub struct AutoSolve<'a, R: ?Sized> {
    game: &'a mut GameState,
    rng: &'a mut R,
    stalled: bool,
}

impl<R: Rng + ?Sized> Iterator for AutoSolve<'_, R> {
    type Item = AiTurn;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stalled || !self.game.is_playing() {
            return None;
        }

        let turn = Policy::AutoSolve.make_move(self.game, self.rng);
        self.game.end_ai_turn();
        self.stalled = !matches!(turn.status, AiStatus::Moved(_));
        log::trace!("{}", turn);
        Some(turn)
    }
}
