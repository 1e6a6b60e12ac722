use std::cmp::Reverse;

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;
use strum::Display;
use uuid::Uuid;

use crate::board::{Board, BoardLayout, TileId};
use crate::types::Category;

use super::{
    action::{Action, ActionKind, PointDelta, TurnContext},
    clock::{Clock, SystemClock},
    config::RoundConfig,
    players::{Player, PlayerError},
};

/// Where the round stands inside a turn. Each engine call is only accepted
/// in one phase and moves the round to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum TurnPhase {
    Idle,
    Started,
    Scanned,
    Moved,
    ActionReady,
    AwaitingAnswer,
}

impl TurnPhase {
    /// Numeric tag, -1 for idle up to 4 when awaiting the answer.
    pub const fn index(self) -> i8 {
        match self {
            TurnPhase::Idle => -1,
            TurnPhase::Started => 0,
            TurnPhase::Scanned => 1,
            TurnPhase::Moved => 2,
            TurnPhase::ActionReady => 3,
            TurnPhase::AwaitingAnswer => 4,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RoundError {
    #[error("call expected phase {expected} but round is in {actual}")]
    OutOfOrder {
        expected: TurnPhase,
        actual: TurnPhase,
    },
    #[error("players cannot join once the round has started")]
    GameAlreadyInProgress,
    #[error("no turn has been started")]
    NoGameInProgress,
    #[error("round has no players")]
    NoPlayer,
    #[error("player {0} is already in the round")]
    DuplicatePlayer(String),
    #[error("dice roll must be positive")]
    InvalidDiceRoll,
    #[error("no action drawn for this turn")]
    NoCurrentAction,
    #[error("tile {0} was not offered by the last scan")]
    UnreachableTile(TileId),
    #[error("round is over")]
    RoundOver,
    #[error(transparent)]
    Player(#[from] PlayerError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RoundEvent {
    TurnStarted { player: usize, turn_number: u32 },
    Scanned { player: usize, roll: u32, reachable: usize },
    Moved { player: usize, tile: TileId, category: Category },
    ActionDrawn { player: usize, action: ActionKind },
    PointsAwarded { player: usize, delta: i64 },
    TieBroken { required_points: u32 },
    RoundWon { player: usize },
}

/// Result of moving the current player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub category: Category,
    pub action: ActionKind,
}

#[derive(Debug)]
pub struct Round {
    pub id: Uuid,
    board: Board,
    players: Vec<Player>,
    actions: Vec<ActionKind>,
    required_points: u32,
    turn_number: u32,
    turn: TurnPhase,
    current_action: Option<Action>,
    reachable: Vec<TileId>,
    question_category: Option<Category>,
    winner: Option<usize>,
    events: Vec<RoundEvent>,
    rng: StdRng,
    clock: Box<dyn Clock>,
}

impl Round {
    /// Builds a round on `layout`, or on a fresh board when no layout is
    /// given or it cannot be loaded.
    pub fn new(config: RoundConfig, layout: Option<&BoardLayout>) -> Self {
        let board = match layout.map(|layout| Board::load_from_layout(layout, config.dice_max)) {
            Some(Ok(board)) => board,
            Some(Err(err)) => {
                tracing::warn!(error = %err, "invalid board layout, using a default board");
                Board::with_dice(config.dice_max)
            }
            None => Board::with_dice(config.dice_max),
        };
        Self::with_board(config, board)
    }

    pub fn with_board(config: RoundConfig, board: Board) -> Self {
        let actions = if config.actions.is_empty() {
            tracing::warn!("empty action playset, using the default one");
            ActionKind::default_playset()
        } else {
            config.actions
        };
        Self {
            id: Uuid::new_v4(),
            board,
            players: Vec::new(),
            actions,
            required_points: config.required_points,
            turn_number: 0,
            turn: TurnPhase::Idle,
            current_action: None,
            reachable: Vec::new(),
            question_category: None,
            winner: None,
            events: Vec::new(),
            rng: StdRng::seed_from_u64(config.seed),
            clock: Box::new(SystemClock::default()),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Registers a player on the start tile. The roster stays sorted by
    /// ascending total score, players without a total first.
    pub fn add_player(&mut self, mut player: Player) -> Result<(), RoundError> {
        if self.turn != TurnPhase::Idle {
            return Err(RoundError::GameAlreadyInProgress);
        }
        if self.players.iter().any(|p| p.name == player.name) {
            return Err(RoundError::DuplicatePlayer(player.name));
        }
        player.position = Some(self.board.first_tile());
        player.dice_max = self.board.board_dice();
        player.required_points = self.required_points;
        self.players.push(player);
        self.players.sort_by_key(|p| p.total_points);
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn actions(&self) -> &[ActionKind] {
        &self.actions
    }

    pub fn dice(&self) -> u32 {
        self.board.board_dice()
    }

    pub fn required_points(&self) -> u32 {
        self.required_points
    }

    pub fn turn(&self) -> TurnPhase {
        self.turn
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn current_action(&self) -> Option<&Action> {
        self.current_action.as_ref()
    }

    /// Tiles offered by the last scan of this turn.
    pub fn reachable(&self) -> &[TileId] {
        &self.reachable
    }

    pub fn events(&self) -> &[RoundEvent] {
        &self.events
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.and_then(|idx| self.players.get(idx))
    }

    pub fn winner_index(&self) -> Option<usize> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn context(&self) -> Result<TurnContext, RoundError> {
        if self.turn == TurnPhase::Idle {
            return Err(RoundError::NoGameInProgress);
        }
        if self.players.is_empty() {
            return Err(RoundError::NoPlayer);
        }
        Ok(TurnContext::new(self.turn_number, self.players.len()))
    }

    pub fn current_player(&self) -> Result<&Player, RoundError> {
        let ctx = self.context()?;
        Ok(&self.players[ctx.current])
    }

    pub fn player_before(&self) -> Result<&Player, RoundError> {
        let ctx = self.context()?;
        Ok(&self.players[ctx.before])
    }

    pub fn player_after(&self) -> Result<&Player, RoundError> {
        let ctx = self.context()?;
        Ok(&self.players[ctx.after])
    }

    /// Participants of the drawn action, recomputed from the current seating.
    pub fn participants(&self) -> Result<Vec<&Player>, RoundError> {
        let ctx = self.context()?;
        let action = self
            .current_action
            .as_ref()
            .ok_or(RoundError::NoCurrentAction)?;
        Ok(action
            .participants(&ctx)
            .into_iter()
            .filter_map(|idx| self.players.get(idx))
            .collect())
    }

    pub fn start_turn(&mut self) -> Result<&Player, RoundError> {
        self.ensure_phase(TurnPhase::Idle)?;
        if self.players.is_empty() {
            return Err(RoundError::NoPlayer);
        }
        self.turn = TurnPhase::Started;
        let ctx = self.context()?;
        tracing::debug!(round = %self.id, player = ctx.current, turn_number = self.turn_number, "turn started");
        self.events.push(RoundEvent::TurnStarted {
            player: ctx.current,
            turn_number: self.turn_number,
        });
        Ok(&self.players[ctx.current])
    }

    /// Draws a roll for the current player in `[1, dice]`.
    pub fn roll_dice(&mut self) -> Result<u32, RoundError> {
        self.ensure_active()?;
        let ctx = self.context()?;
        Ok(self.players[ctx.current].roll(&mut self.rng))
    }

    pub fn scan(&mut self, roll: u32) -> Result<Vec<TileId>, RoundError> {
        self.ensure_phase(TurnPhase::Started)?;
        if roll == 0 {
            return Err(RoundError::InvalidDiceRoll);
        }
        let ctx = self.context()?;
        let reachable = self.players[ctx.current].scan(&self.board, roll)?;
        tracing::debug!(round = %self.id, player = ctx.current, roll, reachable = reachable.len(), "scanned");
        self.events.push(RoundEvent::Scanned {
            player: ctx.current,
            roll,
            reachable: reachable.len(),
        });
        self.reachable = reachable.clone();
        self.turn = TurnPhase::Scanned;
        Ok(reachable)
    }

    /// Moves the current player to `tile` and draws the turn's action.
    ///
    /// `tile` must be one of the tiles returned by the last scan. When the
    /// scan found nothing, the player may only stay where they are.
    pub fn move_tile(&mut self, tile: TileId) -> Result<Move, RoundError> {
        self.ensure_phase(TurnPhase::Scanned)?;
        let ctx = self.context()?;
        let stays = self.reachable.is_empty() && self.players[ctx.current].position == Some(tile);
        if !stays && !self.reachable.contains(&tile) {
            return Err(RoundError::UnreachableTile(tile));
        }
        let category = self.players[ctx.current].move_to_tile(&self.board, tile)?;
        let kind = self.draw_action();
        tracing::debug!(round = %self.id, player = ctx.current, tile, %category, action = %kind, "moved");
        self.events.push(RoundEvent::Moved {
            player: ctx.current,
            tile,
            category,
        });
        self.events.push(RoundEvent::ActionDrawn {
            player: ctx.current,
            action: kind,
        });
        self.current_action = Some(Action::from(kind));
        self.turn = TurnPhase::Moved;
        Ok(Move {
            category,
            action: kind,
        })
    }

    pub fn action(&mut self) -> Result<&Action, RoundError> {
        self.ensure_phase(TurnPhase::Moved)?;
        let now = self.clock.now();
        let action = self
            .current_action
            .as_mut()
            .ok_or(RoundError::NoCurrentAction)?;
        action.before(now);
        self.turn = TurnPhase::ActionReady;
        Ok(action)
    }

    /// Notes the category of the question being asked.
    pub fn avoir_question(&mut self, category: Category) -> Result<(), RoundError> {
        self.ensure_phase(TurnPhase::ActionReady)?;
        self.question_category = Some(category);
        self.turn = TurnPhase::AwaitingAnswer;
        Ok(())
    }

    /// Scores the answer and checks for a winner.
    ///
    /// Returns `true` when exactly one player has won; the round then stays
    /// frozen on this turn. When several players win at once every player's
    /// threshold goes up by one and play continues.
    pub fn post_answer(&mut self, is_correct: bool) -> Result<bool, RoundError> {
        self.ensure_phase(TurnPhase::AwaitingAnswer)?;
        let ctx = self.context()?;
        let now = self.clock.now();
        let action = self
            .current_action
            .as_mut()
            .ok_or(RoundError::NoCurrentAction)?;
        action.answer(now);
        let deltas = if is_correct {
            action.win(&ctx, &self.players)
        } else {
            action.lose(&ctx, &self.players)
        };
        self.apply_deltas(&deltas);

        let winners: Vec<usize> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, player)| player.won())
            .map(|(idx, _)| idx)
            .collect();
        let winner = match winners.as_slice() {
            [] => None,
            [winner] => Some(*winner),
            _ if winners.iter().any(|idx| self.players[*idx].won_by_category()) => {
                // Raising the bar cannot separate category winners.
                self.settle_tie(&ctx, &winners)
            }
            _ => {
                self.required_points += 1;
                for player in &mut self.players {
                    player.required_points = self.required_points;
                }
                tracing::info!(round = %self.id, winners = winners.len(), required_points = self.required_points, "tie, raising the bar");
                self.events.push(RoundEvent::TieBroken {
                    required_points: self.required_points,
                });
                None
            }
        };
        if let Some(winner) = winner {
            tracing::info!(round = %self.id, player = %self.players[winner].name, "round won");
            self.winner = Some(winner);
            self.events.push(RoundEvent::RoundWon { player: winner });
            return Ok(true);
        }

        self.turn = TurnPhase::Started;
        self.current_action = None;
        self.reachable.clear();
        self.question_category = None;
        self.turn_number += 1;

        let next = self.context()?;
        tracing::debug!(round = %self.id, player = next.current, turn_number = self.turn_number, "turn started");
        self.events.push(RoundEvent::TurnStarted {
            player: next.current,
            turn_number: self.turn_number,
        });
        Ok(false)
    }

    /// Ends the round, folding each player's score into their total.
    pub fn into_players(self) -> Vec<Player> {
        let mut players = self.players;
        for player in &mut players {
            player.finish_round();
        }
        players
    }

    /// Most points wins. Equal points go to the first tied player in turn
    /// order, starting with the current one.
    fn settle_tie(&self, ctx: &TurnContext, winners: &[usize]) -> Option<usize> {
        let seats = self.players.len();
        winners.iter().copied().max_by_key(|&idx| {
            (
                self.players[idx].points,
                Reverse((idx + seats - ctx.current) % seats),
            )
        })
    }

    fn apply_deltas(&mut self, deltas: &[PointDelta]) {
        for &(idx, delta) in deltas {
            let Some(player) = self.players.get_mut(idx) else {
                continue;
            };
            player.apply_delta(delta);
            if delta > 0 {
                if let Some(category) = self.question_category {
                    player.credit_category(category, u32::try_from(delta).unwrap_or(u32::MAX));
                }
            }
            self.events.push(RoundEvent::PointsAwarded { player: idx, delta });
        }
    }

    fn draw_action(&mut self) -> ActionKind {
        let idx = self.rng.gen_range(0..self.actions.len());
        self.actions[idx]
    }

    fn ensure_active(&self) -> Result<(), RoundError> {
        if self.is_over() {
            return Err(RoundError::RoundOver);
        }
        Ok(())
    }

    fn ensure_phase(&self, expected: TurnPhase) -> Result<(), RoundError> {
        self.ensure_active()?;
        if self.turn != expected {
            return Err(RoundError::OutOfOrder {
                expected,
                actual: self.turn,
            });
        }
        Ok(())
    }
}
