use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::game::players::Player;

/// Answers slower than this earn nothing on a [`ActionKind::Flash`].
pub const FLASH_TIME_LIMIT: Duration = Duration::from_secs(30);

/// Signed point change for the player at the given roster index.
pub type PointDelta = (usize, i64);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
pub enum ActionKind {
    ForYou,
    SecondLife,
    /// Duel with the player seated before the current one in turn order.
    BattleOnLeft,
    /// Duel with the player seated after the current one in turn order.
    BattleOnRight,
    Flash,
    Everybody,
    Double,
    Quadruple,
    DoubleOrQuit,
    Plus1Moins1,
    Empty,
    CallAFriend,
    Teleportation,
    ItsYourChoice,
    NoWay,
}

impl ActionKind {
    /// Playset used when a round is not given one.
    pub const DEFAULT_PLAYSET: [ActionKind; 11] = [
        ActionKind::ForYou,
        ActionKind::SecondLife,
        ActionKind::BattleOnLeft,
        ActionKind::BattleOnRight,
        ActionKind::Flash,
        ActionKind::Everybody,
        ActionKind::Double,
        ActionKind::Quadruple,
        ActionKind::DoubleOrQuit,
        ActionKind::Plus1Moins1,
        ActionKind::Empty,
    ];

    pub fn default_playset() -> Vec<ActionKind> {
        Self::DEFAULT_PLAYSET.to_vec()
    }
}

/// Seating of the current turn, as roster indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnContext {
    pub current: usize,
    pub before: usize,
    pub after: usize,
    pub player_count: usize,
}

impl TurnContext {
    /// Seating for turn `turn_number` of a roster of `player_count` players.
    pub fn new(turn_number: u32, player_count: usize) -> Self {
        let n = player_count.max(1);
        let current = turn_number as usize % n;
        Self {
            current,
            before: (current + n - 1) % n,
            after: (current + 1) % n,
            player_count,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Stopwatch {
    started: Option<Duration>,
    stopped: Option<Duration>,
}

impl Stopwatch {
    fn elapsed(&self) -> Option<Duration> {
        match (self.started, self.stopped) {
            (Some(start), Some(stop)) => Some(stop.saturating_sub(start)),
            _ => None,
        }
    }
}

/// An action drawn for the current turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    kind: ActionKind,
    stopwatch: Stopwatch,
}

impl From<ActionKind> for Action {
    fn from(kind: ActionKind) -> Self {
        Self {
            kind,
            stopwatch: Stopwatch::default(),
        }
    }
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn name(&self) -> String {
        self.kind.to_string()
    }

    pub fn participants(&self, ctx: &TurnContext) -> Vec<usize> {
        let mut participants = match self.kind {
            ActionKind::Empty => Vec::new(),
            ActionKind::BattleOnLeft => vec![ctx.before, ctx.current],
            ActionKind::BattleOnRight => vec![ctx.after, ctx.current],
            ActionKind::CallAFriend => vec![ctx.current, ctx.after],
            ActionKind::Everybody => (0..ctx.player_count).collect(),
            _ => vec![ctx.current],
        };
        participants.dedup();
        participants
    }

    /// Runs once the action is drawn, before the question is shown.
    pub fn before(&mut self, now: Duration) {
        if self.kind == ActionKind::Flash {
            self.stopwatch = Stopwatch {
                started: Some(now),
                stopped: None,
            };
        }
    }

    /// Runs once the answer is in, before scoring.
    pub fn answer(&mut self, now: Duration) {
        if self.kind == ActionKind::Flash && self.stopwatch.stopped.is_none() {
            self.stopwatch.stopped = Some(now);
        }
    }

    /// Time taken to answer a flash question, once both hooks ran.
    pub fn elapsed(&self) -> Option<Duration> {
        self.stopwatch.elapsed()
    }

    pub fn win(&self, ctx: &TurnContext, players: &[Player]) -> Vec<PointDelta> {
        let current_points = players.get(ctx.current).map_or(0, |p| i64::from(p.points));
        match self.kind {
            ActionKind::Empty => Vec::new(),
            ActionKind::BattleOnLeft | ActionKind::BattleOnRight => vec![(ctx.current, 1)],
            ActionKind::Double => vec![(ctx.current, 2)],
            ActionKind::Quadruple => vec![(ctx.current, 4)],
            ActionKind::DoubleOrQuit => vec![(ctx.current, current_points)],
            ActionKind::Flash => match self.elapsed() {
                Some(elapsed) if elapsed < FLASH_TIME_LIMIT => vec![(ctx.current, 1)],
                _ => Vec::new(),
            },
            _ => self
                .participants(ctx)
                .into_iter()
                .map(|player| (player, 1))
                .collect(),
        }
    }

    pub fn lose(&self, ctx: &TurnContext, players: &[Player]) -> Vec<PointDelta> {
        let current_points = players.get(ctx.current).map_or(0, |p| i64::from(p.points));
        match self.kind {
            ActionKind::BattleOnLeft if ctx.before != ctx.current => vec![(ctx.before, 1)],
            ActionKind::BattleOnRight if ctx.after != ctx.current => vec![(ctx.after, 1)],
            ActionKind::Double | ActionKind::DoubleOrQuit => vec![(ctx.current, -current_points)],
            ActionKind::Plus1Moins1 => vec![(ctx.current, -1)],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(points: &[u32]) -> Vec<Player> {
        points
            .iter()
            .enumerate()
            .map(|(idx, pts)| {
                let mut player = Player::new(format!("P{idx}"));
                player.points = *pts;
                player
            })
            .collect()
    }

    #[test]
    fn context_wraps_around_the_roster() {
        let ctx = TurnContext::new(0, 3);
        assert_eq!((ctx.before, ctx.current, ctx.after), (2, 0, 1));
        let ctx = TurnContext::new(5, 3);
        assert_eq!((ctx.before, ctx.current, ctx.after), (1, 2, 0));
    }

    #[test]
    fn battles_pair_by_turn_order() {
        let ctx = TurnContext::new(1, 3);
        assert_eq!(Action::from(ActionKind::BattleOnLeft).participants(&ctx), vec![0, 1]);
        assert_eq!(Action::from(ActionKind::BattleOnRight).participants(&ctx), vec![2, 1]);
    }

    #[test]
    fn battle_rewards_winner_of_the_duel() {
        let ctx = TurnContext::new(1, 3);
        let players = roster(&[0, 0, 0]);
        let battle = Action::from(ActionKind::BattleOnLeft);
        assert_eq!(battle.win(&ctx, &players), vec![(1, 1)]);
        assert_eq!(battle.lose(&ctx, &players), vec![(0, 1)]);
    }

    #[test]
    fn solo_battle_gives_nothing_on_a_miss() {
        let ctx = TurnContext::new(0, 1);
        let players = roster(&[0]);
        let battle = Action::from(ActionKind::BattleOnRight);
        assert_eq!(battle.participants(&ctx), vec![0]);
        assert!(battle.lose(&ctx, &players).is_empty());
    }

    #[test]
    fn default_scoring_awards_each_participant() {
        let ctx = TurnContext::new(0, 3);
        let players = roster(&[0, 0, 0]);
        let everybody = Action::from(ActionKind::Everybody);
        assert_eq!(everybody.win(&ctx, &players), vec![(0, 1), (1, 1), (2, 1)]);
        assert!(everybody.lose(&ctx, &players).is_empty());
        let for_you = Action::from(ActionKind::ForYou);
        assert_eq!(for_you.win(&ctx, &players), vec![(0, 1)]);
    }

    #[test]
    fn stake_multipliers() {
        let ctx = TurnContext::new(0, 2);
        let players = roster(&[5, 1]);
        assert_eq!(Action::from(ActionKind::Double).win(&ctx, &players), vec![(0, 2)]);
        assert_eq!(Action::from(ActionKind::Double).lose(&ctx, &players), vec![(0, -5)]);
        assert_eq!(Action::from(ActionKind::Quadruple).win(&ctx, &players), vec![(0, 4)]);
        assert_eq!(Action::from(ActionKind::DoubleOrQuit).win(&ctx, &players), vec![(0, 5)]);
        assert_eq!(Action::from(ActionKind::DoubleOrQuit).lose(&ctx, &players), vec![(0, -5)]);
        assert_eq!(Action::from(ActionKind::Plus1Moins1).lose(&ctx, &players), vec![(0, -1)]);
    }

    #[test]
    fn empty_action_has_no_effect() {
        let ctx = TurnContext::new(0, 2);
        let players = roster(&[0, 0]);
        let empty = Action::from(ActionKind::Empty);
        assert!(empty.participants(&ctx).is_empty());
        assert!(empty.win(&ctx, &players).is_empty());
        assert!(empty.lose(&ctx, &players).is_empty());
    }

    #[test]
    fn flash_rewards_only_fast_answers() {
        let ctx = TurnContext::new(0, 1);
        let players = roster(&[0]);

        let mut fast = Action::from(ActionKind::Flash);
        fast.before(Duration::from_secs(10));
        fast.answer(Duration::from_secs(25));
        assert_eq!(fast.elapsed(), Some(Duration::from_secs(15)));
        assert_eq!(fast.win(&ctx, &players), vec![(0, 1)]);

        let mut slow = Action::from(ActionKind::Flash);
        slow.before(Duration::ZERO);
        slow.answer(FLASH_TIME_LIMIT);
        assert!(slow.win(&ctx, &players).is_empty());
    }

    #[test]
    fn flash_without_timer_earns_nothing() {
        let ctx = TurnContext::new(0, 1);
        let players = roster(&[0]);
        assert!(Action::from(ActionKind::Flash).win(&ctx, &players).is_empty());
    }

    #[test]
    fn only_flash_tracks_time() {
        let mut action = Action::from(ActionKind::ForYou);
        action.before(Duration::ZERO);
        action.answer(Duration::from_secs(1));
        assert_eq!(action.elapsed(), None);
    }

    #[test]
    fn default_playset_leaves_out_unfinished_actions() {
        let playset = ActionKind::default_playset();
        for kind in [
            ActionKind::CallAFriend,
            ActionKind::Teleportation,
            ActionKind::ItsYourChoice,
            ActionKind::NoWay,
        ] {
            assert!(!playset.contains(&kind));
        }
    }
}
