//! Session module - the cascade resolver
//!
//! A [`Session`] owns the grid, the counters and the random source for one player's
//! game. It is a timed state machine in the same spirit as a fixed-timestep game loop:
//! requests start a cascade, and [`Session::tick`] (or [`Session::advance`] in headless
//! mode) walks it forward one step at a time.
//!
//! ```text
//! Idle --swap--> AwaitingSwapAnimation --no touching match--> RollingBack --> Idle
//!                        |
//!                        +--match--> Resolving(1) --rematch--> Resolving(n+1) ...
//! Idle --weapon--> WeaponTelegraph --> Resolving(0)
//! Resolving(n) --no match--> Settling --> Idle | GameOver
//! ```
//!
//! Each step carries a minimum delay (see the pacing constants in the types crate).
//! No mutation happens before the previous step's delay has elapsed. While a cascade is
//! running the session is busy and every swap or weapon request is refused without
//! side effects.

use std::collections::BTreeSet;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::board::Grid;
use crate::bonus::{roll_bonus, BonusGrant};
use crate::config::{ConfigError, GameConfig};
use crate::generator::generate_board;
use crate::gravity::{apply_gravity, clear_positions};
use crate::inventory::{Inventory, WeaponError};
use crate::matcher::{find_matches_with_min, matched_positions, Match};
use crate::rng::SimpleRng;
use crate::scoring::{RoundScore, ScoreRules};
use crate::snapshot::{SessionSnapshot, SessionSummary};
use crate::swap::{check_swap, SwapRejection};
use crate::terminal::find_valid_swap_with_min;
use crate::types::*;

/// Why a request was refused; the session is unchanged in every case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("a cascade is in progress")]
    Busy,
    #[error("the session is over")]
    GameOver,
    #[error(transparent)]
    Swap(#[from] SwapRejection),
    #[error(transparent)]
    Weapon(#[from] WeaponError),
    #[error("weapon target ({}, {}) is outside the board", .0.row, .0.col)]
    TargetOutOfBounds(Position),
}

/// Sub-step inside a resolving round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStep {
    /// Cells are marked; removal happens when the delay elapses
    Exploding,
    /// Removal, gravity and refill are done; rematch happens when the delay elapses
    Falling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingSwapAnimation { from: Position, to: Position },
    RollingBack,
    WeaponTelegraph { weapon: WeaponKind, target: Position },
    /// `round` is the combo depth; 0 is a weapon detonation
    Resolving { round: u32, step: ResolveStep },
    Settling,
    GameOver,
}

/// What one resolved round did
#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport {
    /// Combo depth of the round (0 for a weapon detonation)
    pub round: u32,
    pub matches: Vec<Match>,
    pub weapon: Option<WeaponKind>,
    /// Special markers earned by long runs, at each run's center cell
    pub specials: Vec<(Position, Special)>,
    pub removed: usize,
    pub score: RoundScore,
    pub bonus: Option<BonusGrant>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SwapStarted { from: Position, to: Position },
    SwapRolledBack { from: Position, to: Position },
    SwapCommitted { from: Position, to: Position, moves_left: u32 },
    WeaponArmed { weapon: WeaponKind, target: Position, remaining: u32 },
    WeaponDetonated { weapon: WeaponKind, target: Position, cells: usize },
    RoundResolved(RoundReport),
    BonusGranted(BonusGrant),
    Settled { score: u64, moves_left: u32 },
    GameOver(SessionSummary),
}

/// Cells marked for the current round and where they came from
#[derive(Debug, Clone)]
enum Pending {
    Matches(Vec<Match>),
    Weapon {
        weapon: WeaponKind,
        cells: BTreeSet<Position>,
    },
}

/// One player's game: grid, counters and cascade state
#[derive(Debug, Clone)]
pub struct Session<R = SimpleRng> {
    config: GameConfig,
    rules: ScoreRules,
    rng: R,
    grid: Grid,
    phase: Phase,
    /// Remaining delay of the current phase
    timer_ms: u32,
    pending: Option<Pending>,
    score: u64,
    currency: u64,
    moves: u32,
    moves_used: u32,
    combo: u32,
    max_combo: u32,
    match_count: u32,
    bonus_count: u32,
    gold_earned: u64,
    crypto_earned_millis: u64,
    active_multiplier: Option<u32>,
    last_bonus: Option<BonusGrant>,
    inventory: Inventory,
    events: Vec<SessionEvent>,
    started_at: Instant,
    summary: Option<SessionSummary>,
}

impl Session<StdRng> {
    /// Production session seeded from OS entropy
    pub fn from_entropy(config: GameConfig) -> Result<Self, ConfigError> {
        Self::new(config, StdRng::from_entropy())
    }
}

impl<R: Rng> Session<R> {
    /// Start a session on a freshly generated board
    pub fn new(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = generate_board(
            config.width,
            config.height,
            config.generator_retry_cap,
            &mut rng,
        );
        Ok(Self::build(config, grid, rng))
    }

    /// Start a session on a given board (loaded state, fixtures)
    ///
    /// The board's dimensions override the configured ones.
    pub fn with_grid(config: GameConfig, grid: Grid, rng: R) -> Result<Self, ConfigError> {
        let config = GameConfig {
            width: grid.width(),
            height: grid.height(),
            ..config
        };
        config.validate()?;
        Ok(Self::build(config, grid, rng))
    }

    fn build(config: GameConfig, grid: Grid, rng: R) -> Self {
        let mut session = Self {
            rules: ScoreRules::from(&config),
            moves: config.initial_moves,
            config,
            rng,
            grid,
            phase: Phase::Idle,
            timer_ms: 0,
            pending: None,
            score: 0,
            currency: 0,
            moves_used: 0,
            combo: 0,
            max_combo: 0,
            match_count: 0,
            bonus_count: 0,
            gold_earned: 0,
            crypto_earned_millis: 0,
            active_multiplier: None,
            last_bonus: None,
            inventory: Inventory::new(),
            events: Vec::new(),
            started_at: Instant::now(),
            summary: None,
        };
        if !session.can_continue() {
            session.finish();
        }
        session
    }

    /// Replace the weapon inventory (typically the player's stored one)
    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn currency(&self) -> u64 {
        self.currency
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn moves_used(&self) -> u32 {
        self.moves_used
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn match_count(&self) -> u32 {
        self.match_count
    }

    pub fn bonus_count(&self) -> u32 {
        self.bonus_count
    }

    pub fn gold_earned(&self) -> u64 {
        self.gold_earned
    }

    pub fn crypto_earned_millis(&self) -> u64 {
        self.crypto_earned_millis
    }

    pub fn active_multiplier(&self) -> Option<u32> {
        self.active_multiplier
    }

    /// Bonus granted by the latest round, cleared when the cascade settles
    pub fn last_bonus(&self) -> Option<BonusGrant> {
        self.last_bonus
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn is_busy(&self) -> bool {
        !matches!(self.phase, Phase::Idle | Phase::GameOver)
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Remaining delay before the next step, None when nothing is pending
    pub fn pending_delay_ms(&self) -> Option<u32> {
        self.is_busy().then_some(self.timer_ms)
    }

    /// Summary, available once the session is over
    pub fn summary(&self) -> Option<SessionSummary> {
        self.summary
    }

    /// Take queued events (consumed by observers)
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Settled state for persistence; None while a cascade is in progress
    pub fn checkpoint(&self) -> Option<SessionSnapshot> {
        if self.is_busy() {
            return None;
        }
        Some(SessionSnapshot {
            grid: self.grid.clone(),
            score: self.score,
            currency: self.currency,
            moves: self.moves,
            max_combo: self.max_combo,
            gold_earned: self.gold_earned,
            crypto_earned_millis: self.crypto_earned_millis,
            inventory: self.inventory.clone(),
            game_over: self.game_over(),
        })
    }

    fn ensure_ready(&self) -> Result<(), RequestError> {
        match self.phase {
            Phase::GameOver => Err(RequestError::GameOver),
            Phase::Idle => Ok(()),
            _ => Err(RequestError::Busy),
        }
    }

    /// Swap two cells and start the cascade
    ///
    /// Structural problems (bounds, adjacency, empty cells) are refused without touching
    /// the grid. A structurally valid swap is applied at once; if it produces no match
    /// through either swapped cell it is rolled back after the swap delay and costs no move.
    pub fn request_swap(&mut self, from: Position, to: Position) -> Result<(), RequestError> {
        self.ensure_ready()?;
        check_swap(&self.grid, from, to)?;

        self.grid.swap_cells(from, to);
        self.enter(Phase::AwaitingSwapAnimation { from, to }, SWAP_SETTLE_MS);
        self.events.push(SessionEvent::SwapStarted { from, to });
        Ok(())
    }

    /// Fire a weapon from the inventory at `target`; does not consume a move
    pub fn use_weapon(&mut self, weapon: WeaponKind, target: Position) -> Result<(), RequestError> {
        self.ensure_ready()?;
        if !self.grid.in_bounds(target) {
            return Err(RequestError::TargetOutOfBounds(target));
        }
        let remaining = self.inventory.take_one(weapon)?;

        self.enter(Phase::WeaponTelegraph { weapon, target }, WEAPON_TELEGRAPH_MS);
        self.events.push(SessionEvent::WeaponArmed {
            weapon,
            target,
            remaining,
        });
        Ok(())
    }

    /// Apply a grant from outside the cascade (shop, promotions)
    ///
    /// Returns false while a cascade is running or once the session is over.
    pub fn grant(&mut self, bonus: BonusGrant) -> bool {
        if self.ensure_ready().is_err() {
            return false;
        }
        self.apply_bonus(bonus);
        true
    }

    /// Advance the clock by `elapsed_ms`, running every step whose delay has elapsed
    ///
    /// Leftover time carries into the following step. Returns true if any step ran.
    pub fn tick(&mut self, mut elapsed_ms: u32) -> bool {
        let mut stepped = false;
        while self.is_busy() {
            if elapsed_ms < self.timer_ms {
                self.timer_ms -= elapsed_ms;
                break;
            }
            elapsed_ms -= self.timer_ms;
            self.timer_ms = 0;
            self.step();
            stepped = true;
        }
        stepped
    }

    /// Run the next step now, skipping whatever delay remains (headless mode)
    pub fn advance(&mut self) -> bool {
        if !self.is_busy() {
            return false;
        }
        self.timer_ms = 0;
        self.step();
        true
    }

    /// Advance until the cascade settles; returns the number of steps run
    pub fn run_until_settled(&mut self) -> usize {
        let mut steps = 0;
        while self.advance() {
            steps += 1;
        }
        steps
    }

    fn enter(&mut self, phase: Phase, delay_ms: u32) {
        self.phase = phase;
        self.timer_ms = delay_ms;
    }

    fn step(&mut self) {
        match self.phase {
            Phase::Idle | Phase::GameOver => {}
            Phase::AwaitingSwapAnimation { from, to } => self.evaluate_swap(from, to),
            Phase::RollingBack => self.enter(Phase::Idle, 0),
            Phase::WeaponTelegraph { weapon, target } => self.detonate(weapon, target),
            Phase::Resolving {
                round,
                step: ResolveStep::Exploding,
            } => self.resolve_round(round),
            Phase::Resolving {
                step: ResolveStep::Falling,
                ..
            } => self.rematch(),
            Phase::Settling => self.settle(),
        }
    }

    fn evaluate_swap(&mut self, from: Position, to: Position) {
        let matches = find_matches_with_min(&self.grid, self.config.min_match);
        let touches_swap = matches.iter().any(|m| m.contains(from) || m.contains(to));

        if !touches_swap {
            self.grid.swap_cells(from, to);
            self.enter(Phase::RollingBack, SWAP_SETTLE_MS);
            self.events.push(SessionEvent::SwapRolledBack { from, to });
            return;
        }

        self.moves = self.moves.saturating_sub(1);
        self.moves_used += 1;
        self.events.push(SessionEvent::SwapCommitted {
            from,
            to,
            moves_left: self.moves,
        });
        // Every match on the board resolves, not only those through the swapped cells.
        self.start_round(matches);
    }

    fn detonate(&mut self, weapon: WeaponKind, target: Position) {
        let cells = crate::weapons::weapon_targets(
            &self.grid,
            weapon,
            target,
            self.config.swarm_size,
            &mut self.rng,
        );
        self.events.push(SessionEvent::WeaponDetonated {
            weapon,
            target,
            cells: cells.len(),
        });
        self.pending = Some(Pending::Weapon { weapon, cells });
        self.enter(
            Phase::Resolving {
                round: 0,
                step: ResolveStep::Exploding,
            },
            WEAPON_DETONATE_MS,
        );
    }

    fn start_round(&mut self, matches: Vec<Match>) {
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        self.match_count += matches.len() as u32;
        self.pending = Some(Pending::Matches(matches));
        self.enter(
            Phase::Resolving {
                round: self.combo,
                step: ResolveStep::Exploding,
            },
            MATCH_EXPLODE_MS,
        );
    }

    fn resolve_round(&mut self, round: u32) {
        let Some(pending) = self.pending.take() else {
            self.enter(Phase::Settling, COMBO_RESET_MS);
            return;
        };

        let report = match pending {
            Pending::Matches(matches) => {
                let score = self.rules.round(&matches, round, self.active_multiplier);
                let bonus = roll_bonus(&self.config, &mut self.rng);
                let specials = matches
                    .iter()
                    .filter(|m| m.special() != Special::None)
                    .map(|m| (m.center(), m.special()))
                    .collect();
                let removed = clear_positions(&mut self.grid, &matched_positions(&matches));
                RoundReport {
                    round,
                    matches,
                    weapon: None,
                    specials,
                    removed,
                    score,
                    bonus,
                }
            }
            Pending::Weapon { weapon, cells } => {
                let removed = clear_positions(&mut self.grid, &cells);
                let total = self.rules.weapon_score(removed);
                RoundReport {
                    round,
                    matches: Vec::new(),
                    weapon: Some(weapon),
                    specials: Vec::new(),
                    removed,
                    score: RoundScore {
                        base: total,
                        multiplier: 1,
                        total,
                        currency: self.rules.currency_from_score(total),
                    },
                    bonus: None,
                }
            }
        };

        self.score += report.score.total;
        self.currency += report.score.currency;
        if let Some(bonus) = report.bonus {
            self.apply_bonus(bonus);
            self.bonus_count += 1;
            self.last_bonus = Some(bonus);
            self.events.push(SessionEvent::BonusGranted(bonus));
        }

        apply_gravity(&mut self.grid, &mut self.rng);
        self.events.push(SessionEvent::RoundResolved(report));
        self.enter(
            Phase::Resolving {
                round,
                step: ResolveStep::Falling,
            },
            GRAVITY_FALL_MS,
        );
    }

    fn rematch(&mut self) {
        let matches = find_matches_with_min(&self.grid, self.config.min_match);
        if matches.is_empty() {
            self.enter(Phase::Settling, COMBO_RESET_MS);
        } else {
            self.start_round(matches);
        }
    }

    fn settle(&mut self) {
        self.combo = 0;
        self.last_bonus = None;
        self.active_multiplier = None;

        if self.can_continue() {
            self.enter(Phase::Idle, 0);
            self.events.push(SessionEvent::Settled {
                score: self.score,
                moves_left: self.moves,
            });
        } else {
            self.finish();
        }
    }

    fn can_continue(&self) -> bool {
        self.moves > 0 && find_valid_swap_with_min(&self.grid, self.config.min_match).is_some()
    }

    fn finish(&mut self) {
        self.enter(Phase::GameOver, 0);
        let summary = SessionSummary {
            final_score: self.score,
            currency_earned: self.currency,
            max_combo_reached: self.max_combo,
            moves_used: self.moves_used,
            match_count: self.match_count,
            bonus_count: self.bonus_count,
            duration_ms: self.started_at.elapsed().as_millis() as u64,
            gold_earned: self.gold_earned,
            crypto_earned_millis: self.crypto_earned_millis,
        };
        self.summary = Some(summary);
        self.events.push(SessionEvent::GameOver(summary));
    }

    fn apply_bonus(&mut self, bonus: BonusGrant) {
        match bonus {
            BonusGrant::Crypto { millis } => {
                self.crypto_earned_millis = self.crypto_earned_millis.saturating_add(millis)
            }
            BonusGrant::Gold { amount } => self.gold_earned = self.gold_earned.saturating_add(amount),
            BonusGrant::Weapon(kind) => self.inventory.add(kind, 1),
            BonusGrant::Multiplier(m) => self.active_multiplier = Some(m.max(1)),
            BonusGrant::ExtraMoves(n) => self.moves = self.moves.saturating_add(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn quiet() -> GameConfig {
        GameConfig::default().without_bonuses()
    }

    // 6x8 board: row 0 reads "HHBH" and (1,2) holds Honey, so swapping (0,2) with
    // (1,2) makes a 4-run. The rest is Comb/Sun/Water on anti-diagonal stripes.
    fn scenario_grid() -> Grid {
        Grid::from_rows(&[
            "HHBHSW", "SWHSWC", "WCSWCS", "CSWCSW", "SWCSWC", "WCSWCS", "CSWCSW", "SWCSWC",
        ])
        .unwrap()
    }

    fn small_grid() -> Grid {
        Grid::from_rows(&["HHSF", "CBHW", "FWCB", "BCWF"]).unwrap()
    }

    #[test]
    fn test_new_session() {
        let session = Session::new(quiet(), SimpleRng::new(12345)).unwrap();
        assert_eq!(session.score(), 0);
        assert_eq!(session.moves(), 30);
        assert_eq!(session.combo(), 0);
        assert!(session.grid().is_full());
        assert!(find_matches_with_min(session.grid(), 3).is_empty());
    }

    #[test]
    fn test_rejects_min_match_below_three() {
        let config = GameConfig {
            min_match: 1,
            ..quiet()
        };
        assert!(matches!(
            Session::new(config.clone(), SimpleRng::new(1)),
            Err(ConfigError::MinMatchOutOfRange { min_match: 1, .. })
        ));
        assert!(Session::with_grid(config, small_grid(), SimpleRng::new(1)).is_err());
    }

    #[test]
    fn test_swap_waits_for_settle_delay() {
        let mut session = Session::with_grid(quiet(), small_grid(), SimpleRng::new(1)).unwrap();

        session
            .request_swap(Position::new(0, 2), Position::new(1, 2))
            .unwrap();
        assert!(session.is_busy());
        assert_eq!(session.pending_delay_ms(), Some(SWAP_SETTLE_MS));

        // Not enough time: still waiting, move not yet spent.
        assert!(!session.tick(SWAP_SETTLE_MS - 1));
        assert_eq!(session.moves(), 30);

        assert!(session.tick(1));
        assert_eq!(session.moves(), 29);
        assert!(matches!(
            session.phase(),
            Phase::Resolving {
                round: 1,
                step: ResolveStep::Exploding
            }
        ));
    }

    #[test]
    fn test_busy_session_ignores_requests() {
        let mut session = Session::with_grid(quiet(), small_grid(), SimpleRng::new(1))
            .unwrap()
            .with_inventory(Inventory::starter());
        session
            .request_swap(Position::new(0, 2), Position::new(1, 2))
            .unwrap();
        let grid_mid = session.grid().clone();

        assert_eq!(
            session.request_swap(Position::new(3, 0), Position::new(3, 1)),
            Err(RequestError::Busy)
        );
        assert_eq!(
            session.use_weapon(WeaponKind::Dynamite, Position::new(1, 1)),
            Err(RequestError::Busy)
        );
        assert_eq!(session.grid(), &grid_mid);
        assert_eq!(session.inventory().quantity(WeaponKind::Dynamite), 1);
        assert!(session.checkpoint().is_none());
    }

    #[test]
    fn test_busy_session_refuses_grants() {
        let mut session = Session::with_grid(quiet(), small_grid(), SimpleRng::new(1)).unwrap();
        session
            .request_swap(Position::new(0, 2), Position::new(1, 2))
            .unwrap();
        session.advance();
        assert!(session.is_busy());

        assert!(!session.grant(BonusGrant::ExtraMoves(5)));
        assert!(!session.grant(BonusGrant::Multiplier(3)));
        assert_eq!(session.moves(), 29);
        assert_eq!(session.active_multiplier(), None);

        session.run_until_settled();
        if !session.game_over() {
            assert!(session.grant(BonusGrant::ExtraMoves(5)));
            assert_eq!(session.moves(), 34);
        }
    }

    #[test]
    fn test_scenario_four_run_scores_135() {
        let mut session = Session::with_grid(quiet(), scenario_grid(), SimpleRng::new(1)).unwrap();
        assert!(!session.game_over());

        session
            .request_swap(Position::new(0, 2), Position::new(1, 2))
            .unwrap();
        session.advance(); // swap evaluated
        session.advance(); // round 1 resolved

        let events = session.take_events();
        let report = events
            .iter()
            .find_map(|e| match e {
                SessionEvent::RoundResolved(r) => Some(r.clone()),
                _ => None,
            })
            .expect("round resolved");
        assert_eq!(report.round, 1);
        assert_eq!(report.removed, 4);
        assert_eq!(report.score.total, 135);
        assert_eq!(report.specials, vec![(Position::new(0, 2), Special::AreaClear)]);
        assert_eq!(session.score(), 135);
        assert_eq!(session.currency(), 1);
    }

    #[test]
    fn test_no_match_swap_rolls_back() {
        // Striped dead board; turning (3,3) into Bee opens up legal moves.
        let mut grid = Grid::from_rows(&["HFBHFB", "FBHFBH", "BHFBHF", "HFBHFB"]).unwrap();
        grid.set(Position::new(3, 3), Some(TokenKind::Bee));
        let mut session = Session::with_grid(quiet(), grid.clone(), SimpleRng::new(1)).unwrap();
        assert!(!session.game_over());
        session.take_events();

        session
            .request_swap(Position::new(0, 0), Position::new(0, 1))
            .unwrap();
        assert_ne!(session.grid(), &grid);
        session.advance();
        assert_eq!(session.phase(), Phase::RollingBack);
        assert_eq!(session.grid(), &grid);
        session.advance();
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.moves(), 30);
        assert_eq!(session.moves_used(), 0);

        let events = session.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, SessionEvent::SwapRolledBack { .. })));
    }

    #[test]
    fn test_structural_rejection_never_mutates() {
        let mut session = Session::new(quiet(), SimpleRng::new(7)).unwrap();
        let before = session.grid().clone();
        assert_eq!(
            session.request_swap(Position::new(0, 0), Position::new(1, 1)),
            Err(RequestError::Swap(SwapRejection::NotAdjacent))
        );
        assert_eq!(
            session.request_swap(Position::new(0, 0), Position::new(0, 9)),
            Err(RequestError::Swap(SwapRejection::OutOfBounds(Position::new(0, 9))))
        );
        assert_eq!(session.grid(), &before);
        assert!(!session.is_busy());
    }

    #[test]
    fn test_last_move_ends_session() {
        let config = GameConfig {
            initial_moves: 1,
            ..quiet()
        };
        let mut session = Session::with_grid(config, small_grid(), SimpleRng::new(1)).unwrap();
        session
            .request_swap(Position::new(0, 2), Position::new(1, 2))
            .unwrap();
        session.run_until_settled();

        assert_eq!(session.moves(), 0);
        assert!(session.game_over());
        let summary = session.summary().unwrap();
        assert_eq!(summary.moves_used, 1);
        assert!(summary.final_score >= 30);
        assert!(summary.max_combo_reached >= 1);
        assert_eq!(
            session.request_swap(Position::new(3, 0), Position::new(3, 1)),
            Err(RequestError::GameOver)
        );
    }

    #[test]
    fn test_cascade_settles_full_and_matchless() {
        for seed in 1..30 {
            let mut session = Session::new(quiet(), SimpleRng::new(seed)).unwrap();
            let Some((a, b)) = crate::terminal::find_valid_swap(session.grid()) else {
                continue;
            };
            session.request_swap(a, b).unwrap();
            session.run_until_settled();
            assert!(!session.is_busy());
            assert!(session.grid().is_full());
            assert!(find_matches_with_min(session.grid(), 3).is_empty());
            assert_eq!(session.combo(), 0);
            assert!(session.max_combo() >= 1);
        }
    }

    #[test]
    fn test_weapon_consumes_inventory_not_moves() {
        let mut session = Session::new(quiet(), SimpleRng::new(11))
            .unwrap()
            .with_inventory(Inventory::starter());
        if session.game_over() {
            return;
        }
        session
            .use_weapon(WeaponKind::Dynamite, Position::new(3, 3))
            .unwrap();
        assert_eq!(session.inventory().quantity(WeaponKind::Dynamite), 0);
        assert_eq!(session.pending_delay_ms(), Some(WEAPON_TELEGRAPH_MS));

        session.advance(); // telegraph done, targets marked
        assert_eq!(session.pending_delay_ms(), Some(WEAPON_DETONATE_MS));
        session.advance(); // removed, scored
        assert_eq!(session.score(), 9 * 10 * 2);

        session.run_until_settled();
        assert_eq!(session.moves(), 30);
        assert!(session.grid().is_full());

        if !session.game_over() {
            assert_eq!(
                session.use_weapon(WeaponKind::Dynamite, Position::new(0, 0)),
                Err(RequestError::Weapon(WeaponError::NotInInventory(
                    WeaponKind::Dynamite
                )))
            );
        }
    }

    #[test]
    fn test_weapon_target_out_of_bounds() {
        let mut session = Session::new(quiet(), SimpleRng::new(11))
            .unwrap()
            .with_inventory(Inventory::starter());
        if session.game_over() {
            return;
        }
        assert_eq!(
            session.use_weapon(WeaponKind::Lightning, Position::new(20, 0)),
            Err(RequestError::TargetOutOfBounds(Position::new(20, 0)))
        );
        assert_eq!(session.inventory().quantity(WeaponKind::Lightning), 1);
    }

    #[test]
    fn test_multiplier_grant_applies_then_clears() {
        let mut session = Session::with_grid(quiet(), small_grid(), SimpleRng::new(1)).unwrap();
        assert!(session.grant(BonusGrant::Multiplier(3)));
        session
            .request_swap(Position::new(0, 2), Position::new(1, 2))
            .unwrap();
        session.advance();
        session.advance();
        // (3*10 + 50) * 1.5 = 120, tripled
        assert_eq!(session.score(), 360);
        session.run_until_settled();
        assert_eq!(session.active_multiplier(), None);
    }

    #[test]
    fn test_extra_moves_grant() {
        let mut session = Session::new(quiet(), SimpleRng::new(3)).unwrap();
        if session.game_over() {
            return;
        }
        session.grant(BonusGrant::ExtraMoves(5));
        assert_eq!(session.moves(), 35);
    }

    #[test]
    fn test_huge_grants_saturate() {
        let mut session = Session::with_grid(quiet(), small_grid(), SimpleRng::new(1)).unwrap();
        assert!(session.grant(BonusGrant::ExtraMoves(u32::MAX)));
        assert!(session.grant(BonusGrant::Gold { amount: 10 }));
        assert!(session.grant(BonusGrant::Gold { amount: u64::MAX }));
        assert!(session.grant(BonusGrant::Crypto { millis: 10 }));
        assert!(session.grant(BonusGrant::Crypto { millis: u64::MAX }));
        assert_eq!(session.moves(), u32::MAX);
        assert_eq!(session.gold_earned(), u64::MAX);
        assert_eq!(session.crypto_earned_millis(), u64::MAX);
    }

    #[test]
    fn test_round_bonus_folds_into_counters() {
        let config = GameConfig {
            crypto_bonus_chance: 0.0,
            gold_bonus_chance: 1.0,
            weapon_bonus_chance: 0.0,
            ..GameConfig::default()
        };
        let mut session = Session::with_grid(config, small_grid(), SimpleRng::new(1)).unwrap();
        session
            .request_swap(Position::new(0, 2), Position::new(1, 2))
            .unwrap();
        session.advance();
        session.advance();
        assert_eq!(session.bonus_count(), 1);
        assert!((10..=59).contains(&session.gold_earned()));
        assert!(matches!(session.last_bonus(), Some(BonusGrant::Gold { .. })));
    }

    #[test]
    fn test_tick_carries_leftover_time() {
        let mut session = Session::with_grid(quiet(), small_grid(), SimpleRng::new(1)).unwrap();
        session
            .request_swap(Position::new(0, 2), Position::new(1, 2))
            .unwrap();
        // One big tick covers swap settle and the explosion.
        session.tick(SWAP_SETTLE_MS + MATCH_EXPLODE_MS);
        assert!(matches!(
            session.phase(),
            Phase::Resolving {
                step: ResolveStep::Falling,
                ..
            }
        ));
    }

    #[test]
    fn test_cascade_leaving_dead_board_ends_session() {
        // Only the W at (0,0) makes a move possible. A zero-output rng refills Honey,
        // so blasting the corner leaves "HH" over "HH" on dead stripes.
        let grid = Grid::from_rows(&["WSWCSW", "SWCSWC", "WCSWCS", "CSWCSW"]).unwrap();
        let mut session = Session::with_grid(quiet(), grid, StepRng::new(0, 0))
            .unwrap()
            .with_inventory(Inventory::starter());
        assert!(!session.game_over());

        session
            .use_weapon(WeaponKind::Dynamite, Position::new(0, 0))
            .unwrap();
        session.run_until_settled();

        assert_eq!(
            session.grid().to_rows(),
            vec!["HHWCSW", "HHCSWC", "WCSWCS", "CSWCSW"]
        );
        assert!(session.game_over());
        assert_eq!(session.moves(), 30);
        let summary = session.summary().unwrap();
        assert_eq!(summary.final_score, 4 * 10 * 2);
        assert_eq!(summary.moves_used, 0);
        assert!(matches!(
            session.take_events().last(),
            Some(SessionEvent::GameOver(_))
        ));
    }

    #[test]
    fn test_dead_board_is_game_over_at_start() {
        let grid = Grid::from_rows(&["HFBHFB", "FBHFBH", "BHFBHF", "HFBHFB"]).unwrap();
        let mut session = Session::with_grid(quiet(), grid, SimpleRng::new(1)).unwrap();
        assert!(session.game_over());
        assert!(session.checkpoint().unwrap().game_over);
        assert!(matches!(
            session.take_events().last(),
            Some(SessionEvent::GameOver(_))
        ));
    }
}
