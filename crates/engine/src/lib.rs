//! Move selection on top of the core rules
//!
//! Hints, a greedy "best swap" search and the autoplay entry point used by the headless
//! runner. Nothing here mutates a session except [`play_move`], which goes through the
//! same request path as a player would.

use honey_match_core::matcher::find_matches_with_min;
use honey_match_core::swap::{apply_swap, validate_swap_with_min};
use honey_match_core::terminal::find_valid_swap_with_min;
use honey_match_core::{Grid, RequestError, ScoreRules, Session, SwapRejection};
use honey_match_types::Position;
use rand::Rng;

pub type Swap = (Position, Position);

/// How autoplay picks its next swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// First legal swap in row-major order
    First,
    /// Legal swap with the highest first-round score
    #[default]
    Greedy,
}

impl Policy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "first" => Some(Policy::First),
            "greedy" => Some(Policy::Greedy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::First => "first",
            Policy::Greedy => "greedy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayError {
    NotPlayable,
    Busy,
    NoMove,
    Rejected(SwapRejection),
}

impl PlayError {
    pub fn code(self) -> &'static str {
        match self {
            PlayError::NotPlayable => "game_over",
            PlayError::Busy => "busy",
            PlayError::NoMove => "no_move",
            PlayError::Rejected(rejection) => rejection.code(),
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlayError::NotPlayable => "session is over",
            PlayError::Busy => "a cascade is still resolving",
            PlayError::NoMove => "no legal swap on the board",
            PlayError::Rejected(_) => "swap was refused",
        }
    }
}

impl From<RequestError> for PlayError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::Busy => PlayError::Busy,
            RequestError::GameOver => PlayError::NotPlayable,
            RequestError::Swap(rejection) => PlayError::Rejected(rejection),
            RequestError::Weapon(_) | RequestError::TargetOutOfBounds(_) => PlayError::NoMove,
        }
    }
}

/// First legal swap, the same one the terminal check finds
pub fn hint(grid: &Grid, min_len: usize) -> Option<Swap> {
    find_valid_swap_with_min(grid, min_len)
}

/// Score of the first round a swap would trigger, None if the swap is not legal
///
/// Refills after the first round are random, so deeper cascades are not predicted.
pub fn preview_swap(
    grid: &Grid,
    a: Position,
    b: Position,
    min_len: usize,
    rules: &ScoreRules,
) -> Option<u64> {
    if !validate_swap_with_min(grid, a, b, min_len) {
        return None;
    }
    let swapped = apply_swap(grid, a, b);
    let matches = find_matches_with_min(&swapped, min_len);
    Some(rules.score_round(&matches, 1))
}

/// Legal swap with the highest previewed score; ties go to the earlier swap in row-major order
pub fn best_swap(grid: &Grid, min_len: usize, rules: &ScoreRules) -> Option<(Swap, u64)> {
    let mut best: Option<(Swap, u64)> = None;
    for pos in grid.positions() {
        for other in grid.forward_neighbors(pos) {
            let Some(score) = preview_swap(grid, pos, other, min_len, rules) else {
                continue;
            };
            if best.map_or(true, |(_, top)| score > top) {
                best = Some(((pos, other), score));
            }
        }
    }
    best
}

/// Pick the next swap for `session` under `policy`
pub fn choose_move<R: Rng>(session: &Session<R>, policy: Policy) -> Option<Swap> {
    let min_len = session.config().min_match;
    match policy {
        Policy::First => hint(session.grid(), min_len),
        Policy::Greedy => {
            let rules = ScoreRules::from(session.config());
            best_swap(session.grid(), min_len, &rules).map(|(swap, _)| swap)
        }
    }
}

/// Choose a swap and submit it; the caller drives the cascade afterwards
pub fn play_move<R: Rng>(session: &mut Session<R>, policy: Policy) -> Result<Swap, PlayError> {
    if session.game_over() {
        return Err(PlayError::NotPlayable);
    }
    if session.is_busy() {
        return Err(PlayError::Busy);
    }
    let Some((a, b)) = choose_move(session, policy) else {
        return Err(PlayError::NoMove);
    };
    session.request_swap(a, b)?;
    Ok((a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use honey_match_core::{GameConfig, SimpleRng};

    fn grid(rows: &[&str]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_hint_finds_first_legal_swap() {
        let g = grid(&["HHSF", "CBHW", "FWCB", "BCWF"]);
        assert_eq!(hint(&g, 3), Some((Position::new(0, 2), Position::new(1, 2))));
    }

    #[test]
    fn test_hint_none_on_dead_board() {
        let g = grid(&["HFBHFB", "FBHFBH", "BHFBHF", "HFBHFB"]);
        assert_eq!(hint(&g, 3), None);
    }

    #[test]
    fn test_preview_rejects_illegal_swap() {
        let g = grid(&["HHSF", "CBHW", "FWCB", "BCWF"]);
        let rules = ScoreRules::default();
        assert_eq!(preview_swap(&g, Position::new(3, 0), Position::new(3, 1), 3, &rules), None);
        assert_eq!(
            preview_swap(&g, Position::new(0, 2), Position::new(1, 2), 3, &rules),
            Some(120)
        );
    }

    #[test]
    fn test_best_swap_prefers_longer_run() {
        // Three legal swaps: (0,2)<->(0,3) and (3,2)<->(3,3) make 3-runs, while
        // (0,2)<->(1,2) turns row 0 into HHHH.
        let g = grid(&["HHSHF", "WFHSB", "SBFWS", "CCWCF", "FWBSB"]);
        let rules = ScoreRules::default();
        let ((a, b), score) = best_swap(&g, 3, &rules).unwrap();
        assert_eq!((a, b), (Position::new(0, 2), Position::new(1, 2)));
        assert_eq!(score, 135);
    }

    #[test]
    fn test_play_move_submits_swap() {
        let g = grid(&["HHSF", "CBHW", "FWCB", "BCWF"]);
        let config = GameConfig::default().without_bonuses();
        let mut session = Session::with_grid(config, g, SimpleRng::new(1)).unwrap();

        let swap = play_move(&mut session, Policy::Greedy).unwrap();
        assert_eq!(swap, (Position::new(0, 2), Position::new(1, 2)));
        assert!(session.is_busy());
        assert_eq!(play_move(&mut session, Policy::Greedy), Err(PlayError::Busy));

        session.run_until_settled();
        assert_eq!(session.moves_used(), 1);
    }

    #[test]
    fn test_play_move_on_finished_session() {
        let g = grid(&["HFBHFB", "FBHFBH", "BHFBHF", "HFBHFB"]);
        let mut session = Session::with_grid(GameConfig::default(), g, SimpleRng::new(1)).unwrap();
        assert_eq!(play_move(&mut session, Policy::First), Err(PlayError::NotPlayable));
        assert_eq!(PlayError::NotPlayable.code(), "game_over");
    }

    #[test]
    fn test_policy_names_round_trip() {
        for p in [Policy::First, Policy::Greedy] {
            assert_eq!(Policy::from_str(p.as_str()), Some(p));
        }
        assert_eq!(Policy::from_str("random"), None);
    }
}
