//! Whole-game scenarios across grid, session state and leaderboard.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::game::{GAME_DURATION_SECS, GRID_COLS, GRID_ROWS, LEADERBOARD_TOP_N};
use crate::game::grid::Grid;
use crate::game::state::{GameConfig, SessionState};
use crate::game::types::{ClickPathEntry, Phase, Symbol};
use crate::leaderboard::{top_scores, LeaderboardRecord, LeaderboardStore, MemoryLeaderboard};

/// 🍊 at (0,0), 🏀 at (0,1), the rest filled with lemons.
fn scenario_grid() -> Grid {
    let mut rows = vec![vec![Symbol::Lemon; GRID_COLS]; GRID_ROWS];
    rows[0][0] = Symbol::Orange;
    rows[0][1] = Symbol::Ball;
    Grid::from_rows(rows).unwrap()
}

#[test]
fn test_full_game_round_trip() {
    let store = MemoryLeaderboard::new();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut session = SessionState::with_grid(GameConfig::default(), scenario_grid());
    let t0 = Instant::now();

    assert!(session.start(t0));

    let entry = session.click_cell(0, 0, t0 + Duration::from_secs(1)).unwrap();
    assert_eq!(entry, ClickPathEntry { row: 0, col: 0, symbol: Symbol::Orange, index: 0 });
    assert_eq!(session.score(), 50);
    assert_eq!(session.click_path(), &[entry]);

    assert!(session.click_cell(0, 0, t0 + Duration::from_secs(2)).is_none());
    assert_eq!(session.score(), 50);

    session.click_cell(0, 1, t0 + Duration::from_secs(3)).unwrap();
    assert_eq!(session.score(), 50);
    assert_eq!(session.click_path().len(), 2);

    let end = t0 + Duration::from_secs(GAME_DURATION_SECS);
    assert_eq!(session.remaining_secs(end), 0);
    assert_eq!(session.phase(), Phase::Ended);

    let record = session.submit("Ann", &store, end).unwrap();
    assert_eq!(record, LeaderboardRecord::new("Ann", 50));
    assert_eq!(store.load().unwrap(), vec![LeaderboardRecord::new("Ann", 50)]);

    assert!(session.reset(&mut rng));
    assert_eq!(session.phase(), Phase::NotStarted);
    assert_eq!(session.score(), 0);
    assert!(session.click_path().is_empty());
    assert_ne!(session.grid(), &scenario_grid());
    assert_eq!(store.load().unwrap(), vec![LeaderboardRecord::new("Ann", 50)]);
}

#[test]
fn test_several_games_rank_on_shared_leaderboard() {
    let store: Arc<dyn LeaderboardStore> = Arc::new(MemoryLeaderboard::new());
    let mut rng = StdRng::seed_from_u64(99);
    let mut session = SessionState::new(GameConfig::default(), &mut rng);

    for (name, clicks) in [("first", 3), ("second", 12), ("third", 3)] {
        let t0 = Instant::now();
        session.start(t0);
        let mut clicked = 0;
        'outer: for row in 0..GRID_ROWS {
            for col in 0..GRID_COLS {
                if clicked == clicks {
                    break 'outer;
                }
                session.click_cell(row, col, t0);
                clicked += 1;
            }
        }
        assert_eq!(session.score(), session.recomputed_score());
        session.submit(name, store.as_ref(), t0 + Duration::from_secs(GAME_DURATION_SECS)).unwrap();
        assert!(session.reset(&mut rng));
    }

    let records = store.load().unwrap();
    assert_eq!(records.len(), 3);
    let ranked = top_scores(store.as_ref(), LEADERBOARD_TOP_N).unwrap();
    assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    for pair in ranked.windows(2) {
        if pair[0].score == pair[1].score {
            let pos = |name: &str| records.iter().position(|r| r.name == name).unwrap();
            assert!(pos(&pair[0].name) < pos(&pair[1].name));
        }
    }
}
