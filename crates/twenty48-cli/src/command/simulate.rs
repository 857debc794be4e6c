use std::{collections::BTreeMap, path::PathBuf};

use arrayvec::ArrayVec;
use log::{debug, info};
use rand::{Rng, SeedableRng as _, rngs::StdRng, seq::IndexedRandom as _};
use twenty48_engine::{Direction, GameSession, MoveOutcome, TileSeed};

use crate::{
    schema::simulation::{GameResult, SimulationSummary},
    util::Output,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: usize,
    /// Seed for the whole run (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Stop a game after this many accepted moves
    #[arg(long, default_value_t = 100_000)]
    max_turns: usize,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        games,
        seed,
        max_turns,
        output,
    } = arg;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_os_rng(),
    };

    info!("simulating {games} games");
    let results: Vec<GameResult> = (0..*games)
        .map(|i| {
            let result = play_random_game(rng.random(), *max_turns, &mut rng);
            debug!(
                "game {i}: score {}, turns {}, max tile {}",
                result.score, result.turns, result.max_tile
            );
            result
        })
        .collect();

    let summary = summarize(results);
    info!(
        "mean score {:.1}, best score {}, wins {}/{}",
        summary.mean_score, summary.best_score, summary.wins, summary.num_games
    );
    Output::save_json(&summary, output.clone())
}

/// Plays one game choosing uniformly among the directions that change the grid.
fn play_random_game<R>(seed: TileSeed, max_turns: usize, rng: &mut R) -> GameResult
where
    R: Rng + ?Sized,
{
    let mut session = GameSession::with_seed(seed);
    while !session.is_game_over() && session.stats().turns() < max_turns {
        let legal: ArrayVec<Direction, 4> = Direction::ALL
            .into_iter()
            .filter(|&direction| session.grid().can_move(direction))
            .collect();
        let Some(&direction) = legal.choose(rng) else {
            break;
        };
        let outcome = session.apply_move(direction);
        debug_assert!(matches!(outcome, MoveOutcome::Moved { .. }));
    }

    GameResult {
        seed,
        score: session.score(),
        turns: session.stats().turns(),
        max_tile: session.stats().max_tile(),
        won: session.is_won(),
        finished: session.is_game_over(),
    }
}

#[expect(clippy::cast_precision_loss)]
fn summarize(games: Vec<GameResult>) -> SimulationSummary {
    let num_games = games.len();
    let mean = |total: f64| {
        if num_games == 0 {
            0.0
        } else {
            total / num_games as f64
        }
    };

    let mut max_tile_counts = BTreeMap::new();
    for game in &games {
        *max_tile_counts.entry(game.max_tile).or_insert(0) += 1;
    }

    SimulationSummary {
        num_games,
        wins: games.iter().filter(|game| game.won).count(),
        mean_score: mean(games.iter().map(|game| game.score as f64).sum()),
        best_score: games.iter().map(|game| game.score).max().unwrap_or(0),
        mean_turns: mean(games.iter().map(|game| game.turns as f64).sum()),
        max_tile_counts,
        games,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_game_runs_to_completion() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = play_random_game(rng.random(), usize::MAX, &mut rng);
        assert!(result.finished);
        assert!(result.turns > 0);
        assert!(result.max_tile.is_power_of_two());
        assert!(result.score > 0);
    }

    #[test]
    fn test_turn_limit_stops_game() {
        let mut rng = StdRng::seed_from_u64(2);
        let result = play_random_game(rng.random(), 5, &mut rng);
        assert_eq!(result.turns, 5);
        assert!(!result.finished);
    }

    #[test]
    fn test_same_seed_same_result() {
        let seed = TileSeed::from_bytes([3; 16]);
        let first = play_random_game(seed, usize::MAX, &mut StdRng::seed_from_u64(4));
        let second = play_random_game(seed, usize::MAX, &mut StdRng::seed_from_u64(4));
        assert_eq!(first.score, second.score);
        assert_eq!(first.turns, second.turns);
    }

    #[test]
    fn test_summarize() {
        let game = |score, max_tile, won| GameResult {
            seed: TileSeed::from_bytes([0; 16]),
            score,
            turns: 10,
            max_tile,
            won,
            finished: true,
        };
        let summary = summarize(vec![game(100, 64, false), game(300, 2048, true)]);
        assert_eq!(summary.num_games, 2);
        assert_eq!(summary.wins, 1);
        assert!((summary.mean_score - 200.0).abs() < f64::EPSILON);
        assert_eq!(summary.best_score, 300);
        assert_eq!(summary.max_tile_counts.get(&64), Some(&1));
        assert_eq!(summary.max_tile_counts.get(&2048), Some(&1));

        let empty = summarize(Vec::new());
        assert_eq!(empty.num_games, 0);
        assert!(empty.mean_score.abs() < f64::EPSILON);
    }
}
