use crate::board::GameOutcome;
use crate::error::Result;
use crate::game_tree::GameTree;
use crate::opponent::RandomOpponent;
use crate::random::RandomGenerator;
use crate::session::{GameSession, SessionConfig};
use log::debug;
use std::fmt;

/// Tally of games played by the engine against a simulated opponent.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimulationSummary {
    pub games: u32,
    pub engine_wins: u32,
    pub opponent_wins: u32,
    pub draws: u32,
}

impl SimulationSummary {
    fn record(&mut self, outcome: GameOutcome) {
        self.games += 1;
        match outcome {
            GameOutcome::XWins => self.engine_wins += 1,
            GameOutcome::OWins => self.opponent_wins += 1,
            GameOutcome::Draw => self.draws += 1,
            GameOutcome::InProgress => {}
        }
    }
}

impl fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games: {} engine wins, {} opponent wins, {} draws",
            self.games, self.engine_wins, self.opponent_wins, self.draws
        )
    }
}

/// Plays `games` games against a random opponent, reusing one session over the shared tree.
pub fn simulate_games<K: RandomGenerator>(
    tree: &GameTree,
    config: SessionConfig,
    games: u32,
    opponent: &mut RandomOpponent<K>,
) -> Result<SimulationSummary> {
    let mut summary = SimulationSummary::default();
    let mut session = GameSession::new(tree, config)?;
    for game in 0..games {
        session.reset()?;
        let outcome = session.play(opponent)?;
        debug!("game {game}: {outcome:?} after {} moves", session.move_count());
        summary.record(outcome);
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_tree::tests::full_tree;
    use crate::random::SeededRandomGenerator;

    #[test]
    fn every_simulated_game_finishes() {
        // arrange
        let mut opponent = RandomOpponent::new(SeededRandomGenerator::new(11));

        // act
        let summary =
            simulate_games(full_tree(), SessionConfig::default(), 200, &mut opponent).unwrap();

        // assert
        assert_eq!(summary.games, 200);
        assert_eq!(
            summary.engine_wins + summary.opponent_wins + summary.draws,
            200
        );
        assert!(summary.engine_wins > summary.opponent_wins);
    }

    #[test]
    fn same_seed_same_summary() {
        let run = |seed| {
            let mut opponent = RandomOpponent::new(SeededRandomGenerator::new(seed));
            simulate_games(full_tree(), SessionConfig::default(), 50, &mut opponent).unwrap()
        };
        assert_eq!(run(3), run(3));
    }

    #[test]
    fn session_outcome_matches_final_position() {
        let mut opponent = RandomOpponent::new(SeededRandomGenerator::new(5));
        let mut session = GameSession::new(full_tree(), SessionConfig::default()).unwrap();
        for _ in 0..50 {
            session.reset().unwrap();
            let outcome = session.play(&mut opponent).unwrap();
            let position = session.position().unwrap();
            assert_eq!(outcome, position.terminal_status());
            assert!(session.move_count() <= 9);
            assert_eq!(session.move_count() as usize, position.occupied_count());
        }
    }

    #[test]
    fn summary_display() {
        let summary = SimulationSummary {
            games: 3,
            engine_wins: 2,
            opponent_wins: 0,
            draws: 1,
        };
        assert_eq!(
            summary.to_string(),
            "3 games: 2 engine wins, 0 opponent wins, 1 draws"
        );
    }
}
