use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use snake_engine::{CellValue, Direction, GameSnapshot, Position, SessionRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum BotKind {
    /// Greedy toward the food, never into a wall, obstacle or itself if avoidable.
    #[default]
    Efficient,
    /// Any safe move, chosen at random.
    Random,
}

pub struct BotController;

impl BotController {
    pub fn calculate_move(
        kind: BotKind,
        snapshot: &GameSnapshot,
        rng: &mut SessionRng,
    ) -> Option<Direction> {
        if snapshot.game_over {
            return None;
        }
        match kind {
            BotKind::Efficient => Self::efficient_pathfinding(snapshot, rng),
            BotKind::Random => Self::random_valid_move(snapshot, rng),
        }
    }

    fn efficient_pathfinding(snapshot: &GameSnapshot, rng: &mut SessionRng) -> Option<Direction> {
        let head = snapshot.head()?;
        let Some(food) = snapshot.food else {
            return Self::random_valid_move(snapshot, rng);
        };

        Self::safe_directions(snapshot)
            .into_iter()
            .min_by_key(|&dir| head.translate(dir).manhattan_distance(food))
            .or_else(|| Self::random_valid_move(snapshot, rng))
    }

    fn random_valid_move(snapshot: &GameSnapshot, rng: &mut SessionRng) -> Option<Direction> {
        let safe = Self::safe_directions(snapshot);
        rng.choose(&safe).copied().or(Some(snapshot.direction))
    }

    fn safe_directions(snapshot: &GameSnapshot) -> Vec<Direction> {
        let Some(head) = snapshot.head() else {
            return Vec::new();
        };
        Direction::ALL
            .into_iter()
            .filter(|dir| !dir.is_opposite(&snapshot.direction))
            .filter(|&dir| Self::is_safe_position(head.translate(dir), snapshot))
            .collect()
    }

    fn is_safe_position(pos: Position, snapshot: &GameSnapshot) -> bool {
        if snapshot.tail() == Some(pos) {
            return true;
        }
        matches!(snapshot.grid.get(pos), CellValue::Empty | CellValue::Food)
    }
}
