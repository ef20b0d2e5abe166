use crate::{log, GameError};
use super::direction_buffer::DirectionBuffer;
use super::grid::Grid;
use super::obstacles::{Obstacle, ObstacleRegistry};
use super::session_rng::SessionRng;
use super::settings::GameSettings;
use super::snake::SnakeBody;
use super::snapshot::GameSnapshot;
use super::types::{CellValue, DeathReason, Direction, Position};
use crate::defaults::INITIAL_SNAKE_LENGTH;

/// One game's board and the rules that advance it.
///
/// `GameState` is single-threaded; share it through
/// [`super::GameSession`], which serialises ticks against the obstacle
/// refresh.
#[derive(Debug)]
pub struct GameState {
    grid: Grid,
    snake: SnakeBody,
    obstacles: ObstacleRegistry,
    direction_buffer: DirectionBuffer,
    direction: Direction,
    food: Option<Position>,
    score: u32,
    game_over: bool,
    death_reason: Option<DeathReason>,
    tick: u64,
    settings: GameSettings,
    rng: SessionRng,
}

impl GameState {
    pub fn new(settings: GameSettings, rng: SessionRng) -> Result<Self, GameError> {
        settings.validate()?;

        let mut state = Self {
            grid: Grid::new(settings.rows, settings.cols),
            snake: SnakeBody::new(),
            obstacles: ObstacleRegistry::new(),
            direction_buffer: DirectionBuffer::new(),
            direction: Direction::Right,
            food: None,
            score: 0,
            game_over: false,
            death_reason: None,
            tick: 0,
            settings,
            rng,
        };

        state.add_snake();
        state.add_food();
        state.generate_obstacles(state.settings.obstacle_count);

        log!(
            "New game {}x{} (seed {}), {} obstacles",
            state.settings.rows,
            state.settings.cols,
            state.rng.seed(),
            state.obstacles.len()
        );
        Ok(state)
    }

    pub fn with_size(rows: usize, cols: usize, seed: u64) -> Result<Self, GameError> {
        Self::new(GameSettings::with_size(rows, cols), SessionRng::new(seed))
    }

    fn add_snake(&mut self) {
        let row = (self.settings.rows / 2) as i32;
        for col in 0..INITIAL_SNAKE_LENGTH {
            self.add_head(Position::new(row, col as i32));
        }
    }

    fn add_head(&mut self, pos: Position) {
        self.snake.add_head(pos);
        self.grid.set(pos, CellValue::Snake);
    }

    fn remove_tail(&mut self) {
        if let Some(tail) = self.snake.remove_tail() {
            self.grid.set(tail, CellValue::Empty);
        }
    }

    fn add_food(&mut self) {
        let empty = self.grid.empty_positions();
        let Some(&pos) = self.rng.choose(&empty) else {
            self.food = None;
            return;
        };
        self.grid.set(pos, CellValue::Food);
        self.food = Some(pos);
    }

    /// Replaces the obstacle set with up to `count` fresh obstacles on empty
    /// cells.
    pub fn generate_obstacles(&mut self, count: usize) {
        self.obstacles.clear(&mut self.grid);
        self.obstacles.place(count, &mut self.grid, &mut self.rng, &[]);
    }

    /// Periodic obstacle refresh. Clears every obstacle and places the
    /// configured number again, avoiding the cells just vacated while other
    /// cells are free. Does nothing once the game is over.
    pub fn regenerate_obstacles(&mut self) {
        if self.game_over {
            return;
        }

        let vacated = self.obstacles.clear(&mut self.grid);
        let placed = self.obstacles.place(
            self.settings.obstacle_count,
            &mut self.grid,
            &mut self.rng,
            &vacated,
        );
        log!("Obstacles regenerated at tick {}: {} placed", self.tick, placed);
    }

    pub fn change_direction(&mut self, direction: Direction) {
        if self.game_over {
            return;
        }
        self.direction_buffer.push(direction, self.direction);
    }

    fn will_hit(&self, new_head: Position) -> CellValue {
        if new_head == self.snake.tail() {
            return CellValue::Empty;
        }
        if self.grid.outside_grid(new_head) {
            return CellValue::Outside;
        }
        self.grid.get(new_head)
    }

    /// Advances the game by one tick. A no-op once the game is over.
    pub fn move_snake(&mut self) {
        if self.game_over {
            return;
        }

        if let Some(direction) = self.direction_buffer.pop() {
            self.direction = direction;
        }

        let new_head = self.snake.head().translate(self.direction);
        let hit = self.will_hit(new_head);
        self.tick += 1;

        match hit {
            CellValue::Outside => self.end_game(DeathReason::WallCollision, new_head),
            CellValue::Snake => self.end_game(DeathReason::SelfCollision, new_head),
            CellValue::Obstacle => self.end_game(DeathReason::ObstacleCollision, new_head),
            CellValue::Empty => {
                self.remove_tail();
                self.add_head(new_head);
            }
            CellValue::Food => {
                self.add_head(new_head);
                self.score += 1;
                self.food = None;
                log!("Ate food at ({}, {}). Score: {}", new_head.row, new_head.col, self.score);
                self.add_food();
            }
        }
    }

    fn end_game(&mut self, reason: DeathReason, at: Position) {
        self.game_over = true;
        self.death_reason = Some(reason);
        log!(
            "Game over at tick {}: {:?} at ({}, {}). Score: {}",
            self.tick,
            reason,
            at.row,
            at.col,
            self.score
        );
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn head_position(&self) -> Position {
        self.snake.head()
    }

    pub fn tail_position(&self) -> Position {
        self.snake.tail()
    }

    pub fn snake_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.snake.positions()
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.obstacles.obstacles()
    }

    pub fn food_position(&self) -> Option<Position> {
        self.food
    }

    pub fn buffered_directions(&self) -> Vec<Direction> {
        self.direction_buffer.to_vec()
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.grid.clone(),
            snake: self.snake.positions().collect(),
            obstacles: self.obstacles.positions(),
            food: self.food,
            direction: self.direction,
            buffered_directions: self.direction_buffer.to_vec(),
            score: self.score,
            game_over: self.game_over,
            death_reason: self.death_reason,
            tick: self.tick,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, segments: &[Position], direction: Direction) {
        while !self.snake.is_empty() {
            self.remove_tail();
        }
        for &pos in segments.iter().rev() {
            self.add_head(pos);
        }
        self.direction = direction;
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, pos: Position) {
        if let Some(old) = self.food.take() {
            self.grid.set(old, CellValue::Empty);
        }
        self.grid.set(pos, CellValue::Food);
        self.food = Some(pos);
    }

    #[cfg(test)]
    pub(crate) fn clear_obstacles(&mut self) {
        self.obstacles.clear(&mut self.grid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn create_state(rows: usize, cols: usize) -> GameState {
        GameState::with_size(rows, cols, 42).unwrap()
    }

    /// Clean board with only the snake on it and food parked far away.
    fn open_board(rows: usize, cols: usize, snake: &[Position], direction: Direction) -> GameState {
        let mut state = create_state(rows, cols);
        state.clear_obstacles();
        state.set_food(Position::new(rows as i32 - 1, cols as i32 - 1));
        state.set_snake(snake, direction);
        state
    }

    fn assert_consistent(state: &GameState) {
        let body: Vec<Position> = state.snake_positions().collect();
        let unique: HashSet<Position> = body.iter().copied().collect();
        assert_eq!(unique.len(), body.len(), "snake overlaps itself");

        let snake_cells: HashSet<Position> =
            state.grid().positions_of(CellValue::Snake).into_iter().collect();
        assert_eq!(snake_cells, unique, "grid snake cells differ from body");

        let food_cells = state.grid().positions_of(CellValue::Food);
        assert!(food_cells.len() <= 1, "more than one food cell");
        assert_eq!(food_cells.first().copied(), state.food_position());

        let obstacle_cells: HashSet<Position> =
            state.grid().positions_of(CellValue::Obstacle).into_iter().collect();
        let registered: HashSet<Position> = state.obstacles().iter().map(Obstacle::position).collect();
        assert_eq!(obstacle_cells, registered, "grid obstacle cells differ from registry");

        let pending = state.buffered_directions();
        assert!(pending.len() <= 2);
        let mut previous = state.direction();
        for next in pending {
            assert!(next != previous && !next.is_opposite(&previous));
            previous = next;
        }
    }

    #[test]
    fn test_new_five_by_five_layout() {
        let state = create_state(5, 5);
        let body: Vec<Position> = state.snake_positions().collect();
        assert_eq!(body, vec![Position::new(2, 2), Position::new(2, 1), Position::new(2, 0)]);
        assert_eq!(state.head_position(), Position::new(2, 2));
        assert_eq!(state.tail_position(), Position::new(2, 0));
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.grid().count(CellValue::Food), 1);
        assert_eq!(state.grid().count(CellValue::Obstacle), 5);
        assert_eq!(state.grid().count(CellValue::Empty), 25 - 3 - 1 - 5);
        assert_eq!(state.obstacles().len(), 5);
        assert_eq!(state.score(), 0);
        assert!(!state.is_game_over());
        assert_consistent(&state);
    }

    #[test]
    fn test_new_rejects_small_grid() {
        assert_eq!(
            GameState::with_size(4, 2, 1).unwrap_err(),
            GameError::InvalidDimensions { rows: 4, cols: 2 }
        );
        assert!(GameState::with_size(0, 10, 1).is_err());
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = create_state(12, 12);
        let b = create_state(12, 12);
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.food_position(), b.food_position());
    }

    #[test]
    fn test_tiny_board_skips_what_does_not_fit() {
        let state = GameState::with_size(1, 4, 5).unwrap();
        assert_eq!(state.grid().count(CellValue::Food), 1);
        assert_eq!(state.obstacles().len(), 0);
        assert_consistent(&state);

        let full = GameState::with_size(1, 3, 5).unwrap();
        assert_eq!(full.food_position(), None);
        assert_eq!(full.grid().count(CellValue::Food), 0);
        assert!(full.obstacles().is_empty());
    }

    #[test]
    fn test_move_into_empty_shifts_snake() {
        let snake = [Position::new(3, 2), Position::new(3, 1), Position::new(3, 0)];
        let mut state = open_board(8, 8, &snake, Direction::Right);
        state.move_snake();
        let body: Vec<Position> = state.snake_positions().collect();
        assert_eq!(body, vec![Position::new(3, 3), Position::new(3, 2), Position::new(3, 1)]);
        assert_eq!(state.grid().get(Position::new(3, 0)), CellValue::Empty);
        assert_eq!(state.tick(), 1);
        assert_consistent(&state);
    }

    #[test]
    fn test_eating_food_grows_and_scores() {
        let snake = [Position::new(3, 2), Position::new(3, 1), Position::new(3, 0)];
        let mut state = open_board(8, 8, &snake, Direction::Right);
        state.set_food(Position::new(3, 3));

        state.move_snake();

        assert_eq!(state.score(), 1);
        assert_eq!(state.snake_len(), 4);
        assert_eq!(state.head_position(), Position::new(3, 3));
        assert_eq!(state.tail_position(), Position::new(3, 0));
        let food = state.food_position().expect("new food should be placed");
        assert!(!snake.contains(&food));
        assert_ne!(food, Position::new(3, 3));
        assert_eq!(state.grid().count(CellValue::Food), 1);
        assert_consistent(&state);
    }

    #[test]
    fn test_opposite_direction_is_ignored() {
        let mut state = create_state(10, 10);
        state.change_direction(Direction::Left);
        assert!(state.buffered_directions().is_empty());
        assert_eq!(state.direction(), Direction::Right);
    }

    #[test]
    fn test_buffered_turns_apply_one_per_tick() {
        let snake = [Position::new(4, 2), Position::new(4, 1), Position::new(4, 0)];
        let mut state = open_board(10, 10, &snake, Direction::Right);
        state.change_direction(Direction::Up);
        state.change_direction(Direction::Left);
        state.change_direction(Direction::Down);
        assert_eq!(state.buffered_directions(), vec![Direction::Up, Direction::Left]);

        state.move_snake();
        assert_eq!(state.direction(), Direction::Up);
        assert_eq!(state.head_position(), Position::new(3, 2));

        state.move_snake();
        assert_eq!(state.direction(), Direction::Left);
        assert_eq!(state.head_position(), Position::new(3, 1));
        assert!(state.buffered_directions().is_empty());
        assert_consistent(&state);
    }

    #[test]
    fn test_wall_collision_ends_game() {
        let snake = [Position::new(0, 2), Position::new(0, 1), Position::new(0, 0)];
        let mut state = open_board(6, 6, &snake, Direction::Right);
        state.change_direction(Direction::Up);
        state.move_snake();

        assert!(state.is_game_over());
        assert_eq!(state.death_reason(), Some(DeathReason::WallCollision));
        let body: Vec<Position> = state.snake_positions().collect();
        assert_eq!(body, snake.to_vec());
    }

    #[test]
    fn test_move_after_game_over_changes_nothing() {
        let snake = [Position::new(0, 2), Position::new(0, 1), Position::new(0, 0)];
        let mut state = open_board(6, 6, &snake, Direction::Up);
        state.move_snake();
        assert!(state.is_game_over());

        let before = state.snapshot();
        state.change_direction(Direction::Right);
        state.move_snake();
        state.move_snake();
        state.regenerate_obstacles();
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_self_collision_ends_game() {
        let snake = [
            Position::new(2, 2),
            Position::new(2, 3),
            Position::new(3, 3),
            Position::new(3, 2),
            Position::new(3, 1),
        ];
        let mut state = open_board(6, 6, &snake, Direction::Down);
        state.move_snake();
        assert!(state.is_game_over());
        assert_eq!(state.death_reason(), Some(DeathReason::SelfCollision));
    }

    #[test]
    fn test_moving_into_vacating_tail_is_safe() {
        let snake = [
            Position::new(2, 2),
            Position::new(2, 3),
            Position::new(3, 3),
            Position::new(3, 2),
        ];
        let mut state = open_board(6, 6, &snake, Direction::Down);
        state.move_snake();

        assert!(!state.is_game_over());
        let body: Vec<Position> = state.snake_positions().collect();
        assert_eq!(
            body,
            vec![Position::new(3, 2), Position::new(2, 2), Position::new(2, 3), Position::new(3, 3)]
        );
        assert_consistent(&state);
    }

    #[test]
    fn test_obstacle_collision_ends_game() {
        let snake = [Position::new(2, 2), Position::new(2, 1), Position::new(2, 0)];
        let mut state = open_board(6, 6, &snake, Direction::Right);
        let ahead = Position::new(2, 3);
        let elsewhere: Vec<Position> = state
            .grid()
            .empty_positions()
            .into_iter()
            .filter(|&pos| pos != ahead)
            .collect();
        state.obstacles.place(1, &mut state.grid, &mut state.rng, &elsewhere);
        assert_eq!(state.grid().get(ahead), CellValue::Obstacle);

        state.move_snake();
        assert!(state.is_game_over());
        assert_eq!(state.death_reason(), Some(DeathReason::ObstacleCollision));
    }

    #[test]
    fn test_regenerate_replaces_every_obstacle() {
        let mut state = create_state(12, 12);
        let snake_before: Vec<Position> = state.snake_positions().collect();
        let food_before = state.food_position();
        let old: HashSet<Position> = state.obstacles().iter().map(Obstacle::position).collect();
        let empty_before: HashSet<Position> = state.grid().empty_positions().into_iter().collect();

        state.regenerate_obstacles();

        let new: HashSet<Position> = state.obstacles().iter().map(Obstacle::position).collect();
        assert_eq!(new.len(), 5);
        assert!(new.is_disjoint(&old));
        assert!(new.is_subset(&empty_before));
        for pos in &old {
            assert_eq!(state.grid().get(*pos), CellValue::Empty);
        }
        assert_eq!(state.snake_positions().collect::<Vec<_>>(), snake_before);
        assert_eq!(state.food_position(), food_before);
        assert_consistent(&state);
    }

    #[test]
    fn test_random_walk_keeps_invariants() {
        let mut state = create_state(15, 15);
        let mut rng = SessionRng::new(2024);
        for _ in 0..500 {
            if state.is_game_over() {
                break;
            }
            let turn = *rng.choose(&Direction::ALL).expect("four directions");
            state.change_direction(turn);
            let score_before = state.score();
            state.move_snake();
            if state.tick() % 40 == 0 {
                state.regenerate_obstacles();
            }
            assert!(state.score() >= score_before);
            assert_consistent(&state);
        }
    }
}
