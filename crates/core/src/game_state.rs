//! Game state module - the deterministic single-step machine
//!
//! Ties together the board, the snake, food placement and scoring. One call to
//! [`GameState::step`] is one tick: adopt the buffered turn, move the head, resolve
//! walls, self collisions and food, and report what the host needs to know.

use arrayvec::ArrayVec;

use crate::board::BoardSize;
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::rng::FoodSpawner;
use crate::snake::Snake;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Host-facing notification produced by a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    ScoreChanged { score: u32 },
    GameOver { reason: GameOverReason, score: u32 },
}

/// What a single step did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not running (paused or already over); nothing changed.
    Idle,
    Moved,
    Grew,
    GameOver(GameOverReason),
}

/// Result of [`GameState::step`].
///
/// At most two events per step: a score change followed by a board-full game over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    pub outcome: StepOutcome,
    pub events: ArrayVec<StepEvent, 2>,
}

impl StepResult {
    fn idle() -> Self {
        Self {
            outcome: StepOutcome::Idle,
            events: ArrayVec::new(),
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: BoardSize,
    snake: Snake,
    /// `None` only once the snake covers the whole board.
    food: Option<Cell>,
    spawner: FoodSpawner,
    food_reward: u32,
    score: u32,
    steps: u32,
    status: GameStatus,
    game_over_reason: Option<GameOverReason>,
}

impl GameState {
    /// Start a game on `board`: the snake spawns at the centre heading right and
    /// the first food is placed with the configured seed.
    pub fn new(config: &GameConfig, board: BoardSize) -> Result<Self, ConfigError> {
        config.validate(board)?;

        let snake = Snake::spawn(board, board.center(), Direction::Right, config.initial_length)?;
        let mut spawner = FoodSpawner::new(config.seed);
        let food = spawner.place(&snake);

        Ok(Self {
            board,
            snake,
            food,
            spawner,
            food_reward: config.food_reward,
            score: 0,
            steps: 0,
            status: GameStatus::Running,
            game_over_reason: None,
        })
    }

    /// Start from an explicit layout: head-first `body`, heading and food cell.
    ///
    /// Later food cells still come from `config.seed`.
    pub fn with_layout(
        config: &GameConfig,
        board: BoardSize,
        body: impl IntoIterator<Item = Cell>,
        direction: Direction,
        food: Cell,
    ) -> Result<Self, ConfigError> {
        if config.food_reward == 0 {
            return Err(ConfigError::ZeroFoodReward);
        }
        let snake = Snake::from_body(board, body, direction)?;
        if !board.contains(food.column as i32, food.row as i32) {
            return Err(ConfigError::InvalidSnake("food outside the board"));
        }
        if snake.occupies(food) {
            return Err(ConfigError::FoodOnSnake(food));
        }

        Ok(Self {
            board,
            snake,
            food: Some(food),
            spawner: FoodSpawner::new(config.seed),
            food_reward: config.food_reward,
            score: 0,
            steps: 0,
            status: GameStatus::Running,
            game_over_reason: None,
        })
    }

    pub fn board(&self) -> BoardSize {
        self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    /// Host lost the foreground. Only a running game pauses.
    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        self.status = GameStatus::Paused;
        true
    }

    /// Host is back in the foreground. Only a paused game resumes.
    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.status = GameStatus::Running;
        true
    }

    /// Whether `intent` would be adopted as the new heading.
    pub fn accepts_turn(&self, intent: Direction) -> bool {
        !intent.is_opposite(self.snake.direction())
    }

    /// Advance one tick.
    ///
    /// `intent` is the buffered turn taken from the input slot; it is ignored when it
    /// points straight back into the neck. Does nothing unless the game is running.
    pub fn step(&mut self, intent: Option<Direction>) -> StepResult {
        if self.status != GameStatus::Running {
            return StepResult::idle();
        }

        if let Some(direction) = intent {
            if self.accepts_turn(direction) {
                self.snake.set_direction(direction);
            }
        }

        self.steps = self.steps.wrapping_add(1);

        let (column, row) = self.snake.head().neighbor(self.snake.direction());
        let Some(head) = self.board.cell_at(column, row) else {
            return self.end(GameOverReason::Wall, ArrayVec::new());
        };

        let grows = self.food == Some(head);
        // The tail moves out of the way this tick unless the snake grows.
        let vacated = !grows && head == self.snake.tail();
        if self.snake.occupies(head) && !vacated {
            return self.end(GameOverReason::SelfCollision, ArrayVec::new());
        }

        self.snake.advance(head, grows);
        if !grows {
            return StepResult {
                outcome: StepOutcome::Moved,
                events: ArrayVec::new(),
            };
        }

        self.score = self.score.saturating_add(self.food_reward);
        let mut events = ArrayVec::new();
        events.push(StepEvent::ScoreChanged { score: self.score });

        self.food = self.spawner.place(&self.snake);
        if self.food.is_none() {
            return self.end(GameOverReason::BoardFull, events);
        }

        StepResult {
            outcome: StepOutcome::Grew,
            events,
        }
    }

    fn end(&mut self, reason: GameOverReason, mut events: ArrayVec<StepEvent, 2>) -> StepResult {
        self.status = GameStatus::GameOver;
        self.game_over_reason = Some(reason);
        events.push(StepEvent::GameOver {
            reason,
            score: self.score,
        });
        StepResult {
            outcome: StepOutcome::GameOver(reason),
            events,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            columns: self.board.columns(),
            rows: self.board.rows(),
            body: self.snake.cells().collect(),
            food: self.food,
            direction: self.snake.direction(),
            score: self.score,
            steps: self.steps,
            status: self.status,
            game_over_reason: self.game_over_reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig {
            food_reward: 10,
            ..GameConfig::new(5, 5)
        }
    }

    fn board(columns: u16, rows: u16) -> BoardSize {
        BoardSize::new(columns, rows).unwrap()
    }

    fn game(body: &[(u16, u16)], direction: Direction, food: (u16, u16)) -> GameState {
        GameState::with_layout(
            &config(),
            board(5, 5),
            body.iter().map(|&c| Cell::from(c)),
            direction,
            food.into(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(&GameConfig::new(10, 8), board(10, 8)).unwrap();

        assert_eq!(state.status(), GameStatus::Running);
        assert_eq!(state.score(), 0);
        assert_eq!(state.steps(), 0);
        assert_eq!(state.snake().len(), 3);
        assert_eq!(state.snake().head(), Cell::new(4, 3));
        assert_eq!(state.direction(), Direction::Right);

        let food = state.food().unwrap();
        assert!(!state.snake().occupies(food));
    }

    #[test]
    fn test_new_rejects_oversized_snake() {
        let config = GameConfig {
            initial_length: 9,
            ..GameConfig::new(6, 6)
        };
        assert!(matches!(
            GameState::new(&config, board(6, 6)),
            Err(ConfigError::InitialLengthOutOfRange { .. })
        ));
    }

    #[test]
    fn test_with_layout_rejects_food_on_snake() {
        let err = GameState::with_layout(
            &config(),
            board(5, 5),
            [Cell::new(2, 2)],
            Direction::Right,
            Cell::new(2, 2),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::FoodOnSnake(Cell::new(2, 2)));
    }

    #[test]
    fn test_normal_move_keeps_length() {
        let mut state = game(&[(2, 2), (1, 2)], Direction::Right, (0, 0));
        let result = state.step(None);

        assert_eq!(result.outcome, StepOutcome::Moved);
        assert!(result.events.is_empty());
        assert_eq!(state.snake().head(), Cell::new(3, 2));
        assert_eq!(state.snake().tail(), Cell::new(2, 2));
        assert_eq!(state.snake().len(), 2);
        assert_eq!(state.steps(), 1);
    }

    #[test]
    fn test_turn_is_adopted() {
        let mut state = game(&[(2, 2)], Direction::Right, (0, 0));
        state.step(Some(Direction::Down));
        assert_eq!(state.direction(), Direction::Down);
        assert_eq!(state.snake().head(), Cell::new(2, 3));
    }

    #[test]
    fn test_opposite_turn_is_ignored() {
        let mut state = game(&[(2, 2), (1, 2)], Direction::Right, (0, 0));
        assert!(!state.accepts_turn(Direction::Left));

        let result = state.step(Some(Direction::Left));
        assert_eq!(result.outcome, StepOutcome::Moved);
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.snake().head(), Cell::new(3, 2));
    }

    #[test]
    fn test_wall_collision_is_terminal() {
        let mut state = game(&[(4, 2), (3, 2)], Direction::Right, (0, 0));
        let before = state.snake().clone();

        let result = state.step(None);
        assert_eq!(result.outcome, StepOutcome::GameOver(GameOverReason::Wall));
        assert_eq!(
            result.events.as_slice(),
            &[StepEvent::GameOver {
                reason: GameOverReason::Wall,
                score: 0
            }]
        );
        assert_eq!(state.status(), GameStatus::GameOver);
        assert_eq!(state.game_over_reason(), Some(GameOverReason::Wall));
        // Body untouched by the fatal step.
        assert_eq!(state.snake(), &before);

        // Terminal: later steps are no-ops without events.
        let again = state.step(Some(Direction::Up));
        assert_eq!(again.outcome, StepOutcome::Idle);
        assert!(again.events.is_empty());
        assert_eq!(state.snake(), &before);
    }

    #[test]
    fn test_wall_collision_top_edge() {
        let mut state = game(&[(0, 0)], Direction::Up, (4, 4));
        assert_eq!(
            state.step(None).outcome,
            StepOutcome::GameOver(GameOverReason::Wall)
        );
    }

    #[test]
    fn test_self_collision() {
        // Head at (2,2) heading down into a loop:
        // (2,2) (2,1) (3,1) (3,2) (3,3) (2,3) (1,3)
        let mut state = game(
            &[(2, 2), (2, 1), (3, 1), (3, 2), (3, 3), (2, 3), (1, 3)],
            Direction::Down,
            (0, 0),
        );
        let result = state.step(None);
        assert_eq!(
            result.outcome,
            StepOutcome::GameOver(GameOverReason::SelfCollision)
        );
        assert_eq!(state.snake().len(), 7);
        assert_eq!(state.snake().head(), Cell::new(2, 2));
    }

    #[test]
    fn test_moving_into_vacating_tail_is_allowed() {
        // A 2x2 loop: head chases its own tail.
        let mut state = game(&[(1, 1), (2, 1), (2, 2), (1, 2)], Direction::Down, (4, 4));
        let result = state.step(None);
        assert_eq!(result.outcome, StepOutcome::Moved);
        assert_eq!(state.snake().head(), Cell::new(1, 2));
        assert_eq!(state.snake().len(), 4);
    }

    #[test]
    fn test_growth() {
        let mut state = game(&[(2, 2), (1, 2)], Direction::Right, (3, 2));
        let result = state.step(None);

        assert_eq!(result.outcome, StepOutcome::Grew);
        assert_eq!(
            result.events.as_slice(),
            &[StepEvent::ScoreChanged { score: 10 }]
        );
        assert_eq!(state.snake().len(), 3);
        assert_eq!(state.snake().head(), Cell::new(3, 2));
        assert_eq!(state.snake().tail(), Cell::new(1, 2));
        assert_eq!(state.score(), 10);

        let food = state.food().unwrap();
        assert_ne!(food, Cell::new(3, 2));
        assert!(!state.snake().occupies(food));
    }

    #[test]
    fn test_board_full_ends_game_after_score() {
        // Snake covers every cell of a 4x4 board except the food at (0,0).
        let mut body: Vec<Cell> = Vec::new();
        for row in 0..4u16 {
            let cols: Vec<u16> = if row % 2 == 0 {
                (0..4).collect()
            } else {
                (0..4).rev().collect()
            };
            for column in cols {
                body.push(Cell::new(column, row));
            }
        }
        // Row-serpentine from (0,0); make (1,0) the head heading left onto (0,0).
        body.remove(0);
        let mut state = GameState::with_layout(
            &config(),
            board(4, 4),
            body,
            Direction::Left,
            Cell::new(0, 0),
        )
        .unwrap();

        let result = state.step(None);
        assert_eq!(
            result.outcome,
            StepOutcome::GameOver(GameOverReason::BoardFull)
        );
        assert_eq!(
            result.events.as_slice(),
            &[
                StepEvent::ScoreChanged { score: 10 },
                StepEvent::GameOver {
                    reason: GameOverReason::BoardFull,
                    score: 10
                }
            ]
        );
        assert_eq!(state.snake().len(), 16);
        assert_eq!(state.food(), None);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut state = game(&[(2, 2)], Direction::Right, (0, 0));
        assert!(!state.resume());
        assert!(state.pause());
        assert!(!state.pause());
        assert_eq!(state.status(), GameStatus::Paused);

        assert_eq!(state.step(None).outcome, StepOutcome::Idle);
        assert_eq!(state.snake().head(), Cell::new(2, 2));

        assert!(state.resume());
        assert_eq!(state.step(None).outcome, StepOutcome::Moved);
    }

    #[test]
    fn test_game_over_cannot_pause_or_resume() {
        let mut state = game(&[(4, 4)], Direction::Down, (0, 0));
        state.step(None);
        assert!(state.game_over());
        assert!(!state.pause());
        assert!(!state.resume());
        assert_eq!(state.status(), GameStatus::GameOver);
    }

    #[test]
    fn test_snapshot() {
        let state = game(&[(2, 2), (1, 2)], Direction::Right, (4, 0));
        let snap = state.snapshot();
        assert_eq!((snap.columns, snap.rows), (5, 5));
        assert_eq!(snap.body, vec![Cell::new(2, 2), Cell::new(1, 2)]);
        assert_eq!(snap.food, Some(Cell::new(4, 0)));
        assert_eq!(snap.status, GameStatus::Running);
        assert!(snap.playable());
    }
}
