//! Snapshot module - read-only view of a game for hosts and logs

use serde_json::{json, Value};

use crate::types::{Cell, Direction, GameOverReason, GameStatus};

/// Read model handed to hosts for re-rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub columns: u16,
    pub rows: u16,
    /// Head-first body segments.
    pub body: Vec<Cell>,
    pub food: Option<Cell>,
    pub direction: Direction,
    pub score: u32,
    pub steps: u32,
    pub status: GameStatus,
    pub game_over_reason: Option<GameOverReason>,
}

impl GameSnapshot {
    pub fn head(&self) -> Option<Cell> {
        self.body.first().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// JSON view with camelCase enum names, for logging and external hosts.
    pub fn to_json(&self) -> Value {
        let cell = |c: Cell| json!([c.column, c.row]);
        json!({
            "board": { "columns": self.columns, "rows": self.rows },
            "snake": self.body.iter().copied().map(cell).collect::<Vec<_>>(),
            "food": self.food.map(cell),
            "direction": self.direction.as_str(),
            "score": self.score,
            "steps": self.steps,
            "status": self.status.as_str(),
            "gameOverReason": self.game_over_reason.map(|r| r.as_str()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json_shape() {
        let snap = GameSnapshot {
            columns: 5,
            rows: 4,
            body: vec![Cell::new(2, 1), Cell::new(1, 1)],
            food: Some(Cell::new(4, 3)),
            direction: Direction::Right,
            score: 3,
            steps: 12,
            status: GameStatus::GameOver,
            game_over_reason: Some(GameOverReason::Wall),
        };

        let v = snap.to_json();
        assert_eq!(v["board"]["columns"], 5);
        assert_eq!(v["snake"][0], json!([2, 1]));
        assert_eq!(v["food"], json!([4, 3]));
        assert_eq!(v["status"], "gameOver");
        assert_eq!(v["gameOverReason"], "wall");
        assert!(!snap.playable());
        assert_eq!(snap.head(), Some(Cell::new(2, 1)));
    }
}
