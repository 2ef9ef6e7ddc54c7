use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::food::{FoodEffect, FoodFactory, FoodField, UniformFoodFactory};
use crate::input::GameInput;
use crate::snake::Snake;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Why the last game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Complete mutable game state for one session.
#[derive(Debug)]
pub struct GameState {
    pub snake: Snake,
    pub foods: FoodField,
    pub score: u32,
    pub tick_count: u64,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    rng: StdRng,
}

impl GameState {
    /// Creates a state seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy(), Box::new(UniformFoodFactory))
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(seed: u64) -> Self {
        Self::with_factory(seed, Box::new(UniformFoodFactory))
    }

    /// Creates a deterministic state whose food effects come from `factory`.
    #[must_use]
    pub fn with_factory(seed: u64, factory: Box<dyn FoodFactory>) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed), factory)
    }

    fn from_rng(mut rng: StdRng, factory: Box<dyn FoodFactory>) -> Self {
        let foods = FoodField::initialize(factory, &mut rng);

        Self {
            snake: Snake::new(),
            foods,
            score: 0,
            tick_count: 0,
            status: GameStatus::Running,
            death_reason: None,
            rng,
        }
    }

    /// Advances simulation by one tick evaluated at `now`.
    ///
    /// Returns the effect of the food eaten during this tick, if any.
    pub fn tick(&mut self, now: Instant) -> Option<FoodEffect> {
        if self.status != GameStatus::Running {
            return None;
        }

        self.tick_count += 1;
        self.snake.move_forward(now);

        let eaten = self.foods.check_eaten(self.snake.head());
        if let Some(item) = eaten {
            self.score = item.effect.apply(&mut self.snake, self.score, now);
            self.foods.replace(item, &mut self.rng);
            log::debug!(
                "ate {} food at ({}, {}); score {} length {}",
                item.effect,
                item.position.x,
                item.position.y,
                self.score,
                self.snake.len()
            );
        }

        if self.snake.check_wall_collision() {
            self.end(DeathReason::WallCollision);
        } else if self.snake.check_self_collision() {
            self.end(DeathReason::SelfCollision);
        }

        eaten.map(|item| item.effect)
    }

    /// Applies one external input event. `Exit` is left to the loop.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                if self.status == GameStatus::Running {
                    self.snake.turn(direction);
                }
            }
            GameInput::Restart => {
                if self.status == GameStatus::GameOver {
                    self.restart();
                }
            }
            GameInput::Exit => {}
        }
    }

    /// Starts a fresh game, keeping the random stream and food factory.
    pub fn restart(&mut self) {
        log::info!("restarting after score {}", self.score);

        self.foods.reset(&mut self.rng);
        self.snake = Snake::new();
        self.score = 0;
        self.tick_count = 0;
        self.status = GameStatus::Running;
        self.death_reason = None;
    }

    /// Seconds to wait before the next tick.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.snake.tick_interval()
    }

    /// Lines shown once the game is over; `None` while running.
    #[must_use]
    pub fn game_over_message(&self) -> Option<Vec<String>> {
        if self.status != GameStatus::GameOver {
            return None;
        }

        Some(vec![
            "Game over!".to_owned(),
            format!("Final score: {}", self.score),
            String::new(),
            "Press 'r' to restart".to_owned(),
            "Press 'e' to exit".to_owned(),
        ])
    }

    fn end(&mut self, reason: DeathReason) {
        log::info!(
            "game over after {} ticks: {:?}, final score {}",
            self.tick_count,
            reason,
            self.score
        );
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
