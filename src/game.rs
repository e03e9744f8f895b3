use std::time::Duration;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::collision::{Collision, resolve_collisions};
use crate::config::{Difficulty, GridSize, MAX_FOOD, MAX_OBSTACLES};
use crate::error::GameError;
use crate::food::FoodSlots;
use crate::grid::Position;
use crate::input::Command;
use crate::obstacle::Obstacles;
use crate::snake::Snake;
use crate::spawner::{Occupancy, place_food, place_obstacle};

/// Current high-level session state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SessionStatus {
    Menu,
    Playing,
    Paused,
    GameOver,
    Terminated,
}

/// Score-keeping for the current game plus the session-lifetime best.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameStats {
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub difficulty: Difficulty,
}

/// What occupies a board cell, in draw priority order.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Cell {
    Empty,
    Wall,
    Obstacle,
    Food { bonus: bool },
    SnakeBody,
    SnakeHead,
}

/// Complete mutable state for one process: board, snake, stats and status.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub snake: Snake,
    pub foods: FoodSlots,
    pub obstacles: Obstacles,
    pub stats: GameStats,
    pub tick_count: u64,
    status: SessionStatus,
    bounds: GridSize,
    pub(crate) rng: StdRng,
}

impl GameSession {
    /// Creates a session in the menu, seeded from OS entropy.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, rng: StdRng) -> Self {
        let difficulty = Difficulty::Medium;
        let settings = difficulty.settings();

        Self {
            snake: Snake::spawn(bounds, settings.speed_us, settings.lives),
            foods: FoodSlots::with_slots(MAX_FOOD),
            obstacles: Obstacles::with_cap(MAX_OBSTACLES),
            stats: GameStats {
                score: 0,
                high_score: 0,
                level: 1,
                difficulty,
            },
            tick_count: 0,
            status: SessionStatus::Menu,
            bounds,
            rng,
        }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Sleep between ticks at the current speed.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_micros(self.snake.speed_us)
    }

    /// Starts a fresh game at `difficulty`, keeping the high score.
    pub fn start(&mut self, difficulty: Difficulty) {
        let settings = difficulty.settings();

        self.stats.score = 0;
        self.stats.level = 1;
        self.stats.difficulty = difficulty;
        self.tick_count = 0;
        self.snake = Snake::spawn(self.bounds, settings.speed_us, settings.lives);

        self.obstacles.clear();
        self.foods.clear();
        for slot in 0..self.foods.len() {
            self.respawn_food_slot(slot);
        }
        for _ in 0..settings.initial_obstacles {
            self.spawn_obstacle();
        }

        self.status = SessionStatus::Playing;
        info!(
            "started {difficulty} game: {} lives, {}us ticks, {} obstacles",
            settings.lives,
            settings.speed_us,
            self.obstacles.len()
        );
    }

    /// Restarts with the current difficulty.
    pub fn reset(&mut self) {
        self.start(self.stats.difficulty);
    }

    /// Applies one decoded command according to the current state.
    pub fn apply_command(&mut self, command: Command) {
        match (self.status, command) {
            (_, Command::None) | (SessionStatus::Terminated, _) => {}
            (_, Command::Quit) => {
                info!("quit requested from {:?}", self.status);
                self.status = SessionStatus::Terminated;
            }
            (SessionStatus::Menu, Command::SelectDifficulty(difficulty)) => self.start(difficulty),
            (SessionStatus::Menu, _) => {}
            (SessionStatus::Playing, Command::Direction(direction)) => {
                self.snake.buffer_direction(direction);
            }
            (SessionStatus::Playing, Command::TogglePause) => {
                self.status = SessionStatus::Paused;
            }
            (SessionStatus::Paused, Command::TogglePause) => {
                self.status = SessionStatus::Playing;
            }
            (
                SessionStatus::Playing | SessionStatus::Paused | SessionStatus::GameOver,
                Command::Reset,
            ) => self.reset(),
            _ => {}
        }
    }

    /// Advances the simulation by one tick while playing.
    pub fn tick(&mut self) -> Result<Collision, GameError> {
        if self.status != SessionStatus::Playing {
            return Ok(Collision::None);
        }

        self.tick_count += 1;
        self.snake.advance(self.bounds);

        let outcome = resolve_collisions(self)?;
        if outcome.is_terminal() {
            self.finish();
            return Ok(outcome);
        }

        for slot in self.foods.age_bonus_food() {
            debug!("bonus food in slot {slot} expired");
            self.respawn_food_slot(slot);
        }

        Ok(outcome)
    }

    /// Returns what should be drawn at `position`.
    #[must_use]
    pub fn cell_at(&self, position: Position) -> Cell {
        if self.snake.head() == position {
            return Cell::SnakeHead;
        }
        if self.snake.segments().skip(1).any(|segment| *segment == position) {
            return Cell::SnakeBody;
        }
        if let Some(food) = self.foods.slot_at(position).and_then(|slot| self.foods.get(slot)) {
            return Cell::Food {
                bonus: food.is_bonus(),
            };
        }
        if self.obstacles.contains(position) {
            return Cell::Obstacle;
        }
        if position.is_wall(self.bounds) {
            return Cell::Wall;
        }
        Cell::Empty
    }

    /// Places a fresh food in `slot`, leaving it empty if the board is full.
    pub(crate) fn respawn_food_slot(&mut self, slot: usize) {
        let occupancy = Occupancy {
            snake: &self.snake,
            foods: &self.foods,
            obstacles: &self.obstacles,
        };

        match place_food(&mut self.rng, self.bounds, occupancy, slot) {
            Ok(food) => self.foods.set(slot, Some(food)),
            Err(error) => {
                warn!("skipping food slot {slot}: {error}");
                self.foods.set(slot, None);
            }
        }
    }

    fn spawn_obstacle(&mut self) {
        let occupancy = Occupancy {
            snake: &self.snake,
            foods: &self.foods,
            obstacles: &self.obstacles,
        };

        match place_obstacle(&mut self.rng, self.bounds, occupancy) {
            Ok(position) => {
                self.obstacles.push(position);
            }
            Err(error) => warn!("skipping obstacle: {error}"),
        }
    }

    fn finish(&mut self) {
        self.status = SessionStatus::GameOver;
        if self.stats.score > self.stats.high_score {
            self.stats.high_score = self.stats.score;
        }
        info!(
            "game over: score {}, high score {}, level {}",
            self.stats.score, self.stats.high_score, self.stats.level
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{BONUS_FOOD_LIFETIME_TICKS, DEFAULT_GRID, Difficulty, MAX_FOOD};
    use crate::food::{Food, FoodKind};
    use crate::grid::Position;
    use crate::input::{Command, Direction};

    use super::{Cell, GameSession, SessionStatus};

    fn playing(difficulty: Difficulty) -> GameSession {
        let mut session = GameSession::new_with_seed(DEFAULT_GRID, 21);
        session.apply_command(Command::SelectDifficulty(difficulty));
        session
    }

    #[test]
    fn menu_waits_for_difficulty() {
        let mut session = GameSession::new_with_seed(DEFAULT_GRID, 1);

        session.apply_command(Command::TogglePause);
        session.apply_command(Command::Direction(Direction::Up));
        assert_eq!(session.status(), SessionStatus::Menu);

        session.apply_command(Command::SelectDifficulty(Difficulty::Easy));
        assert_eq!(session.status(), SessionStatus::Playing);
        assert_eq!(session.snake.lives, 5);
        assert!(session.obstacles.is_empty());
        assert_eq!(session.foods.iter().count(), MAX_FOOD);
    }

    #[test]
    fn hard_start_places_obstacles_and_fewer_lives() {
        let session = playing(Difficulty::Hard);

        assert_eq!(session.snake.lives, 2);
        assert_eq!(session.snake.speed_us, 80_000);
        assert_eq!(session.obstacles.len(), 15);
    }

    #[test]
    fn pause_toggles_and_freezes_ticks() {
        let mut session = playing(Difficulty::Medium);
        let head = session.snake.head();

        session.apply_command(Command::TogglePause);
        assert_eq!(session.status(), SessionStatus::Paused);
        session.tick().expect("tick should succeed");
        assert_eq!(session.snake.head(), head);

        session.apply_command(Command::TogglePause);
        assert_eq!(session.status(), SessionStatus::Playing);
    }

    #[test]
    fn quit_terminates_from_pause() {
        let mut session = playing(Difficulty::Medium);
        session.apply_command(Command::TogglePause);

        session.apply_command(Command::Quit);

        assert_eq!(session.status(), SessionStatus::Terminated);
    }

    #[test]
    fn game_over_records_high_score_and_reset_keeps_it() {
        let mut session = playing(Difficulty::Hard);
        session.obstacles.clear();
        session.foods.clear();
        session.stats.score = 70;
        session.snake.lives = 1;
        let ahead = session.snake.head().step(Direction::Right);
        session.obstacles.push(ahead);

        session.tick().expect("tick should succeed");
        assert_eq!(session.status(), SessionStatus::GameOver);
        assert_eq!(session.stats.high_score, 70);

        session.apply_command(Command::Direction(Direction::Up));
        assert_eq!(session.status(), SessionStatus::GameOver);

        session.apply_command(Command::Reset);
        assert_eq!(session.status(), SessionStatus::Playing);
        assert_eq!(session.stats.score, 0);
        assert_eq!(session.stats.level, 1);
        assert_eq!(session.stats.high_score, 70);
        assert_eq!(session.stats.difficulty, Difficulty::Hard);
        assert_eq!(session.snake.lives, 2);
    }

    #[test]
    fn bonus_food_expires_and_moves() {
        let mut session = playing(Difficulty::Easy);
        session.foods.clear();
        let spot = Position::new(30, 3);
        session.foods.set(0, Some(Food::bonus(spot)));

        for _ in 1..BONUS_FOOD_LIFETIME_TICKS {
            session.tick().expect("tick should succeed");
        }
        assert_eq!(
            session.foods.get(0),
            Some(Food {
                position: spot,
                kind: FoodKind::Bonus { ttl_ticks: 1 }
            })
        );

        session.tick().expect("tick should succeed");
        let replacement = session.foods.get(0).expect("slot refilled");
        assert!(matches!(
            replacement.kind,
            FoodKind::Normal
                | FoodKind::Bonus {
                    ttl_ticks: BONUS_FOOD_LIFETIME_TICKS
                }
        ));
    }

    #[test]
    fn cell_view_layers_snake_over_food_over_walls() {
        let mut session = playing(Difficulty::Easy);
        let head = session.snake.head();
        session.foods.set(0, Some(Food::normal(head)));

        assert_eq!(session.cell_at(head), Cell::SnakeHead);
        assert_eq!(session.cell_at(Position::new(9, 10)), Cell::SnakeBody);
        assert_eq!(session.cell_at(Position::new(0, 0)), Cell::Wall);
        assert_eq!(session.cell_at(Position::new(1, 1)), Cell::Empty);
    }
}
