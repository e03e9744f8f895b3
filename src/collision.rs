use log::{debug, info};

use crate::config::{MAX_LIVES, MIN_SPEED_US, POINTS_PER_LEVEL, SPEED_INCREMENT_US};
use crate::error::GameError;
use crate::food::Food;
use crate::game::GameSession;
use crate::spawner::scatter_position;

/// What the head ran into.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CollisionCause {
    Obstacle,
    SelfBite,
}

/// Result of resolving one tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    None,
    /// A life was lost and the snake respawned.
    LifeLost(CollisionCause),
    /// The last life was lost. The snake is left where it died.
    GameOver(CollisionCause),
    Ate {
        slot: usize,
        points: u32,
        leveled_up: bool,
    },
}

impl Collision {
    /// Returns true when the session must end.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver(_))
    }
}

/// Checks the freshly moved head against obstacles, the body, then food,
/// in that order, and applies the consequences.
///
/// A lost life skips the food check. At most one food is eaten per tick.
pub fn resolve_collisions(session: &mut GameSession) -> Result<Collision, GameError> {
    let head = session.snake.head();

    let cause = if session.obstacles.contains(head) {
        Some(CollisionCause::Obstacle)
    } else if session.snake.head_overlaps_body() {
        Some(CollisionCause::SelfBite)
    } else {
        None
    };

    if let Some(cause) = cause {
        return Ok(lose_life(session, cause));
    }

    let Some(slot) = session.foods.slot_at(head) else {
        return Ok(Collision::None);
    };
    let Some(food) = session.foods.get(slot) else {
        return Ok(Collision::None);
    };

    eat(session, slot, food)
}

fn lose_life(session: &mut GameSession, cause: CollisionCause) -> Collision {
    session.snake.lives = session.snake.lives.saturating_sub(1);

    if session.snake.lives == 0 {
        info!("{cause:?} collision took the last life");
        return Collision::GameOver(cause);
    }

    info!(
        "{cause:?} collision, {} lives left; respawning snake",
        session.snake.lives
    );
    let bounds = session.bounds();
    session.snake.respawn(bounds);
    Collision::LifeLost(cause)
}

fn eat(session: &mut GameSession, slot: usize, food: Food) -> Result<Collision, GameError> {
    let points = food.points();
    session.stats.score += points;
    if food.is_bonus() && session.snake.lives < MAX_LIVES {
        session.snake.lives += 1;
    }

    session.snake.grow()?;
    session.respawn_food_slot(slot);
    debug!(
        "ate food in slot {slot} for {points} points, score {}",
        session.stats.score
    );

    let leveled_up = session.stats.score >= session.stats.level * POINTS_PER_LEVEL;
    if leveled_up {
        level_up(session);
    }

    Ok(Collision::Ate {
        slot,
        points,
        leveled_up,
    })
}

fn level_up(session: &mut GameSession) {
    session.stats.level += 1;

    let speed = &mut session.snake.speed_us;
    if *speed > MIN_SPEED_US {
        *speed = speed.saturating_sub(SPEED_INCREMENT_US).max(MIN_SPEED_US);
    }

    if session.stats.difficulty.grows_obstacles() && !session.obstacles.is_full() {
        let bounds = session.bounds();
        let position = scatter_position(&mut session.rng, bounds);
        session.obstacles.push(position);
    }

    info!(
        "reached level {} at score {}, tick interval {}us, {} obstacles",
        session.stats.level,
        session.stats.score,
        session.snake.speed_us,
        session.obstacles.len()
    );
}

#[cfg(test)]
mod tests {
    use crate::config::{DEFAULT_GRID, Difficulty, INITIAL_LENGTH, MIN_SPEED_US};
    use crate::food::Food;
    use crate::grid::Position;
    use crate::input::Direction;
    use crate::snake::Snake;
    use crate::game::GameSession;

    use super::{Collision, CollisionCause, resolve_collisions};

    fn quiet_session(difficulty: Difficulty) -> GameSession {
        let mut session = GameSession::new_with_seed(DEFAULT_GRID, 17);
        session.start(difficulty);
        session.obstacles.clear();
        session.foods.clear();
        session
    }

    #[test]
    fn obstacle_takes_precedence_over_food() {
        let mut session = quiet_session(Difficulty::Medium);
        let head = session.snake.head();
        session.obstacles.push(head);
        session.foods.set(0, Some(Food::normal(head)));

        let outcome = resolve_collisions(&mut session).expect("no allocation failure");

        assert_eq!(outcome, Collision::LifeLost(CollisionCause::Obstacle));
        assert_eq!(session.stats.score, 0);
        assert_eq!(session.snake.lives, 2);
    }

    #[test]
    fn self_bite_respawns_snake_and_keeps_score() {
        let mut session = quiet_session(Difficulty::Medium);
        session.stats.score = 40;
        session.snake = Snake::from_segments(
            vec![
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(6, 6),
                Position::new(6, 5),
                Position::new(5, 5),
            ],
            Direction::Up,
        );
        session.snake.lives = 3;
        session.snake.speed_us = 90_000;

        let outcome = resolve_collisions(&mut session).expect("no allocation failure");

        assert_eq!(outcome, Collision::LifeLost(CollisionCause::SelfBite));
        assert_eq!(session.snake.lives, 2);
        assert_eq!(session.snake.len(), INITIAL_LENGTH);
        assert_eq!(session.snake.speed_us, 90_000);
        assert_eq!((session.stats.score, session.stats.level), (40, 1));
    }

    #[test]
    fn last_life_freezes_snake() {
        let mut session = quiet_session(Difficulty::Hard);
        session.snake.lives = 1;
        let head = session.snake.head();
        session.obstacles.push(head);
        let before: Vec<_> = session.snake.segments().copied().collect();

        let outcome = resolve_collisions(&mut session).expect("no allocation failure");

        assert!(outcome.is_terminal());
        assert_eq!(session.snake.lives, 0);
        assert_eq!(session.snake.segments().copied().collect::<Vec<_>>(), before);
    }

    #[test]
    fn only_first_matching_slot_is_eaten() {
        let mut session = quiet_session(Difficulty::Easy);
        let head = session.snake.head();
        session.foods.set(3, Some(Food::normal(head)));
        session.foods.set(5, Some(Food::normal(head)));

        let outcome = resolve_collisions(&mut session).expect("no allocation failure");

        assert_eq!(
            outcome,
            Collision::Ate {
                slot: 3,
                points: 10,
                leveled_up: false
            }
        );
        assert_eq!(session.stats.score, 10);
        assert_eq!(session.foods.get(5).map(|food| food.position), Some(head));
    }

    #[test]
    fn bonus_food_grants_a_life_up_to_the_cap() {
        let mut session = quiet_session(Difficulty::Medium);
        let head = session.snake.head();
        session.foods.set(0, Some(Food::bonus(head)));

        resolve_collisions(&mut session).expect("no allocation failure");
        assert_eq!((session.stats.score, session.snake.lives), (30, 4));

        session.snake.lives = 5;
        session.foods.set(1, Some(Food::bonus(head)));
        resolve_collisions(&mut session).expect("no allocation failure");
        assert_eq!(session.snake.lives, 5);
    }

    #[test]
    fn level_up_speed_never_drops_below_floor() {
        let mut session = quiet_session(Difficulty::Hard);
        session.snake.speed_us = MIN_SPEED_US;
        session.stats.score = 90;
        let head = session.snake.head();
        session.foods.set(0, Some(Food::normal(head)));

        let outcome = resolve_collisions(&mut session).expect("no allocation failure");

        assert!(matches!(outcome, Collision::Ate { leveled_up: true, .. }));
        assert_eq!(session.stats.level, 2);
        assert_eq!(session.snake.speed_us, MIN_SPEED_US);
    }

    #[test]
    fn easy_level_up_adds_no_obstacles() {
        let mut session = quiet_session(Difficulty::Easy);
        session.stats.score = 95;
        let head = session.snake.head();
        session.foods.set(0, Some(Food::normal(head)));

        resolve_collisions(&mut session).expect("no allocation failure");

        assert_eq!(session.stats.level, 2);
        assert!(session.obstacles.is_empty());
    }
}
