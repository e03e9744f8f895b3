use rand::Rng;

use crate::config::{BONUS_FOOD_CHANCE, GridSize, MAX_SPAWN_ATTEMPTS, OBSTACLE_SNAKE_CLEARANCE};
use crate::error::SpawnError;
use crate::food::{Food, FoodSlots};
use crate::grid::{Position, spawn_range};
use crate::obstacle::Obstacles;
use crate::snake::Snake;

/// Board contents a new placement must stay clear of.
#[derive(Debug, Clone, Copy)]
pub struct Occupancy<'a> {
    pub snake: &'a Snake,
    pub foods: &'a FoodSlots,
    pub obstacles: &'a Obstacles,
}

impl Occupancy<'_> {
    /// Free for food: off the snake, off obstacles, off every other slot.
    #[must_use]
    pub fn accepts_food(&self, position: Position, slot: usize) -> bool {
        !self.snake.occupies(position)
            && !self.obstacles.contains(position)
            && !self.foods.occupies_except(position, Some(slot))
    }

    /// Free for an obstacle: clear of food and obstacles, and further than
    /// the clearance radius from every snake segment.
    #[must_use]
    pub fn accepts_obstacle(&self, position: Position) -> bool {
        !self.obstacles.contains(position)
            && !self.foods.occupies_except(position, None)
            && self
                .snake
                .segments()
                .all(|segment| segment.chebyshev_distance(position) > OBSTACLE_SNAKE_CLEARANCE)
    }
}

/// Picks a bonus or normal food for `slot` at a free cell.
///
/// The bonus roll happens before placement, independently per spawn.
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    occupancy: Occupancy<'_>,
    slot: usize,
) -> Result<Food, SpawnError> {
    let is_bonus = rng.gen_ratio(1, BONUS_FOOD_CHANCE);
    let position = sample_position(rng, bounds, |candidate| {
        occupancy.accepts_food(candidate, slot)
    })?;

    Ok(if is_bonus {
        Food::bonus(position)
    } else {
        Food::normal(position)
    })
}

/// Picks a cell for a starting obstacle.
pub fn place_obstacle<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    occupancy: Occupancy<'_>,
) -> Result<Position, SpawnError> {
    sample_position(rng, bounds, |candidate| occupancy.accepts_obstacle(candidate))
}

/// Picks any spawnable cell without checking what is already there.
///
/// Used for obstacles added at level-up, which may land on occupied cells.
pub fn scatter_position<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Position {
    Position::new(
        rng.gen_range(spawn_range(bounds.width)),
        rng.gen_range(spawn_range(bounds.height)),
    )
}

/// Rejection-samples a spawnable cell satisfying `accept`.
///
/// Gives up after [`MAX_SPAWN_ATTEMPTS`] so a saturated board cannot hang
/// the game loop.
pub fn sample_position<R, F>(rng: &mut R, bounds: GridSize, accept: F) -> Result<Position, SpawnError>
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let candidate = scatter_position(rng, bounds);
        if accept(candidate) {
            return Ok(candidate);
        }
    }

    Err(SpawnError::Saturated {
        attempts: MAX_SPAWN_ATTEMPTS,
    })
}
