use crate::config::{GridSize, INITIAL_BODY_CAPACITY, INITIAL_LENGTH};
use crate::error::GameError;
use crate::grid::Position;
use crate::input::Direction;

/// Mutable snake state: body, heading and pacing.
///
/// The body buffer starts at [`INITIAL_BODY_CAPACITY`] and doubles whenever
/// growth would overflow it, so growth is amortized O(1). It never shrinks.
#[derive(Debug, Clone)]
pub struct Snake {
    body: Vec<Position>,
    direction: Direction,
    next_direction: Direction,
    /// Tick interval in microseconds.
    pub speed_us: u64,
    pub lives: u8,
}

impl Snake {
    /// Creates the starting snake: head at a quarter of the width, middle
    /// row, body trailing to the left, heading right.
    #[must_use]
    pub fn spawn(bounds: GridSize, speed_us: u64, lives: u8) -> Self {
        let mut snake = Self::from_segments(Vec::new(), Direction::Right);
        snake.speed_us = speed_us;
        snake.lives = lives;
        snake.respawn(bounds);
        snake
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        let mut body = Vec::with_capacity(INITIAL_BODY_CAPACITY.max(segments.len()));
        body.extend(segments);

        Self {
            body,
            direction,
            next_direction: direction,
            speed_us: 0,
            lives: 0,
        }
    }

    /// Puts the body back to its starting layout, keeping speed and lives.
    pub fn respawn(&mut self, bounds: GridSize) {
        let head = initial_head(bounds);
        self.body.clear();
        self.body
            .extend((0..INITIAL_LENGTH as i32).map(|offset| Position::new(head.x - offset, head.y)));
        self.direction = Direction::Right;
        self.next_direction = Direction::Right;
    }

    /// Buffers a heading for the next tick, rejecting 180° turns.
    pub fn buffer_direction(&mut self, direction: Direction) {
        if direction == self.direction.opposite() {
            return;
        }
        self.next_direction = direction;
    }

    /// Applies the buffered heading and moves one cell, wrapping over the
    /// interior. Each segment takes its predecessor's previous cell.
    pub fn advance(&mut self, bounds: GridSize) {
        self.direction = self.next_direction;
        let next_head = self.head().step(self.direction).wrapped_interior(bounds);

        let len = self.body.len();
        if len > 1 {
            self.body.copy_within(0..len - 1, 1);
        }
        if let Some(head) = self.body.first_mut() {
            *head = next_head;
        }
    }

    /// Appends a segment duplicating the tail; the next shift separates it.
    pub fn grow(&mut self) -> Result<(), GameError> {
        let Some(&tail) = self.body.last() else {
            return Ok(());
        };

        if self.body.len() == self.body.capacity() {
            let additional = self.body.capacity().max(1);
            self.body
                .try_reserve_exact(additional)
                .map_err(|_| GameError::ResourceExhaustion {
                    requested: self.body.len() + additional,
                })?;
        }

        self.body.push(tail);
        Ok(())
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body.first().copied().unwrap_or(Position::new(0, 0))
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Reserved segment slots in the body buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.body.capacity()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

fn initial_head(bounds: GridSize) -> Position {
    Position::new(i32::from(bounds.width / 4), i32::from(bounds.height / 2))
}
