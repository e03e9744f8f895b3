use crate::config::{BONUS_FOOD_LIFETIME_TICKS, BONUS_FOOD_POINTS, NORMAL_FOOD_POINTS};
use crate::grid::Position;

/// Food type and associated metadata.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FoodKind {
    Normal,
    Bonus { ttl_ticks: u16 },
}

/// Food occupying one slot on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
}

impl Food {
    /// Creates a normal food at `position`.
    #[must_use]
    pub fn normal(position: Position) -> Self {
        Self {
            position,
            kind: FoodKind::Normal,
        }
    }

    /// Creates a bonus food at `position` with a full lifetime.
    #[must_use]
    pub fn bonus(position: Position) -> Self {
        Self {
            position,
            kind: FoodKind::Bonus {
                ttl_ticks: BONUS_FOOD_LIFETIME_TICKS,
            },
        }
    }

    /// Advances bonus food TTL by one tick. Returns `true` if the food has
    /// expired and should be replaced. Has no effect on normal food.
    pub fn tick_ttl(&mut self) -> bool {
        if let FoodKind::Bonus { ref mut ttl_ticks } = self.kind {
            *ttl_ticks = ttl_ticks.saturating_sub(1);
            return *ttl_ticks == 0;
        }
        false
    }

    #[must_use]
    pub fn is_bonus(self) -> bool {
        matches!(self.kind, FoodKind::Bonus { .. })
    }

    /// Returns the score value granted when eaten.
    #[must_use]
    pub fn points(self) -> u32 {
        match self.kind {
            FoodKind::Normal => NORMAL_FOOD_POINTS,
            FoodKind::Bonus { .. } => BONUS_FOOD_POINTS,
        }
    }
}

/// Fixed set of food slots. A slot keeps its index across ticks; an empty
/// slot means its last placement found no free cell.
#[derive(Debug, Clone, Default)]
pub struct FoodSlots {
    slots: Vec<Option<Food>>,
}

impl FoodSlots {
    #[must_use]
    pub fn with_slots(count: usize) -> Self {
        Self {
            slots: vec![None; count],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn get(&self, slot: usize) -> Option<Food> {
        self.slots.get(slot).copied().flatten()
    }

    /// Replaces the content of `slot`. Out-of-range slots are ignored.
    pub fn set(&mut self, slot: usize, food: Option<Food>) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = food;
        }
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|entry| *entry = None);
    }

    /// First slot, by index, whose food sits on `position`.
    #[must_use]
    pub fn slot_at(&self, position: Position) -> Option<usize> {
        self.slots
            .iter()
            .position(|entry| entry.is_some_and(|food| food.position == position))
    }

    /// Returns true if a food other than the one in `except` sits on `position`.
    #[must_use]
    pub fn occupies_except(&self, position: Position, except: Option<usize>) -> bool {
        self.slots.iter().enumerate().any(|(index, entry)| {
            Some(index) != except && entry.is_some_and(|food| food.position == position)
        })
    }

    /// Ages every bonus food by one tick and returns the slots that expired.
    pub fn age_bonus_food(&mut self) -> Vec<usize> {
        let mut expired = Vec::new();
        for (index, entry) in self.slots.iter_mut().enumerate() {
            if let Some(food) = entry
                && food.tick_ttl()
            {
                expired.push(index);
            }
        }
        expired
    }

    /// Iterates over occupied slots as `(slot, food)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Food)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| entry.map(|food| (index, food)))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::BONUS_FOOD_LIFETIME_TICKS;
    use crate::grid::Position;

    use super::{Food, FoodKind, FoodSlots};

    #[test]
    fn bonus_food_ttl_decrements_and_expires() {
        let mut food = Food::bonus(Position::new(1, 1));

        for _ in 0..BONUS_FOOD_LIFETIME_TICKS - 1 {
            assert!(!food.tick_ttl());
        }

        assert!(food.tick_ttl());
    }

    #[test]
    fn normal_food_ttl_never_expires() {
        let mut food = Food::normal(Position::new(1, 1));
        for _ in 0..200 {
            assert!(!food.tick_ttl());
        }
    }

    #[test]
    fn bonus_food_is_worth_more() {
        let normal = Food::normal(Position::new(1, 1));
        let bonus = Food::bonus(Position::new(2, 2));

        assert_eq!(normal.points(), 10);
        assert_eq!(bonus.points(), 30);
        assert!(bonus.is_bonus());
        assert_eq!(
            bonus.kind,
            FoodKind::Bonus {
                ttl_ticks: BONUS_FOOD_LIFETIME_TICKS
            }
        );
    }

    #[test]
    fn slot_lookup_prefers_lowest_index() {
        let mut slots = FoodSlots::with_slots(3);
        slots.set(2, Some(Food::normal(Position::new(4, 4))));
        slots.set(1, Some(Food::bonus(Position::new(4, 4))));

        assert_eq!(slots.slot_at(Position::new(4, 4)), Some(1));
        assert!(slots.occupies_except(Position::new(4, 4), Some(1)));
        assert!(!slots.occupies_except(Position::new(5, 5), None));
    }

    #[test]
    fn aging_reports_only_expired_bonus_slots() {
        let mut slots = FoodSlots::with_slots(2);
        slots.set(0, Some(Food::normal(Position::new(3, 3))));
        slots.set(
            1,
            Some(Food {
                position: Position::new(6, 6),
                kind: FoodKind::Bonus { ttl_ticks: 2 },
            }),
        );

        assert!(slots.age_bonus_food().is_empty());
        assert_eq!(slots.age_bonus_food(), vec![1]);
    }
}
