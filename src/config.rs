use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use thiserror::Error;

/// Logical grid dimensions, outer wall ring included.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

/// Default board: a 40x20 grid whose outermost ring is wall.
pub const DEFAULT_GRID: GridSize = GridSize {
    width: 40,
    height: 20,
};

/// Number of food slots kept on the board.
pub const MAX_FOOD: usize = 8;

/// Upper bound on obstacles, including the ones added at level-ups.
pub const MAX_OBSTACLES: usize = 15;

/// Segment count of a freshly spawned snake.
pub const INITIAL_LENGTH: usize = 4;

/// Segments reserved up front for the snake body buffer.
pub const INITIAL_BODY_CAPACITY: usize = 100;

/// Lives never exceed this, even with bonus food.
pub const MAX_LIVES: u8 = 5;

/// One spawn in this many is bonus food.
pub const BONUS_FOOD_CHANCE: u32 = 20;

/// Bonus food lifetime in ticks.
pub const BONUS_FOOD_LIFETIME_TICKS: u16 = 30;

pub const NORMAL_FOOD_POINTS: u32 = 10;
pub const BONUS_FOOD_POINTS: u32 = 30;

/// Score needed per level, multiplied by the current level.
pub const POINTS_PER_LEVEL: u32 = 100;

/// Base tick interval in microseconds.
pub const INITIAL_SPEED_US: u64 = 100_000;

/// Fastest allowed tick interval in microseconds.
pub const MIN_SPEED_US: u64 = 50_000;

/// Tick interval reduction per level-up.
pub const SPEED_INCREMENT_US: u64 = 5_000;

/// Tick interval offset between neighbouring difficulty tiers.
pub const DIFFICULTY_SPEED_OFFSET_US: u64 = 20_000;

/// Obstacles placed at game start per difficulty tier.
pub const OBSTACLES_PER_TIER: usize = 5;

/// Minimum Chebyshev distance kept between a new obstacle and the snake.
pub const OBSTACLE_SNAKE_CLEARANCE: i32 = 2;

/// Rejection-sampling attempts before a placement is abandoned.
pub const MAX_SPAWN_ATTEMPTS: u32 = 10_000;

/// Difficulty tier chosen from the start menu.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Per-tier starting parameters.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DifficultySettings {
    pub speed_us: u64,
    pub lives: u8,
    pub initial_obstacles: usize,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Tier number, 1 for Easy through 3 for Hard.
    #[must_use]
    pub fn tier(self) -> usize {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    #[must_use]
    pub fn settings(self) -> DifficultySettings {
        match self {
            Self::Easy => DifficultySettings {
                speed_us: INITIAL_SPEED_US + DIFFICULTY_SPEED_OFFSET_US,
                lives: 5,
                initial_obstacles: 0,
            },
            Self::Medium => DifficultySettings {
                speed_us: INITIAL_SPEED_US,
                lives: 3,
                initial_obstacles: self.obstacle_budget(),
            },
            Self::Hard => DifficultySettings {
                speed_us: INITIAL_SPEED_US - DIFFICULTY_SPEED_OFFSET_US,
                lives: 2,
                initial_obstacles: self.obstacle_budget(),
            },
        }
    }

    /// Returns true when level-ups may add obstacles.
    #[must_use]
    pub fn grows_obstacles(self) -> bool {
        self != Self::Easy
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    fn obstacle_budget(self) -> usize {
        (self.tier() * OBSTACLES_PER_TIER).min(MAX_OBSTACLES)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Error, Eq, PartialEq)]
#[error("unknown difficulty '{0}', expected easy, medium or hard")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" | "1" => Ok(Self::Easy),
            "medium" | "2" => Ok(Self::Medium),
            "hard" | "3" => Ok(Self::Hard),
            _ => Err(ParseDifficultyError(raw.to_owned())),
        }
    }
}

/// Colors applied to board entities and UI text.
#[derive(Debug)]
pub struct Palette {
    pub snake: Color,
    pub food: Color,
    pub bonus_food: Color,
    pub wall: Color,
    pub obstacle: Color,
    pub stats: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

pub const PALETTE: Palette = Palette {
    snake: Color::Green,
    food: Color::Red,
    bonus_food: Color::Yellow,
    wall: Color::White,
    obstacle: Color::Magenta,
    stats: Color::Blue,
    menu_title: Color::Cyan,
    menu_footer: Color::DarkGray,
};

/// Glyphs for each kind of board cell.
#[derive(Debug, Clone, Copy)]
pub struct GlyphSet {
    pub snake_head: &'static str,
    pub snake_body: &'static str,
    pub food: &'static str,
    pub bonus_food: &'static str,
    pub wall: &'static str,
    pub obstacle: &'static str,
    pub empty: &'static str,
}

pub const EMOJI_GLYPHS: GlyphSet = GlyphSet {
    snake_head: "🐍",
    snake_body: "🐍",
    food: "🍎",
    bonus_food: "🍏",
    wall: "🧱",
    obstacle: "🌵",
    empty: "⬜",
};

pub const ASCII_GLYPHS: GlyphSet = GlyphSet {
    snake_head: "@",
    snake_body: "o",
    food: "*",
    bonus_food: "$",
    wall: "#",
    obstacle: "X",
    empty: " ",
};
