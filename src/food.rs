use std::fmt;
use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::config::{
    FOOD_COUNT, FOOD_SPAWN_EXTENT, HIGH_FAT_DURATION_SECS, HIGH_FAT_MIN_SPEED_SECS,
    HIGH_FAT_SPEED_FACTOR, ROYAL_MIN_SPEED_SECS, ROYAL_SPEED_FACTOR,
};
use crate::snake::{Position, Snake};

/// Color tag of a food, resolved by the renderer's theme.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FoodColor {
    Purple,
    Green,
    Yellow,
    Orange,
}

/// What eating a food does to the snake and the score.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FoodEffect {
    /// Costs a point and a segment.
    Poisonous,
    /// One point, one segment.
    Fit,
    /// Three points and segments, but slows the snake for a while.
    HighFat,
    /// Five points and segments, and a lasting speed-up.
    Royal,
}

impl FoodEffect {
    /// Every effect, in a fixed order.
    pub const ALL: [Self; 4] = [Self::Poisonous, Self::Fit, Self::HighFat, Self::Royal];

    #[must_use]
    pub fn color(self) -> FoodColor {
        match self {
            Self::Poisonous => FoodColor::Purple,
            Self::Fit => FoodColor::Green,
            Self::HighFat => FoodColor::Yellow,
            Self::Royal => FoodColor::Orange,
        }
    }

    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::Poisonous => "🟣 Poisonous food: -1 point, -1 segment",
            Self::Fit => "🟢 Fit food: +1 point",
            Self::HighFat => "🟡 High-fat food: +3 points, slower for 5 seconds",
            Self::Royal => "🟠 Royal food: +5 points, faster",
        }
    }

    /// Applies the effect to `snake` at `now` and returns the new score.
    #[must_use]
    pub fn apply(self, snake: &mut Snake, score: u32, now: Instant) -> u32 {
        match self {
            Self::Poisonous => {
                snake.remove_tail_segment();
                score.saturating_sub(1)
            }
            Self::Fit => {
                grow(snake, 1);
                score + 1
            }
            Self::HighFat => {
                grow(snake, 3);
                snake.scale_speed(HIGH_FAT_SPEED_FACTOR, HIGH_FAT_MIN_SPEED_SECS);
                snake.expire_speed_at(now + Duration::from_secs(HIGH_FAT_DURATION_SECS));
                score + 3
            }
            Self::Royal => {
                grow(snake, 5);
                snake.scale_speed(ROYAL_SPEED_FACTOR, ROYAL_MIN_SPEED_SECS);
                score + 5
            }
        }
    }
}

impl fmt::Display for FoodEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Poisonous => "poisonous",
            Self::Fit => "fit",
            Self::HighFat => "high-fat",
            Self::Royal => "royal",
        };
        f.write_str(name)
    }
}

fn grow(snake: &mut Snake, segments: usize) {
    for _ in 0..segments {
        snake.add_segment();
    }
}

/// Decides which effect a newly spawned food carries.
pub trait FoodFactory: fmt::Debug {
    fn create(&self, rng: &mut dyn RngCore) -> FoodEffect;
}

/// Picks uniformly among all effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformFoodFactory;

impl FoodFactory for UniformFoodFactory {
    fn create(&self, rng: &mut dyn RngCore) -> FoodEffect {
        *FoodEffect::ALL
            .choose(rng)
            .unwrap_or(&FoodEffect::Fit)
    }
}

/// Always produces the same effect.
#[derive(Debug, Clone, Copy)]
pub struct FixedFoodFactory(pub FoodEffect);

impl FoodFactory for FixedFoodFactory {
    fn create(&self, _rng: &mut dyn RngCore) -> FoodEffect {
        self.0
    }
}

/// Food entity currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FoodItem {
    pub position: Position,
    pub effect: FoodEffect,
}

impl FoodItem {
    #[must_use]
    pub fn new(position: Position, effect: FoodEffect) -> Self {
        Self { position, effect }
    }
}

/// The set of food items on the board, kept at a constant count.
#[derive(Debug)]
pub struct FoodField {
    items: Vec<FoodItem>,
    target_count: usize,
    factory: Box<dyn FoodFactory>,
}

impl FoodField {
    /// Creates a full field using `factory` for every spawned effect.
    #[must_use]
    pub fn initialize(factory: Box<dyn FoodFactory>, rng: &mut dyn RngCore) -> Self {
        Self::with_items(Vec::new(), factory, rng)
    }

    /// Creates a field seeded with `items`, topped up with random food to the target count.
    #[must_use]
    pub fn with_items(
        items: Vec<FoodItem>,
        factory: Box<dyn FoodFactory>,
        rng: &mut dyn RngCore,
    ) -> Self {
        let mut field = Self {
            items,
            target_count: FOOD_COUNT,
            factory,
        };
        field.fill(rng);
        field
    }

    /// Clears the field and spawns a fresh set of food from the same factory.
    pub fn reset(&mut self, rng: &mut dyn RngCore) {
        self.items.clear();
        self.fill(rng);
    }

    fn fill(&mut self, rng: &mut dyn RngCore) {
        while self.items.len() < self.target_count {
            self.spawn_one(rng);
        }
    }

    /// Adds one food at a random position with a freshly chosen effect.
    pub fn spawn_one(&mut self, rng: &mut dyn RngCore) {
        let effect = self.factory.create(rng);
        let position = spawn_position(rng);
        self.items.push(FoodItem::new(position, effect));
    }

    /// Returns the first item the head touches, in insertion order.
    #[must_use]
    pub fn check_eaten(&self, head: Position) -> Option<FoodItem> {
        self.items
            .iter()
            .find(|item| item.position.touches(head))
            .copied()
    }

    /// Removes `item` and spawns its replacement. Returns false when `item` is not on the field.
    pub fn replace(&mut self, item: FoodItem, rng: &mut dyn RngCore) -> bool {
        let Some(index) = self.items.iter().position(|candidate| *candidate == item) else {
            return false;
        };

        self.items.remove(index);
        self.spawn_one(rng);
        true
    }

    /// One description per active item, in item order.
    #[must_use]
    pub fn descriptions(&self) -> Vec<&'static str> {
        self.items.iter().map(|item| item.effect.describe()).collect()
    }

    #[must_use]
    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn target_count(&self) -> usize {
        self.target_count
    }
}

/// Draws a random food position inside the spawn extent.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R) -> Position {
    Position::new(
        rng.gen_range(-FOOD_SPAWN_EXTENT..=FOOD_SPAWN_EXTENT),
        rng.gen_range(-FOOD_SPAWN_EXTENT..=FOOD_SPAWN_EXTENT),
    )
}
