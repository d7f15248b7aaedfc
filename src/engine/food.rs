use super::grid::{Cell, Grid};
use super::snake::Snake;
use crate::util::EnumExt;
use enum_map::Enum;
use rand::Rng;
use std::fmt;

/// The kinds of food that can appear on the board
#[derive(Clone, Copy, Debug, Enum, Eq, Hash, PartialEq)]
pub(crate) enum FoodType {
    Regular,
    Bonus,
    Super,
}

impl FoodType {
    /// Points awarded for eating this food
    pub(crate) fn points(self) -> u32 {
        match self {
            FoodType::Regular => 1,
            FoodType::Bonus => 3,
            FoodType::Super => 5,
        }
    }

    /// Chance that a newly-spawned food is of this type.  The probabilities of
    /// all types sum to 1.
    pub(crate) fn probability(self) -> f64 {
        match self {
            FoodType::Regular => 0.7,
            FoodType::Bonus => 0.2,
            FoodType::Super => 0.1,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            FoodType::Regular => "Regular",
            FoodType::Bonus => "Bonus",
            FoodType::Super => "Super",
        }
    }

    /// Map a roll in `[0, 1)` onto a food type by walking the cumulative
    /// probabilities in declaration order.  Anything past the last threshold
    /// falls to the final type.
    pub(crate) fn from_roll(roll: f64) -> FoodType {
        let mut threshold = 0.0;
        for kind in FoodType::iter() {
            threshold += kind.probability();
            if roll < threshold {
                return kind;
            }
        }
        FoodType::last()
    }
}

impl fmt::Display for FoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A piece of food sitting on the board
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Food {
    pub(crate) cell: Cell,
    pub(crate) kind: FoodType,
}

/// Choose the type of the next food at random, weighted by
/// [`FoodType::probability()`]
pub(crate) fn pick_food_type<R: Rng>(rng: &mut R) -> FoodType {
    FoodType::from_roll(rng.random::<f64>())
}

/// Place a new piece of food on a random cell not covered by `snake`.
///
/// Returns `None` if the snake covers the entire grid.
pub(crate) fn spawn_food<R: Rng>(rng: &mut R, snake: &Snake, grid: Grid) -> Option<Food> {
    if snake.len() >= grid.area() {
        return None;
    }
    let cell = loop {
        let candidate = grid.random_cell(rng);
        if !snake.contains(candidate) {
            break candidate;
        }
    };
    Some(Food {
        cell,
        kind: pick_food_type(rng),
    })
}
