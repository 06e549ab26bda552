//! Dice used to move players along the board

use std::collections::VecDeque;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Lowest face of the die
pub const DIE_MIN: u8 = 1;
/// Highest face of the die
pub const DIE_MAX: u8 = 6;

/// Source of dice rolls for a board
///
/// Implementations must return a value in `DIE_MIN..=DIE_MAX`.
pub trait Dice {
    fn roll(&mut self) -> u8;
}

/// A fair six-sided die backed by a standard RNG
#[derive(Debug, Clone)]
pub struct StandardDice {
    rng: StdRng,
}

impl StandardDice {
    /// Die seeded from operating system entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Die with a fixed seed, producing a reproducible sequence
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StandardDice {
    fn default() -> Self {
        Self::new()
    }
}

impl Dice for StandardDice {
    fn roll(&mut self) -> u8 {
        self.rng.gen_range(DIE_MIN..=DIE_MAX)
    }
}

/// A die that replays a scripted sequence of faces, cycling when exhausted
#[derive(Debug, Clone)]
pub struct LoadedDice {
    faces: VecDeque<u8>,
}

impl LoadedDice {
    /// Faces outside `DIE_MIN..=DIE_MAX` are clamped into range, and an
    /// empty script always rolls `DIE_MIN`.
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        let faces = faces
            .into_iter()
            .map(|face| face.clamp(DIE_MIN, DIE_MAX))
            .collect();
        Self { faces }
    }
}

impl Dice for LoadedDice {
    fn roll(&mut self) -> u8 {
        match self.faces.pop_front() {
            Some(face) => {
                self.faces.push_back(face);
                face
            }
            None => DIE_MIN,
        }
    }
}

impl<D: Dice + ?Sized> Dice for Box<D> {
    fn roll(&mut self) -> u8 {
        (**self).roll()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_dice_stays_in_range() {
        let mut dice = StandardDice::new();
        for _ in 0..1000 {
            let face = dice.roll();
            assert!((DIE_MIN..=DIE_MAX).contains(&face));
        }
    }

    #[test]
    fn test_standard_dice_covers_every_face() {
        let mut dice = StandardDice::seeded(7);
        let mut seen = [false; 6];
        for _ in 0..600 {
            seen[(dice.roll() - 1) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_seeded_dice_is_reproducible() {
        let mut a = StandardDice::seeded(42);
        let mut b = StandardDice::seeded(42);
        let first: Vec<u8> = (0..20).map(|_| a.roll()).collect();
        let second: Vec<u8> = (0..20).map(|_| b.roll()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_loaded_dice_cycles_script() {
        let mut dice = LoadedDice::new([3, 5]);
        assert_eq!(dice.roll(), 3);
        assert_eq!(dice.roll(), 5);
        assert_eq!(dice.roll(), 3);
    }

    #[test]
    fn test_loaded_dice_clamps_faces() {
        let mut dice = LoadedDice::new([0, 9]);
        assert_eq!(dice.roll(), DIE_MIN);
        assert_eq!(dice.roll(), DIE_MAX);
        assert_eq!(LoadedDice::new([]).roll(), DIE_MIN);
    }

    #[test]
    fn test_boxed_dice_delegates() {
        let mut dice: Box<dyn Dice> = Box::new(LoadedDice::new([4, 2]));
        assert_eq!(dice.roll(), 4);
        assert_eq!(dice.roll(), 2);
    }
}
