//! Dice rolling behind a trait so combat can be replayed deterministically.
//!
//! Production sessions use [`PcgDice`], a seeded PCG-XSH-RR generator. Tests
//! use [`ScriptedDice`], which returns queued results in order.

use std::collections::VecDeque;

/// Source of die results.
pub trait DiceRoller: Send {
    /// Next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Roll a die with `sides` faces (1..=sides). A zero-sided die rolls 0.
    fn roll_die(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        (self.next_u32() % sides) + 1
    }

    /// Roll a d100 (1..=100).
    fn roll_d100(&mut self) -> u32 {
        self.roll_die(100)
    }
}

impl<D: DiceRoller + ?Sized> DiceRoller for Box<D> {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn roll_die(&mut self, sides: u32) -> u32 {
        (**self).roll_die(sides)
    }

    fn roll_d100(&mut self) -> u32 {
        (**self).roll_d100()
    }
}

/// Seeded PCG random number generator (Permuted Congruential Generator).
///
/// Uses the PCG-XSH-RR variant: 64 bits of LCG state, 32 bits of output.
/// The same seed always produces the same sequence of rolls.
#[derive(Clone, Debug)]
pub struct PcgDice {
    state: u64,
}

impl PcgDice {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        // Mix the seed once so small seeds do not start in a low-entropy state.
        Self {
            state: Self::step(seed ^ 0x9e3779b97f4a7c15),
        }
    }

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl DiceRoller for PcgDice {
    fn next_u32(&mut self) -> u32 {
        let current = self.state;
        self.state = Self::step(current);
        Self::output(current)
    }
}

/// Dice that replay a fixed script of results.
///
/// Each roll pops the next queued value and clamps it into the die's range.
/// Once the script is exhausted every roll returns 1.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    queue: VecDeque<u32>,
}

impl ScriptedDice {
    pub fn new(results: impl IntoIterator<Item = u32>) -> Self {
        Self {
            queue: results.into_iter().collect(),
        }
    }

    pub fn push(&mut self, result: u32) {
        self.queue.push_back(result);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl DiceRoller for ScriptedDice {
    fn next_u32(&mut self) -> u32 {
        self.queue.pop_front().unwrap_or(0)
    }

    fn roll_die(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        self.queue.pop_front().unwrap_or(1).clamp(1, sides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic_per_seed() {
        let mut a = PcgDice::new(42);
        let mut b = PcgDice::new(42);
        let rolls_a: Vec<u32> = (0..32).map(|_| a.roll_d100()).collect();
        let rolls_b: Vec<u32> = (0..32).map(|_| b.roll_d100()).collect();
        assert_eq!(rolls_a, rolls_b);
    }

    #[test]
    fn pcg_rolls_stay_on_the_die() {
        let mut dice = PcgDice::new(7);
        for _ in 0..10_000 {
            let roll = dice.roll_d100();
            assert!((1..=100).contains(&roll));
        }
    }

    #[test]
    fn scripted_dice_clamp_and_exhaust() {
        let mut dice = ScriptedDice::new([150, 0, 3]);
        assert_eq!(dice.roll_d100(), 100);
        assert_eq!(dice.roll_die(6), 1);
        assert_eq!(dice.roll_die(6), 3);
        assert_eq!(dice.remaining(), 0);
        assert_eq!(dice.roll_die(20), 1);
    }
}
