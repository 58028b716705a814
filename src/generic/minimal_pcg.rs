//! A simple pseudorandom number generator.
//!
//! Specifically, a translation of the *really* minimal C PCG32 implementation from <https://www.pcg-random.org/>, implemented to satisfy [RngCore] so the generator can be handed to anything taking a [rand::Rng], e.g. [shuffle](rand::seq::SliceRandom::shuffle).
//!
//! The [scrambler](crate::ipasir::scrambler) draws all of its permutations from an instance of [MinimalPCG32], and so a scrambled run is reproduced by reusing its seed.

use rand::SeedableRng;
use rand_core::{impls, Error, RngCore};

/// State and increment
#[derive(Clone, Debug, Default)]
pub struct MinimalPCG32 {
    state: u64,
    inc: u64,
}

impl RngCore for MinimalPCG32 {
    fn next_u32(&mut self) -> u32 {
        let old_state = self.state;

        self.state = old_state
            .wrapping_mul(6364136223846793005_u64)
            .wrapping_add(self.inc);

        let xorshifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
        let rot = (old_state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for MinimalPCG32 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        // The increment must be odd.
        const INCREMENT: u64 = 3215534235932367344 | 1;
        let mut pcg = Self {
            state: 0,
            inc: INCREMENT,
        };
        pcg.next_u32();
        pcg.state = pcg.state.wrapping_add(u64::from_le_bytes(seed));
        pcg.next_u32();
        pcg
    }
}

#[cfg(test)]
mod pcg_tests {
    use super::*;

    fn draw(seed: u64, count: usize) -> Vec<u32> {
        let mut pcg = MinimalPCG32::seed_from_u64(seed);
        (0..count).map(|_| pcg.next_u32()).collect()
    }

    #[test]
    fn same_seed_same_stream() {
        assert_eq!(draw(2, 16), draw(2, 16));
        assert_eq!(draw(73, 16), draw(73, 16));
    }

    #[test]
    fn two_seed_seventy_three_seed() {
        assert_ne!(draw(2, 16), draw(73, 16));
    }

    #[test]
    fn shuffle_is_a_permutation() {
        use rand::seq::SliceRandom;

        let mut pcg = MinimalPCG32::seed_from_u64(11);
        let mut items = (0..100).collect::<Vec<u32>>();
        items.shuffle(&mut pcg);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..100).collect::<Vec<u32>>());
        assert_ne!(items, sorted);
    }
}
