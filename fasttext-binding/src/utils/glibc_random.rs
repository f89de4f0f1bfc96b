//! glibc-compatible `srand`/`rand` generator
//!
//! Reproduces the TYPE_3 additive feedback generator behind glibc's `rand()`
//! so synthetic fixtures match golden output produced by native test
//! harnesses bit for bit.

use rand::{Error, RngCore, SeedableRng};

/// Largest value returned by [`GlibcRandom::next_rand`].
pub const RAND_MAX: i32 = 2147483647;

const DEGREE: usize = 31;
const SEPARATION: usize = 3;
const TABLE_LEN: usize = DEGREE + SEPARATION;
const WARMUP_ROUNDS: usize = 10 * DEGREE;

#[derive(Debug, Clone)]
pub struct GlibcRandom {
    table: [u32; TABLE_LEN],
    index: usize,
}

impl GlibcRandom {
    /// Equivalent of `srand(seed)`.
    pub fn new(seed: u32) -> Self {
        let seed = if seed == 0 { 1 } else { seed };
        let mut table = [0u32; TABLE_LEN];
        table[0] = seed;

        for i in 1..DEGREE {
            let prev = table[i - 1] as i32 as i64;
            let mut word = (16807 * prev) % i64::from(RAND_MAX);
            if word < 0 {
                word += i64::from(RAND_MAX);
            }
            table[i] = word as u32;
        }
        for i in DEGREE..TABLE_LEN {
            table[i] = table[i - DEGREE];
        }

        let mut rng = Self { table, index: 0 };
        for _ in 0..WARMUP_ROUNDS {
            rng.step();
        }
        rng
    }

    // r[i] = r[i - 31] + r[i - 3], kept in a ring of 34 slots
    fn step(&mut self) -> u32 {
        let i = self.index;
        let value = self.table[(i + SEPARATION) % TABLE_LEN]
            .wrapping_add(self.table[(i + DEGREE) % TABLE_LEN]);
        self.table[i] = value;
        self.index = (i + 1) % TABLE_LEN;
        value
    }

    /// Equivalent of `rand()`: a value in `0..=RAND_MAX`.
    pub fn next_rand(&mut self) -> i32 {
        (self.step() >> 1) as i32
    }
}

impl RngCore for GlibcRandom {
    fn next_u32(&mut self) -> u32 {
        self.next_rand() as u32
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_u32());
        let high = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for GlibcRandom {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    /// Uses the low 32 bits directly, like `srand(unsigned int)`.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as u32)
    }
}
