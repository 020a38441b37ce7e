use core::cmp::min;
use rand::{Rng, RngCore, SeedableRng};
use std::{
    fs::File,
    io::{self, Read},
    time::{SystemTime, UNIX_EPOCH},
};

/// Bernoulli trials against a probability in `[0, 1]`.
///
/// A trial succeeds when a uniform draw from `[0, 1)` lands strictly below `p`, so `p = 0`
/// never happens and `p = 1` always does. Exactly one `f64` is drawn per call.
pub trait Chance: RngCore {
    fn chance(&mut self, p: f64) -> bool;
}

impl<R: RngCore> Chance for R {
    fn chance(&mut self, p: f64) -> bool {
        self.random::<f64>() < p
    }
}

/// Small, fast and seedable. Every stream of randomness in a training run comes from one of
/// these, so a seed fully determines the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WyRng {
    state: u64,
}

impl WyRng {
    pub fn seeded(state: u64) -> Self {
        Self { state }
    }
}

impl RngCore for WyRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        const WY_CONST_0: u64 = 0x2d35_8dcc_aa6c_78a5;
        const WY_CONST_1: u64 = 0x8bb8_4b93_962e_acc9;
        self.state = self.state.wrapping_add(WY_CONST_0);
        let t = u128::from(self.state) * u128::from(self.state ^ WY_CONST_1);
        (t as u64) ^ (t >> 64) as u64
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        let mut idx = 0;
        while idx < dst.len() {
            let lim = min(8, dst.len() - idx);
            dst[idx..idx + lim].copy_from_slice(&self.next_u64().to_le_bytes()[..lim]);
            idx += lim;
        }
    }
}

impl SeedableRng for WyRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::seeded(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::seeded(state)
    }
}

pub fn seed_urandom() -> io::Result<u64> {
    let mut file = File::open("/dev/urandom")?;
    let mut buffer = [0u8; 8];
    file.read_exact(&mut buffer)?;
    Ok(u64::from_le_bytes(buffer))
}

pub fn seed_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// A seed for runs that didn't ask for one. Falls back to the clock when /dev/urandom is
/// unavailable.
pub fn entropy_seed() -> u64 {
    seed_urandom().unwrap_or_else(|_| seed_time())
}
