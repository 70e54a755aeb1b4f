use rand::{prelude::*, rngs::StdRng, rngs::SysRng};

/// RNG for a search, seeded from `seed` when given
pub fn make_rng(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or_else(default_seed))
}

#[cfg(debug_assertions)]
fn default_seed() -> u64 {
    63
}

#[cfg(not(debug_assertions))]
fn default_seed() -> u64 {
    use rand::TryRng;
    const FALLBACK_SEED: u64 = 63;

    SysRng::try_next_u64(&mut SysRng).unwrap_or(FALLBACK_SEED)
}
