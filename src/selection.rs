use rand::{Rng, RngCore};

#[inline]
fn weight(fitness: f64) -> f64 {
    if fitness > 0. {
        fitness
    } else {
        0.
    }
}

/// Fitness proportionate ("roulette wheel") selection over a pool of fitness values, returning
/// a position in `pool`.
///
/// Draws exactly one `v` uniformly from `[0, Σ fitness)` and walks the pool accumulating
/// fitness, returning the first position whose inclusive running total reaches `v` and which
/// isn't `exclude`. Negative and NaN fitness weigh nothing. When rounding leaves nothing
/// matched, the last position is returned, even if it is the excluded one. A pool whose total
/// fitness is zero always yields its last position.
///
/// `None` only for an empty pool.
pub fn roulette(pool: &[f64], exclude: Option<usize>, rng: &mut impl RngCore) -> Option<usize> {
    let last = pool.len().checked_sub(1)?;
    let total: f64 = pool.iter().copied().map(weight).sum();
    let v = rng.random::<f64>() * total;
    if total <= 0. {
        return Some(last);
    }

    let mut running = 0.;
    for (idx, fitness) in pool.iter().copied().map(weight).enumerate() {
        if running + fitness >= v && Some(idx) != exclude {
            return Some(idx);
        }
        running += fitness;
    }
    Some(last)
}
