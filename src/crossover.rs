use crate::{error::NetworkError, genome::Genome, random::Chance};
use core::mem::swap;
use rand::RngCore;

/// Uniform crossover: for every corresponding gene of `l` and `r`, swap the two values with
/// probability `rate`. One trial is drawn per gene in canonical order whether or not it swaps.
/// Returns how many genes were swapped.
///
/// Both genomes must share a shape, otherwise genes would be paired up by position across
/// different neurons.
pub fn crossover(
    l: &mut Genome,
    r: &mut Genome,
    rate: f64,
    rng: &mut impl RngCore,
) -> Result<usize, NetworkError> {
    let same_shape = l.topology() == r.topology()
        && l.neurons().len() == r.neurons().len()
        && l
            .neurons()
            .iter()
            .zip(r.neurons())
            .all(|(l, r)| l.weights.len() == r.weights.len());
    if !same_shape {
        return Err(NetworkError::InvalidGenome(
            "cannot cross over genomes of different shapes".into(),
        ));
    }

    let mut swapped = 0;
    for (l, r) in l.genes_mut().zip(r.genes_mut()) {
        if rng.chance(rate) {
            swap(l, r);
            swapped += 1;
        }
    }
    Ok(swapped)
}
