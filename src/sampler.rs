use rand::Rng;

use crate::{IndexSampler, walker::AliasTable};

/// `AliasTable` is the weighted sampler; wire it into the trait.
impl IndexSampler for AliasTable {
    #[inline]
    fn len(&self) -> usize {
        // call the inherent method explicitly to avoid trait-recursion
        AliasTable::len(self)
    }
    #[inline]
    fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        AliasTable::sample_index(self, rng)
    }
}

/// Draw `draws` indices from any sampler and tally them.
pub fn histogram<S: IndexSampler, R: Rng + ?Sized>(
    sampler: &S,
    rng: &mut R,
    draws: usize,
) -> Vec<usize> {
    let mut counts = vec![0usize; sampler.len()];
    for _ in 0..draws {
        counts[sampler.sample_index(rng)] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn histogram_tracks_reconstructed_distribution() {
        let table = AliasTable::new(&[1.0, 1.0, 3.0, 2.0], 1.0 / 32.0).unwrap();
        let mut rng = Pcg32::seed_from_u64(7);
        let draws = 64_000;
        let counts = histogram(&table, &mut rng, draws);

        assert_eq!(counts.iter().sum::<usize>(), draws);
        for (c, q) in counts.iter().zip(table.probabilities()) {
            let emp = *c as f64 / draws as f64;
            assert!((emp - q).abs() < 0.02, "emp={emp} q={q}");
        }
    }
}
