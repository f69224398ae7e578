use std::collections::BTreeSet;

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Uniform shuffling for option order and item order.
pub struct ShuffleService {
    rng: StdRng,
}

/// Options after shuffling, with the answer key moved to display positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffledOptions<T> {
    pub options: Vec<T>,
    /// `order[display] == original index`.
    pub order: Vec<usize>,
    pub answer_key: BTreeSet<usize>,
}

/// Fisher-Yates, in place.
pub fn fisher_yates<T, R: Rng + ?Sized>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Map original indices to display indices under `order`.
pub fn remap_indices(order: &[usize], original: &BTreeSet<usize>) -> BTreeSet<usize> {
    order
        .iter()
        .enumerate()
        .filter(|(_, orig)| original.contains(*orig))
        .map(|(display, _)| display)
        .collect()
}

impl ShuffleService {
    pub fn from_entropy() -> Self {
        ShuffleService { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        ShuffleService { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None       => Self::from_entropy(),
        }
    }

    /// The underlying generator, shared with content providers so one seed
    /// reproduces a whole session.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// A uniformly random permutation of `0..n`.
    pub fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..n).collect();
        fisher_yates(&mut self.rng, &mut order);
        order
    }

    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        self.permutation(items.len())
            .into_iter()
            .map(|i| items[i].clone())
            .collect()
    }

    /// Shuffle `options` and express `correct` (original indices) in display
    /// coordinates. Out-of-range indices in `correct` are dropped.
    pub fn shuffle_options<T: Clone>(&mut self, options: &[T], correct: &BTreeSet<usize>) -> ShuffledOptions<T> {
        let order = self.permutation(options.len());
        let answer_key = remap_indices(&order, correct);
        let options = order.iter().map(|&i| options[i].clone()).collect();
        ShuffledOptions { options, order, answer_key }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn every_element_reaches_every_position() {
        let mut shuffler = ShuffleService::from_entropy();
        let items = ['a', 'b', 'c', 'd', 'e'];
        let mut seen = [[false; 5]; 5];
        for _ in 0..1000 {
            let out = shuffler.shuffle(&items);
            for (pos, c) in out.iter().enumerate() {
                let original = items.iter().position(|x| x == c).unwrap();
                seen[original][pos] = true;
            }
        }
        for (original, row) in seen.iter().enumerate() {
            for (pos, hit) in row.iter().enumerate() {
                assert!(*hit, "element {original} never landed at position {pos}");
            }
        }
    }

    #[test]
    fn answer_key_follows_the_options() {
        let mut shuffler = ShuffleService::from_entropy();
        let options = vec!["TCP", "HTTP", "UDP", "IP"];
        let correct: BTreeSet<usize> = [0, 2].into_iter().collect();
        for _ in 0..50 {
            let s = shuffler.shuffle_options(&options, &correct);
            let keyed: BTreeSet<&str> = s.answer_key.iter().map(|&i| s.options[i]).collect();
            assert_eq!(keyed, ["TCP", "UDP"].into_iter().collect::<BTreeSet<_>>());
            for (display, &orig) in s.order.iter().enumerate() {
                assert_eq!(s.options[display], options[orig]);
            }
        }
    }

    #[test]
    fn empty_and_single_sequences() {
        let mut shuffler = ShuffleService::from_entropy();
        assert!(shuffler.permutation(0).is_empty());
        assert_eq!(shuffler.permutation(1), vec![0]);
    }

    #[test]
    fn same_seed_same_permutation() {
        let a = ShuffleService::seeded(7).permutation(20);
        let b = ShuffleService::seeded(7).permutation(20);
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn permutation_is_a_bijection(n in 0usize..64, seed in any::<u64>()) {
            let mut order = ShuffleService::seeded(seed).permutation(n);
            order.sort_unstable();
            prop_assert_eq!(order, (0..n).collect::<Vec<_>>());
        }
    }
}
