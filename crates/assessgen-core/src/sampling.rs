use rand::seq::SliceRandom;
use rand::Rng;

/// Cumulative-distribution table over explicit `(value, weight)` pairs.
///
/// A roll in `0..total` is mapped to the first entry whose running weight
/// exceeds it, so each value is drawn with probability `weight / total`.
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    values: Vec<T>,
    cumulative: Vec<u32>,
}

impl<T: Copy> WeightedTable<T> {
    pub fn new(pairs: &[(T, u32)]) -> anyhow::Result<Self> {
        let mut values = Vec::with_capacity(pairs.len());
        let mut cumulative = Vec::with_capacity(pairs.len());
        let mut running: u32 = 0;
        for (value, weight) in pairs {
            if *weight == 0 {
                continue;
            }
            running = running
                .checked_add(*weight)
                .ok_or_else(|| anyhow::anyhow!("weight table overflows u32"))?;
            values.push(*value);
            cumulative.push(running);
        }
        if running == 0 {
            anyhow::bail!("weight table has no positive weights");
        }
        Ok(Self { values, cumulative })
    }

    pub fn total(&self) -> u32 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        let roll = rng.gen_range(0..self.total());
        self.pick(roll)
    }

    fn pick(&self, roll: u32) -> T {
        let idx = self.cumulative.partition_point(|&c| c <= roll);
        self.values[idx.min(self.values.len() - 1)]
    }
}

/// Uniform sample size in `[min, min(max, available)]`. When fewer than
/// `min` items are available the range collapses to `available`.
pub fn sample_size<R: Rng + ?Sized>(
    available: usize,
    min: usize,
    max: usize,
    rng: &mut R,
) -> usize {
    let hi = available.min(max);
    let lo = min.min(hi);
    rng.gen_range(lo..=hi)
}

/// Draw `amount` distinct elements (by position) from `items`.
pub fn sample_without_replacement<'a, T, R: Rng + ?Sized>(
    items: &'a [T],
    amount: usize,
    rng: &mut R,
) -> Vec<&'a T> {
    items.choose_multiple(rng, amount.min(items.len())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{BTreeMap, HashSet};

    #[test]
    fn pick_follows_cumulative_boundaries() {
        let table = WeightedTable::new(&[('a', 20), ('b', 50), ('c', 30)]).unwrap();
        assert_eq!(table.total(), 100);
        assert_eq!(table.pick(0), 'a');
        assert_eq!(table.pick(19), 'a');
        assert_eq!(table.pick(20), 'b');
        assert_eq!(table.pick(69), 'b');
        assert_eq!(table.pick(70), 'c');
        assert_eq!(table.pick(99), 'c');
    }

    #[test]
    fn zero_weights_are_never_drawn() {
        let table = WeightedTable::new(&[(1u8, 0), (2u8, 5), (3u8, 0)]).unwrap();
        assert_eq!(table.total(), 5);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(table.sample(&mut rng), 2);
        }
    }

    #[test]
    fn empty_or_all_zero_tables_are_rejected() {
        assert!(WeightedTable::<u8>::new(&[]).is_err());
        assert!(WeightedTable::new(&[(1u8, 0)]).is_err());
        assert!(WeightedTable::new(&[(1u8, u32::MAX), (2u8, 1)]).is_err());
    }

    #[test]
    fn sample_frequencies_track_weights() {
        let table = WeightedTable::new(&[(3u8, 10), (4u8, 40), (5u8, 50)]).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let mut hist: BTreeMap<u8, u32> = BTreeMap::new();
        let n = 20_000;
        for _ in 0..n {
            *hist.entry(table.sample(&mut rng)).or_default() += 1;
        }
        let share = |v: u8| hist.get(&v).copied().unwrap_or(0) as f64 / n as f64;
        assert!((share(3) - 0.10).abs() < 0.02, "share(3) = {}", share(3));
        assert!((share(4) - 0.40).abs() < 0.02, "share(4) = {}", share(4));
        assert!((share(5) - 0.50).abs() < 0.02, "share(5) = {}", share(5));
    }

    #[test]
    fn tier_table_frequencies_match_weights() {
        use crate::model::Tier;

        let table = WeightedTable::new(&Tier::WEIGHTS).unwrap();
        assert_eq!(table.total(), 100);
        let mut rng = StdRng::seed_from_u64(2024);
        let mut hist: BTreeMap<Tier, u32> = BTreeMap::new();
        let n = 30_000;
        for _ in 0..n {
            *hist.entry(table.sample(&mut rng)).or_default() += 1;
        }
        let share = |t: Tier| hist.get(&t).copied().unwrap_or(0) as f64 / n as f64;
        assert!((share(Tier::Excellent) - 0.20).abs() < 0.02);
        assert!((share(Tier::Good) - 0.50).abs() < 0.02);
        assert!((share(Tier::Average) - 0.30).abs() < 0.02);
    }

    #[test]
    fn sample_size_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let n = sample_size(12, 5, 10, &mut rng);
            assert!((5..=10).contains(&n));
        }
        for _ in 0..100 {
            let n = sample_size(7, 5, 10, &mut rng);
            assert!((5..=7).contains(&n));
        }
        assert_eq!(sample_size(3, 5, 10, &mut rng), 3);
        assert_eq!(sample_size(5, 5, 10, &mut rng), 5);
        assert_eq!(sample_size(0, 5, 10, &mut rng), 0);
    }

    #[test]
    fn sampling_never_repeats_an_element() {
        let items: Vec<i64> = (1..=12).collect();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let picked = sample_without_replacement(&items, 10, &mut rng);
            assert_eq!(picked.len(), 10);
            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), picked.len());
        }
        assert_eq!(sample_without_replacement(&items, 50, &mut rng).len(), 12);
    }
}
