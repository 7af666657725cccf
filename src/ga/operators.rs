//! Genetic operators for the processor-assignment encoding.
//!
//! - [`tournament_select`]: k-way tournament over distinct individuals
//! - [`single_point_crossover`]: tail swap at a uniform cut in `[1, n-1]`
//! - [`reset_mutation`]: per-gene reset to a uniformly random processor
//!
//! # Reference
//! Goldberg (1989), "Genetic Algorithms in Search, Optimization, and
//! Machine Learning", Ch. 1 and 4

use rand::seq::index;
use rand::Rng;

use super::chromosome::Chromosome;

/// Picks the fittest of `k` distinct, uniformly sampled individuals.
///
/// `k` is clamped to `[1, population.len()]`. Ties go to the contestant
/// sampled first.
///
/// # Panics
/// If `population` is empty.
pub fn tournament_select<'a, R: Rng + ?Sized>(
    population: &'a [Chromosome],
    k: usize,
    rng: &mut R,
) -> &'a Chromosome {
    assert!(!population.is_empty(), "tournament over an empty population");
    let k = k.clamp(1, population.len());
    let contestants = index::sample(rng, population.len(), k);

    let mut winner = contestants.index(0);
    for i in contestants.iter().skip(1) {
        if population[i].fitness < population[winner].fitness {
            winner = i;
        }
    }
    &population[winner]
}

/// Single-point crossover.
///
/// Draws a cut uniformly from `[1, n-1]` and swaps tails:
/// `child1 = p1[..cut] + p2[cut..]`, `child2 = p2[..cut] + p1[cut..]`.
/// With `n ≤ 1` the children are copies of their parents. Children are
/// returned unevaluated.
pub fn single_point_crossover<R: Rng + ?Sized>(
    p1: &Chromosome,
    p2: &Chromosome,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let n = p1.len().min(p2.len());
    if n <= 1 {
        return (
            Chromosome::new(p1.genes.clone()),
            Chromosome::new(p2.genes.clone()),
        );
    }

    let cut = rng.random_range(1..n);
    let child1 = [&p1.genes[..cut], &p2.genes[cut..]].concat();
    let child2 = [&p2.genes[..cut], &p1.genes[cut..]].concat();
    (Chromosome::new(child1), Chromosome::new(child2))
}

/// Resets each gene, independently with probability `rate`, to a uniformly
/// random processor in `[0, processor_count)`.
///
/// Clears the stored fitness if any gene was redrawn.
pub fn reset_mutation<R: Rng + ?Sized>(
    chromosome: &mut Chromosome,
    processor_count: usize,
    rate: f64,
    rng: &mut R,
) {
    let mut touched = false;
    for gene in chromosome.genes.iter_mut() {
        if rng.random_bool(rate) {
            *gene = rng.random_range(0..processor_count);
            touched = true;
        }
    }
    if touched {
        chromosome.fitness = f64::INFINITY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn scored(genes: Vec<usize>, fitness: f64) -> Chromosome {
        Chromosome { genes, fitness }
    }

    fn sample_population() -> Vec<Chromosome> {
        vec![
            scored(vec![0, 0], 30.0),
            scored(vec![0, 1], 12.0),
            scored(vec![1, 0], 25.0),
            scored(vec![1, 1], 18.0),
        ]
    }

    #[test]
    fn test_full_tournament_returns_best() {
        let pop = sample_population();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..20 {
            let winner = tournament_select(&pop, pop.len(), &mut rng);
            assert_eq!(winner.fitness, 12.0);
        }
    }

    #[test]
    fn test_oversized_tournament_clamped() {
        let pop = sample_population();
        let mut rng = SmallRng::seed_from_u64(42);
        let winner = tournament_select(&pop, 100, &mut rng);
        assert_eq!(winner.genes, vec![0, 1]);
    }

    #[test]
    fn test_unit_tournament_is_uniform_pick() {
        let pop = sample_population();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let winner = tournament_select(&pop, 1, &mut rng);
            let idx = pop.iter().position(|c| c == winner).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_tournament_never_returns_worst_with_k2() {
        let pop = sample_population();
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..100 {
            let winner = tournament_select(&pop, 2, &mut rng);
            assert!(winner.fitness < 30.0);
        }
    }

    #[test]
    fn test_crossover_swaps_tails() {
        let p1 = Chromosome::new(vec![0; 6]);
        let p2 = Chromosome::new(vec![1; 6]);
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let (c1, c2) = single_point_crossover(&p1, &p2, &mut rng);
            let cut = c1.genes.iter().position(|&g| g == 1).unwrap();
            assert!((1..6).contains(&cut));
            assert!(c1.genes[..cut].iter().all(|&g| g == 0));
            assert!(c1.genes[cut..].iter().all(|&g| g == 1));
            assert!(c2.genes[..cut].iter().all(|&g| g == 1));
            assert!(c2.genes[cut..].iter().all(|&g| g == 0));
            assert!(!c1.is_evaluated());
        }
    }

    #[test]
    fn test_crossover_short_parents_copied() {
        let p1 = scored(vec![2], 5.0);
        let p2 = scored(vec![0], 9.0);
        let mut rng = SmallRng::seed_from_u64(42);
        let (c1, c2) = single_point_crossover(&p1, &p2, &mut rng);
        assert_eq!(c1.genes, vec![2]);
        assert_eq!(c2.genes, vec![0]);

        let empty = Chromosome::new(vec![]);
        let (c1, _) = single_point_crossover(&empty, &empty, &mut rng);
        assert!(c1.is_empty());
    }

    #[test]
    fn test_mutation_rate_zero_keeps_genes() {
        let mut ch = scored(vec![0, 1, 2, 3], 7.0);
        let mut rng = SmallRng::seed_from_u64(42);
        reset_mutation(&mut ch, 4, 0.0, &mut rng);
        assert_eq!(ch.genes, vec![0, 1, 2, 3]);
        assert_eq!(ch.fitness, 7.0);
    }

    #[test]
    fn test_mutation_rate_one_redraws_all() {
        let mut ch = scored(vec![3, 3, 3], 7.0);
        let mut rng = SmallRng::seed_from_u64(42);
        reset_mutation(&mut ch, 1, 1.0, &mut rng);
        assert_eq!(ch.genes, vec![0, 0, 0]);
        assert!(!ch.is_evaluated());
    }

    #[test]
    fn test_mutation_stays_in_range() {
        let mut ch = Chromosome::new(vec![0; 50]);
        let mut rng = SmallRng::seed_from_u64(42);
        reset_mutation(&mut ch, 5, 0.5, &mut rng);
        assert!(ch.genes.iter().all(|&g| g < 5));
        assert!(ch.genes.iter().any(|&g| g != 0));
    }
}
