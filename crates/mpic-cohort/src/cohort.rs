use std::collections::{BTreeMap, HashSet};

use mpic_types::Perspective;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{CohortError, Result};

/// Derive the deterministic 32-byte PRNG seed for a given `(hash_secret,
/// target)` pair: `SHA-256(hash_secret ++ lowercase(target))`. Identical
/// inputs always produce identical cohorts (§4.4, §5).
pub fn derive_seed(hash_secret: &str, target: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(hash_secret.as_bytes());
    hasher.update(target.to_lowercase().as_bytes());
    hasher.finalize().into()
}

fn bucket_by_rir(perspectives: &[Perspective]) -> BTreeMap<String, Vec<Perspective>> {
    let mut buckets: BTreeMap<String, Vec<Perspective>> = BTreeMap::new();
    for perspective in perspectives {
        buckets
            .entry(perspective.rir.clone())
            .or_default()
            .push(perspective.clone());
    }
    buckets
}

/// Shuffle each RIR bucket deterministically using a single RNG stream
/// derived from `seed`, consumed in a fixed (alphabetical-by-RIR) bucket
/// order so the overall sequence of draws is reproducible.
fn shuffle_buckets(buckets: &mut BTreeMap<String, Vec<Perspective>>, seed: [u8; 32]) {
    let mut rng = StdRng::from_seed(seed);
    for bucket in buckets.values_mut() {
        bucket.shuffle(&mut rng);
    }
}

/// Build as many non-overlapping, RIR-diverse cohorts of size `cohort_size`
/// as the available perspectives allow, round-robining across RIR buckets
/// largest-first so that every cohort with 3 or more members draws from at
/// least two RIRs whenever the pool itself spans more than one. Perspectives
/// left over after the last full cohort are discarded for this request.
pub fn build_cohorts(
    all_perspectives: &[Perspective],
    cohort_size: usize,
    hash_secret: &str,
    target: &str,
) -> Result<Vec<Vec<Perspective>>> {
    if cohort_size > all_perspectives.len() {
        return Err(CohortError::CohortSizeExceedsAvailablePerspectives {
            requested: cohort_size,
            available: all_perspectives.len(),
        });
    }
    if cohort_size == 0 {
        return Ok(Vec::new());
    }

    let seed = derive_seed(hash_secret, target);
    let mut buckets = bucket_by_rir(all_perspectives);
    shuffle_buckets(&mut buckets, seed);

    let mut cohorts = Vec::new();
    let mut current = Vec::with_capacity(cohort_size);

    loop {
        let mut order: Vec<String> = buckets
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, _)| k.clone())
            .collect();
        order.sort_by_key(|rir| std::cmp::Reverse(buckets[rir].len()));
        if order.is_empty() {
            break;
        }

        // Cohorts of 3+ must span at least two RIRs. Once only one bucket
        // has perspectives left, a cohort can keep drawing from it only if
        // it already has a second distinct RIR locked in; otherwise further
        // draws would finalize (or start) a single-RIR cohort, so stop here
        // and let whatever is in `current` fall through to the leftover
        // discard below.
        if cohort_size >= 3 && order.len() < 2 {
            let distinct_rirs_so_far: HashSet<&str> =
                current.iter().map(|p: &Perspective| p.rir.as_str()).collect();
            if distinct_rirs_so_far.len() < 2 {
                break;
            }
        }

        let mut drew_any = false;
        for rir in order {
            if let Some(bucket) = buckets.get_mut(&rir) {
                if let Some(perspective) = bucket.pop() {
                    current.push(perspective);
                    drew_any = true;
                    if current.len() == cohort_size {
                        cohorts.push(std::mem::replace(&mut current, Vec::with_capacity(cohort_size)));
                    }
                }
            }
        }
        if !drew_any {
            break;
        }
    }

    if !current.is_empty() {
        debug!(
            leftover = current.len(),
            "discarding perspectives that could not fill a complete cohort"
        );
    }

    Ok(cohorts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perspectives() -> Vec<Perspective> {
        vec![
            Perspective::new("us-1", "arin"),
            Perspective::new("us-2", "arin"),
            Perspective::new("us-3", "arin"),
            Perspective::new("eu-1", "ripe"),
            Perspective::new("eu-2", "ripe"),
            Perspective::new("ap-1", "apnic"),
            Perspective::new("ap-2", "apnic"),
        ]
    }

    // ---------------------------------------------------------------
    // UNIT TESTS
    // ---------------------------------------------------------------

    #[test]
    fn derive_seed_is_deterministic_and_case_insensitive_on_target() {
        let a = derive_seed("secret", "Example.COM");
        let b = derive_seed("secret", "example.com");
        assert_eq!(a, b);
    }

    #[test]
    fn errors_when_cohort_size_exceeds_available_perspectives() {
        let perspectives = perspectives();
        let err = build_cohorts(&perspectives, 100, "secret", "example.com").unwrap_err();
        assert_eq!(
            err,
            CohortError::CohortSizeExceedsAvailablePerspectives {
                requested: 100,
                available: 7
            }
        );
    }

    // ---------------------------------------------------------------
    // INTEGRATION TESTS
    // ---------------------------------------------------------------

    #[test]
    fn cohort_construction_is_deterministic_across_calls() {
        let perspectives = perspectives();
        let a = build_cohorts(&perspectives, 3, "secret", "example.com").unwrap();
        let b = build_cohorts(&perspectives, 3, "secret", "example.com").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn cohorts_of_three_or_more_span_at_least_two_rirs() {
        let perspectives = perspectives();
        let cohorts = build_cohorts(&perspectives, 3, "secret", "example.com").unwrap();
        assert!(!cohorts.is_empty());
        for cohort in &cohorts {
            if cohort.len() >= 3 {
                let rirs: std::collections::HashSet<_> = cohort.iter().map(|p| &p.rir).collect();
                assert!(rirs.len() >= 2, "cohort {cohort:?} lacks RIR diversity");
            }
        }
    }

    #[test]
    fn leftover_perspectives_that_cannot_fill_a_cohort_are_discarded() {
        let perspectives = perspectives();
        let cohorts = build_cohorts(&perspectives, 3, "secret", "example.com").unwrap();
        let used: usize = cohorts.iter().map(|c| c.len()).sum();
        assert!(used <= perspectives.len());
        assert_eq!(used % 3, 0);
    }

    #[test]
    fn different_targets_yield_different_cohort_orderings() {
        let perspectives = perspectives();
        let a = build_cohorts(&perspectives, 3, "secret", "example.com").unwrap();
        let b = build_cohorts(&perspectives, 3, "secret", "other.example").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn heavily_imbalanced_rir_pool_never_yields_a_single_rir_cohort() {
        // One RIR dwarfs the other two; a naive round-robin keeps draining
        // the large bucket alone once the small ones run dry.
        let mut pool = Vec::new();
        for i in 0..10 {
            pool.push(Perspective::new(format!("arin-{i}"), "arin"));
        }
        pool.push(Perspective::new("ripe-0", "ripe"));

        let cohorts = build_cohorts(&pool, 3, "secret", "example.com").unwrap();
        for cohort in &cohorts {
            let rirs: HashSet<_> = cohort.iter().map(|p| &p.rir).collect();
            assert!(rirs.len() >= 2, "cohort {cohort:?} lacks RIR diversity");
        }
        // Only one diverse cohort can be assembled from a single "ripe"
        // perspective; the remaining arin perspectives are left over.
        assert_eq!(cohorts.len(), 1);
    }
}
