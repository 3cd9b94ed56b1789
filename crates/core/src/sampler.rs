//! Quiz item selection.
//!
//! Items are any value type; callers pass a key extractor so selection can
//! deduplicate without knowing the item schema. Randomness is always injected.

use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use crate::weighting::copies_for;

/// Pick up to `count` distinct items, biased toward high-weight ones.
///
/// Every item is repeated `ceil(weight)` times, the expanded pool is shuffled,
/// and first occurrences are taken in order. When the walk yields fewer than
/// `count` distinct keys, the remainder is filled with unselected pool items in
/// pool order, without weighting.
///
/// The result never contains two items with the same key and has length
/// `min(count, distinct keys in pool)`.
pub fn select_weighted<T, R, K, W>(
    pool: &[T],
    count: usize,
    key: K,
    weight: W,
    rng: &mut R,
) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
    K: Fn(&T) -> &str,
    W: Fn(&T) -> f64,
{
    if pool.is_empty() || count == 0 {
        return Vec::new();
    }

    let mut expanded: Vec<usize> = Vec::with_capacity(pool.len());
    for (idx, item) in pool.iter().enumerate() {
        let copies = copies_for(weight(item));
        expanded.extend(std::iter::repeat_n(idx, copies));
    }
    expanded.shuffle(rng);

    let mut selected = Vec::with_capacity(count.min(pool.len()));
    let mut seen: HashSet<&str> = HashSet::with_capacity(selected.capacity());
    for idx in expanded {
        if selected.len() >= count {
            break;
        }
        let item = &pool[idx];
        if seen.insert(key(item)) {
            selected.push(item.clone());
        }
    }

    if selected.len() < count {
        for item in pool {
            if selected.len() >= count {
                break;
            }
            if seen.insert(key(item)) {
                selected.push(item.clone());
            }
        }
    }

    selected
}

/// Pick up to `count` distinct items uniformly at random, for non-adaptive
/// quizzes.
///
/// Items sharing a key count once; the first in pool order is kept.
pub fn select_uniform<T, R, K>(pool: &[T], count: usize, key: K, rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
    K: Fn(&T) -> &str,
{
    let mut seen: HashSet<&str> = HashSet::with_capacity(pool.len());
    let mut selected: Vec<T> = pool
        .iter()
        .filter(|&item| seen.insert(key(item)))
        .cloned()
        .collect();
    selected.shuffle(rng);
    selected.truncate(count);
    selected
}
