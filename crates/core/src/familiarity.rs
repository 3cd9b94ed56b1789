use std::cmp::Ordering;

use crate::model::{QuizDomain, StatsMap};

//
// ─── RANGES ────────────────────────────────────────────────────────────────────
//

/// Familiarity bucket of an item, by correct percentage.
///
/// Each range includes its lower bound and excludes its upper bound, except
/// `NinetyToHundred` which includes 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FamiliarityRange {
    ZeroToThirty,
    ThirtyToFifty,
    FiftyToSeventy,
    SeventyToNinety,
    NinetyToHundred,
    NoData,
}

impl FamiliarityRange {
    /// Display order: weakest first, items without data last.
    pub const ALL: [FamiliarityRange; 6] = [
        FamiliarityRange::ZeroToThirty,
        FamiliarityRange::ThirtyToFifty,
        FamiliarityRange::FiftyToSeventy,
        FamiliarityRange::SeventyToNinety,
        FamiliarityRange::NinetyToHundred,
        FamiliarityRange::NoData,
    ];

    #[must_use]
    pub fn from_percentage(percentage: Option<f64>) -> Self {
        match percentage {
            None => FamiliarityRange::NoData,
            Some(p) if p < 30.0 => FamiliarityRange::ZeroToThirty,
            Some(p) if p < 50.0 => FamiliarityRange::ThirtyToFifty,
            Some(p) if p < 70.0 => FamiliarityRange::FiftyToSeventy,
            Some(p) if p < 90.0 => FamiliarityRange::SeventyToNinety,
            Some(_) => FamiliarityRange::NinetyToHundred,
        }
    }

    /// Short identifier such as `"30-50"` or `"no-data"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FamiliarityRange::ZeroToThirty => "0-30",
            FamiliarityRange::ThirtyToFifty => "30-50",
            FamiliarityRange::FiftyToSeventy => "50-70",
            FamiliarityRange::SeventyToNinety => "70-90",
            FamiliarityRange::NinetyToHundred => "90-100",
            FamiliarityRange::NoData => "no-data",
        }
    }

    /// Heading combining the learning state with the range.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FamiliarityRange::ZeroToThirty => "Struggling (0-30%)",
            FamiliarityRange::ThirtyToFifty => "Struggling (30-50%)",
            FamiliarityRange::FiftyToSeventy => "Learning (50-70%)",
            FamiliarityRange::SeventyToNinety => "Familiar (70-90%)",
            FamiliarityRange::NinetyToHundred => "Mastered (90-100%)",
            FamiliarityRange::NoData => "No Data",
        }
    }

    fn index(self) -> usize {
        match self {
            FamiliarityRange::ZeroToThirty => 0,
            FamiliarityRange::ThirtyToFifty => 1,
            FamiliarityRange::FiftyToSeventy => 2,
            FamiliarityRange::SeventyToNinety => 3,
            FamiliarityRange::NinetyToHundred => 4,
            FamiliarityRange::NoData => 5,
        }
    }
}

//
// ─── SORTING ───────────────────────────────────────────────────────────────────
//

/// Orders percentages ascending with `None` after every value.
fn cmp_familiarity(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.total_cmp(&b),
    }
}

/// Sort items least-correct first; items without data go last.
///
/// The sort is stable, so ties keep their input order.
pub fn sort_by_familiarity<T, K>(items: &[T], key: K, stats: &StatsMap) -> Vec<T>
where
    T: Clone,
    K: Fn(&T) -> &str,
{
    let mut ranked: Vec<(Option<f64>, &T)> = items
        .iter()
        .map(|item| (stats.percentage(key(item)), item))
        .collect();
    ranked.sort_by(|a, b| cmp_familiarity(a.0, b.0));
    ranked.into_iter().map(|(_, item)| item.clone()).collect()
}

//
// ─── BUCKETS ───────────────────────────────────────────────────────────────────
//

/// Items grouped into the six familiarity ranges.
///
/// All six buckets are always present; use [`FamiliarityBuckets::non_empty`]
/// to skip empty ones for display.
#[derive(Debug, Clone, PartialEq)]
pub struct FamiliarityBuckets<T> {
    buckets: [Vec<T>; 6],
}

impl<T> FamiliarityBuckets<T> {
    #[must_use]
    pub fn get(&self, range: FamiliarityRange) -> &[T] {
        &self.buckets[range.index()]
    }

    /// Every bucket in display order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (FamiliarityRange, &[T])> {
        FamiliarityRange::ALL
            .into_iter()
            .map(|range| (range, self.get(range)))
    }

    pub fn non_empty(&self) -> impl Iterator<Item = (FamiliarityRange, &[T])> {
        self.iter().filter(|(_, items)| !items.is_empty())
    }

    /// Total number of bucketed items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition items into familiarity ranges, each in familiarity order.
pub fn bucket_by_familiarity_range<T, K>(
    items: &[T],
    key: K,
    stats: &StatsMap,
) -> FamiliarityBuckets<T>
where
    T: Clone,
    K: Fn(&T) -> &str,
{
    let mut buckets: [Vec<T>; 6] = Default::default();
    for item in sort_by_familiarity(items, &key, stats) {
        let range = FamiliarityRange::from_percentage(stats.percentage(key(&item)));
        buckets[range.index()].push(item);
    }
    FamiliarityBuckets { buckets }
}

//
// ─── STRUGGLING ITEMS ──────────────────────────────────────────────────────────
//

/// Items below this percentage are listed as needing practice.
pub const NEEDS_PRACTICE_BELOW: f64 = 70.0;

/// An item the learner keeps getting wrong.
#[derive(Debug, Clone, PartialEq)]
pub struct StrugglingItem {
    pub domain: QuizDomain,
    pub item_key: String,
    pub correct_rate: f64,
    pub attempts: u32,
}

/// Most "needs practice" cards shown for a domain.
#[must_use]
pub fn struggling_limit(domain: QuizDomain) -> usize {
    match domain {
        QuizDomain::InitialConsonant => 9,
        QuizDomain::Number => 3,
        _ => 6,
    }
}

/// Items of one domain answered below [`NEEDS_PRACTICE_BELOW`], weakest first.
///
/// Ties on rate are broken by attempts, most first. The list is capped with
/// [`struggling_limit`].
pub fn struggling_items<'a, I>(domain: QuizDomain, keys: I, stats: &StatsMap) -> Vec<StrugglingItem>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut found: Vec<StrugglingItem> = keys
        .into_iter()
        .filter_map(|item_key| {
            let stat = stats.get(item_key)?;
            let rate = stat.percentage()?;
            (rate < NEEDS_PRACTICE_BELOW).then(|| StrugglingItem {
                domain,
                item_key: item_key.to_string(),
                correct_rate: rate,
                attempts: stat.attempts(),
            })
        })
        .collect();

    found.sort_by(|a, b| {
        a.correct_rate
            .total_cmp(&b.correct_rate)
            .then_with(|| b.attempts.cmp(&a.attempts))
    });
    found.truncate(struggling_limit(domain));
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnswerStat;

    fn stats(entries: &[(&str, u32, u32)]) -> StatsMap {
        entries
            .iter()
            .map(|(k, a, c)| ((*k).to_string(), AnswerStat::from_persisted(*a, *c).unwrap()))
            .collect()
    }

    fn key(s: &String) -> &str {
        s.as_str()
    }

    fn owned(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| (*k).to_string()).collect()
    }

    #[test]
    fn no_data_items_sort_last() {
        let map = stats(&[("a", 10, 9), ("b", 10, 1), ("c", 4, 2)]);
        let items = owned(&["x", "a", "y", "b", "c"]);
        let sorted = sort_by_familiarity(&items, key, &map);
        assert_eq!(sorted, owned(&["b", "c", "a", "x", "y"]));
    }

    #[test]
    fn equal_percentages_keep_input_order() {
        let map = stats(&[("a", 2, 1), ("b", 4, 2), ("c", 10, 5)]);
        let items = owned(&["c", "a", "b"]);
        assert_eq!(sort_by_familiarity(&items, key, &map), items);
    }

    #[test]
    fn boundaries_start_their_own_bucket() {
        assert_eq!(FamiliarityRange::from_percentage(None), FamiliarityRange::NoData);
        assert_eq!(FamiliarityRange::from_percentage(Some(0.0)), FamiliarityRange::ZeroToThirty);
        assert_eq!(FamiliarityRange::from_percentage(Some(29.9)), FamiliarityRange::ZeroToThirty);
        assert_eq!(FamiliarityRange::from_percentage(Some(30.0)), FamiliarityRange::ThirtyToFifty);
        assert_eq!(FamiliarityRange::from_percentage(Some(50.0)), FamiliarityRange::FiftyToSeventy);
        assert_eq!(FamiliarityRange::from_percentage(Some(70.0)), FamiliarityRange::SeventyToNinety);
        assert_eq!(FamiliarityRange::from_percentage(Some(90.0)), FamiliarityRange::NinetyToHundred);
        assert_eq!(FamiliarityRange::from_percentage(Some(100.0)), FamiliarityRange::NinetyToHundred);
    }

    #[test]
    fn labels_pair_learning_state_with_range() {
        let labels: Vec<&str> = FamiliarityRange::ALL.iter().map(|r| r.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Struggling (0-30%)",
                "Struggling (30-50%)",
                "Learning (50-70%)",
                "Familiar (70-90%)",
                "Mastered (90-100%)",
                "No Data",
            ]
        );
    }

    #[test]
    fn buckets_partition_the_input() {
        let map = stats(&[
            ("a", 10, 2),
            ("b", 10, 3),
            ("c", 10, 5),
            ("d", 10, 7),
            ("e", 10, 9),
            ("f", 5, 4),
            ("g", 1, 1),
        ]);
        let items = owned(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        let buckets = bucket_by_familiarity_range(&items, key, &map);

        assert_eq!(buckets.len(), items.len());
        assert_eq!(buckets.get(FamiliarityRange::ZeroToThirty), owned(&["a"]).as_slice());
        assert_eq!(buckets.get(FamiliarityRange::ThirtyToFifty), owned(&["b"]).as_slice());
        assert_eq!(buckets.get(FamiliarityRange::FiftyToSeventy), owned(&["c"]).as_slice());
        assert_eq!(buckets.get(FamiliarityRange::SeventyToNinety), owned(&["d", "f"]).as_slice());
        assert_eq!(buckets.get(FamiliarityRange::NinetyToHundred), owned(&["e", "g"]).as_slice());
        assert_eq!(buckets.get(FamiliarityRange::NoData), owned(&["h"]).as_slice());
    }

    #[test]
    fn all_six_buckets_are_returned_even_when_empty() {
        let items = owned(&["a"]);
        let buckets = bucket_by_familiarity_range(&items, key, &StatsMap::new());
        assert_eq!(buckets.iter().count(), 6);
        let shown: Vec<_> = buckets.non_empty().map(|(range, _)| range.as_str()).collect();
        assert_eq!(shown, vec!["no-data"]);
    }

    #[test]
    fn struggling_items_are_weakest_first_and_capped() {
        let map = stats(&[
            ("๑", 10, 6),
            ("๒", 4, 1),
            ("๓", 8, 2),
            ("๔", 10, 9),
            ("๕", 3, 1),
        ]);
        let found = struggling_items(QuizDomain::Number, ["๑", "๒", "๓", "๔", "๕", "๖"], &map);
        let keys: Vec<&str> = found.iter().map(|s| s.item_key.as_str()).collect();
        // 25% twice: more attempts first; cap of three for numbers.
        assert_eq!(keys, vec!["๓", "๒", "๕"]);
        assert_eq!(found[0].attempts, 8);
    }
}
