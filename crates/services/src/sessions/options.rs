use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Wrong answers offered next to the correct one by default.
pub const DEFAULT_MAX_WRONG: usize = 5;

/// Multiple-choice options for one question.
///
/// Picks up to `max_wrong` distinct wrong answers at random from
/// `candidates` (the correct answer and repeats are skipped), adds the
/// correct answer, and shuffles the lot.
pub fn build_choices<I, S, R>(correct: &str, candidates: I, max_wrong: usize, rng: &mut R) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let mut seen = HashSet::new();
    let mut wrong: Vec<String> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let candidate = candidate.as_ref();
            (candidate != correct && seen.insert(candidate.to_string())).then(|| candidate.to_string())
        })
        .collect();

    wrong.shuffle(rng);
    wrong.truncate(max_wrong);
    wrong.push(correct.to_string());
    wrong.shuffle(rng);
    wrong
}
