// 🧮 Group-by with accumulator
//
// One grouping primitive shared by every aggregator. Groups come out in
// first-encounter order, which is what stable sorts downstream break ties on.

use std::collections::HashMap;
use std::hash::Hash;

/// Fold `items` into one accumulator per key.
///
/// # Arguments
/// * `key` - extracts the group key from an item
/// * `init` - creates an empty accumulator for a new key
/// * `fold` - merges an item into its group's accumulator
///
/// # Returns
/// `(key, accumulator)` pairs in the order each key was first seen.
pub fn group_fold<'a, T, K, A, I>(
    items: I,
    key: impl Fn(&T) -> K,
    init: impl Fn() -> A,
    mut fold: impl FnMut(&mut A, &T),
) -> Vec<(K, A)>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    K: Eq + Hash + Clone,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, A)> = Vec::new();

    for item in items {
        let k = key(item);
        let slot = match index.get(&k) {
            Some(&i) => i,
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, init()));
                groups.len() - 1
            }
        };
        fold(&mut groups[slot].1, item);
    }

    groups
}

/// Round to 2 decimal places, half away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_in_first_encounter_order() {
        let words = vec!["b", "a", "b", "c", "a", "b"];

        let counts = group_fold(&words, |w| w.to_string(), || 0usize, |n, _| *n += 1);

        assert_eq!(
            counts,
            vec![
                ("b".to_string(), 3),
                ("a".to_string(), 2),
                ("c".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        let empty: Vec<i32> = Vec::new();
        let groups = group_fold(&empty, |x| *x, Vec::new, |acc: &mut Vec<i32>, x| acc.push(*x));
        assert!(groups.is_empty());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(66.666666), 66.67);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(100.0), 100.0);
    }
}
