// set-like algorithms over slices
use std::collections::HashSet;
use std::hash::Hash;

/// Distinct elements of `source`, each once, in first-seen order. O(n).
pub fn unique<T: Eq + Hash + Clone>(source: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(source.len());
    source.iter().filter(|x| seen.insert(*x)).cloned().collect()
}

/// Order-insensitive comparison. O(n^2).
///
/// Lengths must match and every element of `a` must occur somewhere in `b`.
/// Occurrence counts are not compared, so `[1, 1, 2]` equals `[1, 2, 2]`.
pub fn slice_equal<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().all(|x| b.contains(x))
}

/// Linear membership test.
pub fn includes<T: PartialEq>(source: &[T], element: &T) -> bool {
    source.contains(element)
}

/// Appends each element not already present in `dest`.
///
/// Membership is checked against the growing destination, so repeats inside
/// `elements` are collapsed too. O(n*k).
pub fn append_uniq<T: PartialEq>(dest: &mut Vec<T>, elements: impl IntoIterator<Item = T>) {
    for e in elements {
        if !dest.contains(&e) {
            dest.push(e);
        }
    }
}

/// Elements present in both inputs, each once.
///
/// The shorter input is walked (`a` on a tie) and the longer one searched, so
/// output follows first-seen order of the shorter side.
pub fn intersect<T: PartialEq + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut out: Vec<T> = Vec::new();
    for x in short {
        if long.contains(x) && !out.contains(x) {
            out.push(x.clone());
        }
    }
    out
}
