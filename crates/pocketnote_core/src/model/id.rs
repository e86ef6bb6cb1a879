//! Collision-checked id allocation.
//!
//! # Invariants
//! - A returned id is never one for which `is_taken` answered `true`.
//! - Allocation does not depend on wall-clock resolution, so rapid
//!   successive calls cannot collide.

use uuid::Uuid;

/// Allocates a fresh random id that is not already taken.
pub fn allocate_id(is_taken: impl Fn(&str) -> bool) -> String {
    allocate_id_with(|| Uuid::new_v4().to_string(), is_taken)
}

/// Allocates an id from `next_candidate`, redrawing while `is_taken` holds.
///
/// `next_candidate` must eventually produce an untaken value.
pub fn allocate_id_with(
    mut next_candidate: impl FnMut() -> String,
    is_taken: impl Fn(&str) -> bool,
) -> String {
    loop {
        let candidate = next_candidate();
        if !is_taken(candidate.as_str()) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{allocate_id, allocate_id_with};
    use std::collections::HashSet;

    #[test]
    fn allocate_id_with_skips_taken_candidates() {
        let mut candidates = vec!["c".to_string(), "b".to_string(), "a".to_string()];
        let taken = ["a", "b"];
        let id = allocate_id_with(
            || candidates.pop().expect("candidates exhausted"),
            |value| taken.contains(&value),
        );
        assert_eq!(id, "c");
    }

    #[test]
    fn allocate_id_never_repeats_in_tight_loop() {
        let mut seen: HashSet<String> = HashSet::new();
        for _ in 0..1_000 {
            let id = allocate_id(|value| seen.contains(value));
            assert!(seen.insert(id));
        }
    }
}
