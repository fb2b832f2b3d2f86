//! Fixpoint eligibility resolution
//!
//! A candidate with a clean body is still only eligible if every sibling
//! candidate it calls is eligible too. Eligibility is proven inductively:
//! starting from nothing, a pass promotes every candidate whose edges all
//! land in the already-proven set (earlier scopes' eligible methods count),
//! and the loop stops when a pass proves nothing new. Recursive chains with
//! no instance-independent floor never get a first member proven, so they
//! stay out - soundness over completeness.
//!
//! Each non-terminal pass grows the proven set, so the loop runs at most
//! |candidates| passes, and the result does not depend on candidate order.

use super::classify::Verdict;
use crate::model::MethodId;
use std::collections::{HashMap, HashSet};

pub fn resolve(
    candidates: &[MethodId],
    verdicts: &HashMap<MethodId, Verdict>,
    eligible: &HashSet<MethodId>,
) -> Vec<MethodId> {
    let survivors: Vec<(MethodId, &std::collections::BTreeSet<MethodId>)> = candidates
        .iter()
        .filter_map(|id| match verdicts.get(id) {
            Some(Verdict::Clean { edges }) => Some((*id, edges)),
            _ => None,
        })
        .collect();

    let mut proven: HashSet<MethodId> = HashSet::new();
    loop {
        let mut changed = false;
        for (id, edges) in &survivors {
            if proven.contains(id) {
                continue;
            }
            if edges
                .iter()
                .all(|callee| eligible.contains(callee) || proven.contains(callee))
            {
                proven.insert(*id);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    log::debug!(
        "resolve: {} of {} clean candidates proven",
        proven.len(),
        survivors.len()
    );
    // candidate order keeps the result deterministic for reporting
    candidates
        .iter()
        .copied()
        .filter(|id| proven.contains(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn clean(edges: &[u32]) -> Verdict {
        Verdict::Clean {
            edges: edges.iter().map(|e| MethodId(*e)).collect::<BTreeSet<_>>(),
        }
    }

    fn ids(raw: &[u32]) -> Vec<MethodId> {
        raw.iter().map(|i| MethodId(*i)).collect()
    }

    #[test]
    fn no_edges_promotes() {
        let candidates = ids(&[0, 1]);
        let mut verdicts = HashMap::new();
        verdicts.insert(MethodId(0), clean(&[]));
        verdicts.insert(MethodId(1), Verdict::InstanceAccess);
        let result = resolve(&candidates, &verdicts, &HashSet::new());
        assert_eq!(result, ids(&[0]));
    }

    #[test]
    fn chain_with_floor_promotes_all() {
        // 0 -> 1 -> 2, and 2 has no edges
        let candidates = ids(&[0, 1, 2]);
        let mut verdicts = HashMap::new();
        verdicts.insert(MethodId(0), clean(&[1]));
        verdicts.insert(MethodId(1), clean(&[2]));
        verdicts.insert(MethodId(2), clean(&[]));
        let result = resolve(&candidates, &verdicts, &HashSet::new());
        assert_eq!(result, ids(&[0, 1, 2]));
    }

    #[test]
    fn chain_into_access_removes_all() {
        // 0 -> 1, but 1 touches instance state
        let candidates = ids(&[0, 1]);
        let mut verdicts = HashMap::new();
        verdicts.insert(MethodId(0), clean(&[1]));
        verdicts.insert(MethodId(1), Verdict::InstanceAccess);
        let result = resolve(&candidates, &verdicts, &HashSet::new());
        assert!(result.is_empty());
    }

    #[test]
    fn self_recursion_never_promotes() {
        let candidates = ids(&[0]);
        let mut verdicts = HashMap::new();
        verdicts.insert(MethodId(0), clean(&[0]));
        let result = resolve(&candidates, &verdicts, &HashSet::new());
        assert!(result.is_empty());
    }

    #[test]
    fn mutual_recursion_never_promotes() {
        let candidates = ids(&[0, 1]);
        let mut verdicts = HashMap::new();
        verdicts.insert(MethodId(0), clean(&[1]));
        verdicts.insert(MethodId(1), clean(&[0]));
        let result = resolve(&candidates, &verdicts, &HashSet::new());
        assert!(result.is_empty());
    }

    #[test]
    fn cycle_with_external_exit_stays_out() {
        // 0 <-> 1 plus 0 -> 2 where 2 is clean: the cycle still has no
        // member provable first, so only 2 survives
        let candidates = ids(&[0, 1, 2]);
        let mut verdicts = HashMap::new();
        verdicts.insert(MethodId(0), clean(&[1, 2]));
        verdicts.insert(MethodId(1), clean(&[0]));
        verdicts.insert(MethodId(2), clean(&[]));
        let result = resolve(&candidates, &verdicts, &HashSet::new());
        assert_eq!(result, ids(&[2]));
    }

    #[test]
    fn prior_eligible_counts_as_proven() {
        // 0 -> 99 where 99 was finalized by an earlier scope
        let candidates = ids(&[0]);
        let mut verdicts = HashMap::new();
        verdicts.insert(MethodId(0), clean(&[99]));
        let mut eligible = HashSet::new();
        eligible.insert(MethodId(99));
        let result = resolve(&candidates, &verdicts, &eligible);
        assert_eq!(result, ids(&[0]));
    }

    #[test]
    fn result_is_order_independent() {
        let mut verdicts = HashMap::new();
        verdicts.insert(MethodId(0), clean(&[1]));
        verdicts.insert(MethodId(1), clean(&[2]));
        verdicts.insert(MethodId(2), clean(&[]));
        let forward = resolve(&ids(&[0, 1, 2]), &verdicts, &HashSet::new());
        let backward = resolve(&ids(&[2, 1, 0]), &verdicts, &HashSet::new());
        let forward_set: HashSet<_> = forward.into_iter().collect();
        let backward_set: HashSet<_> = backward.into_iter().collect();
        assert_eq!(forward_set, backward_set);
    }
}
