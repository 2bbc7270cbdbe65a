//! Best-first search core behind [PathingGrid::find_path](crate::PathingGrid::find_path).
//!
//! Generic over node and cost type and driven by successor/heuristic/success
//! closures. The open set and the closed arena are insertion-ordered maps;
//! that order is what makes equal-cost selection deterministic, see [astar].

use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Bookkeeping for a discovered but not yet finalized node: the index of its
/// predecessor in the closed arena (`usize::MAX` for the start) and its
/// current best costs. `f = g + h` is always derived.
struct OpenEntry<K> {
    parent: usize,
    g: K,
    h: K,
}

/// Follows parent indices through the closed arena from `goal` back to the
/// start and returns the chain in start-to-goal order.
fn reverse_path<N, K>(closed: &FxIndexMap<N, (usize, K)>, goal: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
{
    let mut path: Vec<N> = itertools::unfold(goal, |ix| {
        closed.get_index(*ix).map(|(node, &(parent, _))| {
            *ix = parent;
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Runs a best-first search from `start` until `success` holds for the
/// expanded node or the frontier drains. Returns the reconstructed path and
/// its cost on success, plus the number of expansions performed either way.
///
/// Selection scans the open set in insertion order and replaces the running
/// minimum only on strictly smaller `f`, so the first-discovered of several
/// equal-cost candidates wins. Relaxation is non-strict: rediscovering an
/// open node at equal `g` rewires its parent to the current node. Both rules
/// decide which of several optimal paths is returned and are relied on by the
/// determinism tests.
pub(crate) fn astar<N, K, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> (Option<(Vec<N>, K)>, usize)
where
    N: Eq + Hash + Clone,
    K: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, K)>,
    FH: FnMut(&N) -> K,
    FS: FnMut(&N) -> bool,
{
    let mut open: FxIndexMap<N, OpenEntry<K>> = FxIndexMap::default();
    let mut closed: FxIndexMap<N, (usize, K)> = FxIndexMap::default();
    let h = heuristic(start);
    open.insert(
        start.clone(),
        OpenEntry {
            parent: usize::MAX,
            g: Zero::zero(),
            h,
        },
    );
    let mut expansions = 0;
    loop {
        let mut iter = open.iter();
        let Some((_, first)) = iter.next() else { break };
        let mut best_ix = 0;
        let mut best_f = first.g + first.h;
        for (ix, (_, e)) in iter.enumerate() {
            let f = e.g + e.h;
            if f < best_f {
                best_ix = ix + 1;
                best_f = f;
            }
        }
        // Order-preserving removal: the scan order of the remaining entries
        // must not change across iterations.
        let Some((node, entry)) = open.shift_remove_index(best_ix) else {
            break;
        };
        expansions += 1;
        closed.insert(node.clone(), (entry.parent, entry.g));
        let node_ix = closed.len() - 1;
        if success(&node) {
            let path = reverse_path(&closed, node_ix);
            return (Some((path, entry.g)), expansions);
        }
        for (successor, move_cost) in successors(&node) {
            if closed.contains_key(&successor) {
                continue;
            }
            let new_cost = entry.g + move_cost;
            match open.entry(successor) {
                Vacant(e) => {
                    let h = heuristic(e.key());
                    e.insert(OpenEntry {
                        parent: node_ix,
                        g: new_cost,
                        h,
                    });
                }
                Occupied(mut e) => {
                    if new_cost <= e.get().g {
                        let h = e.get().h;
                        e.insert(OpenEntry {
                            parent: node_ix,
                            g: new_cost,
                            h,
                        });
                    }
                }
            }
        }
    }
    (None, expansions)
}
