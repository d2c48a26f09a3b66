//! Pairwise point-exchange relaxation
//!
//! One pass visits every unordered pair of sites. For a pair whose caps
//! overlap, members that sit closer to the other representative are traded
//! greedily, best candidates first, for as long as a trade does not raise the
//! pair's energy. Sites that traded are recentered before the next pair is
//! examined.
//!
//! # Gain
//!
//! For a member `p` of site `s` paired against site `t`:
//!
//! ```text
//! gain(p) = d(rep_s, p)² − d(rep_t, p)²
//! ```
//!
//! i.e. the energy released by moving `p` from `s` to `t` with both
//! representatives held fixed. Trading `p` (from `s`) for `q` (from `t`)
//! changes the pair's energy by `−(gain(p) + gain(q))`.

use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use crate::config::RecenterMode;
use crate::geometry::angular_distance;
use crate::site::Site;

/// Result of one optimization pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassOutcome {
    /// True if no exchange was accepted anywhere during the pass
    pub all_stable: bool,
    /// Total energy over all sites after the pass
    pub energy: f64,
    /// Number of point exchanges accepted during the pass
    pub swaps: usize,
}

/// Heap entry: a member index keyed by its gain (largest first, ties by index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Candidate {
    gain: OrderedFloat<f64>,
    index: usize,
}

/// Gain of moving `member` from the site at `own` to the site at `other`
#[inline]
fn gain(own: &Site, other: &Site, member: usize) -> f64 {
    let p = own.members[member];
    let d_own = angular_distance(own.representative, p);
    let d_other = angular_distance(other.representative, p);
    d_own * d_own - d_other * d_other
}

/// Trade members between sites `i` and `j` (with `i < j`)
///
/// Representatives and statistics are left untouched; the caller recenters
/// both sites when the returned exchange count is nonzero.
pub(crate) fn exchange_members(sites: &mut [Site], i: usize, j: usize) -> usize {
    debug_assert!(i < j && j < sites.len());

    let (site_i, site_j) = (&sites[i], &sites[j]);

    let mut heap_i: BinaryHeap<Candidate> = (0..site_i.members.len())
        .map(|index| Candidate {
            gain: OrderedFloat(gain(site_i, site_j, index)),
            index,
        })
        .collect();

    let best_i = match heap_i.peek() {
        Some(top) => top.gain.0,
        None => return 0,
    };

    // A member of j that cannot pay for even the best member of i is never traded
    let mut heap_j: BinaryHeap<Candidate> = (0..site_j.members.len())
        .filter_map(|index| {
            let g = gain(site_j, site_i, index);
            (g >= -best_i).then_some(Candidate {
                gain: OrderedFloat(g),
                index,
            })
        })
        .collect();

    let (head, tail) = sites.split_at_mut(j);
    let site_i = &mut head[i];
    let site_j = &mut tail[0];

    let mut swaps = 0;
    while let (Some(top_i), Some(top_j)) = (heap_i.peek().copied(), heap_j.peek().copied()) {
        if top_i.gain.0 + top_j.gain.0 < 0.0 {
            break;
        }

        std::mem::swap(
            &mut site_i.members[top_i.index],
            &mut site_j.members[top_j.index],
        );
        heap_i.pop();
        heap_j.pop();
        swaps += 1;
    }

    swaps
}

/// Run one optimization pass over every pair of sites
///
/// A pair is skipped when both sites were stable after the previous pass, or
/// when their caps do not overlap. Stability flags are read as left by the
/// previous pass and rewritten only once the pass is complete: a site is
/// stable afterwards exactly when no exchange touched it.
pub fn relax_pass(sites: &mut [Site], mode: RecenterMode) -> PassOutcome {
    let count = sites.len();
    let mut touched = vec![false; count];
    let mut swaps = 0;

    for i in 0..count {
        for j in (i + 1)..count {
            if sites[i].stable && sites[j].stable {
                continue;
            }
            if !sites[i].caps_overlap(&sites[j]) {
                continue;
            }

            let exchanged = exchange_members(sites, i, j);
            if exchanged > 0 {
                sites[i].recenter(mode);
                sites[j].recenter(mode);
                touched[i] = true;
                touched[j] = true;
                swaps += exchanged;
            }
        }
    }

    let mut all_stable = true;
    let mut energy = 0.0;
    for (site, &changed) in sites.iter_mut().zip(&touched) {
        site.stable = !changed;
        all_stable &= !changed;
        energy += site.energy;
    }

    PassOutcome {
        all_stable,
        energy,
        swaps,
    }
}
