//! Per-stream alignment lookups.

use std::collections::BTreeSet;

use crate::parse::Link;

/// Lookups over one source-target alignment.
#[derive(Debug, Clone)]
pub struct AlignmentIndex {
    /// Sorted target positions linked from each source position
    ialigns: Vec<Vec<usize>>,
    /// `(min, max)` source position linked to each target position
    jclosures: Vec<Option<(usize, usize)>>,
}

impl AlignmentIndex {
    pub fn new(links: &[Link], source_len: usize, target_len: usize) -> AlignmentIndex {
        let mut ialigns: Vec<Vec<usize>> = vec![Vec::new(); source_len];
        let mut jclosures: Vec<Option<(usize, usize)>> = vec![None; target_len];
        for &(i, j) in links {
            if i >= ialigns.len() {
                ialigns.resize(i + 1, Vec::new());
            }
            if j >= jclosures.len() {
                jclosures.resize(j + 1, None);
            }
            ialigns[i].push(j);
            jclosures[j] = Some(match jclosures[j] {
                Some((lo, hi)) => (lo.min(i), hi.max(i)),
                None => (i, i),
            });
        }
        for targets in ialigns.iter_mut() {
            targets.sort_unstable();
        }
        AlignmentIndex { ialigns, jclosures }
    }

    pub fn targets_of(&self, i: usize) -> &[usize] {
        self.ialigns.get(i).map(|t| t.as_slice()).unwrap_or(&[])
    }

    /// `None` when target position `j` is unaligned.
    pub fn closure(&self, j: usize) -> Option<(usize, usize)> {
        self.jclosures.get(j).copied().flatten()
    }
}

/// Aligned positions per stream. The source entry is the union over every
/// alignment; entry `k` holds the target positions of alignment `k - 1`.
pub fn nonnull_sets(aligns: &[Vec<Link>]) -> Vec<BTreeSet<usize>> {
    let mut nonnull: Vec<BTreeSet<usize>> = vec![aligns.iter().flatten().map(|&(i, _)| i).collect()];
    for links in aligns {
        nonnull.push(links.iter().map(|&(_, j)| j).collect());
    }
    nonnull
}
