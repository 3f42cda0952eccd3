//! Disjoint-set forest with per-component merge thresholds.
//!
//! Region growing visits edges in ascending weight order and only joins two
//! components when the edge is no heavier than either component's internal
//! threshold. The forest tracks that threshold alongside the usual size and
//! rank bookkeeping.

#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    size: Vec<usize>,
    threshold: Vec<f64>,
    num_sets: usize,
}

impl DisjointSet {
    /// Create `n` singleton sets, each starting with `initial_threshold`
    pub fn new(n: usize, initial_threshold: f64) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            size: vec![1; n],
            threshold: vec![initial_threshold; n],
            num_sets: n,
        }
    }

    /// Number of elements in the forest
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint sets currently in the forest
    pub fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Root of the set containing `node`, compressing the path on the way
    pub fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    /// Merge the sets containing `left` and `right` and return the new root.
    ///
    /// Union by rank; on equal rank the root of `left` wins. The merged
    /// set keeps the surviving root's threshold until the caller updates it.
    pub fn union(&mut self, left: usize, right: usize) -> usize {
        let mut left = self.find(left);
        let mut right = self.find(right);
        if left == right {
            return left;
        }
        let left_rank = self.rank[left];
        let right_rank = self.rank[right];
        if left_rank < right_rank {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        self.size[left] += self.size[right];
        if left_rank == right_rank {
            self.rank[left] = left_rank.saturating_add(1);
        }
        self.num_sets -= 1;
        left
    }

    /// Size of the set rooted at `root`
    pub fn size(&self, root: usize) -> usize {
        debug_assert_eq!(self.parent[root], root, "size queried on a non-root element");
        self.size[root]
    }

    /// Internal merge threshold of the set rooted at `root`
    pub fn threshold(&self, root: usize) -> f64 {
        debug_assert_eq!(self.parent[root], root, "threshold queried on a non-root element");
        self.threshold[root]
    }

    pub fn set_threshold(&mut self, root: usize, threshold: f64) {
        debug_assert_eq!(self.parent[root], root, "threshold set on a non-root element");
        self.threshold[root] = threshold;
    }
}
