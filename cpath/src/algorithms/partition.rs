/// Disjoint sets over the indices `0..len`, union by size with path compression.
#[derive(Debug, Clone)]
pub struct Partition {
    parent: Vec<usize>,
    size: Vec<usize>,
    count: usize,
}

impl Partition {
    /// Every index starts in its own set.
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            size: vec![1; len],
            count: len,
        }
    }

    /// Number of distinct sets.
    pub fn set_count(&self) -> usize {
        self.count
    }

    /// Representative of the set containing `i`.
    pub fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = i;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    /// Joins the sets of `a` and `b`, the smaller one is folded into the bigger one.
    ///
    /// Returns `false` when they already shared a set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (a, b) = (self.find(a), self.find(b));
        if a == b {
            return false;
        }

        let (big, small) = if self.size[a] >= self.size[b] {
            (a, b)
        } else {
            (b, a)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        self.count -= 1;

        true
    }
}

#[cfg(test)]
mod tests {
    use super::Partition;

    #[test]
    fn union_find() {
        let mut sets = Partition::new(6);
        assert_eq!(sets.set_count(), 6);

        assert!(sets.union(0, 1));
        assert!(sets.union(2, 3));
        assert!(sets.union(1, 3));
        assert!(!sets.union(0, 2));

        assert_eq!(sets.find(0), sets.find(3));
        assert_ne!(sets.find(0), sets.find(4));
        assert_eq!(sets.find(4), 4);
        assert_eq!(sets.set_count(), 3);
    }

    #[test]
    fn smaller_set_joins_bigger() {
        let mut sets = Partition::new(4);
        sets.union(1, 2);
        sets.union(1, 3);
        let root = sets.find(1);

        sets.union(0, 3);
        assert_eq!(sets.find(0), root);
    }

    #[test]
    fn long_chain_is_compressed() {
        let mut sets = Partition::new(100);
        for i in 1..100 {
            sets.union(i, i - 1);
        }
        let root = sets.find(99);
        assert!((0..100).all(|i| sets.find(i) == root));
        assert_eq!(sets.set_count(), 1);
    }
}
