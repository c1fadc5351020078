//! 并查集
//!
//! 路径压缩 + 按秩合并。秩相同时把第二个根挂到第一个根下。

/// 不相交集合
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl UnionFind {
    /// 创建 `n` 个单元素集合
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// 元素个数
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// 查找集合代表元，并把路径上的节点直接挂到根下
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    /// 合并 `x` 与 `y` 所在的集合；已在同一集合时返回 false
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let x_root = self.find(x);
        let y_root = self.find(y);
        if x_root == y_root {
            return false;
        }

        match self.rank[x_root].cmp(&self.rank[y_root]) {
            std::cmp::Ordering::Less => self.parent[x_root] = y_root,
            std::cmp::Ordering::Greater => self.parent[y_root] = x_root,
            std::cmp::Ordering::Equal => {
                self.parent[y_root] = x_root;
                self.rank[x_root] += 1;
            }
        }
        true
    }

    /// 是否在同一集合
    pub fn connected(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// 集合个数
    pub fn count_sets(&mut self) -> usize {
        (0..self.parent.len()).filter(|&i| self.find(i) == i).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons() {
        let mut uf = UnionFind::new(4);
        assert_eq!(uf.len(), 4);
        assert_eq!(uf.count_sets(), 4);
        for i in 0..4 {
            assert_eq!(uf.find(i), i);
        }
    }

    #[test]
    fn test_union_and_find() {
        let mut uf = UnionFind::new(6);

        assert!(uf.union(0, 1));
        assert!(uf.union(2, 3));
        assert!(uf.union(1, 3));
        assert!(!uf.union(0, 2));

        assert_eq!(uf.find(0), uf.find(3));
        assert!(uf.connected(1, 2));
        assert!(!uf.connected(0, 4));
        assert!(!uf.connected(4, 5));
        assert_eq!(uf.count_sets(), 3);
    }

    #[test]
    fn test_equal_rank_attaches_second_under_first() {
        let mut uf = UnionFind::new(2);
        uf.union(0, 1);
        assert_eq!(uf.find(1), 0);

        let mut uf = UnionFind::new(2);
        uf.union(1, 0);
        assert_eq!(uf.find(0), 1);
    }

    #[test]
    fn test_lower_rank_attaches_under_higher() {
        let mut uf = UnionFind::new(3);
        uf.union(1, 2); // 根 1，秩 1
        uf.union(0, 1); // 0 秩 0 < 1，挂到 1 下
        assert_eq!(uf.find(0), 1);
        assert_eq!(uf.find(2), 1);
    }

    #[test]
    fn test_path_compression() {
        let mut uf = UnionFind::new(5);
        // 人为构造一条链 4 -> 3 -> 2 -> 1 -> 0
        uf.parent = vec![0, 0, 1, 2, 3];

        assert_eq!(uf.find(4), 0);
        assert_eq!(uf.parent, vec![0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_matches_naive_partition() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(11);
        let n = 40;
        let mut uf = UnionFind::new(n);
        let mut label: Vec<usize> = (0..n).collect();

        for _ in 0..60 {
            let (a, b) = (rng.gen_range(0..n), rng.gen_range(0..n));
            uf.union(a, b);
            let (la, lb) = (label[a], label[b]);
            for l in label.iter_mut() {
                if *l == lb {
                    *l = la;
                }
            }
        }

        for x in 0..n {
            for y in 0..n {
                assert_eq!(uf.connected(x, y), label[x] == label[y]);
            }
        }
    }
}
