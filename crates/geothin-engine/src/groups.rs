//! GroupPartitioner: connected components of the neighbor graph.

use geothin_core::types::RecordId;
use petgraph::unionfind::UnionFind;

use crate::types::NeighborEdge;

/// One connected component. `members` are sorted ascending; `edges` are
/// the neighbor edges with both endpoints in this group, sorted by `(a, b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub members: Vec<RecordId>,
    pub edges: Vec<NeighborEdge>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Singletons cannot hold a conflict.
    pub fn is_trivial(&self) -> bool {
        self.members.len() < 2
    }

    /// Scheduling weight: edges dominate similarity cost, members the rest.
    pub fn work(&self) -> usize {
        self.edges.len() + self.members.len()
    }
}

/// Disjoint groups covering every record, ordered by smallest member.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    pub groups: Vec<Group>,
    /// `RecordId` → index into `groups`.
    pub group_of: Vec<usize>,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups with at least two members.
    pub fn nontrivial(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(|g| !g.is_trivial())
    }

    /// Size of the largest group, 0 when there are no records.
    pub fn largest(&self) -> usize {
        self.groups.iter().map(Group::len).max().unwrap_or(0)
    }
}

pub struct GroupPartitioner;

impl GroupPartitioner {
    /// Split `n` records into components linked by `edges`.
    pub fn partition(n: usize, edges: Vec<NeighborEdge>) -> Partition {
        let mut sets: UnionFind<u32> = UnionFind::new(n);
        for edge in &edges {
            sets.union(edge.a.0, edge.b.0);
        }
        let labels = sets.into_labeling();

        // Walking ids in ascending order numbers groups by smallest member.
        let mut slot_of_label = vec![usize::MAX; n];
        let mut group_of = Vec::with_capacity(n);
        let mut groups: Vec<Group> = Vec::new();
        for (index, &label) in labels.iter().enumerate() {
            let root = label as usize;
            if slot_of_label[root] == usize::MAX {
                slot_of_label[root] = groups.len();
                groups.push(Group {
                    members: Vec::new(),
                    edges: Vec::new(),
                });
            }
            let slot = slot_of_label[root];
            groups[slot].members.push(RecordId::from_index(index));
            group_of.push(slot);
        }

        for edge in edges {
            groups[group_of[edge.a.index()]].edges.push(edge);
        }

        Partition { groups, group_of }
    }
}
