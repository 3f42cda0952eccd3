//! Inferior/superior links between topology nodes.
//!
//! Nodes live in a [`TopologyGraph`] arena and refer to each other only
//! through [`NodeId`] handles, so relation lists never own their targets.
//! A handle whose node has been removed is *stale*: link operations reject
//! it with [`Error::InvalidReference`], and the two-way unlink-all
//! operations skip it with a warning.
//!
//! Two-way operations keep `a ∈ b.inferiors ⇔ b ∈ a.superiors`; one-way and
//! simple operations touch a single list and leave symmetry to the caller.

use slotmap::{new_key_type, SlotMap};
use sphtopo_core::{Error, Result};
use tracing::warn;

new_key_type! {
    /// Handle to a node in a [`TopologyGraph`]
    pub struct NodeId;
}

/// Which relation list an operation acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relation {
    Inferior,
    Superior,
}

impl Relation {
    fn name(self) -> &'static str {
        match self {
            Relation::Inferior => "inferior",
            Relation::Superior => "superior",
        }
    }
}

/// A node's payload plus its two relation lists
#[derive(Debug, Clone)]
pub struct TopologyNode<T> {
    pub data: T,
    inferiors: Vec<NodeId>,
    superiors: Vec<NodeId>,
}

impl<T> TopologyNode<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            inferiors: Vec::new(),
            superiors: Vec::new(),
        }
    }

    /// Nodes below this one, in insertion order
    pub fn inferiors(&self) -> &[NodeId] {
        &self.inferiors
    }

    /// Nodes above this one, in insertion order
    pub fn superiors(&self) -> &[NodeId] {
        &self.superiors
    }

    fn list(&self, relation: Relation) -> &Vec<NodeId> {
        match relation {
            Relation::Inferior => &self.inferiors,
            Relation::Superior => &self.superiors,
        }
    }

    fn list_mut(&mut self, relation: Relation) -> &mut Vec<NodeId> {
        match relation {
            Relation::Inferior => &mut self.inferiors,
            Relation::Superior => &mut self.superiors,
        }
    }
}

/// Arena of topology nodes with inferior/superior relations.
///
/// Relations may form cycles; nothing here assumes a tree.
#[derive(Debug, Clone)]
pub struct TopologyGraph<T> {
    nodes: SlotMap<NodeId, TopologyNode<T>>,
}

impl<T> Default for TopologyGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TopologyGraph<T> {
    pub fn new() -> Self {
        Self { nodes: SlotMap::with_key() }
    }

    /// Add a node with no relations
    pub fn insert(&mut self, data: T) -> NodeId {
        self.nodes.insert(TopologyNode::new(data))
    }

    /// Remove a node and return its payload.
    ///
    /// The node's own lists are cleared first without touching its
    /// neighbours, so any node that still lists `id` keeps a stale handle.
    /// Call [`unlink_all_inferiors_two_way`](Self::unlink_all_inferiors_two_way)
    /// and [`unlink_all_superiors_two_way`](Self::unlink_all_superiors_two_way)
    /// beforehand to detach it cleanly.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }
        // Without a caller these only clear the node's own lists and cannot fail.
        self.unlink_all_inferiors(id, None).ok();
        self.unlink_all_superiors(id, None).ok();
        self.nodes.remove(id).map(|node| node.data)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&TopologyNode<T>> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut TopologyNode<T>> {
        self.nodes.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Handles of every live node
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys()
    }

    /// Inferiors of `id`; empty for a stale handle
    pub fn inferiors(&self, id: NodeId) -> &[NodeId] {
        match self.nodes.get(id) {
            Some(node) => node.inferiors(),
            None => &[],
        }
    }

    /// Superiors of `id`; empty for a stale handle
    pub fn superiors(&self, id: NodeId) -> &[NodeId] {
        match self.nodes.get(id) {
            Some(node) => node.superiors(),
            None => &[],
        }
    }

    pub fn num_inferiors(&self, id: NodeId) -> usize {
        self.inferiors(id).len()
    }

    pub fn num_superiors(&self, id: NodeId) -> usize {
        self.superiors(id).len()
    }

    fn node(&self, id: NodeId, role: &str) -> Result<&TopologyNode<T>> {
        self.nodes.get(id).ok_or_else(|| {
            warn!(?id, role, "stale topology node handle");
            Error::InvalidReference(format!("{} {:?} is not a live node", role, id))
        })
    }

    fn node_mut(&mut self, id: NodeId, role: &str) -> Result<&mut TopologyNode<T>> {
        self.nodes.get_mut(id).ok_or_else(|| {
            warn!(?id, role, "stale topology node handle");
            Error::InvalidReference(format!("{} {:?} is not a live node", role, id))
        })
    }

    fn require(&self, id: NodeId, role: &str) -> Result<()> {
        self.node(id, role).map(|_| ())
    }

    /// Append `target` to `owner`'s list unless already present
    fn add_one_way(&mut self, owner: NodeId, relation: Relation, target: NodeId) -> Result<bool> {
        self.require(target, relation.name())?;
        let list = self.node_mut(owner, "node")?.list_mut(relation);
        if list.contains(&target) {
            return Ok(false);
        }
        list.push(target);
        Ok(true)
    }

    /// Drop `target` from `owner`'s list; `target` need not be live
    fn remove_one_way(&mut self, owner: NodeId, relation: Relation, target: NodeId) -> Result<bool> {
        let list = self.node_mut(owner, "node")?.list_mut(relation);
        match list.iter().position(|&id| id == target) {
            Some(index) => {
                list.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Make `child` an inferior of `parent` and `parent` a superior of `child`.
    ///
    /// Returns `Ok(false)` when `child` is already among `parent`'s
    /// inferiors; nothing changes in that case.
    pub fn link_inferior(&mut self, parent: NodeId, child: NodeId) -> Result<bool> {
        self.require(parent, "parent")?;
        if !self.add_one_way(parent, Relation::Inferior, child)? {
            return Ok(false);
        }
        // Reciprocal call sees `child` already present and stops there.
        self.link_superior(parent, child)?;
        Ok(true)
    }

    /// Make `parent` a superior of `child` and `child` an inferior of `parent`.
    ///
    /// Returns `Ok(false)` when `parent` is already among `child`'s
    /// superiors; nothing changes in that case.
    pub fn link_superior(&mut self, parent: NodeId, child: NodeId) -> Result<bool> {
        self.require(child, "child")?;
        if !self.add_one_way(child, Relation::Superior, parent)? {
            return Ok(false);
        }
        self.link_inferior(parent, child)?;
        Ok(true)
    }

    /// Add `inferior` to `node`'s inferiors without the reciprocal link
    pub fn link_inferior_one_way(&mut self, node: NodeId, inferior: NodeId) -> Result<bool> {
        self.add_one_way(node, Relation::Inferior, inferior)
    }

    /// Add `superior` to `node`'s superiors without the reciprocal link
    pub fn link_superior_one_way(&mut self, node: NodeId, superior: NodeId) -> Result<bool> {
        self.add_one_way(node, Relation::Superior, superior)
    }

    /// Remove `child` from `parent`'s inferiors and `parent` from `child`'s superiors.
    ///
    /// Returns `Ok(false)` when `child` is not among `parent`'s inferiors.
    pub fn unlink_inferior(&mut self, parent: NodeId, child: NodeId) -> Result<bool> {
        self.require(parent, "parent")?;
        self.require(child, "child")?;
        if !self.remove_one_way(parent, Relation::Inferior, child)? {
            return Ok(false);
        }
        self.unlink_superior(parent, child)?;
        Ok(true)
    }

    /// Remove `parent` from `child`'s superiors and `child` from `parent`'s inferiors.
    ///
    /// Returns `Ok(false)` when `parent` is not among `child`'s superiors.
    pub fn unlink_superior(&mut self, parent: NodeId, child: NodeId) -> Result<bool> {
        self.require(parent, "parent")?;
        self.require(child, "child")?;
        if !self.remove_one_way(child, Relation::Superior, parent)? {
            return Ok(false);
        }
        self.unlink_inferior(parent, child)?;
        Ok(true)
    }

    /// Remove `link` from `node`'s inferiors only.
    ///
    /// `link` may be stale, which is how dangling entries get pruned.
    pub fn unlink_inferior_simple(&mut self, node: NodeId, link: NodeId) -> Result<bool> {
        self.remove_one_way(node, Relation::Inferior, link)
    }

    /// Remove `link` from `node`'s superiors only
    pub fn unlink_superior_simple(&mut self, node: NodeId, link: NodeId) -> Result<bool> {
        self.remove_one_way(node, Relation::Superior, link)
    }

    /// Clear `node`'s inferiors.
    ///
    /// When `caller` is given, `caller` (not `node`) is also removed from
    /// the superiors of each former inferior. Back-references to `node`
    /// itself are left in place unless `caller == node`.
    pub fn unlink_all_inferiors(&mut self, node: NodeId, caller: Option<NodeId>) -> Result<()> {
        self.clear_relation(node, Relation::Inferior, caller, false)
    }

    /// Clear `node`'s superiors.
    ///
    /// When `caller` is given, `caller` is also removed from the inferiors
    /// of each former superior.
    pub fn unlink_all_superiors(&mut self, node: NodeId, caller: Option<NodeId>) -> Result<()> {
        self.clear_relation(node, Relation::Superior, caller, false)
    }

    /// Remove `node` from the superiors of each of its inferiors, then clear
    /// its inferiors. Stale entries are logged and skipped.
    pub fn unlink_all_inferiors_two_way(&mut self, node: NodeId) -> Result<()> {
        self.clear_relation(node, Relation::Inferior, Some(node), true)
    }

    /// Remove `node` from the inferiors of each of its superiors, then clear
    /// its superiors. Stale entries are logged and skipped.
    pub fn unlink_all_superiors_two_way(&mut self, node: NodeId) -> Result<()> {
        self.clear_relation(node, Relation::Superior, Some(node), true)
    }

    fn clear_relation(
        &mut self,
        node: NodeId,
        relation: Relation,
        caller: Option<NodeId>,
        warn_stale: bool,
    ) -> Result<()> {
        let former = std::mem::take(self.node_mut(node, "node")?.list_mut(relation));

        let Some(caller) = caller else {
            return Ok(());
        };

        let reciprocal = match relation {
            Relation::Inferior => Relation::Superior,
            Relation::Superior => Relation::Inferior,
        };

        for link in former {
            match self.nodes.get_mut(link) {
                Some(other) => {
                    let list = other.list_mut(reciprocal);
                    if let Some(index) = list.iter().position(|&id| id == caller) {
                        list.remove(index);
                    }
                }
                None if warn_stale => {
                    warn!(?node, ?link, relation = relation.name(), "stale entry in relation list");
                }
                None => {}
            }
        }
        Ok(())
    }

    /// One-paragraph summary of a node
    pub fn print(&self, id: NodeId) -> String {
        format!(
            "<TopologyNode {:?}>\nnumber of inferiors {}\nnumber of superiors {}\n",
            id,
            self.num_inferiors(id),
            self.num_superiors(id)
        )
    }

    /// Inferior and superior listings, each line indented by `blanking` spaces
    pub fn describe(&self, id: NodeId, blanking: usize) -> String {
        let mut out = self.describe_relation(id, Relation::Inferior, blanking);
        out.push_str(&self.describe_relation(id, Relation::Superior, blanking));
        out
    }

    pub fn describe_inferiors(&self, id: NodeId, blanking: usize) -> String {
        self.describe_relation(id, Relation::Inferior, blanking)
    }

    pub fn describe_superiors(&self, id: NodeId, blanking: usize) -> String {
        self.describe_relation(id, Relation::Superior, blanking)
    }

    fn describe_relation(&self, id: NodeId, relation: Relation, blanking: usize) -> String {
        let pad = " ".repeat(blanking);
        let heading = match relation {
            Relation::Inferior => "**INFERIORS:",
            Relation::Superior => "**SUPERIORS:",
        };
        let list: &[NodeId] = match self.nodes.get(id) {
            Some(node) => node.list(relation),
            None => &[],
        };

        let mut out = if list.is_empty() {
            format!("{}{}  Empty\n", pad, heading)
        } else {
            format!("{}{}\n", pad, heading)
        };
        for &link in list {
            for line in self.print(link).lines() {
                out.push_str(&format!("{}{}\n", pad, line));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(n: usize) -> (TopologyGraph<usize>, Vec<NodeId>) {
        let mut graph = TopologyGraph::new();
        let ids = (0..n).map(|i| graph.insert(i)).collect();
        (graph, ids)
    }

    #[test]
    fn test_link_inferior_is_two_way() {
        let (mut g, ids) = graph_with(2);
        let (p, c) = (ids[0], ids[1]);

        assert_eq!(g.link_inferior(p, c), Ok(true));
        assert_eq!(g.inferiors(p), &[c]);
        assert_eq!(g.superiors(c), &[p]);
        assert!(g.superiors(p).is_empty());
        assert!(g.inferiors(c).is_empty());
    }

    #[test]
    fn test_link_superior_is_two_way() {
        let (mut g, ids) = graph_with(2);
        let (n1, n2) = (ids[0], ids[1]);

        assert_eq!(g.link_superior(n1, n2), Ok(true));
        assert_eq!(g.inferiors(n1), &[n2]);
        assert_eq!(g.superiors(n2), &[n1]);
    }

    #[test]
    fn test_duplicate_link_rejected() {
        let (mut g, ids) = graph_with(2);
        let (p, c) = (ids[0], ids[1]);

        assert_eq!(g.link_inferior(p, c), Ok(true));
        assert_eq!(g.link_inferior(p, c), Ok(false));
        assert_eq!(g.link_superior(p, c), Ok(false));
        assert_eq!(g.inferiors(p), &[c]);
        assert_eq!(g.superiors(c), &[p]);
    }

    #[test]
    fn test_link_completes_half_link() {
        let (mut g, ids) = graph_with(2);
        let (p, c) = (ids[0], ids[1]);

        assert_eq!(g.link_superior_one_way(c, p), Ok(true));
        assert_eq!(g.link_inferior(p, c), Ok(true));
        assert_eq!(g.inferiors(p), &[c]);
        assert_eq!(g.superiors(c), &[p]);
    }

    #[test]
    fn test_link_with_stale_handle_fails_without_change() {
        let (mut g, ids) = graph_with(2);
        let (p, gone) = (ids[0], ids[1]);
        g.remove(gone);

        assert!(matches!(g.link_inferior(p, gone), Err(Error::InvalidReference(_))));
        assert!(matches!(g.link_superior(gone, p), Err(Error::InvalidReference(_))));
        assert!(matches!(g.link_inferior_one_way(p, gone), Err(Error::InvalidReference(_))));
        assert!(matches!(g.link_superior_one_way(p, gone), Err(Error::InvalidReference(_))));
        assert!(g.inferiors(p).is_empty());
        assert!(g.superiors(p).is_empty());
    }

    #[test]
    fn test_one_way_links() {
        let (mut g, ids) = graph_with(2);
        let (a, b) = (ids[0], ids[1]);

        assert_eq!(g.link_inferior_one_way(a, b), Ok(true));
        assert_eq!(g.link_inferior_one_way(a, b), Ok(false));
        assert!(g.superiors(b).is_empty());

        assert_eq!(g.link_superior_one_way(a, b), Ok(true));
        assert!(g.inferiors(b).is_empty());
        assert_eq!(g.superiors(a), &[b]);
    }

    #[test]
    fn test_link_unlink_round_trip() {
        let (mut g, ids) = graph_with(3);
        let (p, c, other) = (ids[0], ids[1], ids[2]);
        g.link_inferior(p, other).unwrap();
        g.link_inferior(other, c).unwrap();

        let before = (g.inferiors(p).to_vec(), g.superiors(c).to_vec());
        g.link_inferior(p, c).unwrap();
        assert_eq!(g.unlink_inferior(p, c), Ok(true));
        assert_eq!((g.inferiors(p).to_vec(), g.superiors(c).to_vec()), before);
    }

    #[test]
    fn test_unlink_superior_is_two_way() {
        let (mut g, ids) = graph_with(2);
        let (p, c) = (ids[0], ids[1]);
        g.link_inferior(p, c).unwrap();

        assert_eq!(g.unlink_superior(p, c), Ok(true));
        assert!(g.inferiors(p).is_empty());
        assert!(g.superiors(c).is_empty());
        assert_eq!(g.unlink_superior(p, c), Ok(false));
        assert_eq!(g.unlink_inferior(p, c), Ok(false));
    }

    #[test]
    fn test_unlink_inferior_clears_half_link() {
        let (mut g, ids) = graph_with(2);
        let (p, c) = (ids[0], ids[1]);
        g.link_inferior_one_way(p, c).unwrap();

        assert_eq!(g.unlink_inferior(p, c), Ok(true));
        assert!(g.inferiors(p).is_empty());
    }

    #[test]
    fn test_simple_unlink_is_one_sided() {
        let (mut g, ids) = graph_with(2);
        let (p, c) = (ids[0], ids[1]);
        g.link_inferior(p, c).unwrap();

        assert_eq!(g.unlink_inferior_simple(p, c), Ok(true));
        assert!(g.inferiors(p).is_empty());
        assert_eq!(g.superiors(c), &[p]);
        assert_eq!(g.unlink_inferior_simple(p, c), Ok(false));

        assert_eq!(g.unlink_superior_simple(c, p), Ok(true));
        assert!(g.superiors(c).is_empty());
    }

    #[test]
    fn test_unlink_all_two_way() {
        let (mut g, ids) = graph_with(3);
        let (s, a, b) = (ids[0], ids[1], ids[2]);
        g.link_inferior(s, a).unwrap();
        g.link_inferior(s, b).unwrap();

        g.unlink_all_inferiors_two_way(s).unwrap();
        assert!(g.inferiors(s).is_empty());
        assert!(!g.superiors(a).contains(&s));
        assert!(!g.superiors(b).contains(&s));
    }

    #[test]
    fn test_unlink_all_superiors_two_way() {
        let (mut g, ids) = graph_with(3);
        let (s, a, b) = (ids[0], ids[1], ids[2]);
        g.link_superior(a, s).unwrap();
        g.link_superior(b, s).unwrap();
        assert_eq!(g.superiors(s), &[a, b]);

        g.unlink_all_superiors_two_way(s).unwrap();
        assert!(g.superiors(s).is_empty());
        assert!(g.inferiors(a).is_empty());
        assert!(g.inferiors(b).is_empty());
    }

    #[test]
    fn test_unlink_all_without_caller_leaves_back_references() {
        let (mut g, ids) = graph_with(2);
        let (s, a) = (ids[0], ids[1]);
        g.link_inferior(s, a).unwrap();

        g.unlink_all_inferiors(s, None).unwrap();
        assert!(g.inferiors(s).is_empty());
        assert_eq!(g.superiors(a), &[s]);
    }

    #[test]
    fn test_unlink_all_removes_only_callers_back_reference() {
        // The cleanup on the far side targets `caller`, not the node whose
        // list is being cleared.
        let (mut g, ids) = graph_with(3);
        let (s, a, caller) = (ids[0], ids[1], ids[2]);
        g.link_inferior(s, a).unwrap();
        g.link_superior_one_way(a, caller).unwrap();
        assert_eq!(g.superiors(a), &[s, caller]);

        g.unlink_all_inferiors(s, Some(caller)).unwrap();
        assert!(g.inferiors(s).is_empty());
        assert_eq!(g.superiors(a), &[s]);
    }

    #[test]
    fn test_unlink_all_superiors_with_caller() {
        let (mut g, ids) = graph_with(3);
        let (s, sup, caller) = (ids[0], ids[1], ids[2]);
        g.link_superior(sup, s).unwrap();
        g.link_inferior_one_way(sup, caller).unwrap();

        g.unlink_all_superiors(s, Some(caller)).unwrap();
        assert!(g.superiors(s).is_empty());
        assert_eq!(g.inferiors(sup), &[s]);
    }

    #[test]
    fn test_two_way_unlink_all_skips_stale_entries() {
        let (mut g, ids) = graph_with(3);
        let (s, a, gone) = (ids[0], ids[1], ids[2]);
        g.link_inferior(s, a).unwrap();
        g.link_inferior(s, gone).unwrap();
        g.remove(gone);
        assert_eq!(g.inferiors(s), &[a, gone]);

        g.unlink_all_inferiors_two_way(s).unwrap();
        assert!(g.inferiors(s).is_empty());
        assert!(g.superiors(a).is_empty());
    }

    #[test]
    fn test_simple_unlink_prunes_stale_handle() {
        let (mut g, ids) = graph_with(2);
        let (s, gone) = (ids[0], ids[1]);
        g.link_inferior(s, gone).unwrap();
        g.remove(gone);

        assert!(matches!(g.unlink_inferior(s, gone), Err(Error::InvalidReference(_))));
        assert_eq!(g.unlink_inferior_simple(s, gone), Ok(true));
        assert!(g.inferiors(s).is_empty());
    }

    #[test]
    fn test_operations_on_stale_node_fail() {
        let (mut g, ids) = graph_with(2);
        let (gone, a) = (ids[0], ids[1]);
        g.remove(gone);

        assert!(g.unlink_all_inferiors_two_way(gone).is_err());
        assert!(g.unlink_inferior_simple(gone, a).is_err());
        assert!(g.inferiors(gone).is_empty());
        assert_eq!(g.remove(gone), None);
    }

    #[test]
    fn test_remove_returns_payload_and_clears_own_lists() {
        let (mut g, ids) = graph_with(3);
        let (p, c, q) = (ids[0], ids[1], ids[2]);
        g.link_inferior(p, c).unwrap();
        g.link_inferior(c, q).unwrap();

        assert_eq!(g.remove(c), Some(1));
        assert_eq!(g.len(), 2);
        assert!(!g.contains(c));
        // neighbours keep stale handles until they are pruned
        assert_eq!(g.inferiors(p), &[c]);
        assert_eq!(g.superiors(q), &[c]);
    }

    #[test]
    fn test_cycles_are_allowed() {
        let (mut g, ids) = graph_with(2);
        let (a, b) = (ids[0], ids[1]);
        assert_eq!(g.link_inferior(a, b), Ok(true));
        assert_eq!(g.link_inferior(b, a), Ok(true));
        assert_eq!(g.inferiors(a), &[b]);
        assert_eq!(g.superiors(a), &[b]);
    }

    #[test]
    fn test_describe() {
        let (mut g, ids) = graph_with(2);
        let (p, c) = (ids[0], ids[1]);

        let empty = g.describe(p, 2);
        assert_eq!(empty, "  **INFERIORS:  Empty\n  **SUPERIORS:  Empty\n");

        g.link_inferior(p, c).unwrap();
        let text = g.describe(p, 0);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "**INFERIORS:");
        assert_eq!(lines[1], format!("<TopologyNode {:?}>", c));
        assert_eq!(lines[2], "number of inferiors 0");
        assert_eq!(lines[3], "number of superiors 1");
        assert_eq!(lines[4], "**SUPERIORS:  Empty");
    }

    #[test]
    fn test_get_mut_edits_payload_only() {
        let (mut g, ids) = graph_with(2);
        let (p, c) = (ids[0], ids[1]);
        g.link_inferior(p, c).unwrap();

        if let Some(node) = g.get_mut(p) {
            node.data = 42;
        }
        assert_eq!(g.get(p).map(|node| node.data), Some(42));
        assert_eq!(g.inferiors(p), &[c]);

        g.remove(c);
        assert!(g.get_mut(c).is_none());
    }
}
