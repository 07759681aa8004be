use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::game_info::GameInformation;
use crate::handicap;
use crate::node::{Node, NodeId};
use crate::point::Point;
use crate::stone::Stone;
use crate::time_settings::TimeSettings;

/// Owner of all nodes of a tree. Nodes refer to each other by [`NodeId`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a detached node.
    pub fn alloc(&mut self, mut node: Node) -> NodeId {
        node.father = None;
        node.children.clear();
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn create(&mut self) -> NodeId {
        self.alloc(Node::new())
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Number of allocated slots, including detached ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Make `child` the last child of `father`.
    ///
    /// Panics if `child` already has a father.
    pub fn append(&mut self, father: NodeId, child: NodeId) {
        assert!(
            self.get(child).father.is_none(),
            "node {} already has a father",
            child.index()
        );
        self.get_mut(child).father = Some(father);
        self.get_mut(father).children.push(child);
    }

    /// Create a new node and append it to `father`.
    pub fn append_new(&mut self, father: NodeId, node: Node) -> NodeId {
        let id = self.alloc(node);
        self.append(father, id);
        id
    }

    pub fn father(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).father
    }

    /// Overwrite the father link only. Used to turn a subtree into a root.
    pub fn set_father(&mut self, id: NodeId, father: Option<NodeId>) {
        self.get_mut(id).father = father;
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    pub fn child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).child()
    }

    pub fn child_at(&self, id: NodeId, i: usize) -> NodeId {
        self.get(id).child_at(i)
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.get(id).child_count()
    }

    pub fn child_index(&self, father: NodeId, child: NodeId) -> Option<usize> {
        self.children(father).iter().position(|&c| c == child)
    }

    /// Sibling before `child`, or `None` if it is the first.
    pub fn variation_before(&self, father: NodeId, child: NodeId) -> Option<NodeId> {
        let i = self.child_index(father, child)?;
        i.checked_sub(1).map(|i| self.children(father)[i])
    }

    /// Sibling after `child`, or `None` if it is the last.
    pub fn variation_after(&self, father: NodeId, child: NodeId) -> Option<NodeId> {
        let i = self.child_index(father, child)?;
        self.children(father).get(i + 1).copied()
    }

    /// Move `child` to the front of `father`'s children.
    pub fn make_main_variation(&mut self, father: NodeId, child: NodeId) {
        if let Some(i) = self.child_index(father, child) {
            let children = &mut self.get_mut(father).children;
            let c = children.remove(i);
            children.insert(0, c);
        }
    }

    /// Detach `child` and its subtree from `father`. Returns false if it
    /// was not a child of `father`.
    pub fn remove_child(&mut self, father: NodeId, child: NodeId) -> bool {
        let Some(i) = self.child_index(father, child) else {
            return false;
        };
        self.get_mut(father).children.remove(i);
        // The slots stay allocated; only the link is cut.
        self.get_mut(child).father = None;
        true
    }

    /// Remove all children of `id`.
    pub fn truncate_children(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.get_mut(id).children);
        for child in children {
            self.get_mut(child).father = None;
        }
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.get(id)
    }
}

impl IndexMut<NodeId> for NodeArena {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        self.get_mut(id)
    }
}

/// A game record: a tree of nodes plus game information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameTree {
    arena: NodeArena,
    root: NodeId,
    info: GameInformation,
}

impl GameTree {
    /// New tree whose root holds the handicap stones.
    pub fn new(
        board_size: u8,
        komi: f64,
        handicap: &[Point],
        rules: Option<String>,
        time_settings: Option<TimeSettings>,
    ) -> Self {
        assert!(
            handicap.iter().all(|p| p.x() < board_size && p.y() < board_size),
            "handicap point outside the board"
        );
        let mut info = GameInformation::new(board_size);
        info.komi = komi;
        info.rules = rules;
        info.time_settings = time_settings;
        let mut arena = NodeArena::new();
        let root = arena.create();
        if !handicap.is_empty() {
            info.handicap = handicap.len() as u32;
            let node = arena.get_mut(root);
            for &p in handicap {
                node.add_black(p);
            }
            node.set_player(Some(Stone::White));
        }
        GameTree { arena, root, info }
    }

    /// New tree with `count` handicap stones on their standard points.
    ///
    /// Returns `None` if the board has no standard placement for `count`
    /// stones (see [`handicap::handicap_points`]).
    pub fn with_handicap(
        board_size: u8,
        komi: f64,
        count: u8,
        rules: Option<String>,
        time_settings: Option<TimeSettings>,
    ) -> Option<Self> {
        let stones = match count {
            0 => Vec::new(),
            _ => handicap::handicap_points(board_size, count)?,
        };
        Some(GameTree::new(board_size, komi, &stones, rules, time_settings))
    }

    /// Wrap an already built tree.
    ///
    /// Panics if `root` has a father.
    pub fn from_parts(info: GameInformation, arena: NodeArena, root: NodeId) -> Self {
        assert!(arena.father(root).is_none(), "root must not have a father");
        GameTree { arena, root, info }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut NodeArena {
        &mut self.arena
    }

    pub fn info(&self) -> &GameInformation {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut GameInformation {
        &mut self.info
    }

    pub fn board_size(&self) -> u8 {
        self.info.board_size
    }

    /// True if any node reachable from the root has more than one child.
    pub fn has_variations(&self) -> bool {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let children = self.arena.children(id);
            if children.len() > 1 {
                return true;
            }
            stack.extend_from_slice(children);
        }
        false
    }

    /// Number of nodes reachable from the root.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            count += 1;
            stack.extend_from_slice(self.arena.children(id));
        }
        count
    }
}

impl Default for GameTree {
    fn default() -> Self {
        GameTree::new(crate::game_info::DEFAULT_BOARD_SIZE, 0.0, &[], None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move;

    fn play(stone: Stone, x: u8, y: u8) -> Node {
        Node::with_move(Move::play(stone, Point::new(x, y)))
    }

    #[test]
    fn empty_tree() {
        let tree = GameTree::default();
        assert_eq!(tree.arena().len(), 1);
        assert_eq!(tree.board_size(), 19);
        assert!(tree.arena().children(tree.root()).is_empty());
        assert!(!tree.has_variations());
    }

    #[test]
    fn handicap_setup() {
        let stones = [Point::new(3, 3), Point::new(15, 15)];
        let tree = GameTree::new(19, 0.5, &stones, Some("Japanese".into()), None);
        let root = &tree.arena()[tree.root()];
        assert_eq!(root.setup(Stone::Black), &stones);
        assert_eq!(root.player(), Some(Stone::White));
        assert_eq!(tree.info().handicap, 2);
        assert_eq!(tree.info().komi, 0.5);
        assert_eq!(tree.info().rules.as_deref(), Some("Japanese"));
    }

    #[test]
    fn standard_handicap_placement() {
        let tree = GameTree::with_handicap(19, 0.5, 4, None, None).unwrap();
        let root = &tree.arena()[tree.root()];
        assert_eq!(
            root.setup(Stone::Black),
            &[Point::new(15, 15), Point::new(3, 3), Point::new(15, 3), Point::new(3, 15)]
        );
        assert_eq!(tree.info().handicap, 4);
        assert_eq!(root.player(), Some(Stone::White));

        let even = GameTree::with_handicap(9, 6.5, 0, None, None).unwrap();
        assert!(!even.arena()[even.root()].has_setup());
        assert_eq!(even.info().handicap, 0);

        assert!(GameTree::with_handicap(9, 0.5, 6, None, None).is_none());
        assert!(GameTree::with_handicap(10, 0.5, 2, None, None).is_none());
    }

    #[test]
    #[should_panic(expected = "handicap point outside the board")]
    fn handicap_outside_board() {
        GameTree::new(9, 0.5, &[Point::new(15, 15)], None, None);
    }

    #[test]
    fn linear_chain() {
        let mut tree = GameTree::default();
        let root = tree.root();
        let arena = tree.arena_mut();
        let a = arena.append_new(root, play(Stone::Black, 0, 0));
        let b = arena.append_new(a, play(Stone::White, 1, 0));
        assert_eq!(arena.child(root), Some(a));
        assert_eq!(arena.child(a), Some(b));
        assert_eq!(arena.father(b), Some(a));
        assert_eq!(arena.child(b), None);
        assert!(!tree.has_variations());
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn branching() {
        let mut tree = GameTree::default();
        let root = tree.root();
        let arena = tree.arena_mut();
        let a = arena.append_new(root, play(Stone::Black, 0, 0));
        let b = arena.append_new(a, play(Stone::White, 1, 0));
        let c = arena.append_new(a, play(Stone::White, 2, 0));
        let d = arena.append_new(a, play(Stone::White, 3, 0));

        assert_eq!(arena.children(a), &[b, c, d]);
        assert_eq!(arena.child_at(a, 1), c);
        assert_eq!(arena.variation_before(a, b), None);
        assert_eq!(arena.variation_after(a, b), Some(c));
        assert_eq!(arena.variation_before(a, c), Some(b));
        assert_eq!(arena.variation_after(a, d), None);
        assert!(tree.has_variations());
    }

    #[test]
    #[should_panic(expected = "already has a father")]
    fn append_twice() {
        let mut arena = NodeArena::new();
        let a = arena.create();
        let b = arena.create();
        let c = arena.create();
        arena.append(a, c);
        arena.append(b, c);
    }

    #[test]
    fn make_main_variation_keeps_other_order() {
        let mut arena = NodeArena::new();
        let root = arena.create();
        let kids: Vec<_> = (0..3).map(|_| arena.append_new(root, Node::new())).collect();
        arena.make_main_variation(root, kids[2]);
        assert_eq!(arena.children(root), &[kids[2], kids[0], kids[1]]);
        arena.make_main_variation(root, kids[2]);
        assert_eq!(arena.children(root), &[kids[2], kids[0], kids[1]]);
    }

    #[test]
    fn remove_child() {
        let mut tree = GameTree::default();
        let root = tree.root();
        let arena = tree.arena_mut();
        let a = arena.append_new(root, play(Stone::Black, 0, 0));
        let b = arena.append_new(a, play(Stone::White, 1, 0));

        assert!(!arena.remove_child(root, b));
        assert!(arena.remove_child(a, b));
        assert!(arena.children(a).is_empty());
        assert_eq!(arena.father(b), None);
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn truncate_children() {
        let mut arena = NodeArena::new();
        let root = arena.create();
        let a = arena.append_new(root, Node::new());
        arena.append_new(root, Node::new());
        arena.truncate_children(root);
        assert_eq!(arena.child_count(root), 0);
        assert_eq!(arena.father(a), None);
    }

    #[test]
    fn serde_round_trip() {
        let mut tree = GameTree::new(9, 6.5, &[], None, Some(TimeSettings::new(60_000)));
        let root = tree.root();
        let a = tree.arena_mut().append_new(root, play(Stone::Black, 4, 4));
        tree.arena_mut()[a].set_comment(Some("center".into()));

        let json = serde_json::to_string(&tree).unwrap();
        let back: GameTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back.info(), tree.info());
        assert_eq!(back.arena()[a], tree.arena()[a]);
        assert_eq!(back.arena().child(back.root()), Some(a));
    }
}
