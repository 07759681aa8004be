//! Navigation and queries over a tree of nodes.
//!
//! All functions take the arena that owns the nodes. The main variation
//! of a node is its first-child chain; iteration order is preorder, first
//! child before later siblings.

use std::fmt::{self, Write as _};

use regex::Regex;

use crate::board::Board;
use crate::game_info::GameInformation;
use crate::game_tree::{GameTree, NodeArena};
use crate::moves::Move;
use crate::node::NodeId;
use crate::point::Point;
use crate::stone::Stone;

/// Number of fathers up to the root.
pub fn depth(arena: &NodeArena, mut node: NodeId) -> usize {
    let mut depth = 0;
    while let Some(father) = arena.father(node) {
        node = father;
        depth += 1;
    }
    depth
}

/// Nodes with a move from the root to `node`, inclusive.
pub fn move_number(arena: &NodeArena, node: NodeId) -> usize {
    let mut count = 0;
    let mut current = Some(node);
    while let Some(id) = current {
        if arena[id].get_move().is_some() {
            count += 1;
        }
        current = arena.father(id);
    }
    count
}

/// Moves in the main variation after `node`.
pub fn moves_left(arena: &NodeArena, node: NodeId) -> usize {
    let mut count = 0;
    let mut current = arena.child(node);
    while let Some(id) = current {
        if arena[id].get_move().is_some() {
            count += 1;
        }
        current = arena.child(id);
    }
    count
}

/// Length of the main variation starting at `node`, inclusive.
pub fn nodes_left(arena: &NodeArena, node: NodeId) -> usize {
    let mut count = 1;
    let mut current = node;
    while let Some(child) = arena.child(current) {
        current = child;
        count += 1;
    }
    count
}

/// Last node of the main variation starting at `node`.
pub fn last(arena: &NodeArena, mut node: NodeId) -> NodeId {
    while let Some(child) = arena.child(node) {
        node = child;
    }
    node
}

/// Node with the given move number on the line through `node`: fathers
/// of `node` and its main variation.
pub fn find_by_move_number(arena: &NodeArena, mut node: NodeId, number: usize) -> Option<NodeId> {
    let current = move_number(arena, node);
    if number > current + moves_left(arena, node) {
        return None;
    }
    if number < current {
        while let Some(father) = arena.father(node) {
            if move_number(arena, node) <= number {
                break;
            }
            node = father;
        }
    } else {
        while let Some(child) = arena.child(node) {
            if move_number(arena, node) >= number {
                break;
            }
            node = child;
        }
    }
    Some(node)
}

/// Inverse of [`variation_string`]: follow "a.b.c" from `root`, passing
/// through nodes with a single child.
pub fn find_by_variation(arena: &NodeArena, root: NodeId, variation: &str) -> Option<NodeId> {
    let indices = if variation.trim().is_empty() {
        Vec::new()
    } else {
        variation
            .split('.')
            .map(|token| {
                token
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
            })
            .collect::<Option<Vec<_>>>()?
    };
    let mut node = root;
    for index in indices {
        while arena.child_count(node) <= 1 {
            node = arena.child(node)?;
        }
        if index >= arena.child_count(node) {
            return None;
        }
        node = arena.child_at(node, index);
    }
    Some(node)
}

/// Child numbers (1-based) at each branching point from the root down to
/// `node`, joined with '.'.
pub fn variation_string(arena: &NodeArena, node: NodeId) -> String {
    let mut parts = Vec::new();
    let mut current = node;
    while let Some(father) = arena.father(current) {
        if arena.child_count(father) > 1
            && let Some(i) = arena.child_index(father, current)
        {
            parts.push((i + 1).to_string());
        }
        current = father;
    }
    parts.reverse();
    parts.join(".")
}

/// True if every father of `node` has it on its first-child line.
pub fn is_in_main_variation(arena: &NodeArena, mut node: NodeId) -> bool {
    while let Some(father) = arena.father(node) {
        if arena.child(father) != Some(node) {
            return false;
        }
        node = father;
    }
    true
}

/// Nearest node, `node` itself or a father, that is in the main variation.
pub fn back_to_main_variation(arena: &NodeArena, mut node: NodeId) -> NodeId {
    while !is_in_main_variation(arena, node) {
        match arena.father(node) {
            Some(father) => node = father,
            None => break,
        }
    }
    node
}

pub fn is_root_without_children(arena: &NodeArena, node: NodeId) -> bool {
    arena.father(node).is_none() && arena.child(node).is_none()
}

/// First direct child that plays `mv`.
pub fn child_with_move(arena: &NodeArena, node: NodeId, mv: Move) -> Option<NodeId> {
    arena
        .children(node)
        .iter()
        .copied()
        .find(|&child| arena[child].get_move() == Some(mv))
}

/// Points of the children's moves, without passes.
pub fn children_moves(arena: &NodeArena, node: NodeId) -> Vec<Point> {
    arena
        .children(node)
        .iter()
        .filter_map(|&child| arena[child].get_move().and_then(|m| m.point))
        .collect()
}

pub fn next_variation(arena: &NodeArena, node: NodeId) -> Option<NodeId> {
    let father = arena.father(node)?;
    arena.variation_after(father, node)
}

pub fn previous_variation(arena: &NodeArena, node: NodeId) -> Option<NodeId> {
    let father = arena.father(node)?;
    arena.variation_before(father, node)
}

/// The next sibling of the closest node on the path to the root (`node`
/// included) that has one.
pub fn next_earlier_variation(arena: &NodeArena, node: NodeId) -> Option<NodeId> {
    let mut child = node;
    let mut father = arena.father(node)?;
    loop {
        if let Some(after) = arena.variation_after(father, child) {
            return Some(after);
        }
        child = father;
        father = arena.father(father)?;
    }
}

/// Mirror of [`next_earlier_variation`]. From the previous sibling found,
/// descends through last children while the subtree still branches.
pub fn previous_earlier_variation(arena: &NodeArena, node: NodeId) -> Option<NodeId> {
    let mut child = node;
    let mut father = arena.father(node)?;
    let mut result = loop {
        if let Some(before) = arena.variation_before(father, child) {
            break before;
        }
        child = father;
        father = arena.father(father)?;
    };
    while has_subtree(arena, result) {
        let count = arena.child_count(result);
        result = arena.child_at(result, count - 1);
    }
    Some(result)
}

/// True if some node in the main variation from `node` has two or more
/// children.
pub fn has_subtree(arena: &NodeArena, node: NodeId) -> bool {
    let mut current = Some(node);
    while let Some(id) = current {
        if arena.child_count(id) >= 2 {
            return true;
        }
        current = arena.child(id);
    }
    false
}

/// `node` and its fathers, root first.
pub fn path_from_root(arena: &NodeArena, node: NodeId) -> Vec<NodeId> {
    let mut path = vec![node];
    let mut current = node;
    while let Some(father) = arena.father(current) {
        path.push(father);
        current = father;
    }
    path.reverse();
    path
}

/// Nodes visited when walking from `start` to `target`: up through the
/// fathers of `start` to the last common node, then down to `target`.
/// `start` is excluded, `target` is included.
pub fn shortest_path(arena: &NodeArena, start: NodeId, target: NodeId) -> Vec<NodeId> {
    if start == target {
        return vec![target];
    }
    let to_start = path_from_root(arena, start);
    let to_target = path_from_root(arena, target);
    let common = to_start
        .iter()
        .zip(&to_target)
        .take_while(|(a, b)| a == b)
        .count();
    assert!(common > 0, "nodes are not in the same tree");
    let up = to_start[common - 1..to_start.len() - 1].iter().rev();
    let down = to_target[common..].iter();
    up.chain(down).copied().collect()
}

/// Make the line from the root to `node` the main variation.
pub fn make_main_variation(arena: &mut NodeArena, mut node: NodeId) {
    while let Some(father) = arena.father(node) {
        arena.make_main_variation(father, node);
        node = father;
    }
}

/// Next node in iteration order over the whole tree.
pub fn next_node(arena: &NodeArena, node: NodeId) -> Option<NodeId> {
    arena
        .child(node)
        .or_else(|| next_earlier_variation(arena, node))
}

/// Like [`next_node`], but `None` once iteration would reach a depth of
/// `depth_floor` or less.
pub fn next_node_within(arena: &NodeArena, node: NodeId, depth_floor: usize) -> Option<NodeId> {
    next_node(arena, node).filter(|&next| depth(arena, next) > depth_floor)
}

/// Iterator over `root` and all its descendants in iteration order.
#[derive(Debug, Clone)]
pub struct SubtreeIter<'a> {
    arena: &'a NodeArena,
    next: Option<NodeId>,
    floor: usize,
}

impl<'a> SubtreeIter<'a> {
    pub fn new(arena: &'a NodeArena, root: NodeId) -> Self {
        SubtreeIter {
            arena,
            next: Some(root),
            floor: depth(arena, root),
        }
    }
}

impl Iterator for SubtreeIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = next_node_within(self.arena, current, self.floor);
        Some(current)
    }
}

/// True if the subtree of `node` has more than `size` nodes.
pub fn subtree_greater_than(arena: &NodeArena, node: NodeId, size: usize) -> bool {
    SubtreeIter::new(arena, node).nth(size).is_some()
}

pub fn comment_contains(arena: &NodeArena, node: NodeId, pattern: &Regex) -> bool {
    arena[node].comment().is_some_and(|c| pattern.is_match(c))
}

/// First node after `node` in iteration order whose comment matches.
pub fn find_in_comments(arena: &NodeArena, node: NodeId, pattern: &Regex) -> Option<NodeId> {
    let mut current = next_node(arena, node);
    while let Some(id) = current {
        if comment_contains(arena, id, pattern) {
            return Some(id);
        }
        current = next_node(arena, id);
    }
    None
}

/// New tree with the stones of `board` as setup in the root.
pub fn tree_from_position(info: &GameInformation, board: &Board) -> GameTree {
    let mut tree = GameTree::new(
        board.size(),
        info.komi,
        &[],
        info.rules.clone(),
        info.time_settings,
    );
    let root = tree.root();
    let node = &mut tree.arena_mut()[root];
    for (point, stone) in board.stones() {
        node.add_stone(stone, point);
    }
    node.set_player(Some(board.to_move()));
    tree
}

/// Statistics over a subtree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeInfo {
    pub nodes: usize,
    pub terminal: usize,
    pub inner: usize,
    /// Depths are relative to the subtree root.
    pub avg_depth: f64,
    pub max_depth: usize,
    pub avg_children: f64,
    pub avg_children_inner: f64,
    pub max_children: usize,
}

pub fn tree_info(arena: &NodeArena, node: NodeId) -> TreeInfo {
    let root_depth = depth(arena, node);
    let (mut nodes, mut terminal, mut max_depth, mut max_children) = (0, 0, 0, 0);
    let (mut depth_sum, mut children_sum) = (0, 0);
    for id in SubtreeIter::new(arena, node) {
        nodes += 1;
        let children = arena.child_count(id);
        let d = depth(arena, id) - root_depth;
        max_depth = max_depth.max(d);
        max_children = max_children.max(children);
        if children == 0 {
            terminal += 1;
        }
        depth_sum += d;
        children_sum += children;
    }
    let inner = nodes - terminal;
    TreeInfo {
        nodes,
        terminal,
        inner,
        avg_depth: depth_sum as f64 / nodes as f64,
        max_depth,
        avg_children: children_sum as f64 / nodes as f64,
        avg_children_inner: children_sum as f64 / inner.max(1) as f64,
        max_children,
    }
}

impl fmt::Display for TreeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::new();
        append_info(&mut s, "Nodes", self.nodes);
        append_info(&mut s, "Terminal", self.terminal);
        append_info(&mut s, "Inner", self.inner);
        append_info(&mut s, "AvgDepth", fmt_decimal(self.avg_depth));
        append_info(&mut s, "MaxDepth", self.max_depth);
        append_info(&mut s, "AvgChildren", fmt_decimal(self.avg_children));
        append_info(&mut s, "AvgChildrenInner", fmt_decimal(self.avg_children_inner));
        append_info(&mut s, "MaxChildren", self.max_children);
        f.write_str(&s)
    }
}

/// Multi-line description of a node's content.
pub fn node_info(arena: &NodeArena, node_id: NodeId) -> String {
    let node = &arena[node_id];
    let mut s = String::from("NodeProperties:\n");
    append_info(&mut s, "Depth", depth(arena, node_id));
    append_info(&mut s, "Children", node.child_count());
    if let Some(mv) = node.get_move() {
        append_info(&mut s, "Move", mv);
        append_info(&mut s, "MoveNumber", move_number(arena, node_id));
    }
    append_info(&mut s, "Variation", variation_string(arena, node_id));
    for (label, stone) in [("AddBlack", Stone::Black), ("AddWhite", Stone::White)] {
        let points = node.setup(stone);
        if !points.is_empty() {
            append_points(&mut s, label, points);
        }
    }
    if let Some(player) = node.player() {
        append_info(&mut s, "Player", player);
    }
    for (name, stone) in [("Black", Stone::Black), ("White", Stone::White)] {
        if let Some(time) = node.time_left(stone) {
            append_info(&mut s, &format!("TimeLeft{name}"), time);
        }
        if let Some(moves) = node.moves_left(stone) {
            append_info(&mut s, &format!("MovesLeft{name}"), moves);
        }
    }
    if !node.sgf_properties().is_empty() {
        s.push_str("SgfProperties:\n");
        for property in node.sgf_properties() {
            append_info(&mut s, &property.name, property.values.join(" "));
        }
    }
    s
}

fn append_label(s: &mut String, label: &str) {
    let _ = write!(s, "{label:<20} ");
}

fn append_info(s: &mut String, label: &str, value: impl fmt::Display) {
    append_label(s, label);
    let _ = writeln!(s, "{value}");
}

/// Ten points per line.
fn append_points(s: &mut String, label: &str, points: &[Point]) {
    append_label(s, label);
    for (i, p) in points.iter().enumerate() {
        if i % 10 == 9 && i < points.len() - 1 {
            s.push('\n');
            append_label(s, "");
        }
        let _ = write!(s, "{p} ");
    }
    s.push('\n');
}

/// At most three decimals, without trailing zeros.
fn fmt_decimal(value: f64) -> String {
    let s = format!("{value:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    fn play(stone: Stone, x: u8, y: u8) -> Node {
        Node::with_move(Move::play(stone, Point::new(x, y)))
    }

    /// root
    /// ├─ a (B A1)
    /// │  ├─ a1 (W B1)
    /// │  │  └─ a1x (B C1)
    /// │  └─ a2 (W B2)
    /// │     └─ a2x (setup only)
    /// │        ├─ a2x1 (B D4)
    /// │        └─ a2x2 (B E4)
    /// └─ b (B A2)
    struct Fixture {
        arena: NodeArena,
        root: NodeId,
        a: NodeId,
        a1: NodeId,
        a1x: NodeId,
        a2: NodeId,
        a2x: NodeId,
        a2x1: NodeId,
        a2x2: NodeId,
        b: NodeId,
    }

    fn fixture() -> Fixture {
        let mut arena = NodeArena::new();
        let root = arena.create();
        let a = arena.append_new(root, play(Stone::Black, 0, 0));
        let a1 = arena.append_new(a, play(Stone::White, 1, 0));
        let a1x = arena.append_new(a1, play(Stone::Black, 2, 0));
        let a2 = arena.append_new(a, play(Stone::White, 1, 1));
        let mut setup = Node::new();
        setup.add_black(Point::new(5, 5));
        let a2x = arena.append_new(a2, setup);
        let a2x1 = arena.append_new(a2x, play(Stone::Black, 3, 3));
        let a2x2 = arena.append_new(a2x, play(Stone::Black, 4, 3));
        let b = arena.append_new(root, play(Stone::Black, 0, 1));
        Fixture { arena, root, a, a1, a1x, a2, a2x, a2x1, a2x2, b }
    }

    #[test]
    fn depth_and_move_numbers() {
        let f = fixture();
        assert_eq!(depth(&f.arena, f.root), 0);
        assert_eq!(depth(&f.arena, f.a2x1), 4);
        assert_eq!(move_number(&f.arena, f.root), 0);
        assert_eq!(move_number(&f.arena, f.a2x), 2);
        assert_eq!(move_number(&f.arena, f.a2x1), 3);
        assert_eq!(moves_left(&f.arena, f.root), 3);
        assert_eq!(moves_left(&f.arena, f.a2), 1);
        assert_eq!(nodes_left(&f.arena, f.root), 4);
        assert_eq!(nodes_left(&f.arena, f.a1x), 1);
        assert_eq!(last(&f.arena, f.root), f.a1x);
        assert_eq!(last(&f.arena, f.a2), f.a2x1);
    }

    #[test]
    fn find_by_move_number_walks_both_ways() {
        let f = fixture();
        assert_eq!(find_by_move_number(&f.arena, f.a, 3), Some(f.a1x));
        assert_eq!(find_by_move_number(&f.arena, f.a1x, 1), Some(f.a));
        assert_eq!(find_by_move_number(&f.arena, f.a1x, 0), Some(f.root));
        assert_eq!(find_by_move_number(&f.arena, f.a2x1, 2), Some(f.a2x));
        assert_eq!(find_by_move_number(&f.arena, f.a2x1, 3), Some(f.a2x1));
        assert_eq!(find_by_move_number(&f.arena, f.a1x, 4), None);
        for node in [f.a, f.a1, f.a2x, f.a2x1] {
            let n = move_number(&f.arena, node);
            let found = find_by_move_number(&f.arena, node, n).unwrap();
            assert_eq!(move_number(&f.arena, found), n);
        }
    }

    #[test]
    fn variation_strings() {
        let f = fixture();
        assert_eq!(variation_string(&f.arena, f.root), "");
        assert_eq!(variation_string(&f.arena, f.a1x), "1.1");
        assert_eq!(variation_string(&f.arena, f.a2), "1.2");
        assert_eq!(variation_string(&f.arena, f.a2x2), "1.2.2");
        assert_eq!(variation_string(&f.arena, f.b), "2");

        for node in [f.a, f.a2, f.a2x1, f.a2x2, f.b] {
            let s = variation_string(&f.arena, node);
            assert_eq!(find_by_variation(&f.arena, f.root, &s), Some(node));
        }
        assert_eq!(find_by_variation(&f.arena, f.root, "3"), None);
        assert_eq!(find_by_variation(&f.arena, f.root, "1.x"), None);
        assert_eq!(find_by_variation(&f.arena, f.root, "0"), None);
        assert_eq!(find_by_variation(&f.arena, f.root, "2.1"), None);
        // Skips the single-child node a2 before choosing among a2x's children.
        assert_eq!(find_by_variation(&f.arena, f.root, "1.2.1"), Some(f.a2x1));
    }

    #[test]
    fn main_variation() {
        let mut f = fixture();
        assert!(is_in_main_variation(&f.arena, f.a1x));
        assert!(!is_in_main_variation(&f.arena, f.a2x1));
        assert!(!is_in_main_variation(&f.arena, f.b));
        assert_eq!(back_to_main_variation(&f.arena, f.a2x2), f.a);
        assert_eq!(back_to_main_variation(&f.arena, f.a1), f.a1);

        make_main_variation(&mut f.arena, f.a2x2);
        assert!(is_in_main_variation(&f.arena, f.a2x2));
        assert_eq!(f.arena.children(f.a), &[f.a2, f.a1]);
        assert_eq!(f.arena.children(f.a2x), &[f.a2x2, f.a2x1]);
        make_main_variation(&mut f.arena, f.a2x2);
        assert_eq!(f.arena.children(f.a2x), &[f.a2x2, f.a2x1]);
    }

    #[test]
    fn children_queries() {
        let f = fixture();
        assert_eq!(
            child_with_move(&f.arena, f.a, Move::play(Stone::White, Point::new(1, 1))),
            Some(f.a2)
        );
        assert_eq!(
            child_with_move(&f.arena, f.a, Move::play(Stone::Black, Point::new(1, 1))),
            None
        );
        assert_eq!(
            children_moves(&f.arena, f.root),
            vec![Point::new(0, 0), Point::new(0, 1)]
        );
        assert!(children_moves(&f.arena, f.a2).is_empty());
    }

    #[test]
    fn variation_navigation() {
        let f = fixture();
        assert_eq!(next_variation(&f.arena, f.a1), Some(f.a2));
        assert_eq!(next_variation(&f.arena, f.a2), None);
        assert_eq!(previous_variation(&f.arena, f.a2), Some(f.a1));
        assert_eq!(previous_variation(&f.arena, f.root), None);

        assert_eq!(next_earlier_variation(&f.arena, f.a1x), Some(f.a2));
        assert_eq!(next_earlier_variation(&f.arena, f.a2x2), Some(f.b));
        assert_eq!(next_earlier_variation(&f.arena, f.b), None);

        assert_eq!(previous_earlier_variation(&f.arena, f.b), Some(f.a2x2));
        assert_eq!(previous_earlier_variation(&f.arena, f.a2x), Some(f.a1));
        assert_eq!(previous_earlier_variation(&f.arena, f.a1x), None);

        assert!(has_subtree(&f.arena, f.a2));
        assert!(!has_subtree(&f.arena, f.a1));
    }

    #[test]
    fn paths() {
        let f = fixture();
        let path = path_from_root(&f.arena, f.a2x1);
        assert_eq!(path, vec![f.root, f.a, f.a2, f.a2x, f.a2x1]);
        assert_eq!(path.len(), depth(&f.arena, f.a2x1) + 1);

        assert_eq!(shortest_path(&f.arena, f.a2, f.a2), vec![f.a2]);
        assert_eq!(shortest_path(&f.arena, f.a, f.a2), vec![f.a2]);
        assert_eq!(shortest_path(&f.arena, f.a2, f.a), vec![f.a]);
        assert_eq!(shortest_path(&f.arena, f.a1x, f.a2x), vec![f.a1, f.a, f.a2, f.a2x]);
        assert_eq!(shortest_path(&f.arena, f.b, f.a1), vec![f.root, f.a, f.a1]);
    }

    #[test]
    fn iteration_order() {
        let f = fixture();
        let all: Vec<_> = SubtreeIter::new(&f.arena, f.root).collect();
        assert_eq!(all, vec![f.root, f.a, f.a1, f.a1x, f.a2, f.a2x, f.a2x1, f.a2x2, f.b]);
        let sub: Vec<_> = SubtreeIter::new(&f.arena, f.a2).collect();
        assert_eq!(sub, vec![f.a2, f.a2x, f.a2x1, f.a2x2]);
        assert_eq!(next_node_within(&f.arena, f.a2x2, 2), None);
        assert_eq!(next_node(&f.arena, f.a2x2), Some(f.b));

        assert!(subtree_greater_than(&f.arena, f.a2, 3));
        assert!(!subtree_greater_than(&f.arena, f.a2, 4));
        assert!(!subtree_greater_than(&f.arena, f.b, 1));
        assert!(subtree_greater_than(&f.arena, f.b, 0));
    }

    #[test]
    fn comments() {
        let mut f = fixture();
        f.arena[f.a2x].set_comment(Some("Black has a ladder".into()));
        f.arena[f.b].set_comment(Some("ladder breaker".into()));
        let ladder = Regex::new("(?i)LADDER").unwrap();
        assert!(comment_contains(&f.arena, f.a2x, &ladder));
        assert!(!comment_contains(&f.arena, f.a2, &ladder));
        assert_eq!(find_in_comments(&f.arena, f.root, &ladder), Some(f.a2x));
        assert_eq!(find_in_comments(&f.arena, f.a2x, &ladder), Some(f.b));
        assert_eq!(find_in_comments(&f.arena, f.b, &ladder), None);
    }

    #[test]
    fn root_without_children() {
        let f = fixture();
        assert!(!is_root_without_children(&f.arena, f.root));
        let mut arena = NodeArena::new();
        let lone = arena.create();
        assert!(is_root_without_children(&arena, lone));
    }

    #[test]
    fn tree_statistics() {
        let f = fixture();
        let info = tree_info(&f.arena, f.root);
        assert_eq!(info.nodes, 9);
        assert_eq!(info.terminal, 4);
        assert_eq!(info.inner, 5);
        assert_eq!(info.max_depth, 4);
        assert_eq!(info.max_children, 2);
        assert!((info.avg_children - 8.0 / 9.0).abs() < 1e-9);
        assert!((info.avg_children_inner - 1.6).abs() < 1e-9);
        let text = info.to_string();
        assert!(text.starts_with("Nodes                9\n"));
        assert!(text.contains("AvgChildrenInner     1.6\n"));

        let leaf = tree_info(&f.arena, f.b);
        assert_eq!(leaf.nodes, 1);
        assert_eq!(leaf.avg_depth, 0.0);
        assert_eq!(leaf.avg_children_inner, 0.0);
    }

    #[test]
    fn node_description() {
        let mut f = fixture();
        f.arena[f.a2x].set_player(Some(Stone::White));
        f.arena[f.a2x].set_time_left(Stone::Black, 30.5);
        f.arena[f.a2x].add_sgf_property("LB", vec!["aa:1".into()]);
        let text = node_info(&f.arena, f.a2x);
        assert!(text.starts_with("NodeProperties:\nDepth                3\n"));
        assert!(text.contains("Variation            1.2\n"));
        assert!(text.contains("AddBlack             F6 \n"));
        assert!(text.contains("Player               White\n"));
        assert!(text.contains("TimeLeftBlack        30.5\n"));
        assert!(text.contains("SgfProperties:\nLB                   aa:1\n"));
        assert!(!text.contains("Move "));
        assert!(node_info(&f.arena, f.a2x1).contains("MoveNumber           3\n"));
    }

    #[test]
    fn position_to_tree() {
        let mut board = Board::from_layout(&["B..", ".W.", "..."]);
        board.set_to_move(Stone::White);
        let info = GameInformation {
            komi: 6.5,
            ..GameInformation::default()
        };
        let tree = tree_from_position(&info, &board);
        let root = &tree.arena()[tree.root()];
        assert_eq!(tree.board_size(), 3);
        assert_eq!(tree.info().komi, 6.5);
        assert_eq!(root.setup(Stone::Black), &[Point::new(0, 2)]);
        assert_eq!(root.setup(Stone::White), &[Point::new(1, 1)]);
        assert_eq!(root.player(), Some(Stone::White));
    }
}
