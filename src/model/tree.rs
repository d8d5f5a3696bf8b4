//! Node-addressable view over a decoded flamebearer.
//!
//! A node is identified by `(level, j)`, where `j` is the index of the
//! node's first value inside `levels[level]`. Addresses are only valid for
//! the model that produced them; reading an address that is not part of
//! the tree is a programmer error and panics.

use super::layout::{layout_for, FieldLayout, SplitTicks};
use crate::codec::{Flamebearer, Format};
use crate::utils::error::RenderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Address of one node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeRef {
    pub level: usize,
    pub j: usize,
}

impl NodeRef {
    pub fn new(level: usize, j: usize) -> Self {
        Self { level, j }
    }

    /// `Some` only if `(level, j)` addresses a node of `model`
    pub fn checked(model: &FlamebearerModel, level: usize, j: usize) -> Option<Self> {
        model.node(level, j)
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.level, self.j)
    }
}

impl FromStr for NodeRef {
    type Err = String;

    /// Parses `level:j`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (level, j) = s
            .split_once(':')
            .ok_or_else(|| format!("expected LEVEL:J, got '{}'", s))?;
        let level = level
            .trim()
            .parse()
            .map_err(|e| format!("invalid level '{}': {}", level, e))?;
        let j = j.trim().parse().map_err(|e| format!("invalid j '{}': {}", j, e))?;
        Ok(Self { level, j })
    }
}

/// Tree queries over one immutable flamebearer
#[derive(Debug, Clone)]
pub struct FlamebearerModel {
    fb: Flamebearer,
    layout: &'static dyn FieldLayout,
}

impl FlamebearerModel {
    /// Wrap a decoded flamebearer; the field layout is chosen here, once
    pub fn new(fb: Flamebearer) -> Self {
        let layout = layout_for(fb.format());
        Self { fb, layout }
    }

    pub fn flamebearer(&self) -> &Flamebearer {
        &self.fb
    }

    pub fn format(&self) -> Format {
        self.layout.format()
    }

    pub fn j_step(&self) -> usize {
        self.layout.j_step()
    }

    pub fn num_ticks(&self) -> u64 {
        self.fb.num_ticks()
    }

    /// Number of levels
    pub fn depth(&self) -> usize {
        self.fb.levels().len()
    }

    pub fn is_empty(&self) -> bool {
        self.fb.is_empty()
    }

    /// Number of nodes in a level (0 past the deepest level)
    pub fn level_len(&self, level: usize) -> usize {
        self.fb
            .levels()
            .get(level)
            .map_or(0, |values| values.len() / self.j_step())
    }

    /// Nodes of a level, left to right
    pub fn nodes(&self, level: usize) -> impl Iterator<Item = NodeRef> + '_ {
        let len = self.fb.levels().get(level).map_or(0, Vec::len);
        (0..len)
            .step_by(self.j_step())
            .map(move |j| NodeRef::new(level, j))
    }

    /// Every node, level by level
    pub fn all_nodes(&self) -> impl Iterator<Item = NodeRef> + '_ {
        (0..self.depth()).flat_map(move |level| self.nodes(level))
    }

    /// Address `(level, j)` if it names a node of this tree
    pub fn node(&self, level: usize, j: usize) -> Option<NodeRef> {
        let values = self.fb.levels().get(level)?;
        if j % self.j_step() == 0 && j + self.j_step() <= values.len() {
            Some(NodeRef::new(level, j))
        } else {
            None
        }
    }

    /// Like [`node`](Self::node), but as an error for viewport validation
    pub fn check(&self, node: NodeRef) -> Result<NodeRef, RenderError> {
        self.node(node.level, node.j).ok_or(RenderError::NodeNotInTree {
            level: node.level,
            j: node.j,
        })
    }

    pub fn root(&self) -> Option<NodeRef> {
        self.node(0, 0)
    }

    fn values(&self, node: NodeRef) -> &[u64] {
        let values = self.fb.levels().get(node.level).map_or(&[][..], Vec::as_slice);
        assert!(
            node.j % self.j_step() == 0 && node.j + self.j_step() <= values.len(),
            "node {} is outside the tree ({} levels, {} values at that level)",
            node,
            self.depth(),
            values.len()
        );
        values
    }

    pub fn offset(&self, node: NodeRef) -> u64 {
        self.layout.offset(self.values(node), node.j)
    }

    pub fn total(&self, node: NodeRef) -> u64 {
        self.layout.total(self.values(node), node.j)
    }

    pub fn self_ticks(&self, node: NodeRef) -> u64 {
        self.layout.self_ticks(self.values(node), node.j)
    }

    pub fn name_index(&self, node: NodeRef) -> usize {
        self.layout.name_index(self.values(node), node.j)
    }

    pub fn name(&self, node: NodeRef) -> &str {
        &self.fb.names()[self.name_index(node)]
    }

    /// Left/right breakdown; `None` for single profiles
    pub fn split(&self, node: NodeRef) -> Option<SplitTicks> {
        self.layout.split(self.values(node), node.j)
    }

    pub fn total_left(&self, node: NodeRef) -> Option<u64> {
        self.split(node).map(|s| s.total_left)
    }

    pub fn total_right(&self, node: NodeRef) -> Option<u64> {
        self.split(node).map(|s| s.total_right)
    }

    pub fn self_left(&self, node: NodeRef) -> Option<u64> {
        self.split(node).map(|s| s.self_left)
    }

    pub fn self_right(&self, node: NodeRef) -> Option<u64> {
        self.split(node).map(|s| s.self_right)
    }

    pub fn total_diff(&self, node: NodeRef) -> Option<i64> {
        self.split(node).map(|s| s.total_diff())
    }

    pub fn self_diff(&self, node: NodeRef) -> Option<i64> {
        self.split(node).map(|s| s.self_diff())
    }

    /// Baseline tick count, falling back to the root's left total
    pub fn left_ticks(&self) -> u64 {
        self.fb
            .left_ticks()
            .or_else(|| self.root().and_then(|root| self.total_left(root)))
            .unwrap_or_else(|| self.num_ticks())
    }

    /// Comparison tick count, falling back to the root's right total
    pub fn right_ticks(&self) -> u64 {
        self.fb
            .right_ticks()
            .or_else(|| self.root().and_then(|root| self.total_right(root)))
            .unwrap_or_else(|| self.num_ticks())
    }

    /// Node at `level` whose `[offset, offset + total)` contains `tick`
    ///
    /// Offsets are non-decreasing within a level, so this is a binary search.
    pub fn locate(&self, level: usize, tick: f64) -> Option<NodeRef> {
        let count = self.level_len(level);
        if count == 0 || tick < 0.0 {
            return None;
        }

        let step = self.j_step();
        // first slot whose offset is past the tick
        let (mut lo, mut hi) = (0usize, count);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.offset(NodeRef::new(level, mid * step)) as f64 <= tick {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        if lo == 0 {
            return None;
        }

        let node = NodeRef::new(level, (lo - 1) * step);
        let end = (self.offset(node) + self.total(node)) as f64;
        (tick < end).then_some(node)
    }

    /// Enclosing node one level up
    pub fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        if node.level == 0 {
            return None;
        }
        self.locate(node.level - 1, self.offset(node) as f64)
    }

    /// Frame names from the first level below the root down to `node`
    pub fn stack(&self, node: NodeRef) -> Vec<&str> {
        let mut frames = Vec::with_capacity(node.level);
        let mut current = Some(node);
        while let Some(n) = current {
            if n.level == 0 {
                break;
            }
            frames.push(self.name(n));
            current = self.parent(n);
        }
        frames.reverse();
        frames
    }
}
