use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use bitvec::prelude::*;

use super::codes::CodeTable;
use super::frequency::{FrequencyTable, Symbol};
use crate::error::{Error, Result};

/// Index of a node inside a [`HuffmanTree`] arena.
pub type NodeId = usize;

/// Represents a node in the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A leaf node contains a symbol and its frequency.
    Leaf { symbol: Symbol, freq: usize },
    /// An internal node with its combined frequency. `children[0]` is the left
    /// (bit 0) child and `children[1]` the right (bit 1) child.
    Internal {
        freq: usize,
        children: [Option<NodeId>; 2],
    },
}

impl HuffmanNode {
    /// Returns the frequency of the node.
    pub fn freq(&self) -> usize {
        match self {
            HuffmanNode::Leaf { freq, .. } => *freq,
            HuffmanNode::Internal { freq, .. } => *freq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    /// The symbol held by a leaf.
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            HuffmanNode::Leaf { symbol, .. } => Some(*symbol),
            HuffmanNode::Internal { .. } => None,
        }
    }

    /// Child reached by following `bit` (`false` = left, `true` = right).
    pub fn child(&self, bit: bool) -> Option<NodeId> {
        match self {
            HuffmanNode::Leaf { .. } => None,
            HuffmanNode::Internal { children, .. } => children[bit as usize],
        }
    }

    pub fn left(&self) -> Option<NodeId> {
        self.child(false)
    }

    pub fn right(&self) -> Option<NodeId> {
        self.child(true)
    }
}

/// Priority queue entry. The node with the smallest `(freq, rank)` has the
/// highest priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueEntry {
    freq: usize,
    rank: i64,
    id: NodeId,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse: lower (freq, rank) should come first.
        (other.freq, other.rank).cmp(&(self.freq, self.rank))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A Huffman tree stored as an arena of nodes.
///
/// Trees built from a frequency table with two or more entries are full binary
/// trees. A table with a single entry produces a degenerate tree: an internal
/// root whose only child is the left leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<HuffmanNode>,
    root: NodeId,
}

impl HuffmanTree {
    /// Builds the tree by repeatedly merging the two lowest-frequency nodes.
    ///
    /// Leaves are seeded in ascending frequency order, ties kept in table
    /// order. A merged node is queued ahead of every existing node of equal
    /// frequency, so among equal frequencies the newest merge is taken first,
    /// followed by the leaves in seed order.
    pub fn build(freq_table: &FrequencyTable) -> Result<Self> {
        if freq_table.is_empty() {
            log::warn!("refusing to build a Huffman tree from an empty frequency table");
            return Err(Error::EmptyInput);
        }

        let mut nodes: Vec<HuffmanNode> = freq_table
            .iter()
            .map(|(symbol, freq)| HuffmanNode::Leaf { symbol, freq })
            .collect();

        let mut seeded: Vec<NodeId> = (0..nodes.len()).collect();
        seeded.sort_by_key(|&id| nodes[id].freq());

        if let [only] = *seeded.as_slice() {
            let root = nodes.len();
            nodes.push(HuffmanNode::Internal {
                freq: nodes[only].freq(),
                children: [Some(only), None],
            });
            return Ok(Self { nodes, root });
        }

        let mut heap: BinaryHeap<QueueEntry> = seeded
            .iter()
            .enumerate()
            .map(|(rank, &id)| QueueEntry {
                freq: nodes[id].freq(),
                rank: rank as i64,
                id,
            })
            .collect();

        let mut next_rank = -1i64;
        while heap.len() > 1 {
            let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
                break;
            };
            let freq = left.freq + right.freq;
            let id = nodes.len();
            nodes.push(HuffmanNode::Internal {
                freq,
                children: [Some(left.id), Some(right.id)],
            });
            log::trace!(
                "merged nodes {} ({}) and {} ({}) into {} ({})",
                left.id,
                left.freq,
                right.id,
                right.freq,
                id,
                freq
            );
            heap.push(QueueEntry {
                freq,
                rank: next_rank,
                id,
            });
            next_rank -= 1;
        }

        let root = heap.pop().map(|entry| entry.id).ok_or(Error::EmptyInput)?;
        Ok(Self { nodes, root })
    }

    /// Rebuilds a decode-capable tree from a code table.
    ///
    /// Frequencies are not recoverable from codes, so every node of the rebuilt
    /// tree has frequency 0. Codes that are empty, duplicated, or a prefix of
    /// another code are rejected.
    pub fn from_code_table(table: &CodeTable) -> Result<Self> {
        if table.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut nodes = vec![HuffmanNode::Internal {
            freq: 0,
            children: [None, None],
        }];
        let root = 0;

        for (symbol, code) in table.iter() {
            if code.is_empty() {
                return Err(Error::corrupt(format!("empty code for symbol {}", symbol)));
            }
            let mut current = root;
            for (i, bit) in code.iter().by_vals().enumerate() {
                let last = i + 1 == code.len();
                let existing = match &nodes[current] {
                    HuffmanNode::Leaf { .. } => {
                        return Err(Error::corrupt(format!(
                            "code for symbol {} extends another symbol's code",
                            symbol
                        )))
                    }
                    HuffmanNode::Internal { children, .. } => children[bit as usize],
                };
                match existing {
                    Some(next) if !last => current = next,
                    Some(_) => {
                        return Err(Error::corrupt(format!(
                            "code for symbol {} collides with another code",
                            symbol
                        )))
                    }
                    None => {
                        let id = nodes.len();
                        nodes.push(if last {
                            HuffmanNode::Leaf { symbol, freq: 0 }
                        } else {
                            HuffmanNode::Internal {
                                freq: 0,
                                children: [None, None],
                            }
                        });
                        if let HuffmanNode::Internal { children, .. } = &mut nodes[current] {
                            children[bit as usize] = Some(id);
                        }
                        current = id;
                    }
                }
            }
        }

        Ok(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node stored at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &HuffmanNode {
        &self.nodes[id]
    }

    /// All nodes in arena order.
    pub fn nodes(&self) -> &[HuffmanNode] {
        &self.nodes
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    pub fn internal_count(&self) -> usize {
        self.nodes.len() - self.leaf_count()
    }

    /// The sole symbol of a degenerate tree, whose root has a left leaf and no
    /// right child.
    pub fn degenerate_symbol(&self) -> Option<Symbol> {
        let root = self.node(self.root);
        match (root.left(), root.right()) {
            (Some(left), None) => self.node(left).symbol(),
            _ => None,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.degenerate_symbol().is_some()
    }

    /// Depth of every leaf, in depth-first left-to-right order.
    pub fn leaf_depths(&self) -> Vec<(Symbol, usize)> {
        let mut depths = Vec::new();
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match &self.nodes[id] {
                HuffmanNode::Leaf { symbol, .. } => depths.push((*symbol, depth)),
                HuffmanNode::Internal { children, .. } => {
                    // right first so the left subtree is visited first
                    for child in children.iter().rev().flatten() {
                        stack.push((*child, depth + 1));
                    }
                }
            }
        }
        depths
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.leaf_depths()
            .into_iter()
            .map(|(_, depth)| depth)
            .max()
            .unwrap_or(0)
    }

    /// Sum of `freq * depth` over all leaves: the encoded length in bits of the
    /// text the tree was built from.
    pub fn weighted_path_length(&self) -> usize {
        let mut total = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match &self.nodes[id] {
                HuffmanNode::Leaf { freq, .. } => total += freq * depth,
                HuffmanNode::Internal { children, .. } => {
                    stack.extend(children.iter().flatten().map(|&c| (c, depth + 1)));
                }
            }
        }
        total
    }

    /// Walks the tree bit by bit and returns the decoded symbols.
    ///
    /// With `end_marker_present`, decoding stops at the first end marker and
    /// the remaining bits are discarded; otherwise end markers are emitted like
    /// any other symbol. Trailing bits that do not complete a code are ignored.
    pub fn decode_symbols(
        &self,
        bits: &BitSlice<u8, Lsb0>,
        end_marker_present: bool,
    ) -> Result<Vec<Symbol>> {
        if let Some(symbol) = self.degenerate_symbol() {
            if symbol.is_end_marker() && end_marker_present {
                return Ok(Vec::new());
            }
            return Ok(vec![symbol; bits.len()]);
        }

        let mut symbols = Vec::new();
        let mut current = self.root;
        for bit in bits.iter().by_vals() {
            current = self.nodes[current].child(bit).ok_or_else(|| {
                Error::corrupt("bit sequence walks off the Huffman tree")
            })?;
            if let HuffmanNode::Leaf { symbol, .. } = self.nodes[current] {
                if symbol.is_end_marker() && end_marker_present {
                    break;
                }
                symbols.push(symbol);
                current = self.root;
            }
        }
        Ok(symbols)
    }

    /// Decodes `bits` back to text.
    ///
    /// End markers that appear while `end_marker_present` is `false` carry no
    /// text and are skipped.
    pub fn decode(&self, bits: &BitSlice<u8, Lsb0>, end_marker_present: bool) -> Result<String> {
        let units: Vec<u16> = self
            .decode_symbols(bits, end_marker_present)?
            .into_iter()
            .filter_map(|symbol| match symbol {
                Symbol::Unit(unit) => Some(unit),
                Symbol::EndMarker => None,
            })
            .collect();
        String::from_utf16(&units)
            .map_err(|_| Error::corrupt("decoded code units are not valid UTF-16"))
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(self.root, 0usize, "root")];
        while let Some((id, depth, label)) = stack.pop() {
            let indent = "  ".repeat(depth);
            match &self.nodes[id] {
                HuffmanNode::Leaf { symbol, freq } => {
                    writeln!(f, "{}{} -> {} [{}]", indent, label, symbol, freq)?;
                }
                HuffmanNode::Internal { freq, children } => {
                    writeln!(f, "{}{} -> * [{}]", indent, label, freq)?;
                    if let Some(right) = children[1] {
                        stack.push((right, depth + 1, "1"));
                    }
                    if let Some(left) = children[0] {
                        stack.push((left, depth + 1, "0"));
                    }
                }
            }
        }
        Ok(())
    }
}
