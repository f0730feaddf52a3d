//! Sibling sequence alignment.
//!
//! Given the (canonically sorted) children of a matched node pair, the
//! aligner produces an ordered sequence of slots covering every child on
//! both sides. Two interchangeable strategies exist: a linear merge-join
//! over the sorted key sequences, and a longest-matching-blocks opcode
//! walk in the style of classic sequence matchers.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::AlignmentStrategy;
use crate::key::{IdentityKey, KeyedNode};

/// One aligned position in a pair of sibling sequences.
pub enum Slot<'k, 'a> {
    /// Key-equal pair; semantically the same child on both sides.
    Matched(&'k KeyedNode<'a>, &'k KeyedNode<'a>),
    /// Same-tag pair from a replace block; a modification candidate.
    Paired(&'k KeyedNode<'a>, &'k KeyedNode<'a>),
    /// Present only on the before side.
    Removed(&'k KeyedNode<'a>),
    /// Present only on the after side.
    Added(&'k KeyedNode<'a>),
}

/// Align two sibling sequences, covering all of `a` and `b` in order.
pub fn align<'k, 'a>(
    a: &'k [KeyedNode<'a>],
    b: &'k [KeyedNode<'a>],
    strategy: AlignmentStrategy,
) -> Vec<Slot<'k, 'a>> {
    match strategy {
        AlignmentStrategy::MergeJoin => merge_join(a, b),
        AlignmentStrategy::SequenceMatching => sequence_match(a, b),
    }
}

/// Linear scan with two cursors; requires both sides canonically sorted.
///
/// Equal keys match and both cursors advance; otherwise the side with the
/// lexicographically smaller key is emitted one-sided. An exhausted side
/// flushes the remainder of the other as unmatched.
fn merge_join<'k, 'a>(a: &'k [KeyedNode<'a>], b: &'k [KeyedNode<'a>]) -> Vec<Slot<'k, 'a>> {
    let mut slots = Vec::with_capacity(a.len().max(b.len()));
    let (mut i, mut j) = (0, 0);

    while i < a.len() || j < b.len() {
        match (a.get(i), b.get(j)) {
            (Some(x), Some(y)) => match x.key.cmp(&y.key) {
                Ordering::Equal => {
                    slots.push(Slot::Matched(x, y));
                    i += 1;
                    j += 1;
                }
                Ordering::Less => {
                    slots.push(Slot::Removed(x));
                    i += 1;
                }
                Ordering::Greater => {
                    slots.push(Slot::Added(y));
                    j += 1;
                }
            },
            (Some(x), None) => {
                slots.push(Slot::Removed(x));
                i += 1;
            }
            (None, Some(y)) => {
                slots.push(Slot::Added(y));
                j += 1;
            }
            (None, None) => break,
        }
    }

    slots
}

/// Opcode-based alignment; no sort precondition.
///
/// Replace blocks are paired by position up to the shorter length: a
/// same-tag pair becomes a modification candidate, a cross-tag pair
/// resolves to a removal followed by an addition, and the remainder of the
/// longer side is always one-sided (never cross-matched).
fn sequence_match<'k, 'a>(a: &'k [KeyedNode<'a>], b: &'k [KeyedNode<'a>]) -> Vec<Slot<'k, 'a>> {
    let keys_a: Vec<&IdentityKey> = a.iter().map(|k| &k.key).collect();
    let keys_b: Vec<&IdentityKey> = b.iter().map(|k| &k.key).collect();

    let mut slots = Vec::with_capacity(a.len().max(b.len()));
    for op in opcodes(&keys_a, &keys_b) {
        match op.tag {
            OpTag::Equal => {
                for k in 0..(op.a2 - op.a1) {
                    slots.push(Slot::Matched(&a[op.a1 + k], &b[op.b1 + k]));
                }
            }
            OpTag::Delete => {
                for x in &a[op.a1..op.a2] {
                    slots.push(Slot::Removed(x));
                }
            }
            OpTag::Insert => {
                for y in &b[op.b1..op.b2] {
                    slots.push(Slot::Added(y));
                }
            }
            OpTag::Replace => {
                let short = (op.a2 - op.a1).min(op.b2 - op.b1);
                for k in 0..short {
                    let x = &a[op.a1 + k];
                    let y = &b[op.b1 + k];
                    if x.node.tag == y.node.tag {
                        slots.push(Slot::Paired(x, y));
                    } else {
                        slots.push(Slot::Removed(x));
                        slots.push(Slot::Added(y));
                    }
                }
                for x in &a[op.a1 + short..op.a2] {
                    slots.push(Slot::Removed(x));
                }
                for y in &b[op.b1 + short..op.b2] {
                    slots.push(Slot::Added(y));
                }
            }
        }
    }

    slots
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpTag {
    Equal,
    Replace,
    Delete,
    Insert,
}

#[derive(Debug, Clone, Copy)]
struct Opcode {
    tag: OpTag,
    a1: usize,
    a2: usize,
    b1: usize,
    b2: usize,
}

/// Opcodes describing how to turn `a` into `b`, from matching blocks.
fn opcodes(a: &[&IdentityKey], b: &[&IdentityKey]) -> Vec<Opcode> {
    let mut ops = Vec::new();
    let (mut ai, mut bj) = (0, 0);

    for (i, j, n) in matching_blocks(a, b) {
        let tag = match (ai < i, bj < j) {
            (true, true) => Some(OpTag::Replace),
            (true, false) => Some(OpTag::Delete),
            (false, true) => Some(OpTag::Insert),
            (false, false) => None,
        };
        if let Some(tag) = tag {
            ops.push(Opcode {
                tag,
                a1: ai,
                a2: i,
                b1: bj,
                b2: j,
            });
        }
        if n > 0 {
            ops.push(Opcode {
                tag: OpTag::Equal,
                a1: i,
                a2: i + n,
                b1: j,
                b2: j + n,
            });
        }
        ai = i + n;
        bj = j + n;
    }

    ops
}

/// Maximal matching blocks `(a_start, b_start, len)` in order, terminated
/// by a zero-length sentinel at `(a.len(), b.len())`.
fn matching_blocks(a: &[&IdentityKey], b: &[&IdentityKey]) -> Vec<(usize, usize, usize)> {
    let mut b2j: HashMap<&IdentityKey, Vec<usize>> = HashMap::new();
    for (j, key) in b.iter().enumerate() {
        b2j.entry(key).or_default().push(j);
    }

    let mut blocks = Vec::new();
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, n) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if n > 0 {
            blocks.push((i, j, n));
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + n < ahi && j + n < bhi {
                queue.push((i + n, ahi, j + n, bhi));
            }
        }
    }

    blocks.sort_unstable();
    blocks.push((a.len(), b.len(), 0));
    blocks
}

/// Longest block of equal keys within the given window, earliest first.
fn longest_match(
    a: &[&IdentityKey],
    b2j: &HashMap<&IdentityKey, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_n) = (alo, blo, 0);
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for i in alo..ahi {
        let mut next: HashMap<usize, usize> = HashMap::new();
        if let Some(indices) = b2j.get(a[i]) {
            for &j in indices {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let n = if j > 0 {
                    j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                } else {
                    1
                };
                next.insert(j, n);
                if n > best_n {
                    best_i = i + 1 - n;
                    best_j = j + 1 - n;
                    best_n = n;
                }
            }
        }
        j2len = next;
    }

    (best_i, best_j, best_n)
}
