//! Sequence diff computation engine.
//!
//! [`diff`] computes a shortest edit script (Myers' O(ND) algorithm, in its
//! linear-space divide-and-conquer form) between two slices under a
//! caller-supplied equality predicate. The script is made
//! only of deletions from the source and insertions from the target; a
//! replaced run shows up as a deletion followed by an insertion at the same
//! source position.

use std::ops::Range;

/// Kind of a single edit run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// Remove `source` items from the source sequence
    Delete,
    /// Insert `target` items from the target sequence
    Insert,
}

/// One contiguous run of changes.
///
/// Both ranges are always populated so that renderers can locate the run in
/// either sequence: a `Delete` has an empty `target` range positioned where
/// the removal lands in the target, and an `Insert` has an empty `source`
/// range positioned where the new items go in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub kind: EditKind,
    pub source: Range<usize>,
    pub target: Range<usize>,
}

impl Edit {
    /// Number of items removed or inserted by this run
    pub fn len(&self) -> usize {
        match self.kind {
            EditKind::Delete => self.source.len(),
            EditKind::Insert => self.target.len(),
        }
    }

    /// Always false for edits produced by [`diff`]; runs are never empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position of this run in the source sequence
    pub fn position(&self) -> usize {
        self.source.start
    }

    /// The items this run removes or inserts
    pub fn items<'a, T>(&self, source: &'a [T], target: &'a [T]) -> &'a [T] {
        match self.kind {
            EditKind::Delete => &source[self.source.clone()],
            EditKind::Insert => &target[self.target.clone()],
        }
    }
}

/// Ordered list of edits transforming a source sequence into a target
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditScript {
    edits: Vec<Edit>,
}

impl EditScript {
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Replay the script over `source`, producing the target sequence
    ///
    /// `target` supplies the inserted items.
    pub fn apply<T: Clone>(&self, source: &[T], target: &[T]) -> Vec<T> {
        let mut out = Vec::with_capacity(target.len());
        let mut cursor = 0;
        for edit in &self.edits {
            out.extend_from_slice(&source[cursor..edit.source.start]);
            match edit.kind {
                EditKind::Delete => cursor = edit.source.end,
                EditKind::Insert => {
                    out.extend_from_slice(&target[edit.target.clone()]);
                    cursor = edit.source.start;
                }
            }
        }
        out.extend_from_slice(&source[cursor..]);
        out
    }
}

/// Compute the shortest edit script turning `source` into `target`
///
/// Deterministic: the same inputs always produce the same script. Every
/// block of adjacent changes comes out as one deletion run followed by one
/// insertion run. Working memory is linear in `source.len() + target.len()`.
pub fn diff<T, F>(source: &[T], target: &[T], eq: F) -> EditScript
where
    F: Fn(&T, &T) -> bool,
{
    let mut bisector = Bisector::new(source, target, &eq);
    let mut raw = Vec::new();
    bisector.conquer(0..source.len(), 0..target.len(), &mut raw);
    EditScript {
        edits: merge_blocks(raw),
    }
}

/// Convenience wrapper over [`diff`] using `PartialEq`
pub fn diff_eq<T: PartialEq>(source: &[T], target: &[T]) -> EditScript {
    diff(source, target, |a, b| a == b)
}

/// Furthest-reaching x per diagonal `k = x - y`, for `k` in `-max..=max`
struct Diagonals {
    offset: isize,
    reach: Vec<usize>,
}

impl Diagonals {
    fn new(max: usize) -> Self {
        Self {
            offset: max as isize + 1,
            reach: vec![0; 2 * max + 3],
        }
    }

    fn get(&self, k: isize) -> usize {
        self.reach[(k + self.offset) as usize]
    }

    fn set(&mut self, k: isize, x: usize) {
        let i = (k + self.offset) as usize;
        self.reach[i] = x;
    }
}

/// Linear-space Myers: find the middle snake of the remaining ranges, then
/// recurse on both sides of it. Both diagonal vectors are reused across the
/// whole recursion.
struct Bisector<'a, T, F> {
    source: &'a [T],
    target: &'a [T],
    eq: &'a F,
    forward: Diagonals,
    backward: Diagonals,
}

impl<'a, T, F> Bisector<'a, T, F>
where
    F: Fn(&T, &T) -> bool,
{
    fn new(source: &'a [T], target: &'a [T], eq: &'a F) -> Self {
        let max = (source.len() + target.len() + 1) / 2 + 1;
        Self {
            source,
            target,
            eq,
            forward: Diagonals::new(max),
            backward: Diagonals::new(max),
        }
    }

    fn same(&self, x: usize, y: usize) -> bool {
        (self.eq)(&self.source[x], &self.target[y])
    }

    fn conquer(&mut self, mut src: Range<usize>, mut tgt: Range<usize>, out: &mut Vec<Edit>) {
        while !src.is_empty() && !tgt.is_empty() && self.same(src.start, tgt.start) {
            src.start += 1;
            tgt.start += 1;
        }
        while !src.is_empty() && !tgt.is_empty() && self.same(src.end - 1, tgt.end - 1) {
            src.end -= 1;
            tgt.end -= 1;
        }

        match (src.is_empty(), tgt.is_empty()) {
            (true, true) => {}
            (true, false) => out.push(Edit {
                kind: EditKind::Insert,
                source: src.start..src.start,
                target: tgt,
            }),
            (false, true) => out.push(Edit {
                kind: EditKind::Delete,
                source: src,
                target: tgt.start..tgt.start,
            }),
            (false, false) => {
                let (x, y) = self.middle_snake(&src, &tgt);
                self.conquer(src.start..x, tgt.start..y, out);
                self.conquer(x..src.end, y..tgt.end, out);
            }
        }
    }

    /// A point on a shortest path through `src` x `tgt`, strictly inside
    /// it when both ranges are non-empty and differ at both ends
    fn middle_snake(&mut self, src: &Range<usize>, tgt: &Range<usize>) -> (usize, usize) {
        let n = src.len();
        let m = tgt.len();
        let delta = n as isize - m as isize;
        let odd = delta & 1 == 1;
        self.forward.set(1, 0);
        self.backward.set(1, 0);

        let max = ((n + m + 1) / 2 + 1) as isize;
        for d in 0..max {
            let mut k = d;
            while k >= -d {
                let mut x = if k == -d
                    || (k != d && self.forward.get(k - 1) < self.forward.get(k + 1))
                {
                    self.forward.get(k + 1)
                } else {
                    self.forward.get(k - 1) + 1
                };
                let start = (x, (x as isize - k) as usize);
                let mut y = start.1;
                while x < n && y < m && self.same(src.start + x, tgt.start + y) {
                    x += 1;
                    y += 1;
                }
                self.forward.set(k, x);
                if odd && (k - delta).abs() < d && x + self.backward.get(delta - k) >= n {
                    return (src.start + start.0, tgt.start + start.1);
                }
                k -= 2;
            }

            // backward reach counts from the end of both ranges
            let mut k = -d;
            while k <= d {
                let mut x = if k == -d
                    || (k != d && self.backward.get(k - 1) < self.backward.get(k + 1))
                {
                    self.backward.get(k + 1)
                } else {
                    self.backward.get(k - 1) + 1
                };
                let mut y = (x as isize - k) as usize;
                while x < n && y < m && self.same(src.end - x - 1, tgt.end - y - 1) {
                    x += 1;
                    y += 1;
                }
                self.backward.set(k, x);
                if !odd && (k - delta).abs() <= d && x + self.forward.get(delta - k) >= n {
                    return (src.end - x, tgt.end - y);
                }
                k += 2;
            }
        }

        // unreachable for non-empty ranges; degrade to replacing everything
        (src.end, tgt.start)
    }
}

/// Rewrite each block of adjacent edits (no common item between them) as a
/// single deletion followed by a single insertion.
fn merge_blocks(raw: Vec<Edit>) -> Vec<Edit> {
    let mut edits = Vec::with_capacity(raw.len());
    let mut raw = raw.into_iter().peekable();
    while let Some(first) = raw.next() {
        let (source_start, target_start) = (first.source.start, first.target.start);
        let (mut source_end, mut target_end) = (first.source.end, first.target.end);
        while let Some(next) =
            raw.next_if(|e| e.source.start == source_end && e.target.start == target_end)
        {
            source_end = next.source.end;
            target_end = next.target.end;
        }

        if source_end > source_start {
            edits.push(Edit {
                kind: EditKind::Delete,
                source: source_start..source_end,
                target: target_start..target_start,
            });
        }
        if target_end > target_start {
            edits.push(Edit {
                kind: EditKind::Insert,
                source: source_end..source_end,
                target: target_start..target_end,
            });
        }
    }
    edits
}
