//! Capacity-aware index and range compression.
//!
//! Vendor config-text formats reference codeplug objects by small integer
//! indices inside fixed-size tables, and compress runs of consecutive
//! indices into `N-M` ranges. Every table kind (channel-in-zone,
//! channel-in-scanlist, contact-in-grouplist) shares the same subtle
//! truncation and merge semantics, so the encoder lives here once,
//! parameterized by item and key.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use tracing::debug;

/// One element of a compressed index list: a lone index or an inclusive run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeEntry {
    Single(usize),
    Span(usize, usize),
}

impl RangeEntry {
    /// Number of indices this entry covers.
    pub fn len(&self) -> usize {
        match self {
            RangeEntry::Single(_) => 1,
            RangeEntry::Span(start, end) => end - start + 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// The member indices, in order.
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        let (start, end) = match *self {
            RangeEntry::Single(ix) => (ix, ix),
            RangeEntry::Span(start, end) => (start, end),
        };
        start..=end
    }
}

impl fmt::Display for RangeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeEntry::Single(ix) => write!(f, "{ix}"),
            RangeEntry::Span(start, end) => write!(f, "{start}-{end}"),
        }
    }
}

/// Map each distinct key to the index of its first occurrence, starting at
/// `offset` (1 for one-based radio tables). Duplicates reuse the first index.
pub fn build_index<T, K, F>(items: &[T], key: F, offset: usize) -> HashMap<K, usize>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut index = HashMap::with_capacity(items.len());
    for (ix, item) in items.iter().enumerate() {
        index.entry(key(item)).or_insert(ix + offset);
    }
    index
}

/// Compress the indices of `selected` (looked up in `index`) into singletons
/// and inclusive spans, in input order.
///
/// Indices above `max_index` are skipped: the item does not exist in the
/// radio's truncated table. Once `max_count` items have been accepted the
/// walk stops and the remainder is dropped; both cases log at debug level
/// and neither is an error. A span covering exactly two indices renders
/// better as two singletons, so it is exploded.
pub fn to_ranges<T, K, F>(
    index: &HashMap<K, usize>,
    selected: &[T],
    key: F,
    max_index: Option<usize>,
    max_count: Option<usize>,
) -> Vec<RangeEntry>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut ranges: Vec<RangeEntry> = Vec::new();
    let mut accepted = 0usize;
    let mut skipped = 0usize;

    for (position, item) in selected.iter().enumerate() {
        let Some(&ix) = index.get(&key(item)) else {
            skipped += 1;
            continue;
        };
        if max_index.is_some_and(|max| ix > max) {
            skipped += 1;
            continue;
        }
        if max_count.is_some_and(|max| accepted >= max) {
            debug!(
                "range truncated at {} items; dropping {} remaining",
                accepted,
                selected.len() - position
            );
            break;
        }
        accepted += 1;
        let merged = match ranges.last_mut() {
            Some(last) => {
                let (start, end) = match *last {
                    RangeEntry::Single(prev) => (prev, prev),
                    RangeEntry::Span(start, end) => (start, end),
                };
                if end + 1 == ix {
                    *last = RangeEntry::Span(start, ix);
                    true
                } else {
                    false
                }
            }
            None => false,
        };
        if !merged {
            ranges.push(RangeEntry::Single(ix));
        }
    }
    if skipped > 0 {
        debug!("skipped {skipped} items missing from the target table");
    }

    // N,N+1 is shorter than N-N+1.
    ranges
        .into_iter()
        .flat_map(|rng| match rng {
            RangeEntry::Span(start, end) if end - start == 1 => {
                vec![RangeEntry::Single(start), RangeEntry::Single(end)]
            }
            other => vec![other],
        })
        .collect()
}

/// Shift every index in `ranges` by `offset`.
pub fn offset_ranges(ranges: &[RangeEntry], offset: usize) -> Vec<RangeEntry> {
    ranges
        .iter()
        .map(|rng| match *rng {
            RangeEntry::Single(ix) => RangeEntry::Single(ix + offset),
            RangeEntry::Span(start, end) => RangeEntry::Span(start + offset, end + offset),
        })
        .collect()
}

/// Render ranges as `"1,3-5,9"`.
pub fn format_ranges(ranges: &[RangeEntry]) -> String {
    let parts: Vec<String> = ranges.iter().map(|rng| rng.to_string()).collect();
    parts.join(",")
}

/// Total number of indices covered by `ranges`.
pub fn total_indices(ranges: &[RangeEntry]) -> usize {
    ranges.iter().map(RangeEntry::len).sum()
}
