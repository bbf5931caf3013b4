use std::cmp::Ordering;

use crate::markup::Markup;

/// Canonical order: by type, then start, then end.
pub fn compare(a: &Markup, b: &Markup) -> Ordering {
    a.kind
        .cmp(&b.kind)
        .then(a.start.cmp(&b.start))
        .then(a.end.cmp(&b.end))
}

/// Whether `b`, sorted after `a`, touches or overlaps `a` with the same type
/// and href. Two missing hrefs count as equal.
pub fn can_merge(a: &Markup, b: &Markup) -> bool {
    a.kind == b.kind && a.href == b.href && a.end >= b.start
}

/// Fuses mergeable neighbours of a sorted list in one left-to-right sweep.
///
/// After a merge the fused entry is compared again with its new right
/// neighbour, so a single markup can swallow a whole run.
pub fn merge_adjacent(markups: &mut Vec<Markup>) {
    let mut i = 0;
    while i + 1 < markups.len() {
        if !can_merge(&markups[i], &markups[i + 1]) {
            i += 1;
            continue;
        }

        let next = markups.remove(i + 1);
        let fused = &mut markups[i];
        fused.start = fused.start.min(next.start);
        fused.end = fused.end.max(next.end);
    }
}
