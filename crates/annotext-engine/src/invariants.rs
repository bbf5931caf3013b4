use crate::markup::{can_merge, compare};
use crate::text::AnnotatedText;

/// Panics unless `text` is canonical: cached length matches, markups are
/// in bounds, sorted, and no two mergeable markups remain.
pub fn check(text: &AnnotatedText) {
    let n = text.text().chars().count();
    assert_eq!(
        text.len(),
        n,
        "cached length {} differs from text length {}",
        text.len(),
        n
    );

    for markup in text.markups() {
        assert!(
            markup.start < markup.end && markup.end <= n,
            "markup out of bounds: {:?} (text len: {})",
            markup,
            n
        );
        assert!(
            markup.href.is_none() || markup.kind == crate::MarkupType::Link,
            "href on a non-link markup: {:?}",
            markup
        );
    }

    for pair in text.markups().windows(2) {
        assert!(
            compare(&pair[0], &pair[1]).is_le(),
            "markups out of order: {:?} before {:?}",
            pair[0],
            pair[1]
        );
    }

    // Links of different hrefs interleave in the sorted list, so mergeable
    // pairs are searched among all same-type markups.
    for (i, a) in text.markups().iter().enumerate() {
        for b in &text.markups()[i + 1..] {
            if b.kind != a.kind {
                break;
            }
            assert!(
                !can_merge(a, b),
                "markups should have been merged: {:?} and {:?}",
                a,
                b
            );
            if a.kind == crate::MarkupType::Link {
                assert!(
                    a.end <= b.start,
                    "links overlap: {:?} and {:?}",
                    a,
                    b
                );
            }
        }
    }
}
