//! Byte-offset spans into document text

use serde::{Deserialize, Serialize};

/// Half-open byte range `[start, end)` into a document's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start offset
    pub start: usize,
    /// Exclusive end offset
    pub end: usize,
}

impl Span {
    /// Create a new span
    ///
    /// # Panics
    /// Panics if `start > end`
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "Span start must be <= end");
        Self { start, end }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether two spans share at least one byte
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `other` lies entirely inside this span
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Smallest span covering both
    pub fn cover(&self, other: &Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Number of bytes separating two spans (0 when they touch or overlap)
    pub fn gap(&self, other: &Span) -> usize {
        if self.end <= other.start {
            other.start - self.end
        } else if other.end <= self.start {
            self.start - other.end
        } else {
            0
        }
    }

    /// Slice the span out of `text`, or `None` if it is out of range or not on
    /// a char boundary
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_and_contains() {
        let outer = Span::new(0, 24);
        let inner = Span::new(9, 24);
        let apart = Span::new(30, 40);

        assert!(outer.overlaps(&inner));
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(!outer.overlaps(&apart));
    }

    #[test]
    fn test_touching_spans_do_not_overlap() {
        let a = Span::new(0, 5);
        let b = Span::new(5, 9);
        assert!(!a.overlaps(&b));
        assert_eq!(a.gap(&b), 0);
    }

    #[test]
    fn test_gap_is_symmetric() {
        let a = Span::new(0, 5);
        let b = Span::new(12, 20);
        assert_eq!(a.gap(&b), 7);
        assert_eq!(b.gap(&a), 7);
    }

    #[test]
    fn test_cover() {
        let a = Span::new(3, 5);
        let b = Span::new(10, 12);
        assert_eq!(a.cover(&b), Span::new(3, 12));
    }

    #[test]
    fn test_slice_respects_char_boundaries() {
        let text = "中国合作";
        assert_eq!(Span::new(0, 6).slice(text), Some("中国"));
        assert_eq!(Span::new(0, 4).slice(text), None);
    }

    #[test]
    #[should_panic]
    fn test_inverted_span() {
        Span::new(5, 1);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn gap_is_symmetric_and_zero_on_overlap(
                a in 0usize..200, a_len in 0usize..30,
                b in 0usize..200, b_len in 0usize..30,
            ) {
                let x = Span::new(a, a + a_len);
                let y = Span::new(b, b + b_len);

                prop_assert_eq!(x.gap(&y), y.gap(&x));
                prop_assert!(x.cover(&y).contains(&x));
                prop_assert!(x.cover(&y).contains(&y));
                if x.overlaps(&y) {
                    prop_assert_eq!(x.gap(&y), 0);
                }
            }
        }
    }
}
