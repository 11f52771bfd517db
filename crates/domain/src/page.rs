use serde::Serialize;

/// One window of an ordered listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    /// Offset of the following window, absent once the listing is exhausted.
    pub next_offset: Option<usize>,
}

impl<T: Clone> Page<T> {
    pub fn slice(all: &[T], offset: usize, limit: usize) -> Self {
        let total = all.len();
        let start = offset.min(total);
        let end = start.saturating_add(limit).min(total);
        let items = all[start..end].to_vec();
        let next_offset = (end < total).then_some(end);

        Self {
            items,
            total,
            next_offset,
        }
    }
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            next_offset: None,
        }
    }
}
