use crate::document::Document;
use crate::selectors;

/// Total pages advertised by the pagination control.
///
/// Counts page-index entries other than the next/previous arrows. Result
/// sets that fit on one page have no control at all, so zero means 1.
pub fn count_pages(doc: &Document) -> u32 {
    let count = doc.select(&selectors::PAGE_INDEX).count();
    u32::try_from(count).unwrap_or(u32::MAX).max(1)
}
