#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::ElementStore;
use crate::viewport::Point;

/// Index of the topmost element whose rectangle contains `canvas_pt`.
///
/// Topmost means highest `z_index`; ties go to the later element, matching
/// draw order.
#[must_use]
pub fn hit_test(canvas_pt: Point, store: &ElementStore) -> Option<usize> {
    store
        .draw_order()
        .into_iter()
        .rev()
        .find(|&i| store.get(i).is_some_and(|el| el.contains(canvas_pt.x, canvas_pt.y)))
}
