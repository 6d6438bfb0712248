//! Drop Placement
//!
//! Turns a pointer coordinate plus sibling geometry into an insertion index.

/// Axis along which siblings are laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Stacked top to bottom (task cards)
    Vertical,
    /// Side by side (board columns)
    Horizontal,
}

/// Extent of one element along the layout axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn from_rect(rect: &web_sys::DomRect, axis: Axis) -> Self {
        match axis {
            Axis::Vertical => Self::new(rect.top(), rect.bottom()),
            Axis::Horizontal => Self::new(rect.left(), rect.right()),
        }
    }

    /// Pointer coordinate from a drag event along `axis`.
    pub fn pointer(ev: &web_sys::DragEvent, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => ev.client_y() as f64,
            Axis::Horizontal => ev.client_x() as f64,
        }
    }
}

/// Index at which `dragged` should be inserted among its new siblings.
///
/// Siblings are given in display order. The dragged element itself is
/// skipped, so the result indexes the list *without* it: the first sibling
/// whose midpoint lies past the pointer, else the end of the list.
pub fn insertion_index<'a, Id, I>(pointer: f64, siblings: I, dragged: &Id) -> usize
where
    Id: PartialEq + 'a,
    I: IntoIterator<Item = (&'a Id, Span)>,
{
    let mut index = 0;
    for (id, span) in siblings {
        if id == dragged {
            continue;
        }
        if span.midpoint() > pointer {
            return index;
        }
        index += 1;
    }
    index
}

/// `order` with `moved` taken out and put back at `index` (clamped).
pub fn reinsert<Id: Clone + PartialEq>(order: &[Id], moved: &Id, index: usize) -> Vec<Id> {
    let mut out: Vec<Id> = order.iter().filter(|id| *id != moved).cloned().collect();
    let index = index.min(out.len());
    out.insert(index, moved.clone());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack() -> Vec<(u32, Span)> {
        // Three 40px cards with 10px gaps
        vec![
            (1, Span::new(0.0, 40.0)),
            (2, Span::new(50.0, 90.0)),
            (3, Span::new(100.0, 140.0)),
        ]
    }

    fn index_for(pointer: f64, dragged: u32) -> usize {
        let siblings = stack();
        insertion_index(pointer, siblings.iter().map(|(id, s)| (id, *s)), &dragged)
    }

    #[test]
    fn test_pointer_above_first_midpoint() {
        assert_eq!(index_for(5.0, 99), 0);
    }

    #[test]
    fn test_pointer_between_cards() {
        assert_eq!(index_for(45.0, 99), 1);
        assert_eq!(index_for(95.0, 99), 2);
    }

    #[test]
    fn test_pointer_below_all_cards() {
        assert_eq!(index_for(500.0, 99), 3);
    }

    #[test]
    fn test_pointer_on_midpoint_goes_after() {
        assert_eq!(index_for(20.0, 99), 1);
    }

    #[test]
    fn test_dragged_card_is_skipped() {
        // Card 1 dragged below card 2: index among [2, 3]
        assert_eq!(index_for(95.0, 1), 1);
        // Card 3 dragged to the top
        assert_eq!(index_for(0.0, 3), 0);
    }

    #[test]
    fn test_empty_target() {
        let none: Vec<(u32, Span)> = Vec::new();
        assert_eq!(insertion_index(10.0, none.iter().map(|(id, s)| (id, *s)), &1), 0);
    }

    #[test]
    fn test_reinsert_moves_element() {
        assert_eq!(reinsert(&[1, 2, 3, 4], &1, 2), vec![2, 3, 1, 4]);
        assert_eq!(reinsert(&[1, 2, 3, 4], &4, 0), vec![4, 1, 2, 3]);
    }

    #[test]
    fn test_reinsert_clamps_index() {
        assert_eq!(reinsert(&[1, 2, 3], &2, 10), vec![1, 3, 2]);
    }
}
