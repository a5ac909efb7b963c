//! Drop-target resolution: converts a drag gesture's geometric detail into
//! an insertion index, for both card and column drops.

/// Where a drag gesture resolved relative to the target container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// Over the item at this index. Out-of-range values are clamped.
    At(isize),
    /// Past the trailing boundary of the container: append at the end.
    AfterLast,
    /// On the container itself with no specific index (e.g. an empty
    /// column): insert first.
    Container,
    /// Over the middle band of an item. Not accepted as a drop target.
    Middle,
}

impl DropTarget {
    /// Resolve against a container currently holding `len` items.
    ///
    /// Returns the insertion index in `0..=len`, or `None` when the drop is
    /// rejected by the acceptance criterion and must have no effect.
    pub fn resolve(self, len: usize) -> Option<usize> {
        match self {
            DropTarget::At(index) => Some(index.clamp(0, len as isize) as usize),
            DropTarget::AfterLast => Some(len),
            DropTarget::Container => Some(0),
            DropTarget::Middle => None,
        }
    }
}
