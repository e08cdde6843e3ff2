/// A lightweight, serializable snapshot of a carousel's mutable state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarouselState {
    pub is_active: bool,
    pub total_real: usize,
    pub slides_to_show: usize,
    /// Position in track space (leading clones included).
    pub current_index: i64,
    pub is_transitioning: bool,
    /// Clones on each side of the real slides.
    pub clones_per_side: usize,
}

/// Derived paging information for counters and pagination dots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageInfo {
    /// 1-based.
    pub current: usize,
    pub total: usize,
}

impl PageInfo {
    /// Index of the dot that should carry the active marker.
    pub fn active_dot(&self) -> usize {
        self.current.saturating_sub(1)
    }
}
