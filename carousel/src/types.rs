/// How the rendering layer should move the track after a command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Motion {
    /// The track position did not change.
    #[default]
    None,
    /// Move with the configured CSS transition; a transition-end event is expected.
    Animated,
    /// Jump without a transition (initial placement, loop correction, rebuilds).
    Instant,
}

/// The outcome of a [`crate::Carousel`] command.
///
/// Commands never touch UI objects. The adapter applies a `Change` by (in order) rebuilding
/// clones/grid/pagination when `relayout` is set, positioning the track according to `motion`,
/// then refreshing derived controls (counters, active dot, arrow state).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Change {
    pub motion: Motion,
    /// `slides_to_show` (and therefore clones, grid columns and page count) changed.
    pub relayout: bool,
}

impl Change {
    pub const NONE: Self = Self {
        motion: Motion::None,
        relayout: false,
    };

    pub(crate) const fn animated() -> Self {
        Self {
            motion: Motion::Animated,
            relayout: false,
        }
    }

    pub(crate) const fn instant() -> Self {
        Self {
            motion: Motion::Instant,
            relayout: false,
        }
    }

    pub(crate) const fn relayout() -> Self {
        Self {
            motion: Motion::Instant,
            relayout: true,
        }
    }

    pub fn is_none(&self) -> bool {
        self.motion == Motion::None && !self.relayout
    }

    /// Whether counters, dots and arrows need to be refreshed.
    pub fn refreshes_controls(&self) -> bool {
        !self.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Forward,
    Backward,
}

/// What occupies a position of the track.
///
/// The track is laid out as `[leading clones][real slides][trailing clones]`; every variant
/// carries the index of the real slide it shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Slot {
    LeadingClone(usize),
    Real(usize),
    TrailingClone(usize),
}

impl Slot {
    pub fn real_index(&self) -> usize {
        match *self {
            Self::LeadingClone(i) | Self::Real(i) | Self::TrailingClone(i) => i,
        }
    }

    pub fn is_clone(&self) -> bool {
        !matches!(self, Self::Real(_))
    }
}

/// Enabled/disabled state for external prev/next buttons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrowState {
    pub prev_disabled: bool,
    pub next_disabled: bool,
}
