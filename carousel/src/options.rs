use alloc::collections::BTreeMap;
use alloc::string::String;

/// How many slides are visible at once.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum SlidesToShow {
    Fixed(usize),
    /// Minimum viewport width → slide count. The entry with the greatest key not exceeding the
    /// viewport width wins; when no key matches the count is 1.
    Breakpoints(BTreeMap<u32, usize>),
}

impl SlidesToShow {
    pub fn breakpoints(table: impl IntoIterator<Item = (u32, usize)>) -> Self {
        Self::Breakpoints(table.into_iter().collect())
    }

    /// Resolves the slide count for a viewport width (before clamping to the slide total).
    pub fn resolve(&self, viewport_width: u32) -> usize {
        match self {
            Self::Fixed(n) => *n,
            Self::Breakpoints(table) => table
                .range(..=viewport_width)
                .next_back()
                .map(|(_, &n)| n)
                .unwrap_or(1),
        }
    }
}

impl Default for SlidesToShow {
    fn default() -> Self {
        Self::breakpoints([(0, 1), (768, 2), (1200, 3)])
    }
}

impl From<usize> for SlidesToShow {
    fn from(n: usize) -> Self {
        Self::Fixed(n)
    }
}

/// Selectors for controls that live outside the carousel container. All optional: a missing
/// selector (or one that matches nothing) disables the corresponding control.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ControlSelectors {
    pub prev_button: Option<String>,
    pub next_button: Option<String>,
    pub current_slide: Option<String>,
    pub total_slides: Option<String>,
    pub pagination: Option<String>,
}

/// Configuration for [`crate::Carousel`].
///
/// Start from `CarouselOptions::default()` and override with the `with_*` builders. With
/// `feature = "serde"`, a partial document deserializes on top of the defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CarouselOptions {
    pub auto_play: bool,
    pub auto_play_delay_ms: u64,
    pub transition_duration_ms: u64,
    /// CSS timing function used for animated moves.
    pub easing: String,
    pub pause_on_hover: bool,
    pub infinite: bool,
    pub slides_to_show: SlidesToShow,
    pub slides_to_scroll: usize,
    /// Media query that must match for the carousel to be bound at all.
    pub active_breakpoint: Option<String>,
    pub selectors: ControlSelectors,
    /// Render pagination dots into `selectors.pagination`.
    pub pagination: bool,
    pub pagination_dot_label: String,
    pub track_selector: String,
    pub swipe_threshold_px: u32,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            auto_play: true,
            auto_play_delay_ms: 4000,
            transition_duration_ms: 600,
            easing: String::from("ease-in-out"),
            pause_on_hover: true,
            infinite: true,
            slides_to_show: SlidesToShow::default(),
            slides_to_scroll: 1,
            active_breakpoint: None,
            selectors: ControlSelectors::default(),
            pagination: false,
            pagination_dot_label: String::from("Go to slide"),
            track_selector: String::from(".carousel-track"),
            swipe_threshold_px: 50,
        }
    }
}

impl CarouselOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The scroll step actually used by navigation commands (never 0).
    pub fn scroll_step(&self) -> usize {
        self.slides_to_scroll.max(1)
    }

    pub fn with_auto_play(mut self, auto_play: bool) -> Self {
        self.auto_play = auto_play;
        self
    }

    pub fn with_auto_play_delay_ms(mut self, delay_ms: u64) -> Self {
        self.auto_play_delay_ms = delay_ms;
        self
    }

    pub fn with_transition(mut self, duration_ms: u64, easing: impl Into<String>) -> Self {
        self.transition_duration_ms = duration_ms;
        self.easing = easing.into();
        self
    }

    pub fn with_pause_on_hover(mut self, pause_on_hover: bool) -> Self {
        self.pause_on_hover = pause_on_hover;
        self
    }

    pub fn with_infinite(mut self, infinite: bool) -> Self {
        self.infinite = infinite;
        self
    }

    pub fn with_slides_to_show(mut self, slides_to_show: impl Into<SlidesToShow>) -> Self {
        self.slides_to_show = slides_to_show.into();
        self
    }

    pub fn with_slides_to_scroll(mut self, slides_to_scroll: usize) -> Self {
        self.slides_to_scroll = slides_to_scroll;
        self
    }

    pub fn with_active_breakpoint(mut self, query: Option<impl Into<String>>) -> Self {
        self.active_breakpoint = query.map(Into::into);
        self
    }

    pub fn with_arrows(
        mut self,
        prev_button: Option<impl Into<String>>,
        next_button: Option<impl Into<String>>,
    ) -> Self {
        self.selectors.prev_button = prev_button.map(Into::into);
        self.selectors.next_button = next_button.map(Into::into);
        self
    }

    pub fn with_counters(
        mut self,
        current_slide: Option<impl Into<String>>,
        total_slides: Option<impl Into<String>>,
    ) -> Self {
        self.selectors.current_slide = current_slide.map(Into::into);
        self.selectors.total_slides = total_slides.map(Into::into);
        self
    }

    /// Enables pagination dots rendered into the element matched by `selector`.
    pub fn with_pagination(mut self, selector: impl Into<String>) -> Self {
        self.pagination = true;
        self.selectors.pagination = Some(selector.into());
        self
    }

    pub fn with_track_selector(mut self, selector: impl Into<String>) -> Self {
        self.track_selector = selector.into();
        self
    }

    pub fn with_swipe_threshold_px(mut self, threshold: u32) -> Self {
        self.swipe_threshold_px = threshold;
        self
    }
}

#[cfg(feature = "serde")]
mod de {
    use super::SlidesToShow;
    use alloc::collections::BTreeMap;
    use core::fmt;
    use serde::de::{self, Deserializer, MapAccess, Visitor};

    // Accepts both `3` and `{"0": 1, "768": 2}`. Map keys arrive as strings from JSON, which
    // an untagged derive cannot parse into integers.
    impl<'de> serde::Deserialize<'de> for SlidesToShow {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(SlidesToShowVisitor)
        }
    }

    struct SlidesToShowVisitor;

    impl<'de> Visitor<'de> for SlidesToShowVisitor {
        type Value = SlidesToShow;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a slide count or a map of minimum width to slide count")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(SlidesToShow::Fixed(v as usize))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            usize::try_from(v)
                .map(SlidesToShow::Fixed)
                .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut table = BTreeMap::new();
            while let Some((MinWidth(width), count)) = map.next_entry::<MinWidth, usize>()? {
                table.insert(width, count);
            }
            Ok(SlidesToShow::Breakpoints(table))
        }
    }

    struct MinWidth(u32);

    impl<'de> serde::Deserialize<'de> for MinWidth {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            struct MinWidthVisitor;

            impl Visitor<'_> for MinWidthVisitor {
                type Value = MinWidth;

                fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str("a non-negative viewport width")
                }

                fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                    u32::try_from(v)
                        .map(MinWidth)
                        .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
                }

                fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                    v.trim()
                        .parse::<u32>()
                        .map(MinWidth)
                        .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }

            deserializer.deserialize_any(MinWidthVisitor)
        }
    }
}
