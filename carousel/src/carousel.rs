use alloc::sync::Arc;
use core::fmt;
use core::ops::Range;

use crate::{ArrowState, CarouselOptions, CarouselState, Change, Direction, PageInfo, Slot};

/// A callback fired after every command that produced a non-empty [`Change`].
pub type OnChangeCallback = Arc<dyn Fn(&Carousel, Change) + Send + Sync>;

/// A headless carousel engine.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects.
/// - Your adapter feeds it slide counts, viewport/container widths and transition-end events.
/// - Every command returns a [`Change`] telling the adapter how to update the rendering.
///
/// Positions live in *track space*: when looping, the track is
/// `[N leading clones][real slides][N trailing clones]` with `N = slides_to_show`, and
/// `current_index` counts from the first leading clone.
#[derive(Clone)]
pub struct Carousel {
    options: CarouselOptions,
    active: bool,
    total_real: usize,
    viewport_width: u32,
    container_width: u32,
    slides_to_show: usize,
    clones: usize,
    current: i64,
    transitioning: bool,
    on_change: Option<OnChangeCallback>,
}

impl Carousel {
    /// Creates an inactive carousel. Call [`Self::activate`] once the slides are known.
    pub fn new(options: CarouselOptions) -> Self {
        Self {
            options,
            active: false,
            total_real: 0,
            viewport_width: 0,
            container_width: 0,
            slides_to_show: 1,
            clones: 0,
            current: 0,
            transitioning: false,
            on_change: None,
        }
    }

    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&Carousel, Change) + Send + Sync + 'static>,
    ) {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    fn notify(&self, change: Change) {
        if change.is_none() {
            return;
        }
        if let Some(cb) = &self.on_change {
            cb(self, change);
        }
    }

    /// Binds the engine to `total_real` authored slides and places it on the first one.
    pub fn activate(
        &mut self,
        total_real: usize,
        viewport_width: u32,
        container_width: u32,
    ) -> Change {
        self.active = true;
        self.total_real = total_real;
        self.viewport_width = viewport_width;
        self.container_width = container_width;
        self.slides_to_show = self.resolve_slides_to_show(viewport_width);
        self.clones = if self.loops_with(self.slides_to_show) {
            self.slides_to_show
        } else {
            0
        };
        self.current = self.clones as i64;
        self.transitioning = false;
        cdebug!(
            total_real,
            viewport_width,
            container_width,
            slides_to_show = self.slides_to_show,
            clones = self.clones,
            "Carousel::activate"
        );
        let change = Change::relayout();
        self.notify(change);
        change
    }

    /// Unbinds the engine. Returns `false` if it was not active (safe to call repeatedly).
    ///
    /// Clones are dropped from the layout; the adapter is expected to remove their elements.
    pub fn deactivate(&mut self) -> bool {
        if !self.active {
            return false;
        }
        cdebug!(current = self.current, "Carousel::deactivate");
        self.active = false;
        self.transitioning = false;
        self.clones = 0;
        self.current = 0;
        true
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Whether clones are in place and navigation wraps around.
    pub fn is_looping(&self) -> bool {
        self.clones > 0
    }

    pub fn total_real(&self) -> usize {
        self.total_real
    }

    pub fn slides_to_show(&self) -> usize {
        self.slides_to_show
    }

    pub fn current_index(&self) -> i64 {
        self.current
    }

    pub fn clones_per_side(&self) -> usize {
        self.clones
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    pub fn container_width(&self) -> u32 {
        self.container_width
    }

    pub fn state(&self) -> CarouselState {
        CarouselState {
            is_active: self.active,
            total_real: self.total_real,
            slides_to_show: self.slides_to_show,
            current_index: self.current,
            is_transitioning: self.transitioning,
            clones_per_side: self.clones,
        }
    }

    /// Resolves `slides_to_show` for a viewport width, clamped to `1..=max(1, total_real)`.
    pub fn resolve_slides_to_show(&self, viewport_width: u32) -> usize {
        self.options
            .slides_to_show
            .resolve(viewport_width)
            .clamp(1, self.total_real.max(1))
    }

    fn loops_with(&self, slides_to_show: usize) -> bool {
        self.options.infinite && self.total_real > slides_to_show
    }

    fn max_start(&self) -> i64 {
        self.total_real.saturating_sub(self.slides_to_show) as i64
    }

    pub fn next(&mut self) -> Change {
        self.step(Direction::Forward)
    }

    pub fn prev(&mut self) -> Change {
        self.step(Direction::Backward)
    }

    pub fn step(&mut self, direction: Direction) -> Change {
        if !self.accepts_commands() {
            return Change::NONE;
        }
        let delta = self.options.scroll_step() as i64;
        let target = match direction {
            Direction::Forward => self.current + delta,
            Direction::Backward => self.current - delta,
        };
        self.move_to(target)
    }

    /// Navigates to a 0-based page. Pages past the end are clamped to the last page.
    pub fn go_to_page(&mut self, page: usize) -> Change {
        if !self.accepts_commands() {
            return Change::NONE;
        }
        let page = page.min(self.total_pages() - 1);
        let start = (page * self.slides_to_show) as i64;
        let target = if self.is_looping() {
            self.clones as i64 + start
        } else {
            start
        };
        self.move_to(target)
    }

    /// Interprets a horizontal touch gesture. Swiping left (finger moving towards smaller `x`)
    /// advances; movements shorter than `swipe_threshold_px` are ignored.
    pub fn swipe(&mut self, start_x: f32, end_x: f32) -> Change {
        let diff = start_x - end_x;
        let distance = if diff < 0.0 { -diff } else { diff };
        if distance < self.options.swipe_threshold_px as f32 {
            ctrace!(distance, "swipe below threshold");
            return Change::NONE;
        }
        if diff > 0.0 { self.next() } else { self.prev() }
    }

    fn accepts_commands(&self) -> bool {
        if !self.active {
            return false;
        }
        if self.transitioning {
            ctrace!(current = self.current, "command dropped: transition in flight");
            return false;
        }
        true
    }

    fn move_to(&mut self, target: i64) -> Change {
        let target = if self.is_looping() {
            target
        } else {
            target.clamp(0, self.max_start())
        };
        if target == self.current {
            return Change::NONE;
        }
        ctrace!(from = self.current, to = target, "move_to");
        self.current = target;

        // Without a duration there is no transition-end event to wait for.
        let change = if self.options.transition_duration_ms == 0 {
            self.correct_loop();
            Change::instant()
        } else {
            self.transitioning = true;
            Change::animated()
        };
        self.notify(change);
        change
    }

    /// Call when the track's CSS transition has finished. Releases the navigation lock and,
    /// when looping, snaps from a clone back onto the matching real slide.
    pub fn transition_end(&mut self) -> Change {
        if !self.active {
            return Change::NONE;
        }
        self.transitioning = false;
        if !self.correct_loop() {
            return Change::NONE;
        }
        let change = Change::instant();
        self.notify(change);
        change
    }

    fn correct_loop(&mut self) -> bool {
        if self.clones == 0 || self.total_real == 0 {
            return false;
        }
        let n = self.clones as i64;
        let total = self.total_real as i64;
        if (n..n + total).contains(&self.current) {
            return false;
        }
        let corrected = n + (self.current - n).rem_euclid(total);
        ctrace!(from = self.current, to = corrected, "loop correction");
        self.current = corrected;
        true
    }

    /// Feeds new viewport/container geometry (typically from a debounced resize handler).
    pub fn resize(&mut self, viewport_width: u32, container_width: u32) -> Change {
        let width_changed = self.container_width != container_width;
        self.viewport_width = viewport_width;
        self.container_width = container_width;
        if !self.active {
            return Change::NONE;
        }

        let next = self.resolve_slides_to_show(viewport_width);
        if next != self.slides_to_show {
            return self.rebuild_for_change(next);
        }
        if !width_changed {
            return Change::NONE;
        }

        // Pixel offsets are stale. An instant reposition cancels any running transition, so
        // its end event will not arrive.
        self.transitioning = false;
        self.correct_loop();
        let change = Change::instant();
        self.notify(change);
        change
    }

    /// Re-lays out the track for a new `slides_to_show`, keeping the same real slide in front.
    ///
    /// Calling this again with the same count is a no-op.
    pub fn rebuild_for_change(&mut self, slides_to_show: usize) -> Change {
        let next = slides_to_show.clamp(1, self.total_real.max(1));
        if !self.active || next == self.slides_to_show {
            return Change::NONE;
        }
        let real = self.real_index();
        cdebug!(
            from = self.slides_to_show,
            to = next,
            real,
            "rebuild_for_change"
        );

        self.slides_to_show = next;
        self.clones = if self.loops_with(next) { next } else { 0 };
        self.current = if self.is_looping() {
            (next + real) as i64
        } else {
            (real as i64).min(self.max_start())
        };
        self.transitioning = false;

        let change = Change::relayout();
        self.notify(change);
        change
    }

    /// The 0-based index of the real slide at the front of the viewport.
    pub fn real_index(&self) -> usize {
        if self.total_real == 0 {
            return 0;
        }
        let total = self.total_real as i64;
        if self.is_looping() {
            (self.current - self.clones as i64).rem_euclid(total) as usize
        } else {
            self.current.clamp(0, total - 1) as usize
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total_real.div_ceil(self.slides_to_show).max(1)
    }

    /// The 1-based current page.
    ///
    /// A page becomes current as soon as the front slide moves past the start of the previous
    /// page, so a partial last page is reported once the track rests on its final position.
    pub fn current_page(&self) -> usize {
        (self.real_index().div_ceil(self.slides_to_show) + 1).min(self.total_pages())
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            current: self.current_page(),
            total: self.total_pages(),
        }
    }

    /// Arrow state; arrows are never disabled while looping.
    pub fn arrows(&self) -> ArrowState {
        if self.is_looping() {
            return ArrowState::default();
        }
        ArrowState {
            prev_disabled: self.current <= 0,
            next_disabled: self.current >= self.max_start(),
        }
    }

    /// Whether an autoplay timer should run at all.
    pub fn autoplay_eligible(&self) -> bool {
        self.active && self.options.auto_play && self.total_real > self.slides_to_show
    }

    pub fn slide_width_px(&self) -> f64 {
        self.container_width as f64 / self.slides_to_show as f64
    }

    /// Horizontal track offset in pixels (`translateX`).
    pub fn track_offset_px(&self) -> f64 {
        let offset = -(self.current as f64 * self.slide_width_px());
        // Avoid rendering `-0px`.
        if offset == 0.0 { 0.0 } else { offset }
    }

    /// Number of slide positions on the track, clones included.
    pub fn track_len(&self) -> usize {
        self.total_real + 2 * self.clones
    }

    pub fn slot(&self, index: usize) -> Option<Slot> {
        let n = self.clones;
        let total = self.total_real;
        if index < n {
            Some(Slot::LeadingClone(total - n + index))
        } else if index < n + total {
            Some(Slot::Real(index - n))
        } else if index < total + 2 * n {
            Some(Slot::TrailingClone(index - n - total))
        } else {
            None
        }
    }

    /// Iterates over the track layout without allocations.
    pub fn for_each_slot(&self, mut f: impl FnMut(usize, Slot)) {
        for i in 0..self.track_len() {
            if let Some(slot) = self.slot(i) {
                f(i, slot);
            }
        }
    }

    /// Real slides copied in front of the first real slide (in track order).
    pub fn leading_clone_sources(&self) -> Range<usize> {
        self.total_real - self.clones..self.total_real
    }

    /// Real slides copied after the last real slide (in track order).
    pub fn trailing_clone_sources(&self) -> Range<usize> {
        0..self.clones
    }
}

impl fmt::Debug for Carousel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("options", &self.options)
            .field("active", &self.active)
            .field("total_real", &self.total_real)
            .field("viewport_width", &self.viewport_width)
            .field("container_width", &self.container_width)
            .field("slides_to_show", &self.slides_to_show)
            .field("clones", &self.clones)
            .field("current", &self.current)
            .field("transitioning", &self.transitioning)
            .finish_non_exhaustive()
    }
}
