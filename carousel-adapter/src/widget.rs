use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use carousel::{Carousel, CarouselOptions, Change, Motion};

use crate::error::{CarouselError, Result};
use crate::{Action, Debouncer, Dom, Event, EventKind, Interval, ListenerId, Subscriptions, Target};

/// Classes added to every cloned slide.
pub const CLONE_CLASSES: [&str; 2] = ["carousel-slide-clone", "clone"];
pub const DOT_CLASS: &str = "pagination-dot";
pub const ACTIVE_CLASS: &str = "active";
pub const HIDDEN_LABEL_CLASS: &str = "visually-hidden";
/// `data-*` key carrying a dot's page index.
pub const DOT_PAGE_DATA_KEY: &str = "slide";

/// External controls resolved from [`carousel::ControlSelectors`] at bind time.
#[derive(Clone, Debug, PartialEq)]
struct Controls<N> {
    prev: Option<N>,
    next: Option<N>,
    current_label: Option<N>,
    total_label: Option<N>,
    pagination: Option<N>,
}

impl<N> Default for Controls<N> {
    fn default() -> Self {
        Self {
            prev: None,
            next: None,
            current_label: None,
            total_label: None,
            pagination: None,
        }
    }
}

/// Binds a [`Carousel`] engine to a DOM subtree through the [`Dom`] port.
///
/// The widget keeps node handles, never the port itself: every method takes the port as an
/// argument, so several widgets (and marquees) can share one document.
///
/// The host routes events back through [`Self::dispatch`] (by listener id) or [`Self::emit`]
/// (by target) and calls [`Self::tick`] from its timer loop to drive autoplay and the
/// debounced resize handler.
#[derive(Clone, Debug)]
pub struct CarouselWidget<N> {
    engine: Carousel,
    container_selector: String,
    container: N,
    track: Option<N>,
    slides: Vec<N>,
    clones: Vec<N>,
    dots: Vec<N>,
    controls: Controls<N>,
    bindings: Subscriptions<N>,
    dot_bindings: Subscriptions<N>,
    gate: Subscriptions<N>,
    autoplay: Interval,
    hover_paused: bool,
    resize: Debouncer,
    touch_start_x: Option<f32>,
}

impl<N: Clone + PartialEq + core::fmt::Debug> CarouselWidget<N> {
    /// Locates the container and binds immediately, or subscribes to the
    /// `active_breakpoint` media query and binds only while it matches.
    pub fn new<D: Dom<Node = N>>(
        dom: &mut D,
        container_selector: &str,
        options: CarouselOptions,
        now_ms: u64,
    ) -> Result<Self> {
        let container =
            dom.query(container_selector)
                .ok_or_else(|| CarouselError::ContainerNotFound {
                    selector: container_selector.to_string(),
                })?;
        let gate_query = options.active_breakpoint.clone();

        let mut w = Self {
            engine: Carousel::new(options),
            container_selector: container_selector.to_string(),
            container,
            track: None,
            slides: Vec::new(),
            clones: Vec::new(),
            dots: Vec::new(),
            controls: Controls::default(),
            bindings: Subscriptions::new(),
            dot_bindings: Subscriptions::new(),
            gate: Subscriptions::new(),
            autoplay: Interval::new(),
            hover_paused: false,
            resize: Debouncer::default(),
            touch_start_x: None,
        };

        match gate_query {
            None => w.init(dom, now_ms)?,
            Some(query) => {
                let matches = dom.match_media(&query);
                adebug!(query = %query, matches, "active breakpoint gate");
                w.gate.subscribe(
                    dom,
                    Target::Media(query),
                    EventKind::MediaChange,
                    Action::MediaChange,
                );
                if matches {
                    if let Err(err) = w.init(dom, now_ms) {
                        w.gate.unsubscribe_all(dom);
                        return Err(err);
                    }
                }
            }
        }
        Ok(w)
    }

    pub fn engine(&self) -> &Carousel {
        &self.engine
    }

    pub fn options(&self) -> &CarouselOptions {
        self.engine.options()
    }

    pub fn is_active(&self) -> bool {
        self.engine.is_active()
    }

    pub fn container(&self) -> &N {
        &self.container
    }

    pub fn track(&self) -> Option<&N> {
        self.track.as_ref()
    }

    /// Authored slides (clones excluded), in order.
    pub fn slides(&self) -> &[N] {
        &self.slides
    }

    /// Clone elements currently on the track (trailing first, then leading).
    pub fn clones(&self) -> &[N] {
        &self.clones
    }

    pub fn dots(&self) -> &[N] {
        &self.dots
    }

    pub fn autoplay(&self) -> &Interval {
        &self.autoplay
    }

    pub fn is_resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    /// Listeners currently registered by this widget, media gate included.
    pub fn listener_count(&self) -> usize {
        self.bindings.len() + self.dot_bindings.len() + self.gate.len()
    }

    /// Binds the carousel: locates the track, builds clones, wires listeners, starts autoplay.
    ///
    /// No-op when already active.
    pub fn init<D: Dom<Node = N>>(&mut self, dom: &mut D, now_ms: u64) -> Result<()> {
        if self.engine.is_active() {
            return Ok(());
        }
        let track_selector = self.engine.options().track_selector.clone();
        let track = dom
            .query_in(&self.container, &track_selector)
            .ok_or(CarouselError::TrackNotFound {
                selector: track_selector,
            })?;

        self.slides = dom
            .children(&track)
            .into_iter()
            .filter(|n| !dom.has_class(n, CLONE_CLASSES[0]))
            .collect();
        self.track = Some(track);
        self.resolve_controls(dom);

        let change = self.engine.activate(
            self.slides.len(),
            dom.viewport_width(),
            dom.offset_width(&self.container),
        );
        adebug!(
            container = %self.container_selector,
            slides = self.slides.len(),
            slides_to_show = self.engine.slides_to_show(),
            "CarouselWidget::init"
        );

        self.bind_controls(dom);
        self.apply(dom, change);
        self.hover_paused = false;
        self.start_autoplay(now_ms);
        self.bindings
            .subscribe(dom, Target::Window, EventKind::Resize, Action::Resize);
        Ok(())
    }

    /// Unbinds: stops timers, removes every binding listener, clones and dots, and clears the
    /// track's inline styles. Returns `false` when already inactive.
    ///
    /// The media-query gate (if any) stays subscribed so the widget can rebind; use
    /// [`Self::dispose`] to drop it too.
    pub fn destroy<D: Dom<Node = N>>(&mut self, dom: &mut D) -> bool {
        if !self.engine.is_active() {
            return false;
        }
        adebug!(
            container = %self.container_selector,
            listeners = self.bindings.len() + self.dot_bindings.len(),
            clones = self.clones.len(),
            "CarouselWidget::destroy"
        );
        self.autoplay.stop();
        self.resize.cancel();
        self.touch_start_x = None;

        self.bindings.unsubscribe_all(dom);
        self.dot_bindings.unsubscribe_all(dom);
        self.remove_clones(dom);
        for dot in self.dots.drain(..) {
            dom.remove(&dot);
        }
        if let Some(track) = self.track.take() {
            for property in ["transform", "transition", "grid-auto-columns"] {
                dom.set_style(&track, property, None);
            }
        }
        self.slides.clear();
        self.controls = Controls::default();
        self.engine.deactivate();
        true
    }

    /// Destroys the widget and releases the media-query gate.
    pub fn dispose<D: Dom<Node = N>>(mut self, dom: &mut D) {
        self.destroy(dom);
        self.gate.unsubscribe_all(dom);
    }

    pub fn next<D: Dom<Node = N>>(&mut self, dom: &mut D) -> Change {
        let change = self.engine.next();
        self.apply(dom, change);
        change
    }

    pub fn prev<D: Dom<Node = N>>(&mut self, dom: &mut D) -> Change {
        let change = self.engine.prev();
        self.apply(dom, change);
        change
    }

    pub fn go_to_page<D: Dom<Node = N>>(&mut self, dom: &mut D, page: usize) -> Change {
        let change = self.engine.go_to_page(page);
        self.apply(dom, change);
        change
    }

    /// Handles an event delivered for a listener id. Unknown ids (e.g. from a listener that
    /// was already removed) are ignored.
    pub fn dispatch<D: Dom<Node = N>>(
        &mut self,
        dom: &mut D,
        id: ListenerId,
        event: Event,
        now_ms: u64,
    ) -> Result<()> {
        let action = self
            .bindings
            .action_for(id)
            .or_else(|| self.dot_bindings.action_for(id))
            .or_else(|| self.gate.action_for(id));
        let Some(action) = action else {
            awarn!(id = id.0, ?event, "event for unknown listener ignored");
            return Ok(());
        };
        atrace!(id = id.0, ?action, ?event, "dispatch");
        self.perform(dom, action, event, now_ms)
    }

    /// Delivers `event` to every listener this widget registered on `target`.
    pub fn emit<D: Dom<Node = N>>(
        &mut self,
        dom: &mut D,
        target: &Target<N>,
        event: Event,
        now_ms: u64,
    ) -> Result<()> {
        let kind = event.kind();
        let mut ids = self.bindings.matching(target, kind);
        ids.extend(self.dot_bindings.matching(target, kind));
        ids.extend(self.gate.matching(target, kind));
        for id in ids {
            self.dispatch(dom, id, event, now_ms)?;
        }
        Ok(())
    }

    /// Advances timers: runs the debounced resize handler and fires autoplay when due.
    ///
    /// Returns `true` if the rendering changed.
    pub fn tick<D: Dom<Node = N>>(&mut self, dom: &mut D, now_ms: u64) -> bool {
        let mut changed = false;
        if self.resize.poll(now_ms) {
            changed |= self.handle_resize(dom, now_ms);
        }
        if self.autoplay.poll(now_ms) {
            changed |= !self.next(dom).is_none();
        }
        changed
    }

    fn perform<D: Dom<Node = N>>(
        &mut self,
        dom: &mut D,
        action: Action,
        event: Event,
        now_ms: u64,
    ) -> Result<()> {
        match action {
            Action::Prev => {
                self.prev(dom);
            }
            Action::Next => {
                self.next(dom);
            }
            Action::GoToPage(page) => {
                self.go_to_page(dom, page);
            }
            Action::PauseAutoplay => {
                self.hover_paused = true;
                self.autoplay.stop();
            }
            Action::ResumeAutoplay => {
                self.hover_paused = false;
                self.start_autoplay(now_ms);
            }
            Action::TouchStart => {
                if let Event::TouchStart { x } = event {
                    self.touch_start_x = Some(x);
                }
            }
            Action::TouchEnd => {
                if let (Some(start_x), Event::TouchEnd { x }) = (self.touch_start_x.take(), event)
                {
                    let change = self.engine.swipe(start_x, x);
                    self.apply(dom, change);
                }
            }
            Action::TransitionEnd => {
                let change = self.engine.transition_end();
                self.apply(dom, change);
            }
            Action::Resize => self.resize.trigger(now_ms),
            Action::MediaChange => {
                let matches = match event {
                    Event::MediaChange { matches } => matches,
                    _ => self
                        .engine
                        .options()
                        .active_breakpoint
                        .as_deref()
                        .is_some_and(|q| dom.match_media(q)),
                };
                if matches && !self.engine.is_active() {
                    self.init(dom, now_ms)?;
                } else if !matches && self.engine.is_active() {
                    self.destroy(dom);
                }
            }
        }
        Ok(())
    }

    fn handle_resize<D: Dom<Node = N>>(&mut self, dom: &mut D, now_ms: u64) -> bool {
        if !self.engine.is_active() {
            return false;
        }
        let change = self
            .engine
            .resize(dom.viewport_width(), dom.offset_width(&self.container));
        self.apply(dom, change);
        if change.relayout {
            self.sync_autoplay(now_ms);
        }
        !change.is_none()
    }

    /// (Re)starts autoplay; any running schedule is discarded first.
    fn start_autoplay(&mut self, now_ms: u64) {
        self.autoplay.stop();
        if !self.engine.autoplay_eligible() {
            return;
        }
        let delay = self.engine.options().auto_play_delay_ms;
        self.autoplay.start(now_ms, delay);
    }

    fn sync_autoplay(&mut self, now_ms: u64) {
        if !self.engine.autoplay_eligible() {
            self.autoplay.stop();
        } else if !self.hover_paused && !self.autoplay.is_running() {
            self.start_autoplay(now_ms);
        }
    }

    fn resolve_controls<D: Dom<Node = N>>(&mut self, dom: &D) {
        let selectors = &self.engine.options().selectors;
        let find = |s: &Option<String>| s.as_deref().and_then(|s| dom.query(s));
        self.controls = Controls {
            prev: find(&selectors.prev_button),
            next: find(&selectors.next_button),
            current_label: find(&selectors.current_slide),
            total_label: find(&selectors.total_slides),
            pagination: if self.engine.options().pagination {
                find(&selectors.pagination)
            } else {
                None
            },
        };
    }

    fn bind_controls<D: Dom<Node = N>>(&mut self, dom: &mut D) {
        if let Some(prev) = self.controls.prev.clone() {
            self.bindings
                .subscribe(dom, Target::Node(prev), EventKind::Click, Action::Prev);
        }
        if let Some(next) = self.controls.next.clone() {
            self.bindings
                .subscribe(dom, Target::Node(next), EventKind::Click, Action::Next);
        }

        let container = Target::Node(self.container.clone());
        if self.engine.options().pause_on_hover {
            self.bindings.subscribe(
                dom,
                container.clone(),
                EventKind::MouseEnter,
                Action::PauseAutoplay,
            );
            self.bindings.subscribe(
                dom,
                container.clone(),
                EventKind::MouseLeave,
                Action::ResumeAutoplay,
            );
        }
        if let Some(track) = self.track.clone() {
            self.bindings.subscribe(
                dom,
                Target::Node(track),
                EventKind::TransitionEnd,
                Action::TransitionEnd,
            );
        }
        self.bindings.subscribe(
            dom,
            container.clone(),
            EventKind::TouchStart,
            Action::TouchStart,
        );
        self.bindings
            .subscribe(dom, container, EventKind::TouchEnd, Action::TouchEnd);
    }

    fn apply<D: Dom<Node = N>>(&mut self, dom: &mut D, change: Change) {
        if change.relayout {
            self.apply_grid(dom);
            self.rebuild_clones(dom);
            self.setup_pagination(dom);
        }
        match change.motion {
            Motion::Animated => self.position(dom, true),
            Motion::Instant => self.position(dom, false),
            Motion::None => {}
        }
        if change.refreshes_controls() {
            self.refresh_controls(dom);
        }
    }

    fn apply_grid<D: Dom<Node = N>>(&self, dom: &mut D) {
        let Some(track) = &self.track else {
            return;
        };
        let columns = format!("calc(100% / {})", self.engine.slides_to_show());
        dom.set_style(track, "grid-auto-columns", Some(&columns));
    }

    fn position<D: Dom<Node = N>>(&self, dom: &mut D, animate: bool) {
        let Some(track) = &self.track else {
            return;
        };
        let options = self.engine.options();
        let transition = if animate {
            format!(
                "transform {}ms {}",
                options.transition_duration_ms, options.easing
            )
        } else {
            String::from("none")
        };
        let transform = format!("translateX({}px)", self.engine.track_offset_px());
        dom.set_style(track, "transition", Some(&transition));
        dom.set_style(track, "transform", Some(&transform));
    }

    fn remove_clones<D: Dom<Node = N>>(&mut self, dom: &mut D) {
        for clone in self.clones.drain(..) {
            dom.remove(&clone);
        }
    }

    fn rebuild_clones<D: Dom<Node = N>>(&mut self, dom: &mut D) {
        self.remove_clones(dom);
        let Some(track) = self.track.clone() else {
            return;
        };

        for i in self.engine.trailing_clone_sources() {
            let clone = self.make_clone(dom, i);
            dom.append_child(&track, &clone);
            self.clones.push(clone);
        }
        // Prepending in reverse keeps the leading clones in slide order.
        for i in self.engine.leading_clone_sources().rev() {
            let clone = self.make_clone(dom, i);
            dom.prepend_child(&track, &clone);
            self.clones.push(clone);
        }
        atrace!(clones = self.clones.len(), "rebuild_clones");
    }

    fn make_clone<D: Dom<Node = N>>(&self, dom: &mut D, real: usize) -> N {
        let clone = dom.clone_node(&self.slides[real]);
        for class in CLONE_CLASSES {
            dom.set_class(&clone, class, true);
        }
        clone
    }

    fn setup_pagination<D: Dom<Node = N>>(&mut self, dom: &mut D) {
        let Some(container) = self.controls.pagination.clone() else {
            return;
        };
        self.dot_bindings.unsubscribe_all(dom);
        self.dots.clear();
        dom.remove_children(&container);

        let label = self.engine.options().pagination_dot_label.clone();
        for page in 0..self.engine.total_pages() {
            let dot = dom.create_element("li");
            dom.set_class(&dot, DOT_CLASS, true);
            dom.set_data(&dot, DOT_PAGE_DATA_KEY, &page.to_string());

            let hidden = dom.create_element("p");
            dom.set_class(&hidden, HIDDEN_LABEL_CLASS, true);
            dom.set_text(&hidden, &label);
            dom.append_child(&dot, &hidden);

            self.dot_bindings.subscribe(
                dom,
                Target::Node(dot.clone()),
                EventKind::Click,
                Action::GoToPage(page),
            );
            dom.append_child(&container, &dot);
            self.dots.push(dot);
        }
    }

    fn refresh_controls<D: Dom<Node = N>>(&self, dom: &mut D) {
        let pages = self.engine.page_info();
        if let Some(label) = &self.controls.current_label {
            dom.set_text(label, &pages.current.to_string());
        }
        if let Some(label) = &self.controls.total_label {
            dom.set_text(label, &pages.total.to_string());
        }

        let active = pages.active_dot();
        for (i, dot) in self.dots.iter().enumerate() {
            dom.set_class(dot, ACTIVE_CLASS, i == active);
        }

        let arrows = self.engine.arrows();
        if let Some(prev) = &self.controls.prev {
            dom.set_disabled(prev, arrows.prev_disabled);
        }
        if let Some(next) = &self.controls.next {
            dom.set_disabled(next, arrows.next_disabled);
        }
    }
}
