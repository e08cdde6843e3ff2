use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as usize
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

fn carousel(total: usize, show: usize, infinite: bool) -> Carousel {
    let mut c = Carousel::new(
        CarouselOptions::default()
            .with_slides_to_show(show)
            .with_infinite(infinite),
    );
    c.activate(total, 1000, 900);
    c
}

fn settle(c: &mut Carousel) {
    c.transition_end();
}

#[test]
fn six_slides_three_shown_loops_with_three_clones_per_side() {
    let mut c = carousel(6, 3, true);
    assert!(c.is_looping());
    assert_eq!(c.clones_per_side(), 3);
    assert_eq!(c.track_len(), 12);
    assert_eq!(c.current_index(), 3);
    assert_eq!(c.total_pages(), 2);
    assert_eq!(c.current_page(), 1);

    let change = c.next();
    assert_eq!(change.motion, Motion::Animated);
    assert_eq!(c.current_index(), 4);
    assert_eq!(c.real_index(), 1);
    assert_eq!(c.current_page(), 2);
    assert_eq!(c.page_info().active_dot(), 1);
}

#[test]
fn breakpoint_table_picks_greatest_matching_width() {
    let table = SlidesToShow::breakpoints([(0, 1), (768, 2), (1200, 3)]);
    assert_eq!(table.resolve(0), 1);
    assert_eq!(table.resolve(767), 1);
    assert_eq!(table.resolve(768), 2);
    assert_eq!(table.resolve(1000), 2);
    assert_eq!(table.resolve(1300), 3);

    // No entry at or below the width falls back to a single slide.
    let sparse = SlidesToShow::breakpoints([(960, 2)]);
    assert_eq!(sparse.resolve(500), 1);
    assert_eq!(SlidesToShow::Fixed(4).resolve(10), 4);
}

#[test]
fn prev_from_first_slide_wraps_to_last_after_transition_end() {
    for (total, show) in [(5usize, 1usize), (5, 2), (6, 3), (7, 3)] {
        let mut c = carousel(total, show, true);
        assert_eq!(c.current_index(), show as i64);

        c.prev();
        assert!(c.is_transitioning());
        let change = c.transition_end();
        assert_eq!(change.motion, Motion::Instant);
        assert!(!c.is_transitioning());
        assert_eq!(c.real_index(), total - 1, "total={total} show={show}");

        let n = show as i64;
        assert!((n..n + total as i64).contains(&c.current_index()));
    }
}

#[test]
fn next_past_trailing_clones_snaps_back_to_first_real_slide() {
    let mut c = carousel(4, 1, true);
    for _ in 0..3 {
        c.next();
        assert_eq!(c.transition_end(), Change::NONE);
    }
    assert_eq!(c.current_index(), 4);

    c.next();
    assert_eq!(c.current_index(), 5);
    assert_eq!(c.real_index(), 0);
    assert_eq!(c.transition_end(), Change::instant());
    assert_eq!(c.current_index(), 1);
    assert_eq!(c.real_index(), 0);
}

#[test]
fn scroll_step_larger_than_one_preserves_real_index_on_wrap() {
    let mut c = Carousel::new(
        CarouselOptions::default()
            .with_slides_to_show(2)
            .with_slides_to_scroll(2),
    );
    c.activate(5, 1000, 1000);
    // Track positions 2..7 hold real slides 0..5.
    c.next();
    settle(&mut c);
    c.next();
    settle(&mut c);
    assert_eq!(c.current_index(), 6);
    assert_eq!(c.real_index(), 4);

    c.next();
    assert_eq!(c.current_index(), 8);
    assert_eq!(c.real_index(), 1);
    settle(&mut c);
    assert_eq!(c.current_index(), 3);
    assert_eq!(c.real_index(), 1);
}

#[test]
fn commands_are_dropped_while_a_transition_is_in_flight() {
    let mut c = carousel(6, 3, true);
    assert_eq!(c.next().motion, Motion::Animated);
    assert_eq!(c.next(), Change::NONE);
    assert_eq!(c.prev(), Change::NONE);
    assert_eq!(c.go_to_page(0), Change::NONE);
    assert_eq!(c.current_index(), 4);

    settle(&mut c);
    assert_eq!(c.next().motion, Motion::Animated);
    assert_eq!(c.current_index(), 5);
}

#[test]
fn non_loop_next_stops_at_last_start_and_disables_next_arrow() {
    let mut c = carousel(6, 2, false);
    assert!(!c.is_looping());
    assert_eq!(c.track_len(), 6);
    assert_eq!(c.current_index(), 0);
    assert_eq!(
        c.arrows(),
        ArrowState {
            prev_disabled: true,
            next_disabled: false
        }
    );

    for expected in 1..=4 {
        c.next();
        settle(&mut c);
        assert_eq!(c.current_index(), expected);
    }
    assert!(c.arrows().next_disabled);
    assert!(!c.arrows().prev_disabled);
    assert_eq!(c.current_page(), c.total_pages());

    for _ in 0..3 {
        assert_eq!(c.next(), Change::NONE);
        assert!(!c.is_transitioning());
        assert_eq!(c.current_index(), 4);
    }
}

#[test]
fn non_loop_disabled_state_reflects_target_before_transition_ends() {
    let mut c = carousel(3, 2, false);
    c.next();
    assert!(c.is_transitioning());
    assert!(c.arrows().next_disabled);
    assert!(!c.arrows().prev_disabled);
}

#[test]
fn non_loop_prev_at_start_is_a_no_op() {
    let mut c = carousel(5, 1, false);
    assert_eq!(c.prev(), Change::NONE);
    assert_eq!(c.current_index(), 0);
    assert!(!c.is_transitioning());
}

#[test]
fn looping_arrows_are_never_disabled() {
    let mut c = carousel(4, 2, true);
    assert_eq!(c.arrows(), ArrowState::default());
    c.prev();
    assert_eq!(c.arrows(), ArrowState::default());
}

#[test]
fn infinite_without_enough_slides_does_not_loop() {
    let mut c = carousel(3, 3, true);
    assert!(!c.is_looping());
    assert_eq!(c.track_len(), 3);
    assert_eq!(c.current_index(), 0);
    assert_eq!(c.next(), Change::NONE);
    assert_eq!(
        c.arrows(),
        ArrowState {
            prev_disabled: true,
            next_disabled: true
        }
    );
    assert!(!c.autoplay_eligible());
}

#[test]
fn rebuild_keeps_real_index_and_is_idempotent() {
    let mut c = carousel(6, 3, true);
    c.next();
    settle(&mut c);
    assert_eq!(c.real_index(), 1);

    let change = c.rebuild_for_change(2);
    assert_eq!(change, Change::relayout());
    assert_eq!(c.slides_to_show(), 2);
    assert_eq!(c.clones_per_side(), 2);
    assert_eq!(c.track_len(), 10);
    assert_eq!(c.current_index(), 3);
    assert_eq!(c.real_index(), 1);
    assert_eq!(c.total_pages(), 3);

    let before = c.state();
    assert_eq!(c.rebuild_for_change(2), Change::NONE);
    assert_eq!(c.state(), before);
}

#[test]
fn rebuild_into_non_loop_clamps_to_last_start() {
    let mut c = carousel(4, 1, true);
    for _ in 0..3 {
        c.next();
        settle(&mut c);
    }
    assert_eq!(c.real_index(), 3);

    c.rebuild_for_change(4);
    assert!(!c.is_looping());
    assert_eq!(c.clones_per_side(), 0);
    assert_eq!(c.current_index(), 0);

    c.rebuild_for_change(2);
    assert!(c.is_looping());
    assert_eq!(c.current_index(), 2);
    assert_eq!(c.real_index(), 0);
}

#[test]
fn rebuild_releases_a_stuck_transition_lock() {
    let mut c = carousel(6, 3, true);
    c.next();
    assert!(c.is_transitioning());
    c.rebuild_for_change(1);
    assert!(!c.is_transitioning());
    assert_eq!(c.real_index(), 1);
    assert_eq!(c.next().motion, Motion::Animated);
}

#[test]
fn resize_recomputes_from_breakpoints() {
    let mut c = Carousel::new(CarouselOptions::default());
    c.activate(6, 1300, 1200);
    assert_eq!(c.slides_to_show(), 3);

    let change = c.resize(1000, 900);
    assert!(change.relayout);
    assert_eq!(c.slides_to_show(), 2);

    assert_eq!(c.resize(1000, 900), Change::NONE);

    // Same count but a different container width only needs repositioning.
    let change = c.resize(1000, 800);
    assert_eq!(change, Change::instant());
    assert_eq!(c.slide_width_px(), 400.0);
}

#[test]
fn slides_to_show_is_clamped_to_slide_total() {
    let c = carousel(3, 5, true);
    assert_eq!(c.slides_to_show(), 3);
    assert_eq!(c.total_pages(), 1);

    let c = carousel(4, 0, true);
    assert_eq!(c.slides_to_show(), 1);

    let mut empty = carousel(0, 3, true);
    assert_eq!(empty.slides_to_show(), 1);
    assert_eq!(empty.total_pages(), 1);
    assert_eq!(empty.current_page(), 1);
    assert_eq!(empty.real_index(), 0);
    assert_eq!(empty.next(), Change::NONE);
}

#[test]
fn go_to_page_targets_page_start_and_clamps_out_of_range() {
    let mut c = carousel(6, 3, true);
    c.go_to_page(1);
    assert_eq!(c.current_index(), 6);
    assert_eq!(c.real_index(), 3);
    assert_eq!(c.current_page(), 2);
    settle(&mut c);

    assert_eq!(c.go_to_page(9), Change::NONE);
    assert_eq!(c.current_index(), 6);

    c.go_to_page(0);
    assert_eq!(c.current_index(), 3);
    assert_eq!(c.current_page(), 1);
}

#[test]
fn non_loop_go_to_partial_last_page_rests_on_last_start() {
    let mut c = carousel(5, 2, false);
    assert_eq!(c.total_pages(), 3);
    c.go_to_page(2);
    assert_eq!(c.current_index(), 3);
    assert_eq!(c.current_page(), 3);
    assert!(c.arrows().next_disabled);
}

#[test]
fn swipe_uses_threshold_and_direction() {
    let mut c = carousel(6, 3, true);
    assert_eq!(c.swipe(200.0, 120.0).motion, Motion::Animated);
    assert_eq!(c.current_index(), 4);
    settle(&mut c);

    assert_eq!(c.swipe(100.0, 130.0), Change::NONE);
    assert_eq!(c.swipe(100.0, 149.5), Change::NONE);

    assert_eq!(c.swipe(100.0, 150.0).motion, Motion::Animated);
    assert_eq!(c.current_index(), 3);
}

#[test]
fn zero_duration_moves_instantly_and_corrects_immediately() {
    let mut c = Carousel::new(
        CarouselOptions::default()
            .with_slides_to_show(1)
            .with_transition(0, "linear"),
    );
    c.activate(3, 1000, 1000);
    assert_eq!(c.next(), Change::instant());
    assert!(!c.is_transitioning());
    c.next();
    c.next();
    assert_eq!(c.current_index(), 1);
    assert_eq!(c.real_index(), 0);
}

#[test]
fn track_layout_lists_leading_real_and_trailing_slots() {
    let c = carousel(4, 2, true);
    let mut slots = Vec::new();
    c.for_each_slot(|i, slot| slots.push((i, slot)));
    assert_eq!(
        slots,
        [
            (0, Slot::LeadingClone(2)),
            (1, Slot::LeadingClone(3)),
            (2, Slot::Real(0)),
            (3, Slot::Real(1)),
            (4, Slot::Real(2)),
            (5, Slot::Real(3)),
            (6, Slot::TrailingClone(0)),
            (7, Slot::TrailingClone(1)),
        ]
    );
    assert_eq!(c.slot(8), None);
    assert_eq!(c.leading_clone_sources(), 2..4);
    assert_eq!(c.trailing_clone_sources(), 0..2);
}

#[test]
fn track_offset_is_index_times_slide_width() {
    let c = carousel(6, 3, true);
    assert_eq!(c.slide_width_px(), 300.0);
    assert_eq!(c.track_offset_px(), -900.0);

    let c = carousel(6, 3, false);
    let offset = c.track_offset_px();
    assert_eq!(offset, 0.0);
    assert!(offset.is_sign_positive());
}

#[test]
fn inactive_carousel_ignores_commands() {
    let mut c = Carousel::new(CarouselOptions::default());
    assert_eq!(c.next(), Change::NONE);
    assert_eq!(c.transition_end(), Change::NONE);
    assert_eq!(c.resize(1000, 900), Change::NONE);
    assert!(!c.deactivate());

    c.activate(5, 1000, 900);
    assert!(c.deactivate());
    assert!(!c.deactivate());
    assert!(!c.is_looping());
    assert_eq!(c.next(), Change::NONE);
}

#[test]
fn reactivation_starts_clean() {
    let mut c = carousel(6, 2, true);
    c.next();
    assert!(c.deactivate());
    c.activate(6, 1000, 900);
    assert_eq!(c.current_index(), 2);
    assert!(!c.is_transitioning());
    assert_eq!(c.clones_per_side(), 2);
}

#[test]
fn autoplay_requires_option_and_overflow() {
    assert!(carousel(6, 3, true).autoplay_eligible());
    assert!(!carousel(3, 3, true).autoplay_eligible());

    let mut c = Carousel::new(CarouselOptions::default().with_auto_play(false));
    c.activate(6, 1000, 900);
    assert!(!c.autoplay_eligible());
}

#[test]
fn on_change_fires_for_effective_commands_only() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut c = Carousel::new(CarouselOptions::default().with_slides_to_show(2));
    c.set_on_change(Some({
        let calls = Arc::clone(&calls);
        move |_: &Carousel, _: Change| {
            calls.fetch_add(1, Ordering::Relaxed);
        }
    }));

    c.activate(5, 1000, 900);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    c.next();
    c.next(); // dropped
    assert_eq!(calls.load(Ordering::Relaxed), 2);
    c.transition_end(); // no correction needed
    assert_eq!(calls.load(Ordering::Relaxed), 2);
}

#[test]
fn random_command_sequences_hold_invariants() {
    let mut rng = Lcg::new(0x5eed);
    for _ in 0..200 {
        let total = rng.gen_range_usize(0, 12);
        let infinite = rng.gen_bool();
        let options = CarouselOptions::default()
            .with_infinite(infinite)
            .with_slides_to_scroll(rng.gen_range_usize(1, 3));
        let mut c = Carousel::new(options);
        c.activate(total, rng.gen_range_usize(0, 1600) as u32, 900);

        for _ in 0..60 {
            match rng.gen_range_usize(0, 6) {
                0 => {
                    c.next();
                }
                1 => {
                    c.prev();
                }
                2 => {
                    let page = rng.gen_range_usize(0, 5);
                    c.go_to_page(page);
                }
                3 => {
                    c.resize(rng.gen_range_usize(0, 1600) as u32, 900);
                }
                _ => {
                    c.transition_end();
                }
            }

            let show = c.slides_to_show();
            assert!(show >= 1 && show <= total.max(1));
            assert_eq!(c.total_pages(), total.div_ceil(show).max(1));
            assert!(c.current_page() >= 1 && c.current_page() <= c.total_pages());
            assert!(total == 0 || c.real_index() < total);

            if c.is_looping() {
                assert!(infinite && total > show);
                assert_eq!(c.clones_per_side(), show);
                assert_eq!(c.track_len(), total + 2 * show);
                if !c.is_transitioning() {
                    let n = show as i64;
                    assert!((n..n + total as i64).contains(&c.current_index()));
                }
            } else {
                assert_eq!(c.track_len(), total);
                let max_start = total.saturating_sub(show) as i64;
                assert!((0..=max_start).contains(&c.current_index()));
            }
        }
    }
}

#[cfg(feature = "serde")]
#[test]
fn options_deserialize_on_top_of_defaults() {
    let options: CarouselOptions = serde_json::from_str(
        r#"{
            "infinite": false,
            "slides_to_show": {"0": 1, "768": 2, "1200": 3},
            "selectors": {"pagination": ".stages__dots"},
            "pagination": true
        }"#,
    )
    .unwrap();
    assert!(!options.infinite);
    assert!(options.auto_play);
    assert_eq!(options.auto_play_delay_ms, 4000);
    assert_eq!(options.slides_to_show.resolve(1000), 2);
    assert_eq!(options.selectors.pagination.as_deref(), Some(".stages__dots"));
    assert_eq!(options.selectors.prev_button, None);
    assert_eq!(options.track_selector, ".carousel-track");

    let fixed: CarouselOptions = serde_json::from_str(r#"{"slides_to_show": 4}"#).unwrap();
    assert_eq!(fixed.slides_to_show, SlidesToShow::Fixed(4));

    let json = serde_json::to_string(&options).unwrap();
    let back: CarouselOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(back, options);
}

#[cfg(feature = "serde")]
#[test]
fn state_snapshot_serializes() {
    let c = carousel(6, 3, true);
    let json = serde_json::to_string(&c.state()).unwrap();
    let back: CarouselState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c.state());
}
