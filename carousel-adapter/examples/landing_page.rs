use carousel::{CarouselOptions, SlidesToShow};
use carousel_adapter::{CarouselWidget, Dom, Event, Marquee, MemoryDom, NodeId, Target};

const STAGES_GATE: &str = "(width <= 768px)";

fn build_page(dom: &mut MemoryDom) -> (NodeId, NodeId) {
    let body = dom.body();

    let ticker = dom.append(body, "div");
    dom.set_attr(ticker, "data-marquee-js", "");

    let members = dom.append(body, "section");
    dom.set_attr(members, "data-carousel-list", "");
    dom.set_width(members, 1200);
    let track = dom.append(members, "ul");
    dom.set_class(&track, "carousel-track", true);
    for i in 0..6 {
        let card = dom.append(track, "li");
        dom.set_text(&card, &format!("member {i}"));
    }
    for (tag, attr) in [
        ("button", "data-carousel-prev-btn"),
        ("button", "data-carousel-next-btn"),
        ("span", "data-carousel-current-slide"),
        ("span", "data-carousel-total-slides"),
    ] {
        let node = dom.append(body, tag);
        dom.set_attr(node, attr, "");
    }

    let stages = dom.append(body, "section");
    dom.set_attr(stages, "data-carousel-list2", "");
    dom.set_width(stages, 360);
    let stages_track = dom.append(stages, "ol");
    dom.set_class(&stages_track, "stages__track", true);
    for i in 0..7 {
        let stage = dom.append(stages_track, "li");
        dom.set_text(&stage, &format!("stage {i}"));
    }
    let dots = dom.append(body, "ul");
    dom.set_class(&dots, "stages__dots", true);

    (track, stages_track)
}

fn main() {
    // Example: the landing page from a host's point of view. The host owns the document, routes
    // events back into the widgets and ticks their timers.
    let mut dom = MemoryDom::new(1280);
    dom.set_media(STAGES_GATE, false);
    let (track, stages_track) = build_page(&mut dom);

    Marquee::new("Breaking news • Markets open higher • ").mount(&mut dom, "[data-marquee-js]");

    let options = CarouselOptions::default()
        .with_slides_to_show(SlidesToShow::breakpoints([(767, 1), (960, 2), (1200, 3)]))
        .with_arrows(
            Some("[data-carousel-prev-btn]"),
            Some("[data-carousel-next-btn]"),
        )
        .with_counters(
            Some("[data-carousel-current-slide]"),
            Some("[data-carousel-total-slides]"),
        );
    let mut members = CarouselWidget::new(&mut dom, "[data-carousel-list]", options.clone(), 0)
        .expect("members carousel");

    let stages_options = CarouselOptions {
        selectors: Default::default(),
        ..options
    }
    .with_auto_play(false)
    .with_pause_on_hover(false)
    .with_infinite(false)
    .with_active_breakpoint(Some(STAGES_GATE))
    .with_slides_to_show(SlidesToShow::breakpoints([(0, 1), (768, 1)]))
    .with_track_selector(".stages__track")
    .with_arrows(
        Some("[data-carousel-prev-btn2]"),
        Some("[data-carousel-next-btn2]"),
    )
    .with_pagination(".stages__dots");
    let mut stages = CarouselWidget::new(&mut dom, "[data-carousel-list2]", stages_options, 0)
        .expect("stages carousel");

    println!(
        "desktop: members shows {} (track children {}), stages active={}",
        members.engine().slides_to_show(),
        dom.children(&track).len(),
        stages.is_active()
    );

    for now in (0..=12_000).step_by(1_000) {
        if members.tick(&mut dom, now) {
            println!(
                "t={now}ms autoplay -> {:?} page {:?}",
                dom.style(track, "transform"),
                members.engine().page_info()
            );
            // The browser would fire this once the CSS transition finishes.
            members
                .emit(&mut dom, &Target::Node(track), Event::TransitionEnd, now + 600)
                .expect("transitionend");
        }
    }

    // Shrink to a phone-sized viewport.
    dom.set_viewport_width(375);
    dom.set_width(dom.query("[data-carousel-list]").expect("members"), 360);
    dom.set_media(STAGES_GATE, true);
    members
        .emit(&mut dom, &Target::Window, Event::Resize, 13_000)
        .expect("resize");
    stages
        .emit(
            &mut dom,
            &Target::Media(STAGES_GATE.to_string()),
            Event::MediaChange { matches: true },
            13_000,
        )
        .expect("media change");
    members.tick(&mut dom, 13_200);

    println!(
        "mobile: members shows {} (track children {}), stages active={} dots={}",
        members.engine().slides_to_show(),
        dom.children(&track).len(),
        stages.is_active(),
        stages.dots().len()
    );

    let third = stages.dots()[2];
    stages
        .emit(&mut dom, &Target::Node(third), Event::Click, 14_000)
        .expect("dot click");
    println!(
        "stages dot 3 -> {:?} (children {})",
        dom.style(stages_track, "transform"),
        dom.children(&stages_track).len()
    );

    stages.dispose(&mut dom);
    members.dispose(&mut dom);
    println!("listeners left: {}", dom.listener_count());
}
