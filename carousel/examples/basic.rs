// Example: drive the engine by hand and print what an adapter would render.
use carousel::{Carousel, CarouselOptions, Motion};

fn main() {
    let mut c = Carousel::new(CarouselOptions::default().with_slides_to_show(3));
    c.activate(6, 1280, 960);
    println!(
        "track_len={} current={} offset={}px pages={:?}",
        c.track_len(),
        c.current_index(),
        c.track_offset_px(),
        c.page_info()
    );

    for _ in 0..7 {
        let change = c.next();
        if change.motion == Motion::Animated {
            println!(
                "animate to {}px page={}",
                c.track_offset_px(),
                c.current_page()
            );
        }
        // A real adapter calls this from the track's `transitionend` listener.
        if c.transition_end().motion == Motion::Instant {
            println!("snap to {}px (loop correction)", c.track_offset_px());
        }
    }
}
