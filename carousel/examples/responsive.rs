// Example: breakpoint tables and rebuilding when the slide count changes.
use carousel::{Carousel, CarouselOptions, SlidesToShow};

fn main() {
    let options = CarouselOptions::default().with_slides_to_show(SlidesToShow::breakpoints([
        (0, 1),
        (768, 2),
        (1200, 3),
    ]));
    let mut c = Carousel::new(options);
    c.activate(7, 1300, 1200);
    c.go_to_page(1);
    c.transition_end();
    println!("at 1300px: show={} state={:?}", c.slides_to_show(), c.state());

    for width in [1000u32, 1000, 500, 1300] {
        let change = c.resize(width, width - 100);
        println!(
            "resize {width}: relayout={} show={} real={} page={}/{}",
            change.relayout,
            c.slides_to_show(),
            c.real_index(),
            c.current_page(),
            c.total_pages()
        );
    }
}
