use alloc::string::String;

use crate::Dom;

/// `data-*` key carrying the scrolling text; the stylesheet renders it via `attr()`.
pub const MARQUEE_TEXT_DATA_KEY: &str = "js-marquee-text";

/// Injects a scrolling-text element into marquee containers. Holds no state beyond its text.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marquee {
    text: String,
}

impl Marquee {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Appends one text carrier to each target.
    pub fn render<D: Dom>(&self, dom: &mut D, targets: &[D::Node]) {
        for target in targets {
            let div = dom.create_element("div");
            dom.set_data(&div, MARQUEE_TEXT_DATA_KEY, &self.text);
            dom.append_child(target, &div);
        }
        adebug!(targets = targets.len(), "Marquee::render");
    }

    /// Renders into every element matching `selector`. Matching nothing is not an error.
    pub fn mount<D: Dom>(&self, dom: &mut D, selector: &str) {
        let targets = dom.query_all(selector);
        self.render(dom, &targets);
    }
}
