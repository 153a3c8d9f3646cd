use crate::config::MotionConfig;
use crate::markup;
use crate::motion::{Ease, Motion};
use crate::page::Page;

const SCROLL_SECONDS: f64 = 1.0;

pub fn target_position(client_top: f64, scroll_y: f64, offset: f64) -> f64 {
    client_top + scroll_y - offset
}

/// Animated scrolling for in-page `#fragment` links.
pub struct SmoothScroll<P: Page, M> {
    page: P,
    motion: M,
    anchors: Vec<P::Node>,
    offset: f64,
}

impl<P: Page, M: Motion<P::Node>> SmoothScroll<P, M> {
    pub fn mount(page: P, motion: M, config: &MotionConfig) -> Self {
        Self {
            anchors: page.query_all(markup::IN_PAGE_ANCHOR),
            page,
            motion,
            offset: config.anchor_offset,
        }
    }

    pub fn anchors(&self) -> &[P::Node] {
        &self.anchors
    }

    /// Scrolls to the anchor's target. Returns the destination, or `None` when the
    /// fragment names no element.
    pub fn on_click(&self, index: usize) -> Option<f64> {
        let anchor = self.anchors.get(index)?;
        let href = self.page.attribute(anchor, "href")?;
        if href.len() <= 1 {
            return None;
        }
        let target = self.page.query(&href)?;

        let y = target_position(self.page.client_top(&target), self.page.scroll_y(), self.offset);
        self.motion.scroll_to(y, SCROLL_SECONDS, Ease::Power3InOut);
        Some(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::PORTFOLIO;
    use crate::memory::{MemoryPage, NodeRef};
    use crate::recording::{RecordingMotion, ScrollCall};

    fn mount() -> (MemoryPage, RecordingMotion<NodeRef>, SmoothScroll<MemoryPage, RecordingMotion<NodeRef>>) {
        let page = MemoryPage::parse(PORTFOLIO);
        let motion = RecordingMotion::new();
        let scroll = SmoothScroll::mount(page.clone(), motion.clone(), &MotionConfig::default());
        (page, motion, scroll)
    }

    fn anchor_index(page: &MemoryPage, href: &str) -> usize {
        page.query_all("a[href^=\"#\"]")
            .iter()
            .position(|anchor| page.attribute(anchor, "href").as_deref() == Some(href))
            .expect("anchor present")
    }

    #[test]
    fn scrolls_to_target_minus_navbar_offset() {
        let (page, motion, scroll) = mount();
        let projects = page.query("#projects").expect("projects");
        page.set_offset_top(&projects, 1600.0);
        page.set_scroll_y(400.0);

        let destination = scroll.on_click(anchor_index(&page, "#projects"));

        // client top 1200 + scroll 400 - 80
        assert_eq!(destination, Some(1520.0));
        assert_eq!(
            motion.scrolls(),
            vec![ScrollCall {
                y: 1520.0,
                duration: 1.0,
                ease: Ease::Power3InOut
            }]
        );
    }

    #[test]
    fn missing_target_does_nothing() {
        let (page, motion, scroll) = mount();

        assert_eq!(scroll.on_click(anchor_index(&page, "#missing")), None);
        assert_eq!(scroll.on_click(anchor_index(&page, "#")), None);
        assert!(motion.scrolls().is_empty());
    }

    #[test]
    fn every_fragment_link_is_bound() {
        let (_page, _motion, scroll) = mount();
        // brand, four nav links, back-to-top, dangling link
        assert_eq!(scroll.anchors().len(), 7);
    }
}
