use crate::config::MotionConfig;
use crate::markup;
use crate::motion::{Motion, Prop};
use crate::navbar::SCROLLED_CLASS;
use crate::page::Page;

const NAVBAR_BASE_ALPHA: f64 = 0.85;
const NAVBAR_ALPHA_RANGE: f64 = 0.15;
const NAVBAR_RGB: &str = "10, 15, 26";

/// Vertical parallax offset of the orb at `index`; each later orb moves 0.05 faster.
pub fn parallax_offset(index: usize, scroll_y: f64) -> f64 {
    let speed = (index as f64 + 1.0) * 5.0 / 100.0;
    scroll_y * speed
}

/// Navbar background alpha, saturating once `scroll_y` reaches `ramp`.
pub fn navbar_alpha(scroll_y: f64, ramp: f64) -> f64 {
    let scroll_percent = (scroll_y / ramp).min(1.0);
    NAVBAR_BASE_ALPHA + scroll_percent * NAVBAR_ALPHA_RANGE
}

pub fn navbar_background(alpha: f64) -> String {
    format!("rgba({NAVBAR_RGB}, {alpha})")
}

/// Parallax for the hero orbs and the scroll-linked navbar background.
pub struct ScrollEffects<P: Page, M> {
    page: P,
    motion: M,
    orbs: Vec<P::Node>,
    navbar: Option<P::Node>,
    opacity_ramp: f64,
}

impl<P: Page, M: Motion<P::Node>> ScrollEffects<P, M> {
    pub fn mount(page: P, motion: M, navbar: Option<P::Node>, config: &MotionConfig) -> Self {
        Self {
            orbs: page.query_all(markup::GRADIENT_ORB),
            page,
            motion,
            navbar,
            opacity_ramp: config.opacity_ramp,
        }
    }

    pub fn orb_count(&self) -> usize {
        self.orbs.len()
    }

    pub fn on_scroll(&self) {
        let scroll_y = self.page.scroll_y();

        for (index, orb) in self.orbs.iter().enumerate() {
            self.motion.set(orb, &[Prop::Y(parallax_offset(index, scroll_y))]);
        }

        // Only restyled while scrolled, so the first frame past the threshold jumps
        // from the stylesheet colour straight to the base alpha.
        if let Some(navbar) = self.navbar.as_ref() {
            if self.page.has_class(navbar, SCROLLED_CLASS) {
                let background = navbar_background(navbar_alpha(scroll_y, self.opacity_ramp));
                self.page.set_style(navbar, "background", &background);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::PORTFOLIO;
    use crate::memory::{MemoryPage, NodeRef};
    use crate::recording::RecordingMotion;

    #[test]
    fn third_orb_moves_at_fifteen_percent() {
        for scroll_y in [0.0, 1.0, 333.0, 1234.5] {
            assert_eq!(parallax_offset(2, scroll_y), scroll_y * 0.15);
        }
        assert_eq!(parallax_offset(0, 200.0), 10.0);
    }

    #[test]
    fn navbar_alpha_saturates_after_ramp() {
        assert_eq!(navbar_alpha(0.0, 500.0), 0.85);
        assert!((navbar_alpha(250.0, 500.0) - 0.925).abs() < 1e-12);
        assert_eq!(navbar_alpha(500.0, 500.0), 1.0);
        assert_eq!(navbar_alpha(5000.0, 500.0), 1.0);
    }

    #[test]
    fn scroll_sets_orb_offsets_and_navbar_background() {
        let page = MemoryPage::parse(PORTFOLIO);
        let motion = RecordingMotion::<NodeRef>::new();
        let navbar = page.query(".navbar").expect("navbar");
        let effects = ScrollEffects::mount(
            page.clone(),
            motion.clone(),
            Some(navbar),
            &MotionConfig::default(),
        );
        assert_eq!(effects.orb_count(), 3);

        page.set_scroll_y(600.0);
        page.add_class(&navbar, SCROLLED_CLASS);
        effects.on_scroll();

        let offsets: Vec<Vec<Prop>> = motion.sets().into_iter().map(|(_, props)| props).collect();
        assert_eq!(
            offsets,
            vec![
                vec![Prop::Y(parallax_offset(0, 600.0))],
                vec![Prop::Y(parallax_offset(1, 600.0))],
                vec![Prop::Y(600.0 * 0.15)],
            ]
        );
        assert_eq!(page.style(&navbar, "background"), "rgba(10, 15, 26, 1)");
    }

    #[test]
    fn navbar_background_untouched_until_scrolled() {
        let page = MemoryPage::parse(PORTFOLIO);
        let navbar = page.query(".navbar").expect("navbar");
        let effects = ScrollEffects::mount(
            page.clone(),
            RecordingMotion::<NodeRef>::new(),
            Some(navbar),
            &MotionConfig::default(),
        );

        page.set_scroll_y(40.0);
        effects.on_scroll();
        assert_eq!(page.style(&navbar, "background"), "");
    }
}
