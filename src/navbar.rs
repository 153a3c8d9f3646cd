use crate::config::MotionConfig;
use crate::markup;
use crate::page::Page;

pub const SCROLLED_CLASS: &str = "scrolled";
pub const ACTIVE_CLASS: &str = "active";
const MENU_OPEN_CLASS: &str = "show";

pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Last section, in document order, whose top minus `lookahead` is at or above `scroll_y`.
pub fn current_section<'a>(
    scroll_y: f64,
    sections: impl IntoIterator<Item = (&'a str, f64)>,
    lookahead: f64,
) -> Option<&'a str> {
    let mut current = None;
    for (id, top) in sections {
        if scroll_y >= top - lookahead {
            current = Some(id);
        }
    }
    current
}

struct NavLink<N> {
    node: N,
    href: Option<String>,
}

/// Scrolled styling, active-link tracking and mobile menu closing.
pub struct Navbar<P: Page> {
    page: P,
    navbar: P::Node,
    links: Vec<NavLink<P::Node>>,
    sections: Vec<(P::Node, String)>,
    toggler: Option<P::Node>,
    collapse: Option<P::Node>,
    scrolled_offset: f64,
    section_lookahead: f64,
}

impl<P: Page> Navbar<P> {
    pub fn mount(page: P, navbar: P::Node, config: &MotionConfig) -> Self {
        let links = page
            .query_all(markup::NAV_LINK)
            .into_iter()
            .map(|node| NavLink {
                href: page.attribute(&node, "href"),
                node,
            })
            .collect();
        let sections = page
            .query_all(markup::SECTION)
            .into_iter()
            .filter_map(|node| page.attribute(&node, "id").map(|id| (node, id)))
            .collect();

        let navbar = Self {
            toggler: page.query(markup::NAV_TOGGLER),
            collapse: page.query(markup::NAV_COLLAPSE),
            page,
            navbar,
            links,
            sections,
            scrolled_offset: config.scrolled_offset,
            section_lookahead: config.section_lookahead,
        };

        // A page restored mid-scroll starts out styled.
        if is_scrolled(navbar.page.scroll_y(), navbar.scrolled_offset) {
            navbar.page.add_class(&navbar.navbar, SCROLLED_CLASS);
        }

        navbar
    }

    pub fn node(&self) -> &P::Node {
        &self.navbar
    }

    pub fn links(&self) -> impl Iterator<Item = &P::Node> {
        self.links.iter().map(|link| &link.node)
    }

    pub fn is_scrolled(&self) -> bool {
        self.page.has_class(&self.navbar, SCROLLED_CLASS)
    }

    /// Returns the id of the section now marked current, if any.
    pub fn on_scroll(&self) -> Option<String> {
        let scroll_y = self.page.scroll_y();

        if is_scrolled(scroll_y, self.scrolled_offset) {
            self.page.add_class(&self.navbar, SCROLLED_CLASS);
        } else {
            self.page.remove_class(&self.navbar, SCROLLED_CLASS);
        }

        let tops: Vec<(&str, f64)> = self
            .sections
            .iter()
            .map(|(node, id)| (id.as_str(), self.page.offset_top(node)))
            .collect();
        let current = current_section(scroll_y, tops, self.section_lookahead).map(str::to_string);
        let active_href = current.as_ref().map(|id| format!("#{id}"));

        for link in &self.links {
            self.page.remove_class(&link.node, ACTIVE_CLASS);
            if active_href.is_some() && link.href == active_href {
                self.page.add_class(&link.node, ACTIVE_CLASS);
            }
        }

        current
    }

    /// Collapses the mobile menu if it is open. Returns whether it was.
    pub fn on_link_click(&self) -> bool {
        let (Some(toggler), Some(collapse)) = (self.toggler.as_ref(), self.collapse.as_ref()) else {
            return false;
        };
        if !self.page.has_class(collapse, MENU_OPEN_CLASS) {
            return false;
        }
        self.page.click(toggler);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::PORTFOLIO;
    use crate::memory::MemoryPage;

    fn layout(page: &MemoryPage) {
        for (id, top) in [("home", 0.0), ("about", 800.0), ("projects", 1600.0), ("contact", 2400.0)] {
            let node = page.query(&format!("#{id}")).expect("section");
            page.set_offset_top(&node, top);
        }
    }

    fn mount(page: &MemoryPage) -> Navbar<MemoryPage> {
        let navbar = page.query(".navbar").expect("navbar");
        Navbar::mount(page.clone(), navbar, &MotionConfig::default())
    }

    fn active_links(page: &MemoryPage) -> Vec<String> {
        page.query_all(".nav-link")
            .into_iter()
            .filter(|link| page.has_class(link, ACTIVE_CLASS))
            .filter_map(|link| page.attribute(&link, "href"))
            .collect()
    }

    #[test]
    fn scrolled_threshold_is_strictly_above_fifty() {
        for scroll_y in [0.0, 10.0, 49.9, 50.0] {
            assert!(!is_scrolled(scroll_y, 50.0), "{scroll_y}");
        }
        for scroll_y in [50.1, 51.0, 4000.0] {
            assert!(is_scrolled(scroll_y, 50.0), "{scroll_y}");
        }
    }

    #[test]
    fn current_section_is_last_qualifying_in_document_order() {
        let sections = [("a", 0.0), ("b", 500.0), ("c", 1000.0)];

        assert_eq!(current_section(0.0, sections, 150.0), Some("a"));
        assert_eq!(current_section(349.0, sections, 150.0), Some("a"));
        assert_eq!(current_section(350.0, sections, 150.0), Some("b"));
        assert_eq!(current_section(5000.0, sections, 150.0), Some("c"));
    }

    #[test]
    fn no_section_qualifies_above_the_first() {
        let sections = [("a", 400.0), ("b", 900.0)];
        assert_eq!(current_section(100.0, sections, 150.0), None);
    }

    #[test]
    fn later_sections_win_ties() {
        let sections = [("a", 300.0), ("b", 300.0)];
        assert_eq!(current_section(300.0, sections, 150.0), Some("b"));
    }

    #[test]
    fn scroll_toggles_scrolled_class_and_active_link() {
        let page = MemoryPage::parse(PORTFOLIO);
        layout(&page);
        let navbar = mount(&page);

        page.set_scroll_y(700.0);
        assert_eq!(navbar.on_scroll().as_deref(), Some("about"));
        assert!(navbar.is_scrolled());
        assert_eq!(active_links(&page), vec!["#about"]);

        page.set_scroll_y(1500.0);
        navbar.on_scroll();
        assert_eq!(active_links(&page), vec!["#projects"]);

        page.set_scroll_y(20.0);
        navbar.on_scroll();
        assert!(!navbar.is_scrolled());
        assert_eq!(active_links(&page), vec!["#home"]);
    }

    #[test]
    fn no_link_is_active_when_no_section_qualifies() {
        let page = MemoryPage::parse(PORTFOLIO);
        for (index, node) in page.query_all("section[id]").iter().enumerate() {
            page.set_offset_top(node, 1000.0 + index as f64 * 500.0);
        }
        let navbar = mount(&page);

        page.set_scroll_y(0.0);
        assert_eq!(navbar.on_scroll(), None);
        assert!(active_links(&page).is_empty());
    }

    #[test]
    fn initial_mount_reflects_existing_scroll() {
        let page = MemoryPage::parse(PORTFOLIO);
        page.set_scroll_y(600.0);
        let navbar = mount(&page);
        assert!(navbar.is_scrolled());
    }

    #[test]
    fn link_click_closes_only_an_open_menu() {
        let page = MemoryPage::parse(PORTFOLIO);
        let navbar = mount(&page);
        let toggler = page.query(".navbar-toggler").expect("toggler");
        let collapse = page.query(".navbar-collapse").expect("collapse");

        assert!(!navbar.on_link_click());
        assert_eq!(page.clicks(&toggler), 0);

        page.add_class(&collapse, "show");
        assert!(navbar.on_link_click());
        assert_eq!(page.clicks(&toggler), 1);
    }
}
