use crate::markup;
use crate::page::Page;
use std::cell::RefCell;

const DEFERRED_SOURCE: &str = "data-src";

/// Images whose real `src` is held back until they scroll into view.
pub struct LazyImages<P: Page> {
    page: P,
    images: Vec<P::Node>,
    loaded: RefCell<Vec<bool>>,
}

impl<P: Page> LazyImages<P> {
    /// `None` when the page cannot observe viewport intersection.
    pub fn mount(page: P) -> Option<Self> {
        if !page.supports_intersection() {
            return None;
        }
        let images = page.query_all(markup::LAZY_IMAGE);
        let loaded = RefCell::new(vec![false; images.len()]);
        Some(Self {
            page,
            images,
            loaded,
        })
    }

    pub fn images(&self) -> &[P::Node] {
        &self.images
    }

    /// Swaps in the deferred source. Returns `true` when the image should stop being observed,
    /// which includes indices this loader never bound.
    pub fn on_visible(&self, index: usize) -> bool {
        let Some(image) = self.images.get(index) else {
            return true;
        };
        let mut loaded = self.loaded.borrow_mut();
        if loaded[index] {
            return true;
        }

        if let Some(source) = self.page.attribute(image, DEFERRED_SOURCE) {
            self.page.set_attribute(image, "src", &source);
            self.page.remove_attribute(image, DEFERRED_SOURCE);
        }
        loaded[index] = true;
        true
    }

    pub fn pending(&self) -> usize {
        self.loaded.borrow().iter().filter(|loaded| !**loaded).count()
    }
}
