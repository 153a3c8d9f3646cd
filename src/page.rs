//! The document/window capability every controller works through.
//!
//! Controllers query their elements once when they are constructed and keep
//! the returned handles, so an implementation only has to answer selector
//! queries against the markup as it was when the page was mounted.

use std::time::Duration;

pub trait Page: Clone + 'static {
    type Node: Clone + 'static;

    fn query(&self, selector: &str) -> Option<Self::Node>;
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    /// First descendant of `scope` matching `selector`.
    fn query_within(&self, scope: &Self::Node, selector: &str) -> Option<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn remove_attribute(&self, node: &Self::Node, name: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);

    fn inner_html(&self, node: &Self::Node) -> String;
    fn set_inner_html(&self, node: &Self::Node, html: &str);
    fn set_text(&self, node: &Self::Node, text: &str);

    /// Inline style property, empty when unset.
    fn style(&self, node: &Self::Node, property: &str) -> String;
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    /// Current value of a form field.
    fn value(&self, node: &Self::Node) -> String;
    fn set_value(&self, node: &Self::Node, value: &str);
    /// Restores every field of a form to its initial value.
    fn reset(&self, form: &Self::Node);

    /// Distance from the top of the document, in CSS pixels.
    fn offset_top(&self, node: &Self::Node) -> f64;
    /// Distance from the top of the viewport, in CSS pixels.
    fn client_top(&self, node: &Self::Node) -> f64;
    fn scroll_y(&self) -> f64;

    fn click(&self, node: &Self::Node);
    fn alert(&self, message: &str);
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);
    fn supports_intersection(&self) -> bool;
}
