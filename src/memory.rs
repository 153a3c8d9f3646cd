//! In-memory [`Page`] built from HTML text.
//!
//! Markup is parsed once with `scraper`; selector queries run against that
//! parse while attributes, classes, values and styles live in a mutable
//! per-element table. Layout is not computed: callers assign `offset_top`
//! and the scroll offset. Timers run on a virtual clock moved by [`MemoryPage::advance`].

use crate::page::Page;
use scraper::{ElementRef, Html, Selector};
use std::{cell::RefCell, collections::BTreeMap, rc::Rc, time::Duration};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(usize);

struct NodeState {
    tag: String,
    parent: Option<usize>,
    attributes: BTreeMap<String, String>,
    initial_value: String,
    value: String,
    inner_html: String,
    styles: BTreeMap<String, String>,
    offset_top: f64,
    clicks: usize,
}

struct Timer {
    due: Duration,
    seq: u64,
    task: Box<dyn FnOnce()>,
}

struct PageState {
    nodes: Vec<NodeState>,
    scroll_y: f64,
    now: Duration,
    timers: Vec<Timer>,
    next_seq: u64,
    alerts: Vec<String>,
    intersection: bool,
}

#[derive(Clone)]
pub struct MemoryPage {
    document: Rc<Html>,
    state: Rc<RefCell<PageState>>,
}

impl MemoryPage {
    pub fn parse(markup: &str) -> Self {
        let document = Html::parse_document(markup);
        let nodes: Vec<NodeState> = {
            let elements = all_elements(&document);
            elements
                .iter()
                .map(|element| {
                    let parent = element
                        .parent()
                        .and_then(ElementRef::wrap)
                        .and_then(|parent| elements.iter().position(|e| e.id() == parent.id()));
                    let tag = element.value().name().to_ascii_lowercase();
                    let attributes: BTreeMap<String, String> = element
                        .value()
                        .attrs()
                        .map(|(name, value)| (name.to_string(), value.to_string()))
                        .collect();
                    let initial_value = match tag.as_str() {
                        "textarea" => element.text().collect::<String>(),
                        _ => attributes.get("value").cloned().unwrap_or_default(),
                    };

                    NodeState {
                        tag,
                        parent,
                        attributes,
                        value: initial_value.clone(),
                        initial_value,
                        inner_html: element.inner_html(),
                        styles: BTreeMap::new(),
                        offset_top: 0.0,
                        clicks: 0,
                    }
                })
                .collect()
        };

        Self {
            state: Rc::new(RefCell::new(PageState {
                nodes,
                scroll_y: 0.0,
                now: Duration::ZERO,
                timers: Vec::new(),
                next_seq: 0,
                alerts: Vec::new(),
                intersection: true,
            })),
            document: Rc::new(document),
        }
    }

    pub fn set_scroll_y(&self, value: f64) {
        self.state.borrow_mut().scroll_y = value;
    }

    pub fn set_offset_top(&self, node: &NodeRef, value: f64) {
        self.state.borrow_mut().nodes[node.0].offset_top = value;
    }

    pub fn set_intersection_supported(&self, supported: bool) {
        self.state.borrow_mut().intersection = supported;
    }

    pub fn tag(&self, node: &NodeRef) -> String {
        self.state.borrow().nodes[node.0].tag.clone()
    }

    pub fn clicks(&self, node: &NodeRef) -> usize {
        self.state.borrow().nodes[node.0].clicks
    }

    pub fn alerts(&self) -> Vec<String> {
        self.state.borrow().alerts.clone()
    }

    pub fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Moves the virtual clock forward, running every timer that falls due in order.
    pub fn advance(&self, by: Duration) {
        let target = self.state.borrow().now + by;

        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let due_index = state
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due <= target)
                    .min_by_key(|(_, timer)| (timer.due, timer.seq))
                    .map(|(index, _)| index);

                due_index.map(|index| {
                    let timer = state.timers.remove(index);
                    state.now = timer.due;
                    timer.task
                })
            };

            match next {
                Some(task) => task(),
                None => break,
            }
        }

        self.state.borrow_mut().now = target;
    }

    fn elements(&self) -> Vec<ElementRef<'_>> {
        all_elements(&self.document)
    }

    fn position_of(elements: &[ElementRef<'_>], element: &ElementRef<'_>) -> Option<NodeRef> {
        elements
            .iter()
            .position(|candidate| candidate.id() == element.id())
            .map(NodeRef)
    }

    fn is_descendant_of(&self, node: usize, ancestor: usize) -> bool {
        let state = self.state.borrow();
        let mut current = state.nodes[node].parent;
        while let Some(index) = current {
            if index == ancestor {
                return true;
            }
            current = state.nodes[index].parent;
        }
        false
    }
}

fn all_elements(document: &Html) -> Vec<ElementRef<'_>> {
    match Selector::parse("*") {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

impl Page for MemoryPage {
    type Node = NodeRef;

    fn query(&self, selector: &str) -> Option<NodeRef> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeRef> {
        let Ok(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        let elements = self.elements();

        self.document
            .select(&selector)
            .filter_map(|element| Self::position_of(&elements, &element))
            .collect()
    }

    fn query_within(&self, scope: &NodeRef, selector: &str) -> Option<NodeRef> {
        let selector = Selector::parse(selector).ok()?;
        let elements = self.elements();
        let scope_element = elements.get(scope.0)?;

        scope_element
            .select(&selector)
            .find_map(|element| Self::position_of(&elements, &element))
    }

    fn attribute(&self, node: &NodeRef, name: &str) -> Option<String> {
        self.state.borrow().nodes[node.0].attributes.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeRef, name: &str, value: &str) {
        self.state.borrow_mut().nodes[node.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&self, node: &NodeRef, name: &str) {
        self.state.borrow_mut().nodes[node.0].attributes.remove(name);
    }

    fn has_class(&self, node: &NodeRef, class: &str) -> bool {
        self.attribute(node, "class")
            .map(|classes| classes.split_whitespace().any(|value| value == class))
            .unwrap_or(false)
    }

    fn add_class(&self, node: &NodeRef, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let next = match self.attribute(node, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_string(),
        };
        self.set_attribute(node, "class", &next);
    }

    fn remove_class(&self, node: &NodeRef, class: &str) {
        let Some(existing) = self.attribute(node, "class") else {
            return;
        };
        let next: Vec<&str> = existing
            .split_whitespace()
            .filter(|value| *value != class)
            .collect();
        self.set_attribute(node, "class", &next.join(" "));
    }

    fn inner_html(&self, node: &NodeRef) -> String {
        self.state.borrow().nodes[node.0].inner_html.clone()
    }

    fn set_inner_html(&self, node: &NodeRef, html: &str) {
        self.state.borrow_mut().nodes[node.0].inner_html = html.to_string();
    }

    fn set_text(&self, node: &NodeRef, text: &str) {
        self.set_inner_html(node, text);
    }

    fn style(&self, node: &NodeRef, property: &str) -> String {
        self.state.borrow().nodes[node.0]
            .styles
            .get(property)
            .cloned()
            .unwrap_or_default()
    }

    fn set_style(&self, node: &NodeRef, property: &str, value: &str) {
        let mut state = self.state.borrow_mut();
        let styles = &mut state.nodes[node.0].styles;
        if value.is_empty() {
            styles.remove(property);
        } else {
            styles.insert(property.to_string(), value.to_string());
        }
    }

    fn value(&self, node: &NodeRef) -> String {
        self.state.borrow().nodes[node.0].value.clone()
    }

    fn set_value(&self, node: &NodeRef, value: &str) {
        self.state.borrow_mut().nodes[node.0].value = value.to_string();
    }

    fn reset(&self, form: &NodeRef) {
        let count = self.state.borrow().nodes.len();
        for index in 0..count {
            if self.is_descendant_of(index, form.0) {
                let mut state = self.state.borrow_mut();
                let node = &mut state.nodes[index];
                node.value = node.initial_value.clone();
            }
        }
    }

    fn offset_top(&self, node: &NodeRef) -> f64 {
        self.state.borrow().nodes[node.0].offset_top
    }

    fn client_top(&self, node: &NodeRef) -> f64 {
        let state = self.state.borrow();
        state.nodes[node.0].offset_top - state.scroll_y
    }

    fn scroll_y(&self) -> f64 {
        self.state.borrow().scroll_y
    }

    fn click(&self, node: &NodeRef) {
        self.state.borrow_mut().nodes[node.0].clicks += 1;
    }

    fn alert(&self, message: &str) {
        self.state.borrow_mut().alerts.push(message.to_string());
    }

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let mut state = self.state.borrow_mut();
        let seq = state.next_seq;
        state.next_seq += 1;
        let due = state.now + delay;
        state.timers.push(Timer { due, seq, task });
    }

    fn supports_intersection(&self) -> bool {
        self.state.borrow().intersection
    }
}
