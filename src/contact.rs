use crate::page::Page;
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};
use thiserror::Error;

pub const SENT_LABEL: &str = "<i class=\"fas fa-check\"></i> Sent!";
pub const SENT_BACKGROUND: &str = "linear-gradient(135deg, #10b981, #059669)";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Please fill in all required fields.")]
    MissingFields(Vec<&'static str>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

struct Field<N> {
    key: &'static str,
    named: Option<N>,
    fallback: Option<N>,
}

impl<N> Field<N> {
    fn bind<P: Page<Node = N>>(page: &P, form: &N, key: &'static str, fallback: &str) -> Self {
        Self {
            key,
            named: page.query_within(form, &format!("[name=\"{key}\"]")),
            fallback: page.query_within(form, fallback),
        }
    }
}

/// Client-side contact form: validates the three fields and simulates a send.
pub struct ContactForm<P: Page> {
    page: P,
    form: P::Node,
    name: Field<P::Node>,
    email: Field<P::Node>,
    message: Field<P::Node>,
    submit: Option<P::Node>,
    label_reset: Duration,
    original_label: Rc<RefCell<Option<String>>>,
    // Bumped on every send; only the latest restore timer acts.
    sent_generation: Rc<Cell<u64>>,
}

impl<P: Page> ContactForm<P> {
    pub fn mount(page: P, form: P::Node, label_reset: Duration) -> Self {
        Self {
            name: Field::bind(&page, &form, "name", "input[type=\"text\"]"),
            email: Field::bind(&page, &form, "email", "input[type=\"email\"]"),
            message: Field::bind(&page, &form, "message", "textarea"),
            submit: page.query_within(&form, "button[type=\"submit\"]"),
            page,
            form,
            label_reset,
            original_label: Rc::new(RefCell::new(None)),
            sent_generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn form(&self) -> &P::Node {
        &self.form
    }

    fn field_value(&self, field: &Field<P::Node>) -> String {
        let named = field
            .named
            .as_ref()
            .map(|node| self.page.value(node))
            .unwrap_or_default();
        if !named.is_empty() {
            return named;
        }
        field
            .fallback
            .as_ref()
            .map(|node| self.page.value(node))
            .unwrap_or_default()
    }

    pub fn read(&self) -> Result<ContactMessage, SubmitError> {
        let message = ContactMessage {
            name: self.field_value(&self.name),
            email: self.field_value(&self.email),
            message: self.field_value(&self.message),
        };

        let missing: Vec<&'static str> = [
            (self.name.key, &message.name),
            (self.email.key, &message.email),
            (self.message.key, &message.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, _)| key)
        .collect();
        if !missing.is_empty() {
            return Err(SubmitError::MissingFields(missing));
        }
        Ok(message)
    }

    /// Handles a submit. Nothing is transmitted; success is only shown on the button.
    pub fn on_submit(&self) -> Result<ContactMessage, SubmitError> {
        let message = match self.read() {
            Ok(message) => message,
            Err(error) => {
                self.page.alert(&error.to_string());
                return Err(error);
            }
        };

        self.show_sent();
        self.page.reset(&self.form);
        Ok(message)
    }

    fn show_sent(&self) {
        let Some(button) = self.submit.clone() else {
            return;
        };

        {
            let mut original = self.original_label.borrow_mut();
            if original.is_none() {
                *original = Some(self.page.inner_html(&button));
            }
        }
        self.page.set_inner_html(&button, SENT_LABEL);
        self.page.set_style(&button, "background", SENT_BACKGROUND);

        let generation = self.sent_generation.get().wrapping_add(1);
        self.sent_generation.set(generation);

        let page = self.page.clone();
        let original = self.original_label.clone();
        let latest = self.sent_generation.clone();
        self.page.schedule(
            self.label_reset,
            Box::new(move || {
                if latest.get() != generation {
                    return;
                }
                if let Some(label) = original.borrow_mut().take() {
                    page.set_inner_html(&button, &label);
                    page.set_style(&button, "background", "");
                }
            }),
        );
    }
}
