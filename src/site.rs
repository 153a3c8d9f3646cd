//! Mounts every page controller in a fixed order and routes page events to them.

use crate::config::MotionConfig;
use crate::contact::{ContactForm, ContactMessage, SubmitError};
use crate::counter;
use crate::error::SiteError;
use crate::lazy_images::LazyImages;
use crate::log::Logger;
use crate::markup::{self, MarkupReport, Presence};
use crate::motion::Motion;
use crate::navbar::Navbar;
use crate::page::Page;
use crate::preloader::Preloader;
use crate::reveal::{self, ProjectHover, RevealSummary};
use crate::scroll_effects::ScrollEffects;
use crate::smooth_scroll::SmoothScroll;
use serde_json::json;

pub struct Site<P: Page, M: Motion<P::Node>> {
    logger: Logger,
    report: MarkupReport,
    preloader: Preloader<P, M>,
    navbar: Option<Navbar<P>>,
    reveal: RevealSummary,
    hover: ProjectHover<P, M>,
    effects: ScrollEffects<P, M>,
    counters: usize,
    smooth: SmoothScroll<P, M>,
    contact: Option<ContactForm<P>>,
    lazy: Option<LazyImages<P>>,
}

impl<P: Page, M: Motion<P::Node>> Site<P, M> {
    /// Audits the markup, then wires each controller exactly once.
    ///
    /// In strict mode a missing required element is an error; otherwise it is
    /// logged and the controller that needs it is left out.
    pub fn mount(page: P, motion: M, config: MotionConfig) -> Result<Self, SiteError> {
        let logger = Logger::new(config.log_level);
        let report = markup::audit(&page);

        if let Err(error) = report.check() {
            if config.strict_markup {
                logger.error("markup_invalid", json!({ "error": error.to_string() }));
                return Err(error);
            }
            logger.warn("markup_incomplete", json!({ "error": error.to_string() }));
        }
        for finding in report.missing(Presence::Optional) {
            logger.debug(
                "markup_optional_missing",
                json!({ "selector": finding.dependency.selector, "owner": finding.dependency.owner }),
            );
        }

        let preloader = Preloader::mount(page.clone(), motion.clone(), &config, logger);
        let navbar = page
            .query(markup::NAVBAR)
            .map(|node| Navbar::mount(page.clone(), node, &config));
        let reveal = reveal::mount_reveals(&page, &motion);
        let hover = ProjectHover::mount(&page, motion.clone());
        let effects = ScrollEffects::mount(
            page.clone(),
            motion.clone(),
            navbar.as_ref().map(|navbar| navbar.node().clone()),
            &config,
        );
        let counters = counter::mount_counters(&page, &motion, &config, &logger);
        let smooth = SmoothScroll::mount(page.clone(), motion, &config);
        let contact = page
            .query(markup::CONTACT_FORM)
            .map(|form| ContactForm::mount(page.clone(), form, config.sent_label_reset));
        let lazy = LazyImages::mount(page.clone());

        logger.info(
            "site_mounted",
            json!({
                "reveal": reveal,
                "counters": counters,
                "anchors": smooth.anchors().len(),
                "projectCards": hover.card_count(),
                "contactForm": contact.is_some(),
                "lazyImages": lazy.as_ref().map(|lazy| lazy.images().len()),
                "config": config,
            }),
        );

        Ok(Self {
            logger,
            report,
            preloader,
            navbar,
            reveal,
            hover,
            effects,
            counters,
            smooth,
            contact,
            lazy,
        })
    }

    pub fn report(&self) -> &MarkupReport {
        &self.report
    }

    pub fn reveal_summary(&self) -> &RevealSummary {
        &self.reveal
    }

    pub fn counter_count(&self) -> usize {
        self.counters
    }

    pub fn preloader(&self) -> &Preloader<P, M> {
        &self.preloader
    }

    pub fn nav_links(&self) -> Vec<P::Node> {
        self.navbar
            .as_ref()
            .map(|navbar| navbar.links().cloned().collect())
            .unwrap_or_default()
    }

    pub fn anchors(&self) -> &[P::Node] {
        self.smooth.anchors()
    }

    pub fn project_cards(&self) -> Vec<P::Node> {
        self.hover.cards().cloned().collect()
    }

    pub fn contact_form(&self) -> Option<&P::Node> {
        self.contact.as_ref().map(ContactForm::form)
    }

    /// `None` when the page cannot observe intersection.
    pub fn lazy_images(&self) -> Option<&[P::Node]> {
        self.lazy.as_ref().map(LazyImages::images)
    }

    pub fn on_load(&self) {
        self.logger.debug("page_loaded", json!({}));
        self.preloader.on_load();
    }

    pub fn on_scroll(&self) {
        if let Some(navbar) = self.navbar.as_ref() {
            navbar.on_scroll();
        }
        self.effects.on_scroll();
    }

    pub fn on_nav_link_click(&self) -> bool {
        self.navbar
            .as_ref()
            .map(Navbar::on_link_click)
            .unwrap_or(false)
    }

    pub fn on_anchor_click(&self, index: usize) -> Option<f64> {
        let destination = self.smooth.on_click(index);
        if destination.is_none() {
            self.logger.debug("anchor_without_target", json!({ "index": index }));
        }
        destination
    }

    pub fn on_project_enter(&self, index: usize) {
        self.hover.on_enter(index);
    }

    pub fn on_project_leave(&self, index: usize) {
        self.hover.on_leave(index);
    }

    /// `None` when the page has no contact form.
    pub fn on_contact_submit(&self) -> Option<Result<ContactMessage, SubmitError>> {
        let contact = self.contact.as_ref()?;
        let result = contact.on_submit();

        match &result {
            Ok(message) => self.logger.info(
                "contact_submitted",
                json!({ "messageLength": message.message.chars().count() }),
            ),
            Err(SubmitError::MissingFields(fields)) => {
                self.logger.info("contact_rejected", json!({ "missing": fields }))
            }
        }

        Some(result)
    }

    pub fn on_image_visible(&self, index: usize) -> bool {
        self.lazy
            .as_ref()
            .map(|lazy| lazy.on_visible(index))
            .unwrap_or(true)
    }
}
