//! Selectors the controllers bind to, and the audit that checks a page against them.

use crate::error::SiteError;
use crate::page::Page;
use serde::Serialize;

pub const PRELOADER: &str = ".preloader";
pub const HERO_REVEAL: &str = ".hero .gsap-reveal";
pub const HERO_IMAGE: &str = ".hero-image-wrapper";
pub const NAVBAR: &str = ".navbar";
pub const NAV_LINK: &str = ".nav-link";
pub const SECTION: &str = "section[id]";
pub const NAV_TOGGLER: &str = ".navbar-toggler";
pub const NAV_COLLAPSE: &str = ".navbar-collapse";
pub const REVEAL: &str = ".gsap-reveal";
pub const SKILL_BAR: &str = ".skill-progress[data-width]";
pub const TIMELINE_ITEM: &str = ".timeline-item";
pub const PROJECT_CARD: &str = ".project-card-large";
pub const PROJECT_IMAGE: &str = ".project-image img";
pub const EDUCATION_CARD: &str = ".education-card";
pub const CONTACT_ITEM: &str = ".contact-item";
pub const FEATURE_ITEM: &str = ".feature-item";
pub const SKILL_TAG: &str = ".skill-tag";
pub const FOOTER_BRAND: &str = ".footer-brand";
pub const FOOTER: &str = ".footer";
pub const GRADIENT_ORB: &str = ".hero-gradient-orb";
pub const STAT_COUNTER: &str = ".stat-number[data-count]";
pub const IN_PAGE_ANCHOR: &str = "a[href^=\"#\"]";
pub const CONTACT_FORM: &str = ".contact-form";
pub const LAZY_IMAGE: &str = "img[data-src]";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Required,
    Optional,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub selector: &'static str,
    pub owner: &'static str,
    pub presence: Presence,
}

const fn required(selector: &'static str, owner: &'static str) -> Dependency {
    Dependency {
        selector,
        owner,
        presence: Presence::Required,
    }
}

const fn optional(selector: &'static str, owner: &'static str) -> Dependency {
    Dependency {
        selector,
        owner,
        presence: Presence::Optional,
    }
}

pub const CONTRACT: &[Dependency] = &[
    optional(PRELOADER, "preloader"),
    optional(HERO_REVEAL, "preloader"),
    optional(HERO_IMAGE, "preloader"),
    required(NAVBAR, "navbar"),
    optional(NAV_LINK, "navbar"),
    optional(SECTION, "navbar"),
    optional(NAV_TOGGLER, "navbar"),
    optional(NAV_COLLAPSE, "navbar"),
    optional(REVEAL, "reveal"),
    optional(SKILL_BAR, "reveal"),
    optional(TIMELINE_ITEM, "reveal"),
    optional(PROJECT_CARD, "reveal"),
    optional(PROJECT_IMAGE, "reveal"),
    optional(EDUCATION_CARD, "reveal"),
    optional(CONTACT_ITEM, "reveal"),
    optional(FEATURE_ITEM, "reveal"),
    optional(SKILL_TAG, "reveal"),
    optional(FOOTER_BRAND, "reveal"),
    optional(FOOTER, "reveal"),
    optional(GRADIENT_ORB, "scroll-effects"),
    optional(STAT_COUNTER, "counters"),
    optional(IN_PAGE_ANCHOR, "smooth-scroll"),
    optional(CONTACT_FORM, "contact-form"),
    optional(LAZY_IMAGE, "lazy-images"),
];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Finding {
    #[serde(flatten)]
    pub dependency: Dependency,
    pub count: usize,
}

impl Finding {
    pub fn is_missing(&self) -> bool {
        self.count == 0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarkupReport {
    pub findings: Vec<Finding>,
}

impl MarkupReport {
    pub fn missing(&self, presence: Presence) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(move |finding| finding.is_missing() && finding.dependency.presence == presence)
    }

    /// Fails on the first required selector with no match.
    pub fn check(&self) -> Result<(), SiteError> {
        match self.missing(Presence::Required).next() {
            Some(finding) => Err(SiteError::MissingMarkup {
                selector: finding.dependency.selector,
                owner: finding.dependency.owner,
            }),
            None => Ok(()),
        }
    }
}

pub fn audit<P: Page>(page: &P) -> MarkupReport {
    let findings = CONTRACT
        .iter()
        .map(|dependency| Finding {
            dependency: *dependency,
            count: page.query_all(dependency.selector).len(),
        })
        .collect();

    MarkupReport { findings }
}
