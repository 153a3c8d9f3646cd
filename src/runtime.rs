use crate::browser::BrowserPage;
use crate::config::MotionConfig;
use crate::error::{Result, SiteError};
use crate::gsap::GsapMotion;
use crate::log::{LogLevel, Logger};
use crate::site::Site;
use crate::subscriptions::{MountSlot, PageHide, Subscriptions};
use js_sys::Array;
use serde_json::json;
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    PageTransitionEvent,
};

type BrowserSite = Site<BrowserPage, GsapMotion>;

thread_local! {
    static MOUNTED: RefCell<MountSlot> = RefCell::new(MountSlot::default());
}

/// Entry point for the browser build: mounts once the DOM is parsed.
pub fn run() {
    if let Err(error) = start() {
        report(&error);
    }
}

fn report(error: &SiteError) {
    Logger::new(LogLevel::Error).error("site_mount_failed", json!({ "error": error.to_string() }));
}

fn start() -> Result<()> {
    let page = BrowserPage::new()?;
    if page.document().ready_state() != "loading" {
        return mount(page);
    }

    let deferred = page.clone();
    let on_ready = Closure::once_into_js(move || {
        if let Err(error) = mount(deferred) {
            report(&error);
        }
    });
    page.document()
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    Ok(())
}

fn mount(page: BrowserPage) -> Result<()> {
    let config = MotionConfig::from_lookup(|key| page.config_attribute(key));
    let logger = Logger::new(config.log_level);
    let motion = GsapMotion::from_window(page.window(), logger)?;
    let site = Rc::new(Site::mount(page.clone(), motion, config)?);

    let subscriptions = bind(&page, &site)?;
    logger.debug("listeners_bound", json!({ "count": subscriptions.len() }));

    let previous = MOUNTED.with(|slot| slot.borrow_mut().install(subscriptions));
    if let Some(previous) = previous {
        previous.dispose();
    }

    // Stays attached: a cached page can be hidden again after it is restored.
    let on_hide = Closure::<dyn FnMut(PageTransitionEvent)>::new(|event: PageTransitionEvent| {
        let hide = PageHide::from_persisted(event.persisted());
        let released = MOUNTED.with(|slot| slot.borrow_mut().release(hide));
        if let Some(subscriptions) = released {
            subscriptions.dispose();
        }
    });
    page.window()
        .add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref())?;
    on_hide.forget();
    Ok(())
}

fn listen(
    subscriptions: &mut Subscriptions,
    target: &EventTarget,
    event: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<()> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;

    let target = target.clone();
    subscriptions.push(move || {
        let _ = target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    });
    Ok(())
}

fn bind(page: &BrowserPage, site: &Rc<BrowserSite>) -> Result<Subscriptions> {
    let mut subscriptions = Subscriptions::new();

    let scrolled = site.clone();
    listen(&mut subscriptions, page.window(), "scroll", move |_| scrolled.on_scroll())?;

    if page.document().ready_state() == "complete" {
        site.on_load();
    } else {
        let loaded = site.clone();
        listen(&mut subscriptions, page.window(), "load", move |_| loaded.on_load())?;
    }

    for link in site.nav_links() {
        let clicked = site.clone();
        listen(&mut subscriptions, &link, "click", move |_| {
            clicked.on_nav_link_click();
        })?;
    }

    for (index, anchor) in site.anchors().iter().enumerate() {
        let clicked = site.clone();
        listen(&mut subscriptions, anchor, "click", move |event| {
            event.prevent_default();
            clicked.on_anchor_click(index);
        })?;
    }

    for (index, card) in site.project_cards().iter().enumerate() {
        let entered = site.clone();
        listen(&mut subscriptions, card, "mouseenter", move |_| entered.on_project_enter(index))?;
        let left = site.clone();
        listen(&mut subscriptions, card, "mouseleave", move |_| left.on_project_leave(index))?;
    }

    if let Some(form) = site.contact_form() {
        let submitted = site.clone();
        listen(&mut subscriptions, form, "submit", move |event| {
            event.prevent_default();
            let _ = submitted.on_contact_submit();
        })?;
    }

    if let Some(images) = site.lazy_images() {
        observe_images(&mut subscriptions, site, images.to_vec())?;
    }

    Ok(subscriptions)
}

fn observe_images(
    subscriptions: &mut Subscriptions,
    site: &Rc<BrowserSite>,
    images: Vec<Element>,
) -> Result<()> {
    let visible = site.clone();
    let watched = images.clone();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                let Some(index) = watched.iter().position(|image| *image == target) else {
                    continue;
                };
                if visible.on_image_visible(index) {
                    observer.unobserve(&target);
                }
            }
        },
    );

    let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())?;
    for image in &images {
        observer.observe(image);
    }

    subscriptions.push(move || {
        observer.disconnect();
        drop(callback);
    });
    Ok(())
}
