//! Scroll-driven motion and interaction layer for a single-page portfolio.
//!
//! Controllers are written against the [`page::Page`] and [`motion::Motion`]
//! capabilities. The browser build binds them to the live document and GSAP;
//! the native build serves the site and audits its markup.

pub mod config;
pub mod contact;
pub mod counter;
pub mod error;
pub mod lazy_images;
pub mod log;
pub mod markup;
pub mod motion;
pub mod navbar;
pub mod page;
pub mod preloader;
pub mod reveal;
pub mod scroll_effects;
pub mod site;
pub mod smooth_scroll;
pub mod subscriptions;

#[cfg(target_arch = "wasm32")]
pub mod browser;
#[cfg(target_arch = "wasm32")]
pub mod gsap;
#[cfg(target_arch = "wasm32")]
pub mod runtime;

#[cfg(not(target_arch = "wasm32"))]
pub mod memory;
#[cfg(not(target_arch = "wasm32"))]
pub mod recording;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;

#[cfg(test)]
mod fixtures;
