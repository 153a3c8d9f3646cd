use crate::config::MotionConfig;
use crate::log::Logger;
use crate::markup;
use crate::motion::{Ease, Motion, Prop, Tween};
use crate::page::Page;
use serde_json::json;
use std::{cell::Cell, rc::Rc};

const LOAD_FADE_SECONDS: f64 = 0.8;
const FALLBACK_FADE_SECONDS: f64 = 0.5;

struct PreloaderState<P: Page, M> {
    page: P,
    motion: M,
    logger: Logger,
    overlay: Option<P::Node>,
    hero_reveal: Vec<P::Node>,
    hero_image: Option<P::Node>,
    loaded: Cell<bool>,
    fading: Cell<bool>,
    hidden: Cell<bool>,
    hero_played: Cell<bool>,
}

/// Fades the loading overlay out and then plays the hero entrance exactly once.
pub struct Preloader<P: Page, M> {
    state: Rc<PreloaderState<P, M>>,
}

impl<P: Page, M: Motion<P::Node>> Preloader<P, M> {
    /// Binds to the overlay and arms the fallback timer.
    pub fn mount(page: P, motion: M, config: &MotionConfig, logger: Logger) -> Self {
        let state = Rc::new(PreloaderState {
            overlay: page.query(markup::PRELOADER),
            hero_reveal: page.query_all(markup::HERO_REVEAL),
            hero_image: page.query(markup::HERO_IMAGE),
            page,
            motion,
            logger,
            loaded: Cell::new(false),
            fading: Cell::new(false),
            hidden: Cell::new(false),
            hero_played: Cell::new(false),
        });

        let fallback_state = state.clone();
        state.page.schedule(
            config.preloader_fallback,
            Box::new(move || fallback_state.on_fallback()),
        );

        Self { state }
    }

    /// The window `load` event.
    pub fn on_load(&self) {
        self.state.loaded.set(true);
        self.state.fade_out(LOAD_FADE_SECONDS, Ease::Power2InOut);
    }

    pub fn is_hidden(&self) -> bool {
        self.state.hidden.get()
    }

    pub fn hero_played(&self) -> bool {
        self.state.hero_played.get()
    }
}

impl<P: Page, M: Motion<P::Node>> PreloaderState<P, M> {
    fn on_fallback(self: &Rc<Self>) {
        if self.loaded.get() || self.hidden.get() {
            return;
        }
        let still_visible = self
            .overlay
            .as_ref()
            .map(|overlay| self.page.style(overlay, "display") != "none")
            .unwrap_or(true);
        if !still_visible {
            return;
        }

        self.logger.info("preloader_fallback", json!({}));
        self.fade_out(FALLBACK_FADE_SECONDS, Ease::Power1Out);
    }

    fn fade_out(self: &Rc<Self>, seconds: f64, ease: Ease) {
        if self.fading.get() || self.hidden.get() {
            return;
        }

        let Some(overlay) = self.overlay.clone() else {
            self.finish_hide();
            return;
        };

        self.fading.set(true);
        let state = self.clone();
        self.motion.tween(
            Tween::to(vec![overlay], vec![Prop::Opacity(0.0)])
                .duration(seconds)
                .ease(ease)
                .on_complete(move || state.finish_hide()),
        );
    }

    fn finish_hide(&self) {
        if let Some(overlay) = self.overlay.as_ref() {
            self.page.set_style(overlay, "display", "none");
        }
        self.hidden.set(true);
        self.fading.set(false);
        self.play_hero();
    }

    fn play_hero(&self) {
        if self.hero_played.replace(true) {
            return;
        }

        if !self.hero_reveal.is_empty() {
            self.motion.tween(
                Tween::from_to(
                    self.hero_reveal.clone(),
                    vec![Prop::Opacity(0.0), Prop::Y(50.0)],
                    vec![Prop::Opacity(1.0), Prop::Y(0.0)],
                )
                .duration(1.0)
                .stagger(0.15)
                .ease(Ease::Power3Out),
            );
        }

        if let Some(image) = self.hero_image.clone() {
            self.motion.tween(
                Tween::from_to(
                    vec![image],
                    vec![Prop::Opacity(0.0), Prop::X(50.0)],
                    vec![Prop::Opacity(1.0), Prop::X(0.0)],
                )
                .duration(1.2)
                .delay(0.5)
                .ease(Ease::Power3Out),
            );
        }

        self.logger.debug(
            "hero_entrance",
            json!({ "elements": self.hero_reveal.len(), "image": self.hero_image.is_some() }),
        );
    }
}
