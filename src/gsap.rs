//! [`Motion`] backed by the page's global `gsap` object.
//!
//! The library and its `ScrollTrigger`/`ScrollToPlugin` plugins are loaded by
//! `<script>` tags; this module only builds the vars objects and calls in.

use crate::error::{Result, SiteError};
use crate::log::Logger;
use crate::motion::{Ease, Motion, Prop, ScrollTrigger, Targets, TriggerPolicy, Tween};
use js_sys::{Array, Function, Object, Reflect};
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, Window};

const PLUGINS: [&str; 2] = ["ScrollTrigger", "ScrollToPlugin"];
const PROXY_KEY: &str = "progress";

#[derive(Clone)]
pub struct GsapMotion {
    gsap: Object,
    window: Window,
    logger: Logger,
}

impl GsapMotion {
    /// Looks up `window.gsap` and registers the scroll plugins.
    pub fn from_window(window: &Window, logger: Logger) -> Result<Self> {
        let gsap = Reflect::get(window, &JsValue::from_str("gsap"))?;
        let gsap = gsap
            .dyn_into::<Object>()
            .map_err(|_| SiteError::MotionUnavailable("window.gsap is not loaded".to_string()))?;

        let plugins = Array::new();
        for name in PLUGINS {
            let plugin = Reflect::get(window, &JsValue::from_str(name))?;
            if plugin.is_undefined() {
                return Err(SiteError::MotionUnavailable(format!("{name} is not loaded")));
            }
            plugins.push(&plugin);
        }

        let motion = Self {
            gsap,
            window: window.clone(),
            logger,
        };
        motion.call("registerPlugin", &plugins)?;
        Ok(motion)
    }

    fn call(&self, method: &str, args: &Array) -> Result<JsValue> {
        let function = Reflect::get(&self.gsap, &JsValue::from_str(method))?
            .dyn_into::<Function>()
            .map_err(|_| SiteError::MotionUnavailable(format!("gsap.{method} is not a function")))?;
        Ok(function.apply(&self.gsap, args)?)
    }

    fn call_logged(&self, method: &str, args: &Array) {
        if let Err(error) = self.call(method, args) {
            self.logger.error(
                "gsap_call_failed",
                json!({ "method": method, "error": error.to_string() }),
            );
        }
    }
}

fn assign(object: &Object, key: &str, value: &JsValue) {
    let _ = Reflect::set(object, &JsValue::from_str(key), value);
}

fn props_object(props: &[Prop]) -> Object {
    let object = Object::new();
    for prop in props {
        let value = match prop {
            Prop::Opacity(value) | Prop::X(value) | Prop::Y(value) | Prop::Scale(value) => {
                JsValue::from_f64(*value)
            }
            Prop::Width(width) => JsValue::from_str(width),
        };
        assign(&object, prop.name(), &value);
    }
    object
}

fn trigger_object(trigger: &ScrollTrigger<Element>) -> Object {
    let object = Object::new();
    assign(&object, "trigger", &trigger.trigger);
    assign(&object, "start", &JsValue::from_str(&trigger.start()));
    match trigger.policy {
        TriggerPolicy::Replay => assign(
            &object,
            "toggleActions",
            &JsValue::from_str("play none none reverse"),
        ),
        TriggerPolicy::Once => assign(&object, "once", &JsValue::TRUE),
    }
    object
}

impl Motion<Element> for GsapMotion {
    fn tween(&self, tween: Tween<Element>) {
        let Tween {
            targets,
            from,
            to,
            timing,
            trigger,
            on_update,
            on_complete,
        } = tween;

        let vars = props_object(&to);
        assign(&vars, "duration", &JsValue::from_f64(timing.duration));
        assign(&vars, "delay", &JsValue::from_f64(timing.delay));
        assign(&vars, "ease", &JsValue::from_str(&timing.ease.as_gsap()));
        if timing.stagger > 0.0 {
            assign(&vars, "stagger", &JsValue::from_f64(timing.stagger));
        }
        if let Some(trigger) = trigger.as_ref() {
            assign(&vars, "scrollTrigger", &trigger_object(trigger));
        }

        let (target, proxy): (JsValue, Option<Object>) = match targets {
            Targets::Elements(nodes) => (nodes.into_iter().collect::<Array>().into(), None),
            Targets::Proxy => {
                let proxy = Object::new();
                assign(&proxy, PROXY_KEY, &JsValue::from_f64(0.0));
                assign(&vars, PROXY_KEY, &JsValue::from_f64(1.0));
                (proxy.clone().into(), Some(proxy))
            }
        };

        // Frame callbacks only carry a value for proxy tweens.
        if let (Some(mut callback), Some(proxy)) = (on_update, proxy) {
            let frame = Closure::<dyn FnMut()>::new(move || {
                let value = Reflect::get(&proxy, &JsValue::from_str(PROXY_KEY))
                    .ok()
                    .and_then(|value| value.as_f64())
                    .unwrap_or_default();
                callback(value);
            });
            assign(&vars, "onUpdate", &frame.into_js_value());
        }
        if let Some(callback) = on_complete {
            assign(&vars, "onComplete", &Closure::once_into_js(move || callback()));
        }

        if from.is_empty() {
            self.call_logged("to", &Array::of2(&target, &vars));
        } else {
            self.call_logged("fromTo", &Array::of3(&target, &props_object(&from), &vars));
        }
    }

    fn set(&self, target: &Element, props: &[Prop]) {
        self.call_logged("set", &Array::of2(target, &props_object(props)));
    }

    fn scroll_to(&self, y: f64, duration: f64, ease: Ease) {
        let scroll = Object::new();
        assign(&scroll, "y", &JsValue::from_f64(y));
        assign(&scroll, "autoKill", &JsValue::FALSE);

        let vars = Object::new();
        assign(&vars, "duration", &JsValue::from_f64(duration));
        assign(&vars, "ease", &JsValue::from_str(&ease.as_gsap()));
        assign(&vars, "scrollTo", &scroll);

        self.call_logged("to", &Array::of2(&self.window, &vars));
    }
}
