//! Narrow animation capability: tween, set and window scroll-to.
//!
//! The browser build forwards these to GSAP; tests use a recording backend.

/// Easing curves, named after their GSAP equivalents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    /// GSAP's default curve.
    Power1Out,
    Power2Out,
    Power2InOut,
    Power3Out,
    Power3InOut,
    BackOut(f64),
}

impl Ease {
    pub fn as_gsap(self) -> String {
        match self {
            Self::Power1Out => "power1.out".to_string(),
            Self::Power2Out => "power2.out".to_string(),
            Self::Power2InOut => "power2.inOut".to_string(),
            Self::Power3Out => "power3.out".to_string(),
            Self::Power3InOut => "power3.inOut".to_string(),
            Self::BackOut(overshoot) => format!("back.out({overshoot})"),
        }
    }

    /// Maps progress in [0, 1] onto the eased value.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Power1Out => power_out(t, 2),
            Self::Power2Out => power_out(t, 3),
            Self::Power2InOut => power_in_out(t, 3),
            Self::Power3Out => power_out(t, 4),
            Self::Power3InOut => power_in_out(t, 4),
            Self::BackOut(overshoot) => {
                let inv = t - 1.0;
                1.0 + (overshoot + 1.0) * inv.powi(3) + overshoot * inv.powi(2)
            }
        }
    }
}

fn power_out(t: f64, exponent: i32) -> f64 {
    1.0 - (1.0 - t).powi(exponent)
}

fn power_in_out(t: f64, exponent: i32) -> f64 {
    if t < 0.5 {
        2f64.powi(exponent - 1) * t.powi(exponent)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(exponent) / 2.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Prop {
    Opacity(f64),
    X(f64),
    Y(f64),
    Scale(f64),
    /// CSS width such as `85%`.
    Width(String),
}

impl Prop {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Opacity(_) => "opacity",
            Self::X(_) => "x",
            Self::Y(_) => "y",
            Self::Scale(_) => "scale",
            Self::Width(_) => "width",
        }
    }
}

/// Whether a scroll-triggered tween can fire again after reversing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerPolicy {
    /// Play forward on enter, reverse on leaving back above the start point.
    Replay,
    /// Play on the first enter, then never again.
    Once,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Playback {
    Play,
    Reverse,
}

/// Tracks one trigger's position relative to its start point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TriggerState {
    entered: bool,
    spent: bool,
}

impl TriggerState {
    pub fn enter(&mut self, policy: TriggerPolicy) -> Option<Playback> {
        if self.spent || self.entered {
            return None;
        }
        self.entered = true;
        if policy == TriggerPolicy::Once {
            self.spent = true;
        }
        Some(Playback::Play)
    }

    pub fn leave_back(&mut self, policy: TriggerPolicy) -> Option<Playback> {
        if !self.entered {
            return None;
        }
        self.entered = false;
        match policy {
            TriggerPolicy::Replay => Some(Playback::Reverse),
            TriggerPolicy::Once => None,
        }
    }

    pub fn is_spent(&self) -> bool {
        self.spent
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollTrigger<N> {
    pub trigger: N,
    /// Fires when the trigger's top edge crosses this percentage of the viewport height.
    pub viewport_percent: f64,
    pub policy: TriggerPolicy,
}

impl<N> ScrollTrigger<N> {
    pub fn start(&self) -> String {
        format!("top {}%", self.viewport_percent)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Targets<N> {
    Elements(Vec<N>),
    /// A bare numeric value animated from 0 to 1 and reported through `on_update`.
    Proxy,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    pub duration: f64,
    pub delay: f64,
    pub stagger: f64,
    pub ease: Ease,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            duration: 0.5,
            delay: 0.0,
            stagger: 0.0,
            ease: Ease::Power1Out,
        }
    }
}

pub struct Tween<N> {
    pub targets: Targets<N>,
    /// Empty for a plain `to` tween.
    pub from: Vec<Prop>,
    pub to: Vec<Prop>,
    pub timing: Timing,
    pub trigger: Option<ScrollTrigger<N>>,
    pub on_update: Option<Box<dyn FnMut(f64)>>,
    pub on_complete: Option<Box<dyn FnOnce()>>,
}

impl<N> Tween<N> {
    pub fn from_to(targets: Vec<N>, from: Vec<Prop>, to: Vec<Prop>) -> Self {
        Self {
            targets: Targets::Elements(targets),
            from,
            to,
            timing: Timing::default(),
            trigger: None,
            on_update: None,
            on_complete: None,
        }
    }

    pub fn to(targets: Vec<N>, to: Vec<Prop>) -> Self {
        Self::from_to(targets, Vec::new(), to)
    }

    pub fn proxy() -> Self {
        Self {
            targets: Targets::Proxy,
            from: Vec::new(),
            to: Vec::new(),
            timing: Timing::default(),
            trigger: None,
            on_update: None,
            on_complete: None,
        }
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.timing.duration = seconds;
        self
    }

    pub fn delay(mut self, seconds: f64) -> Self {
        self.timing.delay = seconds;
        self
    }

    pub fn stagger(mut self, seconds: f64) -> Self {
        self.timing.stagger = seconds;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.timing.ease = ease;
        self
    }

    pub fn scroll_trigger(mut self, trigger: N, viewport_percent: f64, policy: TriggerPolicy) -> Self {
        self.trigger = Some(ScrollTrigger {
            trigger,
            viewport_percent,
            policy,
        });
        self
    }

    pub fn on_update(mut self, callback: impl FnMut(f64) + 'static) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }
}

pub trait Motion<N>: Clone + 'static {
    fn tween(&self, tween: Tween<N>);
    /// Applies properties immediately, without animating.
    fn set(&self, target: &N, props: &[Prop]);
    fn scroll_to(&self, y: f64, duration: f64, ease: Ease);
}
