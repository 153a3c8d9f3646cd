//! [`Motion`] backend that records calls instead of animating.
//!
//! Scroll triggers are driven by hand with [`RecordingMotion::enter`] and
//! [`RecordingMotion::leave_back`]; frames and completion with
//! [`RecordingMotion::progress`] and [`RecordingMotion::finish`].

use crate::motion::{Ease, Motion, Playback, Prop, ScrollTrigger, Targets, Timing, Tween, TriggerState};
use std::{cell::RefCell, rc::Rc};

/// Snapshot of one recorded tween.
#[derive(Clone, Debug)]
pub struct TweenRecord<N> {
    pub targets: Targets<N>,
    pub from: Vec<Prop>,
    pub to: Vec<Prop>,
    pub timing: Timing,
    pub trigger: Option<ScrollTrigger<N>>,
    pub plays: usize,
    pub reversals: usize,
    pub completed: bool,
}

impl<N: PartialEq> TweenRecord<N> {
    pub fn targets_node(&self, node: &N) -> bool {
        matches!(&self.targets, Targets::Elements(nodes) if nodes.contains(node))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollCall {
    pub y: f64,
    pub duration: f64,
    pub ease: Ease,
}

struct Entry<N> {
    record: TweenRecord<N>,
    state: TriggerState,
    on_update: Option<Box<dyn FnMut(f64)>>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

struct Recorded<N> {
    tweens: Vec<Entry<N>>,
    sets: Vec<(N, Vec<Prop>)>,
    scrolls: Vec<ScrollCall>,
}

pub struct RecordingMotion<N> {
    recorded: Rc<RefCell<Recorded<N>>>,
}

impl<N> Clone for RecordingMotion<N> {
    fn clone(&self) -> Self {
        Self {
            recorded: self.recorded.clone(),
        }
    }
}

impl<N> Default for RecordingMotion<N> {
    fn default() -> Self {
        Self {
            recorded: Rc::new(RefCell::new(Recorded {
                tweens: Vec::new(),
                sets: Vec::new(),
                scrolls: Vec::new(),
            })),
        }
    }
}

impl<N: Clone + 'static> RecordingMotion<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tween_count(&self) -> usize {
        self.recorded.borrow().tweens.len()
    }

    pub fn record(&self, index: usize) -> TweenRecord<N> {
        self.recorded.borrow().tweens[index].record.clone()
    }

    pub fn records(&self) -> Vec<TweenRecord<N>> {
        self.recorded
            .borrow()
            .tweens
            .iter()
            .map(|entry| entry.record.clone())
            .collect()
    }

    /// Index of the first tween satisfying `predicate`.
    pub fn position(&self, predicate: impl Fn(&TweenRecord<N>) -> bool) -> Option<usize> {
        self.recorded
            .borrow()
            .tweens
            .iter()
            .position(|entry| predicate(&entry.record))
    }

    /// Simulates the trigger's start point scrolling into view.
    pub fn enter(&self, index: usize) -> Option<Playback> {
        let mut recorded = self.recorded.borrow_mut();
        let entry = &mut recorded.tweens[index];
        let policy = entry.record.trigger.as_ref()?.policy;
        let playback = entry.state.enter(policy);
        if playback == Some(Playback::Play) {
            entry.record.plays += 1;
        }
        playback
    }

    /// Simulates scrolling back up past the trigger's start point.
    pub fn leave_back(&self, index: usize) -> Option<Playback> {
        let mut recorded = self.recorded.borrow_mut();
        let entry = &mut recorded.tweens[index];
        let policy = entry.record.trigger.as_ref()?.policy;
        let playback = entry.state.leave_back(policy);
        if playback == Some(Playback::Reverse) {
            entry.record.reversals += 1;
        }
        playback
    }

    /// Delivers one frame at linear progress `t`, eased with the tween's curve.
    pub fn progress(&self, index: usize, t: f64) {
        let (callback, ease) = {
            let mut recorded = self.recorded.borrow_mut();
            let entry = &mut recorded.tweens[index];
            (entry.on_update.take(), entry.record.timing.ease)
        };

        if let Some(mut callback) = callback {
            callback(ease.apply(t));
            self.recorded.borrow_mut().tweens[index].on_update = Some(callback);
        }
    }

    /// Runs the final frame and the completion callback.
    pub fn finish(&self, index: usize) {
        self.progress(index, 1.0);

        let callback = {
            let mut recorded = self.recorded.borrow_mut();
            let entry = &mut recorded.tweens[index];
            entry.record.completed = true;
            entry.on_complete.take()
        };

        if let Some(callback) = callback {
            callback();
        }
    }

    pub fn sets(&self) -> Vec<(N, Vec<Prop>)> {
        self.recorded.borrow().sets.clone()
    }

    pub fn scrolls(&self) -> Vec<ScrollCall> {
        self.recorded.borrow().scrolls.clone()
    }
}

impl<N: Clone + 'static> Motion<N> for RecordingMotion<N> {
    fn tween(&self, tween: Tween<N>) {
        let plays = usize::from(tween.trigger.is_none());

        self.recorded.borrow_mut().tweens.push(Entry {
            record: TweenRecord {
                targets: tween.targets,
                from: tween.from,
                to: tween.to,
                timing: tween.timing,
                trigger: tween.trigger,
                plays,
                reversals: 0,
                completed: false,
            },
            state: TriggerState::default(),
            on_update: tween.on_update,
            on_complete: tween.on_complete,
        });
    }

    fn set(&self, target: &N, props: &[Prop]) {
        self.recorded
            .borrow_mut()
            .sets
            .push((target.clone(), props.to_vec()));
    }

    fn scroll_to(&self, y: f64, duration: f64, ease: Ease) {
        self.recorded
            .borrow_mut()
            .scrolls
            .push(ScrollCall { y, duration, ease });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::TriggerPolicy;
    use std::cell::Cell;

    #[test]
    fn untriggered_tweens_play_immediately() {
        let motion = RecordingMotion::<u8>::new();
        motion.tween(Tween::to(vec![1], vec![Prop::Scale(1.1)]).duration(0.6));

        let record = motion.record(0);
        assert_eq!(record.plays, 1);
        assert!(record.targets_node(&1));
        assert_eq!(motion.enter(0), None);
    }

    #[test]
    fn finish_runs_final_frame_then_completion_once() {
        let motion = RecordingMotion::<u8>::new();
        let last = Rc::new(Cell::new(0.0));
        let completions = Rc::new(Cell::new(0));

        let frame = last.clone();
        let done = completions.clone();
        motion.tween(
            Tween::proxy()
                .ease(Ease::Power2Out)
                .on_update(move |value| frame.set(value))
                .on_complete(move || done.set(done.get() + 1)),
        );

        motion.progress(0, 0.5);
        assert!((last.get() - Ease::Power2Out.apply(0.5)).abs() < 1e-9);

        motion.finish(0);
        motion.finish(0);
        assert_eq!(last.get(), 1.0);
        assert_eq!(completions.get(), 1);
        assert!(motion.record(0).completed);
    }

    #[test]
    fn triggered_tween_counts_plays_and_reversals() {
        let motion = RecordingMotion::<u8>::new();
        motion.tween(
            Tween::from_to(vec![7], vec![Prop::Opacity(0.0)], vec![Prop::Opacity(1.0)])
                .scroll_trigger(7, 85.0, TriggerPolicy::Replay),
        );

        assert_eq!(motion.record(0).plays, 0);
        motion.enter(0);
        motion.leave_back(0);
        motion.enter(0);

        let record = motion.record(0);
        assert_eq!(record.plays, 2);
        assert_eq!(record.reversals, 1);
    }
}
