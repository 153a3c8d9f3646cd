use crate::config::MotionConfig;
use crate::log::Logger;
use crate::markup;
use crate::motion::{Ease, Motion, TriggerPolicy, Tween};
use crate::page::Page;
use serde_json::json;
use std::{cell::Cell, rc::Rc};

const TRIGGER_VIEWPORT_PERCENT: f64 = 85.0;

/// Leading integer of `raw`, ignoring surrounding whitespace and trailing junk.
pub fn parse_count(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}

/// Whole-number value shown at eased progress `eased`.
pub fn displayed_value(target: i64, eased: f64) -> i64 {
    (target as f64 * eased).round() as i64
}

pub fn final_label(target: i64) -> String {
    format!("{target}+")
}

/// Registers the count-up animation for every stat number. Returns how many were wired.
pub fn mount_counters<P: Page, M: Motion<P::Node>>(
    page: &P,
    motion: &M,
    config: &MotionConfig,
    logger: &Logger,
) -> usize {
    let mut wired = 0;

    for node in page.query_all(markup::STAT_COUNTER) {
        let raw = page.attribute(&node, "data-count").unwrap_or_default();
        let Some(target) = parse_count(&raw) else {
            logger.warn("counter_skipped", json!({ "dataCount": raw }));
            continue;
        };

        let finished = Rc::new(Cell::new(false));

        let frame_page = page.clone();
        let frame_node = node.clone();
        let frame_finished = finished.clone();
        let done_page = page.clone();
        let done_node = node.clone();

        motion.tween(
            Tween::proxy()
                .duration(config.counter_duration_seconds)
                .ease(Ease::Power2Out)
                .scroll_trigger(node, TRIGGER_VIEWPORT_PERCENT, TriggerPolicy::Once)
                .on_update(move |eased| {
                    if frame_finished.get() {
                        return;
                    }
                    frame_page.set_text(&frame_node, &displayed_value(target, eased).to_string());
                })
                .on_complete(move || {
                    finished.set(true);
                    done_page.set_text(&done_node, &final_label(target));
                }),
        );
        wired += 1;
    }

    wired
}
