//! Scroll-triggered entrance animations and the project card hover zoom.

use crate::markup;
use crate::motion::{Ease, Motion, Prop, TriggerPolicy, Tween};
use crate::page::Page;
use serde::Serialize;

const DEFAULT_START: f64 = 85.0;
const LATE_START: f64 = 90.0;
const HOVER_SECONDS: f64 = 0.6;
const HOVER_SCALE: f64 = 1.1;

/// How many elements each group bound to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealSummary {
    pub reveal_blocks: usize,
    pub skill_bars: usize,
    pub timeline_items: usize,
    pub education_cards: usize,
    pub contact_items: usize,
    pub feature_items: usize,
    pub skill_tags: usize,
    pub footer_brand: bool,
}

fn fade_in<N: Clone>(node: N, from: Prop, to: Prop) -> Tween<N> {
    Tween::from_to(
        vec![node],
        vec![Prop::Opacity(0.0), from],
        vec![Prop::Opacity(1.0), to],
    )
}

/// Horizontal start offset for the timeline item at `index`: even items slide in from the right.
pub fn timeline_offset(index: usize) -> f64 {
    if index % 2 == 0 {
        50.0
    } else {
        -50.0
    }
}

pub fn contact_item_delay(index: usize) -> f64 {
    index as f64 / 10.0
}

/// Registers every entrance group present in the markup.
pub fn mount_reveals<P: Page, M: Motion<P::Node>>(page: &P, motion: &M) -> RevealSummary {
    let mut summary = RevealSummary::default();

    for node in page.query_all(markup::REVEAL) {
        motion.tween(
            fade_in(node.clone(), Prop::Y(60.0), Prop::Y(0.0))
                .duration(1.0)
                .ease(Ease::Power3Out)
                .scroll_trigger(node, DEFAULT_START, TriggerPolicy::Replay),
        );
        summary.reveal_blocks += 1;
    }

    for bar in page.query_all(markup::SKILL_BAR) {
        let width = page.attribute(&bar, "data-width").unwrap_or_default();
        motion.tween(
            Tween::from_to(
                vec![bar.clone()],
                vec![Prop::Width("0%".to_string())],
                vec![Prop::Width(width)],
            )
            .duration(1.5)
            .ease(Ease::Power3Out)
            .scroll_trigger(bar, DEFAULT_START, TriggerPolicy::Replay),
        );
        summary.skill_bars += 1;
    }

    for (index, item) in page.query_all(markup::TIMELINE_ITEM).into_iter().enumerate() {
        motion.tween(
            fade_in(item.clone(), Prop::X(timeline_offset(index)), Prop::X(0.0))
                .duration(1.0)
                .ease(Ease::Power3Out)
                .scroll_trigger(item, DEFAULT_START, TriggerPolicy::Replay),
        );
        summary.timeline_items += 1;
    }

    for card in page.query_all(markup::EDUCATION_CARD) {
        motion.tween(
            fade_in(card.clone(), Prop::Y(50.0), Prop::Y(0.0))
                .duration(0.8)
                .ease(Ease::Power3Out)
                .scroll_trigger(card, DEFAULT_START, TriggerPolicy::Replay),
        );
        summary.education_cards += 1;
    }

    for (index, item) in page.query_all(markup::CONTACT_ITEM).into_iter().enumerate() {
        motion.tween(
            fade_in(item.clone(), Prop::X(-30.0), Prop::X(0.0))
                .duration(0.6)
                .delay(contact_item_delay(index))
                .ease(Ease::Power3Out)
                .scroll_trigger(item, LATE_START, TriggerPolicy::Replay),
        );
        summary.contact_items += 1;
    }

    let features = page.query_all(markup::FEATURE_ITEM);
    if let Some(first) = features.first().cloned() {
        summary.feature_items = features.len();
        motion.tween(
            Tween::from_to(
                features,
                vec![Prop::Opacity(0.0), Prop::X(-20.0)],
                vec![Prop::Opacity(1.0), Prop::X(0.0)],
            )
            .duration(0.5)
            .stagger(0.1)
            .ease(Ease::Power3Out)
            .scroll_trigger(first, DEFAULT_START, TriggerPolicy::Replay),
        );
    }

    let tags = page.query_all(markup::SKILL_TAG);
    if let Some(first) = tags.first().cloned() {
        summary.skill_tags = tags.len();
        motion.tween(
            Tween::from_to(
                tags,
                vec![Prop::Opacity(0.0), Prop::Scale(0.8)],
                vec![Prop::Opacity(1.0), Prop::Scale(1.0)],
            )
            .duration(0.4)
            .stagger(0.05)
            .ease(Ease::BackOut(1.7))
            .scroll_trigger(first, LATE_START, TriggerPolicy::Replay),
        );
    }

    if let Some(brand) = page.query(markup::FOOTER_BRAND) {
        let trigger = page.query(markup::FOOTER).unwrap_or_else(|| brand.clone());
        motion.tween(
            fade_in(brand, Prop::Y(30.0), Prop::Y(0.0))
                .duration(0.8)
                .ease(Ease::Power3Out)
                .scroll_trigger(trigger, LATE_START, TriggerPolicy::Replay),
        );
        summary.footer_brand = true;
    }

    summary
}

/// Zooms a project card's image while the pointer is over the card.
pub struct ProjectHover<P: Page, M> {
    motion: M,
    cards: Vec<(P::Node, Option<P::Node>)>,
}

impl<P: Page, M: Motion<P::Node>> ProjectHover<P, M> {
    pub fn mount(page: &P, motion: M) -> Self {
        let cards = page
            .query_all(markup::PROJECT_CARD)
            .into_iter()
            .map(|card| {
                let image = page.query_within(&card, markup::PROJECT_IMAGE);
                (card, image)
            })
            .collect();
        Self { motion, cards }
    }

    pub fn cards(&self) -> impl Iterator<Item = &P::Node> {
        self.cards.iter().map(|(card, _)| card)
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn on_enter(&self, index: usize) {
        self.zoom(index, HOVER_SCALE);
    }

    pub fn on_leave(&self, index: usize) {
        self.zoom(index, 1.0);
    }

    fn zoom(&self, index: usize, scale: f64) {
        let Some((_, Some(image))) = self.cards.get(index) else {
            return;
        };
        self.motion.tween(
            Tween::to(vec![image.clone()], vec![Prop::Scale(scale)])
                .duration(HOVER_SECONDS)
                .ease(Ease::Power2Out),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::PORTFOLIO;
    use crate::memory::{MemoryPage, NodeRef};
    use crate::motion::Playback;
    use crate::recording::RecordingMotion;

    fn mount(markup: &str) -> (MemoryPage, RecordingMotion<NodeRef>, RevealSummary) {
        let page = MemoryPage::parse(markup);
        let motion = RecordingMotion::new();
        let summary = mount_reveals(&page, &motion);
        (page, motion, summary)
    }

    #[test]
    fn every_group_in_the_markup_is_registered_once() {
        let (_page, motion, summary) = mount(PORTFOLIO);

        assert_eq!(
            summary,
            RevealSummary {
                reveal_blocks: 3,
                skill_bars: 2,
                timeline_items: 3,
                education_cards: 1,
                contact_items: 3,
                feature_items: 2,
                skill_tags: 3,
                footer_brand: true,
            }
        );
        // per-element groups plus one batched tween each for features, tags and footer
        assert_eq!(motion.tween_count(), 3 + 2 + 3 + 1 + 3 + 1 + 1 + 1);
    }

    #[test]
    fn skill_bars_grow_to_their_data_width() {
        let (page, motion, _) = mount(PORTFOLIO);
        let bar = page.query_all(".skill-progress")[1];
        let index = motion
            .position(|record| record.targets_node(&bar))
            .expect("bar tween");

        let record = motion.record(index);
        assert_eq!(record.from, vec![Prop::Width("0%".to_string())]);
        assert_eq!(record.to, vec![Prop::Width("75%".to_string())]);
        assert_eq!(record.timing.duration, 1.5);
    }

    #[test]
    fn timeline_items_alternate_sides() {
        let (page, motion, _) = mount(PORTFOLIO);
        let items = page.query_all(".timeline-item");

        let starts: Vec<Prop> = items
            .iter()
            .map(|item| {
                let index = motion.position(|record| record.targets_node(item)).expect("tween");
                motion.record(index).from[1].clone()
            })
            .collect();
        assert_eq!(starts, vec![Prop::X(50.0), Prop::X(-50.0), Prop::X(50.0)]);
    }

    #[test]
    fn contact_items_are_delayed_by_index_and_start_late() {
        let (page, motion, _) = mount(PORTFOLIO);
        let items = page.query_all(".contact-item");

        for (expected_index, item) in items.iter().enumerate() {
            let index = motion.position(|record| record.targets_node(item)).expect("tween");
            let record = motion.record(index);
            assert_eq!(record.timing.delay, contact_item_delay(expected_index));
            assert_eq!(record.trigger.expect("trigger").start(), "top 90%");
        }
        assert_eq!(contact_item_delay(2), 0.2);
    }

    #[test]
    fn batched_groups_trigger_on_their_first_element() {
        let (page, motion, _) = mount(PORTFOLIO);
        let first_tag = page.query(".skill-tag").expect("tag");
        let index = motion
            .position(|record| record.timing.ease == Ease::BackOut(1.7))
            .expect("tag tween");

        let record = motion.record(index);
        assert_eq!(record.timing.stagger, 0.05);
        assert_eq!(record.trigger.expect("trigger").trigger, first_tag);
    }

    #[test]
    fn footer_brand_is_triggered_by_the_footer() {
        let (page, motion, _) = mount(PORTFOLIO);
        let brand = page.query(".footer-brand").expect("brand");
        let footer = page.query(".footer").expect("footer");
        let index = motion.position(|record| record.targets_node(&brand)).expect("tween");

        let trigger = motion.record(index).trigger.expect("trigger");
        assert_eq!(trigger.trigger, footer);
        assert_eq!(trigger.policy, TriggerPolicy::Replay);
    }

    #[test]
    fn reveal_replays_after_scrolling_back_above_trigger() {
        let (page, motion, _) = mount(PORTFOLIO);
        let block = page.query_all(".gsap-reveal")[2];
        let index = motion.position(|record| record.targets_node(&block)).expect("tween");

        assert_eq!(motion.enter(index), Some(Playback::Play));
        assert_eq!(motion.leave_back(index), Some(Playback::Reverse));
        assert_eq!(motion.enter(index), Some(Playback::Play));
        assert_eq!(motion.record(index).plays, 2);
    }

    #[test]
    fn absent_optional_groups_register_nothing() {
        let (_page, motion, summary) = mount(r#"<nav class="navbar"></nav>"#);
        assert_eq!(summary, RevealSummary::default());
        assert_eq!(motion.tween_count(), 0);
    }

    #[test]
    fn hover_zooms_card_image_in_and_out() {
        let page = MemoryPage::parse(PORTFOLIO);
        let motion = RecordingMotion::<NodeRef>::new();
        let hover = ProjectHover::mount(&page, motion.clone());
        let image = page.query(".project-image img").expect("image");
        assert_eq!(hover.card_count(), 2);

        hover.on_enter(0);
        hover.on_leave(0);
        let scales: Vec<Vec<Prop>> = motion.records().into_iter().map(|record| record.to).collect();
        assert_eq!(scales, vec![vec![Prop::Scale(1.1)], vec![Prop::Scale(1.0)]]);
        assert!(motion.record(0).targets_node(&image));
        assert_eq!(motion.record(1).timing.duration, 0.6);

        // second card has no image
        hover.on_enter(1);
        assert_eq!(motion.tween_count(), 2);
    }
}
