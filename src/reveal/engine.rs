//! Scroll reveal state machine.
//!
//! The engine never touches the DOM. It is told when an element intersects the
//! viewport and when a scheduled delay has run out, and answers with
//! [`RevealEffect`]s for the driver to apply.

use std::collections::HashMap;

use log::debug;

use super::flowchart::{FlowPart, FlowchartSequencer};
use super::role::RevealSpec;
use super::scheduler::Scheduler;

/// Index of an element in the order it was registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementState {
    Pending,
    Visible,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerSlot {
    Unset,
    Armed,
    Fired,
}

/// Something that can be made visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealTarget {
    Element(ElementId),
    Flow { container: ElementId, part: FlowPart },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealEffect {
    Reveal(RevealTarget),
    Unobserve(ElementId),
}

#[derive(Debug)]
struct Tracked {
    spec: RevealSpec,
    state: ElementState,
    timer: TimerSlot,
    observed: bool,
}

#[derive(Debug, Default)]
pub struct RevealEngine {
    elements: Vec<Tracked>,
    flowcharts: HashMap<ElementId, FlowchartSequencer>,
}

impl RevealEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element to the observed set. Ids are handed out in registration order.
    pub fn register(&mut self, spec: RevealSpec) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Tracked {
            spec,
            state: ElementState::Pending,
            timer: TimerSlot::Unset,
            observed: true,
        });
        id
    }

    /// Attaches the step and arrow counts of a flowchart container.
    pub fn attach_flowchart(&mut self, container: ElementId, steps: usize, arrows: usize) {
        self.flowcharts
            .insert(container, FlowchartSequencer::new(steps, arrows));
    }

    pub fn tracked_count(&self) -> usize {
        self.elements.len()
    }

    pub fn is_observed(&self, id: ElementId) -> bool {
        self.elements.get(id.0).is_some_and(|tracked| tracked.observed)
    }

    /// Ids still being watched, in registration order.
    pub fn observed(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, tracked)| tracked.observed)
            .map(|(i, _)| ElementId(i))
    }

    /// Feeds one intersection notification into the engine.
    ///
    /// Zero-delay reveals are returned straight away; anything later is handed
    /// to `scheduler`. Notifications for elements that already have a reveal
    /// scheduled (or done) are dropped, as are non-intersecting ones.
    pub fn on_intersect<S>(
        &mut self,
        id: ElementId,
        is_intersecting: bool,
        scheduler: &mut S,
    ) -> Vec<RevealEffect>
    where
        S: Scheduler + ?Sized,
    {
        if !is_intersecting {
            return Vec::new();
        }
        let Some(tracked) = self.elements.get_mut(id.0) else {
            debug!("intersection for unknown element {:?}", id);
            return Vec::new();
        };
        if tracked.timer != TimerSlot::Unset {
            return Vec::new();
        }
        tracked.timer = TimerSlot::Armed;
        let delay = tracked.spec.delay_ms();
        let starts_flowchart = tracked.spec.starts_flowchart;

        let mut effects = Vec::new();
        if starts_flowchart {
            effects.extend(self.start_flowchart(id, scheduler));
        }
        if delay == 0 {
            effects.extend(self.fire(RevealTarget::Element(id)));
        } else {
            debug!("revealing {:?} in {}ms", id, delay);
            scheduler.schedule(delay, RevealTarget::Element(id));
        }
        effects
    }

    /// Completes a reveal whose delay has elapsed.
    pub fn fire(&mut self, target: RevealTarget) -> Vec<RevealEffect> {
        match target {
            RevealTarget::Element(id) => {
                let Some(tracked) = self.elements.get_mut(id.0) else {
                    return Vec::new();
                };
                if tracked.state == ElementState::Visible {
                    return Vec::new();
                }
                tracked.state = ElementState::Visible;
                tracked.timer = TimerSlot::Fired;
                tracked.observed = false;
                vec![RevealEffect::Reveal(target), RevealEffect::Unobserve(id)]
            }
            RevealTarget::Flow { container, part } => {
                let revealed = self
                    .flowcharts
                    .get_mut(&container)
                    .is_some_and(|flow| flow.reveal(part));
                if revealed {
                    vec![RevealEffect::Reveal(target)]
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn start_flowchart<S>(&mut self, container: ElementId, scheduler: &mut S) -> Vec<RevealEffect>
    where
        S: Scheduler + ?Sized,
    {
        let Some(flow) = self.flowcharts.get_mut(&container) else {
            return Vec::new();
        };
        let mut immediate = Vec::new();
        for (delay, part) in flow.start() {
            let target = RevealTarget::Flow { container, part };
            if delay == 0 {
                immediate.push(target);
            } else {
                scheduler.schedule(delay, target);
            }
        }
        immediate
            .into_iter()
            .flat_map(|target| self.fire(target))
            .collect()
    }
}

#[cfg(test)]
impl RevealEngine {
    pub fn state(&self, id: ElementId) -> Option<ElementState> {
        self.elements.get(id.0).map(|tracked| tracked.state)
    }

    pub fn flow_state(&self, container: ElementId, part: FlowPart) -> Option<ElementState> {
        self.flowcharts.get(&container)?.state(part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::role::Role;
    use crate::reveal::scheduler::ManualScheduler;

    fn spec(role: Role, ordinal: Option<&str>) -> RevealSpec {
        RevealSpec::new(role, ordinal, false)
    }

    /// Runs the clock to `at`, feeding every due target back into the engine.
    fn run_until(
        engine: &mut RevealEngine,
        clock: &mut ManualScheduler,
        at: u64,
    ) -> Vec<(u64, RevealEffect)> {
        clock
            .advance_to(at)
            .into_iter()
            .flat_map(|(fired_at, target)| {
                engine
                    .fire(target)
                    .into_iter()
                    .map(move |effect| (fired_at, effect))
            })
            .collect()
    }

    #[test]
    fn plain_element_reveals_immediately_and_unobserves() {
        let mut engine = RevealEngine::new();
        let mut clock = ManualScheduler::new();
        let header = engine.register(spec(Role::SectionHeader, None));

        let effects = engine.on_intersect(header, true, &mut clock);

        assert_eq!(
            effects,
            vec![
                RevealEffect::Reveal(RevealTarget::Element(header)),
                RevealEffect::Unobserve(header),
            ]
        );
        assert_eq!(engine.state(header), Some(ElementState::Visible));
        assert!(!engine.is_observed(header));
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn non_intersecting_events_are_ignored() {
        let mut engine = RevealEngine::new();
        let mut clock = ManualScheduler::new();
        let stats = engine.register(spec(Role::TeamStats, None));

        assert!(engine.on_intersect(stats, false, &mut clock).is_empty());
        assert_eq!(engine.state(stats), Some(ElementState::Pending));
        assert!(engine.is_observed(stats));

        // A later real intersection still works.
        assert_eq!(engine.on_intersect(stats, true, &mut clock).len(), 2);
    }

    #[test]
    fn feature_card_two_reveals_at_300ms_and_unobserves_then() {
        let mut engine = RevealEngine::new();
        let mut clock = ManualScheduler::new();
        let card = engine.register(spec(Role::FeatureCard, Some("2")));

        assert!(engine.on_intersect(card, true, &mut clock).is_empty());
        assert!(run_until(&mut engine, &mut clock, 299).is_empty());
        assert_eq!(engine.state(card), Some(ElementState::Pending));
        assert!(engine.is_observed(card));

        let effects = run_until(&mut engine, &mut clock, 300);
        assert_eq!(
            effects,
            vec![
                (300, RevealEffect::Reveal(RevealTarget::Element(card))),
                (300, RevealEffect::Unobserve(card)),
            ]
        );
        assert_eq!(engine.state(card), Some(ElementState::Visible));
        assert!(!engine.is_observed(card));
    }

    #[test]
    fn team_member_without_ordinal_is_immediate() {
        let mut engine = RevealEngine::new();
        let mut clock = ManualScheduler::new();
        let member = engine.register(spec(Role::TeamMember, Some("oops")));

        assert_eq!(engine.on_intersect(member, true, &mut clock).len(), 2);
        assert_eq!(engine.state(member), Some(ElementState::Visible));
    }

    #[test]
    fn demo_items_after_the_first_wait_300ms() {
        let mut engine = RevealEngine::new();
        let mut clock = ManualScheduler::new();
        let demos: Vec<ElementId> = (0..5)
            .map(|i| engine.register(RevealSpec::new(Role::DemoItem, None, i == 0)))
            .collect();

        let mut immediate = Vec::new();
        for id in &demos {
            immediate.extend(engine.on_intersect(*id, true, &mut clock));
        }
        assert_eq!(
            immediate,
            vec![
                RevealEffect::Reveal(RevealTarget::Element(demos[0])),
                RevealEffect::Unobserve(demos[0]),
            ]
        );

        let revealed: Vec<(u64, RevealTarget)> = run_until(&mut engine, &mut clock, 1_000)
            .into_iter()
            .filter_map(|(at, effect)| match effect {
                RevealEffect::Reveal(target) => Some((at, target)),
                RevealEffect::Unobserve(_) => None,
            })
            .collect();
        let expected: Vec<(u64, RevealTarget)> = demos[1..]
            .iter()
            .map(|id| (300, RevealTarget::Element(*id)))
            .collect();
        assert_eq!(revealed, expected);
    }

    #[test]
    fn repeat_intersection_during_delay_schedules_nothing() {
        let mut engine = RevealEngine::new();
        let mut clock = ManualScheduler::new();
        let card = engine.register(spec(Role::FeatureCard, Some("3")));

        engine.on_intersect(card, true, &mut clock);
        clock.advance_to(100);
        assert!(engine.on_intersect(card, true, &mut clock).is_empty());
        assert_eq!(clock.pending(), 1);

        let effects = run_until(&mut engine, &mut clock, 450);
        assert_eq!(effects.len(), 2);
        assert!(engine.on_intersect(card, true, &mut clock).is_empty());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn visibility_never_regresses() {
        let mut engine = RevealEngine::new();
        let mut clock = ManualScheduler::new();
        let header = engine.register(spec(Role::SectionHeader, None));

        engine.on_intersect(header, true, &mut clock);
        engine.on_intersect(header, false, &mut clock);
        assert!(engine.fire(RevealTarget::Element(header)).is_empty());
        assert_eq!(engine.state(header), Some(ElementState::Visible));
    }

    #[test]
    fn flowchart_cascades_from_its_first_intersection() {
        let mut engine = RevealEngine::new();
        let mut clock = ManualScheduler::new();
        clock.advance_to(1_000);
        let container = engine.register(spec(Role::FlowchartContainer, None));
        engine.attach_flowchart(container, 3, 2);

        let immediate = engine.on_intersect(container, true, &mut clock);
        assert_eq!(
            immediate,
            vec![
                RevealEffect::Reveal(RevealTarget::Flow {
                    container,
                    part: FlowPart::Step(0)
                }),
                RevealEffect::Reveal(RevealTarget::Element(container)),
                RevealEffect::Unobserve(container),
            ]
        );

        let later = run_until(&mut engine, &mut clock, 2_000);
        let flow = |part| RevealEffect::Reveal(RevealTarget::Flow { container, part });
        assert_eq!(
            later,
            vec![
                (1_200, flow(FlowPart::Step(1))),
                (1_200, flow(FlowPart::Arrow(0))),
                (1_400, flow(FlowPart::Step(2))),
                (1_400, flow(FlowPart::Arrow(1))),
            ]
        );
        assert_eq!(
            engine.flow_state(container, FlowPart::Arrow(1)),
            Some(ElementState::Visible)
        );

        assert!(engine.on_intersect(container, true, &mut clock).is_empty());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn flowchart_timers_ignore_other_elements() {
        let mut engine = RevealEngine::new();
        let mut clock = ManualScheduler::new();
        let container = engine.register(spec(Role::FlowchartContainer, None));
        let card = engine.register(spec(Role::FeatureCard, Some("1")));
        engine.attach_flowchart(container, 2, 1);

        engine.on_intersect(card, true, &mut clock);
        clock.advance_to(100);
        engine.on_intersect(container, true, &mut clock);

        let effects = run_until(&mut engine, &mut clock, 300);
        let times: Vec<u64> = effects.iter().map(|(at, _)| *at).collect();
        assert_eq!(times, vec![150, 150, 300, 300]);
    }

    #[test]
    fn observed_lists_only_pending_registrations() {
        let mut engine = RevealEngine::new();
        let mut clock = ManualScheduler::new();
        let a = engine.register(spec(Role::SectionHeader, None));
        let b = engine.register(spec(Role::FeatureCard, Some("1")));
        engine.on_intersect(a, true, &mut clock);

        assert_eq!(engine.tracked_count(), 2);
        assert_eq!(engine.observed().collect::<Vec<_>>(), vec![b]);
        assert_eq!(engine.state(ElementId(9)), None);
        assert!(engine.on_intersect(ElementId(9), true, &mut clock).is_empty());
    }

    #[test]
    fn flowchart_on_a_feature_card_cascades_now_but_reveals_on_the_card_stagger() {
        let mut engine = RevealEngine::new();
        let mut clock = ManualScheduler::new();
        let container = engine.register(spec(Role::FeatureCard, Some("2")).with_flowchart(true));
        engine.attach_flowchart(container, 2, 1);

        let immediate = engine.on_intersect(container, true, &mut clock);
        assert_eq!(
            immediate,
            vec![RevealEffect::Reveal(RevealTarget::Flow {
                container,
                part: FlowPart::Step(0)
            })]
        );
        assert_eq!(engine.state(container), Some(ElementState::Pending));
        assert!(engine.is_observed(container));

        let flow = |part| RevealEffect::Reveal(RevealTarget::Flow { container, part });
        assert_eq!(
            run_until(&mut engine, &mut clock, 300),
            vec![
                (200, flow(FlowPart::Step(1))),
                (200, flow(FlowPart::Arrow(0))),
                (300, RevealEffect::Reveal(RevealTarget::Element(container))),
                (300, RevealEffect::Unobserve(container)),
            ]
        );
    }
}
