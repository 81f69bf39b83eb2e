use crate::config::FLOW_STEP_INTERVAL_MS;

use super::engine::ElementState;

/// One animated piece of a flowchart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowPart {
    Step(usize),
    Arrow(usize),
}

/// Cascades the steps and arrows of one flowchart container.
///
/// Step `i` appears at `i * 200ms` and arrow `i` at `(i + 1) * 200ms`, both
/// measured from the moment the container first scrolls into view, so every
/// arrow lands together with the step after it.
#[derive(Clone, Debug)]
pub struct FlowchartSequencer {
    steps: Vec<ElementState>,
    arrows: Vec<ElementState>,
    triggered: bool,
}

impl FlowchartSequencer {
    pub fn new(steps: usize, arrows: usize) -> Self {
        Self {
            steps: vec![ElementState::Pending; steps],
            arrows: vec![ElementState::Pending; arrows],
            triggered: false,
        }
    }

    /// Returns the reveal plan as `(delay_ms, part)` pairs, steps first.
    /// Only the first call produces a plan.
    pub fn start(&mut self) -> Vec<(u32, FlowPart)> {
        if self.triggered {
            return Vec::new();
        }
        self.triggered = true;

        let steps = (0..self.steps.len()).map(|i| (Self::offset(i), FlowPart::Step(i)));
        let arrows = (0..self.arrows.len()).map(|i| (Self::offset(i + 1), FlowPart::Arrow(i)));
        steps.chain(arrows).collect()
    }

    /// Marks `part` visible. Returns false when it already was, or does not exist.
    pub fn reveal(&mut self, part: FlowPart) -> bool {
        let slot = match part {
            FlowPart::Step(i) => self.steps.get_mut(i),
            FlowPart::Arrow(i) => self.arrows.get_mut(i),
        };
        match slot {
            Some(state @ ElementState::Pending) => {
                *state = ElementState::Visible;
                true
            }
            _ => false,
        }
    }

    fn offset(slot: usize) -> u32 {
        u32::try_from(slot)
            .unwrap_or(u32::MAX)
            .saturating_mul(FLOW_STEP_INTERVAL_MS)
    }
}

#[cfg(test)]
impl FlowchartSequencer {
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    pub fn state(&self, part: FlowPart) -> Option<ElementState> {
        match part {
            FlowPart::Step(i) => self.steps.get(i).copied(),
            FlowPart::Arrow(i) => self.arrows.get(i).copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_staggers_steps_and_trails_arrows() {
        let mut flow = FlowchartSequencer::new(4, 3);
        let plan = flow.start();
        assert_eq!(
            plan,
            vec![
                (0, FlowPart::Step(0)),
                (200, FlowPart::Step(1)),
                (400, FlowPart::Step(2)),
                (600, FlowPart::Step(3)),
                (200, FlowPart::Arrow(0)),
                (400, FlowPart::Arrow(1)),
                (600, FlowPart::Arrow(2)),
            ]
        );
    }

    #[test]
    fn second_start_is_a_no_op() {
        let mut flow = FlowchartSequencer::new(2, 1);
        assert!(!flow.is_triggered());
        assert_eq!(flow.start().len(), 3);
        assert!(flow.is_triggered());
        assert!(flow.start().is_empty());
    }

    #[test]
    fn parts_reveal_once() {
        let mut flow = FlowchartSequencer::new(1, 1);
        assert_eq!(flow.state(FlowPart::Arrow(0)), Some(ElementState::Pending));
        assert!(flow.reveal(FlowPart::Arrow(0)));
        assert!(!flow.reveal(FlowPart::Arrow(0)));
        assert_eq!(flow.state(FlowPart::Arrow(0)), Some(ElementState::Visible));
        assert!(!flow.reveal(FlowPart::Step(5)));
        assert_eq!(flow.state(FlowPart::Step(5)), None);
    }

    #[test]
    fn empty_flowchart_plans_nothing() {
        let mut flow = FlowchartSequencer::new(0, 0);
        assert!(flow.start().is_empty());
        assert!(flow.is_triggered());
    }
}
