//! Decides which page elements the reveal engine tracks, and how each is timed.

use web_sys::Element;

use super::role::{RevealSpec, Role};

/// What discovery reads off a node.
pub trait RevealCandidate: PartialEq {
    fn classes(&self) -> String;
    fn attribute(&self, name: &str) -> Option<String>;
}

impl RevealCandidate for Element {
    fn classes(&self) -> String {
        self.class_name()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }
}

/// Turns per-selector query results, given in [`Role::ALL`] order, into the
/// registration list.
///
/// Each element is kept once, at its first match. Timing follows the element's
/// own classes, not the selector that found it. The first demo item is the
/// first hit of the demo selector, in document order.
pub fn discover<E>(matches: &[(Role, Vec<E>)]) -> Vec<(E, RevealSpec)>
where
    E: RevealCandidate + Clone,
{
    let first_demo = matches
        .iter()
        .find(|(role, _)| *role == Role::DemoItem)
        .and_then(|(_, elements)| elements.first());

    let mut found: Vec<(E, RevealSpec)> = Vec::new();
    for (found_by, elements) in matches {
        for element in elements {
            if found.iter().any(|(seen, _)| seen == element) {
                continue;
            }
            let is_first_demo = first_demo == Some(element);
            found.push((element.clone(), describe(element, *found_by, is_first_demo)));
        }
    }
    found
}

fn describe<E: RevealCandidate>(element: &E, found_by: Role, first_demo_item: bool) -> RevealSpec {
    let classes = element.classes();
    let role = Role::classify(classes.split_whitespace()).unwrap_or(found_by);
    let raw_ordinal = role
        .ordinal_attribute()
        .and_then(|attr| element.attribute(attr));
    let in_flowchart = classes
        .split_whitespace()
        .any(|c| c == Role::FlowchartContainer.class_name());

    RevealSpec::new(role, raw_ordinal.as_deref(), first_demo_item).with_flowchart(in_flowchart)
}
