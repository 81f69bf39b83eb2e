use std::rc::Rc;

use yew::prelude::*;

use crate::config::SUBMIT_RESET_DELAY_MS;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

/// Where a submission is in its lifecycle. Anything but `Idle` locks the button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Sending,
    Sent,
    Failed,
}

/// What the submit button shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAffordance {
    Default,
    Loading,
    Success,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactState {
    pub fields: ContactFields,
    pub phase: SubmitPhase,
}

impl Default for ContactState {
    fn default() -> Self {
        Self {
            fields: ContactFields::default(),
            phase: SubmitPhase::Idle,
        }
    }
}

impl ContactState {
    pub fn affordance(&self) -> ButtonAffordance {
        match self.phase {
            SubmitPhase::Sending => ButtonAffordance::Loading,
            SubmitPhase::Sent => ButtonAffordance::Success,
            SubmitPhase::Idle | SubmitPhase::Failed => ButtonAffordance::Default,
        }
    }

    pub fn button_disabled(&self) -> bool {
        self.phase != SubmitPhase::Idle
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContactAction {
    Edit(Field, String),
    Submit,
    Delivered,
    Failed,
    /// The post-resolution cool-down ran out.
    Reset,
}

impl Reducible for ContactState {
    type Action = ContactAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ContactAction::Edit(field, value) => {
                let slot = match field {
                    Field::Name => &mut next.fields.name,
                    Field::Email => &mut next.fields.email,
                    Field::Message => &mut next.fields.message,
                };
                *slot = value;
            }
            ContactAction::Submit if self.phase == SubmitPhase::Idle => {
                next.phase = SubmitPhase::Sending;
            }
            ContactAction::Delivered if self.phase == SubmitPhase::Sending => {
                next.phase = SubmitPhase::Sent;
                next.fields = ContactFields::default();
            }
            ContactAction::Failed if self.phase == SubmitPhase::Sending => {
                next.phase = SubmitPhase::Failed;
            }
            ContactAction::Reset
                if matches!(self.phase, SubmitPhase::Sent | SubmitPhase::Failed) =>
            {
                next.phase = SubmitPhase::Idle;
            }
            _ => return self,
        }
        Rc::new(next)
    }
}

/// Follow-up actions once delivery resolves, as `(delay_ms, action)` pairs:
/// the outcome right away, then the reset after the cool-down either way.
pub fn resolution_plan(delivered: bool) -> [(u32, ContactAction); 2] {
    let outcome = if delivered {
        ContactAction::Delivered
    } else {
        ContactAction::Failed
    };
    [(0, outcome), (SUBMIT_RESET_DELAY_MS, ContactAction::Reset)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(state: ContactState, actions: impl IntoIterator<Item = ContactAction>) -> ContactState {
        actions
            .into_iter()
            .fold(Rc::new(state), |state, action| state.reduce(action))
            .as_ref()
            .clone()
    }

    fn filled() -> ContactState {
        run(
            ContactState::default(),
            [
                ContactAction::Edit(Field::Name, "Ada".into()),
                ContactAction::Edit(Field::Email, "ada@example.com".into()),
                ContactAction::Edit(Field::Message, "Hello".into()),
            ],
        )
    }

    #[test]
    fn submit_shows_loading_and_locks_the_button() {
        let state = run(filled(), [ContactAction::Submit]);
        assert_eq!(state.affordance(), ButtonAffordance::Loading);
        assert!(state.button_disabled());
        assert_eq!(state.fields.name, "Ada");
    }

    #[test]
    fn success_clears_fields_and_resets_after_cool_down() {
        let plan = resolution_plan(true);
        assert_eq!(plan[0], (0, ContactAction::Delivered));
        assert_eq!(plan[1], (3_000, ContactAction::Reset));

        let sent = run(filled(), [ContactAction::Submit, plan[0].1.clone()]);
        assert_eq!(sent.affordance(), ButtonAffordance::Success);
        assert_eq!(sent.fields, ContactFields::default());
        assert!(sent.button_disabled());

        let reset = run(sent, [plan[1].1.clone()]);
        assert_eq!(reset.affordance(), ButtonAffordance::Default);
        assert!(!reset.button_disabled());
    }

    #[test]
    fn failure_restores_default_look_immediately_but_stays_locked() {
        let plan = resolution_plan(false);
        assert_eq!(plan[0], (0, ContactAction::Failed));

        let failed = run(filled(), [ContactAction::Submit, plan[0].1.clone()]);
        assert_eq!(failed.affordance(), ButtonAffordance::Default);
        assert!(failed.button_disabled());
        assert_eq!(failed.fields.message, "Hello");

        let reset = run(failed, [plan[1].1.clone()]);
        assert_eq!(reset.phase, SubmitPhase::Idle);
    }

    #[test]
    fn double_submit_is_ignored() {
        let once = Rc::new(run(filled(), [ContactAction::Submit]));
        let twice = once.clone().reduce(ContactAction::Submit);
        assert!(Rc::ptr_eq(&once, &twice));
    }

    #[test]
    fn stray_outcomes_do_nothing_while_idle() {
        let idle = filled();
        assert_eq!(run(idle.clone(), [ContactAction::Delivered]), idle);
        assert_eq!(run(idle.clone(), [ContactAction::Reset]), idle);
    }
}
