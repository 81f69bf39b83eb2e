use std::rc::Rc;

use yew::prelude::*;

use crate::config::{HEADER_SCROLLED_AT, MOBILE_BREAKPOINT};

use super::sections::Section;

/// Page-wide UI flags, owned by the header through a reducer.
#[derive(Clone, Debug, PartialEq)]
pub struct UiState {
    pub menu_open: bool,
    pub active_section: Section,
    pub header_scrolled: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            menu_open: false,
            active_section: Section::Home,
            header_scrolled: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum UiAction {
    ToggleMenu,
    CloseMenu,
    /// A scroll frame ran. `section` is `None` when no section has been reached yet.
    Scrolled { y: f64, section: Option<Section> },
    /// Debounced window resize.
    Resized { width: f64 },
    EscapePressed,
}

impl Reducible for UiState {
    type Action = UiAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            UiAction::ToggleMenu => UiState {
                menu_open: !self.menu_open,
                ..(*self).clone()
            },
            UiAction::CloseMenu | UiAction::EscapePressed if self.menu_open => UiState {
                menu_open: false,
                ..(*self).clone()
            },
            UiAction::Resized { width } if self.menu_open && width > MOBILE_BREAKPOINT => UiState {
                menu_open: false,
                ..(*self).clone()
            },
            UiAction::Scrolled { y, section } => UiState {
                header_scrolled: y > HEADER_SCROLLED_AT,
                active_section: section.unwrap_or(self.active_section),
                ..(*self).clone()
            },
            _ => return self,
        };
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}
