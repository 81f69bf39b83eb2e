use crate::config::SECTION_ACTIVATION_OFFSET;

/// The page sections the navigation links point at, in document order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Home,
    Features,
    Demo,
    About,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::Features,
        Section::Demo,
        Section::About,
        Section::Contact,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Features => "features",
            Section::Demo => "demo",
            Section::About => "about",
            Section::Contact => "contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Features => "Features",
            Section::Demo => "Demo",
            Section::About => "About",
            Section::Contact => "Contact",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// Wraps around from the last section to the first.
    pub fn next(self) -> Section {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Section {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Section the reader is currently in: the last one, in document order, whose
/// top is within 100px of the scroll position. Sections missing from the page
/// (`None` offset) are skipped.
pub fn active_section(scroll_y: f64, offsets: &[(Section, Option<f64>)]) -> Option<Section> {
    offsets
        .iter()
        .rev()
        .find(|(_, top)| top.is_some_and(|top| scroll_y >= top - SECTION_ACTIVATION_OFFSET))
        .map(|(section, _)| *section)
}

/// Section an arrow key moves to from `current`, if the key navigates at all.
pub fn section_for_key(key: &str, current: Section) -> Option<Section> {
    match key {
        "ArrowDown" | "ArrowRight" => Some(current.next()),
        "ArrowUp" | "ArrowLeft" => Some(current.prev()),
        _ => None,
    }
}
