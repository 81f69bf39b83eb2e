use crate::config::{CARD_STAGGER_MS, DEMO_ITEM_DELAY_MS};

/// The kinds of page element that animate in on scroll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    SectionHeader,
    FlowchartContainer,
    FeatureCard,
    DemoItem,
    TeamMember,
    TeamStats,
}

impl Role {
    /// Discovery order. Elements are registered selector by selector, in this order.
    pub const ALL: [Role; 6] = [
        Role::SectionHeader,
        Role::FlowchartContainer,
        Role::FeatureCard,
        Role::DemoItem,
        Role::TeamMember,
        Role::TeamStats,
    ];

    pub fn class_name(self) -> &'static str {
        match self {
            Role::SectionHeader => "section-header",
            Role::FlowchartContainer => "flowchart-container",
            Role::FeatureCard => "feature-card",
            Role::DemoItem => "demo-item",
            Role::TeamMember => "team-member",
            Role::TeamStats => "team-stats",
        }
    }

    pub fn selector(self) -> String {
        format!(".{}", self.class_name())
    }

    /// Attribute carrying the stagger position, for roles that have one.
    pub fn ordinal_attribute(self) -> Option<&'static str> {
        match self {
            Role::FeatureCard => Some("data-card"),
            Role::TeamMember => Some("data-member"),
            _ => None,
        }
    }

    /// Picks the role that decides timing for an element carrying `classes`.
    ///
    /// An element can match several selectors. Feature card, team member and
    /// demo item timing win in that order; every other role reveals at once.
    /// Whether the element also starts a flowchart is tracked separately, see
    /// [`RevealSpec::starts_flowchart`].
    pub fn classify<'a, I>(classes: I) -> Option<Role>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let classes: Vec<&str> = classes.into_iter().collect();
        let has = |role: Role| classes.iter().any(|c| *c == role.class_name());

        [
            Role::FeatureCard,
            Role::TeamMember,
            Role::DemoItem,
            Role::SectionHeader,
            Role::TeamStats,
            Role::FlowchartContainer,
        ]
        .into_iter()
        .find(|role| has(*role))
    }
}

/// Reads an ordinal attribute the way the page always has: leading digits count,
/// everything after them is ignored, and anything unusable becomes 0.
pub fn parse_ordinal(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return 0;
    };
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 || negative {
        return 0;
    }
    digits[..end].parse().unwrap_or(u32::MAX)
}

/// Everything the delay rules need to know about one observed element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealSpec {
    pub role: Role,
    /// Parsed `data-card`/`data-member` value. Zero for other roles.
    pub ordinal: u32,
    /// Whether this is the first demo item in document order.
    pub first_demo_item: bool,
    /// Set for `.flowchart-container` elements whatever their timing role. The
    /// cascade starts on intersection while the element itself keeps its delay.
    pub starts_flowchart: bool,
}

impl RevealSpec {
    pub fn new(role: Role, raw_ordinal: Option<&str>, first_demo_item: bool) -> Self {
        let ordinal = match role.ordinal_attribute() {
            Some(_) => parse_ordinal(raw_ordinal),
            None => 0,
        };
        Self {
            role,
            ordinal,
            first_demo_item: role == Role::DemoItem && first_demo_item,
            starts_flowchart: role == Role::FlowchartContainer,
        }
    }

    pub fn with_flowchart(mut self, starts_flowchart: bool) -> Self {
        self.starts_flowchart |= starts_flowchart;
        self
    }

    pub fn delay_ms(&self) -> u32 {
        match self.role {
            Role::FeatureCard | Role::TeamMember => self.ordinal.saturating_mul(CARD_STAGGER_MS),
            Role::DemoItem if self.first_demo_item => 0,
            Role::DemoItem => DEMO_ITEM_DELAY_MS,
            Role::FlowchartContainer | Role::SectionHeader | Role::TeamStats => 0,
        }
    }
}
