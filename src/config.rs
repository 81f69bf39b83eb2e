// EmailJS account the contact form delivers through.
pub const EMAILJS_PUBLIC_KEY: &str = "Gek_oA23TXvZIGTPj";
pub const EMAILJS_SERVICE_ID: &str = "service_4idhiqq";
pub const EMAILJS_TEMPLATE_ID: &str = "template_55e83i4";

pub const PRESENTATION_URL: &str = "/assets/signbridge-presentation.pdf";
pub const DEMO_VIDEO_URL: &str = "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1";

/// Stagger between consecutive feature cards or team members.
pub const CARD_STAGGER_MS: u32 = 150;
/// Delay applied to every demo item except the first one.
pub const DEMO_ITEM_DELAY_MS: u32 = 300;
/// Spacing of the flowchart cascade.
pub const FLOW_STEP_INTERVAL_MS: u32 = 200;

pub const HERO_REVEAL_DELAY_MS: u32 = 500;
pub const SUBMIT_RESET_DELAY_MS: u32 = 3_000;
pub const RESIZE_DEBOUNCE_MS: u32 = 250;

/// Scroll position past which the header switches to its compact look.
pub const HEADER_SCROLLED_AT: f64 = 50.0;
/// A section counts as current once the scroll position is within this many pixels of its top.
pub const SECTION_ACTIVATION_OFFSET: f64 = 100.0;
/// Viewports wider than this never show the mobile menu.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

pub const EMAILJS_SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[cfg(debug_assertions)]
pub fn get_log_level() -> log::Level {
    log::Level::Debug // Local trunk serve
}

#[cfg(not(debug_assertions))]
pub fn get_log_level() -> log::Level {
    log::Level::Info
}
