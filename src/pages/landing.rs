use log::{info, warn};
use yew::prelude::*;

use crate::components::contact_form::ContactForm;
use crate::components::hero::HeroCard;
use crate::components::media::{PresentationViewer, VideoEmbed};
use crate::config::PRESENTATION_URL;
use crate::lazy_images::LazyImages;
use crate::reveal::driver::RevealDriver;

const FLOW: [(&str, &str); 4] = [
    ("📷", "Camera captures your hands"),
    ("✋", "Landmarks are extracted per frame"),
    ("🧠", "The model classifies the sign"),
    ("💬", "Captions appear in your call"),
];

const FEATURES: [(&str, &str, &str); 6] = [
    ("⚡", "Real-time recognition", "Signs are recognized frame by frame with no upload step."),
    ("🎥", "Virtual camera", "Captions are composited onto a virtual webcam any meeting app can use."),
    ("📝", "Caption log", "Every session can be saved as a timestamped transcript."),
    ("🔒", "Runs offline", "The model runs on your machine, so video never leaves it."),
    ("🎛", "Adjustable confidence", "Tune how sure the model must be before a word is captioned."),
    ("🖥", "One-click installer", "A single executable with the model bundled in."),
];

const TEAM: [(&str, &str); 4] = [
    ("ML Engineering", "Dataset collection and model training"),
    ("Desktop App", "Capture pipeline and virtual camera"),
    ("Accessibility", "Community testing with Deaf signers"),
    ("Web", "This site and the release pipeline"),
];

#[function_component(Landing)]
pub fn landing() -> Html {
    // The page markup is static, so everything animated can be discovered once after the first render.
    use_effect_with_deps(
        move |_| {
            let document = web_sys::window().and_then(|w| w.document());
            let (reveals, images) = match &document {
                Some(document) => (
                    RevealDriver::attach(document)
                        .map_err(|e| warn!("Scroll reveals disabled: {}", e))
                        .ok(),
                    LazyImages::attach(document)
                        .map_err(|e| warn!("Lazy images disabled: {}", e))
                        .ok(),
                ),
                None => (None, None),
            };
            info!("Landing page wired up");
            move || {
                drop(reveals);
                drop(images);
            }
        },
        (),
    );

    html! {
        <div class="landing-page">
            <style>
                {r#"
                    .landing-page section {
                        padding: 6rem 1.5rem;
                        max-width: 1200px;
                        margin: 0 auto;
                    }
                    .section-header, .feature-card, .demo-item, .team-member, .team-stats,
                    .flowchart-container, .flow-step, .flow-arrow {
                        opacity: 0;
                        transform: translateY(24px);
                        transition: opacity var(--animation-duration, 0.6s) ease,
                                    transform var(--animation-duration, 0.6s) ease;
                    }
                    .flow-arrow {
                        transform: translateX(-12px);
                    }
                    .visible {
                        opacity: 1 !important;
                        transform: none !important;
                    }
                    .section-header {
                        text-align: center;
                        margin-bottom: 3rem;
                    }
                    .hero {
                        min-height: 100vh;
                        display: flex;
                        align-items: center;
                        gap: 3rem;
                    }
                    .hero-card {
                        transition: opacity var(--animation-duration, 0.8s) ease,
                                    transform var(--animation-duration, 0.8s) ease;
                        background: rgba(30, 41, 59, 0.8);
                        border-radius: 20px;
                        padding: 2rem;
                    }
                    .flowchart-container {
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        flex-wrap: wrap;
                        gap: 1rem;
                        margin-bottom: 4rem;
                    }
                    .flow-step {
                        background: rgba(56, 189, 248, 0.1);
                        border: 1px solid rgba(56, 189, 248, 0.3);
                        border-radius: 14px;
                        padding: 1.25rem;
                        max-width: 180px;
                        text-align: center;
                    }
                    .feature-grid, .team-grid {
                        display: grid;
                        grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
                        gap: 1.5rem;
                    }
                    .feature-card, .team-member, .demo-item {
                        background: rgba(30, 41, 59, 0.6);
                        border-radius: 16px;
                        padding: 1.75rem;
                    }
                    .demo-grid {
                        display: flex;
                        flex-direction: column;
                        gap: 2rem;
                    }
                    .demo-video, .presentation-iframe {
                        width: 100%;
                        aspect-ratio: 16 / 9;
                        border: none;
                        border-radius: 12px;
                    }
                    .video-placeholder {
                        aspect-ratio: 16 / 9;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        justify-content: center;
                        cursor: pointer;
                        border-radius: 12px;
                        background: rgba(15, 23, 42, 0.9);
                    }
                    .team-stats {
                        display: flex;
                        justify-content: space-around;
                        margin-top: 3rem;
                        text-align: center;
                    }
                    .gallery img {
                        width: 100%;
                        border-radius: 12px;
                    }
                "#}
            </style>

            <section id="home" class="hero">
                <div class="hero-copy">
                    <h1>{"Sign language, captioned live."}</h1>
                    <p>{"SignBridge watches your signing through any webcam and turns it into captions your video calls can show."}</p>
                    <a href="#contact" class="hero-cta">{"Get early access"}</a>
                </div>
                <HeroCard />
            </section>

            <section id="features">
                <div class="section-header">
                    <h2>{"How it works"}</h2>
                    <p>{"From hand shape to caption in a fraction of a second."}</p>
                </div>
                <div class="flowchart-container">
                    { for FLOW.iter().enumerate().map(|(i, (icon, label))| html! {
                        <>
                            if i > 0 {
                                <div class="flow-arrow">{"→"}</div>
                            }
                            <div class="flow-step">
                                <div class="flow-icon">{*icon}</div>
                                <p>{*label}</p>
                            </div>
                        </>
                    }) }
                </div>
                <div class="feature-grid">
                    { for FEATURES.iter().enumerate().map(|(i, (icon, title, text))| html! {
                        <div class="feature-card" data-card={i.to_string()}>
                            <div class="feature-icon">{*icon}</div>
                            <h3>{*title}</h3>
                            <p>{*text}</p>
                        </div>
                    }) }
                </div>
            </section>

            <section id="demo">
                <div class="section-header">
                    <h2>{"See it in action"}</h2>
                </div>
                <div class="demo-grid">
                    <div class="demo-item">
                        <VideoEmbed />
                    </div>
                    <div class="demo-item">
                        <PresentationViewer src={PRESENTATION_URL} />
                    </div>
                    <div class="demo-item gallery">
                        <img data-src="/assets/signbridge-app.webp" alt="SignBridge desktop app captioning a video call" />
                    </div>
                </div>
            </section>

            <section id="about">
                <div class="section-header">
                    <h2>{"The team"}</h2>
                    <p>{"A small group building accessible tools for everyday calls."}</p>
                </div>
                <div class="team-grid">
                    { for TEAM.iter().enumerate().map(|(i, (role, focus))| html! {
                        <div class="team-member" data-member={i.to_string()}>
                            <h3>{*role}</h3>
                            <p>{*focus}</p>
                        </div>
                    }) }
                </div>
                <div class="team-stats">
                    <div><strong>{"26"}</strong><p>{"Signs recognized"}</p></div>
                    <div><strong>{"30 fps"}</strong><p>{"Capture rate"}</p></div>
                    <div><strong>{"100%"}</strong><p>{"On-device"}</p></div>
                </div>
            </section>

            <section id="contact">
                <div class="section-header">
                    <h2>{"Get in touch"}</h2>
                    <p>{"Questions, pilots, or feedback: we read everything."}</p>
                </div>
                <ContactForm />
            </section>
        </div>
    }
}
