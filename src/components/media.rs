use log::debug;
use web_sys::{HtmlIFrameElement, MouseEvent};
use yew::prelude::*;

use crate::config::DEMO_VIDEO_URL;

/// Click-to-load demo video. The iframe stays empty until the placeholder is clicked.
#[function_component(VideoEmbed)]
pub fn video_embed() -> Html {
    let playing = use_state(|| false);

    let onclick = {
        let playing = playing.clone();
        Callback::from(move |_: MouseEvent| playing.set(true))
    };

    html! {
        <div class="video-wrapper">
            <div
                id="video-placeholder"
                class={classes!("video-placeholder", (*playing).then(|| "hidden"))}
                {onclick}
            >
                <span class="play-button">{"▶"}</span>
                <p>{"Watch SignBridge translate signs live"}</p>
            </div>
            <iframe
                id="demo-video"
                class={classes!("demo-video", (!*playing).then(|| "hidden"))}
                src={if *playing { DEMO_VIDEO_URL } else { "" }}
                title="SignBridge demo"
                allow="autoplay; encrypted-media; picture-in-picture"
                allowfullscreen={true}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PresentationProps {
    pub src: AttrValue,
}

/// Embedded slide deck with a button that pops the deck out into its own tab.
#[function_component(PresentationViewer)]
pub fn presentation_viewer(props: &PresentationProps) -> Html {
    let iframe_ref = use_node_ref();

    let open_in_tab = {
        let iframe_ref = iframe_ref.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(iframe) = iframe_ref.cast::<HtmlIFrameElement>() else {
                debug!("Presentation iframe not mounted");
                return;
            };
            // Whatever the frame currently shows, not the initial prop.
            let src = iframe.src();
            if let Some(window) = web_sys::window() {
                let _ = window.open_with_url_and_target(&src, "_blank");
            }
        })
    };

    html! {
        <div class="presentation">
            <iframe
                ref={iframe_ref}
                class="presentation-iframe"
                src={props.src.clone()}
                title="SignBridge presentation"
                allowfullscreen={true}
            />
            <button id="open-ppt-btn" class="presentation-button" onclick={open_in_tab}>
                {"Open presentation in new tab"}
            </button>
        </div>
    }
}
