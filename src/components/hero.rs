use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::config::HERO_REVEAL_DELAY_MS;

#[function_component(HeroCard)]
pub fn hero_card() -> Html {
    let shown = use_state(|| false);

    {
        let shown = shown.clone();
        use_effect_with_deps(
            move |_| {
                let timeout = Timeout::new(HERO_REVEAL_DELAY_MS, move || shown.set(true));
                move || drop(timeout)
            },
            (),
        );
    }

    let style = if *shown {
        "opacity: 1; transform: scale(1);"
    } else {
        "opacity: 0; transform: scale(0.95);"
    };

    html! {
        <div class="hero-card" {style}>
            <div class="hero-card-header">
                <span class="live-dot"></span>
                {"Live captions"}
            </div>
            <p class="hero-card-caption">{"\"Nice to meet you\""}</p>
            <p class="hero-card-meta">{"Recognized from ASL in 0.4s"}</p>
        </div>
    }
}
