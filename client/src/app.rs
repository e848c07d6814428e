//! Root application component and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use game::GameState;

use crate::config::ClientConfig;
use crate::net::channel::ChannelHandle;
use crate::pages::game::GamePage;

/// Root application component.
///
/// Provides the game state, the channel handle, and the endpoint config to
/// every child. The channel itself is opened by [`GamePage`] while mounted.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    leptos::logging::log!("api url: {}, socket url: {}", config.api_url, config.socket_url);

    provide_context(config);
    provide_context(RwSignal::new(GameState::default()));
    provide_context(RwSignal::new(ChannelHandle::default()));

    view! {
        <Title text="Guessing Game"/>
        <GamePage/>
    }
}
