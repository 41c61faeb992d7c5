use crate::domain::w001_watch_party::ui::details::WatchPartyView;
use crate::shared::config::{load_config, AppConfig};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Provide the web3 configuration to the whole app via context.
    let config = load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });
    provide_context(config);

    view! {
        <WatchPartyView />
    }
}
