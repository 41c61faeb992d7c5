use super::model;
use crate::shared::config::AppConfig;
use crate::shared::icons::icon;
use contracts::domain::w002_account::aggregate::AccountList;
use leptos::prelude::*;

#[component]
pub fn AccountPanel(
    /// Receives the discovered accounts, in wallet order
    on_accounts_changed: Callback<AccountList>,
) -> impl IntoView {
    let config = use_context::<AppConfig>().expect("AppConfig context not found");
    let accounts = RwSignal::new(AccountList::default());
    let error = RwSignal::new(None::<String>);
    let is_connecting = RwSignal::new(false);

    let connect = move |_: leptos::ev::MouseEvent| {
        is_connecting.set(true);
        error.set(None);
        let web3 = config.web3.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match model::request_accounts(&web3).await {
                Ok(list) => {
                    log::info!("Wallet returned {} account(s)", list.len());
                    accounts.set(list.clone());
                    on_accounts_changed.run(list);
                }
                Err(e) => {
                    log::error!("Failed to load accounts: {}", e);
                    error.set(Some(format!("Failed to load accounts: {}", e)));
                }
            }
            is_connecting.set(false);
        });
    };

    view! {
        <div class="account-panel">
            <div class="account-panel__header">
                <h3 class="account-panel__title">{"Accounts"}</h3>
                <button
                    class="button button--secondary"
                    on:click=connect
                    disabled=move || is_connecting.get()
                >
                    {icon("wallet")}
                    {move || if is_connecting.get() { "Connecting..." } else { "Connect Wallet" }}
                </button>
            </div>

            {move || error.get().map(|e| view! { <div class="warning-box text-error">{e}</div> })}

            {move || {
                let list = accounts.get();
                if list.is_empty() {
                    view! { <div class="text-muted">{"No accounts connected"}</div> }.into_any()
                } else {
                    view! {
                        <ul class="account-panel__list">
                            {list
                                .iter()
                                .map(|a| view! { <li title=a.to_string()>{a.short()}</li> })
                                .collect_view()}
                        </ul>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
