use super::model::WatchPartyServices;
use super::view_model::WatchPartyViewModel;
use crate::domain::w002_account::ui::panel::AccountPanel;
use crate::shared::components::page_header::PageHeader;
use crate::shared::config::AppConfig;
use crate::shared::date_utils::format_requested_at;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DETAIL};
use leptos::prelude::*;

#[component]
pub fn WatchPartyView() -> impl IntoView {
    let config = use_context::<AppConfig>().expect("AppConfig context not found");
    let vm = WatchPartyViewModel::new(WatchPartyServices::from_config(&config.web3));

    // Runs once: the component body is not re-run on state changes.
    vm.bootstrap_command();
    {
        let vm_cleanup = vm.clone();
        on_cleanup(move || vm_cleanup.teardown());
    }

    let vm_status = vm.clone();
    let vm_admin = vm.clone();
    let vm_error = vm.clone();
    let vm_notice = vm.clone();
    let vm_party_value = vm.clone();
    let vm_party_input = vm.clone();
    let vm_request_click = vm.clone();
    let vm_request_disabled = vm.clone();
    let vm_list_click = vm.clone();
    let vm_list_disabled = vm.clone();
    let vm_requests = vm.clone();

    let status = Signal::derive(move || vm_status.phase.get().label());
    let admin_badge = Signal::derive(move || {
        vm_admin
            .is_party_admin
            .get()
            .then(|| "Party admin".to_string())
    });

    view! {
        <PageFrame page_id="w001_watch_party--detail" category=PAGE_CAT_DETAIL>
            <PageHeader title="Watch Party" status=status badge=admin_badge />

            <div class="page__content">
                {move || {
                    vm_error
                        .error
                        .get()
                        .map(|e| view! { <div class="warning-box text-error">{e}</div> })
                }}
                {move || {
                    vm_notice
                        .notice
                        .get()
                        .map(|n| view! { <div class="info-box text-success">{n}</div> })
                }}

                <div class="detail-form">
                    <div class="form__group">
                        <label class="form__label" for="party-id">{"Party ID"}</label>
                        <input
                            class="form__input"
                            type="text"
                            id="party-id"
                            placeholder="Enter Party ID"
                            prop:value=move || vm_party_value.party_id.get().0
                            on:input=move |ev| vm_party_input.set_party_id(event_target_value(&ev))
                        />
                    </div>

                    <div class="modal-actions-top">
                        <button
                            class="button button--primary"
                            on:click=move |_| vm_request_click.request_access_command()
                            disabled=move || vm_request_disabled.is_busy.get()
                        >
                            {icon("key")}
                            "Request Access"
                        </button>
                        <button
                            class="button button--secondary"
                            on:click=move |_| vm_list_click.get_access_requests_command()
                            disabled=move || vm_list_disabled.is_busy.get()
                        >
                            {icon("list")}
                            "Get Access Requests"
                        </button>
                    </div>
                </div>

                {move || {
                    let requests = vm_requests.access_requests.get();
                    if requests.is_empty() {
                        return view! {
                            <div class="text-muted">{"No access requests loaded"}</div>
                        }
                        .into_any();
                    }
                    view! {
                        <table class="table__data">
                            <thead>
                                <tr>
                                    <th>{"Requester"}</th>
                                    <th>{"Party"}</th>
                                    <th>{"Status"}</th>
                                    <th>{"Requested"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {requests
                                    .into_iter()
                                    .map(|r| view! {
                                        <tr>
                                            <td title=r.requester.to_string()>
                                                {r.requester.short()}
                                            </td>
                                            <td>{r.party_id.to_string()}</td>
                                            <td>{r.status.label()}</td>
                                            <td>{format_requested_at(r.requested_at)}</td>
                                        </tr>
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                    }
                    .into_any()
                }}

                <AccountPanel on_accounts_changed=vm.accounts_setter() />
            </div>
        </PageFrame>
    }
}
