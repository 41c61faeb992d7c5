use leptos::prelude::*;

/// PageHeader component - title, live status line and an optional badge
#[component]
pub fn PageHeader(
    /// Page title (required)
    #[prop(into)]
    title: String,

    /// Status line under the title (reactive)
    #[prop(into)]
    status: Signal<String>,

    /// Badge shown next to the title when set
    #[prop(optional, into)]
    badge: MaybeProp<String>,
) -> impl IntoView {
    view! {
        <div class="page-header">
            <div class="page-header__content">
                <div class="page-header__text">
                    <h1 class="page-header__title">
                        {title}
                        {move || badge.get().map(|b| view! {
                            <span class="badge badge--primary">{b}</span>
                        })}
                    </h1>
                    <div class="page-header__subtitle">{move || status.get()}</div>
                </div>
            </div>
        </div>
    }
}
