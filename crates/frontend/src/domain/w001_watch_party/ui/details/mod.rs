//! Watch Party screen
//!
//! Same MVVM split as the other detail screens:
//! - model.rs: provider wiring built from config
//! - view_model.rs: ViewModel with commands and state management
//! - view.rs: Leptos component (pure UI)

mod model;
mod view;
mod view_model;

pub use model::WatchPartyServices;
pub use view::WatchPartyView;
pub use view_model::WatchPartyViewModel;
