//! Account panel: asks the wallet for accounts and publishes them upward

mod model;
mod view;

pub use view::AccountPanel;
