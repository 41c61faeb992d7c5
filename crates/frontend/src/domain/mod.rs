pub mod w001_watch_party;
pub mod w002_account;
