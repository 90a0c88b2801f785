//! API endpoint modules.

mod account;
mod search;

pub use account::AccountApi;
pub use search::SearchApi;
