mod account;
mod common;
mod credentials;
mod page;
mod search;

pub use account::*;
pub use common::*;
pub use credentials::*;
pub use page::*;
pub use search::*;
