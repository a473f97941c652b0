pub mod reqid;
pub mod respond;

pub use reqid::*;
pub use respond::*;
