mod common;
mod drivers;
mod error;
mod traits;

pub use drivers::http::{HttpConfig, HttpDriver};
pub use error::ApiError;
pub use traits::{AccountBackend, BlogBackend, CommentBackend};
