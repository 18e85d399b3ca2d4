pub mod account;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod render;
pub mod state;

pub use account::Session;
pub use coordinator::CommentThread;
pub use error::{AccountError, SubmitError};
pub use state::AppState;
