mod commands;
mod error;
mod events;
mod models;
mod reply;
mod screen;
pub mod protocol;
pub mod thread;

pub use commands::{
    check_blog, check_comment, AvatarUpload, Credentials, NewBlog, NewComment, PasswordChange,
    ProfileUpdate, Registration,
};
pub use error::ValidationError;
pub use events::ThreadEvent;
pub use models::{
    format_timestamp, Blog, BlogAuthor, BlogPage, CommentId, CommentRecord, CurrentUser,
    GroupedComment, PostId, UserId, UserInfo,
};
pub use reply::{ReplyContext, ReplyTarget};
pub use screen::{CommentScreen, PendingSubmission, Rejection, ScreenState};
