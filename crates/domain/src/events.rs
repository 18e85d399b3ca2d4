use crate::models::{CommentRecord, PostId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadEvent {
    FetchStarted {
        post_id: PostId,
    },
    FetchSucceeded {
        post_id: PostId,
        comments: Vec<CommentRecord>,
    },
    FetchFailed {
        post_id: PostId,
        reason: String,
    },
}

impl ThreadEvent {
    pub fn post_id(&self) -> PostId {
        match self {
            ThreadEvent::FetchStarted { post_id }
            | ThreadEvent::FetchSucceeded { post_id, .. }
            | ThreadEvent::FetchFailed { post_id, .. } => *post_id,
        }
    }
}
