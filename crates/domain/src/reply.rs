use crate::models::{CommentId, CommentRecord, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyTarget {
    pub comment_id: CommentId,
    pub user_id: UserId,
    pub nickname: String,
    // 新回复挂在这条顶层评论下
    pub thread_root: CommentId,
}

impl From<&CommentRecord> for ReplyTarget {
    fn from(c: &CommentRecord) -> Self {
        Self {
            comment_id: c.id,
            user_id: c.author_id.clone(),
            nickname: c.author_nickname.clone(),
            // 回复的回复也挂在顶层评论下
            thread_root: c.parent_id.unwrap_or(c.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReplyContext {
    #[default]
    Idle,
    Replying(ReplyTarget),
}

impl ReplyContext {
    pub fn reply_to(&mut self, comment: &CommentRecord) {
        *self = ReplyContext::Replying(ReplyTarget::from(comment));
    }

    pub fn cancel(&mut self) {
        *self = ReplyContext::Idle;
    }

    pub fn submitted(&mut self) {
        *self = ReplyContext::Idle;
    }

    pub fn target(&self) -> Option<&ReplyTarget> {
        match self {
            ReplyContext::Idle => None,
            ReplyContext::Replying(target) => Some(target),
        }
    }

    pub fn is_replying(&self) -> bool {
        self.target().is_some()
    }

    pub fn target_comment_id(&self) -> Option<CommentId> {
        self.target().map(|t| t.comment_id)
    }

    pub fn target_user_id(&self) -> Option<&UserId> {
        self.target().map(|t| &t.user_id)
    }

    pub fn target_nickname(&self) -> Option<&str> {
        self.target().map(|t| t.nickname.as_str())
    }

    pub fn placeholder(&self) -> String {
        match self.target() {
            Some(t) if !t.nickname.is_empty() => format!("Reply to {}:", t.nickname),
            _ => "Leave your comments here ...".to_string(),
        }
    }
}
