use crate::commands::{check_comment, NewComment};
use crate::error::ValidationError;
use crate::events::ThreadEvent;
use crate::models::{CommentRecord, CurrentUser, GroupedComment, PostId};
use crate::reply::ReplyContext;
use crate::thread::build_thread;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState<T> {
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> ScreenState<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            ScreenState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PendingSubmission {
    pub content: String,
    pub in_flight: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Validation(ValidationError),
    Unauthenticated,
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentScreen {
    post_id: PostId,
    threads: ScreenState<Vec<GroupedComment>>,
    reply: ReplyContext,
    pending: PendingSubmission,
}

impl CommentScreen {
    pub fn new(post_id: PostId) -> Self {
        Self {
            post_id,
            threads: ScreenState::Loading,
            reply: ReplyContext::Idle,
            pending: PendingSubmission::default(),
        }
    }

    pub fn post_id(&self) -> PostId {
        self.post_id
    }

    pub fn threads(&self) -> &ScreenState<Vec<GroupedComment>> {
        &self.threads
    }

    pub fn reply(&self) -> &ReplyContext {
        &self.reply
    }

    pub fn pending(&self) -> &PendingSubmission {
        &self.pending
    }

    // 回复状态和草稿都属于旧文章
    pub fn open(&mut self, post_id: PostId) {
        if post_id == self.post_id {
            return;
        }
        self.post_id = post_id;
        self.threads = ScreenState::Loading;
        self.reply = ReplyContext::Idle;
        self.pending.content.clear();
    }

    // 其它文章的事件直接丢弃
    pub fn apply(&mut self, event: ThreadEvent) -> bool {
        if event.post_id() != self.post_id {
            return false;
        }
        match event {
            ThreadEvent::FetchStarted { .. } => {
                // 刷新期间保留已加载的列表
                if !matches!(self.threads, ScreenState::Loaded(_)) {
                    self.threads = ScreenState::Loading;
                }
            }
            ThreadEvent::FetchSucceeded { comments, .. } => {
                self.threads = ScreenState::Loaded(build_thread(&comments));
            }
            ThreadEvent::FetchFailed { reason, .. } => {
                if !matches!(self.threads, ScreenState::Loaded(_)) {
                    self.threads = ScreenState::Error(reason);
                }
            }
        }
        true
    }

    pub fn reply_to(&mut self, comment: &CommentRecord) {
        self.reply.reply_to(comment);
    }

    pub fn cancel_reply(&mut self) {
        self.reply.cancel();
    }

    pub fn set_draft(&mut self, content: impl Into<String>) {
        self.pending.content = content.into();
    }

    /// Checks, in order: nothing in flight, non-blank content, a logged-in
    /// user. On success the submission is marked in flight and the payload
    /// is returned.
    pub fn begin_submit(
        &mut self,
        content: &str,
        user: Option<&CurrentUser>,
    ) -> Result<NewComment, Rejection> {
        if self.pending.in_flight {
            return Err(Rejection::Busy);
        }
        self.pending.content = content.to_string();
        check_comment(content).map_err(Rejection::Validation)?;
        let user = user.ok_or(Rejection::Unauthenticated)?;

        self.pending.in_flight = true;
        Ok(NewComment::new(
            self.post_id,
            content,
            user.id.clone(),
            &self.reply,
        ))
    }

    // 返回是否需要刷新
    pub fn finish_submit(&mut self, post_id: PostId, succeeded: bool) -> bool {
        self.pending.in_flight = false;
        if !succeeded || post_id != self.post_id {
            return false;
        }
        self.reply.submitted();
        self.pending.content.clear();
        true
    }
}
