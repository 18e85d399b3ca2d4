use adapter::{ApiError, CommentBackend};
use domain::thread::find_comment;
use domain::{CommentId, CommentRecord, CommentScreen, CurrentUser, PostId, ThreadEvent};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

use crate::error::SubmitError;

pub struct CommentThread<B> {
    backend: B,
    screen: Mutex<CommentScreen>,
}

impl<B: CommentBackend> CommentThread<B> {
    pub fn new(backend: B, post_id: PostId) -> Self {
        Self {
            backend,
            screen: Mutex::new(CommentScreen::new(post_id)),
        }
    }

    // 锁不能跨 await 持有
    fn screen(&self) -> MutexGuard<'_, CommentScreen> {
        self.screen.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> CommentScreen {
        self.screen().clone()
    }

    pub fn post_id(&self) -> PostId {
        self.screen().post_id()
    }

    pub fn open(&self, post_id: PostId) {
        self.screen().open(post_id);
    }

    pub fn reply_to(&self, comment: &CommentRecord) {
        self.screen().reply_to(comment);
    }

    // 目标不在已加载的列表里时返回 false
    pub fn reply_to_id(&self, id: CommentId) -> bool {
        let mut screen = self.screen();
        let target = screen
            .threads()
            .loaded()
            .and_then(|threads| find_comment(threads, id))
            .cloned();
        match target {
            Some(comment) => {
                screen.reply_to(&comment);
                true
            }
            None => false,
        }
    }

    pub fn cancel_reply(&self) {
        self.screen().cancel_reply();
    }

    pub fn set_draft(&self, content: &str) {
        self.screen().set_draft(content);
    }

    pub async fn refresh(&self) -> Result<(), ApiError> {
        let post_id = {
            let mut screen = self.screen();
            let post_id = screen.post_id();
            screen.apply(ThreadEvent::FetchStarted { post_id });
            post_id
        };

        let (event, outcome) = match self.backend.list_comments(post_id).await {
            Ok(comments) => {
                debug!("Fetched {} comment(s) for blog {}", comments.len(), post_id);
                (ThreadEvent::FetchSucceeded { post_id, comments }, Ok(()))
            }
            Err(e) => {
                warn!("Failed to fetch comments for blog {}: {}", post_id, e);
                let reason = e.to_string();
                (ThreadEvent::FetchFailed { post_id, reason }, Err(e))
            }
        };

        if !self.screen().apply(event) {
            debug!("Discarding stale comments of blog {}", post_id);
        }
        outcome
    }

    /// Posts `content`, replying to the selected comment if any. On success
    /// the reply target and draft are cleared and the thread is reloaded.
    pub async fn submit(
        &self,
        content: &str,
        user: Option<&CurrentUser>,
    ) -> Result<(), SubmitError> {
        let payload = self.screen().begin_submit(content, user)?;
        let post_id = payload.post_id;

        let result = self.backend.post_comment(&payload).await;
        let reload = self.screen().finish_submit(post_id, result.is_ok());

        if let Err(e) = result {
            warn!("Failed to post comment on blog {}: {}", post_id, e);
            return Err(SubmitError::Transport(e));
        }
        if reload {
            // 评论已发出，刷新失败只影响显示
            if let Err(e) = self.refresh().await {
                warn!("Reload after posting on blog {} failed: {}", post_id, e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use domain::{NewComment, ReplyContext, ScreenState, UserId, ValidationError};
    use std::sync::Arc;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct FakeBackend {
        comments: Mutex<Vec<CommentRecord>>,
        posted: Mutex<Vec<NewComment>>,
        fetched: Mutex<Vec<PostId>>,
        fail_posts: bool,
        post_gate: Option<Arc<Notify>>,
        fetch_gate: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl CommentBackend for FakeBackend {
        async fn list_comments(&self, post_id: PostId) -> Result<Vec<CommentRecord>, ApiError> {
            self.fetched.lock().unwrap().push(post_id);
            if let Some(gate) = &self.fetch_gate {
                gate.notified().await;
            }
            Ok(self
                .comments
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.post_id == post_id)
                .cloned()
                .collect())
        }

        async fn post_comment(&self, comment: &NewComment) -> Result<(), ApiError> {
            if let Some(gate) = &self.post_gate {
                gate.notified().await;
            }
            if self.fail_posts {
                return Err(ApiError::Status {
                    status: 502,
                    message: "bad gateway".into(),
                });
            }
            self.posted.lock().unwrap().push(comment.clone());
            let mut comments = self.comments.lock().unwrap();
            let id = CommentId(100 + comments.len() as i64);
            comments.push(CommentRecord {
                id,
                post_id: comment.post_id,
                author_id: comment.author_id.clone(),
                body: comment.content.clone(),
                parent_id: comment.parent_id,
                reply_target_user_id: comment.reply_target_user_id.clone(),
                reply_target_nickname: comment.reply_target_nickname.clone(),
                author_nickname: "me".into(),
                created_at: None,
            });
            Ok(())
        }
    }

    fn record(id: i64, post: i64, parent: Option<i64>, author: &str, nick: &str) -> CommentRecord {
        CommentRecord {
            id: CommentId(id),
            post_id: PostId(post),
            author_id: UserId::new(author),
            body: format!("comment {}", id),
            parent_id: parent.map(CommentId),
            reply_target_user_id: None,
            reply_target_nickname: None,
            author_nickname: nick.into(),
            created_at: None,
        }
    }

    fn user() -> CurrentUser {
        CurrentUser::new(UserId::new("u1"))
    }

    fn seeded() -> FakeBackend {
        let backend = FakeBackend::default();
        *backend.comments.lock().unwrap() = vec![
            record(7, 1, None, "u9", "Bob"),
            record(8, 1, Some(7), "u3", "Carol"),
            record(20, 2, None, "u4", "Dan"),
        ];
        backend
    }

    #[tokio::test]
    async fn test_refresh_groups_comments() {
        let thread = CommentThread::new(seeded(), PostId(1));
        assert!(thread.snapshot().threads().is_loading());

        thread.refresh().await.unwrap();

        let screen = thread.snapshot();
        let threads = screen.threads().loaded().unwrap();
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].comment.id, CommentId(7));
        assert_eq!(threads[0].replies[0].id, CommentId(8));
    }

    #[tokio::test]
    async fn test_empty_content_sends_nothing() {
        let thread = CommentThread::new(seeded(), PostId(1));

        let err = thread.submit("", Some(&user())).await.unwrap_err();

        assert!(matches!(
            err,
            SubmitError::Validation(ValidationError::EmptyComment)
        ));
        assert!(!thread.snapshot().pending().in_flight);
        assert!(thread.backend.posted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_requires_user() {
        let thread = CommentThread::new(seeded(), PostId(1));
        let err = thread.submit("hello", None).await.unwrap_err();
        assert!(matches!(err, SubmitError::Unauthenticated));
        assert!(thread.backend.posted.lock().unwrap().is_empty());
        assert_eq!(thread.snapshot().pending().content, "hello");
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_busy() {
        let gate = Arc::new(Notify::new());
        let backend = FakeBackend {
            post_gate: Some(gate.clone()),
            ..seeded()
        };
        let thread = CommentThread::new(backend, PostId(1));
        let me = user();

        let (first, second) = tokio::join!(thread.submit("first", Some(&me)), async {
            let second = thread.submit("second", Some(&me)).await;
            gate.notify_one();
            second
        });

        assert!(first.is_ok());
        assert!(matches!(second, Err(SubmitError::Busy)));
        let posted = thread.backend.posted.lock().unwrap();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].content, "first");
    }

    #[tokio::test]
    async fn test_success_resets_and_reloads() {
        let thread = CommentThread::new(seeded(), PostId(1));
        thread.refresh().await.unwrap();
        assert!(thread.reply_to_id(CommentId(7)));
        thread.set_draft("thanks Bob");

        thread.submit("thanks Bob", Some(&user())).await.unwrap();

        let screen = thread.snapshot();
        assert_eq!(screen.reply(), &ReplyContext::Idle);
        assert_eq!(screen.pending().content, "");
        assert!(!screen.pending().in_flight);
        assert_eq!(
            *thread.backend.fetched.lock().unwrap(),
            vec![PostId(1), PostId(1)]
        );

        let posted = thread.backend.posted.lock().unwrap();
        assert_eq!(posted[0].parent_id, Some(CommentId(7)));
        assert_eq!(posted[0].reply_target_user_id, Some(UserId::new("u9")));
        assert_eq!(posted[0].reply_target_nickname.as_deref(), Some("Bob"));

        // 新回复来自刷新后的完整列表
        let threads = screen.threads().loaded().unwrap();
        assert_eq!(threads[0].replies.len(), 2);
        assert_eq!(threads[0].replies[1].body, "thanks Bob");
    }

    #[tokio::test]
    async fn test_reply_to_reply_is_stored_under_root() {
        let thread = CommentThread::new(seeded(), PostId(1));
        thread.refresh().await.unwrap();
        assert!(thread.reply_to_id(CommentId(8)));

        thread.submit("agreed", Some(&user())).await.unwrap();

        let posted = thread.backend.posted.lock().unwrap();
        assert_eq!(posted[0].parent_id, Some(CommentId(7)));
        assert_eq!(posted[0].reply_target_nickname.as_deref(), Some("Carol"));
        let screen = thread.snapshot();
        let threads = screen.threads().loaded().unwrap();
        assert_eq!(threads.len(), 1);
        assert_eq!(
            threads[0].replies[1].reply_label().as_deref(),
            Some("reply to Carol:")
        );
    }

    #[tokio::test]
    async fn test_failure_keeps_draft_and_reply() {
        let backend = FakeBackend {
            fail_posts: true,
            ..seeded()
        };
        let thread = CommentThread::new(backend, PostId(1));
        thread.refresh().await.unwrap();
        thread.reply_to_id(CommentId(7));

        let err = thread.submit("retry me", Some(&user())).await.unwrap_err();

        assert!(matches!(err, SubmitError::Transport(_)));
        let screen = thread.snapshot();
        assert_eq!(screen.pending().content, "retry me");
        assert!(!screen.pending().in_flight);
        assert_eq!(screen.reply().target_comment_id(), Some(CommentId(7)));
        // 失败不触发刷新
        assert_eq!(thread.backend.fetched.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reply_to_unknown_comment() {
        let thread = CommentThread::new(seeded(), PostId(1));
        assert!(!thread.reply_to_id(CommentId(7)));
        thread.refresh().await.unwrap();
        assert!(!thread.reply_to_id(CommentId(20)));
        assert!(!thread.snapshot().reply().is_replying());
    }

    #[tokio::test]
    async fn test_cancel_reply() {
        let thread = CommentThread::new(seeded(), PostId(1));
        thread.refresh().await.unwrap();
        thread.reply_to_id(CommentId(7));
        thread.cancel_reply();
        assert_eq!(thread.snapshot().reply(), &ReplyContext::Idle);
    }

    #[tokio::test]
    async fn test_stale_fetch_after_switching_post_is_dropped() {
        let gate = Arc::new(Notify::new());
        let backend = FakeBackend {
            fetch_gate: Some(gate.clone()),
            ..seeded()
        };
        let thread = CommentThread::new(backend, PostId(1));

        let (result, _) = tokio::join!(thread.refresh(), async {
            thread.open(PostId(2));
            gate.notify_one();
        });

        assert!(result.is_ok());
        let screen = thread.snapshot();
        assert_eq!(screen.post_id(), PostId(2));
        assert_eq!(screen.threads(), &ScreenState::Loading);
    }
}
