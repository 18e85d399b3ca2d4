use domain::{
    Blog, BlogPage, CommentRecord, GroupedComment, ReplyContext, ScreenState, UserInfo,
};
use std::fmt::Write;

const REPLY_INDENT: &str = "    ";

pub fn render_thread(thread: &GroupedComment) -> String {
    let root = &thread.comment;
    let mut out = format!(
        "#{} {}  {}\n{}\n",
        root.id,
        root.author_nickname,
        root.created_label(),
        root.body
    );
    for reply in &thread.replies {
        out.push_str(&render_reply(reply));
    }
    out
}

pub fn render_reply(reply: &CommentRecord) -> String {
    let mut out = format!(
        "{}#{} {}  {}\n{}",
        REPLY_INDENT,
        reply.id,
        reply.author_nickname,
        reply.created_label(),
        REPLY_INDENT
    );
    if let Some(label) = reply.reply_label() {
        out.push_str(&label);
        out.push(' ');
    }
    out.push_str(&reply.body);
    out.push('\n');
    out
}

pub fn render_threads(threads: &ScreenState<Vec<GroupedComment>>) -> String {
    match threads {
        ScreenState::Loading => "Loading comments...\n".to_string(),
        ScreenState::Error(reason) => format!("Failed to load comments: {}\n", reason),
        ScreenState::Loaded(threads) if threads.is_empty() => "No comments yet\n".to_string(),
        ScreenState::Loaded(threads) => threads
            .iter()
            .map(render_thread)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn render_compose(reply: &ReplyContext) -> String {
    format!("[{}]\n", reply.placeholder())
}

pub fn render_blog(blog: &Blog) -> String {
    format!(
        "{}\n{} · {} · {} views\n\n{}\n",
        blog.title,
        blog.author_name(),
        blog.created_label(),
        blog.views,
        blog.content
    )
}

pub fn render_blog_list(blogs: &[Blog]) -> String {
    if blogs.is_empty() {
        return "No blogs\n".to_string();
    }
    let mut out = String::new();
    for blog in blogs {
        let _ = writeln!(
            out,
            "[{}] {}  ({}, {})",
            blog.id,
            blog.title,
            blog.author_name(),
            blog.created_label()
        );
    }
    out
}

pub fn render_blog_page(page: &BlogPage, current: u32, limit: u32) -> String {
    let mut out = render_blog_list(&page.blogs);
    let _ = writeln!(out, "page {}/{}", current, page.total_pages(limit).max(1));
    out
}

pub fn render_user_info(info: &UserInfo, avatar_url: &str) -> String {
    format!(
        "nickname: {}\nemail: {}\nbirth date: {}\navatar: {}\n",
        info.nickname.as_deref().unwrap_or_default(),
        info.email.as_deref().unwrap_or_default(),
        info.birth_date_label(),
        avatar_url
    )
}
