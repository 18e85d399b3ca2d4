use anyhow::bail;
use domain::{CommentId, PostId};

use client::render::{render_compose, render_threads};
use client::AppState;

pub async fn post(
    state: &AppState,
    bid: i64,
    text: &str,
    reply_to: Option<i64>,
) -> anyhow::Result<()> {
    let thread = state.comments(PostId(bid));
    let user = state.session().current_user().await?;

    if let Some(id) = reply_to {
        // 回复目标必须在当前评论列表里
        thread.refresh().await?;
        if !thread.reply_to_id(CommentId(id)) {
            bail!("Comment {} not found on blog {}", id, bid);
        }
        print!("{}", render_compose(thread.snapshot().reply()));
    }

    thread.submit(text, user.as_ref()).await?;

    println!("Comment posted");
    print!("{}", render_threads(thread.snapshot().threads()));
    Ok(())
}
