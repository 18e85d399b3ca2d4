use adapter::BlogBackend;
use anyhow::Context;
use domain::PostId;

use client::render::{
    render_blog, render_blog_list, render_blog_page, render_compose, render_threads,
};
use client::AppState;

pub async fn list(state: &AppState, page: u32, limit: u32) -> anyhow::Result<()> {
    let page_data = state
        .driver
        .list_blogs(page.max(1), limit)
        .await
        .context("Failed to fetch blogs")?;
    print!("{}", render_blog_page(&page_data, page.max(1), limit));
    Ok(())
}

pub async fn show(state: &AppState, bid: i64) -> anyhow::Result<()> {
    let post_id = PostId(bid);
    let thread = state.comments(post_id);

    // 正文和评论并行拉取；评论失败只影响评论区
    let (blog, _) = tokio::join!(state.driver.get_blog(post_id), thread.refresh());
    let blog = blog.with_context(|| format!("Failed to fetch blog {}", bid))?;

    let screen = thread.snapshot();
    print!("{}", render_blog(&blog));
    println!("\n-- comments --");
    print!("{}", render_threads(screen.threads()));
    print!("{}", render_compose(screen.reply()));
    Ok(())
}

pub async fn publish(state: &AppState, title: &str, content: &str) -> anyhow::Result<()> {
    state.session().publish_blog(title, content).await?;
    println!("Published");
    Ok(())
}

pub async fn mine(state: &AppState) -> anyhow::Result<()> {
    let blogs = state.session().my_blogs().await?;
    print!("{}", render_blog_list(&blogs));
    Ok(())
}
