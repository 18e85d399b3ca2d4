use anyhow::Context;
use std::path::Path;

use client::render::render_user_info;
use client::AppState;

pub async fn login(state: &AppState, email: &str, password: &str) -> anyhow::Result<()> {
    let user = state.session().login(email, password).await?;
    println!("Logged in as {}", user.display_name());
    Ok(())
}

pub async fn register(
    state: &AppState,
    email: &str,
    password: &str,
    confirm: &str,
) -> anyhow::Result<()> {
    let user = state.session().register(email, password, confirm).await?;
    println!("Registered and logged in as {}", user.display_name());
    Ok(())
}

pub async fn logout(state: &AppState) -> anyhow::Result<()> {
    state.session().logout().await?;
    println!("Logged out");
    Ok(())
}

pub async fn whoami(state: &AppState) -> anyhow::Result<()> {
    let session = state.session();
    let user = session.require_user().await?;
    let info = session.user_info().await?;
    print!("{}", render_user_info(&info, &state.driver.avatar_url(&user.id)));
    Ok(())
}

pub async fn password(
    state: &AppState,
    old: &str,
    new: &str,
    confirm: &str,
) -> anyhow::Result<()> {
    state.session().change_password(old, new, confirm).await?;
    println!("Password updated");
    Ok(())
}

pub async fn profile(state: &AppState, nickname: &str, birth_date: &str) -> anyhow::Result<()> {
    state.session().update_profile(nickname, birth_date).await?;
    println!("Profile updated");
    Ok(())
}

pub async fn avatar(state: &AppState, path: &Path) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "avatar".to_string());

    state.session().upload_avatar(&file_name, bytes).await?;
    println!("Avatar uploaded");
    Ok(())
}
