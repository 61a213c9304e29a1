//! Post commands.

use super::{confirm, load_image};
use crate::app::App;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use api_client::{validation, NewPost, Post, PostUpdate, User};
use mutation_dispatch::MutationKind;
use std::path::Path;

/// List the global feed.
pub async fn posts_list(app: &App, format: &OutputFormat) -> Result<()> {
    let posts = app.feed.posts().await?;
    let me = app.session.current_identity().await;
    render_posts(&posts, me.as_ref(), format)
}

/// List posts authored by one user.
pub async fn posts_by_user(app: &App, user_id: &str, format: &OutputFormat) -> Result<()> {
    let posts = app.feed.user_posts(user_id).await?;
    let me = app.session.current_identity().await;
    render_posts(&posts, me.as_ref(), format)
}

/// Show one post with its comments.
pub async fn post_show(app: &App, post_id: &str, format: &OutputFormat) -> Result<()> {
    let post = app.feed.post(post_id).await?;
    let me = app.session.current_identity().await;

    match format {
        OutputFormat::Json => output::print_json(&post)?,
        OutputFormat::Text => {
            render_post(&post, me.as_ref());
            if post.comments.is_empty() {
                println!("  (no comments)");
            }
            for comment in &post.comments {
                let owner_mark = me
                    .as_ref()
                    .filter(|user| user.owns(&comment.author.id))
                    .map(|_| " (you)")
                    .unwrap_or("");
                println!(
                    "  [{}] {}{}: {}",
                    comment.id, comment.author.name, owner_mark, comment.content
                );
            }
        }
    }

    Ok(())
}

/// Create a post, optionally with an image.
pub async fn post_create(
    app: &App,
    body: &str,
    image: Option<&Path>,
    _format: &OutputFormat,
) -> Result<()> {
    validation::validate_post_body(body)?;

    let post = NewPost {
        body: body.to_string(),
        image: image.map(load_image).transpose()?,
    };

    let api = app.api.clone();
    // Failures are surfaced through the notifier.
    let _ = app
        .mutations
        .run(MutationKind::CreatePost, async move {
            api.create_post(post).await
        })
        .await;

    Ok(())
}

/// Update a post's body and optionally its image.
pub async fn post_update(
    app: &App,
    post_id: &str,
    body: &str,
    image: Option<&Path>,
    _format: &OutputFormat,
) -> Result<()> {
    validation::validate_post_body(body)?;

    let update = PostUpdate {
        body: body.to_string(),
        image: image.map(load_image).transpose()?,
    };

    let api = app.api.clone();
    let id = post_id.to_string();
    let _ = app
        .mutations
        .run(MutationKind::UpdatePost, async move {
            api.update_post(&id, update).await
        })
        .await;

    Ok(())
}

/// Delete a post.
pub async fn post_delete(
    app: &App,
    post_id: &str,
    yes: bool,
    _format: &OutputFormat,
) -> Result<()> {
    if !yes && !confirm(&format!("Delete post {}?", post_id)) {
        println!("Aborted.");
        return Ok(());
    }

    let api = app.api.clone();
    let id = post_id.to_string();
    let _ = app
        .mutations
        .run(MutationKind::DeletePost, async move {
            api.delete_post(&id).await
        })
        .await;

    Ok(())
}

fn render_posts(posts: &[Post], me: Option<&User>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => output::print_json(&posts)?,
        OutputFormat::Text => {
            if posts.is_empty() {
                println!("No posts.");
                return Ok(());
            }
            for post in posts {
                render_post(post, me);
            }
        }
    }
    Ok(())
}

fn render_post(post: &Post, me: Option<&User>) {
    let owner_mark = me
        .filter(|user| user.owns(&post.user.id))
        .map(|_| " (you)")
        .unwrap_or("");

    output::print_divider();
    println!(
        "{} - {}{} - {}",
        post.id,
        post.user.name,
        owner_mark,
        post.created_at.format("%Y-%m-%d %H:%M")
    );
    println!("{}", post.body);
    if let Some(image) = &post.image {
        println!("[image] {}", image);
    }
    if !post.comments.is_empty() {
        println!("({} comments)", post.comments.len());
    }
}
