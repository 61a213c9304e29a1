//! Comment commands.

use crate::app::App;
use crate::output::OutputFormat;
use anyhow::Result;
use api_client::validation;
use mutation_dispatch::MutationKind;

/// Add a comment to a post.
pub async fn comment_add(
    app: &App,
    post_id: &str,
    content: &str,
    _format: &OutputFormat,
) -> Result<()> {
    validation::validate_comment_content(content)?;

    let api = app.api.clone();
    let post_id = post_id.to_string();
    let content = content.to_string();
    // Failures are surfaced through the notifier.
    let _ = app
        .mutations
        .run(MutationKind::CreateComment, async move {
            api.create_comment(&post_id, &content).await
        })
        .await;

    Ok(())
}

/// Update a comment.
pub async fn comment_update(
    app: &App,
    comment_id: &str,
    content: &str,
    _format: &OutputFormat,
) -> Result<()> {
    validation::validate_comment_content(content)?;

    let api = app.api.clone();
    let comment_id = comment_id.to_string();
    let content = content.to_string();
    let _ = app
        .mutations
        .run(MutationKind::UpdateComment, async move {
            api.update_comment(&comment_id, &content).await
        })
        .await;

    Ok(())
}

/// Delete a comment.
pub async fn comment_delete(app: &App, comment_id: &str, _format: &OutputFormat) -> Result<()> {
    let api = app.api.clone();
    let comment_id = comment_id.to_string();
    let _ = app
        .mutations
        .run(MutationKind::DeleteComment, async move {
            api.delete_comment(&comment_id).await
        })
        .await;

    Ok(())
}
