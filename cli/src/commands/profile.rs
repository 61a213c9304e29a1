//! Profile commands.

use super::load_image;
use crate::app::App;
use crate::output::OutputFormat;
use anyhow::Result;
use api_client::validation;
use mutation_dispatch::MutationKind;
use std::path::Path;

/// Replace the profile photo.
pub async fn update_photo(app: &App, path: &Path, _format: &OutputFormat) -> Result<()> {
    let image = load_image(path)?;

    let api = app.api.clone();
    // Failures are surfaced through the notifier.
    let _ = app
        .mutations
        .run(MutationKind::UpdatePhoto, async move {
            api.upload_photo(image).await
        })
        .await;

    Ok(())
}

/// Change the account password. Prompts for both passwords without echo.
pub async fn change_password(app: &App, _format: &OutputFormat) -> Result<()> {
    let old_password = rpassword::prompt_password("Current password: ")?;
    let new_password = rpassword::prompt_password("New password: ")?;

    validation::validate_password_change(&old_password, &new_password)?;

    let api = app.api.clone();
    let _ = app
        .mutations
        .run(MutationKind::ChangePassword, async move {
            api.change_password(&old_password, &new_password).await
        })
        .await;

    Ok(())
}
