//! CLI command implementations.

mod auth;
mod comments;
mod posts;
mod profile;

pub use auth::{login, logout, signup, whoami};
pub use comments::{comment_add, comment_delete, comment_update};
pub use posts::{post_create, post_delete, post_show, post_update, posts_by_user, posts_list};
pub use profile::{change_password, update_photo};

use api_client::ImageUpload;
use std::io::{self, Write};
use std::path::Path;

/// Ask the user for confirmation.
pub fn confirm(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    io::stdout().flush().ok();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return false;
    }

    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Read a line from stdin after a prompt.
pub fn prompt_line(prompt: &str) -> anyhow::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Load an image from disk into an upload payload, guessing the MIME
/// type from the extension.
pub fn load_image(path: &Path) -> anyhow::Result<ImageUpload> {
    let bytes = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("Failed to read image {}: {}", path.display(), e))?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();

    let mime = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
    .to_string();

    Ok(ImageUpload {
        file_name,
        mime,
        bytes,
    })
}
