//! Authentication commands.

use super::prompt_line;
use crate::app::App;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use api_client::NewAccount;

/// Register a new account.
pub async fn signup(
    app: &App,
    name: &str,
    email: &str,
    date_of_birth: &str,
    gender: &str,
    format: &OutputFormat,
) -> Result<()> {
    let password = rpassword::prompt_password("Password: ")?;
    let re_password = rpassword::prompt_password("Confirm password: ")?;

    let account = NewAccount {
        name: name.to_string(),
        email: email.to_string(),
        password,
        re_password,
        date_of_birth: date_of_birth.to_string(),
        gender: gender.to_string(),
    };

    match app.session.sign_up(&account).await {
        Ok(()) => {
            output::print_success(
                &format!("Account created for {}. Log in with 'murmur login'.", email),
                format,
            );
        }
        Err(e) => {
            output::print_error(&format!("Signup failed: {}", e), format);
        }
    }

    Ok(())
}

/// Login with email and password.
pub async fn login(app: &App, email: Option<&str>, format: &OutputFormat) -> Result<()> {
    if let Some(user) = app.session.current_identity().await {
        output::print_success(&format!("Already logged in as {}", user.name), format);
        return Ok(());
    }

    let email = match email {
        Some(email) => email.to_string(),
        None => prompt_line("Email: ")?,
    };

    if email.is_empty() {
        output::print_error("Email is required", format);
        return Ok(());
    }

    let password = rpassword::prompt_password("Password: ")?;

    if password.is_empty() {
        output::print_error("Password is required", format);
        return Ok(());
    }

    println!("Logging in...");

    match app.session.login(&email, &password).await {
        Ok(()) => match app.session.current_identity().await {
            Some(user) => {
                output::print_success(&format!("Logged in as {}", user.name), format);
            }
            None => {
                output::print_error("Logged in, but profile could not be loaded", format);
            }
        },
        Err(e) => {
            output::print_error(&format!("Login failed: {}", e), format);
        }
    }

    Ok(())
}

/// Logout and clear session state.
pub async fn logout(app: &App, format: &OutputFormat) -> Result<()> {
    app.session.logout();
    app.feed.clear();
    output::print_success("Logged out successfully", format);
    Ok(())
}

/// Show the current identity.
pub async fn whoami(app: &App, format: &OutputFormat) -> Result<()> {
    match app.session.current_identity().await {
        Some(user) => match format {
            OutputFormat::Text => {
                output::print_row("Name", &user.name);
                if let Some(email) = &user.email {
                    output::print_row("Email", email);
                }
                output::print_row("User ID", &user.id);
            }
            OutputFormat::Json => {
                output::print_json(&user)?;
            }
        },
        None => match format {
            OutputFormat::Text => {
                println!("Not logged in.");
            }
            OutputFormat::Json => {
                println!(r#"{{"logged_in":false}}"#);
            }
        },
    }

    Ok(())
}
