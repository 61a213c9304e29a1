//! Murmur CLI - Command-line client for the murmur social feed.

mod app;
mod commands;
mod output;

use app::App;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Murmur CLI - Sign in, read the feed, post, and comment.
#[derive(Parser)]
#[command(name = "murmur")]
#[command(about = "Command-line client for the murmur social feed")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", global = true)]
    format: output::OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new account
    Signup {
        /// Display name
        #[arg(long)]
        name: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Date of birth (MM-DD-YYYY)
        #[arg(long)]
        date_of_birth: String,
        /// Gender (male or female)
        #[arg(long)]
        gender: String,
    },

    /// Login with email and password
    Login {
        /// Email address (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },

    /// Logout and clear the session
    Logout,

    /// Show the current identity
    Whoami,

    /// Read and write posts
    Posts {
        #[command(subcommand)]
        command: PostCommands,
    },

    /// Write comments
    Comments {
        #[command(subcommand)]
        command: CommentCommands,
    },

    /// Manage the profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[derive(Subcommand)]
enum PostCommands {
    /// List the global feed
    List,
    /// Show a post with its comments
    Show {
        /// Post ID
        id: String,
    },
    /// List posts by a user
    ByUser {
        /// User ID
        id: String,
    },
    /// Create a post
    Create {
        /// Post text
        #[arg(short, long)]
        body: String,
        /// Path to an image to attach
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Update a post
    Update {
        /// Post ID
        id: String,
        /// Replacement post text
        #[arg(short, long)]
        body: String,
        /// Path to a replacement image
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Delete a post
    Delete {
        /// Post ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum CommentCommands {
    /// Comment on a post
    Add {
        /// Post ID
        post_id: String,
        /// Comment text (1-30 characters)
        content: String,
    },
    /// Update a comment
    Update {
        /// Comment ID
        id: String,
        /// Replacement text (1-30 characters)
        content: String,
    },
    /// Delete a comment
    Delete {
        /// Comment ID
        id: String,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Replace the profile photo
    Photo {
        /// Path to the image
        path: PathBuf,
    },
    /// Change the account password
    ChangePassword,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    client_core::init_logging(&cli.log_level);

    let app = match App::init(cli.format) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    let format = cli.format;
    let result = match cli.command {
        Commands::Signup {
            name,
            email,
            date_of_birth,
            gender,
        } => commands::signup(&app, &name, &email, &date_of_birth, &gender, &format).await,
        Commands::Login { email } => commands::login(&app, email.as_deref(), &format).await,
        Commands::Logout => commands::logout(&app, &format).await,
        Commands::Whoami => commands::whoami(&app, &format).await,
        Commands::Posts { command } => match command {
            PostCommands::List => commands::posts_list(&app, &format).await,
            PostCommands::Show { id } => commands::post_show(&app, &id, &format).await,
            PostCommands::ByUser { id } => commands::posts_by_user(&app, &id, &format).await,
            PostCommands::Create { body, image } => {
                commands::post_create(&app, &body, image.as_deref(), &format).await
            }
            PostCommands::Update { id, body, image } => {
                commands::post_update(&app, &id, &body, image.as_deref(), &format).await
            }
            PostCommands::Delete { id, yes } => {
                commands::post_delete(&app, &id, yes, &format).await
            }
        },
        Commands::Comments { command } => match command {
            CommentCommands::Add { post_id, content } => {
                commands::comment_add(&app, &post_id, &content, &format).await
            }
            CommentCommands::Update { id, content } => {
                commands::comment_update(&app, &id, &content, &format).await
            }
            CommentCommands::Delete { id } => {
                commands::comment_delete(&app, &id, &format).await
            }
        },
        Commands::Profile { command } => match command {
            ProfileCommands::Photo { path } => {
                commands::update_photo(&app, &path, &format).await
            }
            ProfileCommands::ChangePassword => commands::change_password(&app, &format).await,
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
