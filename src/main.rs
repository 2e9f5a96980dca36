use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};

use postboard::api::ApiClient;
use postboard::config::Config;
use postboard::logging::init_tracing;
use postboard::model::{Credentials, Post, PostDraft, PostPatch};
use postboard::posts::{filter_by_title, PostStore};
use postboard::proxy::ProxyServer;
use postboard::session::{FileStorage, SessionStore};
use postboard::sync::{self, PostSync, SyncError};

#[derive(Parser)]
#[command(name = "postboard", version, about = "Client for the posts platform")]
struct Cli {
    /// Config file (default: <config dir>/postboard/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the development relay forwarding <prefix>/* to the API
    Proxy {
        /// Bind address, e.g. 127.0.0.1:3003
        #[arg(long)]
        bind: Option<String>,
        /// Upstream URL (default: api.base_url)
        #[arg(long)]
        target: Option<String>,
    },
    /// Log in and persist the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Clear the persisted session
    Logout,
    /// Show the current session
    Whoami,
    /// List posts, newest first
    List {
        /// Case-insensitive title filter
        #[arg(long)]
        search: Option<String>,
    },
    /// Show a single post
    Show { id: String },
    /// Create a post (teacher or admin)
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Image file uploaded with the post
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Edit a post's title and/or content (teacher or admin)
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete a post (teacher or admin)
    Delete { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Command::Proxy { .. } => "info",
        _ => "warn",
    };
    init_tracing(default_level);

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&config_path)?;
    config.apply_env_overrides(|key| std::env::var(key).ok())?;

    match cli.command {
        Command::Proxy { bind, target } => run_proxy(config, bind, target).await,
        command => run_client(config, command).await,
    }
}

async fn run_proxy(
    mut config: Config,
    bind: Option<String>,
    target: Option<String>,
) -> anyhow::Result<()> {
    if let Some(bind) = bind {
        config.proxy.bind_addr = bind;
    }
    if let Some(target) = target {
        config.proxy.target_url = Some(target);
    }
    config.validate()?;

    let server = ProxyServer::new(&config)?;
    server.run().await?;
    Ok(())
}

async fn run_client(config: Config, command: Command) -> anyhow::Result<()> {
    let api = ApiClient::new(&config.api)?;
    let session_path = config
        .storage
        .session_path
        .clone()
        .unwrap_or_else(FileStorage::default_path);
    let sessions = SessionStore::restore(Arc::new(FileStorage::new(session_path)))
        .context("Failed to load session")?;
    let posts = PostSync::new(api.clone(), PostStore::new());
    let session = sessions.snapshot();

    match command {
        Command::Proxy { .. } => return Err(anyhow!("proxy is not a client command")),
        Command::Login { email, password } => {
            let session = sync::login(&api, &sessions, &Credentials::new(email, password))
                .await
                .map_err(user_error)?;
            if let Some(user) = session.user() {
                println!("Logged in as {} <{}>", user.name, user.email);
            }
        }
        Command::Logout => {
            sync::logout(&sessions).map_err(user_error)?;
            println!("Logged out");
        }
        Command::Whoami => match session.user() {
            Some(user) if session.is_authenticated() => {
                let role = if session.is_teacher_or_admin() {
                    "teacher/admin"
                } else {
                    "student"
                };
                println!("{} <{}> ({})", user.name, user.email, role);
            }
            _ => println!("Not logged in"),
        },
        Command::List { search } => {
            posts.refresh(&session).await.map_err(user_error)?;
            let state = posts.store().snapshot();
            let shown = filter_by_title(&state.posts, search.as_deref().unwrap_or(""));
            if shown.is_empty() {
                println!("No posts found");
            }
            for post in shown {
                print_summary(post);
            }
        }
        Command::Show { id } => {
            let post = posts.fetch_post(&id).await.map_err(user_error)?;
            print_detail(&post);
        }
        Command::Create {
            title,
            content,
            image,
        } => {
            let mut draft = PostDraft::new(title, content);
            if let Some(image) = image {
                draft = draft.with_image(image);
            }
            posts
                .create_post(&session, &draft)
                .await
                .map_err(user_error)?;
            println!("Post created successfully");
        }
        Command::Edit { id, title, content } => {
            let patch = PostPatch { title, content };
            posts
                .update_post(&session, &id, &patch)
                .await
                .map_err(user_error)?;
            println!("Post updated successfully");
        }
        Command::Delete { id } => {
            posts
                .delete_post(&session, &id)
                .await
                .map_err(user_error)?;
            println!("Post deleted successfully");
        }
    }

    Ok(())
}

fn user_error(err: SyncError) -> anyhow::Error {
    anyhow!(err.user_message())
}

fn print_summary(post: &Post) {
    println!(
        "{}  {}  {} (by {})",
        post.id,
        post.created_at.format("%Y-%m-%d"),
        post.title,
        post.author
    );
}

fn print_detail(post: &Post) {
    println!("{}", post.title);
    println!("by {}", post.author);
    println!("Created {}", post.created_at.format("%Y-%m-%d"));
    if post.was_edited() {
        println!("Edited {}", post.updated_at.format("%Y-%m-%d"));
    }
    if let Some(image) = &post.image {
        println!("Image: {}", image);
    }
    println!();
    println!("{}", post.content);
}
