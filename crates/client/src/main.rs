mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use client::config::Settings;
use client::AppState;

#[derive(Parser)]
#[command(name = "quill")]
#[command(version)]
#[command(about = "Terminal client for the blog: read posts, follow comment threads and reply")]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List published blogs
    Blogs {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 4)]
        limit: u32,
    },

    /// Show a blog together with its comment thread
    Show { bid: i64 },

    /// Comment on a blog, optionally replying to an existing comment
    Comment {
        bid: i64,
        text: String,
        /// Id of the comment being replied to
        #[arg(long)]
        reply_to: Option<i64>,
    },

    /// Publish a new blog
    Write {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },

    /// List blogs of the logged-in user
    Mine,

    Login {
        email: String,
        #[arg(long, env = "QUILL_PASSWORD", hide_env_values = true)]
        password: String,
    },

    Register {
        email: String,
        #[arg(long, env = "QUILL_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm: String,
    },

    Logout,

    /// Show the profile of the logged-in user
    Whoami,

    /// Change the password of the logged-in user
    Password {
        #[arg(long)]
        old: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },

    /// Update nickname and birth date
    Profile {
        nickname: String,
        #[arg(long, default_value = "")]
        birth_date: String,
    },

    /// Upload an avatar image
    Avatar { path: std::path::PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::new().context("Failed to load configuration")?;

    // 输出走 stdout，日志写 stderr
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let state = AppState::connect(&settings).await?;

    match cli.command {
        Commands::Blogs { page, limit } => commands::blogs::list(&state, page, limit).await,
        Commands::Show { bid } => commands::blogs::show(&state, bid).await,
        Commands::Comment {
            bid,
            text,
            reply_to,
        } => commands::comments::post(&state, bid, &text, reply_to).await,
        Commands::Write { title, content } => {
            commands::blogs::publish(&state, &title, &content).await
        }
        Commands::Mine => commands::blogs::mine(&state).await,
        Commands::Login { email, password } => {
            commands::account::login(&state, &email, &password).await
        }
        Commands::Register {
            email,
            password,
            confirm,
        } => commands::account::register(&state, &email, &password, &confirm).await,
        Commands::Logout => commands::account::logout(&state).await,
        Commands::Whoami => commands::account::whoami(&state).await,
        Commands::Password { old, new, confirm } => {
            commands::account::password(&state, &old, &new, &confirm).await
        }
        Commands::Profile {
            nickname,
            birth_date,
        } => commands::account::profile(&state, &nickname, &birth_date).await,
        Commands::Avatar { path } => commands::account::avatar(&state, &path).await,
    }
}
