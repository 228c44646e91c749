//! `forum-cli` - terminal front end for the forum client.
//!
//! **Usage:**
//! ```text
//! forum-cli threads [--category <query>]
//! forum-cli thread <thread-id>
//! forum-cli vote thread <thread-id> up|down
//! forum-cli vote comment <thread-id> <comment-id> up|down
//! ```
//!
//! The session token is read from `FORUM_TOKEN`; `login` prints one.

use clap::{Parser, Subcommand, ValueEnum};
use forum_client::client::notify::NotificationLevel;
use forum_client::client::{Config, EntityRef, ForumClient, Notification};
use forum_client::shared::forum::{LoginRequest, NewThread, RegisterRequest, ThreadDetail};
use forum_client::shared::VoteDirection;
use tokio::sync::broadcast;

#[derive(Parser)]
#[command(name = "forum-cli", about = "Browse and vote on forum threads")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List threads, newest first
    Threads {
        /// Only threads whose category contains this text
        #[arg(long)]
        category: Option<String>,
    },
    /// Show a thread with its comments
    Thread { thread_id: String },
    /// Show the leaderboard
    Leaderboards,
    /// Sign in and print the access token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FORUM_PASSWORD")]
        password: String,
    },
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "FORUM_PASSWORD")]
        password: String,
    },
    /// Show the signed-in user
    Me,
    /// Create a thread
    Post {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(long)]
        category: Option<String>,
    },
    /// Comment on a thread
    Comment { thread_id: String, content: String },
    /// Vote on a thread or comment; voting the same way twice retracts
    Vote {
        #[command(subcommand)]
        target: VoteTarget,
    },
}

#[derive(Subcommand)]
enum VoteTarget {
    Thread {
        thread_id: String,
        direction: Direction,
    },
    Comment {
        thread_id: String,
        comment_id: String,
        direction: Direction,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Direction {
    Up,
    Down,
}

impl From<Direction> for VoteDirection {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Up => VoteDirection::Up,
            Direction::Down => VoteDirection::Down,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = ForumClient::new(Config::from_env()?)?;
    let mut toasts = client.notifier().subscribe();

    let result = run(&client, args.command).await;
    print_notifications(&mut toasts);
    result
}

async fn run(client: &ForumClient, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Threads { category } => {
            client.load_threads().await?;
            let state = client.state();
            for thread in state.threads.filtered(category.as_deref().unwrap_or("")) {
                println!(
                    "{:>4}  {}  [{}]  {} comments  ({})",
                    thread.votes.score(),
                    thread.title,
                    thread.category,
                    thread.total_comments,
                    thread.id
                );
            }
            let categories: Vec<&str> = state
                .threads
                .categories()
                .into_iter()
                .map(|c| if c.is_empty() { "(none)" } else { c })
                .collect();
            if !categories.is_empty() {
                println!("\ncategories: {}", categories.join(", "));
            }
        }
        Command::Thread { thread_id } => {
            let detail = client.load_thread_detail(&thread_id).await?;
            print_detail(&detail);
        }
        Command::Leaderboards => {
            client.load_leaderboards().await?;
            for (rank, entry) in client.state().leaderboards.entries.iter().enumerate() {
                println!("{:>3}. {:<30} {}", rank + 1, entry.user.name, entry.score);
            }
        }
        Command::Login { email, password } => {
            let user = client.login(LoginRequest { email, password }).await?;
            println!("signed in as {} <{}>", user.name, user.email);
            if let Some(token) = client.state().auth.token {
                println!("FORUM_TOKEN={}", token);
            }
        }
        Command::Register { name, email, password } => {
            let user = client.register(RegisterRequest { name, email, password }).await?;
            println!("registered {} ({})", user.name, user.id);
        }
        Command::Me => {
            let user = client.load_own_profile().await?;
            println!("{} <{}> ({})", user.name, user.email, user.id);
        }
        Command::Post { title, body, category } => {
            let mut thread = NewThread::new(title, body);
            if let Some(category) = category {
                thread = thread.with_category(category);
            }
            let created = client.create_thread(thread).await?;
            println!("created {}", created.id);
        }
        Command::Comment { thread_id, content } => {
            client.load_thread_detail(&thread_id).await?;
            let created = client.create_comment(&thread_id, &content).await?;
            println!("commented {}", created.id);
        }
        Command::Vote { target } => {
            if client.state().auth.token.is_some() {
                client.load_own_profile().await?;
            }
            let (thread_id, entity, direction) = match target {
                VoteTarget::Thread { thread_id, direction } => {
                    let entity = EntityRef::thread_detail(thread_id.clone());
                    (thread_id, entity, direction)
                }
                VoteTarget::Comment { thread_id, comment_id, direction } => {
                    let entity = EntityRef::comment(thread_id.clone(), comment_id);
                    (thread_id, entity, direction)
                }
            };
            client.load_thread_detail(&thread_id).await?;
            let record = client.vote(entity.clone(), direction.into()).await?;
            let score = client
                .votes(entity)
                .current_display_membership()
                .map(|m| m.score())
                .unwrap_or_default();
            println!("vote {} recorded, score now {}", record.vote_type, score);
        }
    }
    Ok(())
}

fn print_detail(detail: &ThreadDetail) {
    println!("{}  [{}]  by {}", detail.title, detail.category, detail.owner.name);
    println!("score {}\n", detail.votes.score());
    println!("{}\n", detail.body);
    for comment in &detail.comments {
        println!(
            "  {:>3}  {}: {}  ({})",
            comment.votes.score(),
            comment.owner.name,
            comment.content,
            comment.id
        );
    }
}

fn print_notifications(toasts: &mut broadcast::Receiver<Notification>) {
    while let Ok(notification) = toasts.try_recv() {
        match notification.level {
            NotificationLevel::Success => eprintln!("✓ {}", notification.message),
            NotificationLevel::Error => eprintln!("✗ {}", notification.message),
        }
    }
}
