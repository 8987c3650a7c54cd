//! git-lineblame - Inline blame lookups for editor plugins
//!
//! A small local daemon that answers "who last touched this line?" by
//! shelling out to `git blame`/`git show` and memoizing the answers.
//!
//! # Usage
//! ```bash
//! git-lineblame /path/to/repository       # Start server
//! git-lineblame . --port 3912             # View current directory
//! git-lineblame status                    # Check if running
//! git-lineblame kill                      # Stop running instance
//! ```

use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use git_lineblame::git::{self, BlameService, SharedService, SystemGit};
use git_lineblame::routes;

/// Inline blame lookup service for editor integrations
#[derive(Parser)]
#[command(name = "git-lineblame")]
#[command(about = "Per-line git blame lookups over a local HTTP API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the git repository to serve blame for
    #[arg(value_name = "REPO_PATH")]
    repo_path: Option<String>,

    /// Port to run the server on
    #[arg(short, long, default_value = "3912")]
    port: u16,

    /// Maximum cached (file, line) entries before the cache resets
    #[arg(long, default_value_t = git::cache::DEFAULT_CACHE_CAP)]
    cache_cap: usize,

    /// Bound each git subprocess call to this many seconds
    /// (default: no timeout, a hung git call blocks its lookup)
    #[arg(long, value_name = "SECS")]
    git_timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check if git-lineblame is currently running
    Status,
    /// Stop the running git-lineblame instance
    Kill,
}

/// PID file info stored as JSON
#[derive(serde::Serialize, serde::Deserialize)]
struct PidInfo {
    pid: u32,
    repo_path: String,
    port: u16,
}

fn get_pid_file_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("git-lineblame.pid");
    path
}

fn read_pid_info() -> Option<PidInfo> {
    let path = get_pid_file_path();
    let mut file = fs::File::open(&path).ok()?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).ok()?;
    serde_json::from_str(&contents).ok()
}

fn write_pid_info(info: &PidInfo) -> anyhow::Result<()> {
    let path = get_pid_file_path();
    let mut file = fs::File::create(&path)?;
    file.write_all(serde_json::to_string(info)?.as_bytes())?;
    Ok(())
}

fn remove_pid_file() {
    let _ = fs::remove_file(get_pid_file_path());
}

#[cfg(unix)]
fn is_process_running(pid: u32) -> bool {
    // On Unix, sending signal 0 checks if process exists
    unsafe { libc::kill(pid as i32, 0) == 0 }
}

#[cfg(windows)]
fn is_process_running(pid: u32) -> bool {
    use std::process::Command;
    // On Windows, check if process exists using tasklist
    Command::new("tasklist")
        .args(&["/FI", &format!("PID eq {}", pid), "/NH"])
        .output()
        .map(|output| {
            let output_str = String::from_utf8_lossy(&output.stdout);
            output_str.contains(&pid.to_string())
        })
        .unwrap_or(false)
}

#[cfg(unix)]
fn kill_process(pid: u32) -> bool {
    unsafe { libc::kill(pid as i32, libc::SIGTERM) == 0 }
}

#[cfg(windows)]
fn kill_process(pid: u32) -> bool {
    use std::process::Command;
    // On Windows, use taskkill
    Command::new("taskkill")
        .args(&["/PID", &pid.to_string(), "/F"])
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

fn handle_status() {
    match read_pid_info() {
        Some(info) => {
            if is_process_running(info.pid) {
                println!("✓ git-lineblame is running");
                println!("  PID:  {}", info.pid);
                println!("  Repo: {}", info.repo_path);
                println!("  URL:  http://127.0.0.1:{}", info.port);
            } else {
                println!("✗ git-lineblame is not running (stale PID file)");
                remove_pid_file();
            }
        }
        None => {
            println!("✗ git-lineblame is not running");
        }
    }
}

fn handle_kill() {
    match read_pid_info() {
        Some(info) => {
            if is_process_running(info.pid) {
                if kill_process(info.pid) {
                    println!("✓ Stopped git-lineblame (PID {})", info.pid);
                    remove_pid_file();
                } else {
                    println!("✗ Failed to stop git-lineblame (PID {})", info.pid);
                }
            } else {
                println!("✗ git-lineblame is not running (stale PID file)");
                remove_pid_file();
            }
        }
        None => {
            println!("✗ git-lineblame is not running");
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Status) => {
            handle_status();
            return Ok(());
        }
        Some(Commands::Kill) => {
            handle_kill();
            return Ok(());
        }
        None => {}
    }

    // Need a repo path to start the server
    let repo_path = cli.repo_path.unwrap_or_else(|| {
        eprintln!("Usage: git-lineblame <REPO_PATH> [--port <PORT>]");
        eprintln!("       git-lineblame status");
        eprintln!("       git-lineblame kill");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  git-lineblame .                  # Serve blame for current directory");
        eprintln!("  git-lineblame ~/myproject -p 80  # Serve on a specific port");
        std::process::exit(1);
    });

    // Check if already running
    if let Some(info) = read_pid_info() {
        if is_process_running(info.pid) {
            eprintln!("✗ git-lineblame is already running (PID {})", info.pid);
            eprintln!("  Repo: {}", info.repo_path);
            eprintln!("  URL:  http://127.0.0.1:{}", info.port);
            eprintln!();
            eprintln!("Run 'git-lineblame kill' to stop it first.");
            std::process::exit(1);
        } else {
            remove_pid_file();
        }
    }

    // Initialize tracing (quieter for production)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Open the git repository
    let timeout = cli.git_timeout.map(Duration::from_secs);
    let invoker = match SystemGit::open(&repo_path, timeout).await {
        Ok(g) => g,
        Err(e) => {
            eprintln!("✗ Failed to open repository: {}", e);
            eprintln!("  Path: {}", repo_path);
            std::process::exit(1);
        }
    };

    let work_tree = invoker.work_tree().to_string_lossy().to_string();
    let service: SharedService = Arc::new(BlameService::new(invoker, cli.cache_cap));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = routes::create_router(service)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Bind to the port
    let addr = format!("127.0.0.1:{}", cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to port {}: {}", cli.port, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    // Write PID file
    let pid_info = PidInfo {
        pid: std::process::id(),
        repo_path: work_tree.clone(),
        port: cli.port,
    };
    write_pid_info(&pid_info)?;

    // Print startup message
    let url = format!("http://127.0.0.1:{}", cli.port);
    println!();
    println!("  ┌─────────────────────────────────────────────┐");
    println!("  │                git-lineblame                │");
    println!("  └─────────────────────────────────────────────┘");
    println!();
    println!("  Repository: {}", work_tree);
    println!("  Server:     {}", url);
    println!();
    println!("  Commands:");
    println!("    git-lineblame status  - Check if running");
    println!("    git-lineblame kill    - Stop the server");
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    // Set up graceful shutdown
    let shutdown = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        println!("\n  Shutting down...");
        remove_pid_file();
    };

    // Start the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
