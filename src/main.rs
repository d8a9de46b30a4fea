use clap::Parser;
use std::io::Write;
use std::time::Duration;

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 1;
const EXIT_API: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "pr-report")]
#[command(about = "Export recently merged or open GitHub pull requests as CSV", long_about = None)]
#[command(version)]
struct Cli {
    /// Report PRs merged or updated within this many days
    #[arg(long, default_value_t = 30)]
    newer_than_days: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Print page-by-page progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();

    // Token must resolve before any network activity
    let token = match pr_report::config::token_from_env() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let config = pr_report::config::Config {
        token,
        newer_than_days: cli.newer_than_days,
        timeout: Duration::from_secs(cli.timeout_secs),
    };

    let client = match pr_report::github::GithubClient::new(&config.token, config.timeout) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_API);
        }
    };

    let cutoff = config.cutoff();
    if cli.verbose {
        eprintln!(
            "Fetching {}/{} PRs updated since {}",
            pr_report::config::REPO_OWNER,
            pr_report::config::REPO_NAME,
            cutoff
        );
    }

    let records = match pr_report::github::fetch_recent_prs(
        &client,
        pr_report::config::REPO_OWNER,
        pr_report::config::REPO_NAME,
        cutoff,
        cli.verbose,
    )
    .await
    {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_API);
        }
    };

    if cli.verbose {
        eprintln!("Kept {} PRs", records.len());
    }

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = pr_report::output::write_csv(&records, &mut handle) {
        eprintln!("Error: {}", e);
        std::process::exit(EXIT_API);
    }
    if let Err(e) = handle.flush() {
        eprintln!("Error: failed to flush stdout: {}", e);
        std::process::exit(EXIT_API);
    }

    std::process::exit(EXIT_SUCCESS);
}
