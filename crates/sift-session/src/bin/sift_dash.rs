//! Sift Diagnostic Console
//!
//! Exercise the dashboard client against a running backend from the shell.
//!
//! Usage:
//!   cargo run --bin sift-dash -- status
//!   cargo run --bin sift-dash -- search "bitcoin wallet" --mode deep
//!   cargo run --bin sift-dash -- files --risk HIGH --q dump
//!   cargo run --bin sift-dash -- index --mode FAST --watch

use std::env;
use std::sync::Arc;

use anyhow::{bail, Context};

use sift_client::HttpBackend;
use sift_core::{
    distinct_types, render, to_delimited_text, DisplayNode, FilterCriteria, NodeKind, QuickFilter,
    RiskLevel, ScanMode, SearchMode, SizeFilter, SizeOp, TextFound,
};
use sift_session::{PollerConfig, PollerEvent, SearchSession, StatusPoller};

#[derive(Debug)]
enum Command {
    Status,
    Search { query: String, mode: SearchMode },
    Quick { filter: QuickFilter },
    Recent { mode: SearchMode },
    Files {
        risk: Option<RiskLevel>,
        q: Option<String>,
        criteria: FilterCriteria,
    },
    Index { mode: ScanMode, watch: bool },
    Keywords,
    Export { query: String, mode: SearchMode },
}

fn parse_mode(raw: &str) -> SearchMode {
    match raw.to_lowercase().as_str() {
        "default" | "standard" => SearchMode::Standard,
        "regex" => SearchMode::RegexAdvanced,
        "deep" => SearchMode::DeepSubstring,
        _ => {
            eprintln!("Unknown search mode: {raw}. Using standard.");
            SearchMode::Standard
        }
    }
}

fn parse_risk(raw: &str) -> Option<RiskLevel> {
    match raw.to_uppercase().as_str() {
        "CRITICAL" => Some(RiskLevel::Critical),
        "HIGH" => Some(RiskLevel::High),
        "MEDIUM" => Some(RiskLevel::Medium),
        "LOW" => Some(RiskLevel::Low),
        _ => {
            eprintln!("Unknown risk level: {raw}. Ignoring.");
            None
        }
    }
}

fn parse_args() -> anyhow::Result<Command> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_help();
        std::process::exit(0);
    }

    let mut mode = SearchMode::Standard;
    let mut scan_mode = ScanMode::Fast;
    let mut risk = None;
    let mut q = None;
    let mut watch = false;
    let mut criteria = FilterCriteria::default();
    let mut positional = Vec::new();

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--mode" | "-m" => {
                i += 1;
                if i < args.len() {
                    match args[1].as_str() {
                        "index" => {
                            scan_mode = if args[i].eq_ignore_ascii_case("deep") {
                                ScanMode::Deep
                            } else {
                                ScanMode::Fast
                            };
                        }
                        _ => mode = parse_mode(&args[i]),
                    }
                }
            }
            "--risk" | "-r" => {
                i += 1;
                if i < args.len() {
                    risk = parse_risk(&args[i]);
                }
            }
            "--q" => {
                i += 1;
                if i < args.len() {
                    q = Some(args[i].clone());
                }
            }
            "--watch" | "-w" => {
                watch = true;
            }
            "--text" => {
                i += 1;
                if i < args.len() {
                    criteria.text_found = match args[i].to_lowercase().as_str() {
                        "yes" => TextFound::Yes,
                        "no" => TextFound::No,
                        _ => TextFound::Any,
                    };
                }
            }
            "--type" => {
                i += 1;
                if i < args.len() {
                    criteria.file_type = Some(args[i].clone());
                }
            }
            "--over" => {
                i += 1;
                if i < args.len() {
                    criteria.size = SizeFilter::parse(SizeOp::Over, &args[i]);
                }
            }
            "--under" => {
                i += 1;
                if i < args.len() {
                    criteria.size = SizeFilter::parse(SizeOp::Under, &args[i]);
                }
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    let command = match args[1].as_str() {
        "status" => Command::Status,
        "search" => {
            let query = positional.first().cloned().context("search needs a query")?;
            Command::Search { query, mode }
        }
        "quick" => {
            let which = positional.first().cloned().context("quick needs a filter (email, ip, url)")?;
            let filter = match which.to_lowercase().as_str() {
                "email" => QuickFilter::Email,
                "ip" => QuickFilter::Ip,
                "url" => QuickFilter::Url,
                _ => bail!("unknown quick filter: {which}"),
            };
            Command::Quick { filter }
        }
        "recent" => Command::Recent { mode },
        "files" => Command::Files { risk, q, criteria },
        "index" => Command::Index { mode: scan_mode, watch },
        "keywords" => Command::Keywords,
        "export" => {
            let query = positional.first().cloned().context("export needs a query")?;
            Command::Export { query, mode }
        }
        other => bail!("unknown command: {other}"),
    };
    Ok(command)
}

fn print_help() {
    println!(
        r#"
Sift Diagnostic Console

Usage: cargo run --bin sift-dash -- <COMMAND> [OPTIONS]

Commands:
  status                       Print the current indexing status
  search <QUERY>               Run a search and print the results
  quick <email|ip|url>         Run a canned quick-filter search
  recent                       Print the most recently indexed matches
  files                        Print the file listing
  index                        Start an indexing job
  keywords                     Print the alert keyword list
  export <QUERY>               Run a search and print it as delimited text

Options:
  -m, --mode <MODE>   Search mode (standard, regex, deep) or scan mode for index (fast, deep)
  -r, --risk <LEVEL>  Server-side risk narrowing for files (CRITICAL, HIGH, MEDIUM, LOW)
      --q <TEXT>      Server-side filename substring for files
      --text <any|yes|no>  Client-side text-extraction predicate for files
      --type <LABEL>  Client-side exact type label for files
      --over <BYTES>  Client-side minimum size for files
      --under <BYTES> Client-side maximum size for files
  -w, --watch         With index: poll status until the job finishes
  -h, --help          Print help

Environment:
  SIFT_API_BASE              Backend base URL (default http://127.0.0.1:8000)
  SIFT_REQUEST_TIMEOUT_SECS  HTTP timeout
  SIFT_POLL_INTERVAL_MS      Status poll cadence for --watch
"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sift_session=debug,sift_client=debug".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let command = parse_args()?;
    let backend = Arc::new(HttpBackend::from_env()?);
    let session = SearchSession::new(backend.clone());

    match command {
        Command::Status => {
            use sift_client::ApiBackend;
            let status = backend.status().await?;
            println!("phase:   {}", status.phase);
            match status.progress() {
                Some(p) => println!("progress: {}/{} ({:.0}%)", status.current, status.total, p * 100.0),
                None => println!("progress: indeterminate"),
            }
            if !status.message.is_empty() {
                println!("message: {}", status.message);
            }
            if let Some(file) = status.current_file {
                println!("file:    {file}");
            }
        }
        Command::Search { query, mode } => {
            session.submit(query, mode).await?;
            print_results(&session).await;
        }
        Command::Quick { filter } => {
            session.quick_search(filter).await?;
            print_results(&session).await;
        }
        Command::Recent { mode } => {
            use sift_client::ApiBackend;
            let results = backend.recent(mode).await?;
            for r in &results {
                println!("[{:>5}] {} {}", r.display_score(), r.filename, r.snippet);
            }
            println!("{} results", results.len());
        }
        Command::Files { risk, q, criteria } => {
            session.set_file_criteria(risk, q).await?;
            let state = session.state().await;
            if let Some(err) = state.last_error {
                bail!("file listing failed: {err}");
            }
            let shown = criteria.apply(&state.files);
            for f in &shown {
                println!("{:<10} {:>6.1}  {}", f.risk_level.as_param(), f.risk_score, f.path);
            }
            println!(
                "{} of {} files (types: {})",
                shown.len(),
                state.files.len(),
                distinct_types(&state.files).join(", ")
            );
        }
        Command::Index { mode, watch } => {
            let ack = session.start_indexing(mode).await?;
            println!("{ack}");
            if watch {
                watch_until_finished(backend).await?;
            }
        }
        Command::Keywords => {
            session.refresh_keywords().await?;
            for kw in &session.state().await.keywords {
                println!("{:>4}  {}", kw.id, kw.keyword);
            }
        }
        Command::Export { query, mode } => {
            session.submit(query, mode).await?;
            let state = session.state().await;
            if let Some(err) = state.last_error {
                bail!("search failed: {err}");
            }
            print!("{}", to_delimited_text(&state.results));
        }
    }

    session.close();
    Ok(())
}

async fn print_results<B: sift_client::ApiBackend>(session: &SearchSession<B>) {
    let state = session.state().await;
    if let Some(err) = state.last_error {
        eprintln!("error: {err}");
        return;
    }
    for r in &state.results {
        let location = r
            .lineno
            .map(|n| format!("{}:{}", r.filename, n))
            .unwrap_or_else(|| r.path.clone());
        println!("[{:>5}] {:<40} {}", r.display_score(), location, r.snippet);
        if !r.metadata.is_null() {
            print_tree(&render(&r.metadata), 1);
        }
    }
    println!("{} results", state.results.len());
}

fn print_tree(node: &DisplayNode, indent: usize) {
    let pad = "  ".repeat(indent);
    let label = node.label.as_deref().unwrap_or("");
    match &node.kind {
        NodeKind::Null => println!("{pad}{label}: null"),
        NodeKind::Leaf(text) => println!("{pad}{label}: {text}"),
        NodeKind::Truncated => println!("{pad}{label}: (too deep)"),
        NodeKind::Elided(n) => println!("{pad}... and {n} more"),
        NodeKind::Branch(children) => {
            if !label.is_empty() {
                println!("{pad}{label}:");
            }
            for child in children {
                print_tree(child, indent + 1);
            }
        }
    }
}

async fn watch_until_finished(backend: Arc<HttpBackend>) -> anyhow::Result<()> {
    let poller = StatusPoller::new(backend, PollerConfig::from_env());
    let handle = poller.start();
    let mut events = handle.events();

    loop {
        match events.recv().await {
            Ok(PollerEvent::Status(status)) => match status.progress() {
                Some(p) => eprintln!(
                    "[{}] {}/{} ({:.0}%)",
                    status.phase, status.current, status.total, p * 100.0
                ),
                None => eprintln!("[{}] {}", status.phase, status.message),
            },
            Ok(PollerEvent::IndexingFinished(status)) => {
                eprintln!("Indexing finished: {}", status.message);
                break;
            }
            Ok(_) => {}
            Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
            Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
        }
    }
    handle.shutdown().await;
    Ok(())
}
