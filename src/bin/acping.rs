//! acping CLI
//!
//! Queries one or more servers and prints their status.

use std::process::ExitCode;

use acping::{Config, ExtendedStatus, Pinger, Request, StandardStatus, Status, Target};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// acping
#[derive(Parser, Debug)]
#[command(name = "acping")]
#[command(about = "Query AssaultCube servers over the UDP status protocol")]
#[command(version)]
struct Args {
    /// Servers as HOST or HOST:GAMEPORT (status port is GAMEPORT + 1)
    #[arg(required = true)]
    servers: Vec<String>,

    /// Request per-player stats
    #[arg(short, long)]
    extended: bool,

    /// Read timeout per datagram in milliseconds (0 = default)
    #[arg(short, long, default_value = "0")]
    timeout_ms: u64,

    /// Maximum servers queried at the same time
    #[arg(short, long, default_value = "32")]
    concurrency: usize,

    /// Print one JSON document per server
    #[arg(short, long)]
    json: bool,
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,acping=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut targets = Vec::with_capacity(args.servers.len());
    for server in &args.servers {
        match server.parse::<Target>() {
            Ok(target) => targets.push(target),
            Err(e) => {
                tracing::error!("{}: {}", server, e);
                return ExitCode::FAILURE;
            }
        }
    }

    let config = Config::builder()
        .read_timeout_ms(args.timeout_ms)
        .max_concurrent_pings(args.concurrency)
        .build();
    let request = if args.extended {
        Request::Extended
    } else {
        Request::Standard
    };

    tracing::debug!("acping v{}: {} servers, {:?}", acping::VERSION, targets.len(), request);

    let pinger = Pinger::new(config);
    let mut failed = false;

    for outcome in pinger.sweep(&targets, request) {
        match outcome.result {
            Ok(status) if args.json => match serde_json::to_string(&status) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    tracing::error!("{}: cannot encode JSON: {}", outcome.target, e);
                    failed = true;
                }
            },
            Ok(Status::Standard(status)) => print_standard(&outcome.target, &status),
            Ok(Status::Extended(status)) => print_extended(&outcome.target, &status),
            Err(e) => {
                tracing::error!("{}: {}", outcome.target, e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_standard(target: &Target, status: &StandardStatus) {
    println!("{}", target);
    println!("  description: {}", status.description);
    println!("  map:         {} (mode {}, {} min left)", status.current_map, status.mode, status.minutes_remaining);
    println!("  players:     {}/{}", status.player_count, status.max_clients);
    println!("  mastermode:  {}{}", status.master_mode_name(), if status.password { ", password" } else { "" });
    println!("  protocol:    {}", status.protocol);
}

fn print_extended(target: &Target, status: &ExtendedStatus) {
    println!("{} ({} players, protocol {})", target, status.player_count, status.version);
    println!(
        "  {:>3} {:<16} {:<5} {:>5} {:>5} {:>6} {:>4} {:>4}  {}",
        "cn", "name", "team", "frags", "flags", "deaths", "acc", "ping", "ip"
    );
    for p in &status.players {
        println!(
            "  {:>3} {:<16} {:<5} {:>5} {:>5} {:>6} {:>3}% {:>4}  {}",
            p.client_number, p.name, p.team, p.frags, p.flagscore, p.deaths, p.accuracy, p.ping, p.ip
        );
    }
}
