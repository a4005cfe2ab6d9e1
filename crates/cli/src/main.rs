//! `hilo`: hosts the Hilo server on stdin/stdout.
//!
//! Logs go to stderr so stdout stays a clean protocol channel.

#![deny(unsafe_code)]

mod frames;
mod play;

use std::io;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use hilo_server::{Server, ServerConfig};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// How to talk to the caller on stdin/stdout.
    #[arg(long, value_enum, default_value_t = Mode::Frames)]
    mode: Mode,

    /// Seed for a reproducible target sequence (overrides HILO_SEED).
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Length-delimited protobuf `Request`/`Response` frames.
    Frames,
    /// Plain-text game in the terminal.
    Play,
}

fn init_tracing(default_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Keep the terminal readable while playing.
    init_tracing(match args.mode {
        Mode::Frames => "info",
        Mode::Play => "warn",
    });

    let mut config = ServerConfig::from_env().context("reading configuration")?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    let server = Server::new(config);

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    match args.mode {
        Mode::Frames => frames::serve(&server, stdin, stdout),
        Mode::Play => play::run(&server, stdin, stdout),
    }
}
