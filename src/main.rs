//! Keccak-256 CLI.
//!
//! Hashes files, stdin, text and function signatures from the command line.
//! Results go to stdout; logs go to stderr (filter with `RUST_LOG`).

use clap::{Args, Parser, Subcommand};
use keccak256_oracle::conformance::{CorpusRunner, TestResult};
use keccak256_oracle::keccak::{
    CAPACITY, DIGEST_LEN, PAD_DOMAIN, RATE, ROTATION_OFFSETS, ROUNDS, ROUND_CONSTANTS, WIDTH_BITS,
};
use keccak256_oracle::{
    function_selector, hash_hex, CancellationToken, HashError, StreamConfig, StreamHasher,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "keccak256")]
#[command(about = "Keccak-256 digests (original Keccak padding)", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct HexFormat {
    /// Print hex without the 0x prefix
    #[arg(long)]
    no_prefix: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information
    Version,

    /// Hash a file, or stdin when no file is given
    Hash {
        /// File to hash
        file: Option<PathBuf>,

        /// Bytes requested per read
        #[arg(long, default_value_t = keccak256_oracle::DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        #[command(flatten)]
        format: HexFormat,
    },

    /// Hash the UTF-8 bytes of a string
    Text {
        /// Text to hash
        text: String,

        #[command(flatten)]
        format: HexFormat,
    },

    /// Compute the 4-byte ABI selector of a function signature
    Selector {
        /// Canonical signature, e.g. "transfer(address,uint256)"
        signature: String,

        #[command(flatten)]
        format: HexFormat,
    },

    /// Export the sponge parameters and constant tables as JSON
    Params,

    /// Check a JSON test-vector corpus
    VerifyCorpus {
        /// Path to the corpus file
        path: PathBuf,
    },
}

/// Parameter export for cross-checking other implementations.
#[derive(Serialize)]
struct ParamsExport {
    algorithm: &'static str,
    width_bits: usize,
    rate: usize,
    capacity: usize,
    rounds: usize,
    digest_len: usize,
    pad_domain: u8,
    round_constants: Vec<String>,
    rotation_offsets: Vec<u32>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_hash(file: Option<PathBuf>, chunk_size: usize, with_prefix: bool) -> ExitCode {
    let hasher = match StreamHasher::new(StreamConfig::with_chunk_size(chunk_size)) {
        Ok(h) => h,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(2);
        }
    };

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received, cancelling");
            on_signal.cancel();
        }
    });

    let result = match file {
        Some(path) => match tokio::fs::File::open(&path).await {
            Ok(f) => hasher.hash_hex(f, with_prefix, &cancel).await,
            Err(e) => Err(HashError::from(e)),
        },
        None => hasher.hash_hex(tokio::io::stdin(), with_prefix, &cancel).await,
    };

    match result {
        Ok(hex) => {
            println!("{}", hex);
            ExitCode::SUCCESS
        }
        Err(HashError::Cancelled) => ExitCode::from(130),
        Err(e) => {
            error!(code = e.code(), "{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_params() -> ExitCode {
    let export = ParamsExport {
        algorithm: "keccak256",
        width_bits: WIDTH_BITS,
        rate: RATE,
        capacity: CAPACITY,
        rounds: ROUNDS,
        digest_len: DIGEST_LEN,
        pad_domain: PAD_DOMAIN,
        round_constants: ROUND_CONSTANTS
            .iter()
            .map(|c| format!("{:#018x}", c))
            .collect(),
        rotation_offsets: ROTATION_OFFSETS.to_vec(),
    };

    match serde_json::to_string_pretty(&export) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_verify_corpus(path: PathBuf) -> ExitCode {
    let runner = match CorpusRunner::load(&path) {
        Ok(r) => r,
        Err(e) => {
            error!(path = %path.display(), "{}", e);
            return ExitCode::FAILURE;
        }
    };

    let results = runner.run_all();
    for (id, result) in results.problems() {
        match result {
            TestResult::Fail { expected, actual } => {
                println!("FAIL {} - expected: {}, actual: {}", id, expected, actual)
            }
            TestResult::Error { message } => println!("ERROR {} - {}", id, message),
            _ => {}
        }
    }
    println!("{}", results.summary());

    if results.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Some(Commands::Version) | None => {
            println!("keccak256 v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Some(Commands::Hash {
            file,
            chunk_size,
            format,
        }) => run_hash(file, chunk_size, !format.no_prefix).await,
        Some(Commands::Text { text, format }) => {
            println!("{}", hash_hex(&text, !format.no_prefix));
            ExitCode::SUCCESS
        }
        Some(Commands::Selector { signature, format }) => {
            println!("{}", function_selector(&signature, !format.no_prefix));
            ExitCode::SUCCESS
        }
        Some(Commands::Params) => run_params(),
        Some(Commands::VerifyCorpus { path }) => run_verify_corpus(path),
    }
}
