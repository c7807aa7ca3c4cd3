//! Corpus-based conformance tests.
//!
//! Runs every vector in `tests/vectors/keccak256.json` against the engine.

use keccak256_oracle::conformance::{CorpusRunner, TestResult};
use std::path::Path;

/// Path to the corpus file relative to the project root.
const CORPUS_PATH: &str = "tests/vectors/keccak256.json";

fn load() -> CorpusRunner {
    let corpus_path = Path::new(env!("CARGO_MANIFEST_DIR")).join(CORPUS_PATH);
    CorpusRunner::load(&corpus_path).expect("Failed to load corpus")
}

/// Load and run the full corpus.
#[test]
fn test_full_corpus() {
    let runner = load();
    println!("Loaded corpus with {} vectors", runner.vector_count());

    let results = runner.run_all();
    println!("{}", results.summary());

    for (id, result) in results.problems() {
        match result {
            TestResult::Fail { expected, actual } => {
                println!("  {} - expected: {}, actual: {}", id, expected, actual)
            }
            TestResult::Error { message } => println!("  {} - {}", id, message),
            _ => {}
        }
    }

    assert!(
        results.all_passed(),
        "Corpus conformance failed: {}",
        results.summary()
    );
    assert_eq!(results.skipped, 0);
    assert_eq!(results.passed, runner.vector_count());
}

#[test]
fn test_corpus_manifest() {
    let runner = load();
    let manifest = runner.manifest();

    assert_eq!(manifest.format_version, "keccak-corpus-v1");
    assert_eq!(manifest.algorithm, "keccak256");
    assert_eq!(manifest.rate, keccak256_oracle::keccak::RATE);
    assert_eq!(manifest.digest_len, keccak256_oracle::keccak::DIGEST_LEN);
}

#[test]
fn test_corpus_covers_every_operation() {
    let runner = load();
    let results = runner.run_all();

    for prefix in ["keccak256_", "selector_", "keccak_f_"] {
        let count = results
            .details
            .iter()
            .filter(|(id, r)| id.starts_with(prefix) && r.is_pass())
            .count();
        assert!(count > 0, "no passing vectors for {}", prefix);
    }
}
