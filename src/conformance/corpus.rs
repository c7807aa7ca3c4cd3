//! Corpus-based conformance testing.
//!
//! Loads test vectors from a corpus JSON file and runs them against the
//! engine. Supported operations:
//!
//! - `keccak256` - `input.hex` bytes, `expected.digest`
//! - `keccak256_utf8` - `input.text`, `expected.digest`
//! - `keccak256_chunked` - `input.text` fed in `input.chunk`-byte updates, `expected.digest`
//! - `function_selector` - `input.signature`, `expected.selector`
//! - `keccak_f` - `input.lanes` (25 hex u64), `expected.lanes` (prefix of the output state)

use super::ConformanceResult;
use crate::keccak::{permute, Keccak256, State, LANES};
use crate::oneshot::{function_selector, hash_hex};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Corpus manifest with metadata.
#[derive(Debug, Deserialize)]
pub struct CorpusManifest {
    /// Format version of the corpus file.
    pub format_version: String,
    /// Hash algorithm the vectors target.
    pub algorithm: String,
    /// Sponge rate in bytes.
    pub rate: usize,
    /// Digest length in bytes.
    pub digest_len: usize,
}

/// A corpus containing test vectors.
#[derive(Debug, Deserialize)]
pub struct Corpus {
    /// Corpus metadata.
    pub manifest: CorpusManifest,
    /// List of test vectors.
    pub vectors: Vec<TestVector>,
}

/// A single test vector.
#[derive(Debug, Deserialize)]
pub struct TestVector {
    /// Unique identifier for the test.
    pub id: String,
    /// Operation to test (e.g., "keccak256", "function_selector").
    pub op: String,
    /// Input parameters for the operation.
    pub input: serde_json::Value,
    /// Expected result.
    pub expected: serde_json::Value,
}

/// Result of running a single test vector.
#[derive(Debug)]
pub enum TestResult {
    /// Test passed.
    Pass,
    /// Test failed with mismatch.
    Fail {
        /// Expected result from the corpus.
        expected: String,
        /// Actual result from the engine.
        actual: String,
    },
    /// Test was skipped (unknown operation).
    Skip {
        /// Reason for skipping.
        reason: String,
    },
    /// Vector was malformed.
    Error {
        /// Error message.
        message: String,
    },
}

impl TestResult {
    /// Returns true if this is a passing result.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns true if this is a failing result.
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail { .. })
    }

    fn compare(expected: &str, actual: String) -> Self {
        let expected = expected.to_lowercase();
        if expected == actual {
            Self::Pass
        } else {
            Self::Fail { expected, actual }
        }
    }

    fn missing(field: &str) -> Self {
        Self::Error {
            message: format!("Missing '{}'", field),
        }
    }
}

/// Results from running the corpus.
#[derive(Debug, Default)]
pub struct CorpusResults {
    /// Number of tests that passed.
    pub passed: usize,
    /// Number of tests that failed.
    pub failed: usize,
    /// Number of tests that were skipped.
    pub skipped: usize,
    /// Number of malformed vectors.
    pub errors: usize,
    /// Detailed results for each test.
    pub details: Vec<(String, TestResult)>,
}

impl CorpusResults {
    /// Create a new empty results container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a test result.
    pub fn record(&mut self, id: &str, result: TestResult) {
        match &result {
            TestResult::Pass => self.passed += 1,
            TestResult::Fail { .. } => self.failed += 1,
            TestResult::Skip { .. } => self.skipped += 1,
            TestResult::Error { .. } => self.errors += 1,
        }
        self.details.push((id.to_string(), result));
    }

    /// Get total number of tests run.
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped + self.errors
    }

    /// Returns true if no test failed or errored.
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }

    /// Get a summary string of the results.
    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} failed, {} skipped, {} errors (total: {})",
            self.passed,
            self.failed,
            self.skipped,
            self.errors,
            self.total()
        )
    }

    /// Failures and errors, in corpus order.
    pub fn problems(&self) -> impl Iterator<Item = &(String, TestResult)> {
        self.details
            .iter()
            .filter(|(_, r)| matches!(r, TestResult::Fail { .. } | TestResult::Error { .. }))
    }
}

/// Corpus runner that executes test vectors.
pub struct CorpusRunner {
    corpus: Corpus,
}

impl CorpusRunner {
    /// Load corpus from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> ConformanceResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Parse corpus JSON text.
    pub fn from_json(content: &str) -> ConformanceResult<Self> {
        let corpus: Corpus = serde_json::from_str(content)?;
        Ok(Self { corpus })
    }

    /// Get the corpus manifest.
    pub fn manifest(&self) -> &CorpusManifest {
        &self.corpus.manifest
    }

    /// Get the number of test vectors.
    pub fn vector_count(&self) -> usize {
        self.corpus.vectors.len()
    }

    /// Run all test vectors and return results.
    pub fn run_all(&self) -> CorpusResults {
        let mut results = CorpusResults::new();

        for vector in &self.corpus.vectors {
            let result = self.run_vector(vector);
            results.record(&vector.id, result);
        }

        results
    }

    /// Run a single test vector.
    fn run_vector(&self, vector: &TestVector) -> TestResult {
        match vector.op.as_str() {
            "keccak256" => self.run_keccak256(vector),
            "keccak256_utf8" => self.run_keccak256_utf8(vector),
            "keccak256_chunked" => self.run_keccak256_chunked(vector),
            "function_selector" => self.run_function_selector(vector),
            "keccak_f" => self.run_keccak_f(vector),
            _ => TestResult::Skip {
                reason: format!("Unknown operation: {}", vector.op),
            },
        }
    }

    fn run_keccak256(&self, vector: &TestVector) -> TestResult {
        let Some(input) = str_field(&vector.input, "hex") else {
            return TestResult::missing("input.hex");
        };
        let Some(expected) = str_field(&vector.expected, "digest") else {
            return TestResult::missing("expected.digest");
        };

        let bytes = match hex::decode(input.strip_prefix("0x").unwrap_or(input)) {
            Ok(b) => b,
            Err(e) => {
                return TestResult::Error {
                    message: format!("Invalid hex: {}", e),
                }
            }
        };

        TestResult::compare(expected, hash_hex(&bytes, false))
    }

    fn run_keccak256_utf8(&self, vector: &TestVector) -> TestResult {
        let Some(text) = str_field(&vector.input, "text") else {
            return TestResult::missing("input.text");
        };
        let Some(expected) = str_field(&vector.expected, "digest") else {
            return TestResult::missing("expected.digest");
        };

        TestResult::compare(expected, hash_hex(text, false))
    }

    fn run_keccak256_chunked(&self, vector: &TestVector) -> TestResult {
        let Some(text) = str_field(&vector.input, "text") else {
            return TestResult::missing("input.text");
        };
        let chunk = match vector.input.get("chunk").and_then(|v| v.as_u64()) {
            Some(c) if c > 0 => c as usize,
            _ => return TestResult::missing("input.chunk"),
        };
        let Some(expected) = str_field(&vector.expected, "digest") else {
            return TestResult::missing("expected.digest");
        };

        let mut engine = Keccak256::new();
        for piece in text.as_bytes().chunks(chunk) {
            engine.update(piece);
        }
        TestResult::compare(expected, engine.finalize().to_hex(false))
    }

    fn run_function_selector(&self, vector: &TestVector) -> TestResult {
        let Some(signature) = str_field(&vector.input, "signature") else {
            return TestResult::missing("input.signature");
        };
        let Some(expected) = str_field(&vector.expected, "selector") else {
            return TestResult::missing("expected.selector");
        };

        let with_prefix = expected.starts_with("0x");
        TestResult::compare(expected, function_selector(signature, with_prefix))
    }

    fn run_keccak_f(&self, vector: &TestVector) -> TestResult {
        let input = match lanes_field(&vector.input) {
            Ok(lanes) => lanes,
            Err(message) => return TestResult::Error { message },
        };
        let expected = match lanes_field(&vector.expected) {
            Ok(lanes) => lanes,
            Err(message) => return TestResult::Error { message },
        };

        if input.len() != LANES {
            return TestResult::Error {
                message: format!("Expected {} input lanes, got {}", LANES, input.len()),
            };
        }
        // A vector must compare at least one lane
        if expected.is_empty() || expected.len() > LANES {
            return TestResult::Error {
                message: format!(
                    "Expected 1 to {} output lanes, got {}",
                    LANES,
                    expected.len()
                ),
            };
        }

        let mut state: State = [0u64; LANES];
        state.copy_from_slice(&input);
        permute(&mut state);

        let actual = &state[..expected.len()];
        if actual == expected.as_slice() {
            TestResult::Pass
        } else {
            TestResult::Fail {
                expected: format_lanes(&expected),
                actual: format_lanes(actual),
            }
        }
    }
}

fn str_field<'a>(value: &'a serde_json::Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(|v| v.as_str())
}

/// Parse `value.lanes` as a list of hex u64 words.
fn lanes_field(value: &serde_json::Value) -> Result<Vec<u64>, String> {
    let lanes = value
        .get("lanes")
        .and_then(|v| v.as_array())
        .ok_or_else(|| "Missing 'lanes'".to_string())?;

    lanes
        .iter()
        .map(|lane| {
            let text = lane.as_str().ok_or_else(|| "Lane is not a string".to_string())?;
            let text = text.strip_prefix("0x").unwrap_or(text);
            u64::from_str_radix(text, 16).map_err(|e| format!("Invalid lane '{}': {}", text, e))
        })
        .collect()
}

fn format_lanes(lanes: &[u64]) -> String {
    lanes
        .iter()
        .map(|lane| format!("{:016x}", lane))
        .collect::<Vec<_>>()
        .join(" ")
}
