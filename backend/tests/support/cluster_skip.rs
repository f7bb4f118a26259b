//! Skip policy for suites that need embedded PostgreSQL.
//!
//! The embedded cluster downloads PostgreSQL binaries on first use, which is
//! not possible on every machine. Suites skip with a marker by default and
//! fail hard when `COURSES_REQUIRE_TEST_CLUSTER` is truthy, as it is in CI.

/// Returns true when `COURSES_REQUIRE_TEST_CLUSTER` is "1", "true" or "yes"
/// (case-insensitive).
pub fn require_test_cluster() -> bool {
    std::env::var("COURSES_REQUIRE_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Handles embedded cluster setup failures consistently across suites.
///
/// Prints a skip marker and returns `None`, or panics when the cluster is
/// required.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if require_test_cluster() {
        panic!("Test cluster setup failed: {reason}. Unset COURSES_REQUIRE_TEST_CLUSTER to skip.");
    }
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}
