//! Bootstrap for the shared embedded PostgreSQL cluster.
//!
//! `pg-embed-setup-unpriv` defaults to `/var/tmp` for installation and data
//! directories. Sandboxed runners block writes there, so when either
//! `PG_RUNTIME_DIR` or `PG_DATA_DIR` is missing both are pointed at the target
//! directory for the duration of the bootstrap.
//!
//! The bootstrap panics instead of returning an error in some environments,
//! for example when running as root without a `pg_worker` helper. Those
//! panics are reported as setup failures so the skip policy applies.

use std::any::Any;
use std::panic;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::ClusterHandle;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;

static PG_EMBED_BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Maximum number of retry attempts for transient network errors.
const MAX_RETRIES: u32 = 3;

/// Base delay between retry attempts (doubles with each retry).
const RETRY_DELAY_MS: u64 = 500;

fn pg_embed_target_dir() -> PathBuf {
    if let Some(target_dir) = std::env::var_os("CARGO_TARGET_DIR") {
        return PathBuf::from(target_dir).join("pg-embed");
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("target")
        .join("pg-embed")
}

fn create_pg_embed_dirs() -> Result<(PathBuf, PathBuf), std::io::Error> {
    let base = pg_embed_target_dir().join("courses");
    let runtime_dir = base.join("install");
    let data_dir = base.join("data");

    std::fs::create_dir_all(&runtime_dir)?;
    std::fs::create_dir_all(&data_dir)?;

    Ok((runtime_dir, data_dir))
}

/// Returns true if the error message suggests a transient network issue.
fn is_transient_error(err: &str) -> bool {
    let transient_patterns = [
        "error decoding response body",
        "connection reset",
        "connection refused",
        "timed out",
        "temporarily unavailable",
        "dns error",
    ];

    let err_lower = err.to_lowercase();
    transient_patterns
        .iter()
        .any(|pattern| err_lower.contains(pattern))
}

/// Render a caught panic payload as a setup failure reason.
fn panic_reason(payload: &(dyn Any + Send)) -> String {
    let message = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    format!("embedded cluster bootstrap panicked: {message}")
}

fn bootstrap_cluster() -> Result<&'static ClusterHandle, String> {
    match panic::catch_unwind(shared_cluster_handle) {
        Ok(result) => result.map_err(|err| format!("{err:?}")),
        Err(payload) => Err(panic_reason(payload.as_ref())),
    }
}

/// Returns the process-wide embedded cluster, starting it on first use.
///
/// Retries up to [`MAX_RETRIES`] times on transient errors since the binary
/// download can fail intermittently.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let _bootstrap_guard = PG_EMBED_BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let needs_override =
        std::env::var_os("PG_RUNTIME_DIR").is_none() || std::env::var_os("PG_DATA_DIR").is_none();

    let _env_guard = if needs_override {
        let (runtime_dir, data_dir) = create_pg_embed_dirs().map_err(|err| err.to_string())?;

        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(runtime_dir.to_string_lossy().into_owned())),
            ("PG_DATA_DIR", Some(data_dir.to_string_lossy().into_owned())),
        ]))
    } else {
        None
    };

    let mut last_error = String::new();
    for attempt in 0..=MAX_RETRIES {
        match bootstrap_cluster() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                last_error = err;
                if attempt < MAX_RETRIES && is_transient_error(&last_error) {
                    let delay = Duration::from_millis(RETRY_DELAY_MS * (1 << attempt));
                    eprintln!(
                        "pg-embed: transient error on attempt {}/{}, retrying in {delay:?}: {last_error}",
                        attempt + 1,
                        MAX_RETRIES + 1,
                    );
                    std::thread::sleep(delay);
                } else {
                    break;
                }
            }
        }
    }

    Err(last_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn panic_reason_reads_string_payloads() {
        let payload = panic::catch_unwind(|| panic!("pg_worker binary was not found"))
            .expect_err("closure panics");
        assert_eq!(
            panic_reason(payload.as_ref()),
            "embedded cluster bootstrap panicked: pg_worker binary was not found"
        );
    }

    #[rstest]
    fn panic_reason_reads_formatted_payloads() {
        let missing = "PG_EMBEDDED_WORKER";
        let payload = panic::catch_unwind(|| panic!("{missing} is not set"))
            .expect_err("closure panics");
        assert!(panic_reason(payload.as_ref()).ends_with("PG_EMBEDDED_WORKER is not set"));
    }

    #[rstest]
    #[case("Connection refused by peer", true)]
    #[case("operation timed out", true)]
    #[case("pg_worker binary was not found", false)]
    fn transient_errors_are_detected(#[case] message: &str, #[case] expected: bool) {
        assert_eq!(is_transient_error(message), expected);
    }
}
