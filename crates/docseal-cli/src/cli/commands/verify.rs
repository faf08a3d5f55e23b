//! `docseal verify` - check a document's provenance record.

use anyhow::{Context, Result};
use chrono::DateTime;
use serde::Serialize;
use tracing::debug;

use docseal_core::{config, verify, Authenticator, ProvenancePayload, Verdict};

use crate::cli::args::VerifyArgs;

/// Exit code for I/O failures, outside the verdict range.
const IO_FAILURE: i32 = 3;

/// JSON report consumed by the notarization relay.
#[derive(Serialize)]
struct VerifyReport<'a> {
    valid: bool,
    verdict: &'static str,
    reason: Option<String>,
    payload: Option<&'a ProvenancePayload>,
}

pub fn cmd_verify(args: VerifyArgs) -> i32 {
    match run_verify(&args) {
        Ok(verdict) => {
            if !args.quiet {
                report(&args, &verdict);
            }
            verdict.exit_code()
        }
        Err(e) => {
            if !args.quiet {
                eprintln!("error: {e:#}");
            }
            IO_FAILURE
        }
    }
}

fn run_verify(args: &VerifyArgs) -> Result<Verdict> {
    let auth = Authenticator::new(config::resolve_secret(args.key.clone()));
    let verdict = verify::verify_file(&auth, &args.file, &args.identity, args.doc_type)
        .with_context(|| format!("failed to verify {}", args.file.display()))?;
    debug!(verdict = verdict.name(), file = %args.file.display(), "verification complete");
    Ok(verdict)
}

fn report(args: &VerifyArgs, verdict: &Verdict) {
    if args.json {
        let payload = match verdict {
            Verdict::Valid { payload } => Some(payload),
            _ => None,
        };
        let report = VerifyReport {
            valid: verdict.is_valid(),
            verdict: verdict.name(),
            reason: (!verdict.is_valid()).then(|| verdict.describe()),
            payload,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("report serializes")
        );
        return;
    }

    match verdict {
        Verdict::Valid { payload } => {
            println!("Verification PASSED");
            println!("  Owner match: yes");
            println!("  Type match:  yes");
            println!("  Issued at:   {}", render_timestamp(payload.timestamp));
            println!("  Issuer:      {}", payload.issuer);
        }
        other => {
            println!("Verification FAILED");
            println!("  Reason: {}", other.describe());
        }
    }
}

fn render_timestamp(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| ts.to_string())
}
