//! `docseal sign` - embed a provenance record into a document.

use anyhow::{Context, Result};

use docseal_core::sign::SignOutcome;
use docseal_core::{config, sign, Authenticator};

use super::mask_identity;
use crate::cli::args::SignArgs;

pub fn cmd_sign(args: SignArgs) -> i32 {
    match run_sign(&args) {
        Ok(outcome) => {
            println!("Document signed:");
            println!("  Input:  {}", args.file.display());
            println!("  Output: {}", outcome.output.display());
            println!("  Owner:  {}", mask_identity(&args.identity));
            println!("  Type:   {}", outcome.payload.document_type.label());
            println!("  Issuer: {}", outcome.payload.issuer);
            0
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            1
        }
    }
}

fn run_sign(args: &SignArgs) -> Result<SignOutcome> {
    let auth = Authenticator::new(config::resolve_secret(args.key.clone()));
    sign::sign_file(
        &auth,
        &args.file,
        &args.identity,
        args.doc_type,
        args.issuer.as_deref(),
        args.out.as_deref(),
    )
    .with_context(|| format!("failed to sign {}", args.file.display()))
}
