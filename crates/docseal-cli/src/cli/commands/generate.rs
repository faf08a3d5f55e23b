//! `docseal generate` - print a signed payload block without touching any
//! file, for manual embedding or tests.

use anyhow::Result;

use docseal_core::{config, payload, sign, Authenticator};

use super::mask_identity;
use crate::cli::args::GenerateArgs;

pub fn cmd_generate(args: GenerateArgs) -> i32 {
    match run_generate(&args) {
        Ok(block) => {
            println!("Generated payload for {}:", mask_identity(&args.identity));
            println!("{}", "-".repeat(60));
            println!("{block}");
            println!("{}", "-".repeat(60));
            0
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            1
        }
    }
}

fn run_generate(args: &GenerateArgs) -> Result<String> {
    let auth = Authenticator::new(config::resolve_secret(args.key.clone()));
    let payload = sign::generate_payload(
        &auth,
        &args.identity,
        args.doc_type,
        args.issuer.as_deref(),
    )?;
    Ok(payload::encode(&payload))
}
