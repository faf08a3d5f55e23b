//! Interactive menu, for operators who prefer prompts over flags.

use std::path::PathBuf;

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Select};

use docseal_core::{config, payload, sign, verify, Authenticator, DocumentType, Verdict};

pub fn run() -> i32 {
    match menu_loop() {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {e:#}");
            1
        }
    }
}

fn menu_loop() -> Result<()> {
    println!("docseal — prepare documents for notarization\n");
    let theme = ColorfulTheme::default();
    let auth = Authenticator::new(config::resolve_secret(None));

    loop {
        let choice = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(&[
                "Sign a document",
                "Verify a signed document",
                "Generate payload only",
                "Exit",
            ])
            .default(0)
            .interact()?;

        match choice {
            0 => sign_flow(&theme, &auth)?,
            1 => verify_flow(&theme, &auth)?,
            2 => generate_flow(&theme, &auth)?,
            _ => break,
        }
        println!();
    }
    Ok(())
}

fn sign_flow(theme: &ColorfulTheme, auth: &Authenticator) -> Result<()> {
    let file: String = Input::with_theme(theme)
        .with_prompt("File to sign")
        .interact_text()?;
    let path = PathBuf::from(file);
    let identity = prompt_identity(theme)?;
    let doc_type = prompt_doc_type(theme)?;
    let issuer = prompt_issuer(theme)?;

    match sign::sign_file(auth, &path, &identity, doc_type, issuer.as_deref(), None) {
        Ok(outcome) => {
            println!("Signed: {}", outcome.output.display());
            println!("Use the signed copy in the notarization app.");
        }
        Err(e) => println!("Signing failed: {e}"),
    }
    Ok(())
}

fn verify_flow(theme: &ColorfulTheme, auth: &Authenticator) -> Result<()> {
    let file: String = Input::with_theme(theme)
        .with_prompt("File to verify")
        .interact_text()?;
    let path = PathBuf::from(file);
    let identity = prompt_identity(theme)?;
    let doc_type = prompt_doc_type(theme)?;

    match verify::verify_file(auth, &path, &identity, doc_type) {
        Ok(Verdict::Valid { payload }) => {
            println!("Verification PASSED");
            println!("  Issued at: {}", payload.timestamp);
            println!("  Issuer:    {}", payload.issuer);
        }
        Ok(verdict) => println!("Verification FAILED: {}", verdict.describe()),
        Err(e) => println!("Verification failed: {e}"),
    }
    Ok(())
}

fn generate_flow(theme: &ColorfulTheme, auth: &Authenticator) -> Result<()> {
    let identity = prompt_identity(theme)?;
    let doc_type = prompt_doc_type(theme)?;
    let issuer = prompt_issuer(theme)?;

    match sign::generate_payload(auth, &identity, doc_type, issuer.as_deref()) {
        Ok(p) => {
            println!("{}", "-".repeat(60));
            println!("{}", payload::encode(&p));
            println!("{}", "-".repeat(60));
            println!("Add this block to your document by hand.");
        }
        Err(e) => println!("Generation failed: {e}"),
    }
    Ok(())
}

fn prompt_identity(theme: &ColorfulTheme) -> Result<String> {
    let identity: String = Input::with_theme(theme)
        .with_prompt("Identity number (12 digits)")
        .validate_with(|s: &String| {
            if s.len() == 12 && s.chars().all(|c| c.is_ascii_digit()) {
                Ok(())
            } else {
                Err("identity number must be exactly 12 digits")
            }
        })
        .interact_text()?;
    Ok(identity)
}

fn prompt_doc_type(theme: &ColorfulTheme) -> Result<DocumentType> {
    let labels: Vec<String> = DocumentType::ALL
        .iter()
        .map(|t| format!("{} ({})", t.label(), t.code()))
        .collect();
    let idx = Select::with_theme(theme)
        .with_prompt("Document type")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(DocumentType::ALL[idx])
}

fn prompt_issuer(theme: &ColorfulTheme) -> Result<Option<String>> {
    let issuer: String = Input::with_theme(theme)
        .with_prompt("Issuing authority")
        .default("Blockchain Notary Authority".to_string())
        .interact_text()?;
    Ok(if issuer.trim().is_empty() {
        None
    } else {
        Some(issuer)
    })
}
