use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use docseal_core::DocumentType;

#[derive(Parser)]
#[command(
    name = "docseal",
    version,
    about = "Seal documents with a tamper-evident provenance record before notarization"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Embed a signed provenance record into a document
    Sign(SignArgs),
    /// Check a document against an expected owner and document type
    Verify(VerifyArgs),
    /// Print the encoded payload block without touching any file
    Generate(GenerateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SignArgs {
    /// Document to sign
    pub file: PathBuf,

    /// Owner's identity number (hashed immediately; never stored or shown)
    #[arg(long, short = 'i')]
    pub identity: String,

    /// Document type code (e.g. birth_certificate)
    #[arg(long, short = 't', value_name = "CODE")]
    pub doc_type: DocumentType,

    /// Issuing authority
    #[arg(long)]
    pub issuer: Option<String>,

    /// Output path (default: <stem>_signed.<ext> next to the input)
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    /// MAC secret (default: $DOCSEAL_SIGNING_KEY, then $SECRET_KEY)
    #[arg(long)]
    pub key: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct VerifyArgs {
    /// Signed document to check
    pub file: PathBuf,

    /// Expected owner's identity number
    #[arg(long, short = 'i')]
    pub identity: String,

    /// Expected document type code
    #[arg(long, short = 't', value_name = "CODE")]
    pub doc_type: DocumentType,

    /// Emit the verdict as JSON (for the notarization relay)
    #[arg(long)]
    pub json: bool,

    /// Quiet mode: exit code only, no output
    #[arg(long, short)]
    pub quiet: bool,

    /// MAC secret (default: $DOCSEAL_SIGNING_KEY, then $SECRET_KEY)
    #[arg(long)]
    pub key: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Owner's identity number
    #[arg(long, short = 'i')]
    pub identity: String,

    /// Document type code
    #[arg(long, short = 't', value_name = "CODE")]
    pub doc_type: DocumentType,

    /// Issuing authority
    #[arg(long)]
    pub issuer: Option<String>,

    /// MAC secret (default: $DOCSEAL_SIGNING_KEY, then $SECRET_KEY)
    #[arg(long)]
    pub key: Option<String>,
}
