//! Print the catalog's OpenAPI document.

use std::io;

use book_catalog::doc::openapi_with_issuer;
use clap::{Parser, ValueEnum};

/// Output encodings for the dumped document.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    #[default]
    Json,
    Yaml,
}

/// `openapi-dump` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "openapi-dump",
    about = "Print the book catalog OpenAPI document",
    version
)]
struct CliArgs {
    /// Token issuer whose OAuth2 implicit flow is advertised.
    #[arg(long, value_name = "url", env = "CATALOG_JWT_ISSUER")]
    issuer: Option<String>,
    /// Output encoding.
    #[arg(long, value_enum, default_value_t)]
    format: Format,
}

fn main() -> io::Result<()> {
    let args = CliArgs::parse();
    let issuer = args.issuer.as_deref().filter(|value| !value.trim().is_empty());
    let doc = openapi_with_issuer(issuer);
    let rendered = match args.format {
        Format::Json => doc.to_pretty_json().map_err(io::Error::other)?,
        Format::Yaml => doc.to_yaml().map_err(io::Error::other)?,
    };
    println!("{rendered}");
    Ok(())
}
