//! `version` command

use serde_json::json;

use crate::cli::args::{OutputFormat, VersionArgs};

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Print the package name and version.
pub fn run(args: &VersionArgs) {
    match args.format {
        OutputFormat::Human => println!("{NAME} {VERSION}"),
        OutputFormat::Json => println!("{}", json!({ "name": NAME, "version": VERSION })),
    }
}
