use std::path::PathBuf;

use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{method} {url} failed: {source}"))]
    RequestError {
        url: String,
        method: String,
        source: ureq::Error,
    },
    #[snafu(display("{message}"))]
    ResponseError { message: String },
    #[snafu(display("{provider}: {message}: {source}"))]
    ProviderError {
        provider: String,
        message: String,
        source: Box<dyn std::error::Error>,
    },
    #[snafu(display("Invalid configuration for {prefix}: {message}"))]
    ConfigError { message: String, prefix: String },
    #[snafu(display("Failed to read flip definitions from {}: {source}", path.display()))]
    FileError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Malformed flip definitions at line {line}: {message}"))]
    ConfigFormatError { line: usize, message: String },
    #[snafu(display("Application '{app}' not found in the configuration file"))]
    ApplicationNotFound { app: String },
    #[snafu(display("Failed to search records for {fqdn}: {source}"))]
    LookupFailure {
        fqdn: String,
        #[snafu(source(from(Error, Box::new)))]
        source: Box<Error>,
    },
    #[snafu(display("No A or CNAME records found for {fqdn}"))]
    NoMatchingRecord { fqdn: String },
    #[snafu(display("Refusing to flip {fqdn} to an empty answer set"))]
    EmptyAnswerSet { fqdn: String },
    #[snafu(display("Failed to flip {fqdn} {kind}: {source}"))]
    FlipError {
        fqdn: String,
        kind: String,
        #[snafu(source(from(Error, Box::new)))]
        source: Box<Error>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
