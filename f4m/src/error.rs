//! Fatal failures of a manifest parse.
//!
//! Only structurally required facts fail a parse: the document itself and its
//! root namespace. Everything else is dropped with a log line and never shows
//! up here.

use crate::networking::BoxError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("manifest url is empty")]
    EmptyUrl,

    #[error("url does not use an http scheme: {0}")]
    UnsupportedScheme(String),

    #[error("download of {url} failed: {source}")]
    Download {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("download of {url} returned http status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("download of {url} returned an empty body")]
    EmptyBody { url: String },

    #[error("xml syntax error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed xml: {0}")]
    MalformedXml(String),

    #[error("root element is `{found}`, expected `{expected}`")]
    UnexpectedRoot { expected: &'static str, found: String },

    #[error("manifest root element has no namespace")]
    MissingNamespace,

    #[error("namespace `{0}` is not an f4m namespace")]
    UnsupportedNamespace(String),

    #[error("stream-level manifest {url} contains no media")]
    EmptyStreamLevel { url: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
