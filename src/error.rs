use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum EtlError {
    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("SWAPI request failed: {0}")]
    SwapiHttp(String),

    #[error("SWAPI returned status {status}: {message}")]
    SwapiStatus { status: u16, message: String },

    #[error("failed to decode SWAPI {resource} payload: {message}")]
    SwapiDecode { resource: String, message: String },

    #[error("received {received} {resource} but {expected} were expected")]
    #[diagnostic(help("the remote collection changed while paging or a page was dropped"))]
    CountMismatch {
        resource: String,
        received: usize,
        expected: usize,
    },

    #[error("{entity} {field} references {url}, which was never assigned an identifier")]
    UnresolvedReference {
        entity: String,
        field: String,
        url: String,
    },

    #[error("relationship {node_field}/{related_field} between {node_id} and {related_id} is listed twice")]
    #[diagnostic(help("each relationship must be listed from exactly one side of the source data"))]
    DuplicateEdge {
        node_id: String,
        node_field: String,
        related_id: String,
        related_field: String,
    },

    #[error("inserted only {inserted} documents into {collection} out of {expected} expected")]
    PartialInsert {
        collection: String,
        inserted: usize,
        expected: usize,
    },

    #[error("failed to serialize {collection} document: {message}")]
    Serialize { collection: String, message: String },

    #[error("{0} is not a collection of this store")]
    UnknownCollection(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
