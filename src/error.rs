//! Rich diagnostic error types for the fixture materializer.
//!
//! Every failure the materializer can hit falls into one of four kinds:
//! a broken authored invariant, a filesystem failure, an encoding failure,
//! or a file that is not a fixture this build understands. Each variant
//! carries a miette error code and help text so the binary can report
//! exactly which kind occurred.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum DatasetError {
    #[error("data integrity violated ({rule}): {detail}")]
    #[diagnostic(
        code(role_fixture::integrity),
        help(
            "The hand-authored literals in `fixture.rs` break a dataset invariant. \
             Re-check the sentence named in the message: the word, table and label \
             sequences must line up, and every id must exist in its dictionary."
        )
    )]
    Integrity { rule: &'static str, detail: String },

    #[error("I/O error on {path}: {source}")]
    #[diagnostic(
        code(role_fixture::io),
        help(
            "A filesystem operation failed. Check that the parent directory exists, \
             has correct permissions, and that the disk is not full."
        )
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {message}")]
    #[diagnostic(
        code(role_fixture::serde),
        help(
            "Failed to encode or decode the dataset payload. \
             If you are reading a file, it is probably truncated or corrupt; regenerate it."
        )
    )]
    Serialization { message: String },

    #[error("not a readable fixture file: {reason}")]
    #[diagnostic(
        code(role_fixture::format),
        help(
            "The file header does not match this build's fixture format. \
             Regenerate the file with the `role-fixture` binary."
        )
    )]
    Format { reason: String },
}

pub type DatasetResult<T> = std::result::Result<T, DatasetError>;
