// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # role-fixture
//!
//! Materializes a small, hand-authored role-labeling dataset (definition
//! sentences tagged with semantic roles such as `B-supertype`) into a
//! versioned binary file.
//!
//! ## Layout
//!
//! - **Records** (`dataset`): `Split`, `Dictionaries`, `DatasetBundle` and
//!   their invariants
//! - **Fixture** (`fixture`): the literal fold-3 data
//! - **Persistence** (`persist`): magic + version header, bincode payload
//! - **Facade** (`materializer`): build, validate, write, report
//!
//! ## Library usage
//!
//! ```no_run
//! use role_fixture::fixture::build_dataset;
//! use role_fixture::persist::{load, persist};
//!
//! let bundle = build_dataset();
//! persist(&bundle, "data_fold3.bin".as_ref()).unwrap();
//! assert_eq!(load("data_fold3.bin".as_ref()).unwrap(), bundle);
//! ```

pub mod dataset;
pub mod error;
pub mod fixture;
pub mod materializer;
pub mod persist;
