//! # VTSearch Common Library
//!
//! Shared code for the VTSearch clip browser including:
//! - Clip and dataset models
//! - Dataset sources and the dataset registry
//! - The session (current dataset selection) and its vote ledger
//! - Evaluation query definitions
//! - Configuration loading

pub mod clip;
pub mod config;
pub mod dataset;
pub mod error;
pub mod eval;
pub mod inclusion;
pub mod registry;
pub mod session;
pub mod votes;

pub use clip::{Clip, ClipDetail, ClipId, ClipSummary};
pub use dataset::{Dataset, DatasetSource, JsonDirSource};
pub use error::{Error, Result};
pub use eval::{EvalDataset, EvalQuery, EvalRegistry};
pub use inclusion::Inclusion;
pub use registry::{DatasetInfo, DatasetRegistry};
pub use session::Session;
pub use votes::{VoteLedger, VoteMark, VoteSnapshot};
