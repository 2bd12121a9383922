//! Latitude Executor
//!
//! Runs a node definition against a list of input records, strictly in order.
//! For each record: resolve the operation's template fields against the record,
//! marshal parameters and messages into wire shape, dispatch the operation
//! through [`latitude_client::LatitudeApi`], and shape the result (or failure)
//! into a tagged output record.
//!
//! Failure handling follows the node's [`latitude_config::FailureMode`]:
//! abort stops at the first failed record, continue emits a failure record and
//! moves on.

mod error;
mod executor;
mod marshal;
mod output;
mod resolve;

pub use error::{ExecutionError, ResolveError};
pub use executor::NodeExecutor;
pub use marshal::{parse_messages, parse_parameters};
pub use output::{AbortedItem, ExecutionReport, ItemOutcome, SimplifiedOutput, simplify_output};
pub use resolve::resolve_operation;
