//! Latitude Config
//!
//! This crate contains the serializable configuration types for the Latitude
//! node runner. These types represent a node definition before it is resolved
//! and executed against input records.
//!
//! Configuration can be loaded from:
//! - JSON files (via CLI with `latitude-node run node.json`)
//! - Embedded JSON blobs (workflow storage)
//!
//! The executor takes these types, resolves their template fields against each
//! input record, and dispatches the configured operation to the gateway.

mod credentials;
mod entries;
mod operation;

pub use credentials::Credentials;
pub use entries::{MessageEntry, MessageRole, ParameterEntry};
pub use operation::{FailureMode, NodeDef, OperationDef};
