//! Device access for Checkpoint Gaia gateways.
//!
//! Opens a blocking SSH management session, issues the fixed kernel-table
//! summary command, and parses the current/peak VPN user counts out of its
//! tabular output. One session per invocation; no retries, no pooling.

mod error;
mod session;
mod table;

pub use error::Error;
pub use session::{DEFAULT_SSH_PORT, DeviceConfig, GaiaSession};
pub use table::TableCounts;

/// The management-plane command that dumps the remote-access VPN user
/// table summary. Issued verbatim on every collection.
pub const VPN_USERS_COMMAND: &str = "fw tab -t userc_users -s";
