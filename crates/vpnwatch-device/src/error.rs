// ── Device error types ──
//
// Every failure mode of a collection attempt, tagged so callers can map
// them to monitoring severities without inspecting strings. All variants
// name the host: the messages end up verbatim in operator-facing output.

use thiserror::Error;

/// Failure taxonomy for a Gaia management session.
#[derive(Debug, Error)]
pub enum Error {
    /// The TCP connection or SSH transport could not be established.
    #[error("cannot connect to device {host}: {source}")]
    Connection {
        host: String,
        #[source]
        source: std::io::Error,
    },

    /// Session negotiation or a read exceeded the response budget.
    #[error("timeout for device {host} after {timeout_secs}s")]
    Timeout { host: String, timeout_secs: u64 },

    /// The gateway rejected the credentials.
    #[error("invalid credentials for device {host}")]
    Authentication { host: String },

    /// The remote command ran but did not succeed.
    #[error("command '{command}' failed on {host}: {message}")]
    Command {
        host: String,
        command: String,
        message: String,
    },

    /// The command output did not match the expected table shape.
    #[error("unexpected table output from {host}: {reason}")]
    Parse { host: String, reason: String },
}
