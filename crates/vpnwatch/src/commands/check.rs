//! Monitoring check handler.
//!
//! Prints exactly one line to stdout and returns the severity ordinal as
//! the process exit code. A collection failure never crashes the check;
//! it becomes an `Unknown` line naming the host. Inverted thresholds are
//! caught before any network I/O is attempted.

use std::time::Duration;

use secrecy::SecretString;

use vpnwatch_core::{CheckOutcome, DeviceConfig, Reading, Thresholds};

use crate::cli::CheckArgs;

/// Returns the severity ordinal; this handler is infallible by design.
pub fn handle(args: CheckArgs) -> i32 {
    let outcome = match Thresholds::new(args.warning, args.critical) {
        Ok(thresholds) => {
            let device = DeviceConfig::new(
                args.hostname,
                args.user,
                SecretString::from(args.password),
            )
            .with_port(args.port)
            .with_timeout(Duration::from_secs(args.timeout));

            match Reading::collect(&device) {
                Ok(reading) => CheckOutcome::classify(&reading, thresholds),
                Err(err) => CheckOutcome::from_failure(&err),
            }
        }
        Err(err) => CheckOutcome::from_failure(&err),
    };

    println!("{}", outcome.line);
    outcome.severity.exit_code()
}
