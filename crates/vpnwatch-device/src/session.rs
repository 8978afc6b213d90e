//! Blocking SSH session against a Gaia gateway.
//!
//! Wraps `ssh2` with the connect → authenticate → exec → disconnect
//! lifecycle the collection workflows need, and classifies transport
//! failures into the crate's [`Error`] taxonomy.

use std::io::Read;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use ssh2::Session;

use crate::VPN_USERS_COMMAND;
use crate::error::Error;
use crate::table::{self, TableCounts};

/// Default SSH management port.
pub const DEFAULT_SSH_PORT: u16 = 22;

/// Connection parameters for one management session.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Hostname or IP address of the gateway.
    pub host: String,
    /// SSH port.
    pub port: u16,
    /// Gaia user name.
    pub username: String,
    /// Gaia user password.
    pub password: SecretString,
    /// Budget for connect, negotiation, and each read.
    pub timeout: Duration,
}

impl DeviceConfig {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_SSH_PORT,
            username: username.into(),
            password,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// An authenticated management session.
pub struct GaiaSession {
    host: String,
    timeout: Duration,
    session: Session,
}

impl GaiaSession {
    /// Establish and authenticate a session.
    pub fn connect(config: &DeviceConfig) -> Result<Self, Error> {
        let addr = (config.host.as_str(), config.port)
            .to_socket_addrs()
            .map_err(|e| Error::Connection {
                host: config.host.clone(),
                source: e,
            })?
            .next()
            .ok_or_else(|| Error::Connection {
                host: config.host.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "hostname did not resolve to any address",
                ),
            })?;

        let tcp = TcpStream::connect_timeout(&addr, config.timeout)
            .map_err(|e| classify_io(&config.host, config.timeout, e))?;

        let mut session = Session::new().map_err(|e| Error::Connection {
            host: config.host.clone(),
            source: std::io::Error::other(e),
        })?;
        session.set_tcp_stream(tcp);
        session.set_timeout(timeout_ms(config.timeout));

        session.handshake().map_err(|e| {
            if is_timeout(&e) {
                Error::Timeout {
                    host: config.host.clone(),
                    timeout_secs: config.timeout.as_secs(),
                }
            } else {
                Error::Connection {
                    host: config.host.clone(),
                    source: std::io::Error::other(e),
                }
            }
        })?;

        session
            .userauth_password(&config.username, config.password.expose_secret())
            .map_err(|e| {
                if is_timeout(&e) {
                    Error::Timeout {
                        host: config.host.clone(),
                        timeout_secs: config.timeout.as_secs(),
                    }
                } else {
                    Error::Authentication {
                        host: config.host.clone(),
                    }
                }
            })?;
        if !session.authenticated() {
            return Err(Error::Authentication {
                host: config.host.clone(),
            });
        }

        tracing::debug!(host = %config.host, user = %config.username, "management session established");
        Ok(Self {
            host: config.host.clone(),
            timeout: config.timeout,
            session,
        })
    }

    /// Run the fixed VPN user table command and parse its output.
    pub fn vpn_user_counts(&mut self) -> Result<TableCounts, Error> {
        let output = self.run(VPN_USERS_COMMAND)?;
        table::parse_summary(&self.host, &output)
    }

    /// Run a single command on the gateway and collect its stdout.
    pub fn run(&mut self, command: &str) -> Result<String, Error> {
        let mut channel = self
            .session
            .channel_session()
            .map_err(|e| self.classify_exec(command, &e))?;
        channel
            .exec(command)
            .map_err(|e| self.classify_exec(command, &e))?;

        let mut output = String::new();
        channel
            .read_to_string(&mut output)
            .map_err(|e| classify_io(&self.host, self.timeout, e))?;

        if let Err(e) = channel.wait_close() {
            tracing::debug!(host = %self.host, error = %e, "channel close failed");
        }
        let status = channel.exit_status().unwrap_or(0);
        if status != 0 {
            return Err(Error::Command {
                host: self.host.clone(),
                command: command.to_owned(),
                message: format!("exit status {status}"),
            });
        }
        Ok(output)
    }

    /// End the session. Teardown failures are ignored.
    pub fn close(self) {
        let _ = self.session.disconnect(None, "session complete", None);
    }

    fn classify_exec(&self, command: &str, err: &ssh2::Error) -> Error {
        if is_timeout(err) {
            Error::Timeout {
                host: self.host.clone(),
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Command {
                host: self.host.clone(),
                command: command.to_owned(),
                message: err.to_string(),
            }
        }
    }
}

// libssh2 reports a blown negotiation/read budget as LIBSSH2_ERROR_TIMEOUT.
const LIBSSH2_ERROR_TIMEOUT: i32 = -9;

fn is_timeout(err: &ssh2::Error) -> bool {
    matches!(err.code(), ssh2::ErrorCode::Session(LIBSSH2_ERROR_TIMEOUT))
}

fn classify_io(host: &str, timeout: Duration, err: std::io::Error) -> Error {
    match err.kind() {
        std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => Error::Timeout {
            host: host.to_owned(),
            timeout_secs: timeout.as_secs(),
        },
        _ => Error::Connection {
            host: host.to_owned(),
            source: err,
        },
    }
}

fn timeout_ms(timeout: Duration) -> u32 {
    u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX)
}
