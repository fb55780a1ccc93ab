use std::time::Duration;

use crate::credential::Credential;
use crate::session::READ_CHUNK_SIZE;

#[derive(Debug, Clone)]
pub struct RconClientConfig {
    pub address: String,
    pub(crate) credential: Credential,
    pub io_timeout: Duration,
    pub connect_timeout: Duration,
    pub keepalive_period: Duration,
    pub read_chunk_size: usize,
    pub auto_reconnect: bool,
}

pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_KEEPALIVE_PERIOD: Duration = Duration::from_secs(30);

impl RconClientConfig {
    /// `address` is a `host:port` pair. The password is hashed here and never stored.
    pub fn new(address: impl Into<String>, password: &str) -> Self {
        Self {
            address: address.into(),
            credential: Credential::from_password(password),
            io_timeout: DEFAULT_IO_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            keepalive_period: DEFAULT_KEEPALIVE_PERIOD,
            read_chunk_size: READ_CHUNK_SIZE,
            auto_reconnect: false,
        }
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// How long a single frame read or write may take before failing.
    pub fn io_timeout(mut self, t: Duration) -> Self { self.io_timeout = t; self }

    /// How long the client waits for the TCP connection to be established.
    pub fn connect_timeout(mut self, t: Duration) -> Self { self.connect_timeout = t; self }

    /// Period between TCP keep-alive probes on an idle connection.
    pub fn keepalive_period(mut self, t: Duration) -> Self { self.keepalive_period = t; self }

    /// Size of each read from the socket. A read shorter than this ends the frame,
    /// so it must match what the server flushes per write.
    pub fn read_chunk_size(mut self, n: usize) -> Self { self.read_chunk_size = n.max(1); self }

    /// Whether a dropped connection is re-established on the next command.
    pub fn auto_reconnect(mut self, v: bool) -> Self { self.auto_reconnect = v; self }
}

impl Default for RconClientConfig {
    fn default() -> Self {
        Self::new(String::new(), "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::digest;

    #[test]
    fn new_applies_documented_defaults() {
        let config = RconClientConfig::new("127.0.0.1:7777", "secret");

        assert_eq!(config.address, "127.0.0.1:7777");
        assert_eq!(config.credential().as_str(), digest("secret"));
        assert_eq!(config.io_timeout, Duration::from_secs(5));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.keepalive_period, Duration::from_secs(30));
        assert_eq!(config.read_chunk_size, 256);
        assert!(!config.auto_reconnect);
    }

    #[test]
    fn chunk_size_is_never_zero() {
        let config = RconClientConfig::default().read_chunk_size(0);
        assert_eq!(config.read_chunk_size, 1);
    }

    #[test]
    fn debug_output_hides_password_material() {
        let config = RconClientConfig::new("host:1", "secret");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("secret"));
        assert!(!printed.contains(&digest("secret")));
    }
}
