use tokio::{io::{AsyncRead, AsyncWrite}, net::TcpStream};

use crate::{
    client::{ClientState, RconClient},
    errors::RconError,
    response::CommandResponse,
    session::Liveness,
};

impl RconClient<TcpStream> {
    /// Sends `command` and returns the decoded response.
    ///
    /// A connection the server has silently closed is noticed before sending.
    /// An `Idle` client either fails with `NotConnected` or, with
    /// `auto_reconnect`, reconnects once and sends. Errors after that point are
    /// returned as-is and never retried.
    pub async fn write(&mut self, command: &str) -> Result<CommandResponse, RconError> {
        if self.state == ClientState::Connected && self.probe().await == Liveness::Closed {
            log::warn!("Connection to {} was closed by the server", self.client_config.address);
        }

        if self.state != ClientState::Connected {
            if !self.client_config.auto_reconnect {
                return Err(RconError::NotConnected);
            }

            log::warn!("Reconnecting to {}", self.client_config.address);
            self.connect().await?;
        }

        self.exchange(command).await
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> RconClient<S> {
    /// Checks whether the peer is still there. A closed peer releases the
    /// session and moves the client to `Idle`.
    pub async fn probe(&mut self) -> Liveness {
        let Some(session) = self.session.as_mut() else {
            self.state = ClientState::Idle;
            return Liveness::Closed;
        };

        let liveness = session.probe_liveness().await;
        if liveness == Liveness::Closed {
            self.close();
        }
        liveness
    }

    /// One command round-trip on the current session, with no liveness check
    /// and no reconnect.
    ///
    /// A transport failure closes the session. A response that fails to decode
    /// leaves the client `Connected`.
    pub async fn exchange(&mut self, command: &str) -> Result<CommandResponse, RconError> {
        if self.state != ClientState::Connected {
            return Err(RconError::NotConnected);
        }

        let io_timeout = self.client_config.io_timeout;
        let session = self.session.as_mut().ok_or(RconError::NotConnected)?;

        log::debug!("Executing command: {:?}", command);
        let round_trip = async {
            session.write_frame(command.as_bytes(), io_timeout).await?;
            session.read_frame(io_timeout).await
        };

        let frame = match round_trip.await {
            Ok(frame) => frame,
            Err(e) => {
                if e.is_transport() {
                    log::warn!("Dropping connection to {}: {}", self.client_config.address, e);
                    self.close();
                }
                return Err(e);
            }
        };

        log::debug!("Raw response: {}", String::from_utf8_lossy(&frame));
        Ok(CommandResponse::decode(&frame)?)
    }
}
