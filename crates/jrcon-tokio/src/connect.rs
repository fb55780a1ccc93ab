use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

use crate::client_config::RconClientConfig;
use crate::{
    client::{ClientState, RconClient},
    errors::RconError,
    handshake::HandshakeState,
    session::Session,
};

impl RconClient<TcpStream> {
    /// Connects to `address` (host:port) and authenticates with `password`.
    pub async fn open(address: &str, password: &str, auto_reconnect: bool) -> Result<Self, RconError> {
        let config = RconClientConfig::new(address, password).auto_reconnect(auto_reconnect);
        Self::open_with_config(config).await
    }

    pub async fn open_with_config(client_config: RconClientConfig) -> Result<Self, RconError> {
        let mut client = RconClient {
            session: None,
            client_config,
            state: ClientState::Idle,
        };
        client.connect().await?;

        Ok(client)
    }

    /// Replaces the current session, if any, with a freshly connected and
    /// authenticated one. On failure the client is left `Idle` with no session.
    pub async fn connect(&mut self) -> Result<(), RconError> {
        self.close();

        let session = Session::connect(
            &self.client_config.address,
            self.client_config.connect_timeout,
            self.client_config.keepalive_period,
        )
        .await?
        .with_chunk_size(self.client_config.read_chunk_size);
        self.session = Some(session);

        if let Err(e) = self.authenticate().await {
            log::debug!("Handshake with {} failed: {}", self.client_config.address, e);
            self.close();
            return Err(e);
        }

        log::debug!("Connected to {}", self.client_config.address);
        Ok(())
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> RconClient<S> {
    /// Runs the prompt / credential / result handshake on the current session.
    ///
    /// The client only becomes `Connected` once the server confirms the
    /// credential; any failure leaves it `Idle`.
    pub async fn authenticate(&mut self) -> Result<(), RconError> {
        log::debug!("Starting authentication...");
        self.state = ClientState::Idle;

        let io_timeout = self.client_config.io_timeout;
        let credential = &self.client_config.credential;
        let session = self.session.as_mut().ok_or(RconError::NotConnected)?;

        let mut handshake = HandshakeState::AwaitingPrompt;
        while !handshake.is_complete() {
            let frame = session.read_frame(io_timeout).await?;
            handshake = handshake.advance(&String::from_utf8_lossy(&frame))?;
            log::debug!("Handshake state: {:?}", handshake);

            if handshake == HandshakeState::AwaitingAuthResult {
                session.write_frame(credential.as_bytes(), io_timeout).await?;
            }
        }

        self.state = ClientState::Connected;
        Ok(())
    }
}
