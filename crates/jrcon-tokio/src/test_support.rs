use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};

use crate::{credential::digest, session::Session};

pub(crate) const SERVER_TIMEOUT: Duration = Duration::from_secs(2);

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Plays the server side of a successful handshake, checking the credential bytes.
pub(crate) async fn accept_handshake<S: AsyncRead + AsyncWrite + Unpin>(server: &mut Session<S>, password: &str) {
    server.write_frame(b"Password: ", SERVER_TIMEOUT).await.unwrap();

    let credential = server.read_frame(SERVER_TIMEOUT).await.unwrap();
    assert_eq!(credential, digest(password).as_bytes());

    server.write_frame(b"Authenticated=1", SERVER_TIMEOUT).await.unwrap();
}

/// Reads one command frame and answers it with `response`.
pub(crate) async fn answer_command<S: AsyncRead + AsyncWrite + Unpin>(
    server: &mut Session<S>,
    expected_command: &str,
    response: &str,
) {
    let command = server.read_frame(SERVER_TIMEOUT).await.unwrap();
    assert_eq!(command, expected_command.as_bytes());

    server.write_frame(response.as_bytes(), SERVER_TIMEOUT).await.unwrap();
}
