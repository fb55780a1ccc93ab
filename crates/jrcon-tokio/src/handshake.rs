use crate::errors::RconError;

const PASSWORD_PROMPT_MARKER: &str = "password";
const AUTH_SUCCESS_MARKER: &str = "authenticated=1";

/// The server greets every new connection with a frame mentioning "password".
pub fn is_password_prompt(text: &str) -> bool {
    text.to_lowercase().contains(PASSWORD_PROMPT_MARKER)
}

/// The server accepts the credential with a frame containing "authenticated=1".
pub fn is_auth_success(text: &str) -> bool {
    text.to_lowercase().contains(AUTH_SUCCESS_MARKER)
}

/// Progress of the prompt / credential / result exchange on a fresh connection.
///
/// Failure is terminal and is represented by the `Err` returned from [`HandshakeState::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeState {
    AwaitingPrompt,
    AwaitingAuthResult,
    Authenticated,
}

impl HandshakeState {
    /// Moves to the next state given the text of one server frame.
    ///
    /// Entering `AwaitingAuthResult` means the credential must be sent next.
    pub fn advance(self, frame: &str) -> Result<Self, RconError> {
        match self {
            HandshakeState::AwaitingPrompt if is_password_prompt(frame) => {
                Ok(HandshakeState::AwaitingAuthResult)
            }
            HandshakeState::AwaitingPrompt => {
                Err(RconError::Protocol("no password prompt received".to_string()))
            }
            HandshakeState::AwaitingAuthResult if is_auth_success(frame) => {
                Ok(HandshakeState::Authenticated)
            }
            HandshakeState::AwaitingAuthResult => Err(RconError::AuthFailed),
            HandshakeState::Authenticated => {
                Err(RconError::Protocol("unexpected frame after authentication".to_string()))
            }
        }
    }

    pub fn is_complete(self) -> bool {
        self == HandshakeState::Authenticated
    }
}
