use std::fmt;

/// Lowercase hex MD5 digest of `password`.
pub fn digest(password: &str) -> String {
    format!("{:x}", md5::compute(password.as_bytes()))
}

/// The wire credential sent in reply to the password prompt.
///
/// Only the digest is kept; the plaintext password is dropped as soon as
/// the credential is built.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn from_password(password: &str) -> Self {
        Credential(digest(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
