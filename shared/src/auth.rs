//! Shared-secret request gate.

use lambda_http::http::{HeaderMap, Method};

use crate::{Error, Result};

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Liveness probe path, admitted without credentials for GET/HEAD.
pub const HEALTH_PATH: &str = "/health";

/// Decides whether a request may proceed past the gate.
#[derive(Clone)]
pub struct ApiKeyGate {
    api_key: String,
}

impl ApiKeyGate {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Admit the liveness probe unconditionally; everything else needs the key.
    pub fn admit(&self, method: &Method, path: &str, headers: &HeaderMap) -> Result<()> {
        if is_health_check(method, path) {
            return Ok(());
        }

        let presented = headers
            .get(API_KEY_HEADER)
            .map(|v| v.as_bytes())
            .ok_or(Error::Unauthorized)?;

        if timing_safe_eq(presented, self.api_key.as_bytes()) {
            Ok(())
        } else {
            Err(Error::Unauthorized)
        }
    }
}

/// `GET`/`HEAD` on the liveness path.
pub fn is_health_check(method: &Method, path: &str) -> bool {
    path == HEALTH_PATH && (method == Method::GET || method == Method::HEAD)
}

/// Constant-time comparison of the presented key against the secret.
fn timing_safe_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (byte_a, byte_b) in a.iter().zip(b.iter()) {
        result |= byte_a ^ byte_b;
    }
    result == 0
}
