use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};

use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Emitted once per process the first time the keyed path is unavailable.
static FALLBACK_WARNED: AtomicBool = AtomicBool::new(false);

/// Compute a pseudonymous visitor ID from IP and User-Agent.
///
/// With a secret configured: HMAC-SHA-256(secret, ip + user_agent), truncated
/// to the first 8 bytes and encoded as 16 hex chars. The raw IP and UA are
/// never persisted; only this digest is.
///
/// Without a usable secret the function degrades to a 64-bit
/// non-cryptographic hash of the same input, rendered as 16 hex chars. That
/// path is trivially reversible by dictionary attack and collides far more
/// readily than the keyed digest, so it logs a one-time warning. It exists
/// only so tracking keeps working on an unconfigured install; production
/// deployments must set a secret.
pub fn compute_visitor_id(secret: Option<&str>, ip: &str, user_agent: &str) -> String {
    if let Some(secret) = secret.filter(|s| !s.is_empty()) {
        // HMAC-SHA-256 accepts keys of any length, so this never misses in
        // practice; if it ever did, tracking degrades rather than fails.
        if let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(secret.as_bytes()) {
            mac.update(ip.as_bytes());
            mac.update(user_agent.as_bytes());
            let digest = mac.finalize().into_bytes();
            // First 8 bytes → 16 hex characters.
            return hex::encode(&digest[..8]);
        }
    }

    if !FALLBACK_WARNED.swap(true, Ordering::Relaxed) {
        tracing::warn!(
            "No visitor secret configured. Falling back to a non-cryptographic \
             visitor hash with weaker privacy guarantees. Set OSTERIA_VISITOR_SECRET."
        );
    }
    let mut hasher = DefaultHasher::new();
    ip.hash(&mut hasher);
    user_agent.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}
