//! Session issuance and lookup.

mod redis_store;
mod store;

pub use redis_store::RedisSessionStore;
pub use store::{is_plausible_token, Session, SessionStore, MAX_TOKEN_LENGTH};

#[cfg(any(test, feature = "test-utils"))]
pub use store::MockSessionStore;
