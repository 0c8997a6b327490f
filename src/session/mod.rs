//! Session subsystem.
//!
//! # Data Flow
//! ```text
//! login/signup success
//!     → manager.rs (derive User, encode)
//!     → store.rs (atomic write of token + user)
//!
//! every request
//!     → manager.rs token() → Authorization header
//!
//! logout
//!     → manager.rs clear() → store.rs remove both keys
//! ```
//!
//! # Design Decisions
//! - Only the client touches the store; consumers go through accessors
//! - Malformed persisted data is "no session", never an error
//! - No local expiry check; the server is the authority on token validity

pub mod manager;
pub mod store;
pub mod types;

pub use manager::{SessionManager, TOKEN_KEY, USER_KEY};
pub use store::{FileStore, MemoryStore, SessionStore, StoreError};
pub use types::{Session, User};
