//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`User`] - A registered account
//! - [`ShortUrl`] - An alias to long-URL mapping with redirect counter
//! - [`RefreshSession`] - A server-side session bound to a refresh token
//!
//! # Design Pattern
//!
//! Creation inputs are separate structs (`NewUser`, `NewShortUrl`) and partial
//! updates use a patch struct (`ShortUrlPatch`) whose `None` fields mean
//! "leave unchanged".

pub mod session;
pub mod short_url;
pub mod user;

pub use session::{RefreshSession, TokenPair};
pub use short_url::{NewShortUrl, ShortUrl, ShortUrlPatch};
pub use user::{NewUser, User};
