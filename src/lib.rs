//! Client for the mailboxlayer email validation API.
//!
//! [`MailboxLayer::check`] validates one address, consulting a
//! [`ResultCache`] before calling the API through an [`HttpTransport`].
//! [`MailboxLayer::check_many`] does the same for a list of addresses,
//! sequentially and in order.

pub mod cache;
pub mod client;
pub mod core;
pub mod transport;
pub(crate) mod utils;

pub use crate::cache::{MemoryCache, ResultCache};
pub use crate::client::{cache_key, MailboxLayer};
pub use crate::core::config::{Config, ConfigBuilder, ConfigFile};
pub use crate::core::error::{AppError, Result, ValidationError};
pub use crate::core::mapper::map_from_payload;
pub use crate::core::models::ValidationResult;
pub use crate::transport::{HttpTransport, ReqwestTransport};
