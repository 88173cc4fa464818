//! RFC 2045 media type parsing.
//!
//! This crate parses the value of a `Content-Type` header into a
//! [`MediaType`]:
//! - type and subtype, lowercased
//! - parameters in order of appearance, looked up case-insensitively
//! - charset resolution through a pluggable [`CharsetResolver`]
//!
//! ```
//! use mime_media_type::{charset, MediaType};
//!
//! let media_type: MediaType = "text/html; charset=UTF-8".parse().unwrap();
//! assert_eq!(media_type.essence(), "text/html");
//! assert_eq!(media_type.parameter("charset"), Some("UTF-8"));
//! assert_eq!(media_type.charset(), Some(charset::utf_8()));
//! ```
//!
//! Parsing is synchronous and allocation-light; a [`MediaType`] is immutable
//! and can be shared freely between threads.

pub mod charset;
pub mod error;
pub mod grammar;
pub mod media_type;

// Re-export commonly used types
pub use charset::{Charset, CharsetRegistry, CharsetResolver};
pub use error::{CharsetError, ParseError, Result};
pub use media_type::MediaType;
