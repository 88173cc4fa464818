//! Media type parsing and the [`MediaType`] value type.
//!
//! Grammar accepted by [`MediaType::parse`]:
//!
//! ```text
//! media-type = token "/" token *parameter
//! parameter  = ";" *WSP [ token "=" ( token / quoted ) ]
//! quoted     = DQUOTE *<any char except DQUOTE> DQUOTE
//! ```
//!
//! A parameter segment without a `name=value` pair (a bare `;`, optionally
//! followed by whitespace) is accepted and ignored. Comments and folding
//! whitespace are not supported.

use crate::charset::{Charset, CharsetResolver, SystemCharsets};
use crate::error::{ParseError, Result};
use crate::grammar::{quoted_end, token_end, whitespace_end};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;
use std::str::FromStr;

/// A parsed media type such as `text/plain; charset=utf-8`.
///
/// The type and subtype are lowercased; parameter names and values are kept
/// as written and in order of appearance.
///
/// Equality and hashing use the original string only. `TEXT/PLAIN` and
/// `text/plain` have the same [`type_`](Self::type_) and
/// [`subtype`](Self::subtype) but are **not** equal:
///
/// ```
/// use mime_media_type::MediaType;
///
/// let upper: MediaType = "TEXT/PLAIN".parse().unwrap();
/// let lower: MediaType = "text/plain".parse().unwrap();
/// assert_eq!(upper.essence(), lower.essence());
/// assert_ne!(upper, lower);
/// ```
#[derive(Debug, Clone)]
pub struct MediaType {
    raw: String,
    type_: String,
    subtype: String,
    parameters: Vec<(String, String)>,
}

/// The value half of a matched parameter segment.
enum ValueSpan {
    Token(Range<usize>),
    Quoted(Range<usize>),
}

/// A `;`-delimited segment matched at some position.
struct Segment {
    end: usize,
    pair: Option<(Range<usize>, ValueSpan)>,
}

impl MediaType {
    /// Parses a media type.
    ///
    /// # Examples
    ///
    /// ```
    /// use mime_media_type::MediaType;
    ///
    /// let media_type = MediaType::parse("Text/HTML; charset=\"utf-8\"").unwrap();
    /// assert_eq!(media_type.type_(), "text");
    /// assert_eq!(media_type.subtype(), "html");
    /// assert_eq!(media_type.parameter("Charset"), Some("utf-8"));
    /// assert_eq!(media_type.to_string(), "Text/HTML; charset=\"utf-8\"");
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        Self::from_raw(input.to_string())
    }

    /// Parses a media type, returning `None` if `input` is malformed.
    ///
    /// Use this where a bad header should read as "no media type".
    ///
    /// ```
    /// use mime_media_type::MediaType;
    ///
    /// assert!(MediaType::try_parse("text/plain").is_some());
    /// assert!(MediaType::try_parse("text").is_none());
    /// ```
    pub fn try_parse(input: &str) -> Option<Self> {
        match Self::parse(input) {
            Ok(media_type) => Some(media_type),
            Err(err) => {
                tracing::debug!(error = %err, "ignoring malformed media type");
                None
            }
        }
    }

    fn from_raw(raw: String) -> Result<Self> {
        let bytes = raw.as_bytes();

        let type_end = token_end(bytes, 0);
        if type_end == 0 || bytes.get(type_end) != Some(&b'/') {
            return Err(ParseError::NoSubtype(raw));
        }
        let subtype_end = token_end(bytes, type_end + 1);
        if subtype_end == type_end + 1 {
            return Err(ParseError::NoSubtype(raw));
        }

        let mut parameters = Vec::new();
        let mut pos = subtype_end;
        while pos < bytes.len() {
            let Some(segment) = match_parameter(bytes, pos) else {
                return Err(ParseError::MalformedParameter {
                    remainder: raw[pos..].to_string(),
                    input: raw.clone(),
                });
            };
            if let Some((name, value)) = segment.pair {
                parameters.push((raw[name].to_string(), decode_value(&raw, value).to_string()));
            }
            pos = segment.end;
        }

        Ok(Self {
            type_: raw[..type_end].to_ascii_lowercase(),
            subtype: raw[type_end + 1..subtype_end].to_ascii_lowercase(),
            parameters,
            raw,
        })
    }

    /// The top-level type, lowercased (e.g. `text`).
    pub fn type_(&self) -> &str {
        &self.type_
    }

    /// The subtype, lowercased (e.g. `plain`).
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// `type/subtype` without parameters, lowercased.
    pub fn essence(&self) -> String {
        format!("{}/{}", self.type_, self.subtype)
    }

    /// The string this media type was parsed from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parameters as `(name, value)` pairs in order of appearance, duplicates included.
    pub fn parameters(&self) -> impl ExactSizeIterator<Item = (&str, &str)> {
        self.parameters
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns the value of the first parameter named `name`, ignoring ASCII case.
    ///
    /// ```
    /// use mime_media_type::MediaType;
    ///
    /// let media_type = MediaType::parse("text/plain; charset=utf-8; CHARSET=latin1").unwrap();
    /// assert_eq!(media_type.parameter("CHARSET"), Some("utf-8"));
    /// assert_eq!(media_type.parameter("boundary"), None);
    /// ```
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Resolves the `charset` parameter against the process-wide registry.
    ///
    /// Returns `None` when there is no `charset` parameter or it names an
    /// unknown charset.
    pub fn charset(&self) -> Option<Charset> {
        self.charset_or(None)
    }

    /// Resolves the `charset` parameter, falling back to `default`.
    ///
    /// ```
    /// use mime_media_type::{charset, MediaType};
    ///
    /// let json = MediaType::parse("application/json").unwrap();
    /// assert_eq!(json.charset_or(Some(charset::utf_8())), Some(charset::utf_8()));
    ///
    /// let latin = MediaType::parse("text/plain; charset=latin1").unwrap();
    /// assert_eq!(latin.charset_or(Some(charset::utf_8())), Some(charset::iso_8859_1()));
    /// ```
    pub fn charset_or(&self, default: Option<Charset>) -> Option<Charset> {
        self.charset_with(&SystemCharsets, default)
    }

    /// Resolves the `charset` parameter with `resolver`, falling back to `default`
    /// when the parameter is missing or the resolver fails.
    pub fn charset_with<R>(&self, resolver: &R, default: Option<Charset>) -> Option<Charset>
    where
        R: CharsetResolver + ?Sized,
    {
        let Some(name) = self.parameter("charset") else {
            return default;
        };
        match resolver.resolve(name) {
            Ok(charset) => Some(charset),
            Err(err) => {
                tracing::debug!(
                    media_type = %self.raw,
                    error = %err,
                    "falling back to default charset"
                );
                default
            }
        }
    }
}

/// Matches `";" *WSP [ token "=" ( token / quoted ) ]` at `start`.
///
/// The name/value pair is optional: when it does not match in full, the
/// segment ends after the whitespace and carries no pair.
fn match_parameter(input: &[u8], start: usize) -> Option<Segment> {
    if input.get(start) != Some(&b';') {
        return None;
    }
    let name_start = whitespace_end(input, start + 1);
    let bare = Segment {
        end: name_start,
        pair: None,
    };

    let name_end = token_end(input, name_start);
    if name_end == name_start || input.get(name_end) != Some(&b'=') {
        return Some(bare);
    }

    let value_start = name_end + 1;
    let value_end = token_end(input, value_start);
    let (end, value) = if value_end > value_start {
        (value_end, ValueSpan::Token(value_start..value_end))
    } else if let Some(quote_end) = quoted_end(input, value_start) {
        (quote_end, ValueSpan::Quoted(value_start + 1..quote_end - 1))
    } else {
        return Some(bare);
    };

    Some(Segment {
        end,
        pair: Some((name_start..name_end, value)),
    })
}

/// Extracts a parameter value from its span.
///
/// Quoted values are used verbatim. A token wrapped in single quotes is a
/// common non-standard spelling (`charset='utf-8'`); when longer than two
/// characters, exactly one quote is removed from each end.
fn decode_value(raw: &str, value: ValueSpan) -> &str {
    match value {
        ValueSpan::Quoted(span) => &raw[span],
        ValueSpan::Token(span) => {
            let token = &raw[span];
            if token.len() > 2 && token.starts_with('\'') && token.ends_with('\'') {
                &token[1..token.len() - 1]
            } else {
                token
            }
        }
    }
}

impl FromStr for MediaType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for MediaType {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MediaType {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_raw(s)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for MediaType {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for MediaType {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for MediaType {}

impl Hash for MediaType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}
