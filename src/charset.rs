//! Charset names and the resolver used by [`MediaType::charset`](crate::MediaType::charset).
//!
//! A media type only carries a charset *name*. Turning that name into a
//! [`Charset`] handle is the job of a [`CharsetResolver`]. The crate ships a
//! process-wide registry pre-populated with the charsets every platform is
//! expected to support, and lets callers register more at runtime:
//!
//! - US-ASCII, ISO-8859-1, ISO-8859-15, windows-1252
//! - UTF-8, UTF-16, UTF-16BE, UTF-16LE, UTF-32, UTF-32BE, UTF-32LE
//!
//! Names and aliases are matched case-insensitively.

use crate::error::CharsetError;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};

/// Built-in charsets and their aliases.
static BUILTIN_CHARSETS: &[(&str, &[&str])] = &[
    (
        "US-ASCII",
        &["ascii", "us", "iso646-us", "iso-ir-6", "ansi_x3.4-1968", "cp367", "csascii", "646"],
    ),
    (
        "ISO-8859-1",
        &["latin1", "l1", "iso8859_1", "iso_8859-1", "iso-ir-100", "cp819", "ibm819", "819"],
    ),
    ("ISO-8859-15", &["latin9", "l9", "iso8859_15", "iso_8859-15", "csisolatin9"]),
    ("windows-1252", &["cp1252", "cp5348"]),
    ("UTF-8", &["utf8", "unicode-1-1-utf-8"]),
    ("UTF-16", &["utf16", "utf_16", "unicode"]),
    ("UTF-16BE", &["utf_16be", "x-utf-16be", "iso-10646-ucs-2", "unicodebigunmarked"]),
    ("UTF-16LE", &["utf_16le", "x-utf-16le", "unicodelittleunmarked"]),
    ("UTF-32", &["utf32", "utf_32"]),
    ("UTF-32BE", &["utf_32be", "x-utf-32be"]),
    ("UTF-32LE", &["utf_32le", "x-utf-32le"]),
];

/// The process-wide registry consulted by [`lookup_charset`] and [`SystemCharsets`].
static REGISTRY: Lazy<RwLock<CharsetRegistry>> =
    Lazy::new(|| RwLock::new(CharsetRegistry::with_builtins()));

static UTF_8: Lazy<Charset> = Lazy::new(|| builtin("UTF-8"));
static US_ASCII: Lazy<Charset> = Lazy::new(|| builtin("US-ASCII"));
static ISO_8859_1: Lazy<Charset> = Lazy::new(|| builtin("ISO-8859-1"));

/// A resolved charset.
///
/// Handles are cheap to clone. Two handles are equal when their canonical
/// names are equal, regardless of which alias they were resolved from.
#[derive(Clone)]
pub struct Charset {
    inner: Arc<Entry>,
}

#[derive(Debug)]
struct Entry {
    name: String,
    aliases: Vec<String>,
}

impl Charset {
    fn new(name: &str, aliases: Vec<String>) -> Self {
        Self {
            inner: Arc::new(Entry {
                name: name.to_string(),
                aliases,
            }),
        }
    }

    /// The canonical name, e.g. `UTF-8`.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Alternative names this charset is known by.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.inner.aliases.iter().map(String::as_str)
    }

    /// Reports whether `name` is the canonical name or an alias, ignoring ASCII case.
    pub fn is_named(&self, name: &str) -> bool {
        self.name().eq_ignore_ascii_case(name)
            || self.aliases().any(|a| a.eq_ignore_ascii_case(name))
    }
}

impl PartialEq for Charset {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Charset {}

impl Hash for Charset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Debug for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Charset").field(&self.name()).finish()
    }
}

/// Maps a charset name to a [`Charset`].
///
/// Implementations report unknown names with [`CharsetError::Unsupported`] and
/// malformed ones with [`CharsetError::IllegalName`]. Media types treat every
/// error the same way: they fall back to the caller's default.
pub trait CharsetResolver {
    /// Resolves `name` to a charset.
    fn resolve(&self, name: &str) -> Result<Charset, CharsetError>;
}

impl<F> CharsetResolver for F
where
    F: Fn(&str) -> Result<Charset, CharsetError>,
{
    fn resolve(&self, name: &str) -> Result<Charset, CharsetError> {
        self(name)
    }
}

/// Resolver backed by the process-wide registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCharsets;

impl CharsetResolver for SystemCharsets {
    fn resolve(&self, name: &str) -> Result<Charset, CharsetError> {
        lookup_charset(name)
    }
}

/// A table of charsets keyed by lowercased name and alias.
#[derive(Debug, Clone, Default)]
pub struct CharsetRegistry {
    by_name: HashMap<String, Charset>,
}

impl CharsetRegistry {
    /// Creates a registry with no charsets.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in charsets.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for (name, aliases) in BUILTIN_CHARSETS {
            registry.insert(Charset::new(name, aliases.iter().map(|a| a.to_string()).collect()));
        }
        registry
    }

    /// Registers `name` with `aliases`.
    ///
    /// When `name` is already known (as a canonical name or an alias) the
    /// existing charset gains the new aliases and keeps its canonical name.
    /// Fails without modifying the registry if any name is illegal or an alias
    /// belongs to a different charset.
    pub fn register(&mut self, name: &str, aliases: &[&str]) -> Result<Charset, CharsetError> {
        check_name(name)?;
        for alias in aliases {
            check_name(alias)?;
        }

        let existing = self.by_name.get(&name.to_ascii_lowercase()).cloned();
        let canonical = existing.as_ref().map_or(name, |c| c.name());

        for alias in aliases {
            if let Some(bound) = self.by_name.get(&alias.to_ascii_lowercase()) {
                if bound.name() != canonical {
                    return Err(CharsetError::AliasConflict {
                        alias: alias.to_string(),
                        existing: bound.name().to_string(),
                    });
                }
            }
        }

        let mut merged: Vec<String> = existing
            .as_ref()
            .map(|c| c.aliases().map(str::to_string).collect())
            .unwrap_or_default();
        if !canonical.eq_ignore_ascii_case(name)
            && !merged.iter().any(|a| a.eq_ignore_ascii_case(name))
        {
            merged.push(name.to_string());
        }
        for alias in aliases {
            if !canonical.eq_ignore_ascii_case(alias)
                && !merged.iter().any(|a| a.eq_ignore_ascii_case(alias))
            {
                merged.push(alias.to_string());
            }
        }

        let charset = Charset::new(canonical, merged);
        self.insert(charset.clone());
        tracing::trace!(
            charset = %charset,
            aliases = charset.inner.aliases.len(),
            "registered charset"
        );
        Ok(charset)
    }

    /// Looks up a charset by canonical name or alias, ignoring ASCII case.
    pub fn lookup(&self, name: &str) -> Result<Charset, CharsetError> {
        check_name(name)?;
        self.by_name
            .get(&name.to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| CharsetError::Unsupported(name.to_string()))
    }

    /// Reports whether `name` resolves in this registry.
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_ok()
    }

    /// Canonical names of all registered charsets, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.by_name.values().map(|c| c.name().to_string()).collect();
        names.sort();
        names.dedup();
        names
    }

    fn insert(&mut self, charset: Charset) {
        self.by_name.insert(charset.name().to_ascii_lowercase(), charset.clone());
        for alias in charset.aliases() {
            self.by_name.insert(alias.to_ascii_lowercase(), charset.clone());
        }
    }
}

impl CharsetResolver for CharsetRegistry {
    fn resolve(&self, name: &str) -> Result<Charset, CharsetError> {
        self.lookup(name)
    }
}

/// Looks up `name` in the process-wide registry.
///
/// # Examples
///
/// ```
/// use mime_media_type::charset::lookup_charset;
///
/// assert_eq!(lookup_charset("utf8").unwrap().name(), "UTF-8");
/// assert!(lookup_charset("x-unknown").is_err());
/// ```
pub fn lookup_charset(name: &str) -> Result<Charset, CharsetError> {
    REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .lookup(name)
}

/// Registers a charset, or new aliases for a known one, in the process-wide registry.
///
/// # Examples
///
/// ```
/// use mime_media_type::charset::{lookup_charset, register_charset};
///
/// register_charset("x-doc-test", &["doc-test-alias"]).unwrap();
/// assert_eq!(lookup_charset("DOC-TEST-ALIAS").unwrap().name(), "x-doc-test");
/// ```
pub fn register_charset(name: &str, aliases: &[&str]) -> Result<Charset, CharsetError> {
    REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(name, aliases)
}

/// The UTF-8 charset.
pub fn utf_8() -> Charset {
    UTF_8.clone()
}

/// The US-ASCII charset.
pub fn us_ascii() -> Charset {
    US_ASCII.clone()
}

/// The ISO-8859-1 charset.
pub fn iso_8859_1() -> Charset {
    ISO_8859_1.clone()
}

/// Reports whether `name` is a legal charset name.
///
/// The first character must be an ASCII letter or digit; the rest may also
/// contain `-`, `+`, `:`, `_` and `.`.
pub fn is_legal_name(name: &str) -> bool {
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphanumeric() => {
            bytes.all(|b| {
                b.is_ascii_alphanumeric() || matches!(b, b'-' | b'+' | b':' | b'_' | b'.')
            })
        }
        _ => false,
    }
}

fn check_name(name: &str) -> Result<(), CharsetError> {
    if is_legal_name(name) {
        Ok(())
    } else {
        Err(CharsetError::IllegalName(name.to_string()))
    }
}

fn builtin(name: &str) -> Charset {
    let aliases = BUILTIN_CHARSETS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, aliases)| aliases.iter().map(|a| a.to_string()).collect())
        .unwrap_or_default();
    Charset::new(name, aliases)
}
