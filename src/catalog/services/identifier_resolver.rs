use crate::catalog::domain::{RemoteIdentifier, ResolutionFailure};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Host marker every provider-hosted asset URL contains
const CLOUDINARY_HOST_MARKER: &str = "cloudinary.com";

/// Path marker that precedes the (optionally versioned) public id
const CLOUDINARY_UPLOAD_MARKER: &str = "/upload/";

/// `.../<cloud>/image/upload/[v<digits>/]<public id>[.<ext>][?<query>]`
const CLOUDINARY_URL_PATTERN: &str =
    r"cloudinary\.com/[^/]+/image/upload/(?:v\d+/)?([^?]+?)(?:\.[^./]+)?(?:\?.*)?$";

static CLOUDINARY_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(CLOUDINARY_URL_PATTERN).expect("Cloudinary URL pattern is valid")
});

/// One way of deriving a remote identifier from a stored asset URL
///
/// Strategies are pure: a URL that does not fit returns `None`, it never panics.
pub trait ResolveStrategy: Send + Sync {
    /// Short name used in resolution failure messages
    fn name(&self) -> &'static str;

    /// Returns the raw identifier candidate, if the URL fits this strategy
    fn resolve(&self, url: &str) -> Option<String>;
}

/// Structural parse: split on the upload marker and peel off version,
/// query string and extension.
pub struct UploadPathStrategy {
    host_marker: String,
    upload_marker: String,
}

impl UploadPathStrategy {
    pub fn new(host_marker: impl Into<String>, upload_marker: impl Into<String>) -> Self {
        Self {
            host_marker: host_marker.into(),
            upload_marker: upload_marker.into(),
        }
    }

    pub fn cloudinary() -> Self {
        Self::new(CLOUDINARY_HOST_MARKER, CLOUDINARY_UPLOAD_MARKER)
    }

    /// Drops a leading `v<digits>/` segment
    fn strip_version(path: &str) -> &str {
        let Some(rest) = path.strip_prefix('v') else {
            return path;
        };
        match rest.split_once('/') {
            Some((digits, tail))
                if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) =>
            {
                tail
            }
            _ => path,
        }
    }

    /// Drops the last `.ext` of the final path segment, if any
    fn strip_extension(path: &str) -> &str {
        match path.rfind('.') {
            Some(idx) => {
                let extension = &path[idx + 1..];
                if extension.is_empty() || extension.contains('/') {
                    path
                } else {
                    &path[..idx]
                }
            }
            None => path,
        }
    }
}

impl ResolveStrategy for UploadPathStrategy {
    fn name(&self) -> &'static str {
        "upload-path"
    }

    fn resolve(&self, url: &str) -> Option<String> {
        if !url.contains(&self.host_marker) {
            return None;
        }

        let (_, after_marker) = url.split_once(&self.upload_marker)?;
        let unversioned = Self::strip_version(after_marker);
        let without_query = unversioned
            .split_once('?')
            .map_or(unversioned, |(path, _)| path);
        let candidate = Self::strip_extension(without_query);

        (!candidate.is_empty()).then(|| candidate.to_string())
    }
}

/// Single-pass pattern match over the whole URL; the first capture group is
/// the identifier.
pub struct PatternStrategy {
    pattern: Regex,
}

impl PatternStrategy {
    /// Builds a strategy from a pattern whose first capture group is the identifier
    pub fn new(pattern: &str) -> crate::shared::Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn cloudinary() -> Self {
        Self {
            pattern: CLOUDINARY_URL_REGEX.clone(),
        }
    }
}

impl ResolveStrategy for PatternStrategy {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn resolve(&self, url: &str) -> Option<String> {
        self.pattern
            .captures(url)?
            .get(1)
            .map(|m| m.as_str().to_string())
            .filter(|candidate| !candidate.is_empty())
    }
}

/// Ordered chain of resolve strategies; the first one that yields a
/// non-empty identifier wins.
pub struct IdentifierResolver {
    strategies: Vec<Box<dyn ResolveStrategy>>,
}

impl IdentifierResolver {
    pub fn new(strategies: Vec<Box<dyn ResolveStrategy>>) -> Self {
        Self { strategies }
    }

    /// Structural parse first, pattern match second
    pub fn cloudinary() -> Self {
        Self::new(vec![
            Box::new(UploadPathStrategy::cloudinary()),
            Box::new(PatternStrategy::cloudinary()),
        ])
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Resolves the provider identifier for a stored asset URL.
    ///
    /// Percent-encoded candidates are decoded, since the provider API expects
    /// the raw public id (`summer%20dress` is stored as `summer dress`).
    pub fn resolve(&self, url: &str) -> Result<RemoteIdentifier, ResolutionFailure> {
        for strategy in &self.strategies {
            let Some(candidate) = strategy.resolve(url) else {
                continue;
            };

            let decoded = urlencoding::decode(&candidate)
                .map(Cow::into_owned)
                .unwrap_or(candidate);

            if let Ok(identifier) = RemoteIdentifier::new(decoded) {
                return Ok(identifier);
            }
        }

        Err(ResolutionFailure {
            url: url.to_string(),
            strategies: self.strategy_names(),
        })
    }
}

impl Default for IdentifierResolver {
    fn default() -> Self {
        Self::cloudinary()
    }
}
