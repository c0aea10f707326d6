use crate::UrlError;
use std::fmt;
use url::Url;

/// The "same site" identity of a URL
///
/// Scheme must match exactly; the host is compared lower-cased with a leading
/// `www.` removed; the port is the explicit one or the scheme default.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl Origin {
    /// Derives the origin of a parsed URL
    ///
    /// # Examples
    ///
    /// ```
    /// use url::Url;
    /// use site_harvest::url::Origin;
    ///
    /// let url = Url::parse("https://WWW.Example.com/path").unwrap();
    /// let origin = Origin::from_url(&url).unwrap();
    /// assert_eq!(origin.host(), "example.com");
    /// ```
    pub fn from_url(url: &Url) -> Result<Self, UrlError> {
        let host = url.host_str().ok_or(UrlError::MissingHost)?;
        if host.is_empty() {
            return Err(UrlError::MissingHost);
        }

        Ok(Self {
            scheme: url.scheme().to_string(),
            host: strip_www(&host.to_lowercase()).to_string(),
            port: url.port_or_known_default(),
        })
    }

    /// Parses a URL string and derives its origin
    pub fn parse(url_str: &str) -> Result<Self, UrlError> {
        let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
        Self::from_url(&url)
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns true if the URL belongs to this origin
    pub fn contains(&self, url: &Url) -> bool {
        Self::from_url(url).map_or(false, |other| &other == self)
    }

    /// Returns true if the URL string parses and belongs to this origin
    pub fn contains_str(&self, url_str: &str) -> bool {
        Self::parse(url_str).map_or(false, |other| &other == self)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}

/// Returns true if both URLs parse and share an origin
///
/// # Examples
///
/// ```
/// use site_harvest::url::same_origin;
///
/// assert!(same_origin("https://www.x.com/a", "https://x.com/b"));
/// assert!(!same_origin("http://x.com", "https://x.com"));
/// ```
pub fn same_origin(a: &str, b: &str) -> bool {
    match (Origin::parse(a), Origin::parse(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}
