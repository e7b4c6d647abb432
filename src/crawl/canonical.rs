// src/crawl/canonical.rs
// =============================================================================
// URL canonicalization and same-domain scoping.
//
// A canonical URL is an absolute http(s) URL with its fragment removed,
// serialized by the `url` crate. That string is the key used for the
// visited set, so two spellings of the same page (e.g. with and without
// "#section") collapse to one entry.
//
// Scoping compares hostnames exactly: "docs.example.com" is NOT in scope
// for a crawl started on "example.com".
// =============================================================================

use url::Url;

use crate::error::UrlError;

/// Parses `input` as an absolute URL and returns its canonical form.
pub fn canonicalize(input: &str) -> Result<Url, UrlError> {
    let url = Url::parse(input.trim()).map_err(|e| UrlError::Invalid {
        input: input.to_string(),
        reason: e.to_string(),
    })?;
    finish(url)
}

/// Resolves `href` against an already-canonical `base` (a link on that page)
/// and canonicalizes the result.
pub fn resolve(base: &Url, href: &str) -> Result<Url, UrlError> {
    let url = base.join(href.trim()).map_err(|e| UrlError::Invalid {
        input: href.to_string(),
        reason: e.to_string(),
    })?;
    finish(url)
}

// Shared tail of canonicalize/resolve: scheme filter + fragment stripping
fn finish(mut url: Url) -> Result<Url, UrlError> {
    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(UrlError::UnsupportedScheme {
                url: url.to_string(),
                scheme: scheme.to_string(),
            })
        }
    }
    url.set_fragment(None);
    Ok(url)
}

// Decides whether candidate URLs belong to the crawl.
//
// Built once from the seed URL; `Unrestricted` accepts everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainScope {
    Unrestricted,
    SameHost(String),
}

impl DomainScope {
    pub fn for_seed(seed: &Url, same_domain: bool) -> Self {
        match (same_domain, seed.host_str()) {
            (true, Some(host)) => DomainScope::SameHost(host.to_string()),
            // A host-less http(s) URL cannot be produced by the url crate,
            // but an empty host can never match anything either way.
            (true, None) => DomainScope::SameHost(String::new()),
            (false, _) => DomainScope::Unrestricted,
        }
    }

    pub fn contains(&self, candidate: &Url) -> bool {
        match self {
            DomainScope::Unrestricted => true,
            DomainScope::SameHost(host) => candidate.host_str() == Some(host.as_str()),
        }
    }
}
