/// A url is absolute as soon as it names a scheme.
pub fn is_absolute(url: &str) -> bool {
    url.contains("://")
}

pub fn has_http_scheme(url: &str) -> bool {
    has_scheme_prefix(url, "http")
}

pub fn has_rtmfp_scheme(url: &str) -> bool {
    has_scheme_prefix(url, "rtmfp")
}

fn has_scheme_prefix(url: &str, scheme: &str) -> bool {
    url.len() >= scheme.len()
        && url.as_bytes()[..scheme.len()].eq_ignore_ascii_case(scheme.as_bytes())
}

/// Derives the implicit base url of a manifest from the url it was fetched
/// from: query and fragment are dropped, then everything after the last `/`.
pub fn base_url_of(manifest_url: &str) -> String {
    let mut base = manifest_url;
    if let Some(pos) = base.find('?') {
        base = &base[..pos];
    }
    if let Some(pos) = base.find('#') {
        base = &base[..pos];
    }
    match base.rfind('/') {
        Some(pos) => base[..pos].to_string(),
        None => base.to_string(),
    }
}

/// Prefixes relative urls with `base_url/`. Absolute urls and empty values
/// are returned unchanged.
pub fn resolve(base_url: &str, url: &str) -> String {
    if url.is_empty() || is_absolute(url) {
        return url.to_string();
    }
    format!("{}/{}", base_url, url)
}
