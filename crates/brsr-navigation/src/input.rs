//! Address bar input normalization
//!
//! Typed input with a scheme the shell loads directly is kept verbatim.
//! Anything else is treated as a host and gets an `https://` prefix.

use url::Url;

use crate::error::NavigationError;
use crate::Result;

const DIRECT_SCHEMES: [&str; 5] = ["http", "https", "about", "file", "data"];

/// Turn address bar input into a loadable URL
pub fn normalize_address(input: &str) -> Result<String> {
    let input = input.trim();

    if input.is_empty() {
        return Err(NavigationError::InvalidUrl(
            "Address cannot be empty".to_string(),
        ));
    }

    if let Ok(parsed) = Url::parse(input) {
        if DIRECT_SCHEMES.contains(&parsed.scheme()) {
            return Ok(input.to_string());
        }
    }

    let with_https = format!("https://{}", input);
    match Url::parse(&with_https) {
        Ok(parsed) if parsed.host_str().is_some_and(|h| !h.is_empty()) => Ok(with_https),
        _ => Err(NavigationError::InvalidUrl(input.to_string())),
    }
}
