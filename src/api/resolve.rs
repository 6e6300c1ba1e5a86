use regex::Regex;

const SEARCH_URL: &str = "https://www.google.com/search?q=";

/// Turns whatever the user typed into the address bar into a URL.
pub struct UrlResolver {
    ip: Regex,
    domain: Regex,
}

impl UrlResolver {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            ip: Regex::new(r"^(\d{1,3}\.){3}\d{1,3}$")?,
            domain: Regex::new(
                r"^([a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,6}$",
            )?,
        })
    }

    /// Full URLs pass through, IP literals get `http://`, domain-looking
    /// input and anything mentioning localhost gets `https://`, the rest
    /// becomes a search.
    pub fn resolve(&self, query: &str) -> String {
        let q = query.trim();
        if q.starts_with("http://") || q.starts_with("https://") {
            q.to_string()
        } else if self.ip.is_match(q) {
            format!("http://{q}")
        } else if self.domain.is_match(q) || q.contains("localhost") {
            format!("https://{q}")
        } else {
            format!("{SEARCH_URL}{q}")
        }
    }
}
