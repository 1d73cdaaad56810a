use std::collections::HashMap;

use log::debug;
use url::Url;

use super::Method;

/// The one cookie a host has set, with its lower-cased attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCookie {
    pub value: String,
    pub params: HashMap<String, String>,
}

impl StoredCookie {
    /// Parse a `Set-Cookie` header value: `name=value; Attr; Attr=Value`.
    pub fn parse(header: &str) -> Self {
        let (value, rest) = header.split_once(';').unwrap_or((header, ""));
        let params = rest
            .split(';')
            .filter(|param| !param.trim().is_empty())
            .map(|param| {
                let (name, setting) = param.split_once('=').unwrap_or((param, "true"));
                (
                    name.trim().to_ascii_lowercase(),
                    setting.trim().to_ascii_lowercase(),
                )
            })
            .collect();
        Self {
            value: value.trim().to_owned(),
            params,
        }
    }

    fn same_site_lax(&self) -> bool {
        self.params.get("samesite").map(String::as_str) == Some("lax")
    }
}

/// Cookies keyed by host. Each host holds at most one cookie; a new `Set-Cookie`
/// replaces it.
#[derive(Debug, Default, Clone)]
pub struct CookieJar {
    cookies: HashMap<String, StoredCookie>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&mut self, host: &str, header: &str) {
        let cookie = StoredCookie::parse(header);
        debug!("storing cookie for {host}: {}", cookie.value);
        self.cookies.insert(host.to_owned(), cookie);
    }

    pub fn get(&self, host: &str) -> Option<&StoredCookie> {
        self.cookies.get(host)
    }

    /// The `Cookie` header to send with a request to `target`.
    ///
    /// `SameSite=Lax` cookies are withheld from non-GET requests issued by a page on
    /// another host.
    pub fn header_for(&self, target: &Url, top_level: Option<&Url>, method: Method) -> Option<&str> {
        let host = target.host_str()?;
        let cookie = self.cookies.get(host)?;
        let allowed = match top_level {
            Some(page) if cookie.same_site_lax() && method != Method::Get => {
                page.host_str() == Some(host)
            }
            _ => true,
        };
        allowed.then_some(cookie.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_attributes() {
        let cookie = StoredCookie::parse("token=abc; SameSite=Lax; HttpOnly");
        assert_eq!(cookie.value, "token=abc");
        assert_eq!(cookie.params.get("samesite").map(String::as_str), Some("lax"));
        assert_eq!(cookie.params.get("httponly").map(String::as_str), Some("true"));
    }

    #[test]
    fn lax_cookies_stay_home_on_cross_site_posts() {
        let mut jar = CookieJar::new();
        jar.store("bank.test", "session=1; samesite=lax");
        let target = Url::parse("http://bank.test/transfer").unwrap();
        let home = Url::parse("http://bank.test/").unwrap();
        let evil = Url::parse("http://evil.test/").unwrap();

        assert_eq!(jar.header_for(&target, Some(&home), Method::Post), Some("session=1"));
        assert_eq!(jar.header_for(&target, Some(&evil), Method::Post), None);
        assert_eq!(jar.header_for(&target, Some(&evil), Method::Get), Some("session=1"));
        assert_eq!(jar.header_for(&target, None, Method::Post), Some("session=1"));
    }
}
