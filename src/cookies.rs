use thiserror::Error;

/// A cookie to install on the page before navigation, bound to the
/// resolved target URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieSpec {
    pub name: String,
    pub value: String,
    pub url: String,
}

#[derive(Debug, Error)]
pub enum CookieParseError {
    #[error("cookie must contain : delimiter (got '{0}')")]
    MissingDelimiter(String),
    #[error("cookie name must not be empty (got '{0}')")]
    EmptyName(String),
}

/// Parses repeated `name:value` cookie arguments into [`CookieSpec`]s.
///
/// The split happens at the FIRST `:`, so the value may itself contain
/// colons. Output order matches input order; duplicate names are passed
/// through unchanged and left to the browser's cookie jar.
pub fn build_cookies(raw: &[String], url: &str) -> Result<Vec<CookieSpec>, CookieParseError> {
    raw.iter()
        .map(|spec| {
            let (name, value) = spec
                .split_once(':')
                .ok_or_else(|| CookieParseError::MissingDelimiter(spec.clone()))?;
            if name.is_empty() {
                return Err(CookieParseError::EmptyName(spec.clone()));
            }
            Ok(CookieSpec {
                name: name.to_string(),
                value: value.to_string(),
                url: url.to_string(),
            })
        })
        .collect()
}
