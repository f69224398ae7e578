//! Route pattern compilation.
//!
//! A pattern is literal text with `:name` placeholders. Each placeholder
//! captures one run of non-`/` characters. The compiled form is an anchored
//! regex so a match is always against the whole path.

use regex::Regex;

use crate::error::PatternError;

/// Decoded parameters for one resolved location.
///
/// Path parameters keep the order their placeholders appear in the pattern.
/// Query pairs are parsed from the `?` suffix but never take part in matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    path: String,
    params: Vec<(String, String)>,
    query: Vec<(String, String)>,
}

impl RouteParams {
    pub fn for_path(path: impl Into<String>) -> Self {
        RouteParams {
            path: path.into(),
            ..Default::default()
        }
    }

    /// The resolved path, query stripped.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn query(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }
}

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: String,
    regex: Regex,
    param_names: Vec<String>,
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl PatternMatcher {
    /// Compile `pattern` into a matcher.
    ///
    /// A `:` that is not followed by at least one name character is kept as a
    /// literal colon.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }

        let mut source = String::from("^");
        let mut literal = String::new();
        let mut param_names: Vec<String> = Vec::new();
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            if c != ':' {
                literal.push(c);
                continue;
            }
            let mut name = String::new();
            while let Some(&next) = chars.peek() {
                if !is_name_char(next) {
                    break;
                }
                name.push(next);
                chars.next();
            }
            if name.is_empty() {
                literal.push(':');
                continue;
            }
            if param_names.contains(&name) {
                return Err(PatternError::DuplicateParam {
                    pattern: pattern.to_string(),
                    name,
                });
            }
            source.push_str(&regex::escape(&literal));
            literal.clear();
            source.push_str("([^/]+)");
            param_names.push(name);
        }
        source.push_str(&regex::escape(&literal));
        source.push('$');

        let regex = Regex::new(&source).map_err(|e| PatternError::Compile {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        debug_assert_eq!(regex.captures_len() - 1, param_names.len());

        Ok(PatternMatcher {
            pattern: pattern.to_string(),
            regex,
            param_names,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Placeholder names in left-to-right order.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Match the whole of `path`, percent-decoding every capture.
    ///
    /// Returns `None` when the path does not match or a capture does not
    /// decode to valid UTF-8.
    pub fn match_path(&self, path: &str) -> Option<RouteParams> {
        let caps = self.regex.captures(path)?;
        let mut params = Vec::with_capacity(self.param_names.len());
        for (i, name) in self.param_names.iter().enumerate() {
            let raw = caps.get(i + 1)?.as_str();
            let decoded = urlencoding::decode(raw).ok()?;
            params.push((name.clone(), decoded.into_owned()));
        }
        Some(RouteParams {
            path: path.to_string(),
            params,
            query: Vec::new(),
        })
    }
}
