// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Header value templates.
//!
//! A template is expanded against the captures of whichever matcher fired,
//! using the `regex` crate's replacement syntax:
//!
//! - `$1`, `${1}` - positional group
//! - `$name`, `${name}` - named group
//! - `$$` - a literal `$`
//!
//! Those references never fail: a group that did not take part in the match
//! expands to the empty string.
//!
//! `{{.name}}` is also accepted and compiles to `${name}`. A named group the
//! pattern defines always has a value, the empty string when it did not take
//! part in the match. A name the pattern does not define fails expansion, and
//! the caller must stop processing the request. Text outside `{{ }}` actions,
//! including a lone `}}`, is kept as is.

use crate::error::{ConfigError, ProcessError};
use regex::{Captures, Regex};

const ACTION_OPEN: &str = "{{";
const ACTION_CLOSE: &str = "}}";

#[derive(Debug, Clone)]
pub struct ValueTemplate {
    source: String,
    expansion: String,
    strict: Vec<String>,
}

impl ValueTemplate {
    pub fn compile(source: &str) -> Result<Self, ConfigError> {
        let mut expansion = String::with_capacity(source.len());
        let mut strict = Vec::new();
        let mut rest = source;

        while let Some(start) = rest.find(ACTION_OPEN) {
            expansion.push_str(&rest[..start]);
            let after_open = &rest[start + ACTION_OPEN.len()..];
            let end = after_open
                .find(ACTION_CLOSE)
                .ok_or_else(|| invalid(source, "unclosed action"))?;

            let name = parse_action(after_open[..end].trim())
                .ok_or_else(|| invalid(source, "only {{.name}} actions are supported"))?;
            expansion.push_str("${");
            expansion.push_str(name);
            expansion.push('}');
            if !strict.iter().any(|n| n == name) {
                strict.push(name.to_string());
            }

            rest = &after_open[end + ACTION_CLOSE.len()..];
        }
        expansion.push_str(rest);

        Ok(Self {
            source: source.to_string(),
            expansion,
            strict,
        })
    }

    /// Expands the template for the header named `header` from `caps`, the
    /// captures `pattern` produced.
    pub fn expand(
        &self,
        header: &str,
        pattern: &Regex,
        caps: &Captures<'_>,
    ) -> Result<String, ProcessError> {
        let defined = |name: &str| pattern.capture_names().flatten().any(|n| n == name);
        if let Some(missing) = self.strict.iter().find(|name| !defined(name.as_str())) {
            return Err(ProcessError::TemplateExecution {
                header: header.to_string(),
                reason: format!(
                    "{:?} references capture {:?}, which the pattern does not define",
                    self.source, missing
                ),
            });
        }
        let mut value = String::new();
        caps.expand(&self.expansion, &mut value);
        Ok(value)
    }
}

// Accepts `.name` where name is an identifier; returns the name.
fn parse_action(action: &str) -> Option<&str> {
    let name = action.strip_prefix('.')?;
    let mut chars = name.chars();
    let first = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Some(name)
    } else {
        None
    }
}

fn invalid(template: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidTemplate {
        template: template.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(pattern: &str, subject: &str, template: &str) -> Result<String, ProcessError> {
        let re = Regex::new(pattern).unwrap();
        let caps = re.captures(subject).unwrap();
        ValueTemplate::compile(template)
            .unwrap()
            .expand("X-Test", &re, &caps)
    }

    #[test]
    fn test_literal() {
        assert_eq!(expand("^/", "/a", "static").unwrap(), "static");
        assert_eq!(expand("^/", "/a", "").unwrap(), "");
    }

    #[test]
    fn test_positional() {
        assert_eq!(
            expand(r"session=(\w+)", "session=abc123", "$1").unwrap(),
            "abc123"
        );
        assert_eq!(
            expand(r"^/(\w+)/(\w+)$", "/users/7", "${2}-${1}").unwrap(),
            "7-users"
        );
        assert_eq!(
            expand(r"^/(\w+)$", "/users", "$0").unwrap(),
            "/users"
        );
    }

    #[test]
    fn test_positional_unmatched_is_empty() {
        assert_eq!(expand(r"^/a(/b)?$", "/a", "[$1]").unwrap(), "[]");
        assert_eq!(expand(r"^/a$", "/a", "[$9]").unwrap(), "[]");
    }

    #[test]
    fn test_dollar_escape() {
        assert_eq!(expand("^/", "/", "$$5").unwrap(), "$5");
    }

    #[test]
    fn test_named() {
        let pattern = r"^/api/(?P<id>[0-9]+)$";
        assert_eq!(expand(pattern, "/api/42", "{{.id}}").unwrap(), "42");
        assert_eq!(expand(pattern, "/api/42", "{{ .id }}").unwrap(), "42");
        assert_eq!(expand(pattern, "/api/42", "id-{{.id}}x").unwrap(), "id-42x");
        assert_eq!(expand(pattern, "/api/42", "${id}").unwrap(), "42");
    }

    #[test]
    fn test_named_unmatched_group_is_empty() {
        let pattern = r"^/a(?:/(?P<opt>x))?$";
        assert_eq!(expand(pattern, "/a", "[{{.opt}}]").unwrap(), "[]");
        assert_eq!(expand(pattern, "/a/x", "[{{.opt}}]").unwrap(), "[x]");
    }

    #[test]
    fn test_named_undefined_fails() {
        let err = expand(r"^/a$", "/a", "{{.nope}}").unwrap_err();
        assert!(matches!(err, ProcessError::TemplateExecution { ref header, .. } if header == "X-Test"));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_named_lenient_dollar() {
        assert_eq!(expand(r"^/a(?:/(?P<opt>x))?$", "/a", "[$opt]").unwrap(), "[]");
    }

    #[test]
    fn test_compile_errors() {
        for bad in ["{{.id", "{{id}}", "{{.}}", "{{.a-b}}", "{{ }}", "a}}{{.b"] {
            let err = ValueTemplate::compile(bad).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidTemplate { .. }),
                "expected InvalidTemplate for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_lone_close_is_literal() {
        assert!(ValueTemplate::compile("a}}b").is_ok());
        assert_eq!(expand("^/", "/", "a}}b").unwrap(), "a}}b");
        assert_eq!(expand(r"^/(?P<v>\w+)", "/x", "}}{{.v}}}}").unwrap(), "}}x}}");
    }
}
