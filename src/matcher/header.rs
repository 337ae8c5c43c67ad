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

use super::Matcher;
use crate::error::ConfigError;
use crate::host::RequestHeaders;
use regex::Regex;

/// Matches the value of one request header. An absent header never matches.
#[derive(Debug, Clone)]
pub struct HeaderMatcher {
    header: String,
    pattern: Regex,
}

impl HeaderMatcher {
    pub fn compile(header: &str, pattern: &str) -> Result<Self, ConfigError> {
        if header.is_empty() {
            return Err(ConfigError::MissingField(
                "matchRequestHeader.name is required".to_string(),
            ));
        }
        if pattern.is_empty() {
            return Err(ConfigError::MissingField(
                "matchRequestHeader.value is required".to_string(),
            ));
        }
        let pattern = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            field: "matchRequestHeader.value",
            source,
        })?;
        Ok(Self {
            header: header.to_string(),
            pattern,
        })
    }
}

impl Matcher for HeaderMatcher {
    fn subject(&self, request: &dyn RequestHeaders) -> Option<String> {
        request.header(&self.header)
    }

    fn pattern(&self) -> &Regex {
        &self.pattern
    }

    fn name(&self) -> &'static str {
        "header_matcher"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::testing::{captured, TestRequest};

    #[test]
    fn test_match_header_value() {
        let matcher = HeaderMatcher::compile("Cookie", r"session=(\w+)").unwrap();

        let request = TestRequest::new("/").with_header("Cookie", "session=abc123");
        assert!(matcher.test(&request));

        let request = TestRequest::new("/").with_header("Cookie", "theme=dark");
        assert!(!matcher.test(&request));
    }

    #[test]
    fn test_header_name_case_insensitive() {
        let matcher = HeaderMatcher::compile("X-Tenant", "^(?P<tenant>[a-z]+)$").unwrap();
        let request = TestRequest::new("/").with_header("x-tenant", "acme");
        assert_eq!(
            captured(&matcher, &request).unwrap().get("tenant"),
            Some(&"acme".to_string())
        );
    }

    #[test]
    fn test_absent_header() {
        let matcher = HeaderMatcher::compile("Cookie", ".*").unwrap();
        let request = TestRequest::new("/session=abc");
        assert!(!matcher.test(&request));
        assert!(captured(&matcher, &request).is_none());
    }

    #[test]
    fn test_uri_is_ignored() {
        let matcher = HeaderMatcher::compile("Host", "example").unwrap();
        let request = TestRequest::new("/example").with_header("Host", "other.test");
        assert!(!matcher.test(&request));
    }

    #[test]
    fn test_required_fields() {
        let err = HeaderMatcher::compile("", "x").unwrap_err();
        assert!(err.to_string().contains("name is required"));

        let err = HeaderMatcher::compile("Cookie", "").unwrap_err();
        assert!(err.to_string().contains("value is required"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = HeaderMatcher::compile("Cookie", "session=(\\w+").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }
}
