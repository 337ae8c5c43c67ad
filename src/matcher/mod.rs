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

//! Request matchers.
//!
//! A matcher picks a subject string out of the request (the URI, or one
//! header's value) and tests it against a compiled pattern. The captures of
//! that match feed the header value templates.

mod header;
mod path;

pub use header::HeaderMatcher;
pub use path::PathMatcher;

use crate::config::MatchSpec;
use crate::error::ConfigError;
use crate::host::RequestHeaders;
use regex::{Captures, Regex};
use std::collections::HashMap;

pub trait Matcher: Send + Sync {
    /// The string the pattern runs against, if the request has one.
    fn subject(&self, request: &dyn RequestHeaders) -> Option<String>;

    fn pattern(&self) -> &Regex;

    /// Matcher name for logs.
    fn name(&self) -> &'static str;

    /// Whether the request matches.
    fn test(&self, request: &dyn RequestHeaders) -> bool {
        self.subject(request)
            .map_or(false, |subject| self.pattern().is_match(&subject))
    }

    /// Captures of the pattern against `subject`, or `None` without a match.
    fn capture<'s>(&self, subject: &'s str) -> Option<Captures<'s>> {
        self.pattern().captures(subject)
    }
}

/// Compiles the matcher a manipulation asks for.
pub fn compile(spec: MatchSpec<'_>) -> Result<Box<dyn Matcher>, ConfigError> {
    match spec {
        MatchSpec::Path(pattern) => Ok(Box::new(PathMatcher::compile(pattern)?)),
        MatchSpec::RequestHeader(config) => Ok(Box::new(HeaderMatcher::compile(
            &config.name,
            &config.value,
        )?)),
    }
}

/// Every named group of `regex`, mapped to its text in `caps`. A group that
/// did not take part in the match maps to the empty string.
pub fn named_captures(regex: &Regex, caps: &Captures<'_>) -> HashMap<String, String> {
    regex
        .capture_names()
        .flatten()
        .map(|name| {
            let value = caps.name(name).map_or("", |m| m.as_str());
            (name.to_string(), value.to_string())
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{named_captures, Matcher};
    use crate::host::{HeaderSink, RequestHeaders};
    use std::collections::HashMap;

    /// Named captures for `request`, or `None` when it does not match.
    pub fn captured(
        matcher: &dyn Matcher,
        request: &dyn RequestHeaders,
    ) -> Option<HashMap<String, String>> {
        let subject = matcher.subject(request)?;
        let caps = matcher.capture(&subject)?;
        Some(named_captures(matcher.pattern(), &caps))
    }

    /// In-memory request for matcher and engine tests.
    #[derive(Debug, Clone, Default)]
    pub struct TestRequest {
        pub uri: Option<String>,
        pub headers: Vec<(String, String)>,
    }

    impl TestRequest {
        pub fn new(uri: &str) -> Self {
            Self {
                uri: Some(uri.to_string()),
                headers: Vec::new(),
            }
        }

        pub fn with_header(mut self, name: &str, value: &str) -> Self {
            self.headers.push((name.to_string(), value.to_string()));
            self
        }

        pub fn values(&self, name: &str) -> Vec<&str> {
            self.headers
                .iter()
                .filter(|(n, _)| n.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
                .collect()
        }
    }

    impl HeaderSink for TestRequest {
        fn set_header(&mut self, name: &str, value: &str) {
            self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
            self.add_header(name, value);
        }

        fn add_header(&mut self, name: &str, value: &str) {
            self.headers.push((name.to_string(), value.to_string()));
        }
    }

    impl RequestHeaders for TestRequest {
        fn uri(&self) -> Option<String> {
            self.uri.clone()
        }

        fn header(&self, name: &str) -> Option<String> {
            self.values(name).first().map(|v| v.to_string())
        }
    }
}
