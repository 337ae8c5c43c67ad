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

use crate::config::{Config, ManipulationConfig};
use crate::error::{ConfigError, ProcessError};
use crate::host::{HeaderSink, RequestHeaders};
use crate::matcher::{self, named_captures, Matcher};
use crate::rule::HeaderRule;
use log::debug;

/// One matcher and the headers it writes on a match.
pub struct Manipulation {
    matcher: Box<dyn Matcher>,
    request_headers: Vec<HeaderRule>,
    response_headers: Vec<HeaderRule>,
}

impl Manipulation {
    pub fn compile(config: &ManipulationConfig) -> Result<Self, ConfigError> {
        let matcher = matcher::compile(config.match_spec()?)?;
        let request_headers = config
            .custom_request_headers
            .iter()
            .map(HeaderRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        let response_headers = config
            .custom_response_headers
            .iter()
            .map(HeaderRule::compile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            matcher,
            request_headers,
            response_headers,
        })
    }

    pub fn matcher(&self) -> &dyn Matcher {
        self.matcher.as_ref()
    }

    pub fn request_headers(&self) -> &[HeaderRule] {
        &self.request_headers
    }

    pub fn response_headers(&self) -> &[HeaderRule] {
        &self.response_headers
    }

    /// Applies this manipulation if it matches. Returns whether it matched.
    pub fn process(
        &self,
        request: &mut dyn RequestHeaders,
        response: &mut dyn HeaderSink,
    ) -> Result<bool, ProcessError> {
        if !self.matcher.test(&*request) {
            debug!("Match: false ({})", self.matcher.name());
            return Ok(false);
        }
        let Some(subject) = self.matcher.subject(&*request) else {
            return Ok(false);
        };
        let Some(caps) = self.matcher.capture(&subject) else {
            return Ok(false);
        };
        let pattern = self.matcher.pattern();
        debug!(
            "Match: true ({}), subexp: {:?}",
            self.matcher.name(),
            named_captures(pattern, &caps)
        );

        for rule in &self.request_headers {
            rule.apply(pattern, &caps, &mut *request)?;
        }
        for rule in &self.response_headers {
            rule.apply(pattern, &caps, &mut *response)?;
        }
        Ok(true)
    }
}

/// The compiled plugin: every manipulation, in configured order.
///
/// Built once at startup and read-only afterwards, so one engine can serve
/// any number of requests at the same time.
#[derive(Default)]
pub struct Engine {
    manipulations: Vec<Manipulation>,
}

impl Engine {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let manipulations = config
            .manipulations
            .iter()
            .enumerate()
            .map(|(index, m)| Manipulation::compile(m).map_err(|e| e.in_manipulation(index)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { manipulations })
    }

    /// Parses and compiles raw plugin configuration.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        Self::new(&Config::from_slice(bytes)?)
    }

    pub fn manipulations(&self) -> &[Manipulation] {
        &self.manipulations
    }

    pub fn len(&self) -> usize {
        self.manipulations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manipulations.is_empty()
    }

    /// Runs every manipulation against one HTTP transaction.
    ///
    /// All matching manipulations apply, in order. The first template that
    /// cannot be expanded stops the whole run; writes made before it stay.
    /// An error means the request must not be processed further.
    pub fn process(
        &self,
        request: &mut dyn RequestHeaders,
        response: &mut dyn HeaderSink,
    ) -> Result<(), ProcessError> {
        for manipulation in &self.manipulations {
            manipulation.process(&mut *request, &mut *response)?;
        }
        Ok(())
    }
}
