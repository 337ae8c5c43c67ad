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

use crate::error::ConfigError;
use serde::Deserialize;

/// Plugin configuration, as delivered by the host in `on_configure`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub manipulations: Vec<ManipulationConfig>,
}

impl Config {
    /// Parses the raw plugin configuration bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// One manipulation: exactly one of `match_path` / `match_request_header`
/// plus the headers to write when it matches.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManipulationConfig {
    #[serde(default)]
    pub match_path: Option<String>,
    #[serde(default)]
    pub match_request_header: Option<RequestHeaderMatch>,

    #[serde(default)]
    pub custom_request_headers: Vec<CustomHeader>,
    #[serde(default)]
    pub custom_response_headers: Vec<CustomHeader>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestHeaderMatch {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomHeader {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub replace: bool,
}

/// The match specification once the mutually exclusive fields are resolved.
#[derive(Debug, Clone, Copy)]
pub enum MatchSpec<'a> {
    Path(&'a str),
    RequestHeader(&'a RequestHeaderMatch),
}

impl ManipulationConfig {
    /// Resolves which matcher this manipulation asks for. An empty
    /// `matchPath` counts as unset.
    pub fn match_spec(&self) -> Result<MatchSpec<'_>, ConfigError> {
        let path = self.match_path.as_deref().filter(|p| !p.is_empty());
        match (path, self.match_request_header.as_ref()) {
            (Some(path), None) => Ok(MatchSpec::Path(path)),
            (None, Some(header)) => Ok(MatchSpec::RequestHeader(header)),
            (Some(_), Some(_)) => Err(ConfigError::MissingField(
                "matchPath and matchRequestHeader are mutually exclusive".to_string(),
            )),
            (None, None) => Err(ConfigError::MissingField(
                "one of matchPath or matchRequestHeader is required".to_string(),
            )),
        }
    }
}
