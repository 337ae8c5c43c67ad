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

//! Error types.
//!
//! Errors are split by when they can happen. [`ConfigError`] is only produced
//! while the plugin configuration is loaded and compiled, before any traffic
//! is served. [`ProcessError`] is only produced while a single HTTP
//! transaction is processed and never outlives that transaction.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Plugin configuration is missing")]
    Missing,
    #[error("Invalid pattern for {field}: {source}")]
    InvalidPattern {
        field: &'static str,
        #[source]
        source: regex::Error,
    },
    #[error("{0}")]
    MissingField(String),
    #[error("Invalid template {template:?}: {reason}")]
    InvalidTemplate { template: String, reason: String },
    #[error("manipulation #{index}: {source}")]
    Manipulation {
        index: usize,
        #[source]
        source: Box<ConfigError>,
    },
}

impl ConfigError {
    pub(crate) fn in_manipulation(self, index: usize) -> Self {
        ConfigError::Manipulation {
            index,
            source: Box::new(self),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("Could not execute template for header {header:?}: {reason}")]
    TemplateExecution { header: String, reason: String },
}
