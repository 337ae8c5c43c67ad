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

//! Header manipulation plugin for proxy-wasm hosts.
//!
//! Each configured manipulation matches the request by path or by one request
//! header against a regular expression. On a match it sets or appends request
//! and response headers whose values may use the match's capture groups.
//!
//! ```json
//! { "manipulations": [
//!     { "matchPath": "^/api/(?P<id>[0-9]+)$",
//!       "customRequestHeaders": [{"name": "X-Id", "value": "{{.id}}", "replace": true}] },
//!     { "matchRequestHeader": {"name": "Cookie", "value": "session=(\\w+)"},
//!       "customResponseHeaders": [{"name": "X-Session", "value": "$1"}] }
//! ] }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod host;
pub mod matcher;
pub mod rule;
pub mod template;

#[cfg(target_arch = "wasm32")]
mod plugin;

pub use config::Config;
pub use engine::{Engine, Manipulation};
pub use error::{ConfigError, ProcessError};
pub use host::{HeaderSink, PendingHeaders, RequestHeaders};
