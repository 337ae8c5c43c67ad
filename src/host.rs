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

//! The request and response surface the engine writes against.
//!
//! The proxy-wasm HTTP context implements these in `plugin.rs`. Tests
//! implement them with plain vectors.

/// Header writes on an in-flight request or response.
pub trait HeaderSink {
    /// Replaces every existing value of `name` with `value`.
    fn set_header(&mut self, name: &str, value: &str);
    /// Adds `value` as one more occurrence of `name`.
    fn add_header(&mut self, name: &str, value: &str);
}

/// The in-flight request.
pub trait RequestHeaders: HeaderSink {
    /// Path and query, exactly as the host exposes them.
    fn uri(&self) -> Option<String>;
    /// First value of `name`, looked up case-insensitively.
    fn header(&self, name: &str) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderOp {
    Set { name: String, value: String },
    Add { name: String, value: String },
}

/// Header writes recorded now and replayed later.
///
/// Response headers only reach the plugin after the upstream answered, while
/// matching happens on request headers. The engine writes response rules into
/// this buffer and `on_http_response_headers` replays them in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingHeaders {
    ops: Vec<HeaderOp>,
}

impl PendingHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[HeaderOp] {
        &self.ops
    }

    /// Applies the recorded writes to `sink` and empties the buffer.
    pub fn replay(&mut self, sink: &mut dyn HeaderSink) {
        for op in self.ops.drain(..) {
            match op {
                HeaderOp::Set { name, value } => sink.set_header(&name, &value),
                HeaderOp::Add { name, value } => sink.add_header(&name, &value),
            }
        }
    }
}

impl HeaderSink for PendingHeaders {
    fn set_header(&mut self, name: &str, value: &str) {
        self.ops.push(HeaderOp::Set {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    fn add_header(&mut self, name: &str, value: &str) {
        self.ops.push(HeaderOp::Add {
            name: name.to_string(),
            value: value.to_string(),
        });
    }
}
