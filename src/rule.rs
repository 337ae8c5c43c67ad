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

use crate::config::CustomHeader;
use crate::error::{ConfigError, ProcessError};
use crate::host::HeaderSink;
use crate::template::ValueTemplate;
use regex::{Captures, Regex};

/// One compiled header write.
#[derive(Debug, Clone)]
pub struct HeaderRule {
    name: String,
    template: ValueTemplate,
    replace: bool,
}

impl HeaderRule {
    pub fn compile(config: &CustomHeader) -> Result<Self, ConfigError> {
        if config.name.is_empty() {
            return Err(ConfigError::MissingField(
                "header name is required".to_string(),
            ));
        }
        Ok(Self {
            name: config.name.clone(),
            template: ValueTemplate::compile(&config.value)?,
            replace: config.replace,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn replace(&self) -> bool {
        self.replace
    }

    /// Expands the value from the captures `pattern` produced and writes it
    /// to `target`. Nothing is written when expansion fails.
    pub fn apply<S>(
        &self,
        pattern: &Regex,
        caps: &Captures<'_>,
        target: &mut S,
    ) -> Result<(), ProcessError>
    where
        S: HeaderSink + ?Sized,
    {
        let value = self.template.expand(&self.name, pattern, caps)?;
        if self.replace {
            target.set_header(&self.name, &value);
        } else {
            target.add_header(&self.name, &value);
        }
        Ok(())
    }
}
