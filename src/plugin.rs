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

// proxy-wasm entry point: loads the configuration once in `on_configure` and
// runs the engine for every HTTP transaction.
use crate::engine::Engine;
use crate::error::ConfigError;
use crate::host::{HeaderSink, PendingHeaders, RequestHeaders};
use log::*;
use proxy_wasm::traits::*;
use proxy_wasm::types::*;
use std::rc::Rc;

const PATH_HEADER: &str = ":path";

proxy_wasm::main! {{
    proxy_wasm::set_log_level(LogLevel::Trace);
    proxy_wasm::set_root_context(|_| -> Box<dyn RootContext> {
        Box::new(PluginRootContext {
            engine: Rc::new(Engine::default()),
        })
    });
}}

struct PluginRootContext {
    engine: Rc<Engine>,
}

impl Context for PluginRootContext {}

impl RootContext for PluginRootContext {
    fn on_configure(&mut self, _: usize) -> bool {
        let engine = self
            .get_plugin_configuration()
            .ok_or(ConfigError::Missing)
            .and_then(|config| Engine::from_slice(&config));
        match engine {
            Ok(engine) => {
                debug!("Loaded plugin with {} manipulation(s)", engine.len());
                self.engine = Rc::new(engine);
                true
            }
            Err(err) => {
                // Returning false fails the plugin; no request runs with partial rules.
                error!("Could not load config: {}", err);
                false
            }
        }
    }

    fn create_http_context(&self, _: u32) -> Option<Box<dyn HttpContext>> {
        Some(Box::new(PluginHttpContext {
            engine: self.engine.clone(), // shallow copy, ref count only
            pending: PendingHeaders::new(),
        }))
    }

    fn get_type(&self) -> Option<ContextType> {
        Some(ContextType::HttpContext)
    }
}

struct PluginHttpContext {
    engine: Rc<Engine>,
    // Response writes decided on request headers, applied once the response arrives.
    pending: PendingHeaders,
}

impl Context for PluginHttpContext {}

impl HttpContext for PluginHttpContext {
    fn on_http_request_headers(&mut self, _: usize, _: bool) -> Action {
        let mut pending = PendingHeaders::new();
        let result = self.engine.process(&mut HostRequest(&*self), &mut pending);
        self.pending = pending;

        match result {
            Ok(()) => Action::Continue,
            Err(err) => {
                error!("{}", err);
                self.pending = PendingHeaders::new();
                self.send_http_response(500, vec![], Some(b"Internal Server Error\n"));
                Action::Pause
            }
        }
    }

    fn on_http_response_headers(&mut self, _: usize, _: bool) -> Action {
        let mut pending = std::mem::take(&mut self.pending);
        pending.replay(&mut HostResponse(&*self));
        Action::Continue
    }
}

struct HostRequest<'a, C: HttpContext>(&'a C);

impl<C: HttpContext> HeaderSink for HostRequest<'_, C> {
    fn set_header(&mut self, name: &str, value: &str) {
        self.0.set_http_request_header(name, Some(value));
    }

    fn add_header(&mut self, name: &str, value: &str) {
        self.0.add_http_request_header(name, value);
    }
}

impl<C: HttpContext> RequestHeaders for HostRequest<'_, C> {
    fn uri(&self) -> Option<String> {
        self.0.get_http_request_header(PATH_HEADER)
    }

    fn header(&self, name: &str) -> Option<String> {
        self.0.get_http_request_header(name)
    }
}

struct HostResponse<'a, C: HttpContext>(&'a C);

impl<C: HttpContext> HeaderSink for HostResponse<'_, C> {
    fn set_header(&mut self, name: &str, value: &str) {
        self.0.set_http_response_header(name, Some(value));
    }

    fn add_header(&mut self, name: &str, value: &str) {
        self.0.add_http_response_header(name, value);
    }
}
