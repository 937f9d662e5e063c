//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Session configuration

use nvtio_telnetcodec::DEFAULT_MAX_SUBNEGOTIATION;
use std::time::Duration;

/// How inbound bytes are turned into session events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderMode {
    /// A spawned task owns the read half and pumps events into a bounded
    /// channel; negotiation replies go out as soon as verbs arrive.
    Background,
    /// No task is spawned; each call to `recv` reads and decodes directly.
    /// Negotiation only advances while the application is receiving.
    OnDemand,
}

/// Telnet session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Connection timeout for `TelnetSession::connect`
    pub connect_timeout: Duration,

    /// Capacity of the inbound event channel (background reader mode)
    pub channel_capacity: usize,

    /// Read buffer size for the socket
    pub buffer_size: usize,

    /// Cap on retained subnegotiation argument bytes
    pub max_subnegotiation: usize,

    /// Background task or caller-driven reading
    pub reader_mode: ReaderMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            channel_capacity: 64,
            buffer_size: 8192,
            max_subnegotiation: DEFAULT_MAX_SUBNEGOTIATION,
            reader_mode: ReaderMode::Background,
        }
    }
}

impl SessionConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the inbound event channel capacity
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Set the socket read buffer size
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Set the subnegotiation retention cap
    pub fn with_max_subnegotiation(mut self, max: usize) -> Self {
        self.max_subnegotiation = max;
        self
    }

    /// Select the reader mode
    pub fn with_reader_mode(mut self, mode: ReaderMode) -> Self {
        self.reader_mode = mode;
        self
    }
}
