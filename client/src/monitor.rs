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

//! Observation hooks: wire taps and negotiation monitors.

use nvtio_telnetcodec::NegotiationEvent;
use std::sync::Mutex;

/// Observer for the raw byte streams crossing the socket.
///
/// Both callbacks run on the session's I/O paths while internal locks are
/// held; implementations must not block. Bytes are reported exactly as
/// written to or read from the transport, escaping included.
pub trait TrafficSpy: Send + Sync + 'static {
    /// Bytes about to be written to the transport.
    fn outbound(&self, bytes: &[u8]);
    /// Bytes just read from the transport.
    fn inbound(&self, bytes: &[u8]);
}

/// Observer for negotiation verbs received from the peer.
///
/// Invoked after the engine has mutated its state for the verb and before
/// the resulting reply is flushed, so queries against the session observe
/// the post-transition state. Must not block.
pub trait NegotiationMonitor: Send + Sync + 'static {
    /// A DO/DONT/WILL/WONT arrived and has been processed.
    fn negotiation(&self, event: NegotiationEvent);
}

/// A [`TrafficSpy`] that appends both directions to in-memory buffers.
///
/// Intended for protocol debugging and tests.
#[derive(Debug, Default)]
pub struct BufferSpy {
    outbound: Mutex<Vec<u8>>,
    inbound: Mutex<Vec<u8>>,
}

impl BufferSpy {
    /// Creates an empty spy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written to the transport so far.
    pub fn outbound_bytes(&self) -> Vec<u8> {
        self.outbound.lock().unwrap().clone()
    }

    /// Everything read from the transport so far.
    pub fn inbound_bytes(&self) -> Vec<u8> {
        self.inbound.lock().unwrap().clone()
    }
}

impl TrafficSpy for BufferSpy {
    fn outbound(&self, bytes: &[u8]) {
        self.outbound.lock().unwrap().extend_from_slice(bytes);
    }

    fn inbound(&self, bytes: &[u8]) {
        self.inbound.lock().unwrap().extend_from_slice(bytes);
    }
}

/// A [`NegotiationMonitor`] that records events in arrival order.
#[derive(Debug, Default)]
pub struct RecordingMonitor {
    events: Mutex<Vec<NegotiationEvent>>,
}

impl RecordingMonitor {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The events observed so far.
    pub fn events(&self) -> Vec<NegotiationEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl NegotiationMonitor for RecordingMonitor {
    fn negotiation(&self, event: NegotiationEvent) {
        self.events.lock().unwrap().push(event);
    }
}
