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

//! # NVTio Telnet Session Layer
//!
//! Asynchronous Telnet client sessions over any Tokio byte stream, with
//! automatic option negotiation driven by `nvtio-telnetcodec`.
//!
//! ## Features
//!
//! - **Automatic Negotiation** - DO/DONT/WILL/WONT handled on the read
//!   path; the application only ever sees data and simple commands
//! - **Pluggable Option Handlers** - TERMINAL-TYPE, NAWS, ECHO,
//!   SUPPRESS-GO-AHEAD and generic policy handlers, registered per session
//! - **Two Reader Modes** - a background pump feeding a bounded channel, or
//!   caller-driven decoding for single-task applications
//! - **Observation Hooks** - raw wire taps and negotiation event monitors
//! - **Liveness Probe** - Are-You-There round trips with a timeout
//!
//! ## Quick Start
//!
//! ```no_run
//! use nvtio_client::{SessionConfig, SessionEvent, TelnetSession};
//! use nvtio_telnetcodec::{OptionHandler, TelnetNegotiator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut negotiator = TelnetNegotiator::new();
//!     negotiator.register_handler(OptionHandler::terminal_type("xterm-256color"))?;
//!     negotiator.register_handler(OptionHandler::window_size(80, 24))?;
//!
//!     let mut session =
//!         TelnetSession::connect("localhost:23", negotiator, SessionConfig::default()).await?;
//!
//!     while let Some(event) = session.recv().await? {
//!         match event {
//!             SessionEvent::Data(bytes) => print!("{}", String::from_utf8_lossy(&bytes)),
//!             SessionEvent::Command(frame) => eprintln!("peer command: {frame:?}"),
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

mod config;
mod error;
mod monitor;
mod session;

pub use config::{ReaderMode, SessionConfig};
pub use error::{Result, SessionError};
pub use monitor::{BufferSpy, NegotiationMonitor, RecordingMonitor, TrafficSpy};
pub use session::{SessionEvent, TelnetSession};

// Re-export the codec vocabulary sessions are parameterized with.
pub use nvtio_telnetcodec::{
    HandlerFlags, NegotiationEvent, NegotiationKind, OptionHandler, TelnetFrame, TelnetNegotiator,
    TelnetOption,
};
