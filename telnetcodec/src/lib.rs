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

//! # NVTio Telnet Protocol Codec
//!
//! This crate implements the Telnet Network Virtual Terminal wire protocol
//! (RFC 854/855): a streaming frame codec, the DO/DONT/WILL/WONT option
//! negotiation engine, and the pluggable per-option handler framework. It is
//! designed to sit under asynchronous transports via `tokio_util::codec` and
//! is consumed by the `nvtio-client` session layer.
//!
//! ## Core Components
//!
//! ### [`TelnetCodec`]
//!
//! A stateful byte-oriented codec implementing the [`Decoder`] and
//! [`Encoder`] traits from `tokio_util::codec`. Decoding walks the input a
//! byte at a time through an explicit state machine, assembling:
//!
//! - **Data bytes** with IAC (Interpret As Command, `0xFF`) de-escaping
//! - **Simple commands**: NOP, Break, Are-You-There, Go-Ahead, etc.
//! - **Negotiation verbs**: `IAC <DO|DONT|WILL|WONT> <option>`
//! - **Subnegotiation blocks**: `IAC SB <option> <args...> IAC SE`, with
//!   `IAC IAC` de-doubling inside the argument bytes and a configurable
//!   length cap
//!
//! The codec is pure framing: it never mutates negotiation state. That
//! belongs to the engine below.
//!
//! ### [`TelnetNegotiator`]
//!
//! The per-session negotiation engine. Tracks confirmed and requested state
//! per option and direction with the classic outstanding-request counter
//! heuristic, so that duplicate unsolicited proposals are idempotent,
//! refusals are restated rather than escalated, and crossed requests cannot
//! ping-pong. Options without a registered handler are always refused.
//!
//! ### [`OptionHandler`] / [`OptionRegistry`]
//!
//! Per-option policy (initial proposals, acceptance of peer proposals) and
//! subnegotiation behavior. Ships handlers for SUPPRESS-GO-AHEAD, ECHO,
//! TERMINAL-TYPE (RFC 1091 IS/SEND) and NAWS (RFC 1073 window size), plus a
//! generic policy-only handler for any other option code.
//!
//! ### [`TelnetFrame`]
//!
//! The frame vocabulary shared by codec and engine: data bytes, simple
//! commands, the four negotiation verbs, and subnegotiation blocks.
//!
//! ## Usage Example
//!
//! ```rust
//! use nvtio_telnetcodec::{TelnetCodec, TelnetFrame, TelnetOption};
//! use tokio_util::codec::{Decoder, Encoder};
//! use bytes::BytesMut;
//!
//! # fn example() -> Result<(), nvtio_telnetcodec::CodecError> {
//! let mut codec = TelnetCodec::new();
//!
//! // Encoding: data plus a negotiation verb.
//! let mut buffer = BytesMut::new();
//! codec.encode(&b"Hi"[..], &mut buffer)?;
//! codec.encode(TelnetFrame::Will(TelnetOption::Echo), &mut buffer)?;
//!
//! // Decoding: data followed by DO ECHO.
//! let mut input = BytesMut::from(&b"ok\xFF\xFD\x01"[..]);
//! while let Some(frame) = codec.decode(&mut input)? {
//!     match frame {
//!         TelnetFrame::Data(byte) => println!("data {byte:#04x}"),
//!         TelnetFrame::Do(option) => println!("peer requests DO {option}"),
//!         _ => {}
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Protocol Details
//!
//! All commands start with IAC (`0xFF`):
//!
//! - 2-byte commands: `IAC <command>`
//! - 3-byte negotiation: `IAC <DO|DONT|WILL|WONT> <option>`
//! - Subnegotiation: `IAC SB <option> <args...> IAC SE`
//!
//! A literal `0xFF` in the data stream or inside subnegotiation arguments is
//! transmitted doubled (`IAC IAC`).
//!
//! ## Thread Safety
//!
//! Neither [`TelnetCodec`] nor [`TelnetNegotiator`] is internally
//! synchronized; the session layer owns one of each per connection behind
//! its own locks.
//!
//! ## Related RFCs
//!
//! - RFC 854: Telnet Protocol Specification
//! - RFC 855: Telnet Option Specifications
//! - RFC 857: Telnet Echo Option
//! - RFC 858: Telnet Suppress Go Ahead Option
//! - RFC 1073: Telnet Window Size Option
//! - RFC 1091: Telnet Terminal-Type Option

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

mod codec;
pub mod consts;
mod frame;
mod handler;
mod negotiation;
mod option;
mod result;

pub use self::codec::{DEFAULT_MAX_SUBNEGOTIATION, TelnetCodec};
pub use self::frame::TelnetFrame;
pub use self::handler::{HandlerFlags, OptionHandler, OptionRegistry};
pub use self::negotiation::{Negotiated, NegotiationEvent, NegotiationKind, TelnetNegotiator};
pub use self::option::TelnetOption;
pub use self::result::{CodecError, CodecResult};
