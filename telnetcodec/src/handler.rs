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

//! Per-option subnegotiation behavior.
//!
//! Handlers are pure strategy values: immutable configuration (the four
//! negotiation intents) plus the minimal per-option data they need, such as
//! a terminal-type string or window dimensions. They never own transport or
//! negotiation state; the [`crate::TelnetNegotiator`] consults them when a
//! peer proposal arrives and when subnegotiation payloads need producing.

use crate::{CodecError, CodecResult, TelnetOption, consts};
use byteorder::{BigEndian, WriteBytesExt};
use bytes::Bytes;

/// The four negotiation intents supplied when a handler is registered.
///
/// `init_*` controls whether the engine proactively proposes the option at
/// session start; `accept_*` controls how the engine answers a peer-initiated
/// proposal for the option.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HandlerFlags {
    /// Proactively offer `WILL <option>` at session start.
    pub init_local: bool,
    /// Proactively request `DO <option>` at session start.
    pub init_remote: bool,
    /// Answer a peer `DO <option>` with `WILL` (true) or `WONT` (false).
    pub accept_local: bool,
    /// Answer a peer `WILL <option>` with `DO` (true) or `DONT` (false).
    pub accept_remote: bool,
}

impl HandlerFlags {
    /// Creates a flag set from the four intents in registration order.
    pub fn new(init_local: bool, init_remote: bool, accept_local: bool, accept_remote: bool) -> Self {
        HandlerFlags {
            init_local,
            init_remote,
            accept_local,
            accept_remote,
        }
    }
}

/// A registered per-option strategy.
///
/// The set of behaviors is small and closed, so the handlers are a tagged
/// enum rather than trait objects: `SuppressGoAhead` and `Echo` are
/// negotiation-only, `TerminalType` answers the RFC 1091 SEND request,
/// `WindowSize` announces RFC 1073 dimensions, and `Simple` covers any
/// option whose subnegotiation (if any) is handled out of band by the
/// application.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionHandler {
    /// Suppress Go Ahead (RFC 858), negotiation only.
    SuppressGoAhead {
        /// Negotiation intents.
        flags: HandlerFlags,
    },
    /// Echo (RFC 857), negotiation only.
    Echo {
        /// Negotiation intents.
        flags: HandlerFlags,
    },
    /// Terminal Type (RFC 1091). Replies `IS <name>` to a peer `SEND`.
    TerminalType {
        /// Terminal name reported verbatim (e.g. "VT100").
        name: String,
        /// Negotiation intents.
        flags: HandlerFlags,
    },
    /// Negotiate About Window Size (RFC 1073). Announces dimensions once
    /// the local side is granted the option.
    WindowSize {
        /// Window width in columns.
        cols: u16,
        /// Window height in rows.
        rows: u16,
        /// Negotiation intents.
        flags: HandlerFlags,
    },
    /// Pass-through handler for an arbitrary option code; negotiation only,
    /// subnegotiation payloads are left to the application.
    Simple {
        /// The 8-bit option code this handler negotiates.
        option: TelnetOption,
        /// Negotiation intents.
        flags: HandlerFlags,
    },
}

impl OptionHandler {
    /// Suppress Go Ahead handler with the given intents.
    pub fn suppress_go_ahead(flags: HandlerFlags) -> Self {
        OptionHandler::SuppressGoAhead { flags }
    }

    /// Echo handler with the given intents.
    pub fn echo(flags: HandlerFlags) -> Self {
        OptionHandler::Echo { flags }
    }

    /// Terminal-type handler answering `SEND` with the given name.
    ///
    /// Defaults to the reference intents for terminal type: accept a peer
    /// `DO`, never initiate, never accept the peer performing it.
    pub fn terminal_type(name: impl Into<String>) -> Self {
        OptionHandler::TerminalType {
            name: name.into(),
            flags: HandlerFlags::new(false, false, true, false),
        }
    }

    /// Terminal-type handler with explicit intents.
    pub fn terminal_type_with_flags(name: impl Into<String>, flags: HandlerFlags) -> Self {
        OptionHandler::TerminalType {
            name: name.into(),
            flags,
        }
    }

    /// Window-size handler announcing `cols` x `rows`.
    ///
    /// Defaults to offering `WILL NAWS` at session start and accepting a
    /// peer `DO NAWS`.
    pub fn window_size(cols: u16, rows: u16) -> Self {
        OptionHandler::WindowSize {
            cols,
            rows,
            flags: HandlerFlags::new(true, false, true, false),
        }
    }

    /// Generic pass-through handler for `option` with the given intents.
    pub fn simple(option: TelnetOption, flags: HandlerFlags) -> Self {
        OptionHandler::Simple { option, flags }
    }

    /// The option this handler negotiates.
    pub fn option(&self) -> TelnetOption {
        match self {
            OptionHandler::SuppressGoAhead { .. } => TelnetOption::SuppressGoAhead,
            OptionHandler::Echo { .. } => TelnetOption::Echo,
            OptionHandler::TerminalType { .. } => TelnetOption::TerminalType,
            OptionHandler::WindowSize { .. } => TelnetOption::NAWS,
            OptionHandler::Simple { option, .. } => *option,
        }
    }

    /// The negotiation intents supplied at registration.
    pub fn flags(&self) -> HandlerFlags {
        match self {
            OptionHandler::SuppressGoAhead { flags }
            | OptionHandler::Echo { flags }
            | OptionHandler::TerminalType { flags, .. }
            | OptionHandler::WindowSize { flags, .. }
            | OptionHandler::Simple { flags, .. } => *flags,
        }
    }

    /// Payload to send when this side begins subnegotiation after the local
    /// option is granted (e.g. NAWS announces its dimensions).
    ///
    /// The payload excludes the `IAC SB <option>` / `IAC SE` framing; the
    /// codec adds that and doubles any embedded `0xFF`.
    pub fn start_subnegotiation_local(&self) -> Option<Bytes> {
        match self {
            OptionHandler::WindowSize { cols, rows, .. } => {
                let mut payload = Vec::with_capacity(4);
                // Errors cannot occur writing into a Vec.
                payload.write_u16::<BigEndian>(*cols).ok()?;
                payload.write_u16::<BigEndian>(*rows).ok()?;
                Some(Bytes::from(payload))
            }
            _ => None,
        }
    }

    /// Payload to send when the remote side is granted the option and this
    /// side is expected to open subnegotiation on its behalf.
    pub fn start_subnegotiation_remote(&self) -> Option<Bytes> {
        None
    }

    /// Computes the reply payload for an inbound subnegotiation block.
    ///
    /// `payload` is the block's argument bytes, already de-escaped and
    /// stripped of framing and the option code. Returns `Ok(None)` when no
    /// reply is warranted. A failure here is isolated by the session: it
    /// aborts only this reply, never the negotiation state.
    pub fn answer_subnegotiation(&self, payload: &[u8]) -> CodecResult<Option<Bytes>> {
        match self {
            OptionHandler::TerminalType { name, .. } => {
                let subcode = payload.first().ok_or_else(|| CodecError::SubnegotiationError {
                    option: consts::option::TTYPE,
                    reason: "empty terminal-type subnegotiation".to_string(),
                })?;
                if *subcode == consts::ttype::SEND {
                    let mut reply = Vec::with_capacity(1 + name.len());
                    reply.push(consts::ttype::IS);
                    reply.extend_from_slice(name.as_bytes());
                    Ok(Some(Bytes::from(reply)))
                } else {
                    // IS and any other subcode carry no answer.
                    Ok(None)
                }
            }
            _ => Ok(None),
        }
    }
}

/// Maps an 8-bit option code to its registered handler, O(1).
///
/// The registry is configuration, not live state: it survives reconnects,
/// unlike the per-option negotiation table which is rebuilt per session.
#[derive(Clone, Debug)]
pub struct OptionRegistry {
    handlers: [Option<OptionHandler>; 256],
}

impl OptionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        OptionRegistry {
            handlers: std::array::from_fn(|_| None),
        }
    }

    /// Installs `handler` for its option code.
    ///
    /// Fails with [`CodecError::OptionAlreadyRegistered`] without mutating
    /// the existing registration if the slot is occupied.
    pub fn register(&mut self, handler: OptionHandler) -> CodecResult<()> {
        let code = handler.option().to_u8();
        let slot = &mut self.handlers[code as usize];
        if slot.is_some() {
            return Err(CodecError::OptionAlreadyRegistered(code));
        }
        *slot = Some(handler);
        Ok(())
    }

    /// Removes and returns the handler for `option`.
    ///
    /// Fails with [`CodecError::OptionNotRegistered`] if none is installed.
    pub fn deregister(&mut self, option: TelnetOption) -> CodecResult<OptionHandler> {
        self.handlers[option.to_u8() as usize]
            .take()
            .ok_or(CodecError::OptionNotRegistered(option.to_u8()))
    }

    /// The handler for `option`, if one is registered.
    pub fn get(&self, option: TelnetOption) -> Option<&OptionHandler> {
        self.handlers[option.to_u8() as usize].as_ref()
    }

    /// Iterates over all registered handlers in option-code order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionHandler> {
        self.handlers.iter().filter_map(|slot| slot.as_ref())
    }
}

impl Default for OptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
