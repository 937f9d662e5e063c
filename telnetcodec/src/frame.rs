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

use super::TelnetOption;
use bytes::BytesMut;

///
/// `TelnetFrame` is a single decoded unit of the Telnet byte stream: a data
/// byte, a two-byte simple command, a three-byte negotiation command, or a
/// complete subnegotiation block with its de-escaped payload.
///
#[derive(Clone, Debug, PartialEq)]
pub enum TelnetFrame {
    /// Telnet Data Byte
    Data(u8),
    /// No Operation
    NoOperation,
    /// End of urgent Data Stream
    DataMark,
    /// Operator pressed the Break key or the Attention key.
    Break,
    /// Interrupt current process.
    InterruptProcess,
    /// Cancel output from the current process.
    AbortOutput,
    /// Request acknowledgment.
    AreYouThere,
    /// Request that the operator erase the previous character.
    EraseCharacter,
    /// Request that the operator erase the previous line.
    EraseLine,
    /// End of input for half-duplex connections.
    GoAhead,
    /// End of Record - marks the end of a prompt
    EndOfRecord,
    /// Any other two-byte `IAC <command>` sequence, passed through opaquely
    /// with no default action.
    Command(u8),
    /// Request the remote side perform an option.
    Do(TelnetOption),
    /// Request the remote side stop performing an option.
    Dont(TelnetOption),
    /// Offer to perform an option locally.
    Will(TelnetOption),
    /// Refuse to perform an option locally.
    Wont(TelnetOption),
    /// Subnegotiation block: option code plus its payload, already stripped
    /// of the `IAC SB`/`IAC SE` framing and de-escaped.
    Subnegotiate(TelnetOption, BytesMut),
}

impl TelnetFrame {
    /// Whether this frame is one of the four negotiation verbs.
    pub fn is_negotiation(&self) -> bool {
        matches!(
            self,
            TelnetFrame::Do(_) | TelnetFrame::Dont(_) | TelnetFrame::Will(_) | TelnetFrame::Wont(_)
        )
    }
}
