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

use super::{CodecError, TelnetFrame, TelnetOption, consts};
use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::trace;

/// Default cap on a buffered subnegotiation payload, in bytes.
///
/// Payload bytes past the cap are silently dropped so a misbehaving peer
/// cannot grow the decode buffer without bound.
pub const DEFAULT_MAX_SUBNEGOTIATION: usize = 8 * 1024;

/// A stateful codec translating between the raw Telnet byte stream and
/// [`TelnetFrame`] values, in both directions.
///
/// The decoder is a byte-at-a-time state machine: it detects the `IAC`
/// escape byte, extracts two/three-byte commands and variable-length
/// subnegotiation blocks, and passes everything else through unchanged as
/// data. The encoder is the exact inverse, doubling literal `0xFF` bytes in
/// data and inside subnegotiation payloads.
///
/// The codec performs no option negotiation itself; negotiation commands
/// are surfaced as frames for the [`crate::TelnetNegotiator`] to act on.
/// One codec instance belongs to one connection and is not thread-safe.
pub struct TelnetCodec {
    decoder_buffer: BytesMut,
    decoder_state: DecoderState,
    max_subnegotiation: usize,
    /// Count of payload bytes dropped from the current subnegotiation block.
    truncated: usize,
}

impl TelnetCodec {
    /// Creates a codec with the default subnegotiation payload cap.
    pub fn new() -> TelnetCodec {
        TelnetCodec::default()
    }

    /// Creates a codec whose buffered subnegotiation payloads are capped at
    /// `max_subnegotiation` bytes. Bytes past the cap are dropped, not fatal.
    pub fn with_max_subnegotiation(max_subnegotiation: usize) -> TelnetCodec {
        TelnetCodec {
            max_subnegotiation,
            ..TelnetCodec::default()
        }
    }

    /// The configured subnegotiation payload cap.
    pub fn max_subnegotiation(&self) -> usize {
        self.max_subnegotiation
    }

    fn push_subnegotiation_byte(&mut self, byte: u8) {
        if self.decoder_buffer.len() < self.max_subnegotiation {
            self.decoder_buffer.put_u8(byte);
        } else {
            self.truncated += 1;
        }
    }
}

impl Default for TelnetCodec {
    fn default() -> Self {
        TelnetCodec {
            decoder_buffer: BytesMut::new(),
            decoder_state: DecoderState::NormalData,
            max_subnegotiation: DEFAULT_MAX_SUBNEGOTIATION,
            truncated: 0,
        }
    }
}

impl Decoder for TelnetCodec {
    type Item = TelnetFrame;
    type Error = CodecError;

    /// Decodes the next [`TelnetFrame`] out of `src`.
    ///
    /// Returns `Ok(None)` when `src` holds no complete frame yet (the state
    /// machine remembers partial commands across calls). Subnegotiation
    /// payloads are buffered until the terminating `IAC SE` and delivered
    /// whole, already de-escaped and capped at the configured maximum.
    ///
    /// An `IAC <command>` inside a subnegotiation block that is neither
    /// `IAC IAC` nor `IAC SE` leaves the stream uninterpretable and fails
    /// closed with [`CodecError::ProtocolViolation`].
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<TelnetFrame>, Self::Error> {
        while src.remaining() > 0 {
            let byte = src.get_u8();
            match (self.decoder_state, byte) {
                (DecoderState::NormalData, consts::IAC) => {
                    self.decoder_state = DecoderState::InterpretAsCommand;
                }
                (DecoderState::NormalData, _) => {
                    return Ok(Some(TelnetFrame::Data(byte)));
                }
                (DecoderState::InterpretAsCommand, consts::IAC) => {
                    // Doubled IAC is a literal 255 data byte.
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetFrame::Data(consts::IAC)));
                }
                (DecoderState::InterpretAsCommand, consts::NOP) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetFrame::NoOperation));
                }
                (DecoderState::InterpretAsCommand, consts::DM) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetFrame::DataMark));
                }
                (DecoderState::InterpretAsCommand, consts::BRK) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetFrame::Break));
                }
                (DecoderState::InterpretAsCommand, consts::IP) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetFrame::InterruptProcess));
                }
                (DecoderState::InterpretAsCommand, consts::AO) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetFrame::AbortOutput));
                }
                (DecoderState::InterpretAsCommand, consts::AYT) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetFrame::AreYouThere));
                }
                (DecoderState::InterpretAsCommand, consts::EC) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetFrame::EraseCharacter));
                }
                (DecoderState::InterpretAsCommand, consts::EL) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetFrame::EraseLine));
                }
                (DecoderState::InterpretAsCommand, consts::GA) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetFrame::GoAhead));
                }
                (DecoderState::InterpretAsCommand, consts::EOR) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetFrame::EndOfRecord));
                }
                (DecoderState::InterpretAsCommand, consts::DO) => {
                    self.decoder_state = DecoderState::NegotiateDo;
                }
                (DecoderState::InterpretAsCommand, consts::DONT) => {
                    self.decoder_state = DecoderState::NegotiateDont;
                }
                (DecoderState::InterpretAsCommand, consts::WILL) => {
                    self.decoder_state = DecoderState::NegotiateWill;
                }
                (DecoderState::InterpretAsCommand, consts::WONT) => {
                    self.decoder_state = DecoderState::NegotiateWont;
                }
                (DecoderState::InterpretAsCommand, consts::SB) => {
                    self.decoder_state = DecoderState::Subnegotiate;
                }
                (DecoderState::InterpretAsCommand, _) => {
                    // Opaque command, surfaced with no default action.
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetFrame::Command(byte)));
                }
                (DecoderState::NegotiateDo, _) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetFrame::Do(byte.into())));
                }
                (DecoderState::NegotiateDont, _) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetFrame::Dont(byte.into())));
                }
                (DecoderState::NegotiateWill, _) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetFrame::Will(byte.into())));
                }
                (DecoderState::NegotiateWont, _) => {
                    self.decoder_state = DecoderState::NormalData;
                    return Ok(Some(TelnetFrame::Wont(byte.into())));
                }
                (DecoderState::Subnegotiate, _) => {
                    self.decoder_state = DecoderState::SubnegotiateArgument(byte);
                }
                (DecoderState::SubnegotiateArgument(option), consts::IAC) => {
                    self.decoder_state = DecoderState::SubnegotiateArgumentIAC(option);
                }
                (DecoderState::SubnegotiateArgument(_option), _) => {
                    self.push_subnegotiation_byte(byte);
                }
                (DecoderState::SubnegotiateArgumentIAC(option), consts::IAC) => {
                    self.decoder_state = DecoderState::SubnegotiateArgument(option);
                    self.push_subnegotiation_byte(consts::IAC);
                }
                (DecoderState::SubnegotiateArgumentIAC(option), consts::SE) => {
                    self.decoder_state = DecoderState::NormalData;
                    if self.truncated > 0 {
                        trace!(
                            option,
                            dropped = self.truncated,
                            "subnegotiation payload truncated at {} bytes",
                            self.max_subnegotiation
                        );
                        self.truncated = 0;
                    }
                    let payload = self.decoder_buffer.split();
                    return Ok(Some(TelnetFrame::Subnegotiate(option.into(), payload)));
                }
                (DecoderState::SubnegotiateArgumentIAC(option), _) => {
                    return Err(CodecError::ProtocolViolation(format!(
                        "unexpected command 0x{:02X} inside subnegotiation of option {}",
                        byte, option
                    )));
                }
            }
        }
        Ok(None)
    }

    /// Called at end of stream; a decoder state other than `NormalData`
    /// means the peer closed mid-command, which fails closed.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<TelnetFrame>, Self::Error> {
        if let Some(frame) = self.decode(src)? {
            return Ok(Some(frame));
        }
        match self.decoder_state {
            DecoderState::NormalData => Ok(None),
            state => Err(CodecError::TruncatedCommand {
                state: format!("{:?}", state),
            }),
        }
    }
}

impl Encoder<u8> for TelnetCodec {
    type Error = CodecError;

    fn encode(&mut self, item: u8, dst: &mut BytesMut) -> Result<(), Self::Error> {
        // Encode a raw data byte, escaping IAC if necessary.
        dst.reserve(2);
        if item == consts::IAC {
            dst.put_u8(consts::IAC);
        }
        dst.put_u8(item);
        Ok(())
    }
}

impl Encoder<&[u8]> for TelnetCodec {
    type Error = CodecError;

    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(item.len());
        for byte in item {
            if *byte == consts::IAC {
                dst.put_u8(consts::IAC);
            }
            dst.put_u8(*byte);
        }
        Ok(())
    }
}

impl Encoder<TelnetFrame> for TelnetCodec {
    type Error = CodecError;

    /// Encodes a [`TelnetFrame`] into its canonical wire form.
    ///
    /// Data bytes valued `0xFF` are doubled; negotiation commands are the
    /// three-byte `IAC <verb> <option>` form; subnegotiation blocks are
    /// wrapped in `IAC SB <option> … IAC SE` with any `0xFF` payload byte
    /// doubled. Simple commands are two bytes.
    fn encode(&mut self, item: TelnetFrame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            TelnetFrame::Data(byte) => {
                self.encode(byte, dst)?;
            }
            TelnetFrame::NoOperation => {
                dst.reserve(2);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::NOP);
            }
            TelnetFrame::DataMark => {
                dst.reserve(2);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::DM);
            }
            TelnetFrame::Break => {
                dst.reserve(2);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::BRK);
            }
            TelnetFrame::InterruptProcess => {
                dst.reserve(2);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::IP);
            }
            TelnetFrame::AbortOutput => {
                dst.reserve(2);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::AO);
            }
            TelnetFrame::AreYouThere => {
                dst.reserve(2);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::AYT);
            }
            TelnetFrame::EraseCharacter => {
                dst.reserve(2);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::EC);
            }
            TelnetFrame::EraseLine => {
                dst.reserve(2);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::EL);
            }
            TelnetFrame::GoAhead => {
                dst.reserve(2);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::GA);
            }
            TelnetFrame::EndOfRecord => {
                dst.reserve(2);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::EOR);
            }
            TelnetFrame::Command(command) => {
                dst.reserve(2);
                dst.put_u8(consts::IAC);
                dst.put_u8(command);
            }
            TelnetFrame::Do(option) => {
                dst.reserve(3);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::DO);
                dst.put_u8(option.into());
            }
            TelnetFrame::Dont(option) => {
                dst.reserve(3);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::DONT);
                dst.put_u8(option.into());
            }
            TelnetFrame::Will(option) => {
                dst.reserve(3);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::WILL);
                dst.put_u8(option.into());
            }
            TelnetFrame::Wont(option) => {
                dst.reserve(3);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::WONT);
                dst.put_u8(option.into());
            }
            TelnetFrame::Subnegotiate(option, payload) => {
                dst.reserve(5 + payload.len());
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SB);
                dst.put_u8(option.into());
                for byte in &payload {
                    if *byte == consts::IAC {
                        dst.put_u8(consts::IAC);
                    }
                    dst.put_u8(*byte);
                }
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SE);
            }
        }
        Ok(())
    }
}

/// Internal state of the Telnet decoder, tracking the current decoding
/// context across partial reads.
#[derive(Clone, Copy, Debug)]
enum DecoderState {
    /// Normal Data
    NormalData,
    /// Received IAC, next byte is a command
    InterpretAsCommand,
    /// Received DO command, next byte is the option
    NegotiateDo,
    /// Received DONT command, next byte is the option
    NegotiateDont,
    /// Received WILL command, next byte is the option
    NegotiateWill,
    /// Received WONT command, next byte is the option
    NegotiateWont,
    /// Received SB command, next byte is the option
    Subnegotiate,
    /// Buffering subnegotiation payload for the given option
    SubnegotiateArgument(u8),
    /// Received IAC while buffering subnegotiation payload
    SubnegotiateArgumentIAC(u8),
}
