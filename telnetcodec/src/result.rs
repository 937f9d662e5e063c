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

/// Result Type for Codec Operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Represents possible errors that can occur while encoding, decoding,
/// negotiating, or managing the option registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// An I/O error occurred while reading from or writing to the underlying stream.
    IOError {
        /// The kind of I/O error that occurred
        kind: std::io::ErrorKind,
        /// Description of the operation that failed
        operation: String,
    },

    /// The stream ended in the middle of a command or subnegotiation block.
    ///
    /// The remaining bytes are no longer interpretable; the session must be
    /// torn down rather than resynchronized.
    TruncatedCommand {
        /// Decoder state at the point the stream ended
        state: String,
    },

    /// The byte stream violated the protocol in a way that leaves the
    /// decoder unable to resynchronize; fails closed like a transport error.
    ProtocolViolation(String),

    /// A handler is already registered for the given option code.
    OptionAlreadyRegistered(u8),

    /// No handler is registered for the given option code.
    OptionNotRegistered(u8),

    /// Error answering an inbound subnegotiation block.
    ///
    /// Isolated by the session: it aborts only the reply, never the
    /// connection or the negotiation state for the option.
    SubnegotiationError {
        /// The telnet option being subnegotiated
        option: u8,
        /// Specific reason for the failure
        reason: String,
    },
}

impl std::error::Error for CodecError {}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::IOError { kind, operation } => {
                write!(f, "I/O error during {}: {:?}", operation, kind)
            }
            CodecError::TruncatedCommand { state } => {
                write!(f, "stream ended mid-command (decoder state: {})", state)
            }
            CodecError::ProtocolViolation(message) => {
                write!(f, "protocol violation: {}", message)
            }
            CodecError::OptionAlreadyRegistered(option) => {
                write!(f, "handler already registered for option {}", option)
            }
            CodecError::OptionNotRegistered(option) => {
                write!(f, "no handler registered for option {}", option)
            }
            CodecError::SubnegotiationError { option, reason } => {
                write!(f, "subnegotiation error for option {}: {}", option, reason)
            }
        }
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::IOError {
            kind: err.kind(),
            operation: err.to_string(),
        }
    }
}
