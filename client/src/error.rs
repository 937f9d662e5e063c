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

//! Session error types

use nvtio_telnetcodec::CodecError;
use std::fmt;
use std::io;

/// Session error type
#[derive(Debug, Clone)]
pub enum SessionError {
    /// I/O error
    Io(String),

    /// Connection timeout
    ConnectionTimeout,

    /// Connection closed by peer
    ConnectionClosed,

    /// Wire protocol or codec error
    Codec(String),

    /// Operation requires a live connection
    NotConnected,

    /// Custom error
    Custom(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::ConnectionTimeout => write!(f, "Connection timeout"),
            Self::ConnectionClosed => write!(f, "Connection closed by peer"),
            Self::Codec(msg) => write!(f, "Codec error: {}", msg),
            Self::NotConnected => write!(f, "Not connected"),
            Self::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<io::Error> for SessionError {
    fn from(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::TimedOut => Self::ConnectionTimeout,
            io::ErrorKind::ConnectionReset
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::UnexpectedEof => Self::ConnectionClosed,
            _ => Self::Io(error.to_string()),
        }
    }
}

impl From<CodecError> for SessionError {
    fn from(error: CodecError) -> Self {
        Self::Codec(error.to_string())
    }
}

/// Session result type
pub type Result<T> = std::result::Result<T, SessionError>;
