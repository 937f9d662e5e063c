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

//! Telnet protocol constants (RFC 854/855).

/// Carriage Return
pub const CR: u8 = 13;
/// Line Feed
pub const LF: u8 = 10;

/// End of subnegotiation parameters
pub const SE: u8 = 240;
/// No Operation
pub const NOP: u8 = 241;
/// Data Mark - the data stream portion of a Synch
pub const DM: u8 = 242;
/// Break - NVT character BRK
pub const BRK: u8 = 243;
/// Interrupt Process
pub const IP: u8 = 244;
/// Abort Output
pub const AO: u8 = 245;
/// Are You There
pub const AYT: u8 = 246;
/// Erase Character
pub const EC: u8 = 247;
/// Erase Line
pub const EL: u8 = 248;
/// Go Ahead
pub const GA: u8 = 249;
/// Begin subnegotiation of the indicated option
pub const SB: u8 = 250;
/// WILL - sender wants to begin performing the indicated option
pub const WILL: u8 = 251;
/// WONT - sender refuses to perform the indicated option
pub const WONT: u8 = 252;
/// DO - sender wants the receiver to perform the indicated option
pub const DO: u8 = 253;
/// DONT - sender wants the receiver to stop performing the indicated option
pub const DONT: u8 = 254;
/// Interpret As Command - escape byte introducing every Telnet command
pub const IAC: u8 = 255;

/// End of Record command (RFC 885)
pub const EOR: u8 = 239;

/// Telnet option codes (IANA assigned values).
pub mod option {
    /// Binary Transmission (RFC 856)
    pub const BINARY: u8 = 0;
    /// Echo (RFC 857)
    pub const ECHO: u8 = 1;
    /// Suppress Go Ahead (RFC 858)
    pub const SGA: u8 = 3;
    /// Status (RFC 859)
    pub const STATUS: u8 = 5;
    /// Timing Mark (RFC 860)
    pub const TM: u8 = 6;
    /// Terminal Type (RFC 1091)
    pub const TTYPE: u8 = 24;
    /// End of Record option (RFC 885)
    pub const EOR: u8 = 25;
    /// Negotiate About Window Size (RFC 1073)
    pub const NAWS: u8 = 31;
    /// Terminal Speed (RFC 1079)
    pub const TSPEED: u8 = 32;
    /// Remote Flow Control (RFC 1372)
    pub const LFLOW: u8 = 33;
    /// Linemode (RFC 1184)
    pub const LINEMODE: u8 = 34;
    /// New Environment (RFC 1572)
    pub const NEW_ENVIRONMENT: u8 = 39;
    /// Extended Options List (RFC 861)
    pub const EXOPL: u8 = 255;
}

/// Terminal Type subnegotiation subcodes (RFC 1091).
pub mod ttype {
    /// IS - this is my terminal type
    pub const IS: u8 = 0;
    /// SEND - please send your terminal type
    pub const SEND: u8 = 1;
}
