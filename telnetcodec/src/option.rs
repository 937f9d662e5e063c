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

use crate::consts;

///
/// [Telnet Terminal Options](https://www.iana.org/assignments/telnet-options/telnet-options.xhtml)
///
/// A negotiable Telnet capability, identified on the wire by an 8-bit code.
/// Options not listed here round-trip through [`TelnetOption::Unknown`] so the
/// negotiation engine can still refuse them byte-exactly.
///
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetOption {
    /// [`consts::option::BINARY`] Telnet Binary Transmission [RFC856](https://tools.ietf.org/html/rfc856)
    TransmitBinary,
    /// [`consts::option::ECHO`] Telnet Echo Option [RFC857](https://tools.ietf.org/html/rfc857)
    Echo,
    /// [`consts::option::SGA`] Suppress Go Ahead [RFC858](https://tools.ietf.org/html/rfc858)
    SuppressGoAhead,
    /// [`consts::option::STATUS`] Telnet Status Option [RFC859](http://www.iana.org/go/rfc859)
    Status,
    /// [`consts::option::TM`] Telnet Timing Mark Option [RFC860](http://www.iana.org/go/rfc860)
    TimingMark,
    /// [`consts::option::TTYPE`] Terminal Type [RFC1091](http://www.iana.org/go/rfc1091)
    TerminalType,
    /// [`consts::option::EOR`] End of Record [RFC885](http://www.iana.org/go/rfc885)
    EndOfRecord,
    /// [`consts::option::NAWS`] Negotiate About Window Size [RFC1073](http://www.iana.org/go/rfc1073)
    NAWS,
    /// [`consts::option::TSPEED`] Terminal Speed [RFC1079](http://www.iana.org/go/rfc1079)
    TerminalSpeed,
    /// [`consts::option::LFLOW`] Remote Flow Control [RFC1372](http://www.iana.org/go/rfc1372)
    FlowControl,
    /// [`consts::option::LINEMODE`] Linemode [RFC1184](http://www.iana.org/go/rfc1184)
    Linemode,
    /// [`consts::option::NEW_ENVIRONMENT`] New Environment Option [RFC1572](http://www.iana.org/go/rfc1572)
    NewEnvironment,
    /// [`consts::option::EXOPL`] Extended-Options-List [RFC861](http://www.iana.org/go/rfc861)
    EXOPL,
    /// Unknown Option
    Unknown(u8),
}

impl TelnetOption {
    /// Converts a `TelnetOption` into its wire option code.
    pub fn to_u8(&self) -> u8 {
        match self {
            TelnetOption::TransmitBinary => consts::option::BINARY,
            TelnetOption::Echo => consts::option::ECHO,
            TelnetOption::SuppressGoAhead => consts::option::SGA,
            TelnetOption::Status => consts::option::STATUS,
            TelnetOption::TimingMark => consts::option::TM,
            TelnetOption::TerminalType => consts::option::TTYPE,
            TelnetOption::EndOfRecord => consts::option::EOR,
            TelnetOption::NAWS => consts::option::NAWS,
            TelnetOption::TerminalSpeed => consts::option::TSPEED,
            TelnetOption::FlowControl => consts::option::LFLOW,
            TelnetOption::Linemode => consts::option::LINEMODE,
            TelnetOption::NewEnvironment => consts::option::NEW_ENVIRONMENT,
            TelnetOption::EXOPL => consts::option::EXOPL,
            TelnetOption::Unknown(byte) => *byte,
        }
    }

    /// Converts a wire option code into the corresponding `TelnetOption`.
    /// Unassigned or unsupported codes map to [`TelnetOption::Unknown`].
    pub fn from_u8(byte: u8) -> Self {
        match byte {
            consts::option::BINARY => TelnetOption::TransmitBinary,
            consts::option::ECHO => TelnetOption::Echo,
            consts::option::SGA => TelnetOption::SuppressGoAhead,
            consts::option::STATUS => TelnetOption::Status,
            consts::option::TM => TelnetOption::TimingMark,
            consts::option::TTYPE => TelnetOption::TerminalType,
            consts::option::EOR => TelnetOption::EndOfRecord,
            consts::option::NAWS => TelnetOption::NAWS,
            consts::option::TSPEED => TelnetOption::TerminalSpeed,
            consts::option::LFLOW => TelnetOption::FlowControl,
            consts::option::LINEMODE => TelnetOption::Linemode,
            consts::option::NEW_ENVIRONMENT => TelnetOption::NewEnvironment,
            consts::option::EXOPL => TelnetOption::EXOPL,
            byte => TelnetOption::Unknown(byte),
        }
    }
}

impl std::fmt::Display for TelnetOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetOption::TransmitBinary => write!(f, "TransmitBinary"),
            TelnetOption::Echo => write!(f, "Echo"),
            TelnetOption::SuppressGoAhead => write!(f, "SuppressGoAhead"),
            TelnetOption::Status => write!(f, "Status"),
            TelnetOption::TimingMark => write!(f, "TimingMark"),
            TelnetOption::TerminalType => write!(f, "TerminalType"),
            TelnetOption::EndOfRecord => write!(f, "EndOfRecord"),
            TelnetOption::NAWS => write!(f, "NAWS"),
            TelnetOption::TerminalSpeed => write!(f, "TerminalSpeed"),
            TelnetOption::FlowControl => write!(f, "FlowControl"),
            TelnetOption::Linemode => write!(f, "Linemode"),
            TelnetOption::NewEnvironment => write!(f, "NewEnvironment"),
            TelnetOption::EXOPL => write!(f, "EXOPL"),
            TelnetOption::Unknown(option) => write!(f, "Unknown({option})"),
        }
    }
}

impl From<u8> for TelnetOption {
    fn from(byte: u8) -> Self {
        Self::from_u8(byte)
    }
}

impl From<TelnetOption> for u8 {
    fn from(option: TelnetOption) -> Self {
        option.to_u8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_codes_round_trip() {
        for byte in 0..=u8::MAX {
            assert_eq!(TelnetOption::from_u8(byte).to_u8(), byte);
        }
    }

    #[test]
    fn known_codes_map_to_named_variants() {
        assert_eq!(TelnetOption::from_u8(1), TelnetOption::Echo);
        assert_eq!(TelnetOption::from_u8(3), TelnetOption::SuppressGoAhead);
        assert_eq!(TelnetOption::from_u8(24), TelnetOption::TerminalType);
        assert_eq!(TelnetOption::from_u8(31), TelnetOption::NAWS);
        assert_eq!(TelnetOption::from_u8(77), TelnetOption::Unknown(77));
    }
}
