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

//! DO/DONT/WILL/WONT option negotiation.
//!
//! Tracks independent local ("will I perform X") and remote ("will the peer
//! perform X") state per option, with per-direction outstanding-request
//! counters guarding against negotiation loops. The counter discipline is a
//! faithful reproduction of the legacy heuristic used by the classic Telnet
//! client implementations (related to, but not an implementation of, the
//! RFC 1143 Q-method): sending a request increments the direction's counter,
//! a response decrements it, and a response that merely re-states an already
//! confirmed value decrements twice. Replies to peer proposals are only
//! generated while no request of ours is outstanding, which makes duplicate
//! unsolicited proposals idempotent and breaks WILL/WONT ping-pong when both
//! sides initiate contradicting requests simultaneously.

use crate::{CodecResult, OptionHandler, OptionRegistry, TelnetFrame, TelnetOption};
use bytes::BytesMut;
use tracing::trace;

/// The negotiation verb received from the peer, as reported to a
/// notification observer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NegotiationKind {
    /// Peer sent `IAC DO <option>`.
    ReceivedDo,
    /// Peer sent `IAC DONT <option>`.
    ReceivedDont,
    /// Peer sent `IAC WILL <option>`.
    ReceivedWill,
    /// Peer sent `IAC WONT <option>`.
    ReceivedWont,
}

impl std::fmt::Display for NegotiationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NegotiationKind::ReceivedDo => write!(f, "ReceivedDo"),
            NegotiationKind::ReceivedDont => write!(f, "ReceivedDont"),
            NegotiationKind::ReceivedWill => write!(f, "ReceivedWill"),
            NegotiationKind::ReceivedWont => write!(f, "ReceivedWont"),
        }
    }
}

/// A negotiation event delivered to the session's monitor callback,
/// strictly after the state mutation it describes and before the
/// corresponding reply is flushed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NegotiationEvent {
    /// Which verb arrived.
    pub kind: NegotiationKind,
    /// The option it named.
    pub option: TelnetOption,
}

/// Outcome of processing one inbound negotiation verb: the event for the
/// monitor plus the frames to write, in order.
#[derive(Clone, Debug, PartialEq)]
pub struct Negotiated {
    /// Event describing the verb that was processed.
    pub event: NegotiationEvent,
    /// Replies (negotiation verbs and subnegotiation openings) to send.
    pub replies: Vec<TelnetFrame>,
}

/// Live negotiation state for one option: confirmed state and last
/// requested state per direction, plus the outstanding-request counters.
#[derive(Clone, Copy, Debug, Default)]
struct OptionState {
    /// Confirmed: we are performing the option (WILL granted).
    local: bool,
    /// Confirmed: the peer is performing the option (DO granted).
    remote: bool,
    /// Last locally-stated intent for our side (true = WILL).
    want_local: bool,
    /// Last locally-stated intent for the peer's side (true = DO).
    want_remote: bool,
    /// Outstanding WILL/WONT requests awaiting a DO/DONT response.
    local_pending: u32,
    /// Outstanding DO/DONT requests awaiting a WILL/WONT response.
    remote_pending: u32,
}

/// The per-session negotiation engine.
///
/// Owns the handler registry (configuration, preserved across sessions) and
/// the live per-option state table (reset by [`TelnetNegotiator::begin_session`]).
/// All methods are synchronous and side-effect-free beyond the table; the
/// caller is responsible for writing the returned frames and for
/// serializing access (the session wraps the engine in its connection lock).
#[derive(Clone, Debug)]
pub struct TelnetNegotiator {
    registry: OptionRegistry,
    state: [OptionState; 256],
}

impl TelnetNegotiator {
    /// Creates an engine with an empty registry and a fresh state table.
    pub fn new() -> Self {
        TelnetNegotiator {
            registry: OptionRegistry::new(),
            state: [OptionState::default(); 256],
        }
    }

    /// Installs a handler; fails on duplicate registration without mutating
    /// the existing entry.
    pub fn register_handler(&mut self, handler: OptionHandler) -> CodecResult<()> {
        self.registry.register(handler)
    }

    /// Removes the handler for `option`; fails if none is installed.
    pub fn deregister_handler(&mut self, option: TelnetOption) -> CodecResult<OptionHandler> {
        self.registry.deregister(option)
    }

    /// The handler registered for `option`, if any.
    pub fn handler(&self, option: TelnetOption) -> Option<&OptionHandler> {
        self.registry.get(option)
    }

    /// Whether the local side currently performs `option`.
    pub fn local_enabled(&self, option: TelnetOption) -> bool {
        self.state[option.to_u8() as usize].local
    }

    /// Whether the peer currently performs `option`.
    pub fn remote_enabled(&self, option: TelnetOption) -> bool {
        self.state[option.to_u8() as usize].remote
    }

    /// Resets the live table to wont/dont with zero counters and emits the
    /// initial proposals for every registered handler with an `init_*`
    /// intent. Called once per connection, right after the transport is up.
    pub fn begin_session(&mut self) -> Vec<TelnetFrame> {
        self.state = [OptionState::default(); 256];
        let intents: Vec<(TelnetOption, bool, bool)> = self
            .registry
            .iter()
            .map(|handler| {
                let flags = handler.flags();
                (handler.option(), flags.init_local, flags.init_remote)
            })
            .collect();
        let mut frames = Vec::new();
        for (option, init_local, init_remote) in intents {
            if init_local {
                frames.extend(self.request_will(option));
            }
            if init_remote {
                frames.extend(self.request_do(option));
            }
        }
        frames
    }

    // #### Outgoing requests (what we initiate) ################################

    /// Request that *we* start performing `option` (send WILL).
    ///
    /// No-op when the option is already granted with nothing outstanding, or
    /// when a WILL request is already in flight.
    pub fn request_will(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        let state = &mut self.state[option.to_u8() as usize];
        if (state.local_pending == 0 && state.local) || state.want_local {
            return None;
        }
        state.want_local = true;
        state.local_pending += 1;
        Some(TelnetFrame::Will(option))
    }

    /// Request that *we* stop performing `option` (send WONT).
    pub fn request_wont(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        let state = &mut self.state[option.to_u8() as usize];
        if (state.local_pending == 0 && !state.local) || !state.want_local {
            return None;
        }
        state.want_local = false;
        state.local_pending += 1;
        Some(TelnetFrame::Wont(option))
    }

    /// Request that the peer start performing `option` (send DO).
    pub fn request_do(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        let state = &mut self.state[option.to_u8() as usize];
        if (state.remote_pending == 0 && state.remote) || state.want_remote {
            return None;
        }
        state.want_remote = true;
        state.remote_pending += 1;
        Some(TelnetFrame::Do(option))
    }

    /// Request that the peer stop performing `option` (send DONT).
    pub fn request_dont(&mut self, option: TelnetOption) -> Option<TelnetFrame> {
        let state = &mut self.state[option.to_u8() as usize];
        if (state.remote_pending == 0 && !state.remote) || !state.want_remote {
            return None;
        }
        state.want_remote = false;
        state.remote_pending += 1;
        Some(TelnetFrame::Dont(option))
    }

    // #### Incoming processing (peer sent us DO/DONT/WILL/WONT) ################

    /// Dispatches one inbound negotiation verb to the matching processor.
    ///
    /// Non-negotiation frames are not this engine's business and yield
    /// `None`, untouched.
    pub fn received(&mut self, frame: &TelnetFrame) -> Option<Negotiated> {
        match frame {
            TelnetFrame::Do(option) => Some(self.received_do(*option)),
            TelnetFrame::Dont(option) => Some(self.received_dont(*option)),
            TelnetFrame::Will(option) => Some(self.received_will(*option)),
            TelnetFrame::Wont(option) => Some(self.received_wont(*option)),
            _ => None,
        }
    }

    /// Peer asks us to perform `option`.
    ///
    /// With no WILL request of ours outstanding, an unsolicited DO consults
    /// the handler's `accept_local` intent: accepted yields WILL, refusal
    /// yields WONT and re-arms the counter so the next identical DO is
    /// refused again. A DO answering our own request produces no reply.
    /// The confirmed local state is set at the end unconditionally; the peer
    /// has stated its position.
    pub fn received_do(&mut self, option: TelnetOption) -> Negotiated {
        let accept = self
            .registry
            .get(option)
            .map(|handler| handler.flags().accept_local)
            .unwrap_or(false);
        let mut replies = Vec::new();
        let state = &mut self.state[option.to_u8() as usize];
        if state.local_pending > 0 {
            state.local_pending -= 1;
            // Loop guard: a verb restating the already confirmed value
            // settles two outstanding requests at once.
            if state.local_pending > 0 && state.local {
                state.local_pending -= 1;
            }
        }
        if state.local_pending == 0 && !state.want_local {
            if accept {
                trace!(%option, "accepting DO");
                state.want_local = true;
                replies.push(TelnetFrame::Will(option));
            } else {
                trace!(%option, "refusing DO");
                state.local_pending += 1;
                replies.push(TelnetFrame::Wont(option));
            }
        }
        state.local = true;
        // Only a granted (or at least requested) option may open its
        // subnegotiation; a refused DO gets no announcement.
        let announce = state.want_local;
        if let Some(handler) = self.registry.get(option).filter(|_| announce) {
            if let Some(payload) = handler.start_subnegotiation_local() {
                replies.push(TelnetFrame::Subnegotiate(
                    option,
                    BytesMut::from(&payload[..]),
                ));
            }
        }
        Negotiated {
            event: NegotiationEvent {
                kind: NegotiationKind::ReceivedDo,
                option,
            },
            replies,
        }
    }

    /// Peer asks us to stop performing `option`.
    ///
    /// Acknowledged with WONT only when the option was actually enabled on
    /// our side; a DONT refusing a request of ours is absorbed silently.
    pub fn received_dont(&mut self, option: TelnetOption) -> Negotiated {
        let mut replies = Vec::new();
        let state = &mut self.state[option.to_u8() as usize];
        if state.local_pending > 0 {
            state.local_pending -= 1;
            if state.local_pending > 0 && !state.local {
                state.local_pending -= 1;
            }
        }
        if state.local_pending == 0 && state.want_local {
            if state.local {
                replies.push(TelnetFrame::Wont(option));
            }
            state.want_local = false;
        }
        state.local = false;
        Negotiated {
            event: NegotiationEvent {
                kind: NegotiationKind::ReceivedDont,
                option,
            },
            replies,
        }
    }

    /// Peer offers to perform `option`; mirror of [`Self::received_do`] on
    /// the remote axis, consulting `accept_remote`.
    pub fn received_will(&mut self, option: TelnetOption) -> Negotiated {
        let accept = self
            .registry
            .get(option)
            .map(|handler| handler.flags().accept_remote)
            .unwrap_or(false);
        let mut replies = Vec::new();
        let state = &mut self.state[option.to_u8() as usize];
        if state.remote_pending > 0 {
            state.remote_pending -= 1;
            if state.remote_pending > 0 && state.remote {
                state.remote_pending -= 1;
            }
        }
        if state.remote_pending == 0 && !state.want_remote {
            if accept {
                trace!(%option, "accepting WILL");
                state.want_remote = true;
                replies.push(TelnetFrame::Do(option));
            } else {
                trace!(%option, "refusing WILL");
                state.remote_pending += 1;
                replies.push(TelnetFrame::Dont(option));
            }
        }
        state.remote = true;
        let announce = state.want_remote;
        if let Some(handler) = self.registry.get(option).filter(|_| announce) {
            if let Some(payload) = handler.start_subnegotiation_remote() {
                replies.push(TelnetFrame::Subnegotiate(
                    option,
                    BytesMut::from(&payload[..]),
                ));
            }
        }
        Negotiated {
            event: NegotiationEvent {
                kind: NegotiationKind::ReceivedWill,
                option,
            },
            replies,
        }
    }

    /// Peer refuses (or revokes) performing `option`; mirror of
    /// [`Self::received_dont`] on the remote axis.
    pub fn received_wont(&mut self, option: TelnetOption) -> Negotiated {
        let mut replies = Vec::new();
        let state = &mut self.state[option.to_u8() as usize];
        if state.remote_pending > 0 {
            state.remote_pending -= 1;
            if state.remote_pending > 0 && !state.remote {
                state.remote_pending -= 1;
            }
        }
        if state.remote_pending == 0 && state.want_remote {
            if state.remote {
                replies.push(TelnetFrame::Dont(option));
            }
            state.want_remote = false;
        }
        state.remote = false;
        Negotiated {
            event: NegotiationEvent {
                kind: NegotiationKind::ReceivedWont,
                option,
            },
            replies,
        }
    }

    /// Computes the reply for an inbound subnegotiation block.
    ///
    /// `payload` is the de-escaped argument bytes without the option code.
    /// Blocks for options without a handler are ignored. Errors are the
    /// handler's and must be isolated by the caller; the option's
    /// negotiation state is never affected.
    pub fn answer_subnegotiation(
        &self,
        option: TelnetOption,
        payload: &[u8],
    ) -> CodecResult<Option<TelnetFrame>> {
        match self.registry.get(option) {
            Some(handler) => Ok(handler
                .answer_subnegotiation(payload)?
                .map(|reply| TelnetFrame::Subnegotiate(option, BytesMut::from(&reply[..])))),
            None => Ok(None),
        }
    }
}

impl Default for TelnetNegotiator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HandlerFlags;

    fn accept_remote_handler(option: TelnetOption) -> OptionHandler {
        OptionHandler::simple(option, HandlerFlags::new(false, false, false, true))
    }

    fn accept_local_handler(option: TelnetOption) -> OptionHandler {
        OptionHandler::simple(option, HandlerFlags::new(false, false, true, false))
    }

    // Default-refuse idempotence: unregistered options are always refused,
    // on every re-assertion.
    #[test]
    fn unregistered_will_is_always_answered_dont() {
        let mut neg = TelnetNegotiator::new();
        let opt = TelnetOption::Unknown(77);
        for _ in 0..3 {
            let out = neg.received_will(opt);
            assert_eq!(out.replies, vec![TelnetFrame::Dont(opt)]);
        }
    }

    #[test]
    fn unregistered_do_is_always_answered_wont() {
        let mut neg = TelnetNegotiator::new();
        let opt = TelnetOption::Unknown(200);
        for _ in 0..3 {
            let out = neg.received_do(opt);
            assert_eq!(out.replies, vec![TelnetFrame::Wont(opt)]);
        }
    }

    // A single unsolicited WILL is accepted with exactly one DO; an
    // identical re-assertion produces no reply.
    #[test]
    fn accepted_will_replies_do_once() {
        let mut neg = TelnetNegotiator::new();
        let opt = TelnetOption::SuppressGoAhead;
        neg.register_handler(accept_remote_handler(opt)).unwrap();

        let first = neg.received_will(opt);
        assert_eq!(first.replies, vec![TelnetFrame::Do(opt)]);
        assert!(neg.remote_enabled(opt));

        let second = neg.received_will(opt);
        assert_eq!(second.replies, Vec::new());
        assert!(neg.remote_enabled(opt));
    }

    #[test]
    fn accepted_do_replies_will_once() {
        let mut neg = TelnetNegotiator::new();
        let opt = TelnetOption::Echo;
        neg.register_handler(accept_local_handler(opt)).unwrap();

        let first = neg.received_do(opt);
        assert_eq!(first.replies, vec![TelnetFrame::Will(opt)]);
        assert!(neg.local_enabled(opt));

        let second = neg.received_do(opt);
        assert_eq!(second.replies, Vec::new());
    }

    // Requesting the state we are already in, with nothing outstanding, is
    // a no-op on the wire.
    #[test]
    fn request_will_is_noop_when_already_granted() {
        let mut neg = TelnetNegotiator::new();
        let opt = TelnetOption::Echo;
        neg.register_handler(accept_local_handler(opt)).unwrap();
        neg.received_do(opt);
        assert!(neg.local_enabled(opt));

        assert_eq!(neg.request_will(opt), None);
    }

    #[test]
    fn request_wont_is_noop_when_already_off() {
        let mut neg = TelnetNegotiator::new();
        assert_eq!(neg.request_wont(TelnetOption::Echo), None);
        assert_eq!(neg.request_dont(TelnetOption::Echo), None);
    }

    // Counter discipline: back-to-back requests for the same target leave
    // exactly one request outstanding, and the delayed peer reply does not
    // trigger another round.
    #[test]
    fn duplicate_requests_collapse_to_one_outstanding() {
        let mut neg = TelnetNegotiator::new();
        let opt = TelnetOption::SuppressGoAhead;
        neg.register_handler(accept_remote_handler(opt)).unwrap();

        assert_eq!(neg.request_do(opt), Some(TelnetFrame::Do(opt)));
        assert_eq!(neg.request_do(opt), None);

        let reply = neg.received_will(opt);
        assert_eq!(reply.replies, Vec::new());
        assert!(neg.remote_enabled(opt));
    }

    #[test]
    fn request_confirmation_produces_no_reply() {
        let mut neg = TelnetNegotiator::new();
        let opt = TelnetOption::TransmitBinary;
        neg.register_handler(OptionHandler::simple(
            opt,
            HandlerFlags::new(true, false, true, false),
        ))
        .unwrap();
        let frames = neg.begin_session();
        assert_eq!(frames, vec![TelnetFrame::Will(opt)]);

        let out = neg.received_do(opt);
        assert_eq!(out.replies, Vec::new());
        assert!(neg.local_enabled(opt));
    }

    // Peer refusal of our request is absorbed silently and clears the
    // requested intent.
    #[test]
    fn refused_request_is_absorbed_silently() {
        let mut neg = TelnetNegotiator::new();
        let opt = TelnetOption::SuppressGoAhead;
        neg.register_handler(accept_remote_handler(opt)).unwrap();

        neg.request_do(opt);
        let out = neg.received_wont(opt);
        assert_eq!(out.replies, Vec::new());
        assert!(!neg.remote_enabled(opt));

        // The slate is clean; a later request goes out again.
        assert_eq!(neg.request_do(opt), Some(TelnetFrame::Do(opt)));
    }

    // Revoking an enabled option is acknowledged exactly once.
    #[test]
    fn revocation_of_enabled_option_is_acknowledged() {
        let mut neg = TelnetNegotiator::new();
        let opt = TelnetOption::SuppressGoAhead;
        neg.register_handler(accept_remote_handler(opt)).unwrap();
        neg.received_will(opt);
        assert!(neg.remote_enabled(opt));

        let out = neg.received_wont(opt);
        assert_eq!(out.replies, vec![TelnetFrame::Dont(opt)]);
        assert!(!neg.remote_enabled(opt));

        let again = neg.received_wont(opt);
        assert_eq!(again.replies, Vec::new());
    }

    #[test]
    fn events_carry_kind_and_option() {
        let mut neg = TelnetNegotiator::new();
        let opt = TelnetOption::Echo;
        let out = neg.received_will(opt);
        assert_eq!(
            out.event,
            NegotiationEvent {
                kind: NegotiationKind::ReceivedWill,
                option: opt,
            }
        );
        let out = neg.received_dont(opt);
        assert_eq!(out.event.kind, NegotiationKind::ReceivedDont);
    }

    #[test]
    fn begin_session_emits_configured_proposals_and_resets_state() {
        let mut neg = TelnetNegotiator::new();
        neg.register_handler(OptionHandler::simple(
            TelnetOption::TransmitBinary,
            HandlerFlags::new(true, true, true, true),
        ))
        .unwrap();
        neg.register_handler(OptionHandler::window_size(80, 24))
            .unwrap();

        let frames = neg.begin_session();
        assert_eq!(
            frames,
            vec![
                TelnetFrame::Will(TelnetOption::TransmitBinary),
                TelnetFrame::Do(TelnetOption::TransmitBinary),
                TelnetFrame::Will(TelnetOption::NAWS),
            ]
        );

        // Simulate a completed negotiation, then a reconnect: registration
        // survives, live state does not.
        neg.received_do(TelnetOption::TransmitBinary);
        assert!(neg.local_enabled(TelnetOption::TransmitBinary));
        let frames = neg.begin_session();
        assert!(!neg.local_enabled(TelnetOption::TransmitBinary));
        assert_eq!(frames.len(), 3);
    }

    #[test]
    fn naws_announces_window_after_do() {
        let mut neg = TelnetNegotiator::new();
        neg.register_handler(OptionHandler::window_size(80, 24))
            .unwrap();
        neg.begin_session();

        let out = neg.received_do(TelnetOption::NAWS);
        assert_eq!(
            out.replies,
            vec![TelnetFrame::Subnegotiate(
                TelnetOption::NAWS,
                BytesMut::from(&[0x00, 0x50, 0x00, 0x18][..]),
            )]
        );
    }

    // A handler that refuses the option must not announce its
    // subnegotiation alongside the WONT.
    #[test]
    fn refused_do_suppresses_subnegotiation_opening() {
        let mut neg = TelnetNegotiator::new();
        neg.register_handler(OptionHandler::WindowSize {
            cols: 80,
            rows: 24,
            flags: HandlerFlags::new(false, false, false, false),
        })
        .unwrap();

        let out = neg.received_do(TelnetOption::NAWS);
        assert_eq!(out.replies, vec![TelnetFrame::Wont(TelnetOption::NAWS)]);
    }

    #[test]
    fn terminal_type_scenario_matches_reference_wire() {
        let mut neg = TelnetNegotiator::new();
        neg.register_handler(OptionHandler::terminal_type("VT100"))
            .unwrap();

        let out = neg.received_do(TelnetOption::TerminalType);
        assert_eq!(out.replies, vec![TelnetFrame::Will(TelnetOption::TerminalType)]);

        let reply = neg
            .answer_subnegotiation(TelnetOption::TerminalType, &[1])
            .expect("handler ok")
            .expect("reply expected");
        assert_eq!(
            reply,
            TelnetFrame::Subnegotiate(
                TelnetOption::TerminalType,
                BytesMut::from(&[0, b'V', b'T', b'1', b'0', b'0'][..]),
            )
        );
    }

    #[test]
    fn subnegotiation_failure_leaves_negotiation_state_alone() {
        let mut neg = TelnetNegotiator::new();
        neg.register_handler(OptionHandler::terminal_type("VT100"))
            .unwrap();
        neg.received_do(TelnetOption::TerminalType);
        assert!(neg.local_enabled(TelnetOption::TerminalType));

        let err = neg
            .answer_subnegotiation(TelnetOption::TerminalType, &[])
            .expect_err("empty payload must fail");
        assert!(matches!(err, crate::CodecError::SubnegotiationError { .. }));
        assert!(neg.local_enabled(TelnetOption::TerminalType));
    }

    #[test]
    fn subnegotiation_for_unregistered_option_is_ignored() {
        let neg = TelnetNegotiator::new();
        let reply = neg
            .answer_subnegotiation(TelnetOption::Unknown(99), &[1, 2, 3])
            .expect("ok");
        assert_eq!(reply, None);
    }

    // Contradiction while our DONT request is outstanding: the counter
    // absorbs the crossed verb, the acceptance intent settles the exchange
    // in one round, and no ping-pong follows.
    #[test]
    fn contradicting_will_during_outstanding_dont_settles_in_one_round() {
        let mut neg = TelnetNegotiator::new();
        let opt = TelnetOption::SuppressGoAhead;
        neg.register_handler(accept_remote_handler(opt)).unwrap();

        // Enable, then start disabling.
        neg.received_will(opt);
        assert_eq!(neg.request_dont(opt), Some(TelnetFrame::Dont(opt)));

        // Peer insists with WILL: with acceptance configured the engine
        // concedes with a single DO and converges on enabled.
        let out = neg.received_will(opt);
        assert_eq!(out.replies, vec![TelnetFrame::Do(opt)]);
        assert!(neg.remote_enabled(opt));

        let again = neg.received_will(opt);
        assert_eq!(again.replies, Vec::new());
    }
}
