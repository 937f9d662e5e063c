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

//! Integration tests driving sessions over in-memory duplex streams, with
//! the peer played by raw reads and writes of wire bytes.

use nvtio_client::{
    BufferSpy, HandlerFlags, NegotiationKind, OptionHandler, ReaderMode, RecordingMonitor,
    SessionConfig, SessionError, SessionEvent, TelnetFrame, TelnetNegotiator, TelnetOption,
    TelnetSession,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};

const IAC: u8 = 255;
const DO: u8 = 253;
const DONT: u8 = 254;
const WILL: u8 = 251;
const SB: u8 = 250;
const SE: u8 = 240;
const AYT: u8 = 246;
const IP: u8 = 244;
const ECHO: u8 = 1;
const SGA: u8 = 3;
const TTYPE: u8 = 24;
const NAWS: u8 = 31;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

async fn session_with(
    negotiator: TelnetNegotiator,
    config: SessionConfig,
) -> (TelnetSession<DuplexStream>, DuplexStream) {
    init_tracing();
    let (client_io, server_io) = tokio::io::duplex(1024);
    let session = TelnetSession::from_stream(client_io, negotiator, config)
        .await
        .expect("session");
    (session, server_io)
}

// DO TTYPE followed by SB TTYPE SEND must yield WILL TTYPE and
// SB TTYPE IS "VT100", in that order on the wire.
#[tokio::test]
async fn terminal_type_negotiation_over_wire() {
    let mut negotiator = TelnetNegotiator::new();
    negotiator
        .register_handler(OptionHandler::terminal_type("VT100"))
        .unwrap();
    let (session, mut server) = session_with(negotiator, SessionConfig::default()).await;

    server
        .write_all(&[IAC, DO, TTYPE, IAC, SB, TTYPE, 1, IAC, SE])
        .await
        .unwrap();

    let mut reply = [0u8; 14];
    server.read_exact(&mut reply).await.unwrap();
    assert_eq!(
        reply,
        [
            IAC, WILL, TTYPE, //
            IAC, SB, TTYPE, 0, b'V', b'T', b'1', b'0', b'0', IAC, SE,
        ]
    );
    assert!(session.local_enabled(TelnetOption::TerminalType));
}

// A NAWS handler proposes WILL NAWS at session start and announces the
// window as soon as the peer grants it.
#[tokio::test]
async fn window_size_announced_after_do() {
    let mut negotiator = TelnetNegotiator::new();
    negotiator
        .register_handler(OptionHandler::window_size(80, 24))
        .unwrap();
    let (session, mut server) = session_with(negotiator, SessionConfig::default()).await;

    let mut opening = [0u8; 3];
    server.read_exact(&mut opening).await.unwrap();
    assert_eq!(opening, [IAC, WILL, NAWS]);

    server.write_all(&[IAC, DO, NAWS]).await.unwrap();

    let mut announce = [0u8; 9];
    server.read_exact(&mut announce).await.unwrap();
    assert_eq!(announce, [IAC, SB, NAWS, 0x00, 0x50, 0x00, 0x18, IAC, SE]);
    assert!(session.local_enabled(TelnetOption::NAWS));
}

// Data runs and simple commands reach the application; negotiation does
// not, and an unhandled WILL is refused on the wire.
#[tokio::test]
async fn data_and_commands_reach_application() {
    let (mut session, mut server) =
        session_with(TelnetNegotiator::new(), SessionConfig::default()).await;

    server.write_all(b"hello").await.unwrap();
    server.write_all(&[IAC, IP]).await.unwrap();
    server.write_all(&[IAC, IAC]).await.unwrap();
    server.write_all(&[IAC, WILL, ECHO]).await.unwrap();

    assert_eq!(
        session.recv().await.unwrap(),
        Some(SessionEvent::Data(bytes::Bytes::from_static(b"hello")))
    );
    assert_eq!(
        session.recv().await.unwrap(),
        Some(SessionEvent::Command(TelnetFrame::InterruptProcess))
    );
    assert_eq!(
        session.recv().await.unwrap(),
        Some(SessionEvent::Data(bytes::Bytes::from_static(&[0xFF])))
    );

    let mut refusal = [0u8; 3];
    server.read_exact(&mut refusal).await.unwrap();
    assert_eq!(refusal, [IAC, DONT, ECHO]);
}

#[tokio::test]
async fn clean_close_yields_none() {
    let (mut session, mut server) =
        session_with(TelnetNegotiator::new(), SessionConfig::default()).await;

    server.write_all(b"bye").await.unwrap();
    drop(server);

    assert_eq!(
        session.recv().await.unwrap(),
        Some(SessionEvent::Data(bytes::Bytes::from_static(b"bye")))
    );
    assert_eq!(session.recv().await.unwrap(), None);
}

// A connection dropped mid-subnegotiation is an error, not a hang or a
// silent close.
#[tokio::test]
async fn truncated_subnegotiation_fails_on_close() {
    let (mut session, mut server) =
        session_with(TelnetNegotiator::new(), SessionConfig::default()).await;

    server.write_all(&[IAC, SB, TTYPE, 1]).await.unwrap();
    drop(server);

    let err = session.recv().await.expect_err("must fail");
    assert!(matches!(err, SessionError::Codec(_)), "got {err:?}");
}

#[tokio::test]
async fn spy_captures_both_directions() {
    let (mut session, mut server) =
        session_with(TelnetNegotiator::new(), SessionConfig::default()).await;
    let spy = Arc::new(BufferSpy::new());
    session.set_spy(spy.clone());

    server.write_all(b"ping").await.unwrap();
    assert_eq!(
        session.recv().await.unwrap(),
        Some(SessionEvent::Data(bytes::Bytes::from_static(b"ping")))
    );

    session.send(b"pong").await.unwrap();
    let mut out = [0u8; 4];
    server.read_exact(&mut out).await.unwrap();
    assert_eq!(&out, b"pong");

    assert_eq!(spy.inbound_bytes(), b"ping");
    assert_eq!(spy.outbound_bytes(), b"pong");
}

#[tokio::test]
async fn monitor_observes_negotiation() {
    let (session, mut server) =
        session_with(TelnetNegotiator::new(), SessionConfig::default()).await;
    let monitor = Arc::new(RecordingMonitor::new());
    session.set_monitor(monitor.clone());

    server.write_all(&[IAC, WILL, ECHO]).await.unwrap();
    let mut refusal = [0u8; 3];
    server.read_exact(&mut refusal).await.unwrap();

    let events = monitor.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, NegotiationKind::ReceivedWill);
    assert_eq!(events[0].option, TelnetOption::Echo);
    drop(session);
}

// Without the pump task, negotiation advances only while recv is driven.
#[tokio::test]
async fn on_demand_recv_drives_negotiation() {
    let mut negotiator = TelnetNegotiator::new();
    negotiator
        .register_handler(OptionHandler::terminal_type("VT100"))
        .unwrap();
    let config = SessionConfig::default().with_reader_mode(ReaderMode::OnDemand);
    let (mut session, mut server) = session_with(negotiator, config).await;

    server.write_all(&[IAC, DO, TTYPE]).await.unwrap();
    server.write_all(b"ok").await.unwrap();

    assert_eq!(
        session.recv().await.unwrap(),
        Some(SessionEvent::Data(bytes::Bytes::from_static(b"ok")))
    );
    assert!(session.local_enabled(TelnetOption::TerminalType));

    let mut reply = [0u8; 3];
    server.read_exact(&mut reply).await.unwrap();
    assert_eq!(reply, [IAC, WILL, TTYPE]);
}

// Duplicate requests collapse to one wire verb, and the confirmation
// produces no further output.
#[tokio::test]
async fn request_do_goes_out_once() {
    let mut negotiator = TelnetNegotiator::new();
    negotiator
        .register_handler(OptionHandler::suppress_go_ahead(HandlerFlags::new(
            false, false, false, true,
        )))
        .unwrap();
    let (mut session, mut server) = session_with(negotiator, SessionConfig::default()).await;
    let spy = Arc::new(BufferSpy::new());
    session.set_spy(spy.clone());

    session.request_do(TelnetOption::SuppressGoAhead).await.unwrap();
    session.request_do(TelnetOption::SuppressGoAhead).await.unwrap();

    let mut request = [0u8; 3];
    server.read_exact(&mut request).await.unwrap();
    assert_eq!(request, [IAC, DO, SGA]);

    server.write_all(&[IAC, WILL, SGA]).await.unwrap();
    server.write_all(b"x").await.unwrap();
    assert_eq!(
        session.recv().await.unwrap(),
        Some(SessionEvent::Data(bytes::Bytes::from_static(b"x")))
    );
    assert!(session.remote_enabled(TelnetOption::SuppressGoAhead));
    assert_eq!(spy.outbound_bytes(), [IAC, DO, SGA]);
}

// An unanswered probe times out false; any inbound traffic after the
// probe counts as a sign of life.
#[tokio::test(start_paused = true)]
async fn are_you_there_probe() {
    let (session, mut server) =
        session_with(TelnetNegotiator::new(), SessionConfig::default()).await;

    let alive = session
        .probe_are_you_there(Duration::from_secs(2))
        .await
        .unwrap();
    assert!(!alive, "silent peer must time out");
    let mut probe = [0u8; 2];
    server.read_exact(&mut probe).await.unwrap();
    assert_eq!(probe, [IAC, AYT]);

    let responder = tokio::spawn(async move {
        let mut probe = [0u8; 2];
        server.read_exact(&mut probe).await.unwrap();
        assert_eq!(probe, [IAC, AYT]);
        server.write_all(b"[YES]\r\n").await.unwrap();
        server
    });

    let alive = session
        .probe_are_you_there(Duration::from_secs(2))
        .await
        .unwrap();
    assert!(alive, "responding peer must be seen");
    drop(responder.await.unwrap());
}

#[tokio::test]
async fn disconnect_closes_write_half() {
    let (mut session, mut server) =
        session_with(TelnetNegotiator::new(), SessionConfig::default()).await;

    session.send(b"last words").await.unwrap();
    session.disconnect().await.unwrap();

    let mut received = Vec::new();
    server.read_to_end(&mut received).await.unwrap();
    assert_eq!(received, b"last words");
}

#[tokio::test]
async fn writes_refused_after_disconnect() {
    let (mut session, _server) =
        session_with(TelnetNegotiator::new(), SessionConfig::default()).await;

    session.disconnect().await.unwrap();

    let err = session.request_do(TelnetOption::Echo).await.unwrap_err();
    assert!(matches!(err, SessionError::NotConnected), "got {err:?}");
    let err = session.send(b"late").await.unwrap_err();
    assert!(matches!(err, SessionError::NotConnected), "got {err:?}");
}
