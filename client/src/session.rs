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

//! The Telnet session: transport plumbing around the negotiation engine.
//!
//! A session splits its stream into halves. The write half sits behind an
//! async mutex shared by application sends, negotiation replies, and
//! subnegotiation answers, so wire output is serialized at frame
//! granularity. The read half is driven either by a spawned pump task
//! feeding a bounded channel, or directly by `recv` when the session was
//! opened in on-demand mode. Negotiation verbs and subnegotiation blocks
//! never reach the application; they are consumed on the read path, with
//! observers available for both the raw byte streams and the negotiation
//! events.

use crate::monitor::{NegotiationMonitor, TrafficSpy};
use crate::{ReaderMode, Result, SessionConfig, SessionError};
use bytes::{BufMut, Bytes, BytesMut};
use nvtio_telnetcodec::{
    OptionHandler, TelnetCodec, TelnetFrame, TelnetNegotiator, TelnetOption,
};
use std::collections::VecDeque;
use std::pin::pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex, RwLock};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::sync::{Mutex as AsyncMutex, Notify, mpsc};
use tokio::task::JoinHandle;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, error, info, warn};

/// What the read side of a session yields to the application.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// A run of de-escaped data bytes.
    Data(Bytes),
    /// A simple command from the peer (NOP, Break, Are-You-There, ...).
    /// Negotiation verbs and subnegotiation blocks are consumed internally
    /// and never surface here.
    Command(TelnetFrame),
}

/// Write half plus its encoder. Guarded by the shared async mutex.
struct Writer<S> {
    half: WriteHalf<S>,
    codec: TelnetCodec,
    staging: BytesMut,
}

impl<S: AsyncWrite> Writer<S> {
    async fn flush_staged(&mut self, spy: Option<Arc<dyn TrafficSpy>>) -> std::io::Result<()> {
        if self.staging.is_empty() {
            return Ok(());
        }
        if let Some(spy) = spy {
            spy.outbound(&self.staging);
        }
        let staged = self.staging.split();
        self.half.write_all(&staged).await?;
        self.half.flush().await
    }
}

/// State shared between the session handle and the read pump.
struct Shared<S> {
    engine: StdMutex<TelnetNegotiator>,
    writer: AsyncMutex<Writer<S>>,
    spy: RwLock<Option<Arc<dyn TrafficSpy>>>,
    monitor: RwLock<Option<Arc<dyn NegotiationMonitor>>>,
    /// Signalled on any inbound traffic; pairs sent probes with responses.
    activity: Notify,
    /// Cleared by `disconnect`; writes refuse once the session is down.
    connected: AtomicBool,
}

impl<S: AsyncWrite + Send> Shared<S> {
    fn spy(&self) -> Option<Arc<dyn TrafficSpy>> {
        self.spy.read().unwrap().clone()
    }

    async fn write_frames(&self, frames: &[TelnetFrame]) -> Result<()> {
        if frames.is_empty() {
            return Ok(());
        }
        if !self.connected.load(Ordering::Acquire) {
            return Err(SessionError::NotConnected);
        }
        let mut writer = self.writer.lock().await;
        {
            let Writer { codec, staging, .. } = &mut *writer;
            for frame in frames {
                codec.encode(frame.clone(), staging)?;
            }
        }
        writer.flush_staged(self.spy()).await?;
        Ok(())
    }

    async fn write_data(&self, data: &[u8]) -> Result<()> {
        if !self.connected.load(Ordering::Acquire) {
            return Err(SessionError::NotConnected);
        }
        let mut writer = self.writer.lock().await;
        {
            let Writer { codec, staging, .. } = &mut *writer;
            codec.encode(data, staging)?;
        }
        writer.flush_staged(self.spy()).await?;
        Ok(())
    }

    /// Routes one non-data frame: negotiation and subnegotiation are
    /// handled here, anything else is handed to the application.
    async fn process_frame(&self, frame: TelnetFrame) -> Result<Option<SessionEvent>> {
        match frame {
            TelnetFrame::Do(_)
            | TelnetFrame::Dont(_)
            | TelnetFrame::Will(_)
            | TelnetFrame::Wont(_) => {
                let negotiated = {
                    let mut engine = self.engine.lock().unwrap();
                    engine.received(&frame)
                };
                if let Some(negotiated) = negotiated {
                    // Monitor runs after the state transition, before the
                    // reply hits the wire.
                    if let Some(monitor) = self.monitor.read().unwrap().clone() {
                        monitor.negotiation(negotiated.event);
                    }
                    self.write_frames(&negotiated.replies).await?;
                }
                Ok(None)
            }
            TelnetFrame::Subnegotiate(option, payload) => {
                let reply = {
                    let engine = self.engine.lock().unwrap();
                    engine.answer_subnegotiation(option, &payload)
                };
                match reply {
                    Ok(Some(frame)) => self.write_frames(&[frame]).await?,
                    Ok(None) => {}
                    // A misbehaving handler must not take the session down.
                    Err(e) => warn!(%option, error = %e, "subnegotiation handler failed"),
                }
                Ok(None)
            }
            other => Ok(Some(SessionEvent::Command(other))),
        }
    }
}

/// Decodes socket bytes into session events. Owned by the background task
/// or, in on-demand mode, by the session itself.
struct ReadPump<S> {
    half: ReadHalf<S>,
    codec: TelnetCodec,
    buffer: BytesMut,
    pending: VecDeque<SessionEvent>,
    read_chunk: usize,
    eof: bool,
    shared: Arc<Shared<S>>,
}

impl<S: AsyncRead + AsyncWrite + Send> ReadPump<S> {
    async fn next_event(&mut self) -> Result<Option<SessionEvent>> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(Some(event));
            }
            if let Some(event) = self.drain_buffer().await? {
                return Ok(Some(event));
            }
            if self.eof {
                return Ok(None);
            }
            let mut chunk = BytesMut::with_capacity(self.read_chunk);
            let read = self.half.read_buf(&mut chunk).await?;
            if read == 0 {
                // Clean close unless the decoder is mid-command; the next
                // drain pass settles which.
                self.eof = true;
                continue;
            }
            if let Some(spy) = self.shared.spy() {
                spy.inbound(&chunk);
            }
            self.shared.activity.notify_waiters();
            self.buffer.extend_from_slice(&chunk);
        }
    }

    /// Decodes buffered bytes, coalescing data runs and consuming
    /// negotiation inline. Returns the next deliverable event, if any.
    async fn drain_buffer(&mut self) -> Result<Option<SessionEvent>> {
        let mut data = BytesMut::new();
        loop {
            let decoded = if self.eof {
                self.codec.decode_eof(&mut self.buffer)?
            } else {
                self.codec.decode(&mut self.buffer)?
            };
            match decoded {
                Some(TelnetFrame::Data(byte)) => data.put_u8(byte),
                Some(frame) => {
                    if let Some(event) = self.shared.process_frame(frame).await? {
                        if data.is_empty() {
                            return Ok(Some(event));
                        }
                        self.pending.push_back(event);
                        return Ok(Some(SessionEvent::Data(data.freeze())));
                    }
                    // Consumed internally; the data run continues across it.
                }
                None => {
                    if data.is_empty() {
                        return Ok(None);
                    }
                    return Ok(Some(SessionEvent::Data(data.freeze())));
                }
            }
        }
    }
}

enum Reader<S> {
    Background {
        rx: mpsc::Receiver<SessionEvent>,
        task: JoinHandle<()>,
    },
    OnDemand(ReadPump<S>),
}

/// An established Telnet session over any async byte stream.
///
/// Negotiation policy comes from the [`TelnetNegotiator`] handed to
/// [`TelnetSession::from_stream`]; its initial proposals go out before the
/// constructor returns. See the crate docs for the two reader modes.
pub struct TelnetSession<S> {
    shared: Arc<Shared<S>>,
    reader: Reader<S>,
    failure: Arc<StdMutex<Option<SessionError>>>,
}

impl<S> TelnetSession<S>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    /// Wraps an established stream, sends the engine's initial proposals,
    /// and (in background mode) spawns the read pump.
    pub async fn from_stream(
        stream: S,
        mut negotiator: TelnetNegotiator,
        config: SessionConfig,
    ) -> Result<Self> {
        let (read_half, write_half) = tokio::io::split(stream);
        let opening = negotiator.begin_session();

        let shared = Arc::new(Shared {
            engine: StdMutex::new(negotiator),
            writer: AsyncMutex::new(Writer {
                half: write_half,
                codec: TelnetCodec::new(),
                staging: BytesMut::new(),
            }),
            spy: RwLock::new(None),
            monitor: RwLock::new(None),
            activity: Notify::new(),
            connected: AtomicBool::new(true),
        });
        shared.write_frames(&opening).await?;

        let pump = ReadPump {
            half: read_half,
            codec: TelnetCodec::with_max_subnegotiation(config.max_subnegotiation),
            buffer: BytesMut::new(),
            pending: VecDeque::new(),
            read_chunk: config.buffer_size,
            eof: false,
            shared: Arc::clone(&shared),
        };
        let failure = Arc::new(StdMutex::new(None));

        let reader = match config.reader_mode {
            ReaderMode::Background => {
                let (tx, rx) = mpsc::channel(config.channel_capacity);
                let task = spawn_pump(pump, tx, Arc::clone(&failure));
                Reader::Background { rx, task }
            }
            ReaderMode::OnDemand => Reader::OnDemand(pump),
        };

        Ok(Self {
            shared,
            reader,
            failure,
        })
    }

    /// The next inbound event.
    ///
    /// `Ok(None)` is a clean close. After a transport or protocol failure
    /// the stored error is returned instead.
    pub async fn recv(&mut self) -> Result<Option<SessionEvent>> {
        match &mut self.reader {
            Reader::Background { rx, .. } => match rx.recv().await {
                Some(event) => Ok(Some(event)),
                None => match self.failure.lock().unwrap().clone() {
                    Some(error) => Err(error),
                    None => Ok(None),
                },
            },
            Reader::OnDemand(pump) => pump.next_event().await,
        }
    }

    /// Sends application data, escaping as needed.
    pub async fn send(&self, data: &[u8]) -> Result<()> {
        self.shared.write_data(data).await
    }

    /// Sends one frame verbatim (simple commands, manual subnegotiation).
    pub async fn send_command(&self, frame: TelnetFrame) -> Result<()> {
        self.shared.write_frames(&[frame]).await
    }

    /// Asks to locally enable `option`; no-op if already granted or pending.
    pub async fn request_will(&self, option: TelnetOption) -> Result<()> {
        self.ensure_connected()?;
        let frame = self.shared.engine.lock().unwrap().request_will(option);
        self.send_request(frame).await
    }

    /// Asks to locally disable `option`.
    pub async fn request_wont(&self, option: TelnetOption) -> Result<()> {
        self.ensure_connected()?;
        let frame = self.shared.engine.lock().unwrap().request_wont(option);
        self.send_request(frame).await
    }

    /// Asks the peer to enable `option`.
    pub async fn request_do(&self, option: TelnetOption) -> Result<()> {
        self.ensure_connected()?;
        let frame = self.shared.engine.lock().unwrap().request_do(option);
        self.send_request(frame).await
    }

    /// Asks the peer to disable `option`.
    pub async fn request_dont(&self, option: TelnetOption) -> Result<()> {
        self.ensure_connected()?;
        let frame = self.shared.engine.lock().unwrap().request_dont(option);
        self.send_request(frame).await
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.shared.connected.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(SessionError::NotConnected)
        }
    }

    async fn send_request(&self, frame: Option<TelnetFrame>) -> Result<()> {
        match frame {
            Some(frame) => self.shared.write_frames(&[frame]).await,
            None => Ok(()),
        }
    }

    /// Installs an option handler on the live engine.
    pub fn register_handler(&self, handler: OptionHandler) -> Result<()> {
        self.shared
            .engine
            .lock()
            .unwrap()
            .register_handler(handler)
            .map_err(SessionError::from)
    }

    /// Removes the handler for `option` from the live engine.
    pub fn deregister_handler(&self, option: TelnetOption) -> Result<OptionHandler> {
        self.shared
            .engine
            .lock()
            .unwrap()
            .deregister_handler(option)
            .map_err(SessionError::from)
    }

    /// Whether we currently perform `option`.
    pub fn local_enabled(&self, option: TelnetOption) -> bool {
        self.shared.engine.lock().unwrap().local_enabled(option)
    }

    /// Whether the peer currently performs `option`.
    pub fn remote_enabled(&self, option: TelnetOption) -> bool {
        self.shared.engine.lock().unwrap().remote_enabled(option)
    }

    /// Attaches a wire tap seeing raw bytes in both directions.
    pub fn set_spy(&self, spy: Arc<dyn TrafficSpy>) {
        *self.shared.spy.write().unwrap() = Some(spy);
    }

    /// Detaches the wire tap.
    pub fn clear_spy(&self) {
        *self.shared.spy.write().unwrap() = None;
    }

    /// Attaches a negotiation event observer.
    pub fn set_monitor(&self, monitor: Arc<dyn NegotiationMonitor>) {
        *self.shared.monitor.write().unwrap() = Some(monitor);
    }

    /// Detaches the negotiation event observer.
    pub fn clear_monitor(&self) {
        *self.shared.monitor.write().unwrap() = None;
    }

    /// Sends an Are-You-There probe and waits up to `wait` for any inbound
    /// traffic. Returns whether the peer showed signs of life.
    ///
    /// In on-demand mode something must be driving `recv` concurrently for
    /// inbound traffic to be observed.
    pub async fn probe_are_you_there(&self, wait: Duration) -> Result<bool> {
        let mut answered = pin!(self.shared.activity.notified());
        answered.as_mut().enable();
        self.shared
            .write_frames(&[TelnetFrame::AreYouThere])
            .await?;
        Ok(tokio::time::timeout(wait, answered).await.is_ok())
    }

    /// Shuts the write half down and stops the background reader.
    pub async fn disconnect(&mut self) -> Result<()> {
        self.shared.connected.store(false, Ordering::Release);
        if let Reader::Background { task, .. } = &self.reader {
            task.abort();
        }
        let mut writer = self.shared.writer.lock().await;
        writer.half.shutdown().await?;
        debug!("session disconnected");
        Ok(())
    }
}

impl TelnetSession<TcpStream> {
    /// Connects over TCP and wraps the stream, honoring the configured
    /// connection timeout.
    pub async fn connect(
        addr: impl ToSocketAddrs,
        negotiator: TelnetNegotiator,
        config: SessionConfig,
    ) -> Result<Self> {
        let stream =
            match tokio::time::timeout(config.connect_timeout, TcpStream::connect(addr)).await {
                Ok(Ok(stream)) => stream,
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => return Err(SessionError::ConnectionTimeout),
            };
        info!(peer = %stream.peer_addr()?, "connected");
        Self::from_stream(stream, negotiator, config).await
    }
}

impl<S> Drop for TelnetSession<S> {
    fn drop(&mut self) {
        if let Reader::Background { task, .. } = &self.reader {
            task.abort();
        }
    }
}

fn spawn_pump<S>(
    mut pump: ReadPump<S>,
    tx: mpsc::Sender<SessionEvent>,
    failure: Arc<StdMutex<Option<SessionError>>>,
) -> JoinHandle<()>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            match pump.next_event().await {
                Ok(Some(event)) => {
                    if tx.send(event).await.is_err() {
                        // Receiver dropped; nobody is listening.
                        break;
                    }
                }
                Ok(None) => {
                    debug!("peer closed connection");
                    break;
                }
                Err(e) => {
                    error!(error = %e, "session read failed");
                    *failure.lock().unwrap() = Some(e);
                    break;
                }
            }
        }
    })
}
