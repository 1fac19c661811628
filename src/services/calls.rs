//! Outbound call control and the live call-event stream.

use crate::error::{Error, Result, StartCallError};
use crate::events::{self, CallEvent};
use crate::transport::ws;
use crate::transport::{Ack, Transport};
use crate::validate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Amazon Polly voices accepted by [`Calls::tts`].
pub const TTS_VOICES: &[&str] = &[
    "Ivy", "Joanna", "Kendra", "Kimberly", "Salli", "Joey", "Justin", "Matthew", "Conchita",
    "Lucia", "Enrique", "Marlene", "Vicki", "Hans", "Russian", "Tatyana", "Maxim",
];

type EventHandler = Arc<dyn Fn(CallEvent) + Send + Sync>;

/// One active call as reported by the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub uuid: String,
    pub from: String,
    pub to: String,
    pub call_started: String,
    pub call_answered: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallList {
    pub calls: Vec<Call>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StartCallRequest {
    pub from: String,
    pub to: String,
    /// Webhook that receives call status updates. Required.
    pub status_callback: String,
    pub call_recording: bool,
    pub machine_detection: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayAudioRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_before_playing: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_between_playing: Option<u32>,
    /// URL of the audio file to play into the call.
    #[serde(rename = "audio_file")]
    pub audio_url: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TtsRequest {
    pub text: String,
    /// One of [`TTS_VOICES`].
    pub voice: String,
    pub delay_before_playing: u32,
    pub max_repeat_count: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TransferRequest {
    pub from: String,
    pub to: String,
    pub call_recording: bool,
    pub dual_channel_recording: bool,
    pub machine_detection: bool,
    pub a_playback_audio: String,
    pub b_playback_audio: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DtmfAudio {
    pub url: String,
    pub stop_on_keypress: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectDtmfRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_digits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_digits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination_character: Option<String>,
    pub audio: DtmfAudio,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

/// Call operations plus the WebSocket event feed.
///
/// The feed is single-consumer: register a handler with [`Calls::on_event`],
/// then [`Calls::connect`]. Received events are queued and the handler is
/// invoked for each in receive order on a dedicated task. [`Calls::disconnect`]
/// closes the socket and waits until every already-queued event has been
/// delivered.
pub struct Calls {
    transport: Transport,
    handler: Option<EventHandler>,
    shutdown: Option<oneshot::Sender<()>>,
    reader: Option<JoinHandle<()>>,
    consumer: Option<JoinHandle<()>>,
}

impl Calls {
    pub(crate) fn new(transport: Transport) -> Self {
        Self {
            transport,
            handler: None,
            shutdown: None,
            reader: None,
            consumer: None,
        }
    }

    /// Register the event handler. Takes effect on the next [`Calls::connect`];
    /// a stream that is already running keeps the handler it started with.
    pub fn on_event<F>(&mut self, handler: F)
    where
        F: Fn(CallEvent) + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
    }

    /// Open the event socket and start delivering events.
    ///
    /// Fails with [`Error::AlreadyConnected`] while a previous stream is still
    /// running. After the stream terminates (socket error, server close, or
    /// [`Calls::disconnect`]) connecting again is allowed.
    pub async fn connect(&mut self) -> Result<()> {
        if self.reader.as_ref().is_some_and(|task| !task.is_finished()) {
            return Err(Error::AlreadyConnected);
        }

        let socket = ws::connect(self.transport.base_url(), self.transport.app_id()).await?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handler = self.handler.clone();

        self.reader = Some(tokio::spawn(events::pump(socket, events_tx, shutdown_rx)));
        self.consumer = Some(tokio::spawn(deliver(events_rx, handler)));
        self.shutdown = Some(shutdown_tx);
        Ok(())
    }

    /// Close the stream and drain the queue. Events received before the close
    /// are still handed to the handler; returns once delivery has finished.
    pub async fn disconnect(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(reader) = self.reader.take() {
            let _ = reader.await;
        }
        if let Some(consumer) = self.consumer.take() {
            let _ = consumer.await;
        }
    }

    /// `GET /v1/call`: calls currently in progress.
    pub async fn list(&self) -> Result<CallList> {
        self.transport.get("/v1/call").await
    }

    /// `POST /v1/call`: place an outbound call.
    ///
    /// Failures come back in the endpoint's own envelope, so this returns
    /// [`StartCallError`] rather than [`Error`].
    pub async fn start(
        &self,
        request: &StartCallRequest,
    ) -> std::result::Result<CallEvent, StartCallError> {
        Self::check_start(request).map_err(|err| StartCallError::from_message(err.to_string()))?;

        match self.transport.post("/v1/call", request).await {
            Ok(event) => Ok(event),
            Err(Error::Api(api)) => Err(StartCallError {
                success: false,
                message: api.message,
                error: api.errors.unwrap_or_default(),
            }),
            Err(err) => Err(StartCallError::from_message(err.to_string())),
        }
    }

    fn check_start(request: &StartCallRequest) -> Result<()> {
        validate::required("from", &request.from)?;
        validate::required("to", &request.to)?;
        validate::required("status_callback", &request.status_callback)?;
        Ok(())
    }

    /// `POST /v1/call/{id}/play`: play an audio file into the call.
    pub async fn play_audio(&self, call_id: &str, request: &PlayAudioRequest) -> Result<Ack> {
        validate::http_url("audio_file", &request.audio_url)?;
        self.transport
            .post(&format!("/v1/call/{call_id}/play"), request)
            .await
    }

    /// `POST /v1/call/{id}/tts`: speak text into the call.
    pub async fn tts(&self, call_id: &str, request: &TtsRequest) -> Result<Ack> {
        validate::required("text", &request.text)?;
        validate::one_of("voice", &request.voice, TTS_VOICES)?;
        self.transport
            .post(&format!("/v1/call/{call_id}/tts"), request)
            .await
    }

    /// `POST /v1/call/{id}/transfer`: bridge the call to a new destination.
    pub async fn transfer(&self, call_id: &str, request: &TransferRequest) -> Result<Ack> {
        validate::required("from", &request.from)?;
        validate::required("to", &request.to)?;
        self.transport
            .post(&format!("/v1/call/{call_id}/transfer"), request)
            .await
    }

    /// `POST /v1/call/{id}/collect`: collect DTMF digits from the caller.
    pub async fn collect_dtmf(&self, call_id: &str, request: &CollectDtmfRequest) -> Result<Ack> {
        validate::required("url", &request.audio.url)?;
        self.transport
            .post(&format!("/v1/call/{call_id}/collect"), request)
            .await
    }

    /// `DELETE /v1/call/{id}`: hang up.
    pub async fn hangup(&self, call_id: &str) -> Result<Ack> {
        self.transport.delete(&format!("/v1/call/{call_id}")).await
    }
}

/// Consumer side of the event queue: pops in order and invokes the handler,
/// continuing until the sender side is dropped so a closing stream still
/// flushes everything already received.
async fn deliver(mut events: mpsc::UnboundedReceiver<CallEvent>, handler: Option<EventHandler>) {
    while let Some(event) = events.recv().await {
        if let Some(handler) = &handler {
            handler(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn event(uuid: &str) -> CallEvent {
        CallEvent {
            uuid: uuid.to_owned(),
            ..CallEvent::default()
        }
    }

    #[tokio::test]
    async fn queued_events_are_drained_in_order_after_sender_drop() {
        let (tx, rx) = mpsc::unbounded_channel();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let handler: EventHandler = Arc::new(move |event: CallEvent| {
            sink.lock().unwrap().push(event.uuid);
        });

        for uuid in ["a", "b", "c", "d", "e"] {
            tx.send(event(uuid)).unwrap();
        }
        drop(tx);

        deliver(rx, Some(handler)).await;
        assert_eq!(*seen.lock().unwrap(), ["a", "b", "c", "d", "e"]);
    }

    #[tokio::test]
    async fn missing_handler_still_drains_the_queue() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(event("a")).unwrap();
        drop(tx);
        deliver(rx, None).await;
    }

    #[test]
    fn start_requires_from_to_and_callback() {
        let request = StartCallRequest {
            from: "15551230001".to_owned(),
            to: "15551230002".to_owned(),
            status_callback: String::new(),
            ..StartCallRequest::default()
        };
        let err = Calls::check_start(&request).unwrap_err();
        assert!(err.to_string().contains("status_callback"));
    }

    #[test]
    fn play_audio_serializes_url_under_audio_file() {
        let request = PlayAudioRequest {
            timeout_before_playing: None,
            timeout_between_playing: Some(3),
            audio_url: "https://cdn.example.com/greeting.wav".to_owned(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json["audio_file"],
            "https://cdn.example.com/greeting.wav"
        );
        assert!(json.get("timeout_before_playing").is_none());
        assert_eq!(json["timeout_between_playing"], 3);
    }
}
