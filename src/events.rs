//! Call-event envelope and the socket receive loop.

use futures::{Sink, SinkExt, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::{self, Message};

/// Event types delivered on the call-event socket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Answered,
    #[default]
    CallSetup,
    Completed,
    InCallEvent,
    Ringing,
}

/// DTMF collection or termination result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitsAndReason {
    pub digits: String,
    pub reason: String,
}

/// Reference to a finished audio playback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackRef {
    pub playback_id: String,
}

/// Data attached to an `in_call_event` frame.
///
/// The wire format carries no discriminator for this payload, so variants are
/// tried in declaration order and the first structural match wins:
/// [`DigitsAndReason`] before [`PlaybackRef`]. A payload matching neither
/// fails the whole frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InCallEventData {
    Digits(DigitsAndReason),
    Playback(PlaybackRef),
}

/// Payload carried only when the event type is [`EventType::InCallEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEventPayload {
    pub in_call_event: String,
    pub in_call_event_data: InCallEventData,
}

/// One event received on the call socket, or returned when starting a call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallEvent {
    pub uuid: String,
    pub event_type: EventType,
    pub event_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_payload: Option<CallEventPayload>,
    pub from: String,
    pub to: String,
    pub call_started: String,
    pub call_answered: String,
    pub machine_detected: bool,
    pub tag: String,
}

/// Receive loop: one iteration per inbound frame, for the lifetime of the
/// connection.
///
/// Text frames decode as [`CallEvent`] and are pushed onto `events` in receive
/// order. A frame that fails to decode is logged and dropped without stopping
/// the loop; a socket read error or server close terminates the loop and the
/// stream transitions to disconnected. Dropping `events`'s receiver also ends
/// the loop.
pub(crate) async fn pump<S>(
    mut socket: S,
    events: mpsc::UnboundedSender<CallEvent>,
    mut shutdown: oneshot::Receiver<()>,
) where
    S: Stream<Item = tungstenite::Result<Message>> + Sink<Message, Error = tungstenite::Error> + Unpin,
{
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                let _ = socket.close().await;
                tracing::debug!("call-event socket closed on disconnect");
                break;
            }
            frame = socket.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<CallEvent>(text.as_str()) {
                        Ok(event) => {
                            if events.send(event).is_err() {
                                break;
                            }
                        }
                        Err(err) => {
                            tracing::warn!("dropping undecodable call-event frame: {err}");
                        }
                    }
                }
                Some(Ok(Message::Ping(payload))) => {
                    let _ = socket.send(Message::Pong(payload)).await;
                }
                Some(Ok(Message::Close(_))) => {
                    tracing::info!("call-event socket closed by server");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    tracing::error!("call-event socket read failed: {err}");
                    break;
                }
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tokio_tungstenite::tungstenite::error::ProtocolError;

    struct FakeSocket {
        frames: VecDeque<tungstenite::Result<Message>>,
        sent: Vec<Message>,
    }

    impl FakeSocket {
        fn new(frames: Vec<tungstenite::Result<Message>>) -> Self {
            Self {
                frames: frames.into(),
                sent: Vec::new(),
            }
        }
    }

    impl Stream for FakeSocket {
        type Item = tungstenite::Result<Message>;

        fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
            Poll::Ready(self.frames.pop_front())
        }
    }

    impl Sink<Message> for FakeSocket {
        type Error = tungstenite::Error;

        fn poll_ready(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
        ) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn start_send(mut self: Pin<&mut Self>, item: Message) -> Result<(), Self::Error> {
            self.sent.push(item);
            Ok(())
        }

        fn poll_flush(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
        ) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn poll_close(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
        ) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
    }

    fn event_frame(uuid: &str) -> tungstenite::Result<Message> {
        Ok(Message::text(format!(
            r#"{{"uuid": "{uuid}", "event_type": "ringing", "from": "1555", "to": "1666"}}"#
        )))
    }

    async fn run_pump(frames: Vec<tungstenite::Result<Message>>) -> Vec<CallEvent> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (_shutdown_tx, shutdown_rx) = oneshot::channel();
        pump(FakeSocket::new(frames), tx, shutdown_rx).await;

        let mut received = Vec::new();
        while let Ok(event) = rx.try_recv() {
            received.push(event);
        }
        received
    }

    #[tokio::test]
    async fn events_are_delivered_in_receive_order() {
        let received = run_pump(vec![
            event_frame("a"),
            event_frame("b"),
            event_frame("c"),
        ])
        .await;
        let uuids: Vec<_> = received.iter().map(|e| e.uuid.as_str()).collect();
        assert_eq!(uuids, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn malformed_frame_is_dropped_and_loop_continues() {
        let received = run_pump(vec![
            event_frame("a"),
            Ok(Message::text("{not json")),
            event_frame("b"),
        ])
        .await;
        let uuids: Vec<_> = received.iter().map(|e| e.uuid.as_str()).collect();
        assert_eq!(uuids, ["a", "b"]);
    }

    #[tokio::test]
    async fn unknown_payload_shape_drops_only_that_frame() {
        let bad_payload = r#"{
            "uuid": "x",
            "event_type": "in_call_event",
            "event_payload": {"in_call_event": "mystery", "in_call_event_data": {"volume": 3}}
        }"#;
        let received = run_pump(vec![
            Ok(Message::text(bad_payload)),
            event_frame("after"),
        ])
        .await;
        let uuids: Vec<_> = received.iter().map(|e| e.uuid.as_str()).collect();
        assert_eq!(uuids, ["after"]);
    }

    #[tokio::test]
    async fn read_error_terminates_the_loop() {
        let received = run_pump(vec![
            event_frame("a"),
            Err(tungstenite::Error::Protocol(
                ProtocolError::ResetWithoutClosingHandshake,
            )),
            event_frame("never"),
        ])
        .await;
        let uuids: Vec<_> = received.iter().map(|e| e.uuid.as_str()).collect();
        assert_eq!(uuids, ["a"]);
    }

    #[tokio::test]
    async fn server_close_terminates_the_loop() {
        let received = run_pump(vec![
            event_frame("a"),
            Ok(Message::Close(None)),
            event_frame("never"),
        ])
        .await;
        let uuids: Vec<_> = received.iter().map(|e| e.uuid.as_str()).collect();
        assert_eq!(uuids, ["a"]);
    }

    #[tokio::test]
    async fn ping_is_answered_with_pong() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let (_shutdown_tx, shutdown_rx) = oneshot::channel();
        let mut socket = FakeSocket::new(vec![Ok(Message::Ping(Vec::new().into()))]);
        let sent = {
            let socket = &mut socket;
            pump(&mut *socket, tx, shutdown_rx).await;
            std::mem::take(&mut socket.sent)
        };
        assert!(matches!(sent.as_slice(), [Message::Pong(_)]));
    }

    #[test]
    fn digits_and_reason_is_tried_before_playback() {
        let json = r#"{"digits": "1234", "reason": "max_digits"}"#;
        let data: InCallEventData = serde_json::from_str(json).unwrap();
        match data {
            InCallEventData::Digits(inner) => {
                assert_eq!(inner.digits, "1234");
                assert_eq!(inner.reason, "max_digits");
            }
            InCallEventData::Playback(_) => panic!("wrong variant selected"),
        }
    }

    #[test]
    fn playback_shape_selects_the_playback_variant() {
        let json = r#"{"playback_id": "pb-42"}"#;
        let data: InCallEventData = serde_json::from_str(json).unwrap();
        assert_eq!(
            data,
            InCallEventData::Playback(PlaybackRef {
                playback_id: "pb-42".to_owned()
            })
        );
    }

    #[test]
    fn payload_matching_neither_variant_fails() {
        let json = r#"{"volume": 3}"#;
        assert!(serde_json::from_str::<InCallEventData>(json).is_err());
    }

    #[test]
    fn full_in_call_event_round_trips() {
        let json = r#"{
            "uuid": "c-1",
            "event_type": "in_call_event",
            "event_time": "2024-05-01T12:00:00Z",
            "event_payload": {
                "in_call_event": "dtmf_received",
                "in_call_event_data": {"digits": "42#", "reason": "termination_character"}
            },
            "from": "15551230001",
            "to": "15551230002",
            "call_started": "2024-05-01T11:59:00Z",
            "call_answered": "2024-05-01T11:59:05Z",
            "machine_detected": false,
            "tag": "campaign-7"
        }"#;
        let event: CallEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.event_type, EventType::InCallEvent);
        let payload = event.event_payload.as_ref().unwrap();
        assert_eq!(payload.in_call_event, "dtmf_received");
        assert!(matches!(
            payload.in_call_event_data,
            InCallEventData::Digits(_)
        ));

        let encoded = serde_json::to_string(&event).unwrap();
        let decoded: CallEvent = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn plain_events_have_no_payload() {
        let json = r#"{"uuid": "c-2", "event_type": "answered", "from": "1555", "to": "1666"}"#;
        let event: CallEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.event_type, EventType::Answered);
        assert!(event.event_payload.is_none());
    }
}
