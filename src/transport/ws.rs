//! WebSocket handshake for the call-event feed.

use crate::error::Result;
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use url::Url;

pub(crate) type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Derive the secure socket URL from the API host: `wss://<host>/sip` with the
/// credential as a query parameter.
pub(crate) fn socket_url(base_url: &Url, app_id: &str) -> Result<Url> {
    let host = base_url
        .host_str()
        .ok_or(url::ParseError::EmptyHost)
        .map_err(crate::error::Error::Url)?;
    let authority = match base_url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_owned(),
    };

    let mut url = Url::parse(&format!("wss://{authority}/sip"))?;
    url.query_pairs_mut().append_pair("appid", app_id);
    Ok(url)
}

/// Open the event socket. Failure leaves no connection behind; the caller
/// stays disconnected.
pub(crate) async fn connect(base_url: &Url, app_id: &str) -> Result<WsStream> {
    let url = socket_url(base_url, app_id)?;
    let (stream, _) = connect_async(url.as_str()).await?;
    tracing::info!("connected to Wavix call-event socket");
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_url_swaps_scheme_and_keeps_host() {
        let base = Url::parse("https://api.wavix.com").unwrap();
        let url = socket_url(&base, "key-1").unwrap();
        assert_eq!(url.as_str(), "wss://api.wavix.com/sip?appid=key-1");
    }

    #[test]
    fn socket_url_keeps_explicit_port() {
        let base = Url::parse("https://sandbox.wavix.com:8443").unwrap();
        let url = socket_url(&base, "k").unwrap();
        assert_eq!(url.as_str(), "wss://sandbox.wavix.com:8443/sip?appid=k");
    }

    #[test]
    fn socket_url_rejects_hostless_base() {
        let base = Url::parse("unix:/run/api.sock").unwrap();
        assert!(socket_url(&base, "k").is_err());
    }
}
