//! Shared fixtures for unit tests.
//!
//! Provides the shipped-model detector and a local page server for exercising
//! the page fetcher without leaving the machine.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::config::MAX_RESPONSE_BODY_SIZE;
use crate::security::{check_address, UnsafeTarget};
use crate::{Classifier, Detector, FeatureExtractor};

/// Path of the model shipped with the crate.
pub fn shipped_model_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/models/url_forest.json")
}

/// Detector over the shipped model that never touches the network.
pub fn offline_detector() -> Detector {
    let classifier = Classifier::load(shipped_model_path()).expect("shipped model loads");
    Detector::new(FeatureExtractor::offline(), classifier).expect("shipped model matches extractor")
}

/// Address policy that admits the fixture server on 127.0.0.1 and otherwise
/// only public addresses.
pub fn fixture_policy(ip: IpAddr) -> Result<(), UnsafeTarget> {
    if ip == IpAddr::V4(Ipv4Addr::LOCALHOST) {
        Ok(())
    } else {
        check_address(ip)
    }
}

/// Page carrying all three client-side signals.
pub const TRICK_PAGE: &str = r#"<html><body>
<iframe src="https://login.example.net/" frameBorder="0"></iframe>
<script>
  document.getElementById("pay").onmouseover = function () { window.status = "https://paypal.com"; };
  document.onmousedown = function (event) { if (event.button == 2) { return false; } };
</script>
</body></html>"#;

/// Page with none of the signals.
pub const CLEAN_PAGE: &str = "<html><head><title>ok</title></head><body><p>hello</p></body></html>";

/// Starts the fixture page server on 127.0.0.1 and returns its address.
///
/// Routes:
/// - `/tricks`, `/clean`: static pages
/// - `/chain/{n}`: `n` redirects, then the clean page
/// - `/loop/{n}`: redirects forever
/// - `/big/{start|end}`: a body past the size cap with an iframe at one end
/// - `/slow`: answers after ten seconds
/// - `/to-private`, `/to-localhost`, `/to-ftp`: redirects to refused targets
/// - `/no-location`: a redirect status without a `Location` header
pub async fn spawn_page_server() -> SocketAddr {
    let app = Router::new()
        .route("/tricks", get(|| async { Html(TRICK_PAGE) }))
        .route("/clean", get(|| async { Html(CLEAN_PAGE) }))
        .route("/chain/{n}", get(chain))
        .route("/loop/{n}", get(endless))
        .route("/big/{marker}", get(big))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Html(CLEAN_PAGE)
            }),
        )
        .route(
            "/to-private",
            get(|| async { Redirect::temporary("http://10.0.0.1/admin") }),
        )
        .route(
            "/to-localhost",
            get(|| async { Redirect::temporary("http://localhost/") }),
        )
        .route(
            "/to-ftp",
            get(|| async { Redirect::temporary("ftp://files.example.com/") }),
        )
        .route("/no-location", get(|| async { StatusCode::FOUND }));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fixture server");
    let addr = listener.local_addr().expect("fixture server address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

async fn chain(Path(n): Path<u32>) -> Response {
    if n == 0 {
        Html(CLEAN_PAGE).into_response()
    } else {
        Redirect::temporary(&format!("/chain/{}", n - 1)).into_response()
    }
}

async fn endless(Path(n): Path<u32>) -> Redirect {
    Redirect::temporary(&format!("/loop/{}", n + 1))
}

async fn big(Path(marker): Path<String>) -> Html<String> {
    let filler = "a".repeat(MAX_RESPONSE_BODY_SIZE + 1024 * 1024);
    if marker == "start" {
        Html(format!("<iframe src=x></iframe>{filler}"))
    } else {
        Html(format!("{filler}<iframe src=x></iframe>"))
    }
}

/// Starts a server that promises a longer body than it sends, then hangs up.
pub async fn spawn_truncating_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind truncating server");
    let addr = listener.local_addr().expect("truncating server address");
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            let partial = "<html><iframe src=x>";
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\n\r\n",
                partial.len() + 4096
            );
            let _ = socket.write_all(head.as_bytes()).await;
            let _ = socket.write_all(partial.as_bytes()).await;
            let _ = socket.flush().await;
        }
    });
    addr
}
