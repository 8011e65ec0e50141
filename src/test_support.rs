//! In-process HTTP stub used by unit tests that need a live endpoint.
use std::collections::BTreeMap;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::error::{AppError, AppResult};

const READ_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
    runtime.block_on(future)
}

#[derive(Debug, Clone)]
pub(crate) struct StubRequest {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) headers: BTreeMap<String, String>,
    pub(crate) body: String,
}

impl StubRequest {
    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct StubReply {
    pub(crate) status: u16,
    pub(crate) body: String,
    pub(crate) delay: Option<Duration>,
}

impl StubReply {
    pub(crate) fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: None,
        }
    }

    pub(crate) const fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

type Handler = Arc<dyn Fn(&StubRequest) -> StubReply + Send + Sync>;

pub(crate) struct StubServer {
    pub(crate) addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

impl StubServer {
    pub(crate) fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub(crate) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Binds an ephemeral port and answers every request with `handler`.
/// Returns `None` when the sandbox forbids binding sockets.
pub(crate) async fn spawn_stub_server<F>(handler: F) -> AppResult<Option<StubServer>>
where
    F: Fn(&StubRequest) -> StubReply + Send + Sync + 'static,
{
    let listener = match TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => listener,
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => return Ok(None),
        Err(err) => {
            return Err(AppError::validation(format!(
                "Failed to bind stub server: {}",
                err
            )));
        }
    };
    let addr = listener.local_addr()?;
    let hits = Arc::new(AtomicUsize::new(0));
    let handler: Handler = Arc::new(handler);

    let task_hits = Arc::clone(&hits);
    let task = tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let handler = Arc::clone(&handler);
            let hits = Arc::clone(&task_hits);
            tokio::spawn(async move {
                drop(serve_connection(stream, handler, hits).await);
            });
        }
    });

    Ok(Some(StubServer { addr, hits, task }))
}

async fn serve_connection(
    mut stream: TcpStream,
    handler: Handler,
    hits: Arc<AtomicUsize>,
) -> AppResult<()> {
    let Some(request) = read_request(&mut stream).await? else {
        return Ok(());
    };
    hits.fetch_add(1, Ordering::SeqCst);
    let reply = handler(&request);
    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }
    let response = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reply.body.len(),
        reply.body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.flush().await?;
    Ok(())
}

async fn read_request(stream: &mut TcpStream) -> AppResult<Option<StubRequest>> {
    let mut raw = Vec::with_capacity(1024);
    let head_end = loop {
        let mut chunk = [0_u8; 1024];
        let read = timeout(READ_TIMEOUT, stream.read(&mut chunk))
            .await
            .map_err(|_err| AppError::validation("Stub read timed out"))??;
        if read == 0 {
            return Ok(None);
        }
        raw.extend_from_slice(chunk.get(..read).unwrap_or_default());
        if let Some(pos) = raw.windows(4).position(|bytes| bytes == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(raw.get(..head_end).unwrap_or_default()).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_owned();
    let path = request_line.next().unwrap_or_default().to_owned();
    let headers: BTreeMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_ascii_lowercase(), value.trim().to_owned()))
        .collect();

    let content_length = headers
        .get("content-length")
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = raw.get(head_end.saturating_add(4)..).unwrap_or_default().to_vec();
    while body.len() < content_length {
        let mut chunk = [0_u8; 1024];
        let read = timeout(READ_TIMEOUT, stream.read(&mut chunk))
            .await
            .map_err(|_err| AppError::validation("Stub body read timed out"))??;
        if read == 0 {
            break;
        }
        body.extend_from_slice(chunk.get(..read).unwrap_or_default());
    }

    Ok(Some(StubRequest {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    }))
}
