use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::Service;
use hyper_util::rt::TokioIo;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use userapi_http::{Handler, Request, Response};

/// Errors raised by the server loop
#[derive(Debug, Error)]
pub enum ServerError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Hyper error: {0}")]
	Hyper(#[from] hyper::Error),
}

/// HTTP Server
pub struct HttpServer {
	handler: Arc<dyn Handler>,
}

impl HttpServer {
	/// Create a new server with the given handler
	pub fn new(handler: Arc<dyn Handler>) -> Self {
		Self { handler }
	}

	/// Clone of the handler requests are dispatched to
	pub fn handler(&self) -> Arc<dyn Handler> {
		self.handler.clone()
	}

	/// Bind `addr` and serve until `shutdown` resolves
	///
	/// # Errors
	///
	/// Returns [`ServerError::Io`] if the address cannot be bound or accepting fails.
	pub async fn listen_with_shutdown<F>(self, addr: SocketAddr, shutdown: F) -> Result<(), ServerError>
	where
		F: Future<Output = ()> + Send,
	{
		let listener = TcpListener::bind(addr).await?;
		self.serve_listener(listener, shutdown).await
	}

	/// Serve connections from an already bound listener until `shutdown` resolves
	///
	/// In-flight connections keep running on their own tasks after the
	/// accept loop stops.
	///
	/// # Errors
	///
	/// Returns [`ServerError::Io`] if accepting a connection fails.
	pub async fn serve_listener<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
	where
		F: Future<Output = ()> + Send,
	{
		let local_addr = listener.local_addr()?;
		tracing::info!("Server listening on http://{}", local_addr);

		tokio::pin!(shutdown);
		loop {
			tokio::select! {
				result = listener.accept() => {
					let (stream, socket_addr) = result?;
					let handler = self.handler.clone();
					tokio::task::spawn(async move {
						if let Err(err) = Self::handle_connection(stream, socket_addr, handler).await {
							tracing::warn!(peer = %socket_addr, "Error handling connection: {}", err);
						}
					});
				}
				_ = &mut shutdown => {
					tracing::info!("Shutdown signal received, stopping server");
					break;
				}
			}
		}

		Ok(())
	}

	/// Handle a single TCP connection by processing HTTP requests
	///
	/// # Errors
	///
	/// Returns [`ServerError::Hyper`] if the connection fails at the protocol level.
	pub async fn handle_connection(
		stream: TcpStream,
		socket_addr: SocketAddr,
		handler: Arc<dyn Handler>,
	) -> Result<(), ServerError> {
		let io = TokioIo::new(stream);
		let service = RequestService {
			handler,
			remote_addr: socket_addr,
		};

		http1::Builder::new().serve_connection(io, service).await?;

		Ok(())
	}
}

/// Service implementation for hyper
struct RequestService {
	handler: Arc<dyn Handler>,
	remote_addr: SocketAddr,
}

impl Service<hyper::Request<Incoming>> for RequestService {
	type Response = hyper::Response<Full<Bytes>>;
	type Error = Box<dyn std::error::Error + Send + Sync>;
	type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

	fn call(&self, req: hyper::Request<Incoming>) -> Self::Future {
		let handler = self.handler.clone();
		let remote_addr = self.remote_addr;

		Box::pin(async move {
			let (parts, body) = req.into_parts();
			let body_bytes = body.collect().await?.to_bytes();

			let request = Request::builder()
				.method(parts.method)
				.uri(parts.uri.to_string())
				.version(parts.version)
				.headers(parts.headers)
				.body(body_bytes)
				.remote_addr(remote_addr)
				.build()?;

			let response = handler.handle(request).await.unwrap_or_else(|err| {
				tracing::error!(peer = %remote_addr, "Handler error: {}", err);
				Response::from_error(&err)
			});

			let mut hyper_response = hyper::Response::builder().status(response.status);
			for (key, value) in response.headers.iter() {
				hyper_response = hyper_response.header(key, value);
			}

			Ok(hyper_response.body(Full::new(response.body))?)
		})
	}
}

/// Serve `handler` on `addr` until Ctrl-C
///
/// # Errors
///
/// See [`HttpServer::listen_with_shutdown`].
pub async fn serve(addr: SocketAddr, handler: Arc<dyn Handler>) -> Result<(), ServerError> {
	HttpServer::new(handler)
		.listen_with_shutdown(addr, shutdown_signal())
		.await
}

/// Resolves when the process receives Ctrl-C
pub async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		tracing::error!("Failed to listen for shutdown signal: {}", err);
		// Without a signal handler the server would stop immediately
		std::future::pending::<()>().await;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use rstest::rstest;
	use tokio::io::{AsyncReadExt, AsyncWriteExt};
	use tokio::sync::oneshot;
	use userapi_core::{Error, Result};

	struct PathHandler;

	#[async_trait]
	impl Handler for PathHandler {
		async fn handle(&self, request: Request) -> Result<Response> {
			match request.path() {
				"/fail/" => Err(Error::Internal("boom".to_string())),
				path => Ok(Response::ok()
					.with_header("x-peer-known", &request.remote_addr.is_some().to_string())
					.with_header("x-version", &format!("{:?}", request.version))
					.with_body(path.to_string())),
			}
		}
	}

	async fn spawn_server() -> (SocketAddr, oneshot::Sender<()>, tokio::task::JoinHandle<()>) {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		let (tx, rx) = oneshot::channel::<()>();
		let server = HttpServer::new(Arc::new(PathHandler));
		let handle = tokio::spawn(async move {
			server
				.serve_listener(listener, async {
					let _ = rx.await;
				})
				.await
				.unwrap();
		});
		(addr, tx, handle)
	}

	async fn raw_get(addr: SocketAddr, path: &str) -> String {
		let mut stream = TcpStream::connect(addr).await.unwrap();
		let request = format!(
			"GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
			path, addr
		);
		stream.write_all(request.as_bytes()).await.unwrap();
		let mut buf = Vec::new();
		stream.read_to_end(&mut buf).await.unwrap();
		String::from_utf8(buf).unwrap()
	}

	#[rstest]
	#[tokio::test]
	async fn test_serves_over_tcp() {
		let (addr, tx, handle) = spawn_server().await;

		let response = raw_get(addr, "/users/").await;
		assert!(response.starts_with("HTTP/1.1 200 OK"), "{}", response);
		assert!(response.contains("x-peer-known: true"));
		assert!(response.contains("x-version: HTTP/1.1"));
		assert!(response.ends_with("/users/"));

		tx.send(()).unwrap();
		handle.await.unwrap();
	}

	#[rstest]
	#[tokio::test]
	async fn test_handler_error_becomes_500() {
		let (addr, tx, handle) = spawn_server().await;

		let response = raw_get(addr, "/fail/").await;
		assert!(response.starts_with("HTTP/1.1 500"), "{}", response);
		assert!(response.contains("Internal error: boom"));

		tx.send(()).unwrap();
		handle.await.unwrap();
	}

	#[rstest]
	fn test_handler_accessor_shares_handler() {
		let handler: Arc<dyn Handler> = Arc::new(PathHandler);
		let server = HttpServer::new(handler.clone());
		assert!(Arc::ptr_eq(&server.handler(), &handler));
	}
}
