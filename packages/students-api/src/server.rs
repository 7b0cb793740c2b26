//! Hyper server setup and request handling.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming as IncomingBody};
use hyper::{Request, Response};
use hyper_util::rt::TokioExecutor;
use hyper_util::rt::TokioIo;
use hyper_util::server::conn::auto::Builder as ConnectionBuilder;
use tokio::net::TcpListener;

use crate::router::Router;

/// HTTP server for the students API.
pub struct Server {
    listener: TcpListener,
    router: Arc<Router>,
}

impl Server {
    /// Binds the listener.
    ///
    /// # Arguments
    /// * `addr` - Socket address to bind to; port 0 picks a free port
    /// * `router` - Request router
    pub async fn bind(addr: SocketAddr, router: Router) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            router: Arc::new(router),
        })
    }

    /// Address actually bound.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.listener.local_addr()
    }

    /// Accepts connections until the task is dropped, one task per connection.
    pub async fn serve(self) -> Result<(), std::io::Error> {
        tracing::info!("Server listening on http://{}", self.local_addr()?);

        loop {
            let (stream, peer) = self.listener.accept().await?;
            let io = TokioIo::new(stream);
            let router = Arc::clone(&self.router);

            tokio::task::spawn(async move {
                let builder = ConnectionBuilder::new(TokioExecutor::new());
                if let Err(err) = builder
                    .serve_connection(
                        io,
                        hyper::service::service_fn(move |req| handle_request(req, router.clone())),
                    )
                    .await
                {
                    tracing::warn!("Error serving connection from {}: {}", peer, err);
                }
            });
        }
    }
}

/// Handles an incoming HTTP request.
async fn handle_request(
    req: Request<IncomingBody>,
    router: Arc<Router>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    Ok(router.route(req).await.map(Full::new))
}
