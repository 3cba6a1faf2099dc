use may::coroutine::JoinHandle;
use may_minihttp::{HttpServerWithHeaders, HttpService};
use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::Duration;

/// Header slots per request; gateways in front of the exporter add a few.
const MAX_HEADERS: usize = 32;

/// Thin wrapper that starts any `HttpService` on a `may` coroutine.
pub struct HttpServer<T>(pub T);

/// A running server.
pub struct ServerHandle {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ServerHandle {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Poll the listening address until it accepts a connection (~250ms budget).
    pub fn wait_ready(&self) -> io::Result<()> {
        for _ in 0..50 {
            if TcpStream::connect(self.addr).is_ok() {
                return Ok(());
            }
            thread::sleep(Duration::from_millis(5));
        }
        Err(io::Error::new(io::ErrorKind::TimedOut, "server not ready"))
    }

    /// Cancel the accept coroutine and wait for it to exit.
    pub fn stop(self) {
        // SAFETY: `cancel` is unsafe in `may` because a cancelled coroutine
        // unwinds at its next yield point. The accept loop holds no state that
        // must survive that, and we join right after.
        unsafe {
            self.handle.coroutine().cancel();
        }
        let _ = self.handle.join();
    }

    /// Block until the server coroutine exits.
    pub fn join(self) -> std::thread::Result<()> {
        self.handle.join()
    }
}

/// Resolve `addr`, binding port 0 to a concrete free port so the caller
/// learns where the server actually listens.
fn resolve_addr<A: ToSocketAddrs>(addr: A) -> io::Result<SocketAddr> {
    let addr = addr
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid address"))?;
    if addr.port() != 0 {
        return Ok(addr);
    }
    let probe = TcpListener::bind(addr)?;
    probe.local_addr()
}

impl<T: HttpService + Clone + Send + Sync + 'static> HttpServer<T> {
    /// Bind `addr` and start serving. Port 0 picks a free port; see
    /// [`ServerHandle::addr`].
    pub fn start<A: ToSocketAddrs>(self, addr: A) -> io::Result<ServerHandle> {
        let addr = resolve_addr(addr)?;
        let handle = HttpServerWithHeaders::<_, MAX_HEADERS>(self.0).start(addr)?;
        Ok(ServerHandle { addr, handle })
    }
}
