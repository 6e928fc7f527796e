//! Shared test environment: a mock API server and a client pointed at it.

#![allow(dead_code)]

use std::io::Write;
use std::sync::{Arc, Mutex};

use hdns::Client;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer, Request};

pub const TOKEN: &str = "32CharactersTokenxxxxxxxXxxxxxxx";

/// The mock server runs on its own thread, so the blocking client can be
/// driven straight from the test thread. The runtime is only used to set up
/// mocks and inspect received requests.
pub struct TestEnv {
    pub server: MockServer,
    pub client: Client,
    rt: Runtime,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_client(|builder| builder)
    }

    /// Creates an environment whose client is further configured by `f`.
    pub fn with_client(f: impl FnOnce(hdns::ClientBuilder) -> hdns::ClientBuilder) -> Self {
        let rt = Runtime::new().unwrap();
        let server = rt.block_on(MockServer::start());
        let client = f(Client::builder().endpoint(&server.uri()).token(TOKEN))
            .build()
            .unwrap();

        Self { server, client, rt }
    }

    pub fn mount(&self, mock: Mock) {
        self.rt.block_on(mock.mount(&self.server));
    }

    pub fn requests(&self) -> Vec<Request> {
        self.rt
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }
}

/// A writer whose contents can be read after it was handed to a client.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}
