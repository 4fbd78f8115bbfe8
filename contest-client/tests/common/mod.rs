#![allow(dead_code)]

use std::{cell::RefCell, future::Future, rc::Rc};

use contest_client::{api::EntryId, Config, Controller};
use contest_mock_server::{MockBrowser, MockPage, MockServer, MockTransport};
use futures::{executor::LocalPool, task::LocalSpawnExt};

pub type Ctl = Controller<MockPage, MockBrowser, MockTransport>;

pub struct Harness {
    pub pool: LocalPool,
    pub server: Rc<RefCell<MockServer>>,
    pub page: MockPage,
    pub browser: MockBrowser,
    pub transport: MockTransport,
    pub ctl: Rc<Ctl>,
}

fn init_logs() {
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt::try_init();
    }
}

impl Harness {
    /// Page loaded from the server's current state, default configuration
    pub fn new(server: MockServer) -> Harness {
        Harness::with_config(server, Config::default())
    }

    pub fn with_config(server: MockServer, config: Config) -> Harness {
        let page = MockPage::load(&server);
        Harness::with_page(server, page, config)
    }

    pub fn with_page(server: MockServer, page: MockPage, config: Config) -> Harness {
        init_logs();
        let pool = LocalPool::new();
        let browser = MockBrowser::new(pool.spawner());
        let server = Rc::new(RefCell::new(server));
        let transport = MockTransport::new(server.clone());
        let ctl = Rc::new(Controller::new(
            page.clone(),
            browser.clone(),
            transport.clone(),
            config,
        ));
        Harness {
            pool,
            server,
            page,
            browser,
            transport,
            ctl,
        }
    }

    pub fn run<F: Future>(&mut self, fut: F) -> F::Output {
        self.pool.run_until(fut)
    }

    pub fn spawn<F: Future<Output = ()> + 'static>(&self, fut: F) {
        self.pool
            .spawner()
            .spawn_local(fut)
            .expect("spawning test future");
    }

    /// Runs everything that can make progress
    pub fn settle(&mut self) {
        self.pool.run_until_stalled();
    }
}

/// A server knowing one entry, with comments by Alice posted in order
pub fn server_with(entry: u64, comments: &[&str]) -> MockServer {
    let mut server = MockServer::new();
    server.add_entry(EntryId(entry));
    for c in comments {
        server.seed_comment(EntryId(entry), "Alice", c);
    }
    server
}
