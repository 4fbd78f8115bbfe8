use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
};

use async_trait::async_trait;
use contest_client::{Request, Response, Transport};
use futures::channel::oneshot;

use crate::MockServer;

/// Ways the next request can go wrong, regardless of what the server would say
#[derive(Clone, Debug)]
pub enum Failure {
    /// Answers with this status and an empty body
    Status(u16),
    /// `{"success": false}` with a validation error
    Rejected,
    /// Successful status, but not JSON
    Malformed,
    /// `{"success": true}` without a payload
    NoPayload,
    /// The request never reaches the server
    Network,
}

/// Transport delivering requests straight to a `MockServer`
///
/// In hold mode requests are parked until released, which lets tests choose
/// the order in which answers come back.
#[derive(Clone)]
pub struct MockTransport(Rc<TransportState>);

struct TransportState {
    server: Rc<RefCell<MockServer>>,
    requests: RefCell<Vec<Request>>,
    failures: RefCell<VecDeque<Failure>>,
    canned: RefCell<VecDeque<Response>>,
    holding: Cell<bool>,
    pending: RefCell<VecDeque<oneshot::Sender<()>>>,
}

impl MockTransport {
    pub fn new(server: Rc<RefCell<MockServer>>) -> MockTransport {
        MockTransport(Rc::new(TransportState {
            server,
            requests: RefCell::new(Vec::new()),
            failures: RefCell::new(VecDeque::new()),
            canned: RefCell::new(VecDeque::new()),
            holding: Cell::new(false),
            pending: RefCell::new(VecDeque::new()),
        }))
    }

    pub fn server(&self) -> Rc<RefCell<MockServer>> {
        self.0.server.clone()
    }

    /// Every request sent so far, held ones included
    pub fn requests(&self) -> Vec<Request> {
        self.0.requests.borrow().clone()
    }

    pub fn num_requests(&self) -> usize {
        self.0.requests.borrow().len()
    }

    /// Makes the next request to be processed fail
    pub fn fail_next(&self, failure: Failure) {
        self.0.failures.borrow_mut().push_back(failure);
    }

    /// Answers the next request to be processed with `body`, bypassing the server
    pub fn answer_next(&self, status: u16, body: &str) {
        self.0.canned.borrow_mut().push_back(Response {
            status,
            body: String::from(body),
        });
    }

    pub fn hold(&self, holding: bool) {
        self.0.holding.set(holding);
    }

    pub fn num_held(&self) -> usize {
        self.0.pending.borrow().len()
    }

    /// Lets the `n` oldest held requests through, in order
    pub fn release(&self, n: usize) {
        for _ in 0..n {
            let gate = self.0.pending.borrow_mut().pop_front();
            match gate {
                Some(g) => drop(g.send(())),
                None => break,
            }
        }
    }

    /// Lets the most recent held request through
    pub fn release_last(&self) {
        let gate = self.0.pending.borrow_mut().pop_back();
        if let Some(g) = gate {
            drop(g.send(()));
        }
    }

    pub fn release_all(&self) {
        let n = self.num_held();
        self.release(n);
    }

    fn process(&self, req: &Request) -> anyhow::Result<Response> {
        if let Some(resp) = self.0.canned.borrow_mut().pop_front() {
            return Ok(resp);
        }
        let failure = self.0.failures.borrow_mut().pop_front();
        let ok = |body: &str| Response {
            status: 200,
            body: String::from(body),
        };
        Ok(match failure {
            None => self.0.server.borrow_mut().handle(req),
            Some(Failure::Status(status)) => Response {
                status,
                body: String::new(),
            },
            Some(Failure::Rejected) => {
                ok(r#"{"success": false, "errors": {"text": ["This field is required."]}}"#)
            }
            Some(Failure::Malformed) => ok("<html><body>Server Error</body></html>"),
            Some(Failure::NoPayload) => ok(r#"{"success": true}"#),
            Some(Failure::Network) => anyhow::bail!("connection reset while sending {}", req.url),
        })
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, req: Request) -> anyhow::Result<Response> {
        tracing::trace!(method = ?req.method, url = %req.url, "mock transport got request");
        self.0.requests.borrow_mut().push(req.clone());
        if self.0.holding.get() {
            let (tx, rx) = oneshot::channel();
            self.0.pending.borrow_mut().push_back(tx);
            rx.await
                .map_err(|_| anyhow::anyhow!("held request was dropped"))?;
        }
        self.process(&req)
    }
}
