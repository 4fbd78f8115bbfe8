use std::{
    cell::RefCell,
    collections::VecDeque,
    rc::Rc,
    time::Duration,
};

use async_trait::async_trait;
use contest_client::Browser;
use futures::{
    executor::LocalSpawner,
    future::LocalBoxFuture,
    task::LocalSpawnExt,
};

/// Records every window-level interaction instead of performing it
///
/// Sleeps complete immediately, spawned continuations go to the test's
/// executor.
#[derive(Clone)]
pub struct MockBrowser(Rc<BrowserState>);

struct BrowserState {
    spawner: LocalSpawner,
    alerts: RefCell<Vec<String>>,
    confirm_prompts: RefCell<Vec<String>>,
    confirm_answers: RefCell<VecDeque<bool>>,
    default_answer: RefCell<bool>,
    navigations: RefCell<Vec<String>>,
    sleeps: RefCell<Vec<Duration>>,
}

impl MockBrowser {
    pub fn new(spawner: LocalSpawner) -> MockBrowser {
        MockBrowser(Rc::new(BrowserState {
            spawner,
            alerts: RefCell::new(Vec::new()),
            confirm_prompts: RefCell::new(Vec::new()),
            confirm_answers: RefCell::new(VecDeque::new()),
            default_answer: RefCell::new(true),
            navigations: RefCell::new(Vec::new()),
            sleeps: RefCell::new(Vec::new()),
        }))
    }

    /// Queues the answer to the next confirmation prompt
    pub fn answer_confirm(&self, answer: bool) {
        self.0.confirm_answers.borrow_mut().push_back(answer);
    }

    /// Answer given once the queued ones are used up
    pub fn set_default_answer(&self, answer: bool) {
        *self.0.default_answer.borrow_mut() = answer;
    }

    pub fn alerts(&self) -> Vec<String> {
        self.0.alerts.borrow().clone()
    }

    pub fn confirm_prompts(&self) -> Vec<String> {
        self.0.confirm_prompts.borrow().clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.0.navigations.borrow().clone()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.0.sleeps.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Browser for MockBrowser {
    fn alert(&self, message: &str) {
        tracing::debug!(%message, "alert");
        self.0.alerts.borrow_mut().push(String::from(message));
    }

    fn confirm(&self, message: &str) -> bool {
        self.0.confirm_prompts.borrow_mut().push(String::from(message));
        let queued = self.0.confirm_answers.borrow_mut().pop_front();
        queued.unwrap_or_else(|| *self.0.default_answer.borrow())
    }

    fn navigate(&self, url: &str) {
        self.0.navigations.borrow_mut().push(String::from(url));
    }

    async fn sleep(&self, duration: Duration) {
        self.0.sleeps.borrow_mut().push(duration);
    }

    fn spawn(&self, fut: LocalBoxFuture<'static, ()>) {
        if let Err(e) = self.0.spawner.spawn_local(fut) {
            tracing::error!("failed spawning continuation: {e}");
        }
    }
}
