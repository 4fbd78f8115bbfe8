use async_trait::async_trait;

use crate::api;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Method {
    Get,
    Post,
}

/// An asynchronous request, always flagged with `X-Requested-With`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,

    /// Form-encoded body, only sent for POST
    pub form: Vec<(String, String)>,
}

impl Request {
    fn new(method: Method, url: String, form: Vec<(String, String)>) -> Request {
        Request {
            method,
            url,
            headers: vec![(
                String::from(api::REQUESTED_WITH_HEADER),
                String::from(api::REQUESTED_WITH_VALUE),
            )],
            form,
        }
    }

    pub fn get(url: String) -> Request {
        Request::new(Method::Get, url, Vec::new())
    }

    pub fn post(url: String, form: Vec<(String, String)>) -> Request {
        Request::new(Method::Post, url, form)
    }

    /// Header names are case-insensitive
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v as &str)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v as &str)
    }

    /// Sets a form field, replacing any previous value
    pub fn set_field(&mut self, name: &str, value: &str) {
        self.form.retain(|(k, _)| k != name);
        self.form.push((String::from(name), String::from(value)));
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the server. Network-level failures are errors, any HTTP
/// answer (whatever its status) is a `Response`.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, req: Request) -> anyhow::Result<Response>;
}
