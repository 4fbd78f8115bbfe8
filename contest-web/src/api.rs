use anyhow::Context;
use async_trait::async_trait;
use contest_client::{Method, Request, Response, Transport};
use url::Url;

/// Sends requests with the page's cookies, relative urls resolving against
/// the page's own
pub struct HttpTransport {
    base: Url,
}

impl HttpTransport {
    pub fn new(base: Url) -> HttpTransport {
        HttpTransport { base }
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(&self, req: Request) -> anyhow::Result<Response> {
        let url = self
            .base
            .join(&req.url)
            .with_context(|| format!("resolving url {:?}", req.url))?;
        let mut builder = match req.method {
            Method::Get => crate::CLIENT.get(url),
            Method::Post => crate::CLIENT.post(url).form(&req.form),
        };
        for (k, v) in req.headers.iter() {
            builder = builder.header(k, v);
        }
        let resp = builder.send().await.context("sending request")?;
        let status = resp.status().as_u16();
        let body = resp.text().await.context("reading response body")?;
        Ok(Response { status, body })
    }
}
