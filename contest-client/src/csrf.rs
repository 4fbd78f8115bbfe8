//! Anti-forgery token lookup and delivery
//!
//! Lookup order is the same for every mutating action: the token field of the
//! nearest enclosing scope of the acting node first, then the page-wide field.
//! Empty values do not count as a token.

use crate::{Config, Request};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CsrfToken(pub String);

pub fn resolve<F>(scoped: Option<String>, page: F) -> Option<CsrfToken>
where
    F: FnOnce() -> Option<String>,
{
    scoped
        .filter(|t| !t.is_empty())
        .or_else(|| page().filter(|t| !t.is_empty()))
        .map(CsrfToken)
}

pub fn attach(req: &mut Request, token: &CsrfToken, config: &Config) {
    if config.token_delivery.in_form() {
        req.set_field(&config.csrf_field, &token.0);
    }
    if config.token_delivery.in_header() {
        req.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(&config.csrf_header));
        req.headers
            .push((config.csrf_header.clone(), token.0.clone()));
    }
}
