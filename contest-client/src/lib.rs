mod action;
pub use action::ActionKind;

mod config;
pub use config::{Config, TokenDelivery};

mod controller;
pub use controller::Controller;

pub mod csrf;

mod error;
pub use error::{notice, ActionError};

mod join;

mod op;
pub use op::OpTicket;

mod page;
pub use page::{
    Browser, CommentForm, CommentItem, CommentList, CommentSection, ImageOverlay, Page,
    PaginationLink, ToastRegion,
};

mod pagination;
pub use pagination::{bind_pagination, paginate};

mod preview;

mod transport;
pub use transport::{Method, Request, Response, Transport};

pub mod api {
    pub use contest_api::*;
}
