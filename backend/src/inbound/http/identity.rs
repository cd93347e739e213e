//! Request identity extractor.
//!
//! Authentication is not implemented; every request acts as
//! [`UserId::ANONYMOUS`]. Handlers take the identity as an extractor argument
//! so a real implementation can replace this one without touching them.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::domain::{Error, UserId};

/// Identity of the caller making the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestIdentity {
    user_id: UserId,
}

impl RequestIdentity {
    /// Identity for the given user.
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// The caller's user id.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

impl FromRequest for RequestIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(_req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::new(UserId::ANONYMOUS)))
    }
}
