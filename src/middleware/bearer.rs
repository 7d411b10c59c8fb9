/// Bearer token extraction from the Authorization header
use actix_web::{dev::Payload, http::header, FromRequest, HttpRequest};
use std::future::{ready, Ready};

/// Raw bearer token, if the request carried one.
///
/// Extraction never fails on its own: the access guard owns the
/// 401-with-challenge behavior, because only the endpoint knows which
/// scopes to name in the `WWW-Authenticate` header.
#[derive(Debug, Clone)]
pub struct BearerAuth(Option<String>);

impl BearerAuth {
    pub fn token(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl FromRequest for BearerAuth {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::to_string);

        ready(Ok(BearerAuth(token)))
    }
}
