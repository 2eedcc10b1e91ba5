//! Session cookie
//!
//! A browser session is identified by a random id in the `dashkit_session`
//! cookie. The id scopes sample-cache entries; it carries no other state.

use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::Response;

pub const SESSION_COOKIE: &str = "dashkit_session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    /// True when the id was minted for this request
    pub is_new: bool,
}

impl Session {
    /// Read the session from the `Cookie` headers, or start a new one
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let existing = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, value)| *name == SESSION_COOKIE && valid_id(value))
            .map(|(_, value)| value.to_string());

        match existing {
            Some(id) => Self { id, is_new: false },
            None => {
                let id = uuid::Uuid::new_v4().to_string();
                tracing::debug!(session = %id, "Started new session");
                Self { id, is_new: true }
            }
        }
    }

    /// Add `Set-Cookie` to `response` for a newly minted session
    pub fn attach(&self, response: &mut Response) {
        if !self.is_new {
            return;
        }
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, self.id
        );
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
}

fn valid_id(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= 64
        && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_reads_existing_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; dashkit_session=abc-123"),
        );

        let session = Session::from_headers(&headers);
        assert_eq!(session.id, "abc-123");
        assert!(!session.is_new);

        let mut response = "ok".into_response();
        session.attach(&mut response);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[test]
    fn test_new_session_sets_cookie() {
        let session = Session::from_headers(&HeaderMap::new());
        assert!(session.is_new);

        let mut response = "ok".into_response();
        session.attach(&mut response);
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("dashkit_session="));
        assert!(cookie.contains(&session.id));
    }

    #[test]
    fn test_rejects_malformed_id() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("dashkit_session=<script>"),
        );
        assert!(Session::from_headers(&headers).is_new);
    }
}
