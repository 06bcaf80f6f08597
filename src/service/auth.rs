//! Demo credentials check: no password storage, any well-formed email
//! with a long enough password signs in.

use crate::types::SessionUser;
use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

const DEMO_EMAIL: &str = "john@doe.com";
const DEMO_PASSWORD: &str = "johndoe123";
const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub fn authorize(email: &str, password: &str) -> Option<SessionUser> {
    if email.is_empty() || password.is_empty() {
        return None;
    }

    if email == DEMO_EMAIL && password == DEMO_PASSWORD {
        return Some(SessionUser {
            id: "1".to_string(),
            email: DEMO_EMAIL.to_string(),
            name: "John Doe".to_string(),
        });
    }

    if EMAIL_RE.is_match(email) && password.chars().count() >= MIN_PASSWORD_LEN {
        let name = email.split('@').next().unwrap_or(email).to_string();
        return Some(SessionUser {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            name,
        });
    }

    None
}
