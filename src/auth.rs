//! Session resolution: the opaque bearer token arrives in a cookie and is
//! resolved to a user before any authorization decision is made.

use axum_extra::headers::Cookie;

use crate::error::ApiError;
use crate::models::User;
use crate::store::MemoryStore;

pub fn verify_session(
    store: &MemoryStore,
    cookie_name: &str,
    cookie: Option<&Cookie>,
) -> Result<User, ApiError> {
    let token = cookie.and_then(|c| c.get(cookie_name));
    match token.and_then(|t| store.user_for_session(t)) {
        Some(user) => Ok(user),
        None => Err(ApiError::Unauthorized(
            "Invalid or missing session".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use crate::models::Role;

    use super::*;

    fn store_with_session() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert_user(User {
            id: 1,
            name: "Anna".to_string(),
            role: Role::Client,
            is_superuser: false,
        });
        store.insert_session("tok-anna", 1);
        store
    }

    fn cookie(value: &str) -> Cookie {
        let mut map = http::HeaderMap::new();
        map.insert(http::header::COOKIE, value.parse().unwrap());
        axum_extra::headers::HeaderMapExt::typed_get(&map).unwrap()
    }

    #[test]
    fn test_verify_session_valid_token() {
        let store = store_with_session();
        let c = cookie("session=tok-anna");
        let user = verify_session(&store, "session", Some(&c)).unwrap();
        assert_eq!(user.id, 1);
    }

    #[test]
    fn test_verify_session_rejects_missing_or_unknown() {
        let store = store_with_session();
        assert!(verify_session(&store, "session", None).is_err());
        let c = cookie("session=tok-wrong");
        assert!(verify_session(&store, "session", Some(&c)).is_err());
        let c = cookie("other=tok-anna");
        assert!(verify_session(&store, "session", Some(&c)).is_err());
    }
}
