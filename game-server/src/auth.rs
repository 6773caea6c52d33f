use uuid::Uuid;

/// Resolved caller identity. Who issues the token and how it is signed
/// is an external concern; this adapter only extracts the identity.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("authentication required")]
    MissingToken,
    #[error("invalid token")]
    InvalidToken,
}

/// Thin bearer-token adapter. Accepts `<uuid>` or `<uuid>:<username>`;
/// a real deployment would swap this for a session or OIDC validator.
pub struct AuthService;

impl AuthService {
    pub fn new() -> Self {
        Self
    }

    pub fn authenticate(&self, header: Option<&str>) -> Result<Identity, AuthError> {
        let header = header.ok_or(AuthError::MissingToken)?;
        let token = header.strip_prefix("Bearer ").unwrap_or(header);
        Self::parse_token(token)
    }

    fn parse_token(token: &str) -> Result<Identity, AuthError> {
        let (id_part, username) = match token.split_once(':') {
            Some((id, name)) if !name.trim().is_empty() => (id, name.trim().to_string()),
            Some(_) => return Err(AuthError::InvalidToken),
            None => (token, String::new()),
        };

        let user_id = Uuid::parse_str(id_part.trim()).map_err(|_| AuthError::InvalidToken)?;
        let username = if username.is_empty() {
            // Stable default handle derived from the id
            format!("player-{}", &user_id.simple().to_string()[..8])
        } else {
            username
        };

        Ok(Identity { user_id, username })
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_with_username() {
        let auth = AuthService::new();
        let id = Uuid::new_v4();
        let identity = auth
            .authenticate(Some(&format!("Bearer {id}:alice")))
            .unwrap();
        assert_eq!(identity.user_id, id);
        assert_eq!(identity.username, "alice");
    }

    #[test]
    fn test_bare_uuid_token_gets_default_username() {
        let auth = AuthService::new();
        let id = Uuid::new_v4();
        let identity = auth.authenticate(Some(&id.to_string())).unwrap();
        assert_eq!(identity.user_id, id);
        assert!(identity.username.starts_with("player-"));
    }

    #[test]
    fn test_missing_and_invalid_tokens() {
        let auth = AuthService::new();
        assert!(matches!(
            auth.authenticate(None),
            Err(AuthError::MissingToken)
        ));
        assert!(matches!(
            auth.authenticate(Some("not-a-uuid")),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            auth.authenticate(Some("ab:")),
            Err(AuthError::InvalidToken)
        ));
    }
}
