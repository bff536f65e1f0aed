use serde::{Deserialize, Serialize};

/// The acting user, handed to the session controller at construction.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserContext {
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl UserContext {
    pub fn new(user_id: i64) -> Self {
        UserContext {
            user_id,
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, display_name: &str) -> Self {
        self.display_name = Some(display_name.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_context_creation() {
        let user = UserContext::new(7).with_display_name("ada");

        assert_eq!(user.user_id, 7);
        assert_eq!(user.display_name.as_deref(), Some("ada"));
    }

    #[test]
    fn test_user_context_reads_stored_session_shape() {
        let user: UserContext = serde_json::from_str(r#"{"user_id": 3}"#).unwrap();
        assert_eq!(user, UserContext::new(3));
    }
}
