use std::sync::RwLock;

/// Who is submitting a destination
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

/// Source of the active identity, injected into the normalizer
pub trait IdentityContext: Send + Sync {
    fn current(&self) -> Identity;
}

/// Fixed stand-in identity used until real sign-in exists
#[derive(Debug, Clone, Default)]
pub struct PlaceholderIdentity;

impl PlaceholderIdentity {
    pub const NAME: &'static str = "Demo User";
    pub const EMAIL: &'static str = "demoUser@gmail.com";
}

impl IdentityContext for PlaceholderIdentity {
    fn current(&self) -> Identity {
        Identity {
            name: Self::NAME.to_string(),
            email: Self::EMAIL.to_string(),
        }
    }
}

/// Session-held identity that can be set on sign-in and cleared on logout.
/// A logged-out session reports an empty identity.
#[derive(Debug, Default)]
pub struct SessionIdentity {
    user: RwLock<Option<Identity>>,
}

impl SessionIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_user(&self, name: impl Into<String>, email: impl Into<String>) {
        let identity = Identity {
            name: name.into(),
            email: email.into(),
        };
        *self.user.write().unwrap_or_else(|e| e.into_inner()) = Some(identity);
    }

    pub fn logout(&self) {
        *self.user.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.user
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}

impl IdentityContext for SessionIdentity {
    fn current(&self) -> Identity {
        self.user
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .unwrap_or_default()
    }
}
