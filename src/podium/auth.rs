use log::debug;

pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "password";

/// Checks a login against a single, fixed pair of credentials.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FixedCredentials {
    username: String,
    password: String,
}

impl FixedCredentials {
    pub fn new(username: &str, password: &str) -> FixedCredentials {
        FixedCredentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn login(&self, username: &str, password: &str) -> bool {
        let ok = self.username == username && self.password == password;
        debug!("login: user {:?} accepted: {}", username, ok);
        ok
    }
}

impl Default for FixedCredentials {
    fn default() -> FixedCredentials {
        FixedCredentials::new(DEFAULT_USERNAME, DEFAULT_PASSWORD)
    }
}
