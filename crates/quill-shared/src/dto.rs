//! Data Transfer Objects - the HTML forms and query strings.

use serde::Deserialize;

/// Title/content form used to create and edit posts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// `?page=` on listing pages. Kept raw; parsing decides 404s.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// `?next=` carried through the login flow.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

impl NextQuery {
    /// Where to go after login: a local path, never another origin.
    pub fn local_target(&self) -> &str {
        match self.next.as_deref() {
            Some(path) if is_local_path(path) => path,
            _ => "/",
        }
    }
}

/// Browsers drop tabs and newlines from URLs, so `/\t/host` would become the
/// protocol-relative `//host`; any control or whitespace character is refused.
fn is_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path
            .chars()
            .any(|c| c == '\\' || c.is_control() || c.is_whitespace())
}

/// Login form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Sign-up form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirm: String,
}

impl RegisterForm {
    /// Field-level checks; an empty list means the form is acceptable.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let username = self.username.trim();

        if username.is_empty() || username.len() > 150 {
            problems.push("Username must be between 1 and 150 characters.".to_string());
        } else if !username
            .chars()
            .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
        {
            problems.push(
                "Username may contain only letters, digits and @/./+/-/_ characters.".to_string(),
            );
        }
        if !self.email.contains('@') {
            problems.push("Enter a valid email address.".to_string());
        }
        if self.password.len() < 8 {
            problems.push("Password must be at least 8 characters.".to_string());
        }
        if self.password != self.password_confirm {
            problems.push("The two password fields didn't match.".to_string());
        }

        problems
    }
}
