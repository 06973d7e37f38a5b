use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub sid: String,
    pub iat: i64,
    pub exp: i64,
}

/// Identity recovered from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub user_id: String,
    pub session_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialProvider {
    Google,
    Facebook,
    Github,
}

/// Canned identity handed back by the simulated OAuth exchange.
pub struct SocialProfile {
    pub id: &'static str,
    pub email: &'static str,
    pub first_name: &'static str,
    pub last_name: &'static str,
}

impl SocialProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialProvider::Google => "google",
            SocialProvider::Facebook => "facebook",
            SocialProvider::Github => "github",
        }
    }

    pub fn profile(&self) -> SocialProfile {
        match self {
            SocialProvider::Google => SocialProfile {
                id: "google-user-123",
                email: "user@gmail.com",
                first_name: "Arjun",
                last_name: "Sharma",
            },
            SocialProvider::Facebook => SocialProfile {
                id: "facebook-user-123",
                email: "user@facebook.com",
                first_name: "Priya",
                last_name: "Patel",
            },
            SocialProvider::Github => SocialProfile {
                id: "github-user-123",
                email: "user@github.com",
                first_name: "Rahul",
                last_name: "Kumar",
            },
        }
    }
}

impl FromStr for SocialProvider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "google" => Ok(SocialProvider::Google),
            "facebook" => Ok(SocialProvider::Facebook),
            "github" => Ok(SocialProvider::Github),
            _ => Err(()),
        }
    }
}
