use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// How long a notice stays on screen before the layout dismisses it.
pub const AUTO_DISMISS_MS: u32 = 3000;

const COOKIE_NAME: &str = "portal_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Error => "error",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "success" => Some(Level::Success),
            "error" => Some(Level::Error),
            _ => None,
        }
    }
}

/// A transient notice carried across one redirect in a short-lived cookie.
/// Components hand a `Flash` to the jar instead of sharing notification
/// state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Flash {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Flash {
            level: Level::Error,
            message: message.into(),
        }
    }
}

/// Queue a notice for the next page render.
pub fn set(jar: CookieJar, flash: &Flash) -> CookieJar {
    let encoded: String = form_urlencoded::byte_serialize(flash.message.as_bytes()).collect();
    let cookie = Cookie::build((COOKIE_NAME, format!("{}:{encoded}", flash.level.as_str())))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Take the pending notice, if any, clearing it from the jar.
pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(cookie) = jar.get(COOKIE_NAME) else {
        return (jar, None);
    };
    let flash = decode(cookie.value());

    let removal = Cookie::build((COOKIE_NAME, "")).path("/").build();
    (jar.remove(removal), flash)
}

fn decode(value: &str) -> Option<Flash> {
    let (level, encoded) = value.split_once(':')?;
    let level = Level::parse(level)?;
    let message = form_urlencoded::parse(format!("m={encoded}").as_bytes())
        .next()
        .map(|(_, v)| v.into_owned())?;
    Some(Flash { level, message })
}
