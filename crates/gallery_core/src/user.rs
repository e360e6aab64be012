use std::fmt;

use url::Url;

pub use url::ParseError as UrlParseError;

const ASH_CALE_HOST: &str = "ash-cale.com";
const ASH_CALE_LINK: &str = "https://ash-cale.com";
const BOOTH_SUFFIX: &str = ".booth.com";
const TWITTER_HOST: &str = "twitter.com";

/// Known photo sources. An unknown service is `None` from `extract_user`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Twitter,
    AshCale,
    Booth,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Twitter => write!(f, "twitter"),
            Service::AshCale => write!(f, "ash-cale"),
            Service::Booth => write!(f, "booth"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub service: Service,
    pub user_name: Option<String>,
    pub profile_url: String,
}

struct Rule {
    matches: fn(&str) -> bool,
    extract: fn(&str, &Url) -> Option<UserInfo>,
}

/// Evaluated in order; the first rule whose host predicate matches decides.
const RULES: &[Rule] = &[
    Rule {
        matches: is_twitter_host,
        extract: twitter_user,
    },
    Rule {
        matches: is_ash_cale_host,
        extract: ash_cale_user,
    },
    Rule {
        matches: is_booth_host,
        extract: booth_user,
    },
];

/// Maps a source URL to its service and author. `None` means an unknown
/// service; callers then link the raw source URL with no author name.
pub fn extract_user(url: &Url) -> Option<UserInfo> {
    let host = url.host_str()?;
    RULES
        .iter()
        .find(|rule| (rule.matches)(host))
        .and_then(|rule| (rule.extract)(host, url))
}

pub fn extract_user_from_str(url: &str) -> Result<Option<UserInfo>, UrlParseError> {
    let parsed = Url::parse(url)?;
    Ok(extract_user(&parsed))
}

fn is_twitter_host(host: &str) -> bool {
    host == TWITTER_HOST
}

fn is_ash_cale_host(host: &str) -> bool {
    host == ASH_CALE_HOST
}

fn is_booth_host(host: &str) -> bool {
    booth_shop_name(host).is_some()
}

fn twitter_user(_host: &str, url: &Url) -> Option<UserInfo> {
    let user = url
        .path_segments()
        .and_then(|mut segments| segments.next())
        .filter(|segment| !segment.is_empty());
    let profile_url = match user {
        Some(name) => format!("https://twitter.com/{name}/"),
        None => "https://twitter.com/".to_string(),
    };
    Some(UserInfo {
        service: Service::Twitter,
        user_name: user.map(ToOwned::to_owned),
        profile_url,
    })
}

fn ash_cale_user(_host: &str, _url: &Url) -> Option<UserInfo> {
    Some(UserInfo {
        service: Service::AshCale,
        user_name: Some("ash-cale".to_string()),
        profile_url: ASH_CALE_LINK.to_string(),
    })
}

fn booth_user(host: &str, _url: &Url) -> Option<UserInfo> {
    let name = booth_shop_name(host)?;
    Some(UserInfo {
        service: Service::Booth,
        user_name: Some(name.to_string()),
        profile_url: format!("https://{name}.booth.com/"),
    })
}

fn booth_shop_name(host: &str) -> Option<&str> {
    host.strip_suffix(BOOTH_SUFFIX)
        .filter(|name| !name.is_empty() && name.chars().all(is_shop_name_char))
}

fn is_shop_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '!' | ' ' | '\'' | '(' | ')' | '-')
}
