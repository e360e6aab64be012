use gallery_core::{extract_user, extract_user_from_str, Service, UserInfo};
use pretty_assertions::assert_eq;
use url::Url;

#[test]
fn twitter_urls_yield_first_path_segment() {
    let info = extract_user_from_str("https://twitter.com/alice/status/123").unwrap();
    assert_eq!(
        info,
        Some(UserInfo {
            service: Service::Twitter,
            user_name: Some("alice".to_string()),
            profile_url: "https://twitter.com/alice/".to_string(),
        })
    );
}

#[test]
fn twitter_root_has_no_user_name() {
    let info = extract_user_from_str("https://twitter.com/").unwrap().unwrap();
    assert_eq!(info.service, Service::Twitter);
    assert_eq!(info.user_name, None);
    assert_eq!(info.profile_url, "https://twitter.com/");
}

#[test]
fn ash_cale_uses_fixed_identity() {
    let info = extract_user_from_str("https://ash-cale.com/gallery/42")
        .unwrap()
        .unwrap();
    assert_eq!(info.service, Service::AshCale);
    assert_eq!(info.user_name.as_deref(), Some("ash-cale"));
    assert_eq!(info.profile_url, "https://ash-cale.com");
}

#[test]
fn booth_shop_name_comes_from_subdomain() {
    let info = extract_user_from_str("https://my_shop.booth.com/items/1")
        .unwrap()
        .unwrap();
    assert_eq!(info.service, Service::Booth);
    assert_eq!(info.user_name.as_deref(), Some("my_shop"));
    assert_eq!(info.profile_url, "https://my_shop.booth.com/");
}

#[test]
fn unknown_hosts_yield_none() {
    assert_eq!(extract_user_from_str("https://unknown.example/x").unwrap(), None);
    assert_eq!(extract_user_from_str("https://booth.com/").unwrap(), None);
    assert_eq!(extract_user_from_str("https://www.twitter.com/bob").unwrap(), None);
    assert_eq!(
        extract_user_from_str("https://shop.booth.com.evil.example/").unwrap(),
        None
    );
}

#[test]
fn hostless_urls_yield_none() {
    let url = Url::parse("mailto:someone@example.com").unwrap();
    assert_eq!(extract_user(&url), None);
}

#[test]
fn malformed_strings_fail_to_parse() {
    assert!(extract_user_from_str("not a url").is_err());
}

#[test]
fn extraction_is_deterministic() {
    let url = Url::parse("https://twitter.com/carol").unwrap();
    assert_eq!(extract_user(&url), extract_user(&url));
}

#[test]
fn service_displays_wire_names() {
    assert_eq!(Service::Twitter.to_string(), "twitter");
    assert_eq!(Service::AshCale.to_string(), "ash-cale");
    assert_eq!(Service::Booth.to_string(), "booth");
}
