/// Identity of the profile currently shown

use super::page::PageDom;
use crate::account::ProfileIdentity;
use crate::handle;

const USER_NAME: &str = r#"[data-testid="UserName"]"#;
const PROFILE_HEADING: &str = r#"h2[role="heading"]"#;

/// Best-effort display name from the profile header
pub fn display_name<P: PageDom>(page: &P) -> String {
    [USER_NAME, PROFILE_HEADING]
        .iter()
        .filter_map(|selector| page.query_first(selector))
        .filter_map(|header| page.query_within(&header, "span").into_iter().next())
        .map(|span| page.text_content(&span).trim().to_string())
        .find(|name| !name.is_empty())
        .unwrap_or_default()
}

/// Handle from the URL plus whatever display name the header offers
pub fn read_identity<P: PageDom>(page: &P) -> Option<ProfileIdentity> {
    let url = page.current_url();
    let handle = handle::profile_handle(&url)?;
    Some(ProfileIdentity {
        handle,
        display_name: display_name(page),
        profile_url: url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::FakePage;

    #[test]
    fn test_identity_from_url_and_header() {
        let page = FakePage::new("https://x.com/alice")
            .with(USER_NAME, 1)
            .with_within(1, "span", 2)
            .with_text(2, " Alice A. ");

        let identity = read_identity(&page).unwrap();

        assert_eq!(identity.handle.as_str(), "@alice");
        assert_eq!(identity.display_name, "Alice A.");
        assert_eq!(identity.profile_url, "https://x.com/alice");
    }

    #[test]
    fn test_heading_fallback() {
        let page = FakePage::new("https://x.com/alice")
            .with(USER_NAME, 1)
            .with_within(1, "span", 2)
            .with_text(2, "   ")
            .with(PROFILE_HEADING, 3)
            .with_within(3, "span", 4)
            .with_text(4, "Alice");

        assert_eq!(display_name(&page), "Alice");
    }

    #[test]
    fn test_missing_header_gives_empty_name() {
        let page = FakePage::new("https://x.com/alice");
        assert_eq!(read_identity(&page).unwrap().display_name, "");
    }

    #[test]
    fn test_no_identity_off_profile() {
        let page = FakePage::new("https://x.com/alice/status/1");
        assert_eq!(read_identity(&page), None);
    }
}
