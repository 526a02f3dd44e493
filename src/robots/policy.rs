use crate::robots::RobotsPolicy;
use robotstxt::DefaultMatcher;
use url::Url;

/// Robots policy backed by raw robots.txt content
///
/// The content is kept as fetched and matched on demand; `DefaultMatcher`
/// is cheap to construct and carries per-check state.
#[derive(Debug, Clone)]
pub struct RobotsTxtPolicy {
    content: String,
}

impl RobotsTxtPolicy {
    /// Creates a policy from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }
}

impl RobotsPolicy for RobotsTxtPolicy {
    fn allowed(&self, user_agent: &str, url: &Url) -> bool {
        if self.content.is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url.as_str())
    }
}

/// Policy that allows everything
///
/// Used when robots compliance is disabled and as the fail-open fallback
/// when the directives source cannot be read.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl RobotsPolicy for AllowAll {
    fn allowed(&self, _user_agent: &str, _url: &Url) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(path: &str) -> Url {
        Url::parse(&format!("https://example.com{}", path)).unwrap()
    }

    #[test]
    fn test_allow_all() {
        let policy = AllowAll;
        assert!(policy.allowed("TestBot", &url("/any")));
        assert!(policy.allowed("TestBot", &url("/private")));
    }

    #[test]
    fn test_disallow_all() {
        let policy = RobotsTxtPolicy::from_content("User-agent: *\nDisallow: /");
        assert!(!policy.allowed("TestBot", &url("/")));
        assert!(!policy.allowed("TestBot", &url("/page")));
    }

    #[test]
    fn test_disallow_specific_prefix() {
        let policy = RobotsTxtPolicy::from_content("User-agent: *\nDisallow: /private");
        assert!(policy.allowed("TestBot", &url("/")));
        assert!(policy.allowed("TestBot", &url("/public")));
        assert!(!policy.allowed("TestBot", &url("/private")));
        assert!(!policy.allowed("TestBot", &url("/private/inner")));
    }

    #[test]
    fn test_allow_overrides_disallow() {
        let policy =
            RobotsTxtPolicy::from_content("User-agent: *\nDisallow: /private\nAllow: /private/ok");
        assert!(!policy.allowed("TestBot", &url("/private")));
        assert!(policy.allowed("TestBot", &url("/private/ok")));
    }

    #[test]
    fn test_specific_user_agent_group() {
        let policy = RobotsTxtPolicy::from_content(
            "User-agent: BadBot\nDisallow: /\n\nUser-agent: *\nAllow: /",
        );
        assert!(policy.allowed("GoodBot", &url("/page")));
        assert!(!policy.allowed("BadBot", &url("/page")));
    }

    #[test]
    fn test_empty_content_allows() {
        let policy = RobotsTxtPolicy::from_content("");
        assert!(policy.allowed("TestBot", &url("/anything")));
    }

    #[test]
    fn test_garbage_content_fails_open() {
        let policy = RobotsTxtPolicy::from_content("not a robots file {{{");
        assert!(policy.allowed("TestBot", &url("/anything")));
    }
}
