//! Issue and pull request reference extraction

use calens_core::TrackerConfig;
use url::Url;

const ISSUE_SEGMENT: &str = "issues";
const PULL_SEGMENT: &str = "pull";

/// Classification of a single URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// Issue on the tracker, with its identifier
    Issue(String),
    /// Pull request on the tracker, with its identifier
    PullRequest(String),
    /// Any other link
    Other,
}

/// URLs of one entry, partitioned by [`Reference`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct References {
    pub issues: Vec<String>,
    pub issue_urls: Vec<Url>,
    pub prs: Vec<String>,
    pub pr_urls: Vec<Url>,
    pub other_urls: Vec<Url>,
    /// First issue or pull request reference in scan order
    pub primary: Option<(String, Url)>,
}

/// Recognizes issue and pull request URLs of an issue tracker.
///
/// References are `https://<host>/<owner>/<repo>/issues/<id>` and
/// `https://<host>/<owner>/<repo>/pull/<id>`. With a repository set only
/// paths of that repository count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueTracker {
    host: String,
    repository: Option<String>,
}

impl Default for IssueTracker {
    fn default() -> Self {
        Self::from_config(&TrackerConfig::default())
    }
}

impl IssueTracker {
    /// Create a tracker for `host`, optionally restricted to `owner/name`
    pub fn new(host: impl Into<String>, repository: Option<String>) -> Self {
        Self {
            host: host.into().to_ascii_lowercase(),
            repository: repository.map(|r| r.trim_matches('/').to_string()),
        }
    }

    /// Create a tracker from configuration
    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(config.host.clone(), config.repository.clone())
    }

    /// Classify a single URL
    pub fn classify_url(&self, url: &Url) -> Reference {
        if url.host_str() != Some(self.host.as_str()) {
            return Reference::Other;
        }

        let Some(rest) = self.strip_repository(url.path()) else {
            return Reference::Other;
        };

        match rest.split_once('/') {
            Some((ISSUE_SEGMENT, id)) if !id.is_empty() => Reference::Issue(id.to_string()),
            Some((PULL_SEGMENT, id)) if !id.is_empty() => Reference::PullRequest(id.to_string()),
            _ => Reference::Other,
        }
    }

    /// Partition `urls`, keeping their order within each partition
    pub fn classify(&self, urls: &[Url]) -> References {
        let mut refs = References::default();

        for url in urls {
            let reference = self.classify_url(url);
            if refs.primary.is_none() {
                if let Reference::Issue(id) | Reference::PullRequest(id) = &reference {
                    refs.primary = Some((id.clone(), url.clone()));
                }
            }

            match reference {
                Reference::Issue(id) => {
                    refs.issues.push(id);
                    refs.issue_urls.push(url.clone());
                }
                Reference::PullRequest(id) => {
                    refs.prs.push(id);
                    refs.pr_urls.push(url.clone());
                }
                Reference::Other => refs.other_urls.push(url.clone()),
            }
        }

        refs
    }

    /// Path remainder after `/<owner>/<repo>/`
    fn strip_repository<'a>(&self, path: &'a str) -> Option<&'a str> {
        let path = path.strip_prefix('/')?;
        match &self.repository {
            Some(repository) => path.strip_prefix(repository.as_str())?.strip_prefix('/'),
            None => {
                let (owner, rest) = path.split_once('/')?;
                let (name, rest) = rest.split_once('/')?;
                (!owner.is_empty() && !name.is_empty()).then_some(rest)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_classify_url() {
        let tracker = IssueTracker::default();
        assert_eq!(
            tracker.classify_url(&url("https://github.com/restic/restic/issues/12345")),
            Reference::Issue("12345".to_string())
        );
        assert_eq!(
            tracker.classify_url(&url("https://github.com/restic/restic/pull/666666")),
            Reference::PullRequest("666666".to_string())
        );
        assert_eq!(
            tracker.classify_url(&url("https://github.com/restic/rest-server/issues/232323")),
            Reference::Issue("232323".to_string())
        );
    }

    #[test]
    fn test_classify_other_urls() {
        let tracker = IssueTracker::default();
        for other in [
            "https://forum.restic.net/t/getting-last-successful-backup-time/531",
            "https://github.com/restic/restic/wiki/FAQ",
            "https://github.com/restic/restic/issues/",
            "https://github.com/restic",
            "https://gitlab.com/restic/restic/issues/1",
        ] {
            assert_eq!(tracker.classify_url(&url(other)), Reference::Other, "{other}");
        }
    }

    #[test]
    fn test_classify_restricted_repository() {
        let tracker = IssueTracker::new("github.com", Some("restic/restic".to_string()));
        assert_eq!(
            tracker.classify_url(&url("https://github.com/restic/restic/issues/1")),
            Reference::Issue("1".to_string())
        );
        assert_eq!(
            tracker.classify_url(&url("https://github.com/restic/rest-server/issues/2")),
            Reference::Other
        );
        assert_eq!(
            tracker.classify_url(&url("https://github.com/restic/restic-extra/pull/3")),
            Reference::Other
        );
    }

    #[test]
    fn test_classify_partitions_and_primary() {
        let tracker = IssueTracker::default();
        let urls = vec![
            url("https://forum.restic.net/t/backup/531"),
            url("https://github.com/restic/restic/pull/666666"),
            url("https://github.com/restic/restic/issues/12345"),
            url("https://github.com/restic/restic/issues/54321"),
        ];

        let refs = tracker.classify(&urls);
        assert_eq!(refs.issues, vec!["12345", "54321"]);
        assert_eq!(refs.prs, vec!["666666"]);
        assert_eq!(refs.other_urls, vec![urls[0].clone()]);
        assert_eq!(
            refs.issue_urls.len() + refs.pr_urls.len() + refs.other_urls.len(),
            urls.len()
        );
        // first reference in scan order wins, even when it is a pull request
        assert_eq!(refs.primary, Some(("666666".to_string(), urls[1].clone())));
    }

    #[test]
    fn test_classify_without_references() {
        let tracker = IssueTracker::default();
        let refs = tracker.classify(&[url("https://restic.net/")]);
        assert!(refs.primary.is_none());
        assert!(refs.issues.is_empty() && refs.prs.is_empty());
        assert_eq!(refs.other_urls.len(), 1);
    }
}
