//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use git2::{Oid, Repository, Signature};
use serde_json::{Map, Value, json};

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory, with a local
    /// user identity so the system git binary can create annotated tags.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        {
            let mut config = repo.config().expect("Failed to open repo config");
            config
                .set_str("user.name", "Test User")
                .expect("Failed to set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Failed to set user.email");
        }
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn signature(&self) -> Signature<'_> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Create a commit with the given message. Returns the commit OID.
    pub fn commit(&self, message: &str) -> Oid {
        let sig = self.signature();

        let file_path = self.dir.path().join("test.txt");
        let content = format!(
            "{}\n{}",
            message,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        );
        std::fs::write(&file_path, content).expect("Failed to write test file");

        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_path(std::path::Path::new("test.txt"))
            .expect("Failed to add file");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Create a lightweight tag pointing to the given OID.
    pub fn tag_lightweight(&self, name: &str, oid: Oid) {
        let obj = self
            .repo
            .find_object(oid, None)
            .expect("Failed to find object");
        self.repo
            .tag_lightweight(name, &obj, false)
            .expect("Failed to create lightweight tag");
    }

    /// Write a package.json manifest into the repo directory.
    pub fn write_manifest(&self, name: &str, version: &str) -> PathBuf {
        let path = self.dir.path().join("package.json");
        let content = format!(
            "{{\n  \"name\": \"{}\",\n  \"version\": \"{}\",\n  \"main\": \"dist/index.js\"\n}}\n",
            name, version
        );
        std::fs::write(&path, content).expect("Failed to write package.json");
        path
    }

    /// Add a local bare repository as the `origin` remote, so pushes succeed
    /// without a network.
    pub fn add_bare_origin(&self) -> tempfile::TempDir {
        let bare_dir = tempfile::tempdir().expect("Failed to create bare repo dir");
        Repository::init_bare(bare_dir.path()).expect("Failed to init bare repo");
        self.repo
            .remote("origin", bare_dir.path().to_str().expect("utf-8 path"))
            .expect("Failed to add origin remote");
        bare_dir
    }
}

/// Create a mock user object with all fields GitHub API returns.
pub fn mock_user(login: &str, id: u64) -> Value {
    let mut user = Map::new();
    user.insert("login".into(), json!(login));
    user.insert("id".into(), json!(id));
    user.insert("node_id".into(), json!(format!("MDQ6VXNlcnt{}", id)));
    user.insert(
        "avatar_url".into(),
        json!(format!("https://avatars.githubusercontent.com/u/{}?v=4", id)),
    );
    user.insert("gravatar_id".into(), json!(""));
    user.insert(
        "url".into(),
        json!(format!("https://api.github.com/users/{}", login)),
    );
    user.insert(
        "html_url".into(),
        json!(format!("https://github.com/{}", login)),
    );
    user.insert(
        "followers_url".into(),
        json!(format!("https://api.github.com/users/{}/followers", login)),
    );
    user.insert(
        "following_url".into(),
        json!(format!(
            "https://api.github.com/users/{}/following{{/other_user}}",
            login
        )),
    );
    user.insert(
        "gists_url".into(),
        json!(format!(
            "https://api.github.com/users/{}/gists{{/gist_id}}",
            login
        )),
    );
    user.insert(
        "starred_url".into(),
        json!(format!(
            "https://api.github.com/users/{}/starred{{/owner}}{{/repo}}",
            login
        )),
    );
    user.insert(
        "subscriptions_url".into(),
        json!(format!(
            "https://api.github.com/users/{}/subscriptions",
            login
        )),
    );
    user.insert(
        "organizations_url".into(),
        json!(format!("https://api.github.com/users/{}/orgs", login)),
    );
    user.insert(
        "repos_url".into(),
        json!(format!("https://api.github.com/users/{}/repos", login)),
    );
    user.insert(
        "events_url".into(),
        json!(format!(
            "https://api.github.com/users/{}/events{{/privacy}}",
            login
        )),
    );
    user.insert(
        "received_events_url".into(),
        json!(format!(
            "https://api.github.com/users/{}/received_events",
            login
        )),
    );
    user.insert("type".into(), json!("User"));
    user.insert("site_admin".into(), json!(false));
    Value::Object(user)
}

/// Create a mock issue comment as returned by the GitHub API.
pub fn mock_comment(id: u64, body: &str) -> Value {
    json!({
        "id": id,
        "node_id": format!("IC_{}", id),
        "url": format!("https://api.github.com/repos/owner/repo/issues/comments/{}", id),
        "html_url": format!("https://github.com/owner/repo/pull/1#issuecomment-{}", id),
        "body": body,
        "user": mock_user("release-bot", 999),
        "author_association": "NONE",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}

/// Create a mock release record as returned by the GitHub API.
pub fn mock_release(id: u64, tag: &str) -> Value {
    json!({
        "url": format!("https://api.github.com/repos/owner/repo/releases/{}", id),
        "html_url": format!("https://github.com/owner/repo/releases/tag/{}", tag),
        "assets_url": format!("https://api.github.com/repos/owner/repo/releases/{}/assets", id),
        "upload_url": format!(
            "https://uploads.github.com/repos/owner/repo/releases/{}/assets{{?name,label}}",
            id
        ),
        "tarball_url": null,
        "zipball_url": null,
        "id": id,
        "node_id": format!("RE_{}", id),
        "tag_name": tag,
        "target_commitish": "main",
        "name": tag,
        "body": "release notes",
        "draft": false,
        "prerelease": false,
        "created_at": "2024-01-01T00:00:00Z",
        "published_at": "2024-01-01T00:00:00Z",
        "author": mock_user("release-bot", 999),
        "assets": []
    })
}

/// Helper to create an octocrab client pointing to a mock server.
pub async fn mock_client(server: &wiremock::MockServer) -> octocrab::Octocrab {
    octocrab::Octocrab::builder()
        .base_uri(server.uri())
        .expect("Failed to set base URI")
        .build()
        .expect("Failed to build octocrab")
}
