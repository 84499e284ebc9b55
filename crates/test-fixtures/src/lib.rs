//! Test fixture loader for Agora discussion scenarios.
//!
//! Fixtures describe a discussion with symbolic keys (`"root"`, `"A"`,
//! `"P1"`) and are installed through the storage traits, so every test
//! resolves keys to the ids the store actually assigned.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use agora_core::errors::{AgoraError, AgoraResult};
use agora_core::models::{
    ActionKind, AgentId, ContentLinkKind, DiscussionId, IdeaId, IdeaKind, IdeaLinkId, NewDiscussion,
    NewIdea, NewIdeaContentLink, NewIdeaLink, NewPost, NewPostAction, PostId, PostKind,
};
use agora_core::traits::{IContentStorage, IIdeaStorage};

/// Key under which the discussion's root idea is registered.
pub const ROOT_KEY: &str = "root";

/// Root directory of the fixture files.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load `discussions/<name>.json`.
pub fn load_discussion(name: &str) -> DiscussionFixture {
    load_fixture(&format!("discussions/{name}.json"))
}

/// List all JSON files in a fixture subdirectory.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    paths.sort();
    paths
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscussionFixture {
    pub slug: String,
    pub topic: String,
    #[serde(default)]
    pub locales: Vec<String>,
    #[serde(default)]
    pub ideas: Vec<IdeaFixture>,
    #[serde(default)]
    pub links: Vec<LinkFixture>,
    #[serde(default)]
    pub posts: Vec<PostFixture>,
    #[serde(default)]
    pub content_links: Vec<ContentLinkFixture>,
    #[serde(default)]
    pub actions: Vec<ActionFixture>,
    /// Idea keys tombstoned after everything else is installed.
    #[serde(default)]
    pub tombstoned: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdeaFixture {
    pub key: String,
    #[serde(default)]
    pub short_title: Option<String>,
    #[serde(default)]
    pub long_title: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkFixture {
    #[serde(default)]
    pub key: Option<String>,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub order: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostFixture {
    pub key: String,
    pub creator: AgentId,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default = "default_post_kind")]
    pub kind: PostKind,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

fn default_post_kind() -> PostKind {
    PostKind::AssemblPost
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentLinkFixture {
    #[serde(default)]
    pub idea: Option<String>,
    pub post: String,
    pub kind: ContentLinkKind,
    #[serde(default)]
    pub important: bool,
    #[serde(default = "default_link_creator")]
    pub creator: AgentId,
}

fn default_link_creator() -> AgentId {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActionFixture {
    pub agent: AgentId,
    pub post: String,
    #[serde(default = "default_action_kind")]
    pub kind: ActionKind,
}

fn default_action_kind() -> ActionKind {
    ActionKind::Read
}

/// Ids assigned by the store, addressable by fixture key.
#[derive(Debug, Clone, Default)]
pub struct Installed {
    pub discussion_id: DiscussionId,
    pub ideas: HashMap<String, IdeaId>,
    pub links: HashMap<String, IdeaLinkId>,
    pub posts: HashMap<String, PostId>,
}

impl Installed {
    /// Id of the idea registered under `key`.
    ///
    /// # Panics
    /// Panics on an unknown key.
    pub fn idea(&self, key: &str) -> IdeaId {
        *self
            .ideas
            .get(key)
            .unwrap_or_else(|| panic!("unknown idea key '{key}'"))
    }

    pub fn root(&self) -> IdeaId {
        self.idea(ROOT_KEY)
    }

    /// # Panics
    /// Panics on an unknown key.
    pub fn post(&self, key: &str) -> PostId {
        *self
            .posts
            .get(key)
            .unwrap_or_else(|| panic!("unknown post key '{key}'"))
    }

    /// # Panics
    /// Panics on an unknown key.
    pub fn link(&self, key: &str) -> IdeaLinkId {
        *self
            .links
            .get(key)
            .unwrap_or_else(|| panic!("unknown link key '{key}'"))
    }

    /// Sorted post ids for the given keys.
    pub fn posts_of(&self, keys: &[&str]) -> Vec<PostId> {
        let mut ids: Vec<PostId> = keys.iter().map(|k| self.post(k)).collect();
        ids.sort_unstable();
        ids
    }
}

fn lookup<'a>(map: &'a HashMap<String, i64>, key: &str, what: &str) -> AgoraResult<&'a i64> {
    map.get(key)
        .ok_or_else(|| AgoraError::ValidationError(format!("fixture references unknown {what} '{key}'")))
}

impl DiscussionFixture {
    /// Install the fixture through the storage traits.
    pub fn install<S>(&self, storage: &S) -> AgoraResult<Installed>
    where
        S: IIdeaStorage + IContentStorage + ?Sized,
    {
        let new = NewDiscussion {
            slug: self.slug.clone(),
            topic: self.topic.clone(),
            locales: self.locales.clone(),
        };
        let (discussion_id, root_id) = storage.create_discussion(&new)?;
        let mut installed = Installed {
            discussion_id,
            ..Installed::default()
        };
        installed.ideas.insert(ROOT_KEY.to_string(), root_id);

        for idea in &self.ideas {
            let new = NewIdea {
                discussion_id,
                kind: IdeaKind::Idea,
                short_title: idea.short_title.clone(),
                long_title: idea.long_title.clone(),
                definition: idea.definition.clone(),
                hidden: idea.hidden,
            };
            let id = storage.create_idea(&new)?;
            installed.ideas.insert(idea.key.clone(), id);
        }

        for link in &self.links {
            let source = *lookup(&installed.ideas, &link.source, "idea")?;
            let target = *lookup(&installed.ideas, &link.target, "idea")?;
            let id = storage.create_link(&NewIdeaLink::new(source, target, link.order))?;
            if let Some(key) = &link.key {
                installed.links.insert(key.clone(), id);
            }
        }

        for post in &self.posts {
            let parent_id = match &post.parent {
                Some(parent) => Some(*lookup(&installed.posts, parent, "post")?),
                None => None,
            };
            let new = NewPost {
                discussion_id,
                kind: post.kind,
                creator_id: post.creator,
                parent_id,
                subject: post.subject.clone(),
                body: post.body.clone(),
                hidden: post.hidden,
            };
            let id = storage.create_post(&new)?;
            installed.posts.insert(post.key.clone(), id);
        }

        for link in &self.content_links {
            let idea_id = match &link.idea {
                Some(idea) => Some(*lookup(&installed.ideas, idea, "idea")?),
                None => None,
            };
            storage.link_content(&NewIdeaContentLink {
                idea_id,
                content_id: *lookup(&installed.posts, &link.post, "post")?,
                kind: link.kind,
                important: link.important,
                creator_id: link.creator,
            })?;
        }

        for action in &self.actions {
            storage.record_action(&NewPostAction {
                kind: action.kind,
                actor_id: action.agent,
                post_id: *lookup(&installed.posts, &action.post, "post")?,
            })?;
        }

        for key in &self.tombstoned {
            storage.tombstone_idea(*lookup(&installed.ideas, key, "idea")?)?;
        }

        Ok(installed)
    }
}
