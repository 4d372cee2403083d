use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::capabilities::Context;
use crate::domain::{Badge, Challenge, LeaderboardEntry, Post, PostCategory};
use crate::metrics::format_relative;
use crate::seed;
use crate::store::Screen;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunityTab {
    #[default]
    Challenges,
    Wall,
    Badges,
    Leaderboard,
}

impl CommunityTab {
    pub const ALL: [CommunityTab; 4] = [
        CommunityTab::Challenges,
        CommunityTab::Wall,
        CommunityTab::Badges,
        CommunityTab::Leaderboard,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CommunityTab::Challenges => "Challenges",
            CommunityTab::Wall => "Community Wall",
            CommunityTab::Badges => "My Badges",
            CommunityTab::Leaderboard => "Leaderboard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityState {
    pub tab: CommunityTab,
    pub challenges: Vec<Challenge>,
    /// Challenge ids the session user has joined, in join order.
    pub joined: Vec<String>,
    /// Newest first.
    pub posts: Vec<Post>,
    pub post_draft: String,
    pub badges: Vec<Badge>,
    pub leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommunityAction {
    SelectTab(CommunityTab),
    Join { challenge_id: String },
    ToggleLike { post_id: String },
    EditPost(String),
    SubmitPost,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostAge {
    pub post_id: String,
    pub age: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommunityMetrics {
    pub joined: usize,
    pub earned_badges: usize,
    pub user_rank: Option<u32>,
    pub user_points: Option<u32>,
    pub post_ages: Vec<PostAge>,
}

impl CommunityState {
    pub fn seeded(context: &Context) -> Self {
        Self {
            tab: CommunityTab::default(),
            challenges: seed::challenges(),
            joined: seed::initially_joined(),
            posts: seed::posts(context.now()),
            post_draft: String::new(),
            badges: seed::badges(),
            leaderboard: seed::leaderboard(&context.user_name),
        }
    }

    pub fn has_joined(&self, challenge_id: &str) -> bool {
        self.joined.iter().any(|id| id == challenge_id)
    }

    pub fn challenge(&self, id: &str) -> Option<&Challenge> {
        self.challenges.iter().find(|challenge| challenge.id == id)
    }

    pub fn post(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    fn apply(&mut self, action: CommunityAction, context: &Context) {
        match action {
            CommunityAction::SelectTab(tab) => self.tab = tab,
            CommunityAction::Join { challenge_id } => self.join(challenge_id),
            CommunityAction::ToggleLike { post_id } => self.toggle_like(&post_id),
            CommunityAction::EditPost(text) => self.post_draft = text,
            CommunityAction::SubmitPost => self.submit_post(context),
        }
    }

    fn join(&mut self, challenge_id: String) {
        if self.has_joined(&challenge_id) {
            return;
        }

        let Some(challenge) = self
            .challenges
            .iter_mut()
            .find(|challenge| challenge.id == challenge_id)
        else {
            tracing::warn!(%challenge_id, "join for unknown challenge ignored");
            return;
        };

        challenge.participants += 1;
        tracing::info!(%challenge_id, participants = challenge.participants, "joined challenge");
        self.joined.push(challenge_id);
    }

    fn toggle_like(&mut self, post_id: &str) {
        let Some(post) = self.posts.iter_mut().find(|post| post.id == post_id) else {
            tracing::warn!(%post_id, "like for unknown post ignored");
            return;
        };

        if post.liked {
            post.likes -= 1;
        } else {
            post.likes += 1;
        }
        post.liked = !post.liked;
    }

    fn submit_post(&mut self, context: &Context) {
        let content = self.post_draft.trim();
        if content.is_empty() {
            return;
        }

        let post = Post {
            id: context.next_id(),
            author: context.user_name.clone(),
            content: content.to_string(),
            timestamp: context.now(),
            likes: 0,
            comments: 0,
            category: PostCategory::Motivation,
            liked: false,
        };
        tracing::info!(post_id = %post.id, "shared post");
        self.posts.insert(0, post);
        self.post_draft.clear();
    }

    fn post_ages(&self, now: NaiveDateTime) -> Vec<PostAge> {
        self.posts
            .iter()
            .map(|post| PostAge {
                post_id: post.id.clone(),
                age: format_relative(post.timestamp, now),
            })
            .collect()
    }
}

impl Screen for CommunityState {
    type Action = CommunityAction;
    type Metrics = CommunityMetrics;

    fn reduce(&self, action: CommunityAction, context: &Context) -> Self {
        let mut next = self.clone();
        next.apply(action, context);
        next
    }

    fn metrics(&self, context: &Context) -> CommunityMetrics {
        let user = self.leaderboard.iter().find(|entry| entry.is_user);
        CommunityMetrics {
            joined: self.joined.len(),
            earned_badges: self.badges.iter().filter(|badge| badge.earned).count(),
            user_rank: user.map(|entry| entry.rank),
            user_points: user.map(|entry| entry.points),
            post_ages: self.post_ages(context.now()),
        }
    }
}
