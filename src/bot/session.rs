//! Per-conversation session registry

use crate::quiz::GameState;
use crate::recommend::RecommendationCycle;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Everything the bot remembers about one conversation
pub struct Session {
    pub game: Option<GameState>,
    pub cycle: RecommendationCycle,
    pub rng: StdRng,
}

impl Session {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            game: None,
            cycle: RecommendationCycle::new(),
            rng,
        }
    }
}

/// Process-wide map of conversation id to session.
///
/// Each session sits behind its own mutex, so events for one conversation
/// are applied one at a time while other conversations proceed.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
    seed: Option<u64>,
}

impl SessionRegistry {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            seed,
        }
    }

    pub async fn get(&self, conversation_id: &str) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(conversation_id).cloned()
    }

    pub async fn get_or_create(&self, conversation_id: &str) -> Arc<Mutex<Session>> {
        if let Some(session) = self.get(conversation_id).await {
            return session;
        }

        let mut sessions = self.sessions.write().await;
        // Another task may have created it between the two locks
        sessions
            .entry(conversation_id.to_string())
            .or_insert_with(|| {
                tracing::debug!(conv_id = %conversation_id, "Creating session");
                Arc::new(Mutex::new(Session::new(self.seed)))
            })
            .clone()
    }

    /// Forget a conversation entirely. Returns whether it existed.
    pub async fn remove(&self, conversation_id: &str) -> bool {
        self.sessions.write().await.remove(conversation_id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
