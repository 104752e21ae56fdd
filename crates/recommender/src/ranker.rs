//! # Ranker
//!
//! Coordinates a ranking call:
//! 1. Start the weight fetch (bounded wait, degrades to no weights)
//! 2. Assign fetched weights onto candidates by id
//! 3. Fetch the blacklist (bounded wait, degrades to empty)
//! 4. Apply rule-based boosts to non-blacklisted candidates
//! 5. Score every candidate against the current wall-clock time
//! 6. Sort by descending score, ties in input order
//!
//! Ranking is never fatal: in the worst case candidates come back ordered by
//! raw engagement.

use std::sync::Arc;
use std::time::Instant;

use model::{Rankable, UserId, Weights};
use scoring::{Blacklist, BoostPipeline};
use store::BlacklistStore;
use tracing::{debug, error, info, warn};

use crate::config::RankerConfig;
use crate::supplier::{PendingWeights, WeightSupplier};

/// Ranks candidate lists for users.
///
/// Cheap to clone; clones share the supplier, blacklist store and boosters.
#[derive(Clone)]
pub struct Ranker {
    supplier: WeightSupplier,
    blacklist: Option<Arc<dyn BlacklistStore>>,
    boosts: Arc<BoostPipeline>,
    config: RankerConfig,
}

impl Ranker {
    /// Create a ranker with the production boosters for `config`.
    pub fn new(supplier: WeightSupplier, config: RankerConfig) -> Self {
        let boosts = Arc::new(BoostPipeline::from_config(&config.scoring));
        Self {
            supplier,
            blacklist: None,
            boosts,
            config,
        }
    }

    /// Attach a blacklist store (builder pattern).
    pub fn with_blacklist(mut self, store: Arc<dyn BlacklistStore>) -> Self {
        self.blacklist = Some(store);
        self
    }

    /// Replace the boosters (builder pattern).
    pub fn with_boosts(mut self, boosts: BoostPipeline) -> Self {
        self.boosts = Arc::new(boosts);
        self
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Start a ranking call for `user_id`.
    ///
    /// The weight fetch begins immediately, so the caller can load its
    /// candidates while the request is in flight and then call
    /// [`Recommender::recommend`].
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime, since the fetch is spawned
    /// onto the current runtime.
    pub fn recommender(&self, user_id: impl Into<UserId>) -> Recommender {
        let user_id = user_id.into();
        debug!(user_id = %user_id, "starting weight fetch");
        Recommender {
            pending: self.supplier.spawn(user_id.clone()),
            user_id,
            ranker: self.clone(),
        }
    }

    /// Rank `candidates` for `user_id` in place.
    pub async fn rank<T>(&self, candidates: &mut Vec<T>, user_id: &str)
    where
        T: Rankable + Send + Sync + 'static,
    {
        self.recommender(user_id).recommend(candidates).await;
    }

    async fn load_blacklist(&self) -> Blacklist {
        let Some(store) = &self.blacklist else {
            return Blacklist::new();
        };

        match tokio::time::timeout(self.config.weight_timeout, store.blacklist()).await {
            Ok(Ok(ids)) => ids,
            Ok(Err(e)) => {
                error!(err = %e, "failed loading blacklist, ranking without it");
                Blacklist::new()
            }
            Err(_) => {
                warn!("timeout for loading blacklist, ranking without it");
                Blacklist::new()
            }
        }
    }
}

/// A ranking call whose weight fetch is already in flight.
pub struct Recommender {
    pending: PendingWeights,
    user_id: UserId,
    ranker: Ranker,
}

impl Recommender {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Weight, boost and sort `candidates` in place.
    ///
    /// Waits at most the configured timeout for the weights, starting from
    /// this call. The blacklist is loaded concurrently with that wait.
    /// Boosting and sorting run on the blocking pool.
    pub async fn recommend<T>(self, candidates: &mut Vec<T>)
    where
        T: Rankable + Send + Sync + 'static,
    {
        let start_time = Instant::now();
        let Recommender {
            pending,
            user_id,
            ranker,
        } = self;

        let (weights, blacklist) = tokio::join!(
            pending.wait(ranker.config.weight_timeout),
            ranker.load_blacklist()
        );

        match &weights {
            Some(weights) => {
                debug!("assigning weights...");
                let assigned = assign_weights(candidates, weights);
                info!(
                    user_id = %user_id,
                    assigned,
                    candidates = candidates.len(),
                    "weights assigned"
                );
            }
            None => debug!(user_id = %user_id, "unable to get weights"),
        }

        let blacklisted = blacklist.len();
        let boosts = Arc::clone(&ranker.boosts);
        let scoring_config = ranker.config.scoring.clone();
        let now = chrono::Utc::now().timestamp();
        let mut owned = std::mem::take(candidates);

        let ranked = tokio::task::spawn_blocking(move || {
            boosts.apply(&mut owned, &blacklist);
            scoring::sort_by_score(&mut owned, now, &scoring_config);
            owned
        })
        .await;

        match ranked {
            Ok(ranked) => *candidates = ranked,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => {
                // Only happens while the runtime shuts down
                error!(user_id = %user_id, err = %e, "ranking task cancelled");
                return;
            }
        }

        info!(
            user_id = %user_id,
            candidates = candidates.len(),
            weighted = weights.is_some(),
            blacklisted,
            "ranked candidates in {:.2?}",
            start_time.elapsed()
        );
    }
}

/// Write weights onto matching candidates. Returns how many matched.
pub fn assign_weights<T: Rankable>(candidates: &mut [T], weights: &Weights) -> usize {
    let mut assigned = 0;
    for candidate in candidates.iter_mut() {
        if let Some(weight) = weights.get(candidate.id()) {
            candidate.set_weight(*weight);
            assigned += 1;
        }
    }
    assigned
}
