//! Application composition root.
//!
//! [`App`] owns the navigator, the fixture store and the gatekeeper. Actions
//! whose outcome depends on eligibility are checked here before they reach
//! the navigator.

use crate::error::{CliError, Result};
use oxygen_domain::traits::{ClusterRepository, TrustSource};
use oxygen_domain::{Cluster, ClusterId, FeatureUnlock, PledgeDraft, Screen, TrustScore};
use oxygen_gatekeeper::{
    AccessDecision, Gatekeeper, JoinContext, ListingEntry, MarketplaceQuery, PledgeValidation,
};
use oxygen_navigator::{
    Action, LoadingFrame, LoadingSequence, Navigator, NavigatorConfig, PaymentDetector,
    PaymentState,
};
use oxygen_store::FixtureStore;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Load fixture data, applying an optional trust score override.
pub fn load_store(fixtures: Option<&Path>, trust_score: Option<u8>) -> Result<FixtureStore> {
    let store = match fixtures {
        Some(path) => FixtureStore::from_file(path)?,
        None => FixtureStore::seeded()?,
    };

    Ok(match trust_score {
        Some(score) => store.with_trust_score(TrustScore::new(score)),
        None => store,
    })
}

/// Load navigator settings from an optional TOML file.
pub fn load_navigator_config(path: Option<&Path>, fast: bool) -> Result<NavigatorConfig> {
    let config = match path {
        Some(path) => NavigatorConfig::from_file(path)?,
        None if fast => NavigatorConfig::fast(),
        None => NavigatorConfig::default(),
    };
    Ok(config)
}

/// One interactive session.
#[derive(Debug)]
pub struct App {
    navigator: Navigator,
    store: FixtureStore,
    gatekeeper: Gatekeeper,
    query: MarketplaceQuery,
    amounts_visible: bool,
}

impl App {
    /// Create an app on the landing screen with the store's trust score.
    pub fn new(store: FixtureStore, config: NavigatorConfig) -> Result<Self> {
        let mut navigator = Navigator::new(config);
        navigator.refresh_trust_score(&store)?;

        Ok(Self {
            navigator,
            store,
            gatekeeper: Gatekeeper::default(),
            query: MarketplaceQuery::default(),
            amounts_visible: true,
        })
    }

    /// The navigation controller.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// The fixture store.
    pub fn store(&self) -> &FixtureStore {
        &self.store
    }

    /// The gatekeeper.
    pub fn gatekeeper(&self) -> &Gatekeeper {
        &self.gatekeeper
    }

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.navigator.screen()
    }

    /// Trust score every rule reads.
    pub fn trust_score(&self) -> TrustScore {
        self.navigator.session().trust_score()
    }

    /// Whether amounts are shown or masked.
    pub fn amounts_visible(&self) -> bool {
        self.amounts_visible
    }

    /// Flip amount masking; returns the new visibility.
    pub fn toggle_amounts(&mut self) -> bool {
        self.amounts_visible = !self.amounts_visible;
        self.amounts_visible
    }

    /// Marketplace query used for the join-random screen.
    pub fn query(&self) -> &MarketplaceQuery {
        &self.query
    }

    /// Replace the marketplace query.
    pub fn set_query(&mut self, query: MarketplaceQuery) {
        self.query = query;
    }

    /// Score and active cluster count for join decisions.
    pub fn join_context(&self) -> Result<JoinContext> {
        Ok(JoinContext::new(
            self.trust_score(),
            self.store.active_cluster_count()?,
        ))
    }

    /// Marketplace listing for the current query.
    pub fn listing(&self) -> Result<Vec<ListingEntry>> {
        let ctx = self.join_context()?;
        Ok(self.gatekeeper.marketplace(&self.store, &self.query, &ctx)?)
    }

    /// Vault access at the current score.
    pub fn vault_access(&self) -> AccessDecision {
        self.gatekeeper.vault_access(self.trust_score())
    }

    /// Circle creation access at the current score.
    pub fn coordinator_access(&self) -> AccessDecision {
        self.gatekeeper.coordinator_access(self.trust_score())
    }

    /// The selected cluster, if it is listed in the marketplace.
    pub fn selected_cluster(&self) -> Result<Option<Cluster>> {
        let id = self.navigator.session().selected_cluster_id();
        if id.is_empty() {
            return Ok(None);
        }
        Ok(self.store.get_cluster(id)?)
    }

    /// Apply an action that needs no eligibility check.
    pub fn dispatch(&mut self, action: Action) -> Result<Screen> {
        Ok(self.navigator.dispatch(action)?)
    }

    /// Open a cluster the store knows about.
    pub fn view_cluster(&mut self, id: &str) -> Result<Screen> {
        let id = ClusterId::new(id);
        if !self.knows_cluster(&id)? {
            return Err(CliError::InvalidInput(format!("Unknown cluster: {}", id)));
        }
        self.dispatch(Action::ViewCluster(id))
    }

    /// Join a marketplace cluster if the gatekeeper allows it.
    pub fn marketplace_join(&mut self, id: &str) -> Result<Screen> {
        let id = ClusterId::new(id);
        let action = Action::MarketplaceJoinCluster(id.clone());
        if !self.navigator.is_available(&action) {
            return self.dispatch(action);
        }

        let cluster = self
            .store
            .get_cluster(&id)?
            .ok_or_else(|| CliError::InvalidInput(format!("Unknown cluster: {}", id)))?;

        let decision = self.gatekeeper.evaluate_join(&cluster, &self.join_context()?);
        if !decision.is_allowed() {
            tracing::info!(cluster = %id, reason = %decision.label(), "join blocked");
            return Err(CliError::NotPermitted(decision.label()));
        }

        self.dispatch(action)
    }

    /// Validate a pledge draft at the current score.
    pub fn validate_pledge(&self, draft: &PledgeDraft) -> PledgeValidation {
        self.gatekeeper.validate_pledge(draft, self.trust_score())
    }

    /// Launch a new circle from the pledge wizard.
    ///
    /// Returns the new cluster's id; the session moves to its detail screen.
    pub fn launch_pledge(&mut self, draft: &PledgeDraft) -> Result<ClusterId> {
        if self.screen() != Screen::StartPledge {
            return Err(CliError::InvalidInput(
                "Open the pledge wizard first ('pledge' from the dashboard)".to_string(),
            ));
        }

        let validation = self.validate_pledge(draft);
        if !validation.is_ready() {
            let reasons: Vec<String> = validation.reasons.iter().map(|r| r.to_string()).collect();
            return Err(CliError::NotPermitted(reasons.join("; ")));
        }

        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        let id = ClusterId::from_seed(seed);

        tracing::info!(cluster = %id, alias = %draft.alias, "circle launched");
        self.dispatch(Action::PledgeUnitComplete(id.clone()))?;
        Ok(id)
    }

    /// Open the trust hub from the dashboard and run its loading screen.
    pub async fn open_trust_hub<F>(&mut self, on_frame: F) -> Result<Screen>
    where
        F: FnMut(&LoadingFrame),
    {
        self.dispatch(Action::OpenTrustHub)?;
        self.finish_loading(on_frame).await
    }

    /// Tap the logo; runs the loading screen when the gesture completes.
    pub async fn tap_logo<F>(&mut self, on_frame: F) -> Result<Screen>
    where
        F: FnMut(&LoadingFrame),
    {
        let screen = self.dispatch(Action::LogoTap)?;
        if screen == Screen::LoadingTrustHub {
            return self.finish_loading(on_frame).await;
        }
        Ok(screen)
    }

    async fn finish_loading<F>(&mut self, on_frame: F) -> Result<Screen>
    where
        F: FnMut(&LoadingFrame),
    {
        let sequence = LoadingSequence::new(&self.navigator.config().loading);
        let navigator = &mut self.navigator;
        let screen = sequence
            .run(on_frame, || navigator.dispatch(Action::TrustHubLoadingComplete))
            .await?;
        Ok(screen)
    }

    /// Make today's contribution to the selected cluster.
    ///
    /// Confirms payment, waits for detection, then shows the success screen.
    pub async fn commit<F>(&mut self, mut on_state: F) -> Result<Screen>
    where
        F: FnMut(PaymentState),
    {
        self.dispatch(Action::JoinCluster)?;

        let payment = self.navigator.config().payment.clone();
        let detector = PaymentDetector::new(&payment);
        detector.confirm()?;
        on_state(detector.state());

        let state = detector.wait_detected().await;
        on_state(state);

        tokio::time::sleep(payment.success_delay()).await;
        self.dispatch(Action::ContributionSuccess)
    }

    fn knows_cluster(&self, id: &ClusterId) -> Result<bool> {
        if self.store.get_cluster(id)?.is_some() {
            return Ok(true);
        }
        Ok(self.store.memberships()?.iter().any(|m| &m.cluster_id == id))
    }

    /// Re-read the trust score from the store.
    pub fn refresh_trust_score(&mut self) -> Result<TrustScore> {
        Ok(self.navigator.refresh_trust_score(&self.store)?)
    }

    /// Feature unlocks from the store.
    pub fn feature_unlocks(&self) -> Result<Vec<FeatureUnlock>> {
        Ok(self.store.feature_unlocks()?)
    }
}
