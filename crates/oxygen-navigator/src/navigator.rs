//! The navigation controller
//!
//! Owns the [`Session`] and applies [`Action`]s to it. Every action has a
//! precondition checked by [`Navigator::is_available`]; an action whose
//! precondition fails leaves the session untouched.

use crate::clock::{Clock, SystemClock};
use crate::{Action, NavigationError, NavigatorConfig, Session};
use oxygen_domain::traits::TrustSource;
use oxygen_domain::{ClusterId, Identity, NavBar, Screen, TrustScore};

/// Actions without a payload, in the order a menu would list them
const PLAIN_ACTIONS: [Action; 15] = [
    Action::InitializeConnection,
    Action::CompleteOnboarding,
    Action::SkipOnboarding,
    Action::BackToLanding,
    Action::ContinueToLobby,
    Action::JoinRandom,
    Action::StartPledge,
    Action::JoinCluster,
    Action::ContributionSuccess,
    Action::ViewActivity,
    Action::OpenSettings,
    Action::OpenTrustHub,
    Action::TrustHubLoadingComplete,
    Action::OpenAutoInvestVault,
    Action::Back,
];

/// Navigation & eligibility controller
///
/// # Examples
///
/// ```
/// use oxygen_navigator::{Action, Navigator, NavigatorConfig};
/// use oxygen_domain::Screen;
///
/// let mut nav = Navigator::new(NavigatorConfig::default());
/// assert_eq!(nav.screen(), Screen::Landing);
///
/// nav.dispatch(Action::InitializeConnection).unwrap();
/// assert_eq!(nav.screen(), Screen::Onboarding);
///
/// // Not offered on onboarding; nothing changes
/// assert!(nav.dispatch(Action::ContinueToLobby).is_err());
/// assert_eq!(nav.screen(), Screen::Onboarding);
/// ```
#[derive(Debug)]
pub struct Navigator<C = SystemClock> {
    session: Session,
    config: NavigatorConfig,
    clock: C,
}

impl Navigator<SystemClock> {
    /// Create a navigator reading the system clock
    pub fn new(config: NavigatorConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> Navigator<C> {
    /// Create a navigator with a custom clock
    pub fn with_clock(config: NavigatorConfig, clock: C) -> Self {
        Self {
            session: Session::new(config.seed_trust_score()),
            config,
            clock,
        }
    }

    /// Read-only view of the session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current screen
    pub fn screen(&self) -> Screen {
        self.session.screen
    }

    /// Configuration in use
    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Top navigation bar for the current screen
    pub fn nav_bar(&self) -> NavBar {
        NavBar::for_screen(
            self.session.screen,
            self.session.identity.as_ref().map(|i| i.alias.as_str()),
        )
    }

    /// Whether `action` may be invoked right now
    ///
    /// The view layer disables every control whose action is unavailable.
    pub fn is_available(&self, action: &Action) -> bool {
        let screen = self.session.screen;
        let has_identity = self.session.identity.is_some();

        match action {
            Action::InitializeConnection => screen == Screen::Landing,
            Action::CompleteOnboarding | Action::SkipOnboarding => screen == Screen::Onboarding,
            Action::SubmitRegistration { alias, .. } => {
                screen == Screen::Registration && Identity::is_valid_alias(alias)
            }
            Action::BackToLanding => screen == Screen::Registration,
            Action::ContinueToLobby => screen == Screen::Success,
            Action::ViewCluster(id) => !id.is_empty(),
            Action::JoinRandom | Action::StartPledge => screen == Screen::Dashboard,
            Action::JoinCluster | Action::ViewActivity => screen == Screen::ClusterDetail,
            Action::ContributionSuccess => screen == Screen::ContributionFlow,
            Action::OpenSettings => matches!(
                self.nav_bar(),
                NavBar::IdentityBadge {
                    settings_shortcut: true,
                    ..
                }
            ),
            Action::UpdateProfile { alias, .. } => has_identity && Identity::is_valid_alias(alias),
            Action::MarketplaceJoinCluster(id) => screen == Screen::JoinRandom && !id.is_empty(),
            Action::LogoTap => self.nav_bar().has_logo(),
            Action::OpenTrustHub => screen == Screen::Dashboard && has_identity,
            Action::TrustHubLoadingComplete => screen == Screen::LoadingTrustHub,
            Action::PledgeUnitComplete(id) => screen == Screen::StartPledge && !id.is_empty(),
            Action::OpenAutoInvestVault => {
                matches!(screen, Screen::Dashboard | Screen::TrustHub)
            }
            Action::Back => self.back_target().is_some(),
        }
    }

    /// Payload-free actions available on the current screen
    pub fn available_actions(&self) -> Vec<Action> {
        PLAIN_ACTIONS
            .iter()
            .filter(|a| self.is_available(a))
            .cloned()
            .collect()
    }

    /// Where [`Action::Back`] leads from the current screen
    pub fn back_target(&self) -> Option<Screen> {
        match self.session.screen {
            Screen::Registration => Some(Screen::Landing),
            Screen::ClusterDetail => match self.session.cluster_opened_from {
                Some(Screen::Settings) => Some(Screen::Settings),
                _ => Some(Screen::Dashboard),
            },
            Screen::ContributionFlow | Screen::ActivityLog => Some(Screen::ClusterDetail),
            Screen::ContributionSuccess
            | Screen::Settings
            | Screen::JoinRandom
            | Screen::StartPledge
            | Screen::TrustHub
            | Screen::AutoInvestVault => Some(Screen::Dashboard),
            Screen::Landing
            | Screen::Onboarding
            | Screen::Success
            | Screen::Dashboard
            | Screen::LoadingTrustHub => None,
        }
    }

    /// Apply `action` and return the resulting screen
    ///
    /// # Errors
    ///
    /// [`NavigationError::Unavailable`] when the precondition fails. The
    /// session is not modified in that case.
    pub fn dispatch(&mut self, action: Action) -> Result<Screen, NavigationError> {
        let from = self.session.screen;
        let name = action.name();

        if !self.is_available(&action) {
            tracing::warn!(action = name, screen = %from, "action unavailable");
            return Err(NavigationError::Unavailable { action: name, screen: from });
        }

        match action {
            Action::InitializeConnection => self.go(Screen::Onboarding),
            Action::CompleteOnboarding | Action::SkipOnboarding => self.go(Screen::Registration),
            Action::SubmitRegistration {
                alias,
                contact_route,
            } => {
                self.set_identity(alias, contact_route, name)?;
                self.go(Screen::Success);
            }
            Action::BackToLanding => self.go(Screen::Landing),
            Action::ContinueToLobby => self.go(Screen::Dashboard),
            Action::ViewCluster(id)
            | Action::MarketplaceJoinCluster(id)
            | Action::PledgeUnitComplete(id) => {
                self.select_cluster(id, from);
                self.go(Screen::ClusterDetail);
            }
            Action::JoinRandom => self.go(Screen::JoinRandom),
            Action::StartPledge => self.go(Screen::StartPledge),
            Action::JoinCluster => self.go(Screen::ContributionFlow),
            Action::ContributionSuccess => self.go(Screen::ContributionSuccess),
            Action::ViewActivity => self.go(Screen::ActivityLog),
            Action::OpenSettings => self.go(Screen::Settings),
            Action::UpdateProfile {
                alias,
                contact_route,
            } => self.set_identity(alias, contact_route, name)?,
            Action::LogoTap => self.register_tap(),
            Action::OpenTrustHub => self.go(Screen::LoadingTrustHub),
            Action::TrustHubLoadingComplete => self.go(Screen::TrustHub),
            Action::OpenAutoInvestVault => self.go(Screen::AutoInvestVault),
            Action::Back => {
                if let Some(target) = self.back_target() {
                    self.go(target);
                }
            }
        }

        tracing::debug!(action = name, from = %from, to = %self.session.screen, "dispatched");
        Ok(self.session.screen)
    }

    /// Re-read the trust score from its source
    ///
    /// The only write path for the score. Eligibility reads the new value
    /// from the next action on.
    pub fn refresh_trust_score<T>(&mut self, source: &T) -> Result<TrustScore, NavigationError>
    where
        T: TrustSource,
        T::Error: std::fmt::Display,
    {
        let score = source
            .trust_score()
            .map_err(|e| NavigationError::TrustSource(e.to_string()))?;

        if score != self.session.trust_score {
            tracing::info!(
                from = self.session.trust_score.value(),
                to = score.value(),
                "trust score updated"
            );
        }
        self.session.trust_score = score;
        Ok(score)
    }

    fn go(&mut self, screen: Screen) {
        self.session.screen = screen;
    }

    fn select_cluster(&mut self, id: ClusterId, from: Screen) {
        self.session.selected_cluster_id = id;
        self.session.cluster_opened_from = Some(from);
    }

    fn set_identity(
        &mut self,
        alias: String,
        contact_route: String,
        action: &'static str,
    ) -> Result<(), NavigationError> {
        let identity = Identity::new(alias, contact_route).ok_or(NavigationError::Unavailable {
            action,
            screen: self.session.screen,
        })?;

        match &self.session.identity {
            None => tracing::info!(alias = %identity.alias, "identity registered"),
            Some(_) => tracing::info!(alias = %identity.alias, "profile updated"),
        }
        self.session.identity = Some(identity);
        Ok(())
    }

    /// Debounced tap counter
    ///
    /// A gap longer than the tap window starts a new gesture at 1. Reaching
    /// the threshold with an identity opens the trust hub loader and clears
    /// the count.
    fn register_tap(&mut self) {
        let now = self.clock.now_ms();
        let within_window = self
            .session
            .last_tap_ms
            .is_some_and(|last| now.saturating_sub(last) <= self.config.tap_window_ms);

        self.session.logo_tap_count = if within_window {
            self.session.logo_tap_count.saturating_add(1)
        } else {
            1
        };
        self.session.last_tap_ms = Some(now);

        if self.session.logo_tap_count >= self.config.tap_threshold
            && self.session.identity.is_some()
        {
            tracing::info!(taps = self.session.logo_tap_count, "trust hub unlocked by logo taps");
            self.session.logo_tap_count = 0;
            self.go(Screen::LoadingTrustHub);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManualClock;

    fn navigator() -> (Navigator<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let nav = Navigator::with_clock(NavigatorConfig::default(), clock.clone());
        (nav, clock)
    }

    fn registered() -> (Navigator<ManualClock>, ManualClock) {
        let (mut nav, clock) = navigator();
        nav.dispatch(Action::InitializeConnection).unwrap();
        nav.dispatch(Action::SkipOnboarding).unwrap();
        nav.dispatch(Action::SubmitRegistration {
            alias: "Tech_Naija".to_string(),
            contact_route: "+2348012345678".to_string(),
        })
        .unwrap();
        nav.dispatch(Action::ContinueToLobby).unwrap();
        (nav, clock)
    }

    #[test]
    fn test_initial_session() {
        let (nav, _) = navigator();
        assert_eq!(nav.screen(), Screen::Landing);
        assert!(nav.session().identity().is_none());
        assert!(nav.session().selected_cluster_id().is_empty());
        assert_eq!(nav.session().trust_score().value(), 45);
        assert_eq!(nav.nav_bar(), NavBar::AuthLinks);
    }

    #[test]
    fn test_blank_alias_not_submittable() {
        let (mut nav, _) = navigator();
        nav.dispatch(Action::InitializeConnection).unwrap();
        nav.dispatch(Action::CompleteOnboarding).unwrap();

        let before = nav.session().clone();
        let result = nav.dispatch(Action::SubmitRegistration {
            alias: "   ".to_string(),
            contact_route: "+234".to_string(),
        });

        assert!(matches!(result, Err(NavigationError::Unavailable { .. })));
        assert_eq!(nav.session(), &before);
    }

    #[test]
    fn test_update_profile_keeps_screen() {
        let (mut nav, _) = registered();
        nav.dispatch(Action::OpenSettings).unwrap();
        nav.dispatch(Action::UpdateProfile {
            alias: "NaijaDev".to_string(),
            contact_route: "+2349000000000".to_string(),
        })
        .unwrap();

        assert_eq!(nav.screen(), Screen::Settings);
        let identity = nav.session().identity().unwrap();
        assert_eq!(identity.alias, "NaijaDev");
        assert_eq!(identity.contact_route, "+2349000000000");
    }

    #[test]
    fn test_update_profile_needs_identity() {
        let (nav, _) = navigator();
        assert!(!nav.is_available(&Action::UpdateProfile {
            alias: "x".to_string(),
            contact_route: String::new(),
        }));
    }

    #[test]
    fn test_back_from_cluster_opened_in_settings() {
        let (mut nav, _) = registered();
        nav.dispatch(Action::OpenSettings).unwrap();
        nav.dispatch(Action::ViewCluster(ClusterId::new("0xA43F"))).unwrap();
        assert_eq!(nav.session().cluster_opened_from(), Some(Screen::Settings));

        nav.dispatch(Action::ViewActivity).unwrap();
        nav.dispatch(Action::Back).unwrap();
        assert_eq!(nav.screen(), Screen::ClusterDetail);
        nav.dispatch(Action::Back).unwrap();
        assert_eq!(nav.screen(), Screen::Settings);
    }

    #[test]
    fn test_back_unavailable_on_dashboard() {
        let (mut nav, _) = registered();
        assert_eq!(nav.back_target(), None);
        assert!(nav.dispatch(Action::Back).is_err());
        assert_eq!(nav.screen(), Screen::Dashboard);
    }

    #[test]
    fn test_settings_shortcut_hidden_on_settings() {
        let (mut nav, _) = registered();
        assert!(nav.is_available(&Action::OpenSettings));
        nav.dispatch(Action::OpenSettings).unwrap();
        assert!(!nav.is_available(&Action::OpenSettings));
        assert_eq!(
            nav.nav_bar(),
            NavBar::IdentityBadge {
                alias_initial: 'T',
                settings_shortcut: false
            }
        );
    }

    #[test]
    fn test_tap_reset_after_gap() {
        let (mut nav, clock) = registered();
        for (t, expected) in [(0, 1), (500, 2), (900, 3), (4000, 1)] {
            clock.set(t);
            nav.dispatch(Action::LogoTap).unwrap();
            assert_eq!(nav.session().logo_tap_count(), expected, "tap at {}ms", t);
        }
        assert_eq!(nav.screen(), Screen::Dashboard);
    }

    #[test]
    fn test_tap_at_3500ms_continues_gesture() {
        let (mut nav, clock) = registered();
        for (t, expected) in [(0, 1), (500, 2), (900, 3), (3500, 4)] {
            clock.set(t);
            nav.dispatch(Action::LogoTap).unwrap();
            assert_eq!(nav.session().logo_tap_count(), expected, "tap at {}ms", t);
        }
        assert_eq!(nav.screen(), Screen::Dashboard);
    }

    #[test]
    fn test_gap_of_exactly_window_continues_gesture() {
        let (mut nav, clock) = registered();
        nav.dispatch(Action::LogoTap).unwrap();
        clock.advance(3000);
        nav.dispatch(Action::LogoTap).unwrap();
        assert_eq!(nav.session().logo_tap_count(), 2);
        clock.advance(3001);
        nav.dispatch(Action::LogoTap).unwrap();
        assert_eq!(nav.session().logo_tap_count(), 1);
    }

    #[test]
    fn test_five_taps_open_trust_hub() {
        let (mut nav, clock) = registered();
        for i in 0..5 {
            clock.set(i * 900);
            nav.dispatch(Action::LogoTap).unwrap();
        }
        assert_eq!(nav.screen(), Screen::LoadingTrustHub);
        assert_eq!(nav.session().logo_tap_count(), 0);
        assert_eq!(nav.nav_bar(), NavBar::Hidden);
        assert!(!nav.is_available(&Action::LogoTap));
    }

    #[test]
    fn test_taps_without_identity_never_unlock() {
        let (mut nav, clock) = navigator();
        for i in 0..7 {
            clock.set(i * 100);
            nav.dispatch(Action::LogoTap).unwrap();
        }
        assert_eq!(nav.screen(), Screen::Landing);
        assert_eq!(nav.session().logo_tap_count(), 7);
    }

    #[test]
    fn test_available_actions_on_dashboard() {
        let (nav, _) = registered();
        let names: Vec<&str> = nav.available_actions().iter().map(|a| a.name()).collect();
        assert_eq!(
            names,
            vec!["joinRandom", "startPledge", "openSettings", "openTrustHub", "openAutoInvestVault"]
        );
    }
}
