//! End-to-end screen flows through the navigator

use oxygen_domain::{ClusterId, NavBar, Screen, TrustScore};
use oxygen_navigator::{Action, ManualClock, NavigationError, Navigator, NavigatorConfig};
use oxygen_store::FixtureStore;

fn navigator() -> (Navigator<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    (
        Navigator::with_clock(NavigatorConfig::default(), clock.clone()),
        clock,
    )
}

fn to_dashboard(nav: &mut Navigator<ManualClock>) {
    nav.dispatch(Action::InitializeConnection).unwrap();
    nav.dispatch(Action::CompleteOnboarding).unwrap();
    nav.dispatch(Action::SubmitRegistration {
        alias: "Tech_Naija".to_string(),
        contact_route: "+2348012345678".to_string(),
    })
    .unwrap();
    nav.dispatch(Action::ContinueToLobby).unwrap();
}

#[test]
fn test_registration_flow() {
    let (mut nav, _) = navigator();
    assert_eq!(nav.screen(), Screen::Landing);

    assert_eq!(nav.dispatch(Action::InitializeConnection).unwrap(), Screen::Onboarding);
    assert_eq!(nav.dispatch(Action::CompleteOnboarding).unwrap(), Screen::Registration);
    assert_eq!(
        nav.dispatch(Action::SubmitRegistration {
            alias: "Tech_Naija".to_string(),
            contact_route: "+2348012345678".to_string(),
        })
        .unwrap(),
        Screen::Success
    );

    let identity = nav.session().identity().unwrap();
    assert_eq!(identity.alias, "Tech_Naija");
    assert_eq!(identity.contact_route, "+2348012345678");

    assert_eq!(nav.dispatch(Action::ContinueToLobby).unwrap(), Screen::Dashboard);
    assert_eq!(
        nav.nav_bar(),
        NavBar::IdentityBadge {
            alias_initial: 'T',
            settings_shortcut: true
        }
    );
}

#[test]
fn test_registration_back_to_landing() {
    let (mut nav, _) = navigator();
    nav.dispatch(Action::InitializeConnection).unwrap();
    nav.dispatch(Action::SkipOnboarding).unwrap();
    assert_eq!(nav.back_target(), Some(Screen::Landing));
    nav.dispatch(Action::BackToLanding).unwrap();
    assert_eq!(nav.screen(), Screen::Landing);
    assert!(nav.session().identity().is_none());
}

#[test]
fn test_contribution_flow() {
    let (mut nav, _) = navigator();
    to_dashboard(&mut nav);

    nav.dispatch(Action::ViewCluster(ClusterId::new("0x7B91"))).unwrap();
    assert_eq!(nav.session().selected_cluster_id().as_str(), "0x7B91");

    nav.dispatch(Action::JoinCluster).unwrap();
    assert_eq!(nav.screen(), Screen::ContributionFlow);
    nav.dispatch(Action::Back).unwrap();
    assert_eq!(nav.screen(), Screen::ClusterDetail);

    nav.dispatch(Action::JoinCluster).unwrap();
    nav.dispatch(Action::ContributionSuccess).unwrap();
    assert_eq!(nav.screen(), Screen::ContributionSuccess);
    nav.dispatch(Action::Back).unwrap();
    assert_eq!(nav.screen(), Screen::Dashboard);
}

#[test]
fn test_marketplace_join_selects_cluster() {
    let (mut nav, _) = navigator();
    to_dashboard(&mut nav);

    nav.dispatch(Action::JoinRandom).unwrap();
    assert_eq!(nav.screen(), Screen::JoinRandom);
    nav.dispatch(Action::MarketplaceJoinCluster(ClusterId::new("0xF4D2"))).unwrap();

    assert_eq!(nav.screen(), Screen::ClusterDetail);
    assert_eq!(nav.session().selected_cluster_id().as_str(), "0xF4D2");
    nav.dispatch(Action::Back).unwrap();
    assert_eq!(nav.screen(), Screen::Dashboard);
}

#[test]
fn test_pledge_completion_opens_new_cluster() {
    let (mut nav, _) = navigator();
    to_dashboard(&mut nav);

    nav.dispatch(Action::StartPledge).unwrap();
    assert_eq!(nav.nav_bar(), NavBar::Hidden);
    let id = ClusterId::from_seed(0xBEEF);
    nav.dispatch(Action::PledgeUnitComplete(id.clone())).unwrap();

    assert_eq!(nav.screen(), Screen::ClusterDetail);
    assert_eq!(nav.session().selected_cluster_id(), &id);
}

#[test]
fn test_trust_hub_and_vault() {
    let (mut nav, _) = navigator();
    to_dashboard(&mut nav);

    nav.dispatch(Action::OpenTrustHub).unwrap();
    assert_eq!(nav.screen(), Screen::LoadingTrustHub);
    assert!(!nav.is_available(&Action::Back));

    nav.dispatch(Action::TrustHubLoadingComplete).unwrap();
    assert_eq!(nav.screen(), Screen::TrustHub);

    nav.dispatch(Action::OpenAutoInvestVault).unwrap();
    assert_eq!(nav.screen(), Screen::AutoInvestVault);
    nav.dispatch(Action::Back).unwrap();
    assert_eq!(nav.screen(), Screen::Dashboard);
}

#[test]
fn test_tap_gesture_counts() {
    let (mut nav, clock) = navigator();
    to_dashboard(&mut nav);

    let mut counts = Vec::new();
    for t in [0, 500, 900, 4000] {
        clock.set(t);
        nav.dispatch(Action::LogoTap).unwrap();
        counts.push(nav.session().logo_tap_count());
    }
    assert_eq!(counts, vec![1, 2, 3, 1]);
}

#[test]
fn test_tap_gesture_measures_gap_from_previous_tap() {
    let (mut nav, clock) = navigator();
    to_dashboard(&mut nav);

    let mut counts = Vec::new();
    for t in [0, 500, 900, 3500] {
        clock.set(t);
        nav.dispatch(Action::LogoTap).unwrap();
        counts.push(nav.session().logo_tap_count());
    }
    assert_eq!(counts, vec![1, 2, 3, 4]);
}

#[test]
fn test_tap_gesture_unlocks_trust_hub() {
    let (mut nav, clock) = navigator();
    to_dashboard(&mut nav);

    for i in 0..4 {
        clock.set(i * 1000);
        nav.dispatch(Action::LogoTap).unwrap();
        assert_eq!(nav.screen(), Screen::Dashboard);
    }
    clock.set(4000);
    nav.dispatch(Action::LogoTap).unwrap();

    assert_eq!(nav.screen(), Screen::LoadingTrustHub);
    assert_eq!(nav.session().logo_tap_count(), 0);
}

#[test]
fn test_unavailable_action_leaves_session_untouched() {
    let (mut nav, _) = navigator();
    to_dashboard(&mut nav);
    let before = nav.session().clone();

    let rejected = [
        Action::InitializeConnection,
        Action::ContinueToLobby,
        Action::JoinCluster,
        Action::ViewActivity,
        Action::ContributionSuccess,
        Action::TrustHubLoadingComplete,
        Action::MarketplaceJoinCluster(ClusterId::new("0xF4D2")),
        Action::PledgeUnitComplete(ClusterId::new("0x1")),
        Action::ViewCluster(ClusterId::new("")),
        Action::Back,
    ];

    for action in rejected {
        let name = action.name();
        match nav.dispatch(action) {
            Err(NavigationError::Unavailable { action, screen }) => {
                assert_eq!(action, name);
                assert_eq!(screen, Screen::Dashboard);
            }
            other => panic!("{} should be unavailable, got {:?}", name, other),
        }
        assert_eq!(nav.session(), &before);
    }
}

#[test]
fn test_trust_score_refreshed_from_source() {
    let (mut nav, _) = navigator();
    let store = FixtureStore::seeded()
        .unwrap()
        .with_trust_score(TrustScore::new(15));

    let score = nav.refresh_trust_score(&store).unwrap();
    assert_eq!(score.value(), 15);
    assert_eq!(nav.session().trust_score().value(), 15);
}
