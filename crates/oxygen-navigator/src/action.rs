//! Navigation actions
//!
//! One variant per control the view layer can offer. Payloads carry only
//! what the action needs.

use oxygen_domain::ClusterId;

/// A named user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Landing: start onboarding
    InitializeConnection,
    /// Onboarding: finish the walkthrough
    CompleteOnboarding,
    /// Onboarding: skip the walkthrough
    SkipOnboarding,
    /// Registration: create the identity
    SubmitRegistration {
        /// Chosen alias
        alias: String,
        /// Phone number or other contact route
        contact_route: String,
    },
    /// Registration: return to landing
    BackToLanding,
    /// Success: enter the dashboard
    ContinueToLobby,
    /// Open a cluster's detail screen
    ViewCluster(ClusterId),
    /// Dashboard: browse the marketplace
    JoinRandom,
    /// Dashboard: create a circle
    StartPledge,
    /// Cluster detail: make today's contribution
    JoinCluster,
    /// Contribution flow: payment went through
    ContributionSuccess,
    /// Cluster detail: open the activity log
    ViewActivity,
    /// Identity badge: open settings
    OpenSettings,
    /// Settings: replace alias and contact route
    UpdateProfile {
        /// New alias
        alias: String,
        /// New contact route
        contact_route: String,
    },
    /// Marketplace: join a listed cluster
    MarketplaceJoinCluster(ClusterId),
    /// Tap the logo (hidden trust hub gesture)
    LogoTap,
    /// Dashboard: open the trust engine directly
    OpenTrustHub,
    /// Loading screen reached 100%
    TrustHubLoadingComplete,
    /// Start pledge: the new circle was created
    PledgeUnitComplete(ClusterId),
    /// Dashboard or trust hub: open the vault
    OpenAutoInvestVault,
    /// Return to the screen that logically precedes this one
    Back,
}

impl Action {
    /// Stable action name for logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            Action::InitializeConnection => "initializeConnection",
            Action::CompleteOnboarding => "completeOnboarding",
            Action::SkipOnboarding => "skipOnboarding",
            Action::SubmitRegistration { .. } => "submitRegistration",
            Action::BackToLanding => "backToLanding",
            Action::ContinueToLobby => "continueToLobby",
            Action::ViewCluster(_) => "viewCluster",
            Action::JoinRandom => "joinRandom",
            Action::StartPledge => "startPledge",
            Action::JoinCluster => "joinCluster",
            Action::ContributionSuccess => "contributionSuccess",
            Action::ViewActivity => "viewActivity",
            Action::OpenSettings => "openSettings",
            Action::UpdateProfile { .. } => "updateProfile",
            Action::MarketplaceJoinCluster(_) => "marketplaceJoinCluster",
            Action::LogoTap => "logoTap",
            Action::OpenTrustHub => "openTrustHub",
            Action::TrustHubLoadingComplete => "trustHubLoadingComplete",
            Action::PledgeUnitComplete(_) => "pledgeUnitComplete",
            Action::OpenAutoInvestVault => "openAutoInvestVault",
            Action::Back => "back",
        }
    }
}
