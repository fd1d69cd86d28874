//! Screen module - the closed set of screens the application can show

use std::fmt;

/// The screen currently rendered
///
/// Exactly one screen is active at a time. A session always starts on
/// [`Screen::Landing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    /// Marketing page with the "initialize connection" entry point
    #[default]
    Landing,

    /// Intro slides
    Onboarding,

    /// Alias and contact route form
    Registration,

    /// Registration confirmation
    Success,

    /// The user's clusters, payouts and shortcuts
    Dashboard,

    /// A single cluster
    ClusterDetail,

    /// Daily contribution payment
    ContributionFlow,

    /// Contribution confirmation
    ContributionSuccess,

    /// Contribution history of the selected cluster
    ActivityLog,

    /// Profile and preferences
    Settings,

    /// Cluster marketplace
    JoinRandom,

    /// Circle-creation wizard
    StartPledge,

    /// Progress screen shown before the trust hub
    LoadingTrustHub,

    /// Trust and reputation hub
    TrustHub,

    /// Automated savings vault
    AutoInvestVault,
}

impl Screen {
    /// Every screen, in declaration order
    pub const ALL: [Screen; 15] = [
        Screen::Landing,
        Screen::Onboarding,
        Screen::Registration,
        Screen::Success,
        Screen::Dashboard,
        Screen::ClusterDetail,
        Screen::ContributionFlow,
        Screen::ContributionSuccess,
        Screen::ActivityLog,
        Screen::Settings,
        Screen::JoinRandom,
        Screen::StartPledge,
        Screen::LoadingTrustHub,
        Screen::TrustHub,
        Screen::AutoInvestVault,
    ];

    /// Get the screen name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Landing => "landing",
            Screen::Onboarding => "onboarding",
            Screen::Registration => "registration",
            Screen::Success => "success",
            Screen::Dashboard => "dashboard",
            Screen::ClusterDetail => "clusterDetail",
            Screen::ContributionFlow => "contributionFlow",
            Screen::ContributionSuccess => "contributionSuccess",
            Screen::ActivityLog => "activityLog",
            Screen::Settings => "settings",
            Screen::JoinRandom => "joinRandom",
            Screen::StartPledge => "startPledge",
            Screen::LoadingTrustHub => "loadingTrustHub",
            Screen::TrustHub => "trustHub",
            Screen::AutoInvestVault => "autoInvestVault",
        }
    }

    /// Parse a screen from its name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|screen| screen.as_str().eq_ignore_ascii_case(s))
    }

    /// Whether the persistent top navigation bar is drawn on this screen
    pub fn shows_navigation(&self) -> bool {
        !matches!(
            self,
            Screen::Onboarding | Screen::LoadingTrustHub | Screen::TrustHub | Screen::StartPledge
        )
    }

    /// Screens that show the identity badge once a user has registered
    pub fn is_authenticated_area(&self) -> bool {
        matches!(
            self,
            Screen::Dashboard
                | Screen::ClusterDetail
                | Screen::ContributionFlow
                | Screen::ContributionSuccess
                | Screen::ActivityLog
                | Screen::Settings
                | Screen::JoinRandom
        )
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid screen: {}", s))
    }
}

/// Contents of the top navigation bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavBar {
    /// No bar at all
    Hidden,

    /// Logo plus the public links shown on the landing page
    AuthLinks,

    /// Logo plus the registered user's badge
    IdentityBadge {
        /// First character of the alias, uppercased
        alias_initial: char,
        /// Whether the settings shortcut is offered
        settings_shortcut: bool,
    },

    /// Logo only
    LogoOnly,
}

impl NavBar {
    /// Compute the bar for a screen, given the registered alias (if any)
    pub fn for_screen(screen: Screen, alias: Option<&str>) -> Self {
        if !screen.shows_navigation() {
            return NavBar::Hidden;
        }

        if screen == Screen::Landing {
            return NavBar::AuthLinks;
        }

        match alias {
            Some(alias) if screen.is_authenticated_area() => NavBar::IdentityBadge {
                alias_initial: alias
                    .chars()
                    .next()
                    .map(|c| c.to_uppercase().next().unwrap_or(c))
                    .unwrap_or('?'),
                settings_shortcut: screen != Screen::Settings,
            },
            _ => NavBar::LogoOnly,
        }
    }

    /// Whether the logo (and so the hidden tap gesture) is reachable
    pub fn has_logo(&self) -> bool {
        !matches!(self, NavBar::Hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_landing() {
        assert_eq!(Screen::default(), Screen::Landing);
    }

    #[test]
    fn test_name_roundtrip() {
        for screen in Screen::ALL {
            assert_eq!(Screen::parse(screen.as_str()), Some(screen));
        }
        assert_eq!(Screen::parse("CLUSTERDETAIL"), Some(Screen::ClusterDetail));
        assert!("nowhere".parse::<Screen>().is_err());
    }

    #[test]
    fn test_navigation_suppressed_exactly_on_four_screens() {
        let hidden: Vec<Screen> = Screen::ALL
            .iter()
            .copied()
            .filter(|s| !s.shows_navigation())
            .collect();
        assert_eq!(
            hidden,
            vec![
                Screen::Onboarding,
                Screen::StartPledge,
                Screen::LoadingTrustHub,
                Screen::TrustHub,
            ]
        );
    }

    #[test]
    fn test_nav_bar_contents() {
        assert_eq!(NavBar::for_screen(Screen::Landing, None), NavBar::AuthLinks);
        assert_eq!(NavBar::for_screen(Screen::TrustHub, Some("x")), NavBar::Hidden);
        assert_eq!(NavBar::for_screen(Screen::Dashboard, None), NavBar::LogoOnly);
        assert_eq!(NavBar::for_screen(Screen::Success, Some("tech")), NavBar::LogoOnly);
        assert_eq!(
            NavBar::for_screen(Screen::Dashboard, Some("tech_Naija")),
            NavBar::IdentityBadge {
                alias_initial: 'T',
                settings_shortcut: true
            }
        );
        assert_eq!(
            NavBar::for_screen(Screen::Settings, Some("tech_Naija")),
            NavBar::IdentityBadge {
                alias_initial: 'T',
                settings_shortcut: false
            }
        );
    }
}
