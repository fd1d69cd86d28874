//! Oxygen Navigator
//!
//! The navigation and eligibility controller. Holds the single [`Session`],
//! applies named [`Action`]s to it, and drives the two timed behaviours the
//! screen flow has: the trust hub loading screen and payment detection.
//!
//! # Architecture
//!
//! - [`Navigator`] is the only writer of the session
//! - Every action has a precondition; unavailable actions change nothing
//! - Timers run on tokio and report back through callbacks or watch channels
//!
//! # Examples
//!
//! ```
//! use oxygen_navigator::{Action, Navigator, NavigatorConfig};
//! use oxygen_domain::Screen;
//!
//! let mut nav = Navigator::new(NavigatorConfig::default());
//! nav.dispatch(Action::InitializeConnection).unwrap();
//! nav.dispatch(Action::SkipOnboarding).unwrap();
//! nav.dispatch(Action::SubmitRegistration {
//!     alias: "Tech_Naija".into(),
//!     contact_route: "+2348012345678".into(),
//! })
//! .unwrap();
//! assert_eq!(nav.screen(), Screen::Success);
//! ```

#![warn(missing_docs)]

mod action;
mod clock;
pub mod config;
mod error;
pub mod loading;
mod navigator;
pub mod payment;
mod session;

pub use action::Action;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::NavigatorConfig;
pub use error::{ConfigError, NavigationError};
pub use loading::{LoadingFrame, LoadingPhase, LoadingProgress, LoadingSequence};
pub use navigator::Navigator;
pub use payment::{PaymentDetector, PaymentState};
pub use session::Session;
