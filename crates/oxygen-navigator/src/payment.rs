//! Simulated payment detection
//!
//! Confirming a commit starts one fixed-delay timer. When it fires the
//! payment counts as detected. There is no retry and no cancellation.

use crate::config::PaymentConfig;
use crate::NavigationError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Where a payment confirmation stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentState {
    /// Not yet confirmed
    #[default]
    Idle,
    /// Confirmed, waiting for the timer
    Detecting,
    /// Timer fired
    Detected,
}

impl PaymentState {
    /// Get the state name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentState::Idle => "idle",
            PaymentState::Detecting => "detecting",
            PaymentState::Detected => "detected",
        }
    }
}

/// One contribution's payment detector
///
/// Create a fresh detector each time the contribution flow opens.
#[derive(Debug)]
pub struct PaymentDetector {
    delay: Duration,
    state: Arc<watch::Sender<PaymentState>>,
}

impl PaymentDetector {
    /// Create a detector from configuration
    pub fn new(config: &PaymentConfig) -> Self {
        Self::with_delay(config.detection_delay())
    }

    /// Create a detector with an explicit delay
    pub fn with_delay(delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(PaymentState::Idle);
        Self {
            delay,
            state: Arc::new(tx),
        }
    }

    /// Current state
    pub fn state(&self) -> PaymentState {
        *self.state.borrow()
    }

    /// Whether the payment has been detected
    pub fn is_detected(&self) -> bool {
        self.state() == PaymentState::Detected
    }

    /// Start detection
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// [`NavigationError::PaymentPending`] while a detection is running and
    /// [`NavigationError::PaymentAlreadyDetected`] once it has finished.
    pub fn confirm(&self) -> Result<JoinHandle<()>, NavigationError> {
        let started = self.state.send_if_modified(|state| {
            if *state == PaymentState::Idle {
                *state = PaymentState::Detecting;
                true
            } else {
                false
            }
        });

        if !started {
            return Err(match self.state() {
                PaymentState::Detected => NavigationError::PaymentAlreadyDetected,
                _ => NavigationError::PaymentPending,
            });
        }

        tracing::debug!(delay = ?self.delay, "payment detection started");

        let state = Arc::clone(&self.state);
        let delay = self.delay;
        Ok(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            state.send_replace(PaymentState::Detected);
            tracing::info!("payment detected");
        }))
    }

    /// Wait until the payment is detected
    ///
    /// Returns immediately if it already was. Returns without detection only
    /// if nothing was ever confirmed, since then nothing will change.
    pub async fn wait_detected(&self) -> PaymentState {
        if self.state() == PaymentState::Idle {
            return PaymentState::Idle;
        }

        let mut rx = self.state.subscribe();
        let state = match rx.wait_for(|s| *s == PaymentState::Detected).await {
            Ok(state) => *state,
            Err(_) => self.state(),
        };
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_detects_after_delay() {
        let detector = PaymentDetector::with_delay(Duration::from_millis(2000));
        assert_eq!(detector.state(), PaymentState::Idle);

        detector.confirm().unwrap();
        assert_eq!(detector.state(), PaymentState::Detecting);

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(!detector.is_detected());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(detector.is_detected());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_confirm_rejected() {
        let detector = PaymentDetector::with_delay(Duration::from_millis(2000));
        detector.confirm().unwrap();

        assert!(matches!(detector.confirm(), Err(NavigationError::PaymentPending)));

        assert_eq!(detector.wait_detected().await, PaymentState::Detected);
        assert!(matches!(
            detector.confirm(),
            Err(NavigationError::PaymentAlreadyDetected)
        ));
    }

    #[tokio::test]
    async fn test_wait_without_confirm_returns_idle() {
        let detector = PaymentDetector::with_delay(Duration::from_millis(10));
        assert_eq!(detector.wait_detected().await, PaymentState::Idle);
    }
}
