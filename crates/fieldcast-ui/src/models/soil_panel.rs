//! Soil panel state: one toggle that fetches on the first press and clears
//! on the second. Presses while a request is outstanding are ignored.

use fieldcast_core::AppError;
use fieldcast_soil::NutrientEstimate;

use crate::services::SoilServiceMessage;

/// What a press of the soil toggle should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoilAction {
    /// Start a request with this generation
    Fetch(u64),
    /// Results were cleared
    Cleared,
    /// A request is already in flight
    Ignored,
}

#[derive(Debug, Default)]
pub struct SoilPanel {
    generation: u64,
    loading: bool,
    error_message: Option<String>,
    estimate: Option<NutrientEstimate>,
}

impl SoilPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self) -> SoilAction {
        if self.loading {
            return SoilAction::Ignored;
        }
        if self.estimate.take().is_some() {
            return SoilAction::Cleared;
        }
        self.generation += 1;
        self.loading = true;
        self.error_message = None;
        SoilAction::Fetch(self.generation)
    }

    /// Apply a service result. Returns false when the result was stale.
    pub fn apply(&mut self, message: SoilServiceMessage) -> bool {
        let SoilServiceMessage::FetchDone { generation, result } = message;
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "Dropping stale soil result");
            return false;
        }

        self.loading = false;
        match result {
            Ok(estimate) => self.estimate = Some(estimate),
            Err(e) => {
                let err = AppError::from(e);
                tracing::warn!("Soil pipeline failed: {}", err);
                self.error_message = Some(err.user_message());
            }
        }
        true
    }

    pub fn button_label(&self) -> &'static str {
        if self.loading {
            "Analyzing Soil..."
        } else if self.estimate.is_some() {
            "Reset"
        } else {
            "Get NPK Values"
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn estimate(&self) -> Option<&NutrientEstimate> {
        self.estimate.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SoilError;
    use fieldcast_soil::{estimate, SoilReadings};

    fn done(
        generation: u64,
        result: Result<NutrientEstimate, SoilError>,
    ) -> SoilServiceMessage {
        SoilServiceMessage::FetchDone { generation, result }
    }

    fn sample_estimate() -> NutrientEstimate {
        estimate(&SoilReadings {
            ph: Some(6.5),
            organic_carbon_density: Some(2.0),
            cec: Some(10.0),
            sand: Some(20.0),
            clay: Some(40.0),
        })
    }

    #[test]
    fn test_toggle_cycle() {
        let mut panel = SoilPanel::new();
        assert_eq!(panel.button_label(), "Get NPK Values");

        let SoilAction::Fetch(generation) = panel.press() else {
            panic!("first press should fetch");
        };
        assert_eq!(panel.button_label(), "Analyzing Soil...");

        assert!(panel.apply(done(generation, Ok(sample_estimate()))));
        assert_eq!(panel.button_label(), "Reset");
        assert_eq!(panel.estimate().unwrap().nitrogen, "100 mg/kg");

        assert_eq!(panel.press(), SoilAction::Cleared);
        assert!(panel.estimate().is_none());
        assert_eq!(panel.button_label(), "Get NPK Values");
    }

    #[test]
    fn test_press_while_loading_is_ignored() {
        let mut panel = SoilPanel::new();
        assert_eq!(panel.press(), SoilAction::Fetch(1));
        assert_eq!(panel.press(), SoilAction::Ignored);
        assert!(panel.is_loading());
    }

    #[test]
    fn test_error_then_retry() {
        let mut panel = SoilPanel::new();
        panel.press();
        panel.apply(done(
            1,
            Err(SoilError::Pipeline(fieldcast_soil::SoilError::Status(500))),
        ));
        assert_eq!(panel.error_message(), Some("Failed to fetch soil data"));
        assert_eq!(panel.button_label(), "Get NPK Values");

        assert_eq!(panel.press(), SoilAction::Fetch(2));
        assert!(panel.error_message().is_none());
    }

    #[test]
    fn test_stale_result_is_dropped() {
        let mut panel = SoilPanel::new();
        panel.press();
        assert!(!panel.apply(done(9, Ok(sample_estimate()))));
        assert!(panel.estimate().is_none());
        assert!(panel.is_loading());
    }
}
