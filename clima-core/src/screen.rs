//! State of the lookup screen: two input fields, the last result, and the
//! alert currently on display.
//!
//! The screen is a plain struct mutated by direct calls; front ends own it
//! and render from it. Submitting is split into [`Screen::begin_submit`] and
//! [`Screen::finish_submit`] so a caller can keep handling input while the
//! request is in flight. [`Screen::submit`] composes the two.

use crate::{
    error::{ClimaError, FetchError},
    model::{Coordinates, WeatherResult},
    provider::WeatherProvider,
    validate::validate_coordinates,
};

pub const ALERT_TITLE: &str = "Erro";

/// Blocking notification shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: &'static str,
    pub message: &'static str,
    pub error: ClimaError,
}

impl Alert {
    fn from_error(error: ClimaError) -> Self {
        Self {
            title: ALERT_TITLE,
            message: error.user_message(),
            error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
    ShowingResult,
    ShowingError,
}

#[derive(Debug, Clone, Default)]
pub struct Screen {
    latitude: String,
    longitude: String,
    result: Option<WeatherResult>,
    alert: Option<Alert>,
    pending: bool,
    input_focused: bool,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_latitude(&mut self, text: impl Into<String>) {
        self.latitude = text.into();
        self.input_focused = true;
    }

    pub fn set_longitude(&mut self, text: impl Into<String>) {
        self.longitude = text.into();
        self.input_focused = true;
    }

    pub fn latitude(&self) -> &str {
        &self.latitude
    }

    pub fn longitude(&self) -> &str {
        &self.longitude
    }

    pub fn result(&self) -> Option<&WeatherResult> {
        self.result.as_ref()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Whether an input field holds focus (on-screen keyboard visible).
    pub fn input_focused(&self) -> bool {
        self.input_focused
    }

    pub fn phase(&self) -> Phase {
        if self.pending {
            Phase::Pending
        } else if self.alert.is_some() {
            Phase::ShowingError
        } else if self.result.is_some() {
            Phase::ShowingResult
        } else {
            Phase::Idle
        }
    }

    /// The submit button is disabled while a request is in flight.
    pub fn can_submit(&self) -> bool {
        !self.pending
    }

    /// Press the submit button.
    ///
    /// Returns `None` when the press is ignored because a request is already
    /// pending. A validation failure raises the alert and never enters
    /// `Pending`; on success the caller must fetch and then call
    /// [`Screen::finish_submit`].
    pub fn begin_submit(&mut self) -> Option<Result<Coordinates, ClimaError>> {
        if !self.can_submit() {
            tracing::debug!("Submit ignored: request already pending");
            return None;
        }

        match validate_coordinates(&self.latitude, &self.longitude) {
            Ok(coords) => {
                self.pending = true;
                Some(Ok(coords))
            }
            Err(e) => {
                tracing::debug!(
                    latitude = %self.latitude,
                    longitude = %self.longitude,
                    error = %e,
                    "Rejected coordinate input"
                );
                let err = ClimaError::from(e);
                self.raise(err.clone());
                Some(Err(err))
            }
        }
    }

    /// Apply the outcome of the request started by [`Screen::begin_submit`].
    pub fn finish_submit(
        &mut self,
        outcome: Result<WeatherResult, FetchError>,
    ) -> Result<&WeatherResult, ClimaError> {
        self.pending = false;

        match outcome {
            Ok(result) => {
                self.alert = None;
                self.input_focused = false;
                Ok(self.result.insert(result))
            }
            Err(e) => {
                let err = ClimaError::from(e);
                self.raise(err.clone());
                Err(err)
            }
        }
    }

    /// Validate, fetch, and apply in one go.
    pub async fn submit(
        &mut self,
        provider: &dyn WeatherProvider,
    ) -> Option<Result<&WeatherResult, ClimaError>> {
        let coords = match self.begin_submit()? {
            Ok(coords) => coords,
            Err(e) => return Some(Err(e)),
        };

        let outcome = provider.current_weather(coords).await;
        Some(self.finish_submit(outcome))
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Lines of the result panel; empty when there is no result yet.
    pub fn render(&self) -> Vec<String> {
        self.result.as_ref().map(|r| r.lines().to_vec()).unwrap_or_default()
    }

    fn raise(&mut self, error: ClimaError) {
        self.alert = Some(Alert::from_error(error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct FakeProvider {
        outcome: Result<WeatherResult, FetchError>,
        calls: AtomicUsize,
    }

    impl FakeProvider {
        fn new(outcome: Result<WeatherResult, FetchError>) -> Self {
            Self {
                outcome,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn current_weather(&self, _coords: Coordinates) -> Result<WeatherResult, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn clear_sky() -> WeatherResult {
        WeatherResult {
            temperature_c: 25.0,
            humidity_pct: 60.0,
            description: "céu limpo".to_string(),
            location_name: None,
            observed_at: None,
        }
    }

    fn screen_with(lat: &str, lon: &str) -> Screen {
        let mut screen = Screen::new();
        screen.set_latitude(lat);
        screen.set_longitude(lon);
        screen
    }

    #[test]
    fn new_screen_is_idle_with_nothing_rendered() {
        let screen = Screen::new();
        assert_eq!(screen.phase(), Phase::Idle);
        assert!(screen.render().is_empty());
        assert!(screen.can_submit());
    }

    #[tokio::test]
    async fn success_stores_result_and_dismisses_keyboard() {
        let provider = FakeProvider::new(Ok(clear_sky()));
        let mut screen = screen_with("0", "0");
        assert!(screen.input_focused());

        let outcome = screen.submit(&provider).await.expect("not ignored");
        assert!(outcome.is_ok());

        assert_eq!(screen.phase(), Phase::ShowingResult);
        assert!(!screen.input_focused());
        assert_eq!(
            screen.render(),
            vec!["Temperatura: 25°C", "Umidade: 60%", "Descrição: céu limpo"]
        );
    }

    #[tokio::test]
    async fn non_numeric_input_never_calls_provider() {
        let provider = FakeProvider::new(Ok(clear_sky()));
        let mut screen = screen_with("abc", "10");

        let err = screen.submit(&provider).await.expect("not ignored").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NonNumeric);
        assert_eq!(provider.calls(), 0);
        assert_eq!(screen.phase(), Phase::ShowingError);
        assert!(!screen.is_pending());
    }

    #[tokio::test]
    async fn out_of_range_input_never_calls_provider() {
        let provider = FakeProvider::new(Ok(clear_sky()));
        let mut screen = screen_with("0", "200");

        let err = screen.submit(&provider).await.expect("not ignored").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn missing_latitude_reports_missing_input() {
        let provider = FakeProvider::new(Ok(clear_sky()));
        let mut screen = screen_with("", "not a number");

        let err = screen.submit(&provider).await.expect("not ignored").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MissingInput);
        let alert = screen.alert().expect("alert raised");
        assert_eq!(alert.title, "Erro");
        assert_eq!(alert.message, "Por favor, insira valores válidos de latitude e longitude.");
    }

    #[tokio::test]
    async fn failure_keeps_previous_result() {
        let mut screen = screen_with("0", "0");
        screen.submit(&FakeProvider::new(Ok(clear_sky()))).await;

        let failing = FakeProvider::new(Err(FetchError::InvalidCredential));
        let err = screen.submit(&failing).await.expect("not ignored").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidCredential);
        assert_eq!(screen.result(), Some(&clear_sky()));
        assert_eq!(
            screen.alert().map(|a| a.message),
            Some("Chave de API inválida. Verifique sua configuração.")
        );
    }

    #[test]
    fn second_press_while_pending_is_ignored() {
        let mut screen = screen_with("10", "20");

        let first = screen.begin_submit().expect("first press accepted");
        assert!(first.is_ok());
        assert_eq!(screen.phase(), Phase::Pending);
        assert!(!screen.can_submit());

        assert!(screen.begin_submit().is_none());

        screen.finish_submit(Err(FetchError::ServerError)).unwrap_err();
        assert!(screen.can_submit());
        assert_eq!(screen.phase(), Phase::ShowingError);
    }

    #[test]
    fn dismissing_alert_returns_to_previous_state() {
        let mut screen = screen_with("10", "20");
        screen.begin_submit();
        screen.finish_submit(Ok(clear_sky())).unwrap();

        screen.begin_submit();
        screen.finish_submit(Err(FetchError::ServerError)).unwrap_err();
        assert_eq!(screen.phase(), Phase::ShowingError);

        screen.dismiss_alert();
        assert!(screen.alert().is_none());
        assert_eq!(screen.phase(), Phase::ShowingResult);
    }

    #[test]
    fn new_result_replaces_old_and_clears_alert() {
        let mut screen = screen_with("10", "20");
        screen.begin_submit();
        screen.finish_submit(Err(FetchError::ServerError)).unwrap_err();

        let rain = WeatherResult {
            description: "chuva leve".to_string(),
            ..clear_sky()
        };
        screen.begin_submit();
        let stored = screen.finish_submit(Ok(rain.clone())).unwrap().clone();

        assert_eq!(stored, rain);
        assert!(screen.alert().is_none());
        assert_eq!(screen.render()[2], "Descrição: chuva leve");
    }
}
