use crate::config::relay::DEFAULT_TIMEOUT_SECONDS;
use crate::core::validator::validate;
use crate::domain::model::{
    iso_timestamp, ContactFormInput, ContactSubmission, DispatchOutcome, FailureReason, FormField,
    SubmissionOutcome, SubmissionState, ValidationResult,
};
use crate::domain::ports::Relay;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

pub const FAILURE_NOTICE: &str = "Failed to submit form. Please try again.";

#[derive(Debug, Default)]
struct FormInner {
    input: ContactFormInput,
    errors: ValidationResult,
    state: SubmissionState,
}

fn lock_inner(inner: &Mutex<FormInner>) -> MutexGuard<'_, FormInner> {
    // 狀態只是純資料，忽略 poisoning
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// 送出期間持有；若 `submit` 的 future 在 dispatch 中途被丟棄，把表單退回 `Idle`
struct InFlight<'a> {
    inner: &'a Mutex<FormInner>,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(inner: &'a Mutex<FormInner>) -> Self {
        Self { inner, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = lock_inner(self.inner);
        if inner.state == SubmissionState::Submitting {
            tracing::warn!("Submission cancelled before the relay answered");
            inner.state = SubmissionState::Idle;
        }
    }
}

/// 聯絡表單：欄位值、各欄位錯誤與送出狀態
///
/// `submit` 同一時間只會有一筆。送出中其他呼叫直接回傳
/// [`SubmissionOutcome::Busy`]，不會發出請求；送出完成或失敗後，
/// 需先 [`reset`](ContactForm::reset) 才能再送
pub struct ContactForm<R: Relay> {
    relay: R,
    timeout: Duration,
    inner: Mutex<FormInner>,
}

impl<R: Relay> ContactForm<R> {
    pub fn new(relay: R) -> Self {
        Self::with_timeout(relay, Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn with_timeout(relay: R, timeout: Duration) -> Self {
        Self {
            relay,
            timeout,
            inner: Mutex::new(FormInner::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormInner> {
        lock_inner(&self.inner)
    }

    /// 使用者輸入：更新欄位並清除該欄位的錯誤
    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        let mut inner = self.lock();
        inner.input.set(field, value);
        inner.errors.clear_field(field);
    }

    pub fn input(&self) -> ContactFormInput {
        self.lock().input.clone()
    }

    pub fn errors(&self) -> ValidationResult {
        self.lock().errors.clone()
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().state.clone()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.lock().state, SubmissionState::Submitting)
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.lock().state, SubmissionState::Submitted)
    }

    pub fn failure_notice(&self) -> Option<&'static str> {
        match self.lock().state {
            SubmissionState::Failed(_) => Some(FAILURE_NOTICE),
            _ => None,
        }
    }

    /// 「再送一則」：完成或失敗後讓表單可以再次送出
    pub fn reset(&self) -> bool {
        let mut inner = self.lock();
        match inner.state {
            SubmissionState::Submitted | SubmissionState::Failed(_) => {
                inner.state = SubmissionState::Idle;
                true
            }
            _ => false,
        }
    }

    pub async fn submit(&self) -> SubmissionOutcome {
        let submission = {
            let mut inner = self.lock();
            if inner.state != SubmissionState::Idle {
                tracing::debug!("Submit ignored while form is {:?}", inner.state);
                return SubmissionOutcome::Busy;
            }

            let errors = validate(&inner.input);
            if !errors.is_valid() {
                inner.errors = errors.clone();
                return SubmissionOutcome::Invalid(errors);
            }

            inner.state = SubmissionState::Submitting;
            ContactSubmission {
                name: inner.input.name.clone(),
                email: inner.input.email.clone(),
                message: inner.input.message.clone(),
                timestamp: iso_timestamp(chrono::Utc::now()),
            }
        };

        let in_flight = InFlight::new(&self.inner);
        tracing::debug!(
            "Dispatching contact submission from {} ({:?} relay)",
            submission.email,
            self.relay.visibility()
        );
        let outcome = match tokio::time::timeout(self.timeout, self.relay.dispatch(&submission)).await
        {
            Ok(outcome) => outcome,
            Err(_) => DispatchOutcome::Timeout,
        };
        in_flight.disarm();

        let mut inner = self.lock();
        match outcome {
            DispatchOutcome::Success => {
                inner.input = ContactFormInput::default();
                inner.errors = ValidationResult::default();
                inner.state = SubmissionState::Submitted;
                tracing::info!("Contact message sent");
                SubmissionOutcome::Sent
            }
            DispatchOutcome::TransportFailure(reason) => {
                tracing::error!("Error submitting form: {}", reason);
                let reason = FailureReason::Transport(reason);
                inner.state = SubmissionState::Failed(reason.clone());
                SubmissionOutcome::Failed(reason)
            }
            DispatchOutcome::Timeout => {
                tracing::error!("Error submitting form: no answer within {:?}", self.timeout);
                inner.state = SubmissionState::Failed(FailureReason::Timeout);
                SubmissionOutcome::Failed(FailureReason::Timeout)
            }
        }
    }
}
