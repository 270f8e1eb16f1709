//! Result notification hook.
//!
//! A [`ResultHub`] is owned by the caller. It keeps the last computed
//! record and a single observer slot; registering a new observer replaces
//! the previous one.

use crate::{calculator, MeasurementInput, Result, ResultRecord, ValidationMode};

/// Receives every newly computed result
pub trait ResultObserver {
    fn on_result(&mut self, record: &ResultRecord);
}

impl<F> ResultObserver for F
where
    F: FnMut(&ResultRecord),
{
    fn on_result(&mut self, record: &ResultRecord) {
        self(record)
    }
}

/// Holder for the last result and its single observer
#[derive(Default)]
pub struct ResultHub {
    mode: ValidationMode,
    last: Option<ResultRecord>,
    observer: Option<Box<dyn ResultObserver>>,
}

impl ResultHub {
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            last: None,
            observer: None,
        }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Compute indices, store the merged record as the last result and
    /// notify the observer.
    ///
    /// In strict mode a validation failure leaves the last result unchanged
    /// and nobody is notified.
    pub fn compute(&mut self, input: MeasurementInput) -> Result<&ResultRecord> {
        let report = calculator::calculate_with(self.mode, &input)?;
        let record = ResultRecord::new(input, report);

        if let Some(observer) = self.observer.as_mut() {
            observer.on_result(&record);
        }

        let stored = self.last.insert(record);
        Ok(&*stored)
    }

    /// Register the observer, discarding any previous one
    pub fn register_observer(&mut self, observer: impl ResultObserver + 'static) {
        if self.observer.replace(Box::new(observer)).is_some() {
            tracing::debug!("Replaced previously registered result observer");
        }
    }

    /// Last successfully computed record, if any
    pub fn last(&self) -> Option<&ResultRecord> {
        self.last.as_ref()
    }
}
