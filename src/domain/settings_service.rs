//! Settings mutations and currency formatting.

use anyhow::Result;
use log::info;

use crate::domain::error::DomainError;
use crate::domain::models::{Currency, Settings};
use crate::domain::validation::ValidationError;
use crate::storage::repositories::SettingsRepository;

/// Thousands-grouped rendering of an amount, with cents only when present.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format_num::format_num!(",.0f", amount)
    } else {
        format_num::format_num!(",.2f", amount)
    }
}

/// Reads and mutates the singleton settings record.
#[derive(Clone)]
pub struct SettingsService {
    repository: SettingsRepository,
}

impl SettingsService {
    pub fn new(repository: SettingsRepository) -> Self {
        Self { repository }
    }

    pub fn settings(&self) -> Result<Settings> {
        self.repository.load()
    }

    /// Switch the display currency.
    pub fn update_currency(&self, currency: Currency) -> Result<()> {
        let mut settings = self.repository.load()?;
        info!("Switching currency to {}", currency.code);
        settings.currency = currency;
        self.repository.save(&settings)
    }

    /// Set the monthly income goal; zero disables goal tracking.
    pub fn update_monthly_goal(&self, monthly_goal: f64) -> Result<(), DomainError> {
        if monthly_goal < 0.0 {
            return Err(ValidationError::NegativeGoal.into());
        }
        let mut settings = self.repository.load()?;
        settings.monthly_goal = monthly_goal;
        self.repository.save(&settings)?;
        Ok(())
    }

    /// Selected currency symbol followed by the thousands-grouped amount.
    pub fn format_currency(&self, amount: f64) -> Result<String> {
        let settings = self.repository.load()?;
        Ok(format!("{}{}", settings.currency.symbol, format_amount(amount)))
    }
}
