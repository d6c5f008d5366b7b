//! Form-input validation.
//!
//! The repositories deliberately persist whatever they are given; these checks
//! run at the service boundary before any mutation so a rejected input never
//! leaves a partial write behind.

use thiserror::Error;

use crate::domain::models::{NewMoneyEntry, NewTodo};

/// A recoverable, user-facing input problem.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Task title cannot be empty")]
    EmptyTitle,
    #[error("A client must be selected")]
    MissingClient,
    #[error("An amount is required for billable tasks")]
    AmountRequired,
    #[error("Amount must be greater than zero")]
    AmountNotPositive,
    #[error("Category cannot be empty")]
    EmptyCategory,
    #[error("Client name cannot be empty")]
    EmptyClientName,
    #[error("Monthly goal cannot be negative")]
    NegativeGoal,
}

/// Validate a task draft before creation.
pub fn validate_new_todo(draft: &NewTodo) -> Result<(), ValidationError> {
    if draft.title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if draft.client_id.trim().is_empty() {
        return Err(ValidationError::MissingClient);
    }
    if draft.payment_status.is_billable() {
        match draft.amount {
            None => return Err(ValidationError::AmountRequired),
            Some(amount) if amount <= 0.0 => return Err(ValidationError::AmountNotPositive),
            Some(_) => {}
        }
    }
    Ok(())
}

/// Validate a money-entry draft before creation.
pub fn validate_new_entry(draft: &NewMoneyEntry) -> Result<(), ValidationError> {
    if draft.amount <= 0.0 {
        return Err(ValidationError::AmountNotPositive);
    }
    if draft.category.trim().is_empty() {
        return Err(ValidationError::EmptyCategory);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{EntryType, PaymentStatus};

    fn todo_draft() -> NewTodo {
        NewTodo {
            title: "Landing page".to_string(),
            client_id: "c1".to_string(),
            completed: false,
            due_date: "2024-03-20".parse().unwrap(),
            payment_status: PaymentStatus::Unpaid,
            amount: Some(500.0),
        }
    }

    #[test]
    fn test_valid_todo_draft_passes() {
        assert_eq!(validate_new_todo(&todo_draft()), Ok(()));
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut draft = todo_draft();
        draft.title = "   ".to_string();
        assert_eq!(validate_new_todo(&draft), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_missing_client_rejected() {
        let mut draft = todo_draft();
        draft.client_id = String::new();
        assert_eq!(validate_new_todo(&draft), Err(ValidationError::MissingClient));
    }

    #[test]
    fn test_billable_todo_requires_positive_amount() {
        let mut draft = todo_draft();
        draft.amount = None;
        assert_eq!(validate_new_todo(&draft), Err(ValidationError::AmountRequired));

        draft.amount = Some(0.0);
        assert_eq!(validate_new_todo(&draft), Err(ValidationError::AmountNotPositive));
    }

    #[test]
    fn test_non_billable_todo_needs_no_amount() {
        let mut draft = todo_draft();
        draft.payment_status = PaymentStatus::NoPayment;
        draft.amount = None;
        assert_eq!(validate_new_todo(&draft), Ok(()));
    }

    #[test]
    fn test_entry_draft_checks() {
        let mut draft = NewMoneyEntry {
            entry_type: EntryType::Expense,
            amount: 40.0,
            category: "Software".to_string(),
            date: "2024-03-20".parse().unwrap(),
            description: None,
            linked_todo_id: None,
        };
        assert_eq!(validate_new_entry(&draft), Ok(()));

        draft.amount = -1.0;
        assert_eq!(validate_new_entry(&draft), Err(ValidationError::AmountNotPositive));

        draft.amount = 40.0;
        draft.category = String::new();
        assert_eq!(validate_new_entry(&draft), Err(ValidationError::EmptyCategory));
    }
}
