use chrono::Utc;
use sea_orm::{QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Expense, NewExpense, ResultEngine, expenses,
    util::{ensure_record_amount, ensure_required_name, normalize_optional_text},
};

use super::Engine;

impl Engine {
    /// Return every expense, newest first.
    pub async fn list_expenses(&self) -> ResultEngine<Vec<Expense>> {
        expenses::Entity::find()
            .order_by_desc(expenses::Column::Date)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Expense::try_from)
            .collect()
    }

    /// Store a new expense. `date` defaults to now.
    pub async fn create_expense(&self, input: NewExpense) -> ResultEngine<Expense> {
        let category = ensure_required_name(&input.category, "category")?;
        ensure_record_amount(input.amount, "amount")?;

        let expense = Expense {
            id: Uuid::new_v4(),
            category,
            amount: input.amount,
            date: input.date.unwrap_or_else(Utc::now),
            description: normalize_optional_text(input.description.as_deref()),
        };

        expenses::ActiveModel::from(&expense)
            .insert(&self.database)
            .await?;
        Ok(expense)
    }

    /// Remove an expense.
    pub async fn delete_expense(&self, id: Uuid) -> ResultEngine<()> {
        let result = expenses::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(format!("expense {id}")));
        }
        Ok(())
    }
}
