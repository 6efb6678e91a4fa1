//! Expense primitives.
//!
//! An `Expense` is money spent, labelled by a free-text category. Every
//! expense counts towards the dashboard totals regardless of its category.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Money,
    util::{parse_stored_amount, parse_stored_uuid},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: Uuid,
    pub category: String,
    pub amount: Money,
    pub date: DateTime<Utc>,
    pub description: Option<String>,
}

/// Input for [`Engine::create_expense`](crate::Engine::create_expense).
#[derive(Clone, Debug, Default)]
pub struct NewExpense {
    pub category: String,
    pub amount: Money,
    /// Defaults to now.
    pub date: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub category: String,
    pub amount_minor: i64,
    pub date: DateTimeUtc,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id.to_string()),
            category: ActiveValue::Set(expense.category.clone()),
            amount_minor: ActiveValue::Set(expense.amount.cents()),
            date: ActiveValue::Set(expense.date),
            description: ActiveValue::Set(expense.description.clone()),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_stored_uuid(&model.id, "expense")?,
            category: model.category,
            amount: parse_stored_amount(model.amount_minor, "expense amount")?,
            date: model.date,
            description: model.description,
        })
    }
}
