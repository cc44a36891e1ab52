//! Transaction repository for income/expense records.

use std::collections::BTreeMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use tally_core::budget::{CategorySpend, CategoryUsage};
use tally_core::summary::Month;
use tally_core::transaction::{
    CreateTransactionInput, SortField, SortOrder, TransactionFilter, UpdateTransactionInput,
};
use tally_shared::types::{PageRequest, TransactionId, UserId};

use crate::entities::{sea_orm_active_enums, transactions};

#[derive(Debug, FromQueryResult)]
struct CategorySpendRow {
    category: String,
    spent: Decimal,
    transaction_count: i64,
}

#[derive(Debug, FromQueryResult)]
struct CategoryUsageRow {
    category: String,
    transaction_count: i64,
}

/// Transaction repository scoped by owner on every query.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all transactions of `owner` matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        owner: UserId,
        filter: &TransactionFilter,
    ) -> Result<Vec<transactions::Model>, DbErr> {
        Self::filtered(owner, filter).all(&self.db).await
    }

    /// Lists one page of matching transactions plus the total match count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_page(
        &self,
        owner: UserId,
        filter: &TransactionFilter,
        page: PageRequest,
    ) -> Result<(Vec<transactions::Model>, u64), DbErr> {
        let paginator = Self::filtered(owner, filter).paginate(&self.db, page.page_size);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.page_index()).await?;
        Ok((items, total))
    }

    /// Every transaction of `owner`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_all(&self, owner: UserId) -> Result<Vec<transactions::Model>, DbErr> {
        self.list(owner, &TransactionFilter::default()).await
    }

    /// Inserts a validated transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        owner: UserId,
        input: &CreateTransactionInput,
    ) -> Result<transactions::Model, DbErr> {
        let now = Utc::now().into();
        let model = transactions::ActiveModel {
            id: Set(TransactionId::new().into_inner()),
            user_id: Set(owner.into_inner()),
            kind: Set(input.kind.into()),
            category: Set(input.category.clone()),
            amount: Set(input.amount),
            occurred_on: Set(input.occurred_on),
            description: Set(input.note.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model.insert(&self.db).await
    }

    /// Applies a validated partial update to a transaction owned by `owner`.
    ///
    /// Returns `None` when no such transaction exists for the owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn update(
        &self,
        owner: UserId,
        id: TransactionId,
        input: &UpdateTransactionInput,
    ) -> Result<Option<transactions::Model>, DbErr> {
        let Some(existing) = self.find_owned(owner, id).await? else {
            return Ok(None);
        };

        let mut active: transactions::ActiveModel = existing.into();
        if let Some(kind) = input.kind {
            active.kind = Set(kind.into());
        }
        if let Some(category) = &input.category {
            active.category = Set(category.clone());
        }
        if let Some(amount) = input.amount {
            active.amount = Set(amount);
        }
        if let Some(date) = input.occurred_on {
            active.occurred_on = Set(date);
        }
        if let Some(note) = &input.note {
            let note = note.trim();
            active.description = Set((!note.is_empty()).then(|| note.to_string()));
        }
        active.updated_at = Set(Utc::now().into());

        active.update(&self.db).await.map(Some)
    }

    /// Deletes a transaction owned by `owner`. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn delete(&self, owner: UserId, id: TransactionId) -> Result<bool, DbErr> {
        let result = transactions::Entity::delete_many()
            .filter(transactions::Column::Id.eq(id.into_inner()))
            .filter(transactions::Column::UserId.eq(owner.into_inner()))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Expense totals per category for one month, aggregated in the database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn monthly_expenses_by_category(
        &self,
        owner: UserId,
        month: Month,
    ) -> Result<BTreeMap<String, CategorySpend>, DbErr> {
        let (Some(first), Some(last)) = (month.first_day(), month.last_day()) else {
            return Ok(BTreeMap::new());
        };

        let rows = transactions::Entity::find()
            .select_only()
            .column(transactions::Column::Category)
            .column_as(transactions::Column::Amount.sum(), "spent")
            .column_as(transactions::Column::Id.count(), "transaction_count")
            .filter(transactions::Column::UserId.eq(owner.into_inner()))
            .filter(transactions::Column::Kind.eq(sea_orm_active_enums::TransactionKind::Expense))
            .filter(transactions::Column::OccurredOn.between(first, last))
            .group_by(transactions::Column::Category)
            .into_model::<CategorySpendRow>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                (
                    row.category,
                    CategorySpend {
                        spent: row.spent.normalize(),
                        count: row.transaction_count.unsigned_abs(),
                    },
                )
            })
            .collect())
    }

    /// Expense categories of `owner` by number of uses, most used first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn expense_category_usage(&self, owner: UserId) -> Result<Vec<CategoryUsage>, DbErr> {
        let rows = transactions::Entity::find()
            .select_only()
            .column(transactions::Column::Category)
            .column_as(transactions::Column::Id.count(), "transaction_count")
            .filter(transactions::Column::UserId.eq(owner.into_inner()))
            .filter(transactions::Column::Kind.eq(sea_orm_active_enums::TransactionKind::Expense))
            .group_by(transactions::Column::Category)
            .order_by(transactions::Column::Id.count(), Order::Desc)
            .order_by_asc(transactions::Column::Category)
            .into_model::<CategoryUsageRow>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| CategoryUsage {
                category: row.category,
                transaction_count: row.transaction_count.unsigned_abs(),
            })
            .collect())
    }

    async fn find_owned(
        &self,
        owner: UserId,
        id: TransactionId,
    ) -> Result<Option<transactions::Model>, DbErr> {
        transactions::Entity::find_by_id(id.into_inner())
            .filter(transactions::Column::UserId.eq(owner.into_inner()))
            .one(&self.db)
            .await
    }

    fn filtered(owner: UserId, filter: &TransactionFilter) -> Select<transactions::Entity> {
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(owner.into_inner()));

        if let Some(kind) = filter.kind {
            query = query.filter(
                transactions::Column::Kind.eq(sea_orm_active_enums::TransactionKind::from(kind)),
            );
        }
        if let Some(category) = &filter.category {
            query = query.filter(transactions::Column::Category.eq(category.as_str()));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(transactions::Column::OccurredOn.gte(from));
        }
        // dates carry no time, so `<=` covers the whole last day
        if let Some(to) = filter.date_to {
            query = query.filter(transactions::Column::OccurredOn.lte(to));
        }
        if let Some(min) = filter.min_amount {
            query = query.filter(transactions::Column::Amount.gte(min));
        }
        if let Some(max) = filter.max_amount {
            query = query.filter(transactions::Column::Amount.lte(max));
        }
        if let Some(pattern) = filter.search_pattern() {
            let lower_like = |column: transactions::Column| {
                Expr::expr(Func::lower(Expr::col((transactions::Entity, column))))
                    .like(LikeExpr::new(pattern.clone()).escape('\\'))
            };
            query = query.filter(
                Condition::any()
                    .add(lower_like(transactions::Column::Description))
                    .add(lower_like(transactions::Column::Category)),
            );
        }

        let order = match filter.sort_order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };
        let column = match filter.sort_by {
            SortField::Date => transactions::Column::OccurredOn,
            SortField::Amount => transactions::Column::Amount,
            SortField::Category => transactions::Column::Category,
            SortField::Type => transactions::Column::Kind,
        };
        query = query.order_by(column, order);
        if filter.sort_by.needs_date_tiebreak() {
            query = query.order_by_desc(transactions::Column::OccurredOn);
        }

        query.order_by_desc(transactions::Column::CreatedAt)
    }
}

