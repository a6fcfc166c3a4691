use api_types::{
    budget::{BudgetNew, BudgetUpdate},
    transaction::{TransactionNew, TransactionUpdate},
};
use chrono::{Datelike, Local, NaiveDate};
use engine::{
    TransactionKind, analytics,
    categories::{categories_for, is_suggested},
    insights,
    validation::{BudgetDraft, TransactionDraft, validate_budget, validate_transaction},
};

use crate::{
    cli::{BudgetFields, BudgetsCommand, Command, TransactionFields, TransactionsCommand},
    client::Client,
    config::ClientConfig,
    error::{AppError, Result},
    mappers,
    store::{ActionResult, Store},
    view,
};

const SERIES_MONTHS: u32 = 6;

/// Runs one CLI command against the store and renders its output.
pub struct App {
    store: Store,
    today: NaiveDate,
}

impl App {
    pub fn new(config: &ClientConfig, today: Option<NaiveDate>) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let store = Store::open(client, &config.state_path)?;
        Ok(Self {
            store,
            today: today.unwrap_or_else(|| Local::now().date_naive()),
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub async fn run(&mut self, command: Command) -> Result<String> {
        match command {
            Command::Sync => {
                expect_success(self.store.initialize_data().await, "sync")?;
                Ok(format!(
                    "Synced {} transactions and {} budgets.\n",
                    self.store.transactions().len(),
                    self.store.budgets().len()
                ))
            }
            Command::Transactions(command) => self.transactions(command).await,
            Command::Budgets(command) => self.budgets(command).await,
            Command::Dashboard => {
                self.ensure_loaded().await;
                let txs = mappers::transactions(self.store.transactions());
                let spending = analytics::expenses(&txs);
                Ok(view::dashboard(
                    &analytics::dashboard_summary(&txs, self.today),
                    &analytics::monthly_series(&spending, self.today, SERIES_MONTHS),
                ))
            }
            Command::Analytics => {
                self.ensure_loaded().await;
                let txs = mappers::transactions(self.store.transactions());
                let budgets = mappers::budgets(self.store.budgets());
                let (year, month) = (self.today.year(), self.today.month());
                let spending = analytics::expenses(&txs);
                let report = analytics::monthly_report(&spending, year, month);
                Ok(view::analytics(
                    &analytics::overview(&txs),
                    &report,
                    &analytics::category_breakdown(&report.transactions),
                    &analytics::budget_comparison(&txs, &budgets, year, month),
                ))
            }
            Command::Insights => {
                self.ensure_loaded().await;
                let txs = mappers::transactions(self.store.transactions());
                let budgets = mappers::budgets(self.store.budgets());
                Ok(view::insights(&insights::generate_insights(
                    &txs, &budgets, self.today,
                )))
            }
            Command::Categories { kind } => {
                let kinds = match kind {
                    Some(kind) => vec![TransactionKind::from(kind)],
                    None => vec![TransactionKind::Expense, TransactionKind::Income],
                };
                let groups: Vec<_> = kinds
                    .into_iter()
                    .map(|kind| (kind, categories_for(kind)))
                    .collect();
                Ok(view::categories(&groups))
            }
            Command::Clear => {
                self.store.clear_data();
                Ok("Local data cleared.\n".to_string())
            }
        }
    }

    async fn ensure_loaded(&mut self) {
        if self.store.needs_initialization() {
            if let ActionResult::Failure(message) = self.store.initialize_data().await {
                tracing::warn!("showing local data, refresh failed: {message}");
            }
        }
    }

    async fn transactions(&mut self, command: TransactionsCommand) -> Result<String> {
        match command {
            TransactionsCommand::List(args) => {
                self.ensure_loaded().await;
                let mut txs = mappers::transactions(self.store.transactions());
                if let Some((year, month)) = args.month {
                    txs = analytics::month_slice(&txs, year, month);
                }
                if let Some(kind) = args.kind {
                    let kind = TransactionKind::from(kind);
                    txs.retain(|tx| tx.kind == kind);
                }
                if let Some(category) = &args.category {
                    txs.retain(|tx| &tx.category == category);
                }
                txs.sort_by(|a, b| b.date.cmp(&a.date));
                Ok(view::transactions(&txs))
            }
            TransactionsCommand::Add(fields) => {
                let payload = self.new_transaction(fields)?;
                let created = expect_success(self.store.add_transaction(payload).await, "add transaction")?;
                let created = mappers::transaction(&created);
                let mut out = format!(
                    "Added transaction {}\n{}\n",
                    created.id,
                    view::transaction_line(&created)
                );
                if !is_suggested(created.kind, &created.category) {
                    out.push_str(&view::unsuggested_category(created.kind, &created.category));
                }
                Ok(out)
            }
            TransactionsCommand::Update { id, fields } => {
                let updates = self.transaction_update(&id, fields)?;
                let updated = expect_success(
                    self.store.update_transaction(&id, &updates).await,
                    "update transaction",
                )?;
                Ok(format!(
                    "Updated transaction {id}\n{}\n",
                    view::transaction_line(&mappers::transaction(&updated))
                ))
            }
            TransactionsCommand::Delete { id } => {
                expect_success(
                    self.store.delete_transaction(&id).await,
                    "delete transaction",
                )?;
                Ok(format!("Deleted transaction {id}\n"))
            }
        }
    }

    async fn budgets(&mut self, command: BudgetsCommand) -> Result<String> {
        match command {
            BudgetsCommand::List => {
                self.ensure_loaded().await;
                Ok(view::budgets(&mappers::budgets(self.store.budgets())))
            }
            BudgetsCommand::Add(fields) => {
                let payload = new_budget(fields)?;
                let created = expect_success(self.store.add_budget(payload).await, "add budget")?;
                Ok(format!(
                    "Added budget {}\n{}",
                    created.id,
                    view::budgets(&[mappers::budget(&created)])
                ))
            }
            BudgetsCommand::Update { id, fields } => {
                let updates = self.budget_update(&id, fields)?;
                let updated = expect_success(
                    self.store.update_budget(&id, &updates).await,
                    "update budget",
                )?;
                Ok(format!(
                    "Updated budget {id}\n{}",
                    view::budgets(&[mappers::budget(&updated)])
                ))
            }
            BudgetsCommand::Delete { id } => {
                expect_success(self.store.delete_budget(&id).await, "delete budget")?;
                Ok(format!("Deleted budget {id}\n"))
            }
            BudgetsCommand::Status => {
                self.ensure_loaded().await;
                let txs = mappers::transactions(self.store.transactions());
                let (year, month) = (self.today.year(), self.today.month());
                let rows: Vec<_> = mappers::budgets(self.store.budgets())
                    .into_iter()
                    .map(|budget| {
                        let usage = analytics::budget_usage(&budget, &txs, year, month);
                        (budget, usage)
                    })
                    .collect();
                Ok(view::budget_status(&rows))
            }
        }
    }

    fn new_transaction(&self, fields: TransactionFields) -> Result<TransactionNew> {
        let draft = TransactionDraft {
            amount: fields.amount,
            description: fields.description.unwrap_or_default(),
            category: fields.category.unwrap_or_default(),
            kind: fields.kind.map(TransactionKind::from),
            date: fields.date.or(Some(self.today)),
        };
        validate_transaction(&draft)?;

        let (Some(amount), Some(kind), Some(date)) = (draft.amount, draft.kind, draft.date) else {
            return Err(AppError::InvalidInput("incomplete transaction".to_string()));
        };
        Ok(TransactionNew {
            id: String::new(),
            amount,
            description: draft.description.trim().to_string(),
            category: draft.category,
            kind: mappers::api_transaction_kind(kind),
            date,
        })
    }

    /// Validate the transaction as it would look after the update, when known locally.
    fn transaction_update(&self, id: &str, fields: TransactionFields) -> Result<TransactionUpdate> {
        if let Some(current) = self.store.transactions().iter().find(|tx| tx.id == id) {
            let draft = TransactionDraft {
                amount: fields.amount.or(Some(current.amount)),
                description: fields
                    .description
                    .clone()
                    .or_else(|| current.description.clone())
                    .unwrap_or_default(),
                category: fields
                    .category
                    .clone()
                    .unwrap_or_else(|| current.category.clone()),
                kind: Some(
                    fields
                        .kind
                        .map(TransactionKind::from)
                        .unwrap_or_else(|| mappers::transaction_kind(current.kind)),
                ),
                date: fields.date.or(Some(current.date)),
            };
            validate_transaction(&draft)?;
        } else if fields.amount.is_some_and(|amount| amount <= 0.0) {
            return Err(AppError::InvalidInput(
                "Amount must be greater than 0".to_string(),
            ));
        }

        Ok(TransactionUpdate {
            amount: fields.amount,
            description: fields.description.map(|d| d.trim().to_string()),
            category: fields.category,
            kind: fields
                .kind
                .map(|kind| mappers::api_transaction_kind(kind.into())),
            date: fields.date,
        })
    }

    fn budget_update(&self, id: &str, fields: BudgetFields) -> Result<BudgetUpdate> {
        if let Some(current) = self.store.budgets().iter().find(|b| b.id == id) {
            validate_budget(&BudgetDraft {
                category: fields
                    .category
                    .clone()
                    .unwrap_or_else(|| current.category.clone()),
                amount: fields.amount.or(Some(current.amount)),
                period: Some(
                    fields
                        .period
                        .map(Into::into)
                        .unwrap_or_else(|| mappers::budget_period(current.period)),
                ),
            })?;
        } else if fields.amount.is_some_and(|amount| amount <= 0.0) {
            return Err(AppError::InvalidInput(
                "Amount must be greater than 0".to_string(),
            ));
        }

        Ok(BudgetUpdate {
            category: fields.category,
            amount: fields.amount,
            period: fields
                .period
                .map(|period| mappers::api_budget_period(period.into())),
        })
    }
}

fn new_budget(fields: BudgetFields) -> Result<BudgetNew> {
    let draft = BudgetDraft {
        category: fields.category.unwrap_or_default(),
        amount: fields.amount,
        period: Some(fields.period.map(Into::into).unwrap_or_default()),
    };
    validate_budget(&draft)?;

    let Some(amount) = draft.amount else {
        return Err(AppError::InvalidInput("incomplete budget".to_string()));
    };
    Ok(BudgetNew {
        id: String::new(),
        category: draft.category.trim().to_string(),
        amount,
        period: mappers::api_budget_period(draft.period.unwrap_or_default()),
    })
}

fn expect_success<T>(result: ActionResult<T>, action: &str) -> Result<T> {
    match result {
        ActionResult::Success(value) => Ok(value),
        ActionResult::NotFound => Err(AppError::NotFound(format!("{action}: not found"))),
        ActionResult::Failure(message) => Err(AppError::Request(format!("{action}: {message}"))),
    }
}
