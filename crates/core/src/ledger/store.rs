//! The shared ledger.
//!
//! All mutable state lives here, sharded per group inside a `DashMap`. One
//! exclusive map guard covers every multi-record write (an expense with its
//! full split set, a single split transition), so a write is either fully
//! visible or not at all and two racing transitions on the same split cannot
//! both pass their precondition check. Reads take shared guards and never
//! observe a partially inserted expense.
//!
//! Notifications are dispatched after the guard is released; a slow or dead
//! consumer can never hold up a ledger write.

use std::sync::Arc;

use chrono::{Datelike, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;
use tracing::info;

use splitledger_shared::config::BudgetConfig;
use splitledger_shared::types::{Currency, ExpenseId, GroupId, Money, SettlementId, UserId};

use crate::balance::{BalanceService, GroupBalances, simplify};
use crate::expense::{
    CreateExpenseInput, GroupExpense, SelfShareExpense, Split, SplitEngine,
};
use crate::group::{CreateGroupInput, Group, GroupService, MemberInput, Membership};
use crate::notify::Notifier;
use crate::settlement::{
    DirectSettlement, DirectSettlementStatus, SettlementAction, SettlementService,
    SettlementStatus,
};

use super::error::LedgerError;
use super::profile::ProfileDirectory;
use super::types::{
    DebtEntry, ExpenseCreated, ExpenseWithSplits, MemberPosition, RecordSettlementInput,
};

/// One group's complete ledger state. Guarded as a unit.
#[derive(Debug)]
struct GroupState {
    group: Group,
    memberships: Vec<Membership>,
    expenses: Vec<ExpenseRecord>,
    settlements: Vec<DirectSettlement>,
}

/// An expense with its splits and the payer's retained self-share amount.
///
/// The self-share is kept so the sum invariant (splits + self-share =
/// expense amount) stays checkable for the record's whole life.
#[derive(Debug)]
struct ExpenseRecord {
    expense: GroupExpense,
    splits: Vec<Split>,
    self_share: Decimal,
}

/// The concurrency-safe ledger shared across callers.
pub struct SharedLedger {
    groups: DashMap<GroupId, GroupState>,
    expense_index: DashMap<ExpenseId, GroupId>,
    notifier: Notifier,
    profiles: Arc<dyn ProfileDirectory>,
    budget: BudgetConfig,
}

impl SharedLedger {
    /// Creates an empty ledger.
    ///
    /// `budget.default_monthly_budget` applies to payers whose profile
    /// carries no budget of its own; zero disables the check for them.
    #[must_use]
    pub fn new(
        notifier: Notifier,
        profiles: Arc<dyn ProfileDirectory>,
        budget: BudgetConfig,
    ) -> Self {
        Self {
            groups: DashMap::new(),
            expense_index: DashMap::new(),
            notifier,
            profiles,
            budget,
        }
    }

    // ------------------------------------------------------------------
    // Groups and members
    // ------------------------------------------------------------------

    /// Create a group with its initial members.
    pub fn create_group(&self, input: CreateGroupInput) -> Result<Group, LedgerError> {
        let (group, memberships) = GroupService::create(input)?;
        let group_id = group.id;
        self.groups.insert(
            group_id,
            GroupState {
                group: group.clone(),
                memberships,
                expenses: Vec::new(),
                settlements: Vec::new(),
            },
        );
        info!(%group_id, "group created");
        Ok(group)
    }

    /// Delete a group. Admin only.
    pub fn delete_group(&self, group_id: GroupId, actor: UserId) -> Result<(), LedgerError> {
        {
            let entry = self
                .groups
                .get(&group_id)
                .ok_or(LedgerError::GroupNotFound(group_id))?;
            GroupService::ensure_admin(&entry.memberships, actor)?;
        }
        let Some((_, state)) = self.groups.remove(&group_id) else {
            return Err(LedgerError::GroupNotFound(group_id));
        };
        for record in &state.expenses {
            self.expense_index.remove(&record.expense.id);
        }
        info!(%group_id, "group deleted");
        Ok(())
    }

    /// Fetch a group record.
    pub fn group(&self, group_id: GroupId) -> Result<Group, LedgerError> {
        self.groups
            .get(&group_id)
            .map(|entry| entry.group.clone())
            .ok_or(LedgerError::GroupNotFound(group_id))
    }

    /// Fetch a group's memberships in join order.
    pub fn memberships(&self, group_id: GroupId) -> Result<Vec<Membership>, LedgerError> {
        self.groups
            .get(&group_id)
            .map(|entry| entry.memberships.clone())
            .ok_or(LedgerError::GroupNotFound(group_id))
    }

    /// Add a member to a group.
    pub fn add_member(
        &self,
        group_id: GroupId,
        input: MemberInput,
    ) -> Result<Membership, LedgerError> {
        let mut entry = self
            .groups
            .get_mut(&group_id)
            .ok_or(LedgerError::GroupNotFound(group_id))?;
        let membership = GroupService::add_member(
            &entry.memberships,
            group_id,
            input.user_id,
            input.nickname,
            input.is_admin,
        )?;
        entry.memberships.push(membership.clone());
        Ok(membership)
    }

    /// Remove a member from a group. The creator cannot be removed.
    pub fn remove_member(&self, group_id: GroupId, user_id: UserId) -> Result<(), LedgerError> {
        let mut entry = self
            .groups
            .get_mut(&group_id)
            .ok_or(LedgerError::GroupNotFound(group_id))?;
        let state = &mut *entry;
        GroupService::validate_removal(&state.group, &state.memberships, user_id)?;
        state.memberships.retain(|m| m.user_id != user_id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Expenses
    // ------------------------------------------------------------------

    /// Record a group expense and its full split set as one atomic unit.
    ///
    /// The payer's self-share is returned for the personal-expense
    /// collaborator and never enters interpersonal debt. After the write
    /// commits, the payer's monthly budget is checked and a budget alert
    /// dispatched when exceeded (best effort, post-commit).
    pub fn create_expense(&self, input: CreateExpenseInput) -> Result<ExpenseCreated, LedgerError> {
        let now = Utc::now();
        let created = {
            let mut entry = self
                .groups
                .get_mut(&input.group_id)
                .ok_or(LedgerError::GroupNotFound(input.group_id))?;
            let state = &mut *entry;
            GroupService::ensure_member(&state.memberships, input.paid_by)?;

            let members: Vec<UserId> = state.memberships.iter().map(|m| m.user_id).collect();
            let computed = SplitEngine::compute(
                input.amount,
                state.group.currency,
                input.paid_by,
                &members,
                &input.allocation,
            )?;

            let expense = GroupExpense {
                id: ExpenseId::new(),
                group_id: input.group_id,
                paid_by: input.paid_by,
                amount: input.amount,
                description: input.description,
                date: input.date,
                category: input.category,
                payment_method: input.payment_method,
                strategy: input.allocation.strategy(),
                created_at: now,
                updated_at: now,
            };
            let splits: Vec<Split> = computed
                .splits
                .iter()
                .map(|c| Split {
                    expense_id: expense.id,
                    user_id: c.user_id,
                    amount_owed: c.amount_owed,
                    percentage: c.percentage,
                    shares: c.shares,
                    status: SettlementStatus::Pending,
                    settled_at: None,
                })
                .collect();
            let self_share = SelfShareExpense {
                user_id: input.paid_by,
                amount: computed.self_share.amount_owed,
                category: input.category,
                date: input.date,
                payment_method: input.payment_method,
                source_expense: expense.id,
            };

            state.expenses.push(ExpenseRecord {
                expense: expense.clone(),
                splits: splits.clone(),
                self_share: self_share.amount,
            });
            self.expense_index.insert(expense.id, input.group_id);

            ExpenseCreated {
                expense,
                splits,
                self_share,
            }
        };

        info!(
            expense_id = %created.expense.id,
            group_id = %created.expense.group_id,
            amount = %created.expense.amount,
            "group expense recorded"
        );
        self.check_budget(&created.self_share);
        Ok(created)
    }

    /// List a group's expenses with their splits.
    pub fn group_expenses(&self, group_id: GroupId) -> Result<Vec<ExpenseWithSplits>, LedgerError> {
        let entry = self
            .groups
            .get(&group_id)
            .ok_or(LedgerError::GroupNotFound(group_id))?;
        Ok(entry
            .expenses
            .iter()
            .map(|record| ExpenseWithSplits {
                expense: record.expense.clone(),
                splits: record.splits.clone(),
            })
            .collect())
    }

    // ------------------------------------------------------------------
    // Settlement transitions
    // ------------------------------------------------------------------

    /// The debtor requests settlement of their split.
    ///
    /// On success a settlement-request event is dispatched to the payer,
    /// once per (expense, member) until a rejection reopens the slot.
    pub fn request_settlement(
        &self,
        expense_id: ExpenseId,
        member_id: UserId,
    ) -> Result<Split, LedgerError> {
        let (updated, payer, currency) = self.with_expense(expense_id, |group, record| {
            let payer = record.expense.paid_by;
            let currency = group.currency;
            let split = Self::find_split(record, expense_id, member_id)?;
            let action = SettlementService::request(split.status, split.user_id, member_id)?;
            split.status = action.new_status();
            Ok((split.clone(), payer, currency))
        })?;

        info!(%expense_id, %member_id, "settlement requested");
        self.notifier.settlement_requested(
            expense_id,
            member_id,
            payer,
            updated.amount_owed,
            currency,
            self.profiles.payment_id(payer),
        );
        Ok(updated)
    }

    /// The payer confirms a requested settlement. Terminal.
    pub fn confirm_settlement(
        &self,
        expense_id: ExpenseId,
        member_id: UserId,
        actor_id: UserId,
    ) -> Result<Split, LedgerError> {
        let (updated, payer, currency) = self.with_expense(expense_id, |group, record| {
            let payer = record.expense.paid_by;
            let currency = group.currency;
            let split = Self::find_split(record, expense_id, member_id)?;
            let action = SettlementService::confirm(split.status, payer, actor_id)?;
            if let SettlementAction::Confirm { settled_at, .. } = &action {
                split.settled_at = Some(*settled_at);
            }
            split.status = action.new_status();
            Ok((split.clone(), payer, currency))
        })?;

        info!(%expense_id, %member_id, "settlement confirmed");
        self.notifier.settlement_confirmed(
            expense_id,
            member_id,
            payer,
            updated.amount_owed,
            currency,
        );
        Ok(updated)
    }

    /// The payer rejects a requested settlement; the split returns to
    /// Pending and can be requested again.
    pub fn reject_settlement(
        &self,
        expense_id: ExpenseId,
        member_id: UserId,
        actor_id: UserId,
    ) -> Result<Split, LedgerError> {
        let (updated, _, _) = self.with_expense(expense_id, |group, record| {
            let payer = record.expense.paid_by;
            let currency = group.currency;
            let split = Self::find_split(record, expense_id, member_id)?;
            let action = SettlementService::reject(split.status, payer, actor_id)?;
            split.status = action.new_status();
            split.settled_at = None;
            Ok((split.clone(), payer, currency))
        })?;

        info!(%expense_id, %member_id, "settlement rejected");
        self.notifier.settlement_rejected(expense_id, member_id);
        Ok(updated)
    }

    // ------------------------------------------------------------------
    // Balances
    // ------------------------------------------------------------------

    /// Every member's net position plus a minimal settling transfer list.
    pub fn balances(&self, group_id: GroupId) -> Result<GroupBalances, LedgerError> {
        let entry = self
            .groups
            .get(&group_id)
            .ok_or(LedgerError::GroupNotFound(group_id))?;
        let members: Vec<UserId> = entry.memberships.iter().map(|m| m.user_id).collect();
        let pairs = entry
            .expenses
            .iter()
            .flat_map(|record| record.splits.iter().map(|s| (record.expense.paid_by, s)));

        let balances = BalanceService::net_balances(&members, pairs);
        let transfers = simplify(&balances);
        Ok(GroupBalances {
            group_id,
            currency: entry.group.currency,
            balances,
            transfers,
        })
    }

    /// Everything a user owes and is owed across all groups, unsettled only.
    #[must_use]
    pub fn member_position(&self, user_id: UserId) -> MemberPosition {
        let mut position = MemberPosition::default();
        for entry in self.groups.iter() {
            let currency = entry.group.currency;
            for record in &entry.expenses {
                let payer = record.expense.paid_by;
                for split in &record.splits {
                    if split.status == SettlementStatus::Confirmed {
                        continue;
                    }
                    if split.user_id == user_id {
                        position
                            .owes
                            .push(Self::debt_entry(record, split, payer, currency));
                    } else if payer == user_id {
                        position.owed_to.push(Self::debt_entry(
                            record,
                            split,
                            split.user_id,
                            currency,
                        ));
                    }
                }
            }
        }
        let by_date = |a: &DebtEntry, b: &DebtEntry| {
            a.date.cmp(&b.date).then(a.expense_id.cmp(&b.expense_id))
        };
        position.owes.sort_by(by_date);
        position.owed_to.sort_by(by_date);
        position
    }

    // ------------------------------------------------------------------
    // Direct member-to-member settlements
    // ------------------------------------------------------------------

    /// Record a direct payment between two members.
    pub fn record_settlement(
        &self,
        input: RecordSettlementInput,
    ) -> Result<DirectSettlement, LedgerError> {
        if input.amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveSettlement(input.amount));
        }
        let mut entry = self
            .groups
            .get_mut(&input.group_id)
            .ok_or(LedgerError::GroupNotFound(input.group_id))?;
        let state = &mut *entry;
        GroupService::ensure_member(&state.memberships, input.from_user)?;
        GroupService::ensure_member(&state.memberships, input.to_user)?;

        let record = DirectSettlement {
            id: SettlementId::new(),
            group_id: input.group_id,
            from_user: input.from_user,
            to_user: input.to_user,
            amount: input.amount,
            status: DirectSettlementStatus::Pending,
            created_at: Utc::now(),
            completed_at: None,
            payment_method: input.payment_method,
            transaction_reference: input.transaction_reference,
            notes: input.notes,
        };
        state.settlements.push(record.clone());
        Ok(record)
    }

    /// Mark a pending direct payment as settled.
    pub fn complete_settlement(
        &self,
        group_id: GroupId,
        settlement_id: SettlementId,
    ) -> Result<DirectSettlement, LedgerError> {
        self.close_settlement(group_id, settlement_id, DirectSettlementStatus::Settled)
    }

    /// Mark a pending direct payment as cancelled.
    pub fn cancel_settlement(
        &self,
        group_id: GroupId,
        settlement_id: SettlementId,
    ) -> Result<DirectSettlement, LedgerError> {
        self.close_settlement(group_id, settlement_id, DirectSettlementStatus::Cancelled)
    }

    /// List a group's direct settlement records.
    pub fn settlements(&self, group_id: GroupId) -> Result<Vec<DirectSettlement>, LedgerError> {
        self.groups
            .get(&group_id)
            .map(|entry| entry.settlements.clone())
            .ok_or(LedgerError::GroupNotFound(group_id))
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Run `f` against an expense record under the group's exclusive guard.
    ///
    /// The sum invariant is re-checked before `f` runs; a record whose
    /// splits no longer add up refuses every state change.
    fn with_expense<T>(
        &self,
        expense_id: ExpenseId,
        f: impl FnOnce(&Group, &mut ExpenseRecord) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let group_id = self
            .expense_index
            .get(&expense_id)
            .map(|g| *g)
            .ok_or(LedgerError::ExpenseNotFound(expense_id))?;
        let mut entry = self
            .groups
            .get_mut(&group_id)
            .ok_or(LedgerError::ExpenseNotFound(expense_id))?;
        let GroupState {
            group, expenses, ..
        } = &mut *entry;
        let record = expenses
            .iter_mut()
            .find(|r| r.expense.id == expense_id)
            .ok_or(LedgerError::ExpenseNotFound(expense_id))?;

        let total: Decimal =
            record.splits.iter().map(|s| s.amount_owed).sum::<Decimal>() + record.self_share;
        if total != record.expense.amount {
            return Err(LedgerError::CorruptedSplitSet(expense_id));
        }

        f(group, record)
    }

    fn find_split<'a>(
        record: &'a mut ExpenseRecord,
        expense_id: ExpenseId,
        member_id: UserId,
    ) -> Result<&'a mut Split, LedgerError> {
        record
            .splits
            .iter_mut()
            .find(|s| s.user_id == member_id)
            .ok_or(LedgerError::SplitNotFound {
                expense_id,
                user_id: member_id,
            })
    }

    fn debt_entry(
        record: &ExpenseRecord,
        split: &Split,
        counterparty: UserId,
        currency: Currency,
    ) -> DebtEntry {
        DebtEntry {
            expense_id: record.expense.id,
            group_id: record.expense.group_id,
            description: record.expense.description.clone(),
            counterparty,
            amount: Money::new(split.amount_owed, currency),
            date: record.expense.date,
            status: split.status,
        }
    }

    fn close_settlement(
        &self,
        group_id: GroupId,
        settlement_id: SettlementId,
        status: DirectSettlementStatus,
    ) -> Result<DirectSettlement, LedgerError> {
        let mut entry = self
            .groups
            .get_mut(&group_id)
            .ok_or(LedgerError::GroupNotFound(group_id))?;
        let record = entry
            .settlements
            .iter_mut()
            .find(|s| s.id == settlement_id)
            .ok_or(LedgerError::SettlementNotFound(settlement_id))?;
        if record.status != DirectSettlementStatus::Pending {
            return Err(LedgerError::SettlementClosed(settlement_id));
        }
        record.status = status;
        record.completed_at = Some(Utc::now());
        Ok(record.clone())
    }

    /// Post-commit monthly budget check for the payer.
    ///
    /// At-least-once, best-effort: profile data comes from an external
    /// collaborator; a payer without a configured budget falls back to the
    /// application default, and a zero budget disables the check.
    fn check_budget(&self, self_share: &SelfShareExpense) {
        let budget = self
            .profiles
            .monthly_budget(self_share.user_id)
            .unwrap_or(self.budget.default_monthly_budget);
        if budget <= Decimal::ZERO {
            return;
        }
        let spent = self
            .profiles
            .monthly_spend(
                self_share.user_id,
                self_share.date.year(),
                self_share.date.month(),
            )
            .unwrap_or(Decimal::ZERO);
        let total = spent + self_share.amount;
        if total > budget {
            self.notifier.budget_exceeded(self_share.user_id, total, budget);
        }
    }
}
