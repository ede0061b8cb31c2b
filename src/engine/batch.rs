//! Payroll draft generation and finalization.
//!
//! Generation is an idempotent batch: it recomputes every eligible
//! employee's draft for a period from approved attendance and replaces
//! the period's previous drafts in one storage operation. Finalized
//! records are never regenerated; employees holding one are skipped
//! with a warning so the caller can see why a draft is absent.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculation::{aggregate_attendance, calculate_pay};
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, NewPayroll, PayrollRecord, PayrollStatus, Period};
use crate::storage::{AttendanceStore, ConfigSource, DirectoryStore, PayrollStore};

/// A non-fatal condition raised while generating a period's drafts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchWarning {
    /// The employee the warning concerns.
    pub employee_id: u32,
    /// Stable warning code: `finalized_skipped` or `missing_position`.
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

/// The outcome of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateOutcome {
    /// The period the run covered.
    pub period: Period,
    /// The freshly inserted draft records, ascending by employee id.
    pub records: Vec<PayrollRecord>,
    /// Non-fatal conditions encountered during the run.
    pub warnings: Vec<BatchWarning>,
}

/// Runs payroll generation and finalization over the stores.
pub struct PayrollBatchRunner {
    attendance: Arc<dyn AttendanceStore>,
    payroll: Arc<dyn PayrollStore>,
    directory: Arc<dyn DirectoryStore>,
    config: Arc<dyn ConfigSource>,
}

impl PayrollBatchRunner {
    /// Creates a batch runner over the given stores.
    pub fn new(
        attendance: Arc<dyn AttendanceStore>,
        payroll: Arc<dyn PayrollStore>,
        directory: Arc<dyn DirectoryStore>,
        config: Arc<dyn ConfigSource>,
    ) -> Self {
        Self {
            attendance,
            payroll,
            directory,
            config,
        }
    }

    /// Generates draft payroll records for every eligible employee in a
    /// period.
    ///
    /// Eligible means active and not an admin. One configuration
    /// snapshot is taken up front and used for every employee in the
    /// run. Employees already holding a finalized record for the period
    /// are skipped with a `finalized_skipped` warning; an employee with
    /// no resolvable position gets a zero hourly rate and a
    /// `missing_position` warning rather than failing the run. Bonuses
    /// are looked up per employee and default to zero.
    ///
    /// Existing drafts for the period are replaced atomically, so
    /// rerunning generation converges on the same records instead of
    /// accumulating duplicates.
    pub async fn generate(
        &self,
        period: &str,
        bonuses: &HashMap<u32, i64>,
        generated_at: NaiveDateTime,
    ) -> EngineResult<GenerateOutcome> {
        let period: Period = period.parse()?;
        let config = self.config.snapshot().await;

        let mut employees = self.directory.employees().await?;
        employees.retain(Employee::is_payroll_eligible);
        employees.sort_by_key(|employee| employee.id);

        let finalized: HashSet<u32> = self
            .payroll
            .list_for_period(period)
            .await?
            .into_iter()
            .filter(|record| record.status == PayrollStatus::Final)
            .map(|record| record.employee_id)
            .collect();

        let mut warnings = Vec::new();
        let mut drafts = Vec::new();

        for employee in &employees {
            if finalized.contains(&employee.id) {
                warn!(
                    employee_id = employee.id,
                    %period,
                    "Skipping employee with finalized payroll"
                );
                warnings.push(BatchWarning {
                    employee_id: employee.id,
                    code: "finalized_skipped".to_string(),
                    message: format!(
                        "Employee {} already has a finalized payroll for {}",
                        employee.id, period
                    ),
                });
                continue;
            }

            let hourly_rate = self.resolve_hourly_rate(employee, &mut warnings).await?;
            let records = self
                .attendance
                .list_for_period(employee.id, period)
                .await?;
            let totals = aggregate_attendance(&records, period, &config);
            let bonus = bonuses.get(&employee.id).copied().unwrap_or(0);
            let pay = calculate_pay(&totals, hourly_rate, bonus, &config);

            drafts.push(NewPayroll {
                employee_id: employee.id,
                period,
                basic_salary: pay.basic_salary,
                overtime_pay: pay.overtime_pay,
                bonus: pay.bonus,
                deductions: pay.deductions,
                total_net: pay.total_net,
                generated_at,
            });
        }

        // Replace even when no drafts were produced, so stale drafts
        // from a previous run never outlive the employees they covered.
        let records = self.payroll.replace_drafts(period, drafts).await?;
        info!(
            %period,
            records = records.len(),
            warnings = warnings.len(),
            "Generated payroll drafts"
        );

        Ok(GenerateOutcome {
            period,
            records,
            warnings,
        })
    }

    /// Finalizes a payroll record, stamping `finalized_at`.
    ///
    /// Finalizing an already-final record is a no-op returning the
    /// record unchanged. Fails with [`EngineError::PayrollNotFound`]
    /// for an unknown id.
    pub async fn finalize(&self, payroll_id: u32, at: NaiveDateTime) -> EngineResult<PayrollRecord> {
        match self.payroll.finalize(payroll_id, at).await? {
            Some(record) => Ok(record),
            None => Err(EngineError::PayrollNotFound { payroll_id }),
        }
    }

    /// Lists every payroll record for a period, drafts and finals.
    pub async fn list(&self, period: &str) -> EngineResult<Vec<PayrollRecord>> {
        let period: Period = period.parse()?;
        Ok(self.payroll.list_for_period(period).await?)
    }

    /// Resolves an employee's hourly rate from their position, falling
    /// back to zero with a warning when no position resolves.
    async fn resolve_hourly_rate(
        &self,
        employee: &Employee,
        warnings: &mut Vec<BatchWarning>,
    ) -> EngineResult<i64> {
        let position = match employee.position_id {
            Some(position_id) => self.directory.position(position_id).await?,
            None => None,
        };

        match position {
            Some(position) => Ok(position.hourly_rate),
            None => {
                warn!(
                    employee_id = employee.id,
                    "Employee has no resolvable position, applying zero rate"
                );
                warnings.push(BatchWarning {
                    employee_id: employee.id,
                    code: "missing_position".to_string(),
                    message: format!(
                        "Employee {} has no resolvable position; zero rate applied",
                        employee.id
                    ),
                });
                Ok(0)
            }
        }
    }
}
