//! The payroll office: stateful workflows over the four repositories.
//!
//! [`PayrollOffice`] ties employees, leave requests, allowances and payroll
//! records together. Calculations are delegated to [`crate::calculation`] and
//! summaries to [`crate::report`]; the office only looks things up and
//! persists results.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::calculation::{configure_allowance, generate_all_payrolls, generate_payroll};
use crate::config::PayrollRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Allowance, Employee, LeaveDecision, LeaveRequest, PayPeriod, PayrollRecord,
};
use crate::report::{
    EmployeeSummary, LeaveStatusSummary, MonthlySummary, OverviewSummary, YearlySummary,
    employee_summaries, leave_status_summary, monthly_summary, overview_summary, yearly_summary,
};
use crate::store::{InMemoryRepository, Repository};

/// A payroll office backed entirely by in-memory repositories.
pub type InMemoryPayrollOffice = PayrollOffice<
    InMemoryRepository<Employee>,
    InMemoryRepository<LeaveRequest>,
    InMemoryRepository<Allowance>,
    InMemoryRepository<PayrollRecord>,
>;

/// Employee, leave, allowance and payroll workflows over pluggable storage.
pub struct PayrollOffice<E, L, A, P> {
    rules: PayrollRules,
    employees: E,
    leave_requests: L,
    allowances: A,
    payrolls: P,
}

impl InMemoryPayrollOffice {
    /// Creates an office with empty in-memory repositories.
    pub fn in_memory(rules: PayrollRules) -> Self {
        Self::new(
            rules,
            InMemoryRepository::new(),
            InMemoryRepository::new(),
            InMemoryRepository::new(),
            InMemoryRepository::new(),
        )
    }
}

impl<E, L, A, P> PayrollOffice<E, L, A, P>
where
    E: Repository<Employee>,
    L: Repository<LeaveRequest>,
    A: Repository<Allowance>,
    P: Repository<PayrollRecord>,
{
    /// Creates an office over the given repositories.
    pub fn new(rules: PayrollRules, employees: E, leave_requests: L, allowances: A, payrolls: P) -> Self {
        Self {
            rules,
            employees,
            leave_requests,
            allowances,
            payrolls,
        }
    }

    /// The rules applied to every calculation.
    pub fn rules(&self) -> &PayrollRules {
        &self.rules
    }

    /// Adds or replaces an employee.
    pub fn register_employee(&mut self, employee: Employee) {
        info!(employee_id = %employee.id, "Registered employee");
        self.employees.upsert(employee);
    }

    /// Looks up an employee by ID.
    pub fn employee(&self, employee_id: &str) -> EngineResult<Employee> {
        self.employees.get(employee_id).ok_or_else(|| {
            warn!(employee_id, "Employee not found");
            EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            }
        })
    }

    /// Every employee, active or not, in registration order.
    pub fn employees(&self) -> Vec<Employee> {
        self.employees.list()
    }

    /// Every leave request in submission order.
    pub fn leave_requests(&self) -> Vec<LeaveRequest> {
        self.leave_requests.list()
    }

    /// Files a pending leave request for an employee.
    ///
    /// The ID must not belong to any stored request, whatever its status.
    pub fn submit_leave(
        &mut self,
        leave_id: &str,
        employee_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: &str,
        applied_on: NaiveDate,
    ) -> EngineResult<LeaveRequest> {
        if self.leave_requests.get(leave_id).is_some() {
            warn!(leave_id, "Leave request ID already in use");
            return Err(EngineError::DuplicateLeaveRequest {
                leave_id: leave_id.to_string(),
            });
        }

        let employee = self.employee(employee_id)?;
        let request = LeaveRequest::new(
            leave_id,
            employee_id,
            employee.full_name(),
            start_date,
            end_date,
            reason,
            applied_on,
        )?;

        info!(
            leave_id,
            employee_id,
            days = request.days,
            "Submitted leave request"
        );
        self.leave_requests.upsert(request.clone());
        Ok(request)
    }

    /// Approves or rejects a pending leave request.
    pub fn decide_leave(
        &mut self,
        leave_id: &str,
        decision: LeaveDecision,
        admin_notes: Option<String>,
    ) -> EngineResult<LeaveRequest> {
        let pending =
            self.leave_requests
                .get(leave_id)
                .ok_or_else(|| EngineError::LeaveRequestNotFound {
                    leave_id: leave_id.to_string(),
                })?;

        let decided = pending.decide(decision, admin_notes)?;
        info!(leave_id, status = %decided.status, "Leave request decided");
        self.leave_requests.upsert(decided.clone());
        Ok(decided)
    }

    /// Saves an employee's allowances, recomputing HRA and DA.
    pub fn save_allowance(
        &mut self,
        employee_id: &str,
        travel_allowance: Decimal,
        medical_allowance: Decimal,
        washing_allowance: Decimal,
    ) -> EngineResult<Allowance> {
        let employee = self.employee(employee_id)?;
        let allowance = configure_allowance(
            &employee,
            travel_allowance,
            medical_allowance,
            washing_allowance,
            &self.rules,
        );

        info!(employee_id, "Saved allowances");
        self.allowances.upsert(allowance.clone());
        Ok(allowance)
    }

    /// Generates and stores one employee's payroll for a period.
    ///
    /// Regenerating for the same period replaces the earlier record.
    pub fn generate_payroll(
        &mut self,
        employee_id: &str,
        period: PayPeriod,
        generated_at: DateTime<Utc>,
    ) -> EngineResult<PayrollRecord> {
        let employee = self.employee(employee_id)?;
        let record = generate_payroll(
            &employee,
            period,
            &self.leave_requests.list(),
            &self.allowances.list(),
            &self.rules,
            generated_at,
        );

        self.persist(record.clone());
        Ok(record)
    }

    /// Generates and stores payroll for every active employee.
    ///
    /// The period is the month containing `generated_at`.
    pub fn generate_all_payrolls(&mut self, generated_at: DateTime<Utc>) -> Vec<PayrollRecord> {
        let period = PayPeriod::containing(generated_at.date_naive());
        let records = generate_all_payrolls(
            &self.employees.list(),
            period,
            &self.leave_requests.list(),
            &self.allowances.list(),
            &self.rules,
            generated_at,
        );

        for record in &records {
            self.persist(record.clone());
        }
        records
    }

    fn persist(&mut self, record: PayrollRecord) {
        let id = record.id.clone();
        match self.payrolls.upsert(record) {
            Some(_) => info!(payroll_id = %id, "Replaced payroll record"),
            None => info!(payroll_id = %id, "Stored payroll record"),
        }
    }

    /// An employee's payroll records, most recent period first.
    pub fn payroll_history(&self, employee_id: &str) -> Vec<PayrollRecord> {
        let mut history: Vec<PayrollRecord> = self
            .payrolls
            .list()
            .into_iter()
            .filter(|r| r.employee_id == employee_id)
            .collect();
        history.sort_by(|a, b| b.period().cmp(&a.period()));
        debug!(employee_id, records = history.len(), "Loaded payroll history");
        history
    }

    /// Every stored payroll record.
    pub fn payrolls(&self) -> Vec<PayrollRecord> {
        self.payrolls.list()
    }

    /// Summarises stored payroll for one month.
    pub fn monthly_summary(&self, period: PayPeriod) -> EngineResult<MonthlySummary> {
        monthly_summary(&self.payrolls.list(), period)
    }

    /// Summarises stored payroll for one year.
    pub fn yearly_summary(&self, year: i32) -> EngineResult<YearlySummary> {
        yearly_summary(&self.payrolls.list(), year)
    }

    /// Summarises stored payroll and leave per employee.
    pub fn employee_summaries(&self) -> Vec<EmployeeSummary> {
        employee_summaries(
            &self.employees.list(),
            &self.payrolls.list(),
            &self.leave_requests.list(),
        )
    }

    /// Counts stored leave requests by status.
    pub fn leave_status_summary(&self) -> LeaveStatusSummary {
        leave_status_summary(&self.employees.list(), &self.leave_requests.list())
    }

    /// Headline counts for the office as of `period`.
    pub fn overview_summary(&self, period: PayPeriod) -> OverviewSummary {
        overview_summary(
            &self.employees.list(),
            &self.payrolls.list(),
            &self.leave_requests.list(),
            period,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_employee(id: &str, base_salary: i64, is_active: bool) -> Employee {
        Employee {
            id: id.to_string(),
            first_name: "Asha".to_string(),
            last_name: id.to_string(),
            department: "Engineering".to_string(),
            position: "Developer".to_string(),
            base_salary: Decimal::from(base_salary),
            is_active,
        }
    }

    fn create_test_office() -> InMemoryPayrollOffice {
        let mut office = PayrollOffice::in_memory(PayrollRules::default());
        office.register_employee(create_test_employee("emp-001", 65000, true));
        office
    }

    fn march_28() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 28, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_unknown_employee_is_not_found() {
        let office = create_test_office();
        assert!(matches!(
            office.employee("emp-999"),
            Err(EngineError::EmployeeNotFound { .. })
        ));
    }

    #[test]
    fn test_submit_leave_for_unknown_employee_fails() {
        let mut office = create_test_office();
        let result = office.submit_leave(
            "leave-001",
            "emp-999",
            date(2025, 3, 3),
            date(2025, 3, 4),
            "",
            date(2025, 3, 1),
        );
        assert!(matches!(result, Err(EngineError::EmployeeNotFound { .. })));
        assert!(office.leave_requests().is_empty());
    }

    #[test]
    fn test_leave_lifecycle() {
        let mut office = create_test_office();
        let submitted = office
            .submit_leave(
                "leave-001",
                "emp-001",
                date(2025, 3, 10),
                date(2025, 3, 14),
                "Family event",
                date(2025, 3, 1),
            )
            .unwrap();
        assert_eq!(submitted.days, 5);
        assert_eq!(submitted.employee_name, "Asha emp-001");

        let approved = office
            .decide_leave("leave-001", LeaveDecision::Approve, Some("Enjoy".to_string()))
            .unwrap();
        assert!(approved.is_approved());
        assert_eq!(approved.admin_notes.as_deref(), Some("Enjoy"));

        let again = office.decide_leave("leave-001", LeaveDecision::Reject, None);
        assert!(matches!(again, Err(EngineError::LeaveAlreadyDecided { .. })));

        let missing = office.decide_leave("leave-404", LeaveDecision::Approve, None);
        assert!(matches!(missing, Err(EngineError::LeaveRequestNotFound { .. })));
    }

    #[test]
    fn test_resubmitting_existing_leave_id_is_rejected() {
        let mut office = create_test_office();
        office
            .submit_leave(
                "leave-001",
                "emp-001",
                date(2025, 3, 10),
                date(2025, 3, 14),
                "Family event",
                date(2025, 3, 1),
            )
            .unwrap();
        office
            .decide_leave("leave-001", LeaveDecision::Approve, None)
            .unwrap();

        let resubmitted = office.submit_leave(
            "leave-001",
            "emp-001",
            date(2025, 3, 20),
            date(2025, 3, 21),
            "Second try",
            date(2025, 3, 15),
        );
        assert!(matches!(
            resubmitted,
            Err(EngineError::DuplicateLeaveRequest { .. })
        ));

        let stored = office.leave_requests();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].is_approved());
        assert_eq!(stored[0].days, 5);
        assert_eq!(stored[0].start_date, date(2025, 3, 10));

        let again = office.decide_leave("leave-001", LeaveDecision::Reject, None);
        assert!(matches!(again, Err(EngineError::LeaveAlreadyDecided { .. })));
    }

    #[test]
    fn test_regenerating_replaces_not_duplicates() {
        let mut office = create_test_office();
        let period = PayPeriod::new(3, 2025).unwrap();

        let first = office.generate_payroll("emp-001", period, march_28()).unwrap();
        assert_eq!(first.net_salary, Decimal::from(93600));

        office
            .submit_leave(
                "leave-001",
                "emp-001",
                date(2025, 3, 10),
                date(2025, 3, 14),
                "",
                date(2025, 3, 1),
            )
            .unwrap();
        office
            .decide_leave("leave-001", LeaveDecision::Approve, None)
            .unwrap();

        let second = office.generate_payroll("emp-001", period, march_28()).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(office.payrolls().len(), 1);
        assert_eq!(office.payrolls()[0].net_salary, Decimal::from(82767));
    }

    #[test]
    fn test_saved_allowance_feeds_payroll() {
        let mut office = create_test_office();
        let allowance = office
            .save_allowance(
                "emp-001",
                Decimal::from(1000),
                Decimal::from(500),
                Decimal::from(100),
            )
            .unwrap();
        assert_eq!(allowance.hra, Decimal::from(26000));
        assert_eq!(allowance.da, Decimal::from(13000));

        let record = office
            .generate_payroll("emp-001", PayPeriod::new(3, 2025).unwrap(), march_28())
            .unwrap();
        assert_eq!(record.gross_salary, Decimal::from(105600));
        assert_eq!(record.allowances.travel, Decimal::from(1000));
    }

    #[test]
    fn test_allowance_snapshot_survives_salary_change() {
        let mut office = create_test_office();
        office
            .save_allowance("emp-001", Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
            .unwrap();
        office.register_employee(create_test_employee("emp-001", 80000, true));

        let record = office
            .generate_payroll("emp-001", PayPeriod::new(3, 2025).unwrap(), march_28())
            .unwrap();
        assert_eq!(record.base_salary, Decimal::from(80000));
        assert_eq!(record.allowances.hra, Decimal::from(26000));
    }

    #[test]
    fn test_batch_uses_current_period_and_skips_inactive() {
        let mut office = create_test_office();
        office.register_employee(create_test_employee("emp-002", 40000, false));
        office.register_employee(create_test_employee("emp-003", 30000, true));

        let records = office.generate_all_payrolls(march_28());

        let ids: Vec<&str> = records.iter().map(|r| r.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["emp-001", "emp-003"]);
        assert!(records.iter().all(|r| r.month == 3 && r.year == 2025));
        assert_eq!(office.payrolls().len(), 2);

        office.generate_all_payrolls(march_28());
        assert_eq!(office.payrolls().len(), 2);
    }

    #[test]
    fn test_history_is_most_recent_first() {
        let mut office = create_test_office();
        for month in [1, 3, 2] {
            office
                .generate_payroll("emp-001", PayPeriod::new(month, 2025).unwrap(), march_28())
                .unwrap();
        }
        office
            .generate_payroll("emp-001", PayPeriod::new(12, 2024).unwrap(), march_28())
            .unwrap();

        let months: Vec<(i32, u32)> = office
            .payroll_history("emp-001")
            .iter()
            .map(|r| (r.year, r.month))
            .collect();
        assert_eq!(months, vec![(2025, 3), (2025, 2), (2025, 1), (2024, 12)]);
        assert!(office.payroll_history("emp-999").is_empty());
    }

    #[test]
    fn test_summaries_read_stored_state() {
        let mut office = create_test_office();
        assert!(matches!(
            office.monthly_summary(PayPeriod::new(3, 2025).unwrap()),
            Err(EngineError::NoPayrollData { .. })
        ));

        office.generate_all_payrolls(march_28());

        let monthly = office
            .monthly_summary(PayPeriod::new(3, 2025).unwrap())
            .unwrap();
        assert_eq!(monthly.employee_count, 1);
        assert_eq!(monthly.total_deductions, Decimal::from(10400));

        assert_eq!(office.yearly_summary(2025).unwrap().record_count, 1);
        assert_eq!(office.employee_summaries()[0].payroll_count, 1);
        assert_eq!(office.leave_status_summary().totals.total, 0);
    }

    #[test]
    fn test_overview_counts_current_state() {
        let mut office = create_test_office();
        office.register_employee(create_test_employee("emp-002", 40000, false));
        office
            .submit_leave(
                "leave-001",
                "emp-001",
                date(2025, 3, 10),
                date(2025, 3, 11),
                "",
                date(2025, 3, 1),
            )
            .unwrap();
        office.generate_all_payrolls(march_28());

        let overview = office.overview_summary(PayPeriod::new(3, 2025).unwrap());
        assert_eq!(overview.total_employees, 2);
        assert_eq!(overview.active_employees, 1);
        assert_eq!(overview.total_leave_requests, 1);
        assert_eq!(overview.pending_leave_requests, 1);
        assert_eq!(overview.payrolls_this_period, 1);

        let april = office.overview_summary(PayPeriod::new(4, 2025).unwrap());
        assert_eq!(april.payrolls_this_period, 0);
    }
}
