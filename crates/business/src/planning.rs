//! Budget compliance and headcount planning.
//!
//! Both operations read one consistent snapshot of a department and
//! hand the figures to the pure planning rules. Neither writes anything.

use crate::error::{BusinessError, BusinessResult};
use crate::services::ServiceContext;
use rust_decimal::Decimal;
use staffledger_core::{
    budget_compliance, headcount_plan, BudgetCompliance, Capability, Department, HeadcountPlan,
};
use staffledger_persistence::{DepartmentRepo, EmployeeRepo, ProjectRepo};

pub struct PlanningService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PlanningService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Check a proposed salary increase against the department budget.
    pub async fn check_budget_compliance(
        &self,
        actor: &str,
        department_id: i64,
        percent_increase: Decimal,
    ) -> BusinessResult<BudgetCompliance> {
        self.ctx
            .authorize(actor, Capability::ViewDepartmentSummary)?;

        // One transaction so the budget and the salary total come from
        // the same snapshot.
        let mut tx = self.ctx.pool().begin().await.map_err(|e| {
            BusinessError::CommitFailed(format!("failed to begin transaction: {e}"))
        })?;

        let department =
            Department::try_from(DepartmentRepo::get_by_id(&mut tx, department_id).await?)?;
        let current_total: Decimal = EmployeeRepo::active_salaries(&mut tx, Some(department_id))
            .await?
            .iter()
            .sum();

        let compliance = budget_compliance(current_total, department.budget, percent_increase)?;

        tracing::debug!(
            department_id,
            utilization = %compliance.utilization_percent,
            status = %compliance.status,
            "budget compliance checked"
        );
        Ok(compliance)
    }

    /// Recommend a headcount for one department.
    pub async fn calculate_optimal_headcount(
        &self,
        actor: &str,
        department_id: i64,
    ) -> BusinessResult<HeadcountPlan> {
        self.ctx
            .authorize(actor, Capability::ViewDepartmentSummary)?;

        let mut tx = self.ctx.pool().begin().await.map_err(|e| {
            BusinessError::CommitFailed(format!("failed to begin transaction: {e}"))
        })?;

        let department =
            Department::try_from(DepartmentRepo::get_by_id(&mut tx, department_id).await?)?;
        let salaries = EmployeeRepo::active_salaries(&mut tx, Some(department_id)).await?;
        let headcount = salaries.len() as i64;
        let average_salary = if headcount > 0 {
            salaries.iter().sum::<Decimal>() / Decimal::from(headcount)
        } else {
            Decimal::ZERO
        };
        let active_projects = ProjectRepo::count_active(&mut tx).await?;

        Ok(headcount_plan(
            headcount,
            average_salary,
            department.budget,
            active_projects,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use staffledger_core::{
        AllowAll, BudgetStatus, Employee, HeadcountRecommendation, Project, ProjectStatus,
    };
    use staffledger_persistence::Ledger;
    use std::sync::Arc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    async fn fixture(budget: Decimal, salaries: &[Decimal], active_projects: i64) -> (Ledger, i64) {
        let ledger = Ledger::in_memory().await.unwrap();
        let mut conn = ledger.acquire().await.unwrap();

        let dept = Department::new(0, "Engineering", budget, None).unwrap();
        let dept_id = DepartmentRepo::insert(&mut conn, &dept).await.unwrap();

        for (i, salary) in salaries.iter().enumerate() {
            let emp = Employee::new(
                0,
                &format!("Emp {i}"),
                &format!("emp{i}@corp.test"),
                d(2020, 1, 1),
                *salary,
                Some(dept_id),
            )
            .unwrap();
            EmployeeRepo::insert(&mut conn, &emp).await.unwrap();
        }

        for i in 0..active_projects {
            let project = Project {
                id: 0,
                department_id: Some(dept_id),
                name: format!("Project {i}"),
                status: ProjectStatus::Active,
            };
            ProjectRepo::insert(&mut conn, &project).await.unwrap();
        }

        (ledger, dept_id)
    }

    #[tokio::test]
    async fn test_exactly_at_budget_is_warning_but_within() {
        let (ledger, dept_id) = fixture(dec!(100000), &[dec!(60000), dec!(40000)], 0).await;
        let ctx = ServiceContext::new(&ledger, Arc::new(AllowAll));
        let service = PlanningService::new(&ctx);

        let compliance = service
            .check_budget_compliance("alice", dept_id, dec!(0))
            .await
            .unwrap();
        assert_eq!(compliance.status, BudgetStatus::Warning90);
        assert!(compliance.is_within_budget);
    }

    #[tokio::test]
    async fn test_increase_pushes_over_budget() {
        let (ledger, dept_id) = fixture(dec!(100000), &[dec!(60000), dec!(40000)], 0).await;
        let ctx = ServiceContext::new(&ledger, Arc::new(AllowAll));
        let service = PlanningService::new(&ctx);

        let compliance = service
            .check_budget_compliance("alice", dept_id, dec!(5))
            .await
            .unwrap();
        assert_eq!(compliance.status, BudgetStatus::ExceedsBudget);
        assert!(!compliance.is_within_budget);
    }

    #[tokio::test]
    async fn test_inactive_salaries_excluded_from_total() {
        let (ledger, dept_id) = fixture(dec!(100000), &[dec!(50000), dec!(50000)], 0).await;
        {
            let mut conn = ledger.acquire().await.unwrap();
            EmployeeRepo::set_active(&mut conn, 2, false).await.unwrap();
        }
        let ctx = ServiceContext::new(&ledger, Arc::new(AllowAll));
        let service = PlanningService::new(&ctx);

        let compliance = service
            .check_budget_compliance("alice", dept_id, dec!(0))
            .await
            .unwrap();
        assert_eq!(compliance.current_total, dec!(50000));
        assert_eq!(compliance.status, BudgetStatus::WithinSafeLimits);
    }

    #[tokio::test]
    async fn test_unknown_department_is_not_found() {
        let (ledger, _) = fixture(dec!(100000), &[], 0).await;
        let ctx = ServiceContext::new(&ledger, Arc::new(AllowAll));
        let service = PlanningService::new(&ctx);

        let err = service
            .check_budget_compliance("alice", 99, dec!(0))
            .await
            .unwrap_err();
        let persistence = err
            .downcast_ref::<staffledger_persistence::PersistenceError>()
            .unwrap();
        assert!(persistence.is_not_found());
    }

    #[tokio::test]
    async fn test_high_workload_recommends_hiring() {
        // 1 head, 20 active projects -> workload 200
        let (ledger, dept_id) = fixture(dec!(100000), &[dec!(5000)], 20).await;
        let ctx = ServiceContext::new(&ledger, Arc::new(AllowAll));
        let service = PlanningService::new(&ctx);

        let plan = service
            .calculate_optimal_headcount("alice", dept_id)
            .await
            .unwrap();
        assert_eq!(plan.current_headcount, 1);
        assert_eq!(plan.active_projects, 20);
        assert_eq!(plan.recommended_headcount, 3);
        assert_eq!(plan.recommendation, HeadcountRecommendation::Hire);
    }

    #[tokio::test]
    async fn test_low_workload_recommends_reduction() {
        // 10 heads, 70 active projects -> workload 70
        let salaries = vec![dec!(5000); 10];
        let (ledger, dept_id) = fixture(dec!(1000000), &salaries, 70).await;
        let ctx = ServiceContext::new(&ledger, Arc::new(AllowAll));
        let service = PlanningService::new(&ctx);

        let plan = service
            .calculate_optimal_headcount("alice", dept_id)
            .await
            .unwrap();
        assert_eq!(plan.recommended_headcount, 9);
        assert_eq!(plan.recommendation, HeadcountRecommendation::Reduce);
    }

    #[tokio::test]
    async fn test_completed_projects_do_not_count() {
        let (ledger, dept_id) = fixture(dec!(100000), &[dec!(5000)], 0).await;
        {
            let mut conn = ledger.acquire().await.unwrap();
            let project = Project {
                id: 0,
                department_id: Some(dept_id),
                name: "Done".to_string(),
                status: ProjectStatus::Completed,
            };
            ProjectRepo::insert(&mut conn, &project).await.unwrap();
        }
        let ctx = ServiceContext::new(&ledger, Arc::new(AllowAll));
        let service = PlanningService::new(&ctx);

        let plan = service
            .calculate_optimal_headcount("alice", dept_id)
            .await
            .unwrap();
        assert_eq!(plan.active_projects, 0);
    }
}
