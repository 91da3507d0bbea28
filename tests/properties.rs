//! Property tests for pay arithmetic, aggregation and the calculation pass.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use payroll_engine::calculation::{calculate_pay, default_deduction_rate, round_currency};
use payroll_engine::config::PayrollRules;
use payroll_engine::engine::PayrollEngine;
use payroll_engine::models::{Employee, PayTotals, PayrollItem};
use payroll_engine::reporting::PayrollReports;
use payroll_engine::store::{
    InMemoryEmployeeDirectory, InMemoryItemStore, InMemoryRunStore, ItemStore,
};

fn arb_salary() -> impl Strategy<Value = Option<Decimal>> {
    prop_oneof![
        1 => Just(None),
        8 => (0i64..1_000_000_000, 0u32..5).prop_map(|(n, scale)| Some(Decimal::new(n, scale))),
    ]
}

fn arb_employees() -> impl Strategy<Value = Vec<Employee>> {
    prop::collection::vec(
        (
            arb_salary(),
            prop::option::of(prop::sample::select(vec!["ENG", "HR", "OPS", "", " "])),
        ),
        0..30,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (salary, department))| Employee {
                id: format!("emp_{:03}", i),
                first_name: Some("Prop".to_string()),
                last_name: None,
                department: department.map(str::to_string),
                base_salary: salary,
            })
            .collect()
    })
}

fn arb_item() -> impl Strategy<Value = PayrollItem> {
    (0i64..100_000_000, 0i64..1_000_000).prop_map(|(basic, bonus)| {
        let basic = Decimal::new(basic, 2);
        let bonus = Decimal::new(bonus, 2);
        let deductions = round_currency(basic * default_deduction_rate());
        PayrollItem {
            id: Uuid::new_v4(),
            run_id: Uuid::nil(),
            employee_id: "emp".to_string(),
            basic_salary: basic,
            deductions,
            bonus,
            net_salary: basic + bonus - deductions,
        }
    })
}

struct Harness {
    engine: Arc<PayrollEngine>,
    reports: PayrollReports,
    items: InMemoryItemStore,
}

fn harness(employees: Vec<Employee>) -> Harness {
    let runs = Arc::new(InMemoryRunStore::new());
    let items = InMemoryItemStore::new();
    let directory = Arc::new(InMemoryEmployeeDirectory::with_employees(employees));
    let engine = PayrollEngine::new(
        runs.clone(),
        Arc::new(items.clone()),
        directory.clone(),
        PayrollRules::default(),
    );
    Harness {
        engine: Arc::new(engine),
        reports: PayrollReports::new(runs, Arc::new(items.clone()), directory),
        items,
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn prop_item_is_balanced_and_deduction_rounded(salary in arb_salary()) {
        let employee = Employee {
            id: "emp".to_string(),
            first_name: None,
            last_name: None,
            department: None,
            base_salary: salary,
        };
        let pay = calculate_pay(&employee, default_deduction_rate());

        prop_assert_eq!(pay.net, pay.basic + pay.bonus - pay.deductions);
        prop_assert_eq!(pay.deductions, round_currency(pay.basic * default_deduction_rate()));
        prop_assert_eq!(pay.basic, round_currency(salary.unwrap_or_default()));
        prop_assert_eq!(pay.deductions.scale(), 2);
        prop_assert!(pay.bonus.is_zero());
    }

    #[test]
    fn prop_totals_do_not_depend_on_order(
        (items, shuffled) in prop::collection::vec(arb_item(), 0..40)
            .prop_flat_map(|items| (Just(items.clone()), Just(items).prop_shuffle()))
    ) {
        let forward = PayTotals::from_items(&items).unwrap();
        let reversed = PayTotals::from_items(items.iter().rev()).unwrap();
        let mixed = PayTotals::from_items(&shuffled).unwrap();

        prop_assert_eq!(&forward, &reversed);
        prop_assert_eq!(&forward, &mixed);
        prop_assert_eq!(
            forward.total_net,
            items.iter().map(|item| item.net_salary).sum::<Decimal>()
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_processing_twice_equals_processing_once(employees in arb_employees()) {
        let expected = employees.len();
        let h = harness(employees);

        let (first, second, summary_net) = runtime().block_on(async {
            let run = h.engine.create_run(2025, 1).await.unwrap();
            h.engine.process_run(run.id).await.unwrap();
            let first = h.items.list_by_run(run.id).await.unwrap();
            h.engine.process_run(run.id).await.unwrap();
            let second = h.items.list_by_run(run.id).await.unwrap();
            let summary = h.reports.payroll_summary(2025, 1).await.unwrap();
            (first, second, summary.totals.total_net)
        });

        prop_assert_eq!(first.len(), expected);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.iter().all(PayrollItem::is_balanced));
        prop_assert_eq!(
            summary_net,
            first.iter().map(|item| item.net_salary).sum::<Decimal>()
        );
    }

    #[test]
    fn prop_concurrent_processing_keeps_items_unique(
        employees in arb_employees(),
        callers in 2usize..8,
    ) {
        let expected = employees.len();
        let h = harness(employees);

        let (items, created) = runtime().block_on(async {
            let run = h.engine.create_run(2025, 1).await.unwrap();
            let mut handles = Vec::new();
            for _ in 0..callers {
                let engine = Arc::clone(&h.engine);
                handles.push(tokio::spawn(async move {
                    engine.process_run_detailed(run.id).await
                }));
            }

            let mut created = 0;
            for handle in handles {
                created += handle.await.unwrap().unwrap().created;
            }
            (h.items.list_by_run(run.id).await.unwrap(), created)
        });

        let distinct: HashSet<&str> = items.iter().map(|item| item.employee_id.as_str()).collect();
        prop_assert_eq!(items.len(), expected);
        prop_assert_eq!(distinct.len(), expected);
        prop_assert_eq!(created, expected);
    }

    #[test]
    fn prop_department_rows_cover_every_item(employees in arb_employees()) {
        let h = harness(employees);

        let (rows, summary) = runtime().block_on(async {
            let run = h.engine.create_run(2025, 1).await.unwrap();
            h.engine.process_run(run.id).await.unwrap();
            (
                h.reports.department_cost(2025, 1).await.unwrap(),
                h.reports.payroll_summary(2025, 1).await.unwrap(),
            )
        });

        let names: HashSet<&str> = rows.iter().map(|row| row.department.as_str()).collect();
        prop_assert_eq!(names.len(), rows.len());
        prop_assert!(rows.iter().all(|row| !row.department.trim().is_empty()));

        let total_net: Decimal = rows.iter().map(|row| row.totals.total_net).sum();
        prop_assert_eq!(total_net, summary.totals.total_net);
    }
}
