use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;
use tomatillo_core::aggregate;
use tomatillo_core::calendar::{days_of_month, days_of_week, days_of_year};
use tomatillo_core::db::establish_connection;
use tomatillo_core::error::CoreError;
use tomatillo_core::grid::{self, GridOptions, YearLayout};
use tomatillo_core::models::*;
use tomatillo_core::reconciler::{self, TrackingKey};
use tomatillo_core::repository::{SqliteRepository, TaskRepository, TrackingRepository};
use tomatillo_core::slot::Slot;

/// Helper function to create a test database
async fn setup_test_db() -> (SqliteRepository, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");

    let pool = establish_connection(&db_path.to_string_lossy())
        .await
        .expect("Failed to establish test database connection");

    (SqliteRepository::new(pool), temp_dir)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(day: NaiveDate, hour: u32) -> NaiveDateTime {
    day.and_hms_opt(hour, 0, 0).unwrap()
}

/// Helper function to create a test task
async fn create_test_task(repo: &SqliteRepository, name: &str, estimate: i64, created: Option<NaiveDateTime>) -> Task {
    repo.add_task(NewTaskData {
        name: name.to_string(),
        estimate,
        created_at: created,
    })
    .await
    .expect("Failed to create test task")
}

fn key(task_id: i64, day: NaiveDate, slot: u32) -> TrackingKey {
    TrackingKey {
        task_id,
        date: day,
        slot: Slot::new(slot).unwrap(),
    }
}

#[tokio::test]
async fn test_basic_task_lifecycle() {
    let (repo, _temp_dir) = setup_test_db().await;

    let task = create_test_task(&repo, "  Write report  ", 3, None).await;
    assert_eq!(task.name, "Write report");
    assert_eq!(task.estimate, 3);
    assert_eq!(task.actual, 0);
    assert!(!task.done);
    assert_eq!(task.progress(), TaskProgress::Todo);

    let task = repo.increment_actual(task.id).await.unwrap();
    assert_eq!(task.actual, 1);
    assert_eq!(task.progress(), TaskProgress::InProgress);

    let task = repo.set_estimate(task.id, 5).await.unwrap();
    assert_eq!(task.estimate, 5);
    assert_eq!(task.actual, 1);

    let done = repo.set_done(task.id).await.unwrap();
    assert!(done.done);
    // Marking done again is a no-op, not an error.
    let again = repo.set_done(task.id).await.unwrap();
    assert!(again.done);
    assert_eq!(again.updated_at, done.updated_at);

    repo.delete_task(task.id).await.unwrap();
    assert!(repo.find_task_by_id(task.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_task_validation() {
    let (repo, _temp_dir) = setup_test_db().await;

    let empty = repo
        .add_task(NewTaskData { name: "   ".to_string(), estimate: 1, ..Default::default() })
        .await;
    assert!(matches!(empty, Err(CoreError::InvalidInput(_))));

    let negative = repo
        .add_task(NewTaskData { name: "Plan".to_string(), estimate: -1, ..Default::default() })
        .await;
    assert!(matches!(negative, Err(CoreError::InvalidInput(_))));

    let task = create_test_task(&repo, "Plan", 1, None).await;
    assert!(matches!(
        repo.set_estimate(task.id, -2).await,
        Err(CoreError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_mutations_on_missing_task_are_not_found() {
    let (repo, _temp_dir) = setup_test_db().await;

    assert!(matches!(repo.increment_actual(42).await, Err(CoreError::NotFound(_))));
    assert!(matches!(repo.set_estimate(42, 3).await, Err(CoreError::NotFound(_))));
    assert!(matches!(repo.set_done(42).await, Err(CoreError::NotFound(_))));
    assert!(matches!(repo.delete_task(42).await, Err(CoreError::NotFound(_))));
    assert!(matches!(
        repo.upsert_tracking(42, date(2024, 9, 20), Slot::FIRST).await,
        Err(CoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_reconcile_round_trip() {
    let (repo, _temp_dir) = setup_test_db().await;
    let task = create_test_task(&repo, "Write report", 3, None).await;
    let day = date(2024, 9, 20);

    let first = reconciler::reconcile(&repo, key(task.id, day, 10)).await.unwrap();
    assert_eq!(first, TrackingStatus::Active);
    let second = reconciler::reconcile(&repo, key(task.id, day, 10)).await.unwrap();
    assert_eq!(second, TrackingStatus::Done);

    let records = repo.find_tracking_on(day).await.unwrap();
    assert_eq!(
        records,
        vec![TrackingRecord {
            task_id: task.id,
            date: day,
            slot: Slot::new(10).unwrap(),
            status: TrackingStatus::Done,
        }]
    );

    // Reconciling never moves the task's counter.
    let task = repo.find_task_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(task.actual, 0);
}

#[tokio::test]
async fn test_reconcile_saturates_at_done() {
    let (repo, _temp_dir) = setup_test_db().await;
    let task = create_test_task(&repo, "Review", 2, None).await;
    let day = date(2024, 9, 20);

    for _ in 0..2 {
        reconciler::reconcile(&repo, key(task.id, day, 30)).await.unwrap();
    }
    for _ in 0..3 {
        let status = reconciler::reconcile(&repo, key(task.id, day, 30)).await.unwrap();
        assert_eq!(status, TrackingStatus::Done);
    }
    assert_eq!(repo.find_tracking_on(day).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_yearly_counts() {
    let (repo, _temp_dir) = setup_test_db().await;
    let first = create_test_task(&repo, "Task 1", 2, None).await;
    let second = create_test_task(&repo, "Task 2", 2, None).await;
    let new_year = date(2021, 1, 1);

    for slot in [10, 11, 12] {
        reconciler::reconcile(&repo, key(first.id, new_year, slot)).await.unwrap();
        reconciler::reconcile(&repo, key(second.id, new_year, slot)).await.unwrap();
    }
    reconciler::reconcile(&repo, key(first.id, date(2021, 2, 1), 20)).await.unwrap();

    let counts = aggregate::yearly_counts(&repo, 2021).await.unwrap();
    assert_eq!(counts.len(), 365);
    assert_eq!(counts[0], DayCount { date: new_year, count: 6 });
    assert_eq!(counts[31], DayCount { date: date(2021, 2, 1), count: 1 });
    assert_eq!(counts.iter().map(|c| c.count).sum::<i64>(), 7);
    assert!(counts.windows(2).all(|w| w[0].date < w[1].date));
}

#[tokio::test]
async fn test_yearly_counts_at_storable_year_bounds() {
    let (repo, _temp_dir) = setup_test_db().await;
    let task = create_test_task(&repo, "Task", 1, None).await;
    reconciler::reconcile(&repo, key(task.id, date(9999, 12, 31), 47)).await.unwrap();

    let last = aggregate::yearly_counts(&repo, 9999).await.unwrap();
    assert_eq!(last.len(), 365);
    assert_eq!(last[364], DayCount { date: date(9999, 12, 31), count: 1 });

    let first = aggregate::yearly_counts(&repo, 1).await.unwrap();
    assert_eq!(first.len(), 365);
    assert!(first.iter().all(|c| c.count == 0));

    let beyond = aggregate::yearly_counts(&repo, 10000).await;
    assert!(matches!(beyond, Err(CoreError::InvalidInput(_))));
}

#[tokio::test]
async fn test_store_count_query_is_gap_free() {
    let (repo, _temp_dir) = setup_test_db().await;
    let task = create_test_task(&repo, "Task", 1, None).await;
    reconciler::reconcile(&repo, key(task.id, date(2024, 2, 29), 0)).await.unwrap();

    let range = days_of_month(date(2024, 2, 1));
    let rows = repo.count_tracking_in(&range).await.unwrap();
    assert_eq!(rows.len(), 29);
    assert_eq!(rows.last(), Some(&DayCount { date: date(2024, 2, 29), count: 1 }));
}

#[tokio::test]
async fn test_monthly_totals_fill_gaps() {
    let (repo, _temp_dir) = setup_test_db().await;
    let first = create_test_task(&repo, "Morning", 3, Some(at(date(2024, 9, 1), 9))).await;
    create_test_task(&repo, "Afternoon", 2, Some(at(date(2024, 9, 1), 15))).await;
    let mid = create_test_task(&repo, "Mid month", 4, Some(at(date(2024, 9, 15), 10))).await;
    create_test_task(&repo, "Next month", 8, Some(at(date(2024, 10, 1), 10))).await;

    repo.increment_actual(first.id).await.unwrap();
    repo.increment_actual(first.id).await.unwrap();
    repo.set_done(first.id).await.unwrap();
    repo.set_done(mid.id).await.unwrap();

    let totals = aggregate::monthly_totals(&repo, date(2024, 9, 20)).await.unwrap();

    assert_eq!(totals.len(), 30);
    assert_eq!(
        totals[0],
        DayAggregate { date: date(2024, 9, 1), total_estimate: 5, total_actual: 2, total_done: 1 }
    );
    assert_eq!(
        totals[14],
        DayAggregate { date: date(2024, 9, 15), total_estimate: 4, total_actual: 0, total_done: 1 }
    );
    for (i, total) in totals.iter().enumerate() {
        assert_eq!(total.date, date(2024, 9, i as u32 + 1));
        if i != 0 && i != 14 {
            assert_eq!(*total, DayAggregate::empty(total.date));
        }
    }
}

#[tokio::test]
async fn test_list_filters() {
    let (repo, _temp_dir) = setup_test_db().await;
    let wip = create_test_task(&repo, "Task 1", 5, Some(at(date(2024, 9, 18), 9))).await;
    create_test_task(&repo, "Task 2", 3, Some(at(date(2024, 9, 19), 9))).await;
    let done = create_test_task(&repo, "Task 3", 4, Some(at(date(2024, 9, 20), 9))).await;
    create_test_task(&repo, "Old task", 1, Some(at(date(2024, 8, 1), 9))).await;

    repo.increment_actual(wip.id).await.unwrap();
    repo.increment_actual(done.id).await.unwrap();
    repo.set_done(done.id).await.unwrap();

    let names = |tasks: Vec<Task>| tasks.into_iter().map(|t| t.name).collect::<Vec<_>>();
    let since = Some(date(2024, 9, 14));

    let all = repo.find_tasks(&TaskFilter { since, status: StatusFilter::All }).await.unwrap();
    assert_eq!(names(all), vec!["Task 3", "Task 2", "Task 1"]);

    let wip_only = repo.find_tasks(&TaskFilter { since, status: StatusFilter::Wip }).await.unwrap();
    assert_eq!(names(wip_only), vec!["Task 1"]);

    let todo = repo.find_tasks(&TaskFilter { since, status: StatusFilter::Todo }).await.unwrap();
    assert_eq!(names(todo), vec!["Task 2"]);

    let finished = repo.find_tasks(&TaskFilter { since, status: StatusFilter::Done }).await.unwrap();
    assert_eq!(names(finished), vec!["Task 3"]);

    let everything = repo.find_tasks(&TaskFilter::default()).await.unwrap();
    assert_eq!(everything.len(), 4);
}

#[tokio::test]
async fn test_tasks_created_in_range() {
    let (repo, _temp_dir) = setup_test_db().await;
    create_test_task(&repo, "Before", 1, Some(at(date(2024, 9, 14), 23))).await;
    create_test_task(&repo, "Sunday", 1, Some(at(date(2024, 9, 15), 0))).await;
    create_test_task(&repo, "Saturday", 1, Some(at(date(2024, 9, 21), 23))).await;

    let week = days_of_week(date(2024, 9, 20));
    let tasks = repo.find_tasks_created_in(&week).await.unwrap();
    let names: Vec<_> = tasks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Sunday", "Saturday"]);
}

#[tokio::test]
async fn test_delete_cascades_to_tracking() {
    let (repo, _temp_dir) = setup_test_db().await;
    let keep = create_test_task(&repo, "Keep", 1, None).await;
    let drop = create_test_task(&repo, "Drop", 1, None).await;
    let day = date(2024, 9, 20);

    reconciler::reconcile(&repo, key(keep.id, day, 4)).await.unwrap();
    reconciler::reconcile(&repo, key(drop.id, day, 5)).await.unwrap();
    reconciler::reconcile(&repo, key(drop.id, day, 6)).await.unwrap();

    repo.delete_task(drop.id).await.unwrap();

    let records = repo.find_tracking_on(day).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].task_id, keep.id);
}

#[tokio::test]
async fn test_block_report_from_store() {
    let (repo, _temp_dir) = setup_test_db().await;
    let task = create_test_task(&repo, "Deep work", 4, None).await;
    let now = date(2024, 9, 20).and_hms_opt(9, 45, 0).unwrap();
    let (key, _) = reconciler::activate_now(&repo, task.id, now).await.unwrap();
    assert_eq!(key.slot.index(), 19);

    let week = days_of_week(now.date());
    let days = aggregate::block_data(&repo, &week).await.unwrap();
    let report = grid::render_block_report("Weekly Report", &week, &days, &GridOptions::default());

    let friday = report.lines().find(|l| l.starts_with("║ 2024-09-20")).unwrap();
    assert_eq!(friday.matches(grid::FILLED).count(), 1);
    assert!(friday.contains(" ·▓ "));
    let others = report
        .lines()
        .filter(|l| l.starts_with("║ 2024-09-") && !l.starts_with("║ 2024-09-20"));
    assert!(others.into_iter().all(|l| !l.contains(grid::FILLED)));
}

#[tokio::test]
async fn test_year_calendar_from_store() {
    let (repo, _temp_dir) = setup_test_db().await;
    let task = create_test_task(&repo, "Task", 1, None).await;
    for slot in 0..12 {
        reconciler::reconcile(&repo, key(task.id, date(2021, 1, 1), slot)).await.unwrap();
    }

    let counts = aggregate::tracking_counts(&repo, &days_of_year(2021).unwrap()).await.unwrap();
    let options = GridOptions { color: false, layout: YearLayout::Strip };
    let out = grid::render_year_calendar(2021, &counts, &options).unwrap();
    assert!(out.lines().any(|l| l.starts_with("║ Jan   12 ··")));
}
