// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use ustabot_core::{Direction, FlowState, JobId};

use crate::test_util::{Harness, CONTRACTOR, USER};
use crate::texts;

// ── Work amount ─────────────────────────────────────────────────────────

#[tokio::test]
async fn work_amount_sets_job_and_posts_income() {
    let h = Harness::new();
    h.seed_active_contractor();
    h.seed_progress_job(5);

    h.callback("rq:amount:5").await;
    assert_eq!(h.last_text(), texts::ASK_WORK_AMOUNT);

    h.text("250000").await;

    let job = h.job(5).await;
    assert_eq!(job.work_amount, Some(250_000));
    let entries = h.repo.ledger_entries(JobId::new(5));
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].direction, Direction::Income);
    assert_eq!(entries[0].amount, 250_000);
    assert_eq!(entries[0].note, "Service revenue");
    assert_eq!(entries[0].contractor, CONTRACTOR);
    assert_eq!(h.last_text(), "💰 Service amount set: 250 000.");
    assert!(h.router.sessions().get(USER, 0).is_none());
}

#[tokio::test]
async fn work_amount_rejects_non_digit_input() {
    let h = Harness::new();
    h.seed_active_contractor();
    h.seed_progress_job(5);
    h.callback("rq:amount:5").await;

    for input in ["0", "-500", "250 000", "250000.50", "lots"] {
        h.text(input).await;
        assert_eq!(h.last_text(), texts::BAD_AMOUNT, "input {input:?}");
        assert_eq!(h.router.sessions().get(USER, 0).unwrap().state, FlowState::WorkAmount);
    }
    assert!(h.repo.ledger_entries(JobId::new(5)).is_empty());
}

#[tokio::test]
async fn work_amount_updates_the_dashboard_indicator() {
    let h = Harness::new();
    h.seed_active_contractor();
    h.seed_progress_job(5);

    h.callback("rq:amount:5").await;
    h.text("90000").await;

    let card = h
        .channel
        .log()
        .into_iter()
        .rev()
        .find(|m| m.text.contains("🧾 Job #5"))
        .expect("expected a card render");
    assert!(card.text.contains("💰 Amount: 90 000"));
}

// ── Expense / income ────────────────────────────────────────────────────

#[tokio::test]
async fn travel_fare_posts_income_with_fixed_note() {
    let h = Harness::new();
    h.seed_active_contractor();
    h.seed_progress_job(5);

    h.callback("rq:travel:5").await;
    assert_eq!(h.last_text(), texts::EXPENSE_PROMPT);

    h.callback("exp:type:fare:5").await;
    assert_eq!(h.last_text(), texts::ASK_EXPENSE_AMOUNT);

    h.text("15000").await;

    let entries = h.repo.ledger_entries(JobId::new(5));
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].direction, Direction::Income);
    assert_eq!(entries[0].amount, 15_000);
    assert_eq!(entries[0].note, "Travel fare");
    assert_eq!(h.last_text(), "🧾 Recorded: +15 000 (Travel fare).");
    assert!(h.router.sessions().get(USER, 0).is_none());
}

#[tokio::test]
async fn free_text_category_posts_an_expense() {
    let h = Harness::new();
    h.seed_active_contractor();
    h.seed_progress_job(5);

    h.callback("rq:travel:5").await;
    h.text("Gasket set").await;
    assert_eq!(h.last_text(), texts::ASK_EXPENSE_AMOUNT);

    h.text("42000").await;

    let entries = h.repo.ledger_entries(JobId::new(5));
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].direction, Direction::Expense);
    assert_eq!(entries[0].note, "Gasket set");
    assert_eq!(h.last_text(), "🧾 Recorded: −42 000 (Gasket set).");
}

#[tokio::test]
async fn expense_back_clears_and_rerenders_the_card() {
    let h = Harness::new();
    h.seed_active_contractor();
    h.seed_progress_job(5);

    h.callback("rq:travel:5").await;
    h.callback("exp:type:back:5").await;

    assert!(h.router.sessions().get(USER, 0).is_none());
    assert!(h.last_text().contains("🧾 Job #5"));
    assert!(h.repo.ledger_entries(JobId::new(5)).is_empty());
}

#[tokio::test]
async fn blank_category_text_reprompts() {
    let h = Harness::new();
    h.seed_active_contractor();
    h.seed_progress_job(5);

    h.callback("rq:travel:5").await;
    h.text("   ").await;

    assert_eq!(h.last_text(), texts::EXPENSE_PROMPT);
    assert_eq!(h.router.sessions().get(USER, 0).unwrap().state, FlowState::ExpenseType);
}

#[tokio::test]
async fn bad_expense_amount_reprompts_without_posting() {
    let h = Harness::new();
    h.seed_active_contractor();
    h.seed_progress_job(5);

    h.callback("rq:travel:5").await;
    h.callback("exp:type:fare:5").await;
    h.text("a lot").await;

    assert_eq!(h.last_text(), texts::BAD_AMOUNT);
    assert!(h.repo.ledger_entries(JobId::new(5)).is_empty());
    assert_eq!(h.router.sessions().get(USER, 0).unwrap().state, FlowState::ExpenseAmount);
}

#[tokio::test]
async fn expense_total_shows_on_the_dashboard() {
    let h = Harness::new();
    h.seed_active_contractor();
    h.seed_progress_job(5);

    h.callback("rq:travel:5").await;
    h.text("Fuel").await;
    h.text("30000").await;

    let card = h
        .channel
        .log()
        .into_iter()
        .rev()
        .find(|m| m.text.contains("🧾 Job #5"))
        .expect("expected a card render");
    assert!(card.text.contains("🧾 Expense: 30 000"));
}

#[tokio::test]
async fn income_postings_do_not_count_as_expense_total() {
    let h = Harness::new();
    h.seed_active_contractor();
    h.seed_progress_job(5);

    h.callback("rq:travel:5").await;
    h.callback("exp:type:fare:5").await;
    h.text("15000").await;

    let facts = h.router.job_facts(JobId::new(5)).await.unwrap();
    assert_eq!(facts.expenses_total, 0);
    assert!(facts.has_ledger);
}
