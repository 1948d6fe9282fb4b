// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inventory consumption specs: stock can never go negative, and the
//! dashboard reflects a posting immediately.

use std::sync::Arc;

use crate::prelude::*;
use ustabot_core::PartsMovement;

#[tokio::test]
async fn oversubscribed_qty_is_rejected_then_a_smaller_posting_lands() {
    let spec = Spec::with_contractor();
    spec.seed_progress_job(5);
    spec.repo.seed_inventory(inventory_line(CONTRACTOR.as_u64(), 10, "ZP-01", "Valve", 5.0));

    spec.callback("rq:parts:5").await;
    spec.callback("zp:pick:5:10:0").await;

    spec.text("6").await;
    assert_eq!(spec.last_text(), texts::insufficient_stock(5.0));
    assert_eq!(spec.on_hand(10).await, 5.0);

    spec.text("3").await;
    spec.text("0").await;

    assert_eq!(spec.on_hand(10).await, 2.0);
    assert_eq!(spec.repo.count_parts_movements(JobId::new(5)).await.unwrap(), 1);
}

#[tokio::test]
async fn concurrent_postings_never_drive_stock_negative() {
    let spec = Spec::with_contractor();
    spec.seed_progress_job(5);
    spec.repo.seed_inventory(inventory_line(CONTRACTOR.as_u64(), 10, "ZP-01", "Valve", 10.0));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let repo = Arc::clone(&spec.repo);
        handles.push(tokio::spawn(async move {
            repo.post_parts_consumption(PartsMovement {
                contractor: CONTRACTOR,
                part: PartId::new(10),
                job: JobId::new(5),
                qty: 3.0,
                unit_price: 0,
                note: None,
                at_epoch_ms: 0,
            })
            .await
            .is_ok()
        }));
    }
    let mut accepted = 0;
    for handle in handles {
        if handle.await.unwrap() {
            accepted += 1;
        }
    }

    assert_eq!(accepted, 3);
    assert_eq!(spec.on_hand(10).await, 1.0);
}

#[tokio::test]
async fn dashboard_shows_the_parts_check_right_after_posting() {
    let spec = Spec::with_contractor();
    spec.seed_progress_job(5);
    spec.repo.seed_inventory(inventory_line(CONTRACTOR.as_u64(), 10, "ZP-01", "Valve", 5.0));

    spec.callback("rq:parts:5").await;
    spec.callback("zp:pick:5:10:0").await;
    spec.text("1").await;
    spec.text("45000").await;

    let card = spec
        .channel
        .log()
        .into_iter()
        .rev()
        .find(|m| m.text.contains("🧾 Job #5"))
        .expect("expected a card render");
    assert!(card.text.contains("🔩 Parts: ✅"));
}

#[tokio::test]
async fn stock_drained_between_steps_bounces_back_to_quantity() {
    let spec = Spec::with_contractor();
    spec.seed_progress_job(5);
    spec.repo.seed_inventory(inventory_line(CONTRACTOR.as_u64(), 10, "ZP-01", "Valve", 5.0));

    spec.callback("rq:parts:5").await;
    spec.callback("zp:pick:5:10:0").await;
    spec.text("4").await;

    spec.repo
        .post_parts_consumption(PartsMovement {
            contractor: CONTRACTOR,
            part: PartId::new(10),
            job: JobId::new(99),
            qty: 3.0,
            unit_price: 0,
            note: None,
            at_epoch_ms: 0,
        })
        .await
        .unwrap();

    spec.text("0").await;

    assert_eq!(spec.last_text(), texts::insufficient_stock(2.0));
    assert_eq!(spec.on_hand(10).await, 2.0);
    assert_eq!(spec.repo.count_parts_movements(JobId::new(5)).await.unwrap(), 0);
}
