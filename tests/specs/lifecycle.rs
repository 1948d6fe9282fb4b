// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job lifecycle specs: the finish guard and stage monotonicity.

use crate::prelude::*;
use ustabot_core::PartsMovement;

async fn drive_prerequisite(spec: &Spec, which: &str) {
    match which {
        "amount" => {
            spec.callback("rq:amount:5").await;
            spec.text("250000").await;
        }
        "parts" => {
            spec.repo.seed_inventory(inventory_line(
                CONTRACTOR.as_u64(),
                10,
                "ZP-01",
                "Valve",
                5.0,
            ));
            spec.callback("rq:parts:5").await;
            spec.callback("zp:pick:5:10:0").await;
            spec.text("1").await;
            spec.text("0").await;
        }
        "ledger" => {
            spec.callback("rq:travel:5").await;
            spec.callback("exp:type:fare:5").await;
            spec.text("15000").await;
        }
        "photo" => {
            spec.callback("rq:photo:5").await;
            spec.photo("file-1").await;
            spec.text(texts::BTN_DONE).await;
        }
        other => panic!("unknown prerequisite {other}"),
    }
}

#[tokio::test]
async fn finish_succeeds_only_once_all_four_prerequisites_hold() {
    let spec = Spec::with_contractor();
    spec.seed_progress_job(5);

    for step in ["amount", "parts", "ledger", "photo"] {
        // Not finishable yet.
        spec.callback("rq:finish:5").await;
        assert_eq!(spec.job(5).await.stage_name, "Jarayonda", "finished early before {step}");
        drive_prerequisite(&spec, step).await;
    }

    spec.callback("rq:finish:5").await;
    assert_eq!(spec.job(5).await.stage_name, "Done");
}

#[tokio::test]
async fn blocked_finish_names_exactly_the_missing_items() {
    let spec = Spec::with_contractor();
    // Amount set on the record and a photo attached; no parts, no ledger.
    spec.repo.seed_job(
        JobBuilder::new(5)
            .contractor(CONTRACTOR)
            .stage_name("Jarayonda")
            .work_amount(250_000)
            .photos(1)
            .build(),
    );

    spec.callback("rq:finish:5").await;

    let blocked = spec
        .channel
        .sent_texts()
        .into_iter()
        .find(|t| t.starts_with("⛔"))
        .expect("expected a finish-blocked notice");
    assert!(blocked.contains("🔩 Parts"));
    assert!(blocked.contains("🧮 Expense / travel fare"));
    assert!(!blocked.contains("💰 Service amount"));
    assert!(!blocked.contains("🖼️ Photo"));
}

#[tokio::test]
async fn work_amount_alone_does_not_unlock_finish() {
    let spec = Spec::with_contractor();
    spec.seed_progress_job(5);
    drive_prerequisite(&spec, "amount").await;

    spec.callback("rq:finish:5").await;

    assert_eq!(spec.job(5).await.stage_name, "Jarayonda");
}

#[tokio::test]
async fn start_never_regresses_a_done_job() {
    let spec = Spec::with_contractor();
    spec.repo.seed_job(
        JobBuilder::new(5).contractor(CONTRACTOR).stage_name("Yakunlandi").build(),
    );

    spec.callback("rq:start:5").await;
    spec.callback("rq:accept:5").await;

    assert_eq!(spec.job(5).await.stage_name, "Yakunlandi");
}

#[tokio::test]
async fn accept_then_start_walks_the_stages_forward() {
    let spec = Spec::with_contractor();
    spec.repo
        .seed_job(JobBuilder::new(5).contractor(CONTRACTOR).stage_name("New lead").build());

    spec.callback("rq:accept:5").await;
    assert_eq!(spec.job(5).await.stage_name, "Waiting");

    spec.callback("rq:start:5").await;
    assert_eq!(spec.job(5).await.stage_name, "In progress");
}

#[tokio::test]
async fn finished_job_posts_an_operator_note() {
    let spec = Spec::with_contractor();
    spec.repo.seed_job(
        JobBuilder::new(5)
            .contractor(CONTRACTOR)
            .stage_name("Jarayonda")
            .work_amount(250_000)
            .photos(1)
            .build(),
    );
    spec.repo.seed_inventory(inventory_line(CONTRACTOR.as_u64(), 10, "ZP-01", "Valve", 5.0));
    spec.repo
        .post_parts_consumption(PartsMovement {
            contractor: CONTRACTOR,
            part: PartId::new(10),
            job: JobId::new(5),
            qty: 1.0,
            unit_price: 0,
            note: None,
            at_epoch_ms: 0,
        })
        .await
        .unwrap();
    drive_prerequisite(&spec, "ledger").await;

    spec.callback("rq:finish:5").await;

    assert_eq!(spec.job(5).await.stage_name, "Done");
    let notes = spec.repo.job_notes(JobId::new(5));
    assert_eq!(notes.len(), 1);
    assert!(notes[0].contains("finished"));
}
