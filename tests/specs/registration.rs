// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registration conversation specs.

use crate::prelude::*;
use ustabot_core::{Activation, District, DistrictId, Region, RegionId};

fn seed_regions(spec: &Spec) {
    spec.repo.seed_region(
        Region { id: RegionId::new(1), name: "Toshkent".into() },
        vec![
            District {
                id: DistrictId::new(11),
                region_id: RegionId::new(1),
                name: "Chilonzor".into(),
            },
            District {
                id: DistrictId::new(12),
                region_id: RegionId::new(1),
                name: "Yunusobod".into(),
            },
        ],
    );
}

#[tokio::test]
async fn typed_local_number_is_normalized_to_full_form() {
    let spec = Spec::new();
    seed_regions(&spec);

    spec.command("start").await;
    spec.text("90 123-45-67").await;
    spec.callback("reg:vil:1").await;
    spec.callback("reg:tum:11").await;
    spec.callback("reg:tum:ok").await;
    spec.location(41.31, 69.24).await;
    spec.text("Anvar Karimov").await;

    let created = spec.repo.find_contractor_by_phone("+998901234567").await.unwrap().unwrap();
    assert_eq!(created.activation, Activation::Pending);
    assert!(!created.can_work());
}

#[tokio::test]
async fn shared_contact_with_country_code_passes_through() {
    let spec = Spec::new();
    spec.repo.seed_contractor(ContractorBuilder::new(7).phone("+998901234567").build());

    spec.command("start").await;
    spec.contact("+998 90 123 45 67").await;

    // Relinked rather than re-registered.
    let linked = spec.repo.find_contractor_by_user(USER).await.unwrap().unwrap();
    assert_eq!(linked.id, ContractorId::new(7));
    assert_eq!(spec.last_text(), texts::greeting("Usta 7"));
}

#[tokio::test]
async fn digitless_input_reprompts() {
    let spec = Spec::new();
    seed_regions(&spec);

    spec.command("start").await;
    spec.text("call me maybe").await;

    assert_eq!(spec.last_text(), texts::BAD_PHONE);
}

#[tokio::test]
async fn district_double_toggle_leaves_no_selection() {
    let spec = Spec::new();
    seed_regions(&spec);
    spec.command("start").await;
    spec.text("901234567").await;
    spec.callback("reg:vil:1").await;

    spec.callback("reg:tum:11").await;
    spec.callback("reg:tum:11").await;
    spec.callback("reg:tum:12").await;
    spec.callback("reg:tum:ok").await;
    spec.location(41.0, 69.0).await;
    spec.text("Anvar Karimov").await;

    let created = spec.repo.find_contractor_by_phone("+998901234567").await.unwrap().unwrap();
    assert_eq!(created.district_ids, vec![DistrictId::new(12)]);
}

#[tokio::test]
async fn confirm_with_no_district_is_refused() {
    let spec = Spec::new();
    seed_regions(&spec);
    spec.command("start").await;
    spec.text("901234567").await;
    spec.callback("reg:vil:1").await;

    spec.callback("reg:tum:ok").await;

    assert_eq!(spec.last_text(), texts::NEED_DISTRICT);
    assert!(spec.repo.find_contractor_by_user(USER).await.unwrap().is_none());
}

#[tokio::test]
async fn pending_contractor_is_gated_until_activation() {
    let spec = Spec::new();
    seed_regions(&spec);
    spec.command("start").await;
    spec.text("901234567").await;
    spec.callback("reg:vil:1").await;
    spec.callback("reg:tum:11").await;
    spec.callback("reg:tum:ok").await;
    spec.location(41.0, 69.0).await;
    spec.text("Anvar Karimov").await;

    // Freshly registered and immediately gated.
    spec.text(texts::MENU_ACTIVE_JOBS).await;
    assert_eq!(spec.last_text(), texts::PENDING_ACTIVATION);
}
