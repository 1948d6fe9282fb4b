// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

#[yare::parameterized(
    reg_region   = { CallbackAction::RegRegion(RegionId::new(3)), "reg:vil:3" },
    reg_district = { CallbackAction::RegDistrict(DistrictId::new(14)), "reg:tum:14" },
    reg_ok       = { CallbackAction::RegDistrictsOk, "reg:tum:ok" },
    reg_back     = { CallbackAction::RegBackToRegion, "reg:back:vil" },
    accept       = { CallbackAction::Accept(JobId::new(9)), "rq:accept:9" },
    start        = { CallbackAction::Start(JobId::new(9)), "rq:start:9" },
    finish       = { CallbackAction::Finish(JobId::new(9)), "rq:finish:9" },
    amount       = { CallbackAction::Amount(JobId::new(9)), "rq:amount:9" },
    parts        = { CallbackAction::Parts(JobId::new(9)), "rq:parts:9" },
    expenses     = { CallbackAction::Expenses(JobId::new(9)), "rq:travel:9" },
    photo        = { CallbackAction::Photo(JobId::new(9)), "rq:photo:9" },
    parts_pick   = { CallbackAction::PartsPick { job: JobId::new(9), part: PartId::new(4), page: 2 }, "zp:pick:9:4:2" },
    parts_page   = { CallbackAction::PartsPage { job: JobId::new(9), page: 1 }, "zp:pg:9:1" },
    parts_back   = { CallbackAction::PartsBack(JobId::new(9)), "zp:back:9" },
    exp_fare     = { CallbackAction::ExpenseFare(JobId::new(9)), "exp:type:fare:9" },
    exp_back     = { CallbackAction::ExpenseBack(JobId::new(9)), "exp:type:back:9" },
    hist_export  = { CallbackAction::HistoryExport, "hist:export" },
    set_lang     = { CallbackAction::SetLanguage, "set:lang" },
    logout       = { CallbackAction::Logout, "logout" },
    noop         = { CallbackAction::Noop, "noop" },
)]
fn encodes_and_parses(action: CallbackAction, wire: &str) {
    assert_eq!(action.encode(), wire);
    assert_eq!(CallbackAction::parse(wire), Some(action));
}

#[yare::parameterized(
    empty          = { "" },
    garbage        = { "hello world" },
    unknown_ns     = { "xx:yy:1" },
    missing_arg    = { "rq:accept:" },
    non_numeric    = { "rq:accept:abc" },
    extra_args     = { "rq:accept:1:2" },
    negative_id    = { "rq:accept:-1" },
    truncated_pick = { "zp:pick:1:2" },
)]
fn malformed_payloads_parse_to_none(wire: &str) {
    assert_eq!(CallbackAction::parse(wire), None);
}

proptest! {
    #[test]
    fn parse_never_panics(s in "\\PC*") {
        let _ = CallbackAction::parse(&s);
    }

    #[test]
    fn job_actions_roundtrip(id in 0u64..u64::MAX) {
        let action = CallbackAction::Finish(JobId::new(id));
        prop_assert_eq!(CallbackAction::parse(&action.encode()), Some(action));
    }
}
