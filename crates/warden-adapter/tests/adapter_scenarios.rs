//! End-to-end adapter scenarios against the mock avatar

use alloy_primitives::{Address, Bytes, U256};
use assert_matches::assert_matches;
use std::sync::Arc;
use warden_adapter::{encode_multisend_call, PackedBatchCodec};
use warden_core::{
    Action, AdapterEvent, CallDescriptor, CallMode, ModuleMembership, WardenError,
};
use warden_testkit::*;

const BUTTON: Address = Address::repeat_byte(0xb0);
const OTHER: Address = Address::repeat_byte(0xb1);

fn push_button() -> Bytes {
    Bytes::from_static(&[0x6d, 0xf2, 0x72, 0x1d])
}

#[test]
fn scenario_a_not_enabled_caller_is_rejected() {
    init_test_tracing();
    let fixture = TestAdapter::new();
    let request = CallDescriptor::direct(BUTTON, U256::ZERO, push_button());

    assert_eq!(
        fixture.adapter.exec(STRANGER, &request),
        Err(WardenError::not_authorized(STRANGER))
    );
    assert_eq!(
        fixture.adapter.exec_and_return_data(STRANGER, &request),
        Err(WardenError::not_authorized(STRANGER))
    );
    assert_eq!(fixture.avatar.attempts(), 0);
    assert!(fixture.events.events().is_empty());
}

#[test]
fn scenario_b_direct_call_reaches_avatar() {
    let fixture = TestAdapter::new();
    let request = CallDescriptor::direct(BUTTON, U256::ZERO, push_button());

    fixture.adapter.exec(MODULE, &request).unwrap();

    assert_eq!(
        fixture.avatar.last_batch(),
        Some(vec![Action::new(BUTTON, U256::ZERO, push_button())])
    );
    assert_eq!(
        fixture.events.events(),
        vec![AdapterEvent::ExecutionFromModuleSuccess { module: MODULE }]
    );
}

#[test]
fn scenario_c_multisend_batch_is_unwrapped_in_order() {
    let fixture = TestAdapter::new();
    let p1 = Bytes::from_static(b"first");
    let p2 = Bytes::from_static(b"second");
    let calldata = encode_multisend_call(&[
        CallDescriptor::direct(BUTTON, U256::ZERO, p1.clone()),
        CallDescriptor::direct(OTHER, U256::ZERO, p2.clone()),
    ]);

    fixture
        .adapter
        .exec(MODULE, &CallDescriptor::delegated(MULTISEND, calldata))
        .unwrap();

    assert_eq!(
        fixture.avatar.executed(),
        vec![vec![
            Action::new(BUTTON, U256::ZERO, p1),
            Action::new(OTHER, U256::ZERO, p2),
        ]]
    );
}

#[test]
fn scenario_c_packed_batch_is_unwrapped_in_order() {
    let fixture = TestAdapter::new();
    let calls = vec![
        CallDescriptor::direct(BUTTON, U256::ZERO, push_button()),
        CallDescriptor::direct(OTHER, U256::from(3), Bytes::new()),
    ];
    let request = CallDescriptor::delegated(PACKED_BATCHER, PackedBatchCodec::encode(&calls));

    fixture.adapter.exec(MODULE, &request).unwrap();

    assert_eq!(
        fixture.avatar.last_batch(),
        Some(vec![
            Action::new(BUTTON, U256::ZERO, push_button()),
            Action::new(OTHER, U256::from(3), Bytes::new()),
        ])
    );
}

#[test]
fn scenario_d_delegated_entry_in_batch_fails_whole_request() {
    let fixture = TestAdapter::new();
    let calldata = encode_multisend_call(&[
        CallDescriptor::direct(BUTTON, U256::ZERO, push_button()),
        CallDescriptor::new(OTHER, U256::ZERO, Bytes::new(), CallMode::Delegated),
    ]);

    assert_eq!(
        fixture
            .adapter
            .exec(MODULE, &CallDescriptor::delegated(MULTISEND, calldata)),
        Err(WardenError::DelegatedCallNotPermitted)
    );
    assert_eq!(fixture.avatar.attempts(), 0);
    assert!(fixture.events.events().is_empty());
}

#[test]
fn scenario_e_delegated_call_to_unregistered_target() {
    let fixture = TestAdapter::new();
    let request = CallDescriptor::delegated(BUTTON, push_button());

    assert_eq!(
        fixture.adapter.exec(MODULE, &request),
        Err(WardenError::UnwrapperNotAuthorized { target: BUTTON })
    );
    assert_eq!(fixture.avatar.attempts(), 0);
}

#[test]
fn delegated_batch_with_value_is_rejected_by_unwrapper() {
    let fixture = TestAdapter::new();
    let calldata = encode_multisend_call(&[CallDescriptor::direct(BUTTON, U256::ZERO, push_button())]);
    let request = CallDescriptor::new(MULTISEND, U256::from(1), calldata, CallMode::Delegated);

    assert_matches!(
        fixture.adapter.exec(MODULE, &request),
        Err(WardenError::UnsupportedRequestShape { .. })
    );
    assert_eq!(fixture.avatar.attempts(), 0);
}

#[test]
fn malformed_batch_is_rejected_before_submission() {
    let fixture = TestAdapter::new();
    let mut packed = PackedBatchCodec::encode(&[CallDescriptor::direct(BUTTON, U256::ZERO, push_button())]).to_vec();
    packed.pop();
    let request = CallDescriptor::delegated(PACKED_BATCHER, packed);

    assert_matches!(
        fixture.adapter.exec(MODULE, &request),
        Err(WardenError::MalformedBatch { .. })
    );
    assert_eq!(fixture.avatar.attempts(), 0);
}

#[test]
fn avatar_failure_is_propagated_without_event() {
    let fixture = TestAdapter::new();
    fixture.avatar.fail_on(OTHER);
    let calldata = encode_multisend_call(&[
        CallDescriptor::direct(BUTTON, U256::ZERO, push_button()),
        CallDescriptor::direct(OTHER, U256::ZERO, Bytes::from_static(&[0xba, 0xdd, 0xda, 0x7a])),
    ]);

    let result = fixture
        .adapter
        .exec(MODULE, &CallDescriptor::delegated(MULTISEND, calldata));

    assert_matches!(result, Err(WardenError::Avatar(err)) if err.failed_action == Some(1));
    assert!(fixture.avatar.executed().is_empty());
    assert!(fixture.events.events().is_empty());
}

#[test]
fn avatar_without_execute_permission_rejects() {
    let avatar = Arc::new(MockAvatar::without_permission(AVATAR));
    let fixture = TestAdapter::with_avatar(&test_config(), avatar);
    let request = CallDescriptor::direct(BUTTON, U256::ZERO, push_button());

    assert_matches!(
        fixture.adapter.exec(MODULE, &request),
        Err(WardenError::Avatar(_))
    );

    fixture.avatar.grant_execute_permission();
    fixture.adapter.exec(MODULE, &request).unwrap();
    assert_eq!(fixture.avatar.executed().len(), 1);
}

#[test]
fn return_data_follows_action_order() {
    let fixture = TestAdapter::new();
    let calls = [
        CallDescriptor::direct(BUTTON, U256::ZERO, Bytes::from_static(&[0x01])),
        CallDescriptor::direct(OTHER, U256::ZERO, Bytes::from_static(&[0x02, 0x03])),
    ];
    let request = CallDescriptor::delegated(MULTISEND, encode_multisend_call(&calls));

    let outputs = fixture.adapter.exec_and_return_data(MODULE, &request).unwrap();

    assert_eq!(
        outputs,
        vec![
            Bytes::from_static(&[0xb0, 0x01]),
            Bytes::from_static(&[0xb1, 0x02, 0x03]),
        ]
    );
    assert_eq!(
        fixture.events.events(),
        vec![AdapterEvent::ExecutionFromModuleSuccess { module: MODULE }]
    );
}

#[test]
fn module_entry_points_report_success() {
    let fixture = TestAdapter::new();

    let success = fixture
        .adapter
        .exec_transaction_from_module(MODULE, BUTTON, U256::ZERO, push_button(), CallMode::Direct)
        .unwrap();
    assert!(success);

    let calldata = encode_multisend_call(&[
        CallDescriptor::direct(BUTTON, U256::ZERO, Bytes::from_static(&[0x01])),
        CallDescriptor::direct(OTHER, U256::ZERO, Bytes::from_static(&[0x02])),
    ]);
    let (success, return_data) = fixture
        .adapter
        .exec_transaction_from_module_return_data(
            MODULE,
            MULTISEND,
            U256::ZERO,
            calldata,
            CallMode::Delegated,
        )
        .unwrap();
    assert!(success);
    assert_eq!(return_data, Bytes::from_static(&[0xb0, 0x01, 0xb1, 0x02]));
    assert_eq!(fixture.avatar.executed().len(), 2);
}

#[test]
fn disabled_module_loses_access() {
    let fixture = TestAdapter::new();
    let request = CallDescriptor::direct(BUTTON, U256::ZERO, push_button());

    fixture.modules.disable_module(MODULE, OWNER).unwrap();
    assert!(!fixture.modules.is_module_enabled(&MODULE));
    assert_eq!(
        fixture.adapter.exec(MODULE, &request),
        Err(WardenError::not_authorized(MODULE))
    );

    fixture.modules.enable_module(STRANGER, OWNER).unwrap();
    fixture.adapter.exec(STRANGER, &request).unwrap();
    assert_eq!(
        fixture.events.events(),
        vec![
            AdapterEvent::DisabledModule { module: MODULE },
            AdapterEvent::EnabledModule { module: STRANGER },
            AdapterEvent::ExecutionFromModuleSuccess { module: STRANGER },
        ]
    );
}

#[test]
fn adapter_exposes_roles() {
    let fixture = TestAdapter::new();
    assert_eq!(fixture.adapter.owner(), OWNER);
    assert_eq!(fixture.adapter.avatar(), AVATAR);
    assert_eq!(
        fixture.adapter.registry().binding(&MULTISEND),
        Some(MULTISEND_UNWRAPPER)
    );
}
