//! Share reconciliation against the in-memory vault.

use proptest::prelude::*;
use vaultsync::client::{ClientError, VaultCall};
use vaultsync::core::{PermissionLevel, TargetKind};
use vaultsync::perms::permission_level;
use vaultsync::{share_key, EntityKind, ErrorClass, FolderRecord, SecretRecord};
use vaultsync_testkit::generators::{target_kind, vault_id};
use vaultsync_testkit::{folder, init_tracing, secret, share, share_named, TestVault};

async fn shared_folder(t: &TestVault) -> FolderRecord {
    t.orchestrator
        .create_folder(folder("shared", None), &t.cancel)
        .await
        .unwrap()
}

async fn shared_secret(t: &TestVault) -> SecretRecord {
    t.orchestrator
        .create_secret(secret("db", "pw"), &t.cancel)
        .await
        .unwrap()
}

#[test]
fn modify_maps_to_levels() {
    assert_eq!(permission_level(true).code(), 7);
    assert_eq!(permission_level(false).code(), 1);
}

#[tokio::test]
async fn create_folder_share_grants_level() {
    init_tracing();
    let t = TestVault::new();
    let ops = t.group("Ops");
    let target = shared_folder(&t).await;
    t.vault.clear_calls();

    let record = t
        .orchestrator
        .create_share(TargetKind::Folder, share(&target.id, &ops.id, true), &t.cancel)
        .await
        .unwrap();

    let calls = t.vault.calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(calls[0], VaultCall::ShareFolder { .. }));

    let grants = t.vault.permissions_for(TargetKind::Folder, &target.id);
    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0].subject_id, ops.id);
    assert_eq!(grants[0].level, PermissionLevel::Owner);

    assert_eq!(
        record.id,
        share_key(TargetKind::Folder, &target.id, Some(&ops.id)).to_hex()
    );
}

#[tokio::test]
async fn create_resource_share_routes_to_resource() {
    let t = TestVault::new();
    let ops = t.group("Ops");
    let target = shared_secret(&t).await;
    t.vault.clear_calls();

    t.orchestrator
        .create_share(TargetKind::Resource, share(&target.id, &ops.id, false), &t.cancel)
        .await
        .unwrap();

    assert!(matches!(t.vault.calls()[0], VaultCall::ShareResource { .. }));
    let grants = t.vault.permissions_for(TargetKind::Resource, &target.id);
    assert_eq!(grants[0].level, PermissionLevel::Read);
}

#[tokio::test]
async fn empty_group_issues_no_share_calls() {
    let t = TestVault::new();
    let target = shared_folder(&t).await;
    t.vault.clear_calls();

    let record = t
        .orchestrator
        .create_share(TargetKind::Folder, share(&target.id, "", true), &t.cancel)
        .await
        .unwrap();
    assert!(t.vault.calls().is_empty());
    assert_eq!(record.share_group_id, None);

    // Update from empty to empty: no revoke, no grant.
    let updated = t
        .orchestrator
        .update_share(share(&target.id, "", false), &record, &t.cancel)
        .await
        .unwrap();
    assert!(t.vault.calls().is_empty());
    assert!(!updated.modify);
}

#[tokio::test]
async fn update_revokes_before_granting_even_when_unchanged() {
    init_tracing();
    let t = TestVault::new();
    let ops = t.group("Ops");
    let target = shared_folder(&t).await;
    let record = t
        .orchestrator
        .create_share(TargetKind::Folder, share(&target.id, &ops.id, false), &t.cancel)
        .await
        .unwrap();
    t.vault.clear_calls();

    let updated = t
        .orchestrator
        .update_share(share(&target.id, &ops.id, false), &record, &t.cancel)
        .await
        .unwrap();

    let calls = t.vault.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].is_revoke());
    assert!(calls[1].is_grant());
    assert_eq!(updated, record);
    assert_eq!(
        t.vault.permissions_for(TargetKind::Folder, &target.id)[0].level,
        PermissionLevel::Read
    );
}

#[tokio::test]
async fn update_to_new_group_rederives_id() {
    let t = TestVault::new();
    let ops = t.group("Ops");
    let dev = t.group("Dev");
    let target = shared_folder(&t).await;
    let record = t
        .orchestrator
        .create_share(TargetKind::Folder, share(&target.id, &ops.id, true), &t.cancel)
        .await
        .unwrap();

    let updated = t
        .orchestrator
        .update_share(share(&target.id, &dev.id, true), &record, &t.cancel)
        .await
        .unwrap();

    assert_ne!(updated.id, record.id);
    let grants = t.vault.permissions_for(TargetKind::Folder, &target.id);
    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0].subject_id, dev.id);
}

#[tokio::test]
async fn grant_failure_after_revoke_is_partial_application() {
    init_tracing();
    let t = TestVault::new();
    let ops = t.group("Ops");
    let dev = t.group("Dev");
    let target = shared_secret(&t).await;
    let record = t
        .orchestrator
        .create_share(TargetKind::Resource, share(&target.id, &ops.id, true), &t.cancel)
        .await
        .unwrap();
    t.vault
        .fail_when(VaultCall::is_grant, ClientError::Rejected("forbidden".into()));

    let err = t
        .orchestrator
        .update_share(share(&target.id, &dev.id, true), &record, &t.cancel)
        .await
        .unwrap_err();

    assert_eq!(err.class(), ErrorClass::PartialApplication);
    assert_eq!(err.entity, EntityKind::ResourceShare);
    assert!(err.to_string().contains(&ops.id));
    assert!(t
        .vault
        .permissions_for(TargetKind::Resource, &target.id)
        .is_empty());
}

#[tokio::test]
async fn revoke_failure_stops_before_grant() {
    let t = TestVault::new();
    let ops = t.group("Ops");
    let dev = t.group("Dev");
    let target = shared_folder(&t).await;
    let record = t
        .orchestrator
        .create_share(TargetKind::Folder, share(&target.id, &ops.id, true), &t.cancel)
        .await
        .unwrap();
    t.vault.clear_calls();
    t.vault
        .fail_when(VaultCall::is_revoke, ClientError::Transport("timeout".into()));

    let err = t
        .orchestrator
        .update_share(share(&target.id, &dev.id, true), &record, &t.cancel)
        .await
        .unwrap_err();

    assert_eq!(err.class(), ErrorClass::RemoteCall);
    assert_eq!(t.vault.calls().len(), 1);
    let grants = t.vault.permissions_for(TargetKind::Folder, &target.id);
    assert_eq!(grants[0].subject_id, ops.id);
}

#[tokio::test]
async fn share_by_group_name() {
    let t = TestVault::new();
    t.group("Ops");
    let newest = t.group("Ops");
    let target = shared_folder(&t).await;

    let record = t
        .orchestrator
        .create_share(TargetKind::Folder, share_named(&target.id, "Ops", true), &t.cancel)
        .await
        .unwrap();

    assert_eq!(record.share_group_id.as_deref(), Some(newest.id.as_str()));
    assert_eq!(record.share_group_name.as_deref(), Some("Ops"));

    let err = t
        .orchestrator
        .create_share(TargetKind::Folder, share_named(&target.id, "Nobody", true), &t.cancel)
        .await
        .unwrap_err();
    assert_eq!(err.class(), ErrorClass::LookupMiss);
}

#[tokio::test]
async fn read_returns_record_and_delete_revokes() {
    let t = TestVault::new();
    let ops = t.group("Ops");
    let target = shared_folder(&t).await;
    let record = t
        .orchestrator
        .create_share(TargetKind::Folder, share(&target.id, &ops.id, true), &t.cancel)
        .await
        .unwrap();
    t.vault.clear_calls();

    assert_eq!(t.orchestrator.read_share(&record), record);
    assert!(t.vault.calls().is_empty());

    t.orchestrator.delete_share(&record, &t.cancel).await.unwrap();
    let calls = t.vault.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].is_revoke());
    assert!(t
        .vault
        .permissions_for(TargetKind::Folder, &target.id)
        .is_empty());
}

#[tokio::test]
async fn missing_target_is_configuration_error() {
    let t = TestVault::new();
    let mut descriptor = share("x", "g", true);
    descriptor.target_id = None;

    let err = t
        .orchestrator
        .create_share(TargetKind::Resource, descriptor, &t.cancel)
        .await
        .unwrap_err();
    assert_eq!(err.class(), ErrorClass::Configuration);
    assert!(err.to_string().contains("resource_id"));
}

proptest! {
    #[test]
    fn prop_share_key_is_stable_per_group(
        kind in target_kind(),
        target in vault_id(),
        a in vault_id(),
        b in vault_id(),
    ) {
        let key = share_key(kind, &target, Some(&a));
        prop_assert_eq!(key, share_key(kind, &target, Some(&a)));
        if a != b {
            prop_assert_ne!(key, share_key(kind, &target, Some(&b)));
        }
    }
}
