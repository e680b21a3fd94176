//! PermissionReconciler: turns share transitions into share calls.

use tracing::{debug, info, warn};

use vaultsync_client::{CancelSignal, ClientError, VaultClient};
use vaultsync_core::{
    resolve_group_id, ListFilter, LookupKind, PermissionLevel, ShareOperation, SubjectRef,
    TargetKind,
};

use crate::error::{PermsError, Result};
use crate::state::{SharePlan, ShareTarget};

/// Level requested by a `modify` flag: Owner (7) or Read (1).
pub fn permission_level(modify: bool) -> PermissionLevel {
    PermissionLevel::from_modify(modify)
}

/// Reconciles share grants against a vault.
///
/// Holds no state between calls. Every operation issues at most two share
/// calls, revoke before grant, and never retries.
pub struct PermissionReconciler<V> {
    client: V,
}

impl<V: VaultClient> PermissionReconciler<V> {
    pub fn new(client: V) -> Self {
        Self { client }
    }

    /// Resolve a subject reference to a group ID. `Unshared` resolves to `None`.
    pub async fn resolve_subject(
        &self,
        subject: &SubjectRef,
        cancel: &CancelSignal,
    ) -> Result<Option<String>> {
        match subject {
            SubjectRef::Unshared => Ok(None),
            SubjectRef::GroupId(id) => Ok(Some(id.clone())),
            SubjectRef::GroupName(name) => {
                debug!(group_name = %name, "listing groups");
                let groups = cancel
                    .run(self.client.get_groups(&ListFilter::all()))
                    .await
                    .map_err(|e| PermsError::remote("get_groups", e))?;

                let resolution = resolve_group_id(&groups, name);
                if resolution.is_ambiguous() {
                    warn!(group_name = %name, "group name is ambiguous, using the last match");
                }
                Ok(Some(resolution.require(LookupKind::Group, name)?))
            }
        }
    }

    /// `Unshared -> Shared(level)`. No call when `subject` is `None`.
    pub async fn create(
        &self,
        target: &ShareTarget,
        subject: Option<&str>,
        level: PermissionLevel,
        cancel: &CancelSignal,
    ) -> Result<()> {
        self.apply(target, SharePlan::create(subject, level), cancel)
            .await?;
        info!(share = %target, subject = ?subject, level = level.code(), "share created");
        Ok(())
    }

    /// Revoke `old_subject` on `old_target`, then grant `new_subject` on
    /// `new_target` at `level`.
    ///
    /// Both phases run even when nothing changed. If the grant fails after
    /// the revoke succeeded the result is [`PermsError::PartialApplication`].
    pub async fn update(
        &self,
        old_target: &ShareTarget,
        old_subject: Option<&str>,
        new_target: &ShareTarget,
        new_subject: Option<&str>,
        level: PermissionLevel,
        cancel: &CancelSignal,
    ) -> Result<()> {
        self.apply_between(
            old_target,
            new_target,
            SharePlan::update(old_subject, new_subject, level),
            cancel,
        )
        .await?;
        info!(
            share = %new_target,
            old_subject = ?old_subject,
            new_subject = ?new_subject,
            level = level.code(),
            "share updated"
        );
        Ok(())
    }

    /// `Shared(_) -> Unshared`. No call when `subject` is `None`.
    pub async fn delete(
        &self,
        target: &ShareTarget,
        subject: Option<&str>,
        cancel: &CancelSignal,
    ) -> Result<()> {
        self.apply(target, SharePlan::delete(subject), cancel).await?;
        info!(share = %target, subject = ?subject, "share deleted");
        Ok(())
    }

    /// Shares have no remote read; the local record is returned unchanged.
    pub fn read<R>(&self, record: R) -> R {
        record
    }

    /// Execute a plan on one target: revoke, then grant.
    pub async fn apply(
        &self,
        target: &ShareTarget,
        plan: SharePlan,
        cancel: &CancelSignal,
    ) -> Result<()> {
        self.apply_between(target, target, plan, cancel).await
    }

    /// Execute a plan whose revoke and grant address different targets.
    pub async fn apply_between(
        &self,
        revoke_target: &ShareTarget,
        grant_target: &ShareTarget,
        plan: SharePlan,
        cancel: &CancelSignal,
    ) -> Result<()> {
        if plan.is_empty() {
            debug!(share = %grant_target, "no share calls needed");
            return Ok(());
        }
        debug!(
            share = %grant_target,
            calls = plan.call_count(),
            state = ?plan.final_state(),
            "applying share plan"
        );

        if let Some(revoked) = &plan.revoke {
            self.share(
                revoke_target,
                vec![ShareOperation::revoke_group(revoked)],
                cancel,
            )
            .await
            .map_err(|e| PermsError::remote(share_call(revoke_target.kind), e))?;
        }

        if let Some((subject, level)) = &plan.grant {
            let granted = self
                .share(
                    grant_target,
                    vec![ShareOperation::grant_group(subject, *level)],
                    cancel,
                )
                .await;

            if let Err(source) = granted {
                return Err(match &plan.revoke {
                    Some(revoked) => {
                        warn!(
                            share = %revoke_target,
                            revoked = %revoked,
                            intended = %subject,
                            error = %source,
                            "grant failed after revoke, target left unshared"
                        );
                        PermsError::PartialApplication {
                            target: revoke_target.clone(),
                            revoked: revoked.clone(),
                            intended: subject.clone(),
                            source,
                        }
                    }
                    None => PermsError::remote(share_call(grant_target.kind), source),
                });
            }
        }

        Ok(())
    }

    async fn share(
        &self,
        target: &ShareTarget,
        operations: Vec<ShareOperation>,
        cancel: &CancelSignal,
    ) -> std::result::Result<(), ClientError> {
        for op in &operations {
            debug!(
                share = %target,
                aro = %op.aro,
                aro_id = %op.aro_id,
                level = op.level.code(),
                "issuing share call"
            );
        }
        match target.kind {
            TargetKind::Folder => {
                cancel
                    .run(self.client.share_folder(&target.id, &operations))
                    .await
            }
            TargetKind::Resource => {
                cancel
                    .run(self.client.share_resource(&target.id, &operations))
                    .await
            }
        }
    }
}

fn share_call(kind: TargetKind) -> &'static str {
    match kind {
        TargetKind::Folder => "share_folder",
        TargetKind::Resource => "share_resource",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vaultsync_client::{cancel_pair, MemoryVault, VaultCall};

    struct Setup {
        vault: Arc<MemoryVault>,
        perms: PermissionReconciler<Arc<MemoryVault>>,
        target: ShareTarget,
    }

    fn setup() -> Setup {
        let vault = Arc::new(MemoryVault::new());
        let folder = vault.add_folder("shared", None);
        Setup {
            perms: PermissionReconciler::new(Arc::clone(&vault)),
            target: ShareTarget::folder(folder.id),
            vault,
        }
    }

    #[test]
    fn test_permission_level() {
        assert_eq!(permission_level(true).code(), 7);
        assert_eq!(permission_level(false).code(), 1);
    }

    #[tokio::test]
    async fn test_create_grants_once() {
        let s = setup();
        let group = s.vault.add_group("Ops");
        s.perms
            .create(
                &s.target,
                Some(&group.id),
                PermissionLevel::Owner,
                &CancelSignal::never(),
            )
            .await
            .unwrap();

        let calls = s.vault.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].is_grant());
        let grants = s.vault.permissions_for(TargetKind::Folder, &s.target.id);
        assert_eq!(grants[0].level, PermissionLevel::Owner);
    }

    #[tokio::test]
    async fn test_create_without_subject_issues_nothing() {
        let s = setup();
        s.perms
            .create(&s.target, None, PermissionLevel::Read, &CancelSignal::never())
            .await
            .unwrap();
        assert!(s.vault.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_revokes_before_grant_even_when_unchanged() {
        let s = setup();
        let group = s.vault.add_group("Ops");
        let cancel = CancelSignal::never();
        s.perms
            .create(&s.target, Some(&group.id), PermissionLevel::Read, &cancel)
            .await
            .unwrap();
        s.vault.clear_calls();

        s.perms
            .update(
                &s.target,
                Some(&group.id),
                &s.target,
                Some(&group.id),
                PermissionLevel::Read,
                &cancel,
            )
            .await
            .unwrap();

        let calls = s.vault.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].is_revoke());
        assert!(calls[1].is_grant());
        assert_eq!(s.vault.permissions_for(TargetKind::Folder, &s.target.id).len(), 1);
    }

    #[tokio::test]
    async fn test_revoke_failure_skips_grant() {
        let s = setup();
        let old = s.vault.add_group("Old");
        let new = s.vault.add_group("New");
        s.vault.fail_when(
            VaultCall::is_revoke,
            ClientError::Transport("reset".into()),
        );

        let err = s
            .perms
            .update(
                &s.target,
                Some(&old.id),
                &s.target,
                Some(&new.id),
                PermissionLevel::Owner,
                &CancelSignal::never(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, PermsError::Remote { call: "share_folder", .. }));
        assert_eq!(s.vault.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_grant_failure_after_revoke_is_partial() {
        let s = setup();
        let old = s.vault.add_group("Old");
        let new = s.vault.add_group("New");
        let cancel = CancelSignal::never();
        s.perms
            .create(&s.target, Some(&old.id), PermissionLevel::Read, &cancel)
            .await
            .unwrap();
        s.vault
            .fail_when(VaultCall::is_grant, ClientError::Rejected("quota".into()));

        let err = s
            .perms
            .update(
                &s.target,
                Some(&old.id),
                &s.target,
                Some(&new.id),
                PermissionLevel::Owner,
                &cancel,
            )
            .await
            .unwrap_err();

        match err {
            PermsError::PartialApplication {
                revoked, intended, ..
            } => {
                assert_eq!(revoked, old.id);
                assert_eq!(intended, new.id);
            }
            other => panic!("expected partial application, got {other:?}"),
        }
        assert!(s
            .vault
            .permissions_for(TargetKind::Folder, &s.target.id)
            .is_empty());
    }

    #[tokio::test]
    async fn test_grant_failure_without_revoke_is_remote() {
        let s = setup();
        let group = s.vault.add_group("Ops");
        s.vault
            .fail_when(VaultCall::is_grant, ClientError::Rejected("quota".into()));

        let err = s
            .perms
            .update(
                &s.target,
                None,
                &s.target,
                Some(&group.id),
                PermissionLevel::Read,
                &CancelSignal::never(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PermsError::Remote { .. }));
    }

    #[tokio::test]
    async fn test_update_across_targets() {
        let s = setup();
        let group = s.vault.add_group("Ops");
        let other = ShareTarget::folder(s.vault.add_folder("other", None).id);
        let cancel = CancelSignal::never();
        s.perms
            .create(&s.target, Some(&group.id), PermissionLevel::Read, &cancel)
            .await
            .unwrap();

        s.perms
            .update(
                &s.target,
                Some(&group.id),
                &other,
                Some(&group.id),
                PermissionLevel::Owner,
                &cancel,
            )
            .await
            .unwrap();

        assert!(s
            .vault
            .permissions_for(TargetKind::Folder, &s.target.id)
            .is_empty());
        let moved = s.vault.permissions_for(TargetKind::Folder, &other.id);
        assert_eq!(moved[0].level, PermissionLevel::Owner);
    }

    #[tokio::test]
    async fn test_resource_target_routes_to_share_resource() {
        let vault = Arc::new(MemoryVault::new());
        let group = vault.add_group("Ops");
        let perms = PermissionReconciler::new(Arc::clone(&vault));
        let target = ShareTarget::resource("resource-missing");

        let err = perms
            .delete(&target, Some(&group.id), &CancelSignal::never())
            .await
            .unwrap_err();

        assert!(matches!(err, PermsError::Remote { call: "share_resource", .. }));
        assert!(matches!(vault.calls()[0], VaultCall::ShareResource { .. }));
    }

    #[tokio::test]
    async fn test_resolve_group_name() {
        let s = setup();
        s.vault.add_group("Ops");
        let second = s.vault.add_group("Ops");
        let cancel = CancelSignal::never();

        let id = s
            .perms
            .resolve_subject(&SubjectRef::GroupName("Ops".into()), &cancel)
            .await
            .unwrap();
        assert_eq!(id, Some(second.id));

        let err = s
            .perms
            .resolve_subject(&SubjectRef::GroupName("Nobody".into()), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, PermsError::LookupMiss(_)));
    }

    #[tokio::test]
    async fn test_cancelled_before_revoke_issues_nothing() {
        let s = setup();
        let group = s.vault.add_group("Ops");
        let (handle, cancel) = cancel_pair();
        handle.cancel();

        let err = s
            .perms
            .delete(&s.target, Some(&group.id), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, PermsError::Cancelled));
        assert!(s.vault.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_between_revoke_and_grant_keeps_revoke() {
        let s = setup();
        let old = s.vault.add_group("Old");
        let new = s.vault.add_group("New");
        s.perms
            .create(&s.target, Some(&old.id), PermissionLevel::Read, &CancelSignal::never())
            .await
            .unwrap();
        s.vault.clear_calls();

        let (handle, cancel) = cancel_pair();
        s.vault.fail_when(
            move |call| {
                if call.is_revoke() {
                    handle.cancel();
                }
                false
            },
            ClientError::Rejected("unused".into()),
        );

        let err = s
            .perms
            .update(
                &s.target,
                Some(&old.id),
                &s.target,
                Some(&new.id),
                PermissionLevel::Owner,
                &cancel,
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PermsError::PartialApplication {
                source: ClientError::Cancelled,
                ..
            }
        ));
        let calls = s.vault.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].is_revoke());
        assert!(s
            .vault
            .permissions_for(TargetKind::Folder, &s.target.id)
            .is_empty());
    }

    #[test]
    fn test_read_returns_record() {
        let perms = PermissionReconciler::new(MemoryVault::new());
        assert_eq!(perms.read("record"), "record");
    }
}
