//! Role resolution against configuration and the roster.

use crate::role::Role;
use station_roster_core::ChatUserId;
use station_roster_directory::{Directory, DirectoryError};
use std::collections::HashSet;

/// Resolves inbound users to roles.
///
/// Super admins come from configuration and always win; head assignments
/// are looked up live so a revocation takes effect on the next event.
#[derive(Debug, Clone)]
pub struct RoleResolver {
    super_admins: HashSet<ChatUserId>,
}

impl RoleResolver {
    #[must_use]
    pub fn new(super_admins: impl IntoIterator<Item = ChatUserId>) -> Self {
        Self {
            super_admins: super_admins.into_iter().collect(),
        }
    }

    /// Returns true if the user is a configured super admin.
    #[must_use]
    pub fn is_super_admin(&self, user: ChatUserId) -> bool {
        self.super_admins.contains(&user)
    }

    /// The configured super admin ids, for notification fan-out.
    #[must_use]
    pub fn super_admins(&self) -> &HashSet<ChatUserId> {
        &self.super_admins
    }

    /// Resolves one user's role.
    pub async fn resolve<D>(
        &self,
        directory: &D,
        user: ChatUserId,
    ) -> Result<Role, DirectoryError>
    where
        D: Directory + ?Sized,
    {
        if self.is_super_admin(user) {
            return Ok(Role::SuperAdmin);
        }
        match directory.head_station(user).await? {
            Some(station) => Ok(Role::StationHead(station.id)),
            None => Ok(Role::Anonymous),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use station_roster_core::StationId;
    use station_roster_directory::MemoryDirectory;

    #[tokio::test]
    async fn configured_super_admin_wins_over_head_assignment() {
        let directory = MemoryDirectory::with_stations(&["Chilonzor"]);
        let admin = ChatUserId::new(111);
        directory
            .assign_head(admin, StationId::new(1))
            .await
            .expect("assign");
        let resolver = RoleResolver::new([admin]);

        let role = resolver.resolve(&directory, admin).await.expect("resolve");
        assert_eq!(role, Role::SuperAdmin);
    }

    #[tokio::test]
    async fn head_assignment_resolves_to_station_head() {
        let directory = MemoryDirectory::with_stations(&["Chilonzor"]);
        let head = ChatUserId::new(222);
        directory
            .assign_head(head, StationId::new(1))
            .await
            .expect("assign");
        let resolver = RoleResolver::new([ChatUserId::new(111)]);

        let role = resolver.resolve(&directory, head).await.expect("resolve");
        assert_eq!(role, Role::StationHead(StationId::new(1)));
    }

    #[tokio::test]
    async fn unknown_user_is_anonymous() {
        let directory = MemoryDirectory::new();
        let resolver = RoleResolver::new([ChatUserId::new(111)]);

        let role = resolver
            .resolve(&directory, ChatUserId::new(999))
            .await
            .expect("resolve");
        assert_eq!(role, Role::Anonymous);
    }

    #[tokio::test]
    async fn revoked_head_loses_access_on_next_resolve() {
        let directory = MemoryDirectory::with_stations(&["Chilonzor"]);
        let head = ChatUserId::new(222);
        directory
            .assign_head(head, StationId::new(1))
            .await
            .expect("assign");
        let resolver = RoleResolver::new([]);

        assert_eq!(
            resolver.resolve(&directory, head).await.expect("resolve"),
            Role::StationHead(StationId::new(1))
        );

        directory.remove_head(head).await.expect("remove");

        assert_eq!(
            resolver.resolve(&directory, head).await.expect("resolve"),
            Role::Anonymous
        );
    }
}
