//! Resource derivation: resolved parameters to descriptors.
use super::resolve::{PrimaryGroup, ResolvedAccount, SSH_DIR_MODE};
use crate::resources::{AuthorizedKeyResource, DirectoryResource, GroupResource, UserResource};

/// Descriptors derived for one account, by role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedResources {
    /// Dedicated group, when `create_group` holds.
    pub group: Option<GroupResource>,
    /// The user.
    pub user: UserResource,
    /// The home directory.
    pub home: DirectoryResource,
    /// The `.ssh` directory, derived even without keys.
    pub ssh_dir: DirectoryResource,
    /// Authorized keys in declaration order.
    pub keys: Vec<AuthorizedKeyResource>,
}

/// Build every descriptor for `account`.
#[must_use]
pub fn derive(account: &ResolvedAccount, keys: Vec<AuthorizedKeyResource>) -> DerivedResources {
    let group = match &account.primary_group {
        PrimaryGroup::Dedicated { name, gid } => Some(GroupResource {
            title: account.title.clone(),
            name: name.clone(),
            system: account.system,
            gid: *gid,
            ensure: account.ensure,
        }),
        PrimaryGroup::Existing { .. } => None,
    };
    let group_name = account.primary_group.name();

    let user = UserResource {
        title: account.title.clone(),
        name: account.username.clone(),
        uid: account.uid,
        gid: group_name.to_string(),
        shell: account.shell.clone(),
        groups: account.groups.clone(),
        home: account.home_dir.clone(),
        manage_home: account.manage_home,
        system: account.system,
        allowdupe: account.allowdupe,
        comment: account.comment.clone(),
        password: account.password.clone(),
        ensure: account.ensure,
    };

    let home = DirectoryResource::new(
        &account.home_dir,
        &account.username,
        group_name,
        &account.home_dir_perms,
        account.purge,
        account.ensure,
    );
    let ssh_dir = DirectoryResource::new(
        &account.ssh_dir,
        &account.username,
        group_name,
        SSH_DIR_MODE,
        account.purge,
        account.ensure,
    );

    DerivedResources {
        group,
        user,
        home,
        ssh_dir,
        keys,
    }
}
