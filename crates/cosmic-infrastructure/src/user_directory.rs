//! User directory over the users namespace.

use cosmic_core::community::CommunityStore;
use cosmic_core::error::{CosmicError, Result};
use cosmic_core::user::{User, UserDirectory, UserUpdate};

use crate::community_store::LocalCommunityStore;
use crate::json_storage::{JsonStorage, Namespace};

/// User registration, authentication and settings updates backed by the
/// users blob.
///
/// Holds its own view of the community store so that a rename can be
/// cascaded into historical posts before the update returns.
#[derive(Debug, Clone)]
pub struct LocalUserDirectory {
    storage: JsonStorage,
    community: LocalCommunityStore,
}

impl LocalUserDirectory {
    /// Creates a directory over the given storage.
    pub fn new(storage: JsonStorage) -> Self {
        let community = LocalCommunityStore::new(storage.clone());
        Self { storage, community }
    }

    fn persist(&self, users: &[User]) -> Result<()> {
        self.storage.write(Namespace::Users, &users)
    }
}

impl UserDirectory for LocalUserDirectory {
    fn all_users(&self) -> Vec<User> {
        self.storage.read_or_default(Namespace::Users)
    }

    fn register(&self, mut user: User) -> Result<User> {
        let mut users = self.all_users();

        let name = user.name.trim().to_lowercase();
        if users.iter().any(|u| u.name.trim().to_lowercase() == name) {
            return Err(CosmicError::DuplicateName);
        }
        let email = user.email.to_lowercase();
        if users.iter().any(|u| u.email.to_lowercase() == email) {
            return Err(CosmicError::DuplicateEmail);
        }

        user.apply_admin_rule();
        users.push(user.clone());
        self.persist(&users)?;
        Ok(user)
    }

    fn authenticate(&self, identifier: &str, password: &str) -> Result<User> {
        let mut users = self.all_users();

        let Some(index) = users.iter().position(|u| {
            u.matches_identifier(identifier) && u.password.as_deref() == Some(password)
        }) else {
            return Err(CosmicError::InvalidCredentials);
        };

        // Re-check the admin rule on login; older records may predate it.
        let before = users[index].role;
        users[index].apply_admin_rule();
        if users[index].role != before {
            self.persist(&users)?;
        }

        Ok(users[index].clone())
    }

    fn update(&self, current: &User, update: UserUpdate) -> Result<User> {
        let mut users = self.all_users();
        let old_name = current.name.clone();

        let updated = match users.iter_mut().find(|u| u.email == current.email) {
            Some(user) => {
                update.merge_onto(user);
                user.apply_admin_rule();
                user.clone()
            }
            None => {
                // Record vanished from storage; re-insert the merged copy.
                let mut user = current.clone();
                update.merge_onto(&mut user);
                user.apply_admin_rule();
                users.push(user.clone());
                user
            }
        };

        self.persist(&users)?;

        if update.touches_identity() {
            self.community.apply_identity_change(&old_name, &updated)?;
        }

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmic_core::community::{Post, PostKind};
    use cosmic_core::user::{ADMIN_EMAIL, Role};
    use tempfile::TempDir;

    fn directory() -> (TempDir, LocalUserDirectory) {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(temp_dir.path()).unwrap();
        (temp_dir, LocalUserDirectory::new(storage))
    }

    fn ana() -> User {
        User::new("Ana", "ana@x.com", "secret", Role::Student)
    }

    #[test]
    fn test_register_rejects_duplicate_name_case_insensitively() {
        let (_dir, directory) = directory();
        directory.register(ana()).unwrap();

        let dup = User::new("  aNa ", "other@x.com", "x", Role::Guest);
        assert!(matches!(
            directory.register(dup),
            Err(CosmicError::DuplicateName)
        ));
    }

    #[test]
    fn test_register_rejects_duplicate_email_case_insensitively() {
        let (_dir, directory) = directory();
        directory.register(ana()).unwrap();

        let dup = User::new("Luis", "ANA@X.COM", "x", Role::Guest);
        assert!(matches!(
            directory.register(dup),
            Err(CosmicError::DuplicateEmail)
        ));
        assert_eq!(directory.all_users().len(), 1);
    }

    #[test]
    fn test_register_elevates_admin_email() {
        let (_dir, directory) = directory();
        let user = User::new("Darwin", ADMIN_EMAIL, "x", Role::Guest);
        let stored = directory.register(user).unwrap();
        assert_eq!(stored.role, Some(Role::Admin));
    }

    #[test]
    fn test_authenticate_by_name_or_email() {
        let (_dir, directory) = directory();
        directory.register(ana()).unwrap();

        assert!(directory.authenticate("ana", "secret").is_ok());
        assert!(directory.authenticate(" ANA@X.COM ", "secret").is_ok());
        assert!(matches!(
            directory.authenticate("ana", "wrong"),
            Err(CosmicError::InvalidCredentials)
        ));
        assert!(matches!(
            directory.authenticate("nadie", "secret"),
            Err(CosmicError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_corrects_admin_role_and_persists() {
        let (_dir, directory) = directory();
        // Bypass register to plant a stale record without the admin role.
        let user = User::new("Darwin", ADMIN_EMAIL, "x", Role::Guest);
        directory.persist(&[user]).unwrap();

        let logged_in = directory.authenticate(ADMIN_EMAIL, "x").unwrap();
        assert_eq!(logged_in.role, Some(Role::Admin));
        assert_eq!(directory.all_users()[0].role, Some(Role::Admin));
    }

    #[test]
    fn test_update_merges_and_reapplies_admin_rule() {
        let (_dir, directory) = directory();
        let user = directory
            .register(User::new("Darwin", ADMIN_EMAIL, "x", Role::Guest))
            .unwrap();

        let updated = directory
            .update(
                &user,
                UserUpdate {
                    name: Some("Darwin F.".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Darwin F.");
        assert_eq!(updated.role, Some(Role::Admin));
        assert_eq!(directory.all_users().len(), 1);
    }

    #[test]
    fn test_update_inserts_missing_record() {
        let (_dir, directory) = directory();
        let ghost = ana();

        let updated = directory
            .update(
                &ghost,
                UserUpdate {
                    avatar_url: Some("https://example.com/a.png".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.avatar_url.as_deref(), Some("https://example.com/a.png"));
        assert_eq!(directory.all_users().len(), 1);
    }

    #[test]
    fn test_rename_cascades_into_community() {
        let (_dir, directory) = directory();
        let user = directory.register(ana()).unwrap();

        let post = Post::new(&user, "mi publicación", PostKind::Opinion);
        let post_id = post.id.clone();
        directory.community.add_post(post).unwrap();

        directory
            .update(
                &user,
                UserUpdate {
                    name: Some("Ana2".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let posts = directory.community.posts();
        let post = posts.iter().find(|p| p.id == post_id).unwrap();
        assert_eq!(post.user_name, "Ana2");
    }

    #[test]
    fn test_register_login_post_rename_scenario() {
        let (_dir, directory) = directory();

        let ana = directory.register(self::ana()).unwrap();
        assert!(matches!(
            directory.register(self::ana()),
            Err(CosmicError::DuplicateName)
        ));

        let logged_in = directory.authenticate("ana@x.com", "secret").unwrap();
        assert_eq!(logged_in.role, Some(Role::Student));

        let post = Post::new(&logged_in, "¡Hola comunidad!", PostKind::Opinion);
        let post_id = post.id.clone();
        directory.community.add_post(post).unwrap();

        directory
            .update(
                &ana,
                UserUpdate {
                    name: Some("Ana2".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let posts = directory.community.posts();
        assert_eq!(posts.iter().find(|p| p.id == post_id).unwrap().user_name, "Ana2");
        assert!(directory.authenticate("Ana2", "secret").is_ok());
    }

    #[test]
    fn test_update_without_identity_change_skips_cascade() {
        let (_dir, directory) = directory();
        let user = directory.register(ana()).unwrap();
        let post = Post::new(&user, "hola", PostKind::Idea);
        let post_id = post.id.clone();
        directory.community.add_post(post).unwrap();

        directory
            .update(
                &user,
                UserUpdate {
                    password: Some("nueva".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let posts = directory.community.posts();
        assert_eq!(posts.iter().find(|p| p.id == post_id).unwrap().user_name, "Ana");
        assert_eq!(
            directory.authenticate("ana", "nueva").unwrap().email,
            "ana@x.com"
        );
    }
}
