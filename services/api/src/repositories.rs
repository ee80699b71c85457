//! Repositories for document store operations

use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::models::{Database, NewUser, Store, UpdateUser, User, UserRole};

pub mod selection;

pub use selection::SelectionRepository;

/// Outcome of a cascading user delete
#[derive(Debug)]
pub struct DeletedUser {
    pub user: User,
    pub removed_selections: usize,
}

/// User directory over the parallel `users` and `admins` collections
#[derive(Clone)]
pub struct UserRepository {
    store: Store,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Next free numeric id, scanning both collections for the current max
    fn next_id(db: &Database) -> i64 {
        db.users
            .iter()
            .chain(db.admins.iter())
            .map(|u| u.id)
            .max()
            .unwrap_or(0)
            + 1
    }

    fn employee_id_taken(db: &Database, employee_id: &str) -> bool {
        db.users
            .iter()
            .chain(db.admins.iter())
            .any(|u| u.employee_id == employee_id)
    }

    /// Create an account, routed to `users` or `admins` by its role
    pub async fn create(&self, new_user: NewUser) -> ApiResult<User> {
        info!("Creating account for employee {}", new_user.employee_id);

        let created = self
            .store
            .transact(move |db| {
                if Self::employee_id_taken(db, &new_user.employee_id) {
                    return Err(ApiError::Conflict(format!(
                        "Employee ID {} already exists",
                        new_user.employee_id
                    )));
                }

                let role = new_user.role.unwrap_or(UserRole::User);
                let user = User {
                    id: Self::next_id(db),
                    employee_id: new_user.employee_id,
                    name: new_user.name,
                    password: Some(new_user.password),
                    designation: new_user.designation,
                    location: new_user.location,
                    role: Some(role),
                    permissions: None,
                };

                match role {
                    UserRole::Admin => db.admins.push(user.clone()),
                    UserRole::User => db.users.push(user.clone()),
                }

                Ok(user)
            })
            .await?;

        Ok(created.sanitized())
    }

    /// Apply field updates; a role change moves the record between collections
    pub async fn update(&self, id: i64, changes: UpdateUser) -> ApiResult<User> {
        let updated = self
            .store
            .transact(move |db| {
                let (mut user, was_admin) =
                    if let Some(pos) = db.users.iter().position(|u| u.id == id) {
                        (db.users.remove(pos), false)
                    } else if let Some(pos) = db.admins.iter().position(|u| u.id == id) {
                        (db.admins.remove(pos), true)
                    } else {
                        return Err(ApiError::NotFound(format!("User {id} not found")));
                    };

                if let Some(employee_id) = changes.employee_id {
                    if employee_id != user.employee_id
                        && Self::employee_id_taken(db, &employee_id)
                    {
                        return Err(ApiError::Conflict(format!(
                            "Employee ID {employee_id} already exists"
                        )));
                    }
                    user.employee_id = employee_id;
                }
                if let Some(name) = changes.name {
                    user.name = name;
                }
                if let Some(password) = changes.password {
                    user.password = Some(password);
                }
                if let Some(designation) = changes.designation {
                    user.designation = designation;
                }
                if let Some(location) = changes.location {
                    user.location = location;
                }
                if let Some(role) = changes.role {
                    user.role = Some(role);
                }

                let fallback = if was_admin {
                    UserRole::Admin
                } else {
                    UserRole::User
                };
                match user.role_or(fallback) {
                    UserRole::Admin => db.admins.push(user.clone()),
                    UserRole::User => db.users.push(user.clone()),
                }

                Ok(user)
            })
            .await?;

        Ok(updated.sanitized())
    }

    /// Delete an account and cascade-remove its selection records
    pub async fn delete(&self, id: i64) -> ApiResult<DeletedUser> {
        self.store
            .transact(move |db| {
                let user = if let Some(pos) = db.users.iter().position(|u| u.id == id) {
                    db.users.remove(pos)
                } else if let Some(pos) = db.admins.iter().position(|u| u.id == id) {
                    db.admins.remove(pos)
                } else {
                    return Err(ApiError::NotFound(format!("User {id} not found")));
                };

                let employee_id = user.employee_id.clone();
                let before = db.draft_selections.len()
                    + db.submitted_selections.len()
                    + db.approved_selections.len();

                db.draft_selections.retain(|s| s.employee_id != employee_id);
                db.submitted_selections
                    .retain(|s| s.employee_id != employee_id);
                db.approved_selections
                    .retain(|s| s.employee_id != employee_id);

                let after = db.draft_selections.len()
                    + db.submitted_selections.len()
                    + db.approved_selections.len();

                info!(
                    "Deleted user {} and {} selection record(s)",
                    employee_id,
                    before - after
                );

                Ok(DeletedUser {
                    user,
                    removed_selections: before - after,
                })
            })
            .await
    }

    /// Plaintext credential check against both collections
    pub async fn authenticate(&self, employee_id: &str, password: &str) -> ApiResult<User> {
        let found = self
            .store
            .read(|db| {
                db.users
                    .iter()
                    .map(|u| (u, UserRole::User))
                    .chain(db.admins.iter().map(|u| (u, UserRole::Admin)))
                    .find(|(u, _)| {
                        u.employee_id == employee_id && u.password.as_deref() == Some(password)
                    })
                    .map(|(u, fallback)| {
                        let mut out = u.sanitized();
                        out.role = Some(u.role_or(fallback));
                        out
                    })
            })
            .await;

        found.ok_or(ApiError::Unauthorized)
    }

    /// Both collections with passwords stripped
    pub async fn all(&self) -> (Vec<User>, Vec<User>) {
        self.store
            .read(|db| {
                (
                    db.users.iter().map(User::sanitized).collect(),
                    db.admins.iter().map(User::sanitized).collect(),
                )
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateSelection, SelectionStatus};
    use chrono::Utc;

    async fn test_store(tag: &str) -> Store {
        let path = std::env::temp_dir().join(format!(
            "roster-users-{tag}-{}.json",
            uuid::Uuid::new_v4()
        ));
        Store::open(path).await.unwrap()
    }

    fn new_user(employee_id: &str, role: Option<UserRole>) -> NewUser {
        NewUser {
            name: format!("Employee {employee_id}"),
            employee_id: employee_id.to_string(),
            password: "secret".to_string(),
            designation: "Technical Lead".to_string(),
            location: "Chennai".to_string(),
            role,
        }
    }

    fn selection_for(employee_id: &str, status: SelectionStatus) -> DateSelection {
        let now = Utc::now();
        DateSelection {
            id: now.timestamp_millis(),
            user_id: 1,
            employee_id: employee_id.to_string(),
            user_designation: "Technical Lead".to_string(),
            user_location: "Chennai".to_string(),
            selected_dates: vec![now],
            saved_at: now,
            status,
            month: 6,
            year: 2025,
            submitted_at: None,
            admin_comment: None,
            reviewed_at: None,
            attachment: None,
        }
    }

    #[tokio::test]
    async fn create_routes_by_role_and_assigns_ids() {
        let store = test_store("create").await;
        let repo = UserRepository::new(store.clone());

        let user = repo.create(new_user("EMP-1", None)).await.unwrap();
        let admin = repo
            .create(new_user("ADM-1", Some(UserRole::Admin)))
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(admin.id, 2);
        assert!(user.password.is_none(), "responses must not carry passwords");

        let (users, admins) = repo.all().await;
        assert_eq!(users.len(), 1);
        assert_eq!(admins.len(), 1);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_employee_ids() {
        let store = test_store("duplicate").await;
        let repo = UserRepository::new(store);

        repo.create(new_user("EMP-1", None)).await.unwrap();
        let second = repo
            .create(new_user("EMP-1", Some(UserRole::Admin)))
            .await;

        assert!(matches!(second, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn update_moves_record_on_role_change() {
        let store = test_store("rolechange").await;
        let repo = UserRepository::new(store);

        let user = repo.create(new_user("EMP-1", None)).await.unwrap();
        let changes = UpdateUser {
            role: Some(UserRole::Admin),
            location: Some("Bengaluru".to_string()),
            ..Default::default()
        };
        let updated = repo.update(user.id, changes).await.unwrap();

        assert_eq!(updated.location, "Bengaluru");

        let (users, admins) = repo.all().await;
        assert!(users.is_empty());
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].id, user.id);
    }

    #[tokio::test]
    async fn update_unknown_user_is_not_found() {
        let store = test_store("update-missing").await;
        let repo = UserRepository::new(store);

        let result = repo.update(99, UpdateUser::default()).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_cascades_to_selection_records() {
        let store = test_store("cascade").await;
        let repo = UserRepository::new(store.clone());

        let user = repo.create(new_user("EMP-1", None)).await.unwrap();
        repo.create(new_user("EMP-2", None)).await.unwrap();

        store
            .transact::<_, ApiError>(|db| {
                db.draft_selections
                    .push(selection_for("EMP-1", SelectionStatus::Draft));
                db.submitted_selections
                    .push(selection_for("EMP-1", SelectionStatus::Pending));
                db.approved_selections
                    .push(selection_for("EMP-1", SelectionStatus::Approved));
                db.approved_selections
                    .push(selection_for("EMP-2", SelectionStatus::Approved));
                Ok(())
            })
            .await
            .unwrap();

        let deleted = repo.delete(user.id).await.unwrap();
        assert_eq!(deleted.user.employee_id, "EMP-1");
        assert_eq!(deleted.removed_selections, 3);

        store
            .read(|db| {
                assert!(db.draft_selections.is_empty());
                assert!(db.submitted_selections.is_empty());
                assert_eq!(db.approved_selections.len(), 1);
                assert_eq!(db.approved_selections[0].employee_id, "EMP-2");
            })
            .await;
    }

    #[tokio::test]
    async fn authenticate_checks_both_collections() {
        let store = test_store("auth").await;
        let repo = UserRepository::new(store);

        repo.create(new_user("EMP-1", None)).await.unwrap();
        repo.create(new_user("ADM-1", Some(UserRole::Admin)))
            .await
            .unwrap();

        let user = repo.authenticate("EMP-1", "secret").await.unwrap();
        assert_eq!(user.role, Some(UserRole::User));
        assert!(user.password.is_none());

        let admin = repo.authenticate("ADM-1", "secret").await.unwrap();
        assert_eq!(admin.role, Some(UserRole::Admin));

        let denied = repo.authenticate("EMP-1", "wrong").await;
        assert!(matches!(denied, Err(ApiError::Unauthorized)));
    }
}
