use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// User model for reading from database
/// Derives Queryable for SELECT operations and Selectable for type-safe column selection
#[derive(Debug, Queryable, Selectable, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password: String,
}

/// NewUser model for inserting new records
/// Derives Insertable for INSERT operations
#[derive(Debug, Insertable, Deserialize, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl NewUser {
    /// Attaches the storage-assigned id, producing the persisted record.
    pub fn with_id(self, id: i32) -> User {
        User {
            id,
            username: self.username,
            password: self.password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_id_keeps_fields() {
        let new_user = NewUser {
            username: "alice".to_string(),
            password: "s3cret".to_string(),
        };

        let user = new_user.with_id(7);
        assert_eq!(user.id, 7);
        assert_eq!(user.username, "alice");
        assert_eq!(user.password, "s3cret");
    }

    #[test]
    fn test_user_row_json_shape() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            password: "s3cret".to_string(),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 1, "username": "alice", "password": "s3cret"})
        );
    }
}
