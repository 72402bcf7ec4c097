use std::sync::LazyLock;

use crate::storage::DB_TABLE_PREFIX;

/// Users table name
pub(super) static DB_TABLE_USERS: LazyLock<String> =
    LazyLock::new(|| format!("{}{}", *DB_TABLE_PREFIX, "users"));
