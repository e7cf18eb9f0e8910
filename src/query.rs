use std::cmp::Ordering;
use std::str::FromStr;

use crate::models::{Role, Status, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(Status),
}

impl StatusFilter {
    /// Unknown values fall back to `All`, like an unset dropdown.
    pub fn parse(raw: &str) -> Self {
        match Status::from_str(raw) {
            Ok(status) => StatusFilter::Only(status),
            Err(()) => StatusFilter::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleFilter {
    All,
    Only(Role),
}

impl RoleFilter {
    pub fn parse(raw: &str) -> Self {
        match Role::from_str(raw) {
            Ok(role) => RoleFilter::Only(role),
            Err(()) => RoleFilter::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Email,
    Role,
    Status,
}

impl SortField {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "email" => SortField::Email,
            "role" => SortField::Role,
            "status" => SortField::Status,
            _ => SortField::Name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Self {
        if raw == "desc" {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Combined filter + sort specification for the visible user list.
#[derive(Debug, Clone)]
pub struct UserQuery {
    /// Case-insensitive substring matched against name or email.
    /// Empty means no search filtering.
    pub search: String,
    pub status: StatusFilter,
    pub role: RoleFilter,
    /// `None` keeps the input order (the store's creation-time order).
    pub sort: Option<Sort>,
}

impl Default for UserQuery {
    fn default() -> Self {
        UserQuery {
            search: String::new(),
            status: StatusFilter::All,
            role: RoleFilter::All,
            sort: None,
        }
    }
}

impl UserQuery {
    fn matches(&self, user: &User, search_lower: &str) -> bool {
        let matches_search = search_lower.is_empty()
            || user.name.to_lowercase().contains(search_lower)
            || user.email.to_lowercase().contains(search_lower);

        let matches_status = match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => user.status == status,
        };

        let matches_role = match self.role {
            RoleFilter::All => true,
            RoleFilter::Only(role) => user.role == role,
        };

        matches_search && matches_status && matches_role
    }
}

/// Pure transform: filter then stable-sort. Equal keys keep their input
/// order, so identical inputs always produce identical output.
pub fn apply(users: Vec<User>, query: &UserQuery) -> Vec<User> {
    let search_lower = query.search.to_lowercase();

    let mut visible: Vec<User> = users
        .into_iter()
        .filter(|user| query.matches(user, &search_lower))
        .collect();

    if let Some(sort) = query.sort {
        visible.sort_by(|a, b| {
            let ordering = compare(a, b, sort.field);
            match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    visible
}

/// String fields compare case-insensitively; role and status compare by
/// their canonical lowercase names.
fn compare(a: &User, b: &User, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortField::Email => a.email.to_lowercase().cmp(&b.email.to_lowercase()),
        SortField::Role => a.role.as_str().cmp(b.role.as_str()),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
    }
}
