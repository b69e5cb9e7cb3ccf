use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a record within its collection. Assigned ids start at 1.
pub type RecordId = u32;

/// The entity types that have their own collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Task,
    Category,
}

impl EntityKind {
    /// Name of the backing collection (and of its JSON file).
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Task => "tasks",
            EntityKind::Category => "categories",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Task => write!(f, "task"),
            EntityKind::Category => write!(f, "category"),
        }
    }
}

/// Anything a store can hold: JSON-serializable and carrying its own id.
pub trait Record: Serialize + DeserializeOwned + Clone {
    const KIND: EntityKind;

    fn id(&self) -> RecordId;
    fn set_id(&mut self, id: RecordId);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Done,
    Pending,
    Failed,
}

impl Status {
    pub fn all() -> &'static [Status] {
        &[Status::Done, Status::Pending, Status::Failed]
    }

    /// Numeric code used by the interactive status menu.
    pub fn code(&self) -> u8 {
        match self {
            Status::Done => 1,
            Status::Pending => 2,
            Status::Failed => 3,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Done => "done",
            Status::Pending => "pending",
            Status::Failed => "failed",
        };
        f.write_str(s)
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "done" => Ok(Status::Done),
            "2" | "pending" => Ok(Status::Pending),
            "3" | "failed" => Ok(Status::Failed),
            other => Err(format!(
                "'{}' is not a status (use done, pending, failed or 1-3)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: NaiveDate,
    pub status: Status,
    pub category_id: RecordId,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(
        title: String,
        description: String,
        due_date: NaiveDate,
        status: Status,
        category_id: RecordId,
    ) -> Self {
        Self {
            id: 0,
            title,
            description,
            due_date,
            status,
            category_id,
            created_at: Utc::now(),
        }
    }
}

impl Record for Task {
    const KIND: EntityKind = EntityKind::Task;

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: RecordId,
    pub title: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(title: String) -> Self {
        Self {
            id: 0,
            title,
            created_at: Utc::now(),
        }
    }
}

impl Record for Category {
    const KIND: EntityKind = EntityKind::Category;

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}
