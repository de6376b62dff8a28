use super::{ChatFilter, ChatPatch, ChatStore, StoreError};
use crate::chat::{ChatDocument, ChatMessage, NewChat};
use crate::shared::ids::DocumentId;
use crate::shared::now_secs;
use rusqlite::{params, Connection, ErrorCode, Row};
use std::fs;
use std::path::{Path, PathBuf};

const SELECT_CHATS: &str = "
    SELECT id, created_at, name, created_by, members_json, messages_json
    FROM chats
";

pub struct SqliteChatStore {
    db_path: PathBuf,
}

impl SqliteChatStore {
    pub fn open(db_path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateParent {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let store = Self {
            db_path: db_path.to_path_buf(),
        };
        store.ensure_schema()?;
        Ok(store)
    }

    fn ensure_schema(&self) -> Result<(), StoreError> {
        let connection = self.connect()?;
        connection
            .execute_batch(
                "
                CREATE TABLE IF NOT EXISTS chats (
                    id TEXT PRIMARY KEY,
                    created_at INTEGER NOT NULL,
                    name TEXT NOT NULL UNIQUE,
                    created_by TEXT NOT NULL,
                    members_json TEXT NOT NULL,
                    messages_json TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_chats_created
                    ON chats(created_at ASC);
                ",
            )
            .map_err(|source| StoreError::Sql { source })
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        let connection = Connection::open(&self.db_path).map_err(|source| StoreError::Open {
            path: self.db_path.display().to_string(),
            source,
        })?;
        connection
            .execute_batch("PRAGMA journal_mode=WAL; PRAGMA busy_timeout=5000;")
            .map_err(|source| StoreError::Sql { source })?;
        Ok(connection)
    }
}

impl ChatStore for SqliteChatStore {
    fn find(&self, filter: &ChatFilter) -> Result<Vec<ChatDocument>, StoreError> {
        let connection = self.connect()?;
        let (sql, name) = match filter {
            ChatFilter::All => (
                format!("{SELECT_CHATS} ORDER BY created_at ASC, rowid ASC"),
                None,
            ),
            ChatFilter::NameEquals(name) => (
                format!("{SELECT_CHATS} WHERE name = ?1 ORDER BY created_at ASC, rowid ASC"),
                Some(name.as_str()),
            ),
        };
        let mut statement = connection
            .prepare(&sql)
            .map_err(|source| StoreError::Sql { source })?;

        let rows = match name {
            Some(name) => statement.query_map(params![name], read_raw_row),
            None => statement.query_map([], read_raw_row),
        }
        .map_err(|source| StoreError::Sql { source })?;

        let mut chats = Vec::new();
        for row in rows {
            let raw = row.map_err(|source| StoreError::Sql { source })?;
            chats.push(raw.decode()?);
        }
        Ok(chats)
    }

    fn insert(&self, chat: NewChat) -> Result<DocumentId, StoreError> {
        let id = DocumentId::generate().map_err(StoreError::IdGeneration)?;
        let members_json = encode_json("members", &chat.members)?;
        let messages_json = encode_json("messages", &chat.messages)?;
        let connection = self.connect()?;
        connection
            .execute(
                "
                INSERT INTO chats (id, created_at, name, created_by, members_json, messages_json)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ",
                params![
                    id.as_str(),
                    now_secs(),
                    chat.name,
                    chat.created_by,
                    members_json,
                    messages_json,
                ],
            )
            .map_err(|source| match source {
                rusqlite::Error::SqliteFailure(ref err, _)
                    if err.code == ErrorCode::ConstraintViolation =>
                {
                    StoreError::DuplicateName {
                        name: chat.name.clone(),
                    }
                }
                source => StoreError::Sql { source },
            })?;
        Ok(id)
    }

    fn patch(&self, id: &DocumentId, patch: ChatPatch) -> Result<(), StoreError> {
        let mut connection = self.connect()?;
        let tx = connection
            .transaction()
            .map_err(|source| StoreError::Sql { source })?;

        let exists = tx
            .query_row(
                "SELECT COUNT(*) FROM chats WHERE id = ?1",
                params![id.as_str()],
                |row| row.get::<_, i64>(0),
            )
            .map_err(|source| StoreError::Sql { source })?;
        if exists == 0 {
            return Err(StoreError::MissingDocument { id: id.to_string() });
        }

        if let Some(members) = &patch.members {
            tx.execute(
                "UPDATE chats SET members_json = ?2 WHERE id = ?1",
                params![id.as_str(), encode_json("members", members)?],
            )
            .map_err(|source| StoreError::Sql { source })?;
        }
        if let Some(messages) = &patch.messages {
            tx.execute(
                "UPDATE chats SET messages_json = ?2 WHERE id = ?1",
                params![id.as_str(), encode_json("messages", messages)?],
            )
            .map_err(|source| StoreError::Sql { source })?;
        }

        tx.commit().map_err(|source| StoreError::Sql { source })
    }

    fn delete(&self, id: &DocumentId) -> Result<(), StoreError> {
        let connection = self.connect()?;
        let deleted = connection
            .execute("DELETE FROM chats WHERE id = ?1", params![id.as_str()])
            .map_err(|source| StoreError::Sql { source })?;
        if deleted == 0 {
            return Err(StoreError::MissingDocument { id: id.to_string() });
        }
        Ok(())
    }
}

struct RawChatRow {
    id: String,
    created_at: i64,
    name: String,
    created_by: String,
    members_json: String,
    messages_json: String,
}

impl RawChatRow {
    fn decode(self) -> Result<ChatDocument, StoreError> {
        let members: Vec<String> =
            serde_json::from_str(&self.members_json).map_err(|source| StoreError::Decode {
                id: self.id.clone(),
                field: "members",
                source,
            })?;
        let messages: Vec<ChatMessage> =
            serde_json::from_str(&self.messages_json).map_err(|source| StoreError::Decode {
                id: self.id.clone(),
                field: "messages",
                source,
            })?;
        Ok(ChatDocument {
            id: DocumentId::from_raw(self.id),
            created_at: self.created_at,
            name: self.name,
            created_by: self.created_by,
            members,
            messages,
        })
    }
}

fn read_raw_row(row: &Row<'_>) -> rusqlite::Result<RawChatRow> {
    Ok(RawChatRow {
        id: row.get(0)?,
        created_at: row.get(1)?,
        name: row.get(2)?,
        created_by: row.get(3)?,
        members_json: row.get(4)?,
        messages_json: row.get(5)?,
    })
}

fn encode_json<T: serde::Serialize>(field: &'static str, value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|source| StoreError::Encode { field, source })
}
