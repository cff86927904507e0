//! Shared fixtures for the integration tests: a model registry mirroring a
//! small content application, and a hash-map-backed [`Record`]
//! implementation standing in for a live storage row.

use modelschema::model::{AttrValue, FieldDef, FileRef, ModelDef};
use modelschema::{ModelId, Record, Registry, StorageType};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// The value every fixture UUID factory returns.
pub const CONFIG_ID: &str = "6cd1eb91-1e05-4c0f-8e69-5bf2d0c6a8f5";

pub fn model_id(registry: &Registry, name: &str) -> ModelId {
    registry
        .model_by_name(name)
        .unwrap_or_else(|| panic!("model `{name}` is not registered"))
        .id
}

/// An in-memory row. Attributes live behind a mutex so relation cycles can
/// be wired up after both rows exist.
pub struct Row {
    model: ModelId,
    attrs: Mutex<HashMap<String, AttrValue>>,
}

impl Row {
    pub fn new(model: ModelId) -> Arc<Row> {
        Arc::new(Row {
            model,
            attrs: Mutex::new(HashMap::new()),
        })
    }

    pub fn set(&self, name: &str, attr: AttrValue) {
        self.attrs.lock().unwrap().insert(name.to_string(), attr);
    }

    pub fn set_value(&self, name: &str, value: impl Into<Value>) {
        self.set(name, AttrValue::from(value.into()));
    }

    pub fn set_record(&self, name: &str, record: &Arc<Row>) {
        self.set(name, AttrValue::Record(record.clone() as Arc<dyn Record>));
    }

    pub fn set_many(&self, name: &str, rows: &[Arc<Row>]) {
        self.set(
            name,
            AttrValue::Many(
                rows.iter()
                    .map(|row| row.clone() as Arc<dyn Record>)
                    .collect(),
            ),
        );
    }

    pub fn set_file(&self, name: &str, path: &str) {
        self.set(name, AttrValue::File(FileRef::new(path)));
    }

    pub fn set_null(&self, name: &str) {
        self.set(name, AttrValue::Null);
    }

    pub fn as_record(self: &Arc<Self>) -> Arc<dyn Record> {
        self.clone()
    }
}

impl Record for Row {
    fn model(&self) -> ModelId {
        self.model
    }

    fn attr(&self, name: &str) -> AttrValue {
        self.attrs
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or(AttrValue::Missing)
    }
}

/// Builds the fixture registry used by every scenario file.
pub fn testapp() -> Arc<Registry> {
    Registry::builder()
        .model(
            ModelDef::new("Thread")
                .field(FieldDef::new("id", StorageType::Auto).primary_key())
                .field(FieldDef::new("title", StorageType::Char).max_length(30))
                .field(FieldDef::one_to_many("message", "Message").accessor("messages")),
        )
        .model(
            ModelDef::new("Message")
                .field(FieldDef::new("id", StorageType::Auto).primary_key())
                .field(FieldDef::new("content", StorageType::Text))
                .field(FieldDef::new("created_at", StorageType::DateTime))
                .field(FieldDef::many_to_one("thread", "Thread")),
        )
        .model(
            ModelDef::new("Publication")
                .field(FieldDef::new("id", StorageType::Auto).primary_key())
                .field(FieldDef::new("title", StorageType::Char).max_length(30))
                .field(FieldDef::many_to_many_reverse("article", "Article")),
        )
        .model(
            ModelDef::new("Article")
                .field(FieldDef::new("id", StorageType::Auto).primary_key())
                .field(FieldDef::new("headline", StorageType::Char).max_length(100))
                .field(FieldDef::new("pub_date", StorageType::Date))
                .field(FieldDef::many_to_many("publications", "Publication")),
        )
        .model(
            ModelDef::new("User")
                .doc("A user of the application.")
                .field(FieldDef::new("id", StorageType::BigAuto).primary_key())
                .field(FieldDef::new("first_name", StorageType::Char).max_length(50))
                .field(
                    FieldDef::new("last_name", StorageType::Char)
                        .max_length(50)
                        .nullable()
                        .blank(),
                )
                .field(FieldDef::new("email", StorageType::Email).max_length(254))
                .field(FieldDef::new("created_at", StorageType::DateTime))
                .field(FieldDef::new("updated_at", StorageType::DateTime))
                .field(FieldDef::one_to_one_reverse("profile", "Profile")),
        )
        .model(
            ModelDef::new("Profile")
                .doc("A user's profile.")
                .field(FieldDef::new("id", StorageType::Auto).primary_key())
                .field(FieldDef::one_to_one("user", "User"))
                .field(
                    FieldDef::new("website", StorageType::Url)
                        .max_length(200)
                        .blank()
                        .default(""),
                )
                .field(
                    FieldDef::new("location", StorageType::Char)
                        .max_length(100)
                        .blank()
                        .default(""),
                ),
        )
        .model(
            ModelDef::new("Configuration")
                .field(FieldDef::new("id", StorageType::Auto).primary_key())
                .field(
                    FieldDef::new("config_id", StorageType::Uuid)
                        .default_factory(|| json!(CONFIG_ID))
                        .help_text("Unique id of the configuration."),
                )
                .field(FieldDef::new("name", StorageType::Char).max_length(100))
                .field(
                    FieldDef::new("permissions", StorageType::Json)
                        .blank()
                        .default(json!({})),
                )
                .field(
                    FieldDef::new("changelog", StorageType::Json)
                        .blank()
                        .default(json!([])),
                )
                .field(FieldDef::new("metadata", StorageType::Json).blank().nullable())
                .field(
                    FieldDef::new("version", StorageType::Char)
                        .max_length(5)
                        .default("0.0.1"),
                ),
        )
        .model(
            ModelDef::new("Record")
                .field(FieldDef::new("id", StorageType::Auto).primary_key())
                .field(
                    FieldDef::new(
                        "title",
                        StorageType::Custom {
                            name: "RestrictedCharField".to_string(),
                            base: Some(Box::new(StorageType::Char)),
                        },
                    )
                    .max_length(20),
                )
                .field(FieldDef::new("items", StorageType::Json).nullable().blank())
                .field(
                    FieldDef::new("record_type", StorageType::Char)
                        .max_length(5)
                        .default("NEW")
                        .choices([(json!("NEW"), "New"), (json!("OLD"), "Old")]),
                )
                .field(
                    FieldDef::new("record_status", StorageType::PositiveSmallInteger)
                        .default(0)
                        .choices([
                            (json!(0), "Recording"),
                            (json!(1), "Live"),
                            (json!(2), "Archived"),
                        ]),
                ),
        )
        .model(
            ModelDef::new("Preference")
                .doc("A user's preference.")
                .field(FieldDef::new("id", StorageType::Auto).primary_key())
                .field(FieldDef::new("name", StorageType::Char).max_length(128))
                .field(
                    FieldDef::new("preferred_food", StorageType::Char)
                        .max_length(2)
                        .default("ba")
                        .choices([(json!("ba"), "Banana"), (json!("ap"), "Apple")]),
                )
                .field(
                    FieldDef::new("preferred_group", StorageType::Integer)
                        .default(1)
                        .choices([(json!(1), "Group 1"), (json!(2), "Group 2")]),
                ),
        )
        .model(
            ModelDef::new("Attachment")
                .field(FieldDef::new("id", StorageType::Auto).primary_key())
                .field(FieldDef::new("description", StorageType::Char).max_length(255))
                .field(FieldDef::new("image", StorageType::Image).nullable().blank()),
        )
        .model(
            ModelDef::new("Searchable")
                .field(FieldDef::new("id", StorageType::Auto).primary_key())
                .field(FieldDef::new("title", StorageType::Char).max_length(255))
                .field(
                    FieldDef::new(
                        "search_vector",
                        StorageType::Custom {
                            name: "SearchVectorField".to_string(),
                            base: None,
                        },
                    )
                    .nullable(),
                ),
        )
        .model(
            ModelDef::new("Expert")
                .field(FieldDef::new("id", StorageType::Auto).primary_key())
                .field(FieldDef::new("name", StorageType::Char).max_length(128))
                .field(FieldDef::many_to_many("cases", "Case")),
        )
        .model(
            ModelDef::new("Case")
                .field(FieldDef::new("id", StorageType::Auto).primary_key())
                .field(FieldDef::new("name", StorageType::Char).max_length(128))
                .field(FieldDef::new("details", StorageType::Text))
                .field(
                    FieldDef::many_to_many_reverse("expert", "Expert").accessor("related_experts"),
                ),
        )
        .model(
            ModelDef::new("Tagged")
                .field(FieldDef::new("id", StorageType::Auto).primary_key())
                .field(FieldDef::new("slug", StorageType::Slug).max_length(50))
                .field(FieldDef::generic_foreign("content_object")),
        )
        .model(
            ModelDef::new("Bookmark")
                .field(FieldDef::new("id", StorageType::Auto).primary_key())
                .field(FieldDef::new("url", StorageType::Url).max_length(200))
                .field(FieldDef::generic_relation("tags", "Tagged")),
        )
        .build()
        .expect("fixture registry is valid")
}
