//! Response envelope assembly
//!
//! Every endpoint answers with the same wrapper:
//!
//! ```json
//! { "success": true, "message": "...", "content": { ... } }
//! ```
//!
//! List content is keyed by the plural resource name next to a
//! `pagination` object; single-item content is keyed by the singular name
//! and may hold `null`.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::shared::pagination::PageMetadata;

/// A serializable item that names itself inside an envelope.
pub trait Resource: Serialize {
    /// Key for a single item, e.g. `"product"`.
    const SINGULAR: &'static str;
    /// Key for a list of items, e.g. `"products"`.
    const PLURAL: &'static str;
}

/// The `{success, message, content}` wrapper.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Envelope<C> {
    pub success: bool,
    pub message: String,
    pub content: Option<C>,
}

/// `content` of a list response: `{<plural>: [...], "pagination": {...}}`
#[derive(Debug, Clone)]
pub struct ListContent<T> {
    pub items: Vec<T>,
    pub pagination: PageMetadata,
}

impl<T: Resource> Serialize for ListContent<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(T::PLURAL, &self.items)?;
        map.serialize_entry("pagination", &self.pagination)?;
        map.end()
    }
}

/// `content` of a single-item response: `{<singular>: item | null}`
#[derive(Debug, Clone)]
pub struct SingleContent<T> {
    pub item: Option<T>,
}

impl<T: Resource> Serialize for SingleContent<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(T::SINGULAR, &self.item)?;
        map.end()
    }
}

/// Builds envelopes. Stateless.
pub struct ResponseAssembler;

impl ResponseAssembler {
    /// Wrap an already-expanded page. Item order is kept as given.
    pub fn assemble_list<T: Resource>(
        items: Vec<T>,
        pagination: PageMetadata,
        message: impl Into<String>,
    ) -> Envelope<ListContent<T>> {
        Envelope {
            success: true,
            message: message.into(),
            content: Some(ListContent { items, pagination }),
        }
    }

    /// Wrap one item; `None` serializes as `null` under the singular key.
    pub fn assemble_single<T: Resource>(
        item: Option<T>,
        message: impl Into<String>,
    ) -> Envelope<SingleContent<T>> {
        Envelope {
            success: true,
            message: message.into(),
            content: Some(SingleContent { item }),
        }
    }

    pub fn failure(message: impl Into<String>) -> Envelope<()> {
        Envelope {
            success: false,
            message: message.into(),
            content: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::pagination::{PageRequest, Paginator};
    use serde_json::json;

    #[derive(serde::Serialize)]
    struct Widget {
        id: i32,
    }

    impl Resource for Widget {
        const SINGULAR: &'static str = "widget";
        const PLURAL: &'static str = "widgets";
    }

    #[test]
    fn list_envelope_uses_plural_key_and_keeps_order() {
        let meta = PageMetadata::compute(25, PageRequest::new(10, 0));
        let items = vec![Widget { id: 3 }, Widget { id: 1 }, Widget { id: 2 }];
        let env = ResponseAssembler::assemble_list(items, meta, "Widgets retrieved.");

        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "message": "Widgets retrieved.",
                "content": {
                    "widgets": [{"id": 3}, {"id": 1}, {"id": 2}],
                    "pagination": {
                        "total_records": 25,
                        "total_pages": 3,
                        "previous_page": null,
                        "next_page": 2,
                        "limit": 10
                    }
                }
            })
        );
    }

    #[test]
    fn empty_page_still_has_pagination() {
        let meta = Paginator::default().paginate(0, 10, 0);
        let env = ResponseAssembler::assemble_list(Vec::<Widget>::new(), meta, "ok");
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value["content"]["widgets"], json!([]));
        assert_eq!(value["content"]["pagination"]["total_pages"], 0);
        assert_eq!(value["content"]["pagination"]["next_page"], json!(null));
    }

    #[test]
    fn single_envelope_may_hold_null() {
        let found = ResponseAssembler::assemble_single(Some(Widget { id: 7 }), "found");
        assert_eq!(
            serde_json::to_value(&found).unwrap()["content"],
            json!({"widget": {"id": 7}})
        );

        let missing = ResponseAssembler::assemble_single(None::<Widget>, "found");
        let value = serde_json::to_value(&missing).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["content"], json!({"widget": null}));
    }

    #[test]
    fn failure_has_no_content() {
        let value = serde_json::to_value(ResponseAssembler::failure("nope")).unwrap();
        assert_eq!(
            value,
            json!({"success": false, "message": "nope", "content": null})
        );
    }
}
