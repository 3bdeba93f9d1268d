//! RPC method handler for the Bookmark Alpha JSON-RPC protocol.
//!
//! Kept apart from the stdin/stdout loop in `main.rs` so it can be
//! unit-tested. `handle_method` dispatches a method call to the [`App`] and
//! returns the JSON result the presentation layer renders.

use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use serde_json::{json, Value};

use crate::app::App;
use crate::managers::bookmark_manager::BookmarkManagerTrait;
use crate::services::import_export;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::bookmark::{BookmarkInput, FilterCriteria, ViewMode};

fn str_param<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("missing {}", key))
}

fn to_json<T: serde::Serialize>(value: T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

fn input_from(params: &Value) -> Result<BookmarkInput, String> {
    serde_json::from_value(params.clone()).map_err(|e| format!("invalid bookmark: {}", e))
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    let mut a = app.lock().map_err(|e| e.to_string())?;

    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Bookmarks ───
        "bookmark.add" => {
            let input = input_from(params)?;
            let bm = a.bookmarks.add_bookmark(input).map_err(|e| e.to_string())?;
            to_json(bm)
        }
        "bookmark.update" => {
            let id = str_param(params, "id")?;
            let input = input_from(params)?;
            let bm = a.bookmarks.update_bookmark(id, input).map_err(|e| e.to_string())?;
            to_json(bm)
        }
        "bookmark.delete" => {
            let id = str_param(params, "id")?;
            a.bookmarks.remove_bookmark(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "bookmark.toggle_favorite" => {
            let id = str_param(params, "id")?;
            let bm = a.bookmarks.toggle_favorite(id).map_err(|e| e.to_string())?;
            to_json(bm)
        }
        "bookmark.get" => {
            let id = str_param(params, "id")?;
            let bm = a.bookmarks.get_bookmark(id).map_err(|e| e.to_string())?;
            to_json(bm)
        }
        "bookmark.list" => {
            let criteria: FilterCriteria = if params.is_null() {
                FilterCriteria::default()
            } else {
                serde_json::from_value(params.clone())
                    .map_err(|e| format!("invalid filter: {}", e))?
            };
            let items = a.visible_bookmarks(&criteria);
            Ok(json!({
                "items": to_json(&items)?,
                "stats": to_json(a.stats())?,
                "view": to_json(a.view_mode())?,
            }))
        }
        "bookmark.categories" => to_json(a.categories()),
        "bookmark.stats" => to_json(a.stats()),
        "bookmark.import_html" => {
            let html = str_param(params, "html")?;
            let outcome = a.import_html(html).map_err(|e| e.to_string())?;
            to_json(outcome)
        }
        "bookmark.import_file" => {
            let path = str_param(params, "path")?;
            let outcome = a.import_html_file(Path::new(path)).map_err(|e| e.to_string())?;
            to_json(outcome)
        }
        "bookmark.export" => {
            let json = import_export::export_json(a.bookmarks.list_bookmarks())
                .map_err(|e| e.to_string())?;
            let filename = import_export::export_file_name(Local::now().date_naive());
            Ok(json!({"filename": filename, "json": json}))
        }
        "bookmark.export_file" => {
            let dir = str_param(params, "dir")?;
            let path = a
                .export_to_dir(Path::new(dir), Local::now().date_naive())
                .map_err(|e| e.to_string())?;
            Ok(json!({"path": path.to_string_lossy()}))
        }
        "bookmark.restore" => {
            let json = str_param(params, "json")?;
            let restored = a.restore_json(json).map_err(|e| e.to_string())?;
            Ok(json!({"restored": restored}))
        }

        // ─── Images ───
        "image.resolve" => {
            let url = str_param(params, "url")?;
            Ok(json!({"imageUrl": a.bookmarks.resolver().resolve_image(url)}))
        }
        "image.favicon" => {
            let url = str_param(params, "url")?;
            Ok(json!({"imageUrl": a.bookmarks.resolver().resolve_favicon(url)}))
        }

        // ─── Settings ───
        "settings.get" => to_json(a.settings_engine.get_settings()),
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            a.apply_settings().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "settings.reset" => {
            a.settings_engine.reset().map_err(|e| e.to_string())?;
            a.apply_settings().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── View ───
        "view.get" => Ok(json!({"view": to_json(a.view_mode())?})),
        "view.set" => {
            let raw = params.get("view").cloned().unwrap_or(Value::Null);
            let view: ViewMode =
                serde_json::from_value(raw).map_err(|e| format!("invalid view: {}", e))?;
            a.set_view_mode(view).map_err(|e| e.to_string())?;
            Ok(json!({"view": to_json(view)?}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
