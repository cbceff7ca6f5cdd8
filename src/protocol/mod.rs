use serde_json::{json, Value};

use crate::error::SessionError;
use crate::model::profile::PROFILES;
use crate::model::record::{Record, RecordField};
use crate::services::session::{EditorSession, OnUnsaved};

mod command;
use command::Command;

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload(req: &Value) -> &Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, kind: &str, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "kind": kind,
        "message": message.into()
    })
    .to_string()
}

fn session_err(id: Value, e: SessionError) -> String {
    err(id, e.kind(), e.to_string())
}

fn get_str<'a>(payload: &'a Value, name: &str) -> Option<&'a str> {
    payload.get(name).and_then(|v| v.as_str())
}

fn get_index(payload: &Value) -> Result<usize, String> {
    payload
        .get("index")
        .and_then(|v| v.as_u64())
        .and_then(|i| usize::try_from(i).ok())
        .ok_or_else(|| "payload.index must be a non-negative integer".to_string())
}

fn get_on_unsaved(payload: &Value) -> Result<OnUnsaved, String> {
    match payload.get("on_unsaved") {
        None | Some(Value::Null) => Ok(OnUnsaved::default()),
        Some(v) => serde_json::from_value(v.clone())
            .map_err(|e| format!("payload.on_unsaved must be save, discard or abort: {e}")),
    }
}

fn get_field(payload: &Value) -> Result<RecordField, String> {
    let v = payload.get("field").cloned().unwrap_or(Value::Null);
    serde_json::from_value(v).map_err(|e| format!("payload.field must be key or value: {e}"))
}

fn get_record(payload: &Value) -> Result<Record, String> {
    if payload.is_null() {
        return Ok(Record::default());
    }
    serde_json::from_value(payload.clone()).map_err(|e| format!("invalid record payload: {e}"))
}

fn record_json(index: usize, key: &str, value: &str) -> Value {
    json!({ "index": index, "key": key, "value": value })
}

/// Handles one request line against the session and returns the response line.
pub fn handle(session: &mut EditorSession, input: &str) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => {
            return json!({
                "status": "error",
                "message": "invalid json"
            })
            .to_string();
        }
    };

    let id = get_id(&req);
    let cmd_str = get_cmd(&req);
    let payload = get_payload(&req);

    log::debug!("cmd {cmd_str:?}");

    match Command::from(cmd_str) {
        Command::Ping => ok(id, json!({ "message": "dict-core alive" })),

        Command::ProfileList => {
            let active = session.profile().code;
            let profiles: Vec<Value> = PROFILES
                .iter()
                .map(|p| {
                    json!({
                        "code": p.code,
                        "label": p.label,
                        "filename": p.filename,
                        "active": p.code == active
                    })
                })
                .collect();
            ok(id, json!({ "profiles": profiles }))
        }

        Command::ProfileSet => {
            let code = get_str(payload, "code").unwrap_or("");
            if code.is_empty() {
                return err(id, "invalid_request", "payload.code is required");
            }
            let on_unsaved = match get_on_unsaved(payload) {
                Ok(v) => v,
                Err(e) => return err(id, "invalid_request", e),
            };

            match session.set_active_profile(code, on_unsaved) {
                Ok(report) => ok(
                    id,
                    json!({
                        "switched": report.is_some(),
                        "profile": session.profile().code,
                        "path": session.path().display().to_string(),
                        "count": session.store().len()
                    }),
                ),
                Err(e) => session_err(id, e),
            }
        }

        Command::RecordsList => {
            let query = get_str(payload, "query").unwrap_or("");
            let records: Vec<Value> = session
                .visible_records(query)
                .into_iter()
                .map(|(i, r)| record_json(i, &r.key, &r.value))
                .collect();
            ok(
                id,
                json!({ "records": records, "total": session.store().len() }),
            )
        }

        Command::RecordsAdd => {
            let record = match get_record(payload) {
                Ok(r) => r,
                Err(e) => return err(id, "invalid_request", e),
            };
            let index = if record.key.is_empty() && record.value.is_empty() {
                session.add_blank_record()
            } else {
                session.add_record(&record.key, &record.value)
            };
            ok(id, json!({ "index": index }))
        }

        Command::RecordsRemove => {
            let index = match get_index(payload) {
                Ok(i) => i,
                Err(e) => return err(id, "invalid_request", e),
            };
            match session.remove_record(index) {
                Ok(removed) => ok(id, json!({ "removed": removed })),
                Err(e) => session_err(id, e),
            }
        }

        Command::RecordsEdit => {
            let index = match get_index(payload) {
                Ok(i) => i,
                Err(e) => return err(id, "invalid_request", e),
            };
            let field = match get_field(payload) {
                Ok(f) => f,
                Err(e) => return err(id, "invalid_request", e),
            };
            let value = match get_str(payload, "value") {
                Some(v) => v,
                None => return err(id, "invalid_request", "payload.value is required"),
            };
            match session.edit_record(index, field, value) {
                Ok(r) => ok(id, json!({ "record": record_json(index, &r.key, &r.value) })),
                Err(e) => session_err(id, e),
            }
        }

        Command::DictionarySave => match session.save() {
            Ok(report) => ok(id, serde_json::to_value(report).unwrap_or(json!({}))),
            Err(e) => session_err(id, e),
        },

        Command::DictionaryReload => match session.reload() {
            Ok(report) => ok(id, serde_json::to_value(report).unwrap_or(json!({}))),
            Err(e) => session_err(id, e),
        },

        Command::SessionStatus => ok(
            id,
            json!({
                "profile": session.profile().code,
                "base_dir": session.base_dir().display().to_string(),
                "path": session.path().display().to_string(),
                "dirty": session.is_dirty(),
                "count": session.store().len(),
                "encoding": session.encoding()
            }),
        ),

        Command::SessionClose => {
            let on_unsaved = match get_on_unsaved(payload) {
                Ok(v) => v,
                Err(e) => return err(id, "invalid_request", e),
            };
            match session.close(on_unsaved) {
                Ok(closed) => ok(id, json!({ "closed": closed })),
                Err(e) => session_err(id, e),
            }
        }

        Command::Unknown => err(id, "unknown_command", "unknown command"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::profile;
    use std::fs;
    use tempfile::TempDir;

    fn setup(en: &str) -> (EditorSession, TempDir) {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("dictionary_en.txt"), en).unwrap();
        let mut session = EditorSession::start(temp.path().to_path_buf(), profile::default_profile());
        session.reload().unwrap();
        (session, temp)
    }

    fn call(session: &mut EditorSession, req: Value) -> Value {
        serde_json::from_str(&handle(session, &req.to_string())).unwrap()
    }

    #[test]
    fn invalid_json_and_unknown_command() {
        let (mut session, _temp) = setup("");
        let resp: Value = serde_json::from_str(&handle(&mut session, "{nope")).unwrap();
        assert_eq!(resp["message"], "invalid json");

        let resp = call(&mut session, json!({ "id": 1, "cmd": "frobnicate" }));
        assert_eq!(resp["status"], "error");
        assert_eq!(resp["kind"], "unknown_command");
        assert_eq!(resp["id"], 1);
    }

    #[test]
    fn edit_flow_over_the_wire() {
        let (mut session, temp) = setup("Cat, Gato\nDog, Perro\n");

        let resp = call(&mut session, json!({ "id": 1, "cmd": "records.list", "payload": { "query": "GAT" } }));
        assert_eq!(resp["payload"]["records"], json!([{ "index": 0, "key": "Cat", "value": "Gato" }]));
        assert_eq!(resp["payload"]["total"], 2);

        let resp = call(&mut session, json!({ "id": 2, "cmd": "records.add" }));
        assert_eq!(resp["payload"]["index"], 2);

        let resp = call(
            &mut session,
            json!({ "id": 3, "cmd": "records.edit", "payload": { "index": 2, "field": "key", "value": "Bird" } }),
        );
        assert_eq!(resp["payload"]["record"]["key"], "Bird");

        call(
            &mut session,
            json!({ "id": 4, "cmd": "records.edit", "payload": { "index": 2, "field": "value", "value": "Pájaro" } }),
        );

        let resp = call(&mut session, json!({ "id": 5, "cmd": "session.status" }));
        assert_eq!(resp["payload"]["dirty"], true);

        let resp = call(&mut session, json!({ "id": 6, "cmd": "records.remove", "payload": { "index": 1 } }));
        assert_eq!(resp["payload"]["removed"], json!({ "key": "Dog", "value": "Perro" }));

        let resp = call(&mut session, json!({ "id": 7, "cmd": "dictionary.save" }));
        assert_eq!(resp["status"], "ok");
        assert_eq!(resp["payload"]["written"], 2);
        assert_eq!(
            fs::read_to_string(temp.path().join("dictionary_en.txt")).unwrap(),
            "Cat, Gato\nBird, Pájaro\n"
        );

        let resp = call(&mut session, json!({ "id": 8, "cmd": "session.status" }));
        assert_eq!(resp["payload"]["dirty"], false);
        assert_eq!(resp["payload"]["encoding"], "utf-8-sig");
    }

    #[test]
    fn bad_requests_are_reported() {
        let (mut session, _temp) = setup("a, 1\n");

        let resp = call(&mut session, json!({ "cmd": "records.remove", "payload": { "index": -1 } }));
        assert_eq!(resp["kind"], "invalid_request");

        let resp = call(&mut session, json!({ "cmd": "records.remove", "payload": { "index": 9 } }));
        assert_eq!(resp["kind"], "index_out_of_range");

        let resp = call(
            &mut session,
            json!({ "cmd": "records.edit", "payload": { "index": 0, "field": "other", "value": "x" } }),
        );
        assert_eq!(resp["kind"], "invalid_request");

        let resp = call(&mut session, json!({ "cmd": "profile.set", "payload": { "code": "de" } }));
        assert_eq!(resp["kind"], "unknown_profile");

        let resp = call(
            &mut session,
            json!({ "cmd": "profile.set", "payload": { "code": "ko", "on_unsaved": "later" } }),
        );
        assert_eq!(resp["kind"], "invalid_request");

        let resp = call(&mut session, json!({ "cmd": "records.add", "payload": { "key": 5 } }));
        assert_eq!(resp["kind"], "invalid_request");

        let resp = call(
            &mut session,
            json!({ "cmd": "records.remove", "payload": { "index": u64::MAX } }),
        );
        let expected = if usize::try_from(u64::MAX).is_ok() {
            "index_out_of_range"
        } else {
            "invalid_request"
        };
        assert_eq!(resp["kind"], expected);
    }

    #[test]
    fn profile_switch_requires_resolving_unsaved_edits() {
        let (mut session, temp) = setup("a, 1\n");
        call(&mut session, json!({ "cmd": "records.add", "payload": { "key": "b", "value": "2" } }));

        let resp = call(&mut session, json!({ "cmd": "profile.set", "payload": { "code": "ko" } }));
        assert_eq!(resp["kind"], "unsaved_changes");

        let resp = call(
            &mut session,
            json!({ "cmd": "profile.set", "payload": { "code": "ko", "on_unsaved": "discard" } }),
        );
        assert_eq!(resp["payload"]["switched"], true);
        assert_eq!(resp["payload"]["profile"], "ko");
        assert_eq!(resp["payload"]["count"], 0);
        assert_eq!(
            fs::read_to_string(temp.path().join("dictionary_en.txt")).unwrap(),
            "a, 1\n"
        );

        let resp = call(&mut session, json!({ "cmd": "profile.list" }));
        let active: Vec<&Value> = resp["payload"]["profiles"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|p| p["active"] == true)
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0]["code"], "ko");
    }

    #[test]
    fn close_with_unsaved_edits() {
        let (mut session, _temp) = setup("a, 1\n");
        call(&mut session, json!({ "cmd": "records.add" }));

        let resp = call(&mut session, json!({ "cmd": "session.close" }));
        assert_eq!(resp["payload"]["closed"], false);
        assert!(!session.is_closed());

        let resp = call(&mut session, json!({ "cmd": "session.close", "payload": { "on_unsaved": "save" } }));
        assert_eq!(resp["payload"]["closed"], true);
        assert!(session.is_closed());
    }
}
