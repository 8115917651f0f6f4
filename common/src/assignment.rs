//! 教室割当の正規化モジュール
//!
//! APIから受け取る教室割当は、教室名・定員の持ち方がサービスごとに異なる:
//! - `classroom_name` が文字列
//! - `classroom_name` / `classroom` がネストしたオブジェクト（`nom_local` など）
//! - 定員がレコード直下の `capacity` / `capacite`
//!
//! ここで描画可能な `ClassroomAssignment` に揃え、集計値を計算する。
//! 個々のフィールドの欠損・型違いはデフォルト値に落とし、エラーにするのは
//! レスポンス最上位の構造違反だけ。

use crate::error::{Error, Result};
use crate::types::{AggregateStats, AssignmentSummary, Candidate, ClassroomAssignment};
use serde_json::{Map, Value};

/// 教室名が存在しない場合の表示名
pub const UNKNOWN_ROOM: &str = "Salle inconnue";

/// 教室オブジェクトはあるが名前がない場合の表示名
pub const UNNAMED_ROOM: &str = "Salle sans nom";

/// 教室名の探索キー（優先順）
const NAME_KEYS: [&str; 3] = ["nom_local", "name", "classroom_name"];

/// 定員の探索キー（優先順）
const CAPACITY_KEYS: [&str; 2] = ["capacity", "capacite"];

/// ネストした教室情報の探索キー（優先順）
const NESTED_CLASSROOM_KEYS: [&str; 2] = ["classroom", "classroom_name"];

const SUCCESS_STATUS: &str = "success";

/// 生フィールドの形
#[derive(Debug, Clone, Copy)]
pub enum RawField<'a> {
    /// キーなし、またはnull
    Absent,
    Text(&'a str),
    Object(&'a Map<String, Value>),
    /// 数値・真偽値・配列
    Other(&'a Value),
}

impl<'a> From<Option<&'a Value>> for RawField<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => RawField::Absent,
            Some(Value::String(s)) => RawField::Text(s),
            Some(Value::Object(map)) => RawField::Object(map),
            Some(other) => RawField::Other(other),
        }
    }
}

impl<'a> From<&'a Value> for RawField<'a> {
    fn from(value: &'a Value) -> Self {
        RawField::from(Some(value))
    }
}

/// 教室名を解決する
///
/// 優先順位:
/// 1. 値なし（空文字を含む） → `UNKNOWN_ROOM`
/// 2. オブジェクト → `nom_local` / `name` / `classroom_name` の最初の値、なければ `UNNAMED_ROOM`
/// 3. それ以外 → 文字列化してそのまま
///
/// # Examples
/// ```
/// use exam_admin_common::{resolve_classroom_name, RawField};
///
/// assert_eq!(resolve_classroom_name(RawField::Text("B202")), "B202");
/// assert_eq!(resolve_classroom_name(RawField::Absent), "Salle inconnue");
/// ```
pub fn resolve_classroom_name(field: RawField<'_>) -> String {
    match field {
        RawField::Absent => UNKNOWN_ROOM.to_string(),
        RawField::Text(s) if s.trim().is_empty() => UNKNOWN_ROOM.to_string(),
        RawField::Text(s) => s.to_string(),
        RawField::Object(map) => NAME_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(display_value)
            .unwrap_or_else(|| UNNAMED_ROOM.to_string()),
        RawField::Other(value) => display_value(value).unwrap_or_else(|| UNKNOWN_ROOM.to_string()),
    }
}

/// 定員を解決する
///
/// 優先順位:
/// 1. 値なし → 0
/// 2. オブジェクト → `capacity` / `capacite` のうち数値型の最初の値（数値以外は読み飛ばす）
/// 3. 数値 → 整数化（負数は0、小数は切り捨て）
/// 4. それ以外 → 0
pub fn resolve_classroom_capacity(field: RawField<'_>) -> u32 {
    match field {
        RawField::Object(map) => CAPACITY_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(numeric_to_u32)
            .unwrap_or(0),
        RawField::Other(value) => numeric_to_u32(value).unwrap_or(0),
        RawField::Absent | RawField::Text(_) => 0,
    }
}

/// 教室割当レコード1件を正規化する
///
/// ネストした教室情報（`classroom` → `classroom_name`）を先に、
/// レコード自体をフォールバックとして教室名・定員を解決する。
/// 失敗しない：不正な値はデフォルトに落とす。
pub fn normalize_assignment(record: &Value) -> ClassroomAssignment {
    let fields = record.as_object();
    let get = |key: &str| fields.and_then(|m| m.get(key));

    let nested = NESTED_CLASSROOM_KEYS
        .iter()
        .filter_map(|key| get(*key))
        .find(|v| !v.is_null());

    let classroom_name = resolve_classroom_name(RawField::from(nested.unwrap_or(record)));

    // 文字列の教室名は定員を持たないので、その場合はレコード直下を探す
    let capacity_source = nested.filter(|v| v.is_object()).unwrap_or(record);
    let capacity = resolve_classroom_capacity(RawField::from(capacity_source));

    let assigned = get("assigned").and_then(numeric_to_u32).unwrap_or(0);
    let available = get("available")
        .and_then(numeric_to_u32)
        .unwrap_or_else(|| capacity.saturating_sub(assigned));

    let candidats = match get("candidats") {
        Some(Value::Array(items)) => items.iter().filter_map(normalize_candidate).collect(),
        _ => Vec::new(),
    };

    ClassroomAssignment {
        classroom_id: get("classroom_id").and_then(numeric_to_i64),
        classroom_name,
        capacity,
        assigned,
        available,
        candidats,
    }
}

/// APIレスポンス全体を正規化し、集計する
///
/// # Returns
/// * `Ok(AssignmentSummary)` - 入力順を保った教室割当と集計値
/// * `Err(Error::UnexpectedFormat)` - `status` が success でない、または `data.assignments` がない
pub fn normalize_assignments(body: &Value) -> Result<AssignmentSummary> {
    match body.get("status").and_then(Value::as_str) {
        Some(SUCCESS_STATUS) => {}
        Some(other) => {
            return Err(Error::UnexpectedFormat(format!("status: {}", other)));
        }
        None => {
            return Err(Error::UnexpectedFormat("status がありません".into()));
        }
    }

    let records = body
        .get("data")
        .and_then(|d| d.get("assignments"))
        .and_then(Value::as_array)
        .ok_or_else(|| Error::UnexpectedFormat("data.assignments がありません".into()))?;

    let assignments: Vec<ClassroomAssignment> = records.iter().map(normalize_assignment).collect();
    let stats = AggregateStats::from_assignments(&assignments);

    tracing::debug!(
        classrooms = assignments.len(),
        candidates = stats.total_candidates,
        "教室割当を正規化"
    );

    Ok(AssignmentSummary { assignments, stats })
}

/// レスポンス文字列をパースして正規化する
pub fn parse_assignments_response(response: &str) -> Result<AssignmentSummary> {
    let body: Value = serde_json::from_str(response.trim())?;
    normalize_assignments(&body)
}

/// 受験者1件を正規化（オブジェクト以外は捨てる）
fn normalize_candidate(value: &Value) -> Option<Candidate> {
    let map = value.as_object()?;
    let text = |key: &str| map.get(key).and_then(display_value).unwrap_or_default();
    let integer = |key: &str| map.get(key).and_then(numeric_to_i64);

    Some(Candidate {
        candidat_id: integer("candidat_id"),
        cne: text("cne"),
        cin: text("cin"),
        nom: text("nom"),
        prenom: text("prenom"),
        email: text("email"),
        seat_number: integer("seat_number"),
    })
}

/// 表示用に文字列化（null・空文字はNone）
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn numeric_to_i64(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    n.as_i64().or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
}

/// 数値型なら0以上の整数に丸める（数値以外はNone）
fn numeric_to_u32(value: &Value) -> Option<u32> {
    let Value::Number(n) = value else {
        return None;
    };
    let clamped = if let Some(u) = n.as_u64() {
        u.min(u64::from(u32::MAX)) as u32
    } else if n.is_i64() {
        0
    } else {
        match n.as_f64() {
            Some(f) if f.is_finite() && f > 0.0 => f.trunc().min(f64::from(u32::MAX)) as u32,
            _ => 0,
        }
    };
    Some(clamped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn samples() -> Vec<Value> {
        vec![
            Value::Null,
            json!(""),
            json!("   "),
            json!("A101"),
            json!(0),
            json!(-4),
            json!(12.7),
            json!(true),
            json!([]),
            json!([1, 2]),
            json!({}),
            json!({"nom_local": null}),
            json!({"nom_local": ""}),
            json!({"name": 7}),
            json!({"capacity": "30"}),
            json!({"capacity": -2}),
            json!({"capacite": 1e12}),
            json!({"classroom_name": {"nom_local": "X"}}),
        ]
    }

    // =============================================
    // resolve_classroom_name テスト
    // =============================================

    #[test]
    fn test_name_never_empty() {
        for value in samples() {
            let name = resolve_classroom_name(RawField::from(&value));
            assert!(!name.is_empty(), "空の教室名: {:?}", value);
        }
        assert!(!resolve_classroom_name(RawField::Absent).is_empty());
    }

    #[test]
    fn test_name_absent_vs_unlabeled() {
        assert_eq!(resolve_classroom_name(RawField::Absent), UNKNOWN_ROOM);
        assert_eq!(resolve_classroom_name(RawField::from(&json!({"x": 1}))), UNNAMED_ROOM);
        assert_ne!(UNKNOWN_ROOM, UNNAMED_ROOM);
    }

    #[test]
    fn test_name_key_priority() {
        let value = json!({"classroom_name": "C", "name": "B", "nom_local": "A"});
        assert_eq!(resolve_classroom_name(RawField::from(&value)), "A");

        let value = json!({"classroom_name": "C", "name": "B"});
        assert_eq!(resolve_classroom_name(RawField::from(&value)), "B");

        let value = json!({"classroom_name": "C", "nom_local": null});
        assert_eq!(resolve_classroom_name(RawField::from(&value)), "C");
    }

    #[test]
    fn test_name_primitive_stringified() {
        assert_eq!(resolve_classroom_name(RawField::from(&json!("B202"))), "B202");
        assert_eq!(resolve_classroom_name(RawField::from(&json!(104))), "104");
        assert_eq!(resolve_classroom_name(RawField::from(&json!({"name": 7}))), "7");
    }

    // =============================================
    // resolve_classroom_capacity テスト
    // =============================================

    #[test]
    fn test_capacity_total_over_samples() {
        // 例外なし・常に整数 >= 0（u32なので型で保証）
        for value in samples() {
            let _ = resolve_classroom_capacity(RawField::from(&value));
        }
    }

    #[test]
    fn test_capacity_rules() {
        assert_eq!(resolve_classroom_capacity(RawField::Absent), 0);
        assert_eq!(resolve_classroom_capacity(RawField::from(&json!(30))), 30);
        assert_eq!(resolve_classroom_capacity(RawField::from(&json!(-4))), 0);
        assert_eq!(resolve_classroom_capacity(RawField::from(&json!(12.7))), 12);
        assert_eq!(resolve_classroom_capacity(RawField::from(&json!("30"))), 0);
        assert_eq!(resolve_classroom_capacity(RawField::from(&json!(true))), 0);
    }

    #[test]
    fn test_capacity_skips_non_numeric_key() {
        let value = json!({"capacity": "trente", "capacite": 25});
        assert_eq!(resolve_classroom_capacity(RawField::from(&value)), 25);

        let value = json!({"capacity": 40, "capacite": 25});
        assert_eq!(resolve_classroom_capacity(RawField::from(&value)), 40);

        let value = json!({"capacity": null, "capacite": "x"});
        assert_eq!(resolve_classroom_capacity(RawField::from(&value)), 0);
    }

    // =============================================
    // normalize_assignment テスト
    // =============================================

    #[test]
    fn test_normalize_nested_object_drops_null_candidates() {
        let record = json!({
            "classroom_id": 1,
            "classroom_name": {"nom_local": "A101", "capacite": 30},
            "assigned": 12,
            "candidats": [
                {"candidat_id": 5, "nom": "X", "prenom": "Y", "seat_number": 3},
                null
            ]
        });

        let a = normalize_assignment(&record);
        assert_eq!(a.classroom_id, Some(1));
        assert_eq!(a.classroom_name, "A101");
        assert_eq!(a.capacity, 30);
        assert_eq!(a.assigned, 12);
        assert_eq!(a.available, 18);
        assert_eq!(a.candidats.len(), 1);
        assert_eq!(a.candidats[0].seat_number, Some(3));
        assert_eq!(a.candidats[0].candidat_id, Some(5));
        assert_eq!(a.candidats[0].cne, "");
    }

    #[test]
    fn test_normalize_plain_string_name() {
        let record = json!({"classroom_id": 2, "classroom_name": "B202"});

        let a = normalize_assignment(&record);
        assert_eq!(a.classroom_name, "B202");
        assert_eq!(a.capacity, 0);
        assert_eq!(a.assigned, 0);
        assert!(a.candidats.is_empty());
    }

    #[test]
    fn test_normalize_string_name_with_flat_capacity() {
        let record = json!({"classroom_name": "B202", "capacite": 24, "assigned": 30});

        let a = normalize_assignment(&record);
        assert_eq!(a.capacity, 24);
        // 超過時の空席は0
        assert_eq!(a.available, 0);
    }

    #[test]
    fn test_normalize_classroom_subobject_preferred() {
        let record = json!({
            "classroom": {"name": "Amphi 3", "capacity": 120},
            "classroom_name": "ignored",
            "capacity": 10
        });

        let a = normalize_assignment(&record);
        assert_eq!(a.classroom_name, "Amphi 3");
        assert_eq!(a.capacity, 120);
    }

    #[test]
    fn test_normalize_malformed_fields() {
        let record = json!({
            "classroom_id": "abc",
            "assigned": "12",
            "available": 4,
            "candidats": {"0": {"nom": "X"}}
        });

        let a = normalize_assignment(&record);
        assert_eq!(a.classroom_id, None);
        assert_eq!(a.classroom_name, UNNAMED_ROOM);
        assert_eq!(a.assigned, 0);
        assert_eq!(a.available, 4);
        assert!(a.candidats.is_empty());
    }

    #[test]
    fn test_normalize_non_object_candidates_dropped() {
        let record = json!({"classroom_name": "C1", "candidats": [null, 3, "x", {"nom": "N"}]});

        let a = normalize_assignment(&record);
        assert_eq!(a.candidats.len(), 1);
        assert_eq!(a.candidats[0].nom, "N");
        assert_eq!(a.candidats[0].seat_number, None);
    }

    #[test]
    fn test_normalize_does_not_mutate_input() {
        let record = json!({"classroom_name": {"nom_local": "A"}, "candidats": [null]});
        let before = record.clone();
        let _ = normalize_assignment(&record);
        assert_eq!(record, before);
    }

    // =============================================
    // normalize_assignments テスト
    // =============================================

    #[test]
    fn test_normalize_assignments_empty() {
        let body = json!({"status": "success", "data": {"assignments": []}});

        let summary = normalize_assignments(&body).unwrap();
        assert!(summary.assignments.is_empty());
        assert_eq!(summary.stats.total_candidates, 0);
    }

    #[test]
    fn test_normalize_assignments_unexpected_format() {
        let bodies = [
            json!({"status": "error"}),
            json!({"status": "success", "data": {}}),
            json!({"status": "success"}),
            json!({"data": {"assignments": []}}),
            json!({"status": "success", "data": {"assignments": {}}}),
        ];

        for body in bodies.iter() {
            let result = normalize_assignments(body);
            assert!(
                matches!(result, Err(Error::UnexpectedFormat(_))),
                "UnexpectedFormatになるべき: {}",
                body
            );
        }
    }

    #[test]
    fn test_normalize_assignments_total_and_order() {
        let candidate = json!({"nom": "N", "prenom": "P"});
        let body = json!({
            "status": "success",
            "data": {"assignments": [
                {"classroom_name": "Z", "candidats": [candidate, candidate]},
                {"classroom_name": "A", "candidats": []},
                {"classroom_name": "M", "candidats": [candidate, candidate, candidate, candidate, candidate]}
            ]}
        });

        let summary = normalize_assignments(&body).unwrap();
        assert_eq!(summary.stats.total_candidates, 7);

        let names: Vec<&str> = summary
            .assignments
            .iter()
            .map(|a| a.classroom_name.as_str())
            .collect();
        assert_eq!(names, vec!["Z", "A", "M"]);
    }

    #[test]
    fn test_parse_assignments_response_invalid_json() {
        let result = parse_assignments_response("<html>502</html>");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_parse_assignments_response() {
        let response = r#"{"status":"success","data":{"assignments":[{"classroom_name":"B202","capacity":20}]}}"#;

        let summary = parse_assignments_response(response).unwrap();
        assert_eq!(summary.assignments.len(), 1);
        assert_eq!(summary.assignments[0].capacity, 20);
        assert_eq!(summary.stats.total_capacity, 20);
    }
}
