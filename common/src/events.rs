//! 試験・コンクール一覧のフィルタ・並び替え・ページング
//!
//! 一覧はAPIから取得し、クライアント側で:
//! - 今後 / 過去の振り分け
//! - 種別・formation・filièreでの絞り込み、キーワード検索
//! - 日付順の並び替え
//! - ページング
//! を行う。

use crate::error::{Error, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 試験の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Exam,
    Concours,
}

impl EventKind {
    /// APIのパス・一覧キー
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Exam => "exams",
            EventKind::Concours => "concours",
        }
    }
}

impl std::str::FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exam" | "exams" | "examen" => Ok(EventKind::Exam),
            "concours" => Ok(EventKind::Concours),
            _ => Err(format!("Unknown kind: {}. Use exam or concours", s)),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Exam => write!(f, "Examen"),
            EventKind::Concours => write!(f, "Concours"),
        }
    }
}

/// 表示期間
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Period {
    #[default]
    All,
    Upcoming,
    Past,
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Period::All),
            "upcoming" | "a-venir" => Ok(Period::Upcoming),
            "past" | "passes" => Ok(Period::Past),
            _ => Err(format!("Unknown period: {}. Use all, upcoming, or past", s)),
        }
    }
}

/// 試験・コンクール1件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamEvent {
    pub id: String,
    pub kind: EventKind,
    pub title: String,
    pub date: NaiveDateTime,
    pub formation: String,
    pub filiere: String,
    pub location: String,
}

/// 一覧の絞り込み条件
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub period: Period,
    pub kind: Option<EventKind>,
    /// タイトル・formation・filièreの部分一致（大文字小文字無視）
    pub query: Option<String>,
    pub formation: Option<String>,
    pub filiere: Option<String>,
}

impl EventFilter {
    fn matches(&self, event: &ExamEvent, now: NaiveDateTime) -> bool {
        let in_period = match self.period {
            Period::All => true,
            Period::Upcoming => event.date >= now,
            Period::Past => event.date < now,
        };
        if !in_period {
            return false;
        }
        if self.kind.is_some_and(|k| k != event.kind) {
            return false;
        }
        if let Some(formation) = &self.formation {
            if !event.formation.eq_ignore_ascii_case(formation) {
                return false;
            }
        }
        if let Some(filiere) = &self.filiere {
            if !event.filiere.eq_ignore_ascii_case(filiere) {
                return false;
            }
        }
        match self.query.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => {
                let q = q.to_lowercase();
                [&event.title, &event.formation, &event.filiere]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&q))
            }
            _ => true,
        }
    }
}

/// 絞り込みと並び替え
///
/// 今後の予定は日付の昇順、過去は降順（新しい順）、全件は昇順。
pub fn filter_events(events: &[ExamEvent], filter: &EventFilter, now: NaiveDateTime) -> Vec<ExamEvent> {
    let mut selected: Vec<ExamEvent> = events
        .iter()
        .filter(|e| filter.matches(e, now))
        .cloned()
        .collect();

    match filter.period {
        Period::Past => selected.sort_by(|a, b| b.date.cmp(&a.date)),
        Period::All | Period::Upcoming => selected.sort_by(|a, b| a.date.cmp(&b.date)),
    }

    selected
}

/// ページング結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1始まり
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// ページを切り出す
///
/// ページ番号は `[1, total_pages]` に丸める。`per_page` が0なら1として扱う。
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * per_page;
    let end = std::cmp::min(start + per_page, total_items);

    Page {
        items: items[start..end].to_vec(),
        page,
        per_page,
        total_items,
        total_pages,
    }
}

/// 一覧レスポンスをパースする
///
/// `{ status: "success", data: { exams | concours | items: [...] } }` または
/// `data` 自体が配列の形を受け付ける。日付が読めないレコードは捨てる。
pub fn parse_events(body: &Value, kind: EventKind) -> Result<Vec<ExamEvent>> {
    if body.get("status").and_then(Value::as_str) != Some("success") {
        return Err(Error::UnexpectedFormat("status が success ではありません".into()));
    }

    let data = body
        .get("data")
        .ok_or_else(|| Error::UnexpectedFormat("data がありません".into()))?;

    let records = match data {
        Value::Array(items) => items,
        Value::Object(map) => [kind.as_str(), "items"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))
            .ok_or_else(|| Error::UnexpectedFormat(format!("data.{} がありません", kind.as_str())))?,
        _ => return Err(Error::UnexpectedFormat("data が不正です".into())),
    };

    let events: Vec<ExamEvent> = records
        .iter()
        .filter_map(|r| r.as_object())
        .filter_map(|map| {
            let event = event_from_map(map, kind);
            if event.is_none() {
                tracing::debug!(record = ?map.get("id"), "日付のないイベントをスキップ");
            }
            event
        })
        .collect();

    Ok(events)
}

fn event_from_map(map: &Map<String, Value>, kind: EventKind) -> Option<ExamEvent> {
    let date = first_text(map, &["date_examen", "date_concours", "date"]).and_then(|s| parse_date(&s))?;

    Some(ExamEvent {
        id: first_text(map, &["id", "exam_id", "concours_id"]).unwrap_or_default(),
        kind,
        title: first_text(map, &["intitule", "title", "nom"]).unwrap_or_default(),
        date,
        formation: first_text(map, &["formation"]).unwrap_or_default(),
        filiere: first_text(map, &["filiere"]).unwrap_or_default(),
        location: first_text(map, &["lieu", "location"]).unwrap_or_default(),
    })
}

/// キーを順に探して文字列化（ネストしたオブジェクトは nom / name）
fn first_text(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().filter_map(|k| map.get(*k)).find_map(|v| match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(inner) => first_text(inner, &["nom", "name"]),
        _ => None,
    })
}

/// 日付文字列をパース
///
/// 対応形式: RFC3339、`YYYY-MM-DD HH:MM:SS`、`YYYY-MM-DDTHH:MM:SS`、`YYYY-MM-DD`
///
/// 比較相手の「現在時刻」はローカル時刻なので、オフセット付きの日時もローカル時刻に直す。
fn parse_date(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
