//! 受験票（convocation）の参照番号とQRペイロード
//!
//! 参照番号は `受験者ID-試験ID-生成時刻(ms)` の連結。
//! 同じ受験者・試験でも生成時刻が違えば別の番号になるが、
//! 一意性の保証はミリ秒精度まで。
//!
//! 生成時刻は呼び出し側が渡す（CLIはchrono、WASMはDate.now()）。

use crate::error::{Error, Result};
use crate::types::{AssignmentSummary, Candidate};
use serde::{Deserialize, Serialize};

/// 参照番号の区切り文字
pub const REFERENCE_DELIMITER: char = '-';

/// 参照番号を生成する
///
/// # Examples
/// ```
/// use exam_admin_common::convocation_reference;
///
/// assert_eq!(convocation_reference("1542", "EX-7", 1700000000000), "1542-EX-7-1700000000000");
/// ```
pub fn convocation_reference(student_id: &str, exam_id: &str, generated_at_ms: i64) -> String {
    format!(
        "{}{d}{}{d}{}",
        student_id,
        exam_id,
        generated_at_ms,
        d = REFERENCE_DELIMITER
    )
}

/// QRコードに埋め込むペイロード
///
/// スキャン側はこのJSONをそのまま読み戻す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    pub student_id: String,
    pub exam_id: String,
    /// 生成時刻（UNIXエポックからのミリ秒）
    pub generated_at: i64,
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classroom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat_number: Option<i64>,
}

impl QrPayload {
    pub fn new(student_id: &str, exam_id: &str, generated_at_ms: i64) -> Self {
        Self {
            student_id: student_id.to_string(),
            exam_id: exam_id.to_string(),
            generated_at: generated_at_ms,
            reference: convocation_reference(student_id, exam_id, generated_at_ms),
            classroom: None,
            seat_number: None,
        }
    }

    /// QRエンコード用のJSON文字列
    pub fn to_qr_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// 受験票1枚分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Convocation {
    pub reference: String,
    pub exam_id: String,
    pub exam_title: String,
    pub candidate: Candidate,
    pub classroom: String,
    pub payload: QrPayload,
}

impl Convocation {
    /// 受験者・試験・教室から受験票を発行する
    ///
    /// 受験者IDは `candidat_id`、`cne`、`cin` の順で最初にあるもの。
    /// 受験者IDも試験IDもスキャンで読み戻せる値でなければならないので、
    /// どちらかが空なら発行しない（`None`）。
    pub fn issue(
        candidate: &Candidate,
        exam_id: &str,
        exam_title: &str,
        classroom: &str,
        generated_at_ms: i64,
    ) -> Option<Self> {
        let exam_id = exam_id.trim();
        let Some(student_id) = student_identity(candidate) else {
            tracing::warn!(nom = %candidate.nom, prenom = %candidate.prenom, "受験者IDがないため受験票を発行しない");
            return None;
        };
        if exam_id.is_empty() {
            tracing::warn!(student_id = %student_id, "試験IDが空のため受験票を発行しない");
            return None;
        }

        let mut payload = QrPayload::new(&student_id, exam_id, generated_at_ms);
        payload.classroom = Some(classroom.to_string());
        payload.seat_number = candidate.seat_number;

        Some(Self {
            reference: payload.reference.clone(),
            exam_id: exam_id.to_string(),
            exam_title: exam_title.to_string(),
            candidate: candidate.clone(),
            classroom: classroom.to_string(),
            payload,
        })
    }
}

/// 受験票に載せる受験者ID
fn student_identity(candidate: &Candidate) -> Option<String> {
    if let Some(id) = candidate.candidat_id {
        return Some(id.to_string());
    }
    [&candidate.cne, &candidate.cin]
        .into_iter()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// 割当済みの全受験者に受験票を発行する
///
/// 受験者IDのない受験者は飛ばす。同じIDが2回出てきた場合も
/// 参照番号が重複するので2件目以降は飛ばす。
pub fn issue_all(
    summary: &AssignmentSummary,
    exam_id: &str,
    exam_title: &str,
    generated_at_ms: i64,
) -> Vec<Convocation> {
    let mut issued: Vec<Convocation> = Vec::new();

    for assignment in &summary.assignments {
        for candidate in &assignment.candidats {
            let Some(convocation) =
                Convocation::issue(candidate, exam_id, exam_title, &assignment.classroom_name, generated_at_ms)
            else {
                continue;
            };
            if issued.iter().any(|c| c.reference == convocation.reference) {
                tracing::warn!(reference = %convocation.reference, "参照番号が重複するため飛ばす");
                continue;
            }
            issued.push(convocation);
        }
    }

    issued
}

/// スキャンしたデータをパースする
///
/// # Returns
/// * `Ok(QrPayload)` - パース成功
/// * `Err(Error::Scan)` - JSONでない、または受験者・試験IDがない
pub fn parse_scan(data: &str) -> Result<QrPayload> {
    let payload: QrPayload = serde_json::from_str(data.trim())
        .map_err(|e| Error::Scan(format!("QRデータを読み取れません: {}", e)))?;

    if payload.student_id.is_empty() || payload.exam_id.is_empty() {
        return Err(Error::Scan("受験者IDまたは試験IDが空です".into()));
    }

    Ok(payload)
}

/// スキャン画面向けの読み取り
///
/// 不正なデータはログに残して無視する（画面は止めない）。
pub fn read_scan(data: &str) -> Option<QrPayload> {
    match parse_scan(data) {
        Ok(payload) => Some(payload),
        Err(e) => {
            tracing::warn!(error = %e, "スキャンデータを無視");
            None
        }
    }
}
