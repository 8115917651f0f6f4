//! 割当ビューの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - Candidate: 座席に割り当てられた受験者
//! - ClassroomAssignment: 正規化済みの教室割当
//! - AssignmentSummary: 教室割当一覧 + 集計

use serde::{Deserialize, Serialize};

/// 受験者（candidat）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub candidat_id: Option<i64>,
    pub cne: String,
    pub cin: String,
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub seat_number: Option<i64>,
}

impl Candidate {
    /// 描画用のキー
    ///
    /// `candidat_id` がない場合は位置から生成する。再取得をまたいで
    /// 安定しないので、描画以外の用途には使わないこと。
    pub fn row_key(&self, index: usize) -> String {
        match self.candidat_id {
            Some(id) => format!("candidat-{}", id),
            None => format!("row-{}", index),
        }
    }
}

/// 正規化済みの教室割当
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassroomAssignment {
    pub classroom_id: Option<i64>,
    /// 常に空でない表示名
    pub classroom_name: String,
    pub capacity: u32,
    pub assigned: u32,
    pub available: u32,
    /// nullを含まない受験者リスト
    pub candidats: Vec<Candidate>,
}

impl ClassroomAssignment {
    /// 描画用のキー（`classroom_id` がなければ位置から生成）
    pub fn row_key(&self, index: usize) -> String {
        match self.classroom_id {
            Some(id) => format!("classroom-{}", id),
            None => format!("room-{}", index),
        }
    }

    /// 実際に着席している受験者数が定員を超えているか
    ///
    /// 定員0（不明）の教室は超過扱いにしない
    pub fn is_overfilled(&self) -> bool {
        self.capacity > 0 && self.candidats.len() > self.capacity as usize
    }
}

/// 集計値
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    /// 全教室の受験者数合計
    pub total_candidates: usize,
    /// 全教室の定員合計
    pub total_capacity: u64,
    /// 定員超過の教室数
    pub overfilled_classrooms: usize,
}

impl AggregateStats {
    pub fn from_assignments(assignments: &[ClassroomAssignment]) -> Self {
        assignments.iter().fold(Self::default(), |mut acc, a| {
            acc.total_candidates += a.candidats.len();
            acc.total_capacity += u64::from(a.capacity);
            if a.is_overfilled() {
                acc.overfilled_classrooms += 1;
            }
            acc
        })
    }
}

/// 正規化結果（描画層へ渡す）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentSummary {
    pub assignments: Vec<ClassroomAssignment>,
    pub stats: AggregateStats,
}
