use clap::{Args, Parser, Subcommand};
use exam_admin_common::{EventKind, Period};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "exam-admin")]
#[command(about = "試験・コンクール管理ツール（教室割当・受験票）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 割当データの取得元（いずれか1つ）
#[derive(Args, Clone, Debug)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// 試験ID（APIから取得）
    #[arg(long)]
    pub exam: Option<String>,

    /// コンクールID（APIから取得）
    #[arg(long)]
    pub concours: Option<String>,

    /// 保存済みのAPIレスポンスJSON
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

/// 取得元の解決結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Remote { kind: EventKind, id: String },
    File(PathBuf),
}

impl SourceArgs {
    pub fn source(&self) -> Option<Source> {
        if let Some(id) = &self.exam {
            return Some(Source::Remote { kind: EventKind::Exam, id: id.clone() });
        }
        if let Some(id) = &self.concours {
            return Some(Source::Remote { kind: EventKind::Concours, id: id.clone() });
        }
        self.input.clone().map(Source::File)
    }

    /// APIから取得する場合の試験ID
    pub fn event_id(&self) -> Option<&str> {
        self.exam.as_deref().or(self.concours.as_deref())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// 教室割当の一覧を表示
    Assignments {
        #[command(flatten)]
        source: SourceArgs,

        /// 正規化結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 出席簿Excelを生成
    Export {
        #[command(flatten)]
        source: SourceArgs,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// シートのタイトル
        #[arg(short, long, default_value = "Feuille d'émargement")]
        title: String,
    },

    /// 受験票を1枚発行（参照番号とQRペイロード）
    Convocation {
        /// 受験者ID
        #[arg(long, required = true)]
        student: String,

        /// 試験ID
        #[arg(long, required = true)]
        exam: String,

        /// 試験名
        #[arg(short, long, default_value = "")]
        title: String,

        /// 教室名
        #[arg(long)]
        classroom: Option<String>,

        /// 座席番号
        #[arg(long)]
        seat: Option<i64>,
    },

    /// 割当済みの全受験者に受験票を発行してJSONに保存
    Convocations {
        #[command(flatten)]
        source: SourceArgs,

        /// 試験ID（--input 使用時）
        #[arg(long)]
        event_id: Option<String>,

        /// 試験名
        #[arg(short, long, default_value = "")]
        title: String,

        /// 出力JSONファイル
        #[arg(short, long, default_value = "convocations.json")]
        output: PathBuf,
    },

    /// スキャンしたQRデータを読み取る
    Scan {
        /// QRコードの中身（JSON）
        #[arg(required = true)]
        data: String,
    },

    /// 試験・コンクールの一覧
    Events {
        /// 種別 (exam/concours)
        #[arg(short, long, default_value = "exam")]
        kind: EventKind,

        /// 期間 (all/upcoming/past)
        #[arg(short, long, default_value = "upcoming")]
        period: Period,

        /// キーワード検索
        #[arg(short, long)]
        query: Option<String>,

        /// formationで絞り込み
        #[arg(long)]
        formation: Option<String>,

        /// filièreで絞り込み
        #[arg(long)]
        filiere: Option<String>,

        /// ページ番号（1始まり）
        #[arg(long, default_value = "1")]
        page: usize,

        /// 1ページの件数（省略時は設定値）
        #[arg(long)]
        per_page: Option<usize>,

        /// 保存済みのAPIレスポンスJSON
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// APIのベースURLを設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// APIトークンを設定
        #[arg(long)]
        set_token: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
