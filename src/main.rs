use clap::Parser;
use exam_admin::{api, cli, config, error, export, logging, report};
use api::ApiClient;
use cli::{Cli, Commands, Source};
use config::Config;
use error::{AdminError, Result};
use exam_admin_common::{
    filter_events, issue_all, paginate, parse_events, read_scan, Candidate, Convocation, EventFilter,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Assignments { source, json } => {
            let source = require_source(source.source())?;
            let client = ApiClient::from_config(&config)?;
            let summary = api::load_assignments(&client, &source).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", report::render_summary(&summary));
            }
        }

        Commands::Export { source, output, title } => {
            println!("📄 exam-admin - 出席簿出力\n");

            let source = require_source(source.source())?;
            let client = ApiClient::from_config(&config)?;

            println!("[1/2] 教室割当を取得中...");
            let summary = api::load_assignments(&client, &source).await?;
            println!("✔ {}教室 / {}名\n", summary.assignments.len(), summary.stats.total_candidates);

            println!("[2/2] Excelを生成中...");
            let output_dir = output.unwrap_or_else(|| std::path::PathBuf::from("."));
            let output_path = export::output_path_for(&output_dir, &title, "xlsx");
            export::excel::generate_excel(&summary, &output_path, &title)?;
            println!("✔ Excel出力: {}", output_path.display());
        }

        Commands::Convocation { student, exam, title, classroom, seat } => {
            let candidate = candidate_for_student(&student, seat);
            let classroom = classroom.unwrap_or_default();
            let convocation = Convocation::issue(&candidate, &exam, &title, &classroom, now_millis())
                .ok_or_else(|| AdminError::InvalidInput("受験者IDと試験IDは空にできません".into()))?;

            println!("Référence : {}", convocation.reference);
            println!("QR : {}", convocation.payload.to_qr_string()?);
        }

        Commands::Convocations { source, event_id, title, output } => {
            let exam_id = source
                .event_id()
                .map(str::to_string)
                .or(event_id)
                .ok_or_else(|| AdminError::InvalidInput("--input 使用時は --event-id が必要です".into()))?;
            let source = require_source(source.source())?;
            let client = ApiClient::from_config(&config)?;
            let summary = api::load_assignments(&client, &source).await?;

            let convocations = issue_all(&summary, &exam_id, &title, now_millis());
            let skipped = summary.stats.total_candidates.saturating_sub(convocations.len());
            if skipped > 0 {
                println!("⚠ {}名は受験者IDがないため発行しませんでした", skipped);
            }

            let json = serde_json::to_string_pretty(&convocations)?;
            std::fs::write(&output, json)?;
            println!("✔ {}件の受験票を保存: {}", convocations.len(), output.display());
        }

        Commands::Scan { data } => match read_scan(&data) {
            Some(payload) => {
                println!("Candidat : {}", payload.student_id);
                println!("Examen : {}", payload.exam_id);
                println!("Référence : {}", payload.reference);
                if let Some(classroom) = &payload.classroom {
                    println!("Salle : {}", classroom);
                }
                if let Some(seat) = payload.seat_number {
                    println!("Place : {}", seat);
                }
            }
            None => println!("QRコードを読み取れませんでした（無視）"),
        },

        Commands::Events { kind, period, query, formation, filiere, page, per_page, input } => {
            let body = match input {
                Some(path) => api::read_json_file(&path)?,
                None => ApiClient::from_config(&config)?.fetch_events(kind).await?,
            };
            let events = parse_events(&body, kind)?;

            let filter = EventFilter {
                period,
                kind: Some(kind),
                query,
                formation,
                filiere,
            };
            let now = chrono::Local::now().naive_local();
            let selected = filter_events(&events, &filter, now);
            let page = paginate(&selected, page, per_page.unwrap_or(config.page_size));

            print!("{}", report::render_events(&page));
        }

        Commands::Config { set_base_url, set_token, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
                changed = true;
                println!("✔ APIのURLを設定しました");
            }

            if let Some(token) = set_token {
                config.set_token(token);
                changed = true;
                println!("✔ APIトークンを設定しました");
            }

            if changed {
                config.save()?;
            }

            if show {
                println!("設定:");
                println!("  API URL: {}", config.base_url());
                println!("  APIトークン: {}", if config.token().is_some() { "設定済み" } else { "未設定" });
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  ページサイズ: {}", config.page_size);
            }
        }
    }

    Ok(())
}

fn require_source(source: Option<Source>) -> Result<Source> {
    source.ok_or_else(|| AdminError::InvalidInput("--exam / --concours / --input のいずれかを指定してください".into()))
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// 数値なら candidat_id、それ以外は CNE として扱う
fn candidate_for_student(student: &str, seat: Option<i64>) -> Candidate {
    let mut candidate = Candidate {
        seat_number: seat,
        ..Default::default()
    };
    match student.parse::<i64>() {
        Ok(id) => candidate.candidat_id = Some(id),
        Err(_) => candidate.cne = student.to_string(),
    }
    candidate
}
