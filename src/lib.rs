pub mod controller;
pub mod form;
pub mod report;
pub mod settings;
mod utils;

#[cfg(feature = "desktop")]
mod commands;

pub use controller::{FormSnapshot, ReportController};
pub use form::{FieldKey, FieldRecord, FormSession, FormState};
pub use report::{ReportArtifact, ReportDocument, ReportError, ReportRenderer};
pub use settings::{ReportSettings, SettingsStore};

#[cfg(feature = "desktop")]
pub(crate) struct AppState {
    pub(crate) controller: ReportController,
    pub(crate) settings: SettingsStore,
    pub(crate) app_data_dir: std::path::PathBuf,
}

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use commands::{
        download_report, generate_report, get_field_schema, get_form_snapshot,
        get_report_settings, open_report, set_field, set_report_settings,
    };
    use tauri::Manager;

    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Artificial Lift DPR generator starting up...");

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                let settings = SettingsStore::new(app_data_dir.join("settings.json"))?;
                let controller = ReportController::new(settings.output_root(&app_data_dir));

                app.manage(AppState {
                    controller,
                    settings,
                    app_data_dir,
                });

                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            get_form_snapshot,
            get_field_schema,
            set_field,
            generate_report,
            download_report,
            open_report,
            get_report_settings,
            set_report_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
