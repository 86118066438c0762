//! Tauri commands backing the DPR form page.

use tauri::{AppHandle, Emitter, State};
use tauri_plugin_opener::OpenerExt;

use crate::{
    controller::FormSnapshot,
    form::{form_schema, FieldDescriptor, FieldRecord},
    report::{ReportArtifact, ReportDownload},
    settings::ReportSettings,
    AppState,
};

#[tauri::command]
pub async fn get_form_snapshot(state: State<'_, AppState>) -> Result<FormSnapshot, String> {
    Ok(state.controller.snapshot().await)
}

#[tauri::command]
pub fn get_field_schema() -> Vec<FieldDescriptor> {
    form_schema()
}

#[tauri::command]
pub async fn set_field(
    state: State<'_, AppState>,
    name: String,
    value: String,
) -> Result<FieldRecord, String> {
    state
        .controller
        .set_field(&name, value)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn generate_report(
    state: State<'_, AppState>,
    app_handle: AppHandle,
) -> Result<ReportArtifact, String> {
    let artifact = state
        .controller
        .generate_report()
        .await
        .map_err(|e| e.to_string())?;

    app_handle
        .emit("report-generated", &artifact)
        .map_err(|e| e.to_string())?;

    Ok(artifact)
}

#[tauri::command]
pub async fn download_report(
    state: State<'_, AppState>,
) -> Result<Option<ReportDownload>, String> {
    state
        .controller
        .download_report()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn open_report(state: State<'_, AppState>, app_handle: AppHandle) -> Result<(), String> {
    let report = state
        .controller
        .current_report()
        .await
        .ok_or_else(|| "no report has been generated yet".to_string())?;

    app_handle
        .opener()
        .open_path(report.path.to_string_lossy(), None::<&str>)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_report_settings(state: State<AppState>) -> Result<ReportSettings, String> {
    Ok(state.settings.report())
}

#[tauri::command]
pub async fn set_report_settings(
    settings: ReportSettings,
    state: State<'_, AppState>,
) -> Result<(), String> {
    state
        .settings
        .update_report(settings)
        .map_err(|e| e.to_string())?;

    let output_root = state.settings.output_root(&state.app_data_dir);
    state.controller.relocate(output_root).await;
    Ok(())
}
