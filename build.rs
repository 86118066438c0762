fn main() {
    // The headless library needs no build step; only the desktop shell
    // generates the Tauri context.
    #[cfg(feature = "desktop")]
    tauri_build::build();
}
