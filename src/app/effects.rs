use crate::app::{App, Message, Model, ToastLevel};

impl App {
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        if let Message::Save = msg {
            Self::save(model);
        }
    }

    fn save(model: &mut Model) {
        match model.save() {
            Ok(()) => {
                let name = model
                    .file_path
                    .file_name()
                    .map_or_else(|| "file".to_string(), |s| s.to_string_lossy().to_string());
                model.show_toast(ToastLevel::Info, format!("Saved {name}"));
                crate::perf::log_event(
                    "save.ok",
                    format!(
                        "path={} bytes={}",
                        model.file_path.display(),
                        model.document.len()
                    ),
                );
                if model.quit_confirmed {
                    model.should_quit = true;
                }
            }
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "save failed");
                model.show_toast(ToastLevel::Error, format!("Save failed: {err:#}"));
            }
        }
    }
}
