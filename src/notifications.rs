//! Session-complete signals: terminal bell everywhere, a desktop
//! notification on macOS.

use std::io::Write;
#[cfg(target_os = "macos")]
use std::process::Command;

/// Signal that a focus session ran out
pub fn notify_session_complete(task_title: &str) {
    ring_bell();

    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "FlowState - Session Complete""#,
            task_title.replace('"', "\\\"")
        );

        if let Err(e) = Command::new("osascript").arg("-e").arg(&script).output() {
            log::warn!("Notification failed: {}", e);
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        let _ = task_title;
    }
}

fn ring_bell() {
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}
