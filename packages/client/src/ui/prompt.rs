//! Blocking readline input on a dedicated thread.
//!
//! rustyline blocks, so it gets its own thread; lines arrive over a
//! channel the async runner can `select!` on. The channel closes on EOF
//! or interrupt, which the runner treats as the quit signal.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

/// Spawn the readline thread and return the stream of submitted lines.
pub fn spawn_input_thread(prompt: &'static str) -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(e) => {
                tracing::error!("Failed to initialize line editor: {}", e);
                return;
            }
        };

        loop {
            match editor.readline(prompt) {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    tracing::error!("Readline error: {}", e);
                    break;
                }
            }
        }
        // Dropping tx closes the channel and signals quit.
    });

    rx
}
